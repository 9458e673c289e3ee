// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates with named `{placeholders}`.
//!
//! Placeholder names are taken verbatim between the braces, so names with
//! spaces such as `{Input Language}` are allowed. `{{` and `}}` render as
//! literal braces. Templates are parsed eagerly: a malformed template is an
//! error at construction time, an unbound placeholder is an error at
//! formatting time.

use crate::error::VersoError;
use crate::types::{ChatMessage, PromptInput, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A plain string template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses a template string.
    pub fn new(template: impl Into<String>) -> Result<Self, VersoError> {
        let source = template.into();
        let segments = parse(&source)?;
        Ok(Self { source, segments })
    }

    /// Returns the raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns placeholder names in order of first appearance, without duplicates.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitutes every placeholder with its value from `input`.
    ///
    /// Keys in `input` that the template does not reference are ignored.
    pub fn format(&self, input: &PromptInput) -> Result<String, VersoError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value = input.get(name).ok_or_else(|| {
                        VersoError::Template(format!("no value bound for placeholder `{name}`"))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// A template for a single role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    role: Role,
    template: PromptTemplate,
}

impl MessageTemplate {
    pub fn new(role: Role, template: &str) -> Result<Self, VersoError> {
        Ok(Self {
            role,
            template: PromptTemplate::new(template)?,
        })
    }

    /// A system instruction message.
    pub fn system(template: &str) -> Result<Self, VersoError> {
        Self::new(Role::System, template)
    }

    /// A message authored by the human caller.
    pub fn human(template: &str) -> Result<Self, VersoError> {
        Self::new(Role::User, template)
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// An ordered sequence of message templates rendered into a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    pub fn from_messages(messages: Vec<MessageTemplate>) -> Self {
        Self { messages }
    }

    /// Placeholder names across all messages, in order of first appearance.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for message in &self.messages {
            for name in message.template.input_variables() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Renders every message, preserving order and roles.
    pub fn format_messages(&self, input: &PromptInput) -> Result<Vec<ChatMessage>, VersoError> {
        self.messages
            .iter()
            .map(|m| Ok(ChatMessage::new(m.role, m.template.format(input)?)))
            .collect()
    }
}

fn parse(template: &str) -> Result<Vec<Segment>, VersoError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(VersoError::Template(format!(
                                "nested `{{` inside placeholder starting at byte {pos}"
                            )));
                        }
                        other => name.push(other),
                    }
                }
                if !closed {
                    return Err(VersoError::Template(format!(
                        "unclosed placeholder starting at byte {pos}"
                    )));
                }
                if name.trim().is_empty() {
                    return Err(VersoError::Template(format!(
                        "empty placeholder at byte {pos}"
                    )));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(VersoError::Template(format!(
                        "unmatched `}}` at byte {pos}"
                    )));
                }
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> PromptInput {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn variables_with_spaces_are_extracted_in_order() {
        let t = PromptTemplate::new(
            "Translate the following text from {Input Language} to {Output Language}\n```{Text}```\n\n",
        )
        .unwrap();
        assert_eq!(
            t.input_variables(),
            vec!["Input Language", "Output Language", "Text"]
        );
    }

    #[test]
    fn repeated_placeholder_is_listed_once() {
        let t = PromptTemplate::new("{a} and {b} and {a}").unwrap();
        assert_eq!(t.input_variables(), vec!["a", "b"]);
        let out = t.format(&input(&[("a", "x"), ("b", "y")])).unwrap();
        assert_eq!(out, "x and y and x");
    }

    #[test]
    fn format_substitutes_values() {
        let t = PromptTemplate::new("Write me very short a poem about {Topic}.").unwrap();
        let out = t.format(&input(&[("Topic", "autumn leaves")])).unwrap();
        assert_eq!(out, "Write me very short a poem about autumn leaves.");
    }

    #[test]
    fn format_ignores_unreferenced_keys() {
        let t = PromptTemplate::new("{a}").unwrap();
        let out = t.format(&input(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn missing_value_is_a_template_error() {
        let t = PromptTemplate::new("hello {name}").unwrap();
        let err = t.format(&PromptInput::new()).unwrap_err();
        assert!(matches!(err, VersoError::Template(ref m) if m.contains("name")), "got: {err}");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let t = PromptTemplate::new("{{literal}} {x}").unwrap();
        assert_eq!(t.input_variables(), vec!["x"]);
        assert_eq!(t.format(&input(&[("x", "v")])).unwrap(), "{literal} v");
    }

    #[test]
    fn malformed_templates_are_rejected() {
        assert!(PromptTemplate::new("open {never closed").is_err());
        assert!(PromptTemplate::new("stray } brace").is_err());
        assert!(PromptTemplate::new("empty {} name").is_err());
        assert!(PromptTemplate::new("nested {a{b}}").is_err());
    }

    #[test]
    fn chat_template_renders_roles_in_order() {
        let chat = ChatPromptTemplate::from_messages(vec![
            MessageTemplate::system(
                "You are a helpful assistant that translates {Input Language} to {Output Language}.",
            )
            .unwrap(),
            MessageTemplate::human("{Text}").unwrap(),
        ]);
        assert_eq!(
            chat.input_variables(),
            vec!["Input Language", "Output Language", "Text"]
        );

        let messages = chat
            .format_messages(&input(&[
                ("Input Language", "English"),
                ("Output Language", "French"),
                ("Text", "I love programming."),
            ]))
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(
            messages[0].content,
            "You are a helpful assistant that translates English to French."
        );
        assert_eq!(messages[1], ChatMessage::user("I love programming."));
    }
}
