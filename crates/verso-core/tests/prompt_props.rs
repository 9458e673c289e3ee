// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for prompt template parsing and formatting.

use proptest::prelude::*;
use verso_core::{PromptInput, PromptTemplate};

proptest! {
    /// Text without braces is a template with no placeholders that renders unchanged.
    #[test]
    fn brace_free_text_renders_verbatim(text in "[^{}]*") {
        let template = PromptTemplate::new(text.clone()).unwrap();
        prop_assert!(template.input_variables().is_empty());
        prop_assert_eq!(template.format(&PromptInput::new()).unwrap(), text);
    }

    /// Every placeholder is replaced by its bound value and nothing else changes.
    #[test]
    fn placeholders_are_substituted(
        prefix in "[^{}]*",
        name in "[A-Za-z][A-Za-z ]{0,15}",
        value in ".*",
        suffix in "[^{}]*",
    ) {
        let template = PromptTemplate::new(format!("{prefix}{{{name}}}{suffix}")).unwrap();
        prop_assert_eq!(template.input_variables(), vec![name.as_str()]);

        let mut input = PromptInput::new();
        input.insert(name.clone(), value.clone());
        prop_assert_eq!(
            template.format(&input).unwrap(),
            format!("{prefix}{value}{suffix}")
        );
    }
}
