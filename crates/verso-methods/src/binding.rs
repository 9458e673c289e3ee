// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input binding: untyped caller input to per-method request structs.
//!
//! Missing declared variables fail fast with [`VersoError::MissingInput`].
//! Strict methods also reject undeclared keys; lenient ones drop them.

use serde::Serialize;
use serde::de::DeserializeOwned;
use verso_core::{PromptInput, VersoError};

/// How undeclared input keys are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Input keys must equal the declared variables.
    Exact,
    /// Undeclared keys are ignored.
    Lenient,
}

/// Checks `input` against `declared` and deserializes it into `T`.
pub fn bind<T: DeserializeOwned>(
    method: &str,
    declared: &[&str],
    mut input: PromptInput,
    strictness: Strictness,
) -> Result<T, VersoError> {
    if let Some(missing) = declared.iter().find(|v| !input.contains_key(**v)) {
        return Err(VersoError::MissingInput {
            method: method.to_string(),
            variable: missing.to_string(),
        });
    }

    match strictness {
        Strictness::Exact => {
            if let Some(extra) = input.keys().find(|k| !declared.contains(&k.as_str())) {
                return Err(VersoError::UnexpectedInput {
                    method: method.to_string(),
                    variable: extra.clone(),
                });
            }
        }
        Strictness::Lenient => input.retain(|k, _| declared.contains(&k.as_str())),
    }

    let value = serde_json::to_value(input)
        .map_err(|e| VersoError::Internal(format!("failed to encode input: {e}")))?;
    serde_json::from_value(value)
        .map_err(|e| VersoError::Internal(format!("failed to bind input for `{method}`: {e}")))
}

/// Flattens a bound request back into template variables.
pub fn template_variables<T: Serialize>(request: &T) -> Result<PromptInput, VersoError> {
    let value = serde_json::to_value(request)
        .map_err(|e| VersoError::Internal(format!("failed to encode request: {e}")))?;
    serde_json::from_value(value)
        .map_err(|e| VersoError::Internal(format!("request is not a flat string map: {e}")))
}
