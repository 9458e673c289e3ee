// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in prompt methods, in registry order.

pub mod gdias;
pub mod poem;
pub mod translation;

pub use gdias::GdiasQuestion;
pub use poem::PoemRequest;
pub use translation::TranslationRequest;

use std::sync::Arc;

use verso_core::CompletionProvider;

use crate::descriptor::MethodDescriptor;

/// Builds the descriptors of every built-in method around one shared provider.
pub fn builtin_descriptors(
    provider: Arc<dyn CompletionProvider>,
    stream_buffer: usize,
) -> Vec<MethodDescriptor> {
    vec![
        gdias::descriptor(Arc::clone(&provider)),
        translation::chat_descriptor(Arc::clone(&provider)),
        translation::completion_descriptor(Arc::clone(&provider)),
        poem::descriptor(provider, stream_buffer),
    ]
}
