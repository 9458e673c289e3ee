// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt methods for Verso.
//!
//! Each method pairs an HTTP route with a prompt template. Invoking it binds
//! the caller's variables, calls the shared [`CompletionProvider`] at
//! temperature zero, and returns either the completion or a live
//! [`TokenStream`].
//!
//! [`CompletionProvider`]: verso_core::CompletionProvider

pub mod binding;
pub mod descriptor;
pub mod methods;
pub mod registry;
pub mod relay;

pub use binding::{Strictness, bind};
pub use descriptor::{MethodDescriptor, MethodHandler, MethodOutput, Verb};
pub use methods::{GdiasQuestion, PoemRequest, TranslationRequest};
pub use registry::MethodRegistry;
pub use relay::{TokenStream, relay};
