// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered, immutable registry of prompt methods.

use std::sync::Arc;

use verso_core::{CompletionProvider, VersoError};

use crate::descriptor::MethodDescriptor;
use crate::methods;

/// Registry of prompt methods, in declaration order.
///
/// Fixed at construction; the dispatcher iterates it to mount routes and
/// looks methods up by id.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: Vec<MethodDescriptor>,
}

impl MethodRegistry {
    /// Creates a registry from already-built descriptors.
    pub fn new(methods: Vec<MethodDescriptor>) -> Self {
        Self { methods }
    }

    /// Creates the registry of built-in methods sharing `provider`.
    pub fn builtin(provider: Arc<dyn CompletionProvider>, stream_buffer: usize) -> Self {
        Self::new(methods::builtin_descriptors(provider, stream_buffer))
    }

    /// Looks up a method by id.
    pub fn get(&self, id: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.id == id)
    }

    /// Looks up a method by id, failing with [`VersoError::MethodNotFound`].
    pub fn resolve(&self, id: &str) -> Result<&MethodDescriptor, VersoError> {
        self.get(id)
            .ok_or_else(|| VersoError::MethodNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter()
    }

    /// Returns the number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<'a> IntoIterator for &'a MethodRegistry {
    type Item = &'a MethodDescriptor;
    type IntoIter = std::slice::Iter<'a, MethodDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}
