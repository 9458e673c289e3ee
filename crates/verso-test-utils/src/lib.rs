// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Verso integration tests.
//!
//! Provides [`MockProvider`], a scriptable completion provider for fast,
//! deterministic, CI-runnable tests without external services.

pub mod mock_provider;

pub use mock_provider::{MockProvider, RecordedRequest};
