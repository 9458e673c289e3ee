// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Verso.
//!
//! TOML configuration with strict key checking, XDG file hierarchy lookup,
//! `VERSO_*` environment overrides, and miette diagnostics with typo
//! suggestions.
//!
//! ```no_run
//! let config = verso_config::load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{OpenAiConfig, ServerConfig, VersoConfig};

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<VersoConfig, Vec<ConfigError>> {
    finish(loader::load_config(), read_sources(loader::config_file_candidates()))
}

/// Load configuration from one explicit file and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<VersoConfig, Vec<ConfigError>> {
    finish(
        loader::load_config_from_path(path),
        read_sources(vec![path.to_path_buf()]),
    )
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<VersoConfig, Vec<ConfigError>> {
    finish(
        loader::load_config_from_str(toml_content),
        vec![("<inline>".to_string(), toml_content.to_string())],
    )
}

fn finish(
    loaded: Result<VersoConfig, figment::Error>,
    sources: Vec<(String, String)>,
) -> Result<VersoConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!("configuration loaded and validated");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources)),
    }
}

/// Read the contents of whichever candidate files exist, for error spans.
fn read_sources(paths: Vec<std::path::PathBuf>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let display = std::fs::canonicalize(&path)
                .unwrap_or(path)
                .display()
                .to_string();
            Some((display, content))
        })
        .collect()
}
