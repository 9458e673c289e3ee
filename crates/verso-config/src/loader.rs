// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/verso/verso.toml`, then `~/.config/verso/verso.toml`,
//! then `./verso.toml`, with `VERSO_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VersoConfig;

/// File name searched for in every configuration directory.
pub const CONFIG_FILE_NAME: &str = "verso.toml";

/// Configuration files consulted by [`load_config`], lowest priority first.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/verso").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("verso").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Build the layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let figment = config_file_candidates()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)));
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<VersoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VersoConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<VersoConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(VersoConfig::default()))
}

/// Environment provider mapping `VERSO_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses an explicit section map rather than `Env::split("_")` because key
/// names contain underscores: `VERSO_OPENAI_API_KEY` is `openai.api_key`,
/// not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("VERSO_").map(|key| {
        // Keys arrive as written in the environment, e.g. `OPENAI_API_KEY`.
        key.as_str()
            .to_ascii_lowercase()
            .replacen("server_", "server.", 1)
            .replacen("openai_", "openai.", 1)
            .into()
    })
}
