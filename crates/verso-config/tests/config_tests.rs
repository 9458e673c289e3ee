// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Verso configuration system.

use verso_config::diagnostic::ConfigError;
use verso_config::{load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
stream_buffer = 16

[openai]
api_key = "sk-test"
organization = "org-123"
base_url = "http://localhost:9000/v1"
chat_model = "gpt-4o-mini"
completion_model = "davinci-002"
max_tokens = 128
timeout_secs = 30
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.server.stream_buffer, 16);
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.organization.as_deref(), Some("org-123"));
    assert_eq!(config.openai.base_url, "http://localhost:9000/v1");
    assert_eq!(config.openai.chat_model, "gpt-4o-mini");
    assert_eq!(config.openai.completion_model, "davinci-002");
    assert_eq!(config.openai.max_tokens, 128);
    assert_eq!(config.openai.timeout_secs, 30);
}

#[test]
fn empty_toml_yields_valid_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
}

#[test]
fn unknown_key_is_reported_with_suggestion() {
    let toml = "[server]\nprot = 8080\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key should be rejected");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "prot");
            assert_eq!(suggestion.as_deref(), Some("port"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[anthropic]\napi_key = \"x\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "anthropic"));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { .. }),
        "got: {errors:?}"
    );
}

#[test]
fn semantic_validation_runs_after_parse() {
    let errors = load_and_validate_str("[openai]\nbase_url = \"localhost\"\n").unwrap_err();
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))
    ));
}

#[test]
fn verso_env_vars_reach_their_sections() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("verso.toml", "[server]\nport = 4000\n")?;
        jail.set_env("VERSO_SERVER_PORT", "5050");
        jail.set_env("VERSO_SERVER_LOG_LEVEL", "DEBUG");
        jail.set_env("VERSO_OPENAI_API_KEY", "sk-env");
        jail.set_env("VERSO_OPENAI_CHAT_MODEL", "gpt-4o-mini");

        let config = verso_config::load_and_validate_path(std::path::Path::new("verso.toml"))
            .map_err(|errors| format!("config rejected: {errors:?}"))?;
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.server.log_level, "DEBUG");
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        Ok(())
    });
}
