// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verso - HTTP prompt methods over an OpenAI-compatible completion API.
//!
//! This is the binary entry point for the Verso gateway.

mod methods;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use verso_config::VersoConfig;

/// Verso - HTTP prompt methods over an OpenAI-compatible completion API.
#[derive(Parser, Debug)]
#[command(name = "verso", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start the HTTP gateway (default).
    Serve,
    /// List the prompt methods and their routes.
    Methods,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => verso_config::load_and_validate_path(path),
        None => verso_config::load_and_validate(),
    };
    let config: VersoConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            verso_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("verso: {e}");
                std::process::exit(1);
            }
        }
        Commands::Methods => {
            print!("{}", methods::method_table(config.server.stream_buffer));
        }
        Commands::Config => match toml::to_string_pretty(&config.redacted()) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("verso: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["verso"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["verso", "methods", "--config", "/tmp/verso.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Methods));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/verso.toml")));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["verso", "shell"]).is_err());
    }

    #[test]
    fn defaults_render_without_secrets() {
        let mut config = verso_config::load_and_validate_str("").unwrap();
        config.openai.api_key = Some("sk-test".into());
        let rendered = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(rendered.contains("[server]"));
        assert!(!rendered.contains("sk-test"));
    }
}
