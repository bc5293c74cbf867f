//! Brainrot command-line client.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod files;
mod render;

use crate::commands::App;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the backend is reachable
    Health,
    /// Ask the backend to remove earlier temporary artifacts
    Cleanup,
    /// Upload materials, wait for processing and list the videos
    Generate {
        /// Assignment file (pdf, doc, docx, txt)
        #[arg(short, long)]
        assignment: Vec<PathBuf>,
        /// Learning materials (pdf, ppt, pptx, doc, docx, txt, jpg, png)
        materials: Vec<PathBuf>,
    },
    /// List the backend's videos
    Videos,
    /// Watch videos in the interactive player
    Play {
        /// Position to start at
        #[arg(short, long)]
        index: Option<String>,
    },
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("brainrot=info,brainrot_flow=info,brainrot_client=info,warn"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // reqwest's rustls backend needs a process-wide crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    init_tracing();

    let config = AppConfig::from_env();
    info!(api = %config.client.base_url, "Starting brainrot");

    let app = App::new(config)?;
    match cli.command {
        Command::Health => app.health().await,
        Command::Cleanup => app.cleanup().await,
        Command::Generate {
            assignment,
            materials,
        } => app.generate(&assignment, &materials).await,
        Command::Videos => app.videos().await,
        Command::Play { index } => app.play(index.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::try_parse_from([
            "brainrot",
            "generate",
            "--assignment",
            "hw1.pdf",
            "slides.pptx",
            "notes.txt",
        ])
        .unwrap();

        match cli.command {
            Command::Generate {
                assignment,
                materials,
            } => {
                assert_eq!(assignment, vec![PathBuf::from("hw1.pdf")]);
                assert_eq!(materials.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_play_index_is_raw() {
        let cli = Cli::try_parse_from(["brainrot", "play", "--index", "2x"]).unwrap();
        assert!(matches!(cli.command, Command::Play { index: Some(ref i) } if i == "2x"));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["brainrot", "serve"]).is_err());
    }
}
