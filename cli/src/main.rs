// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Agent Hub Console
//!
//! The `agent-hub` binary drives an in-process [`HubSession`]: a simulated
//! fleet of AI agents with drifting performance metrics and canned chat
//! replies. Nothing is persisted; every invocation starts a fresh session.
//!
//! ## Commands
//!
//! - `agent-hub run [--duration SECS]` - Live dashboard fed by the event bus
//! - `agent-hub agents list|show` - Inspect the startup fleet
//! - `agent-hub chat <AGENT> <MESSAGE>` - Send one message and wait for the reply
//! - `agent-hub languages` - Supported display languages
//! - `agent-hub config show|validate|generate` - Configuration management
//!
//! [`HubSession`]: agent_hub_core::HubSession

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use agent_hub::commands::{self, AgentsCommand, ConfigCommand};

/// Agent Hub - Manage and chat with a simulated AI agent fleet
#[derive(Parser)]
#[command(name = "agent-hub")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "AGENT_HUB_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "AGENT_HUB_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a live dashboard session
    #[command(name = "run")]
    Run {
        /// Stop after this many seconds (default: until Ctrl+C or :quit)
        #[arg(long, value_name = "SECS")]
        duration: Option<u64>,
    },

    /// Agent fleet inspection
    #[command(name = "agents")]
    Agents {
        #[command(subcommand)]
        command: AgentsCommand,
    },

    /// Send a message to an agent and print the conversation
    #[command(name = "chat")]
    Chat {
        /// Agent id or display name; seed agents also match their name in any language
        agent: String,

        /// Message text
        message: String,

        /// Seconds to wait for the reply
        #[arg(long, default_value = "5")]
        timeout: u64,
    },

    /// List supported display languages
    #[command(name = "languages")]
    Languages,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Run { duration }) => commands::run::handle_command(duration, cli.config).await,
        Some(Commands::Agents { command }) => {
            commands::agents::handle_command(command, cli.config).await
        }
        Some(Commands::Chat {
            agent,
            message,
            timeout,
        }) => commands::chat::handle_command(&agent, &message, timeout, cli.config).await,
        Some(Commands::Languages) => commands::languages::handle_command(cli.config).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
