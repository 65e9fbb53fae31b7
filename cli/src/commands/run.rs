// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Live dashboard
//!
//! Starts a session, prints the dashboard, then multiplexes three sources
//! until the session ends: hub events (simulation ticks, chat replies),
//! console lines from stdin, and the stop signal (Ctrl+C, SIGTERM, or the
//! optional duration).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};

use agent_hub_core::application::AgentLifecycleService;
use agent_hub_core::domain::events::HubEvent;
use agent_hub_core::domain::language::View;
use agent_hub_core::infrastructure::event_bus::EventBusError;
use agent_hub_core::HubSession;

use crate::commands::console::{edit_line, parse_line, ConsoleCommand, HELP};
use crate::commands::load_config;
use crate::render;

pub async fn handle_command(duration: Option<u64>, config_override: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_override)?;
    let session = HubSession::start(config)
        .await
        .context("Failed to start hub session")?;

    print_dashboard(&session).await?;
    println!("{}", "Type :help for commands.".dimmed());

    let result = event_loop(&session, duration).await;
    session.shutdown().await;
    result
}

async fn event_loop(session: &HubSession, duration: Option<u64>) -> Result<()> {
    let mut events = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let deadline = async {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let stop = shutdown_signal();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = &mut deadline => {
                info!("Session duration elapsed");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => on_event(session, &event).await,
                Err(EventBusError::Lagged(n)) => warn!("Dashboard skipped {} events", n),
                Err(e) => {
                    warn!("Event stream ended: {}", e);
                    break;
                }
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !on_line(session, &line).await? {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("Failed to read console input: {}", e);
                    stdin_open = false;
                }
            },
        }
    }
    Ok(())
}

async fn on_event(session: &HubSession, event: &HubEvent) {
    let language = session.language().code;
    match event {
        HubEvent::MessageAppended { agent_id, message } => {
            if session.selected_agent() == Some(*agent_id) {
                let name = session
                    .lifecycle()
                    .get_agent(*agent_id)
                    .await
                    .map(|a| a.name)
                    .unwrap_or_else(|_| agent_id.to_string());
                println!("{}", render::message_line(&name, message));
            }
        }
        HubEvent::SimulationTicked { .. } if session.view() != View::Dashboard => {}
        other => {
            if let Some(line) = render::event_line(language, other) {
                println!("{}", line.dimmed());
            }
        }
    }
}

/// Apply one console line. Returns `false` when the user asked to quit.
async fn on_line(session: &HubSession, line: &str) -> Result<bool> {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(true),
        Err(e) => {
            eprintln!("{}", e.red());
            return Ok(true);
        }
    };

    if let Err(e) = apply(session, command.clone()).await {
        eprintln!("{}", format!("✗ {}", e).red());
    }
    Ok(command != ConsoleCommand::Quit)
}

async fn apply(session: &HubSession, command: ConsoleCommand) -> Result<()> {
    match command {
        ConsoleCommand::Language(code) => {
            let language = session.select_language(&code);
            println!("{} {}", language.flag, language.name);
        }
        ConsoleCommand::View(view) => match session.select_view(view) {
            View::Dashboard => print_dashboard(session).await?,
            View::Management => print_agents(session).await?,
            View::Chat => print_chat(session).await?,
        },
        ConsoleCommand::OpenChat(needle) => {
            let agent = session.find_agent(&needle).await?;
            session.open_chat(agent.id).await?;
            print_chat(session).await?;
        }
        ConsoleCommand::Add(draft) => {
            let agent = session.create_agent(draft).await?;
            println!("{}", format!("✓ {}: {}", session.translate("create_agent"), agent.name).green());
        }
        ConsoleCommand::Edit {
            agent,
            mut draft,
            agent_type,
        } => {
            let existing = session.find_agent(&agent).await?;
            draft.agent_type = agent_type.unwrap_or(existing.agent_type);
            let updated = session.update_agent(existing.id, draft).await?;
            println!("{}", format!("✓ {}: {}", session.translate("update_agent"), updated.name).green());
        }
        ConsoleCommand::EditForm(needle) => {
            let agent = session.find_agent(&needle).await?;
            println!("{}", edit_line(&agent.id.to_string(), &agent.to_draft()));
        }
        ConsoleCommand::SetStatus { agent, status } => {
            let agent = session.find_agent(&agent).await?;
            session.lifecycle().set_status(agent.id, status).await?;
        }
        ConsoleCommand::Remove(needle) => {
            let agent = session.find_agent(&needle).await?;
            session.remove_agent(agent.id).await?;
        }
        ConsoleCommand::Agents => print_agents(session).await?,
        ConsoleCommand::Stats => print_dashboard(session).await?,
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit => {}
        ConsoleCommand::Say(text) => match session.selected_agent() {
            Some(agent_id) => {
                session.send_message(agent_id, &text).await?;
            }
            None => eprintln!("{}", "No agent selected. Use :chat <agent> first.".yellow()),
        },
    }
    Ok(())
}

async fn print_dashboard(session: &HubSession) -> Result<()> {
    let language = session.language().code;
    println!();
    println!("{}", render::header(language));
    println!();
    for line in render::stats_panel(language, &session.stats()) {
        println!("{}", line);
    }
    println!();

    if let Some(supervisor) = session.supervisor().await? {
        println!("{}", render::supervisor_line(language, &supervisor));
    }
    println!("{}", session.translate("fleet_performance_metrics").bold());
    for line in render::fleet_panel(language, &session.fleet_performance().await?) {
        println!("{}", line);
    }
    println!();

    let agents = session.regular_agents().await?;
    println!("{} ({})", session.translate("connected_agents").bold(), agents.len());
    if agents.is_empty() {
        println!("  {}", session.translate("no_agents_connected").yellow());
    }
    for agent in &agents {
        println!("{}", render::agent_row(language, agent));
    }
    Ok(())
}

async fn print_agents(session: &HubSession) -> Result<()> {
    let language = session.language().code;
    let agents = session.agents().await?;
    println!("{}", session.translate("agent_management").bold());
    if agents.is_empty() {
        println!("  {}", session.translate("no_agents_configured").yellow());
        return Ok(());
    }
    println!("{}", render::agent_table_header(language));
    for agent in &agents {
        println!("{}", render::agent_row(language, agent));
    }
    Ok(())
}

async fn print_chat(session: &HubSession) -> Result<()> {
    let Some(agent_id) = session.selected_agent() else {
        return Ok(());
    };
    let agent = session.lifecycle().get_agent(agent_id).await?;
    println!("{} {}", session.translate("agent_chat").bold(), agent.name.bold());

    let messages = session.messages(agent_id).await?;
    if messages.is_empty() {
        println!("  {} {}", session.translate("start_conversation"), agent.name);
        println!("  {} {}", session.translate("specializes_in"), agent.role.to_lowercase());
    }
    for message in &messages {
        println!("{}", render::message_line(&agent.name, message));
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
