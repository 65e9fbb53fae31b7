// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! One-shot chat: send a message, wait for the agent's reply, print the log.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use agent_hub_core::domain::chat::Sender;
use agent_hub_core::domain::events::HubEvent;
use agent_hub_core::HubSession;

use crate::commands::load_config;
use crate::render;

pub async fn handle_command(
    agent: &str,
    message: &str,
    timeout_secs: u64,
    config_override: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_override)?;
    let session = HubSession::start(config)
        .await
        .context("Failed to start hub session")?;

    let result = converse(&session, agent, message, Duration::from_secs(timeout_secs)).await;
    session.shutdown().await;
    result
}

async fn converse(session: &HubSession, needle: &str, text: &str, timeout: Duration) -> Result<()> {
    let agent = session.find_agent(needle).await?;
    session.open_chat(agent.id).await?;

    let mut events = session.event_bus().subscribe_agent(agent.id);
    session.send_message(agent.id, text).await?;

    let reply = tokio::time::timeout(timeout, async {
        loop {
            match events.recv().await {
                Ok(HubEvent::MessageAppended { message, .. }) if message.sender == Sender::Agent => {
                    return Ok(message);
                }
                Ok(_) => continue,
                Err(e) => return Err(e),
            }
        }
    })
    .await;

    for message in session.messages(agent.id).await? {
        println!("{}", render::message_line(&agent.name, &message));
    }

    match reply {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e).context("Event stream failed while waiting for the reply"),
        Err(_) => {
            println!(
                "{}",
                format!("No reply from {} within {}s", agent.name, timeout.as_secs()).yellow()
            );
            Ok(())
        }
    }
}
