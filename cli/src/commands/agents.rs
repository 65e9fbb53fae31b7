// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Agent fleet inspection
//!
//! Commands: list, show

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use agent_hub_core::domain::agent::Agent;
use agent_hub_core::infrastructure::localization::{agent_type_label, translate};
use agent_hub_core::HubSession;

use crate::commands::load_config;
use crate::render;

#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List the startup fleet
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one agent in detail
    Show {
        /// Agent id or display name
        agent: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: AgentsCommand, config_override: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_override)?;
    config.spec.simulation.enabled = false;
    let session = HubSession::start(config)
        .await
        .context("Failed to start hub session")?;

    let result = match command {
        AgentsCommand::List { json } => list_agents(&session, json).await,
        AgentsCommand::Show { agent, json } => show_agent(&session, &agent, json).await,
    };
    session.shutdown().await;
    result
}

async fn list_agents(session: &HubSession, json: bool) -> Result<()> {
    let agents = session.agents().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!("{}", session.translate("no_agents_configured").yellow());
        return Ok(());
    }

    let language = session.language().code;
    println!("{} agents found:", agents.len());
    println!("{}", render::agent_table_header(language));
    for agent in &agents {
        println!("{}", render::agent_row(language, agent));
    }
    Ok(())
}

async fn show_agent(session: &HubSession, needle: &str, json: bool) -> Result<()> {
    let agent = session.find_agent(needle).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agent)?);
        return Ok(());
    }

    for line in describe(session.language().code, &agent) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(language: &str, agent: &Agent) -> Vec<String> {
    let t = |key: &str| translate(language, key);
    let p = &agent.performance;
    vec![
        format!("{} ({})", agent.name.bold(), render::status_badge(language, agent.status)),
        format!("  ID: {}", agent.id),
        format!("  {}: {}", t("role"), agent.role),
        format!("  {}: {}", t("agent_type"), agent_type_label(language, agent.agent_type)),
        format!("  {}: {}", t("description"), agent.description),
        format!("  {}: {:.1}%", t("accuracy"), p.accuracy),
        format!("  {}: {:.1}%", t("efficiency"), p.efficiency),
        format!("  {}: {:.1}%", t("value"), p.value),
        format!("  {}: {:.1}%", t("demand"), p.demand),
        format!("  {}: {}", t("tasks"), agent.total_tasks),
        format!("  {}: {:.1}%", t("success"), agent.success_rate),
        format!("  {}: {}", t("last_active"), agent.last_activity.format("%Y-%m-%d %H:%M")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_hub_core::infrastructure::seed::seed_fleet;

    #[test]
    fn test_describe_is_localized() {
        colored::control::set_override(false);
        let agent = &seed_fleet("ru")[2];
        let lines = describe("ru", agent);
        assert_eq!(lines[0], "ТаскФорс Альфа (активен)");
        assert!(lines.iter().any(|l| l == "  Тип Агента: CrewAI Агент"));
        assert!(lines.iter().any(|l| l == "  Задач: 156"));
    }
}
