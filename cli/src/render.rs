// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Text rendering of the session read model.
//!
//! Every label goes through the localization tables, so switching the
//! session language changes the whole console.

use colored::{ColoredString, Colorize};

use agent_hub_core::domain::agent::{Agent, AgentStatus};
use agent_hub_core::domain::chat::{ChatMessage, Sender};
use agent_hub_core::domain::events::HubEvent;
use agent_hub_core::domain::stats::{FleetPerformance, SystemStats};
use agent_hub_core::infrastructure::localization::{status_label, translate};

pub fn status_badge(language: &str, status: AgentStatus) -> ColoredString {
    let label = status_label(language, status);
    match status {
        AgentStatus::Active => label.green(),
        AgentStatus::Idle => label.yellow(),
        AgentStatus::Error => label.red(),
        AgentStatus::Training => label.blue(),
    }
}

pub fn header(language: &str) -> String {
    format!(
        "{} - {}",
        translate(language, "ai_agent_hub").bold(),
        translate(language, "core_management_center").dimmed()
    )
}

pub fn stats_panel(language: &str, stats: &SystemStats) -> Vec<String> {
    vec![
        format!("  {:<24} {}", translate(language, "total_agents"), stats.total_agents),
        format!("  {:<24} {}", translate(language, "active_now"), stats.active_agents),
        format!("  {:<24} {}", translate(language, "tasks_completed"), stats.total_tasks),
        format!(
            "  {:<24} {:.1}%",
            translate(language, "system_health"),
            stats.system_health
        ),
        format!("  {:<24} {}", translate(language, "uptime"), stats.uptime),
    ]
}

pub fn fleet_panel(language: &str, fleet: &FleetPerformance) -> Vec<String> {
    [
        ("accuracy", fleet.accuracy),
        ("efficiency", fleet.efficiency),
        ("value", fleet.value),
        ("demand", fleet.demand),
    ]
    .into_iter()
    .map(|(key, value)| format!("  {:<24} {:>5.1}%", translate(language, key), value))
    .collect()
}

pub fn supervisor_line(language: &str, agent: &Agent) -> String {
    format!(
        "{} {} ({}) {:.1}% / {:.1}%",
        format!("[{}]", translate(language, "supervisor")).magenta().bold(),
        agent.name.bold(),
        status_badge(language, agent.status),
        agent.performance.accuracy,
        agent.performance.efficiency
    )
}

pub fn agent_row(language: &str, agent: &Agent) -> String {
    format!(
        "{:<38} {:<24} {:<12} {:>6.1} {:>6.1} {:>6} {:>6.1}%",
        agent.id,
        agent.name,
        status_badge(language, agent.status),
        agent.performance.accuracy,
        agent.performance.efficiency,
        agent.total_tasks,
        agent.success_rate
    )
}

pub fn agent_table_header(language: &str) -> String {
    format!(
        "{:<38} {:<24} {:<12} {:>6} {:>6} {:>6} {:>7}",
        "ID",
        translate(language, "agent_name"),
        "",
        translate(language, "accuracy").chars().take(6).collect::<String>(),
        translate(language, "efficiency").chars().take(6).collect::<String>(),
        translate(language, "tasks"),
        translate(language, "success")
    )
}

pub fn message_line(agent_name: &str, message: &ChatMessage) -> String {
    match message.sender {
        Sender::User => format!("[{}] {} {}", message.time_label(), "you:".cyan(), message.content),
        Sender::Agent => format!(
            "[{}] {} {}",
            message.time_label(),
            format!("{}:", agent_name).green(),
            message.content
        ),
    }
}

/// One-line summary of an event for the live feed; `None` for events the
/// feed does not show.
pub fn event_line(language: &str, event: &HubEvent) -> Option<String> {
    match event {
        HubEvent::AgentCreated { agent, .. } => Some(format!("+ {} ({})", agent.name, agent.agent_type)),
        HubEvent::AgentUpdated { agent, .. } => Some(format!("~ {}", agent.name)),
        HubEvent::AgentRemoved { agent_id, .. } => Some(format!("- {}", agent_id)),
        HubEvent::SimulationTicked { tick, stats, .. } => Some(format!(
            "#{} {} {:.1}%",
            tick,
            translate(language, "system_health"),
            stats.system_health
        )),
        HubEvent::LanguageChanged { language: code, .. } => Some(format!("lang: {}", code)),
        HubEvent::ViewChanged { view } => Some(format!("view: {}", translate(language, view.label_key()))),
        HubEvent::MessageAppended { .. } | HubEvent::ChatOpened { .. } => None,
    }
}
