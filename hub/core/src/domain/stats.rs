// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Fleet Statistics
//!
//! Two snapshots are exposed to the dashboard:
//!
//! - [`SystemStats`]: fleet-wide counters and health, regenerated wholesale on
//!   every simulation tick.
//! - [`FleetPerformance`]: per-metric averages over the live agent list.
//!
//! `SystemStats` can be produced two ways, selected by [`StatsMode`]. `Mock`
//! reproduces the dashboard's canned numbers and is deliberately disconnected
//! from the agent list; `Aggregate` derives every field from it.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::agent::{Agent, AgentStatus, Performance};

pub const MOCK_TOTAL_AGENTS: usize = 5;
pub const MOCK_ACTIVE_AGENTS: usize = 4;
pub const MOCK_TOTAL_TASKS: u64 = 2068;
pub const MOCK_AVG_PERFORMANCE: f64 = 91.2;
pub const MOCK_HEALTH_FLOOR: f64 = 94.0;
pub const MOCK_HEALTH_SPREAD: f64 = 6.0;
pub const MOCK_UPTIME: &str = "24h 37m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
    #[default]
    Mock,
    Aggregate,
}

impl std::str::FromStr for StatsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(StatsMode::Mock),
            "aggregate" => Ok(StatsMode::Aggregate),
            other => Err(format!("unknown stats mode '{}', expected mock or aggregate", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_agents: usize,
    pub active_agents: usize,
    pub total_tasks: u64,
    pub avg_performance: f64,
    pub system_health: f64,
    pub uptime: String,
}

impl SystemStats {
    /// The dashboard's canned snapshot. Only `system_health` varies,
    /// uniformly in `[94, 100)`.
    pub fn mock<R: Rng>(rng: &mut R) -> Self {
        Self {
            total_agents: MOCK_TOTAL_AGENTS,
            active_agents: MOCK_ACTIVE_AGENTS,
            total_tasks: MOCK_TOTAL_TASKS,
            avg_performance: MOCK_AVG_PERFORMANCE,
            system_health: MOCK_HEALTH_FLOOR + rng.random::<f64>() * MOCK_HEALTH_SPREAD,
            uptime: MOCK_UPTIME.to_string(),
        }
    }

    /// Snapshot computed from the live agent list.
    ///
    /// Health is the share of agents not in `Error` status; an empty fleet
    /// reports full health.
    pub fn aggregate(agents: &[Agent], uptime: Duration) -> Self {
        let total_agents = agents.len();
        let active_agents = agents
            .iter()
            .filter(|a| a.status == AgentStatus::Active)
            .count();
        let total_tasks = agents.iter().map(|a| u64::from(a.total_tasks)).sum();
        let avg_performance = if agents.is_empty() {
            0.0
        } else {
            agents.iter().map(|a| a.performance.average()).sum::<f64>() / total_agents as f64
        };
        let healthy = agents
            .iter()
            .filter(|a| a.status != AgentStatus::Error)
            .count();
        let system_health = if agents.is_empty() {
            100.0
        } else {
            healthy as f64 * 100.0 / total_agents as f64
        };

        Self {
            total_agents,
            active_agents,
            total_tasks,
            avg_performance: Performance::clamp_metric(avg_performance),
            system_health: Performance::clamp_metric(system_health),
            uptime: format_uptime(uptime),
        }
    }

    pub fn generate<R: Rng>(mode: StatsMode, agents: &[Agent], uptime: Duration, rng: &mut R) -> Self {
        match mode {
            StatsMode::Mock => Self::mock(rng),
            StatsMode::Aggregate => Self::aggregate(agents, uptime),
        }
    }
}

/// Averages shown on the fleet metrics panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FleetPerformance {
    pub accuracy: f64,
    pub efficiency: f64,
    pub value: f64,
    pub demand: f64,
}

impl FleetPerformance {
    /// An empty fleet averages to zero rather than NaN.
    pub fn from_agents(agents: &[Agent]) -> Self {
        let n = agents.len().max(1) as f64;
        let sum = |f: fn(&Performance) -> f64| agents.iter().map(|a| f(&a.performance)).sum::<f64>() / n;
        Self {
            accuracy: sum(|p| p.accuracy),
            efficiency: sum(|p| p.efficiency),
            value: sum(|p| p.value),
            demand: sum(|p| p.demand),
        }
    }
}

/// `"24h 37m"` style. Hours are not folded into days.
pub fn format_uptime(uptime: Duration) -> String {
    let minutes = uptime.as_secs() / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::{AgentDraft, AgentType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent(rng: &mut StdRng, status: AgentStatus) -> Agent {
        let mut agent = Agent::create(
            AgentDraft {
                name: "n".into(),
                role: "r".into(),
                description: "d".into(),
                api_key: "k".into(),
                agent_type: AgentType::Custom,
            },
            rng,
        );
        agent.status = status;
        agent
    }

    #[test]
    fn test_mock_stats_are_constant_except_health() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let stats = SystemStats::mock(&mut rng);
            assert_eq!(stats.total_agents, 5);
            assert_eq!(stats.active_agents, 4);
            assert_eq!(stats.total_tasks, 2068);
            assert_eq!(stats.avg_performance, 91.2);
            assert_eq!(stats.uptime, "24h 37m");
            assert!(stats.system_health >= 94.0 && stats.system_health < 100.0);
        }
    }

    #[test]
    fn test_aggregate_counts_live_agents() {
        let mut rng = StdRng::seed_from_u64(5);
        let agents = vec![
            agent(&mut rng, AgentStatus::Active),
            agent(&mut rng, AgentStatus::Idle),
            agent(&mut rng, AgentStatus::Error),
            agent(&mut rng, AgentStatus::Active),
        ];
        let stats = SystemStats::aggregate(&agents, Duration::from_secs(3 * 3600 + 5 * 60));

        assert_eq!(stats.total_agents, 4);
        assert_eq!(stats.active_agents, 2);
        let tasks: u64 = agents.iter().map(|a| a.total_tasks as u64).sum();
        assert_eq!(stats.total_tasks, tasks);
        assert_eq!(stats.system_health, 75.0);
        assert_eq!(stats.uptime, "3h 5m");
    }

    #[test]
    fn test_aggregate_empty_fleet() {
        let stats = SystemStats::aggregate(&[], Duration::ZERO);
        assert_eq!(stats.total_agents, 0);
        assert_eq!(stats.avg_performance, 0.0);
        assert_eq!(stats.system_health, 100.0);
        assert_eq!(stats.uptime, "0h 0m");
    }

    #[test]
    fn test_fleet_performance_averages() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut a = agent(&mut rng, AgentStatus::Active);
        let mut b = agent(&mut rng, AgentStatus::Active);
        a.performance = Performance::new(90.0, 80.0, 0.0, 60.0, 40.0);
        b.performance = Performance::new(70.0, 100.0, 0.0, 80.0, 60.0);

        let fleet = FleetPerformance::from_agents(&[a, b]);
        assert_eq!(fleet.accuracy, 80.0);
        assert_eq!(fleet.efficiency, 90.0);
        assert_eq!(fleet.value, 70.0);
        assert_eq!(fleet.demand, 50.0);

        assert_eq!(FleetPerformance::from_agents(&[]), FleetPerformance::default());
    }

    #[test]
    fn test_stats_mode_parse() {
        assert_eq!("Aggregate".parse::<StatsMode>(), Ok(StatsMode::Aggregate));
        assert!("live".parse::<StatsMode>().is_err());
    }
}
