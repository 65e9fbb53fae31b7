// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Simulation Driver - Background task for performance drift
//!
//! Every tick nudges each agent's accuracy and efficiency by a uniform delta
//! in `[-1, 1]` (clamped into `[0, 100]`) and regenerates the
//! [`SystemStats`] snapshot according to the configured [`StatsMode`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Periodic mutation of the agent fleet, stopped by its
//!   [`CancellationToken`] (normally a child of the session token)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::agent::Agent;
use crate::domain::error::HubError;
use crate::domain::events::HubEvent;
use crate::domain::hub_config::HubConfigManifest;
use crate::domain::repository::AgentRepository;
use crate::domain::stats::{StatsMode, SystemStats};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::random::SharedRng;

/// Configuration for the simulation driver
#[derive(Debug, Clone)]
pub struct SimulationDriverConfig {
    /// Period between ticks; the first tick fires one period after start
    pub interval: Duration,

    /// How `SystemStats` is regenerated on each tick
    pub stats_mode: StatsMode,

    /// Whether the periodic loop runs at all
    pub enabled: bool,
}

impl Default for SimulationDriverConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            stats_mode: StatsMode::Mock,
            enabled: true,
        }
    }
}

impl SimulationDriverConfig {
    pub fn from_manifest(manifest: &HubConfigManifest) -> Self {
        Self {
            interval: manifest.spec.simulation.tick_interval(),
            stats_mode: manifest.spec.stats.mode,
            enabled: manifest.spec.simulation.enabled,
        }
    }
}

/// Uniform delta in `[-1, 1]`.
fn drift_delta<R: Rng>(rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) * 2.0
}

pub struct SimulationDriver {
    agents: Arc<dyn AgentRepository>,
    event_bus: EventBus,
    rng: SharedRng,
    config: SimulationDriverConfig,
    stats: RwLock<SystemStats>,
    ticks: AtomicU64,
    started_at: Instant,
    shutdown_token: CancellationToken,
}

impl SimulationDriver {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        event_bus: EventBus,
        rng: SharedRng,
        config: SimulationDriverConfig,
        shutdown_token: CancellationToken,
    ) -> Self {
        let initial = rng.with(|r| SystemStats::generate(config.stats_mode, &[], Duration::ZERO, r));
        Self {
            agents,
            event_bus,
            rng,
            config,
            stats: RwLock::new(initial),
            ticks: AtomicU64::new(0),
            started_at: Instant::now(),
            shutdown_token,
        }
    }

    /// Get a handle to trigger shutdown
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Latest stats snapshot
    pub fn stats(&self) -> SystemStats {
        self.stats.read().clone()
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Regenerate the stats snapshot without perturbing any agent.
    pub async fn refresh_stats(&self) -> Result<SystemStats, HubError> {
        let agents = self.agents.list_all().await?;
        Ok(self.regenerate(&agents))
    }

    fn regenerate(&self, agents: &[Agent]) -> SystemStats {
        let uptime = self.uptime();
        let mode = self.config.stats_mode;
        let stats = self.rng.with(|r| SystemStats::generate(mode, agents, uptime, r));
        *self.stats.write() = stats.clone();
        stats
    }

    /// One simulation step: drift every agent, then regenerate stats.
    ///
    /// Status, identity and all other metrics are untouched. The whole fleet
    /// is perturbed under one repository write lock.
    pub async fn tick(&self) -> Result<SystemStats, HubError> {
        if self.shutdown_token.is_cancelled() {
            return Err(HubError::SessionClosed);
        }

        let rng = &self.rng;
        let agents_updated = self
            .agents
            .update_all(&mut |agent: &mut Agent| {
                let (accuracy_delta, efficiency_delta) =
                    rng.with(|r| (drift_delta(r), drift_delta(r)));
                agent.performance.drift(accuracy_delta, efficiency_delta);
            })
            .await?;

        let agents = self.agents.list_all().await?;
        let stats = self.regenerate(&agents);
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;

        self.event_bus.publish(HubEvent::SimulationTicked {
            tick,
            agents_updated,
            stats: stats.clone(),
            ticked_at: Utc::now(),
        });
        Ok(stats)
    }

    /// Start the driver background task
    /// Returns a handle that can be used to await its exit
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        if !self.config.enabled {
            info!("Simulation driver is disabled");
            return;
        }

        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            stats_mode = ?self.config.stats_mode,
            "Starting simulation driver background task"
        );

        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_token.cancelled() => {
                    info!("Shutdown signal received, stopping simulation driver");
                    break;
                }
                _ = ticker.tick() => {
                    match self.tick().await {
                        Ok(stats) => debug!(
                            tick = self.tick_count(),
                            system_health = stats.system_health,
                            "Simulation tick completed"
                        ),
                        Err(e) => warn!("Simulation tick failed: {}", e),
                    }
                }
            }
        }

        info!(ticks = self.tick_count(), "Simulation driver background task stopped");
    }
}
