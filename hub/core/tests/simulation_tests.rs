// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Simulation driver behavior inside a running session: clamping over many
//! ticks, mock stats, and no ticks after teardown.

use std::time::Duration;

use agent_hub_core::domain::events::HubEvent;
use agent_hub_core::domain::stats::StatsMode;
use agent_hub_core::{HubConfigManifest, HubSession};

fn config(tick_interval_ms: u64, mode: StatsMode) -> HubConfigManifest {
    let mut config = HubConfigManifest::default();
    config.spec.simulation.tick_interval_ms = tick_interval_ms;
    config.spec.simulation.seed = Some(7);
    config.spec.stats.mode = mode;
    config
}

#[tokio::test(start_paused = true)]
async fn test_metrics_stay_in_bounds_over_many_ticks() {
    let session = HubSession::start(config(100, StatsMode::Mock)).await.unwrap();
    let before = session.agents().await.unwrap();

    tokio::time::sleep(Duration::from_millis(100 * 1_000 + 50)).await;
    assert_eq!(session.simulation().tick_count(), 1_000);

    let after = session.agents().await.unwrap();
    for (old, new) in before.iter().zip(&after) {
        assert!(new.performance.is_within_bounds(), "{:?}", new.performance);
        assert_eq!(old.performance.uniqueness, new.performance.uniqueness);
        assert_eq!(old.performance.value, new.performance.value);
        assert_eq!(old.performance.demand, new.performance.demand);
        assert_eq!(old.status, new.status);
    }
    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_mock_stats_regenerate_each_tick() {
    let session = HubSession::start(config(3_000, StatsMode::Mock)).await.unwrap();
    let mut events = session.subscribe();

    // Mock stats do not follow the fleet.
    let extra = session.regular_agents().await.unwrap().remove(0);
    session.remove_agent(extra.id).await.unwrap();

    let mut seen = 0;
    while seen < 3 {
        if let HubEvent::SimulationTicked { stats, agents_updated, .. } = events.recv().await.unwrap() {
            assert_eq!(agents_updated, 4);
            assert_eq!(stats.total_agents, 5);
            assert_eq!(stats.total_tasks, 2068);
            assert!((94.0..100.0).contains(&stats.system_health));
            seen += 1;
        }
    }
    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_aggregate_stats_follow_the_fleet() {
    let session = HubSession::start(config(3_000, StatsMode::Aggregate)).await.unwrap();
    let extra = session.regular_agents().await.unwrap().remove(0);
    session.remove_agent(extra.id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(3_100)).await;
    let stats = session.stats();
    assert_eq!(stats.total_agents, 4);
    assert_eq!(stats.total_tasks, 2068 - u64::from(extra.total_tasks));
    assert_eq!(stats.uptime, "0h 0m");
    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_shutdown() {
    let session = HubSession::start(config(3_000, StatsMode::Mock)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(6_500)).await;
    assert_eq!(session.simulation().tick_count(), 2);

    session.shutdown().await;
    let frozen = session.agents().await.unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(session.simulation().tick_count(), 2);
    assert_eq!(session.agents().await.unwrap(), frozen);
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_interval() {
    let session = HubSession::start(config(3_000, StatsMode::Mock)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(session.simulation().tick_count(), 0);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(session.simulation().tick_count(), 1);
    session.shutdown().await;
}
