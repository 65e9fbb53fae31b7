// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the agent hub console

pub mod agents;
pub mod chat;
pub mod config;
pub mod console;
pub mod languages;
pub mod run;

pub use self::agents::AgentsCommand;
pub use self::config::ConfigCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};

use agent_hub_core::HubConfigManifest;

/// Discovered configuration with env overrides applied, validated.
pub(crate) fn load_config(config_override: Option<PathBuf>) -> Result<HubConfigManifest> {
    let config =
        HubConfigManifest::load_or_default(config_override).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
