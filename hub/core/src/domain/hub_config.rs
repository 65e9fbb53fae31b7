// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Hub Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) describing one
// agent hub session:
// - Session language defaults and seed fleet toggle
// - Simulation tick interval and RNG seed
// - Simulated chat reply window
// - System stats derivation mode
// - Event bus sizing

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::language::{is_supported, DEFAULT_LANGUAGE, FALLBACK_LANGUAGE};
use crate::domain::stats::StatsMode;

pub const API_VERSION: &str = "agent-hub/v1";
pub const KIND: &str = "HubConfig";
pub const CONFIG_PATH_ENV: &str = "AGENT_HUB_CONFIG_PATH";

/// Top-level hub configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HubConfigManifest {
    /// API version (must be "agent-hub/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "HubConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: HubConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestMetadata {
    /// Human-readable hub name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HubConfigSpec {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Language a new session starts in
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Language consulted when a key is missing from the active one
    #[serde(default = "fallback_language")]
    pub fallback_language: String,

    /// Populate the repository with the five-agent demo fleet at startup
    #[serde(default = "default_true")]
    pub seed_fleet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Period between performance perturbations
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Fixed RNG seed for reproducible sessions; OS entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatsConfig {
    #[serde(default)]
    pub mode: StatsMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventsConfig {
    /// Broadcast buffer; slow subscribers lag past this many events
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn fallback_language() -> String {
    FALLBACK_LANGUAGE.to_string()
}

fn default_tick_interval_ms() -> u64 {
    3000
}

fn default_reply_delay_min_ms() -> u64 {
    1000
}

fn default_reply_delay_max_ms() -> u64 {
    3000
}

fn default_event_capacity() -> usize {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            fallback_language: fallback_language(),
            seed_fleet: true,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}

impl Default for HubConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "agent-hub".to_string(),
                version: Some("1.0.0".to_string()),
            },
            spec: HubConfigSpec::default(),
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl ChatConfig {
    pub fn reply_delay_min(&self) -> Duration {
        Duration::from_millis(self.reply_delay_min_ms)
    }

    pub fn reply_delay_max(&self) -> Duration {
        Duration::from_millis(self.reply_delay_max_ms)
    }
}

impl HubConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. AGENT_HUB_CONFIG_PATH environment variable
    /// 2. ./agent-hub.yaml (working directory)
    /// 3. ~/.agent-hub/config.yaml (user home)
    /// 4. /etc/agent-hub/config.yaml (system)
    pub fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(
            std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
            Path::new("."),
            dirs::home_dir(),
        )
    }

    pub fn discover_config_from(
        env_path: Option<PathBuf>,
        working_dir: &Path,
        home_dir: Option<PathBuf>,
    ) -> Option<PathBuf> {
        if let Some(path) = env_path {
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = working_dir.join("agent-hub.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = home_dir {
            let user_config = home.join(".agent-hub").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/agent-hub/config.yaml");
        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::debug!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override source is injectable so tests never touch the process env.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("AGENT_HUB_LANGUAGE") {
            tracing::info!("Environment override: AGENT_HUB_LANGUAGE={}", val);
            self.spec.session.default_language = val.trim().to_lowercase();
        }

        if let Some(val) = lookup("AGENT_HUB_TICK_INTERVAL_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) => {
                    tracing::info!("Environment override: AGENT_HUB_TICK_INTERVAL_MS={}", ms);
                    self.spec.simulation.tick_interval_ms = ms;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for AGENT_HUB_TICK_INTERVAL_MS: '{}'. Expected milliseconds. Ignoring.",
                    val
                ),
            }
        }

        if let Some(val) = lookup("AGENT_HUB_STATS_MODE") {
            match val.parse::<StatsMode>() {
                Ok(mode) => {
                    tracing::info!("Environment override: AGENT_HUB_STATS_MODE={:?}", mode);
                    self.spec.stats.mode = mode;
                }
                Err(e) => tracing::warn!("Invalid value for AGENT_HUB_STATS_MODE: {}. Ignoring.", e),
            }
        }

        if let Some(val) = lookup("AGENT_HUB_SEED") {
            match val.trim().parse::<u64>() {
                Ok(seed) => {
                    tracing::info!("Environment override: AGENT_HUB_SEED={}", seed);
                    self.spec.simulation.seed = Some(seed);
                }
                Err(_) => tracing::warn!(
                    "Invalid value for AGENT_HUB_SEED: '{}'. Expected an unsigned integer. Ignoring.",
                    val
                ),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let session = &self.spec.session;
        if !is_supported(&session.default_language) {
            anyhow::bail!("Unsupported session.default_language: '{}'", session.default_language);
        }
        if !is_supported(&session.fallback_language) {
            anyhow::bail!("Unsupported session.fallback_language: '{}'", session.fallback_language);
        }

        if self.spec.simulation.tick_interval_ms == 0 {
            anyhow::bail!("simulation.tick_interval_ms must be greater than zero");
        }

        let chat = &self.spec.chat;
        if chat.reply_delay_min_ms > chat.reply_delay_max_ms {
            anyhow::bail!(
                "chat.reply_delay_min_ms ({}) exceeds chat.reply_delay_max_ms ({})",
                chat.reply_delay_min_ms,
                chat.reply_delay_max_ms
            );
        }

        if self.spec.events.capacity == 0 {
            anyhow::bail!("events.capacity must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_minimal_manifest_fills_defaults() {
        let yaml = r#"
apiVersion: agent-hub/v1
kind: HubConfig
metadata:
  name: demo
spec: {}
"#;
        let manifest = HubConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec.session.default_language, "ru");
        assert_eq!(manifest.spec.session.fallback_language, "en");
        assert!(manifest.spec.session.seed_fleet);
        assert_eq!(manifest.spec.simulation.tick_interval(), Duration::from_secs(3));
        assert_eq!(manifest.spec.chat.reply_delay_min(), Duration::from_secs(1));
        assert_eq!(manifest.spec.chat.reply_delay_max(), Duration::from_secs(3));
        assert_eq!(manifest.spec.stats.mode, StatsMode::Mock);
        assert_eq!(manifest.spec.events.capacity, 1000);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_full_manifest_parses() {
        let yaml = r#"
apiVersion: agent-hub/v1
kind: HubConfig
metadata:
  name: lab
spec:
  session:
    default_language: en
    seed_fleet: false
  simulation:
    tick_interval_ms: 500
    seed: 42
  chat:
    reply_delay_min_ms: 10
    reply_delay_max_ms: 20
  stats:
    mode: aggregate
"#;
        let manifest = HubConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec.session.default_language, "en");
        assert!(!manifest.spec.session.seed_fleet);
        assert_eq!(manifest.spec.simulation.seed, Some(42));
        assert_eq!(manifest.spec.stats.mode, StatsMode::Aggregate);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut manifest = HubConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.kind = "NodeConfig".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.spec.simulation.tick_interval_ms = 0;
        assert!(manifest.validate().is_err());
        manifest.spec.simulation.tick_interval_ms = 3000;

        manifest.spec.chat.reply_delay_min_ms = 5000;
        assert!(manifest.validate().is_err());
        manifest.spec.chat.reply_delay_min_ms = 1000;

        manifest.spec.session.default_language = "de".to_string();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AGENT_HUB_LANGUAGE", "EN"),
            ("AGENT_HUB_TICK_INTERVAL_MS", "250"),
            ("AGENT_HUB_STATS_MODE", "aggregate"),
            ("AGENT_HUB_SEED", "not-a-number"),
        ]);
        let mut manifest = HubConfigManifest::default();
        manifest.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(manifest.spec.session.default_language, "en");
        assert_eq!(manifest.spec.simulation.tick_interval_ms, 250);
        assert_eq!(manifest.spec.stats.mode, StatsMode::Aggregate);
        assert_eq!(manifest.spec.simulation.seed, None);
    }

    #[test]
    fn test_discovery_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();

        assert_eq!(
            HubConfigManifest::discover_config_from(None, dir.path(), Some(home.path().to_path_buf())),
            None
        );

        let home_cfg = home.path().join(".agent-hub").join("config.yaml");
        std::fs::create_dir_all(home_cfg.parent().unwrap()).unwrap();
        HubConfigManifest::default().to_yaml_file(&home_cfg).unwrap();
        assert_eq!(
            HubConfigManifest::discover_config_from(None, dir.path(), Some(home.path().to_path_buf())),
            Some(home_cfg.clone())
        );

        let cwd_cfg = dir.path().join("agent-hub.yaml");
        HubConfigManifest::default().to_yaml_file(&cwd_cfg).unwrap();
        assert_eq!(
            HubConfigManifest::discover_config_from(None, dir.path(), Some(home.path().to_path_buf())),
            Some(cwd_cfg.clone())
        );

        let missing = dir.path().join("missing.yaml");
        assert_eq!(
            HubConfigManifest::discover_config_from(Some(missing), dir.path(), None),
            Some(cwd_cfg)
        );

        let reloaded = HubConfigManifest::from_yaml_file(&home_cfg).unwrap();
        assert_eq!(reloaded, HubConfigManifest::default());
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = HubConfigManifest::load_or_default(Some(dir.path().join("nope.yaml")));
        assert!(result.is_err());
    }
}
