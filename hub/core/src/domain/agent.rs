// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Aggregate
//!
//! A simulated AI worker: identity, display metadata, an opaque credential and
//! five bounded performance metrics.
//!
//! ## Invariants
//!
//! - Every [`Performance`] metric stays inside `[METRIC_MIN, METRIC_MAX]`.
//!   All mutation paths go through [`Performance::clamp_metric`].
//! - `id` never changes after creation.
//! - `status`, `performance`, timestamps, `total_tasks` and `success_rate`
//!   survive [`Agent::apply_draft`] untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::ValidationError;

pub const METRIC_MIN: f64 = 0.0;
pub const METRIC_MAX: f64 = 100.0;

/// Namespace for name-based ids of the seed fleet.
const SEED_ID_NAMESPACE: Uuid = Uuid::from_u128(0x7c3e_51a2_9d04_4b6f_8a17_e2c9_0f5d_3b81);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Stable id derived from a slug such as `supervisor-001`.
    pub fn from_slug(slug: &str) -> Self {
        Self(Uuid::new_v5(&SEED_ID_NAMESPACE, slug.as_bytes()))
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Idle,
    Error,
    Training,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Idle => "idle",
            AgentStatus::Error => "error",
            AgentStatus::Training => "training",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Search,
    Crew,
    #[default]
    Custom,
    Supervisor,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Search => "search",
            AgentType::Crew => "crew",
            AgentType::Custom => "custom",
            AgentType::Supervisor => "supervisor",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(AgentType::Search),
            "crew" => Ok(AgentType::Crew),
            "custom" => Ok(AgentType::Custom),
            "supervisor" => Ok(AgentType::Supervisor),
            other => Err(ValidationError::UnknownAgentType(other.to_string())),
        }
    }
}

/// Five percentage metrics, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub accuracy: f64,
    pub efficiency: f64,
    pub uniqueness: f64,
    pub value: f64,
    pub demand: f64,
}

impl Performance {
    pub fn new(accuracy: f64, efficiency: f64, uniqueness: f64, value: f64, demand: f64) -> Self {
        Self {
            accuracy: Self::clamp_metric(accuracy),
            efficiency: Self::clamp_metric(efficiency),
            uniqueness: Self::clamp_metric(uniqueness),
            value: Self::clamp_metric(value),
            demand: Self::clamp_metric(demand),
        }
    }

    /// Initial metrics for a freshly created agent.
    ///
    /// | Metric | Range |
    /// |--------|-------|
    /// | accuracy | 85 + U(0,10) |
    /// | efficiency | 80 + U(0,15) |
    /// | uniqueness | 75 + U(0,20) |
    /// | value | 90 + U(0,10) |
    /// | demand | 70 + U(0,25) |
    pub fn seeded<R: Rng>(rng: &mut R) -> Self {
        Self::new(
            85.0 + rng.random::<f64>() * 10.0,
            80.0 + rng.random::<f64>() * 15.0,
            75.0 + rng.random::<f64>() * 20.0,
            90.0 + rng.random::<f64>() * 10.0,
            70.0 + rng.random::<f64>() * 25.0,
        )
    }

    /// NaN collapses to the lower bound.
    pub fn clamp_metric(value: f64) -> f64 {
        if value.is_nan() {
            METRIC_MIN
        } else {
            value.clamp(METRIC_MIN, METRIC_MAX)
        }
    }

    /// Nudge accuracy and efficiency, clamping the result.
    pub fn drift(&mut self, accuracy_delta: f64, efficiency_delta: f64) {
        self.accuracy = Self::clamp_metric(self.accuracy + accuracy_delta);
        self.efficiency = Self::clamp_metric(self.efficiency + efficiency_delta);
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.accuracy, self.efficiency, self.uniqueness, self.value, self.demand]
            .iter()
            .all(|m| (METRIC_MIN..=METRIC_MAX).contains(m))
    }

    pub fn average(&self) -> f64 {
        (self.accuracy + self.efficiency + self.uniqueness + self.value + self.demand) / 5.0
    }
}

/// Form input for creating or editing an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub role: String,
    pub description: String,
    pub api_key: String,
    #[serde(rename = "type", default)]
    pub agent_type: AgentType,
}

impl AgentDraft {
    /// Every text field is required and must contain more than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("role", &self.role),
            ("description", &self.description),
            ("apiKey", &self.api_key),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: String,
    pub description: String,
    pub api_key: String,
    pub status: AgentStatus,
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    pub performance: Performance,
    pub last_activity: DateTime<Utc>,
    pub last_training: DateTime<Utc>,
    pub total_tasks: u32,
    pub success_rate: f64,
}

impl Agent {
    /// Build a new active agent with randomly seeded statistics.
    ///
    /// The draft must already have passed [`AgentDraft::validate`].
    pub fn create<R: Rng>(draft: AgentDraft, rng: &mut R) -> Self {
        let now = Utc::now();
        let performance = Performance::seeded(rng);
        let total_tasks = 50 + rng.random_range(0..100u32);
        let success_rate = 85.0 + rng.random::<f64>() * 10.0;

        Self {
            id: AgentId::new(),
            name: draft.name,
            role: draft.role,
            description: draft.description,
            api_key: draft.api_key,
            status: AgentStatus::Active,
            agent_type: draft.agent_type,
            performance,
            last_activity: now,
            last_training: now,
            total_tasks,
            success_rate,
        }
    }

    /// Replace display, credential and type fields from an edit form.
    pub fn apply_draft(&mut self, draft: AgentDraft) {
        self.name = draft.name;
        self.role = draft.role;
        self.description = draft.description;
        self.api_key = draft.api_key;
        self.agent_type = draft.agent_type;
    }

    /// Prefill for the edit form.
    pub fn to_draft(&self) -> AgentDraft {
        AgentDraft {
            name: self.name.clone(),
            role: self.role.clone(),
            description: self.description.clone(),
            api_key: self.api_key.clone(),
            agent_type: self.agent_type,
        }
    }

    pub fn is_supervisor(&self) -> bool {
        self.agent_type == AgentType::Supervisor
    }
}
