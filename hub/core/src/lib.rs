// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Hub Core
//!
//! In-memory state model behind the agent hub dashboard: the agent fleet,
//! per-agent conversations with simulated replies, and the periodic
//! performance simulation.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Owns every mutable store; presentation layers only issue
//!   commands against [`application::session::HubSession`] and render its
//!   read model.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
pub use application::session::HubSession;
pub use domain::error::HubError;
pub use domain::hub_config::HubConfigManifest;
