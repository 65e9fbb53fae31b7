// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: aggregates, value objects, events and repository contracts.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and invariants, no I/O

pub mod agent;
pub mod chat;
pub mod error;
pub mod events;
pub mod hub_config;
pub mod language;
pub mod repository;
pub mod stats;
