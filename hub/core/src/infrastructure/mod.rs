// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod event_bus;
pub mod localization;
pub mod random;
pub mod repositories;
pub mod seed;
