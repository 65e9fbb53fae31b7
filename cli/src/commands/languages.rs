// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use agent_hub_core::domain::language::LANGUAGES;
use agent_hub_core::HubConfigManifest;

pub async fn handle_command(config_override: Option<PathBuf>) -> Result<()> {
    let config =
        HubConfigManifest::load_or_default(config_override).context("Failed to load configuration")?;
    let session = &config.spec.session;

    for language in LANGUAGES {
        let mut markers = Vec::new();
        if language.code.eq_ignore_ascii_case(&session.default_language) {
            markers.push("default");
        }
        if language.code.eq_ignore_ascii_case(&session.fallback_language) {
            markers.push("fallback");
        }

        let line = format!("{} {:<4} {}", language.flag, language.code, language.name);
        if markers.is_empty() {
            println!("{}", line);
        } else {
            println!("{} {}", line.bold(), format!("({})", markers.join(", ")).dimmed());
        }
    }
    Ok(())
}
