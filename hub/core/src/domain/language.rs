// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Supported display languages and dashboard views.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "ru", name: "Русский", flag: "🇷🇺" },
    Language { code: "en", name: "English", flag: "🇺🇸" },
];

/// Language every lookup falls back to.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Language a fresh session starts in.
pub const DEFAULT_LANGUAGE: &str = "ru";

pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}

pub fn is_supported(code: &str) -> bool {
    find_language(code).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Management,
    Chat,
}

impl View {
    /// Localization key of the navigation label.
    pub fn label_key(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Management => "management",
            View::Chat => "agent_chat",
        }
    }
}
