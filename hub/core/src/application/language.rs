// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Session display language, shared between the session and the reply
//! scheduler so a deferred reply speaks the language active when it lands.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::language::{find_language, Language, FALLBACK_LANGUAGE, LANGUAGES};

#[derive(Clone)]
pub struct LanguageHandle {
    current: Arc<RwLock<&'static Language>>,
}

impl LanguageHandle {
    /// Unsupported codes start the session in the fallback language.
    pub fn new(code: &str) -> Self {
        Self {
            current: Arc::new(RwLock::new(resolve(code, FALLBACK_LANGUAGE))),
        }
    }

    pub fn get(&self) -> &'static Language {
        *self.current.read()
    }

    pub fn code(&self) -> &'static str {
        self.get().code
    }

    pub fn set(&self, language: &'static Language) {
        *self.current.write() = language;
    }
}

impl std::fmt::Debug for LanguageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LanguageHandle").field(&self.code()).finish()
    }
}

/// `code` if supported, else `fallback`, else the first known language.
pub fn resolve(code: &str, fallback: &str) -> &'static Language {
    find_language(code)
        .or_else(|| find_language(fallback))
        .unwrap_or(&LANGUAGES[0])
}
