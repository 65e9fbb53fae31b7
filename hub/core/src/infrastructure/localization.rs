// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Localization
//!
//! Static string tables for the two supported languages plus the canned
//! agent replies. Lookups resolve through a fixed chain:
//!
//! 1. the requested language's table,
//! 2. the English table,
//! 3. the raw key itself.
//!
//! Missing keys therefore never fail; at worst the key is rendered verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::agent::{AgentStatus, AgentType};
use crate::domain::language::{find_language, FALLBACK_LANGUAGE};

type Table = HashMap<&'static str, &'static str>;

static TABLES: LazyLock<HashMap<&'static str, Table>> = LazyLock::new(|| {
    HashMap::from([
        ("ru", RU.iter().copied().collect()),
        ("en", EN.iter().copied().collect()),
    ])
});

/// Entry of the language's own table, without any fallback.
pub fn lookup(language: &str, key: &str) -> Option<&'static str> {
    let code = find_language(language)?.code;
    TABLES.get(code)?.get(key).copied()
}

/// Resolve `key` for `language`: own table, then English, then the key.
pub fn translate(language: &str, key: &str) -> String {
    lookup(language, key)
        .or_else(|| lookup(FALLBACK_LANGUAGE, key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

pub fn status_label(language: &str, status: AgentStatus) -> String {
    translate(language, status.as_str())
}

/// Label of the management form's type selector.
pub fn agent_type_label(language: &str, agent_type: AgentType) -> String {
    let key = match agent_type {
        AgentType::Custom => "custom_agent",
        AgentType::Search => "search_agent",
        AgentType::Crew => "crewai_agent",
        AgentType::Supervisor => "supervisor_agent",
    };
    translate(language, key)
}

/// Reply set an agent picks from; unsupported languages answer in English.
pub fn canned_replies(language: &str) -> &'static [&'static str] {
    match find_language(language).map(|l| l.code) {
        Some("ru") => RU_REPLIES,
        _ => EN_REPLIES,
    }
}

const EN_REPLIES: &[&str] = &[
    "I'm processing your request and analyzing the data patterns.",
    "Based on my training data, here's my analysis of the situation.",
    "I've completed the task and generated the following insights.",
    "Let me search for the most relevant information using my knowledge base.",
    "I'm collaborating with other agents to provide you with a comprehensive answer.",
];

const RU_REPLIES: &[&str] = &[
    "Я обрабатываю ваш запрос и анализирую паттерны данных.",
    "Основываясь на моих обучающих данных, вот мой анализ ситуации.",
    "Я завершил задачу и сгенерировал следующие выводы.",
    "Позвольте мне найти наиболее релевантную информацию, используя мою базу знаний.",
    "Я сотрудничаю с другими агентами, чтобы предоставить вам исчерпывающий ответ.",
];

const RU: &[(&str, &str)] = &[
    ("ai_agent_hub", "Центр Управления ИИ"),
    ("core_management_center", "Центральная Система Управления"),
    ("dashboard", "Панель"),
    ("management", "Управление"),
    ("agent_chat", "Чат с Агентом"),
    ("total_agents", "Всего Агентов"),
    ("active_now", "Активно Сейчас"),
    ("tasks_completed", "Задач Выполнено"),
    ("system_health", "Состояние Системы"),
    ("connected_agents", "Подключенные Агенты"),
    ("manage_ai_workforce", "Управление ИИ-персоналом"),
    ("add_new_agent", "Добавить Агента"),
    ("no_agents_connected", "Агенты не подключены"),
    ("start_building_workforce", "Начните создавать свой ИИ-персонал, добавив первого агента с API-ключом."),
    ("add_first_agent", "Добавить Первого Агента"),
    ("chat", "Чат"),
    ("accuracy", "Точность"),
    ("efficiency", "Эффективность"),
    ("value", "Ценность"),
    ("demand", "Востребованность"),
    ("tasks", "Задач"),
    ("success", "Успех"),
    ("last_active", "Последняя активность"),
    ("supervisor", "СУПЕРВИЗОР"),
    ("performance_overview", "Обзор Производительности"),
    ("system_status", "Состояние Системы"),
    ("system_alerts", "Системные Уведомления"),
    ("ai_supervisor_insights", "Анализ ИИ-Супервизора"),
    ("agents_online", "Агентов Онлайн"),
    ("tasks_running", "Задач Выполняется"),
    ("uptime", "Время Работы"),
    ("all_systems_operational", "✓ Все системы работают"),
    ("training_recommended", "⚡ Рекомендуется обучение"),
    ("performance_optimized", "ℹ Производительность оптимизирована"),
    ("fleet_performance_metrics", "Метрики Производительности Флота"),
    ("performance_trends", "Тенденции Производительности"),
    ("overall_efficiency_week", "Общая эффективность за неделю"),
    ("task_completion_rate", "Скорость выполнения задач"),
    ("agent_response_accuracy", "Точность ответов агентов"),
    ("agent_management", "Управление Агентами"),
    ("configure_manage_workforce", "Настройка и управление вашим ИИ-персоналом"),
    ("add_new_agent_btn", "Добавить Нового Агента"),
    ("edit_agent", "Редактировать Агента"),
    ("add_new_agent_form", "Добавить Нового Агента"),
    ("agent_name", "Имя Агента"),
    ("role", "Роль"),
    ("agent_type", "Тип Агента"),
    ("api_key", "API Ключ"),
    ("description", "Описание"),
    ("custom_agent", "Пользовательский Агент"),
    ("search_agent", "Поисковый Агент (Brave API)"),
    ("crewai_agent", "CrewAI Агент"),
    ("supervisor_agent", "Агент-Супервизор"),
    ("cancel", "Отмена"),
    ("create_agent", "Создать Агента"),
    ("update_agent", "Обновить Агента"),
    ("connected_agents_count", "Подключенные Агенты"),
    ("no_agents_configured", "Агенты не настроены"),
    ("click_add_to_start", "Нажмите \"Добавить Нового Агента\" для начала"),
    ("start_conversation", "Начать разговор с"),
    ("specializes_in", "Этот ИИ-агент специализируется на"),
    ("ask_questions", "Задавайте вопросы, запрашивайте анализ или давайте задания для выполнения."),
    ("message_placeholder", "Сообщение для"),
    ("send", "Отправить"),
    ("active", "активен"),
    ("idle", "ожидание"),
    ("error", "ошибка"),
    ("training", "обучение"),
    ("research_specialist", "Специалист по Исследованиям"),
    ("multi_agent_orchestrator", "Многоагентный Оркестратор"),
    ("financial_analysis_expert", "Эксперт по Финансовому Анализу"),
    ("content_generation_specialist", "Специалист по Генерации Контента"),
    ("ai_system_supervisor", "Супервизор ИИ-Системы"),
    ("insight_1", "Все агенты работают в нормальных параметрах"),
    ("insight_2", "Эффективность агентов улучшилась на 15% за эту неделю"),
    ("insight_3", "Рекомендуется: Запланировать обучение для Агента-003 на завтра"),
    ("insight_4", "Производительность системы оптимальна"),];

const EN: &[(&str, &str)] = &[
    ("ai_agent_hub", "AI Agent Hub"),
    ("core_management_center", "Core Management Center"),
    ("dashboard", "Dashboard"),
    ("management", "Management"),
    ("agent_chat", "Agent Chat"),
    ("total_agents", "Total Agents"),
    ("active_now", "Active Now"),
    ("tasks_completed", "Tasks Completed"),
    ("system_health", "System Health"),
    ("connected_agents", "Connected Agents"),
    ("manage_ai_workforce", "Manage your AI workforce"),
    ("add_new_agent", "Add New Agent"),
    ("no_agents_connected", "No agents connected"),
    ("start_building_workforce", "Start building your AI workforce by adding your first agent with an API key."),
    ("add_first_agent", "Add Your First Agent"),
    ("chat", "Chat"),
    ("accuracy", "Accuracy"),
    ("efficiency", "Efficiency"),
    ("value", "Value"),
    ("demand", "Demand"),
    ("tasks", "Tasks"),
    ("success", "Success"),
    ("last_active", "Last active"),
    ("supervisor", "SUPERVISOR"),
    ("performance_overview", "Performance Overview"),
    ("system_status", "System Status"),
    ("system_alerts", "System Alerts"),
    ("ai_supervisor_insights", "AI Supervisor Insights"),
    ("agents_online", "Agents Online"),
    ("tasks_running", "Tasks Running"),
    ("uptime", "Uptime"),
    ("all_systems_operational", "✓ All systems operational"),
    ("training_recommended", "⚡ Training recommended"),
    ("performance_optimized", "ℹ Performance optimized"),
    ("fleet_performance_metrics", "Fleet Performance Metrics"),
    ("performance_trends", "Performance Trends"),
    ("overall_efficiency_week", "Overall efficiency this week"),
    ("task_completion_rate", "Task completion rate"),
    ("agent_response_accuracy", "Agent response accuracy"),
    ("agent_management", "Agent Management"),
    ("configure_manage_workforce", "Configure and manage your AI workforce"),
    ("add_new_agent_btn", "Add New Agent"),
    ("edit_agent", "Edit Agent"),
    ("add_new_agent_form", "Add New Agent"),
    ("agent_name", "Agent Name"),
    ("role", "Role"),
    ("agent_type", "Agent Type"),
    ("api_key", "API Key"),
    ("description", "Description"),
    ("custom_agent", "Custom Agent"),
    ("search_agent", "Search Agent (Brave API)"),
    ("crewai_agent", "CrewAI Agent"),
    ("supervisor_agent", "Supervisor Agent"),
    ("cancel", "Cancel"),
    ("create_agent", "Create Agent"),
    ("update_agent", "Update Agent"),
    ("connected_agents_count", "Connected Agents"),
    ("no_agents_configured", "No agents configured yet"),
    ("click_add_to_start", "Click \"Add New Agent\" to get started"),
    ("start_conversation", "Start a conversation with"),
    ("specializes_in", "This AI agent specializes in"),
    ("ask_questions", "Ask questions, request analysis, or give it tasks to complete."),
    ("message_placeholder", "Message"),
    ("send", "Send"),
    ("active", "active"),
    ("idle", "idle"),
    ("error", "error"),
    ("training", "training"),
    ("research_specialist", "Research Specialist"),
    ("multi_agent_orchestrator", "Multi-Agent Orchestrator"),
    ("financial_analysis_expert", "Financial Analysis Expert"),
    ("content_generation_specialist", "Content Generation Specialist"),
    ("ai_system_supervisor", "AI System Supervisor"),
    ("insight_1", "All agents operating within normal parameters"),
    ("insight_2", "Agent efficiency has improved by 15% this week"),
    ("insight_3", "Recommended: Schedule training for Agent-003 tomorrow"),
    ("insight_4", "System performance is optimal"),];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_uses_active_language() {
        assert_eq!(translate("ru", "dashboard"), "Панель");
        assert_eq!(translate("en", "dashboard"), "Dashboard");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(translate("de", "total_agents"), "Total Agents");
        assert_eq!(lookup("de", "total_agents"), None);
    }

    #[test]
    fn test_unknown_key_renders_verbatim() {
        assert_eq!(translate("ru", "no_such_key"), "no_such_key");
        assert_eq!(translate("xx", "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_tables_cover_the_same_keys() {
        let mut ru: Vec<_> = RU.iter().map(|(k, _)| *k).collect();
        let mut en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        ru.sort_unstable();
        en.sort_unstable();
        assert_eq!(ru, en);
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_label("ru", AgentStatus::Training), "обучение");
        assert_eq!(status_label("en", AgentStatus::Idle), "idle");
        assert_eq!(agent_type_label("en", AgentType::Crew), "CrewAI Agent");
    }

    #[test]
    fn test_canned_replies_per_language() {
        assert_eq!(canned_replies("en").len(), 5);
        assert_eq!(canned_replies("ru").len(), 5);
        assert_eq!(canned_replies("fr"), canned_replies("en"));
        assert!(canned_replies("RU")[0].starts_with("Я "));
    }
}
