// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Startup Fleet
//!
//! Five pre-built agents a fresh session is seeded with: one supervisor and
//! four workers. Names, roles and descriptions follow the session language;
//! anything other than Russian gets the English texts. Ids are derived from
//! fixed slugs so the fleet is identical across runs.

use chrono::{Duration, Utc};

use crate::domain::agent::{Agent, AgentId, AgentStatus, AgentType, Performance};
use crate::domain::language::find_language;

struct Texts {
    name: &'static str,
    role: &'static str,
    description: &'static str,
}

struct SeedAgent {
    slug: &'static str,
    agent_type: AgentType,
    api_key: &'static str,
    status: AgentStatus,
    metrics: [f64; 5],
    total_tasks: u32,
    success_rate: f64,
    active_ago: Duration,
    trained_ago: Duration,
}

fn fleet() -> [SeedAgent; 5] {
    [
        SeedAgent {
            slug: "supervisor-001",
            agent_type: AgentType::Supervisor,
            api_key: "sup_xk7m9n2p4q8w1e5r7t9y",
            status: AgentStatus::Active,
            metrics: [97.8, 94.2, 89.5, 98.1, 95.7],
            total_tasks: 1247,
            success_rate: 97.3,
            active_ago: Duration::zero(),
            trained_ago: Duration::days(2),
        },
        SeedAgent {
            slug: "search-001",
            agent_type: AgentType::Search,
            api_key: "brave_api_key_xk7m9n2p4q",
            status: AgentStatus::Active,
            metrics: [92.5, 88.7, 85.3, 91.8, 87.4],
            total_tasks: 342,
            success_rate: 91.2,
            active_ago: Duration::minutes(5),
            trained_ago: Duration::days(5),
        },
        SeedAgent {
            slug: "crew-001",
            agent_type: AgentType::Crew,
            api_key: "crew_api_key_m8n2p5q7w9e",
            status: AgentStatus::Active,
            metrics: [89.3, 91.6, 87.9, 93.2, 89.8],
            total_tasks: 156,
            success_rate: 88.7,
            active_ago: Duration::minutes(12),
            trained_ago: Duration::days(7),
        },
        SeedAgent {
            slug: "custom-001",
            agent_type: AgentType::Custom,
            api_key: "custom_fin_api_p9q2w5e8r1t",
            status: AgentStatus::Idle,
            metrics: [94.1, 86.3, 92.7, 89.5, 84.2],
            total_tasks: 89,
            success_rate: 93.8,
            active_ago: Duration::hours(2),
            trained_ago: Duration::days(3),
        },
        SeedAgent {
            slug: "custom-002",
            agent_type: AgentType::Custom,
            api_key: "custom_content_api_w3e6r9t2y",
            status: AgentStatus::Training,
            metrics: [87.6, 92.4, 95.8, 86.9, 91.3],
            total_tasks: 234,
            success_rate: 89.4,
            active_ago: Duration::minutes(30),
            trained_ago: Duration::zero(),
        },
    ]
}

const EN_TEXTS: [Texts; 5] = [
    Texts {
        name: "ARIA-X1",
        role: "AI System Supervisor",
        description: "Main AI Agent responsible for monitoring all system operations, performance optimization, and strategic decision making across the entire AI ecosystem.",
    },
    Texts {
        name: "DataHunter Pro",
        role: "Research Specialist",
        description: "Advanced search agent powered by Brave Search API. Specializes in real-time data gathering, market research, and competitive intelligence.",
    },
    Texts {
        name: "TaskForce Alpha",
        role: "Multi-Agent Orchestrator",
        description: "CrewAI-powered coordination agent that manages complex multi-step workflows and orchestrates teams of specialized agents.",
    },
    Texts {
        name: "QuantAnalyst",
        role: "Financial Analysis Expert",
        description: "Custom-trained financial analysis agent specializing in market trends, risk assessment, and investment strategy recommendations.",
    },
    Texts {
        name: "CreativeEngine",
        role: "Content Generation Specialist",
        description: "Advanced content creation agent focused on generating high-quality marketing materials, technical documentation, and creative writing.",
    },
];

const RU_TEXTS: [Texts; 5] = [
    Texts {
        name: "АРИЯ-X1",
        role: "Супервизор ИИ-Системы",
        description: "Главный ИИ-агент, отвечающий за мониторинг всех системных операций, оптимизацию производительности и стратегическое принятие решений во всей экосистеме ИИ.",
    },
    Texts {
        name: "ДатаХантер Про",
        role: "Специалист по Исследованиям",
        description: "Продвинутый поисковый агент на базе Brave Search API. Специализируется на сборе данных в реальном времени, маркетинговых исследованиях и конкурентной разведке.",
    },
    Texts {
        name: "ТаскФорс Альфа",
        role: "Многоагентный Оркестратор",
        description: "Агент координации на базе CrewAI, который управляет сложными многоэтапными рабочими процессами и оркестрирует команды специализированных агентов.",
    },
    Texts {
        name: "КвантАналитик",
        role: "Эксперт по Финансовому Анализу",
        description: "Специально обученный агент финансового анализа, специализирующийся на рыночных трендах, оценке рисков и рекомендациях по инвестиционным стратегиям.",
    },
    Texts {
        name: "КреативДвижок",
        role: "Специалист по Генерации Контента",
        description: "Продвинутый агент создания контента, сосредоточенный на генерации высококачественных маркетинговых материалов, технической документации и креативного письма.",
    },
];

/// Slugs of the seed fleet, in listing order.
pub const SEED_SLUGS: [&str; 5] = [
    "supervisor-001",
    "search-001",
    "crew-001",
    "custom-001",
    "custom-002",
];

pub fn seed_fleet(language: &str) -> Vec<Agent> {
    let texts = match find_language(language).map(|l| l.code) {
        Some("ru") => &RU_TEXTS,
        _ => &EN_TEXTS,
    };
    let now = Utc::now();

    fleet()
        .into_iter()
        .zip(texts.iter())
        .map(|(seed, text)| {
            let [accuracy, efficiency, uniqueness, value, demand] = seed.metrics;
            Agent {
                id: AgentId::from_slug(seed.slug),
                name: text.name.to_string(),
                role: text.role.to_string(),
                description: text.description.to_string(),
                api_key: seed.api_key.to_string(),
                status: seed.status,
                agent_type: seed.agent_type,
                performance: Performance::new(accuracy, efficiency, uniqueness, value, demand),
                last_activity: now - seed.active_ago,
                last_training: now - seed.trained_ago,
                total_tasks: seed.total_tasks,
                success_rate: seed.success_rate,
            }
        })
        .collect()
}

/// Id of the seed agent whose name, in any supported language, is `name`.
pub fn seed_id_by_name(name: &str) -> Option<AgentId> {
    let name = name.trim();
    [&EN_TEXTS, &RU_TEXTS].into_iter().find_map(|texts| {
        texts
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
            .map(|index| AgentId::from_slug(SEED_SLUGS[index]))
    })
}
