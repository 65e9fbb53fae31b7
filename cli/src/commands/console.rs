// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Line commands accepted by the live dashboard.
//!
//! Lines starting with `:` are commands; anything else is chat text for the
//! agent currently open in chat.

use agent_hub_core::domain::agent::{AgentDraft, AgentStatus, AgentType};
use agent_hub_core::domain::language::View;

pub const HELP: &str = "\
:lang <code>                                 switch display language
:view <dashboard|management|chat>            switch view
:chat <agent>                                open chat with an agent (id or name)
:add <type> <name>; <role>; <description>; <api key>
:edit <agent>                                print a prefilled :edit line for the agent
:edit <agent>; <name>; <role>; <description>; <api key>[; <type>]
:status <agent> <active|idle|error|training> set agent status
:remove <agent>                              remove an agent
:agents                                      list agents
:stats                                       show system stats and fleet metrics
:help                                        this text
:quit                                        end the session
<text>                                       message the agent open in chat";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Language(String),
    View(View),
    OpenChat(String),
    Add(AgentDraft),
    /// `agent_type` is `None` when the edit keeps the current type.
    Edit {
        agent: String,
        draft: AgentDraft,
        agent_type: Option<AgentType>,
    },
    EditForm(String),
    SetStatus { agent: String, status: AgentStatus },
    Remove(String),
    Agents,
    Stats,
    Help,
    Quit,
    Say(String),
}

pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(ConsoleCommand::Say(line.to_string())));
    };

    let (verb, args) = match rest.split_once(char::is_whitespace) {
        Some((verb, args)) => (verb, args.trim()),
        None => (rest, ""),
    };

    let command = match verb {
        "lang" => ConsoleCommand::Language(required(args, "language code")?),
        "view" => ConsoleCommand::View(parse_view(args)?),
        "chat" => ConsoleCommand::OpenChat(required(args, "agent")?),
        "add" => {
            let (agent_type, fields) = split_first(args, "agent type")?;
            let agent_type = agent_type.parse::<AgentType>().map_err(|e| e.to_string())?;
            ConsoleCommand::Add(parse_draft(fields, agent_type)?)
        }
        "edit" => parse_edit(args)?,
        "status" => {
            let (agent, status) = args
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| "usage: :status <agent> <status>".to_string())?;
            ConsoleCommand::SetStatus {
                agent: agent.trim().to_string(),
                status: parse_status(status)?,
            }
        }
        "remove" => ConsoleCommand::Remove(required(args, "agent")?),
        "agents" => ConsoleCommand::Agents,
        "stats" => ConsoleCommand::Stats,
        "help" => ConsoleCommand::Help,
        "quit" | "q" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command ':{}', try :help", other)),
    };
    Ok(Some(command))
}

fn required(args: &str, what: &str) -> Result<String, String> {
    if args.is_empty() {
        Err(format!("missing {}", what))
    } else {
        Ok(args.to_string())
    }
}

fn split_first<'a>(args: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    args.split_once(char::is_whitespace)
        .map(|(head, tail)| (head, tail.trim()))
        .ok_or_else(|| format!("missing {}", what))
}

/// `name; role; description; api key`. Emptiness is left to draft validation.
fn parse_draft(fields: &str, agent_type: AgentType) -> Result<AgentDraft, String> {
    let parts: Vec<&str> = fields.split(';').map(str::trim).collect();
    let [name, role, description, api_key] = parts.as_slice() else {
        return Err("expected '<name>; <role>; <description>; <api key>'".to_string());
    };
    Ok(AgentDraft {
        name: name.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        api_key: api_key.to_string(),
        agent_type,
    })
}

/// An `:edit` line that reproduces `draft` for `agent` unchanged.
pub fn edit_line(agent: &str, draft: &AgentDraft) -> String {
    format!(
        ":edit {}; {}; {}; {}; {}; {}",
        agent, draft.name, draft.role, draft.description, draft.api_key, draft.agent_type
    )
}

fn parse_edit(args: &str) -> Result<ConsoleCommand, String> {
    if !args.is_empty() && !args.contains(';') {
        return Ok(ConsoleCommand::EditForm(args.to_string()));
    }
    let (agent, fields) = args
        .split_once(';')
        .ok_or_else(|| "usage: :edit <agent>; <name>; <role>; <description>; <api key>[; <type>]".to_string())?;
    let (fields, agent_type) = match fields.rsplit_once(';') {
        Some((head, tail)) if head.matches(';').count() == 3 => {
            let agent_type = tail.trim().parse::<AgentType>().map_err(|e| e.to_string())?;
            (head, Some(agent_type))
        }
        _ => (fields, None),
    };
    Ok(ConsoleCommand::Edit {
        agent: agent.trim().to_string(),
        draft: parse_draft(fields, agent_type.unwrap_or_default())?,
        agent_type,
    })
}

fn parse_view(s: &str) -> Result<View, String> {
    match s.to_ascii_lowercase().as_str() {
        "dashboard" => Ok(View::Dashboard),
        "management" => Ok(View::Management),
        "chat" => Ok(View::Chat),
        other => Err(format!("unknown view '{}'", other)),
    }
}

fn parse_status(s: &str) -> Result<AgentStatus, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "active" => Ok(AgentStatus::Active),
        "idle" => Ok(AgentStatus::Idle),
        "error" => Ok(AgentStatus::Error),
        "training" => Ok(AgentStatus::Training),
        other => Err(format!("unknown status '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(
            parse_line("  hello there ").unwrap(),
            Some(ConsoleCommand::Say("hello there".into()))
        );
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line(":lang en").unwrap(), Some(ConsoleCommand::Language("en".into())));
        assert_eq!(parse_line(":view management").unwrap(), Some(ConsoleCommand::View(View::Management)));
        assert_eq!(
            parse_line(":chat DataHunter Pro").unwrap(),
            Some(ConsoleCommand::OpenChat("DataHunter Pro".into()))
        );
        assert_eq!(parse_line(":q").unwrap(), Some(ConsoleCommand::Quit));
        assert!(parse_line(":lang").is_err());
        assert!(parse_line(":fly").is_err());
    }

    #[test]
    fn test_add_parses_draft() {
        let command = parse_line(":add search Scout; Researcher; Finds things; key-1").unwrap();
        match command {
            Some(ConsoleCommand::Add(draft)) => {
                assert_eq!(draft.agent_type, AgentType::Search);
                assert_eq!(draft.name, "Scout");
                assert_eq!(draft.api_key, "key-1");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse_line(":add robot A; B; C; D").is_err());
        assert!(parse_line(":add custom only-a-name").is_err());
    }

    #[test]
    fn test_edit_with_and_without_type() {
        match parse_line(":edit DataHunter Pro; Hunter; Research; Digs; k2").unwrap() {
            Some(ConsoleCommand::Edit { agent, draft, agent_type }) => {
                assert_eq!(agent, "DataHunter Pro");
                assert_eq!(draft.name, "Hunter");
                assert_eq!(agent_type, None);
            }
            other => panic!("unexpected: {:?}", other),
        }
        match parse_line(":edit ARIA-X1; A; B; C; D; crew").unwrap() {
            Some(ConsoleCommand::Edit { draft, agent_type, .. }) => {
                assert_eq!(agent_type, Some(AgentType::Crew));
                assert_eq!(draft.agent_type, AgentType::Crew);
                assert_eq!(draft.api_key, "D");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_status_takes_last_word() {
        assert_eq!(
            parse_line(":status TaskForce Alpha training").unwrap(),
            Some(ConsoleCommand::SetStatus {
                agent: "TaskForce Alpha".into(),
                status: AgentStatus::Training
            })
        );
    }

    #[test]
    fn test_edit_form_prefill_parses_back() {
        assert_eq!(
            parse_line(":edit QuantAnalyst").unwrap(),
            Some(ConsoleCommand::EditForm("QuantAnalyst".into()))
        );

        let draft = AgentDraft {
            name: "Scout".into(),
            role: "Researcher".into(),
            description: "Finds things".into(),
            api_key: "key-1".into(),
            agent_type: AgentType::Crew,
        };
        match parse_line(&edit_line("Scout", &draft)).unwrap() {
            Some(ConsoleCommand::Edit { agent, draft: parsed, agent_type }) => {
                assert_eq!(agent, "Scout");
                assert_eq!(parsed, draft);
                assert_eq!(agent_type, Some(AgentType::Crew));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
