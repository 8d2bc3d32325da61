//! Console commands accepted by the interactive loop.

use directory_core::Intent;
use shared::domain::Selector;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Apply(Intent),
    Show,
    Roles,
    Locations,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apply(intent) => intent.name(),
            Self::Show => "show",
            Self::Roles => "roles",
            Self::Locations => "locations",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("'{0}' needs a value, e.g. '{0} all'")]
    MissingValue(&'static str),
}

pub const HELP_TEXT: &str = "\
commands:
  search <text>      filter by name, bio or skill (empty text clears)
  role <value>       exact role, or 'all'
  location <value>   exact location, or 'all'
  roles | locations  list available selector values
  reload             fetch the member list again
  retry              retry after a failed load
  theme              toggle dark mode
  show               render the directory
  quit               exit";

/// Parses one input line. Everything after the first space of `search`,
/// `role` and `location` is taken verbatim.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, CommandParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (keyword, rest) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, Some(rest)),
        None => (line, None),
    };

    let command = match keyword {
        "search" => ConsoleCommand::Apply(Intent::SetSearchText(
            rest.unwrap_or_default().to_string(),
        )),
        "role" => ConsoleCommand::Apply(Intent::SetRoleSelector(selector_value("role", rest)?)),
        "location" => ConsoleCommand::Apply(Intent::SetLocationSelector(selector_value(
            "location", rest,
        )?)),
        "reload" => ConsoleCommand::Apply(Intent::Reload),
        "retry" => ConsoleCommand::Apply(Intent::Retry),
        "theme" => ConsoleCommand::Apply(Intent::ToggleDarkMode),
        "show" | "" => ConsoleCommand::Show,
        "roles" => ConsoleCommand::Roles,
        "locations" => ConsoleCommand::Locations,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn selector_value(keyword: &'static str, rest: Option<&str>) -> Result<Selector, CommandParseError> {
    match rest {
        Some(value) if !value.is_empty() => Ok(Selector::parse(value)),
        _ => Err(CommandParseError::MissingValue(keyword)),
    }
}
