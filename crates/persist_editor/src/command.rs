//! Console command parsing

use persist_inspector::EntryId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Clear,
    ModifiedOnly(bool),
    Set { id: EntryId, value: String },
    Save(EntryId),
    SaveAll,
    Reset(EntryId),
    ResetCategory(String),
    DeleteAll,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  list                          show entries (current filters)
  search <text>                 filter by key, value, category or field
  clear                         clear the search text
  modified on|off               only show entries with unsaved edits
  set <category> <key> <value>  stage an edit
  save <category> <key>         save one entry
  save-all                      save every modified entry
  reset <category> <key>        discard the staged edit
  reset-category <category>     delete every key in a category
  delete-all                    delete every stored preference
  refresh                       reload values, dropping staged edits
  quit";

/// Parse one input line. Blank lines parse as `List`.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" | "list" | "ls" => Ok(Command::List),
        "search" if !rest.is_empty() => Ok(Command::Search(rest.to_string())),
        "search" => Err(CommandError::Usage("search <text>")),
        "clear" => Ok(Command::Clear),
        "modified" => match rest {
            "on" => Ok(Command::ModifiedOnly(true)),
            "off" => Ok(Command::ModifiedOnly(false)),
            _ => Err(CommandError::Usage("modified on|off")),
        },
        "set" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(category), Some(key), value) if !category.is_empty() => Ok(Command::Set {
                    id: EntryId::new(category, key),
                    value: value.unwrap_or("").trim_start().to_string(),
                }),
                _ => Err(CommandError::Usage("set <category> <key> <value>")),
            }
        }
        "save" => entry_id(rest)
            .map(Command::Save)
            .ok_or(CommandError::Usage("save <category> <key>")),
        "save-all" => Ok(Command::SaveAll),
        "reset" => entry_id(rest)
            .map(Command::Reset)
            .ok_or(CommandError::Usage("reset <category> <key>")),
        "reset-category" if !rest.is_empty() => Ok(Command::ResetCategory(rest.to_string())),
        "reset-category" => Err(CommandError::Usage("reset-category <category>")),
        "delete-all" => Ok(Command::DeleteAll),
        "refresh" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn entry_id(rest: &str) -> Option<EntryId> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(category), Some(key), None) => Some(EntryId::new(category, key)),
        _ => None,
    }
}
