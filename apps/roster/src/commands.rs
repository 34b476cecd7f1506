//! Line commands for an interactive roster session.

use std::io::{self, Write};

use client_core::RosterSession;
use shared::{
    error::ParseError,
    roster::{ParadeType, RosterEntry, StatusCategory},
};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  branch <name>            select the branch
  parade <first|last>      select the parade
  candidates               personnel of the selected branch, indexed
  add <status> <person>    add a candidate, by name or index, under a status
  remove <status> <index>  remove the person at index (see 'show')
  reset                    clear every status
  show                     print the roster with indexes
  report                   print the report
  copy                     copy the report to the clipboard
  help                     this text
  quit                     leave the session
statuses: PRESENT, BRW, RSO/MC, OFF, LEAVE, DC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Branch(String),
    Parade(ParadeType),
    Candidates,
    Add { status: StatusCategory, person: String },
    Remove { status: StatusCategory, index: usize },
    Reset,
    Show,
    Report,
    Copy,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("'{0}' is not a valid index")]
    InvalidIndex(String),
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Copy(String),
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "branch" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("branch <name>"));
            }
            SessionCommand::Branch(rest.to_string())
        }
        "parade" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("parade <first|last>"));
            }
            SessionCommand::Parade(rest.parse()?)
        }
        "candidates" => SessionCommand::Candidates,
        "add" => {
            let Some((status, name)) = rest.split_once(char::is_whitespace) else {
                return Err(CommandError::Usage("add <status> <person>"));
            };
            SessionCommand::Add {
                status: status.parse()?,
                person: name.trim().to_string(),
            }
        }
        "remove" => {
            let Some((status, index)) = rest.split_once(char::is_whitespace) else {
                return Err(CommandError::Usage("remove <status> <index>"));
            };
            let index = index.trim();
            SessionCommand::Remove {
                status: status.parse()?,
                index: index
                    .parse()
                    .map_err(|_| CommandError::InvalidIndex(index.to_string()))?,
            }
        }
        "reset" => SessionCommand::Reset,
        "show" => SessionCommand::Show,
        "report" => SessionCommand::Report,
        "copy" => SessionCommand::Copy,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// `STATUS=NAME`, as taken by `report --entry`.
pub fn parse_entry(raw: &str) -> Result<RosterEntry, String> {
    let (status, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected STATUS=NAME, got '{raw}'"))?;
    let status: StatusCategory = status.parse().map_err(|err: ParseError| err.to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok(RosterEntry::new(name, status))
}

pub fn execute(
    session: &mut RosterSession,
    command: SessionCommand,
    out: &mut impl Write,
) -> io::Result<Outcome> {
    match command {
        SessionCommand::Branch(name) => {
            session.select_branch(name);
            let count = session.candidates().len();
            writeln!(out, "{count} personnel available")?;
        }
        SessionCommand::Parade(parade) => {
            session.select_parade(parade);
            writeln!(out, "{parade}")?;
        }
        SessionCommand::Candidates => {
            if session.selected_branch().is_none() {
                writeln!(out, "select a branch first")?;
            }
            for (index, person) in session.candidates().into_iter().enumerate() {
                writeln!(out, "  [{index}] {}", person.name)?;
            }
        }
        SessionCommand::Add { status, person } => match session.add_person(&person, status) {
            Ok(state) => writeln!(out, "{status}: {}", state.names(status).len())?,
            Err(err) => writeln!(out, "{err}; see 'candidates'")?,
        },
        SessionCommand::Remove { status, index } => {
            let before = session.state().names(status).len();
            let after = session.remove_person(status, index).names(status).len();
            if before == after {
                writeln!(out, "no entry {index} under {status}")?;
            }
        }
        SessionCommand::Reset => {
            session.reset();
        }
        SessionCommand::Show => write_roster(session, out)?,
        SessionCommand::Report => match session.report() {
            Some(report) => write!(out, "{report}")?,
            None => writeln!(out, "select a branch first")?,
        },
        SessionCommand::Copy => match session.report() {
            Some(report) => return Ok(Outcome::Copy(report)),
            None => writeln!(out, "select a branch first")?,
        },
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Quit => return Ok(Outcome::Quit),
    }
    Ok(Outcome::Continue)
}

fn write_roster(session: &RosterSession, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{} / {}",
        session.selected_branch().unwrap_or("(no branch)"),
        session.parade()
    )?;
    for (status, names) in session.state().iter() {
        writeln!(out, "{status}:")?;
        for (index, name) in names.iter().enumerate() {
            writeln!(out, "  [{index}] {name}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
