use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use clap::{Parser, Subcommand};
use client_core::{DirectoryClient, RosterSession};
use shared::{
    domain::personnel_in_branch,
    roster::{ParadeType, RosterEntry, RosterStore},
};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

mod commands;

use commands::{execute, parse_command, parse_entry, Outcome, HELP};

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Build and copy parade state reports")]
struct Cli {
    #[arg(long, env = "ROSTER_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List branch names.
    Branches,
    /// List personnel, optionally only those of one branch.
    Personnel {
        #[arg(long)]
        branch: Option<String>,
    },
    /// Render a report from STATUS=NAME entries without contacting the server.
    Report {
        #[arg(long)]
        branch: String,
        #[arg(long, default_value_t)]
        parade: ParadeType,
        #[arg(long = "entry", value_parser = parse_entry)]
        entries: Vec<RosterEntry>,
        #[arg(long)]
        copy: bool,
    },
    /// Interactive session reading commands from stdin.
    Session {
        #[arg(long)]
        branch: Option<String>,
        #[arg(long, default_value_t)]
        parade: ParadeType,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter("warn")
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Branches => {
            let client = DirectoryClient::new(&cli.server_url)?;
            for branch in client.branches().await? {
                println!("{}", branch.name);
            }
        }
        Command::Personnel { branch } => {
            let client = DirectoryClient::new(&cli.server_url)?;
            let personnel = client.personnel().await?;
            let selected = match branch.as_deref() {
                Some(branch) => personnel_in_branch(&personnel, branch),
                None => personnel.iter().collect(),
            };
            for person in selected {
                println!("{}\t{}", person.name, person.branch);
            }
        }
        Command::Report {
            branch,
            parade,
            entries,
            copy,
        } => {
            let mut store = RosterStore::new();
            store.select_branch(branch);
            store.select_parade(parade);
            for entry in entries {
                store.add_person(entry.name, entry.status);
            }
            let report = store.report().context("no branch selected")?;
            print!("{report}");
            if copy {
                copy_report(&report);
            }
        }
        Command::Session { branch, parade } => {
            let client = DirectoryClient::new(&cli.server_url)?;
            run_session(&client, branch, parade).await?;
        }
    }

    Ok(())
}

async fn run_session(
    client: &DirectoryClient,
    branch: Option<String>,
    parade: ParadeType,
) -> Result<()> {
    let mut session = RosterSession::load(client).await;
    if let Some(error) = session.error() {
        bail!("{error}");
    }
    if let Some(branch) = branch {
        session.select_branch(branch);
    }
    session.select_parade(parade);

    let mut out = std::io::stdout();
    writeln!(out, "{HELP}")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}; type 'help' for commands")?;
                continue;
            }
        };
        match execute(&mut session, command, &mut out)? {
            Outcome::Continue => {}
            Outcome::Copy(report) => {
                copy_report(&report);
                writeln!(out, "report copied")?;
            }
            Outcome::Quit => break,
        }
    }
    Ok(())
}

fn copy_report(report: &str) {
    let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(report));
    if let Err(err) = copied {
        warn!(%err, "clipboard unavailable; report was not copied");
    }
}
