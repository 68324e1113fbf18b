// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! planloop - filesystem-backed agent workflow coordinator

mod commands;
mod context;
mod error;

use clap::{Parser, Subcommand};
use commands::alert::AlertArgs;
use commands::sessions::CreateArgs;
use commands::update::SafeModeOverrides;
use error::CliError;
use planloop_core::{SignalLevel, SignalType};
use planloop_storage::{init_session_logging, Config, Home};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "planloop", version, about = "Filesystem-backed agent workflow coordinator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report what an agent should do next
    Status {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        agent: Option<String>,
        /// Accepted for interface compatibility; stdout is always JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a versioned, lock-serialized state mutation
    Update {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        agent: Option<String>,
        /// Read the payload from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        no_plan_edit: bool,
        #[arg(long)]
        strict: bool,
        /// Override a configured `no_plan_edit` default for this call
        #[arg(long)]
        allow_plan_edit: bool,
        /// Override a configured `strict` default for this call
        #[arg(long)]
        allow_extra_fields: bool,
    },
    /// Open or close a signal
    Alert {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        agent: Option<String>,
        #[arg(long)]
        id: String,
        #[arg(long)]
        close: bool,
        #[arg(long, value_enum)]
        level: Option<CliSignalLevel>,
        #[arg(long = "type", value_enum)]
        signal_type: Option<CliSignalType>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Print static schema, enum, and error-code reference data
    Describe,
    /// Run the scripted end-to-end scenario suite
    Selftest {
        /// Accepted for interface compatibility; stdout is always JSON
        #[arg(long)]
        json: bool,
    },
    /// Session registry operations
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },
    /// Diagnostic snapshot: lock state, queue, deadlock tracker, log tail
    Debug {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        agent: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionsCommand {
    /// List every session in the home registry
    List,
    /// Show one session's registry entry and full state
    Info { session: Option<String> },
    /// Bootstrap a brand-new session
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        purpose: String,
        #[arg(long)]
        project_root: String,
        #[arg(long)]
        branch: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSignalLevel {
    Blocker,
    High,
    Info,
}

impl From<CliSignalLevel> for SignalLevel {
    fn from(v: CliSignalLevel) -> Self {
        match v {
            CliSignalLevel::Blocker => SignalLevel::Blocker,
            CliSignalLevel::High => SignalLevel::High,
            CliSignalLevel::Info => SignalLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSignalType {
    Ci,
    Lint,
    Bench,
    System,
    Other,
}

impl From<CliSignalType> for SignalType {
    fn from(v: CliSignalType) -> Self {
        match v {
            CliSignalType::Ci => SignalType::Ci,
            CliSignalType::Lint => SignalType::Lint,
            CliSignalType::Bench => SignalType::Bench,
            CliSignalType::System => SignalType::System,
            CliSignalType::Other => SignalType::Other,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let home = Home::from_env();

    if let Err(e) = home.ensure() {
        eprintln!("failed to initialize home directory: {e}");
        std::process::exit(1);
    }
    if let Err(e) = Config::bootstrap(&home.config_path()) {
        eprintln!("failed to bootstrap config: {e}");
        std::process::exit(1);
    }
    let config = match Config::load(&home.config_path()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let _logging_guards = session_flag_for(&cli)
        .and_then(|flag| context::resolve_session(&home, flag).ok())
        .and_then(|session| {
            let paths = planloop_storage::SessionPaths::new(home.session_dir(&session));
            init_session_logging(&paths, &config.logging.level).ok()
        });

    match dispatch(&cli.command, &home, &config) {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// `Some(flag)` for commands that target a session (the `--session` flag
/// itself, possibly absent) so their logs can be attached before dispatch
/// runs; `None` for commands with no session to log against.
fn session_flag_for(cli: &Cli) -> Option<Option<&str>> {
    match &cli.command {
        Commands::Status { session, .. } => Some(session.as_deref()),
        Commands::Update { session, .. } => Some(session.as_deref()),
        Commands::Alert { session, .. } => Some(session.as_deref()),
        Commands::Debug { session, .. } => Some(session.as_deref()),
        Commands::Sessions { command: SessionsCommand::Info { session } } => {
            Some(session.as_deref())
        }
        _ => None,
    }
}

fn dispatch(command: &Commands, home: &Home, config: &Config) -> Result<Value, CliError> {
    match command {
        Commands::Status { session, agent, .. } => {
            let session = resolve(home, session.as_deref())?;
            commands::status::run(home, config, &session, agent.as_deref())
        }
        Commands::Update {
            session,
            agent,
            file,
            dry_run,
            no_plan_edit,
            strict,
            allow_plan_edit,
            allow_extra_fields,
        } => {
            let session = resolve(home, session.as_deref())?;
            let body = read_payload(file.as_deref())?;
            let overrides = SafeModeOverrides {
                dry_run: *dry_run || config.safe_mode.dry_run,
                no_plan_edit: !allow_plan_edit && (*no_plan_edit || config.safe_mode.no_plan_edit),
                strict: !allow_extra_fields && (*strict || config.safe_mode.strict),
            };
            commands::update::run(home, config, &session, agent.as_deref(), &body, overrides)
        }
        Commands::Alert { session, agent, id, close, level, signal_type, kind, title, message, link } => {
            let session = resolve(home, session.as_deref())?;
            let args = AlertArgs {
                close: *close,
                level: level.map(Into::into),
                signal_type: signal_type.map(Into::into),
                kind: kind.clone(),
                title: title.clone(),
                message: message.clone(),
                link: link.clone(),
            };
            commands::alert::run(home, config, &session, agent.as_deref(), id, args)
        }
        Commands::Describe => Ok(commands::describe::run()),
        Commands::Selftest { .. } => Ok(commands::selftest::run()),
        Commands::Sessions { command } => match command {
            SessionsCommand::List => commands::sessions::list(home),
            SessionsCommand::Info { session } => {
                let session = resolve(home, session.as_deref())?;
                commands::sessions::info(home, &session)
            }
            SessionsCommand::Create { name, title, purpose, project_root, branch } => {
                commands::sessions::create(
                    home,
                    CreateArgs {
                        name: name.clone(),
                        title: title.clone(),
                        purpose: purpose.clone(),
                        project_root: project_root.clone(),
                        branch: branch.clone(),
                    },
                )
            }
        },
        Commands::Debug { session, agent } => {
            let session = resolve(home, session.as_deref())?;
            commands::debug::run(home, config, &session, agent.as_deref())
        }
    }
}

fn resolve(home: &Home, flag: Option<&str>) -> Result<String, CliError> {
    context::resolve_session(home, flag)
}

fn read_payload(file: Option<&std::path::Path>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::MalformedInput(format!("cannot read {}: {e}", path.display()))),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::MalformedInput(format!("cannot read stdin: {e}")))?;
            Ok(buf)
        }
    }
}
