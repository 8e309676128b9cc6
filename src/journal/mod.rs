//! Interactive daily journal. An entry is made for the morning, afternoon or evening, and each
//! part of the day asks its own set of questions.

pub mod builder;
pub mod collect;
pub mod history;

use std::{num::NonZeroU32, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use collect::collect_entry;
use history::{process_history_command, HistoryCommand};
use thiserror::Error;
use tracing::error;

use crate::{
    cli::AppArgs,
    prompt::{PromptError, Prompter},
    storage::{entities::UnknownTimeOfDay, StoreError},
    utils::{clock::DefaultClock, logging::JOURNAL_PREFIX},
};

#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    InvalidCategory(#[from] UnknownTimeOfDay),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JournalError {
    pub fn exit_code(&self) -> u8 {
        match self {
            JournalError::InvalidCategory(_) => 2,
            JournalError::Prompt(PromptError::Io(_)) => 1,
            JournalError::Prompt(_) => 3,
            JournalError::Store(_) => 1,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "moodlog-journal", version, long_about = None)]
#[command(about = "Write a morning, afternoon or evening journal entry", long_about = None)]
pub struct JournalArgs {
    #[command(subcommand)]
    command: Option<JournalCommands>,
    #[command(flatten)]
    app: AppArgs,
    #[arg(
        long,
        help = "Give up on a question after this many invalid answers. Overrides max_attempts from config.json"
    )]
    max_attempts: Option<NonZeroU32>,
}

#[derive(Subcommand, Debug)]
enum JournalCommands {
    #[command(about = "Show previous entries")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
}

fn run(args: JournalArgs) -> Result<()> {
    let context = args.app.init(JOURNAL_PREFIX)?;
    let store = context.journal_store();

    match args.command {
        None => {
            let mut prompter = Prompter::stdio()
                .with_max_attempts(args.max_attempts.or(context.settings.max_attempts));
            collect_entry(&mut prompter, &store, &DefaultClock)?;
            Ok(())
        }
        Some(JournalCommands::History { command }) => process_history_command(
            command,
            context.settings.default_window,
            &store,
            &DefaultClock,
            &mut std::io::stdout().lock(),
        ),
    }
}

/// Entry point of the journal binary. Failures are reported on stderr and mapped to an exit code.
pub fn run_journal() -> ExitCode {
    let args = JournalArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Journal failed {e:?}");
            match e.downcast_ref::<JournalError>() {
                Some(v) => {
                    // Unknown categories were already explained by the prompt.
                    if !matches!(v, JournalError::InvalidCategory(_)) {
                        eprintln!("Error: {e:#}");
                    }
                    ExitCode::from(v.exit_code())
                }
                None => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
