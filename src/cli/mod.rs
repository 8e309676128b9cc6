pub mod add;
pub mod output;
pub mod view;

use std::path::PathBuf;

use add::{process_add_command, AddCommand};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, level_filters::LevelFilter};
use view::{process_view_command, ViewCommand};

use crate::{
    config::Settings,
    prompt::Prompter,
    storage::sqlite::SqliteStore,
    utils::{
        clock::DefaultClock,
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, MOOD_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "moodlog", version, long_about = None)]
#[command(about = "Record daily mood and sleep scores and look back at them", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[command(flatten)]
    app: AppArgs,
}

/// Options shared by both binaries.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AppArgs {
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Database file to use instead of the one in the application directory"
    )]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    pub log: bool,
}

/// Resolved application directory and settings.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub app_dir: PathBuf,
    pub settings: Settings,
    db_override: Option<PathBuf>,
}

impl AppContext {
    pub fn new(app_dir: PathBuf, settings: Settings, db_override: Option<PathBuf>) -> Self {
        Self {
            app_dir,
            settings,
            db_override,
        }
    }

    pub fn mood_store(&self) -> SqliteStore {
        SqliteStore::new(
            self.db_override
                .clone()
                .unwrap_or_else(|| self.settings.mood_database_path(&self.app_dir)),
        )
    }

    pub fn journal_store(&self) -> SqliteStore {
        SqliteStore::new(
            self.db_override
                .clone()
                .unwrap_or_else(|| self.settings.journal_database_path(&self.app_dir)),
        )
    }
}

impl AppArgs {
    /// Creates the application directory, starts logging and reads the settings.
    pub fn init(&self, log_prefix: &str) -> Result<AppContext> {
        let app_dir = match &self.dir {
            Some(dir) => {
                ensure_dir(dir)?;
                dir.clone()
            }
            None => create_application_default_path()?,
        };

        let logging_level = if self.log {
            Some(LevelFilter::TRACE)
        } else {
            None
        };
        enable_logging(log_prefix, &app_dir, logging_level, self.log)?;

        let settings = Settings::load(&app_dir)?;
        info!("Using application directory {app_dir:?}");
        Ok(AppContext::new(app_dir, settings, self.db.clone()))
    }
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Save today's mood and sleep quality")]
    Add {
        #[command(flatten)]
        command: AddCommand,
    },
    #[command(about = "Show saved scores for a time range")]
    View {
        #[command(flatten)]
        command: ViewCommand,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();
    let context = args.app.init(MOOD_PREFIX)?;
    let store = context.mood_store();

    match args.commands {
        Commands::Add { command } => {
            let mut prompter =
                Prompter::stdio().with_max_attempts(context.settings.max_attempts);
            process_add_command(command, &store, &DefaultClock, &mut prompter)?;
            Ok(())
        }
        Commands::View { command } => process_view_command(
            command,
            context.settings.default_window,
            &store,
            &DefaultClock,
            &mut std::io::stdout().lock(),
        ),
    }
}
