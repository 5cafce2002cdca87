//! Command-line interface module for Ticklist
//!
//! This module is organized into submodules:
//! - `args`: Command-line argument structures
//! - `handlers`: Command handler implementations

mod args;
mod handlers;

pub use args::*;
use handlers::*;

use crate::board::TaskBoard;
use crate::config::{BackendKind, Config};
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ticklist - local task list with a deletion history
#[derive(Parser)]
#[command(name = "ticklist")]
#[command(about = "Local task list with a deletion history log")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding the task data
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Store collections in the SQLite database
    #[arg(long, global = true)]
    pub use_db: bool,

    /// Store collections as plain JSON files
    #[arg(long, global = true)]
    pub use_file: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Mark a task completed, or reopen it
    Toggle(IdArgs),
    /// Delete a task (it is kept in history)
    Delete(IdArgs),
    /// Remove all completed tasks
    ClearCompleted,
    /// Count tasks
    Count(CountArgs),
    /// Show or clear deleted tasks
    History(HistoryArgs),
    /// Open the interactive task list (default)
    Ui,
    /// Show storage location and task counts
    Status,
    /// Show or initialize configuration
    Config(ConfigArgs),
    /// Remove a stale interactive-session lock
    Unlock,
}

/// Main CLI application
pub struct CliApp {
    pub config: Config,
    pub board: TaskBoard,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliApp {
    /// Create a new CLI application
    pub fn new(cli: &Cli) -> Result<Self> {
        Self::with_config(cli, load_config(cli)?)
    }

    /// Create the application from an already loaded configuration
    pub fn with_config(cli: &Cli, mut config: Config) -> Result<Self> {
        if cli.use_db && cli.use_file {
            return Err(Error::invalid_arguments(
                "--use-db and --use-file cannot be combined",
            ));
        }
        if cli.use_db {
            config.backend = BackendKind::Sqlite;
        } else if cli.use_file {
            config.backend = BackendKind::File;
        }
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }

        let board = TaskBoard::open(&config)?;

        Ok(Self {
            config,
            board,
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }

    /// Run the CLI application
    pub fn run(&mut self, command: &Commands) -> Result<()> {
        self.verbose_println(&format!("Using storage {}", self.board.location()));

        match command {
            Commands::Add(args) => handle_add(self, args),
            Commands::List(args) => handle_list(self, args),
            Commands::Toggle(args) => handle_toggle(self, args),
            Commands::Delete(args) => handle_delete(self, args),
            Commands::ClearCompleted => handle_clear_completed(self),
            Commands::Count(args) => handle_count(self, args),
            Commands::History(args) => handle_history(self, args),
            Commands::Ui => handle_ui(self),
            Commands::Status => handle_status(self),
            Commands::Config(args) => handle_config(self, args),
            Commands::Unlock => handle_unlock(self),
        }
    }

    pub fn verbose_println(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("[verbose] {}", message);
        }
    }
}

/// Load the configuration named by `--config`, or the default one
///
/// Only a missing file falls back to defaults. A file that does not parse or
/// validate is an error.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => match Config::default_config_path() {
            Ok(path) => Config::load_from_path(&path),
            Err(Error::HomeDirectoryNotFound) => Ok(Config::default()),
            Err(e) => Err(e),
        },
    }
}

/// Main entry point for the CLI
pub fn run(cli: Cli, config: Config) -> Result<()> {
    let mut app = CliApp::with_config(&cli, config)?;
    let command = cli.command.unwrap_or(Commands::Ui);
    app.run(&command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_joins_words() {
        let cli = Cli::try_parse_from(["ticklist", "add", "buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text.join(" "), "buy milk"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_toggle_id_and_filter() {
        let cli = Cli::try_parse_from(["ticklist", "toggle", "1717000000000"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Toggle(IdArgs { id })) if id.as_i64() == 1717000000000
        ));

        let cli = Cli::try_parse_from(["ticklist", "list", "--filter", "completed"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List(ListArgs { filter: FilterArg::Completed, .. }))
        ));

        assert!(Cli::try_parse_from(["ticklist", "toggle", "abc"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["ticklist"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_app_honors_overrides() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("absent.json");
        let data_dir = dir.path().join("data");
        let cli = Cli::try_parse_from([
            "ticklist",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--use-file",
            "status",
        ])
        .unwrap();

        let mut app = CliApp::new(&cli).unwrap();
        assert_eq!(app.config.backend, BackendKind::File);
        assert_eq!(app.config.data_dir, data_dir);

        app.run(&Commands::Add(AddArgs {
            text: vec!["write".to_string(), "spec".to_string()],
        }))
        .unwrap();
        assert!(data_dir.join("todoTasks.json").exists());
    }

    #[test]
    fn test_invalid_config_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("ticklist.json");
        let data_dir = dir.path().join("my-data");
        std::fs::write(
            &config_path,
            serde_json::json!({
                "data_dir": data_dir,
                "backend": "file",
                "logging": { "level": "loud" }
            })
            .to_string(),
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "ticklist",
            "--config",
            config_path.to_str().unwrap(),
            "status",
        ])
        .unwrap();
        assert!(matches!(
            CliApp::new(&cli),
            Err(Error::ConfigValidation { ref field, .. }) if field == "logging.level"
        ));

        std::fs::write(&config_path, "{ not json").unwrap();
        assert!(matches!(load_config(&cli), Err(Error::Json(_))));
        assert!(!data_dir.exists());
    }

    #[test]
    fn test_valid_config_file_is_used() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("ticklist.json");
        let data_dir = dir.path().join("my-data");
        let mut config = Config::default();
        config.data_dir = data_dir.clone();
        config.backend = BackendKind::File;
        config.logging.level = "debug".to_string();
        config.save_to_path(&config_path).unwrap();

        let cli = Cli::try_parse_from([
            "ticklist",
            "--config",
            config_path.to_str().unwrap(),
            "status",
        ])
        .unwrap();
        let loaded = load_config(&cli).unwrap();
        assert_eq!(loaded.logging.level, "debug");

        let app = CliApp::with_config(&cli, loaded).unwrap();
        assert_eq!(app.config.data_dir, data_dir);
        assert_eq!(app.config.backend, BackendKind::File);
    }

    #[test]
    fn test_conflicting_backend_flags() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "ticklist",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--use-db",
            "--use-file",
            "status",
        ])
        .unwrap();
        assert!(matches!(
            CliApp::new(&cli),
            Err(Error::InvalidArguments { .. })
        ));
    }
}
