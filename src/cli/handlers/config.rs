//! Configuration and status handlers for Ticklist CLI

use crate::cli::args::*;
use crate::cli::CliApp;
use crate::config::{BackendKind, Config};
use crate::database::SqliteStore;
use crate::error::Result;

pub fn handle_config(app: &mut CliApp, args: &ConfigArgs) -> Result<()> {
    if args.show {
        let config_json = serde_json::to_string_pretty(&app.config)?;
        println!("{}", config_json);
    } else if args.init {
        let config_path = Config::default_config_path()?;
        Config::default().save_to_path(&config_path)?;
        println!("Configuration initialized at {}", config_path.display());
    } else if args.validate {
        match app.config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => println!("Configuration validation failed: {}", e),
        }
    } else {
        println!("Use --show, --init, or --validate");
    }

    Ok(())
}

pub fn handle_status(app: &mut CliApp) -> Result<()> {
    println!("Ticklist Status");
    println!("===============\n");

    match app.config.backend {
        BackendKind::Sqlite => {
            let db_path = app.config.database_path();
            println!("Backend: SQLite Database");
            println!("Storage: {}", db_path.display());

            // Key metadata comes from a second connection to the same file
            let store = SqliteStore::new(&db_path)?;
            for info in store.keys()? {
                let updated = info
                    .updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("  {}: {} bytes, updated {}", info.key, info.bytes, updated);
            }
        }
        BackendKind::File => {
            println!("Backend: JSON files");
            println!("Storage: {}", app.config.data_dir.display());
        }
    }

    let summary = app.board.summary();
    println!("\nTasks:");
    println!("  Total: {}", summary.total);
    println!("  Active: {}", summary.active);
    println!("  Completed: {}", summary.completed);
    println!("  Deleted (history): {}", summary.history);

    println!("\nConfiguration:");
    println!(
        "  Record cleared tasks in history: {}",
        app.config.history.record_cleared
    );
    println!("  Default filter: {}", app.config.ui.default_filter);

    if app.config.lock_path().exists() {
        println!(
            "\nNote: lock file present at {}",
            app.config.lock_path().display()
        );
        println!("   If no interactive session is running, run: ticklist unlock");
    }

    Ok(())
}
