//! Interactive session handlers for Ticklist CLI

use crate::cli::CliApp;
use crate::error::Result;
use crate::lock::InstanceLock;
use crate::tui;

pub fn handle_ui(app: &mut CliApp) -> Result<()> {
    let _lock = InstanceLock::acquire(&app.config.lock_path())?;
    app.verbose_println("Starting interactive session");
    tui::run_board_ui(&app.board, &app.config)
}

pub fn handle_unlock(app: &mut CliApp) -> Result<()> {
    let path = app.config.lock_path();
    let removed = InstanceLock::force_release(&path)?;

    if !app.quiet {
        if removed {
            println!("Removed lock file {}", path.display());
        } else {
            println!("No lock file at {}", path.display());
        }
    }
    Ok(())
}
