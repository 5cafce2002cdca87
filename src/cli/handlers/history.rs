//! Deletion history handlers for Ticklist CLI

use crate::cli::args::*;
use crate::cli::CliApp;
use crate::error::Result;
use std::io::{self, Write};

pub fn handle_history(app: &mut CliApp, args: &HistoryArgs) -> Result<()> {
    if args.clear {
        return handle_clear_history(app, args.force);
    }

    let entries = app.board.history();
    if entries.is_empty() {
        if !app.quiet {
            println!("History is empty");
        }
        return Ok(());
    }

    let limit = args.limit.unwrap_or(entries.len());
    let format = &app.config.history.date_format;
    for entry in entries.iter().take(limit) {
        println!("{}  {}", entry.formatted_deleted_at(format), entry.text);
    }

    if !app.quiet && limit < entries.len() {
        println!("\n{} of {} entries shown", limit, entries.len());
    }
    Ok(())
}

fn handle_clear_history(app: &mut CliApp, force: bool) -> Result<()> {
    if !force {
        print!("Are you sure you want to clear the deletion history? (y/N): ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    app.board.clear_history()?;

    if !app.quiet {
        println!("History cleared");
    }
    Ok(())
}
