//! Task command handlers for Ticklist CLI

use crate::cli::args::*;
use crate::cli::CliApp;
use crate::error::Result;
use crate::task::{Task, TaskFilter};

pub fn handle_add(app: &mut CliApp, args: &AddArgs) -> Result<()> {
    let text = args.text.join(" ");
    let task = app.board.add_task(&text)?;

    if !app.quiet {
        println!("Added task {}: {}", task.id, task.text);
    }
    Ok(())
}

pub fn handle_list(app: &mut CliApp, args: &ListArgs) -> Result<()> {
    let filter = TaskFilter::from(args.filter);
    let tasks = app.board.tasks(filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        if !app.quiet {
            match filter_label(filter) {
                "" => println!("No tasks"),
                label => println!("No {} tasks", label),
            }
        }
        return Ok(());
    }

    for task in &tasks {
        println!("{}", format_task_line(task, args.ids, args.timestamps));
    }

    if !app.quiet {
        println!("\n{} tasks", tasks.len());
    }
    Ok(())
}

pub fn handle_toggle(app: &mut CliApp, args: &IdArgs) -> Result<()> {
    let task = app.board.toggle_task(args.id)?;

    if !app.quiet {
        let state = if task.completed { "completed" } else { "reopened" };
        println!("Task {} {}: {}", task.id, state, task.text);
    }
    Ok(())
}

pub fn handle_delete(app: &mut CliApp, args: &IdArgs) -> Result<()> {
    let (task, _) = app.board.delete_task(args.id)?;

    if !app.quiet {
        println!("Deleted task {}: {}", task.id, task.text);
    }
    Ok(())
}

pub fn handle_clear_completed(app: &mut CliApp) -> Result<()> {
    let removed = app.board.clear_completed()?;

    if !app.quiet {
        match removed.len() {
            0 => println!("No completed tasks"),
            1 => println!("Removed 1 completed task"),
            n => println!("Removed {} completed tasks", n),
        }
    }
    Ok(())
}

pub fn handle_count(app: &mut CliApp, args: &CountArgs) -> Result<()> {
    println!("{}", app.board.count(args.filter.into()));
    Ok(())
}

fn filter_label(filter: TaskFilter) -> &'static str {
    match filter {
        TaskFilter::All => "",
        TaskFilter::Active => "active",
        TaskFilter::Completed => "completed",
    }
}

fn format_task_line(task: &Task, ids: bool, timestamps: bool) -> String {
    let mut output = String::new();

    if ids {
        output.push_str(&format!("{:>13} ", task.id));
    }
    output.push_str(task.marker());
    output.push(' ');
    if timestamps {
        output.push_str(&format!("{} ", task.formatted_created_at()));
    }
    output.push_str(&task.text);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskId;
    use chrono::{TimeZone, Utc};

    fn sample(completed: bool) -> Task {
        Task {
            id: TaskId::new(1717228800000),
            text: "buy milk".to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_task_line() {
        assert_eq!(format_task_line(&sample(false), false, false), "[ ] buy milk");
        assert_eq!(
            format_task_line(&sample(true), true, false),
            "1717228800000 [x] buy milk"
        );
        let task = sample(false);
        assert_eq!(
            format_task_line(&task, false, true),
            format!("[ ] {} buy milk", task.formatted_created_at())
        );
    }

    #[test]
    fn test_filter_label() {
        assert_eq!(filter_label(TaskFilter::All), "");
        assert_eq!(filter_label(TaskFilter::Active), "active");
        assert_eq!(filter_label(TaskFilter::Completed), "completed");
    }
}
