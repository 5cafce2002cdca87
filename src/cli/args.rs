//! Command-line argument structures for Ticklist

use crate::task::TaskFilter;
use crate::types::TaskId;
use clap::Args;

#[derive(Args)]
pub struct AddArgs {
    /// Task text (multiple words are joined with spaces)
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(short = 'f', long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Show task ids
    #[arg(long)]
    pub ids: bool,

    /// Show creation times
    #[arg(short = 'T', long)]
    pub timestamps: bool,

    /// Print the tasks as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id, as printed by `list --ids`
    #[arg(value_name = "ID")]
    pub id: TaskId,
}

#[derive(Args)]
pub struct CountArgs {
    /// Which tasks to count
    #[arg(short = 'f', long, value_enum, default_value = "active")]
    pub filter: FilterArg,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Clear the whole history
    #[arg(long)]
    pub clear: bool,

    /// Do not ask for confirmation when clearing
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Show at most N entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Initialize configuration file with defaults
    #[arg(long)]
    pub init: bool,

    /// Validate configuration file
    #[arg(long)]
    pub validate: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for TaskFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => TaskFilter::All,
            FilterArg::Active => TaskFilter::Active,
            FilterArg::Completed => TaskFilter::Completed,
        }
    }
}
