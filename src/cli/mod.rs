use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod add;
pub mod display;
pub mod export;
pub mod filter;
pub mod list;
pub mod menu;
pub mod segments;
pub mod show;
pub mod stats;
pub mod status;
pub mod ui;
pub mod views;

pub use add::{run_add, AddInput};
pub use export::run_export;
pub use filter::run_filter;
pub use list::run_list;
pub use menu::run_menu;
pub use segments::{run_segment, run_segments};
pub use show::run_show;
pub use stats::run_stats;
pub use status::run_status;
pub use views::{run_view, run_views};

#[derive(Parser)]
#[command(name = "leadcmd")]
#[command(about = "Lead filtering, segments and CSV export for the command line")]
#[command(version)]
pub struct Cli {
    /// JSON workspace file to load instead of the demo data
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Simulated loading delay in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Directory for CSV exports
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List leads with search and sorting
    List(ListArgs),
    /// List leads matching field conditions
    Filter(FilterArgs),
    /// List segments with their lead counts
    Segments,
    /// Show the leads in one segment
    Segment(IdArgs),
    /// List saved views
    Views,
    /// Apply a saved view
    View(IdArgs),
    /// Show a lead with its activity timeline
    Show(ShowArgs),
    /// Add a new lead
    Add(AddArgs),
    /// Set the status of one or more leads
    Status(StatusArgs),
    /// Export leads to CSV
    Export(ExportArgs),
    /// Lead analytics
    Stats,
}

#[derive(Args)]
pub struct ListArgs {
    /// Match name, email, company, source, status or notes
    #[arg(short, long)]
    pub search: Option<String>,
    /// name, email, company, phone, source, status, notes, created, updated
    #[arg(long)]
    pub sort: Option<String>,
    /// asc or desc
    #[arg(short, long)]
    pub order: Option<String>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Condition as field:operator:value, e.g. source:contains:web
    #[arg(short = 'w', long = "where", value_name = "COND", required = true)]
    pub conditions: Vec<String>,
    /// all (AND) or any (OR)
    #[arg(short, long = "match", value_name = "MODE")]
    pub match_mode: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Lead id or part of a name
    pub identifier: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub source: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<AddArgs> for AddInput {
    fn from(args: AddArgs) -> Self {
        AddInput {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            source: args.source,
            status: args.status,
            notes: args.notes,
        }
    }
}

#[derive(Args)]
pub struct StatusArgs {
    /// Lead ids followed by the new status
    #[arg(required = true, num_args = 2.., value_name = "ID... STATUS")]
    pub args: Vec<String>,
}

impl StatusArgs {
    /// Split into (ids, status). clap guarantees at least two values.
    pub fn split(&self) -> (&[String], &str) {
        match self.args.split_last() {
            Some((status, ids)) => (ids, status.as_str()),
            None => (&[], ""),
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    /// Lead ids to export
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub ids: Vec<String>,
    /// Export every lead
    #[arg(short, long)]
    pub all: bool,
    /// Output directory (overrides --export-dir)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}
