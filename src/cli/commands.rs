use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stint",
    about = concat!("[>] stint v", env!("CARGO_PKG_VERSION"), " - task status and time tracking for plain markdown"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Settings file (default: ./stint.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Toggle the task status of a line, tracking time through DOING
    Toggle(LineArgs),
    /// Strip a stray tracking comment from a line
    Clean(LineArgs),
    /// Classify a line without changing it
    Status(LineArgs),
    /// Render keyword task lines as a read-only checkbox view
    Render(RenderArgs),
    /// Show effective settings, or change one
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct LineArgs {
    /// Markdown file to operate on
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Markdown file to render
    pub file: PathBuf,
    /// Render a single line instead of the whole file (1-based)
    #[arg(long)]
    pub line: Option<usize>,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set a setting: stint config set auto_append_duration false
    Set { key: String, value: String },
}
