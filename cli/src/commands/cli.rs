use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Task prompt and movie listing API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./reel.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive text command prompt (default).
    Tasks(TasksArgs),
    /// Serve the movie API over HTTP.
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct TasksArgs {
    /// Name shown in the welcome line; overrides `app_name`.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Reported by /health; a random UUID when omitted.
    #[arg(long)]
    pub session_id: Option<String>,
}
