use clap::Parser;
mod commands;
mod http;
use commands::cli;
use reel_core::api::CliError;
use reel_core::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // 日志写到 stderr，避免与提示符输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => config::load_from(path)?,
        None => config::load_default()?,
    };

    let cmd = args
        .command
        .take()
        .unwrap_or_else(|| cli::Commands::Tasks(cli::TasksArgs::default()));
    dispatch(cmd, &cfg).await
}

async fn dispatch(cmd: cli::Commands, cfg: &config::AppConfig) -> Result<(), CliError> {
    match cmd {
        cli::Commands::Tasks(tasks_args) => commands::tasks::handle_tasks(tasks_args, cfg),
        cli::Commands::Serve(serve_args) => {
            commands::http_server::handle_http_server(serve_args, cfg).await
        }
    }
}
