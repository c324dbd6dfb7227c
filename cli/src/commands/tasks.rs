//! 交互式命令提示符

use std::io;

use reel_core::api::{AppConfig, CliError, Dispatcher, Flow};
use tracing::info;

use crate::commands::cli::TasksArgs;

/// 处理 tasks 命令：读取 stdin 直到 quit/exit
pub fn handle_tasks(args: TasksArgs, cfg: &AppConfig) -> Result<(), CliError> {
    let name = args.name.unwrap_or_else(|| cfg.app_name.clone());

    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(stdout.lock());
    dispatcher.greet(&name)?;

    match dispatcher.run(io::stdin().lock())? {
        Flow::Quit => info!("quit requested"),
        Flow::Continue => info!("stdin closed, exiting"),
    }
    Ok(())
}
