// core/src/error/cli_error.rs
use thiserror::Error;

use super::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}
