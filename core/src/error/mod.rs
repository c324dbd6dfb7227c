mod cli_error;
mod config_error;
mod movie_error;

pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use movie_error::MovieError;
