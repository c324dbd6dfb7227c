//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `reel_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from, AppConfig, HttpServerConfig};
pub use crate::dispatch::{classify, Command, CommandRegistry, Dispatcher, Flow};
pub use crate::error::{CliError, ConfigError, MovieError};
pub use crate::movies::{
    InMemoryMovieRepository, MoviePatch, MovieQuery, MovieRecord, MovieRepository, NewMovie,
    SortKey,
};
