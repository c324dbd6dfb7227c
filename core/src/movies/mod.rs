//! In-memory movie catalogue.

mod model;
mod query;
mod repository;

pub use model::{seed_movies, MoviePatch, MovieRecord, NewMovie, DEFAULT_RATING};
pub use query::{sort_movies, MovieQuery, SortKey};
pub use repository::{InMemoryMovieRepository, MovieRepository};
