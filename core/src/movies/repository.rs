use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use super::model::{seed_movies, MoviePatch, MovieRecord, NewMovie};
use super::query::{sort_movies, MovieQuery, SortKey};
use crate::error::MovieError;

/// Storage seam for the movie routes.
///
/// `search` and `sorted` are derived from a `list` snapshot, so a backend only
/// has to provide the CRUD primitives.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    fn name(&self) -> &str;

    async fn list(&self) -> Vec<MovieRecord>;

    async fn get(&self, id: u64) -> Result<MovieRecord, MovieError>;

    async fn create(&self, movie: NewMovie) -> Result<MovieRecord, MovieError>;

    async fn update(&self, id: u64, patch: MoviePatch) -> Result<MovieRecord, MovieError>;

    async fn delete(&self, id: u64) -> Result<MovieRecord, MovieError>;

    async fn search(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, MovieError> {
        query.validate()?;
        let mut movies = self.list().await;
        movies.retain(|m| query.matches(m));
        Ok(movies)
    }

    async fn sorted(&self, key: SortKey) -> Vec<MovieRecord> {
        let mut movies = self.list().await;
        sort_movies(&mut movies, key);
        movies
    }
}

#[derive(Debug)]
struct Catalogue {
    movies: Vec<MovieRecord>,
    next_id: u64,
}

impl Catalogue {
    fn position(&self, id: u64) -> Result<usize, MovieError> {
        self.movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(MovieError::NotFound(id))
    }
}

/// Process-local catalogue. All writes, id allocation included, happen under
/// one write guard.
#[derive(Debug)]
pub struct InMemoryMovieRepository {
    inner: RwLock<Catalogue>,
}

impl Default for InMemoryMovieRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InMemoryMovieRepository {
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(Catalogue {
                movies: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn seeded() -> Self {
        let repo = Self::empty();
        {
            let mut cat = repo.write();
            for movie in seed_movies() {
                // Seed rows are constants and always pass validation.
                if let Ok(record) = insert(&mut cat, movie) {
                    debug!(id = record.id, title = %record.title, "seeded movie");
                }
            }
        }
        repo
    }

    // Every write validates before touching the catalogue, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Catalogue> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalogue> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn insert(cat: &mut Catalogue, movie: NewMovie) -> Result<MovieRecord, MovieError> {
    let (title, year, rating) = movie.validate()?;
    let record = MovieRecord {
        id: cat.next_id,
        title,
        year,
        rating,
    };
    cat.next_id += 1;
    cat.movies.push(record.clone());
    Ok(record)
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn list(&self) -> Vec<MovieRecord> {
        self.read().movies.clone()
    }

    async fn get(&self, id: u64) -> Result<MovieRecord, MovieError> {
        let cat = self.read();
        let idx = cat.position(id)?;
        Ok(cat.movies[idx].clone())
    }

    async fn create(&self, movie: NewMovie) -> Result<MovieRecord, MovieError> {
        let record = insert(&mut self.write(), movie)?;
        debug!(id = record.id, title = %record.title, "movie created");
        Ok(record)
    }

    async fn update(&self, id: u64, patch: MoviePatch) -> Result<MovieRecord, MovieError> {
        let mut cat = self.write();
        let idx = cat.position(id)?;
        patch.validate()?.apply(&mut cat.movies[idx]);
        debug!(id, "movie updated");
        Ok(cat.movies[idx].clone())
    }

    async fn delete(&self, id: u64) -> Result<MovieRecord, MovieError> {
        let mut cat = self.write();
        let idx = cat.position(id)?;
        let removed = cat.movies.remove(idx);
        debug!(id, "movie deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio_test::block_on;

    #[test]
    fn seeded_catalogue_has_four_movies() {
        let repo = InMemoryMovieRepository::seeded();
        let movies = block_on(repo.list());
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Jaws", "Avatar", "Brazil", "The Shawshank"]);
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryMovieRepository::seeded();
        block_on(repo.delete(4)).unwrap();
        let created = block_on(repo.create(NewMovie::new("Heat", 1995))).unwrap();
        assert_eq!(created.id, 5);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let repo = InMemoryMovieRepository::seeded();
        assert_eq!(block_on(repo.get(99)), Err(MovieError::NotFound(99)));
        assert_eq!(
            block_on(repo.update(99, MoviePatch::default())),
            Err(MovieError::NotFound(99))
        );
        assert_eq!(block_on(repo.delete(99)), Err(MovieError::NotFound(99)));
    }

    #[test]
    fn invalid_update_leaves_record_unchanged() {
        let repo = InMemoryMovieRepository::seeded();
        let patch = MoviePatch {
            title: Some("Jaws 2".into()),
            rating: Some(11.0),
            ..Default::default()
        };
        assert!(matches!(
            block_on(repo.update(1, patch)),
            Err(MovieError::Validation(_))
        ));
        assert_eq!(block_on(repo.get(1)).unwrap().title, "Jaws");
    }

    #[test]
    fn empty_search_is_rejected() {
        let repo = InMemoryMovieRepository::seeded();
        assert!(matches!(
            block_on(repo.search(&MovieQuery::default())),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn nan_rating_bound_does_not_match_everything() {
        let repo = InMemoryMovieRepository::seeded();
        let query = MovieQuery {
            min_rating: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            block_on(repo.search(&query)),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn sorted_does_not_reorder_the_catalogue() {
        let repo = InMemoryMovieRepository::seeded();
        let by_rating = block_on(repo.sorted(SortKey::Rating));
        assert_eq!(by_rating[0].title, "The Shawshank");
        assert_eq!(block_on(repo.list())[0].title, "Jaws");
    }
}
