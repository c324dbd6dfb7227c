use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::MovieRecord;
use crate::error::MovieError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Release year.
    Date,
    Rating,
    Title,
}

impl FromStr for SortKey {
    type Err = MovieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "rating" => Ok(SortKey::Rating),
            "title" => Ok(SortKey::Title),
            other => Err(MovieError::validation(format!(
                "unknown sort key \"{other}\", expected date, rating or title"
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Date => "date",
            SortKey::Rating => "rating",
            SortKey::Title => "title",
        };
        f.write_str(s)
    }
}

/// Stable ascending sort; equal keys keep their insertion order.
pub fn sort_movies(movies: &mut [MovieRecord], key: SortKey) {
    match key {
        SortKey::Date => movies.sort_by_key(|m| m.year),
        SortKey::Rating => movies.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortKey::Title => movies.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieQuery {
    /// Free text: a case-insensitive title fragment or an exact year.
    #[serde(default, alias = "s")]
    pub q: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

impl MovieQuery {
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    fn text_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.text_term().is_none() && self.year.is_none() && self.min_rating.is_none()
    }

    /// A search needs at least one predicate, and a rating bound must be a number.
    pub fn validate(&self) -> Result<(), MovieError> {
        if self.is_empty() {
            return Err(MovieError::validation("you have to provide a search"));
        }
        if let Some(r) = self.min_rating.filter(|r| !r.is_finite()) {
            return Err(MovieError::validation(format!(
                "min_rating {r} is not a finite number"
            )));
        }
        Ok(())
    }

    pub fn matches(&self, movie: &MovieRecord) -> bool {
        if let Some(q) = self.text_term() {
            let by_title = movie.title.to_lowercase().contains(&q.to_lowercase());
            let by_year = movie.year.to_string() == q;
            if !by_title && !by_year {
                return false;
            }
        }
        if self.year.is_some_and(|y| y != movie.year) {
            return false;
        }
        if self.min_rating.is_some_and(|r| movie.rating < r) {
            return false;
        }
        true
    }
}
