use serde::{Deserialize, Serialize};

use crate::error::MovieError;

pub const DEFAULT_RATING: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    pub year: i32,
    pub rating: f64,
}

/// Create payload. Every field is optional so that a missing title or year
/// is reported as [`MovieError::MissingFields`] instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: Some(title.into()),
            year: Some(year),
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Validated `(title, year, rating)`, ready to be stored under a fresh id.
    pub(crate) fn validate(self) -> Result<(String, i32, f64), MovieError> {
        let (Some(title), Some(year)) = (self.title, self.year) else {
            return Err(MovieError::MissingFields);
        };
        let title = validate_title(&title)?;
        validate_year(year)?;
        let rating = self.rating.unwrap_or(DEFAULT_RATING);
        validate_rating(rating)?;
        Ok((title, year, rating))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl MoviePatch {
    /// Checks every present field before anything is written.
    pub(crate) fn validate(self) -> Result<MoviePatch, MovieError> {
        let title = self.title.as_deref().map(validate_title).transpose()?;
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        Ok(MoviePatch { title, ..self })
    }

    pub(crate) fn apply(self, movie: &mut MovieRecord) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
    }
}

fn validate_title(title: &str) -> Result<String, MovieError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(MovieError::validation("the title cannot be empty"));
    }
    Ok(title.to_string())
}

fn validate_year(year: i32) -> Result<(), MovieError> {
    if !(1000..=9999).contains(&year) {
        return Err(MovieError::validation(format!(
            "the year {year} is not a 4-digit number"
        )));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), MovieError> {
    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
        return Err(MovieError::validation(format!(
            "the rating {rating} must be between 0 and 10"
        )));
    }
    Ok(())
}

/// The four records every fresh catalogue starts with.
pub fn seed_movies() -> Vec<NewMovie> {
    vec![
        NewMovie::new("Jaws", 1975).with_rating(8.0),
        NewMovie::new("Avatar", 2009).with_rating(7.8),
        NewMovie::new("Brazil", 1985).with_rating(8.0),
        NewMovie::new("The Shawshank", 1992).with_rating(6.2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_or_year() {
        let no_title = NewMovie {
            year: Some(2000),
            ..Default::default()
        };
        assert_eq!(no_title.validate(), Err(MovieError::MissingFields));

        let no_year = NewMovie {
            title: Some("X".into()),
            ..Default::default()
        };
        assert_eq!(no_year.validate(), Err(MovieError::MissingFields));
    }

    #[test]
    fn rating_defaults_and_title_is_trimmed() {
        let (title, year, rating) = NewMovie::new("  Alien ", 1979).validate().unwrap();
        assert_eq!(title, "Alien");
        assert_eq!(year, 1979);
        assert_eq!(rating, DEFAULT_RATING);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            NewMovie::new("X", 99).validate(),
            Err(MovieError::Validation(_))
        ));
        assert!(matches!(
            NewMovie::new("X", 2000).with_rating(10.5).validate(),
            Err(MovieError::Validation(_))
        ));
        assert!(matches!(
            NewMovie::new("X", 2000).with_rating(f64::NAN).validate(),
            Err(MovieError::Validation(_))
        ));
        assert!(matches!(
            NewMovie::new("   ", 2000).validate(),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut movie = MovieRecord {
            id: 1,
            title: "Jaws".into(),
            year: 1975,
            rating: 8.0,
        };
        let patch = MoviePatch {
            rating: Some(9.1),
            ..Default::default()
        };
        patch.validate().unwrap().apply(&mut movie);
        assert_eq!(movie.title, "Jaws");
        assert_eq!(movie.year, 1975);
        assert_eq!(movie.rating, 9.1);
    }

    #[test]
    fn deserializes_partial_payload() {
        let m: NewMovie = serde_json::from_str(r#"{"year":2000}"#).unwrap();
        assert_eq!(m.title, None);
        assert_eq!(m.year, Some(2000));
    }
}
