//! Movie transfer object exchanged at the API boundary.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use moviehub_entity::movie::Movie;

/// Flat, unvalidated mirror of a movie's fields.
///
/// Equality and hashing look at the identifier only. A DTO without an
/// identifier is equal to nothing, itself included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDto {
    /// Identifier; absent on create.
    #[serde(default)]
    pub id: Option<i64>,
    /// Title.
    #[serde(default)]
    pub name: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Rating.
    #[serde(default)]
    pub rating: Option<f64>,
}

impl MovieDto {
    /// Build the entity row for this DTO under the given identifier.
    pub fn to_entity(&self, id: i64) -> Movie {
        Movie {
            id,
            name: self.name.clone(),
            category: self.category.clone(),
            rating: self.rating,
        }
    }
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: Some(movie.id),
            name: movie.name,
            category: movie.category,
            rating: movie.rating,
        }
    }
}

impl PartialEq for MovieDto {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for MovieDto {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
