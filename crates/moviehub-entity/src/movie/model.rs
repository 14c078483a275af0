//! Movie entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A movie row. Every attribute other than the identifier may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    /// Store-assigned identifier.
    pub id: i64,
    /// Title.
    pub name: Option<String>,
    /// Genre or category label.
    pub category: Option<String>,
    /// Numeric rating.
    pub rating: Option<f64>,
}

impl Movie {
    /// Copy every field present in `patch` over this movie, leaving the
    /// others untouched. The identifier is never changed.
    pub fn apply_patch(&mut self, patch: &Movie) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(category) = &patch.category {
            self.category = Some(category.clone());
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch_keeps_absent_fields() {
        let mut movie = Movie {
            id: 7,
            name: Some("AAAAAAAAAA".into()),
            category: Some("AAAAAAAAAA".into()),
            rating: Some(1.0),
        };
        movie.apply_patch(&Movie {
            id: 99,
            name: None,
            category: Some("BBBBBBBBBB".into()),
            rating: None,
        });

        assert_eq!(movie.id, 7);
        assert_eq!(movie.name.as_deref(), Some("AAAAAAAAAA"));
        assert_eq!(movie.category.as_deref(), Some("BBBBBBBBBB"));
        assert_eq!(movie.rating, Some(1.0));
    }
}
