//! Filter criteria for movie queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_core::types::{DoubleFilter, LongFilter, QueryFilter, StringFilter};

/// Per-field filters plus the distinct flag supplied for one movie query.
///
/// An absent filter leaves its field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieCriteria {
    /// Identifier filter.
    pub id: Option<LongFilter>,
    /// Title filter.
    pub name: Option<StringFilter>,
    /// Category filter.
    pub category: Option<StringFilter>,
    /// Rating filter.
    pub rating: Option<DoubleFilter>,
    /// Eliminate duplicate rows.
    pub distinct: Option<bool>,
}

impl MovieCriteria {
    /// Create empty criteria matching every movie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one query parameter (`name.contains=foo`, `distinct=true`).
    ///
    /// Returns `Ok(false)` when the key names no movie field, so callers can
    /// skip unrelated parameters such as `page` or `sort`.
    pub fn apply_param(&mut self, key: &str, value: &str) -> AppResult<bool> {
        if key == "distinct" {
            let distinct = value.trim().parse::<bool>().map_err(|_| {
                AppError::validation(format!("Invalid value '{value}' for 'distinct'"))
            })?;
            self.distinct = Some(distinct);
            return Ok(true);
        }

        let Some((field, operator)) = key.split_once('.') else {
            return Ok(false);
        };

        match field {
            "id" => apply(&mut self.id, operator, value)?,
            "name" => apply(&mut self.name, operator, value)?,
            "category" => apply(&mut self.category, operator, value)?,
            "rating" => apply(&mut self.rating, operator, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn apply<F: QueryFilter>(slot: &mut Option<F>, operator: &str, value: &str) -> AppResult<()> {
    slot.get_or_insert_with(F::default)
        .apply_operator(operator, value)
}

impl fmt::Display for MovieCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = &self.id {
            parts.push(format!("id={id:?}"));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name={name:?}"));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category={category:?}"));
        }
        if let Some(rating) = &self.rating {
            parts.push(format!("rating={rating:?}"));
        }
        if let Some(distinct) = self.distinct {
            parts.push(format!("distinct={distinct}"));
        }
        write!(f, "MovieCriteria{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_param_binds_filters() {
        let mut criteria = MovieCriteria::new();
        assert!(criteria.apply_param("name.equals", "AAAAAAAAAA").unwrap());
        assert!(criteria.apply_param("rating.greaterThan", "0.5").unwrap());
        assert!(criteria.apply_param("id.in", "1,2,3").unwrap());
        assert!(criteria.apply_param("distinct", "true").unwrap());

        assert_eq!(
            criteria.name.as_ref().and_then(|f| f.equals.clone()),
            Some("AAAAAAAAAA".to_string())
        );
        assert_eq!(criteria.rating.as_ref().and_then(|f| f.greater_than), Some(0.5));
        assert_eq!(
            criteria.id.as_ref().and_then(|f| f.in_list.clone()),
            Some(vec![1, 2, 3])
        );
        assert_eq!(criteria.distinct, Some(true));
    }

    #[test]
    fn test_unrelated_params_are_skipped() {
        let mut criteria = MovieCriteria::new();
        assert!(!criteria.apply_param("page", "0").unwrap());
        assert!(!criteria.apply_param("director.equals", "x").unwrap());
        assert_eq!(criteria, MovieCriteria::new());
    }

    #[test]
    fn test_invalid_operator_for_field() {
        let mut criteria = MovieCriteria::new();
        assert!(criteria.apply_param("rating.contains", "1").is_err());
        assert!(criteria.apply_param("id.equals", "abc").is_err());
        assert!(criteria.apply_param("distinct", "maybe").is_err());
    }

    #[test]
    fn test_display_lists_only_supplied_filters() {
        let mut criteria = MovieCriteria::new();
        criteria.apply_param("category.contains", "dra").unwrap();
        let text = criteria.to_string();
        assert!(text.starts_with("MovieCriteria{category="));
        assert!(!text.contains("rating"));
        assert_eq!(MovieCriteria::new().to_string(), "MovieCriteria{}");
    }
}
