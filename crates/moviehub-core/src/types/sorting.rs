//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse `asc` / `desc`, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// A sort specification consisting of a property name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Property to sort by. Resolved against entity columns by the repository.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse one `sort` query value: `"name"`, `"name,desc"` or
    /// `"name,category,asc"`. A trailing direction applies to every property
    /// listed before it.
    pub fn parse_param(raw: &str) -> Vec<Self> {
        let mut parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let direction = match parts.last().and_then(|last| SortDirection::parse(last)) {
            Some(direction) => {
                parts.pop();
                direction
            }
            None => SortDirection::Asc,
        };

        parts
            .into_iter()
            .map(|field| Self::new(field, direction))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_property() {
        assert_eq!(SortField::parse_param("name"), vec![SortField::asc("name")]);
    }

    #[test]
    fn test_parse_direction_applies_to_all() {
        assert_eq!(
            SortField::parse_param("name,category,DESC"),
            vec![SortField::desc("name"), SortField::desc("category")]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(SortField::parse_param("").is_empty());
        assert!(SortField::parse_param(",desc").is_empty());
    }
}
