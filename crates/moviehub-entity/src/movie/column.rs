//! Queryable columns of the `movies` table.

use std::fmt;

use moviehub_core::types::{FilterValue, Record};

use super::model::Movie;

/// A column of the `movies` table that predicates and sort orders may
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieColumn {
    /// Primary key.
    Id,
    /// Title.
    Name,
    /// Category.
    Category,
    /// Rating.
    Rating,
}

impl MovieColumn {
    /// Every column, in table order.
    pub const ALL: [MovieColumn; 4] = [Self::Id, Self::Name, Self::Category, Self::Rating];

    /// SQL column name.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Rating => "rating",
        }
    }

    /// Resolve a property name as used by query parameters and sort orders.
    pub fn from_property(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_sql() == name)
    }
}

impl fmt::Display for MovieColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Record<MovieColumn> for Movie {
    fn value(&self, column: MovieColumn) -> Option<FilterValue> {
        match column {
            MovieColumn::Id => Some(FilterValue::Integer(self.id)),
            MovieColumn::Name => self.name.clone().map(FilterValue::String),
            MovieColumn::Category => self.category.clone().map(FilterValue::String),
            MovieColumn::Rating => self.rating.map(FilterValue::Float),
        }
    }
}
