//! Rendering of specifications into parameterized PostgreSQL.
//!
//! Literals never appear in SQL text: every value becomes a `$n`
//! placeholder bound in the same order it was rendered.

use sqlx::Arguments;
use sqlx::postgres::PgArguments;

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_core::types::{
    FilterValue, MatchMode, Predicate, SortDirection, SortField, Specification,
};
use moviehub_entity::movie::MovieColumn;

/// A column that can be rendered into SQL and named by a sort property.
pub trait SqlColumn: Copy {
    /// The primary-key column, used as the default and tie-breaking order.
    const PRIMARY_KEY: Self;

    /// Column name as it appears in SQL.
    fn column_name(&self) -> &'static str;

    /// Resolve a sort or filter property name.
    fn from_property(name: &str) -> Option<Self>;
}

impl SqlColumn for MovieColumn {
    const PRIMARY_KEY: Self = MovieColumn::Id;

    fn column_name(&self) -> &'static str {
        self.as_sql()
    }

    fn from_property(name: &str) -> Option<Self> {
        MovieColumn::from_property(name)
    }
}

/// A rendered `WHERE` clause plus its bound values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFilter {
    /// `WHERE ...` or empty when unconstrained.
    pub where_clause: String,
    /// Values for `$1..$n`, in placeholder order.
    pub values: Vec<FilterValue>,
    /// Whether `SELECT DISTINCT` is required.
    pub distinct: bool,
}

impl SqlFilter {
    /// Render a specification.
    pub fn from_specification<C: SqlColumn>(spec: &Specification<C>) -> Self {
        let mut values = Vec::new();
        let conditions: Vec<String> = spec
            .clauses()
            .iter()
            .map(|clause| render_predicate(clause, &mut values))
            .collect();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Self {
            where_clause,
            values,
            distinct: spec.is_distinct(),
        }
    }

    /// Index of the first placeholder after the filter's own values.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Bind the filter values followed by `extra` integers (limit, offset).
    pub fn arguments(&self, extra: &[i64]) -> AppResult<PgArguments> {
        let mut args = PgArguments::default();
        for value in &self.values {
            let added = match value {
                FilterValue::String(s) => args.add(s.clone()),
                FilterValue::Integer(i) => args.add(*i),
                FilterValue::Float(f) => args.add(*f),
                FilterValue::Boolean(b) => args.add(*b),
            };
            added.map_err(|e| AppError::database(format!("Failed to bind query value: {e}")))?;
        }
        for value in extra {
            args.add(*value)
                .map_err(|e| AppError::database(format!("Failed to bind query value: {e}")))?;
        }
        Ok(args)
    }
}

fn render_predicate<C: SqlColumn>(predicate: &Predicate<C>, values: &mut Vec<FilterValue>) -> String {
    match predicate {
        Predicate::Compare { column, op, value } => {
            let placeholder = push(values, value.clone());
            format!("{} {} {placeholder}", column.column_name(), op.as_sql())
        }
        Predicate::In {
            column,
            values: candidates,
            negated,
        } => {
            let name = column.column_name();
            if candidates.is_empty() {
                return if *negated {
                    format!("{name} IS NOT NULL")
                } else {
                    "FALSE".to_string()
                };
            }
            let placeholders: Vec<String> = candidates
                .iter()
                .map(|v| push(values, v.clone()))
                .collect();
            let keyword = if *negated { "NOT IN" } else { "IN" };
            format!("{name} {keyword} ({})", placeholders.join(", "))
        }
        Predicate::Null { column, is_null } => {
            let keyword = if *is_null { "IS NULL" } else { "IS NOT NULL" };
            format!("{} {keyword}", column.column_name())
        }
        Predicate::Like {
            column,
            needle,
            mode,
            negated,
        } => {
            let escaped = escape_like(&needle.to_lowercase());
            let pattern = match mode {
                MatchMode::Contains => format!("%{escaped}%"),
                MatchMode::StartsWith => format!("{escaped}%"),
            };
            let placeholder = push(values, FilterValue::String(pattern));
            let keyword = if *negated { "NOT LIKE" } else { "LIKE" };
            format!(
                "LOWER({}) {keyword} {placeholder} ESCAPE '\\'",
                column.column_name()
            )
        }
        Predicate::Or(parts) => {
            if parts.is_empty() {
                return "FALSE".to_string();
            }
            let rendered: Vec<String> = parts
                .iter()
                .map(|part| render_predicate(part, values))
                .collect();
            format!("({})", rendered.join(" OR "))
        }
    }
}

fn push(values: &mut Vec<FilterValue>, value: FilterValue) -> String {
    values.push(value);
    format!("${}", values.len())
}

/// Escape `LIKE` wildcards so the text matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Render `ORDER BY` for the given sort fields. The primary key is appended
/// as a tie-breaker so paging is stable. Unknown properties are rejected.
pub fn order_by<C: SqlColumn>(sort: &[SortField]) -> AppResult<String> {
    let mut parts = Vec::with_capacity(sort.len() + 1);
    let mut has_key = false;
    for field in sort {
        let column = C::from_property(&field.field).ok_or_else(|| {
            AppError::validation(format!("Unknown sort property '{}'", field.field))
        })?;
        let name = column.column_name();
        has_key |= name == C::PRIMARY_KEY.column_name();
        parts.push(format!("{name} {}", field.direction.as_sql()));
    }
    if !has_key {
        parts.push(format!(
            "{} {}",
            C::PRIMARY_KEY.column_name(),
            SortDirection::Asc.as_sql()
        ));
    }
    Ok(format!("ORDER BY {}", parts.join(", ")))
}
