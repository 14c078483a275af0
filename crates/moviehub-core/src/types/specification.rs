//! Composable query predicates.
//!
//! A [`Specification`] is a conjunction of [`Predicate`]s over the columns
//! `C` of one entity, plus a distinct flag. It is backend-neutral: the
//! database crate renders it to SQL and [`Specification::matches`] evaluates
//! it against in-memory records with the same null semantics SQL uses
//! (any comparison against a missing value is unknown, and unknown does not
//! match).

use std::cmp::Ordering;

use super::filter::{Filter, FilterOp, FilterValue, RangeFilter, StringFilter};

/// Read access to a record's column values, used for in-memory evaluation.
pub trait Record<C> {
    /// Value of `column`, or `None` when the column is null.
    fn value(&self, column: C) -> Option<FilterValue>;
}

/// How a text pattern is matched. Matching always ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The needle occurs anywhere in the value.
    Contains,
    /// The value begins with the needle.
    StartsWith,
}

/// A single constraint on one or more columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<C> {
    /// `column <op> value`
    Compare {
        /// Column compared.
        column: C,
        /// Comparison operator.
        op: FilterOp,
        /// Literal compared against.
        value: FilterValue,
    },
    /// `column [NOT] IN (values)`
    In {
        /// Column tested.
        column: C,
        /// Candidate literals.
        values: Vec<FilterValue>,
        /// `NOT IN` when set.
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    Null {
        /// Column tested.
        column: C,
        /// `IS NULL` when set, `IS NOT NULL` otherwise.
        is_null: bool,
    },
    /// Case-insensitive pattern match on a text column.
    Like {
        /// Column matched.
        column: C,
        /// Literal text; wildcards in it have no special meaning.
        needle: String,
        /// Where the needle must occur.
        mode: MatchMode,
        /// `NOT LIKE` when set.
        negated: bool,
    },
    /// Disjunction of nested predicates.
    Or(Vec<Predicate<C>>),
}

impl<C: Copy> Predicate<C> {
    /// `column = value`
    pub fn equals(column: C, value: impl Into<FilterValue>) -> Self {
        Self::compare(column, FilterOp::Eq, value)
    }

    /// `column <op> value`
    pub fn compare(column: C, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    /// Case-insensitive substring match.
    pub fn contains(column: C, needle: impl Into<String>) -> Self {
        Self::Like {
            column,
            needle: needle.into(),
            mode: MatchMode::Contains,
            negated: false,
        }
    }

    /// Case-insensitive prefix match.
    pub fn starts_with(column: C, needle: impl Into<String>) -> Self {
        Self::Like {
            column,
            needle: needle.into(),
            mode: MatchMode::StartsWith,
            negated: false,
        }
    }

    /// Evaluate with SQL three-valued logic; `None` is unknown.
    pub fn evaluate<R: Record<C>>(&self, record: &R) -> Option<bool> {
        match self {
            Self::Compare { column, op, value } => {
                let actual = record.value(*column)?;
                let ordering = compare_values(&actual, value)?;
                Some(match op {
                    FilterOp::Eq => ordering == Ordering::Equal,
                    FilterOp::Ne => ordering != Ordering::Equal,
                    FilterOp::Gt => ordering == Ordering::Greater,
                    FilterOp::Gte => ordering != Ordering::Less,
                    FilterOp::Lt => ordering == Ordering::Less,
                    FilterOp::Lte => ordering != Ordering::Greater,
                })
            }
            Self::In {
                column,
                values,
                negated,
            } => {
                let Some(actual) = record.value(*column) else {
                    return if values.is_empty() { Some(false) } else { None };
                };
                let found = values
                    .iter()
                    .any(|v| compare_values(&actual, v) == Some(Ordering::Equal));
                Some(found != *negated)
            }
            Self::Null { column, is_null } => Some(record.value(*column).is_none() == *is_null),
            Self::Like {
                column,
                needle,
                mode,
                negated,
            } => {
                let actual = record.value(*column)?.to_string().to_lowercase();
                let needle = needle.to_lowercase();
                let hit = match mode {
                    MatchMode::Contains => actual.contains(&needle),
                    MatchMode::StartsWith => actual.starts_with(&needle),
                };
                Some(hit != *negated)
            }
            Self::Or(parts) => {
                let mut unknown = false;
                for part in parts {
                    match part.evaluate(record) {
                        Some(true) => return Some(true),
                        None => unknown = true,
                        Some(false) => {}
                    }
                }
                if unknown { None } else { Some(false) }
            }
        }
    }
}

/// Conjunction of predicates plus a distinct flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification<C> {
    distinct: bool,
    clauses: Vec<Predicate<C>>,
}

impl<C> Default for Specification<C> {
    fn default() -> Self {
        Self {
            distinct: false,
            clauses: Vec::new(),
        }
    }
}

impl<C: Copy> Specification<C> {
    /// The unconstrained specification: matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Start a specification with the distinct flag set. Distinctness can
    /// only be chosen before any predicate is added.
    pub fn distinct(distinct: bool) -> Self {
        Self {
            distinct,
            clauses: Vec::new(),
        }
    }

    /// Add one predicate to the conjunction.
    pub fn and(mut self, predicate: Predicate<C>) -> Self {
        self.clauses.push(predicate);
        self
    }

    /// Add several predicates to the conjunction, in order.
    pub fn and_all(mut self, predicates: impl IntoIterator<Item = Predicate<C>>) -> Self {
        self.clauses.extend(predicates);
        self
    }

    /// Whether duplicate rows are eliminated.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// The conjoined predicates, in the order they were added.
    pub fn clauses(&self) -> &[Predicate<C>] {
        &self.clauses
    }

    /// Whether no predicate constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `record` satisfies every predicate.
    pub fn matches<R: Record<C>>(&self, record: &R) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.evaluate(record) == Some(true))
    }
}

/// Compile the base operators of a filter into predicates on `column`.
///
/// Operators are emitted in a fixed order: equals, notEquals, in, notIn,
/// specified.
pub fn build_specification<T, C>(filter: &Filter<T>, column: C) -> Vec<Predicate<C>>
where
    T: Clone + Into<FilterValue>,
    C: Copy,
{
    let mut out = Vec::new();
    if let Some(value) = &filter.equals {
        out.push(Predicate::compare(column, FilterOp::Eq, value.clone()));
    }
    if let Some(value) = &filter.not_equals {
        out.push(Predicate::compare(column, FilterOp::Ne, value.clone()));
    }
    if let Some(values) = &filter.in_list {
        out.push(Predicate::In {
            column,
            values: values.iter().cloned().map(Into::into).collect(),
            negated: false,
        });
    }
    if let Some(values) = &filter.not_in {
        out.push(Predicate::In {
            column,
            values: values.iter().cloned().map(Into::into).collect(),
            negated: true,
        });
    }
    if let Some(specified) = filter.specified {
        out.push(Predicate::Null {
            column,
            is_null: !specified,
        });
    }
    out
}

/// Compile a range filter: base operators followed by greaterThan,
/// greaterThanOrEqual, lessThan and lessThanOrEqual.
pub fn build_range_specification<T, C>(filter: &RangeFilter<T>, column: C) -> Vec<Predicate<C>>
where
    T: Clone + Into<FilterValue>,
    C: Copy,
{
    let mut out = build_specification(&filter.base, column);
    let bounds = [
        (FilterOp::Gt, &filter.greater_than),
        (FilterOp::Gte, &filter.greater_than_or_equal),
        (FilterOp::Lt, &filter.less_than),
        (FilterOp::Lte, &filter.less_than_or_equal),
    ];
    for (op, bound) in bounds {
        if let Some(value) = bound {
            out.push(Predicate::compare(column, op, value.clone()));
        }
    }
    out
}

/// Compile a string filter: base operators followed by contains and
/// doesNotContain.
pub fn build_string_specification<C: Copy>(filter: &StringFilter, column: C) -> Vec<Predicate<C>> {
    let mut out = build_specification(&filter.base, column);
    if let Some(needle) = &filter.contains {
        out.push(Predicate::contains(column, needle.clone()));
    }
    if let Some(needle) = &filter.does_not_contain {
        out.push(Predicate::Like {
            column,
            needle: needle.clone(),
            mode: MatchMode::Contains,
            negated: true,
        });
    }
    out
}

fn compare_values(left: &FilterValue, right: &FilterValue) -> Option<Ordering> {
    match (left, right) {
        (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
        (FilterValue::Float(a), FilterValue::Float(b)) => a.partial_cmp(b),
        (FilterValue::Integer(a), FilterValue::Float(b)) => (*a as f64).partial_cmp(b),
        (FilterValue::Float(a), FilterValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (FilterValue::String(a), FilterValue::String(b)) => Some(a.cmp(b)),
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
