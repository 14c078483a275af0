//! Filter value objects for dynamic query building.
//!
//! A filter describes the constraints a caller placed on one field. Every
//! operator is optional; an operator left at `None` imposes nothing. Filters
//! do no validation: contradictory operators are all compiled and conjoined.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Comparison operator used by compiled predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl FilterOp {
    /// Return the SQL operator for this comparison.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// A dynamic literal that a field is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Common interface of all filter kinds, used by the query-string binder.
pub trait QueryFilter: Default {
    /// Set one operator from its query-string name and raw value
    /// (`"equals"`, `"in"`, `"greaterThan"`, ...).
    fn apply_operator(&mut self, operator: &str, raw: &str) -> AppResult<()>;

    /// Whether any operator has been set.
    fn is_specified(&self) -> bool;
}

/// Base filter supported by every field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter<T> {
    /// Field equals the literal.
    pub equals: Option<T>,
    /// Field differs from the literal.
    pub not_equals: Option<T>,
    /// `true`: field is not null; `false`: field is null.
    pub specified: Option<bool>,
    /// Field is one of the literals.
    #[serde(rename = "in")]
    pub in_list: Option<Vec<T>>,
    /// Field is none of the literals.
    pub not_in: Option<Vec<T>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            specified: None,
            in_list: None,
            not_in: None,
        }
    }
}

impl<T> Filter<T> {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `equals` operator.
    pub fn equals(mut self, value: T) -> Self {
        self.equals = Some(value);
        self
    }

    /// Set the `notEquals` operator.
    pub fn not_equals(mut self, value: T) -> Self {
        self.not_equals = Some(value);
        self
    }

    /// Set the `specified` null-check.
    pub fn specified(mut self, specified: bool) -> Self {
        self.specified = Some(specified);
        self
    }

    /// Set the `in` operator.
    pub fn in_list(mut self, values: Vec<T>) -> Self {
        self.in_list = Some(values);
        self
    }

    /// Set the `notIn` operator.
    pub fn not_in(mut self, values: Vec<T>) -> Self {
        self.not_in = Some(values);
        self
    }

    fn has_any(&self) -> bool {
        self.equals.is_some()
            || self.not_equals.is_some()
            || self.specified.is_some()
            || self.in_list.is_some()
            || self.not_in.is_some()
    }
}

impl<T> QueryFilter for Filter<T>
where
    T: FilterLiteral,
{
    fn apply_operator(&mut self, operator: &str, raw: &str) -> AppResult<()> {
        match operator {
            "equals" => self.equals = Some(parse_literal(operator, raw)?),
            "notEquals" => self.not_equals = Some(parse_literal(operator, raw)?),
            "specified" => self.specified = Some(parse_literal(operator, raw)?),
            "in" => self.in_list = Some(parse_list(operator, raw)?),
            "notIn" => self.not_in = Some(parse_list(operator, raw)?),
            other => return Err(unsupported(other)),
        }
        Ok(())
    }

    fn is_specified(&self) -> bool {
        self.has_any()
    }
}

/// Filter for ordered types (identifiers, numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter<T> {
    /// Base operators.
    #[serde(flatten)]
    pub base: Filter<T>,
    /// Field is strictly greater than the literal.
    pub greater_than: Option<T>,
    /// Field is greater than or equal to the literal.
    pub greater_than_or_equal: Option<T>,
    /// Field is strictly less than the literal.
    pub less_than: Option<T>,
    /// Field is less than or equal to the literal.
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            greater_than_or_equal: None,
            less_than: None,
            less_than_or_equal: None,
        }
    }
}

impl<T> RangeFilter<T> {
    /// Create an empty range filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap base operators into a range filter.
    pub fn from_base(base: Filter<T>) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Set the `greaterThan` operator.
    pub fn greater_than(mut self, value: T) -> Self {
        self.greater_than = Some(value);
        self
    }

    /// Set the `greaterThanOrEqual` operator.
    pub fn greater_than_or_equal(mut self, value: T) -> Self {
        self.greater_than_or_equal = Some(value);
        self
    }

    /// Set the `lessThan` operator.
    pub fn less_than(mut self, value: T) -> Self {
        self.less_than = Some(value);
        self
    }

    /// Set the `lessThanOrEqual` operator.
    pub fn less_than_or_equal(mut self, value: T) -> Self {
        self.less_than_or_equal = Some(value);
        self
    }
}

impl<T> Deref for RangeFilter<T> {
    type Target = Filter<T>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<T> DerefMut for RangeFilter<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl<T> QueryFilter for RangeFilter<T>
where
    T: FilterLiteral,
{
    fn apply_operator(&mut self, operator: &str, raw: &str) -> AppResult<()> {
        match operator {
            "greaterThan" => self.greater_than = Some(parse_literal(operator, raw)?),
            "greaterThanOrEqual" => {
                self.greater_than_or_equal = Some(parse_literal(operator, raw)?)
            }
            "lessThan" => self.less_than = Some(parse_literal(operator, raw)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_literal(operator, raw)?),
            _ => return self.base.apply_operator(operator, raw),
        }
        Ok(())
    }

    fn is_specified(&self) -> bool {
        self.base.has_any()
            || self.greater_than.is_some()
            || self.greater_than_or_equal.is_some()
            || self.less_than.is_some()
            || self.less_than_or_equal.is_some()
    }
}

/// Filter for text fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    /// Base operators.
    #[serde(flatten)]
    pub base: Filter<String>,
    /// Field contains the literal, ignoring case.
    pub contains: Option<String>,
    /// Field does not contain the literal, ignoring case.
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    /// Create an empty string filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap base operators into a string filter.
    pub fn from_base(base: Filter<String>) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Set the `contains` operator.
    pub fn contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    /// Set the `doesNotContain` operator.
    pub fn does_not_contain(mut self, value: impl Into<String>) -> Self {
        self.does_not_contain = Some(value.into());
        self
    }
}

impl Deref for StringFilter {
    type Target = Filter<String>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for StringFilter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl QueryFilter for StringFilter {
    fn apply_operator(&mut self, operator: &str, raw: &str) -> AppResult<()> {
        match operator {
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            _ => return self.base.apply_operator(operator, raw),
        }
        Ok(())
    }

    fn is_specified(&self) -> bool {
        self.base.has_any() || self.contains.is_some() || self.does_not_contain.is_some()
    }
}

/// Filter on an `i64` field.
pub type LongFilter = RangeFilter<i64>;
/// Filter on an `f64` field.
pub type DoubleFilter = RangeFilter<f64>;
/// Filter on a `bool` field.
pub type BooleanFilter = Filter<bool>;

/// A value type that can be bound from a query-string literal.
pub trait FilterLiteral: FromStr {
    /// Whether a parsed value may be used in a filter.
    fn is_admissible(&self) -> bool {
        true
    }
}

impl FilterLiteral for i64 {}
impl FilterLiteral for bool {}
impl FilterLiteral for String {}

impl FilterLiteral for f64 {
    /// `NaN` and infinities have no consistent ordering across stores.
    fn is_admissible(&self) -> bool {
        self.is_finite()
    }
}

fn parse_literal<T: FilterLiteral>(operator: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(T::is_admissible)
        .ok_or_else(|| {
            AppError::validation(format!("Invalid value '{raw}' for filter operator '{operator}'"))
        })
}

fn parse_list<T: FilterLiteral>(operator: &str, raw: &str) -> AppResult<Vec<T>> {
    raw.split(',')
        .map(|part| parse_literal(operator, part))
        .collect()
}

fn unsupported(operator: &str) -> AppError {
    AppError::validation(format!("Unsupported filter operator '{operator}'"))
}
