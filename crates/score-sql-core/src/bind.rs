//! Parameter binding.
//!
//! A [`Binder`] hands out named placeholder tokens and remembers which
//! value each token stands for. Every [`Query`](crate::Query) owns its
//! own binder: sharing one between two queries would interleave their
//! counters.

use std::collections::HashMap;

use crate::error::{CompileError, Result};
use crate::value::SqlValue;

/// Prefix used for placeholder names unless configured otherwise.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "db_prep_";

/// Checks that a placeholder prefix is non-empty and made of ASCII
/// letters, digits and `_`. The prefix is written into the SQL text
/// unescaped, so nothing else may reach it.
///
/// # Errors
///
/// [`CompileError::InvalidConfig`] naming the rejected prefix.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CompileError::InvalidConfig(format!(
            "placeholder prefix '{prefix}' must be non-empty and use [A-Za-z0-9_]"
        )));
    }
    Ok(())
}

/// One placeholder and the value bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Placeholder token as written in the SQL text, e.g. `:db_prep_1`.
    pub placeholder: String,
    /// Value the driver must bind to the placeholder.
    pub value: SqlValue,
}

/// Converts values into placeholder tokens for one statement.
///
/// Tokens are `:` + prefix + counter. The counter starts at 1 and only
/// goes up, so a binder reused across several clauses (or several
/// compilations) never repeats a token until [`Binder::reset`] is called.
///
/// ```rust
/// use score_sql_core::{Binder, SqlValue};
///
/// let mut binder = Binder::new();
/// assert_eq!(binder.prepare(SqlValue::Int(7)), ":db_prep_1");
/// assert_eq!(binder.get(":db_prep_1"), Some(&SqlValue::Int(7)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Binder {
    prefix: String,
    counter: usize,
    bindings: Vec<Binding>,
}

impl Binder {
    /// Creates a binder using [`DEFAULT_PLACEHOLDER_PREFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::from(DEFAULT_PLACEHOLDER_PREFIX),
            counter: 1,
            bindings: vec![],
        }
    }

    /// Creates a binder with a custom placeholder prefix.
    ///
    /// # Errors
    ///
    /// See [`validate_prefix`].
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self {
            prefix,
            ..Self::new()
        })
    }

    /// Returns the placeholder prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers one value and returns its placeholder token.
    pub fn prepare(&mut self, value: SqlValue) -> String {
        let placeholder = format!(":{}{}", self.prefix, self.counter);
        self.counter += 1;
        self.bindings.push(Binding {
            placeholder: placeholder.clone(),
            value,
        });
        placeholder
    }

    /// Registers every value in order and returns their tokens in the
    /// same order.
    pub fn prepare_all<I>(&mut self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = SqlValue>,
    {
        values.into_iter().map(|v| self.prepare(v)).collect()
    }

    /// Returns the bindings in the order they were registered.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Looks up the value bound to a placeholder token.
    #[must_use]
    pub fn get(&self, placeholder: &str) -> Option<&SqlValue> {
        self.bindings
            .iter()
            .find(|b| b.placeholder == placeholder)
            .map(|b| &b.value)
    }

    /// Returns the bindings as a placeholder → value map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, SqlValue> {
        self.bindings
            .iter()
            .map(|b| (b.placeholder.clone(), b.value.clone()))
            .collect()
    }

    /// Returns the bound values in registration order, for drivers that
    /// bind positionally.
    #[must_use]
    pub fn values(&self) -> Vec<SqlValue> {
        self.bindings.iter().map(|b| b.value.clone()).collect()
    }

    /// Number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when nothing has been bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drops every binding and restarts numbering at 1.
    pub fn reset(&mut self) {
        self.counter = 1;
        self.bindings.clear();
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_numbers_from_one() {
        let mut binder = Binder::new();
        assert_eq!(binder.prepare(SqlValue::Int(1)), ":db_prep_1");
        assert_eq!(binder.prepare(SqlValue::Int(2)), ":db_prep_2");
        assert_eq!(binder.len(), 2);
    }

    #[test]
    fn test_prepare_all_keeps_order() {
        let mut binder = Binder::new();
        let tokens = binder.prepare_all(vec![
            SqlValue::Text(String::from("a")),
            SqlValue::Text(String::from("b")),
        ]);
        assert_eq!(tokens, vec![":db_prep_1", ":db_prep_2"]);
        assert_eq!(
            binder.values(),
            vec![
                SqlValue::Text(String::from("a")),
                SqlValue::Text(String::from("b"))
            ]
        );
    }

    #[test]
    fn test_prepare_null_is_bound() {
        let mut binder = Binder::new();
        let token = binder.prepare(SqlValue::Null);
        assert_eq!(binder.get(&token), Some(&SqlValue::Null));
    }

    #[test]
    fn test_custom_prefix() {
        let mut binder = Binder::with_prefix("p").unwrap();
        assert_eq!(binder.prefix(), "p");
        assert_eq!(binder.prepare(SqlValue::Bool(true)), ":p1");
    }

    #[test]
    fn test_prefix_rejects_sql() {
        for prefix in ["", "x OR 1=1 -- ", "p-1", "p.q", "é"] {
            assert!(
                matches!(Binder::with_prefix(prefix), Err(CompileError::InvalidConfig(_))),
                "prefix {prefix:?} should be rejected"
            );
        }
        assert!(Binder::with_prefix("Arg_2").is_ok());
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut binder = Binder::new();
        binder.prepare(SqlValue::Int(1));
        binder.prepare(SqlValue::Int(2));
        binder.reset();
        assert!(binder.is_empty());
        assert_eq!(binder.prepare(SqlValue::Int(3)), ":db_prep_1");
    }

    #[test]
    fn test_to_map() {
        let mut binder = Binder::new();
        binder.prepare(SqlValue::Int(10));
        binder.prepare(SqlValue::Int(20));
        let map = binder.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[":db_prep_2"], SqlValue::Int(20));
    }

    #[test]
    fn test_empty_list_binds_nothing() {
        let mut binder = Binder::new();
        let tokens = binder.prepare_all(Vec::new());
        assert!(tokens.is_empty());
        assert!(binder.is_empty());
    }
}
