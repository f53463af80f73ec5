//! Criteria builder for WHERE and HAVING clauses.
//!
//! A [`Where`] is an ordered, append-only list of entries. Structured
//! predicates are added through a column-scoped [`ColumnCondition`];
//! raw fragments are kept verbatim. Compilation happens in
//! [`Builder`](crate::Builder), which reads the entries in insertion
//! order.

mod column;
mod relation;

pub use column::ColumnCondition;
pub use relation::{CompareOp, Connector, Relation};

use crate::error::Result;
use crate::value::ToOperand;

/// One structured condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Column the condition applies to (quoted at compile time).
    pub column: String,
    /// Relation and its operand values.
    pub relation: Relation,
    /// Keyword joining this predicate to the previous entry.
    pub connector: Connector,
}

/// A criteria entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A structured predicate.
    Predicate(Predicate),
    /// Trusted SQL text, joined with AND.
    Raw(String),
}

/// Ordered, append-only list of predicates.
///
/// ```rust
/// use score_sql_core::Where;
///
/// let criteria = Where::new()
///     .col("age").ge(18_i32)
///     .or_col("guardian_id").not_null()
///     .raw("deleted_at IS NULL");
/// assert_eq!(criteria.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    entries: Vec<Entry>,
}

impl Where {
    /// Creates an empty criteria list.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Starts a predicate on `column`, joined with AND.
    pub fn col(self, column: impl Into<String>) -> ColumnCondition<Self> {
        ColumnCondition::new(self, column, Connector::And, Self::itself)
    }

    /// Starts a predicate on `column`, joined with OR.
    pub fn or_col(self, column: impl Into<String>) -> ColumnCondition<Self> {
        ColumnCondition::new(self, column, Connector::Or, Self::itself)
    }

    fn itself(&mut self) -> &mut Self {
        self
    }

    /// Appends a raw fragment.
    ///
    /// **Warning**: the text is emitted as-is. Never build it from user input.
    #[must_use]
    pub fn raw(mut self, sql: impl Into<String>) -> Self {
        self.push_raw(sql);
        self
    }

    /// Appends a predicate given an operator keyword such as `"="`,
    /// `"NOT IN"` or `"between"`.
    ///
    /// # Errors
    ///
    /// Fails for an unknown keyword or a BETWEEN without exactly two
    /// values; see [`Relation::from_keyword`].
    pub fn condition(
        mut self,
        column: &str,
        keyword: &str,
        operand: impl ToOperand,
    ) -> Result<Self> {
        self.push_condition(column, keyword, operand, Connector::And)?;
        Ok(self)
    }

    /// Like [`Where::condition`], joined with OR.
    ///
    /// # Errors
    ///
    /// Same as [`Where::condition`].
    pub fn or_condition(
        mut self,
        column: &str,
        keyword: &str,
        operand: impl ToOperand,
    ) -> Result<Self> {
        self.push_condition(column, keyword, operand, Connector::Or)?;
        Ok(self)
    }

    /// Appends a predicate in place.
    pub fn push(&mut self, predicate: Predicate) {
        self.entries.push(Entry::Predicate(predicate));
    }

    /// Appends a raw fragment in place.
    pub fn push_raw(&mut self, sql: impl Into<String>) {
        self.entries.push(Entry::Raw(sql.into()));
    }

    /// Appends a keyword predicate in place.
    ///
    /// # Errors
    ///
    /// Same as [`Where::condition`]; nothing is appended on error.
    pub fn push_condition(
        &mut self,
        column: &str,
        keyword: &str,
        operand: impl ToOperand,
        connector: Connector,
    ) -> Result<()> {
        let relation = Relation::from_keyword(column, keyword, operand.to_operand())?;
        self.push(Predicate {
            column: String::from(column),
            relation,
            connector,
        });
        Ok(())
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entry has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    #[test]
    fn test_entries_keep_insertion_order() {
        let w = Where::new()
            .col("b")
            .eq(1_i64)
            .raw("x > 1")
            .col("a")
            .is_null();
        let kinds: Vec<&str> = w
            .entries()
            .iter()
            .map(|e| match e {
                Entry::Predicate(p) => p.column.as_str(),
                Entry::Raw(sql) => sql.as_str(),
            })
            .collect();
        assert_eq!(kinds, vec!["b", "x > 1", "a"]);
    }

    #[test]
    fn test_condition_keyword() {
        let w = Where::new()
            .condition("status", "in", ["a", "b"])
            .unwrap()
            .or_condition("flag", "IS NOT NULL", false)
            .unwrap();
        assert_eq!(w.len(), 2);
        match &w.entries()[1] {
            Entry::Predicate(p) => {
                assert_eq!(p.relation, Relation::IsNotNull);
                assert_eq!(p.connector, Connector::Or);
            }
            Entry::Raw(_) => panic!("expected predicate"),
        }
    }

    #[test]
    fn test_condition_rejects_unknown_keyword() {
        let err = Where::new().condition("a", "~~", 1_i64).unwrap_err();
        assert_eq!(err, CompileError::UnsupportedRelation(String::from("~~")));
    }

    #[test]
    fn test_push_condition_appends_nothing_on_error() {
        let mut w = Where::new();
        assert!(w
            .push_condition("a", "between", [1_i64], Connector::And)
            .is_err());
        assert!(w.is_empty());
    }
}
