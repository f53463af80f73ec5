//! Column-scoped predicate builder.

use std::fmt;

use super::relation::{CompareOp, Connector, Relation};
use super::{Predicate, Where};
use crate::value::{Operand, ToOperand, Value};

/// Builds one predicate on a single column, then hands back its parent.
///
/// Obtained from [`Where::col`], [`Where::or_col`],
/// [`Query::where_col`](crate::Query::where_col) or
/// [`Query::having_col`](crate::Query::having_col). Every relational
/// method appends exactly one predicate to the parent's criteria and
/// returns the parent, so the next predicate names its column again:
///
/// ```rust
/// use score_sql_core::Where;
///
/// let criteria = Where::new()
///     .col("name").contain("bob")
///     .col("status").in_list(["open", "pending"]);
/// assert_eq!(criteria.len(), 2);
/// ```
#[must_use = "a column condition does nothing until a relation is applied"]
pub struct ColumnCondition<P> {
    parent: P,
    column: String,
    connector: Connector,
    target: fn(&mut P) -> &mut Where,
}

impl<P> ColumnCondition<P> {
    pub(crate) fn new(
        parent: P,
        column: impl Into<String>,
        connector: Connector,
        target: fn(&mut P) -> &mut Where,
    ) -> Self {
        Self {
            parent,
            column: column.into(),
            connector,
            target,
        }
    }

    /// Returns the column this condition applies to.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    fn push(self, relation: Relation) -> P {
        let mut parent = self.parent;
        (self.target)(&mut parent).push(Predicate {
            column: self.column,
            relation,
            connector: self.connector,
        });
        parent
    }

    /// `col = value`; a list operand becomes `col IN ( ... )`.
    pub fn eq<T: ToOperand>(self, value: T) -> P {
        match value.to_operand() {
            Operand::Single(v) => self.push(Relation::Compare(CompareOp::Eq, v)),
            Operand::List(vs) => self.push(Relation::In(vs)),
        }
    }

    /// `col != value`; a list operand becomes `col NOT IN ( ... )`.
    pub fn ne<T: ToOperand>(self, value: T) -> P {
        match value.to_operand() {
            Operand::Single(v) => self.push(Relation::Compare(CompareOp::Ne, v)),
            Operand::List(vs) => self.push(Relation::NotIn(vs)),
        }
    }

    /// `col < value`
    pub fn lt<T: Into<Value>>(self, value: T) -> P {
        self.push(Relation::Compare(CompareOp::Lt, value.into()))
    }

    /// `col <= value`
    pub fn le<T: Into<Value>>(self, value: T) -> P {
        self.push(Relation::Compare(CompareOp::Le, value.into()))
    }

    /// `col > value`
    pub fn gt<T: Into<Value>>(self, value: T) -> P {
        self.push(Relation::Compare(CompareOp::Gt, value.into()))
    }

    /// `col >= value`
    pub fn ge<T: Into<Value>>(self, value: T) -> P {
        self.push(Relation::Compare(CompareOp::Ge, value.into()))
    }

    /// `col IN ( ... )`. Pass an array for the variadic call shape:
    /// `in_list([1, 2, 3])`.
    pub fn in_list<I, T>(self, values: I) -> P
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.push(Relation::In(values.into_iter().map(Into::into).collect()))
    }

    /// `col NOT IN ( ... )`
    pub fn not_in<I, T>(self, values: I) -> P
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.push(Relation::NotIn(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// `col BETWEEN low AND high`
    pub fn between<A: Into<Value>, B: Into<Value>>(self, low: A, high: B) -> P {
        self.push(Relation::Between(low.into(), high.into()))
    }

    /// `col LIKE pattern`
    pub fn like<T: Into<Value>>(self, pattern: T) -> P {
        self.push(Relation::Like(pattern.into()))
    }

    /// `col LIKE '%value%'`
    pub fn contain(self, value: impl fmt::Display) -> P {
        self.like(format!("%{value}%"))
    }

    /// `col LIKE 'value%'`
    pub fn start_with(self, value: impl fmt::Display) -> P {
        self.like(format!("{value}%"))
    }

    /// `col LIKE '%value'`
    pub fn end_with(self, value: impl fmt::Display) -> P {
        self.like(format!("%{value}"))
    }

    /// `col IS NULL`
    pub fn is_null(self) -> P {
        self.push(Relation::IsNull)
    }

    /// `col IS NOT NULL`
    pub fn not_null(self) -> P {
        self.push(Relation::IsNotNull)
    }
}
