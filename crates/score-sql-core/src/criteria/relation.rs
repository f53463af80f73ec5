//! Predicate relations.

use std::fmt;

use crate::error::{CompileError, Result};
use crate::value::{Operand, Value};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Boolean keyword placed in front of a predicate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// AND
    #[default]
    And,
    /// OR
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// How a column relates to its operand. Each variant carries exactly
/// the values it binds.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// `col <op> value`
    Compare(CompareOp, Value),
    /// `col IN ( ... )`
    In(Vec<Value>),
    /// `col NOT IN ( ... )`
    NotIn(Vec<Value>),
    /// `col BETWEEN low AND high`
    Between(Value, Value),
    /// `col LIKE pattern`
    Like(Value),
    /// `col IS NULL`
    IsNull,
    /// `col IS NOT NULL`
    IsNotNull,
}

impl Relation {
    /// Returns the SQL operator keyword.
    #[must_use]
    pub fn keyword(&self) -> String {
        match self {
            Self::Compare(op, _) => op.to_string(),
            Self::In(_) => String::from("IN"),
            Self::NotIn(_) => String::from("NOT IN"),
            Self::Between(..) => String::from("BETWEEN"),
            Self::Like(_) => String::from("LIKE"),
            Self::IsNull => String::from("IS NULL"),
            Self::IsNotNull => String::from("IS NOT NULL"),
        }
    }

    /// Returns the values this relation carries, in binding order.
    #[must_use]
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Self::Compare(_, v) | Self::Like(v) => vec![v],
            Self::In(vs) | Self::NotIn(vs) => vs.iter().collect(),
            Self::Between(low, high) => vec![low, high],
            Self::IsNull | Self::IsNotNull => vec![],
        }
    }

    /// Builds a relation from an operator keyword.
    ///
    /// Accepts SQL operators (`=`, `!=`, `<>`, `<`, `<=`, `>`, `>=`, `IN`,
    /// `NOT IN`, `BETWEEN`, `LIKE`, `IS NULL`, `IS NOT NULL`) and the
    /// method spellings (`eq`, `ne`, `lt`, `le`, `gt`, `ge`, `in`,
    /// `notIn`, `between`, `like`, `isNull`, `notNull`), ignoring case
    /// and repeated whitespace.
    ///
    /// # Errors
    ///
    /// [`CompileError::UnsupportedRelation`] for an unknown keyword or a
    /// list given to a scalar operator, [`CompileError::MalformedBetween`]
    /// when BETWEEN does not get exactly two values.
    pub fn from_keyword(column: &str, keyword: &str, operand: Operand) -> Result<Self> {
        let normalized = keyword
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        let relation = match normalized.as_str() {
            "=" | "==" | "EQ" => match operand {
                Operand::Single(v) => Self::Compare(CompareOp::Eq, v),
                Operand::List(vs) => Self::In(vs),
            },
            "!=" | "<>" | "NE" => match operand {
                Operand::Single(v) => Self::Compare(CompareOp::Ne, v),
                Operand::List(vs) => Self::NotIn(vs),
            },
            "<" | "LT" => Self::Compare(CompareOp::Lt, scalar(&normalized, operand)?),
            "<=" | "LE" => Self::Compare(CompareOp::Le, scalar(&normalized, operand)?),
            ">" | "GT" => Self::Compare(CompareOp::Gt, scalar(&normalized, operand)?),
            ">=" | "GE" => Self::Compare(CompareOp::Ge, scalar(&normalized, operand)?),
            "IN" => Self::In(operand.into_values()),
            "NOT IN" | "NOTIN" => Self::NotIn(operand.into_values()),
            "LIKE" => Self::Like(scalar(&normalized, operand)?),
            "IS NULL" | "ISNULL" => Self::IsNull,
            "IS NOT NULL" | "NOTNULL" => Self::IsNotNull,
            "BETWEEN" => {
                let values = operand.into_values();
                let count = values.len();
                let mut values = values.into_iter();
                match (values.next(), values.next(), values.next()) {
                    (Some(low), Some(high), None) => Self::Between(low, high),
                    _ => {
                        return Err(CompileError::MalformedBetween {
                            column: String::from(column),
                            count,
                        })
                    }
                }
            }
            _ => return Err(CompileError::UnsupportedRelation(String::from(keyword))),
        };
        Ok(relation)
    }
}

/// Unwraps a single value; a one-element list counts as a scalar.
fn scalar(keyword: &str, operand: Operand) -> Result<Value> {
    match operand {
        Operand::Single(v) => Ok(v),
        Operand::List(vs) => {
            let count = vs.len();
            let mut values = vs.into_iter();
            match (values.next(), values.next()) {
                (Some(v), None) => Ok(v),
                _ => Err(CompileError::UnsupportedRelation(format!(
                    "{keyword} with a list of {count} values"
                ))),
            }
        }
    }
}
