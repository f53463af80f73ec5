//! SQL values and parameter handling.
//!
//! Everything a caller hands to a predicate, a `SET` list or a `VALUES`
//! list ends up as a [`Value`]: either a [`SqlValue`] that is bound to a
//! placeholder, or a raw fragment that is emitted verbatim.

use std::fmt;

use serde::Serialize;

/// A SQL value that can be bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

/// Renders the value as a SQL literal, for logs and debugging output.
/// Statements never inline values; they always go through a placeholder.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

macro_rules! impl_to_sql_int {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_to_sql_int!(i32, i16, i8, u32, u16, u8);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

/// A value as the compiler sees it: bound through a placeholder, or
/// trusted SQL text written into the statement as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Bound to a placeholder by the binder.
    Bind(SqlValue),
    /// Emitted verbatim, e.g. `NOW()`. Never pass user input here.
    Raw(String),
}

impl Value {
    /// Returns the raw fragment, if this value bypasses binding.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(sql) => Some(sql),
            Self::Bind(_) => None,
        }
    }
}

impl<T: ToSqlValue> From<T> for Value {
    fn from(value: T) -> Self {
        Self::Bind(value.to_sql_value())
    }
}

/// Wraps trusted SQL text so it is emitted without a placeholder.
///
/// ```rust
/// use score_sql_core::{raw, Value};
///
/// assert_eq!(raw("NOW()"), Value::Raw(String::from("NOW()")));
/// ```
#[must_use]
pub fn raw(sql: impl Into<String>) -> Value {
    Value::Raw(sql.into())
}

/// The right-hand side of a predicate: one value or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A single value.
    Single(Value),
    /// A list of values (IN lists, BETWEEN pairs).
    List(Vec<Value>),
}

impl Operand {
    /// Flattens the operand into a list of values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value],
            Self::List(values) => values,
        }
    }
}

/// Conversion into an [`Operand`].
///
/// Scalars become [`Operand::Single`]; vectors and arrays become
/// [`Operand::List`].
pub trait ToOperand {
    /// Converts `self` into an operand.
    fn to_operand(self) -> Operand;
}

impl<T: ToSqlValue> ToOperand for T {
    fn to_operand(self) -> Operand {
        Operand::Single(Value::Bind(self.to_sql_value()))
    }
}

impl ToOperand for Value {
    fn to_operand(self) -> Operand {
        Operand::Single(self)
    }
}

impl ToOperand for Operand {
    fn to_operand(self) -> Operand {
        self
    }
}

impl<T: Into<Value>> ToOperand for Vec<T> {
    fn to_operand(self) -> Operand {
        Operand::List(self.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> ToOperand for [T; N] {
    fn to_operand(self) -> Operand {
        Operand::List(self.into_iter().map(Into::into).collect())
    }
}
