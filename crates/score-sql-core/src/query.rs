//! The query descriptor.
//!
//! A [`Query`] collects everything a statement needs: table, columns,
//! values, criteria, ordering, limits and flags. It owns exactly one
//! [`Binder`], so two queries never share placeholder numbering. The
//! [`Builder`](crate::Builder) reads a query and writes SQL.

use crate::bind::{Binder, Binding};
use crate::criteria::{ColumnCondition, Connector, Where};
use crate::error::Result;
use crate::value::{ToOperand, Value};

/// An expression in the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnExpr {
    /// A column identifier, quoted at compile time.
    Ident(String),
    /// Trusted SQL text such as `COUNT(*)`, emitted verbatim.
    Raw(String),
}

/// One entry of the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    /// The expression to select.
    pub expr: ColumnExpr,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

/// Join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT JOIN
    Left,
    /// RIGHT JOIN
    Right,
    /// CROSS JOIN
    Cross,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A joined table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Join kind.
    pub kind: JoinKind,
    /// Joined table, quoted at compile time.
    pub table: String,
    /// Optional table alias, quoted at compile time.
    pub alias: Option<String>,
    /// Raw ON condition; `None` for CROSS JOIN.
    pub on: Option<String>,
}

/// Sort direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ASC
    #[default]
    Asc,
    /// DESC
    Desc,
}

impl Direction {
    /// Reads a direction name; anything but `desc` (any case) is ASC.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Permissive conversion for LIMIT and OFFSET.
///
/// Non-numeric or negative input becomes `None` instead of an error, so
/// callers can forward request parameters untouched. `limit` treats
/// `None` as "no limit", `offset` as zero.
pub trait IntoCount {
    /// Converts `self` into a count, or `None` when it is not one.
    fn into_count(self) -> Option<u64>;
}

impl IntoCount for u64 {
    fn into_count(self) -> Option<u64> {
        Some(self)
    }
}

impl IntoCount for u32 {
    fn into_count(self) -> Option<u64> {
        Some(u64::from(self))
    }
}

impl IntoCount for usize {
    fn into_count(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl IntoCount for i64 {
    fn into_count(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl IntoCount for i32 {
    fn into_count(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl IntoCount for &str {
    fn into_count(self) -> Option<u64> {
        self.trim().parse().ok()
    }
}

impl IntoCount for String {
    fn into_count(self) -> Option<u64> {
        self.as_str().into_count()
    }
}

impl<T: IntoCount> IntoCount for Option<T> {
    fn into_count(self) -> Option<u64> {
        self.and_then(IntoCount::into_count)
    }
}

/// Mutable description of one statement.
///
/// ```rust
/// use score_sql_core::{Builder, Dialect, Query};
///
/// let mut query = Query::new()
///     .table("users")
///     .column("name")
///     .where_col("status").eq("active")
///     .order("name")
///     .limit(10);
///
/// let sql = Builder::with_dialect(Dialect::PgSql).to_select(&mut query).unwrap();
/// assert_eq!(
///     sql,
///     "SELECT \"name\" FROM \"users\" WHERE \"status\" = :db_prep_1 ORDER BY \"name\" ASC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub(crate) table: String,
    pub(crate) table_alias: Option<String>,
    pub(crate) id_column: Option<String>,
    pub(crate) columns: Vec<SelectColumn>,
    pub(crate) values: Vec<(String, Value)>,
    pub(crate) joins: Vec<Join>,
    pub(crate) criteria: Where,
    pub(crate) group: Vec<String>,
    pub(crate) having: Where,
    pub(crate) order: Vec<(String, Direction)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: u64,
    pub(crate) select_flags: Vec<String>,
    pub(crate) for_update: bool,
    pub(crate) returning: Option<String>,
    pub(crate) binder: Binder,
}

impl Query {
    /// Creates an empty query with a fresh binder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty query owning the given binder.
    #[must_use]
    pub fn with_binder(binder: Binder) -> Self {
        Self {
            binder,
            ..Self::default()
        }
    }

    // ---------------------------------------------------------------
    // table
    // ---------------------------------------------------------------

    /// Sets the target table.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the target table and the name of its key column.
    #[must_use]
    pub fn table_with_id(mut self, table: impl Into<String>, id_column: impl Into<String>) -> Self {
        self.table = table.into();
        self.id_column = Some(id_column.into());
        self
    }

    /// Sets the table alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = Some(alias.into());
        self
    }

    // ---------------------------------------------------------------
    // select list
    // ---------------------------------------------------------------

    /// Adds a column to the select list.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(SelectColumn {
            expr: ColumnExpr::Ident(column.into()),
            alias: None,
        });
        self
    }

    /// Adds a column selected `AS alias`.
    #[must_use]
    pub fn column_as(mut self, column: impl Into<String>, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn {
            expr: ColumnExpr::Ident(column.into()),
            alias: Some(alias.into()),
        });
        self
    }

    /// Adds a raw select expression such as `COUNT(*)`, optionally aliased.
    #[must_use]
    pub fn column_raw(mut self, sql: impl Into<String>, alias: Option<&str>) -> Self {
        self.columns.push(SelectColumn {
            expr: ColumnExpr::Raw(sql.into()),
            alias: alias.map(String::from),
        });
        self
    }

    // ---------------------------------------------------------------
    // values for INSERT and UPDATE
    // ---------------------------------------------------------------

    /// Sets one value, replacing an earlier value for the same column.
    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.values.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
        self
    }

    /// Replaces the whole value map.
    #[must_use]
    pub fn values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.clear();
        for (column, value) in values {
            self = self.value(column, value);
        }
        self
    }

    // ---------------------------------------------------------------
    // joins
    // ---------------------------------------------------------------

    fn push_join(mut self, kind: JoinKind, table: &str, on: Option<&str>) -> Self {
        let table = table.trim();
        let (table, alias) = match table.split_once(char::is_whitespace) {
            Some((table, alias)) => {
                let alias = alias.trim_start();
                let alias = match alias.get(..3) {
                    Some(kw) if kw.eq_ignore_ascii_case("as ") => alias[3..].trim_start(),
                    _ => alias,
                };
                (table, Some(String::from(alias)).filter(|a| !a.is_empty()))
            }
            None => (table, None),
        };
        self.joins.push(Join {
            kind,
            table: String::from(table),
            alias,
            on: on.map(str::trim).filter(|on| !on.is_empty()).map(String::from),
        });
        self
    }

    /// Adds an INNER JOIN. `table` may carry an alias (`"orders o"` or
    /// `"orders AS o"`); `on` is emitted verbatim and left out when
    /// blank.
    #[must_use]
    pub fn join(self, table: &str, on: &str) -> Self {
        self.push_join(JoinKind::Inner, table, Some(on))
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.push_join(JoinKind::Left, table, Some(on))
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, table: &str, on: &str) -> Self {
        self.push_join(JoinKind::Right, table, Some(on))
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, table: &str) -> Self {
        self.push_join(JoinKind::Cross, table, None)
    }

    // ---------------------------------------------------------------
    // criteria
    // ---------------------------------------------------------------

    fn criteria_mut(&mut self) -> &mut Where {
        &mut self.criteria
    }

    fn having_mut(&mut self) -> &mut Where {
        &mut self.having
    }

    /// Starts a WHERE predicate on `column`, joined with AND.
    pub fn where_col(self, column: impl Into<String>) -> ColumnCondition<Self> {
        ColumnCondition::new(self, column, Connector::And, Self::criteria_mut)
    }

    /// Starts a WHERE predicate on `column`, joined with OR.
    pub fn or_where_col(self, column: impl Into<String>) -> ColumnCondition<Self> {
        ColumnCondition::new(self, column, Connector::Or, Self::criteria_mut)
    }

    /// Appends a raw WHERE fragment.
    #[must_use]
    pub fn where_raw(mut self, sql: impl Into<String>) -> Self {
        self.criteria.push_raw(sql);
        self
    }

    /// Appends a WHERE predicate given an operator keyword.
    ///
    /// # Errors
    ///
    /// Fails for an unknown keyword or a malformed BETWEEN.
    pub fn where_condition(
        mut self,
        column: &str,
        keyword: &str,
        operand: impl ToOperand,
    ) -> Result<Self> {
        self.criteria
            .push_condition(column, keyword, operand, Connector::And)?;
        Ok(self)
    }

    /// Edits the WHERE criteria with a closure.
    #[must_use]
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Where) -> Where,
    {
        self.criteria = f(std::mem::take(&mut self.criteria));
        self
    }

    // ---------------------------------------------------------------
    // grouping and ordering
    // ---------------------------------------------------------------

    /// Adds a GROUP BY column.
    #[must_use]
    pub fn group(mut self, column: impl Into<String>) -> Self {
        self.group.push(column.into());
        self
    }

    /// Appends a raw HAVING fragment, e.g. `COUNT(*) > 1`.
    #[must_use]
    pub fn having(mut self, sql: impl Into<String>) -> Self {
        self.having.push_raw(sql);
        self
    }

    /// Edits the HAVING criteria with a closure.
    #[must_use]
    pub fn filter_having<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Where) -> Where,
    {
        self.having = f(std::mem::take(&mut self.having));
        self
    }

    /// Starts a HAVING predicate on `column`.
    pub fn having_col(self, column: impl Into<String>) -> ColumnCondition<Self> {
        ColumnCondition::new(self, column, Connector::And, Self::having_mut)
    }

    /// Adds an ascending ORDER BY column.
    #[must_use]
    pub fn order(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    /// Adds a descending ORDER BY column.
    #[must_use]
    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// Adds an ORDER BY column with an explicit direction.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order.push((column.into(), direction));
        self
    }

    // ---------------------------------------------------------------
    // limits and flags
    // ---------------------------------------------------------------

    /// Sets LIMIT. Input that is not a count clears the limit.
    #[must_use]
    pub fn limit(mut self, limit: impl IntoCount) -> Self {
        self.limit = limit.into_count();
        self
    }

    /// Sets OFFSET. Input that is not a count resets it to zero.
    #[must_use]
    pub fn offset(mut self, offset: impl IntoCount) -> Self {
        self.offset = offset.into_count().unwrap_or(0);
        self
    }

    /// Adds a select flag written right after `SELECT`.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.select_flags.push(flag.into());
        self
    }

    /// `SELECT DISTINCT`.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.flag("DISTINCT")
    }

    /// Locks selected rows with a trailing `FOR UPDATE`.
    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// Sets the RETURNING expression (emitted only where the dialect
    /// supports it).
    #[must_use]
    pub fn returning(mut self, returning: impl Into<String>) -> Self {
        self.returning = Some(returning.into());
        self
    }

    // ---------------------------------------------------------------
    // state
    // ---------------------------------------------------------------

    /// Clears everything except the table and key column, and starts a
    /// fresh binder with the same prefix.
    pub fn reset(&mut self) {
        let table = std::mem::take(&mut self.table);
        let id_column = self.id_column.take();
        let mut binder = std::mem::take(&mut self.binder);
        binder.reset();
        *self = Self {
            table,
            id_column,
            binder,
            ..Self::default()
        };
    }

    /// Returns the target table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Returns the key column, if one was set.
    #[must_use]
    pub fn id_column(&self) -> Option<&str> {
        self.id_column.as_deref()
    }

    /// Returns the WHERE criteria.
    #[must_use]
    pub const fn criteria(&self) -> &Where {
        &self.criteria
    }

    /// Returns the HAVING criteria.
    #[must_use]
    pub const fn having_criteria(&self) -> &Where {
        &self.having
    }

    /// Returns the binder holding this query's bound values.
    #[must_use]
    pub const fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Returns the binder mutably, e.g. to [`Binder::reset`] it before
    /// recompiling.
    pub fn binder_mut(&mut self) -> &mut Binder {
        &mut self.binder
    }

    /// Shortcut for `self.binder().bindings()`.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        self.binder.bindings()
    }
}
