//! Per-dialect clause plans.
//!
//! A plan is the ordered list of clause steps a statement kind runs.
//! Every plan is rebuilt from the base lists plus the dialect's extras,
//! so switching dialects never stacks steps from an earlier dialect.

use std::fmt;

use crate::dialect::Dialect;

/// The four statement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT
    Select,
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
}

impl StatementKind {
    /// Leading keyword of the statement.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT INTO",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE FROM",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "select"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One clause step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Select flags such as `DISTINCT`.
    Flags,
    /// Select list, `*` when empty.
    Columns,
    /// `FROM "table"`
    From,
    /// Quoted table alias.
    TableAlias,
    /// JOIN clauses.
    Join,
    /// `WHERE ...`
    Where,
    /// `GROUP BY ...`
    GroupBy,
    /// `HAVING ...`
    Having,
    /// `ORDER BY ...`
    OrderBy,
    /// `LIMIT n`
    Limit,
    /// `OFFSET n`
    Offset,
    /// MySQL `LIMIT offset, count`
    LimitOffset,
    /// `RETURNING ...`
    Returning,
    /// `FOR UPDATE`
    Lock,
    /// Bare quoted table for INSERT, UPDATE and DELETE.
    Table,
    /// `( "a", "b" )`
    InsertColumns,
    /// `VALUES ( ... )`
    InsertValues,
    /// `SET "a" = ...`
    UpdateSet,
}

const SELECT_BASE: &[Clause] = &[
    Clause::Flags,
    Clause::Columns,
    Clause::From,
    Clause::TableAlias,
    Clause::Join,
    Clause::Where,
    Clause::GroupBy,
    Clause::Having,
    Clause::OrderBy,
];
const INSERT_BASE: &[Clause] = &[Clause::Table, Clause::InsertColumns, Clause::InsertValues];
const UPDATE_BASE: &[Clause] = &[Clause::Table, Clause::UpdateSet, Clause::Where];
const DELETE_BASE: &[Clause] = &[Clause::Table, Clause::Where];

/// Clause steps a dialect appends to the base lists.
struct Extras {
    select: &'static [Clause],
    insert: &'static [Clause],
    update: &'static [Clause],
}

const fn extras(dialect: Dialect) -> Extras {
    match dialect {
        Dialect::MySql => Extras {
            select: &[Clause::LimitOffset],
            insert: &[],
            update: &[Clause::Limit],
        },
        Dialect::PgSql => Extras {
            select: &[Clause::Limit, Clause::Offset],
            insert: &[Clause::Returning],
            update: &[Clause::Returning],
        },
        Dialect::Sqlite => Extras {
            select: &[],
            insert: &[],
            update: &[],
        },
        Dialect::Generic => Extras {
            select: &[Clause::Limit, Clause::Offset],
            insert: &[],
            update: &[],
        },
    }
}

fn chain(base: &[Clause], extra: &[Clause]) -> Vec<Clause> {
    base.iter().chain(extra).copied().collect()
}

/// Ordered clause lists for all four statement kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClausePlan {
    select: Vec<Clause>,
    insert: Vec<Clause>,
    update: Vec<Clause>,
    delete: Vec<Clause>,
}

impl ClausePlan {
    /// Builds the plan for a dialect from scratch.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        let extra = extras(dialect);

        let mut select = chain(SELECT_BASE, extra.select);
        select.push(Clause::Lock);

        Self {
            select,
            insert: chain(INSERT_BASE, extra.insert),
            update: chain(UPDATE_BASE, extra.update),
            delete: DELETE_BASE.to_vec(),
        }
    }

    /// Returns the steps for one statement kind.
    #[must_use]
    pub fn clauses(&self, kind: StatementKind) -> &[Clause] {
        match kind {
            StatementKind::Select => &self.select,
            StatementKind::Insert => &self.insert,
            StatementKind::Update => &self.update,
            StatementKind::Delete => &self.delete,
        }
    }
}

impl Default for ClausePlan {
    fn default() -> Self {
        Self::for_dialect(Dialect::Generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_ends_with_lock() {
        for dialect in [Dialect::MySql, Dialect::PgSql, Dialect::Sqlite, Dialect::Generic] {
            let plan = ClausePlan::for_dialect(dialect);
            assert_eq!(plan.clauses(StatementKind::Select).last(), Some(&Clause::Lock));
        }
    }

    #[test]
    fn test_dialect_extras() {
        let mysql = ClausePlan::for_dialect(Dialect::MySql);
        assert!(mysql.clauses(StatementKind::Select).contains(&Clause::LimitOffset));
        assert!(!mysql.clauses(StatementKind::Select).contains(&Clause::Offset));
        assert_eq!(mysql.clauses(StatementKind::Update).last(), Some(&Clause::Limit));

        let pgsql = ClausePlan::for_dialect(Dialect::PgSql);
        assert_eq!(pgsql.clauses(StatementKind::Insert).last(), Some(&Clause::Returning));
        assert_eq!(pgsql.clauses(StatementKind::Update).last(), Some(&Clause::Returning));

        let sqlite = ClausePlan::for_dialect(Dialect::Sqlite);
        assert_eq!(sqlite.clauses(StatementKind::Select).len(), SELECT_BASE.len() + 1);
        assert_eq!(sqlite.clauses(StatementKind::Insert), INSERT_BASE);
    }

    #[test]
    fn test_rebuilding_does_not_accumulate() {
        let first = ClausePlan::for_dialect(Dialect::PgSql);
        let _ = ClausePlan::for_dialect(Dialect::MySql);
        let again = ClausePlan::for_dialect(Dialect::PgSql);
        assert_eq!(first, again);
    }

    #[test]
    fn test_delete_has_no_extras() {
        for dialect in [Dialect::MySql, Dialect::PgSql, Dialect::Sqlite, Dialect::Generic] {
            assert_eq!(
                ClausePlan::for_dialect(dialect).clauses(StatementKind::Delete),
                DELETE_BASE
            );
        }
    }
}
