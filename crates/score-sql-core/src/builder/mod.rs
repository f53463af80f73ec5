//! Dialect-aware statement compiler.
//!
//! A [`Builder`] turns a [`Query`] into SQL text for one dialect. The
//! statement kinds run an ordered list of clause steps taken from a
//! [`ClausePlan`]; every step contributes one fragment or nothing.
//!
//! # Example
//!
//! ```rust
//! use score_sql_core::{Builder, Dialect, Query};
//!
//! let builder = Builder::with_dialect(Dialect::MySql);
//! let mut query = Query::new()
//!     .table("users")
//!     .value("name", "bob")
//!     .where_col("id").eq(7_i64)
//!     .limit(1);
//!
//! let sql = builder.to_update(&mut query).unwrap();
//! assert_eq!(
//!     sql,
//!     "UPDATE `users` SET `name` = :db_prep_1 WHERE `id` = :db_prep_2 LIMIT 1"
//! );
//! assert_eq!(query.bindings().len(), 2);
//! ```

mod clause;
mod criteria;
mod plan;

pub use plan::{Clause, ClausePlan, StatementKind};

use tracing::{debug, enabled, trace, Level};

use self::clause::ClauseContext;
use crate::bind::Binder;
use crate::config::CompilerConfig;
use crate::criteria::Where;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::Query;
use crate::quote::Quoter;

/// Compiles queries for one dialect.
///
/// The builder holds no per-statement state: compilation takes `&self`,
/// so one builder can serve many threads. All mutable state lives in the
/// [`Query`] and its [`Binder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    dialect: Dialect,
    quoter: Quoter,
    plan: ClausePlan,
}

impl Builder {
    /// Creates a builder for [`Dialect::Generic`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_dialect(Dialect::Generic)
    }

    /// Creates a builder for the given dialect.
    #[must_use]
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            quoter: Quoter::for_dialect(dialect),
            plan: ClausePlan::for_dialect(dialect),
        }
    }

    /// Creates a builder from a configuration.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::with_dialect(config.dialect)
    }

    /// Switches dialect. The quoter and every clause list are rebuilt
    /// from scratch.
    pub fn set_dialect(&mut self, dialect: Dialect) {
        debug!(from = %self.dialect, to = %dialect, "switching dialect");
        *self = Self::with_dialect(dialect);
    }

    /// Returns the dialect in effect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the identifier quoter in effect.
    #[must_use]
    pub const fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    /// Returns the clause plan in effect.
    #[must_use]
    pub const fn plan(&self) -> &ClausePlan {
        &self.plan
    }

    /// Compiles a SELECT statement.
    ///
    /// # Errors
    ///
    /// Fails when a clause cannot be expressed in the current dialect
    /// (`FOR UPDATE` on SQLite). The query's binder is left untouched.
    pub fn to_select(&self, query: &mut Query) -> Result<String> {
        self.compile(StatementKind::Select, query)
    }

    /// Compiles an INSERT statement from the query's value map.
    ///
    /// # Errors
    ///
    /// Same contract as [`Builder::to_select`].
    pub fn to_insert(&self, query: &mut Query) -> Result<String> {
        self.compile(StatementKind::Insert, query)
    }

    /// Compiles an UPDATE statement from the query's value map and
    /// criteria.
    ///
    /// # Errors
    ///
    /// Same contract as [`Builder::to_select`].
    pub fn to_update(&self, query: &mut Query) -> Result<String> {
        self.compile(StatementKind::Update, query)
    }

    /// Compiles a DELETE statement.
    ///
    /// # Errors
    ///
    /// Same contract as [`Builder::to_select`].
    pub fn to_delete(&self, query: &mut Query) -> Result<String> {
        self.compile(StatementKind::Delete, query)
    }

    /// Compiles any statement kind.
    ///
    /// Compilation works on a copy of the query's binder, which replaces
    /// the original only once every clause rendered.
    ///
    /// # Errors
    ///
    /// Same contract as [`Builder::to_select`].
    pub fn compile(&self, kind: StatementKind, query: &mut Query) -> Result<String> {
        let mut binder = query.binder.clone();
        let sql = self.render(kind, query, &mut binder)?;
        let before = query.binder.len();
        query.binder = binder;

        let bound = &query.binder.bindings()[before..];
        debug!(kind = %kind, dialect = %self.dialect, bindings = bound.len(), "compiled statement");
        if enabled!(Level::TRACE) {
            let values: Vec<String> = bound
                .iter()
                .map(|b| format!("{}={}", b.placeholder, b.value))
                .collect();
            trace!(%sql, bindings = %values.join(", "), "compiled sql");
        }
        Ok(sql)
    }

    fn render(&self, kind: StatementKind, query: &Query, binder: &mut Binder) -> Result<String> {
        let ctx = ClauseContext {
            dialect: self.dialect,
            quoter: &self.quoter,
            query,
        };

        let mut parts = vec![String::from(kind.keyword())];
        for step in self.plan.clauses(kind) {
            if let Some(fragment) = clause::render(*step, &ctx, binder)? {
                parts.push(fragment);
            }
        }
        Ok(parts.join(" "))
    }

    /// Renders stand-alone criteria, without the `WHERE` keyword.
    ///
    /// Pass a binder when the criteria hold bound values; it only
    /// receives them when rendering succeeds.
    ///
    /// # Errors
    ///
    /// [`CompileError::MissingBindConfiguration`](crate::CompileError::MissingBindConfiguration)
    /// when a predicate needs a placeholder and `binder` is `None`.
    pub fn build_criteria(&self, criteria: &Where, binder: Option<&mut Binder>) -> Result<String> {
        match binder {
            Some(binder) => {
                let mut scratch = binder.clone();
                let sql = criteria::render_criteria(criteria, &self.quoter, Some(&mut scratch))?;
                *binder = scratch;
                Ok(sql)
            }
            None => criteria::render_criteria(criteria, &self.quoter, None),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
