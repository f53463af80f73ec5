//! # score-sql-core
//!
//! A dialect-aware SQL statement compiler.
//!
//! This crate provides:
//! - A mutable [`Query`] descriptor with a fluent, by-value API
//! - A [`Where`] criteria builder for WHERE and HAVING
//! - A [`Builder`] that compiles queries for MySQL, PostgreSQL, SQLite or
//!   a generic ANSI dialect
//! - Named placeholders handed out by a per-query [`Binder`]
//!
//! ## Compiling a statement
//!
//! ```rust
//! use score_sql_core::{Builder, Dialect, Query, SqlValue};
//!
//! let builder = Builder::with_dialect(Dialect::PgSql);
//! let mut query = Query::new()
//!     .table("users")
//!     .column_as("name", "user_name")
//!     .where_col("status").in_list(["active", "invited"])
//!     .order_desc("created_at")
//!     .limit(5)
//!     .offset(10);
//!
//! let sql = builder.to_select(&mut query).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT \"name\" AS \"user_name\" FROM \"users\" \
//!      WHERE \"status\" IN ( :db_prep_1, :db_prep_2 ) \
//!      ORDER BY \"created_at\" DESC LIMIT 5 OFFSET 10"
//! );
//! assert_eq!(
//!     query.binder().get(":db_prep_2"),
//!     Some(&SqlValue::Text(String::from("invited")))
//! );
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never reach the SQL text: every value is replaced by a
//! placeholder and kept in the query's binder. Only fragments wrapped with
//! [`raw`], raw criteria and join conditions are written verbatim.

pub mod bind;
pub mod builder;
pub mod config;
pub mod criteria;
pub mod dialect;
pub mod error;
pub mod query;
pub mod quote;
pub mod value;

pub use bind::{validate_prefix, Binder, Binding, DEFAULT_PLACEHOLDER_PREFIX};
pub use builder::{Builder, Clause, ClausePlan, StatementKind};
pub use config::{CompilerConfig, CompilerConfigBuilder};
pub use criteria::{ColumnCondition, CompareOp, Connector, Entry, Predicate, Relation, Where};
pub use dialect::Dialect;
pub use error::{CompileError, Result};
pub use query::{ColumnExpr, Direction, IntoCount, Join, JoinKind, Query, SelectColumn};
pub use quote::Quoter;
pub use value::{raw, Operand, SqlValue, ToOperand, ToSqlValue, Value};
