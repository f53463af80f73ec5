//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! fixes the identifier quote character and which extra clauses each
//! statement kind gets (see [`ClausePlan`](crate::builder::ClausePlan)).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named SQL variant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dialect {
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    PgSql,
    /// SQLite.
    Sqlite,
    /// Anything else: ANSI quoting, `LIMIT` / `OFFSET`.
    #[default]
    Generic,
}

impl Dialect {
    /// Resolves a dialect name. Unknown names fall back to
    /// [`Dialect::Generic`].
    ///
    /// ```rust
    /// use score_sql_core::Dialect;
    ///
    /// assert_eq!(Dialect::from_name("mysql"), Dialect::MySql);
    /// assert_eq!(Dialect::from_name("Postgres"), Dialect::PgSql);
    /// assert_eq!(Dialect::from_name("oracle"), Dialect::Generic);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Self::MySql,
            "pgsql" | "postgres" | "postgresql" => Self::PgSql,
            "sqlite" | "sqlite3" => Self::Sqlite,
            _ => Self::Generic,
        }
    }

    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PgSql => "pgsql",
            Self::Sqlite => "sqlite",
            Self::Generic => "generic",
        }
    }

    /// Returns the identifier quote character (`` ` `` for MySQL, `"` otherwise).
    #[must_use]
    pub const fn identifier_quote(self) -> char {
        match self {
            Self::MySql => '`',
            Self::PgSql | Self::Sqlite | Self::Generic => '"',
        }
    }

    /// Returns whether INSERT and UPDATE get a RETURNING clause.
    #[must_use]
    pub const fn supports_returning(self) -> bool {
        matches!(self, Self::PgSql)
    }

    /// Returns whether `SELECT ... FOR UPDATE` is understood.
    #[must_use]
    pub const fn supports_row_locks(self) -> bool {
        !matches!(self, Self::Sqlite)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for Dialect {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        Self::from(dialect.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names() {
        assert_eq!(Dialect::from_name("mysql"), Dialect::MySql);
        assert_eq!(Dialect::from_name("pgsql"), Dialect::PgSql);
        assert_eq!(Dialect::from_name("PostgreSQL"), Dialect::PgSql);
        assert_eq!(Dialect::from_name("sqlite"), Dialect::Sqlite);
        assert_eq!(Dialect::from_name(""), Dialect::Generic);
        assert_eq!(Dialect::from_name("oracle"), Dialect::Generic);
    }

    #[test]
    fn test_identifier_quote() {
        assert_eq!(Dialect::MySql.identifier_quote(), '`');
        assert_eq!(Dialect::PgSql.identifier_quote(), '"');
        assert_eq!(Dialect::Sqlite.identifier_quote(), '"');
        assert_eq!(Dialect::Generic.identifier_quote(), '"');
    }

    #[test]
    fn test_capabilities() {
        assert!(Dialect::PgSql.supports_returning());
        assert!(!Dialect::MySql.supports_returning());
        assert!(!Dialect::Sqlite.supports_row_locks());
        assert!(Dialect::MySql.supports_row_locks());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for dialect in [
            Dialect::MySql,
            Dialect::PgSql,
            Dialect::Sqlite,
            Dialect::Generic,
        ] {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Dialect::PgSql).unwrap();
        assert_eq!(json, "\"pgsql\"");
        let back: Dialect = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(back, Dialect::PgSql);
    }
}
