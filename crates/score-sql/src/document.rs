//! JSON query documents.
//!
//! A document describes one [`Query`] as plain JSON:
//!
//! ```json
//! {
//!   "table": "users",
//!   "columns": ["id", { "column": "name", "as": "user_name" }],
//!   "where": [
//!     { "column": "status", "op": "in", "value": ["active", "invited"] },
//!     { "raw": "deleted_at IS NULL" }
//!   ],
//!   "order": ["name", { "column": "id", "direction": "desc" }],
//!   "limit": 10
//! }
//! ```
//!
//! Values are JSON scalars; `{ "raw": "NOW()" }` is written verbatim.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as Json;

use score_sql_core::{raw, Binder, Direction, IntoCount, Operand, Query, SqlValue, Value, Where};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDocument {
    table: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    id_column: Option<String>,
    #[serde(default)]
    columns: Vec<ColumnSpec>,
    #[serde(default)]
    values: serde_json::Map<String, Json>,
    #[serde(default)]
    joins: Vec<JoinSpec>,
    #[serde(default, rename = "where")]
    criteria: Vec<CriterionSpec>,
    #[serde(default)]
    group: Vec<String>,
    #[serde(default)]
    having: Vec<CriterionSpec>,
    #[serde(default)]
    order: Vec<OrderSpec>,
    #[serde(default)]
    limit: Json,
    #[serde(default)]
    offset: Json,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    for_update: bool,
    #[serde(default)]
    returning: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Name(String),
    Aliased {
        column: String,
        #[serde(rename = "as")]
        alias: Option<String>,
    },
    Raw {
        raw: String,
        #[serde(rename = "as")]
        alias: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct JoinSpec {
    #[serde(default)]
    kind: Option<String>,
    table: String,
    #[serde(default)]
    on: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CriterionSpec {
    Predicate {
        column: String,
        op: String,
        #[serde(default)]
        value: Json,
        #[serde(default)]
        or: bool,
    },
    Raw {
        raw: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderSpec {
    Name(String),
    Directed {
        column: String,
        #[serde(default)]
        direction: Option<String>,
    },
}

impl QueryDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid query document")
    }

    /// Builds the query, using `binder` for its placeholders.
    pub fn into_query(self, binder: Binder) -> Result<Query> {
        let mut query = Query::with_binder(binder);
        query = match self.id_column {
            Some(id) => query.table_with_id(self.table, id),
            None => query.table(self.table),
        };
        if let Some(alias) = self.alias {
            query = query.alias(alias);
        }

        for column in self.columns {
            query = match column {
                ColumnSpec::Name(name) => query.column(name),
                ColumnSpec::Aliased {
                    column,
                    alias: Some(alias),
                } => query.column_as(column, alias),
                ColumnSpec::Aliased { column, alias: None } => query.column(column),
                ColumnSpec::Raw { raw, alias } => query.column_raw(raw, alias.as_deref()),
            };
        }

        for (column, value) in &self.values {
            query = query.value(column.as_str(), to_value(value).with_context(|| {
                format!("value for column '{column}'")
            })?);
        }

        for join in self.joins {
            let on = join.on.as_deref().unwrap_or_default();
            query = match join.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
                None | Some("inner") => query.join(&join.table, on),
                Some("left") => query.left_join(&join.table, on),
                Some("right") => query.right_join(&join.table, on),
                Some("cross") => query.cross_join(&join.table),
                Some(other) => bail!("unknown join kind '{other}'"),
            };
        }

        let criteria = to_criteria(self.criteria).context("in \"where\"")?;
        let having = to_criteria(self.having).context("in \"having\"")?;
        query = query.filter(|_| criteria).filter_having(|_| having);

        for column in self.group {
            query = query.group(column);
        }
        for order in self.order {
            query = match order {
                OrderSpec::Name(column) => query.order(column),
                OrderSpec::Directed { column, direction } => query.order_by(
                    column,
                    direction.as_deref().map_or(Direction::Asc, Direction::from_name),
                ),
            };
        }

        query = query.limit(count(&self.limit)).offset(count(&self.offset));
        for flag in self.flags {
            query = query.flag(flag);
        }
        if self.for_update {
            query = query.for_update();
        }
        if let Some(returning) = self.returning {
            query = query.returning(returning);
        }
        Ok(query)
    }
}

fn to_criteria(specs: Vec<CriterionSpec>) -> Result<Where> {
    let mut criteria = Where::new();
    for spec in specs {
        criteria = match spec {
            CriterionSpec::Raw { raw } => criteria.raw(raw),
            CriterionSpec::Predicate {
                column,
                op,
                value,
                or,
            } => {
                let operand = to_operand(&value)
                    .with_context(|| format!("operand for column '{column}'"))?;
                if or {
                    criteria.or_condition(&column, &op, operand)?
                } else {
                    criteria.condition(&column, &op, operand)?
                }
            }
        };
    }
    Ok(criteria)
}

fn to_operand(json: &Json) -> Result<Operand> {
    match json {
        Json::Array(items) => Ok(Operand::List(
            items.iter().map(to_value).collect::<Result<Vec<_>>>()?,
        )),
        other => Ok(Operand::Single(to_value(other)?)),
    }
}

fn to_value(json: &Json) -> Result<Value> {
    let value = match json {
        Json::Null => SqlValue::Null,
        Json::Bool(b) => SqlValue::Bool(*b),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => SqlValue::Int(i),
            (None, Some(f)) => SqlValue::Float(f),
            (None, None) => bail!("number {n} is out of range"),
        },
        Json::String(s) => SqlValue::Text(s.clone()),
        Json::Object(map) => match map.get("raw") {
            Some(Json::String(sql)) if map.len() == 1 => return Ok(raw(sql.as_str())),
            _ => bail!("objects must look like {{\"raw\": \"...\"}}"),
        },
        Json::Array(_) => bail!("nested lists are not supported"),
    };
    Ok(Value::Bind(value))
}

/// Limit and offset accept numbers or numeric strings; anything else
/// counts as absent.
fn count(json: &Json) -> Option<u64> {
    match json {
        Json::Number(n) => n.as_i64().into_count(),
        Json::String(s) => s.as_str().into_count(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_sql_core::{Builder, Dialect};

    fn compile_select(json: &str, dialect: Dialect) -> (String, Query) {
        let mut query = QueryDocument::from_json(json)
            .unwrap()
            .into_query(Binder::new())
            .unwrap();
        let sql = Builder::with_dialect(dialect).to_select(&mut query).unwrap();
        (sql, query)
    }

    #[test]
    fn test_select_document() {
        let (sql, query) = compile_select(
            r#"{
                "table": "testTable",
                "columns": [{ "column": "colTest", "as": "aliasAs" }],
                "where": [{ "column": "\"my table\".name", "op": "like", "value": "%bob%" }],
                "order": ["pKey"]
            }"#,
            Dialect::Generic,
        );
        assert_eq!(
            sql,
            "SELECT \"colTest\" AS \"aliasAs\" FROM \"testTable\" WHERE \"my table\".\"name\" LIKE :db_prep_1 ORDER BY \"pKey\" ASC"
        );
        assert_eq!(query.bindings().len(), 1);
    }

    #[test]
    fn test_limit_accepts_strings() {
        let (sql, _) = compile_select(
            r#"{ "table": "t", "limit": "5", "offset": 10 }"#,
            Dialect::PgSql,
        );
        assert_eq!(sql, "SELECT * FROM \"t\" LIMIT 5 OFFSET 10");

        let (sql, _) = compile_select(r#"{ "table": "t", "limit": "abc" }"#, Dialect::PgSql);
        assert_eq!(sql, "SELECT * FROM \"t\"");
    }

    #[test]
    fn test_values_keep_document_order() {
        let mut query = QueryDocument::from_json(
            r#"{ "table": "t", "values": { "b": 1, "a": "x", "c": { "raw": "NOW()" } } }"#,
        )
        .unwrap()
        .into_query(Binder::new())
        .unwrap();
        let sql = Builder::new().to_insert(&mut query).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"t\" ( \"b\", \"a\", \"c\" ) VALUES ( :db_prep_1, :db_prep_2, NOW() )"
        );
    }

    #[test]
    fn test_or_and_raw_criteria() {
        let (sql, _) = compile_select(
            r#"{
                "table": "t",
                "where": [
                    { "column": "a", "op": "=", "value": 1 },
                    { "column": "b", "op": "is null", "or": true },
                    { "raw": "c > 2" }
                ]
            }"#,
            Dialect::Generic,
        );
        assert_eq!(
            sql,
            "SELECT * FROM \"t\" WHERE \"a\" = :db_prep_1 OR \"b\" IS NULL AND c > 2"
        );
    }

    #[test]
    fn test_join_without_on() {
        let (sql, _) = compile_select(
            r#"{
                "table": "t",
                "joins": [
                    { "table": "u" },
                    { "kind": "left", "table": "orders AS o", "on": "o.t_id = t.id" }
                ]
            }"#,
            Dialect::PgSql,
        );
        assert_eq!(
            sql,
            "SELECT * FROM \"t\" INNER JOIN \"u\" LEFT JOIN \"orders\" \"o\" ON o.t_id = t.id"
        );
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let err = QueryDocument::from_json(
            r#"{ "table": "t", "where": [{ "column": "a", "op": "~~", "value": 1 }] }"#,
        )
        .unwrap()
        .into_query(Binder::new())
        .unwrap_err();
        assert!(format!("{err:#}").contains("unsupported relation"));
    }

    #[test]
    fn test_rejects_nested_lists() {
        assert!(to_value(&serde_json::json!([1, 2])).is_err());
        assert!(to_value(&serde_json::json!({ "raw": 1 })).is_err());
    }
}
