#![allow(dead_code)]

use score_sql_core::{Builder, Dialect, Query, SqlValue};

pub fn builder(dialect: Dialect) -> Builder {
    Builder::with_dialect(dialect)
}

pub fn select(dialect: Dialect, query: &mut Query) -> String {
    builder(dialect)
        .to_select(query)
        .unwrap_or_else(|e| panic!("Failed to compile SELECT for {dialect}: {e}"))
}

pub fn insert(dialect: Dialect, query: &mut Query) -> String {
    builder(dialect)
        .to_insert(query)
        .unwrap_or_else(|e| panic!("Failed to compile INSERT for {dialect}: {e}"))
}

pub fn update(dialect: Dialect, query: &mut Query) -> String {
    builder(dialect)
        .to_update(query)
        .unwrap_or_else(|e| panic!("Failed to compile UPDATE for {dialect}: {e}"))
}

pub fn delete(dialect: Dialect, query: &mut Query) -> String {
    builder(dialect)
        .to_delete(query)
        .unwrap_or_else(|e| panic!("Failed to compile DELETE for {dialect}: {e}"))
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

/// Bound values in placeholder order.
pub fn bound(query: &Query) -> Vec<SqlValue> {
    query.binder().values()
}
