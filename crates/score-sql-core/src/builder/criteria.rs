//! Criteria rendering for WHERE and HAVING.

use crate::bind::Binder;
use crate::criteria::{Entry, Predicate, Relation, Where};
use crate::error::{CompileError, Result};
use crate::quote::Quoter;
use crate::value::Value;

/// Renders one value: raw text verbatim, anything else as a placeholder.
pub(crate) fn render_value(
    value: &Value,
    column: &str,
    binder: Option<&mut Binder>,
) -> Result<String> {
    match value {
        Value::Raw(sql) => Ok(sql.clone()),
        Value::Bind(v) => binder
            .map(|b| b.prepare(v.clone()))
            .ok_or_else(|| CompileError::MissingBindConfiguration {
                column: String::from(column),
            }),
    }
}

fn render_list(
    values: &[Value],
    column: &str,
    mut binder: Option<&mut Binder>,
) -> Result<String> {
    let tokens = values
        .iter()
        .map(|v| render_value(v, column, binder.as_deref_mut()))
        .collect::<Result<Vec<_>>>()?;
    Ok(tokens.join(", "))
}

fn render_predicate(
    predicate: &Predicate,
    quoter: &Quoter,
    mut binder: Option<&mut Binder>,
) -> Result<String> {
    let column = quoter.quote(&predicate.column);
    let name = predicate.column.as_str();

    let sql = match &predicate.relation {
        Relation::Compare(op, value) => {
            format!("{column} {op} {}", render_value(value, name, binder)?)
        }
        Relation::Like(value) => format!("{column} LIKE {}", render_value(value, name, binder)?),
        Relation::In(values) if values.is_empty() => String::from("1 = 0"),
        Relation::NotIn(values) if values.is_empty() => String::from("1 = 1"),
        Relation::In(values) => format!("{column} IN ( {} )", render_list(values, name, binder)?),
        Relation::NotIn(values) => {
            format!("{column} NOT IN ( {} )", render_list(values, name, binder)?)
        }
        Relation::Between(low, high) => {
            let low = render_value(low, name, binder.as_deref_mut())?;
            let high = render_value(high, name, binder)?;
            format!("{column} BETWEEN {low} AND {high}")
        }
        Relation::IsNull => format!("{column} IS NULL"),
        Relation::IsNotNull => format!("{column} IS NOT NULL"),
    };
    Ok(sql)
}

/// Strips a leading `AND`/`OR` keyword from a raw fragment.
fn trim_connector(sql: &str) -> &str {
    let trimmed = sql.trim();
    for keyword in ["and ", "or "] {
        let head = trimmed.get(..keyword.len());
        if head.is_some_and(|h| h.eq_ignore_ascii_case(keyword)) {
            return trimmed[keyword.len()..].trim_start();
        }
    }
    trimmed
}

/// Renders the entries of a criteria list, joined by their connectors,
/// without a leading keyword. Returns an empty string when nothing
/// produced text.
pub(crate) fn render_criteria(
    criteria: &Where,
    quoter: &Quoter,
    mut binder: Option<&mut Binder>,
) -> Result<String> {
    let mut sql = String::new();
    for entry in criteria.entries() {
        let (connector, fragment) = match entry {
            Entry::Predicate(p) => (
                p.connector.keyword(),
                render_predicate(p, quoter, binder.as_deref_mut())?,
            ),
            Entry::Raw(raw) => ("AND", String::from(trim_connector(raw))),
        };
        if fragment.is_empty() {
            continue;
        }
        if !sql.is_empty() {
            sql.push(' ');
            sql.push_str(connector);
            sql.push(' ');
        }
        sql.push_str(&fragment);
    }
    Ok(sql)
}
