//! Clause rendering.
//!
//! Each step returns `None` when the query has nothing for it, so the
//! statement is the space-joined list of the fragments that exist.

use super::criteria::{render_criteria, render_value};
use super::plan::{Clause, StatementKind};
use crate::bind::Binder;
use crate::dialect::Dialect;
use crate::error::{CompileError, Result};
use crate::query::{ColumnExpr, Query, SelectColumn};
use crate::quote::Quoter;

/// What every clause step can read.
pub(crate) struct ClauseContext<'a> {
    pub dialect: Dialect,
    pub quoter: &'a Quoter,
    pub query: &'a Query,
}

impl ClauseContext<'_> {
    fn quote(&self, identifier: &str) -> String {
        self.quoter.quote(identifier)
    }

    fn limit(&self) -> Option<u64> {
        self.query.limit.filter(|n| *n > 0)
    }

    fn offset(&self) -> Option<u64> {
        Some(self.query.offset).filter(|n| *n > 0)
    }

    fn select_column(&self, column: &SelectColumn) -> String {
        let expr = match &column.expr {
            ColumnExpr::Ident(name) => self.quote(name),
            ColumnExpr::Raw(sql) => sql.clone(),
        };
        match &column.alias {
            Some(alias) => format!("{expr} AS {}", self.quote(alias)),
            None => expr,
        }
    }
}

fn require_values(query: &Query, statement: StatementKind) -> Result<()> {
    if query.values.is_empty() {
        return Err(CompileError::MissingValues { statement });
    }
    Ok(())
}

fn non_empty(sql: String) -> Option<String> {
    if sql.is_empty() {
        None
    } else {
        Some(sql)
    }
}

/// Renders one clause step.
pub(crate) fn render(
    clause: Clause,
    ctx: &ClauseContext<'_>,
    binder: &mut Binder,
) -> Result<Option<String>> {
    let query = ctx.query;

    let sql = match clause {
        Clause::Flags => non_empty(query.select_flags.join(" ")),
        Clause::Columns => {
            if query.columns.is_empty() {
                Some(String::from("*"))
            } else {
                let columns: Vec<String> =
                    query.columns.iter().map(|c| ctx.select_column(c)).collect();
                Some(columns.join(", "))
            }
        }
        Clause::From => Some(format!("FROM {}", ctx.quote(&query.table))),
        Clause::TableAlias => query.table_alias.as_deref().map(|a| ctx.quote(a)),
        Clause::Table => Some(ctx.quote(&query.table)),
        Clause::Join => {
            let joins: Vec<String> = query
                .joins
                .iter()
                .map(|join| {
                    let mut sql = format!("{} {}", join.kind.keyword(), ctx.quote(&join.table));
                    if let Some(alias) = &join.alias {
                        sql.push(' ');
                        sql.push_str(&ctx.quote(alias));
                    }
                    if let Some(on) = &join.on {
                        sql.push_str(" ON ");
                        sql.push_str(on);
                    }
                    sql
                })
                .collect();
            non_empty(joins.join(" "))
        }
        Clause::Where => {
            non_empty(render_criteria(&query.criteria, ctx.quoter, Some(&mut *binder))?)
                .map(|sql| format!("WHERE {sql}"))
        }
        Clause::GroupBy => {
            non_empty(ctx.quoter.quote_all(&query.group).join(", "))
                .map(|sql| format!("GROUP BY {sql}"))
        }
        Clause::Having => {
            non_empty(render_criteria(&query.having, ctx.quoter, Some(&mut *binder))?)
                .map(|sql| format!("HAVING {sql}"))
        }
        Clause::OrderBy => {
            let order: Vec<String> = query
                .order
                .iter()
                .map(|(column, direction)| {
                    format!("{} {}", ctx.quote(column), direction.keyword())
                })
                .collect();
            non_empty(order.join(", ")).map(|sql| format!("ORDER BY {sql}"))
        }
        Clause::Limit => ctx.limit().map(|n| format!("LIMIT {n}")),
        Clause::Offset => ctx.offset().map(|n| format!("OFFSET {n}")),
        Clause::LimitOffset => ctx.limit().map(|n| match ctx.offset() {
            Some(offset) => format!("LIMIT {offset}, {n}"),
            None => format!("LIMIT {n}"),
        }),
        Clause::Returning => query
            .returning
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| format!("RETURNING {r}")),
        Clause::Lock => {
            if !query.for_update {
                None
            } else if ctx.dialect.supports_row_locks() {
                Some(String::from("FOR UPDATE"))
            } else {
                return Err(CompileError::UnimplementedClause {
                    clause: "FOR UPDATE",
                    dialect: ctx.dialect,
                });
            }
        }
        Clause::InsertColumns => {
            require_values(query, StatementKind::Insert)?;
            let columns = ctx
                .quoter
                .quote_all(query.values.iter().map(|(column, _)| column));
            non_empty(columns.join(", ")).map(|sql| format!("( {sql} )"))
        }
        Clause::InsertValues => {
            let tokens = query
                .values
                .iter()
                .map(|(column, value)| render_value(value, column, Some(&mut *binder)))
                .collect::<Result<Vec<_>>>()?;
            non_empty(tokens.join(", ")).map(|sql| format!("VALUES ( {sql} )"))
        }
        Clause::UpdateSet => {
            require_values(query, StatementKind::Update)?;
            let pairs = query
                .values
                .iter()
                .map(|(column, value)| {
                    let token = render_value(value, column, Some(&mut *binder))?;
                    Ok(format!("{} = {token}", ctx.quote(column)))
                })
                .collect::<Result<Vec<_>>>()?;
            non_empty(pairs.join(", ")).map(|sql| format!("SET {sql}"))
        }
    };
    Ok(sql)
}
