//! Dialects - one query, four renderings
//!
//! Compiles the same paged, locked lookup and an upsert-style UPDATE for
//! every supported dialect and prints the SQL with its bindings.
//!
//! Run with: cargo run --example dialects

use score_sql_core::{raw, Builder, CompileError, Dialect, Query};

// =============================================================================
// QUERIES
// =============================================================================

fn open_invoices() -> Query {
    Query::new()
        .table_with_id("invoices", "invoice_id")
        .alias("i")
        .column("i.invoice_id")
        .column_as("c.name", "client")
        .column_raw("SUM(l.amount)", Some("total"))
        .join("clients c", "c.client_id = i.client_id")
        .left_join("invoice_lines l", "l.invoice_id = i.invoice_id")
        .where_col("i.status")
        .in_list(["sent", "overdue"])
        .where_col("i.due_date")
        .lt(raw("CURRENT_DATE"))
        .group("i.invoice_id")
        .group("c.name")
        .order_desc("total")
        .limit(20)
        .offset(40)
}

fn mark_paid(invoice_id: i64) -> Query {
    Query::new()
        .table("invoices")
        .value("status", "paid")
        .value("paid_at", raw("CURRENT_TIMESTAMP"))
        .where_col("invoice_id")
        .eq(invoice_id)
        .limit(1)
        .returning("invoice_id, paid_at")
}

// =============================================================================
// MAIN
// =============================================================================

fn print(label: &str, result: Result<String, CompileError>, query: &Query) {
    match result {
        Ok(sql) => {
            println!("  {label}: {sql}");
            for binding in query.bindings() {
                println!("      {} = {}", binding.placeholder, binding.value);
            }
        }
        Err(e) => println!("  {label}: error: {e}"),
    }
}

fn main() {
    for dialect in [Dialect::MySql, Dialect::PgSql, Dialect::Sqlite, Dialect::Generic] {
        let builder = Builder::with_dialect(dialect);
        println!("{dialect}");

        let mut select = open_invoices();
        print("select", builder.to_select(&mut select), &select);

        let mut locked = open_invoices().for_update();
        print("locked", builder.to_select(&mut locked), &locked);

        let mut update = mark_paid(42);
        print("update", builder.to_update(&mut update), &update);

        println!();
    }
}
