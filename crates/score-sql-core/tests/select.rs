//! SELECT compilation tests.

mod common;

use common::{bound, select, text};
use score_sql_core::{raw, Dialect, Query, SqlValue, Where};

#[test]
fn test_select_with_alias_like_and_order() {
    let mut q = Query::new()
        .table("testTable")
        .column_as("colTest", "aliasAs")
        .where_col("\"my table\".name")
        .like("%bob%")
        .order("pKey");
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT \"colTest\" AS \"aliasAs\" FROM \"testTable\" WHERE \"my table\".\"name\" LIKE :db_prep_1 ORDER BY \"pKey\" ASC"
    );
    assert_eq!(bound(&q), vec![text("%bob%")]);
}

#[test]
fn test_distinct_first_and_for_update_last() {
    let mut q = Query::new()
        .table("t")
        .distinct()
        .where_col("id")
        .eq(1_i64)
        .limit(1)
        .for_update();
    assert_eq!(
        select(Dialect::PgSql, &mut q),
        "SELECT DISTINCT * FROM \"t\" WHERE \"id\" = :db_prep_1 LIMIT 1 FOR UPDATE"
    );
}

#[test]
fn test_full_select() {
    let mut q = Query::new()
        .table("orders")
        .alias("o")
        .column("o.id")
        .column_raw("SUM(i.amount)", Some("total"))
        .left_join("items i", "i.order_id = o.id")
        .where_col("o.status")
        .eq("paid")
        .where_col("o.created_at")
        .between("2024-01-01", "2024-12-31")
        .group("o.id")
        .having("SUM(i.amount) > 100")
        .order_desc("total")
        .limit(5)
        .offset(10);
    assert_eq!(
        select(Dialect::PgSql, &mut q),
        "SELECT \"o\".\"id\", SUM(i.amount) AS \"total\" FROM \"orders\" \"o\" \
         LEFT JOIN \"items\" \"i\" ON i.order_id = o.id \
         WHERE \"o\".\"status\" = :db_prep_1 AND \"o\".\"created_at\" BETWEEN :db_prep_2 AND :db_prep_3 \
         GROUP BY \"o\".\"id\" HAVING SUM(i.amount) > 100 \
         ORDER BY \"total\" DESC LIMIT 5 OFFSET 10"
    );
    assert_eq!(
        bound(&q),
        vec![text("paid"), text("2024-01-01"), text("2024-12-31")]
    );
}

#[test]
fn test_having_binds_after_where() {
    let mut q = Query::new()
        .table("t")
        .column("a")
        .column_raw("COUNT(*)", Some("cnt"))
        .where_col("a")
        .ne(0_i64)
        .group("a")
        .having_col("cnt")
        .gt(2_i64);
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT \"a\", COUNT(*) AS \"cnt\" FROM \"t\" WHERE \"a\" != :db_prep_1 GROUP BY \"a\" HAVING \"cnt\" > :db_prep_2"
    );
    assert_eq!(bound(&q), vec![SqlValue::Int(0), SqlValue::Int(2)]);
}

#[test]
fn test_predicate_shapes() {
    let mut q = Query::new()
        .table("t")
        .where_col("a")
        .eq(1_i64)
        .where_col("b")
        .in_list(["x", "y"])
        .where_col("c")
        .is_null()
        .or_where_col("d")
        .not_null()
        .where_col("name")
        .contain("bob");
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE \"a\" = :db_prep_1 AND \"b\" IN ( :db_prep_2, :db_prep_3 ) \
         AND \"c\" IS NULL OR \"d\" IS NOT NULL AND \"name\" LIKE :db_prep_4"
    );
    assert_eq!(q.bindings().len(), 4);
    assert_eq!(q.binder().get(":db_prep_4"), Some(&text("%bob%")));
}

#[test]
fn test_eq_with_list_degrades_to_in() {
    let mut q = Query::new().table("t").where_col("id").eq(vec![1_i64, 2, 3]);
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE \"id\" IN ( :db_prep_1, :db_prep_2, :db_prep_3 )"
    );
}

#[test]
fn test_empty_in_list_matches_nothing() {
    let mut q = Query::new()
        .table("t")
        .where_col("id")
        .in_list(Vec::<i64>::new());
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE 1 = 0"
    );
    assert!(q.bindings().is_empty());
}

#[test]
fn test_raw_fragments_and_values() {
    let mut q = Query::new()
        .table("t")
        .where_raw("and deleted_at IS NULL")
        .where_col("expires_at")
        .gt(raw("NOW()"));
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE deleted_at IS NULL AND \"expires_at\" > NOW()"
    );
    assert!(q.bindings().is_empty());
}

#[test]
fn test_keyword_conditions() {
    let mut q = Query::new()
        .table("t")
        .where_condition("id", "in", vec![1_i64, 2])
        .unwrap()
        .where_condition("price", "BETWEEN", [10_i64, 20])
        .unwrap();
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE \"id\" IN ( :db_prep_1, :db_prep_2 ) AND \"price\" BETWEEN :db_prep_3 AND :db_prep_4"
    );
}

#[test]
fn test_filter_with_prebuilt_criteria() {
    let criteria = Where::new().col("a").ge(18_i32).or_col("b").eq(true);
    let mut q = Query::new().table("t").filter(|_| criteria);
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" WHERE \"a\" >= :db_prep_1 OR \"b\" = :db_prep_2"
    );
    assert_eq!(bound(&q), vec![SqlValue::Int(18), SqlValue::Bool(true)]);
}

#[test]
fn test_binder_reuse_keeps_counting() {
    let mut q = Query::new().table("t").where_col("a").eq(1_i64);
    let first = select(Dialect::Generic, &mut q);
    assert_eq!(first, "SELECT * FROM \"t\" WHERE \"a\" = :db_prep_1");

    let second = select(Dialect::Generic, &mut q);
    assert_eq!(second, "SELECT * FROM \"t\" WHERE \"a\" = :db_prep_2");
    assert_eq!(q.bindings().len(), 2);

    q.binder_mut().reset();
    assert_eq!(select(Dialect::Generic, &mut q), first);
    assert_eq!(q.bindings().len(), 1);
}

#[test]
fn test_query_reset_clears_state() {
    let mut q = Query::new()
        .table("t")
        .column("a")
        .where_col("a")
        .eq(1_i64)
        .limit(3);
    select(Dialect::Generic, &mut q);
    q.reset();
    assert_eq!(select(Dialect::Generic, &mut q), "SELECT * FROM \"t\"");
    assert!(q.bindings().is_empty());
}

#[test]
fn test_quoted_looking_column_cannot_escape() {
    let mut q = Query::new()
        .table("t")
        .where_col("\"a\" IS NOT NULL OR \"b\"")
        .eq(1_i64);
    assert_eq!(
        select(Dialect::PgSql, &mut q),
        "SELECT * FROM \"t\" WHERE \"\"\"a\"\" IS NOT NULL OR \"\"b\"\"\" = :db_prep_1"
    );
}

#[test]
fn test_join_without_condition() {
    let mut q = Query::new().table("t").join("u", "").left_join(" orders AS o ", "o.t_id = t.id");
    assert_eq!(
        select(Dialect::Generic, &mut q),
        "SELECT * FROM \"t\" INNER JOIN \"u\" LEFT JOIN \"orders\" \"o\" ON o.t_id = t.id"
    );
}
