//! Derivation of the row-counting statement for a paged query.

const ORDER_BY_LOWER: &str = "order by";
const ORDER_BY_UPPER: &str = "ORDER BY";

/// Build `select count(1) from (<inner>) tmp` for `sql`.
///
/// Ordering does not change the count, so the text is cut at an
/// `order by` / `ORDER BY` token when one is present. Only those two exact
/// spellings are recognised; a mixed-case clause such as `Order By` stays
/// inside the subquery. When both spellings occur, the cut is made at the
/// upper-case one.
///
/// The cut must not remove any `?` placeholder: the count statement is bound
/// with the same positional values as `sql`.
pub fn derive_count_sql(sql: &str) -> String {
    format!("select count(1) from ({}) tmp", strip_order_by(sql))
}

fn strip_order_by(sql: &str) -> &str {
    let mut inner = sql;
    if let Some(pos) = sql.find(ORDER_BY_LOWER) {
        inner = &sql[..pos];
    }
    if let Some(pos) = sql.find(ORDER_BY_UPPER) {
        inner = &sql[..pos];
    }
    inner
}
