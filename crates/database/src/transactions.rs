use {chrono::NaiveDate, sqlx::PgConnection};

/// One closed sale. The fingerprint (complex_id, area_sqm, floor, deal_date,
/// deal_price) is unique with nulls-equal semantics on floor, so refetching a
/// month is idempotent.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Transaction {
    pub complex_id: i64,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub deal_price: i64,
    pub deal_date: NaiveDate,
}

/// Inserts unless the fingerprint already exists. Returns whether a row was
/// written.
pub async fn insert_if_new(
    ex: &mut PgConnection,
    transaction: &Transaction,
) -> Result<bool, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO transactions (complex_id, area_sqm, floor, deal_price, deal_date)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT DO NOTHING;
    "#;
    let result = sqlx::query(QUERY)
        .bind(transaction.complex_id)
        .bind(transaction.area_sqm)
        .bind(transaction.floor)
        .bind(transaction.deal_price)
        .bind(transaction.deal_date)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RecentDeal {
    pub deal_price: i64,
    pub deal_date: NaiveDate,
}

/// Most recent deal for the complex within the area tolerance, on or after
/// the cutoff date.
pub async fn most_recent_within(
    ex: &mut PgConnection,
    complex_id: i64,
    area_sqm: f64,
    tolerance: f64,
    cutoff: NaiveDate,
) -> Result<Option<RecentDeal>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT deal_price, deal_date
FROM transactions
WHERE complex_id = $1
  AND area_sqm BETWEEN $2 - $3 AND $2 + $3
  AND deal_date >= $4
ORDER BY deal_date DESC, id DESC
LIMIT 1;
    "#;
    sqlx::query_as(QUERY)
        .bind(complex_id)
        .bind(area_sqm)
        .bind(tolerance)
        .bind(cutoff)
        .fetch_optional(ex)
        .await
}

pub async fn count_within(
    ex: &mut PgConnection,
    complex_id: i64,
    area_sqm: f64,
    tolerance: f64,
    cutoff: NaiveDate,
) -> Result<i64, sqlx::Error> {
    const QUERY: &str = r#"
SELECT COUNT(*)
FROM transactions
WHERE complex_id = $1
  AND area_sqm BETWEEN $2 - $3 AND $2 + $3
  AND deal_date >= $4;
    "#;
    sqlx::query_scalar(QUERY)
        .bind(complex_id)
        .bind(area_sqm)
        .bind(tolerance)
        .bind(cutoff)
        .fetch_one(ex)
        .await
}
