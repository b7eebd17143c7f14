use sqlx::PgConnection;

/// Read-only projection: an active listing joined with the appraisal
/// midpoint of its size class. Not materialized; the canonical discount
/// metric is the per (complex, area) `comparisons` table, this view serves
/// asking-price screening.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ListingDiscount {
    pub external_article_id: String,
    pub complex_id: i64,
    pub complex_name: String,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub asking_price: i64,
    pub appraisal_mid: i64,
    pub discount_rate: f64,
}

/// Active listings with an appraisal midpoint within the area tolerance,
/// most discounted first. Listings whose asking price failed to parse
/// (stored as 0) are excluded.
pub async fn fetch(
    ex: &mut PgConnection,
    tolerance: f64,
    limit: i64,
) -> Result<Vec<ListingDiscount>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT l.external_article_id,
       l.complex_id,
       c.name AS complex_name,
       l.area_sqm,
       l.floor,
       l.asking_price,
       ap.price_mid AS appraisal_mid,
       ROUND((ap.price_mid - l.asking_price)::numeric / ap.price_mid * 100, 2)::float8
           AS discount_rate
FROM listings l
JOIN complexes c ON c.id = l.complex_id
JOIN LATERAL (
    SELECT price_mid
    FROM appraisal_prices
    WHERE complex_id = l.complex_id
      AND area_sqm BETWEEN l.area_sqm - $1 AND l.area_sqm + $1
      AND price_mid IS NOT NULL
    ORDER BY ABS(area_sqm - l.area_sqm)
    LIMIT 1
) ap ON TRUE
WHERE l.is_active AND l.asking_price > 0
ORDER BY discount_rate DESC
LIMIT $2;
    "#;
    sqlx::query_as(QUERY)
        .bind(tolerance)
        .bind(limit)
        .fetch_all(ex)
        .await
}
