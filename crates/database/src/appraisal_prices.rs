use sqlx::PgConnection;

/// Appraisal price band for one (complex, floor-plan area). Prices are in
/// units of 10,000 KRW.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct AppraisalPrice {
    pub complex_id: i64,
    pub area_sqm: f64,
    pub price_low: Option<i64>,
    pub price_mid: Option<i64>,
    pub price_high: Option<i64>,
}

pub async fn upsert(ex: &mut PgConnection, price: &AppraisalPrice) -> Result<(), sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO appraisal_prices (complex_id, area_sqm, price_low, price_mid, price_high)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (complex_id, area_sqm) DO UPDATE SET
    price_low = EXCLUDED.price_low,
    price_mid = EXCLUDED.price_mid,
    price_high = EXCLUDED.price_high,
    updated_at = now();
    "#;
    sqlx::query(QUERY)
        .bind(price.complex_id)
        .bind(price.area_sqm)
        .bind(price.price_low)
        .bind(price.price_mid)
        .bind(price.price_high)
        .execute(ex)
        .await?;
    Ok(())
}

/// Every stored appraisal row, the driving set of the comparison pass.
pub async fn all(ex: &mut PgConnection) -> Result<Vec<AppraisalPrice>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT complex_id, area_sqm, price_low, price_mid, price_high
FROM appraisal_prices
ORDER BY complex_id, area_sqm;
    "#;
    sqlx::query_as(QUERY).fetch_all(ex).await
}

/// The appraisal row closest in area to the given size, within the
/// tolerance. An exact area match is the closest by definition.
pub async fn closest_within(
    ex: &mut PgConnection,
    complex_id: i64,
    area_sqm: f64,
    tolerance: f64,
) -> Result<Option<AppraisalPrice>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT complex_id, area_sqm, price_low, price_mid, price_high
FROM appraisal_prices
WHERE complex_id = $1
  AND area_sqm BETWEEN $2 - $3 AND $2 + $3
ORDER BY ABS(area_sqm - $2)
LIMIT 1;
    "#;
    sqlx::query_as(QUERY)
        .bind(complex_id)
        .bind(area_sqm)
        .bind(tolerance)
        .fetch_optional(ex)
        .await
}

pub async fn for_complex(
    ex: &mut PgConnection,
    complex_id: i64,
) -> Result<Vec<AppraisalPrice>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT complex_id, area_sqm, price_low, price_mid, price_high
FROM appraisal_prices
WHERE complex_id = $1
ORDER BY area_sqm;
    "#;
    sqlx::query_as(QUERY).bind(complex_id).fetch_all(ex).await
}

#[cfg(test)]
mod tests {
    use {super::*, sqlx::Connection};

    #[tokio::test]
    #[ignore]
    async fn postgres_upsert_advances_prices() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        crate::clear_DANGER_(&mut db).await.unwrap();

        let complex_id = crate::complexes::insert(
            &mut db,
            "래미안대치팰리스",
            "서울특별시",
            "강남구",
            Some("대치동"),
            Some("1168010600"),
            Some(2015),
        )
        .await
        .unwrap();

        let price = AppraisalPrice {
            complex_id,
            area_sqm: 84.97,
            price_low: Some(220000),
            price_mid: Some(250000),
            price_high: Some(270000),
        };
        upsert(&mut db, &price).await.unwrap();
        upsert(
            &mut db,
            &AppraisalPrice {
                price_mid: Some(255000),
                ..price.clone()
            },
        )
        .await
        .unwrap();

        let rows = for_complex(&mut db, complex_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price_mid, Some(255000));
        assert_eq!(all(&mut db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_closest_within_tolerance() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        crate::clear_DANGER_(&mut db).await.unwrap();

        let complex_id = crate::complexes::insert(
            &mut db,
            "래미안대치팰리스",
            "서울특별시",
            "강남구",
            None,
            None,
            None,
        )
        .await
        .unwrap();
        for area in [59.99, 84.97, 114.68] {
            upsert(
                &mut db,
                &AppraisalPrice {
                    complex_id,
                    area_sqm: area,
                    price_low: None,
                    price_mid: Some(250000),
                    price_high: None,
                },
            )
            .await
            .unwrap();
        }

        // a listing at 85.0 belongs to the 84.97 size class
        let hit = closest_within(&mut db, complex_id, 85.0, 1.0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.area_sqm, 84.97);
        // nothing within 1.0 of 80.0
        assert!(closest_within(&mut db, complex_id, 80.0, 1.0)
            .await
            .unwrap()
            .is_none());
    }
}
