use {chrono::NaiveDate, sqlx::PgConnection};

/// Discount metrics joining the appraisal midpoint with the latest deal for
/// one (complex, area class). Rewritten on every comparison pass.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comparison {
    pub complex_id: i64,
    pub area_sqm: f64,
    pub appraisal_mid: i64,
    pub recent_deal_price: i64,
    pub recent_deal_date: NaiveDate,
    pub discount_rate: f64,
    pub deal_count_3m: i32,
}

pub async fn upsert(ex: &mut PgConnection, comparison: &Comparison) -> Result<(), sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO comparisons (
    complex_id, area_sqm, appraisal_mid, recent_deal_price,
    recent_deal_date, discount_rate, deal_count_3m
)
VALUES ($1, $2, $3, $4, $5, $6, $7)
ON CONFLICT (complex_id, area_sqm) DO UPDATE SET
    appraisal_mid = EXCLUDED.appraisal_mid,
    recent_deal_price = EXCLUDED.recent_deal_price,
    recent_deal_date = EXCLUDED.recent_deal_date,
    discount_rate = EXCLUDED.discount_rate,
    deal_count_3m = EXCLUDED.deal_count_3m,
    compared_at = now();
    "#;
    sqlx::query(QUERY)
        .bind(comparison.complex_id)
        .bind(comparison.area_sqm)
        .bind(comparison.appraisal_mid)
        .bind(comparison.recent_deal_price)
        .bind(comparison.recent_deal_date)
        .bind(comparison.discount_rate)
        .bind(comparison.deal_count_3m)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn fetch(
    ex: &mut PgConnection,
    complex_id: i64,
    area_sqm: f64,
) -> Result<Option<Comparison>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT complex_id, area_sqm, appraisal_mid, recent_deal_price,
       recent_deal_date, discount_rate, deal_count_3m
FROM comparisons
WHERE complex_id = $1 AND area_sqm = $2;
    "#;
    sqlx::query_as(QUERY)
        .bind(complex_id)
        .bind(area_sqm)
        .fetch_optional(ex)
        .await
}

#[cfg(test)]
mod tests {
    use {super::*, sqlx::Connection};

    #[tokio::test]
    #[ignore]
    async fn postgres_comparison_roundtrip() {
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

        let comparison = Comparison {
            complex_id,
            area_sqm: 84.97,
            appraisal_mid: 250000,
            recent_deal_price: 230000,
            recent_deal_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            discount_rate: 8.0,
            deal_count_3m: 3,
        };
        upsert(&mut db, &comparison).await.unwrap();
        assert_eq!(
            fetch(&mut db, complex_id, 84.97).await.unwrap(),
            Some(comparison.clone())
        );

        // rewrite on the next pass
        upsert(
            &mut db,
            &Comparison {
                recent_deal_price: 225000,
                discount_rate: 10.0,
                ..comparison
            },
        )
        .await
        .unwrap();
        let stored = fetch(&mut db, complex_id, 84.97).await.unwrap().unwrap();
        assert_eq!(stored.recent_deal_price, 225000);
        assert_eq!(stored.discount_rate, 10.0);
    }
}
