use {chrono::NaiveDate, sqlx::PgConnection};

/// An active sale article as reported by the listings portal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingUpsert {
    pub external_article_id: String,
    pub complex_id: i64,
    pub building: Option<String>,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub asking_price: i64,
    pub registered_at: Option<NaiveDate>,
}

/// Insert-or-update keyed by the external article id. Seeing an article again
/// reactivates it and refreshes the asking price.
pub async fn upsert(ex: &mut PgConnection, listing: &ListingUpsert) -> Result<(), sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO listings (
    external_article_id, complex_id, building, area_sqm, floor,
    asking_price, registered_at, is_active
)
VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
ON CONFLICT (external_article_id) DO UPDATE SET
    asking_price = EXCLUDED.asking_price,
    area_sqm = EXCLUDED.area_sqm,
    floor = COALESCE(EXCLUDED.floor, listings.floor),
    building = COALESCE(EXCLUDED.building, listings.building),
    registered_at = COALESCE(EXCLUDED.registered_at, listings.registered_at),
    is_active = TRUE,
    updated_at = now();
    "#;
    sqlx::query(QUERY)
        .bind(&listing.external_article_id)
        .bind(listing.complex_id)
        .bind(&listing.building)
        .bind(listing.area_sqm)
        .bind(listing.floor)
        .bind(listing.asking_price)
        .bind(listing.registered_at)
        .execute(ex)
        .await?;
    Ok(())
}

/// Deactivates every active listing of the complex whose article id was not
/// observed in the latest crawl. Returns the number of rows deactivated.
pub async fn deactivate_missing(
    ex: &mut PgConnection,
    complex_id: i64,
    observed: &[String],
) -> Result<u64, sqlx::Error> {
    const QUERY: &str = r#"
UPDATE listings
SET is_active = FALSE, updated_at = now()
WHERE complex_id = $1
  AND is_active
  AND NOT (external_article_id = ANY($2));
    "#;
    let result = sqlx::query(QUERY)
        .bind(complex_id)
        .bind(observed)
        .execute(ex)
        .await?;
    Ok(result.rows_affected())
}

/// Bulk-deactivates all active listings of the complexes with the given
/// external ids. Used when the source reports a deal count of zero.
pub async fn deactivate_for_external_ids(
    ex: &mut PgConnection,
    external_ids: &[String],
) -> Result<u64, sqlx::Error> {
    const QUERY: &str = r#"
UPDATE listings
SET is_active = FALSE, updated_at = now()
WHERE is_active
  AND complex_id IN (SELECT id FROM complexes WHERE external_id = ANY($1));
    "#;
    let result = sqlx::query(QUERY).bind(external_ids).execute(ex).await?;
    Ok(result.rows_affected())
}

/// Active listing counts per external complex id. Complexes unknown to the
/// store are absent from the result.
pub async fn active_counts_by_external_id(
    ex: &mut PgConnection,
    external_ids: &[String],
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT c.external_id, COUNT(l.id)
FROM complexes c
LEFT JOIN listings l ON l.complex_id = c.id AND l.is_active
WHERE c.external_id = ANY($1)
GROUP BY c.external_id;
    "#;
    sqlx::query_as(QUERY).bind(external_ids).fetch_all(ex).await
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Listing {
    pub external_article_id: String,
    pub complex_id: i64,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub asking_price: i64,
    pub is_active: bool,
}

pub async fn for_complex(
    ex: &mut PgConnection,
    complex_id: i64,
) -> Result<Vec<Listing>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT external_article_id, complex_id, area_sqm, floor, asking_price, is_active
FROM listings
WHERE complex_id = $1
ORDER BY external_article_id;
    "#;
    sqlx::query_as(QUERY).bind(complex_id).fetch_all(ex).await
}

#[cfg(test)]
mod tests {
    use {super::*, sqlx::Connection};

    fn listing(article: &str, complex_id: i64, price: i64) -> ListingUpsert {
        ListingUpsert {
            external_article_id: article.to_string(),
            complex_id,
            area_sqm: 84.97,
            floor: Some(12),
            asking_price: price,
            ..Default::default()
        }
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_upsert_and_deactivate_flow() {
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

        upsert(&mut db, &listing("A1", complex_id, 240000))
            .await
            .unwrap();
        upsert(&mut db, &listing("A2", complex_id, 235000))
            .await
            .unwrap();

        // second crawl only sees A1 at a new price
        upsert(&mut db, &listing("A1", complex_id, 238000))
            .await
            .unwrap();
        let gone = deactivate_missing(&mut db, complex_id, &["A1".to_string()])
            .await
            .unwrap();
        assert_eq!(gone, 1);

        let rows = for_complex(&mut db, complex_id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_active && rows[0].asking_price == 238000);
        assert!(!rows[1].is_active);

        // reappearing reactivates
        upsert(&mut db, &listing("A2", complex_id, 230000))
            .await
            .unwrap();
        let rows = for_complex(&mut db, complex_id).await.unwrap();
        assert!(rows[1].is_active && rows[1].asking_price == 230000);
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_bulk_deactivation_and_counts() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        crate::clear_DANGER_(&mut db).await.unwrap();

        let complex_id = crate::complexes::upsert_by_external_id(
            &mut db,
            &crate::complexes::ComplexUpsert {
                external_id: "881".to_string(),
                name: "개포더샵트리에".to_string(),
                province: "서울특별시".to_string(),
                district: "강남구".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        upsert(&mut db, &listing("A1", complex_id, 240000))
            .await
            .unwrap();
        upsert(&mut db, &listing("A2", complex_id, 235000))
            .await
            .unwrap();

        let counts = active_counts_by_external_id(&mut db, &["881".to_string(), "999".to_string()])
            .await
            .unwrap();
        assert_eq!(counts, vec![("881".to_string(), 2)]);

        let gone = deactivate_for_external_ids(&mut db, &["881".to_string()])
            .await
            .unwrap();
        assert_eq!(gone, 2);
        let counts = active_counts_by_external_id(&mut db, &["881".to_string()])
            .await
            .unwrap();
        assert_eq!(counts, vec![("881".to_string(), 0)]);
    }
}
