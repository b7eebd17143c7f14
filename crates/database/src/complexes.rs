use sqlx::PgConnection;

/// A canonical apartment complex as stored. Created either by the listings
/// crawler (keyed by the portal's external id) or by the transactions
/// resolver's auto-create path (no external id until a later crawl claims
/// it by name).
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct Complex {
    pub id: i64,
    pub external_id: Option<String>,
    pub name: String,
    pub province: String,
    pub district: String,
    pub dong: Option<String>,
    pub address: Option<String>,
    pub area_code: Option<String>,
    pub total_units: Option<i32>,
    pub built_year: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Fields the listings crawler knows about a complex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexUpsert {
    pub external_id: String,
    pub name: String,
    pub province: String,
    pub district: String,
    pub dong: Option<String>,
    pub address: Option<String>,
    pub area_code: Option<String>,
    pub total_units: Option<i32>,
    pub built_year: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Insert-or-update keyed by the external listing id. Nullable metadata is
/// fill-only and the canonical name is never overwritten on later runs.
pub async fn upsert_by_external_id(
    ex: &mut PgConnection,
    complex: &ComplexUpsert,
) -> Result<i64, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO complexes (
    external_id, name, province, district, dong, address, area_code,
    total_units, built_year, lat, lng
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
ON CONFLICT (external_id) DO UPDATE SET
    province = EXCLUDED.province,
    district = EXCLUDED.district,
    dong = COALESCE(EXCLUDED.dong, complexes.dong),
    address = COALESCE(EXCLUDED.address, complexes.address),
    area_code = COALESCE(EXCLUDED.area_code, complexes.area_code),
    total_units = COALESCE(EXCLUDED.total_units, complexes.total_units),
    built_year = COALESCE(EXCLUDED.built_year, complexes.built_year),
    lat = COALESCE(EXCLUDED.lat, complexes.lat),
    lng = COALESCE(EXCLUDED.lng, complexes.lng),
    updated_at = now()
RETURNING id;
    "#;
    sqlx::query_scalar(QUERY)
        .bind(&complex.external_id)
        .bind(&complex.name)
        .bind(&complex.province)
        .bind(&complex.district)
        .bind(&complex.dong)
        .bind(&complex.address)
        .bind(&complex.area_code)
        .bind(complex.total_units)
        .bind(complex.built_year)
        .bind(complex.lat)
        .bind(complex.lng)
        .fetch_one(ex)
        .await
}

/// Creates a complex from transaction-registry data alone. Used by the
/// resolver when no existing complex matches under any strategy.
pub async fn insert(
    ex: &mut PgConnection,
    name: &str,
    province: &str,
    district: &str,
    dong: Option<&str>,
    area_code: Option<&str>,
    built_year: Option<i32>,
) -> Result<i64, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO complexes (name, province, district, dong, area_code, built_year)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING id;
    "#;
    sqlx::query_scalar(QUERY)
        .bind(name)
        .bind(province)
        .bind(district)
        .bind(dong)
        .bind(area_code)
        .bind(built_year)
        .fetch_one(ex)
        .await
}

pub async fn find_exact(
    ex: &mut PgConnection,
    province: &str,
    district: &str,
    name: &str,
) -> Result<Option<i64>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id FROM complexes
WHERE province = $1 AND district = $2 AND name = $3
LIMIT 1;
    "#;
    sqlx::query_scalar(QUERY)
        .bind(province)
        .bind(district)
        .bind(name)
        .fetch_optional(ex)
        .await
}

/// Case-insensitive containment of the given name in a stored name.
pub async fn find_containing(
    ex: &mut PgConnection,
    province: &str,
    district: &str,
    name: &str,
) -> Result<Option<i64>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id FROM complexes
WHERE province = $1 AND district = $2 AND name ILIKE '%' || $3 || '%'
LIMIT 1;
    "#;
    sqlx::query_scalar(QUERY)
        .bind(province)
        .bind(district)
        .bind(name)
        .fetch_optional(ex)
        .await
}

/// (id, name) of every complex in a region, for in-memory matching.
pub async fn candidates(
    ex: &mut PgConnection,
    province: &str,
    district: &str,
) -> Result<Vec<(i64, String)>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id, name FROM complexes
WHERE province = $1 AND district = $2
ORDER BY id;
    "#;
    sqlx::query_as(QUERY)
        .bind(province)
        .bind(district)
        .fetch_all(ex)
        .await
}

pub async fn count(ex: &mut PgConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM complexes;")
        .fetch_one(ex)
        .await
}

/// Complexes eligible for appraisal collection: those with a resolved
/// 10-digit area code.
pub async fn with_area_code(ex: &mut PgConnection) -> Result<Vec<Complex>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id, external_id, name, province, district, dong, address, area_code,
       total_units, built_year, lat, lng
FROM complexes
WHERE area_code IS NOT NULL
ORDER BY area_code, id;
    "#;
    sqlx::query_as(QUERY).fetch_all(ex).await
}

/// Fills profile fields that are still null; existing values are kept.
pub async fn backfill_profile(
    ex: &mut PgConnection,
    id: i64,
    total_units: Option<i32>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<(), sqlx::Error> {
    const QUERY: &str = r#"
UPDATE complexes
SET total_units = COALESCE(total_units, $2),
    lat = COALESCE(lat, $3),
    lng = COALESCE(lng, $4),
    updated_at = now()
WHERE id = $1;
    "#;
    sqlx::query(QUERY)
        .bind(id)
        .bind(total_units)
        .bind(lat)
        .bind(lng)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn fetch(ex: &mut PgConnection, id: i64) -> Result<Option<Complex>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT id, external_id, name, province, district, dong, address, area_code,
       total_units, built_year, lat, lng
FROM complexes
WHERE id = $1;
    "#;
    sqlx::query_as(QUERY).bind(id).fetch_optional(ex).await
}

#[cfg(test)]
mod tests {
    use {super::*, sqlx::Connection};

    #[tokio::test]
    #[ignore]
    async fn postgres_upsert_fills_but_never_renames() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        crate::clear_DANGER_(&mut db).await.unwrap();

        let first = ComplexUpsert {
            external_id: "881".to_string(),
            name: "개포더샵트리에".to_string(),
            province: "서울특별시".to_string(),
            district: "강남구".to_string(),
            dong: None,
            total_units: None,
            ..Default::default()
        };
        let id = upsert_by_external_id(&mut db, &first).await.unwrap();

        let second = ComplexUpsert {
            name: "다른이름".to_string(),
            dong: Some("개포동".to_string()),
            total_units: Some(232),
            ..first.clone()
        };
        let id_again = upsert_by_external_id(&mut db, &second).await.unwrap();
        assert_eq!(id, id_again);

        let row = fetch(&mut db, id).await.unwrap().unwrap();
        // name kept from the first run, nullable fields filled in
        assert_eq!(row.name, "개포더샵트리에");
        assert_eq!(row.dong.as_deref(), Some("개포동"));
        assert_eq!(row.total_units, Some(232));
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_candidate_lookup() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        crate::clear_DANGER_(&mut db).await.unwrap();

        assert_eq!(count(&mut db).await.unwrap(), 0);
        let id = insert(
            &mut db,
            "개포현대",
            "서울특별시",
            "강남구",
            Some("개포동"),
            None,
            Some(1986),
        )
        .await
        .unwrap();

        assert_eq!(
            find_exact(&mut db, "서울특별시", "강남구", "개포현대")
                .await
                .unwrap(),
            Some(id)
        );
        assert_eq!(
            find_exact(&mut db, "서울특별시", "서초구", "개포현대")
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            find_containing(&mut db, "서울특별시", "강남구", "포현")
                .await
                .unwrap(),
            Some(id)
        );
        assert_eq!(
            candidates(&mut db, "서울특별시", "강남구").await.unwrap(),
            vec![(id, "개포현대".to_string())]
        );
        assert_eq!(count(&mut db).await.unwrap(), 1);
    }
}
