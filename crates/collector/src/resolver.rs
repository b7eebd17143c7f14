//! Resolution of external records onto canonical complex rows.
//!
//! Listings records carry the portal's stable complex id, so their path is a
//! plain keyed upsert (see `crawl`). Transaction records only carry a noisy
//! name, so they walk a ladder of matching strategies and, as a last resort,
//! create the complex themselves: the transactions feed must not be blocked
//! by missing listings data.

use {
    crate::sources::transactions::DealRecord,
    sqlx::PgConnection,
    std::collections::HashMap,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedComplex {
    pub id: i64,
    pub created: bool,
}

/// Resolves transaction records within one (province, district) batch.
///
/// Results are memoized on the raw source name, and the candidate list for
/// the in-memory strategies is fetched at most once per batch.
pub struct TransactionResolver {
    province: String,
    district: String,
    cache: HashMap<String, i64>,
    candidates: Option<Vec<(i64, String)>>,
}

impl TransactionResolver {
    pub fn new(province: &str, district: &str) -> Self {
        Self {
            province: province.to_string(),
            district: district.to_string(),
            cache: HashMap::new(),
            candidates: None,
        }
    }

    pub async fn resolve(
        &mut self,
        ex: &mut PgConnection,
        record: &DealRecord,
    ) -> sqlx::Result<ResolvedComplex> {
        if let Some(&id) = self.cache.get(&record.apt_name) {
            return Ok(ResolvedComplex { id, created: false });
        }

        if let Some(id) = self.lookup(ex, &record.apt_name).await? {
            self.cache.insert(record.apt_name.clone(), id);
            return Ok(ResolvedComplex { id, created: false });
        }

        let dong = (!record.umd_name.is_empty()).then_some(record.umd_name.as_str());
        let area_code = regions::area_code(&self.province, &self.district, dong);
        let id = database::complexes::insert(
            ex,
            &record.apt_name,
            &self.province,
            &self.district,
            dong,
            area_code.as_deref(),
            record.build_year,
        )
        .await?;
        tracing::info!(
            id,
            name = %record.apt_name,
            province = %self.province,
            district = %self.district,
            "auto-created complex from transaction record"
        );
        self.cache.insert(record.apt_name.clone(), id);
        Ok(ResolvedComplex { id, created: true })
    }

    /// The ladder: exact name, case-insensitive containment (both in SQL),
    /// then the in-memory waterfall over the region's candidate list.
    async fn lookup(&mut self, ex: &mut PgConnection, name: &str) -> sqlx::Result<Option<i64>> {
        if let Some(id) =
            database::complexes::find_exact(ex, &self.province, &self.district, name).await?
        {
            return Ok(Some(id));
        }
        if let Some(id) =
            database::complexes::find_containing(ex, &self.province, &self.district, name).await?
        {
            return Ok(Some(id));
        }
        if self.candidates.is_none() {
            self.candidates =
                Some(database::complexes::candidates(ex, &self.province, &self.district).await?);
        }
        let candidates = self.candidates.as_deref().unwrap_or_default();
        Ok(matching::waterfall_match(name, candidates))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::NaiveDate, sqlx::Connection};

    fn record(name: &str) -> DealRecord {
        DealRecord {
            apt_name: name.to_string(),
            apt_dong: String::new(),
            umd_name: "개포동".to_string(),
            jibun: "653".to_string(),
            area_sqm: 84.97,
            floor: Some(9),
            deal_price: 230000,
            deal_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            build_year: Some(1986),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_waterfall_then_auto_create() {
        let mut db = sqlx::PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();
        database::clear_DANGER_(&mut db).await.unwrap();

        let existing = database::complexes::insert(
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

        let mut resolver = TransactionResolver::new("서울특별시", "강남구");

        // noisy source name resolves onto the existing row
        let resolved = resolver.resolve(&mut db, &record("개포현대(200동)")).await.unwrap();
        assert_eq!(resolved.id, existing);
        assert!(!resolved.created);

        // nothing matches: the complex is created from the record itself
        let resolved = resolver.resolve(&mut db, &record("신축그랑블")).await.unwrap();
        assert!(resolved.created);
        let created = database::complexes::fetch(&mut db, resolved.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.name, "신축그랑블");
        assert_eq!(created.dong.as_deref(), Some("개포동"));
        assert_eq!(created.built_year, Some(1986));
        // dong-level area code resolved from the registry
        assert_eq!(created.area_code.as_deref(), Some("1168010300"));

        // memoized: the same name resolves without another store lookup
        let again = resolver.resolve(&mut db, &record("신축그랑블")).await.unwrap();
        assert_eq!(again.id, resolved.id);
        assert!(!again.created);
    }
}
