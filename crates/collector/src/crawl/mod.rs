//! Listings crawl planners.
//!
//! The full crawl walks every complex of every dong of a region and re-syncs
//! its article list. The incremental crawl reuses the cheap complex-summary
//! enumeration and only fetches articles where the source's reported deal
//! count disagrees with the stored active listing count; in steady state that
//! is equivalent to a full crawl, and any drift is corrected by the next full
//! one.

pub mod full;
pub mod incremental;

use {
    crate::{
        arguments::Region,
        database::Postgres,
        fetcher,
        sources::listings::{self, Article, ComplexSummary, ListingsClient},
    },
    anyhow::{Context, Result},
    database::{complexes::ComplexUpsert, listings::ListingUpsert},
    sqlx::PgConnection,
    std::time::Duration,
};

/// Pause between regions when the call limit has not been hit; evades
/// source-side blocking on long batches.
pub const INTER_REGION_PAUSE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    Full,
    Incremental,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegionStats {
    pub complexes_found: usize,
    pub articles_found: usize,
    pub articles_saved: usize,
    pub skipped_same: usize,
    pub deactivated: u64,
    pub errors: usize,
}

/// Cooldown policy for multi-region batches.
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub call_limit: u64,
    pub cooldown: Duration,
}

pub struct ListingsCrawler {
    client: ListingsClient,
    db: Postgres,
    limits: BatchLimits,
}

impl ListingsCrawler {
    pub fn new(client: ListingsClient, db: Postgres, limits: BatchLimits) -> Self {
        Self { client, db, limits }
    }

    pub(crate) fn client(&self) -> &ListingsClient {
        &self.client
    }

    pub(crate) fn db(&self) -> &Postgres {
        &self.db
    }

    /// Crawls all configured regions sequentially. Per-region failures are
    /// absorbed into the stats; access denial aborts the whole batch since no
    /// further request can succeed either.
    pub async fn crawl_all(
        &self,
        regions: &[Region],
        mode: CrawlMode,
    ) -> Result<Vec<(Region, RegionStats)>> {
        let mut results = Vec::new();
        for (index, region) in regions.iter().enumerate() {
            if self.client.api_call_count() >= self.limits.call_limit {
                tracing::info!(
                    calls = self.client.api_call_count(),
                    limit = self.limits.call_limit,
                    cooldown = ?self.limits.cooldown,
                    "api call limit reached, cooling down"
                );
                tokio::time::sleep(self.limits.cooldown).await;
                self.client.reset_api_call_count();
            } else if index > 0 {
                tokio::time::sleep(INTER_REGION_PAUSE).await;
            }

            let result = match mode {
                CrawlMode::Full => {
                    self.crawl_region_full(&region.province, &region.district)
                        .await
                }
                CrawlMode::Incremental => {
                    self.crawl_region_incremental(&region.province, &region.district)
                        .await
                }
            };
            match result {
                Ok(stats) => {
                    let metrics = Metrics::get();
                    metrics.articles_saved.inc_by(stats.articles_saved as u64);
                    metrics.errors.inc_by(stats.errors as u64);
                    results.push((region.clone(), stats));
                }
                Err(err) if is_access_denied(&err) => return Err(err),
                Err(err) => {
                    tracing::error!(%region, ?err, "region crawl failed");
                    Metrics::get().errors.inc();
                    results.push((
                        region.clone(),
                        RegionStats {
                            errors: 1,
                            ..Default::default()
                        },
                    ));
                }
            }
        }
        Ok(results)
    }

    /// Resolves a district name to its region code by scanning the
    /// province's sub-regions.
    pub(crate) async fn find_district_code(
        &self,
        province: &str,
        district: &str,
    ) -> Result<String> {
        let province_code = regions::province_code(province)
            .with_context(|| format!("unknown province {province}"))?;
        let districts = self.client.sub_regions(province_code).await?;
        districts
            .iter()
            .find(|region| region.name.contains(district) || district.contains(&region.name))
            .map(|region| region.code.clone())
            .with_context(|| format!("district {district} not found under {province}"))
    }

    /// Syncs one complex: upserts the complex row, upserts every article and
    /// deactivates the listings that disappeared.
    pub(crate) async fn crawl_complex(
        &self,
        ex: &mut PgConnection,
        summary: &ComplexSummary,
        province: &str,
        district: &str,
        dong_name: Option<&str>,
        stats: &mut RegionStats,
    ) -> Result<()> {
        if summary.external_id.is_empty() {
            return Ok(());
        }
        let upsert = complex_upsert(summary, province, district, dong_name);
        let complex_id = database::complexes::upsert_by_external_id(ex, &upsert).await?;

        let articles = self
            .client
            .all_articles_for_complex(&summary.external_id)
            .await?;
        stats.articles_found += articles.len();

        let mut observed = Vec::new();
        for article in &articles {
            let Some(listing) = listing_upsert(article, complex_id) else {
                continue;
            };
            observed.push(listing.external_article_id.clone());
            database::listings::upsert(ex, &listing).await?;
            stats.articles_saved += 1;
        }
        stats.deactivated += database::listings::deactivate_missing(ex, complex_id, &observed).await?;

        tracing::debug!(
            complex = %summary.name,
            articles = articles.len(),
            "complex synced"
        );
        Ok(())
    }
}

/// Maps a portal complex summary to the store row. The dong name from the
/// sub-region traversal wins over the summary's own region address, and the
/// 10-digit area code is resolved from the registry while we still know the
/// dong.
fn complex_upsert(
    summary: &ComplexSummary,
    province: &str,
    district: &str,
    dong_name: Option<&str>,
) -> ComplexUpsert {
    let dong = dong_name
        .map(str::to_string)
        .or_else(|| (!summary.dong.is_empty()).then(|| summary.dong.clone()));
    let area_code = dong
        .as_deref()
        .and_then(|dong| regions::area_code(province, district, Some(dong)));
    ComplexUpsert {
        external_id: summary.external_id.clone(),
        name: summary.name.clone(),
        province: province.to_string(),
        district: district.to_string(),
        dong,
        address: (!summary.address.is_empty()).then(|| summary.address.clone()),
        area_code,
        total_units: summary.total_units.and_then(|units| i32::try_from(units).ok()),
        built_year: summary
            .use_approve_ymd
            .as_deref()
            .and_then(listings::parse_built_year),
        lat: summary.lat,
        lng: summary.lon,
    }
}

/// Maps an article to a listing row. Articles without an id or a usable area
/// are skipped; the exclusive area wins over the supply area.
fn listing_upsert(article: &Article, complex_id: i64) -> Option<ListingUpsert> {
    if article.external_id.is_empty() {
        return None;
    }
    let area_sqm = article.area_exclusive.or(article.area_supply)?;
    Some(ListingUpsert {
        external_article_id: article.external_id.clone(),
        complex_id,
        building: (!article.building_name.is_empty()).then(|| article.building_name.clone()),
        area_sqm,
        floor: listings::parse_floor(&article.floor_info),
        asking_price: listings::parse_price(&article.price_text),
        registered_at: listings::parse_ymd(&article.confirm_ymd),
    })
}

#[derive(prometheus_metric_storage::MetricStorage)]
#[metric(subsystem = "listings_crawl")]
struct Metrics {
    /// Listings saved across all crawls.
    articles_saved: prometheus::IntCounter,
    /// Absorbed per-unit crawl failures.
    errors: prometheus::IntCounter,
}

impl Metrics {
    fn get() -> &'static Self {
        Metrics::instance(observe::metrics::get_storage_registry()).unwrap()
    }
}

pub(crate) fn is_access_denied(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<fetcher::Error>(),
        Some(fetcher::Error::AccessDenied(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ComplexSummary {
        ComplexSummary {
            external_id: "881".to_string(),
            name: "래미안대치팰리스".to_string(),
            deal_count: Some(4),
            total_units: Some(1608),
            use_approve_ymd: Some("20150901".to_string()),
            lat: Some(37.499),
            lon: Some(127.061),
            dong: "대치동".to_string(),
            address: "대치동 1027".to_string(),
        }
    }

    #[test]
    fn complex_upsert_resolves_area_code_from_dong() {
        let upsert = complex_upsert(&summary(), "서울특별시", "강남구", Some("대치동"));
        assert_eq!(upsert.area_code.as_deref(), Some("1168010600"));
        assert_eq!(upsert.built_year, Some(2015));
        assert_eq!(upsert.total_units, Some(1608));
        assert_eq!(upsert.dong.as_deref(), Some("대치동"));
    }

    #[test]
    fn complex_upsert_falls_back_to_summary_dong() {
        let upsert = complex_upsert(&summary(), "서울특별시", "강남구", None);
        assert_eq!(upsert.dong.as_deref(), Some("대치동"));
        assert_eq!(upsert.area_code.as_deref(), Some("1168010600"));
    }

    #[test]
    fn listing_upsert_mapping() {
        let article = Article {
            external_id: "2501".to_string(),
            price_text: "24억".to_string(),
            area_supply: Some(113.56),
            area_exclusive: Some(84.97),
            floor_info: "12/33".to_string(),
            building_name: "101동".to_string(),
            confirm_ymd: "26.02.14".to_string(),
            ..Default::default()
        };
        let listing = listing_upsert(&article, 7).unwrap();
        assert_eq!(listing.complex_id, 7);
        assert_eq!(listing.asking_price, 240000);
        assert_eq!(listing.area_sqm, 84.97);
        assert_eq!(listing.floor, Some(12));
        assert_eq!(listing.building.as_deref(), Some("101동"));

        // no id or no area: not persistable
        assert!(listing_upsert(&Article::default(), 7).is_none());
        let no_area = Article {
            external_id: "2502".to_string(),
            ..Default::default()
        };
        assert!(listing_upsert(&no_area, 7).is_none());
    }
}
