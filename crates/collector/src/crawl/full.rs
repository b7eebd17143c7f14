use {
    super::{ListingsCrawler, RegionStats, is_access_denied},
    crate::fetcher,
    anyhow::{Context, Result},
};

impl ListingsCrawler {
    /// Re-syncs every complex of a region under one transaction. Per-complex
    /// failures are absorbed and counted; fatal errors roll the region back.
    pub async fn crawl_region_full(&self, province: &str, district: &str) -> Result<RegionStats> {
        tracing::info!(province, district, "full listings crawl");
        let mut stats = RegionStats::default();

        let district_code = self.find_district_code(province, district).await?;
        let dongs = self
            .client()
            .sub_regions(&district_code)
            .await
            .context("sub-region enumeration failed")?;

        let mut tx = self.db().0.begin().await?;
        for dong in &dongs {
            let complexes = match self.client().all_complexes_in_region(&dong.code).await {
                Ok(complexes) => complexes,
                Err(err @ fetcher::Error::AccessDenied(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(dong = %dong.name, ?err, "complex enumeration failed");
                    stats.errors += 1;
                    continue;
                }
            };
            if complexes.is_empty() {
                continue;
            }
            stats.complexes_found += complexes.len();
            tracing::info!(dong = %dong.name, complexes = complexes.len(), "crawling dong");

            for summary in &complexes {
                if let Err(err) = self
                    .crawl_complex(
                        &mut tx,
                        summary,
                        province,
                        district,
                        Some(dong.name.as_str()),
                        &mut stats,
                    )
                    .await
                {
                    if is_access_denied(&err) {
                        return Err(err);
                    }
                    stats.errors += 1;
                    tracing::error!(complex = %summary.name, ?err, "complex crawl failed");
                }
            }
        }
        tx.commit().await?;

        tracing::info!(
            province,
            district,
            complexes = stats.complexes_found,
            articles = stats.articles_saved,
            errors = stats.errors,
            "full crawl finished"
        );
        Ok(stats)
    }
}
