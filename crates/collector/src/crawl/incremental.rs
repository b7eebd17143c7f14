use {
    super::{ListingsCrawler, RegionStats, is_access_denied},
    crate::{fetcher, sources::listings::ComplexSummary},
    anyhow::Result,
    std::collections::HashMap,
};

/// What to do with a complex given the source's deal count and the stored
/// active listing count (absent when the complex is unknown to the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Deal count zero: everything still active in the store is stale.
    Deactivate,
    /// Counts agree, nothing changed.
    Skip,
    /// Counts disagree or the complex is new: fetch the full article list.
    Crawl,
}

pub(crate) fn plan(deal_count: i64, stored_active: Option<i64>) -> Action {
    if deal_count == 0 {
        Action::Deactivate
    } else if stored_active == Some(deal_count) {
        Action::Skip
    } else {
        Action::Crawl
    }
}

impl ListingsCrawler {
    /// Incremental crawl: phase 1 enumerates complex summaries (cheap),
    /// phase 2 partitions them by the deal-count change signal and only
    /// fetches article lists where something moved.
    ///
    /// A minimum-household filter used to sit between the phases; the source
    /// stopped reporting the field, so the knob is retained in configuration
    /// but nothing is filtered here.
    pub async fn crawl_region_incremental(
        &self,
        province: &str,
        district: &str,
    ) -> Result<RegionStats> {
        tracing::info!(province, district, "incremental listings crawl");
        let mut stats = RegionStats::default();

        let district_code = self.find_district_code(province, district).await?;
        let dongs = self.client().sub_regions(&district_code).await?;

        let mut all: Vec<(String, ComplexSummary)> = Vec::new();
        for dong in &dongs {
            match self.client().all_complexes_in_region(&dong.code).await {
                Ok(complexes) => {
                    all.extend(
                        complexes
                            .into_iter()
                            .map(|summary| (dong.name.clone(), summary)),
                    );
                }
                Err(err @ fetcher::Error::AccessDenied(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(dong = %dong.name, ?err, "complex enumeration failed");
                    stats.errors += 1;
                }
            }
        }
        all.retain(|(_, summary)| !summary.external_id.is_empty());
        stats.complexes_found = all.len();
        tracing::info!(complexes = all.len(), "incremental phase 1 done");

        let mut tx = self.db().0.begin().await?;

        let zero_deal: Vec<String> = all
            .iter()
            .filter(|(_, summary)| summary.deal_count.unwrap_or(0) == 0)
            .map(|(_, summary)| summary.external_id.clone())
            .collect();
        if !zero_deal.is_empty() {
            let deactivated =
                database::listings::deactivate_for_external_ids(&mut tx, &zero_deal).await?;
            stats.deactivated += deactivated;
            tracing::info!(
                complexes = zero_deal.len(),
                listings = deactivated,
                "bulk-deactivated zero-deal complexes"
            );
        }

        let nonzero: Vec<&(String, ComplexSummary)> = all
            .iter()
            .filter(|(_, summary)| summary.deal_count.unwrap_or(0) > 0)
            .collect();
        let ids: Vec<String> = nonzero
            .iter()
            .map(|(_, summary)| summary.external_id.clone())
            .collect();
        let stored: HashMap<String, i64> =
            database::listings::active_counts_by_external_id(&mut tx, &ids)
                .await?
                .into_iter()
                .collect();

        for (dong, summary) in nonzero {
            let deal_count = summary.deal_count.unwrap_or(0);
            match plan(deal_count, stored.get(&summary.external_id).copied()) {
                Action::Skip => {
                    stats.skipped_same += 1;
                    continue;
                }
                Action::Deactivate => unreachable!("zero-deal complexes were partitioned out"),
                Action::Crawl => {}
            }
            if let Err(err) = self
                .crawl_complex(
                    &mut tx,
                    summary,
                    province,
                    district,
                    Some(dong.as_str()),
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
        tx.commit().await?;

        tracing::info!(
            province,
            district,
            skipped_same = stats.skipped_same,
            crawled_articles = stats.articles_saved,
            deactivated = stats.deactivated,
            errors = stats.errors,
            "incremental crawl finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitioning() {
        // source reports 4 deals, store has 4 active: no fetch
        assert_eq!(plan(4, Some(4)), Action::Skip);
        // unknown to the store: fetch
        assert_eq!(plan(4, None), Action::Crawl);
        // counts disagree in either direction: fetch
        assert_eq!(plan(4, Some(2)), Action::Crawl);
        assert_eq!(plan(2, Some(4)), Action::Crawl);
        // nothing on the market
        assert_eq!(plan(0, Some(3)), Action::Deactivate);
        assert_eq!(plan(0, None), Action::Deactivate);
    }
}
