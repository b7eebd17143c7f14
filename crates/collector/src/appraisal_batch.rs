//! Batch collection of appraisal prices, grouped by area code.
//!
//! The expensive call is `complexes_by_area`: one request returns every
//! complex of a legal dong, so the batch groups eligible complexes by their
//! 10-digit area code and issues that call exactly once per group. Groups run
//! concurrently behind a semaphore; each group task owns its own client (so
//! throttles don't serialize groups) and its own store session, committing
//! per complex to bound transaction size. Grouping by area code also keeps
//! concurrent sessions from contending on the same rows.

use {
    crate::{
        crawl::is_access_denied,
        database::Postgres,
        fetcher,
        sources::appraisal::{AppraisalClient, match_complex},
    },
    anyhow::Result,
    database::{appraisal_prices::AppraisalPrice, complexes::Complex},
    futures::future::join_all,
    itertools::Itertools,
    std::{sync::Arc, time::Duration},
    tokio::sync::Semaphore,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppraisalStats {
    pub total_complexes: usize,
    pub matched: usize,
    pub prices_saved: usize,
    pub match_failures: usize,
    pub fetch_failures: usize,
    pub errors: usize,
}

impl AppraisalStats {
    fn merge(&mut self, other: &AppraisalStats) {
        self.total_complexes += other.total_complexes;
        self.matched += other.matched;
        self.prices_saved += other.prices_saved;
        self.match_failures += other.match_failures;
        self.fetch_failures += other.fetch_failures;
        self.errors += other.errors;
    }
}

pub struct AppraisalBatch {
    db: Postgres,
    delay: Duration,
    concurrency: usize,
}

impl AppraisalBatch {
    pub fn new(db: Postgres, delay: Duration, concurrency: usize) -> Self {
        Self {
            db,
            delay,
            concurrency,
        }
    }

    /// Collects appraisal prices for every complex with a known area code.
    pub async fn run(&self) -> Result<AppraisalStats> {
        let mut conn = self.db.0.acquire().await?;
        let eligible = database::complexes::with_area_code(&mut conn).await?;
        drop(conn);

        let groups: Vec<(String, Vec<Complex>)> = eligible
            .into_iter()
            .into_group_map_by(|complex| complex.area_code.clone().unwrap_or_default())
            .into_iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .collect();
        tracing::info!(
            groups = groups.len(),
            concurrency = self.concurrency,
            "appraisal batch starting"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let tasks = groups.into_iter().map(|(area_code, group)| {
            let semaphore = semaphore.clone();
            let db = self.db.clone();
            let delay = self.delay;
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                collect_group(db, delay, &area_code, group).await
            })
        });

        let mut stats = AppraisalStats::default();
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(Ok(group_stats)) => stats.merge(&group_stats),
                Ok(Err(err)) => {
                    if is_access_denied(&err) {
                        return Err(err);
                    }
                    tracing::error!(?err, "appraisal group failed");
                    stats.errors += 1;
                }
                Err(err) => {
                    tracing::error!(?err, "appraisal group task panicked");
                    stats.errors += 1;
                }
            }
        }

        tracing::info!(
            total = stats.total_complexes,
            matched = stats.matched,
            prices = stats.prices_saved,
            match_failures = stats.match_failures,
            fetch_failures = stats.fetch_failures,
            errors = stats.errors,
            "appraisal batch finished"
        );
        Ok(stats)
    }
}

/// Processes one area-code group: one complex-list call, then per complex a
/// match, the price fetch and a per-complex commit.
async fn collect_group(
    db: Postgres,
    delay: Duration,
    area_code: &str,
    group: Vec<Complex>,
) -> Result<AppraisalStats> {
    let client = AppraisalClient::new(delay)?;
    let mut stats = AppraisalStats {
        total_complexes: group.len(),
        ..Default::default()
    };

    let kb_complexes = client.complexes_by_area(area_code).await?;
    if kb_complexes.is_empty() {
        tracing::warn!(area_code, "no complexes known to the appraisal source");
        stats.match_failures = group.len();
        return Ok(stats);
    }

    for complex in group {
        let Some(kb_id) = match_complex(&complex.name, &kb_complexes).and_then(|kb| kb.id) else {
            tracing::warn!(complex = %complex.name, area_code, "no appraisal match");
            stats.match_failures += 1;
            continue;
        };
        stats.matched += 1;

        let prices = match client.all_prices(kb_id).await {
            Ok(prices) if prices.is_empty() => {
                stats.fetch_failures += 1;
                continue;
            }
            Ok(prices) => prices,
            Err(err @ fetcher::Error::AccessDenied(_)) => return Err(err.into()),
            Err(err) => {
                tracing::warn!(complex = %complex.name, kb_id, ?err, "price fetch failed");
                stats.fetch_failures += 1;
                continue;
            }
        };

        let mut tx = db.0.begin().await?;
        for price in &prices {
            database::appraisal_prices::upsert(
                &mut tx,
                &AppraisalPrice {
                    complex_id: complex.id,
                    area_sqm: price.area_sqm,
                    price_low: price.price_low,
                    price_mid: Some(price.price_mid),
                    price_high: price.price_high,
                },
            )
            .await?;
            stats.prices_saved += 1;
        }
        backfill_profile(&mut tx, &client, &complex, kb_id).await?;
        tx.commit().await?;

        tracing::debug!(
            complex = %complex.name,
            kb_id,
            prices = prices.len(),
            "appraisal prices saved"
        );
    }
    Ok(stats)
}

/// Fills complex metadata the listings source did not provide, from the
/// appraisal source's brief endpoint. Fill-only; fetch failures are ignored.
async fn backfill_profile(
    ex: &mut sqlx::PgConnection,
    client: &AppraisalClient,
    complex: &Complex,
    kb_id: i64,
) -> Result<()> {
    if complex.total_units.is_some() && complex.lat.is_some() && complex.lng.is_some() {
        return Ok(());
    }
    let brief = match client.complex_brief(kb_id).await {
        Ok(Some(brief)) => brief,
        Ok(None) => return Ok(()),
        Err(err @ fetcher::Error::AccessDenied(_)) => return Err(err.into()),
        Err(err) => {
            tracing::debug!(kb_id, ?err, "brief fetch failed");
            return Ok(());
        }
    };
    database::complexes::backfill_profile(
        ex,
        complex.id,
        brief.total_units.and_then(|units| i32::try_from(units).ok()),
        brief.lat,
        brief.lng,
    )
    .await?;
    Ok(())
}
