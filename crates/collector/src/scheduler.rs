//! Job scheduling: one sequential loop per job, so a job can never overlap
//! itself, and a tick that fires while the previous run is still going is
//! collapsed into the next one.

use {
    crate::{
        appraisal_batch::AppraisalBatch,
        arguments::Arguments,
        arguments::Region,
        comparison,
        crawl::{BatchLimits, CrawlMode, ListingsCrawler},
        database::Postgres,
        shutdown::ShutdownSignal,
        sources::{listings::ListingsClient, transactions::TransactionsClient},
        transactions_batch,
    },
    anyhow::{Context, Result},
    chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime},
    std::time::Duration,
    tokio::time::MissedTickBehavior,
};

pub struct Scheduler {
    db: Postgres,
    regions: Vec<Region>,
    listings_interval: Duration,
    listings_delay: Duration,
    appraisal_delay: Duration,
    transactions_delay: Duration,
    appraisal_at: NaiveTime,
    transactions_at: NaiveTime,
    comparison_at: NaiveTime,
    kb_concurrency: usize,
    limits: BatchLimits,
    transactions_api_key: Option<String>,
    compare_after_crawl: bool,
}

impl Scheduler {
    pub fn new(db: Postgres, args: &Arguments) -> Self {
        Self {
            db,
            regions: args.target_regions.clone(),
            listings_interval: Duration::from_secs(args.listings_interval_min * 60),
            listings_delay: args.listings_delay,
            appraisal_delay: args.appraisal_delay,
            transactions_delay: args.transactions_delay,
            appraisal_at: time_of(args.appraisal_cron_hh, args.appraisal_cron_mm),
            // transactions run in the night, the comparison rebuild after the
            // morning appraisal collection
            transactions_at: time_of(2, 0),
            comparison_at: time_of(7, 0),
            kb_concurrency: args.kb_concurrency,
            limits: BatchLimits {
                call_limit: args.batch_call_limit,
                cooldown: args.batch_cooldown,
            },
            transactions_api_key: args.transactions_api_key.clone(),
            compare_after_crawl: args.compare_after_crawl,
        }
    }

    /// Runs all job loops until the shutdown signal fires. No job starts a
    /// new invocation after the signal.
    pub async fn run(self, mut shutdown: ShutdownSignal) {
        let listings_flag = shutdown.clone();
        let appraisal_flag = shutdown.clone();
        let transactions_flag = shutdown.clone();
        let comparison_flag = shutdown.clone();

        let listings = async {
            let mut interval = tokio::time::interval(self.listings_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if listings_flag.is_shutdown() {
                    break;
                }
                if let Err(err) = self.listings_job().await {
                    tracing::error!(?err, "listings crawl job failed");
                }
            }
        };

        let appraisal = async {
            loop {
                let wait = until_next(Local::now().naive_local(), self.appraisal_at);
                tokio::time::sleep(wait).await;
                if appraisal_flag.is_shutdown() {
                    break;
                }
                if let Err(err) = self.appraisal_job().await {
                    tracing::error!(?err, "appraisal collection job failed");
                }
            }
        };

        let transactions = async {
            loop {
                let wait = until_next(Local::now().naive_local(), self.transactions_at);
                tokio::time::sleep(wait).await;
                if transactions_flag.is_shutdown() {
                    break;
                }
                if let Err(err) = self.transactions_job().await {
                    tracing::error!(?err, "transactions collection job failed");
                }
            }
        };

        let comparisons = async {
            loop {
                let wait = until_next(Local::now().naive_local(), self.comparison_at);
                tokio::time::sleep(wait).await;
                if comparison_flag.is_shutdown() {
                    break;
                }
                if let Err(err) = self.comparison_job().await {
                    tracing::error!(?err, "comparison rebuild job failed");
                }
            }
        };

        tokio::select! {
            _ = shutdown.wait() => tracing::info!("shutdown requested, stopping scheduled jobs"),
            _ = async { tokio::join!(listings, appraisal, transactions, comparisons); } => (),
        }
    }

    /// Full crawl while the complex table is empty (first run), incremental
    /// afterwards.
    pub async fn listings_job(&self) -> Result<()> {
        let client = ListingsClient::new(self.listings_delay)?;
        let crawler = ListingsCrawler::new(client, self.db.clone(), self.limits);

        let mut conn = self.db.0.acquire().await?;
        let empty = database::complexes::count(&mut conn).await? == 0;
        drop(conn);
        let mode = if empty {
            CrawlMode::Full
        } else {
            CrawlMode::Incremental
        };

        tracing::info!(?mode, regions = self.regions.len(), "listings crawl starting");
        let results = crawler.crawl_all(&self.regions, mode).await?;
        let saved: usize = results.iter().map(|(_, stats)| stats.articles_saved).sum();
        let errors: usize = results.iter().map(|(_, stats)| stats.errors).sum();
        tracing::info!(regions = results.len(), saved, errors, "listings crawl finished");

        if self.compare_after_crawl {
            comparison::update_all(&self.db).await?;
        }
        Ok(())
    }

    pub async fn appraisal_job(&self) -> Result<()> {
        AppraisalBatch::new(self.db.clone(), self.appraisal_delay, self.kb_concurrency)
            .run()
            .await?;
        Ok(())
    }

    /// Collects the current and the previous calendar month: late reports of
    /// last month keep trickling in for weeks.
    pub async fn transactions_job(&self) -> Result<()> {
        let key = self
            .transactions_api_key
            .clone()
            .context("TRANSACTIONS_API_KEY is not configured")?;
        let client = TransactionsClient::new(key, self.transactions_delay)?;
        let months = months_to_collect(Local::now().date_naive());
        transactions_batch::collect_all(&self.db, &client, &self.regions, &months).await?;
        Ok(())
    }

    pub async fn comparison_job(&self) -> Result<()> {
        comparison::update_all(&self.db).await?;
        Ok(())
    }
}

fn time_of(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Time until the next occurrence of `at`: later today if still ahead,
/// otherwise tomorrow. Recomputed after every run, so missed occurrences
/// collapse.
fn until_next(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let mut target = now.date().and_time(at);
    if target <= now {
        target = (now.date() + chrono::Duration::days(1)).and_time(at);
    }
    (target - now).to_std().unwrap_or(Duration::ZERO)
}

/// Current and previous calendar month as "YYYYMM".
pub(crate) fn months_to_collect(today: NaiveDate) -> Vec<String> {
    months_back(today, 2)
}

/// `count` months as "YYYYMM", newest first, starting with the current one.
/// Used for historical backfills.
pub(crate) fn months_back(today: NaiveDate, count: u32) -> Vec<String> {
    let mut months = Vec::new();
    let mut cursor = today;
    for _ in 0..count {
        months.push(format!("{:04}{:02}", cursor.year(), cursor.month()));
        // last day of the previous month
        cursor = cursor.with_day(1).unwrap_or(cursor) - chrono::Duration::days(1);
    }
    months
}
