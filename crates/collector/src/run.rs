use {
    crate::{
        appraisal_batch::AppraisalBatch,
        arguments::{Arguments, Command},
        comparison,
        crawl::{BatchLimits, CrawlMode, ListingsCrawler},
        database::Postgres,
        scheduler::{Scheduler, months_back, months_to_collect},
        shutdown::ShutdownSignal,
        sources::{listings::ListingsClient, transactions::TransactionsClient},
        transactions_batch,
    },
    anyhow::{Context, Result},
    chrono::Local,
    clap::Parser,
};

/// Entry point: parses arguments, sets up tracing and dispatches. Exits
/// non-zero on configuration, auth or fatal collection errors.
pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    observe::initialize(&args.log_filter);
    tracing::info!("running collector with arguments:\n{args}");
    if let Err(err) = run(args).await {
        tracing::error!(?err, "fatal error");
        std::process::exit(1);
    }
}

pub async fn run(args: Arguments) -> Result<()> {
    let db = Postgres::new(args.db_url.as_str())
        .await
        .context("failed to connect to the store")?;
    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => serve(args, db).await,
        Command::CrawlListings { full } => crawl_listings_once(&args, db, full).await,
        Command::CollectAppraisal => {
            let stats = AppraisalBatch::new(db, args.appraisal_delay, args.kb_concurrency)
                .run()
                .await?;
            println!(
                "appraisal: {} complexes, {} matched, {} prices saved, \
                 {} match failures, {} fetch failures, {} errors",
                stats.total_complexes,
                stats.matched,
                stats.prices_saved,
                stats.match_failures,
                stats.fetch_failures,
                stats.errors,
            );
            Ok(())
        }
        Command::CollectTransactions { month, months_back } => {
            collect_transactions_once(&args, db, month, months_back).await
        }
        Command::RebuildComparisons => {
            let stats = comparison::update_all(&db).await?;
            println!(
                "comparisons: {} updated, {} skipped",
                stats.updated, stats.skipped
            );
            Ok(())
        }
        Command::ListBargains { limit } => {
            let mut conn = db.0.acquire().await?;
            let bargains = database::listing_discounts::fetch(
                &mut conn,
                comparison::APPRAISAL_LOOKUP_TOLERANCE,
                limit,
            )
            .await?;
            for bargain in &bargains {
                println!(
                    "{:>6.2}%  {} {:.1}㎡ {}  asking {} vs appraisal {}",
                    bargain.discount_rate,
                    bargain.complex_name,
                    bargain.area_sqm,
                    bargain
                        .floor
                        .map(|floor| format!("{floor}F"))
                        .unwrap_or_default(),
                    bargain.asking_price,
                    bargain.appraisal_mid,
                );
            }
            Ok(())
        }
    }
}

/// The long-running service: metrics endpoint, table-size gauges and the job
/// scheduler, shut down together on SIGINT/SIGTERM.
async fn serve(args: Arguments, db: Postgres) -> Result<()> {
    let shutdown = ShutdownSignal::on_os_signal();

    let metrics_address = args.metrics_address;
    tokio::task::spawn(async move {
        if let Err(err) = observe::metrics::serve(metrics_address).await {
            tracing::error!(?err, "metrics server exited");
        }
    });
    tokio::task::spawn(crate::database::database_metrics(db.clone()));

    Scheduler::new(db, &args).run(shutdown).await;
    Ok(())
}

async fn crawl_listings_once(args: &Arguments, db: Postgres, full: bool) -> Result<()> {
    let client = ListingsClient::new(args.listings_delay)?;
    let crawler = ListingsCrawler::new(
        client,
        db.clone(),
        BatchLimits {
            call_limit: args.batch_call_limit,
            cooldown: args.batch_cooldown,
        },
    );
    let mode = if full {
        CrawlMode::Full
    } else {
        let mut conn = db.0.acquire().await?;
        let empty = database::complexes::count(&mut conn).await? == 0;
        drop(conn);
        if empty {
            CrawlMode::Full
        } else {
            CrawlMode::Incremental
        }
    };
    let results = crawler.crawl_all(&args.target_regions, mode).await?;
    for (region, stats) in &results {
        println!(
            "{region}: {} complexes, {} articles saved, {} unchanged, \
             {} deactivated, {} errors",
            stats.complexes_found,
            stats.articles_saved,
            stats.skipped_same,
            stats.deactivated,
            stats.errors,
        );
    }
    Ok(())
}

async fn collect_transactions_once(
    args: &Arguments,
    db: Postgres,
    month: Option<String>,
    backfill: Option<u32>,
) -> Result<()> {
    let key = args
        .transactions_api_key
        .clone()
        .context("TRANSACTIONS_API_KEY is not configured")?;
    let client = TransactionsClient::new(key, args.transactions_delay)?;
    let months = match (month, backfill) {
        (Some(month), _) => vec![month],
        (None, Some(count)) => months_back(Local::now().date_naive(), count),
        (None, None) => months_to_collect(Local::now().date_naive()),
    };
    let results = transactions_batch::collect_all(&db, &client, &args.target_regions, &months).await?;
    for (region, month, stats) in &results {
        println!(
            "{region} {month}: fetched {}, saved {}, duplicates {}, auto-created {}",
            stats.fetched, stats.saved, stats.duplicates, stats.created,
        );
    }
    Ok(())
}
