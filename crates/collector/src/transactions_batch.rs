//! Batch ingestion of government transaction records.

use {
    crate::{
        arguments::Region,
        database::Postgres,
        resolver::TransactionResolver,
        sources::transactions::TransactionsClient,
    },
    anyhow::{Context, Result},
    database::transactions::Transaction,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionsStats {
    pub fetched: usize,
    pub saved: usize,
    pub duplicates: usize,
    pub created: usize,
}

/// Collects one (region, month) unit of work: fetch all pages, resolve each
/// record to a complex (auto-creating when nothing matches), insert unless
/// the fingerprint already exists. One transaction per unit.
pub async fn collect_region_month(
    db: &Postgres,
    client: &TransactionsClient,
    region: &Region,
    deal_yyyymm: &str,
) -> Result<TransactionsStats> {
    let district_code = regions::district_code(&region.province, &region.district)
        .with_context(|| format!("no district code for {region}"))?;
    let records = client.fetch_all(district_code, deal_yyyymm).await?;

    let mut stats = TransactionsStats {
        fetched: records.len(),
        ..Default::default()
    };
    let mut tx = db.0.begin().await?;
    let mut resolver = TransactionResolver::new(&region.province, &region.district);
    for record in &records {
        let resolved = resolver.resolve(&mut tx, record).await?;
        if resolved.created {
            stats.created += 1;
        }
        let inserted = database::transactions::insert_if_new(
            &mut tx,
            &Transaction {
                complex_id: resolved.id,
                area_sqm: record.area_sqm,
                floor: record.floor,
                deal_price: record.deal_price,
                deal_date: record.deal_date,
            },
        )
        .await?;
        if inserted {
            stats.saved += 1;
        } else {
            stats.duplicates += 1;
        }
    }
    tx.commit().await?;

    tracing::info!(
        %region,
        deal_yyyymm,
        fetched = stats.fetched,
        saved = stats.saved,
        duplicates = stats.duplicates,
        created = stats.created,
        "transactions saved"
    );
    Ok(stats)
}

/// Runs every (region, month) combination, absorbing per-unit failures.
/// Access denial aborts the batch: the service key is bad for every unit.
pub async fn collect_all(
    db: &Postgres,
    client: &TransactionsClient,
    regions: &[Region],
    months: &[String],
) -> Result<Vec<(Region, String, TransactionsStats)>> {
    let mut results = Vec::new();
    for region in regions {
        for month in months {
            match collect_region_month(db, client, region, month).await {
                Ok(stats) => results.push((region.clone(), month.clone(), stats)),
                Err(err) if crate::crawl::is_access_denied(&err) => return Err(err),
                Err(err) => {
                    tracing::error!(%region, month, ?err, "transactions collection failed");
                    results.push((region.clone(), month.clone(), TransactionsStats::default()));
                }
            }
        }
    }
    Ok(results)
}
