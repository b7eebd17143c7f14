//! Joins appraisal midpoints with the latest transactions into discount
//! metrics.

use {
    crate::database::Postgres,
    anyhow::Result,
    chrono::{Duration, Utc},
    database::comparisons::Comparison,
};

/// How far back a deal still counts as "recent".
pub const RECENT_DEAL_DAYS: i64 = 90;
/// Transactions within this many m² of the appraisal area belong to the same
/// size class.
pub const AREA_TOLERANCE: f64 = 3.0;
/// Tighter tolerance when looking an appraisal row up for a single listing.
pub const APPRAISAL_LOOKUP_TOLERANCE: f64 = 1.0;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ComparisonStats {
    pub updated: usize,
    pub skipped: usize,
}

/// Percent below appraisal, rounded to two decimals. Positive means the deal
/// closed under the appraisal midpoint.
pub fn discount_rate(appraisal_mid: i64, deal_price: i64) -> f64 {
    let rate = (appraisal_mid - deal_price) as f64 / appraisal_mid as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// One pass over every appraisal row: rows without a midpoint or without a
/// recent deal in the same size class are skipped, everything else gets its
/// comparison row rewritten. The pass is dominated by the appraisal
/// cardinality, so no incremental variant exists.
pub async fn update_all(db: &Postgres) -> Result<ComparisonStats> {
    let mut stats = ComparisonStats::default();
    let cutoff = Utc::now().date_naive() - Duration::days(RECENT_DEAL_DAYS);

    let mut tx = db.0.begin().await?;
    let appraisals = database::appraisal_prices::all(&mut tx).await?;
    for appraisal in appraisals {
        let Some(mid) = appraisal.price_mid else {
            stats.skipped += 1;
            continue;
        };
        let Some(recent) = database::transactions::most_recent_within(
            &mut tx,
            appraisal.complex_id,
            appraisal.area_sqm,
            AREA_TOLERANCE,
            cutoff,
        )
        .await?
        else {
            stats.skipped += 1;
            continue;
        };
        let deal_count = database::transactions::count_within(
            &mut tx,
            appraisal.complex_id,
            appraisal.area_sqm,
            AREA_TOLERANCE,
            cutoff,
        )
        .await?;

        database::comparisons::upsert(
            &mut tx,
            &Comparison {
                complex_id: appraisal.complex_id,
                area_sqm: appraisal.area_sqm,
                appraisal_mid: mid,
                recent_deal_price: recent.deal_price,
                recent_deal_date: recent.deal_date,
                discount_rate: discount_rate(mid, recent.deal_price),
                deal_count_3m: i32::try_from(deal_count).unwrap_or(i32::MAX),
            },
        )
        .await?;
        stats.updated += 1;
    }
    tx.commit().await?;

    tracing::info!(
        updated = stats.updated,
        skipped = stats.skipped,
        "comparison pass finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        database::{appraisal_prices::AppraisalPrice, transactions::Transaction},
    };

    #[tokio::test]
    #[ignore]
    async fn postgres_update_all_computes_discounts() {
        let db = Postgres::new("postgresql://").await.unwrap();
        database::clear_DANGER(&db.0).await.unwrap();

        let mut conn = db.0.acquire().await.unwrap();
        let complex_id = database::complexes::insert(
            &mut conn,
            "래미안대치팰리스",
            "서울특별시",
            "강남구",
            None,
            None,
            None,
        )
        .await
        .unwrap();
        database::appraisal_prices::upsert(
            &mut conn,
            &AppraisalPrice {
                complex_id,
                area_sqm: 84.97,
                price_low: Some(220000),
                price_mid: Some(250000),
                price_high: Some(270000),
            },
        )
        .await
        .unwrap();
        // a second size class with no recent deal: skipped
        database::appraisal_prices::upsert(
            &mut conn,
            &AppraisalPrice {
                complex_id,
                area_sqm: 59.99,
                price_low: None,
                price_mid: Some(180000),
                price_high: None,
            },
        )
        .await
        .unwrap();
        database::transactions::insert_if_new(
            &mut conn,
            &Transaction {
                complex_id,
                area_sqm: 84.97,
                floor: Some(12),
                deal_price: 230000,
                deal_date: Utc::now().date_naive() - Duration::days(30),
            },
        )
        .await
        .unwrap();
        drop(conn);

        let stats = update_all(&db).await.unwrap();
        assert_eq!(
            stats,
            ComparisonStats {
                updated: 1,
                skipped: 1
            }
        );

        let mut conn = db.0.acquire().await.unwrap();
        let row = database::comparisons::fetch(&mut conn, complex_id, 84.97)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.appraisal_mid, 250000);
        assert_eq!(row.recent_deal_price, 230000);
        assert_eq!(row.discount_rate, 8.0);
        assert_eq!(row.deal_count_3m, 1);
    }

    #[test]
    fn discount_formula() {
        // (250000 - 230000) / 250000 * 100 = 8.00
        assert_eq!(discount_rate(250000, 230000), 8.0);
        // deal above appraisal: negative, not a bargain
        assert_eq!(discount_rate(250000, 260000), -4.0);
        // rounding to two decimals
        assert_eq!(discount_rate(300000, 290001), 3.33);
        assert_eq!(discount_rate(3, 2), 33.33);
    }
}
