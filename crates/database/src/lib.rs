pub mod appraisal_prices;
pub mod comparisons;
pub mod complexes;
pub mod listing_discounts;
pub mod listings;
pub mod transactions;

use sqlx::{Executor, PgPool};

// Conventions:
//
// Query functions take an executor parameter (`ex`) instead of a pool:
// `&mut PgConnection` when they run a single statement, `&mut PgTransaction`
// when they run several that must land together. Callers own the transaction
// scope and the commit. That is what makes "upsert everything, commit once
// per region / per complex" composable in the planners.
//
// Postgres tests open a transaction, run all statements on it and never
// commit; the rollback on drop keeps parallel tests from seeing each other.

pub type PgTransaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// The names of all tables we use in the db, children before parents so they
/// can be truncated in order.
pub const ALL_TABLES: &[&str] = &[
    "comparisons",
    "listings",
    "transactions",
    "appraisal_prices",
    "complexes",
];

/// Delete all data in the database. Only used by tests.
#[allow(non_snake_case)]
pub async fn clear_DANGER_(ex: &mut PgTransaction<'_>) -> sqlx::Result<()> {
    for table in ALL_TABLES {
        ex.execute(format!("TRUNCATE {table} CASCADE;").as_str())
            .await?;
    }
    Ok(())
}

/// Like above but more ergonomic for tests that use a pool.
#[allow(non_snake_case)]
pub async fn clear_DANGER(pool: &PgPool) -> sqlx::Result<()> {
    let mut transaction = pool.begin().await?;
    clear_DANGER_(&mut transaction).await?;
    transaction.commit().await
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        sqlx::{Connection, PgConnection},
    };

    #[tokio::test]
    #[ignore]
    async fn postgres_clear() {
        let mut con = PgConnection::connect("postgresql://").await.unwrap();
        let mut con = con.begin().await.unwrap();
        clear_DANGER_(&mut con).await.unwrap();
    }
}
