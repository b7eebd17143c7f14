use {
    sqlx::{PgConnection, PgPool},
    std::time::Duration,
};

#[derive(Clone)]
pub struct Postgres(pub PgPool);

impl Postgres {
    pub async fn new(url: &str) -> sqlx::Result<Self> {
        Ok(Self(PgPool::connect(url).await?))
    }

    async fn update_table_rows_metric(&self) -> sqlx::Result<()> {
        let metrics = Metrics::get();
        let mut ex = self.0.acquire().await?;
        for &table in database::ALL_TABLES {
            let count = count_rows(&mut ex, table).await?;
            metrics.table_rows.with_label_values(&[table]).set(count);
        }
        Ok(())
    }
}

async fn count_rows(ex: &mut PgConnection, table: &str) -> sqlx::Result<i64> {
    let query = format!("SELECT COUNT(*) FROM {table};");
    sqlx::query_scalar(&query).fetch_one(ex).await
}

#[derive(prometheus_metric_storage::MetricStorage)]
struct Metrics {
    /// Number of rows in db tables.
    #[metric(labels("table"))]
    table_rows: prometheus::IntGaugeVec,
}

impl Metrics {
    fn get() -> &'static Self {
        Metrics::instance(observe::metrics::get_storage_registry()).unwrap()
    }
}

pub async fn database_metrics(db: Postgres) -> ! {
    loop {
        if let Err(err) = db.update_table_rows_metric().await {
            tracing::error!(?err, "failed to update table rows metric");
        }
        tokio::time::sleep(Duration::from_secs(60)).await;
    }
}
