use {
    clap::Parser,
    std::{fmt, net::SocketAddr, str::FromStr, time::Duration},
    url::Url,
};

#[derive(Parser, Clone)]
pub struct Arguments {
    /// Url of the Postgres store.
    #[clap(long, env = "STORE_URL", default_value = "postgresql://")]
    pub db_url: Url,

    /// Service key for the government transactions registry. Required for
    /// transactions collection.
    #[clap(long, env = "TRANSACTIONS_API_KEY")]
    pub transactions_api_key: Option<String>,

    /// Hour of the daily appraisal collection.
    #[clap(long, env = "APPRAISAL_CRON_HH", default_value = "6")]
    pub appraisal_cron_hh: u32,

    /// Minute of the daily appraisal collection.
    #[clap(long, env = "APPRAISAL_CRON_MM", default_value = "0")]
    pub appraisal_cron_mm: u32,

    /// Minutes between listings crawls.
    #[clap(long, env = "LISTINGS_INTERVAL_MIN", default_value = "150")]
    pub listings_interval_min: u64,

    /// Minimum household count for the incremental crawl. Kept as a knob but
    /// currently inert: the source no longer reports the field.
    #[clap(long, env = "MIN_HOUSEHOLDS", default_value = "200")]
    pub min_households: u32,

    /// Cooldown after hitting the api call limit, in seconds.
    #[clap(
        long,
        env = "BATCH_COOLDOWN_S",
        default_value = "600",
        value_parser = duration_from_seconds,
    )]
    pub batch_cooldown: Duration,

    /// Api calls before a batch cooldown kicks in.
    #[clap(long, env = "BATCH_CALL_LIMIT", default_value = "180")]
    pub batch_call_limit: u64,

    /// Regions to collect, as comma separated `province:district` pairs.
    #[clap(
        long,
        env = "TARGET_REGIONS",
        value_delimiter = ',',
        default_value = "서울특별시:강남구,서울특별시:서초구,서울특별시:송파구"
    )]
    pub target_regions: Vec<Region>,

    /// Minimum delay between listings requests, in seconds.
    #[clap(long, env, default_value = "1.5", value_parser = duration_from_seconds)]
    pub listings_delay: Duration,

    /// Minimum delay between appraisal requests, in seconds.
    #[clap(long, env, default_value = "1.5", value_parser = duration_from_seconds)]
    pub appraisal_delay: Duration,

    /// Minimum delay between transactions requests, in seconds.
    #[clap(long, env, default_value = "1", value_parser = duration_from_seconds)]
    pub transactions_delay: Duration,

    /// Appraisal groups collected concurrently.
    #[clap(long, env, default_value = "5")]
    pub kb_concurrency: usize,

    /// Rerun the comparison pass after each listings crawl.
    #[clap(long, env)]
    pub compare_after_crawl: bool,

    #[clap(long, env, default_value = "0.0.0.0:9589")]
    pub metrics_address: SocketAddr,

    #[clap(long, env, default_value = "info")]
    pub log_filter: String,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum Command {
    /// Run the scheduler service (the default).
    Serve,
    /// Crawl the target regions once and exit.
    CrawlListings {
        /// Force a full crawl even when the store is already populated.
        #[clap(long)]
        full: bool,
    },
    /// Collect appraisal prices once and exit.
    CollectAppraisal,
    /// Collect transactions once and exit.
    CollectTransactions {
        /// Contract month as YYYYMM; defaults to the current and previous
        /// month.
        #[clap(long, conflicts_with = "months_back")]
        month: Option<String>,
        /// Collect this many months backwards from the current one, for
        /// historical backfills.
        #[clap(long)]
        months_back: Option<u32>,
    },
    /// Rebuild all comparison rows and exit.
    RebuildComparisons,
    /// Print the most discounted active listings and exit.
    ListBargains {
        #[clap(long, default_value = "20")]
        limit: i64,
    },
}

/// A collection target, written `province:district`
/// (e.g. "서울특별시:강남구").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub province: String,
    pub district: String,
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (province, district) = s
            .split_once(':')
            .ok_or_else(|| format!("expected `province:district`, got {s:?}"))?;
        if province.is_empty() || district.is_empty() {
            return Err(format!("expected `province:district`, got {s:?}"));
        }
        Ok(Self {
            province: province.trim().to_string(),
            district: district.trim().to_string(),
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.province, self.district)
    }
}

pub fn duration_from_seconds(s: &str) -> Result<Duration, std::num::ParseFloatError> {
    s.parse::<f64>().map(Duration::from_secs_f64)
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "db_url: SECRET")?;
        writeln!(
            f,
            "transactions_api_key: {}",
            if self.transactions_api_key.is_some() {
                "SECRET"
            } else {
                "unset"
            }
        )?;
        writeln!(
            f,
            "appraisal_cron: {:02}:{:02}",
            self.appraisal_cron_hh, self.appraisal_cron_mm
        )?;
        writeln!(f, "listings_interval_min: {}", self.listings_interval_min)?;
        writeln!(f, "min_households: {}", self.min_households)?;
        writeln!(f, "batch_cooldown: {:?}", self.batch_cooldown)?;
        writeln!(f, "batch_call_limit: {}", self.batch_call_limit)?;
        writeln!(
            f,
            "target_regions: {:?}",
            self.target_regions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        )?;
        writeln!(f, "listings_delay: {:?}", self.listings_delay)?;
        writeln!(f, "appraisal_delay: {:?}", self.appraisal_delay)?;
        writeln!(f, "transactions_delay: {:?}", self.transactions_delay)?;
        writeln!(f, "kb_concurrency: {}", self.kb_concurrency)?;
        writeln!(f, "compare_after_crawl: {}", self.compare_after_crawl)?;
        writeln!(f, "metrics_address: {}", self.metrics_address)?;
        writeln!(f, "log_filter: {}", self.log_filter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parsing() {
        let region: Region = "서울특별시:강남구".parse().unwrap();
        assert_eq!(region.province, "서울특별시");
        assert_eq!(region.district, "강남구");
        assert!("서울특별시".parse::<Region>().is_err());
        assert!(":강남구".parse::<Region>().is_err());
    }

    #[test]
    fn defaults() {
        let args = Arguments::parse_from(["collector"]);
        assert_eq!(args.listings_interval_min, 150);
        assert_eq!(args.batch_cooldown, Duration::from_secs(600));
        assert_eq!(args.batch_call_limit, 180);
        assert_eq!(args.kb_concurrency, 5);
        assert_eq!(args.target_regions.len(), 3);
        assert_eq!(args.transactions_delay, Duration::from_secs(1));
        assert!(args.command.is_none());
        // secrets never leak through the config dump
        assert!(!format!("{args}").contains("postgresql"));
    }

    #[test]
    fn subcommand_parsing() {
        let args = Arguments::parse_from(["collector", "crawl-listings", "--full"]);
        assert!(matches!(
            args.command,
            Some(Command::CrawlListings { full: true })
        ));
        let args = Arguments::parse_from(["collector", "collect-transactions", "--month", "202506"]);
        assert!(matches!(
            args.command,
            Some(Command::CollectTransactions { month: Some(month), .. }) if month == "202506"
        ));
        let args = Arguments::parse_from(["collector", "collect-transactions", "--months-back", "12"]);
        assert!(matches!(
            args.command,
            Some(Command::CollectTransactions {
                months_back: Some(12),
                ..
            })
        ));
    }
}
