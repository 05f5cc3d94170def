use crate::config::cli::Args;
use crate::domain::Filters;
use crate::error::Result;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod cli;

pub const DEFAULT_COLLECTION_URL: &str = "https://boardgamegeek.com/xmlapi2/collection";
pub const DEFAULT_PLAYS_URL: &str = "https://boardgamegeek.com/xmlapi2/plays";

/// Knobs of the fetch/enrich pipeline.
#[derive(Debug, Clone)]
pub struct PickerSettings {
    pub collection_url: String,
    pub plays_url: String,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub enrichment_concurrency: usize,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            collection_url: DEFAULT_COLLECTION_URL.to_string(),
            plays_url: DEFAULT_PLAYS_URL.to_string(),
            max_attempts: 5,
            retry_delay: Duration::from_secs(1),
            enrichment_concurrency: 5,
        }
    }
}

pub struct Config {
    pub args: Args,
    pub settings: PickerSettings,
    pub filters: Filters,
    pub http_client: Client,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let base = match &args.filters_file {
            Some(path) => load_filters(path)?,
            None => Filters::default(),
        };
        let filters = apply_flags(base, &args);
        filters.validate()?;

        let settings = PickerSettings {
            collection_url: args.collection_url.clone(),
            plays_url: args.plays_url.clone(),
            max_attempts: args.max_attempts.max(1),
            retry_delay: Duration::from_millis(args.retry_delay_ms),
            enrichment_concurrency: args.concurrency.max(1),
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(args.request_timeout_secs))
            .user_agent(concat!("gamepicker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            args,
            settings,
            filters,
            http_client,
        })
    }
}

pub fn load_filters(path: &Path) -> Result<Filters> {
    let filters: Filters = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    info!("Loaded filters from {}", path.display());
    Ok(filters)
}

/// Command-line flags win over whatever the filters file set.
fn apply_flags(mut filters: Filters, args: &Args) -> Filters {
    filters.min_rating = args.min_rating.or(filters.min_rating);
    filters.rating = args.rating.or(filters.rating);
    filters.min_bgg_rating = args.min_bgg_rating.or(filters.min_bgg_rating);
    filters.num_players = args.num_players.or(filters.num_players);
    filters.min_player_count = args.min_players.or(filters.min_player_count);
    filters.max_player_count = args.max_players.or(filters.max_player_count);
    filters.rated |= args.rated;
    filters.played |= args.played;
    filters.commented |= args.commented;
    if args.include_expansions {
        filters.hide_expansions = false;
    }
    filters.non_recency_bias |= args.non_recency_bias;
    filters
}
