use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// BGG username, or a comma-separated list of usernames
    #[arg(short, long, env = "BGG_USERNAMES")]
    pub usernames: String,

    /// JSON file with filter settings (camelCase keys), overridden by flags
    #[arg(long)]
    pub filters_file: Option<PathBuf>,

    /// Minimum personal rating (0-10)
    #[arg(long)]
    pub min_rating: Option<u8>,

    /// Personal rating upper bound (0-10)
    #[arg(long)]
    pub rating: Option<u8>,

    /// Minimum BGG community rating (0-10)
    #[arg(long)]
    pub min_bgg_rating: Option<u8>,

    /// Exact number of players the game must support
    #[arg(long)]
    pub num_players: Option<u32>,

    /// Lower bound of the player-count window
    #[arg(long)]
    pub min_players: Option<u32>,

    /// Upper bound of the player-count window
    #[arg(long)]
    pub max_players: Option<u32>,

    /// Only games the owner has rated
    #[arg(long)]
    pub rated: bool,

    /// Only games the owner has played
    #[arg(long)]
    pub played: bool,

    /// Only games the owner has commented on
    #[arg(long)]
    pub commented: bool,

    /// Keep expansions in the collection
    #[arg(long)]
    pub include_expansions: bool,

    /// Favour games that have not been played for a while
    #[arg(long)]
    pub non_recency_bias: bool,

    /// Extra rolls after the first pick
    #[arg(long, default_value_t = 0)]
    pub rerolls: u32,

    /// Print every game in the collection
    #[arg(long)]
    pub list: bool,

    /// Print picks as JSON
    #[arg(long)]
    pub json: bool,

    /// Collection endpoint
    #[arg(long, env = "BGG_COLLECTION_URL", default_value = super::DEFAULT_COLLECTION_URL)]
    pub collection_url: String,

    /// Plays endpoint
    #[arg(long, env = "BGG_PLAYS_URL", default_value = super::DEFAULT_PLAYS_URL)]
    pub plays_url: String,

    /// Attempts per collection batch before giving up
    #[arg(long, default_value_t = 5)]
    pub max_attempts: u32,

    /// Base retry delay in milliseconds, multiplied by the attempt number
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Concurrent play-history lookups
    #[arg(long, default_value_t = 5)]
    pub concurrency: usize,

    /// HTTP transport timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
