mod clients;

pub use clients::bgg::BggClient;
pub use clients::bgg_xml::{parse_collection, parse_last_played};
