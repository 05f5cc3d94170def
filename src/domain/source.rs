use super::{CollectionItem, Filters, LastPlayed};
use crate::error::Result;
use std::future::Future;

/// Where owner collections come from.
pub trait CollectionSource: Send + Sync + 'static {
    /// Fetches one owner's collection, already normalized into a sequence.
    fn fetch_collection(
        &self,
        owner: &str,
        filters: &Filters,
    ) -> impl Future<Output = Result<Vec<CollectionItem>>> + Send;
}

/// Where per-item play history comes from.
pub trait PlaysSource: Send + Sync + 'static {
    fn fetch_last_played(&self, object_id: &str)
        -> impl Future<Output = Result<LastPlayed>> + Send;
}
