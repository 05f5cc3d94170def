use crate::config::PickerSettings;
use crate::domain::{CollectionItem, CycleToken, LastPlayed, PlaysSource};
use crate::error::{PickerError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Attaches last-played dates to collection items with a fixed pool of
/// workers, each pulling the next pending item until the queue is empty.
pub struct Enricher<P> {
    source: Arc<P>,
    concurrency: usize,
}

impl<P: PlaysSource> Enricher<P> {
    pub fn new(source: Arc<P>, settings: &PickerSettings) -> Self {
        Self {
            source,
            concurrency: settings.enrichment_concurrency.max(1),
        }
    }

    pub async fn enrich(
        &self,
        mut items: Vec<CollectionItem>,
        cycle: &CycleToken,
    ) -> Result<Vec<CollectionItem>> {
        if items.is_empty() {
            return Ok(items);
        }

        let ids: Arc<Vec<String>> = Arc::new(items.iter().map(|i| i.object_id.clone()).collect());
        let next = Arc::new(AtomicUsize::new(0));
        let workers = self.concurrency.min(ids.len());

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let source = Arc::clone(&self.source);
            let ids = Arc::clone(&ids);
            let next = Arc::clone(&next);
            let cycle = cycle.clone();
            pool.spawn(async move {
                let mut done = Vec::new();
                while cycle.is_current() {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(object_id) = ids.get(index) else {
                        break;
                    };
                    let last_played = match source.fetch_last_played(object_id).await {
                        Ok(last_played) => last_played,
                        Err(e) => {
                            debug!("No play history for {}: {}", object_id, e);
                            LastPlayed::Never
                        }
                    };
                    done.push((index, last_played));
                }
                done
            });
        }

        let mut enriched = 0;
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(done) => {
                    for (index, last_played) in done {
                        items[index].stats.last_played = Some(last_played);
                        enriched += 1;
                    }
                }
                Err(e) => warn!("Enrichment worker stopped: {}", e),
            }
        }

        if !cycle.is_current() {
            info!("Discarding enrichment of superseded cycle {}", cycle.epoch());
            return Err(PickerError::Superseded);
        }

        info!("Enriched {} of {} items with play history", enriched, items.len());
        Ok(items)
    }
}
