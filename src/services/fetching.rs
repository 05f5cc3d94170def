use crate::config::PickerSettings;
use crate::domain::{CollectionItem, CollectionSource, CycleToken, Filters};
use crate::error::{PickerError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Fetches every owner's collection as one all-or-nothing batch, retrying
/// the whole batch with a linearly growing delay.
pub struct CollectionFetcher<C> {
    source: Arc<C>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<C: CollectionSource> CollectionFetcher<C> {
    pub fn new(source: Arc<C>, settings: &PickerSettings) -> Self {
        Self {
            source,
            max_attempts: settings.max_attempts,
            retry_delay: settings.retry_delay,
        }
    }

    /// Returns one dataset per owner, in the order the owners were given.
    pub async fn fetch_all(
        &self,
        owners: &[String],
        filters: &Filters,
        cycle: &CycleToken,
    ) -> Result<Vec<Vec<CollectionItem>>> {
        let mut attempt = 1;
        loop {
            if !cycle.is_current() {
                info!("Dropping fetch cycle {} before attempt {}", cycle.epoch(), attempt);
                return Err(PickerError::Superseded);
            }

            match self.fetch_batch(owners, filters).await {
                Ok(datasets) => {
                    info!("Collection batch succeeded on attempt {}", attempt);
                    return Ok(datasets);
                }
                Err(e) if attempt < self.max_attempts => {
                    let delay = self.retry_delay * attempt;
                    warn!(
                        "Collection batch failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempt, self.max_attempts, e, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Collection batch failed after {} attempts: {}", attempt, e);
                    return Err(PickerError::RetryBudgetExhausted { attempts: attempt });
                }
            }
        }
    }

    async fn fetch_batch(
        &self,
        owners: &[String],
        filters: &Filters,
    ) -> Result<Vec<Vec<CollectionItem>>> {
        let mut requests = JoinSet::new();
        for (index, owner) in owners.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let owner = owner.clone();
            let filters = filters.clone();
            requests.spawn(async move {
                let items = source.fetch_collection(&owner, &filters).await?;
                Ok::<_, PickerError>((index, items))
            });
        }

        // Dropping the set on the first failure aborts the other requests
        let mut datasets = vec![Vec::new(); owners.len()];
        while let Some(joined) = requests.join_next().await {
            let (index, items) = joined??;
            datasets[index] = items;
        }
        Ok(datasets)
    }
}
