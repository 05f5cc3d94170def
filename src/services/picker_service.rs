use crate::config::PickerSettings;
use crate::domain::{
    parse_owners, CollectionItem, CollectionSource, CycleCounter, CycleToken, Filters,
    PlaysSource,
};
use crate::error::{PickerError, Result};
use crate::services::{
    enrichment::Enricher,
    fetching::CollectionFetcher,
    merging::{filter_player_count, merge_collections},
    selection::choose_index,
};
use chrono::Local;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{error, info};

const EVENT_CAPACITY: usize = 16;

/// Status notifications for whoever renders the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PickerEvent {
    FetchStarted { owners: Vec<String> },
    Fetched { count: usize },
    NoMatches,
    Failed { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Published { count: usize },
    NoMatches,
    /// A newer request started before this one finished; nothing was applied.
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub active_collection: Vec<CollectionItem>,
    pub chosen_game: Option<CollectionItem>,
    pub active_owners: Option<String>,
    pub loading: bool,
}

/// In-memory picker session: runs fetch cycles and holds the published
/// collection and the current pick.
pub struct PickerService<C, P> {
    fetcher: CollectionFetcher<C>,
    enricher: Enricher<P>,
    cycles: CycleCounter,
    state: Mutex<SessionSnapshot>,
    events: broadcast::Sender<PickerEvent>,
}

impl<C: CollectionSource, P: PlaysSource> PickerService<C, P> {
    pub fn new(collections: Arc<C>, plays: Arc<P>, settings: &PickerSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        info!("Created new Picker service");
        Self {
            fetcher: CollectionFetcher::new(collections, settings),
            enricher: Enricher::new(plays, settings),
            cycles: CycleCounter::new(),
            state: Mutex::new(SessionSnapshot::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PickerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().clone()
    }

    /// Runs one fetch cycle: fetch every owner, merge, filter, enrich and
    /// publish. Starting a new cycle abandons any cycle still in flight.
    pub async fn request_collection(
        &self,
        owner_input: &str,
        filters: &Filters,
    ) -> Result<CycleOutcome> {
        filters.validate()?;
        let owners = parse_owners(owner_input)?;
        let cycle = self.begin_cycle(&owners);

        match self.run_cycle(&owners, filters, &cycle).await {
            Ok(items) => Ok(self.publish(&cycle, &owners, items, filters.non_recency_bias)),
            Err(PickerError::Superseded) => Ok(CycleOutcome::Superseded),
            Err(e) => self.fail(&cycle, e),
        }
    }

    /// Picks again from the published collection without refetching.
    pub fn reroll(&self, non_recency_bias: bool) -> Option<CollectionItem> {
        let mut state = self.state();
        let index = choose_index(
            &state.active_collection,
            non_recency_bias,
            Local::now().date_naive(),
            &mut rand::thread_rng(),
        )?;
        let chosen = state.active_collection[index].clone();
        state.chosen_game = Some(chosen.clone());
        Some(chosen)
    }

    async fn run_cycle(
        &self,
        owners: &[String],
        filters: &Filters,
        cycle: &CycleToken,
    ) -> Result<Vec<CollectionItem>> {
        let datasets = self.fetcher.fetch_all(owners, filters, cycle).await?;
        let merged = merge_collections(datasets);
        let filtered = filter_player_count(merged, filters);
        self.enricher.enrich(filtered, cycle).await
    }

    fn begin_cycle(&self, owners: &[String]) -> CycleToken {
        let mut state = self.state();
        let cycle = self.cycles.begin();
        state.active_collection.clear();
        state.loading = true;
        drop(state);

        info!("Starting fetch cycle {} for {}", cycle.epoch(), owners.join(", "));
        self.emit(PickerEvent::FetchStarted {
            owners: owners.to_vec(),
        });
        cycle
    }

    fn publish(
        &self,
        cycle: &CycleToken,
        owners: &[String],
        items: Vec<CollectionItem>,
        non_recency_bias: bool,
    ) -> CycleOutcome {
        let mut state = self.state();
        if !cycle.is_current() {
            return CycleOutcome::Superseded;
        }

        let count = items.len();
        state.chosen_game = choose_index(
            &items,
            non_recency_bias,
            Local::now().date_naive(),
            &mut rand::thread_rng(),
        )
        .map(|index| items[index].clone());
        state.active_collection = items;
        state.active_owners = Some(owners.join(", "));
        state.loading = false;
        drop(state);

        info!("Published {} games for cycle {}", count, cycle.epoch());
        if count > 0 {
            self.emit(PickerEvent::Fetched { count });
            CycleOutcome::Published { count }
        } else {
            self.emit(PickerEvent::NoMatches);
            CycleOutcome::NoMatches
        }
    }

    fn fail(&self, cycle: &CycleToken, e: PickerError) -> Result<CycleOutcome> {
        let mut state = self.state();
        if !cycle.is_current() {
            return Ok(CycleOutcome::Superseded);
        }
        state.loading = false;
        drop(state);

        error!("Fetch cycle {} failed: {}", cycle.epoch(), e);
        if let PickerError::RetryBudgetExhausted { attempts } = e {
            self.emit(PickerEvent::Failed { attempts });
        }
        Err(e)
    }

    fn emit(&self, event: PickerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn state(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
