use crate::domain::{CollectionItem, Filters};
use tracing::info;

/// Concatenates per-owner datasets in owner order. Items shared between
/// owners are kept once per owner.
pub fn merge_collections(datasets: Vec<Vec<CollectionItem>>) -> Vec<CollectionItem> {
    let owners = datasets.len();
    let merged: Vec<CollectionItem> = datasets.into_iter().flatten().collect();
    info!("Merged {} items from {} owners", merged.len(), owners);
    merged
}

/// Applies the player-count constraints. An exact `num_players` takes
/// precedence over the min/max window.
pub fn filter_player_count(items: Vec<CollectionItem>, filters: &Filters) -> Vec<CollectionItem> {
    let before = items.len();
    let filtered: Vec<CollectionItem> = match (
        filters.num_players,
        filters.min_player_count,
        filters.max_player_count,
    ) {
        (Some(players), _, _) => items
            .into_iter()
            .filter(|item| item.supports_players(players))
            .collect(),
        (None, None, None) => return items,
        (None, low, high) => items
            .into_iter()
            .filter(|item| item.overlaps_players(low, high))
            .collect(),
    };

    info!("Player-count filter kept {} of {} items", filtered.len(), before);
    filtered
}
