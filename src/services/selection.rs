use crate::domain::{CollectionItem, LastPlayed};
use chrono::NaiveDate;
use rand::Rng;

/// Weight of a game that was never played, or whose history is unknown.
pub const NEVER_PLAYED_WEIGHT: f64 = 10.0;

/// Staleness weight: whole days since the last play, at least 1.
pub fn recency_weight(item: &CollectionItem, today: NaiveDate) -> f64 {
    match item.stats.last_played {
        Some(LastPlayed::On(date)) => (today - date).num_days().max(1) as f64,
        Some(LastPlayed::Never) | None => NEVER_PLAYED_WEIGHT,
    }
}

/// Picks an index into `items`, uniformly or weighted by staleness.
/// Returns `None` for an empty collection.
pub fn choose_index<R: Rng + ?Sized>(
    items: &[CollectionItem],
    non_recency_bias: bool,
    today: NaiveDate,
    rng: &mut R,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    if !non_recency_bias {
        return Some(rng.gen_range(0..items.len()));
    }

    let weights: Vec<f64> = items.iter().map(|item| recency_weight(item, today)).collect();
    let total: f64 = weights.iter().sum();
    let mut draw = rng.gen::<f64>() * total;
    for (index, weight) in weights.iter().enumerate() {
        if draw < *weight {
            return Some(index);
        }
        draw -= weight;
    }

    // Rounding can leave a sliver past the last weight
    Some(items.len() - 1)
}
