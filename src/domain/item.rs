use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single game or expansion from one owner's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub object_id: String,
    pub name: String,
    pub subtype: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub min_players: u32,
    pub max_players: u32,
    #[serde(default)]
    pub num_plays: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub stats: ItemStats,
}

/// Data attached after the collection has been fetched.
///
/// `last_played` stays `None` until the enricher has looked the item up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<LastPlayed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastPlayed {
    Never,
    On(NaiveDate),
}

impl LastPlayed {
    /// Picks the latest of the given play dates.
    pub fn latest_of(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        dates.into_iter().max().map_or(LastPlayed::Never, LastPlayed::On)
    }
}

impl CollectionItem {
    pub fn new(
        object_id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            name: name.into(),
            subtype: "boardgame".to_string(),
            owner: owner.into(),
            year_published: None,
            image: None,
            thumbnail: None,
            min_players: 0,
            max_players: 0,
            num_plays: 0,
            user_rating: None,
            average_rating: None,
            stats: ItemStats::default(),
        }
    }

    pub fn with_players(mut self, min_players: u32, max_players: u32) -> Self {
        self.min_players = min_players;
        self.max_players = max_players;
        self
    }

    pub fn with_last_played(mut self, last_played: LastPlayed) -> Self {
        self.stats.last_played = Some(last_played);
        self
    }

    pub fn supports_players(&self, players: u32) -> bool {
        self.min_players <= players && players <= self.max_players
    }

    /// True when the supported player range shares at least one count with
    /// `[low, high]`. Unset bounds are open-ended.
    pub fn overlaps_players(&self, low: Option<u32>, high: Option<u32>) -> bool {
        self.max_players >= low.unwrap_or(0) && self.min_players <= high.unwrap_or(u32::MAX)
    }

    pub fn is_expansion(&self) -> bool {
        self.subtype == "boardgameexpansion"
    }

    pub fn display_title(&self) -> String {
        match self.year_published {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_play_wins_regardless_of_order() {
        let dates = [
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 24).unwrap(),
        ];
        assert_eq!(
            LastPlayed::latest_of(dates),
            LastPlayed::On(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap())
        );
        assert_eq!(LastPlayed::latest_of(Vec::<NaiveDate>::new()), LastPlayed::Never);
    }

    #[test]
    fn player_range_checks() {
        let item = CollectionItem::new("1", "Catan", "alice").with_players(2, 4);
        assert!(item.supports_players(3));
        assert!(!item.supports_players(5));
        assert!(item.overlaps_players(Some(3), Some(6)));
        assert!(!item.overlaps_players(Some(5), Some(6)));
        assert!(item.overlaps_players(None, Some(2)));
        assert!(!item.overlaps_players(Some(5), None));
    }
}
