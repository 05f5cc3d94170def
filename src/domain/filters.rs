use crate::error::{PickerError, Result};
use serde::{Deserialize, Serialize};

const MAX_RATING: u8 = 10;
const EXPANSION_SUBTYPE: &str = "boardgameexpansion";

/// User-selected constraints for a fetch cycle. Unset fields mean "no constraint".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub min_rating: Option<u8>,
    pub rating: Option<u8>,
    #[serde(rename = "minBGGRating")]
    pub min_bgg_rating: Option<u8>,
    pub num_players: Option<u32>,
    pub min_player_count: Option<u32>,
    pub max_player_count: Option<u32>,
    pub rated: bool,
    pub played: bool,
    #[serde(alias = "comment")]
    pub commented: bool,
    pub hide_expansions: bool,
    pub non_recency_bias: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            min_rating: None,
            rating: None,
            min_bgg_rating: None,
            num_players: None,
            min_player_count: None,
            max_player_count: None,
            rated: false,
            played: false,
            commented: false,
            hide_expansions: true,
            non_recency_bias: false,
        }
    }
}

impl Filters {
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("minRating", self.min_rating),
            ("rating", self.rating),
            ("minBGGRating", self.min_bgg_rating),
        ] {
            if let Some(value) = value {
                if value > MAX_RATING {
                    return Err(PickerError::InvalidFilter(format!(
                        "{key} must be between 0 and {MAX_RATING}, got {value}"
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_player_count, self.max_player_count) {
            if min > max {
                return Err(PickerError::InvalidFilter(format!(
                    "minPlayerCount ({min}) is greater than maxPlayerCount ({max})"
                )));
            }
        }

        Ok(())
    }

    /// Query parameters for one owner's collection request.
    pub fn collection_query(&self, owner: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("username", owner.to_string()),
            ("stats", "1".to_string()),
            ("own", "1".to_string()),
        ];

        // A zero rating does not constrain anything upstream
        let ratings = [
            ("minrating", self.min_rating),
            ("rating", self.rating),
            ("minbggrating", self.min_bgg_rating),
        ];
        for (key, value) in ratings {
            if let Some(value) = value.filter(|v| *v > 0) {
                params.push((key, value.to_string()));
            }
        }

        let flags = [
            ("rated", self.rated),
            ("played", self.played),
            ("comment", self.commented),
        ];
        for (key, enabled) in flags {
            if enabled {
                params.push((key, "1".to_string()));
            }
        }

        if self.hide_expansions {
            params.push(("excludesubtype", EXPANSION_SUBTYPE.to_string()));
        }

        params
    }
}

/// Splits the comma-separated owner input into trimmed, non-empty names.
pub fn parse_owners(input: &str) -> Result<Vec<String>> {
    let owners: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if owners.is_empty() {
        return Err(PickerError::NoOwners);
    }
    Ok(owners)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn default_query_only_carries_required_params() {
        let filters = Filters {
            hide_expansions: false,
            ..Filters::default()
        };
        let params = filters.collection_query("alice");
        assert_eq!(
            params,
            vec![
                ("username", "alice".to_string()),
                ("stats", "1".to_string()),
                ("own", "1".to_string()),
            ]
        );
    }

    #[test]
    fn set_filters_become_query_params() {
        let filters = Filters {
            min_rating: Some(7),
            rating: Some(0),
            min_bgg_rating: Some(6),
            rated: true,
            commented: true,
            ..Filters::default()
        };
        let params = filters.collection_query("bob");
        assert_eq!(value(&params, "minrating"), Some("7"));
        assert_eq!(value(&params, "rating"), None);
        assert_eq!(value(&params, "minbggrating"), Some("6"));
        assert_eq!(value(&params, "rated"), Some("1"));
        assert_eq!(value(&params, "played"), None);
        assert_eq!(value(&params, "comment"), Some("1"));
        assert_eq!(value(&params, "excludesubtype"), Some("boardgameexpansion"));
    }

    #[test]
    fn rejects_out_of_range_ratings_and_inverted_ranges() {
        let filters = Filters {
            min_bgg_rating: Some(11),
            ..Filters::default()
        };
        assert!(matches!(filters.validate(), Err(PickerError::InvalidFilter(_))));

        let filters = Filters {
            min_player_count: Some(5),
            max_player_count: Some(2),
            ..Filters::default()
        };
        assert!(matches!(filters.validate(), Err(PickerError::InvalidFilter(_))));

        assert!(Filters::default().validate().is_ok());
    }

    #[test]
    fn parses_owner_list() {
        assert_eq!(
            parse_owners(" alice, bob ,,carol").unwrap(),
            vec!["alice", "bob", "carol"]
        );
        assert!(matches!(parse_owners(" , "), Err(PickerError::NoOwners)));
    }

    #[test]
    fn reads_camel_case_json() {
        let filters: Filters = serde_json::from_str(
            r#"{"minBGGRating": 6, "numPlayers": 3, "comment": true, "nonRecencyBias": true}"#,
        )
        .unwrap();
        assert_eq!(filters.min_bgg_rating, Some(6));
        assert_eq!(filters.num_players, Some(3));
        assert!(filters.commented);
        assert!(filters.non_recency_bias);
        assert!(filters.hide_expansions);
    }
}
