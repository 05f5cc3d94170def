//! Shapes of the BGG XML API 2 documents and their conversion into domain
//! types. Everything downstream only ever sees `Vec<CollectionItem>` and
//! `LastPlayed`.

use crate::domain::{CollectionItem, ItemStats, LastPlayed};
use crate::error::{PickerError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CollectionDocument {
    #[serde(rename = "item", default)]
    items: Vec<RawItem>,
    #[serde(rename = "error", default)]
    errors: Vec<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "@objectid")]
    object_id: String,
    #[serde(rename = "@subtype", default)]
    subtype: String,
    name: RawText,
    #[serde(default)]
    yearpublished: Option<i32>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    stats: Option<RawStats>,
    #[serde(default)]
    numplays: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    #[serde(rename = "@minplayers", default)]
    min_players: Option<u32>,
    #[serde(rename = "@maxplayers", default)]
    max_players: Option<u32>,
    #[serde(default)]
    rating: Option<RawRating>,
}

#[derive(Debug, Deserialize)]
struct RawRating {
    #[serde(rename = "@value", default)]
    value: Option<String>,
    #[serde(default)]
    average: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    #[serde(rename = "@value", default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaysDocument {
    #[serde(rename = "play", default)]
    plays: Vec<RawPlay>,
}

#[derive(Debug, Deserialize)]
struct RawPlay {
    #[serde(rename = "@date", default)]
    date: String,
}

/// Parses a collection response for `owner`. An `<errors>` document is
/// reported as an upstream failure.
pub fn parse_collection(owner: &str, body: &str) -> Result<Vec<CollectionItem>> {
    let document: CollectionDocument = quick_xml::de::from_str(body)?;

    if let Some(error) = document.errors.first() {
        return Err(PickerError::Upstream {
            owner: owner.to_string(),
            message: error.message.trim().to_string(),
        });
    }

    Ok(document
        .items
        .into_iter()
        .map(|raw| raw.into_item(owner))
        .collect())
}

/// Derives the last-played value from a plays response.
pub fn parse_last_played(body: &str) -> Result<LastPlayed> {
    let document: PlaysDocument = quick_xml::de::from_str(body)?;
    let dates = document
        .plays
        .iter()
        .filter_map(|play| NaiveDate::parse_from_str(play.date.trim(), "%Y-%m-%d").ok());
    Ok(LastPlayed::latest_of(dates))
}

fn parse_score(value: Option<&String>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}

impl RawItem {
    fn into_item(self, owner: &str) -> CollectionItem {
        let (min_players, max_players, user_rating, average_rating) = match &self.stats {
            Some(stats) => {
                let rating = stats.rating.as_ref();
                (
                    stats.min_players.unwrap_or(0),
                    stats.max_players.unwrap_or(0),
                    parse_score(rating.and_then(|r| r.value.as_ref())),
                    parse_score(
                        rating
                            .and_then(|r| r.average.as_ref())
                            .and_then(|a| a.value.as_ref()),
                    ),
                )
            }
            None => (0, 0, None, None),
        };

        CollectionItem {
            object_id: self.object_id,
            name: self.name.value.trim().to_string(),
            subtype: self.subtype,
            owner: owner.to_string(),
            year_published: self.yearpublished,
            image: self.image.map(|s| s.trim().to_string()),
            thumbnail: self.thumbnail.map(|s| s.trim().to_string()),
            min_players,
            max_players,
            num_plays: self.numplays.unwrap_or(0),
            user_rating,
            average_rating,
            stats: ItemStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<items totalitems="2" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse" pubdate="Mon, 01 Jan 2024 00:00:00 +0000">
    <item objecttype="thing" objectid="13" subtype="boardgame" collid="1">
        <name sortindex="1">Catan</name>
        <yearpublished>1995</yearpublished>
        <image>https://cf.geekdo-images.com/catan.jpg</image>
        <thumbnail>https://cf.geekdo-images.com/catan_t.jpg</thumbnail>
        <stats minplayers="3" maxplayers="4" minplaytime="60" maxplaytime="120" playingtime="120" numowned="1000">
            <rating value="7.5">
                <usersrated value="100"/>
                <average value="7.1"/>
                <bayesaverage value="6.9"/>
            </rating>
        </stats>
        <status own="1" prevowned="0" fortrade="0" want="0"/>
        <numplays>12</numplays>
    </item>
    <item objecttype="thing" objectid="822" subtype="boardgame" collid="2">
        <name sortindex="1">Carcassonne</name>
        <stats minplayers="2" maxplayers="5">
            <rating value="N/A">
                <average value="7.4"/>
            </rating>
        </stats>
        <numplays>0</numplays>
    </item>
</items>"#;

    const ONE_ITEM: &str = r#"<items totalitems="1">
    <item objecttype="thing" objectid="13" subtype="boardgame" collid="1">
        <name sortindex="1">Catan</name>
        <yearpublished>1995</yearpublished>
        <image>https://cf.geekdo-images.com/catan.jpg</image>
        <thumbnail>https://cf.geekdo-images.com/catan_t.jpg</thumbnail>
        <stats minplayers="3" maxplayers="4">
            <rating value="7.5">
                <average value="7.1"/>
            </rating>
        </stats>
        <numplays>12</numplays>
    </item>
</items>"#;

    #[test]
    fn parses_collection_items() {
        let items = parse_collection("alice", TWO_ITEMS).unwrap();
        assert_eq!(items.len(), 2);

        let catan = &items[0];
        assert_eq!(catan.object_id, "13");
        assert_eq!(catan.name, "Catan");
        assert_eq!(catan.owner, "alice");
        assert_eq!(catan.year_published, Some(1995));
        assert_eq!((catan.min_players, catan.max_players), (3, 4));
        assert_eq!(catan.num_plays, 12);
        assert_eq!(catan.user_rating, Some(7.5));
        assert_eq!(catan.average_rating, Some(7.1));
        assert_eq!(catan.stats.last_played, None);

        let carcassonne = &items[1];
        assert_eq!(carcassonne.user_rating, None);
        assert_eq!(carcassonne.average_rating, Some(7.4));
        assert_eq!(carcassonne.image, None);
    }

    #[test]
    fn single_item_has_the_same_shape_as_one_of_many() {
        let single = parse_collection("alice", ONE_ITEM).unwrap();
        let many = parse_collection("alice", TWO_ITEMS).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0], many[0]);
    }

    #[test]
    fn empty_collection_is_empty_sequence() {
        let items = parse_collection("alice", r#"<items totalitems="0"></items>"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn error_document_is_upstream_failure() {
        let body = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<errors><error><message>Invalid username specified</message></error></errors>"#;
        match parse_collection("nobody", body) {
            Err(PickerError::Upstream { owner, message }) => {
                assert_eq!(owner, "nobody");
                assert_eq!(message, "Invalid username specified");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn last_played_from_plays_documents() {
        let none = r#"<plays username="" total="0" page="1"></plays>"#;
        assert_eq!(parse_last_played(none).unwrap(), LastPlayed::Never);

        let one = r#"<plays total="1" page="1">
            <play id="1" date="2024-02-10" quantity="1"><item name="Catan" objecttype="thing" objectid="13"/></play>
        </plays>"#;
        assert_eq!(
            parse_last_played(one).unwrap(),
            LastPlayed::On(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
        );

        let many = r#"<plays total="3" page="1">
            <play id="3" date="2024-06-01" quantity="1"/>
            <play id="2" date="0000-00-00" quantity="1"/>
            <play id="1" date="2023-11-20" quantity="1"/>
        </plays>"#;
        assert_eq!(
            parse_last_played(many).unwrap(),
            LastPlayed::On(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );
    }
}
