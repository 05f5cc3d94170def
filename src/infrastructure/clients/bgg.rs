use super::bgg_xml::{parse_collection, parse_last_played};
use crate::config::PickerSettings;
use crate::domain::{CollectionItem, CollectionSource, Filters, LastPlayed, PlaysSource};
use crate::error::{PickerError, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

/// BoardGameGeek XML API 2 client serving both collections and plays.
#[derive(Debug, Clone)]
pub struct BggClient {
    client: Client,
    collection_url: String,
    plays_url: String,
}

impl BggClient {
    pub fn new(client: Client, settings: &PickerSettings) -> Self {
        Self {
            client,
            collection_url: settings.collection_url.clone(),
            plays_url: settings.plays_url.clone(),
        }
    }
}

impl CollectionSource for BggClient {
    async fn fetch_collection(
        &self,
        owner: &str,
        filters: &Filters,
    ) -> Result<Vec<CollectionItem>> {
        let response = self
            .client
            .get(&self.collection_url)
            .query(&filters.collection_query(owner))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::ACCEPTED {
            debug!("Collection for {owner} queued upstream");
            return Err(PickerError::Processing {
                owner: owner.to_string(),
            });
        }
        if !status.is_success() {
            return Err(PickerError::Status {
                target: owner.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let items = parse_collection(owner, &body)?;
        info!("Fetched {} items for {}", items.len(), owner);
        Ok(items)
    }
}

impl PlaysSource for BggClient {
    async fn fetch_last_played(&self, object_id: &str) -> Result<LastPlayed> {
        let response = self
            .client
            .get(&self.plays_url)
            .query(&[("id", object_id), ("type", "thing")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PickerError::Status {
                target: object_id.to_string(),
                status: status.as_u16(),
            });
        }

        parse_last_played(&response.text().await?)
    }
}
