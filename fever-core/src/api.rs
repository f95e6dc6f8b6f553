use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::SyncError;
use crate::models::{
    ApiStatus, FaviconsResponse, Feed, FeedsResponse, GroupsResponse, ItemsResponse,
    SavedItemIdsResponse, UnreadItemIdsResponse,
};

/// Where the authoritative feed list comes from. The cache only ever needs
/// this one operation.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feeds(&self) -> Result<Vec<Feed>, SyncError>;
}

/// Selects which items a call returns. The server treats these as mutually
/// exclusive, so only one can be expressed.
#[derive(Debug, Clone)]
pub enum ItemSelector {
    MaxId(i64),
    WithIds(Vec<i64>),
    SinceId(i64),
}

/// Parameters for [`FeverClient::items`]. The server returns at most 50
/// items per call regardless of the query.
#[derive(Debug, Clone, Default)]
pub struct ItemsQuery {
    pub selector: Option<ItemSelector>,
    pub feed_ids: Option<Vec<i64>>,
    pub group_ids: Option<Vec<i64>>,
}

/// Client for a Fever endpoint, e.g. `http://host/api/fever.php?api`.
///
/// Every operation posts the api key as a form field and selects the
/// operation through query parameters, which is how the protocol works.
pub struct FeverClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl FeverClient {
    pub fn new(endpoint: Url, username: &str, api_password: &str) -> Self {
        Self::with_client(Client::new(), endpoint, username, api_password)
    }

    /// Use a preconfigured [`Client`], e.g. one with timeouts.
    pub fn with_client(http: Client, endpoint: Url, username: &str, api_password: &str) -> Self {
        Self {
            http,
            endpoint,
            api_key: api_key(username, api_password),
        }
    }

    /// True if the endpoint answers with a decodable status payload. Does
    /// not require valid credentials.
    pub async fn is_connected(&self) -> bool {
        let response = match self.http.get(self.endpoint.clone()).send().await {
            Ok(response) => response,
            Err(_) => return false,
        };
        let body = match response.error_for_status() {
            Ok(response) => response.bytes().await,
            Err(_) => return false,
        };
        match body {
            Ok(body) => serde_json::from_slice::<ApiStatus>(&body).is_ok(),
            Err(_) => false,
        }
    }

    /// Whether the server accepts our api key.
    pub async fn is_authenticated(&self) -> Result<bool, SyncError> {
        let body = self.call(&[]).await?;
        let status: ApiStatus = serde_json::from_slice(&body)?;
        Ok(status.auth)
    }

    /// The full feed list.
    pub async fn feeds(&self) -> Result<FeedsResponse, SyncError> {
        self.request(&[("feeds", String::new())]).await
    }

    /// Groups plus the feed membership of each group.
    pub async fn groups(&self) -> Result<GroupsResponse, SyncError> {
        self.request(&[("groups", String::new())]).await
    }

    pub async fn items(&self, query: &ItemsQuery) -> Result<ItemsResponse, SyncError> {
        let mut params = vec![("items", String::new())];
        match &query.selector {
            Some(ItemSelector::MaxId(id)) => params.push(("max_id", id.to_string())),
            Some(ItemSelector::WithIds(ids)) => params.push(("with_ids", join_ids(ids))),
            Some(ItemSelector::SinceId(id)) => params.push(("since_id", id.to_string())),
            None => {}
        }
        if let Some(ids) = &query.feed_ids {
            params.push(("feed_ids", join_ids(ids)));
        }
        if let Some(ids) = &query.group_ids {
            params.push(("group_ids", join_ids(ids)));
        }
        self.request(&params).await
    }

    pub async fn unread_item_ids(&self) -> Result<UnreadItemIdsResponse, SyncError> {
        self.request(&[("unread_item_ids", String::new())]).await
    }

    pub async fn saved_item_ids(&self) -> Result<SavedItemIdsResponse, SyncError> {
        self.request(&[("saved_item_ids", String::new())]).await
    }

    pub async fn favicons(&self) -> Result<FaviconsResponse, SyncError> {
        self.request(&[("favicons", String::new())]).await
    }

    pub async fn mark_item_read(&self, item_id: i64) -> Result<UnreadItemIdsResponse, SyncError> {
        self.mark("item", "read", item_id, None).await
    }

    pub async fn mark_item_unread(&self, item_id: i64) -> Result<UnreadItemIdsResponse, SyncError> {
        self.mark("item", "unread", item_id, None).await
    }

    pub async fn mark_item_saved(&self, item_id: i64) -> Result<SavedItemIdsResponse, SyncError> {
        self.mark("item", "saved", item_id, None).await
    }

    pub async fn mark_item_unsaved(&self, item_id: i64) -> Result<SavedItemIdsResponse, SyncError> {
        self.mark("item", "unsaved", item_id, None).await
    }

    /// Mark every item of a feed read, up to the `before` timestamp.
    /// The server treats 0 as "everything".
    pub async fn mark_feed_read(
        &self,
        feed_id: i64,
        before: i64,
    ) -> Result<UnreadItemIdsResponse, SyncError> {
        self.mark("feed", "read", feed_id, Some(before)).await
    }

    /// Mark every item of a group read, up to the `before` timestamp.
    pub async fn mark_group_read(
        &self,
        group_id: i64,
        before: i64,
    ) -> Result<UnreadItemIdsResponse, SyncError> {
        self.mark("group", "read", group_id, Some(before)).await
    }

    async fn mark<T>(
        &self,
        target: &'static str,
        action: &'static str,
        id: i64,
        before: Option<i64>,
    ) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
    {
        let mut params = vec![
            ("mark", target.to_owned()),
            ("as", action.to_owned()),
            ("id", id.to_string()),
        ];
        if let Some(before) = before {
            params.push(("before", before.to_string()));
        }
        self.request(&params).await
    }

    /// Decode in two steps: the bare status first, so an unauthenticated
    /// body (which lacks the payload fields) reports `Auth` instead of a
    /// decode failure.
    async fn request<T>(&self, params: &[(&str, String)]) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
    {
        let body = self.call(params).await?;
        let status: ApiStatus = serde_json::from_slice(&body)?;
        if !status.auth {
            return Err(SyncError::Auth);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn call(&self, params: &[(&str, String)]) -> Result<Vec<u8>, SyncError> {
        debug!(endpoint = %self.endpoint, ?params, "fever request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .query(params)
            .form(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl FeedSource for FeverClient {
    async fn fetch_feeds(&self) -> Result<Vec<Feed>, SyncError> {
        let response = self.feeds().await?;
        Ok(response.feeds)
    }
}

/// Fever api key: hex md5 of `username:api_password`.
pub fn api_key(username: &str, api_password: &str) -> String {
    format!("{:x}", md5::compute(format!("{}:{}", username, api_password)))
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
