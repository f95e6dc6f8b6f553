use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// A subscribed source. On the wire and in snapshots the field names follow
/// the Fever aliases (`id`, `url`, `last_updated_on_time`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(rename = "id")]
    pub feed_id: i64,
    pub favicon_id: i64,
    pub title: String,
    #[serde(rename = "url")]
    pub feed_url: String,
    pub site_url: String,
    #[serde(with = "flag")]
    pub is_spark: bool,
    #[serde(rename = "last_updated_on_time", with = "timestamp")]
    pub last_updated_on: DateTime<Utc>,
}

/// One article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(rename = "id")]
    pub item_id: i64,
    pub feed_id: i64,
    pub title: String,
    pub author: String,
    #[serde(rename = "html")]
    pub content_html: String,
    pub url: String,
    #[serde(with = "flag")]
    pub is_saved: bool,
    #[serde(with = "flag")]
    pub is_read: bool,
    #[serde(with = "timestamp")]
    pub created_on_time: DateTime<Utc>,
}

/// A folder of feeds. The id matches the web UI parameter `get=c_<id>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    #[serde(rename = "id")]
    pub group_id: i64,
    pub title: String,
}

/// Membership of feeds in one group. `feed_ids` arrives comma-joined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedsGroup {
    pub group_id: i64,
    #[serde(deserialize_with = "ids::deserialize")]
    pub feed_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favicon {
    #[serde(rename = "id")]
    pub favicon_id: i64,
    pub data: String,
}

/// Minimal envelope every Fever response can be decoded as, authenticated
/// or not.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub api_version: i64,
    #[serde(with = "flag")]
    pub auth: bool,
}

/// Common fields of every authenticated response.
#[derive(Debug, Clone, Deserialize)]
pub struct Authed {
    pub api_version: i64,
    #[serde(with = "flag")]
    pub auth: bool,
    #[serde(with = "timestamp")]
    pub last_refreshed_on_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedsResponse {
    #[serde(flatten)]
    pub status: Authed,
    pub feeds: Vec<Feed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    #[serde(flatten)]
    pub status: Authed,
    pub total_items: i64,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsResponse {
    #[serde(flatten)]
    pub status: Authed,
    pub groups: Vec<Group>,
    pub feeds_groups: Vec<FeedsGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnreadItemIdsResponse {
    #[serde(flatten)]
    pub status: Authed,
    #[serde(deserialize_with = "ids::deserialize")]
    pub unread_item_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedItemIdsResponse {
    #[serde(flatten)]
    pub status: Authed,
    #[serde(deserialize_with = "ids::deserialize")]
    pub saved_item_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaviconsResponse {
    #[serde(flatten)]
    pub status: Authed,
    pub favicons: Vec<Favicon>,
}

/// Fever sends timestamps as epoch seconds; snapshots store RFC 3339 strings.
/// Both decode through the same field.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Epoch(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Epoch(secs) => DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| de::Error::custom("epoch timestamp out of range")),
            Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(de::Error::custom),
        }
    }
}

/// Fever booleans arrive as 0/1.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => value,
            Raw::Int(value) => value != 0,
        })
    }
}
