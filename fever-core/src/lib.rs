pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;

pub use api::{api_key, FeedSource, FeverClient, ItemSelector, ItemsQuery};
pub use cache::FeedCache;
pub use config::Config;
pub use error::SyncError;
pub use ids::parse_ids;
pub use models::{
    ApiStatus, Authed, Favicon, FaviconsResponse, Feed, FeedsGroup, FeedsResponse, Group,
    GroupsResponse, Item, ItemsResponse, SavedItemIdsResponse, UnreadItemIdsResponse,
};
