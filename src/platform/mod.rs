pub mod youtube;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::captions::CaptionTrack;
use crate::config::Config;
use crate::error::Result;
use crate::playlist::{PlaylistInfo, PlaylistVideo};

pub use youtube::YouTubeClient;

/// Caption tracks published for a video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackListing {
    pub video_title: Option<String>,
    /// Author-supplied tracks as `(language, handle)` in listed order
    pub manual: Vec<(String, String)>,
    /// Platform-generated tracks as `(language, handle)` in listed order
    pub automatic: Vec<(String, String)>,
}

/// Snippet fields of a single video
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoSnippet {
    pub title: String,
    pub channel_title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// One page of playlist entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistPage {
    pub videos: Vec<PlaylistVideo>,
    /// Cursor for the next page, `None` at the end of the list
    pub next_page_token: Option<String>,
}

/// Trait for video platform backends
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    async fn list_caption_tracks(&self, video_id: &str) -> Result<TrackListing>;
    async fn fetch_caption_payload(&self, track: &CaptionTrack) -> Result<String>;
    /// `Ok(None)` when the video does not exist or is private
    async fn fetch_video_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>>;
    async fn fetch_playlist_page(&self, playlist_id: &str, page_token: Option<&str>) -> Result<PlaylistPage>;
    async fn fetch_playlist_info(&self, playlist_id: &str) -> Result<Option<PlaylistInfo>>;
}

/// Create the platform client shared by every pipeline
pub fn create_platform(config: &Config) -> Result<Arc<dyn VideoPlatform>> {
    Ok(Arc::new(YouTubeClient::new(config)?))
}
