/// Playlist listing: collects every video of a playlist across API pages

pub mod pipeline;

pub use pipeline::PlaylistPipeline;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A video entry in a playlist
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistVideo {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Zero-based position within the playlist
    pub position: u32,
}

/// Playlist metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistInfo {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Playlist extraction result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistResult {
    pub playlist_id: String,
    pub playlist_info: Option<PlaylistInfo>,
    pub videos: Vec<PlaylistVideo>,
    /// Always `videos.len()`
    pub total_videos: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaylistResult {
    pub fn new(playlist_id: impl Into<String>, playlist_info: Option<PlaylistInfo>, videos: Vec<PlaylistVideo>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            playlist_info,
            total_videos: videos.len(),
            videos,
            message: None,
            error: None,
        }
    }

    pub fn failed(playlist_id: impl Into<String>, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some(message.into()),
            ..Self::new(playlist_id, None, Vec::new())
        }
    }
}
