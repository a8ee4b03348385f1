use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{PlaylistResult, PlaylistVideo};
use crate::error::Result;
use crate::platform::VideoPlatform;

pub const EMPTY_PLAYLIST: &str = "Playlist contains no videos";

/// Pages through a playlist and gathers its videos and metadata
pub struct PlaylistPipeline {
    platform: Arc<dyn VideoPlatform>,
    max_pages: usize,
}

impl PlaylistPipeline {
    pub fn new(platform: Arc<dyn VideoPlatform>, max_pages: usize) -> Self {
        Self { platform, max_pages }
    }

    /// Run playlist extraction. Failures are reported in the result's `error` field.
    pub async fn run(&self, playlist_id: &str) -> PlaylistResult {
        info!("📋 Extracting playlist {}", playlist_id);

        let videos = match self.collect_videos(playlist_id).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("❌ Failed to list playlist {}: {}", playlist_id, e);
                return PlaylistResult::failed(playlist_id, e.to_string(), "Failed to extract playlist");
            }
        };

        let info = match self.platform.fetch_playlist_info(playlist_id).await {
            Ok(info) => info,
            Err(e) => {
                warn!("❌ Failed to fetch playlist info for {}: {}", playlist_id, e);
                return PlaylistResult::failed(playlist_id, e.to_string(), "Failed to extract playlist");
            }
        };

        let mut result = PlaylistResult::new(playlist_id, info, videos);
        if result.videos.is_empty() {
            info!("📭 Playlist {} is empty", playlist_id);
            result.message = Some(EMPTY_PLAYLIST.to_string());
        } else {
            info!("✅ Collected {} videos from playlist {}", result.total_videos, playlist_id);
        }

        result
    }

    async fn collect_videos(&self, playlist_id: &str) -> Result<Vec<PlaylistVideo>> {
        let mut videos = Vec::new();
        let mut seen_tokens = HashSet::new();
        let mut page_token: Option<String> = None;

        for page_number in 1..=self.max_pages {
            let page = self
                .platform
                .fetch_playlist_page(playlist_id, page_token.as_deref())
                .await?;
            debug!("📄 Page {} of {}: {} videos", page_number, playlist_id, page.videos.len());
            videos.extend(page.videos);

            match page.next_page_token {
                None => return Ok(videos),
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    warn!("⚠️ Playlist {} repeated page token {}, stopping", playlist_id, token);
                    return Ok(videos);
                }
                Some(token) => page_token = Some(token),
            }
        }

        warn!(
            "⚠️ Playlist {} still has pages after {} pages, stopping",
            playlist_id, self.max_pages
        );
        Ok(videos)
    }
}
