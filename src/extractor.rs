/// Entry point used by the CLI: validates links and dispatches to the pipelines
use std::sync::Arc;
use tracing::warn;

use crate::captions::{CaptionPipeline, CaptionResult};
use crate::config::Config;
use crate::links::{extract_playlist_id, extract_video_id, is_valid_youtube_url};
use crate::platform::VideoPlatform;
use crate::playlist::{PlaylistPipeline, PlaylistResult};
use crate::topics::{TopicPipeline, TopicResult};

const INVALID_URL: &str = "Invalid YouTube URL provided";
const INVALID_URL_HINT: &str = "Please provide a valid YouTube video URL";
const INVALID_PLAYLIST_URL: &str = "Invalid YouTube playlist URL provided";
const INVALID_PLAYLIST_URL_HINT: &str = "Please provide a valid YouTube playlist URL containing 'list=' parameter";

/// Caption, topic and playlist extraction over one platform handle.
///
/// Every operation returns a result record; malformed links are rejected here
/// without contacting the platform.
pub struct YouTubeExtractor {
    captions: CaptionPipeline,
    topics: TopicPipeline,
    playlists: PlaylistPipeline,
}

impl YouTubeExtractor {
    pub fn new(platform: Arc<dyn VideoPlatform>, config: &Config) -> Self {
        Self {
            captions: CaptionPipeline::new(Arc::clone(&platform), config.captions.default_language.clone()),
            topics: TopicPipeline::new(Arc::clone(&platform)),
            playlists: PlaylistPipeline::new(platform, config.playlist.max_pages),
        }
    }

    pub async fn extract_captions(&self, url: &str, language: Option<&str>) -> CaptionResult {
        match video_id_from(url) {
            Some(video_id) => self.captions.run(&video_id, language).await,
            None => {
                warn!("⚠️ Rejected video URL: {}", url);
                CaptionResult::failed("", INVALID_URL, INVALID_URL_HINT)
            }
        }
    }

    pub async fn extract_topics(&self, url: &str) -> TopicResult {
        match video_id_from(url) {
            Some(video_id) => self.topics.run(&video_id).await,
            None => {
                warn!("⚠️ Rejected video URL: {}", url);
                TopicResult::failed("", INVALID_URL)
            }
        }
    }

    pub async fn extract_playlist(&self, url: &str) -> PlaylistResult {
        match playlist_id_from(url) {
            Some(playlist_id) => self.playlists.run(&playlist_id).await,
            None => {
                warn!("⚠️ Rejected playlist URL: {}", url);
                PlaylistResult::failed("", INVALID_PLAYLIST_URL, INVALID_PLAYLIST_URL_HINT)
            }
        }
    }
}

fn playlist_id_from(url: &str) -> Option<String> {
    if !is_valid_youtube_url(url) {
        return None;
    }
    extract_playlist_id(url)
}

fn video_id_from(url: &str) -> Option<String> {
    if !is_valid_youtube_url(url) {
        return None;
    }
    extract_video_id(url)
}
