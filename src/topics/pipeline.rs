use std::sync::Arc;
use tracing::{info, warn};

use super::{TopicExtractor, TopicResult};
use crate::platform::VideoPlatform;

/// Message used when the platform has no snippet for a video
pub const VIDEO_NOT_FOUND: &str = "Video not found or is private";

/// Fetches a video's snippet and extracts topics from its description
pub struct TopicPipeline {
    platform: Arc<dyn VideoPlatform>,
    extractor: TopicExtractor,
}

impl TopicPipeline {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self::with_extractor(platform, TopicExtractor::new())
    }

    pub fn with_extractor(platform: Arc<dyn VideoPlatform>, extractor: TopicExtractor) -> Self {
        Self { platform, extractor }
    }

    /// Run topic extraction. Failures are reported in the result's `error` field.
    pub async fn run(&self, video_id: &str) -> TopicResult {
        info!("📝 Extracting topics for video {}", video_id);

        let snippet = match self.platform.fetch_video_snippet(video_id).await {
            Ok(Some(snippet)) => snippet,
            Ok(None) => {
                warn!("⚠️ Video {} not found", video_id);
                return TopicResult::failed(video_id, VIDEO_NOT_FOUND);
            }
            Err(e) => {
                warn!("❌ Failed to fetch video {}: {}", video_id, e);
                return TopicResult::failed(video_id, e.to_string());
            }
        };

        let topics = self.extractor.extract(&snippet.description);
        info!("✅ Found {} topics for video {}", topics.len(), video_id);

        TopicResult::from_snippet(video_id, snippet, topics)
    }
}
