use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{clean_caption_text, select_language, CaptionResult, CaptionTracks};
use crate::platform::VideoPlatform;

const UNKNOWN_TITLE: &str = "Unknown";

/// Lists a video's caption tracks, picks one and returns its cleaned text
pub struct CaptionPipeline {
    platform: Arc<dyn VideoPlatform>,
    default_language: String,
}

impl CaptionPipeline {
    pub fn new(platform: Arc<dyn VideoPlatform>, default_language: impl Into<String>) -> Self {
        Self {
            platform,
            default_language: default_language.into(),
        }
    }

    /// Run caption extraction for `video_id`.
    ///
    /// `requested` falls back to the configured default language. Failures are
    /// reported in the result rather than returned as errors.
    pub async fn run(&self, video_id: &str, requested: Option<&str>) -> CaptionResult {
        info!("💬 Extracting captions for video {}", video_id);

        let listing = match self.platform.list_caption_tracks(video_id).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("❌ Failed to list caption tracks for {}: {}", video_id, e);
                return CaptionResult::failed(video_id, e.to_string(), "Failed to extract captions");
            }
        };

        let video_title = listing
            .video_title
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let tracks = CaptionTracks::merge(listing.manual, listing.automatic);
        let available_languages = tracks.languages();

        if tracks.is_empty() {
            info!("🔇 No captions available for video {}", video_id);
            return CaptionResult::without_captions(
                video_id,
                video_title,
                available_languages,
                "No captions available for this video",
            );
        }

        let requested = requested.unwrap_or(self.default_language.as_str());
        let Some(track) = select_language(Some(requested), &tracks) else {
            return CaptionResult::without_captions(
                video_id,
                video_title,
                available_languages,
                "No captions available for this video",
            );
        };
        debug!(
            "🌐 Requested '{}', selected '{}' ({:?}) from {:?}",
            requested, track.language, track.kind, available_languages
        );

        let payload = match self.platform.fetch_caption_payload(track).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("❌ Caption download failed for {} [{}]: {}", video_id, track.language, e);
                return CaptionResult::without_captions(
                    video_id,
                    video_title,
                    available_languages,
                    format!("Failed to download captions for language {}", track.language),
                );
            }
        };

        let text = clean_caption_text(&payload);
        let mut result = CaptionResult::without_captions(video_id, video_title, available_languages, "");
        result.language_used = Some(track.language.clone());
        result.caption_type = Some(track.kind);

        if text.is_empty() {
            warn!("⚠️ Caption track {} for {} contained no text", track.language, video_id);
            result.message = Some(format!(
                "Caption track for language {} contained no text",
                track.language
            ));
        } else {
            info!("✅ Extracted {} characters of captions for {}", text.len(), video_id);
            result.message = None;
            result.captions = Some(text);
        }

        result
    }
}
