/// Caption handling: track negotiation, subtitle cleaning and the caption pipeline
///
/// Tracks arrive from the platform as two ordered lists (author-supplied and
/// platform-generated). They are merged into a single ordered collection that
/// the language selector walks deterministically.

pub mod cleaner;
pub mod language;
pub mod pipeline;

// Re-export main types
pub use cleaner::clean_caption_text;
pub use language::{select_language, DEFAULT_LANGUAGE};
pub use pipeline::CaptionPipeline;

use serde::{Deserialize, Serialize};

/// Where a caption track came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptionKind {
    /// Uploaded by the video author
    Manual,
    /// Generated by the platform's speech recognition
    Automatic,
}

/// A single caption stream for one language
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionTrack {
    /// Language tag, e.g. `en` or `en-US`
    pub language: String,
    pub kind: CaptionKind,
    /// Opaque handle (a URL for YouTube) used to fetch the raw payload
    pub handle: String,
}

/// Merged caption tracks in selection order.
///
/// Manual tracks come first in their listed order, then automatic tracks in
/// theirs. A language tag appears at most once; on collision the manual track
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionTracks {
    tracks: Vec<CaptionTrack>,
}

impl CaptionTracks {
    /// Merge manual and automatic `(language, handle)` pairs
    pub fn merge(manual: Vec<(String, String)>, automatic: Vec<(String, String)>) -> Self {
        let mut merged = Self::default();

        let tagged = manual
            .into_iter()
            .map(|pair| (pair, CaptionKind::Manual))
            .chain(automatic.into_iter().map(|pair| (pair, CaptionKind::Automatic)));

        for ((language, handle), kind) in tagged {
            if merged.get(&language).is_none() {
                merged.tracks.push(CaptionTrack { language, kind, handle });
            }
        }

        merged
    }

    /// Look up a track by its exact language tag
    pub fn get(&self, language: &str) -> Option<&CaptionTrack> {
        self.tracks.iter().find(|track| track.language == language)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaptionTrack> {
        self.tracks.iter()
    }

    /// Language tags in selection order
    pub fn languages(&self) -> Vec<String> {
        self.tracks.iter().map(|track| track.language.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Caption extraction result for one video
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionResult {
    pub video_id: String,
    pub video_title: String,
    /// Selected language tag, `None` when nothing was selected
    pub language_used: Option<String>,
    /// Kind of the selected track
    pub caption_type: Option<CaptionKind>,
    /// Cleaned caption text; set only when a track was selected, fetched and cleaned
    pub captions: Option<String>,
    pub available_languages: Vec<String>,
    /// Why `captions` is missing, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptionResult {
    /// Result without captions, explained by `message`
    pub fn without_captions(
        video_id: impl Into<String>,
        video_title: impl Into<String>,
        available_languages: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            video_title: video_title.into(),
            language_used: None,
            caption_type: None,
            captions: None,
            available_languages,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Result for a request that failed before any caption data was available
    pub fn failed(video_id: impl Into<String>, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::without_captions(video_id, "", Vec::new(), message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tags: &[&str]) -> Vec<(String, String)> {
        tags.iter()
            .map(|tag| (tag.to_string(), format!("https://captions.test/{}", tag)))
            .collect()
    }

    #[test]
    fn test_merge_keeps_manual_before_automatic() {
        let tracks = CaptionTracks::merge(pairs(&["fr", "en-GB"]), pairs(&["de", "en"]));

        assert_eq!(tracks.languages(), vec!["fr", "en-GB", "de", "en"]);
        assert_eq!(tracks.get("fr").map(|t| t.kind), Some(CaptionKind::Manual));
        assert_eq!(tracks.get("en").map(|t| t.kind), Some(CaptionKind::Automatic));
    }

    #[test]
    fn test_merge_manual_wins_on_collision() {
        let manual = vec![("en".to_string(), "manual-handle".to_string())];
        let automatic = vec![
            ("es".to_string(), "auto-es".to_string()),
            ("en".to_string(), "auto-handle".to_string()),
        ];
        let tracks = CaptionTracks::merge(manual, automatic);

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks.languages(), vec!["en", "es"]);
        let en = tracks.get("en").unwrap();
        assert_eq!(en.kind, CaptionKind::Manual);
        assert_eq!(en.handle, "manual-handle");
    }

    #[test]
    fn test_merge_empty() {
        let tracks = CaptionTracks::merge(Vec::new(), Vec::new());
        assert!(tracks.is_empty());
        assert!(tracks.languages().is_empty());
    }

    #[test]
    fn test_caption_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CaptionKind::Automatic).unwrap(), "\"automatic\"");
        assert_eq!(serde_json::to_string(&CaptionKind::Manual).unwrap(), "\"manual\"");
    }
}
