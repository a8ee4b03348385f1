/// Topic extraction from video descriptions
///
/// Descriptions are free text written by people, so topics are recovered with
/// a cascade of pattern rules: timestamped lines first, then numbered or
/// bulleted lists labelled with synthetic section numbers.

pub mod extractor;
pub mod pipeline;
pub mod rules;

// Re-export main types
pub use extractor::TopicExtractor;
pub use pipeline::TopicPipeline;
pub use rules::TopicRule;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::VideoSnippet;

/// Topics shorter than this (after trimming) are noise such as "Hi" or "ok"
pub const MIN_TOPIC_CHARS: usize = 4;

/// A single topic found in a description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicEntry {
    /// Timecode such as `3:45` or `1:02:03`, or a synthetic `Section N` label
    pub timestamp: String,
    /// Topic text, trimmed
    pub topic: String,
}

impl TopicEntry {
    /// Build an entry, trimming the topic and rejecting ones that are too short
    pub fn new(timestamp: impl Into<String>, topic: &str) -> Option<Self> {
        let topic = topic.trim();
        if topic.chars().count() < MIN_TOPIC_CHARS {
            return None;
        }

        Some(Self {
            timestamp: timestamp.into(),
            topic: topic.to_string(),
        })
    }

    /// Label used for list-style topics without a timecode
    pub fn section_label(index: usize) -> String {
        format!("Section {}", index)
    }
}

/// Topic extraction result for one video
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TopicResult {
    pub video_id: String,
    pub video_title: String,
    pub channel_title: String,
    pub description: String,
    pub topics: Vec<TopicEntry>,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TopicResult {
    /// Assemble a result from the video snippet and the extracted topics
    pub fn from_snippet(video_id: impl Into<String>, snippet: VideoSnippet, topics: Vec<TopicEntry>) -> Self {
        Self {
            video_id: video_id.into(),
            video_title: snippet.title,
            channel_title: snippet.channel_title,
            description: snippet.description,
            topics,
            tags: snippet.tags,
            category_id: snippet.category_id,
            published_at: snippet.published_at,
            error: None,
        }
    }

    /// Result carrying only an error and no topics
    pub fn failed(video_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
