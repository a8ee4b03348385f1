/// yt-extract - YouTube caption, topic and playlist extraction
///
/// Lists a video's caption tracks, picks one for the requested language and
/// cleans it to plain text; recovers topic outlines from video descriptions;
/// and collects the videos of a playlist.

pub mod captions;
pub mod config;
pub mod error;
pub mod extractor;
pub mod links;
pub mod platform;
pub mod playlist;
pub mod topics;

// Re-export main types for easy access
pub use crate::captions::{clean_caption_text, select_language, CaptionKind, CaptionResult, CaptionTrack, CaptionTracks};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{ExtractError, Result};
pub use crate::extractor::YouTubeExtractor;
pub use crate::platform::{create_platform, VideoPlatform, YouTubeClient};
pub use crate::playlist::{PlaylistInfo, PlaylistResult, PlaylistVideo};
pub use crate::topics::{TopicEntry, TopicExtractor, TopicResult};
