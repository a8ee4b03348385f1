/// Caption language negotiation
use super::{CaptionTrack, CaptionTracks};

/// Language used when the caller does not ask for one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Pick one caption track for the requested language.
///
/// Precedence, first match wins:
/// 1. a track whose tag equals `requested` (`en` when `None`)
/// 2. the first track whose tag starts with `requested` (`en` -> `en-US`)
/// 3. the first track overall
///
/// Iteration order is the merged order of [`CaptionTracks`], so the result is
/// deterministic. Returns `None` only when no tracks are available.
pub fn select_language<'a>(requested: Option<&str>, available: &'a CaptionTracks) -> Option<&'a CaptionTrack> {
    let requested = requested.unwrap_or(DEFAULT_LANGUAGE);

    available
        .get(requested)
        .or_else(|| available.iter().find(|track| track.language.starts_with(requested)))
        .or_else(|| available.iter().next())
}
