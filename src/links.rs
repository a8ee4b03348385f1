/// YouTube link parsing: URL validation and video/playlist ID extraction
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const YOUTUBE_HOSTS: [&str; 4] = ["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

static VIDEO_ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/)([^&\n?#]+)",
        r"youtube\.com/v/([^&\n?#]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Extract the video ID from the common YouTube URL shapes
/// (`watch?v=`, `youtu.be/`, `embed/`, `shorts/`, `v/`).
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

/// Extract the playlist ID from the `list` query parameter of a youtube.com URL.
/// The host must be one of the youtube.com hosts exactly; look-alike domains are rejected.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if host == "youtu.be" || !YOUTUBE_HOSTS.contains(&host) {
        return None;
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Check whether a URL points at a YouTube host
pub fn is_valid_youtube_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map_or(false, |host| YOUTUBE_HOSTS.contains(&host)),
        Err(_) => false,
    }
}
