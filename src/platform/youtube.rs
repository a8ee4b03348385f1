/// YouTube backend: Data API v3 for metadata, the InnerTube player for caption tracks
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{PlaylistPage, TrackListing, VideoPlatform, VideoSnippet};
use crate::captions::CaptionTrack;
use crate::config::Config;
use crate::error::{ExtractError, Result};
use crate::playlist::{PlaylistInfo, PlaylistVideo};

const UNKNOWN: &str = "Unknown";

/// InnerTube web client identity sent with player requests
const INNERTUBE_CLIENT_NAME: &str = "WEB";
const INNERTUBE_CLIENT_VERSION: &str = "2.20241126.01.00";

static INNERTUBE_API_KEY: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#,
        r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// HTTP client for YouTube
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base_url: String,
    watch_base_url: String,
    payload_format: String,
    page_size: u32,
}

// Data API v3 payloads

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Item<T> {
    snippet: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippetDto {
    title: Option<String>,
    channel_title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    category_id: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippetDto {
    title: Option<String>,
    channel_title: Option<String>,
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    position: u32,
    resource_id: ResourceIdDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceIdDto {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistSnippetDto {
    title: Option<String>,
    #[serde(default)]
    description: String,
    channel_title: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<u16>,
    message: String,
}

// InnerTube player payloads

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<PlayerCaptions>,
    video_details: Option<PlayerVideoDetails>,
}

#[derive(Debug, Deserialize)]
struct PlayerVideoDetails {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<PlayerCaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.youtube.request_timeout_seconds))
            .user_agent(config.youtube.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key: config.youtube.api_key.clone(),
            api_base_url: config.youtube.api_base_url.trim_end_matches('/').to_string(),
            watch_base_url: config.youtube.watch_base_url.trim_end_matches('/').to_string(),
            payload_format: config.captions.payload_format.clone(),
            page_size: config.playlist.page_size,
        })
    }

    /// GET a Data API resource with `part=snippet` and the API key
    async fn api_get<T: DeserializeOwned>(&self, resource: &str, params: &[(&str, &str)]) -> Result<ListResponse<T>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ExtractError::Configuration("YouTube API key not configured".to_string()))?;

        let endpoint = format!("{}/{}", self.api_base_url, resource);
        debug!("🌐 GET {} {:?}", endpoint, params);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("part", "snippet")])
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_player_response(&self, video_id: &str) -> Result<PlayerResponse> {
        let watch_url = format!("{}/watch", self.watch_base_url);
        debug!("🌐 Fetching watch page for {}", video_id);

        let page_html = self
            .client
            .get(&watch_url)
            .query(&[("v", video_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let innertube_key = extract_innertube_key(&page_html)
            .ok_or_else(|| ExtractError::Parsing("could not find InnerTube API key on watch page".to_string()))?;

        let player_url = format!("{}/youtubei/v1/player", self.watch_base_url);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": "en",
                    "gl": "US",
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let player = self
            .client
            .post(&player_url)
            .query(&[("key", innertube_key.as_str()), ("prettyPrint", "false")])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(player)
    }

    /// Track URL with the `fmt` parameter forced to the configured format
    fn payload_url(&self, handle: &str) -> Result<Url> {
        let mut url = Url::parse(handle)?;
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "fmt")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair("fmt", &self.payload_format);

        Ok(url)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn list_caption_tracks(&self, video_id: &str) -> Result<TrackListing> {
        let player = self.fetch_player_response(video_id).await?;

        let mut listing = TrackListing {
            video_title: player.video_details.and_then(|details| details.title),
            ..TrackListing::default()
        };

        let tracks = player
            .captions
            .and_then(|captions| captions.player_captions_tracklist_renderer)
            .map(|renderer| renderer.caption_tracks)
            .unwrap_or_default();

        for track in tracks {
            let pair = (track.language_code, track.base_url);
            if track.kind.as_deref() == Some("asr") {
                listing.automatic.push(pair);
            } else {
                listing.manual.push(pair);
            }
        }

        debug!(
            "🌐 Video {} lists {} manual and {} automatic tracks",
            video_id,
            listing.manual.len(),
            listing.automatic.len()
        );

        Ok(listing)
    }

    async fn fetch_caption_payload(&self, track: &CaptionTrack) -> Result<String> {
        let url = self.payload_url(&track.handle)?;
        debug!("🌐 Downloading {} captions", track.language);

        let payload = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(payload)
    }

    async fn fetch_video_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>> {
        let response: ListResponse<Item<VideoSnippetDto>> = self.api_get("videos", &[("id", video_id)]).await?;

        Ok(response.items.into_iter().next().map(|item| {
            let snippet = item.snippet;
            VideoSnippet {
                title: snippet.title.unwrap_or_else(|| UNKNOWN.to_string()),
                channel_title: snippet.channel_title.unwrap_or_else(|| UNKNOWN.to_string()),
                description: snippet.description,
                tags: snippet.tags,
                category_id: snippet.category_id,
                published_at: snippet.published_at,
            }
        }))
    }

    async fn fetch_playlist_page(&self, playlist_id: &str, page_token: Option<&str>) -> Result<PlaylistPage> {
        let page_size = self.page_size.to_string();
        let mut params = vec![("playlistId", playlist_id), ("maxResults", page_size.as_str())];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response: ListResponse<Item<PlaylistItemSnippetDto>> = self.api_get("playlistItems", &params).await?;

        // Deleted or private entries come back without a video id
        let videos = response
            .items
            .into_iter()
            .filter_map(|item| {
                let snippet = item.snippet;
                Some(PlaylistVideo {
                    video_id: snippet.resource_id.video_id?,
                    title: snippet.title.unwrap_or_else(|| UNKNOWN.to_string()),
                    channel_title: snippet.channel_title.unwrap_or_else(|| UNKNOWN.to_string()),
                    published_at: snippet.published_at,
                    position: snippet.position,
                })
            })
            .collect();

        Ok(PlaylistPage {
            videos,
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
        })
    }

    async fn fetch_playlist_info(&self, playlist_id: &str) -> Result<Option<PlaylistInfo>> {
        let response: ListResponse<Item<PlaylistSnippetDto>> = self.api_get("playlists", &[("id", playlist_id)]).await?;

        Ok(response.items.into_iter().next().map(|item| {
            let snippet = item.snippet;
            PlaylistInfo {
                title: snippet.title.unwrap_or_else(|| UNKNOWN.to_string()),
                description: snippet.description,
                channel_title: snippet.channel_title.unwrap_or_else(|| UNKNOWN.to_string()),
                published_at: snippet.published_at,
            }
        }))
    }
}

fn extract_innertube_key(html: &str) -> Option<String> {
    INNERTUBE_API_KEY
        .iter()
        .find_map(|re| re.captures(html))
        .map(|caps| caps[1].to_string())
}

/// Decode the Data API error envelope, falling back to the raw body
fn api_error(status: u16, body: &str) -> ExtractError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => ExtractError::Api {
            status: envelope.error.code.unwrap_or(status),
            message: envelope.error.message,
        },
        Err(_) => ExtractError::Api {
            status,
            message: if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            },
        },
    }
}
