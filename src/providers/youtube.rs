//! YouTube Data API and InnerTube caption access.

use anyhow::{bail, Context, Result};
use castdir_core::transcript::parse_timed_text;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const PLAYLIST_ITEMS_URL: &str = "https://www.googleapis.com/youtube/v3/playlistItems";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?prettyPrint=false";

/// A recent upload as reported by the uploads playlist.
#[derive(Debug)]
pub struct Upload {
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct PlaylistResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    resource_id: ResourceId,
    title: String,
    #[serde(default)]
    description: String,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

/// List the channel's most recent uploads via its uploads playlist (the
/// channel id with the UC prefix swapped for UU).
pub async fn list_recent_uploads(
    client: &reqwest::Client,
    api_key: &str,
    channel_id: &str,
    max_results: usize,
) -> Result<Vec<Upload>> {
    let playlist_id = uploads_playlist_id(channel_id);
    let max_results = max_results.to_string();

    let response = client
        .get(PLAYLIST_ITEMS_URL)
        .query(&[
            ("part", "snippet"),
            ("playlistId", playlist_id.as_str()),
            ("maxResults", max_results.as_str()),
            ("key", api_key),
        ])
        .send()
        .await
        .context("YouTube API request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("YouTube API error {}: {}", status, body);
    }

    let data: PlaylistResponse = response
        .json()
        .await
        .context("Failed to parse YouTube playlist response")?;

    Ok(data
        .items
        .into_iter()
        .map(|item| Upload {
            video_id: item.snippet.resource_id.video_id,
            title: item.snippet.title,
            description: if item.snippet.description.is_empty() {
                None
            } else {
                Some(item.snippet.description)
            },
            published_at: item.snippet.published_at,
        })
        .collect())
}

fn uploads_playlist_id(channel_id: &str) -> String {
    match channel_id.strip_prefix("UC") {
        Some(rest) => format!("UU{}", rest),
        None => channel_id.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// "asr" for auto-generated tracks, absent for manual captions.
    kind: Option<String>,
}

/// Fetch a video's captions as plain text.
///
/// Uses the InnerTube player API with the Android client, whose caption
/// URLs work server-side. Manual captions are preferred over
/// auto-generated (ASR). Returns None when the video has no captions.
pub async fn fetch_transcript(
    client: &reqwest::Client,
    video_id: &str,
) -> Result<Option<String>> {
    let body = serde_json::json!({
        "videoId": video_id,
        "context": {
            "client": {
                "clientName": "ANDROID",
                "clientVersion": "19.02.39",
                "hl": "en",
                "gl": "US",
                "androidSdkVersion": 34,
            }
        }
    });

    let response = client
        .post(INNERTUBE_PLAYER_URL)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("InnerTube player request failed for {}", video_id))?;

    if !response.status().is_success() {
        bail!("InnerTube player error {} for {}", response.status(), video_id);
    }

    let player: PlayerResponse = response
        .json()
        .await
        .context("Failed to parse InnerTube player response")?;

    let tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    let Some(track) = pick_track(&tracks) else {
        return Ok(None);
    };

    let caption_response = client
        .get(&track.base_url)
        .send()
        .await
        .with_context(|| format!("Caption download failed for {}", video_id))?;

    if !caption_response.status().is_success() {
        bail!(
            "Caption download error {} for {}",
            caption_response.status(),
            video_id
        );
    }

    let xml = caption_response.text().await.unwrap_or_default();
    if xml.len() < 10 {
        return Ok(None);
    }

    Ok(Some(parse_timed_text(&xml)))
}

/// Prefer: English manual → English ASR → any manual → first available.
fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    let is_manual = |t: &CaptionTrack| t.kind.as_deref() != Some("asr");

    tracks
        .iter()
        .find(|t| t.language_code == "en" && is_manual(t))
        .or_else(|| tracks.iter().find(|t| t.language_code == "en"))
        .or_else(|| tracks.iter().find(|t| is_manual(t)))
        .or_else(|| tracks.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://captions/{lang}"),
            language_code: lang.to_string(),
            kind: kind.map(String::from),
        }
    }

    #[test]
    fn test_uploads_playlist_id() {
        assert_eq!(uploads_playlist_id("UCabc123"), "UUabc123");
        assert_eq!(uploads_playlist_id("HC-legacy"), "HC-legacy");
    }

    #[test]
    fn test_track_preference_order() {
        let tracks = vec![
            track("de", None),
            track("en", Some("asr")),
            track("en", None),
        ];
        assert_eq!(pick_track(&tracks).unwrap().language_code, "en");
        assert_eq!(pick_track(&tracks).unwrap().kind, None);

        let no_manual_en = vec![track("de", None), track("en", Some("asr"))];
        assert_eq!(
            pick_track(&no_manual_en).unwrap().kind.as_deref(),
            Some("asr")
        );

        let no_en = vec![track("fr", Some("asr")), track("de", None)];
        assert_eq!(pick_track(&no_en).unwrap().language_code, "de");

        assert!(pick_track(&[]).is_none());
    }
}
