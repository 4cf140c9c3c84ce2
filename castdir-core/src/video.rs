//! Channel uploads pulled from YouTube.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An upload discovered on the creator's channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelVideo {
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<Uuid>,

    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// None = transcript fetch not yet attempted.
    /// Some("") = attempted, no captions available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl ChannelVideo {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        ChannelVideo {
            video_id: video_id.into(),
            content_id: None,
            title: title.into(),
            description: None,
            published_at: None,
            transcript: None,
            created_at: Utc::now(),
        }
    }

    /// True until a transcript fetch has been attempted.
    pub fn transcript_pending(&self) -> bool {
        self.transcript.is_none()
    }

    /// True when captions were actually found.
    pub fn has_transcript(&self) -> bool {
        self.transcript.as_deref().is_some_and(|t| !t.is_empty())
    }
}
