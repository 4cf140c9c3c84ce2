//! Per-platform publishing state for finished content.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ERROR_MAX_CHARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Shopify,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shopify => "shopify",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Pending,
    Published,
    Failed,
}

/// Tracks one content item's publication to one external platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingRecord {
    pub content_id: Uuid,
    pub platform: Platform,
    pub status: PublishStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub updated_at: DateTime<Utc>,
}

impl PublishingRecord {
    pub fn pending(content_id: Uuid, platform: Platform) -> Self {
        PublishingRecord {
            content_id,
            platform,
            status: PublishStatus::Pending,
            external_id: None,
            external_url: None,
            error: None,
            updated_at: Utc::now(),
        }
    }

    pub fn mark_published(&mut self, external_id: String, external_url: Option<String>) {
        self.status = PublishStatus::Published;
        self.external_id = Some(external_id);
        self.external_url = external_url;
        self.error = None;
        self.updated_at = Utc::now();
    }

    pub fn mark_failed(&mut self, error: &str) {
        self.status = PublishStatus::Failed;
        self.error = Some(error.chars().take(ERROR_MAX_CHARS).collect());
        self.updated_at = Utc::now();
    }
}
