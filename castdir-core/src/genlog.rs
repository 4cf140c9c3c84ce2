//! Append-only log of model generations.
//!
//! One JSON line per model call, kept for token accounting. Appending
//! lives on `Studio`; this module only defines the record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    GenerateTitles,
    ExpandIdea,
    GenerateScript,
    GenerateBlog,
    Refine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<Uuid>,
    pub operation: Operation,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

impl GenerationRecord {
    pub fn new(
        operation: Operation,
        model: impl Into<String>,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Self {
        GenerationRecord {
            timestamp: Utc::now(),
            content_id: None,
            operation,
            model: model.into(),
            input_tokens,
            output_tokens,
            accepted: Some(true),
        }
    }

    pub fn for_content(mut self, content_id: Uuid) -> Self {
        self.content_id = Some(content_id);
        self
    }
}
