//! Content items moving through the production pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CastdirError;

/// Production stage of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idea,
    Brief,
    Script,
    Record,
    Edit,
    Review,
    Publish,
    Distribute,
    Archived,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 9] = [
        Stage::Idea,
        Stage::Brief,
        Stage::Script,
        Stage::Record,
        Stage::Edit,
        Stage::Review,
        Stage::Publish,
        Stage::Distribute,
        Stage::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idea => "idea",
            Stage::Brief => "brief",
            Stage::Script => "script",
            Stage::Record => "record",
            Stage::Edit => "edit",
            Stage::Review => "review",
            Stage::Publish => "publish",
            Stage::Distribute => "distribute",
            Stage::Archived => "archived",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CastdirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                CastdirError::Parse(format!(
                    "Unknown stage '{}'. Expected one of: {}",
                    s,
                    Stage::ALL.map(|st| st.as_str()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    Podcast,
    BlogPost,
    ShortForm,
    Newsletter,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Podcast => "podcast",
            ContentType::BlogPost => "blog_post",
            ContentType::ShortForm => "short_form",
            ContentType::Newsletter => "newsletter",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a content item came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    #[default]
    Manual,
    Youtube,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Manual => "manual",
            ContentSource::Youtube => "youtube",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of content tracked from idea to distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub content_type: ContentType,
    pub stage: Stage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub auto_publish: bool,
    #[serde(default)]
    pub source: ContentSource,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        let now = Utc::now();
        Content {
            id: Uuid::new_v4(),
            title: title.into(),
            content_type,
            stage: Stage::Idea,
            brief: None,
            script: None,
            blog_body: None,
            seo_title: None,
            seo_description: None,
            target_keywords: Vec::new(),
            tags: Vec::new(),
            due_date: None,
            auto_publish: false,
            source: ContentSource::Manual,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn has_blog(&self) -> bool {
        self.blog_body.as_deref().is_some_and(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trips_through_str() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        assert!("shipping".parse::<Stage>().is_err());
    }

    #[test]
    fn test_content_serializes_without_empty_fields() {
        let content = Content::new("First video", ContentType::Video);
        let toml = toml::to_string(&content).unwrap();
        assert!(!toml.contains("brief"));
        assert!(!toml.contains("blog_body"));
        assert!(toml.contains("stage = \"idea\""));
    }
}
