//! Studio directory management.
//!
//! A studio is a plain directory holding every record of the content
//! pipeline: content items, title ideas, calendar slots, channel videos
//! and publishing records, one TOML file each. The directory is found
//! through the global config; a `.castdir/` marker identifies it.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::{GlobalConfig, StudioConfig};
use crate::content::Content;
use crate::error::{CastdirError, CastdirResult};
use crate::genlog::GenerationRecord;
use crate::publishing::{Platform, PublishingRecord};
use crate::slot::CalendarSlot;
use crate::store;
use crate::title::TitleIdea;
use crate::video::ChannelVideo;

const MARKER_DIR: &str = ".castdir";

pub struct Studio {
    root: PathBuf,
    config: StudioConfig,
}

impl Studio {
    /// Load the studio named by the global config.
    pub fn load() -> CastdirResult<Self> {
        let global = GlobalConfig::load()?;
        Self::open(global.studio_path())
    }

    /// Open a studio at an explicit path.
    pub fn open(root: PathBuf) -> CastdirResult<Self> {
        if !root.join(MARKER_DIR).is_dir() {
            return Err(CastdirError::StudioNotFound(root));
        }

        let config = StudioConfig::load(&root)?;
        Ok(Studio { root, config })
    }

    /// Create the studio directory skeleton. Idempotent: an existing
    /// studio is opened, its records untouched.
    pub fn init(root: PathBuf) -> CastdirResult<Self> {
        for dir in [
            MARKER_DIR,
            "content",
            "titles",
            "calendar",
            "videos",
            "publishing",
        ] {
            std::fs::create_dir_all(root.join(dir))?;
        }

        let config = if StudioConfig::path_for(&root).exists() {
            StudioConfig::load(&root)?
        } else {
            let config = StudioConfig::default();
            config.save(&root)?;
            config
        };

        Ok(Studio { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: StudioConfig) -> CastdirResult<()> {
        config.save(&self.root)?;
        self.config = config;
        Ok(())
    }

    fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    fn titles_dir(&self) -> PathBuf {
        self.root.join("titles")
    }

    fn calendar_dir(&self) -> PathBuf {
        self.root.join("calendar")
    }

    fn videos_dir(&self) -> PathBuf {
        self.root.join("videos")
    }

    fn publishing_dir(&self) -> PathBuf {
        self.root.join("publishing")
    }

    fn logs_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR).join("logs")
    }

    // -------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------

    /// Persist a new content item, returning the slug it was filed under.
    pub fn create_content(&self, content: &Content) -> CastdirResult<String> {
        let dir = self.content_dir();
        let slug = store::unique_slug(&dir, &content.title)?;
        store::write_toml(&dir.join(format!("{}.toml", slug)), content)?;
        Ok(slug)
    }

    pub fn save_content(&self, slug: &str, content: &Content) -> CastdirResult<()> {
        store::write_toml(&self.content_dir().join(format!("{}.toml", slug)), content)
    }

    /// All content items as (slug, record), sorted by slug.
    pub fn contents(&self) -> CastdirResult<Vec<(String, Content)>> {
        store::read_all(&self.content_dir())
    }

    /// Resolve a content item by slug or id prefix.
    pub fn find_content(&self, key: &str) -> CastdirResult<(String, Content)> {
        self.contents()?
            .into_iter()
            .find(|(slug, content)| slug == key || content.id.to_string().starts_with(key))
            .ok_or_else(|| CastdirError::ContentNotFound(key.to_string()))
    }

    pub fn find_content_by_id(&self, id: Uuid) -> CastdirResult<(String, Content)> {
        self.contents()?
            .into_iter()
            .find(|(_, content)| content.id == id)
            .ok_or_else(|| CastdirError::ContentNotFound(id.to_string()))
    }

    // -------------------------------------------------------------------
    // Title ideas
    // -------------------------------------------------------------------

    pub fn create_title_idea(&self, idea: &TitleIdea) -> CastdirResult<String> {
        let dir = self.titles_dir();
        let slug = store::unique_slug(&dir, &idea.title)?;
        store::write_toml(&dir.join(format!("{}.toml", slug)), idea)?;
        Ok(slug)
    }

    pub fn save_title_idea(&self, slug: &str, idea: &TitleIdea) -> CastdirResult<()> {
        store::write_toml(&self.titles_dir().join(format!("{}.toml", slug)), idea)
    }

    pub fn title_ideas(&self) -> CastdirResult<Vec<(String, TitleIdea)>> {
        store::read_all(&self.titles_dir())
    }

    pub fn find_title_idea(&self, id: Uuid) -> CastdirResult<(String, TitleIdea)> {
        self.title_ideas()?
            .into_iter()
            .find(|(_, idea)| idea.id == id)
            .ok_or_else(|| CastdirError::TitleNotFound(id.to_string()))
    }

    // -------------------------------------------------------------------
    // Calendar slots
    // -------------------------------------------------------------------

    fn slot_path(&self, date: NaiveDate) -> PathBuf {
        self.calendar_dir().join(format!("{}.toml", date))
    }

    /// Book a slot. The date-named file is the uniqueness constraint:
    /// returns false (and writes nothing) when the date is already booked.
    pub fn create_slot(&self, slot: &CalendarSlot) -> CastdirResult<bool> {
        let path = self.slot_path(slot.slot_date);
        if path.exists() {
            return Ok(false);
        }
        store::write_toml(&path, slot)?;
        Ok(true)
    }

    /// Overwrite an existing slot record.
    pub fn save_slot(&self, slot: &CalendarSlot) -> CastdirResult<()> {
        store::write_toml(&self.slot_path(slot.slot_date), slot)
    }

    pub fn slot_on(&self, date: NaiveDate) -> CastdirResult<CalendarSlot> {
        let path = self.slot_path(date);
        if !path.exists() {
            return Err(CastdirError::SlotNotFound(date));
        }
        store::read_toml(&path)
    }

    /// Slots with dates in [from, to], ascending. Date-named files sort
    /// chronologically for free.
    pub fn slots_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CastdirResult<Vec<CalendarSlot>> {
        let records: Vec<(String, CalendarSlot)> = store::read_all(&self.calendar_dir())?;
        Ok(records
            .into_iter()
            .map(|(_, slot)| slot)
            .filter(|slot| slot.slot_date >= from && slot.slot_date <= to)
            .collect())
    }

    // -------------------------------------------------------------------
    // Channel videos
    // -------------------------------------------------------------------

    fn video_path(&self, video_id: &str) -> PathBuf {
        self.videos_dir().join(format!("{}.toml", video_id))
    }

    /// Idempotency check for the upload poller.
    pub fn has_video(&self, video_id: &str) -> bool {
        self.video_path(video_id).exists()
    }

    pub fn save_video(&self, video: &ChannelVideo) -> CastdirResult<()> {
        store::write_toml(&self.video_path(&video.video_id), video)
    }

    pub fn videos(&self) -> CastdirResult<Vec<ChannelVideo>> {
        let records: Vec<(String, ChannelVideo)> = store::read_all(&self.videos_dir())?;
        Ok(records.into_iter().map(|(_, video)| video).collect())
    }

    // -------------------------------------------------------------------
    // Publishing records
    // -------------------------------------------------------------------

    fn publishing_path(&self, content_id: Uuid, platform: Platform) -> PathBuf {
        self.publishing_dir()
            .join(format!("{}.{}.toml", content_id, platform))
    }

    pub fn publishing_record(
        &self,
        content_id: Uuid,
        platform: Platform,
    ) -> CastdirResult<Option<PublishingRecord>> {
        let path = self.publishing_path(content_id, platform);
        if !path.exists() {
            return Ok(None);
        }
        store::read_toml(&path).map(Some)
    }

    pub fn save_publishing_record(&self, record: &PublishingRecord) -> CastdirResult<()> {
        store::write_toml(
            &self.publishing_path(record.content_id, record.platform),
            record,
        )
    }

    // -------------------------------------------------------------------
    // Generation log
    // -------------------------------------------------------------------

    /// Append a model-call record to .castdir/logs/generations.jsonl
    pub fn append_generation(&self, record: &GenerationRecord) -> CastdirResult<()> {
        let dir = self.logs_dir();
        std::fs::create_dir_all(&dir)?;

        let line = serde_json::to_string(record)
            .map_err(|e| CastdirError::Serialization(e.to_string()))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("generations.jsonl"))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentType;
    use crate::genlog::Operation;
    use chrono::NaiveDate;

    fn studio() -> (tempfile::TempDir, Studio) {
        let dir = tempfile::tempdir().unwrap();
        let studio = Studio::init(dir.path().to_path_buf()).unwrap();
        (dir, studio)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_requires_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Studio::open(dir.path().to_path_buf()),
            Err(CastdirError::StudioNotFound(_))
        ));

        Studio::init(dir.path().to_path_buf()).unwrap();
        assert!(Studio::open(dir.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_content_found_by_slug_and_id_prefix() {
        let (_dir, studio) = studio();

        let content = Content::new("Sharpen Chisels Fast", ContentType::Video);
        let slug = studio.create_content(&content).unwrap();
        assert_eq!(slug, "sharpen-chisels-fast");

        let (found_slug, found) = studio.find_content("sharpen-chisels-fast").unwrap();
        assert_eq!(found_slug, slug);
        assert_eq!(found.id, content.id);

        let prefix = &content.id.to_string()[..8];
        let (_, by_id) = studio.find_content(prefix).unwrap();
        assert_eq!(by_id.id, content.id);

        assert!(studio.find_content("missing").is_err());
    }

    #[test]
    fn test_slot_date_is_unique() {
        let (_dir, studio) = studio();

        let slot = CalendarSlot::new(date(2024, 2, 5));
        assert!(studio.create_slot(&slot).unwrap());
        assert!(!studio.create_slot(&slot).unwrap());

        let loaded = studio.slot_on(date(2024, 2, 5)).unwrap();
        assert_eq!(loaded.slot_date, slot.slot_date);
    }

    #[test]
    fn test_slots_between_filters_and_sorts() {
        let (_dir, studio) = studio();

        for day in [12, 3, 20] {
            studio
                .create_slot(&CalendarSlot::new(date(2024, 3, day)))
                .unwrap();
        }

        let slots = studio
            .slots_between(date(2024, 3, 1), date(2024, 3, 15))
            .unwrap();
        let days: Vec<u32> = slots
            .iter()
            .map(|s| chrono::Datelike::day(&s.slot_date))
            .collect();
        assert_eq!(days, [3, 12]);
    }

    #[test]
    fn test_video_existence_check() {
        let (_dir, studio) = studio();

        assert!(!studio.has_video("dQw4w9WgXcQ"));
        studio
            .save_video(&ChannelVideo::new("dQw4w9WgXcQ", "A video"))
            .unwrap();
        assert!(studio.has_video("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_publishing_record_roundtrip() {
        let (_dir, studio) = studio();
        let content_id = Uuid::new_v4();

        assert!(studio
            .publishing_record(content_id, Platform::Shopify)
            .unwrap()
            .is_none());

        let mut record = PublishingRecord::pending(content_id, Platform::Shopify);
        record.mark_published("12345".to_string(), None);
        studio.save_publishing_record(&record).unwrap();

        let loaded = studio
            .publishing_record(content_id, Platform::Shopify)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.external_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_generation_log_appends_lines() {
        let (dir, studio) = studio();

        for _ in 0..2 {
            studio
                .append_generation(&GenerationRecord::new(
                    Operation::GenerateTitles,
                    "claude-sonnet-4-5-20250929",
                    100,
                    200,
                ))
                .unwrap();
        }

        let log = std::fs::read_to_string(
            dir.path().join(".castdir").join("logs").join("generations.jsonl"),
        )
        .unwrap();
        assert_eq!(log.lines().count(), 2);
    }
}
