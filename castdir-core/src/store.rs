//! Record persistence helpers.
//!
//! Every record is a TOML file. Writes go through a temp file and rename
//! so a crashed process never leaves a half-written record behind.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CastdirError, CastdirResult};

const MAX_SLUG_CHARS: usize = 50;

pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> CastdirResult<()> {
    let body =
        toml::to_string_pretty(value).map_err(|e| CastdirError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_toml<T: DeserializeOwned>(path: &Path) -> CastdirResult<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| CastdirError::Parse(format!("{}: {}", path.display(), e)))
}

/// Read every .toml record in a directory as (file stem, record) pairs,
/// sorted by stem so listings are deterministic. A missing directory is
/// an empty store, not an error.
pub fn read_all<T: DeserializeOwned>(dir: &Path) -> CastdirResult<Vec<(String, T)>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(Vec::new()),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        records.push((stem, read_toml(&path)?));
    }
    Ok(records)
}

/// Pick a record filename slug that doesn't collide with existing files
/// in `dir`. If the base slug is taken, tries slug-2, slug-3, etc.
pub fn unique_slug(dir: &Path, title: &str) -> CastdirResult<String> {
    let base = base_slug(title);

    if !dir.join(format!("{}.toml", base)).exists() {
        return Ok(base);
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}", base, n);
        if !dir.join(format!("{}.toml", suffixed)).exists() {
            return Ok(suffixed);
        }
    }

    Err(CastdirError::Config(format!(
        "Too many record name collisions for '{}'",
        base
    )))
}

fn base_slug(title: &str) -> String {
    let slugged = slug::slugify(title);
    if slugged.is_empty() {
        return "untitled".to_string();
    }

    slugged
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.toml");

        let note = Note {
            text: "hello".to_string(),
        };
        write_toml(&path, &note).unwrap();

        assert_eq!(read_toml::<Note>(&path).unwrap(), note);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_read_all_sorted_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "a", "c"] {
            let note = Note {
                text: name.to_string(),
            };
            write_toml(&dir.path().join(format!("{}.toml", name)), &note).unwrap();
        }

        let records: Vec<(String, Note)> = read_all(dir.path()).unwrap();
        let stems: Vec<&str> = records.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(stems, ["a", "b", "c"]);
    }

    #[test]
    fn test_read_all_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records: Vec<(String, Note)> = read_all(&dir.path().join("nothing")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unique_slug_suffixes_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_slug(dir.path(), "My First Video!").unwrap(), "my-first-video");

        std::fs::write(dir.path().join("my-first-video.toml"), "").unwrap();
        assert_eq!(
            unique_slug(dir.path(), "My First Video!").unwrap(),
            "my-first-video-2"
        );
    }

    #[test]
    fn test_empty_title_slug() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_slug(dir.path(), "???").unwrap(), "untitled");
    }
}
