//! Static whisper catalog
//!
//! A predefined list of addable content not yet shown on the map, keyed by
//! filename. Entries are raw external descriptions; a [`WhisperRecord`] is
//! derived on demand through the same validation the fetch path uses.

use crate::core::geo::LatLng;
use crate::data::whisper::{clean_emotions, WhisperKind, WhisperRecord};
use crate::{Result, WhisprError};
use serde::Deserialize;

/// Listen budget granted to manually added whispers.
pub const DEFAULT_LISTEN_CAP: u32 = 10;

/// Raw catalog entry: `{filename, emotion, location}` with slash-delimited
/// emotion tags and a `"lat,lng"` location string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub filename: String,
    pub emotion: String,
    pub location: String,
}

impl CatalogEntry {
    /// Derives a whisper record from this entry. Fails only when the
    /// location string does not parse; the caller handles duplicate and
    /// not-found checks against the live record set.
    pub fn to_record(&self) -> Result<WhisperRecord> {
        let position = LatLng::parse(&self.location)
            .ok_or_else(|| WhisprError::InvalidLocation(self.filename.clone()))?;

        Ok(WhisperRecord {
            id: self.filename.clone(),
            raw_location: self.location.clone(),
            kind: kind_for_filename(&self.filename),
            body: String::new(),
            media_ref: Some(self.filename.clone()),
            emotions: clean_emotions(self.emotion.split('/')),
            listen_count: 0,
            listen_cap: DEFAULT_LISTEN_CAP,
            position,
        })
    }
}

/// Content kind by file extension, mirroring the upload endpoint's
/// image/video type tables.
fn kind_for_filename(filename: &str) -> WhisperKind {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" => WhisperKind::Image,
        "mp4" | "webm" | "ogg" | "mov" => WhisperKind::Video,
        _ => WhisperKind::Text,
    }
}

/// The held catalog, looked up by exact filename match.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parses a catalog from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn lookup(&self, filename: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            filename: "v1.mov".to_string(),
            emotion: "joy/calm".to_string(),
            location: "40.0,-74.0".to_string(),
        }
    }

    #[test]
    fn test_to_record() {
        let record = entry().to_record().unwrap();
        assert_eq!(record.id, "v1.mov");
        assert_eq!(record.kind, WhisperKind::Video);
        assert_eq!(record.emotions, vec!["joy".to_string(), "calm".to_string()]);
        assert_eq!(record.position, LatLng::new(40.0, -74.0));
        assert_eq!(record.listen_count, 0);
        assert_eq!(record.listen_cap, DEFAULT_LISTEN_CAP);
    }

    #[test]
    fn test_to_record_invalid_location() {
        let mut bad = entry();
        bad.location = "somewhere".to_string();
        assert!(matches!(
            bad.to_record(),
            Err(crate::WhisprError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_emotion_split_drops_empty_segments() {
        let mut e = entry();
        e.emotion = "joy// calm /".to_string();
        let record = e.to_record().unwrap();
        assert_eq!(record.emotions, vec!["joy".to_string(), "calm".to_string()]);
    }

    #[test]
    fn test_kind_inference() {
        assert_eq!(kind_for_filename("a.PNG"), WhisperKind::Image);
        assert_eq!(kind_for_filename("clip.mp4"), WhisperKind::Video);
        assert_eq!(kind_for_filename("note"), WhisperKind::Text);
    }

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = Catalog::from_json(
            r#"[{"filename": "v1.mov", "emotion": "joy/calm", "location": "40.0,-74.0"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("v1.mov").is_some());
        assert!(catalog.lookup("v2.mov").is_none());
    }
}
