//! Session view state
//!
//! The single derived snapshot consumed by the rendering collaborator. All
//! mutation goes through the reconciler; nothing else touches these fields.

use crate::core::{config::SessionConfig, geo::LatLng};
use crate::data::whisper::{WhisperKind, WhisperRecord};

/// Coarse lifecycle of a session. Errors are an orthogonal overlay, not a
/// phase: once a partial dataset exists the map stays `Ready` and any
/// failure is surfaced through [`ViewState::errors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Probe and fetch are still in flight; the loading indicator is up.
    Initializing,
    /// Both initial operations have settled, in either order.
    Ready,
}

/// Non-fatal error overlays. Each failure source owns its own slot, so the
/// merged state is identical whichever async completion is applied first
/// and a fetch failure never shadows a geolocation one or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorOverlays {
    /// Missing/invalid external configuration, set at session start.
    pub config: Option<String>,
    /// Probe denied, timed out or unsupported; the view fell back to the
    /// default area.
    pub geolocation: Option<String>,
    /// Last fetch failed; cleared by the next successful fetch.
    pub fetch: Option<String>,
}

impl ErrorOverlays {
    pub fn is_empty(&self) -> bool {
        self.config.is_none() && self.geolocation.is_none() && self.fetch.is_none()
    }

    /// Single banner line for display, most actionable first.
    pub fn banner(&self) -> Option<&str> {
        self.config
            .as_deref()
            .or(self.fetch.as_deref())
            .or(self.geolocation.as_deref())
    }

    /// Dismisses every overlay.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Render-ready projection of one selected whisper, mirroring the detail
/// panel fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperDetail {
    pub kind: WhisperKind,
    pub body: String,
    pub media_ref: Option<String>,
    /// Comma-joined emotion tags, or "None" when the record has none.
    pub emotions: String,
    /// `listened/cap` display pair.
    pub listens: String,
}

/// The reconciled view of the map at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub center: LatLng,
    pub zoom: u8,
    pub user_position: Option<LatLng>,
    pub records: Vec<WhisperRecord>,
    pub selected_id: Option<String>,
    pub loading: bool,
    pub errors: ErrorOverlays,
}

impl ViewState {
    /// Session-start defaults: no records, fallback center/zoom, loading.
    pub fn initial(config: &SessionConfig) -> Self {
        Self {
            phase: Phase::Initializing,
            center: config.default_center,
            zoom: config.default_zoom,
            user_position: None,
            records: Vec::new(),
            selected_id: None,
            loading: true,
            errors: ErrorOverlays::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// The currently selected record, if the selection is still valid.
    pub fn selected(&self) -> Option<&WhisperRecord> {
        let id = self.selected_id.as_deref()?;
        self.records.iter().find(|r| r.id == id)
    }

    /// Detail-panel projection of the current selection.
    pub fn detail(&self) -> Option<WhisperDetail> {
        let record = self.selected()?;
        let emotions = if record.emotions.is_empty() {
            "None".to_string()
        } else {
            record.emotions.join(", ")
        };
        Some(WhisperDetail {
            kind: record.kind,
            body: record.body.clone(),
            media_ref: record.media_ref.clone(),
            emotions,
            listens: format!("{}/{}", record.listen_count, record.listen_cap),
        })
    }
}
