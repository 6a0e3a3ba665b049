//! # whispr-map
//!
//! View-state engine for a map of geotagged "whispers" (short text, image
//! or video snippets with emotion tags).
//!
//! The crate owns the data-acquisition-and-reconciliation pipeline: parsing
//! untrusted `"lat,lng"` strings into validated coordinates, merging the
//! platform geolocation probe and the remote whisper fetch into one
//! consistent view state, filtering invalid records without aborting the
//! batch, and running a single-selection model over the marker set. Actual
//! tile/marker painting is left to a rendering collaborator that consumes
//! [`RenderView`].

pub mod core;
pub mod data;
pub mod net;
pub mod render;
pub mod session;

// Re-export public API
pub use crate::core::{config::SessionConfig, geo::LatLng};

pub use data::{
    catalog::{Catalog, CatalogEntry},
    whisper::{WhisperKind, WhisperRecord},
};

pub use net::{
    fetcher::{HttpWhisperSource, WhisperSource},
    probe::{probe_position, PositionProvider, ProbeFix, UnsupportedPlatform},
};

pub use render::{MarkerSpec, RenderView};

pub use session::{
    reconciler::{Reconciler, SessionEvent},
    state::{ErrorOverlays, Phase, ViewState, WhisperDetail},
    MapSession,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, WhisprError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum WhisprError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("whisper {0} is already on the map")]
    Duplicate(String),

    #[error("no catalog entry named {0}")]
    NotFound(String),

    #[error("invalid location on catalog entry {0}")]
    InvalidLocation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session is torn down")]
    SessionClosed,
}
