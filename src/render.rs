//! Outbound projection for the rendering collaborator
//!
//! The renderer is a capability surface that accepts a flat marker list and
//! reports clicks back by marker id. It never sees raw wire data.

use crate::core::geo::LatLng;
use crate::session::state::{ErrorOverlays, ViewState};

/// Marker id reserved for the viewer's own position.
pub const USER_MARKER_ID: &str = "user-location";

/// One paintable marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub is_user_marker: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<MarkerSpec>,
    pub selected_id: Option<String>,
    pub loading: bool,
    pub errors: ErrorOverlays,
}

impl RenderView {
    /// Projects the reconciled state into a paintable snapshot. The user
    /// marker, when present, comes first; whisper markers keep fetch order.
    pub fn from_state(state: &ViewState) -> Self {
        let mut markers = Vec::with_capacity(state.records.len() + 1);
        if let Some(position) = state.user_position {
            markers.push(MarkerSpec {
                id: USER_MARKER_ID.to_string(),
                position,
                is_user_marker: true,
            });
        }
        markers.extend(state.records.iter().map(|r| MarkerSpec {
            id: r.id.clone(),
            position: r.position,
            is_user_marker: false,
        }));

        Self {
            center: state.center,
            zoom: state.zoom,
            markers,
            selected_id: state.selected_id.clone(),
            loading: state.loading,
            errors: state.errors.clone(),
        }
    }
}
