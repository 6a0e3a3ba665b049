//! View-state reconciliation
//!
//! The reconciler is the only writer of [`ViewState`]. The geolocation
//! probe and the whisper fetch run concurrently; their completions arrive
//! here as discrete events and are applied one at a time against the latest
//! state, so the final view is identical whichever settles first.

use crate::core::config::SessionConfig;
use crate::data::{catalog::Catalog, whisper::WhisperRecord};
use crate::net::probe::ProbeFix;
use crate::session::selection;
use crate::session::state::{Phase, ViewState};
use crate::{Result, WhisprError};
use std::collections::HashSet;

/// Discrete events applied to the session state.
#[derive(Debug)]
pub enum SessionEvent {
    /// The geolocation probe settled, successfully or not.
    ProbeSettled(Result<ProbeFix>),
    /// A whisper fetch settled, successfully or not.
    FetchSettled(Result<Vec<WhisperRecord>>),
    /// The user clicked a marker.
    MarkerClicked(String),
    /// The user cleared the detail panel.
    SelectionCleared,
    /// The user dismissed the error banner.
    ErrorDismissed,
}

/// Merges probe results, fetch results and user interaction into one
/// coherent render-ready state.
pub struct Reconciler {
    config: SessionConfig,
    catalog: Catalog,
    state: ViewState,
    probe_settled: bool,
    fetch_settled: bool,
}

impl Reconciler {
    pub fn new(config: SessionConfig, catalog: Catalog) -> Self {
        let mut state = ViewState::initial(&config);
        if config.require_map_token().is_err() {
            state.errors.config =
                Some("map token is missing; configure the map credential".to_string());
        }
        Self {
            config,
            catalog,
            state,
            probe_settled: false,
            fetch_settled: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies one event against the latest state.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ProbeSettled(result) => self.on_probe(result),
            SessionEvent::FetchSettled(result) => self.on_fetch(result),
            SessionEvent::MarkerClicked(id) => selection::select(&mut self.state, &id),
            SessionEvent::SelectionCleared => selection::clear(&mut self.state),
            SessionEvent::ErrorDismissed => self.state.errors.clear(),
        }
    }

    fn on_probe(&mut self, result: Result<ProbeFix>) {
        match result {
            Ok(fix) => {
                self.state.user_position = Some(fix.position);
                self.state.center = fix.position;
                self.state.zoom = fix.zoom;
            }
            Err(err) => {
                // Fall back to the default area rather than block the map.
                // The failure lands in its own overlay slot so a fetch
                // failure applied in either order yields the same state.
                self.state.center = self.config.default_center;
                self.state.zoom = self.config.default_zoom;
                self.state.errors.geolocation = Some(err.to_string());
            }
        }
        self.probe_settled = true;
        self.update_phase();
    }

    fn on_fetch(&mut self, result: Result<Vec<WhisperRecord>>) {
        let first_attempt = !self.fetch_settled;
        match result {
            Ok(records) => {
                self.state.records = dedupe_by_id(records);
                selection::retain_valid(&mut self.state);
                self.state.errors.fetch = None;
            }
            Err(err) => {
                // A cold start with no data must show "nothing available",
                // but a failed refresh must not discard displayed content.
                if first_attempt {
                    self.state.records.clear();
                    selection::clear(&mut self.state);
                }
                self.state.errors.fetch = Some(err.to_string());
            }
        }
        self.fetch_settled = true;
        self.update_phase();
    }

    /// The map leaves `Initializing` only once both initial operations have
    /// settled; presenting it earlier would show a misleading partial view.
    fn update_phase(&mut self) {
        if self.probe_settled && self.fetch_settled && self.state.phase == Phase::Initializing {
            self.state.phase = Phase::Ready;
            self.state.loading = false;
        }
    }

    /// Appends a whisper derived from the held catalog. Fails without
    /// touching state when the id is already on the map, absent from the
    /// catalog, or carries an unparseable location.
    pub fn add_from_catalog(&mut self, external_id: &str) -> Result<()> {
        if self.state.contains(external_id) {
            return Err(WhisprError::Duplicate(external_id.to_string()));
        }
        let entry = self
            .catalog
            .lookup(external_id)
            .ok_or_else(|| WhisprError::NotFound(external_id.to_string()))?;
        let record = entry.to_record()?;

        // Existing entries are preserved; the view re-centers on the new
        // whisper at the current zoom.
        self.state.center = record.position;
        self.state.records.push(record);
        log::info!("added whisper {} from catalog", external_id);
        Ok(())
    }
}

/// Resolves duplicate ids by replacement, later wins; relative order of the
/// surviving entries is preserved.
fn dedupe_by_id(records: Vec<WhisperRecord>) -> Vec<WhisperRecord> {
    let mut seen = HashSet::new();
    let mut deduped: Vec<WhisperRecord> = records
        .into_iter()
        .rev()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();
    deduped.reverse();
    deduped
}
