//! Map session lifecycle
//!
//! A [`MapSession`] owns one view's state for as long as the view is
//! mounted. On start it launches the geolocation probe and the whisper
//! fetch concurrently; completions and user interactions are funneled
//! through a single event channel and applied one at a time, which is the
//! only ordering discipline the state needs. Teardown flips a liveness
//! flag rather than aborting the in-flight operations; late completions
//! are received and dropped.

pub mod reconciler;
pub mod selection;
pub mod state;

use crate::core::config::SessionConfig;
use crate::data::catalog::Catalog;
use crate::net::{
    fetcher::{HttpWhisperSource, WhisperSource},
    probe::{probe_position, PositionProvider},
};
use crate::render::RenderView;
use crate::session::reconciler::{Reconciler, SessionEvent};
use crate::session::state::ViewState;
use crate::{Result, WhisprError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};

pub struct MapSession {
    reconciler: Arc<Mutex<Reconciler>>,
    alive: Arc<AtomicBool>,
    events_tx: UnboundedSender<SessionEvent>,
    source: Arc<dyn WhisperSource>,
}

impl MapSession {
    /// Starts a session: enters `Initializing` and launches the probe and
    /// the first fetch concurrently. Must be called within a tokio runtime.
    pub fn start(
        config: SessionConfig,
        catalog: Catalog,
        source: Arc<dyn WhisperSource>,
        provider: Arc<dyn PositionProvider>,
    ) -> Self {
        let reconciler = Arc::new(Mutex::new(Reconciler::new(config.clone(), catalog)));
        let alive = Arc::new(AtomicBool::new(true));
        let (events_tx, mut events_rx) = mpsc::unbounded_channel::<SessionEvent>();

        // Dispatcher: the single writer of session state.
        {
            let reconciler = reconciler.clone();
            let alive = alive.clone();
            tokio::spawn(async move {
                while let Some(event) = events_rx.recv().await {
                    if !alive.load(Ordering::SeqCst) {
                        log::debug!("dropping event after teardown: {:?}", event);
                        continue;
                    }
                    if let Ok(mut r) = reconciler.lock() {
                        r.apply(event);
                    }
                }
            });
        }

        // Geolocation probe, bounded by the configured timeout.
        {
            let events_tx = events_tx.clone();
            let provider = provider.clone();
            tokio::spawn(async move {
                let result = probe_position(provider.as_ref(), &config).await;
                let _ = events_tx.send(SessionEvent::ProbeSettled(result));
            });
        }

        let session = Self {
            reconciler,
            alive,
            events_tx,
            source,
        };
        session.spawn_fetch();
        session
    }

    /// Starts a session against the endpoint named in the configuration.
    pub fn start_remote(
        config: SessionConfig,
        catalog: Catalog,
        provider: Arc<dyn PositionProvider>,
    ) -> Self {
        let source = Arc::new(HttpWhisperSource::new(config.endpoint.clone()));
        Self::start(config, catalog, source, provider)
    }

    fn spawn_fetch(&self) {
        let events_tx = self.events_tx.clone();
        let source = self.source.clone();
        tokio::spawn(async move {
            let result = source.fetch_whispers().await;
            let _ = events_tx.send(SessionEvent::FetchSettled(result));
        });
    }

    /// Re-runs the content fetch. A failing refresh surfaces an error but
    /// keeps the last good records on the map.
    pub fn refresh(&self) {
        if self.is_alive() {
            self.spawn_fetch();
        }
    }

    /// Click dispatch from the rendering collaborator, keyed by marker id.
    pub fn dispatch_click(&self, id: &str) {
        let _ = self
            .events_tx
            .send(SessionEvent::MarkerClicked(id.to_string()));
    }

    pub fn clear_selection(&self) {
        let _ = self.events_tx.send(SessionEvent::SelectionCleared);
    }

    pub fn dismiss_error(&self) {
        let _ = self.events_tx.send(SessionEvent::ErrorDismissed);
    }

    /// Matches `external_id` against the held catalog and appends the
    /// derived whisper. Runs inline so the failure reaches the caller.
    pub fn add_from_catalog(&self, external_id: &str) -> Result<()> {
        if !self.is_alive() {
            return Err(WhisprError::SessionClosed);
        }
        match self.reconciler.lock() {
            Ok(mut r) => r.add_from_catalog(external_id),
            // A poisoned lock means the dispatcher panicked; treat the
            // session as gone.
            Err(_) => Err(WhisprError::SessionClosed),
        }
    }

    /// Clones the current reconciled state.
    pub fn snapshot(&self) -> Option<ViewState> {
        self.reconciler.lock().ok().map(|r| r.state().clone())
    }

    /// Paintable projection of the current state.
    pub fn render_view(&self) -> Option<RenderView> {
        self.reconciler
            .lock()
            .ok()
            .map(|r| RenderView::from_state(r.state()))
    }

    /// Resolves once both the probe and the first fetch have settled, or
    /// immediately if the session is torn down first.
    pub async fn until_ready(&self) {
        loop {
            if !self.is_alive() {
                return;
            }
            if let Some(state) = self.snapshot() {
                if state.is_ready() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Tears the session down. In-flight probe/fetch completions are still
    /// received but no state mutation is observable afterwards.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
