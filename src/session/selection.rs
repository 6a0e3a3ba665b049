//! Single-selection model over marker identities
//!
//! At most one whisper is selected at any time. Selecting an id that is not
//! in the current record set is a no-op, and a refetch that removes the
//! selected record clears the selection implicitly.

use crate::session::state::ViewState;

/// Sets the selection to `id` if a record with that id exists.
pub fn select(state: &mut ViewState, id: &str) {
    if state.contains(id) {
        state.selected_id = Some(id.to_string());
    } else {
        log::debug!("ignoring selection of unknown whisper {}", id);
    }
}

/// Unconditionally clears the selection.
pub fn clear(state: &mut ViewState) {
    state.selected_id = None;
}

/// Drops the selection if its record is gone. Called whenever `records` is
/// replaced wholesale.
pub fn retain_valid(state: &mut ViewState) {
    if let Some(id) = state.selected_id.clone() {
        if !state.contains(&id) {
            log::debug!("clearing selection: whisper {} left the record set", id);
            clear(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use crate::data::catalog::CatalogEntry;
    use crate::data::whisper::WhisperRecord;

    fn record(id: &str) -> WhisperRecord {
        CatalogEntry {
            filename: id.to_string(),
            emotion: "joy".to_string(),
            location: "10,10".to_string(),
        }
        .to_record()
        .unwrap()
    }

    fn state_with(ids: &[&str]) -> ViewState {
        let mut state = ViewState::initial(&SessionConfig::default());
        state.records = ids.iter().map(|id| record(id)).collect();
        state
    }

    #[test]
    fn test_select_known_id() {
        let mut state = state_with(&["a", "b"]);
        select(&mut state, "b");
        assert_eq!(state.selected_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut state = state_with(&["a"]);
        select(&mut state, "missing");
        assert_eq!(state.selected_id, None);

        select(&mut state, "a");
        select(&mut state, "missing");
        assert_eq!(state.selected_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut state = state_with(&["a"]);
        select(&mut state, "a");
        select(&mut state, "a");
        assert_eq!(state.selected_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_clear() {
        let mut state = state_with(&["a"]);
        select(&mut state, "a");
        clear(&mut state);
        assert_eq!(state.selected_id, None);
    }

    #[test]
    fn test_retain_valid_clears_stale_selection() {
        let mut state = state_with(&["a", "b"]);
        select(&mut state, "b");

        state.records = vec![record("a")];
        retain_valid(&mut state);
        assert_eq!(state.selected_id, None);
    }

    #[test]
    fn test_retain_valid_keeps_live_selection() {
        let mut state = state_with(&["a", "b"]);
        select(&mut state, "a");

        state.records = vec![record("a")];
        retain_valid(&mut state);
        assert_eq!(state.selected_id.as_deref(), Some("a"));
    }
}
