use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

// Widgets are rebuilt every frame, so per-widget UI state (focus, caret,
// open dropdown, last edited text) lives here keyed by widget id.
static BOOL_STATE: LazyLock<Mutex<HashMap<String, bool>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static INDEX_STATE: LazyLock<Mutex<HashMap<String, usize>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static TEXT_STATE: LazyLock<Mutex<HashMap<String, String>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub const FOCUSED_SLOT: &str = "focused";
pub const OPENED_SLOT: &str = "opened";

pub fn slot(id: &str, slot: &str) -> String {
    format!("{id}::{slot}")
}

pub fn bool_state(id: &str, name: &str, default: bool) -> bool {
    match BOOL_STATE.lock() {
        Ok(mut state) => *state.entry(slot(id, name)).or_insert(default),
        Err(_) => default,
    }
}

pub fn set_bool_state(id: &str, name: &str, value: bool) {
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.insert(slot(id, name), value);
    }
}

pub fn focused_state(id: &str) -> bool {
    bool_state(id, FOCUSED_SLOT, false)
}

pub fn set_focused_state(id: &str, value: bool) {
    set_bool_state(id, FOCUSED_SLOT, value);
}

/// The caret of input `id`, clamped to `len`; defaults to the end.
pub fn caret(id: &str, len: usize) -> usize {
    match INDEX_STATE.lock() {
        Ok(mut state) => (*state.entry(slot(id, "caret")).or_insert(len)).min(len),
        Err(_) => len,
    }
}

pub fn set_caret(id: &str, value: usize) {
    if let Ok(mut state) = INDEX_STATE.lock() {
        state.insert(slot(id, "caret"), value);
    }
}

/// The most recent value an input has seen, so key events arriving between
/// two frames edit the latest text rather than the one last rendered.
pub fn latest_text(id: &str, rendered: &str) -> String {
    match TEXT_STATE.lock() {
        Ok(state) => state
            .get(&slot(id, "value"))
            .cloned()
            .unwrap_or_else(|| rendered.to_string()),
        Err(_) => rendered.to_string(),
    }
}

pub fn set_latest_text(id: &str, value: String) {
    if let Ok(mut state) = TEXT_STATE.lock() {
        state.insert(slot(id, "value"), value);
    }
}
