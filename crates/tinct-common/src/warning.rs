//! Engine warnings reported through `tracing`.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the lexer, the grammar matcher and the expression analyzer to
//! report input they accept in a degraded way.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about degraded or unsupported input (emitted once per unique message)
///
/// # Example
/// ```
/// tinct_common::warning::warn_once("calc", "unknown math function 'foo()'");
/// assert!(tinct_common::warning::has_warned("calc", "unknown math function 'foo()'"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(target: "tinct", component, "{message}");
    }
}

/// Whether `warn_once` has already reported this message.
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call between independent inputs)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
