//! Use-Case: Leiter direkt erstellen und entfernen.

use crate::app::AppState;
use crate::core::{ConductorId, ConnectionError, TerminalId};

/// Verbindet zwei Klemmen. Ablehnungen werden geloggt, als Status gemerkt und zurückgegeben.
pub fn connect_terminals(
    state: &mut AppState,
    a: TerminalId,
    b: TerminalId,
) -> Option<ConnectionError> {
    match state.schema.connect(a, b) {
        Ok(_) => {
            state.last_error = None;
            None
        }
        Err(err) => {
            log::warn!("Verbindung {}↔{} abgelehnt: {}", a, b, err);
            state.last_error = Some(err.to_string());
            Some(err)
        }
    }
}

/// Entfernt einen Leiter.
pub fn disconnect_conductor(state: &mut AppState, conductor: ConductorId) {
    if !state.schema.disconnect(conductor) {
        log::warn!("Leiter {} existiert nicht", conductor);
    }
}

/// Entfernt den Leiter zwischen zwei Klemmen.
pub fn disconnect_terminals(state: &mut AppState, a: TerminalId, b: TerminalId) {
    if !state.schema.disconnect_between(a, b) {
        log::warn!("Kein Leiter zwischen {} und {}", a, b);
    }
}
