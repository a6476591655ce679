//! Use-Case: Leiter interaktiv ziehen.

use crate::app::tools::{AbortReason, ReleaseOutcome};
use crate::app::AppState;
use crate::core::ConnectionError;

/// Beginnt einen Zieh-Vorgang, wenn unter dem Zeiger eine Klemme liegt.
pub fn begin_drag(state: &mut AppState, world_pos: glam::Vec2) {
    if state.wire_draw.press(&mut state.schema, world_pos) {
        state.last_error = None;
    }
}

/// Führt Vorschau und Hover-Rückmeldung nach.
pub fn update_drag(state: &mut AppState, world_pos: glam::Vec2) {
    state.wire_draw.pointer_moved(&mut state.schema, world_pos);
}

/// Beendet den Zieh-Vorgang und verbindet ggf. die Klemmen.
///
/// Liefert den Ablehnungsgrund, wenn die Zielklemme die Verbindung verweigert.
pub fn finish_drag(state: &mut AppState, world_pos: glam::Vec2) -> Option<ConnectionError> {
    match state.wire_draw.release(&mut state.schema, world_pos) {
        ReleaseOutcome::Connected(id) => {
            log::info!("Leiter {} gezogen", id);
            state.last_error = None;
            None
        }
        ReleaseOutcome::Aborted(AbortReason::Declined(err)) => {
            log::info!("Leiter nicht erstellt: {}", err);
            state.last_error = Some(err.to_string());
            Some(err)
        }
        ReleaseOutcome::Aborted(AbortReason::NoTarget) | ReleaseOutcome::NotDragging => None,
    }
}

/// Bricht den Zieh-Vorgang ab.
pub fn cancel_drag(state: &mut AppState) {
    state.wire_draw.cancel(&mut state.schema);
}
