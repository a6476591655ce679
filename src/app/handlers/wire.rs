//! Handler für das Ziehen von Leitern.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ConnectionError;

/// Beginnt einen Zieh-Vorgang an der Weltposition.
pub fn begin(state: &mut AppState, world_pos: glam::Vec2) {
    use_cases::wire_draw::begin_drag(state, world_pos);
}

/// Führt Vorschau und Hover-Rückmeldung nach.
pub fn update(state: &mut AppState, world_pos: glam::Vec2) {
    use_cases::wire_draw::update_drag(state, world_pos);
}

/// Beendet den Zieh-Vorgang an der Weltposition.
pub fn finish(state: &mut AppState, world_pos: glam::Vec2) -> Option<ConnectionError> {
    use_cases::wire_draw::finish_drag(state, world_pos)
}

/// Bricht den Zieh-Vorgang ab.
pub fn cancel(state: &mut AppState) {
    use_cases::wire_draw::cancel_drag(state);
}
