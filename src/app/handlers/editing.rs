//! Handler für Geräte- und Leiter-Editing.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{ConductorId, ConnectionError, DeviceId, DeviceKind, TerminalId};

/// Platziert ein Gerät.
pub fn add_device(state: &mut AppState, kind: DeviceKind, world_pos: glam::Vec2) {
    use_cases::devices::add_device(state, kind, world_pos);
}

/// Verschiebt ein Gerät.
pub fn move_device(state: &mut AppState, device: DeviceId, world_pos: glam::Vec2) {
    use_cases::devices::move_device(state, device, world_pos);
}

/// Dreht ein Gerät um eine Vierteldrehung.
pub fn rotate_device(state: &mut AppState, device: DeviceId) {
    use_cases::devices::rotate_device(state, device);
}

/// Löscht ein Gerät samt Klemmen und Leitern.
pub fn remove_device(state: &mut AppState, device: DeviceId) {
    use_cases::devices::remove_device(state, device);
}

/// Setzt die Policy für interne Verbindungen.
pub fn set_internal_connections(state: &mut AppState, device: DeviceId, accepted: bool) {
    use_cases::devices::set_internal_connections(state, device, accepted);
}

/// Verbindet zwei Klemmen.
pub fn connect(state: &mut AppState, a: TerminalId, b: TerminalId) -> Option<ConnectionError> {
    use_cases::connections::connect_terminals(state, a, b)
}

/// Entfernt einen Leiter.
pub fn disconnect(state: &mut AppState, conductor: ConductorId) {
    use_cases::connections::disconnect_conductor(state, conductor);
}

/// Entfernt den Leiter zwischen zwei Klemmen.
pub fn disconnect_terminals(state: &mut AppState, a: TerminalId, b: TerminalId) {
    use_cases::connections::disconnect_terminals(state, a, b);
}
