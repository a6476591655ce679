//! Use-Case: Geräte platzieren, verschieben, drehen und löschen.

use crate::app::AppState;
use crate::core::{DeviceId, DeviceKind};

/// Platziert ein Gerät an der Weltposition.
pub fn add_device(state: &mut AppState, kind: DeviceKind, world_pos: glam::Vec2) {
    let id = state.schema.add_device(kind, world_pos);
    log::info!(
        "Gerät {} ({}) bei ({:.1}, {:.1}) platziert",
        id,
        kind.as_str(),
        world_pos.x,
        world_pos.y
    );
}

/// Verschiebt ein Gerät; angedockte Leiter werden synchron neu geroutet.
pub fn move_device(state: &mut AppState, device: DeviceId, world_pos: glam::Vec2) {
    if !state.schema.move_device(device, world_pos) {
        log::warn!("Gerät {} existiert nicht", device);
    }
}

/// Dreht ein Gerät um eine Vierteldrehung.
pub fn rotate_device(state: &mut AppState, device: DeviceId) {
    if state.schema.rotate_device(device) {
        if let Some(d) = state.schema.device(device) {
            log::info!("Gerät {} gedreht: {:?}", device, d.rotation());
        }
    } else {
        log::warn!("Gerät {} existiert nicht", device);
    }
}

/// Löscht ein Gerät mit allen Klemmen und Leitern.
pub fn remove_device(state: &mut AppState, device: DeviceId) {
    if !state.schema.remove_device(device) {
        log::warn!("Gerät {} existiert nicht", device);
    }
}

/// Setzt die Policy für interne Verbindungen.
pub fn set_internal_connections(state: &mut AppState, device: DeviceId, accepted: bool) {
    if state.schema.set_internal_connections(device, accepted) {
        log::info!(
            "Gerät {}: interne Verbindungen {}",
            device,
            if accepted { "erlaubt" } else { "verboten" }
        );
    } else {
        log::warn!("Gerät {} existiert nicht", device);
    }
}
