use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::{DeviceKind, TerminalId};
use glam::Vec2;

use super::map_intent_to_commands;

#[test]
fn save_requested_maps_to_save_file_without_path() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::SaveRequested);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::SaveFile { path: None }));
}

#[test]
fn pointer_move_without_drag_maps_to_nothing() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            world_pos: Vec2::new(1.0, 2.0),
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn delete_device_during_drag_from_it_cancels_first() {
    let mut state = AppState::new();
    let device = state.schema.add_device(DeviceKind::Input, Vec2::ZERO);
    state.wire_draw.press(&mut state.schema, Vec2::new(0.0, 15.0));

    let commands = map_intent_to_commands(&state, AppIntent::DeleteDeviceRequested { device });

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::CancelWireDrag));
    assert!(matches!(commands[1], AppCommand::RemoveDevice { .. }));
}

#[test]
fn delete_unrelated_device_during_drag_keeps_drag() {
    let mut state = AppState::new();
    state.schema.add_device(DeviceKind::Input, Vec2::ZERO);
    let other = state
        .schema
        .add_device(DeviceKind::Input, Vec2::new(100.0, 0.0));
    state.wire_draw.press(&mut state.schema, Vec2::new(0.0, 15.0));

    let commands =
        map_intent_to_commands(&state, AppIntent::DeleteDeviceRequested { device: other });

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::RemoveDevice { .. }));
}

#[test]
fn disconnect_terminals_maps_to_single_command() {
    let state = AppState::new();
    let (a, b) = (TerminalId(3), TerminalId(7));

    let commands = map_intent_to_commands(&state, AppIntent::DisconnectTerminalsRequested { a, b });

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::DisconnectTerminals { a: TerminalId(3), b: TerminalId(7) }
    ));
}
