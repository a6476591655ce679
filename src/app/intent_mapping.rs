//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use crate::core::DeviceId;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::PointerPressed { world_pos } => vec![AppCommand::BeginWireDrag { world_pos }],
        AppIntent::PointerMoved { world_pos } => {
            if state.wire_draw.is_dragging() {
                vec![AppCommand::UpdateWireDrag { world_pos }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerReleased { world_pos } => {
            if state.wire_draw.is_dragging() {
                vec![AppCommand::FinishWireDrag { world_pos }]
            } else {
                vec![]
            }
        }
        AppIntent::CancelRequested => vec![AppCommand::CancelWireDrag],
        AppIntent::AddDeviceRequested { kind, world_pos } => {
            vec![AppCommand::AddDevice { kind, world_pos }]
        }
        AppIntent::MoveDeviceRequested { device, world_pos } => {
            vec![AppCommand::MoveDevice { device, world_pos }]
        }
        AppIntent::RotateDeviceRequested { device } => vec![AppCommand::RotateDevice { device }],
        AppIntent::DeleteDeviceRequested { device } => {
            // Laufender Zieh-Vorgang an diesem Gerät wird vorher abgebrochen
            if drag_touches_device(state, device) {
                vec![
                    AppCommand::CancelWireDrag,
                    AppCommand::RemoveDevice { device },
                ]
            } else {
                vec![AppCommand::RemoveDevice { device }]
            }
        }
        AppIntent::InternalConnectionsToggled { device, accepted } => {
            vec![AppCommand::SetInternalConnections { device, accepted }]
        }
        AppIntent::ConnectTerminalsRequested { a, b } => {
            vec![AppCommand::ConnectTerminals { a, b }]
        }
        AppIntent::DisconnectRequested { conductor } => {
            vec![AppCommand::DisconnectConductor { conductor }]
        }
        AppIntent::DisconnectTerminalsRequested { a, b } => {
            vec![AppCommand::DisconnectTerminals { a, b }]
        }
        AppIntent::OpenFileRequested { path } => {
            let mut commands = Vec::new();
            if state.wire_draw.is_dragging() {
                commands.push(AppCommand::CancelWireDrag);
            }
            commands.push(AppCommand::LoadFile { path });
            commands
        }
        AppIntent::SaveRequested => vec![AppCommand::SaveFile { path: None }],
        AppIntent::SaveAsRequested { path } => vec![AppCommand::SaveFile { path: Some(path) }],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
    }
}

fn drag_touches_device(state: &AppState, device: DeviceId) -> bool {
    let Some(device) = state.schema.device(device) else {
        return false;
    };
    [state.wire_draw.origin(), state.wire_draw.hovered()]
        .into_iter()
        .flatten()
        .any(|terminal| device.owns(terminal))
}

#[cfg(test)]
mod tests;
