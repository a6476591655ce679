//! Application Controller für zentrale Event-Verarbeitung.

use super::command_log::CommandOutcome;
use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::core::ConnectionError;
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Ein Intent ist ein Event-Batch: danach werden alle in diesem Batch
    /// entfernten Objekte freigegeben, auch wenn ein Command fehlschlägt.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        let result = commands
            .into_iter()
            .try_for_each(|command| self.handle_command(state, command));

        state.schema.flush_deferred();
        result
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus und protokolliert
    /// sie mit ihrem Ergebnis im Command-Log.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        let result = self.execute(state, command.clone());
        let outcome = match &result {
            Ok(Some(err)) => CommandOutcome::Declined(*err),
            Ok(None) => CommandOutcome::Applied,
            Err(err) => CommandOutcome::Failed(format!("{err:#}")),
        };
        state.command_log.record(command, outcome);
        result.map(|_| ())
    }

    /// Dispatcht an Feature-Handler in `handlers/`.
    /// `Ok(Some(_))` meldet eine abgelehnte Verbindung.
    fn execute(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<Option<ConnectionError>> {
        use super::handlers;

        let declined = match command {
            // === Leiter ziehen ===
            AppCommand::BeginWireDrag { world_pos } => {
                handlers::wire::begin(state, world_pos);
                None
            }
            AppCommand::UpdateWireDrag { world_pos } => {
                handlers::wire::update(state, world_pos);
                None
            }
            AppCommand::FinishWireDrag { world_pos } => handlers::wire::finish(state, world_pos),
            AppCommand::CancelWireDrag => {
                handlers::wire::cancel(state);
                None
            }

            // === Geräte ===
            AppCommand::AddDevice { kind, world_pos } => {
                handlers::editing::add_device(state, kind, world_pos);
                None
            }
            AppCommand::MoveDevice { device, world_pos } => {
                handlers::editing::move_device(state, device, world_pos);
                None
            }
            AppCommand::RotateDevice { device } => {
                handlers::editing::rotate_device(state, device);
                None
            }
            AppCommand::RemoveDevice { device } => {
                handlers::editing::remove_device(state, device);
                None
            }
            AppCommand::SetInternalConnections { device, accepted } => {
                handlers::editing::set_internal_connections(state, device, accepted);
                None
            }

            // === Verbindungen ===
            AppCommand::ConnectTerminals { a, b } => handlers::editing::connect(state, a, b),
            AppCommand::DisconnectConductor { conductor } => {
                handlers::editing::disconnect(state, conductor);
                None
            }
            AppCommand::DisconnectTerminals { a, b } => {
                handlers::editing::disconnect_terminals(state, a, b);
                None
            }

            // === Datei-I/O ===
            AppCommand::LoadFile { path } => {
                handlers::file_io::load(state, path)?;
                None
            }
            AppCommand::SaveFile { path } => {
                handlers::file_io::save(state, path)?;
                None
            }

            // === Optionen ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply(state, options)?;
                None
            }
            AppCommand::ResetOptions => {
                handlers::options::reset(state)?;
                None
            }
        };

        Ok(declined)
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
