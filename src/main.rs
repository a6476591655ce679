//! Schaltplan-Editor.
//!
//! Lädt einen Schaltplan (erstes Argument) oder baut eine Demo-Schaltung auf,
//! führt sie über den AppController und gibt die berechneten Leiterpfade aus.

use anyhow::Context;
use glam::Vec2;
use schematic_editor::{AppController, AppIntent, AppState, DeviceKind, EditorOptions};

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Schaltplan-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = EditorOptions::load_from_file(&EditorOptions::config_path());
        let mut state = AppState::with_options(options);
        let mut controller = AppController::new();

        match std::env::args().nth(1) {
            Some(path) => controller
                .handle_intent(&mut state, AppIntent::OpenFileRequested { path })
                .context("Schaltplan konnte nicht geöffnet werden")?,
            None => Self::build_demo(&mut controller, &mut state)?,
        }

        Self::report(&controller, &state);
        Ok(())
    }

    /// Zwei Schütze, per Zieh-Vorgang verbunden, danach eines verschoben.
    fn build_demo(controller: &mut AppController, state: &mut AppState) -> anyhow::Result<()> {
        let left = Vec2::new(0.0, 0.0);
        let right = Vec2::new(100.0, 0.0);
        for world_pos in [left, right] {
            controller.handle_intent(
                state,
                AppIntent::AddDeviceRequested {
                    kind: DeviceKind::Contactor,
                    world_pos,
                },
            )?;
        }

        // Unten links → oben rechts
        let from = left + Vec2::new(0.0, 60.0);
        let to = right;
        controller.handle_intent(state, AppIntent::PointerPressed { world_pos: from })?;
        controller.handle_intent(state, AppIntent::PointerMoved { world_pos: to })?;
        controller.handle_intent(state, AppIntent::PointerReleased { world_pos: to })?;

        let second = state.schema.devices().nth(1).map(|d| d.id);
        if let Some(device) = second {
            controller.handle_intent(
                state,
                AppIntent::MoveDeviceRequested {
                    device,
                    world_pos: Vec2::new(140.0, 30.0),
                },
            )?;
        }
        Ok(())
    }

    fn report(controller: &AppController, state: &AppState) {
        let scene = controller.build_render_scene(state);
        log::info!(
            "{} Geräte, {} Klemmen, {} Leiter",
            state.device_count(),
            scene.terminals.len(),
            scene.conductors.len()
        );
        for conductor in &scene.conductors {
            let points: Vec<String> = conductor
                .path
                .iter()
                .map(|p| format!("({}, {})", p.x, p.y))
                .collect();
            log::info!("Leiter {}: {}", conductor.id, points.join(" → "));
        }
        if let Some(err) = &state.last_error {
            log::warn!("Letzte Ablehnung: {}", err);
        }
    }
}
