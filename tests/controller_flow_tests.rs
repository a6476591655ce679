use glam::Vec2;
use schematic_editor::app::CommandOutcome;
use schematic_editor::{
    route, AppCommand, AppController, AppIntent, AppState, ConnectionError, DeviceId, DeviceKind,
    FeedbackClass, Orientation, TerminalId,
};

/// Zwei Schütze bei x=0 und x=100. Klemmen: oben (x, 0), unten (x, 60).
fn two_contactors() -> (AppController, AppState) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    for x in [0.0, 100.0] {
        controller
            .handle_intent(
                &mut state,
                AppIntent::AddDeviceRequested {
                    kind: DeviceKind::Contactor,
                    world_pos: Vec2::new(x, 0.0),
                },
            )
            .expect("Gerät sollte platziert werden");
    }
    (controller, state)
}

fn device_ids(state: &AppState) -> Vec<DeviceId> {
    state.schema.devices().map(|d| d.id).collect()
}

fn terminals_of(state: &AppState, device: DeviceId) -> Vec<TerminalId> {
    state
        .schema
        .device(device)
        .expect("Gerät sollte existieren")
        .terminals()
        .to_vec()
}

fn drag(controller: &mut AppController, state: &mut AppState, from: Vec2, to: Vec2) {
    for intent in [
        AppIntent::PointerPressed { world_pos: from },
        AppIntent::PointerMoved { world_pos: to },
        AppIntent::PointerReleased { world_pos: to },
    ] {
        controller
            .handle_intent(state, intent)
            .expect("Zeiger-Intent sollte ohne Fehler durchlaufen");
    }
}

fn all_neutral(state: &AppState) -> bool {
    state
        .schema
        .terminals()
        .all(|t| t.feedback() == FeedbackClass::Neutral)
}

#[test]
fn test_drag_between_devices_creates_routed_conductor() {
    let (mut controller, mut state) = two_contactors();

    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 60.0),
        Vec2::new(100.0, 0.0),
    );

    assert_eq!(state.conductor_count(), 1);
    assert!(!state.wire_draw.is_dragging());
    assert!(all_neutral(&state));
    assert!(state.last_error.is_none());

    let conductor = state.schema.conductors().next().expect("Leiter erwartet");
    assert_eq!(
        conductor.path(),
        route(
            Vec2::new(0.0, 60.0),
            Orientation::South,
            Vec2::new(100.0, 0.0),
            Orientation::North
        )
        .as_slice()
    );

    let last = state
        .command_log
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert!(matches!(last.command, AppCommand::FinishWireDrag { .. }));
    assert_eq!(last.outcome, CommandOutcome::Applied);
}

#[test]
fn test_hover_feedback_follows_pointer_during_drag() {
    let (mut controller, mut state) = two_contactors();
    let devices = device_ids(&state);
    let left = terminals_of(&state, devices[0]);
    let right = terminals_of(&state, devices[1]);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerPressed {
                world_pos: Vec2::new(0.0, 60.0),
            },
        )
        .expect("Druck sollte verarbeitet werden");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(100.0, 1.0),
            },
        )
        .expect("Bewegung sollte verarbeitet werden");
    assert_eq!(state.schema.feedback(right[0]), Some(FeedbackClass::Allowed));

    // Eigenes Gerät ohne interne Verbindungen
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(0.0, 0.0),
            },
        )
        .expect("Bewegung sollte verarbeitet werden");
    assert_eq!(state.schema.feedback(right[0]), Some(FeedbackClass::Neutral));
    assert_eq!(state.schema.feedback(left[0]), Some(FeedbackClass::Forbidden));

    controller
        .handle_intent(&mut state, AppIntent::CancelRequested)
        .expect("Abbruch sollte verarbeitet werden");
    assert!(!state.wire_draw.is_dragging());
    assert!(all_neutral(&state));
    assert_eq!(state.conductor_count(), 0);
}

#[test]
fn test_duplicate_drag_is_declined_with_status() {
    let (mut controller, mut state) = two_contactors();
    let from = Vec2::new(0.0, 60.0);
    let to = Vec2::new(100.0, 0.0);

    drag(&mut controller, &mut state, from, to);
    drag(&mut controller, &mut state, to, from);

    assert_eq!(state.conductor_count(), 1);
    assert!(state.last_error.is_some());
    assert!(all_neutral(&state));
    assert!(state.schema.is_consistent());

    let devices = device_ids(&state);
    let left_bottom = terminals_of(&state, devices[0])[1];
    let right_top = terminals_of(&state, devices[1])[0];
    let declined: Vec<_> = state.command_log.declined().collect();
    assert_eq!(declined.len(), 1);
    assert!(matches!(declined[0].0, AppCommand::FinishWireDrag { .. }));
    assert_eq!(
        *declined[0].1,
        ConnectionError::Duplicate {
            a: right_top,
            b: left_bottom
        }
    );
}

#[test]
fn test_internal_connection_follows_device_policy() {
    let (mut controller, mut state) = two_contactors();
    let device = device_ids(&state)[0];

    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 60.0),
    );
    assert_eq!(state.conductor_count(), 0);
    assert!(state.last_error.is_some());

    controller
        .handle_intent(
            &mut state,
            AppIntent::InternalConnectionsToggled {
                device,
                accepted: true,
            },
        )
        .expect("Umschalten sollte verarbeitet werden");
    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 60.0),
    );
    assert_eq!(state.conductor_count(), 1);
    assert!(state.last_error.is_none());
}

#[test]
fn test_release_on_empty_space_aborts_silently() {
    let (mut controller, mut state) = two_contactors();

    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 60.0),
        Vec2::new(300.0, 300.0),
    );

    assert_eq!(state.conductor_count(), 0);
    assert!(state.last_error.is_none());
    assert!(!state.wire_draw.is_dragging());
}

#[test]
fn test_pointer_move_without_drag_logs_no_command() {
    let (mut controller, mut state) = two_contactors();
    let before = state.command_log.len();

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(5.0, 5.0),
            },
        )
        .expect("Bewegung sollte verarbeitet werden");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerReleased {
                world_pos: Vec2::new(5.0, 5.0),
            },
        )
        .expect("Loslassen sollte verarbeitet werden");

    assert_eq!(state.command_log.len(), before);
}

#[test]
fn test_delete_hovered_device_cancels_drag_and_frees_everything() {
    let (mut controller, mut state) = two_contactors();
    let right = device_ids(&state)[1];
    let right_terminals = terminals_of(&state, right);
    let left_bottom = terminals_of(&state, device_ids(&state)[0])[1];

    controller
        .handle_intent(
            &mut state,
            AppIntent::ConnectTerminalsRequested {
                a: left_bottom,
                b: right_terminals[1],
            },
        )
        .expect("Verbinden sollte verarbeitet werden");
    assert_eq!(state.conductor_count(), 1);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerPressed {
                world_pos: Vec2::new(0.0, 0.0),
            },
        )
        .expect("Druck sollte verarbeitet werden");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(100.0, 0.0),
            },
        )
        .expect("Bewegung sollte verarbeitet werden");
    assert_eq!(state.wire_draw.hovered(), Some(right_terminals[0]));

    controller
        .handle_intent(&mut state, AppIntent::DeleteDeviceRequested { device: right })
        .expect("Löschen sollte verarbeitet werden");

    assert!(!state.wire_draw.is_dragging());
    assert_eq!(state.device_count(), 1);
    assert_eq!(state.conductor_count(), 0);
    assert_eq!(state.schema.terminal_count(), 2);
    assert!(state.schema.pending_free().is_empty());
    assert!(all_neutral(&state));
    assert!(state.schema.is_consistent());

    let log: Vec<_> = state.command_log.entries().rev().take(2).collect();
    assert!(matches!(log[0].command, AppCommand::RemoveDevice { .. }));
    assert!(matches!(log[1].command, AppCommand::CancelWireDrag));
}

#[test]
fn test_disconnect_frees_conductor_after_intent() {
    let (mut controller, mut state) = two_contactors();
    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 60.0),
        Vec2::new(100.0, 0.0),
    );
    let conductor = state
        .schema
        .conductors()
        .next()
        .map(|c| c.id)
        .expect("Leiter erwartet");

    controller
        .handle_intent(&mut state, AppIntent::DisconnectRequested { conductor })
        .expect("Trennen sollte verarbeitet werden");

    assert_eq!(state.conductor_count(), 0);
    assert!(state.schema.pending_free().is_empty());
    assert!(state
        .schema
        .terminals()
        .all(|t| t.conductor_count() == 0));
}

#[test]
fn test_disconnect_by_terminal_pair_removes_only_that_conductor() {
    let (mut controller, mut state) = two_contactors();
    let devices = device_ids(&state);
    let left = terminals_of(&state, devices[0]);
    let right = terminals_of(&state, devices[1]);
    for (a, b) in [(left[1], right[0]), (left[0], right[1])] {
        controller
            .handle_intent(&mut state, AppIntent::ConnectTerminalsRequested { a, b })
            .expect("Verbinden sollte verarbeitet werden");
    }
    assert_eq!(state.conductor_count(), 2);

    // Reihenfolge der Klemmen spielt keine Rolle
    controller
        .handle_intent(
            &mut state,
            AppIntent::DisconnectTerminalsRequested {
                a: right[0],
                b: left[1],
            },
        )
        .expect("Trennen sollte verarbeitet werden");

    assert_eq!(state.conductor_count(), 1);
    assert!(!state.schema.are_linked(left[1], right[0]));
    assert!(state.schema.are_linked(left[0], right[1]));
    assert!(state.schema.pending_free().is_empty());

    // Kein Leiter mehr vorhanden: No-op
    controller
        .handle_intent(
            &mut state,
            AppIntent::DisconnectTerminalsRequested {
                a: left[1],
                b: right[0],
            },
        )
        .expect("Trennen ohne Leiter sollte kein Fehler sein");
    assert_eq!(state.conductor_count(), 1);
    assert!(state.schema.is_consistent());
}

#[test]
fn test_move_and_rotate_reroute_attached_conductors() {
    let (mut controller, mut state) = two_contactors();
    drag(
        &mut controller,
        &mut state,
        Vec2::new(0.0, 60.0),
        Vec2::new(100.0, 0.0),
    );
    let right = device_ids(&state)[1];
    let right_top = terminals_of(&state, right)[0];

    controller
        .handle_intent(
            &mut state,
            AppIntent::MoveDeviceRequested {
                device: right,
                world_pos: Vec2::new(150.0, 100.0),
            },
        )
        .expect("Verschieben sollte verarbeitet werden");

    let conductor = state.schema.conductors().next().expect("Leiter erwartet");
    assert_eq!(
        conductor.path().last().copied(),
        Some(Vec2::new(150.0, 100.0))
    );
    assert_eq!(
        conductor.path(),
        route(
            Vec2::new(0.0, 60.0),
            Orientation::South,
            Vec2::new(150.0, 100.0),
            Orientation::North
        )
        .as_slice()
    );

    controller
        .handle_intent(&mut state, AppIntent::RotateDeviceRequested { device: right })
        .expect("Drehen sollte verarbeitet werden");

    let dock = state
        .schema
        .docking_point(right_top)
        .expect("Andockpunkt erwartet");
    let conductor = state.schema.conductors().next().expect("Leiter erwartet");
    assert!(conductor.path().contains(&dock));
    assert!(schematic_editor::core::is_orthogonal(conductor.path()));
}

#[test]
fn test_save_without_known_path_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(&mut state, AppIntent::SaveRequested);
    assert!(result.is_err());

    let last = state
        .command_log
        .last()
        .expect("Es sollte ein Command geloggt sein");
    match &last.command {
        AppCommand::SaveFile { path } => assert!(path.is_none()),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    assert!(matches!(last.outcome, CommandOutcome::Failed(_)));
}

#[test]
fn test_render_scene_shows_preview_only_while_dragging() {
    let (mut controller, mut state) = two_contactors();
    assert!(!controller.build_render_scene(&state).is_dragging());

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerPressed {
                world_pos: Vec2::new(0.0, 60.0),
            },
        )
        .expect("Druck sollte verarbeitet werden");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(40.0, 40.0),
            },
        )
        .expect("Bewegung sollte verarbeitet werden");

    let scene = controller.build_render_scene(&state);
    let preview = scene.preview.expect("Vorschau erwartet");
    assert_eq!(preview.from, Vec2::new(0.0, 60.0));
    assert_eq!(preview.to, Vec2::new(40.0, 40.0));
    assert_eq!(scene.terminals.len(), 4);
    assert_eq!(scene.device_bounds.len(), 2);
}

#[test]
fn test_many_devices_dropped_on_same_spot_stay_usable() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    for _ in 0..40 {
        controller
            .handle_intent(
                &mut state,
                AppIntent::AddDeviceRequested {
                    kind: DeviceKind::Contactor,
                    world_pos: Vec2::ZERO,
                },
            )
            .expect("Gerät sollte platziert werden");
    }
    controller
        .handle_intent(
            &mut state,
            AppIntent::AddDeviceRequested {
                kind: DeviceKind::Input,
                world_pos: Vec2::new(100.0, 0.0),
            },
        )
        .expect("Gerät sollte platziert werden");

    drag(
        &mut controller,
        &mut state,
        Vec2::ZERO,
        Vec2::new(100.0, 15.0),
    );

    // Zuletzt platziertes Gerät liegt oben
    let devices = device_ids(&state);
    let origin = terminals_of(&state, devices[39])[0];
    let input = terminals_of(&state, devices[40])[0];
    assert_eq!(state.conductor_count(), 1);
    assert!(state.schema.are_linked(origin, input));
}
