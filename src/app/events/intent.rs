use crate::core::{ConductorId, DeviceId, DeviceKind, TerminalId};
use crate::shared::EditorOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Zeiger gedrückt (Weltkoordinaten)
    PointerPressed { world_pos: glam::Vec2 },
    /// Zeiger bewegt
    PointerMoved { world_pos: glam::Vec2 },
    /// Zeiger losgelassen
    PointerReleased { world_pos: glam::Vec2 },
    /// Zieh-Vorgang abbrechen (z.B. Escape)
    CancelRequested,
    /// Gerät platzieren
    AddDeviceRequested {
        kind: DeviceKind,
        world_pos: glam::Vec2,
    },
    /// Gerät an neue Position verschieben
    MoveDeviceRequested {
        device: DeviceId,
        world_pos: glam::Vec2,
    },
    /// Gerät um eine Vierteldrehung drehen
    RotateDeviceRequested { device: DeviceId },
    /// Gerät löschen (inkl. Klemmen und Leitern)
    DeleteDeviceRequested { device: DeviceId },
    /// Interne Verbindungen eines Geräts erlauben/verbieten
    InternalConnectionsToggled { device: DeviceId, accepted: bool },
    /// Zwei Klemmen direkt verbinden (ohne Zieh-Vorgang)
    ConnectTerminalsRequested { a: TerminalId, b: TerminalId },
    /// Leiter entfernen
    DisconnectRequested { conductor: ConductorId },
    /// Leiter zwischen zwei Klemmen entfernen
    DisconnectTerminalsRequested { a: TerminalId, b: TerminalId },
    /// Schaltplan aus Datei laden
    OpenFileRequested { path: String },
    /// Unter aktuellem Pfad speichern
    SaveRequested,
    /// Unter neuem Pfad speichern
    SaveAsRequested { path: String },
    /// Optionen übernehmen und speichern
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
