use crate::core::{ConductorId, DeviceId, DeviceKind, TerminalId};
use crate::shared::EditorOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Leiter ziehen: Zieh-Vorgang an Weltposition beginnen
    BeginWireDrag { world_pos: glam::Vec2 },
    /// Leiter ziehen: Vorschau und Hover nachführen
    UpdateWireDrag { world_pos: glam::Vec2 },
    /// Leiter ziehen: loslassen und ggf. verbinden
    FinishWireDrag { world_pos: glam::Vec2 },
    /// Leiter ziehen: abbrechen
    CancelWireDrag,
    /// Gerät platzieren
    AddDevice {
        kind: DeviceKind,
        world_pos: glam::Vec2,
    },
    /// Gerät verschieben
    MoveDevice {
        device: DeviceId,
        world_pos: glam::Vec2,
    },
    /// Gerät drehen
    RotateDevice { device: DeviceId },
    /// Gerät löschen
    RemoveDevice { device: DeviceId },
    /// Geräte-Policy für interne Verbindungen setzen
    SetInternalConnections { device: DeviceId, accepted: bool },
    /// Zwei Klemmen verbinden
    ConnectTerminals { a: TerminalId, b: TerminalId },
    /// Leiter entfernen
    DisconnectConductor { conductor: ConductorId },
    /// Leiter zwischen zwei Klemmen entfernen
    DisconnectTerminals { a: TerminalId, b: TerminalId },
    /// Schaltplan laden
    LoadFile { path: String },
    /// Schaltplan speichern (`None` = aktueller Pfad)
    SaveFile { path: Option<String> },
    /// Optionen übernehmen
    ApplyOptions { options: EditorOptions },
    /// Optionen zurücksetzen
    ResetOptions,
}
