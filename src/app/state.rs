//! Application State: zentrale Datenhaltung.

use super::tools::WireDrawTool;
use super::CommandLog;
use crate::core::Schema;
use crate::shared::EditorOptions;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktueller Schaltplan
    pub schema: Schema,
    /// Werkzeug "Leiter ziehen"
    pub wire_draw: WireDrawTool,
    /// Laufzeit-Optionen (Farben, Klemmen-Parameter)
    pub options: EditorOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Pfad der zuletzt geladenen/gespeicherten Datei
    pub current_file_path: Option<String>,
    /// Letzte abgelehnte Aktion (für Statusanzeige)
    pub last_error: Option<String>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit gegebenen Optionen
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            schema: options.new_schema(),
            wire_draw: WireDrawTool::new(),
            options,
            command_log: CommandLog::new(),
            current_file_path: None,
            last_error: None,
        }
    }

    /// Gibt die Anzahl der Geräte zurück (für UI-Anzeige)
    pub fn device_count(&self) -> usize {
        self.schema.device_count()
    }

    /// Gibt die Anzahl der Leiter zurück (für UI-Anzeige)
    pub fn conductor_count(&self) -> usize {
        self.schema.conductor_count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
