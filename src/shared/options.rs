//! Zentrale Konfiguration für den Schaltplan-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{FeedbackClass, Schema, TERMINAL_PICK_RADIUS, TERMINAL_STUB_LENGTH};
use serde::{Deserialize, Serialize};

// ── Klemmen-Rückmeldung ─────────────────────────────────────────────

/// Farbe neutraler Klemmen beim Hover (RGBA: Blau).
pub const FEEDBACK_COLOR_NEUTRAL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
/// Farbe bei erlaubter Verbindung (RGBA: Dunkelgrün).
pub const FEEDBACK_COLOR_ALLOWED: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
/// Farbe bei erlaubter Verbindung auf belegte Klemme (RGBA: Orange #ff8000).
pub const FEEDBACK_COLOR_CAUTION: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
/// Farbe bei verbotener Verbindung (RGBA: Rot).
pub const FEEDBACK_COLOR_FORBIDDEN: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

// ── Leiter ──────────────────────────────────────────────────────────

/// Farbe der Leiterpfade (RGBA: Schwarz).
pub const CONDUCTOR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Farbe der Vorschau-Linie beim Ziehen (RGBA: Grau).
pub const WIRE_PREVIEW_COLOR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

/// Laufzeit-Optionen des Editors (als TOML persistiert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Klemmen ─────────────────────────────────────────────────
    /// Länge des Klemmen-Stummels (Andockpunkt → Gerätekörper)
    pub terminal_stub_length: f32,
    /// Pick-Radius für Klemmen in Welteinheiten
    pub terminal_pick_radius: f32,
    /// Erlauben neue Geräte Verbindungen zwischen ihren eigenen Klemmen?
    #[serde(default)]
    pub internal_connections_default: bool,

    // ── Farben ──────────────────────────────────────────────────
    /// Hover-Farbe: neutral
    pub feedback_color_neutral: [f32; 4],
    /// Hover-Farbe: erlaubt
    pub feedback_color_allowed: [f32; 4],
    /// Hover-Farbe: Vorsicht (Klemme schon belegt)
    pub feedback_color_caution: [f32; 4],
    /// Hover-Farbe: verboten
    pub feedback_color_forbidden: [f32; 4],
    /// Farbe der Leiterpfade
    pub conductor_color: [f32; 4],
    /// Farbe der Vorschau-Linie
    #[serde(default = "default_wire_preview_color")]
    pub wire_preview_color: [f32; 4],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            terminal_stub_length: TERMINAL_STUB_LENGTH,
            terminal_pick_radius: TERMINAL_PICK_RADIUS,
            internal_connections_default: false,

            feedback_color_neutral: FEEDBACK_COLOR_NEUTRAL,
            feedback_color_allowed: FEEDBACK_COLOR_ALLOWED,
            feedback_color_caution: FEEDBACK_COLOR_CAUTION,
            feedback_color_forbidden: FEEDBACK_COLOR_FORBIDDEN,
            conductor_color: CONDUCTOR_COLOR,
            wire_preview_color: WIRE_PREVIEW_COLOR,
        }
    }
}

/// Serde-Default für `wire_preview_color` (Abwärtskompatibilität).
fn default_wire_preview_color() -> [f32; 4] {
    WIRE_PREVIEW_COLOR
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("schematic-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("schematic-editor.toml")
    }

    /// Farbe zur Hover-Rückmeldung einer Klemme.
    pub fn feedback_color(&self, feedback: FeedbackClass) -> [f32; 4] {
        match feedback {
            FeedbackClass::Neutral => self.feedback_color_neutral,
            FeedbackClass::Allowed => self.feedback_color_allowed,
            FeedbackClass::Caution => self.feedback_color_caution,
            FeedbackClass::Forbidden => self.feedback_color_forbidden,
        }
    }

    /// Leerer Schaltplan mit den konfigurierten Klemmen-Parametern.
    pub fn new_schema(&self) -> Schema {
        Schema::new(
            self.terminal_stub_length,
            self.terminal_pick_radius,
            self.internal_connections_default,
        )
    }
}
