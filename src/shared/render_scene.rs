//! Render-Szene als expliziter Übergabevertrag zwischen App und Darstellung.
//!
//! Lebt im shared-Modul, da `app` sie baut und der Host sie konsumiert.

use crate::core::{ConductorId, FeedbackClass, TerminalId};
use glam::Vec2;

/// Gerouteter Leiter für einen Frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorShape {
    /// ID des Leiters
    pub id: ConductorId,
    /// Polygonzug in Weltkoordinaten
    pub path: Vec<Vec2>,
}

/// Klemme mit Hover-Zustand für einen Frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalMarker {
    /// ID der Klemme
    pub id: TerminalId,
    /// Andockpunkt in Weltkoordinaten
    pub docking_point: Vec2,
    /// Geräte-Ankerpunkt in Weltkoordinaten (Ende des Stummels)
    pub element_anchor: Vec2,
    /// Hover-Rückmeldung
    pub feedback: FeedbackClass,
    /// Farbe zur Rückmeldung
    pub color: [f32; 4],
}

/// Vorschau-Segment während ein Leiter gezogen wird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WirePreview {
    /// Andockpunkt der Startklemme
    pub from: Vec2,
    /// Aktuelle Zeigerposition
    pub to: Vec2,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScene {
    /// Alle lebenden Leiter
    pub conductors: Vec<ConductorShape>,
    /// Alle Klemmen
    pub terminals: Vec<TerminalMarker>,
    /// Hüllrechtecke der Geräte (min, max)
    pub device_bounds: Vec<(Vec2, Vec2)>,
    /// Vorschau-Linie (nur während eines Zieh-Vorgangs)
    pub preview: Option<WirePreview>,
    /// Leiterfarbe
    pub conductor_color: [f32; 4],
}

impl RenderScene {
    /// Gibt zurück, ob gerade ein Leiter gezogen wird.
    pub fn is_dragging(&self) -> bool {
        self.preview.is_some()
    }
}
