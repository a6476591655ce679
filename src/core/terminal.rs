//! Klemme eines Geräts: Andockpunkt für Leiter.

use super::{Conductor, ConductorId, Device, DeviceId, Orientation, TerminalId};
use glam::Vec2;
use indexmap::IndexMap;
use thiserror::Error;

/// Hover-Rückmeldung während ein Leiter gezogen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackClass {
    /// Kein Hover
    #[default]
    Neutral,
    /// Verbindung möglich
    Allowed,
    /// Verbindung möglich, Klemme hat aber schon andere Leiter
    Caution,
    /// Verbindung nicht möglich
    Forbidden,
}

/// Abgelehntes `attach` (Vertragsverletzung des Aufrufers, kein Absturz).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttachError {
    /// Die Klemme existiert nicht (mehr) im Schaltplan
    #[error("Klemme {0} existiert nicht")]
    UnknownTerminal(TerminalId),
    /// Der Leiter referenziert die Klemme nicht genau einmal
    #[error("Leiter {conductor} referenziert Klemme {terminal} nicht genau einmal")]
    NotAnEndpoint {
        conductor: ConductorId,
        terminal: TerminalId,
    },
    /// Die Gegenklemme ist bereits direkt mit dieser Klemme verbunden
    #[error("Klemme {terminal} ist bereits mit {other} verbunden")]
    AlreadyLinked {
        terminal: TerminalId,
        other: TerminalId,
    },
}

/// Serialisierte Form einer Klemme: Koordinaten des Geräte-Ankerpunkts
/// (geräte-lokal) und rohe Orientierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalRecord {
    /// Optionale ID, über die Leiter-Datensätze die Klemme referenzieren
    pub id: Option<u64>,
    /// x des Geräte-Ankerpunkts
    pub x: f32,
    /// y des Geräte-Ankerpunkts
    pub y: f32,
    /// Rohe Orientierung
    pub orientation: Orientation,
}

/// Anschlussstelle an einem Gerät.
#[derive(Debug, Clone)]
pub struct Terminal {
    /// ID der Klemme
    pub id: TerminalId,
    device: Option<DeviceId>,
    dock_point: Vec2,
    element_anchor: Vec2,
    orientation: Orientation,
    /// Angedockte Leiter → jeweilige Gegenklemme
    attached: IndexMap<ConductorId, TerminalId>,
    feedback: FeedbackClass,
}

impl Terminal {
    /// Erstellt eine Klemme. `dock_point` ist geräte-lokal (bzw. Welt bei freien Klemmen).
    pub fn new(
        id: TerminalId,
        device: Option<DeviceId>,
        dock_point: Vec2,
        orientation: Orientation,
        stub_length: f32,
    ) -> Self {
        Self {
            id,
            device,
            dock_point,
            element_anchor: dock_point + orientation.stub_offset(stub_length),
            orientation,
            attached: IndexMap::new(),
            feedback: FeedbackClass::Neutral,
        }
    }

    /// Rekonstruiert eine Klemme aus einem Datensatz (Ankerpunkt → Andockpunkt).
    pub fn from_record(
        id: TerminalId,
        device: Option<DeviceId>,
        record: &TerminalRecord,
        stub_length: f32,
    ) -> Self {
        let anchor = Vec2::new(record.x, record.y);
        let dock_point = anchor - record.orientation.stub_offset(stub_length);
        let mut terminal = Self::new(id, device, dock_point, record.orientation, stub_length);
        // Anker exakt aus dem Datensatz übernehmen, damit `matches_record` reflexiv bleibt
        terminal.element_anchor = anchor;
        terminal
    }

    /// Besitzendes Gerät (None bei freien Klemmen).
    pub fn device(&self) -> Option<DeviceId> {
        self.device
    }

    /// Andockpunkt in Geräte-Koordinaten.
    pub fn local_dock_point(&self) -> Vec2 {
        self.dock_point
    }

    /// Geräte-Ankerpunkt in Geräte-Koordinaten.
    pub fn local_element_anchor(&self) -> Vec2 {
        self.element_anchor
    }

    /// Rohe, ungedrehte Orientierung.
    pub fn raw_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Orientierung unter Berücksichtigung der Geräte-Drehung.
    ///
    /// Wird bei jedem Aufruf neu berechnet, nie zwischengespeichert.
    pub fn effective_orientation(&self, device: Option<&Device>) -> Orientation {
        match device {
            Some(device) => self.orientation.rotated(device.rotation()),
            None => self.orientation,
        }
    }

    /// Andockpunkt in Weltkoordinaten.
    pub fn docking_point(&self, device: Option<&Device>) -> Vec2 {
        match device {
            Some(device) => device.map_to_world(self.dock_point),
            None => self.dock_point,
        }
    }

    /// Geräte-Ankerpunkt in Weltkoordinaten.
    pub fn element_anchor(&self, device: Option<&Device>) -> Vec2 {
        match device {
            Some(device) => device.map_to_world(self.element_anchor),
            None => self.element_anchor,
        }
    }

    /// Aktuelle Hover-Rückmeldung.
    pub fn feedback(&self) -> FeedbackClass {
        self.feedback
    }

    pub(crate) fn set_feedback(&mut self, feedback: FeedbackClass) {
        self.feedback = feedback;
    }

    /// Registriert einen Leiter an dieser Klemme.
    ///
    /// Abgelehnt, wenn der Leiter diese Klemme nicht genau einmal referenziert
    /// oder die Gegenklemme bereits direkt verbunden ist.
    pub fn attach(&mut self, conductor: &Conductor) -> Result<(), AttachError> {
        let (a, b) = conductor.endpoints();
        if (a == self.id) == (b == self.id) {
            return Err(AttachError::NotAnEndpoint {
                conductor: conductor.id,
                terminal: self.id,
            });
        }

        let other = if a == self.id { b } else { a };
        if self.is_linked_to(other) {
            return Err(AttachError::AlreadyLinked {
                terminal: self.id,
                other,
            });
        }

        self.attached.insert(conductor.id, other);
        Ok(())
    }

    /// Entfernt einen Leiter. Unbekannte Leiter sind ein No-op.
    pub fn detach(&mut self, conductor: ConductorId) -> bool {
        self.attached.shift_remove(&conductor).is_some()
    }

    /// Prüft ob ein Leiter direkt zur Klemme `other` führt.
    pub fn is_linked_to(&self, other: TerminalId) -> bool {
        self.attached.values().any(|t| *t == other)
    }

    /// Angedockte Leiter.
    pub fn conductors(&self) -> impl Iterator<Item = ConductorId> + '_ {
        self.attached.keys().copied()
    }

    /// Anzahl angedockter Leiter.
    pub fn conductor_count(&self) -> usize {
        self.attached.len()
    }

    /// Gegenklemme eines angedockten Leiters.
    pub fn other_end_of(&self, conductor: ConductorId) -> Option<TerminalId> {
        self.attached.get(&conductor).copied()
    }

    /// Serialisierte Form (Ankerpunkt, rohe Orientierung).
    pub fn to_record(&self) -> TerminalRecord {
        TerminalRecord {
            id: Some(self.id.raw()),
            x: self.element_anchor.x,
            y: self.element_anchor.y,
            orientation: self.orientation,
        }
    }

    /// Erkennt sich die Klemme in einem Datensatz wieder (gleiche Koordinaten und Orientierung)?
    pub fn matches_record(&self, record: &TerminalRecord) -> bool {
        record.x == self.element_anchor.x
            && record.y == self.element_anchor.y
            && record.orientation == self.orientation
    }
}
