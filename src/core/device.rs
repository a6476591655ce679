//! Geräte (Schaltplan-Symbole), die Klemmen besitzen.

use super::{DeviceId, Orientation, Rotation, TerminalId};
use glam::Vec2;

/// Bekannte Symbolarten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    /// Schütz: zwei Klemmen (oben Nord, unten Süd)
    Contactor,
    /// Eingang: eine Klemme nach Süden
    Input,
    /// Frei definiertes Gerät ohne vordefinierte Klemmen
    #[default]
    Generic,
}

/// Geometrie-Vorlage einer Symbolart.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTemplate {
    /// Breite/Höhe des Symbols
    pub size: Vec2,
    /// Lage des Geräte-Ursprungs innerhalb des Symbols
    pub hotspot: Vec2,
    /// Klemmen: (Andockpunkt lokal, Orientierung)
    pub terminals: Vec<(Vec2, Orientation)>,
}

impl DeviceKind {
    /// Vorlage mit Größe, Hotspot und Klemmen.
    pub fn template(self) -> DeviceTemplate {
        match self {
            DeviceKind::Contactor => DeviceTemplate {
                size: Vec2::new(15.0, 70.0),
                hotspot: Vec2::new(10.0, 5.0),
                terminals: vec![
                    (Vec2::new(0.0, 0.0), Orientation::North),
                    (Vec2::new(0.0, 60.0), Orientation::South),
                ],
            },
            DeviceKind::Input => DeviceTemplate {
                size: Vec2::new(20.0, 40.0),
                hotspot: Vec2::new(10.0, 15.0),
                terminals: vec![(Vec2::new(0.0, 15.0), Orientation::South)],
            },
            DeviceKind::Generic => DeviceTemplate {
                size: Vec2::new(20.0, 20.0),
                hotspot: Vec2::new(10.0, 10.0),
                terminals: Vec::new(),
            },
        }
    }

    /// Name im XML.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Contactor => "contactor",
            DeviceKind::Input => "input",
            DeviceKind::Generic => "generic",
        }
    }

    /// Liest den XML-Namen.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contactor" => Some(DeviceKind::Contactor),
            "input" => Some(DeviceKind::Input),
            "generic" => Some(DeviceKind::Generic),
            _ => None,
        }
    }
}

/// Ein platziertes Gerät.
#[derive(Debug, Clone)]
pub struct Device {
    /// ID des Geräts
    pub id: DeviceId,
    /// Symbolart
    pub kind: DeviceKind,
    position: Vec2,
    rotation: Rotation,
    size: Vec2,
    hotspot: Vec2,
    accepts_internal_connections: bool,
    terminals: Vec<TerminalId>,
}

impl Device {
    /// Erstellt ein Gerät ohne Klemmen; die Klemmen legt der Schaltplan an.
    pub fn new(
        id: DeviceId,
        kind: DeviceKind,
        position: Vec2,
        accepts_internal_connections: bool,
    ) -> Self {
        let template = kind.template();
        Self {
            id,
            kind,
            position,
            rotation: Rotation::Base,
            size: template.size,
            hotspot: template.hotspot,
            accepts_internal_connections,
            terminals: Vec::new(),
        }
    }

    /// Position des Geräte-Ursprungs in Weltkoordinaten.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Aktuelle Drehung.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Dürfen Klemmen dieses Geräts untereinander verbunden werden?
    pub fn accepts_internal_connections(&self) -> bool {
        self.accepts_internal_connections
    }

    /// Klemmen des Geräts.
    pub fn terminals(&self) -> &[TerminalId] {
        &self.terminals
    }

    /// Prüft ob die Klemme zu diesem Gerät gehört.
    pub fn owns(&self, terminal: TerminalId) -> bool {
        self.terminals.contains(&terminal)
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub(crate) fn set_accepts_internal_connections(&mut self, accepted: bool) {
        self.accepts_internal_connections = accepted;
    }

    pub(crate) fn push_terminal(&mut self, terminal: TerminalId) {
        self.terminals.push(terminal);
    }

    pub(crate) fn remove_terminal(&mut self, terminal: TerminalId) {
        self.terminals.retain(|t| *t != terminal);
    }

    /// Transformiert einen geräte-lokalen Punkt in Weltkoordinaten.
    pub fn map_to_world(&self, local: Vec2) -> Vec2 {
        self.position + self.rotation.apply(local)
    }

    /// Achsenparalleles Hüllrechteck (min, max) in Weltkoordinaten.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min_local = -self.hotspot;
        let max_local = self.size - self.hotspot;
        let corners = [
            min_local,
            Vec2::new(max_local.x, min_local.y),
            max_local,
            Vec2::new(min_local.x, max_local.y),
        ];
        corners
            .iter()
            .map(|c| self.map_to_world(*c))
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            })
    }

    /// Liegt der Weltpunkt innerhalb des Hüllrechtecks?
    pub fn contains(&self, world: Vec2) -> bool {
        let (min, max) = self.bounds();
        world.x >= min.x && world.x <= max.x && world.y >= min.y && world.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in [DeviceKind::Contactor, DeviceKind::Input, DeviceKind::Generic] {
            assert_eq!(DeviceKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(DeviceKind::from_name("relais"), None);
    }

    #[test]
    fn test_map_to_world_with_rotation() {
        let mut device = Device::new(DeviceId(1), DeviceKind::Contactor, Vec2::new(100.0, 100.0), false);
        assert_eq!(device.map_to_world(Vec2::new(0.0, 60.0)), Vec2::new(100.0, 160.0));

        device.set_rotation(Rotation::Quarter);
        assert_eq!(device.map_to_world(Vec2::new(0.0, 60.0)), Vec2::new(160.0, 100.0));
    }

    #[test]
    fn test_bounds_contain_hotspot_area() {
        let device = Device::new(DeviceId(1), DeviceKind::Contactor, Vec2::ZERO, false);
        let (min, max) = device.bounds();
        assert_eq!(min, Vec2::new(-10.0, -5.0));
        assert_eq!(max, Vec2::new(5.0, 65.0));
        assert!(device.contains(Vec2::new(0.0, 30.0)));
        assert!(!device.contains(Vec2::new(20.0, 30.0)));
    }
}
