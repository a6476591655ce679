//! Himmelsrichtungen von Klemmen und Vierteldrehungen von Geräten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Seite eines Geräts, aus der eine Klemme herausragt.
///
/// Die Reihenfolge entspricht den numerischen Werten im Schaltplan-XML
/// (North=0, South=1, East=2, West=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Klemme zeigt nach oben (−y)
    North,
    /// Klemme zeigt nach unten (+y)
    #[default]
    South,
    /// Klemme zeigt nach rechts (+x)
    East,
    /// Klemme zeigt nach links (−x)
    West,
}

impl Orientation {
    /// Alle vier Richtungen in XML-Reihenfolge.
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Wandelt den numerischen XML-Wert in eine Richtung um.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Orientation::North),
            1 => Some(Orientation::South),
            2 => Some(Orientation::East),
            3 => Some(Orientation::West),
            _ => None,
        }
    }

    /// Numerischer XML-Wert der Richtung.
    pub fn to_u8(self) -> u8 {
        match self {
            Orientation::North => 0,
            Orientation::South => 1,
            Orientation::East => 2,
            Orientation::West => 3,
        }
    }

    /// Eine Vierteldrehung: North→West→South→East→North.
    pub fn rotated_quarter(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    /// Wendet eine Geräte-Drehung an (eine Vierteldrehung pro Schritt).
    pub fn rotated(self, rotation: Rotation) -> Self {
        (0..rotation.steps()).fold(self, |o, _| o.rotated_quarter())
    }

    /// Versatz vom Andockpunkt zum Geräte-Ankerpunkt (zeigt ins Gerät hinein).
    pub fn stub_offset(self, stub_length: f32) -> Vec2 {
        match self {
            Orientation::North => Vec2::new(0.0, stub_length),
            Orientation::East => Vec2::new(-stub_length, 0.0),
            Orientation::West => Vec2::new(stub_length, 0.0),
            Orientation::South => Vec2::new(0.0, -stub_length),
        }
    }
}

/// Drehzustand eines Geräts in Vierteldrehungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// Grundstellung
    #[default]
    Base,
    /// 90°
    Quarter,
    /// 180°
    Half,
    /// 270°
    ThreeQuarter,
}

impl Rotation {
    /// Anzahl Vierteldrehungen (0..=3).
    pub fn steps(self) -> u8 {
        match self {
            Rotation::Base => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }

    /// Baut eine Drehung aus einer beliebigen Schrittzahl (modulo 4).
    pub fn from_steps(steps: u8) -> Self {
        match steps % 4 {
            0 => Rotation::Base,
            1 => Rotation::Quarter,
            2 => Rotation::Half,
            _ => Rotation::ThreeQuarter,
        }
    }

    /// Nächste Vierteldrehung.
    pub fn next(self) -> Self {
        Self::from_steps(self.steps() + 1)
    }

    /// Dreht einen geräte-lokalen Punkt um den Geräte-Ursprung.
    ///
    /// Gleiche Drehrichtung wie [`Orientation::rotated_quarter`]:
    /// (0,−1) wird zu (−1,0).
    pub fn apply(self, local: Vec2) -> Vec2 {
        (0..self.steps()).fold(local, |p, _| Vec2::new(p.y, -p.x))
    }
}
