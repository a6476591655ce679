//! Leiter zwischen genau zwei Klemmen.

use super::routing::route;
use super::{ConductorId, Orientation, TerminalId};
use glam::Vec2;

/// Serialisierte Form eines Leiters: IDs der beiden Endklemmen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConductorRecord {
    /// ID der ersten Klemme
    pub terminal1: u64,
    /// ID der zweiten Klemme
    pub terminal2: u64,
}

/// Ein Leiter. Besitzt seine Klemmen nicht, sondern referenziert sie über IDs.
#[derive(Debug, Clone)]
pub struct Conductor {
    /// ID des Leiters
    pub id: ConductorId,
    endpoint_a: TerminalId,
    endpoint_b: TerminalId,
    /// Zwischengespeicherter Pfad in Weltkoordinaten
    path: Vec<Vec2>,
    destroyed: bool,
}

impl Conductor {
    /// Erstellt einen noch nicht gerouteten Leiter.
    pub fn new(id: ConductorId, endpoint_a: TerminalId, endpoint_b: TerminalId) -> Self {
        Self {
            id,
            endpoint_a,
            endpoint_b,
            path: Vec::new(),
            destroyed: false,
        }
    }

    /// Beide Endklemmen in Erstellungsreihenfolge.
    pub fn endpoints(&self) -> (TerminalId, TerminalId) {
        (self.endpoint_a, self.endpoint_b)
    }

    /// Gegenklemme zu `terminal`, falls `terminal` ein Endpunkt ist.
    pub fn other_end(&self, terminal: TerminalId) -> Option<TerminalId> {
        if terminal == self.endpoint_a {
            Some(self.endpoint_b)
        } else if terminal == self.endpoint_b {
            Some(self.endpoint_a)
        } else {
            None
        }
    }

    /// Verbindet der Leiter genau die Klemmen `a` und `b` (in beliebiger Reihenfolge)?
    pub fn links(&self, a: TerminalId, b: TerminalId) -> bool {
        (self.endpoint_a == a && self.endpoint_b == b)
            || (self.endpoint_a == b && self.endpoint_b == a)
    }

    /// Aktueller Pfad (leer bis zum ersten Routing).
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Tombstone: der Leiter wird gerade abgebaut.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    /// Routet den Pfad neu aus den aufgelösten Endpunkt-Geometrien.
    pub(crate) fn recompute_path(
        &mut self,
        a: Vec2,
        orient_a: Orientation,
        b: Vec2,
        orient_b: Orientation,
    ) {
        self.path = route(a, orient_a, b, orient_b);
    }

    /// Serialisierte Form.
    pub fn to_record(&self) -> ConductorRecord {
        ConductorRecord {
            terminal1: self.endpoint_a.raw(),
            terminal2: self.endpoint_b.raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_end_and_links() {
        let c = Conductor::new(ConductorId(1), TerminalId(3), TerminalId(4));
        assert_eq!(c.other_end(TerminalId(3)), Some(TerminalId(4)));
        assert_eq!(c.other_end(TerminalId(4)), Some(TerminalId(3)));
        assert_eq!(c.other_end(TerminalId(5)), None);
        assert!(c.links(TerminalId(4), TerminalId(3)));
        assert!(!c.links(TerminalId(4), TerminalId(5)));
    }

    #[test]
    fn test_recompute_path_uses_routing() {
        let mut c = Conductor::new(ConductorId(1), TerminalId(1), TerminalId(2));
        assert!(c.path().is_empty());
        c.recompute_path(
            Vec2::new(0.0, 0.0),
            Orientation::South,
            Vec2::new(100.0, 50.0),
            Orientation::North,
        );
        assert_eq!(c.path().len(), 4);
        assert_eq!(c.path()[1], Vec2::new(0.0, 25.0));
    }
}
