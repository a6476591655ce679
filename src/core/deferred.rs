//! Warteschlange für aus dem Schaltplan entfernte Objekte.
//!
//! Entfernte Leiter, Klemmen und Geräte werden nicht sofort verworfen,
//! sondern bis zum Ende des aktuellen Event-Batches aufbewahrt. Jede ID
//! steht höchstens einmal in der Warteschlange.

use super::{Conductor, ConductorId, Device, DeviceId, Terminal, TerminalId};
use indexmap::IndexMap;

/// Schlüssel eines entfernten Objekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovedId {
    /// Leiter
    Conductor(ConductorId),
    /// Klemme
    Terminal(TerminalId),
    /// Gerät
    Device(DeviceId),
}

/// Ein aus dem Schaltplan entferntes Objekt.
#[derive(Debug, Clone)]
pub enum Removed {
    /// Abgebauter Leiter (Tombstone gesetzt)
    Conductor(Conductor),
    /// Klemme eines gelöschten Geräts
    Terminal(Terminal),
    /// Gelöschtes Gerät
    Device(Device),
}

impl Removed {
    /// Schlüssel des Objekts.
    pub fn id(&self) -> RemovedId {
        match self {
            Removed::Conductor(c) => RemovedId::Conductor(c.id),
            Removed::Terminal(t) => RemovedId::Terminal(t.id),
            Removed::Device(d) => RemovedId::Device(d.id),
        }
    }
}

/// Deduplizierende Freigabe-Warteschlange.
#[derive(Debug, Clone, Default)]
pub struct DeferredFree {
    queue: IndexMap<RemovedId, Removed>,
}

impl DeferredFree {
    /// Erstellt eine leere Warteschlange.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reiht ein Objekt ein. `false`, wenn die ID schon eingereiht ist.
    pub fn push(&mut self, item: Removed) -> bool {
        let id = item.id();
        if self.queue.contains_key(&id) {
            log::debug!("{:?} ist bereits zur Freigabe vorgemerkt", id);
            return false;
        }
        self.queue.insert(id, item);
        true
    }

    /// Prüft ob eine ID eingereiht ist.
    pub fn contains(&self, id: RemovedId) -> bool {
        self.queue.contains_key(&id)
    }

    /// Eingereihtes Objekt (read-only).
    pub fn get(&self, id: RemovedId) -> Option<&Removed> {
        self.queue.get(&id)
    }

    /// Anzahl eingereihter Objekte.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Gibt `true` zurück, wenn nichts eingereiht ist.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Leert die Warteschlange und gibt die Objekte in Einreihungsreihenfolge zurück.
    pub fn drain(&mut self) -> Vec<Removed> {
        self.queue.drain(..).map(|(_, item)| item).collect()
    }
}
