//! Der Schaltplan: Arena aus Geräten, Klemmen und Leitern.
//!
//! Alle Mutationen an Klemmen-Leiter-Beziehungen laufen über [`Schema::connect`]
//! und [`Schema::disconnect`]. Dadurch gelten nach jeder Mutation:
//! - Ein Leiter verbindet zwei verschiedene Klemmen.
//! - Zwischen zwei Klemmen gibt es höchstens einen Leiter.
//! - Eine Klemme listet einen Leiter genau dann, wenn der Leiter sie referenziert.
//! - Pfade sind nach jeder gemeldeten Geometrieänderung aktuell.

use super::deferred::{DeferredFree, Removed};
use super::spatial::TerminalIndex;
use super::{
    AttachError, Conductor, ConductorId, Device, DeviceId, DeviceKind, FeedbackClass,
    Orientation, Rotation, Terminal, TerminalId, TerminalRecord,
};
use glam::Vec2;
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Länge des Klemmen-Stummels zwischen Andockpunkt und Gerätekörper.
pub const TERMINAL_STUB_LENGTH: f32 = 4.0;
/// Pick-Radius für Klemmen in Welteinheiten.
pub const TERMINAL_PICK_RADIUS: f32 = 3.0;

/// Abgelehnte Verbindung. Die Varianten steuern direkt die Hover-Rückmeldung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Klemme existiert nicht
    #[error("Klemme {0} existiert nicht")]
    UnknownTerminal(TerminalId),
    /// Start- und Zielklemme sind identisch
    #[error("Klemme {0} kann nicht mit sich selbst verbunden werden")]
    SelfConnection(TerminalId),
    /// Die Klemmen sind bereits direkt verbunden
    #[error("Klemmen {a} und {b} sind bereits verbunden")]
    Duplicate { a: TerminalId, b: TerminalId },
    /// Beide Klemmen gehören zum selben Gerät, das keine internen Verbindungen erlaubt
    #[error("Gerät {device} erlaubt keine internen Verbindungen")]
    InternalConnectionDisallowed { device: DeviceId },
    /// Sonstige Ablehnung beim Andocken
    #[error(transparent)]
    Attach(AttachError),
}

impl From<AttachError> for ConnectionError {
    fn from(err: AttachError) -> Self {
        match err {
            AttachError::AlreadyLinked { terminal, other } => ConnectionError::Duplicate {
                a: terminal,
                b: other,
            },
            AttachError::UnknownTerminal(id) => ConnectionError::UnknownTerminal(id),
            other => ConnectionError::Attach(other),
        }
    }
}

/// Was liegt unter dem Zeiger?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// Eine Klemme
    Terminal(TerminalId),
    /// Ein Gerät (ohne Klemme im Pick-Radius)
    Device(DeviceId),
    /// Nichts
    Empty,
}

impl PickTarget {
    /// Klemme, falls getroffen.
    pub fn terminal(self) -> Option<TerminalId> {
        match self {
            PickTarget::Terminal(id) => Some(id),
            _ => None,
        }
    }
}

/// Kompletter Schaltplan.
#[derive(Debug, Clone)]
pub struct Schema {
    devices: IndexMap<DeviceId, Device>,
    terminals: IndexMap<TerminalId, Terminal>,
    conductors: IndexMap<ConductorId, Conductor>,
    next_device_id: u64,
    next_terminal_id: u64,
    next_conductor_id: u64,
    stub_length: f32,
    pick_radius: f32,
    internal_connections_default: bool,
    spatial_index: TerminalIndex,
    pending_free: DeferredFree,
}

impl Schema {
    /// Erstellt einen leeren Schaltplan.
    pub fn new(stub_length: f32, pick_radius: f32, internal_connections_default: bool) -> Self {
        Self {
            devices: IndexMap::new(),
            terminals: IndexMap::new(),
            conductors: IndexMap::new(),
            next_device_id: 1,
            next_terminal_id: 1,
            next_conductor_id: 1,
            stub_length,
            pick_radius,
            internal_connections_default,
            spatial_index: TerminalIndex::empty(),
            pending_free: DeferredFree::new(),
        }
    }

    /// Stummellänge neuer Klemmen.
    pub fn stub_length(&self) -> f32 {
        self.stub_length
    }

    /// Pick-Radius für Klemmen.
    pub fn pick_radius(&self) -> f32 {
        self.pick_radius
    }

    /// Setzt den Pick-Radius für Klemmen.
    pub fn set_pick_radius(&mut self, radius: f32) {
        self.pick_radius = radius;
    }

    // ── Geräte und Klemmen ──────────────────────────────────────

    /// Platziert ein Gerät samt den Klemmen seiner Vorlage.
    pub fn add_device(&mut self, kind: DeviceKind, position: Vec2) -> DeviceId {
        let id = DeviceId(self.next_device_id);
        self.next_device_id += 1;

        let mut device = Device::new(id, kind, position, self.internal_connections_default);
        for (dock_point, orientation) in kind.template().terminals {
            let terminal_id = self.alloc_terminal_id();
            self.terminals.insert(
                terminal_id,
                Terminal::new(terminal_id, Some(id), dock_point, orientation, self.stub_length),
            );
            device.push_terminal(terminal_id);
        }
        log::debug!(
            "Gerät {} ({}) mit {} Klemme(n) platziert",
            id,
            kind.as_str(),
            device.terminals().len()
        );
        self.devices.insert(id, device);
        self.rebuild_spatial_index();
        id
    }

    /// Legt eine freie Klemme ohne Gerät an (Andockpunkt in Weltkoordinaten).
    pub fn add_free_terminal(&mut self, dock_point: Vec2, orientation: Orientation) -> TerminalId {
        let stub_length = self.stub_length;
        let id = self.alloc_terminal_id();
        self.terminals
            .insert(id, Terminal::new(id, None, dock_point, orientation, stub_length));
        self.rebuild_spatial_index();
        id
    }

    /// Legt eine Klemme aus einem Datensatz an.
    pub fn add_terminal_from_record(
        &mut self,
        device: Option<DeviceId>,
        record: &TerminalRecord,
    ) -> Option<TerminalId> {
        let stub_length = self.stub_length;
        self.insert_terminal(device, |id| {
            Terminal::from_record(id, device, record, stub_length)
        })
    }

    fn insert_terminal(
        &mut self,
        device: Option<DeviceId>,
        build: impl FnOnce(TerminalId) -> Terminal,
    ) -> Option<TerminalId> {
        if let Some(device_id) = device {
            if !self.devices.contains_key(&device_id) {
                log::warn!("Klemme nicht angelegt: Gerät {} existiert nicht", device_id);
                return None;
            }
        }

        let id = self.alloc_terminal_id();
        self.terminals.insert(id, build(id));
        if let Some(device) = device.and_then(|d| self.devices.get_mut(&d)) {
            device.push_terminal(id);
        }
        self.rebuild_spatial_index();
        Some(id)
    }

    fn alloc_terminal_id(&mut self) -> TerminalId {
        let id = TerminalId(self.next_terminal_id);
        self.next_terminal_id += 1;
        id
    }

    /// Verschiebt ein Gerät an eine neue Position und routet seine Leiter neu.
    pub fn move_device(&mut self, id: DeviceId, position: Vec2) -> bool {
        let Some(device) = self.devices.get_mut(&id) else {
            return false;
        };
        if device.position() == position {
            return true;
        }
        device.set_position(position);
        self.device_geometry_changed(id);
        true
    }

    /// Verschiebt ein Gerät um ein Delta.
    pub fn translate_device(&mut self, id: DeviceId, delta: Vec2) -> bool {
        match self.devices.get(&id) {
            Some(device) => {
                let target = device.position() + delta;
                self.move_device(id, target)
            }
            None => false,
        }
    }

    /// Dreht ein Gerät um eine Vierteldrehung weiter.
    pub fn rotate_device(&mut self, id: DeviceId) -> bool {
        match self.devices.get(&id) {
            Some(device) => {
                let next = device.rotation().next();
                self.set_device_rotation(id, next)
            }
            None => false,
        }
    }

    /// Setzt die Drehung eines Geräts.
    pub fn set_device_rotation(&mut self, id: DeviceId, rotation: Rotation) -> bool {
        let Some(device) = self.devices.get_mut(&id) else {
            return false;
        };
        device.set_rotation(rotation);
        self.device_geometry_changed(id);
        true
    }

    /// Erlaubt oder verbietet Verbindungen zwischen Klemmen desselben Geräts.
    pub fn set_internal_connections(&mut self, id: DeviceId, accepted: bool) -> bool {
        match self.devices.get_mut(&id) {
            Some(device) => {
                device.set_accepts_internal_connections(accepted);
                true
            }
            None => false,
        }
    }

    fn device_geometry_changed(&mut self, id: DeviceId) {
        let terminals: Vec<TerminalId> = self
            .devices
            .get(&id)
            .map(|d| d.terminals().to_vec())
            .unwrap_or_default();
        for terminal in terminals {
            self.notify_geometry_changed(terminal);
        }
        self.rebuild_spatial_index();
    }

    /// Entfernt eine Klemme samt ihrer Leiter.
    pub fn remove_terminal(&mut self, id: TerminalId) -> bool {
        if !self.remove_terminal_internal(id) {
            return false;
        }
        self.rebuild_spatial_index();
        true
    }

    fn remove_terminal_internal(&mut self, id: TerminalId) -> bool {
        let Some(conductors) = self
            .terminals
            .get(&id)
            .map(|t| t.conductors().collect::<Vec<_>>())
        else {
            return false;
        };
        for conductor in conductors {
            self.disconnect(conductor);
        }

        let Some(terminal) = self.terminals.shift_remove(&id) else {
            return false;
        };
        if let Some(device) = terminal.device().and_then(|d| self.devices.get_mut(&d)) {
            device.remove_terminal(id);
        }
        self.pending_free.push(Removed::Terminal(terminal));
        true
    }

    /// Löscht ein Gerät mit allen Klemmen und angedockten Leitern.
    pub fn remove_device(&mut self, id: DeviceId) -> bool {
        let Some(terminals) = self.devices.get(&id).map(|d| d.terminals().to_vec()) else {
            return false;
        };

        let conductors: IndexSet<ConductorId> = terminals
            .iter()
            .filter_map(|t| self.terminals.get(t))
            .flat_map(|t| t.conductors())
            .collect();

        for terminal in terminals {
            self.remove_terminal_internal(terminal);
        }
        if let Some(device) = self.devices.shift_remove(&id) {
            self.pending_free.push(Removed::Device(device));
        }
        self.rebuild_spatial_index();

        log::info!(
            "Gerät {} gelöscht ({} Leiter abgebaut)",
            id,
            conductors.len()
        );
        true
    }

    // ── Zugriff ─────────────────────────────────────────────────

    /// Gerät nach ID.
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Klemme nach ID.
    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.get(&id)
    }

    /// Leiter nach ID (nur lebende Leiter).
    pub fn conductor(&self, id: ConductorId) -> Option<&Conductor> {
        self.conductors.get(&id)
    }

    /// Iterator über alle Geräte.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Iterator über alle Klemmen.
    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.values()
    }

    /// Iterator über alle lebenden Leiter.
    pub fn conductors(&self) -> impl Iterator<Item = &Conductor> {
        self.conductors.values()
    }

    /// Anzahl Geräte.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Anzahl Klemmen.
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Anzahl lebender Leiter.
    pub fn conductor_count(&self) -> usize {
        self.conductors.len()
    }

    /// Besitzendes Gerät einer Klemme.
    pub fn device_of(&self, terminal: TerminalId) -> Option<&Device> {
        self.terminals
            .get(&terminal)
            .and_then(|t| t.device())
            .and_then(|d| self.devices.get(&d))
    }

    /// Gemeinsames Gerät zweier Klemmen, falls beide demselben Gerät gehören.
    pub fn shared_device(&self, a: TerminalId, b: TerminalId) -> Option<&Device> {
        let device_a = self.terminals.get(&a)?.device()?;
        let device_b = self.terminals.get(&b)?.device()?;
        if device_a == device_b {
            self.devices.get(&device_a)
        } else {
            None
        }
    }

    /// Wirksame Orientierung (Geräte-Drehung berücksichtigt).
    pub fn effective_orientation(&self, terminal: TerminalId) -> Option<Orientation> {
        let t = self.terminals.get(&terminal)?;
        Some(t.effective_orientation(self.device_of(terminal)))
    }

    /// Andockpunkt in Weltkoordinaten.
    pub fn docking_point(&self, terminal: TerminalId) -> Option<Vec2> {
        let t = self.terminals.get(&terminal)?;
        Some(t.docking_point(self.device_of(terminal)))
    }

    /// Geräte-Ankerpunkt in Weltkoordinaten.
    pub fn element_anchor(&self, terminal: TerminalId) -> Option<Vec2> {
        let t = self.terminals.get(&terminal)?;
        Some(t.element_anchor(self.device_of(terminal)))
    }

    /// Hover-Rückmeldung einer Klemme.
    pub fn feedback(&self, terminal: TerminalId) -> Option<FeedbackClass> {
        self.terminals.get(&terminal).map(Terminal::feedback)
    }

    pub(crate) fn set_feedback(&mut self, terminal: TerminalId, feedback: FeedbackClass) -> bool {
        match self.terminals.get_mut(&terminal) {
            Some(t) => {
                t.set_feedback(feedback);
                true
            }
            None => false,
        }
    }

    /// Setzt die Hover-Rückmeldung aller Klemmen auf neutral zurück.
    pub(crate) fn clear_feedback(&mut self) {
        for terminal in self.terminals.values_mut() {
            terminal.set_feedback(FeedbackClass::Neutral);
        }
    }

    /// Sind die beiden Klemmen direkt verbunden?
    pub fn are_linked(&self, a: TerminalId, b: TerminalId) -> bool {
        self.terminals.get(&a).is_some_and(|t| t.is_linked_to(b))
    }

    /// Alle lebenden Leiter zwischen `a` und `b` (höchstens einer).
    pub fn conductors_between(&self, a: TerminalId, b: TerminalId) -> Vec<ConductorId> {
        self.conductors
            .values()
            .filter(|c| !c.is_destroyed() && c.links(a, b))
            .map(|c| c.id)
            .collect()
    }

    /// Findet Klemme oder Gerät unter einer Weltposition.
    pub fn pick(&self, world_pos: Vec2) -> PickTarget {
        if let Some(hit) = self.spatial_index.nearest(world_pos) {
            if hit.distance <= self.pick_radius {
                return PickTarget::Terminal(hit.terminal_id);
            }
        }
        // Zuletzt platzierte Geräte liegen oben
        self.devices
            .values()
            .rev()
            .find(|d| d.contains(world_pos))
            .map_or(PickTarget::Empty, |d| PickTarget::Device(d.id))
    }

    // ── Verbinden / Trennen ─────────────────────────────────────

    /// Prüft ohne Mutation, ob `connect(a, b)` gelingen würde.
    pub fn check_connection(&self, a: TerminalId, b: TerminalId) -> Result<(), ConnectionError> {
        self.check_endpoints(a, b)?;
        if self.are_linked(a, b) {
            return Err(ConnectionError::Duplicate { a, b });
        }
        Ok(())
    }

    fn check_endpoints(&self, a: TerminalId, b: TerminalId) -> Result<(), ConnectionError> {
        for id in [a, b] {
            if !self.terminals.contains_key(&id) {
                return Err(ConnectionError::UnknownTerminal(id));
            }
        }
        if a == b {
            return Err(ConnectionError::SelfConnection(a));
        }
        if let Some(device) = self.shared_device(a, b) {
            if !device.accepts_internal_connections() {
                return Err(ConnectionError::InternalConnectionDisallowed { device: device.id });
            }
        }
        Ok(())
    }

    /// Verbindet zwei Klemmen mit einem neuen Leiter.
    ///
    /// Entweder docken beide Klemmen an oder keine: scheitert das zweite
    /// `attach`, wird das erste zurückgenommen und der Leiter verworfen.
    pub fn connect(&mut self, a: TerminalId, b: TerminalId) -> Result<ConductorId, ConnectionError> {
        self.check_endpoints(a, b)?;

        let id = ConductorId(self.next_conductor_id);
        let mut conductor = Conductor::new(id, a, b);

        self.terminals
            .get_mut(&a)
            .ok_or(AttachError::UnknownTerminal(a))?
            .attach(&conductor)?;

        let attached_b = match self.terminals.get_mut(&b) {
            Some(terminal) => terminal.attach(&conductor),
            None => Err(AttachError::UnknownTerminal(b)),
        };
        if let Err(err) = attached_b {
            if let Some(terminal) = self.terminals.get_mut(&a) {
                terminal.detach(id);
            }
            log::warn!("Leiter {}↔{} verworfen: {}", a, b, err);
            return Err(err.into());
        }

        self.next_conductor_id += 1;
        if let (Some((pa, oa)), Some((pb, ob))) =
            (self.endpoint_geometry(a), self.endpoint_geometry(b))
        {
            conductor.recompute_path(pa, oa, pb, ob);
        }
        self.conductors.insert(id, conductor);

        log::info!("Leiter {} zwischen {} und {} erstellt", id, a, b);
        Ok(id)
    }

    /// Baut einen Leiter ab: Tombstone setzen, an beiden Klemmen abdocken,
    /// aus dem Schaltplan nehmen und zur Freigabe vormerken.
    pub fn disconnect(&mut self, id: ConductorId) -> bool {
        let Some(conductor) = self.conductors.get_mut(&id) else {
            log::debug!("Leiter {} existiert nicht", id);
            return false;
        };
        conductor.mark_destroyed();
        let (a, b) = conductor.endpoints();

        for terminal in [a, b] {
            if let Some(t) = self.terminals.get_mut(&terminal) {
                t.detach(id);
            }
        }

        if let Some(conductor) = self.conductors.shift_remove(&id) {
            self.pending_free.push(Removed::Conductor(conductor));
        }
        log::info!("Leiter {} zwischen {} und {} entfernt", id, a, b);
        true
    }

    /// Entfernt den Leiter zwischen zwei Klemmen, falls vorhanden.
    pub fn disconnect_between(&mut self, a: TerminalId, b: TerminalId) -> bool {
        let conductor = self.terminals.get(&a).and_then(|t| {
            t.conductors()
                .find(|c| t.other_end_of(*c) == Some(b))
        });
        match conductor {
            Some(id) => self.disconnect(id),
            None => false,
        }
    }

    // ── Geometrie ───────────────────────────────────────────────

    fn endpoint_geometry(&self, terminal: TerminalId) -> Option<(Vec2, Orientation)> {
        let t = self.terminals.get(&terminal)?;
        let device = self.device_of(terminal);
        Some((t.docking_point(device), t.effective_orientation(device)))
    }

    /// Routet alle Leiter einer Klemme synchron neu. Abgebaute Leiter werden übersprungen.
    pub fn notify_geometry_changed(&mut self, terminal: TerminalId) -> usize {
        let Some(conductors) = self
            .terminals
            .get(&terminal)
            .map(|t| t.conductors().collect::<Vec<_>>())
        else {
            return 0;
        };
        conductors
            .into_iter()
            .filter(|id| self.recompute_conductor(*id))
            .count()
    }

    /// Routet einen einzelnen Leiter neu.
    pub fn recompute_conductor(&mut self, id: ConductorId) -> bool {
        let Some(conductor) = self.conductors.get(&id) else {
            return false;
        };
        if conductor.is_destroyed() {
            return false;
        }
        let (a, b) = conductor.endpoints();
        let (Some((pa, oa)), Some((pb, ob))) =
            (self.endpoint_geometry(a), self.endpoint_geometry(b))
        else {
            return false;
        };
        match self.conductors.get_mut(&id) {
            Some(conductor) => {
                conductor.recompute_path(pa, oa, pb, ob);
                true
            }
            None => false,
        }
    }

    /// Baut den Spatial-Index aus den aktuellen Andockpunkten neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        let devices = &self.devices;
        let points: Vec<(TerminalId, Vec2)> = self
            .terminals
            .values()
            .map(|t| {
                let device = t.device().and_then(|d| devices.get(&d));
                (t.id, t.docking_point(device))
            })
            .collect();
        self.spatial_index = TerminalIndex::from_points(points);
    }

    // ── Verzögerte Freigabe ─────────────────────────────────────

    /// Zur Freigabe vorgemerkte Objekte.
    pub fn pending_free(&self) -> &DeferredFree {
        &self.pending_free
    }

    /// Gibt alle vorgemerkten Objekte frei. Wird einmal pro Event-Batch aufgerufen.
    pub fn flush_deferred(&mut self) -> usize {
        let freed = self.pending_free.drain();
        if !freed.is_empty() {
            log::debug!("{} entfernte(s) Objekt(e) freigegeben", freed.len());
        }
        freed.len()
    }

    /// Prüft die Konsistenz zwischen Klemmenlisten und Leiter-Endpunkten.
    pub fn is_consistent(&self) -> bool {
        let conductors_ok = self.conductors.values().all(|c| {
            let (a, b) = c.endpoints();
            a != b
                && !c.is_destroyed()
                && self.terminals.get(&a).and_then(|t| t.other_end_of(c.id)) == Some(b)
                && self.terminals.get(&b).and_then(|t| t.other_end_of(c.id)) == Some(a)
        });
        let terminals_ok = self.terminals.values().all(|t| {
            let mut seen = IndexSet::new();
            t.conductors().all(|id| {
                self.conductors
                    .get(&id)
                    .and_then(|c| c.other_end(t.id))
                    .is_some_and(|other| seen.insert(other))
            })
        });
        conductors_ok && terminals_ok
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(TERMINAL_STUB_LENGTH, TERMINAL_PICK_RADIUS, false)
    }
}
