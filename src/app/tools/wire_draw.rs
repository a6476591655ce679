//! Zustandsautomat zum Ziehen eines Leiters.
//!
//! `Idle` → Druck auf eine Klemme → `Dragging` → Loslassen → `Idle`.
//! Während des Ziehens trägt höchstens eine Klemme eine Hover-Rückmeldung;
//! sie ist rein visuell und verändert den Graphen nicht.

use crate::core::{ConductorId, ConnectionError, FeedbackClass, Schema, TerminalId};
use crate::shared::WirePreview;
use glam::Vec2;

/// Laufender Zieh-Vorgang.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Klemme, an der der Zieh-Vorgang begann
    pub origin: TerminalId,
    /// Aktuelle Zeigerposition (Welt)
    pub pointer: Vec2,
    /// Klemme, die gerade die Hover-Rückmeldung trägt
    pub hovered: Option<TerminalId>,
}

/// Zustand des Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WireDrawState {
    /// Kein Zieh-Vorgang
    #[default]
    Idle,
    /// Leiter wird gezogen
    Dragging(DragState),
}

/// Warum ein Loslassen keinen Leiter erzeugt hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Unter dem Zeiger liegt keine Klemme
    NoTarget,
    /// Die Verbindung wurde abgelehnt
    Declined(ConnectionError),
}

/// Ergebnis von [`WireDrawTool::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Es lief kein Zieh-Vorgang
    NotDragging,
    /// Neuer Leiter erstellt
    Connected(ConductorId),
    /// Abgebrochen ohne Mutation
    Aborted(AbortReason),
}

/// Bestimmt die Hover-Rückmeldung einer Kandidaten-Klemme.
///
/// Reihenfolge: Startklemme selbst, Klemme desselben Geräts (Geräte-Policy),
/// belegte Klemme (schon mit `origin` verbunden oder nicht), freie Klemme.
pub fn feedback_for(schema: &Schema, origin: TerminalId, candidate: TerminalId) -> FeedbackClass {
    if candidate == origin {
        return FeedbackClass::Forbidden;
    }
    if let Some(device) = schema.shared_device(origin, candidate) {
        return if device.accepts_internal_connections() {
            FeedbackClass::Allowed
        } else {
            FeedbackClass::Forbidden
        };
    }
    let busy = schema
        .terminal(candidate)
        .is_some_and(|t| t.conductor_count() > 0);
    if busy {
        if schema.are_linked(origin, candidate) {
            FeedbackClass::Forbidden
        } else {
            FeedbackClass::Caution
        }
    } else {
        FeedbackClass::Allowed
    }
}

/// Werkzeug "Leiter ziehen".
#[derive(Debug, Clone, Default)]
pub struct WireDrawTool {
    state: WireDrawState,
}

impl WireDrawTool {
    /// Erstellt ein Werkzeug im Zustand `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> &WireDrawState {
        &self.state
    }

    /// Läuft gerade ein Zieh-Vorgang?
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, WireDrawState::Dragging(_))
    }

    /// Startklemme des laufenden Zieh-Vorgangs.
    pub fn origin(&self) -> Option<TerminalId> {
        match self.state {
            WireDrawState::Dragging(drag) => Some(drag.origin),
            WireDrawState::Idle => None,
        }
    }

    /// Klemme mit aktueller Hover-Rückmeldung.
    pub fn hovered(&self) -> Option<TerminalId> {
        match self.state {
            WireDrawState::Dragging(drag) => drag.hovered,
            WireDrawState::Idle => None,
        }
    }

    /// Druck an einer Weltposition. Startet den Zieh-Vorgang, wenn dort eine Klemme liegt.
    pub fn press(&mut self, schema: &mut Schema, world_pos: Vec2) -> bool {
        if self.is_dragging() {
            self.cancel(schema);
        }
        let Some(origin) = schema.pick(world_pos).terminal() else {
            return false;
        };
        self.state = WireDrawState::Dragging(DragState {
            origin,
            pointer: world_pos,
            hovered: None,
        });
        log::debug!("Leiter ziehen ab Klemme {}", origin);
        true
    }

    /// Zeigerbewegung: Vorschau nachführen und Hover-Rückmeldung umsetzen.
    pub fn pointer_moved(&mut self, schema: &mut Schema, world_pos: Vec2) {
        let WireDrawState::Dragging(drag) = &mut self.state else {
            return;
        };
        drag.pointer = world_pos;

        let candidate = schema.pick(world_pos).terminal();
        if candidate == drag.hovered {
            return;
        }
        // Vorherigen Kandidaten zuerst neutralisieren
        if let Some(previous) = drag.hovered.take() {
            schema.set_feedback(previous, FeedbackClass::Neutral);
        }
        if let Some(candidate) = candidate {
            let feedback = feedback_for(schema, drag.origin, candidate);
            schema.set_feedback(candidate, feedback);
            drag.hovered = Some(candidate);
        }
    }

    /// Loslassen an einer Weltposition.
    ///
    /// Das Ziel ist die Klemme, die der Schaltplan unter dem Loslass-Punkt
    /// meldet, nicht zwingend die zuletzt gehoverte.
    pub fn release(&mut self, schema: &mut Schema, world_pos: Vec2) -> ReleaseOutcome {
        let WireDrawState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return ReleaseOutcome::NotDragging;
        };
        schema.clear_feedback();

        let Some(target) = schema.pick(world_pos).terminal() else {
            log::debug!("Leiter verworfen: keine Klemme unter dem Zeiger");
            return ReleaseOutcome::Aborted(AbortReason::NoTarget);
        };

        let result = schema
            .check_connection(drag.origin, target)
            .and_then(|()| schema.connect(drag.origin, target));
        match result {
            Ok(id) => ReleaseOutcome::Connected(id),
            Err(err) => {
                log::debug!("Leiter verworfen: {}", err);
                ReleaseOutcome::Aborted(AbortReason::Declined(err))
            }
        }
    }

    /// Bricht den Zieh-Vorgang ab und neutralisiert alle Hover-Rückmeldungen.
    pub fn cancel(&mut self, schema: &mut Schema) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = WireDrawState::Idle;
        schema.clear_feedback();
        log::debug!("Leiter ziehen abgebrochen");
        true
    }

    /// Vorschau-Segment vom Andockpunkt der Startklemme zum Zeiger.
    pub fn preview(&self, schema: &Schema) -> Option<WirePreview> {
        let WireDrawState::Dragging(drag) = self.state else {
            return None;
        };
        Some(WirePreview {
            from: schema.docking_point(drag.origin)?,
            to: drag.pointer,
        })
    }
}
