//! Interaktive Werkzeuge des Schaltplan-Editors.
//!
//! Werkzeuge halten nur ihren eigenen Zustand; Mutationen am Schaltplan
//! laufen über die Verbindungs-Operationen von [`crate::core::Schema`].

/// Leiter ziehen: Klemme drücken, ziehen, auf Zielklemme loslassen.
pub mod wire_draw;

pub use wire_draw::{
    feedback_for, AbortReason, DragState, ReleaseOutcome, WireDrawState, WireDrawTool,
};
