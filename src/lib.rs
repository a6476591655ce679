//! Schaltplan-Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod xml;

pub use app::{AppCommand, AppController, AppIntent, AppState, WireDrawState, WireDrawTool};
pub use core::{
    route, Conductor, ConductorId, ConnectionError, Device, DeviceId, DeviceKind, FeedbackClass,
    Orientation, PickTarget, Rotation, Schema, Terminal, TerminalId,
};
pub use shared::{EditorOptions, RenderScene};
pub use xml::{parse_schema, write_schema};
