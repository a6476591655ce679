//! Core-Domänentypen: Geräte, Klemmen, Leiter, Routing, Spatial-Index.

pub mod conductor;
pub mod deferred;
pub mod device;
pub mod ids;
pub mod orientation;
/// Orthogonales Routing der Leiterpfade
pub mod routing;
/// Schaltplan als Arena mit den Verbindungs-Invarianten
///
/// - Schema: Container für Geräte, Klemmen und Leiter
/// - Terminal: Anschlussstelle mit Liste angedockter Leiter
/// - Conductor: Leiter zwischen genau zwei Klemmen
pub mod schema;
pub mod spatial;
pub mod terminal;

pub use conductor::{Conductor, ConductorRecord};
pub use deferred::{DeferredFree, Removed, RemovedId};
pub use device::{Device, DeviceKind, DeviceTemplate};
pub use ids::{ConductorId, DeviceId, TerminalId};
pub use orientation::{Orientation, Rotation};
pub use routing::{classify, is_orthogonal, route, RouteEnds, RouteShape, VerticalDirection};
pub use schema::{
    ConnectionError, PickTarget, Schema, TERMINAL_PICK_RADIUS, TERMINAL_STUB_LENGTH,
};
pub use spatial::{TerminalIndex, TerminalMatch};
pub use terminal::{AttachError, FeedbackClass, Terminal, TerminalRecord};
