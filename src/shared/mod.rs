//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und dem Host (Binary, Tests) geteilt
//! werden, um direkte Abhängigkeiten auf den AppState zu vermeiden.

pub mod options;
mod render_scene;

pub use options::EditorOptions;
pub use render_scene::{ConductorShape, RenderScene, TerminalMarker, WirePreview};
