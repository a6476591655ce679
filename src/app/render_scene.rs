//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::{ConductorShape, RenderScene, TerminalMarker};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let schema = &state.schema;

    let conductors = schema
        .conductors()
        .filter(|c| !c.is_destroyed())
        .map(|c| ConductorShape {
            id: c.id,
            path: c.path().to_vec(),
        })
        .collect();

    let terminals = schema
        .terminals()
        .map(|t| {
            let device = schema.device_of(t.id);
            TerminalMarker {
                id: t.id,
                docking_point: t.docking_point(device),
                element_anchor: t.element_anchor(device),
                feedback: t.feedback(),
                color: state.options.feedback_color(t.feedback()),
            }
        })
        .collect();

    RenderScene {
        conductors,
        terminals,
        device_bounds: schema.devices().map(|d| d.bounds()).collect(),
        preview: state.wire_draw.preview(schema),
        conductor_color: state.options.conductor_color,
    }
}
