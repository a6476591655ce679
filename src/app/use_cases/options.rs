//! Use-Case: Optionen übernehmen und persistieren.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Übernimmt Optionen und speichert sie neben der Binary.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    apply_options_at(state, options, &EditorOptions::config_path())
}

/// Übernimmt Optionen und speichert sie unter `path`.
///
/// Der Pick-Radius gilt sofort; die Stummellänge nur für neu angelegte Klemmen.
pub fn apply_options_at(
    state: &mut AppState,
    options: EditorOptions,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    state.schema.set_pick_radius(options.terminal_pick_radius);
    state.options = options;
    state.options.save_to_file(path)
}
