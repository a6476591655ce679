//! Handler für Laufzeit-Optionen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::shared::EditorOptions;

/// Übernimmt neue Optionen und speichert sie.
pub fn apply(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    use_cases::options::apply_options(state, options)
}

/// Setzt die Optionen auf Standardwerte zurück und speichert sie.
pub fn reset(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::options::apply_options(state, EditorOptions::default())
}
