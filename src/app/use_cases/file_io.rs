//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use anyhow::Context;

/// Lädt einen Schaltplan und ersetzt den aktuellen.
pub fn load_schema_file(state: &mut AppState, path: String) -> anyhow::Result<()> {
    let xml_content = std::fs::read_to_string(&path)
        .with_context(|| format!("Datei nicht lesbar: {}", path))?;
    let schema = crate::xml::parse_schema_into(&xml_content, state.options.new_schema())
        .with_context(|| format!("Schaltplan fehlerhaft: {}", path))?;

    log::info!(
        "Schaltplan geladen: {} Geräte, {} Leiter",
        schema.device_count(),
        schema.conductor_count()
    );

    state.wire_draw.cancel(&mut state.schema);
    state.schema = schema;
    state.current_file_path = Some(path);
    state.last_error = None;
    Ok(())
}

/// Speichert den Schaltplan unter `path` oder dem aktuell bekannten Pfad.
pub fn save_schema_file(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    let path = path
        .or_else(|| state.current_file_path.clone())
        .ok_or_else(|| anyhow::anyhow!("Kein Speicherpfad bekannt"))?;

    let xml_content = crate::xml::write_schema(&state.schema)?;
    std::fs::write(&path, xml_content)
        .with_context(|| format!("Datei nicht schreibbar: {}", path))?;

    log::info!("Schaltplan gespeichert: {}", path);
    state.current_file_path = Some(path);
    Ok(())
}
