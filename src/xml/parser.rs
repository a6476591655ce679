//! Parser für Schaltplan-XML.
//!
//! Geräte werden aus ihrer Vorlage neu aufgebaut. Jede serialisierte Klemme
//! wird zuerst gegen die bereits vorhandenen Klemmen des Geräts abgeglichen
//! (`matches_record`), erst danach wird eine neue Klemme angelegt. Leiter
//! entstehen ausschließlich über `Schema::connect`.

use super::records::{
    collect_attributes, parse_coordinate, parse_number, tag_name, terminal_record_from_attributes,
    validate_conductor_record, CONDUCTOR_TAG, TERMINAL_TAG,
};
use crate::core::{
    ConductorRecord, DeviceId, DeviceKind, Rotation, Schema, TerminalId, TerminalRecord,
};
use anyhow::{bail, Context, Result};
use glam::Vec2;
use indexmap::{IndexMap, IndexSet};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Wurzel-Tag eines Schaltplans.
pub const ROOT_TAG: &str = "schema";
/// Tag eines Geräts.
pub const DEVICE_TAG: &str = "device";

/// Parst einen Schaltplan in einen leeren `Schema`-Prototyp.
///
/// `schema` liefert Stummellänge, Pick-Radius und Geräte-Default; er sollte leer sein.
pub fn parse_schema_into(xml_content: &str, schema: Schema) -> Result<Schema> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut builder = SchemaBuilder::new(schema);
    let mut buffer = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag = tag_name(e);
                if tag == ROOT_TAG {
                    seen_root = true;
                } else if tag == DEVICE_TAG {
                    builder.begin_device(e)?;
                } else {
                    builder.element(&tag, e);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag = tag_name(e);
                if tag == DEVICE_TAG {
                    builder.begin_device(e)?;
                    builder.end_device();
                } else if tag == ROOT_TAG {
                    seen_root = true;
                } else {
                    builder.element(&tag, e);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                if name.as_ref() == DEVICE_TAG.as_bytes() {
                    builder.end_device();
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }
        buffer.clear();
    }

    if !seen_root {
        bail!("Kein <{}>-Wurzelelement gefunden", ROOT_TAG);
    }

    Ok(builder.finish())
}

/// Parst einen Schaltplan mit Standard-Parametern.
pub fn parse_schema(xml_content: &str) -> Result<Schema> {
    parse_schema_into(xml_content, Schema::default())
}

/// Sammelt Geräte, Klemmen und Leiter während des Lesens.
struct SchemaBuilder {
    schema: Schema,
    current_device: Option<DeviceId>,
    /// Bereits einem Datensatz zugeordnete Klemmen des aktuellen Geräts
    claimed: IndexSet<TerminalId>,
    /// XML-ID → Klemme
    terminal_ids: IndexMap<u64, TerminalId>,
    conductors: Vec<ConductorRecord>,
}

impl SchemaBuilder {
    fn new(schema: Schema) -> Self {
        Self {
            schema,
            current_device: None,
            claimed: IndexSet::new(),
            terminal_ids: IndexMap::new(),
            conductors: Vec::new(),
        }
    }

    fn begin_device(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let attributes = collect_attributes(e).context("Gerät nicht lesbar")?;
        let kind_name = attributes.get("type").map(String::as_str).unwrap_or("generic");
        let kind = DeviceKind::from_name(kind_name).unwrap_or_else(|| {
            log::warn!("Unbekannter Gerätetyp '{}', verwende generic", kind_name);
            DeviceKind::Generic
        });

        let coordinate = |name: &'static str| -> Result<f32> {
            match attributes.get(name) {
                Some(value) => Ok(parse_coordinate(name, value)?),
                None => Ok(0.0),
            }
        };
        let position = Vec2::new(coordinate("x")?, coordinate("y")?);

        let id = self.schema.add_device(kind, position);
        if let Some(steps) = attributes.get("rotation") {
            let steps: u8 = parse_number("rotation", steps)?;
            self.schema.set_device_rotation(id, Rotation::from_steps(steps));
        }
        if let Some(internal) = attributes.get("internal") {
            self.schema
                .set_internal_connections(id, internal.trim() == "true");
        }

        self.current_device = Some(id);
        self.claimed.clear();
        Ok(())
    }

    fn end_device(&mut self) {
        self.current_device = None;
        self.claimed.clear();
    }

    fn element(&mut self, tag: &str, e: &BytesStart<'_>) {
        if tag == TERMINAL_TAG {
            let record = collect_attributes(e).and_then(|a| terminal_record_from_attributes(&a));
            match record {
                Ok(record) => self.terminal(&record),
                Err(err) => log::warn!("Klemme übersprungen: {}", err),
            }
        } else if tag == CONDUCTOR_TAG {
            match validate_conductor_record(e) {
                Ok(record) => self.conductors.push(record),
                Err(err) => log::warn!("Leiter übersprungen: {}", err),
            }
        }
    }

    fn terminal(&mut self, record: &TerminalRecord) {
        let terminal = match self.current_device {
            Some(device) => self
                .matching_device_terminal(device, record)
                .or_else(|| self.schema.add_terminal_from_record(Some(device), record)),
            None => self.schema.add_terminal_from_record(None, record),
        };

        let Some(terminal) = terminal else {
            return;
        };
        self.claimed.insert(terminal);
        if let Some(xml_id) = record.id {
            if self.terminal_ids.insert(xml_id, terminal).is_some() {
                log::warn!("Klemmen-ID {} mehrfach vergeben", xml_id);
            }
        }
    }

    fn matching_device_terminal(
        &self,
        device: DeviceId,
        record: &TerminalRecord,
    ) -> Option<TerminalId> {
        let device = self.schema.device(device)?;
        device.terminals().iter().copied().find(|id| {
            !self.claimed.contains(id)
                && self
                    .schema
                    .terminal(*id)
                    .is_some_and(|t| t.matches_record(record))
        })
    }

    fn finish(mut self) -> Schema {
        for record in std::mem::take(&mut self.conductors) {
            let ends = (
                self.terminal_ids.get(&record.terminal1),
                self.terminal_ids.get(&record.terminal2),
            );
            let (Some(&a), Some(&b)) = ends else {
                log::warn!(
                    "Leiter {}↔{} übersprungen: Klemme unbekannt",
                    record.terminal1,
                    record.terminal2
                );
                continue;
            };
            if let Err(err) = self.schema.connect(a, b) {
                log::warn!("Leiter {}↔{} übersprungen: {}", record.terminal1, record.terminal2, err);
            }
        }

        log::info!(
            "Schaltplan gelesen: {} Geräte, {} Klemmen, {} Leiter",
            self.schema.device_count(),
            self.schema.terminal_count(),
            self.schema.conductor_count()
        );
        self.schema
    }
}
