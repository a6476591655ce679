//! Writer für Schaltplan-XML.

use super::parser::{DEVICE_TAG, ROOT_TAG};
use super::records::{CONDUCTOR_TAG, TERMINAL_TAG};
use crate::core::{Schema, Terminal};
use anyhow::Result;

/// Schreibt einen Schaltplan als XML.
///
/// Klemmen werden mit ihrem geräte-lokalen Ankerpunkt und der rohen
/// Orientierung geschrieben, Leiter als Referenzen auf die Klemmen-IDs.
pub fn write_schema(schema: &Schema) -> Result<String> {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    output.push_str(&format!("<{}>\n", ROOT_TAG));

    output.push_str("    <devices>\n");
    for device in schema.devices() {
        output.push_str(&format!(
            "        <{} id=\"{}\" type=\"{}\" x=\"{}\" y=\"{}\" rotation=\"{}\" internal=\"{}\">\n",
            DEVICE_TAG,
            device.id.raw(),
            escape_xml(device.kind.as_str()),
            format_float(device.position().x),
            format_float(device.position().y),
            device.rotation().steps(),
            device.accepts_internal_connections()
        ));
        for terminal in device.terminals().iter().filter_map(|id| schema.terminal(*id)) {
            output.push_str("            ");
            output.push_str(&terminal_element(terminal));
        }
        output.push_str(&format!("        </{}>\n", DEVICE_TAG));
    }
    output.push_str("    </devices>\n");

    let free: Vec<&Terminal> = schema
        .terminals()
        .filter(|t| t.device().is_none())
        .collect();
    if !free.is_empty() {
        output.push_str("    <terminals>\n");
        for terminal in free {
            output.push_str("        ");
            output.push_str(&terminal_element(terminal));
        }
        output.push_str("    </terminals>\n");
    }

    output.push_str("    <conductors>\n");
    for conductor in schema.conductors() {
        let record = conductor.to_record();
        output.push_str(&format!(
            "        <{} terminal1=\"{}\" terminal2=\"{}\"/>\n",
            CONDUCTOR_TAG, record.terminal1, record.terminal2
        ));
    }
    output.push_str("    </conductors>\n");

    output.push_str(&format!("</{}>\n", ROOT_TAG));
    Ok(output)
}

fn terminal_element(terminal: &Terminal) -> String {
    let record = terminal.to_record();
    let id = record
        .id
        .map(|id| format!(" id=\"{}\"", id))
        .unwrap_or_default();
    format!(
        "<{}{} x=\"{}\" y=\"{}\" orientation=\"{}\"/>\n",
        TERMINAL_TAG,
        id,
        format_float(record.x),
        format_float(record.y),
        record.orientation.to_u8()
    )
}

/// Kürzeste Darstellung, die beim Einlesen exakt denselben Wert ergibt.
fn format_float(value: f32) -> String {
    value.to_string()
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceKind, Orientation};
    use crate::xml::parse_schema;
    use glam::Vec2;

    #[test]
    fn test_format_float_roundtrips_exactly() {
        for value in [0.0_f32, 56.0, -12.5, 0.1, 123.456_79, 1.0e-7] {
            let text = format_float(value);
            assert_eq!(text.parse::<f32>().ok(), Some(value), "{text}");
        }
        assert_eq!(format_float(100.0), "100");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b&\"c\""), "a&lt;b&amp;&quot;c&quot;");
    }

    #[test]
    fn test_written_schema_reads_back() {
        let mut schema = Schema::default();
        let left = schema.add_device(DeviceKind::Contactor, Vec2::new(0.0, 0.0));
        let right = schema.add_device(DeviceKind::Input, Vec2::new(80.3, 20.7));
        schema.rotate_device(right);
        let free = schema.add_free_terminal(Vec2::new(40.0, 120.0), Orientation::West);
        let l = schema.device(left).expect("Gerät").terminals().to_vec();
        let r = schema.device(right).expect("Gerät").terminals().to_vec();
        schema.connect(l[1], r[0]).expect("Verbindung erwartet");
        schema.connect(l[0], free).expect("Verbindung erwartet");

        let xml = write_schema(&schema).expect("Schreiben erwartet");
        assert!(xml.contains("<terminals>"));
        assert!(xml.contains("rotation=\"1\""));

        let reloaded = parse_schema(&xml).expect("Parsing erwartet");
        assert_eq!(reloaded.device_count(), 2);
        assert_eq!(reloaded.terminal_count(), 4);
        assert_eq!(reloaded.conductor_count(), 2);

        let original_paths: Vec<Vec<Vec2>> =
            schema.conductors().map(|c| c.path().to_vec()).collect();
        let reloaded_paths: Vec<Vec<Vec2>> =
            reloaded.conductors().map(|c| c.path().to_vec()).collect();
        assert_eq!(original_paths, reloaded_paths);
    }
}
