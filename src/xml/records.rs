//! Strukturelle Validierung einzelner `<terminal>`- und `<conductor>`-Elemente.

use crate::core::{ConductorRecord, Orientation, TerminalRecord};
use indexmap::IndexMap;
use quick_xml::events::BytesStart;
use thiserror::Error;

/// Tag-Name einer Klemme.
pub const TERMINAL_TAG: &str = "terminal";
/// Tag-Name eines Leiters.
pub const CONDUCTOR_TAG: &str = "conductor";

/// Abgelehnter Datensatz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Falscher Tag-Name
    #[error("Tag <{found}> erwartet <{expected}>")]
    WrongTag {
        expected: &'static str,
        found: String,
    },
    /// Pflichtattribut fehlt
    #[error("Attribut '{0}' fehlt")]
    MissingAttribute(&'static str),
    /// Attributwert ist keine gültige Zahl
    #[error("Attribut '{attribute}' ist keine gültige Zahl: '{value}'")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },
    /// Koordinate ist NaN oder unendlich
    #[error("Attribut '{attribute}' ist keine endliche Koordinate: '{value}'")]
    NonFinite {
        attribute: &'static str,
        value: String,
    },
    /// Orientierung außerhalb der vier Himmelsrichtungen
    #[error("Ungültige Orientierung: '{0}'")]
    InvalidOrientation(String),
    /// Attribut nicht lesbar
    #[error("Attribut nicht lesbar: {0}")]
    Malformed(String),
}

/// Liest alle Attribute eines Elements (Schlüssel → unescapter Wert).
pub fn collect_attributes(
    element: &BytesStart<'_>,
) -> Result<IndexMap<String, String>, RecordError> {
    let mut attributes = IndexMap::new();
    for attr in element.attributes().with_checks(false) {
        let attr = attr.map_err(|e| RecordError::Malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| RecordError::Malformed(e.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Tag-Name eines Elements.
pub fn tag_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn check_tag(element: &BytesStart<'_>, expected: &'static str) -> Result<(), RecordError> {
    let found = tag_name(element);
    if found != expected {
        return Err(RecordError::WrongTag { expected, found });
    }
    Ok(())
}

fn required<'a>(
    attributes: &'a IndexMap<String, String>,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    attributes
        .get(name)
        .map(String::as_str)
        .ok_or(RecordError::MissingAttribute(name))
}

/// Parst ein Attribut als Zahl.
pub fn parse_number<T: std::str::FromStr>(
    attribute: &'static str,
    value: &str,
) -> Result<T, RecordError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| RecordError::InvalidNumber {
            attribute,
            value: value.to_string(),
        })
}

/// Parst eine Koordinate; NaN und ±∞ werden abgelehnt.
pub fn parse_coordinate(attribute: &'static str, value: &str) -> Result<f32, RecordError> {
    let parsed: f32 = parse_number(attribute, value)?;
    if !parsed.is_finite() {
        return Err(RecordError::NonFinite {
            attribute,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

/// Akzeptiert eine Klemme nur mit gültigen `x`, `y` und `orientation`.
///
/// `id` ist optional, muss aber eine Ganzzahl sein, wenn vorhanden.
pub fn validate_terminal_record(element: &BytesStart<'_>) -> Result<TerminalRecord, RecordError> {
    check_tag(element, TERMINAL_TAG)?;
    terminal_record_from_attributes(&collect_attributes(element)?)
}

/// Wie [`validate_terminal_record`], auf bereits gelesenen Attributen.
pub fn terminal_record_from_attributes(
    attributes: &IndexMap<String, String>,
) -> Result<TerminalRecord, RecordError> {
    let x = parse_coordinate("x", required(attributes, "x")?)?;
    let y = parse_coordinate("y", required(attributes, "y")?)?;
    let raw_orientation = required(attributes, "orientation")?;
    let orientation = raw_orientation
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Orientation::from_u8)
        .ok_or_else(|| RecordError::InvalidOrientation(raw_orientation.to_string()))?;
    let id = attributes
        .get("id")
        .map(|value| parse_number::<u64>("id", value))
        .transpose()?;

    Ok(TerminalRecord {
        id,
        x,
        y,
        orientation,
    })
}

/// Akzeptiert einen Leiter nur, wenn beide Klemmen-Referenzen Ganzzahlen sind.
pub fn validate_conductor_record(
    element: &BytesStart<'_>,
) -> Result<ConductorRecord, RecordError> {
    check_tag(element, CONDUCTOR_TAG)?;
    let attributes = collect_attributes(element)?;
    Ok(ConductorRecord {
        terminal1: parse_number("terminal1", required(&attributes, "terminal1")?)?,
        terminal2: parse_number("terminal2", required(&attributes, "terminal2")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element<'a>(tag: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        BytesStart::new(tag).with_attributes(attrs.iter().copied())
    }

    #[test]
    fn terminal_record_accepts_all_fields() {
        let e = element(
            "terminal",
            &[("id", "3"), ("x", "0"), ("y", "56.5"), ("orientation", "1")],
        );
        let record = validate_terminal_record(&e).expect("gültiger Datensatz");
        assert_eq!(record.id, Some(3));
        assert_eq!(record.y, 56.5);
        assert_eq!(record.orientation, Orientation::South);
    }

    #[test]
    fn terminal_record_rejects_missing_or_invalid_fields() {
        let missing = element("terminal", &[("x", "0"), ("orientation", "1")]);
        assert_eq!(
            validate_terminal_record(&missing),
            Err(RecordError::MissingAttribute("y"))
        );

        let bad_number = element("terminal", &[("x", "abc"), ("y", "0"), ("orientation", "0")]);
        assert!(matches!(
            validate_terminal_record(&bad_number),
            Err(RecordError::InvalidNumber { attribute: "x", .. })
        ));

        let bad_orientation = element("terminal", &[("x", "0"), ("y", "0"), ("orientation", "4")]);
        assert_eq!(
            validate_terminal_record(&bad_orientation),
            Err(RecordError::InvalidOrientation("4".to_string()))
        );

        let bad_id = element(
            "terminal",
            &[("id", "x1"), ("x", "0"), ("y", "0"), ("orientation", "0")],
        );
        assert!(validate_terminal_record(&bad_id).is_err());
    }

    #[test]
    fn terminal_record_rejects_non_finite_coordinates() {
        for value in ["NaN", "inf", "-inf"] {
            let e = element("terminal", &[("x", value), ("y", "0"), ("orientation", "0")]);
            assert!(matches!(
                validate_terminal_record(&e),
                Err(RecordError::NonFinite { attribute: "x", .. })
            ));
        }
        let e = element("terminal", &[("x", "0"), ("y", "1e40"), ("orientation", "0")]);
        assert!(matches!(
            validate_terminal_record(&e),
            Err(RecordError::NonFinite { attribute: "y", .. })
        ));
    }

    #[test]
    fn terminal_record_rejects_wrong_tag() {
        let e = element("borne", &[("x", "0"), ("y", "0"), ("orientation", "0")]);
        assert!(matches!(
            validate_terminal_record(&e),
            Err(RecordError::WrongTag { .. })
        ));
    }

    #[test]
    fn conductor_record_requires_integer_references() {
        let ok = element("conductor", &[("terminal1", "1"), ("terminal2", "2")]);
        assert_eq!(
            validate_conductor_record(&ok),
            Ok(ConductorRecord {
                terminal1: 1,
                terminal2: 2
            })
        );

        let float = element("conductor", &[("terminal1", "1.5"), ("terminal2", "2")]);
        assert!(validate_conductor_record(&float).is_err());

        let missing = element("conductor", &[("terminal1", "1")]);
        assert_eq!(
            validate_conductor_record(&missing),
            Err(RecordError::MissingAttribute("terminal2"))
        );
    }
}
