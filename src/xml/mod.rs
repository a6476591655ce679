//! XML Import/Export für Schaltpläne.
//!
//! `<schema>` enthält `<devices>` mit ihren `<terminal>`-Elementen, optional
//! freie `<terminals>` und die `<conductors>` als Referenzen auf Klemmen-IDs.

pub mod parser;
pub mod records;
pub mod writer;

pub use parser::{parse_schema, parse_schema_into};
pub use records::{validate_conductor_record, validate_terminal_record, RecordError};
pub use writer::write_schema;
