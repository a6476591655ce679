//! Use-Cases der Application-Layer-Orchestrierung.

pub mod connections;
pub mod devices;
pub mod file_io;
pub mod options;
pub mod wire_draw;
