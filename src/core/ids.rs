//! Stabile Identifikatoren für Geräte, Klemmen und Leiter im Schaltplan.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            /// Roher numerischer Wert (wird so ins XML geschrieben).
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// ID eines Geräts (Schütz, Eingang, …)
    DeviceId,
    "D"
);
arena_id!(
    /// ID einer Klemme
    TerminalId,
    "T"
);
arena_id!(
    /// ID eines Leiters
    ConductorId,
    "C"
);
