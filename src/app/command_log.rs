//! Verlauf ausgeführter Commands samt Ergebnis.
//!
//! Abgelehnte Verbindungen sind kein Fehler des Controllers; sie werden hier
//! mit ihrem Grund festgehalten, damit Statusanzeige und Tests sie abfragen
//! können.

use super::AppCommand;
use crate::core::ConnectionError;
use std::collections::VecDeque;

/// Ergebnis eines ausgeführten Commands.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Ausgeführt (auch wenn sich nichts geändert hat)
    Applied,
    /// Verbindung vom Schaltplan abgelehnt
    Declined(ConnectionError),
    /// I/O- oder Parserfehler
    Failed(String),
}

/// Ein Eintrag im Verlauf.
#[derive(Debug, Clone)]
pub struct LoggedCommand {
    /// Ausgeführter Command
    pub command: AppCommand,
    /// Ergebnis der Ausführung
    pub outcome: CommandOutcome,
}

/// Ringpuffer der zuletzt ausgeführten Commands.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<LoggedCommand>,
}

impl CommandLog {
    /// Maximale Anzahl gehaltener Einträge
    pub const CAPACITY: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Command mit Ergebnis an; der älteste Eintrag fällt bei vollem Puffer heraus.
    pub fn record(&mut self, command: AppCommand, outcome: CommandOutcome) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedCommand { command, outcome });
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle Einträge, ältester zuerst.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LoggedCommand> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Jüngster Eintrag.
    pub fn last(&self) -> Option<&LoggedCommand> {
        self.entries.back()
    }

    /// Alle abgelehnten Verbindungsversuche, ältester zuerst.
    pub fn declined(&self) -> impl Iterator<Item = (&AppCommand, &ConnectionError)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            CommandOutcome::Declined(err) => Some((&entry.command, err)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TerminalId;

    #[test]
    fn record_drops_oldest_entry_when_full() {
        let mut log = CommandLog::new();
        log.record(AppCommand::ResetOptions, CommandOutcome::Applied);
        for _ in 1..CommandLog::CAPACITY {
            log.record(AppCommand::CancelWireDrag, CommandOutcome::Applied);
        }
        assert_eq!(log.len(), CommandLog::CAPACITY);
        assert!(matches!(
            log.entries().next().map(|e| &e.command),
            Some(AppCommand::ResetOptions)
        ));

        log.record(AppCommand::CancelWireDrag, CommandOutcome::Applied);
        assert_eq!(log.len(), CommandLog::CAPACITY);
        assert!(log
            .entries()
            .all(|e| matches!(e.command, AppCommand::CancelWireDrag)));
    }

    #[test]
    fn declined_lists_only_rejected_connections() {
        let mut log = CommandLog::new();
        let (a, b) = (TerminalId(1), TerminalId(2));
        log.record(AppCommand::ConnectTerminals { a, b }, CommandOutcome::Applied);
        log.record(
            AppCommand::ConnectTerminals { a, b },
            CommandOutcome::Declined(ConnectionError::Duplicate { a, b }),
        );
        log.record(
            AppCommand::LoadFile {
                path: "x.xml".to_string(),
            },
            CommandOutcome::Failed("Datei nicht lesbar".to_string()),
        );

        let declined: Vec<_> = log.declined().collect();
        assert_eq!(declined.len(), 1);
        assert_eq!(*declined[0].1, ConnectionError::Duplicate { a, b });
        assert!(matches!(
            log.last().map(|e| &e.outcome),
            Some(CommandOutcome::Failed(_))
        ));
    }
}
