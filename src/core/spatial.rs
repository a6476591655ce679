//! Spatial-Index (KD-Tree) über den Welt-Andockpunkten aller Klemmen.

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::TerminalId;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalMatch {
    /// ID der gefundenen Klemme
    pub terminal_id: TerminalId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über den Andockpunkten.
///
/// Deckungsgleiche Andockpunkte teilen sich einen Baum-Eintrag; die Klemmen
/// eines Eintrags liegen aufsteigend nach ID sortiert vor.
#[derive(Debug, Clone)]
pub struct TerminalIndex {
    tree: KdTree<f64, 2>,
    stacks: Vec<Vec<TerminalId>>,
    terminal_count: usize,
}

impl TerminalIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            stacks: Vec::new(),
            terminal_count: 0,
        }
    }

    /// Baut einen neuen Index aus (Klemme, Welt-Andockpunkt)-Paaren.
    pub fn from_points(points: impl IntoIterator<Item = (TerminalId, Vec2)>) -> Self {
        let mut points: Vec<(TerminalId, Vec2)> = points.into_iter().collect();
        points.sort_unstable_by_key(|(id, _)| *id);
        let terminal_count = points.len();

        // Der KD-Baum verträgt nur begrenzt viele identische Punkte pro Blatt
        let mut stacks: IndexMap<(u32, u32), (Vec2, Vec<TerminalId>)> = IndexMap::new();
        for (id, pos) in points {
            // +0.0 normalisiert -0.0
            let pos = pos + Vec2::ZERO;
            stacks
                .entry((pos.x.to_bits(), pos.y.to_bits()))
                .or_insert_with(|| (pos, Vec::new()))
                .1
                .push(id);
        }

        let entries: Vec<[f64; 2]> = stacks
            .values()
            .map(|(pos, _)| [pos.x as f64, pos.y as f64])
            .collect();
        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            stacks: stacks.into_values().map(|(_, ids)| ids).collect(),
            terminal_count,
        }
    }

    /// Gibt die Anzahl indexierter Klemmen zurück.
    pub fn len(&self) -> usize {
        self.terminal_count
    }

    /// Gibt `true` zurück, wenn keine Klemmen im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.terminal_count == 0
    }

    /// Findet die nächste Klemme zur gegebenen Weltposition.
    ///
    /// Bei übereinanderliegenden Klemmen gewinnt die zuletzt angelegte.
    pub fn nearest(&self, query: Vec2) -> Option<TerminalMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let terminal_id = *self.stacks.get(result.item as usize)?.last()?;

        Some(TerminalMatch {
            terminal_id,
            distance: (result.distance as f32).sqrt(),
        })
    }
}

impl Default for TerminalIndex {
    fn default() -> Self {
        Self::empty()
    }
}
