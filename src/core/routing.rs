//! Orthogonales Routing zwischen zwei Andockpunkten.
//!
//! Der Pfad läuft immer von links nach rechts und besteht nur aus
//! horizontalen und vertikalen Segmenten. Welche der vier Pfadformen gewählt
//! wird, hängt von der vertikalen Richtung und den Klemmen-Orientierungen ab.

use super::Orientation;
use glam::Vec2;

/// Pfadform eines gerouteten Leiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteShape {
    /// L-Form über die Achse der Zielklemme
    Corner,
    /// L-Form über die Achse der Startklemme
    StartAxisCorner,
    /// Z-Form mit Zwischensegment auf halber Strecke (Start-Achse)
    Jog,
    /// Z-Form mit vertauschten Achsen
    SwappedJog,
}

/// Vertikale Laufrichtung vom Start- zum Endpunkt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    /// `start.y < end.y`
    Descending,
    /// `start.y >= end.y`
    Ascending,
}

/// Start und Ende nach der Links-nach-rechts-Normalisierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEnds {
    /// Linker Punkt
    pub start: Vec2,
    /// Orientierung am linken Punkt
    pub start_orientation: Orientation,
    /// Rechter Punkt
    pub end: Vec2,
    /// Orientierung am rechten Punkt
    pub end_orientation: Orientation,
}

impl RouteEnds {
    /// Ordnet zwei Punkte nach x. Bei gleichem x wird `b` zum Start.
    pub fn normalize(a: Vec2, orient_a: Orientation, b: Vec2, orient_b: Orientation) -> Self {
        if a.x < b.x {
            Self {
                start: a,
                start_orientation: orient_a,
                end: b,
                end_orientation: orient_b,
            }
        } else {
            Self {
                start: b,
                start_orientation: orient_b,
                end: a,
                end_orientation: orient_a,
            }
        }
    }

    /// Vertikale Richtung; gleiches y zählt als `Ascending`.
    pub fn vertical(&self) -> VerticalDirection {
        if self.start.y < self.end.y {
            VerticalDirection::Descending
        } else {
            VerticalDirection::Ascending
        }
    }
}

/// Wählt die Pfadform anhand der Wahrheitstabelle.
pub fn classify(
    vertical: VerticalDirection,
    start: Orientation,
    end: Orientation,
) -> RouteShape {
    use Orientation::{East, North, South, West};

    match vertical {
        VerticalDirection::Descending => match (start, end) {
            (North, South | West) | (East, West) => RouteShape::Jog,
            (South, North | East) | (West, East) => RouteShape::SwappedJog,
            (North | East, North | East) => RouteShape::StartAxisCorner,
            _ => RouteShape::Corner,
        },
        VerticalDirection::Ascending => match (start, end) {
            (West, East | South) | (North, South) => RouteShape::Jog,
            (East, West | North) | (South, North) => RouteShape::SwappedJog,
            (West | North, West | North) => RouteShape::StartAxisCorner,
            _ => RouteShape::Corner,
        },
    }
}

/// Berechnet den orthogonalen Pfad zwischen zwei Punkten im gemeinsamen
/// Koordinatensystem.
///
/// Reine Funktion: gleiche Eingaben liefern denselben Polygonzug. Der erste
/// Punkt ist exakt der linke, der letzte exakt der rechte Eingabepunkt.
/// Segmente der Länge 0 bleiben erhalten.
pub fn route(a: Vec2, orient_a: Orientation, b: Vec2, orient_b: Orientation) -> Vec<Vec2> {
    let ends = RouteEnds::normalize(a, orient_a, b, orient_b);
    let vertical = ends.vertical();
    // Deckungsgleiche Punkte: immer Form 1
    let shape = if ends.start == ends.end {
        RouteShape::Corner
    } else {
        classify(vertical, ends.start_orientation, ends.end_orientation)
    };
    let (s, e) = (ends.start, ends.end);
    let mid_x = (s.x + e.x) / 2.0;
    let mid_y = (s.y + e.y) / 2.0;

    let x_jog = [Vec2::new(mid_x, s.y), Vec2::new(mid_x, e.y)];
    let y_jog = [Vec2::new(s.x, mid_y), Vec2::new(e.x, mid_y)];

    let mut path = Vec::with_capacity(4);
    path.push(s);
    match (vertical, shape) {
        (VerticalDirection::Descending, RouteShape::Jog)
        | (VerticalDirection::Ascending, RouteShape::SwappedJog) => path.extend(x_jog),
        (VerticalDirection::Descending, RouteShape::SwappedJog)
        | (VerticalDirection::Ascending, RouteShape::Jog) => path.extend(y_jog),
        (VerticalDirection::Descending, RouteShape::StartAxisCorner)
        | (VerticalDirection::Ascending, RouteShape::Corner) => path.push(Vec2::new(e.x, s.y)),
        (VerticalDirection::Descending, RouteShape::Corner)
        | (VerticalDirection::Ascending, RouteShape::StartAxisCorner) => {
            path.push(Vec2::new(s.x, e.y))
        }
    }
    path.push(e);
    path
}

/// Prüft ob alle Segmente eines Pfads achsenparallel sind.
pub fn is_orthogonal(path: &[Vec2]) -> bool {
    path.windows(2)
        .all(|seg| seg[0].x == seg[1].x || seg[0].y == seg[1].y)
}
