use gridstar_core::{Point, Range};

/// One of the eight king-move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    NorthWest,
    SouthWest,
    North,
    South,
    East,
    NorthEast,
    SouthEast,
}

impl Direction {
    /// Expansion order used by the planner.
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::NorthEast,
        Direction::SouthEast,
    ];

    /// Offset of one step in this direction. North is `-y`.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, -1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::East => Point::new(1, 0),
            Direction::NorthEast => Point::new(1, -1),
            Direction::SouthEast => Point::new(1, 1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let d = self.delta();
        d.x != 0 && d.y != 0
    }

    /// Direction of the single king move from `from` to `to`, if any.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let d = to - from;
        Self::ALL.into_iter().find(|dir| dir.delta() == d)
    }

    /// The two axial cells flanking a diagonal step from `p`.
    /// For axial directions both entries are the destination cell.
    #[inline]
    pub fn flanks(self, p: Point) -> [Point; 2] {
        let d = self.delta();
        if self.is_diagonal() {
            [p.shift(d.x, 0), p.shift(0, d.y)]
        } else {
            [p + d, p + d]
        }
    }
}

/// Reusable buffer for neighbor enumeration.
///
/// A neighbor is yielded when it lies inside the given bounds. For diagonals
/// that is the same as both flanking axial coordinates being in bounds, so
/// every edge (including column 0 and row 0) expands symmetrically.
pub struct Neighbors {
    buf: Vec<(Direction, Point)>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// In-bounds king-move neighbors of `p`, in [`Direction::ALL`] order.
    pub fn king(&mut self, p: Point, bounds: Range) -> &[(Direction, Point)] {
        self.buf.clear();
        for dir in Direction::ALL {
            let n = p + dir.delta();
            if bounds.contains(n) {
                self.buf.push((dir, n));
            }
        }
        &self.buf
    }
}
