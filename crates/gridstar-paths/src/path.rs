use gridstar_core::Point;

use crate::error::EmptyPath;

/// A found route: cells from the start to the destination, both included.
///
/// Consecutive cells are one king move apart. A path always holds at least
/// one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// First cell of the path.
    pub fn start(&self) -> Point {
        self.cells[0]
    }

    /// Last cell of the path.
    pub fn end(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.cells.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = EmptyPath;

    fn try_from(cells: Vec<Point>) -> Result<Self, Self::Error> {
        if cells.is_empty() {
            return Err(EmptyPath);
        }
        Ok(Self { cells })
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.cells
    }
}
