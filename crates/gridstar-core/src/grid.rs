//! The [`Grid`] type: a 2D grid of raw `i32` values with shared storage.
//!
//! A `Grid` is a *handle* onto a backing buffer. Cloning a `Grid` yields
//! another handle to the **same** storage, so an application can keep editing
//! its map while a pathfinder holds a clone. The buffer sits behind an
//! [`RwLock`], which makes handles `Send + Sync` and lets concurrent searches
//! read the same cells.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<i32>,
    width: usize,
}

impl GridBuffer {
    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y as usize) * self.width + (p.x as usize)
    }
}

/// Errors that can occur when building a grid from rows or text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Row `row` has `found` cells where `expected` were required.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character with no meaning in the legend was found.
    #[error("invalid map character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D grid of `i32` cell values backed by shared storage.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Arc<RwLock<GridBuffer>>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with `0`.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self::from_buffer(vec![0; (w as usize) * (h as usize)], w, h)
    }

    /// Build a grid from rows of values (`rows[y][x]`).
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self::from_buffer(cells, width as i32, rows.len() as i32))
    }

    /// Parse a text map, one line per row, translating each character with
    /// `legend`. Leading and trailing blank lines are ignored.
    pub fn parse(text: &str, legend: impl Fn(char) -> Option<i32>) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<i32>> = Vec::new();
        for (y, line) in text.trim_matches('\n').lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let v = legend(ch).ok_or(GridError::InvalidChar {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                row.push(v);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    fn from_buffer(cells: Vec<i32>, width: i32, height: i32) -> Self {
        let buffer = GridBuffer {
            cells,
            width: width as usize,
        };
        Self {
            buffer: Arc::new(RwLock::new(buffer)),
            bounds: Range::with_size(width, height),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, GridBuffer> {
        self.buffer.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GridBuffer> {
        self.buffer.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of this grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of this grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Get the value at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<i32> {
        if !self.bounds.contains(p) {
            return None;
        }
        let buf = self.read();
        Some(buf.cells[buf.index(p)])
    }

    /// Set the value at a point. Does nothing if out of bounds.
    pub fn set(&self, p: Point, value: i32) {
        if !self.bounds.contains(p) {
            return;
        }
        let mut buf = self.write();
        let idx = buf.index(p);
        buf.cells[idx] = value;
    }

    /// Fill the grid using a function that takes each point.
    pub fn fill_fn(&self, mut f: impl FnMut(Point) -> i32) {
        let mut buf = self.write();
        for p in self.bounds.iter() {
            let idx = buf.index(p);
            buf.cells[idx] = f(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(4, 3);
        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.at(Point::new(0, 0)), Some(0));
        assert_eq!(g.at(Point::new(4, 0)), None);
    }

    #[test]
    fn grid_set_and_get() {
        let g = Grid::new(4, 3);
        g.set(Point::new(2, 1), 7);
        assert_eq!(g.at(Point::new(2, 1)), Some(7));
        // out of bounds is ignored
        g.set(Point::new(10, 10), 7);
        let sevens = g.bounds().iter().filter(|&p| g.at(p) == Some(7)).count();
        assert_eq!(sevens, 1);
    }

    #[test]
    fn clones_share_buffer() {
        let g = Grid::new(3, 3);
        let view = g.clone();
        g.set(Point::new(1, 1), -2);
        assert_eq!(view.at(Point::new(1, 1)), Some(-2));
        assert_eq!(Grid::new(3, 3).at(Point::new(1, 1)), Some(0));
    }

    #[test]
    fn from_rows_is_row_major() {
        let g = Grid::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.at(Point::new(2, 0)), Some(3));
        assert_eq!(g.at(Point::new(0, 1)), Some(4));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![0, 0, 0], vec![0, 0]];
        assert_eq!(
            Grid::from_rows(&rows).unwrap_err(),
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_with_legend() {
        let g = Grid::parse(
            "\n.#.\n~..\n",
            |ch| match ch {
                '.' => Some(0),
                '#' => Some(1),
                '~' => Some(2),
                _ => None,
            },
        )
        .unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.at(Point::new(1, 0)), Some(1));
        assert_eq!(g.at(Point::new(0, 1)), Some(2));

        let err = Grid::parse("..x", |ch| (ch == '.').then_some(0)).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidChar {
                ch: 'x',
                pos: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn fill_fn_visits_every_cell() {
        let g = Grid::new(3, 2);
        let mut visited = 0;
        g.fill_fn(|p| {
            visited += 1;
            p.x + 10 * p.y
        });
        assert_eq!(visited, 6);
        assert_eq!(g.at(Point::new(1, 1)), Some(11));
        assert_eq!(g.at(Point::new(2, 0)), Some(2));
    }

    #[test]
    fn grid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grid>();
    }
}
