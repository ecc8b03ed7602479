use gridstar_core::{Point, Range};

use crate::error::ConfigError;

/// Read-only view of the environment a search runs on.
///
/// The view must not change while a query is in flight. Between queries the
/// cell values may change, but [`dimensions`](Self::dimensions) must not.
/// The planner only ever asks about in-bounds cells.
pub trait GridView {
    /// Grid width and height.
    fn dimensions(&self) -> (i32, i32);

    /// Raw value of the cell at `p`.
    fn value_at(&self, p: Point) -> i32;

    /// Whether the cell at `p` is impassable.
    fn blocked(&self, p: Point) -> bool;

    /// Travel-cost factor applied when entering a cell holding `value`.
    /// Must be strictly positive; unmapped values use `1.0`.
    fn factor_for(&self, value: i32) -> f32;

    /// Whether a diagonal step may squeeze past a blocked flanking cell.
    fn corner_cutting(&self) -> bool {
        true
    }

    /// The grid rectangle `[0, W) × [0, H)`.
    fn bounds(&self) -> Range {
        let (w, h) = self.dimensions();
        Range::with_size(w, h)
    }
}

impl<G: GridView + ?Sized> GridView for &G {
    fn dimensions(&self) -> (i32, i32) {
        (**self).dimensions()
    }

    fn value_at(&self, p: Point) -> i32 {
        (**self).value_at(p)
    }

    fn blocked(&self, p: Point) -> bool {
        (**self).blocked(p)
    }

    fn factor_for(&self, value: i32) -> f32 {
        (**self).factor_for(value)
    }

    fn corner_cutting(&self) -> bool {
        (**self).corner_cutting()
    }
}

/// Whether `factor` is usable as a travel-cost multiplier.
#[inline]
pub(crate) fn valid_factor(factor: f32) -> bool {
    factor.is_finite() && factor > 0.0
}

/// Check a view before it is handed to the dispatcher: both dimensions must
/// be positive and every passable cell must map to a positive factor.
pub fn validate<G: GridView + ?Sized>(view: &G) -> Result<(), ConfigError> {
    let (width, height) = view.dimensions();
    if width <= 0 || height <= 0 {
        return Err(ConfigError::EmptyGrid { width, height });
    }
    for p in view.bounds() {
        if view.blocked(p) {
            continue;
        }
        let value = view.value_at(p);
        let factor = view.factor_for(value);
        if !valid_factor(factor) {
            return Err(ConfigError::InvalidFactor { value, factor });
        }
    }
    Ok(())
}
