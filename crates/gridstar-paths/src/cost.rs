use gridstar_core::Point;

use crate::neighbors::Direction;
use crate::traits::GridView;

/// Base cost of a north/south/east/west step.
pub const AXIAL_COST: i64 = 10;

/// Base cost of a diagonal step (≈ √2 × [`AXIAL_COST`]).
pub const DIAGONAL_COST: i64 = 14;

/// Distance estimate used to rank open nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Manhattan distance × axial cost.
    ///
    /// This overestimates routes that use diagonal steps, so the search is
    /// fast but not guaranteed to return the cheapest path.
    #[default]
    Manhattan,
    /// Octile distance: diagonal steps where possible, axial for the rest.
    ///
    /// Never overestimates when every factor is at least `1.0`; under that
    /// condition returned paths are of minimum cost.
    Octile,
}

/// Step costs and the heuristic for one search.
///
/// All costs are `i64`. A step into a cell costs the direction's base cost
/// times the cell's factor, truncated toward zero and saturating at
/// `i64::MAX`; sums saturate as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub axial: i64,
    pub diagonal: i64,
    pub heuristic: Heuristic,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            axial: AXIAL_COST,
            diagonal: DIAGONAL_COST,
            heuristic: Heuristic::Manhattan,
        }
    }
}

impl CostModel {
    /// The default costs with an octile heuristic.
    pub fn octile() -> Self {
        Self {
            heuristic: Heuristic::Octile,
            ..Self::default()
        }
    }

    /// Base cost of one step in `dir`.
    #[inline]
    pub fn base(&self, dir: Direction) -> i64 {
        if dir.is_diagonal() {
            self.diagonal
        } else {
            self.axial
        }
    }

    /// Cost of stepping in `dir` into a cell with the given factor.
    #[inline]
    pub fn step_cost(&self, dir: Direction, factor: f32) -> i64 {
        (self.base(dir) as f32 * factor) as i64
    }

    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn heuristic(&self, from: Point, to: Point) -> i64 {
        match self.heuristic {
            Heuristic::Manhattan => i64::from(from.manhattan(to)) * self.axial,
            Heuristic::Octile => {
                let dx = i64::from(from.x.abs_diff(to.x));
                let dy = i64::from(from.y.abs_diff(to.y));
                self.axial * (dx + dy) + (self.diagonal - 2 * self.axial) * dx.min(dy)
            }
        }
    }

    /// Total cost of walking `path` on `view`, priced exactly as the planner
    /// prices steps. Returns `None` if two consecutive cells are not a king
    /// move apart.
    pub fn path_cost<G: GridView + ?Sized>(&self, view: &G, path: &[Point]) -> Option<i64> {
        path.windows(2).try_fold(0i64, |acc, w| {
            let dir = Direction::between(w[0], w[1])?;
            let factor = view.factor_for(view.value_at(w[1]));
            Some(acc.saturating_add(self.step_cost(dir, factor)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(f32);

    impl GridView for Flat {
        fn dimensions(&self) -> (i32, i32) {
            (10, 10)
        }
        fn value_at(&self, _p: Point) -> i32 {
            0
        }
        fn blocked(&self, _p: Point) -> bool {
            false
        }
        fn factor_for(&self, _value: i32) -> f32 {
            self.0
        }
    }

    #[test]
    fn step_costs_truncate_toward_zero() {
        let cost = CostModel::default();
        assert_eq!(cost.step_cost(Direction::East, 1.0), 10);
        assert_eq!(cost.step_cost(Direction::NorthEast, 1.0), 14);
        assert_eq!(cost.step_cost(Direction::NorthEast, 2.0), 28);
        assert_eq!(cost.step_cost(Direction::North, 1.55), 15);
        assert_eq!(cost.step_cost(Direction::SouthWest, 0.5), 7);
        assert_eq!(cost.step_cost(Direction::SouthWest, 1.5), 21);
    }

    #[test]
    fn huge_factors_saturate() {
        let cost = CostModel::default();
        assert_eq!(cost.step_cost(Direction::East, 1.0e8), 1_000_000_000);
        assert_eq!(cost.step_cost(Direction::East, f32::MAX), i64::MAX);
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(cost.path_cost(&Flat(f32::MAX), &path), Some(i64::MAX));
    }

    #[test]
    fn manhattan_heuristic() {
        let cost = CostModel::default();
        assert_eq!(cost.heuristic(Point::new(0, 0), Point::new(4, 4)), 80);
        assert_eq!(cost.heuristic(Point::new(4, 1), Point::new(0, 1)), 40);
        assert_eq!(cost.heuristic(Point::new(2, 2), Point::new(2, 2)), 0);
    }

    #[test]
    fn octile_heuristic() {
        let cost = CostModel::octile();
        assert_eq!(cost.heuristic(Point::new(0, 0), Point::new(4, 4)), 56);
        assert_eq!(cost.heuristic(Point::new(0, 0), Point::new(4, 1)), 44);
        assert_eq!(cost.heuristic(Point::new(3, 0), Point::new(0, 0)), 30);
    }

    #[test]
    fn path_cost_prices_each_entered_cell() {
        let cost = CostModel::default();
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        assert_eq!(cost.path_cost(&Flat(1.0), &path), Some(24));
        assert_eq!(cost.path_cost(&Flat(2.0), &path), Some(48));
        assert_eq!(cost.path_cost(&Flat(1.0), &path[..1]), Some(0));
        let broken = [Point::new(0, 0), Point::new(2, 0)];
        assert_eq!(cost.path_cost(&Flat(1.0), &broken), None);
    }
}
