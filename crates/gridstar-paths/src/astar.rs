use std::time::Instant;

use gridstar_core::{Point, Range};

use crate::cost::CostModel;
use crate::error::NoPath;
use crate::neighbors::{Direction, Neighbors};
use crate::path::Path;
use crate::state::SearchState;
use crate::traits::GridView;

/// A* driver over a [`GridView`].
///
/// Grid dimensions are sampled once, when the planner is created.
pub struct Planner<'a, G: GridView + ?Sized> {
    view: &'a G,
    cost: CostModel,
    bounds: Range,
}

impl<'a, G: GridView + ?Sized> Planner<'a, G> {
    pub fn new(view: &'a G, cost: CostModel) -> Self {
        Self {
            view,
            cost,
            bounds: view.bounds(),
        }
    }

    /// Find a path from `start` to `dest`.
    ///
    /// On success the path begins at `start` and ends at `dest`. Endpoints
    /// outside the grid or on a blocked cell fail without searching.
    pub fn search(&self, start: Point, dest: Point) -> Result<Path, NoPath> {
        for p in [start, dest] {
            if !self.bounds.contains(p) {
                return Err(NoPath::OutOfBounds(p));
            }
        }
        for p in [start, dest] {
            if self.view.blocked(p) {
                return Err(NoPath::BlockedEndpoint(p));
            }
        }

        let began = Instant::now();
        let mut state = SearchState::new(self.view, self.cost, self.bounds, dest);

        // The start is seeded with g = 0.
        if let Some(n) = state.node(start) {
            n.f = n.h;
        }
        state.open_push(start);

        let corner_cutting = self.view.corner_cutting();
        let mut nbuf = Neighbors::new();
        let mut rounds = 0;

        let found = 'search: loop {
            let Some(cur) = state.open_pop() else {
                break 'search false;
            };
            rounds += 1;

            if cur == dest {
                break 'search true;
            }

            state.mark_closed(cur);
            let Some(cur_g) = state.get(cur).map(|n| n.g()) else {
                continue;
            };

            for &(dir, np) in nbuf.king(cur, self.bounds) {
                if state.is_closed(np) {
                    continue;
                }
                if !corner_cutting && dir.is_diagonal() && self.cuts_corner(cur, dir) {
                    continue;
                }
                let Some(n) = state.node(np) else {
                    // Blocked.
                    continue;
                };
                let tentative = cur_g
                    .saturating_add(self.cost.step_cost(dir, n.factor))
                    .saturating_add(n.h);
                if n.in_open && tentative >= n.f {
                    continue;
                }
                n.f = tentative;
                n.parent = Some(cur);
                state.open_push(np);
            }
        };

        if !found {
            log::debug!(
                "no path {} -> {} after {} rounds ({:?})",
                start,
                dest,
                rounds,
                began.elapsed()
            );
            return Err(NoPath::Exhausted { rounds });
        }

        let path = state.reconstruct(dest);
        log::debug!(
            "path {} -> {}: {} cells, {} rounds ({:?})",
            start,
            dest,
            path.len(),
            rounds,
            began.elapsed()
        );
        Ok(path)
    }

    /// Whether a diagonal step from `p` squeezes past a blocked axial cell.
    fn cuts_corner(&self, p: Point, dir: Direction) -> bool {
        dir.flanks(p).into_iter().any(|f| self.view.blocked(f))
    }
}
