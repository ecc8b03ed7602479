use std::collections::BinaryHeap;

use bitvec::bitvec;
use bitvec::vec::BitVec;
use gridstar_core::{Point, Range};

use crate::cost::CostModel;
use crate::path::Path;
use crate::traits::{self, GridView};

// ---------------------------------------------------------------------------
// Node records
// ---------------------------------------------------------------------------

/// Search record for one passable cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub pos: Point,
    /// Estimated cost to the destination; zero at the destination itself.
    pub h: i64,
    /// Travel-cost factor of this cell, cached when the record is created.
    pub factor: f32,
    /// Best known `g + h`; `0` until the node is first reached.
    pub f: i64,
    pub parent: Option<Point>,
    pub in_open: bool,
}

impl Node {
    /// Accumulated cost from the start, derived as `f - h`.
    #[inline]
    pub fn g(&self) -> i64 {
        self.f - self.h
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Untouched,
    Blocked,
    Node(Node),
}

/// Entry in the open queue. Ordered so that `BinaryHeap` pops the smallest
/// `f` first and, among equal `f`, the earliest insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    idx: usize,
    f: i64,
    seq: u64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Mutable storage owned by a single query: node records, the closed bitmap
/// and the open queue.
///
/// Node records are allocated lazily on first touch. A re-queued node leaves
/// its previous queue entry in place; [`open_pop`](Self::open_pop) discards
/// entries whose cell is closed or whose `f` is no longer current.
pub struct SearchState<'a, G: GridView + ?Sized> {
    view: &'a G,
    cost: CostModel,
    bounds: Range,
    dest: Point,
    nodes: Vec<Slot>,
    closed: BitVec,
    open: BinaryHeap<OpenRef>,
    seq: u64,
}

impl<'a, G: GridView + ?Sized> SearchState<'a, G> {
    /// Fresh state for a search towards `dest` over `bounds`.
    pub fn new(view: &'a G, cost: CostModel, bounds: Range, dest: Point) -> Self {
        let len = bounds.len();
        Self {
            view,
            cost,
            bounds,
            dest,
            nodes: vec![Slot::Untouched; len],
            closed: bitvec![0; len],
            open: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Record for `p`, created on first access. `None` when `p` is out of
    /// bounds, blocked, or maps to an unusable cost factor.
    pub fn node(&mut self, p: Point) -> Option<&mut Node> {
        let idx = self.bounds.index_of(p)?;
        if let Slot::Untouched = self.nodes[idx] {
            self.nodes[idx] = match self.make_node(p) {
                Some(n) => Slot::Node(n),
                None => Slot::Blocked,
            };
        }
        match &mut self.nodes[idx] {
            Slot::Node(n) => Some(n),
            _ => None,
        }
    }

    fn make_node(&self, p: Point) -> Option<Node> {
        if self.view.blocked(p) {
            return None;
        }
        let factor = self.view.factor_for(self.view.value_at(p));
        if !traits::valid_factor(factor) {
            log::warn!("cell {} has cost factor {}; treating it as blocked", p, factor);
            return None;
        }
        let h = if p == self.dest {
            0
        } else {
            self.cost.heuristic(p, self.dest)
        };
        Some(Node {
            pos: p,
            h,
            factor,
            f: 0,
            parent: None,
            in_open: false,
        })
    }

    /// Record for `p` if it has already been created.
    pub fn get(&self, p: Point) -> Option<&Node> {
        match self.bounds.index_of(p).map(|i| &self.nodes[i]) {
            Some(Slot::Node(n)) => Some(n),
            _ => None,
        }
    }

    pub fn mark_closed(&mut self, p: Point) {
        if let Some(idx) = self.bounds.index_of(p) {
            self.closed.set(idx, true);
        }
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|idx| self.closed[idx])
    }

    pub fn in_open(&self, p: Point) -> bool {
        self.get(p).is_some_and(|n| n.in_open)
    }

    /// Queue `p` under its current `f`. Does nothing for cells without a
    /// record.
    pub fn open_push(&mut self, p: Point) {
        let Some(idx) = self.bounds.index_of(p) else {
            return;
        };
        let Slot::Node(n) = &mut self.nodes[idx] else {
            return;
        };
        n.in_open = true;
        let entry = OpenRef {
            idx,
            f: n.f,
            seq: self.seq,
        };
        self.seq += 1;
        self.open.push(entry);
    }

    /// Remove and return the open node with the smallest `f`.
    pub fn open_pop(&mut self) -> Option<Point> {
        while let Some(entry) = self.open.pop() {
            if self.closed[entry.idx] {
                continue;
            }
            let Slot::Node(n) = &mut self.nodes[entry.idx] else {
                continue;
            };
            if !n.in_open || n.f != entry.f {
                // Stale entry superseded by a cheaper one.
                continue;
            }
            n.in_open = false;
            return Some(n.pos);
        }
        None
    }

    /// Number of entries in the open queue, stale ones included.
    #[cfg(test)]
    fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Walk parent links back from `end` and return the cells in
    /// start → `end` order.
    pub fn reconstruct(&self, end: Point) -> Path {
        let mut cells = Vec::new();
        let mut cur = Some(end);
        while let Some(p) = cur {
            cells.push(p);
            cur = self.get(p).and_then(|n| n.parent);
        }
        cells.reverse();
        Path::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 grid; value 1 is blocked, value 2 costs double, value 3 maps to
    /// a negative factor.
    struct Board(Vec<i32>);

    impl Board {
        fn open() -> Self {
            Self(vec![0; 25])
        }

        fn with(mut self, p: Point, v: i32) -> Self {
            self.0[(p.y * 5 + p.x) as usize] = v;
            self
        }
    }

    impl GridView for Board {
        fn dimensions(&self) -> (i32, i32) {
            (5, 5)
        }
        fn value_at(&self, p: Point) -> i32 {
            self.0[(p.y * 5 + p.x) as usize]
        }
        fn blocked(&self, p: Point) -> bool {
            self.value_at(p) == 1
        }
        fn factor_for(&self, value: i32) -> f32 {
            match value {
                2 => 2.0,
                3 => -1.0,
                _ => 1.0,
            }
        }
    }

    fn state(board: &Board) -> SearchState<'_, Board> {
        SearchState::new(board, CostModel::default(), board.bounds(), Point::new(4, 4))
    }

    #[test]
    fn node_records_are_lazy_and_cache_h_and_factor() {
        let board = Board::open().with(Point::new(1, 1), 2);
        let mut st = state(&board);
        assert!(st.get(Point::new(1, 1)).is_none());
        let n = *st.node(Point::new(1, 1)).unwrap();
        assert_eq!(n.h, 60);
        assert_eq!(n.factor, 2.0);
        assert_eq!(n.f, 0);
        assert_eq!(n.parent, None);
        assert!(!n.in_open);
        assert!(st.get(Point::new(1, 1)).is_some());
    }

    #[test]
    fn destination_heuristic_is_zero() {
        let board = Board::open();
        let mut st = state(&board);
        assert_eq!(st.node(Point::new(4, 4)).unwrap().h, 0);
    }

    #[test]
    fn blocked_and_out_of_bounds_cells_have_no_record() {
        let board = Board::open().with(Point::new(2, 2), 1);
        let mut st = state(&board);
        assert!(st.node(Point::new(2, 2)).is_none());
        assert!(st.node(Point::new(5, 0)).is_none());
        assert!(st.node(Point::new(0, -1)).is_none());
        st.open_push(Point::new(2, 2));
        assert_eq!(st.open_pop(), None);
    }

    #[test]
    fn unusable_factor_is_treated_as_blocked() {
        let board = Board::open().with(Point::new(3, 1), 3);
        let mut st = state(&board);
        assert!(st.node(Point::new(3, 1)).is_none());
        assert!(st.get(Point::new(3, 1)).is_none());
        assert!(st.node(Point::new(3, 2)).is_some());
    }

    #[test]
    fn pops_minimum_f_with_insertion_order_ties() {
        let board = Board::open();
        let mut st = state(&board);
        for (x, f) in [(0, 50), (1, 30), (2, 30), (3, 40)] {
            let p = Point::new(x, 0);
            st.node(p).unwrap().f = f;
            st.open_push(p);
            assert!(st.in_open(p));
        }
        let order: Vec<_> = std::iter::from_fn(|| st.open_pop()).collect();
        assert_eq!(
            order,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(0, 0)
            ]
        );
        assert!(!st.in_open(Point::new(0, 0)));
    }

    #[test]
    fn improved_node_pops_once_and_stale_entry_is_skipped() {
        let board = Board::open();
        let mut st = state(&board);
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        st.node(a).unwrap().f = 50;
        st.open_push(a);
        st.node(b).unwrap().f = 40;
        st.open_push(b);
        // Relax `a` in place and queue it again.
        st.node(a).unwrap().f = 30;
        st.open_push(a);
        assert_eq!(st.open_len(), 3);

        assert_eq!(st.open_pop(), Some(a));
        st.mark_closed(a);
        assert_eq!(st.open_pop(), Some(b));
        assert_eq!(st.open_pop(), None);
    }

    #[test]
    fn closed_bitmap() {
        let board = Board::open();
        let mut st = state(&board);
        let p = Point::new(3, 2);
        assert!(!st.is_closed(p));
        st.mark_closed(p);
        assert!(st.is_closed(p));
        assert!(!st.is_closed(Point::new(2, 3)));
        assert!(!st.is_closed(Point::new(9, 9)));
    }

    #[test]
    fn reconstruct_follows_parents() {
        let board = Board::open();
        let mut st = state(&board);
        st.node(Point::new(0, 0)).unwrap();
        st.node(Point::new(1, 1)).unwrap().parent = Some(Point::new(0, 0));
        st.node(Point::new(2, 1)).unwrap().parent = Some(Point::new(1, 1));
        let path = st.reconstruct(Point::new(2, 1));
        assert_eq!(
            path.cells(),
            &[Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)]
        );
    }
}
