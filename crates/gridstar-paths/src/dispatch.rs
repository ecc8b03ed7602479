//! Asynchronous query dispatch.
//!
//! Every query runs on its own worker thread and completes exactly once,
//! with `Some(path)` or with `None` when no path exists.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use gridstar_core::Point;

use crate::astar::Planner;
use crate::cost::CostModel;
use crate::error::Error;
use crate::path::Path;
use crate::traits::{self, GridView};

struct Shared<G> {
    view: G,
    cost: CostModel,
}

/// Handle for running queries against one validated [`GridView`].
///
/// Cloning is cheap; clones share the same view.
pub struct Dispatcher<G> {
    shared: Arc<Shared<G>>,
}

impl<G> Clone for Dispatcher<G> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<G: GridView + Send + Sync + 'static> Dispatcher<G> {
    /// Validate `view` and wrap it with the default cost model.
    pub fn new(view: G) -> Result<Self, Error> {
        Self::with_cost_model(view, CostModel::default())
    }

    /// Validate `view` and wrap it with `cost`.
    pub fn with_cost_model(view: G, cost: CostModel) -> Result<Self, Error> {
        traits::validate(&view)?;
        let (w, h) = view.dimensions();
        log::debug!("pathfinder initialized: {}x{} grid, {:?}", w, h, cost.heuristic);
        Ok(Self {
            shared: Arc::new(Shared { view, cost }),
        })
    }

    pub fn view(&self) -> &G {
        &self.shared.view
    }

    pub fn cost_model(&self) -> CostModel {
        self.shared.cost
    }

    /// Start a query and return immediately.
    ///
    /// `on_done` is invoked exactly once, on the worker thread, with the path
    /// or with `None` if the endpoints are out of bounds, blocked, or not
    /// connected.
    pub fn find_path<F>(&self, start: Point, dest: Point, on_done: F)
    where
        F: FnOnce(Option<Path>) + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        log::trace!("dispatching query {} -> {}", start, dest);
        thread::spawn(move || {
            let result = Planner::new(&shared.view, shared.cost).search(start, dest);
            match result {
                Ok(path) => on_done(Some(path)),
                Err(reason) => {
                    log::debug!("query {} -> {} failed: {}", start, dest, reason);
                    on_done(None)
                }
            }
        });
    }

    /// Start a query whose single completion is delivered on a channel.
    pub fn find_path_channel(&self, start: Point, dest: Point) -> Receiver<Option<Path>> {
        let (tx, rx) = mpsc::sync_channel(1);
        self.find_path(start, dest, move |result| {
            // The receiver may have been dropped; nobody is waiting then.
            let _ = tx.send(result);
        });
        rx
    }

    /// Run a query on a worker and wait for its completion.
    pub fn find_path_blocking(&self, start: Point, dest: Point) -> Option<Path> {
        self.find_path_channel(start, dest).recv().ok().flatten()
    }
}
