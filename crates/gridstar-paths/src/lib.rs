//! Weighted A* pathfinding over integer grids.
//!
//! An embedding application describes its world through a [`GridView`]:
//! a rectangular grid of `i32` values, a predicate telling which cells are
//! impassable, and a mapping from value to travel-cost factor. [`Settings`]
//! is the ready-made implementation built on a shared
//! [`gridstar_core::Grid`].
//!
//! - [`Planner`] runs one search synchronously and reports why it failed.
//! - [`Dispatcher`] runs each query on a worker thread and completes it
//!   exactly once through a callback, with `Some(path)` or `None`.
//! - [`global`] keeps one dispatcher for the whole process.
//!
//! # Costs
//!
//! | step | base cost |
//! |---|---|
//! | axial (N/S/E/W) | [`AXIAL_COST`] = 10 |
//! | diagonal | [`DIAGONAL_COST`] = 14 |
//!
//! Entering a cell costs its base cost times the cell's factor, truncated
//! to an integer. Diagonal steps are allowed past blocked corners unless the
//! view's [`corner_cutting`](GridView::corner_cutting) says otherwise.
//!
//! ```
//! use gridstar_core::{Grid, Point};
//! use gridstar_paths::{Dispatcher, Settings};
//!
//! let grid = Grid::from_rows(&[[0, 0, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
//! let settings = Settings::builder(grid).blocked_values([1]).build().unwrap();
//! let pathfinder = Dispatcher::new(settings).unwrap();
//!
//! let path = pathfinder
//!     .find_path_blocking(Point::new(0, 0), Point::new(0, 2))
//!     .unwrap();
//! assert_eq!(path.start(), Point::new(0, 0));
//! assert_eq!(path.end(), Point::new(0, 2));
//! ```

mod astar;
mod cost;
mod dispatch;
mod error;
pub mod global;
mod neighbors;
mod path;
mod settings;
mod state;
mod traits;

pub use astar::Planner;
pub use cost::{AXIAL_COST, CostModel, DIAGONAL_COST, Heuristic};
pub use dispatch::Dispatcher;
pub use error::{ConfigError, EmptyPath, Error, NoPath};
pub use neighbors::{Direction, Neighbors};
pub use path::Path;
#[cfg(feature = "serde")]
pub use settings::SettingsFile;
pub use settings::{BlockedFn, FactorRules, Settings, SettingsBuilder};
pub use state::{Node, SearchState};
pub use traits::{GridView, validate};
