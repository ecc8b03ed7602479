use gridstar_core::{GridError, Point};

/// Errors surfaced synchronously by configuration and dispatch calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A query was issued through [`global`](crate::global) before
    /// [`initialize`](crate::global::initialize) was called.
    #[error("pathfinder not initialized; call initialize before find_path")]
    NotInitialized,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Why a grid view or settings could not be accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid has a zero dimension ({width}x{height})")]
    EmptyGrid { width: i32, height: i32 },
    #[error("cost factor {factor} for grid value {value} is not strictly positive")]
    InvalidFactor { value: i32, factor: f32 },
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<GridError> for Error {
    fn from(e: GridError) -> Self {
        Self::InvalidConfiguration(e.into())
    }
}

/// A [`Path`](crate::Path) was built from an empty list of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a path must contain at least one cell")]
pub struct EmptyPath;

/// Why a query produced no path.
///
/// The dispatcher collapses every variant into the `None` completion; the
/// synchronous [`Planner`](crate::Planner) reports the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NoPath {
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("endpoint {0} is blocked")]
    BlockedEndpoint(Point),
    #[error("open set exhausted after {rounds} rounds")]
    Exhausted { rounds: usize },
}
