//! Process-wide pathfinder.
//!
//! For applications that prefer a single shared pathfinder over passing a
//! [`Dispatcher`] handle around. The last call to [`initialize`] wins; queries
//! already running keep the settings they started with.

use std::sync::{PoisonError, RwLock};

use gridstar_core::Point;

use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::path::Path;
use crate::settings::Settings;

static DISPATCHER: RwLock<Option<Dispatcher<Settings>>> = RwLock::new(None);

/// Install `settings` as the process-wide pathfinder.
pub fn initialize(settings: Settings) -> Result<(), Error> {
    let dispatcher = Dispatcher::new(settings)?;
    *DISPATCHER.write().unwrap_or_else(PoisonError::into_inner) = Some(dispatcher);
    Ok(())
}

/// Whether [`initialize`] has been called.
pub fn is_initialized() -> bool {
    DISPATCHER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Handle on the current process-wide dispatcher.
pub fn dispatcher() -> Result<Dispatcher<Settings>, Error> {
    DISPATCHER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(Error::NotInitialized)
}

/// Start a query on the process-wide pathfinder.
///
/// Fails with [`Error::NotInitialized`] before [`initialize`]; `on_done` is
/// not called in that case.
pub fn find_path<F>(start: Point, dest: Point, on_done: F) -> Result<(), Error>
where
    F: FnOnce(Option<Path>) + Send + 'static,
{
    dispatcher()?.find_path(start, dest, on_done);
    Ok(())
}
