//! The process-wide pathfinder. Kept to a single test so ordering between
//! initialization and queries is deterministic.

use std::sync::mpsc;
use std::time::Duration;

use gridstar_core::{Grid, Point};
use gridstar_paths::{Error, Settings, global};

fn settings(walls: &[(i32, i32)]) -> Settings {
    let grid = Grid::new(4, 4);
    for &(x, y) in walls {
        grid.set(Point::new(x, y), 1);
    }
    Settings::builder(grid).blocked_values([1]).build().unwrap()
}

#[test]
fn global_lifecycle() {
    assert!(!global::is_initialized());
    let (tx, rx) = mpsc::channel::<()>();
    let err = global::find_path(Point::new(0, 0), Point::new(3, 3), move |_| {
        tx.send(()).unwrap();
    })
    .unwrap_err();
    assert!(matches!(err, Error::NotInitialized));
    // The callback was dropped without running.
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert!(matches!(global::dispatcher(), Err(Error::NotInitialized)));

    global::initialize(settings(&[])).unwrap();
    assert!(global::is_initialized());
    let (tx, rx) = mpsc::channel();
    global::find_path(Point::new(0, 0), Point::new(3, 0), move |path| {
        tx.send(path).unwrap();
    })
    .unwrap();
    let path = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
    assert_eq!(path.len(), 4);

    // Re-initializing replaces the settings; the new wall cuts the query off.
    global::initialize(settings(&[(3, 0)])).unwrap();
    let d = global::dispatcher().unwrap();
    assert!(d.find_path_blocking(Point::new(0, 0), Point::new(3, 0)).is_none());
}
