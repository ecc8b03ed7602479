//! Pathfinding demo on a small world map.
//!
//! Run: cargo run --bin gridstar-demo [settings.json] [sx sy dx dy]
//!
//! Without a settings file the built-in map is used:
//!
//! | glyph | value | meaning |
//! |---|---|---|
//! | `.` | 0 | open ground |
//! | `T` | 1 | town, impassable |
//! | `~` | 2 | swamp, double cost |
//! | `A` | 3 | aliens, triple cost |
//! | `#` | 4.. | boulder, impassable |

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, bail};
use gridstar_core::{Grid, Point};
use gridstar_paths::{Dispatcher, GridView, Path, Settings, SettingsFile};
use log::{info, warn};

const TOWN: i32 = 1;
const SWAMP: i32 = 2;
const ALIENS: i32 = 3;
const BOULDER: i32 = 4;

const MAP: &str = "
..........~~~~~.........
..TTT.....~~~~~....#....
..TTT......~~~.....#....
...........AAA..........
.....#.....AAA.....TTT..
.....#.............TTT..
.....#....~~~~..........
..........~~~~....AAA...
";

fn legend(ch: char) -> Option<i32> {
    match ch {
        '.' => Some(0),
        'T' => Some(TOWN),
        '~' => Some(SWAMP),
        'A' => Some(ALIENS),
        '#' => Some(BOULDER),
        _ => None,
    }
}

fn glyph(value: i32) -> char {
    match value {
        0 => '.',
        TOWN => 'T',
        SWAMP => '~',
        ALIENS => 'A',
        v if v >= BOULDER => '#',
        _ => '?',
    }
}

fn builtin_settings() -> anyhow::Result<Settings> {
    let grid = Grid::parse(MAP, legend)?;
    // Each boulder may carry its own value, so anything from BOULDER up blocks.
    let settings = Settings::builder(grid)
        .blocked(|_, v| v == TOWN || v >= BOULDER)
        .factor(SWAMP, 2.0)
        .factor(ALIENS, 3.0)
        .build()?;
    Ok(settings)
}

fn load_settings(path: &PathBuf) -> anyhow::Result<Settings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file: SettingsFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(file.into_settings()?)
}

fn render(settings: &Settings, path: Option<&Path>) -> String {
    let bounds = settings.bounds();
    let mut out = String::with_capacity(bounds.len() + bounds.height() as usize);
    for y in 0..bounds.height() {
        for x in 0..bounds.width() {
            let p = Point::new(x, y);
            let on_path = path.is_some_and(|path| path.cells().contains(&p));
            out.push(if on_path { '*' } else { glyph(settings.value_at(p)) });
        }
        out.push('\n');
    }
    out
}

fn parse_query(args: &[String]) -> anyhow::Result<(Point, Point)> {
    let n: Vec<i32> = args
        .iter()
        .map(|a| a.parse().with_context(|| format!("bad coordinate {a:?}")))
        .collect::<anyhow::Result<_>>()?;
    match n.as_slice() {
        &[sx, sy, dx, dy] => Ok((Point::new(sx, sy), Point::new(dx, dy))),
        _ => bail!("expected four coordinates: sx sy dx dy"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.first() {
        Some(first) if first.ends_with(".json") => {
            let path = PathBuf::from(args.remove(0));
            info!("loading settings from {}", path.display());
            load_settings(&path)?
        }
        _ => builtin_settings()?,
    };
    let (w, h) = settings.dimensions();

    let queries = if args.is_empty() {
        vec![
            (Point::new(0, 0), Point::new(w - 1, h - 1)),
            (Point::new(0, h - 1), Point::new(w - 1, 0)),
            (Point::new(3, 1), Point::new(0, 0)),
        ]
    } else {
        vec![parse_query(&args)?]
    };

    let pathfinder = Dispatcher::new(settings)?;
    let (tx, rx) = mpsc::channel();
    for (i, &(start, dest)) in queries.iter().enumerate() {
        let tx = tx.clone();
        pathfinder.find_path(start, dest, move |path| {
            let _ = tx.send((i, path));
        });
    }
    drop(tx);

    let mut results: Vec<_> = rx.iter().collect();
    results.sort_by_key(|&(i, _)| i);
    for (i, path) in results {
        let (start, dest) = queries[i];
        match &path {
            Some(path) => {
                let cost = pathfinder
                    .cost_model()
                    .path_cost(pathfinder.view(), path.cells())
                    .unwrap_or_default();
                info!("{start} -> {dest}: {} cells, cost {cost}", path.len());
            }
            None => warn!("{start} -> {dest}: no path possible"),
        }
        println!("{}", render(pathfinder.view(), path.as_ref()));
    }
    Ok(())
}
