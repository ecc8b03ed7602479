//! The standard [`GridView`]: a shared [`Grid`] plus caller-supplied rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use gridstar_core::{Grid, Point};

use crate::error::ConfigError;
use crate::traits::{GridView, valid_factor};

/// Predicate deciding whether a cell is impassable, given its position and
/// current value.
pub type BlockedFn = dyn Fn(Point, i32) -> bool + Send + Sync;

// ---------------------------------------------------------------------------
// FactorRules
// ---------------------------------------------------------------------------

/// Mapping from grid value to travel-cost factor. Unmapped values cost `1.0`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FactorRules {
    rules: BTreeMap<i32, f32>,
}

impl FactorRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the factor for `value`, replacing any previous rule.
    pub fn insert(&mut self, value: i32, factor: f32) -> &mut Self {
        self.rules.insert(value, factor);
        self
    }

    /// Factor for `value`, `1.0` if unmapped.
    #[inline]
    pub fn get(&self, value: i32) -> f32 {
        self.rules.get(&value).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        self.rules.iter().map(|(&v, &f)| (v, f))
    }

    /// Reject the first rule whose factor is not strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.iter().find(|&(_, f)| !valid_factor(f)) {
            Some((value, factor)) => Err(ConfigError::InvalidFactor { value, factor }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(i32, f32)> for FactorRules {
    fn from_iter<I: IntoIterator<Item = (i32, f32)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Grid data and rules for the pathfinder.
///
/// The grid handle shares storage with the caller, who may keep editing cell
/// values between queries. Dimensions are sampled once by [`build`](SettingsBuilder::build).
#[derive(Clone)]
pub struct Settings {
    grid: Grid,
    dimensions: (i32, i32),
    blocked: Arc<BlockedFn>,
    factors: FactorRules,
    corner_cutting: bool,
}

impl Settings {
    /// Start configuring settings for `grid`.
    pub fn builder(grid: Grid) -> SettingsBuilder {
        SettingsBuilder {
            grid,
            blocked: None,
            blocked_values: Vec::new(),
            factors: FactorRules::new(),
            corner_cutting: true,
        }
    }

    /// The shared grid handle.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn factors(&self) -> &FactorRules {
        &self.factors
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("dimensions", &self.dimensions)
            .field("factors", &self.factors)
            .field("corner_cutting", &self.corner_cutting)
            .finish_non_exhaustive()
    }
}

impl GridView for Settings {
    fn dimensions(&self) -> (i32, i32) {
        self.dimensions
    }

    fn value_at(&self, p: Point) -> i32 {
        self.grid.at(p).unwrap_or_default()
    }

    fn blocked(&self, p: Point) -> bool {
        (self.blocked)(p, self.value_at(p))
    }

    fn factor_for(&self, value: i32) -> f32 {
        self.factors.get(value)
    }

    fn corner_cutting(&self) -> bool {
        self.corner_cutting
    }
}

/// Builder for [`Settings`].
pub struct SettingsBuilder {
    grid: Grid,
    blocked: Option<Arc<BlockedFn>>,
    blocked_values: Vec<i32>,
    factors: FactorRules,
    corner_cutting: bool,
}

impl SettingsBuilder {
    /// Cells for which `predicate(position, value)` holds are impassable.
    pub fn blocked(mut self, predicate: impl Fn(Point, i32) -> bool + Send + Sync + 'static) -> Self {
        self.blocked = Some(Arc::new(predicate));
        self
    }

    /// Cells holding any of `values` are impassable, in addition to whatever
    /// the [`blocked`](Self::blocked) predicate reports.
    pub fn blocked_values(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.blocked_values.extend(values);
        self
    }

    /// Entering a cell holding `value` costs `factor` times the base cost.
    pub fn factor(mut self, value: i32, factor: f32) -> Self {
        self.factors.insert(value, factor);
        self
    }

    /// Replace the whole factor mapping.
    pub fn factors(mut self, factors: FactorRules) -> Self {
        self.factors = factors;
        self
    }

    /// Allow (default) or forbid diagonal steps past a blocked flanking cell.
    pub fn corner_cutting(mut self, allow: bool) -> Self {
        self.corner_cutting = allow;
        self
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        let (width, height) = (self.grid.width(), self.grid.height());
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        self.factors.validate()?;

        let values = self.blocked_values;
        let blocked: Arc<BlockedFn> = match (self.blocked, values.is_empty()) {
            (None, true) => Arc::new(|_: Point, _: i32| false),
            (None, false) => Arc::new(move |_: Point, v: i32| values.contains(&v)),
            (Some(pred), true) => pred,
            (Some(pred), false) => {
                Arc::new(move |p: Point, v: i32| values.contains(&v) || pred(p, v))
            }
        };

        log::debug!(
            "pathfinding grid {}x{} ({} cells), {} cost rules",
            width,
            height,
            width as i64 * height as i64,
            self.factors.len()
        );

        Ok(Settings {
            grid: self.grid,
            dimensions: (width, height),
            blocked,
            factors: self.factors,
            corner_cutting: self.corner_cutting,
        })
    }
}

// ---------------------------------------------------------------------------
// SettingsFile
// ---------------------------------------------------------------------------

/// Declarative settings document: grid rows, blocked values and cost rules.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SettingsFile {
    /// Grid values, `rows[y][x]`.
    pub rows: Vec<Vec<i32>>,
    /// Values that mark a cell as impassable.
    #[serde(default)]
    pub blocked: Vec<i32>,
    /// Travel-cost factor per value.
    #[serde(default)]
    pub factors: FactorRules,
    #[serde(default = "default_corner_cutting")]
    pub corner_cutting: bool,
}

#[cfg(feature = "serde")]
fn default_corner_cutting() -> bool {
    true
}

#[cfg(feature = "serde")]
impl SettingsFile {
    /// Build settings over a freshly allocated grid.
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let grid = Grid::from_rows(&self.rows)?;
        Settings::builder(grid)
            .blocked_values(self.blocked)
            .factors(self.factors)
            .corner_cutting(self.corner_cutting)
            .build()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SettingsFile> for Settings {
    type Error = ConfigError;

    fn try_from(file: SettingsFile) -> Result<Self, Self::Error> {
        file.into_settings()
    }
}
