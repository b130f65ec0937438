use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{PlanError, PlanResult};

/// A fixed-size 2D grid, x-major.
///
/// Cell `(x, y)` lives at `data[x * height + y]`; `x` runs over `width`,
/// `y` over `height`. Every grid in a planning cycle uses this layout, so a
/// flat index means the same cell in the elevation grid, the flatness mask
/// and the priority map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    pub data: Vec<T>,
}

/// Unchecked wire form of [`Grid`]; deserialisation goes through
/// [`Grid::from_vec`] so the buffer length is always validated.
#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = PlanError;

    fn try_from(raw: RawGrid<T>) -> PlanResult<Self> {
        Grid::from_vec(raw.width, raw.height, raw.data)
    }
}

/// Slope magnitude (rise over run) per cell.
pub type SlopeGrid = Grid<f64>;
/// `true` where the cell is flat enough to excavate.
pub type FlatnessMask = Grid<bool>;
/// Signed excavation priority per cell.
pub type PriorityMap = Grid<f64>;

impl<T: Clone> Grid<T> {
    /// Create a `width × height` grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { width, height, data: vec![fill; width * height] }
    }
}

impl<T> Grid<T> {
    /// Wrap an x-major buffer. Fails if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> PlanResult<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(PlanError::DataLength { expected, found: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Inverse of [`Grid::index_of`].
    #[inline]
    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        (index / self.height, index % self.height)
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Map a real-valued location to the cell containing it.
    ///
    /// Coordinates are truncated toward zero, so `(-0.5, 2.9)` lands on
    /// `(0, 2)`. Non-finite coordinates and anything outside
    /// `[0, width) × [0, height)` after truncation yield `None`.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (xi, yi) = (x.trunc(), y.trunc());
        if xi < 0.0 || yi < 0.0 || xi >= self.width as f64 || yi >= self.height as f64 {
            return None;
        }
        Some((xi as usize, yi as usize))
    }

    /// Fail with [`PlanError::ShapeMismatch`] unless this grid is `expected`,
    /// or with [`PlanError::DataLength`] if its buffer does not fill that shape.
    pub fn ensure_shape(&self, what: &'static str, expected: (usize, usize)) -> PlanResult<()> {
        if self.shape() != expected {
            return Err(PlanError::ShapeMismatch { what, expected, found: self.shape() });
        }
        let cells = self.width * self.height;
        if self.data.len() != cells {
            return Err(PlanError::DataLength { expected: cells, found: self.data.len() });
        }
        Ok(())
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[x * self.height + y]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: T) {
        self.data[x * self.height + y] = val;
    }
}

impl Grid<bool> {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

/// Terrain elevation in metres over a regular grid.
/// Cell math uses `f64`; elevation values are stored as `f32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationGrid {
    pub elevations: Grid<f32>,
    /// Metres per cell along both axes.
    pub resolution: f64,
}

impl ElevationGrid {
    pub fn from_elevations(elevations: Grid<f32>, resolution: f64) -> Self {
        Self { elevations, resolution }
    }

    /// Zero-elevation grid sized from `config.area_size / config.resolution`.
    pub fn flat(config: &PlannerConfig) -> Self {
        let (width, height) = config.grid_dimensions();
        Self::from_elevations(Grid::new(width, height, 0.0), config.resolution)
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.elevations.shape()
    }

    /// Reject a grid whose buffer does not fill its shape or whose
    /// resolution is not a positive finite number of metres.
    pub fn validate(&self) -> PlanResult<()> {
        self.elevations.ensure_shape("elevation grid", self.shape())?;
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "elevation grid resolution must be a positive number of metres, got {}",
                self.resolution
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.elevations.get(x, y)
    }

    /// Physical position in metres of cell `(x, y)`'s origin corner.
    pub fn to_physical(&self, x: usize, y: usize) -> (f64, f64) {
        (x as f64 * self.resolution, y as f64 * self.resolution)
    }

    pub fn min_elevation(&self) -> f32 {
        self.elevations.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_elevation(&self) -> f32 {
        self.elevations.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }
}
