//! Synthetic terrain: gentle sine hills plus seeded fBm roughness, blurred.
//!
//!   z(X, Y) = 0.5 · sin(0.5 X) · cos(0.5 Y) + 0.1 · fbm(x, y)
//!
//! with `X`, `Y` the cell position in metres spread evenly over the area,
//! followed by a separable Gaussian blur (σ = 2 cells, reflected borders).
use noise::{NoiseFn, Perlin};

use crate::config::PlannerConfig;
use crate::grid::{ElevationGrid, Grid};

const HILL_AMPLITUDE: f64 = 0.5;
const HILL_FREQUENCY: f64 = 0.5;
const ROUGHNESS_AMPLITUDE: f64 = 0.1;
const SMOOTHING_SIGMA: f64 = 2.0;

/// Small fractional Brownian motion sampler over Perlin noise.
struct Fbm {
    octaves: u32,
    gain: f64,
    noise: Perlin,
}

impl Fbm {
    fn new(seed: u32, octaves: u32) -> Self {
        Self { octaves, gain: 0.5, noise: Perlin::new(seed) }
    }

    fn sample(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0f64;
        let mut amp = 1.0f64;
        let mut freq = 1.0f64;
        for _ in 0..self.octaves {
            value += amp * self.noise.get([x * freq, y * freq]);
            amp *= self.gain;
            freq *= 2.0;
        }
        value
    }
}

/// Evenly spaced positions covering `[0, extent]` in `n` samples.
fn linspace(extent: f64, n: usize, i: usize) -> f64 {
    if n < 2 {
        0.0
    } else {
        extent * i as f64 / (n - 1) as f64
    }
}

/// Map an out-of-range index back into `[0, n)` by mirroring at the borders.
fn reflect(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period);
    if m < n as isize { m as usize } else { (period - 1 - m) as usize }
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma).ceil() as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|k| (-(k * k) as f64 / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Separable Gaussian blur, first along x then along y.
fn gaussian_blur(grid: &Grid<f64>, sigma: f64) -> Grid<f64> {
    let (width, height) = grid.shape();
    if grid.is_empty() || sigma <= 0.0 {
        return grid.clone();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    let mut pass: Grid<f64> = Grid::new(width, height, 0.0);
    for x in 0..width {
        for y in 0..height {
            let v = kernel.iter().enumerate().map(|(k, w)| {
                w * grid.get(reflect(x as isize + k as isize - radius, width), y)
            });
            pass.set(x, y, v.sum::<f64>());
        }
    }

    let mut out: Grid<f64> = Grid::new(width, height, 0.0);
    for x in 0..width {
        for y in 0..height {
            let v = kernel.iter().enumerate().map(|(k, w)| {
                w * pass.get(x, reflect(y as isize + k as isize - radius, height))
            });
            out.set(x, y, v.sum::<f64>());
        }
    }
    out
}

/// Generate a reproducible elevation grid sized from `config`.
pub fn simulate_terrain(config: &PlannerConfig, seed: u64) -> ElevationGrid {
    let (width, height) = config.grid_dimensions();
    let (area_w, area_h) = config.area_size;

    let fbm = Fbm::new((seed & 0xFFFF_FFFF) as u32, 4);
    // A few noise features per metre keeps the roughness finer than the hills.
    let noise_freq = 3.0 * config.resolution;

    let mut raw = Grid::new(width, height, 0.0f64);
    for x in 0..width {
        let px = linspace(area_w, width, x);
        for y in 0..height {
            let py = linspace(area_h, height, y);
            let hills = HILL_AMPLITUDE * (HILL_FREQUENCY * px).sin() * (HILL_FREQUENCY * py).cos();
            let rough = ROUGHNESS_AMPLITUDE * fbm.sample(x as f64 * noise_freq, y as f64 * noise_freq);
            raw.set(x, y, hills + rough);
        }
    }

    let smooth = gaussian_blur(&raw, SMOOTHING_SIGMA);
    let elevations = Grid {
        width,
        height,
        data: smooth.data.into_iter().map(|v| v as f32).collect(),
    };
    ElevationGrid::from_elevations(elevations, config.resolution)
}
