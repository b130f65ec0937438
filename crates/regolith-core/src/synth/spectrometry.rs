//! Simulated spectrometer readings and random sample placement.
use rand::Rng;

use crate::sample::{compound, Composition, Location, Sample};

/// `(compound, min %, max %)` drawn uniformly per reading.
pub const COMPOUND_RANGES: [(&str, f64, f64); 6] = [
    (compound::IRON_OXIDE, 10.0, 25.0),
    (compound::SILICATE, 30.0, 50.0),
    (compound::WATER, 0.0, 10.0),
    (compound::MAGNESIUM_SULFATE, 0.0, 8.0),
    (compound::PERCHLORATE, 0.0, 3.0),
    (compound::ORGANICS, 0.0, 1.0),
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One simulated reading, percentages rounded to two decimals.
pub fn simulate_composition<R: Rng + ?Sized>(rng: &mut R) -> Composition {
    COMPOUND_RANGES
        .iter()
        .map(|&(name, lo, hi)| (name.to_string(), round2(rng.gen_range(lo..=hi))))
        .collect()
}

/// `count` classified samples at random whole-cell locations inside a
/// `width × height` grid, ids `MARS-REG-000`, `MARS-REG-001`, …
pub fn generate_samples<R: Rng + ?Sized>(
    rng: &mut R,
    shape: (usize, usize),
    count: usize,
) -> Vec<Sample> {
    let (width, height) = shape;
    if width == 0 || height == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let x = rng.gen_range(0..width) as f64;
            let y = rng.gen_range(0..height) as f64;
            let mut sample = Sample::new(Location::new(x, y), format!("MARS-REG-{i:03}"))
                .with_composition(simulate_composition(rng));
            sample.classify();
            sample
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn composition_within_ranges_and_rounded() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let c = simulate_composition(&mut rng);
            assert_eq!(c.len(), COMPOUND_RANGES.len());
            for &(name, lo, hi) in &COMPOUND_RANGES {
                let v = c[name];
                assert!(v >= lo && v <= hi, "{name} = {v}");
                assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn samples_are_in_bounds_classified_and_numbered() {
        let mut rng = StdRng::seed_from_u64(9);
        let samples = generate_samples(&mut rng, (20, 10), 12);
        assert_eq!(samples.len(), 12);
        assert_eq!(samples[0].sample_id, "MARS-REG-000");
        assert_eq!(samples[11].sample_id, "MARS-REG-011");
        for s in &samples {
            assert!(s.location.x >= 0.0 && s.location.x < 20.0);
            assert!(s.location.y >= 0.0 && s.location.y < 10.0);
            assert_eq!(s.location.x.fract(), 0.0);
            assert!(s.classification().is_some());
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let a = generate_samples(&mut StdRng::seed_from_u64(5), (50, 50), 8);
        let b = generate_samples(&mut StdRng::seed_from_u64(5), (50, 50), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_grid_yields_no_samples() {
        assert!(generate_samples(&mut StdRng::seed_from_u64(5), (0, 50), 8).is_empty());
    }
}
