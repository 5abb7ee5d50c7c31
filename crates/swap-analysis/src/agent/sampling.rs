//! Stochastic draws of an agent's reliability.
//!
//! A point estimate `m` backed by `c` units of evidence is treated as a
//! Beta(m·c, (1-m)·c) distribution, which narrows as the agent trains.

use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Beta;

/// Draw `count` plausible values of a reliability with point estimate
/// `mean` and evidence `concentration`, clamped to `[floor, 1 - floor]`.
///
/// `count == 0` returns the point estimate alone.
pub fn draw_reliability<R: Rng + ?Sized>(
    mean: f64,
    concentration: f64,
    count: usize,
    floor: f64,
    rng: &mut R,
) -> Vec<f64> {
    if count == 0 {
        return vec![mean];
    }
    match Beta::new(mean * concentration, (1.0 - mean) * concentration) {
        Ok(dist) => (0..count)
            .map(|_| {
                let draw = dist.sample(&mut *rng);
                if draw.is_finite() {
                    draw.clamp(floor, 1.0 - floor)
                } else {
                    mean
                }
            })
            .collect(),
        Err(_) => vec![mean; count],
    }
}
