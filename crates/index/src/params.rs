//! Band/row selection.
//!
//! A signature of length `n` is cut into `b` bands of `r` rows, `b * r = n`.
//! Two documents with Jaccard similarity `s` share at least one band with
//! probability `P(s) = 1 - (1 - s^r)^b`, an S-curve whose steep part should
//! sit at the threshold `t`.
//!
//! For each factorization of `n` we integrate the false-positive area
//! `∫₀ᵗ P(s) ds` and the false-negative area `∫ₜ¹ (1 - P(s)) ds`, and keep the
//! pair with the smallest weighted sum.

use serde::{Deserialize, Serialize};

use crate::config::{IndexError, LshConfig};

const INTEGRATION_STEPS: usize = 1000;

/// Band layout of an LSH index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LshParams {
    pub bands: usize,
    pub rows: usize,
}

impl LshParams {
    /// A layout that must cover exactly `num_perm` signature slots.
    pub fn new(bands: usize, rows: usize, num_perm: usize) -> Result<Self, IndexError> {
        if num_perm == 0 {
            return Err(IndexError::InvalidNumPerm { num_perm });
        }
        if bands == 0 || rows == 0 || bands.checked_mul(rows) != Some(num_perm) {
            return Err(IndexError::InvalidBandShape {
                bands,
                rows,
                num_perm,
            });
        }
        Ok(Self { bands, rows })
    }

    /// Resolve the layout for `num_perm` slots from a validated config.
    pub fn from_config(num_perm: usize, cfg: &LshConfig) -> Result<Self, IndexError> {
        cfg.validate()?;
        match (cfg.bands, cfg.rows) {
            (Some(bands), Some(rows)) => Self::new(bands, rows, num_perm),
            _ => Self::optimal(
                num_perm,
                cfg.threshold,
                cfg.false_positive_weight,
                cfg.false_negative_weight,
            ),
        }
    }

    /// Search all factorizations `b * r = num_perm` for the smallest weighted
    /// false-positive/false-negative area around `threshold`.
    ///
    /// Ties keep the layout with fewer bands.
    pub fn optimal(
        num_perm: usize,
        threshold: f64,
        false_positive_weight: f64,
        false_negative_weight: f64,
    ) -> Result<Self, IndexError> {
        if num_perm == 0 {
            return Err(IndexError::InvalidNumPerm { num_perm });
        }
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(IndexError::InvalidThreshold { threshold });
        }

        let mut best: Option<(f64, LshParams)> = None;
        for bands in (1..=num_perm).filter(|b| num_perm % b == 0) {
            let candidate = LshParams {
                bands,
                rows: num_perm / bands,
            };
            let error = false_positive_weight * candidate.false_positive_area(threshold)
                + false_negative_weight * candidate.false_negative_area(threshold);
            match best {
                Some((best_error, _)) if error >= best_error => {}
                _ => best = Some((error, candidate)),
            }
        }
        // num_perm >= 1 always has the factorization 1 x num_perm.
        Ok(best.map(|(_, p)| p).unwrap_or(LshParams {
            bands: 1,
            rows: num_perm,
        }))
    }

    pub fn num_perm(&self) -> usize {
        self.bands * self.rows
    }

    /// Probability that two documents of Jaccard similarity `s` collide in at
    /// least one band.
    pub fn collision_probability(&self, s: f64) -> f64 {
        let s = s.clamp(0.0, 1.0);
        1.0 - (1.0 - s.powi(self.rows as i32)).powi(self.bands as i32)
    }

    /// Area under the collision curve below the threshold.
    pub fn false_positive_area(&self, threshold: f64) -> f64 {
        integrate(|s| self.collision_probability(s), 0.0, threshold)
    }

    /// Area above the collision curve from the threshold to 1.
    pub fn false_negative_area(&self, threshold: f64) -> f64 {
        integrate(|s| 1.0 - self.collision_probability(s), threshold, 1.0)
    }

    /// Similarity at which the collision probability crosses one half.
    pub fn crossover(&self) -> f64 {
        // Solve 1 - (1 - s^r)^b = 1/2.
        let b = self.bands as f64;
        let r = self.rows as f64;
        (1.0 - 0.5f64.powf(1.0 / b)).powf(1.0 / r)
    }
}

/// Midpoint rule over `[a, b]`.
fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> f64 {
    if b <= a {
        return 0.0;
    }
    let h = (b - a) / INTEGRATION_STEPS as f64;
    let mut area = 0.0;
    for i in 0..INTEGRATION_STEPS {
        area += f(a + (i as f64 + 0.5) * h);
    }
    area * h
}
