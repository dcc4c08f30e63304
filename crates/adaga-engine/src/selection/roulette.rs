//! Dual roulette selection: two parents from one linear scan
//!
//! Two uniforms `r1 ≤ r2` place two points on the weight wheel. The scan
//! walks a running target down the weight array; once `x` is found the
//! target is re-based so the same forward pass continues on to `y`:
//!
//! ```text
//! t_x = fsum · r1
//! t_y = t_x + fsum · (r2 − r1) − w_x · r2
//! ```

use adaga_common::RandomSource;
use tracing::trace;

use crate::fitness::SelectionWeights;

/// Indices of the two selected parents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentPair {
    pub x: usize,
    pub y: usize,
    /// Share of `x` in the pair's weight, `w_x / (w_x + w_y)`
    pub blend: f64,
    /// Set when the scan ran off the end and fallback parents were used
    pub fallback: bool,
}

impl ParentPair {
    fn new(x: usize, wx: f64, y: usize, wy: f64, fallback: bool) -> Self {
        let total = wx + wy;
        let blend = if total > 0.0 { wx / total } else { 0.5 };
        Self {
            x,
            y,
            blend,
            fallback,
        }
    }
}

pub struct DualRoulette;

impl DualRoulette {
    /// Select a pair using two draws from `random`
    pub fn draw(weights: &SelectionWeights, random: &RandomSource) -> ParentPair {
        let (r1, r2) = random.draw_pair();
        Self::select(weights, r1, r2)
    }

    /// Select a pair for the given uniforms
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty.
    pub fn select(weights: &SelectionWeights, r1: f64, r2: f64) -> ParentPair {
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        let values = weights.values();
        let last = values.len() - 1;

        let mut target = weights.sum() * lo;
        let gap = weights.sum() * (hi - lo);
        let mut x: Option<(usize, f64)> = None;

        for (i, &w) in values.iter().enumerate() {
            if target <= w {
                match x {
                    None => {
                        x = Some((i, w));
                        target += gap - w * hi;
                        continue;
                    }
                    Some((xi, wx)) => return ParentPair::new(xi, wx, i, w, false),
                }
            }
            target -= w;
        }

        match x {
            Some((xi, wx)) => {
                trace!(x = xi, "Second parent fell back to last member");
                ParentPair::new(xi, wx, last, values[last], true)
            }
            None => {
                trace!("Both parents fell back to first and last members");
                ParentPair::new(0, values[0], last, values[last], true)
            }
        }
    }
}
