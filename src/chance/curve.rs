use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/*
Weight Curves
=============

A weight curve describes a non-uniform random value by a handful of
(value, weight) points. The weights are heights of a probability density;
between points the density is a straight line, outside the first and last
point it is zero.

    weight
      12 ┤     ●
         │    ╱ ╲
       4 ┤   ╱   ●
         │  ╱     ╲
       0 ┼─●───────●──→ value
        -0.3  0.1 0.2 0.3

For the curve above most draws land near 0.1, some near 0.2, and nothing
lands outside [-0.3, 0.3]. Composers write these by feel, so weights are not
normalized.

Sampling is exact rather than by rejection: pick a segment with probability
proportional to its trapezoid area, then invert that trapezoid's CDF. The
CDF of a linear density is quadratic,

    area(t) = w0·t + k·t²      with k = (w1 - w0) / (2·dx)

so the position is the positive root, written in the form that stays stable
when k is zero:

    t = 2a / (w0 + sqrt(w0² + 4ka))

This keeps the cost of a draw bounded, which matters because envelopes
redraw their targets from inside the audio callback.
*/

/// Loaded curves go through [`WeightCurve::new`], so a bad file is a
/// `ConfigError` here rather than a panic on the audio thread.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CurvePoints"))]
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCurve {
    points: Vec<(f32, f32)>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CurvePoints {
    points: Vec<(f32, f32)>,
}

#[cfg(feature = "serde")]
impl TryFrom<CurvePoints> for WeightCurve {
    type Error = ConfigError;

    fn try_from(raw: CurvePoints) -> ConfigResult<Self> {
        Self::new(raw.points)
    }
}

impl WeightCurve {
    /// Build a curve from `(value, weight)` points in any order.
    pub fn new(mut points: Vec<(f32, f32)>) -> ConfigResult<Self> {
        if points.is_empty() {
            return Err(ConfigError::InvalidCurve("a curve needs at least one point"));
        }
        if points
            .iter()
            .any(|&(value, weight)| !value.is_finite() || !weight.is_finite())
        {
            return Err(ConfigError::InvalidCurve("points must be finite"));
        }
        if points.iter().any(|&(_, weight)| weight < 0.0) {
            return Err(ConfigError::InvalidCurve("weights cannot be negative"));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { points })
    }

    /// Curve from hard-coded points known to be valid.
    pub(crate) fn trusted(points: &[(f32, f32)]) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.iter().all(|&(v, w)| v.is_finite() && w.is_finite() && w >= 0.0));
        let mut points = points.to_vec();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points }
    }

    /// A curve that always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self {
            points: vec![(value, 1.0)],
        }
    }

    /// Flat density over `[low, high]`.
    pub fn uniform(low: f32, high: f32) -> ConfigResult<Self> {
        Self::new(vec![(low, 1.0), (high, 1.0)])
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    pub fn min(&self) -> f32 {
        self.points[0].0
    }

    pub fn max(&self) -> f32 {
        self.points[self.points.len() - 1].0
    }

    /// Draw a value distributed according to the curve.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.points.len() == 1 {
            return self.points[0].0;
        }

        let total: f64 = self.segments().map(|(_, _, area)| area).sum();
        if total <= 0.0 {
            // All weights zero: no preference anywhere in the range.
            return rng.gen_range(self.min()..=self.max());
        }

        let mut remaining = rng.gen::<f64>() * total;
        let mut chosen = None;
        for (start, end, area) in self.segments() {
            if area <= 0.0 {
                continue;
            }
            chosen = Some((start, end, remaining));
            if remaining < area {
                break;
            }
            remaining -= area;
        }

        match chosen {
            Some((start, end, target)) => position_in_segment(start, end, target),
            None => self.max(),
        }
    }

    /// (start point, end point, trapezoid area) for each adjacent pair.
    fn segments(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32), f64)> + '_ {
        self.points.windows(2).map(|pair| {
            let (x0, w0) = pair[0];
            let (x1, w1) = pair[1];
            let area = (f64::from(w0) + f64::from(w1)) * 0.5 * f64::from(x1 - x0);
            (pair[0], pair[1], area)
        })
    }
}

/// Position inside one segment where the accumulated area reaches `target`.
fn position_in_segment(start: (f32, f32), end: (f32, f32), target: f64) -> f32 {
    let (x0, w0) = (f64::from(start.0), f64::from(start.1));
    let (x1, w1) = (f64::from(end.0), f64::from(end.1));
    let dx = x1 - x0;
    if dx <= 0.0 || target <= 0.0 {
        return start.0;
    }

    let k = (w1 - w0) / (2.0 * dx);
    let root = (w0 * w0 + 4.0 * k * target).max(0.0).sqrt();
    let denominator = w0 + root;
    let t = if denominator > 0.0 {
        2.0 * target / denominator
    } else {
        0.0
    };
    (x0 + t.clamp(0.0, dx)) as f32
}
