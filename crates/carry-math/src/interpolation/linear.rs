//! Linear interpolation.

use serde::{Deserialize, Serialize};

use super::{check_strictly_increasing, find_segment, Extrapolation, Interpolator};
use crate::error::{MathError, MathResult};

/// Linear interpolation between data points.
///
/// Extrapolation is selected separately for each side. Curves use flat on
/// the left and linear on the right.
///
/// # Example
///
/// ```rust
/// use carry_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.01, 0.02])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Flat, Extrapolation::Linear);
/// assert!((interp.interpolate(0.5).unwrap() - 0.01).abs() < 1e-15);
/// assert!((interp.interpolate(3.0).unwrap() - 0.03).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    left: Extrapolation,
    right: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator with flat extrapolation on both sides.
    ///
    /// A single node gives a constant function.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::dimension_mismatch(xs.len(), ys.len()));
        }
        check_strictly_increasing(&xs, "x")?;

        Ok(Self {
            xs,
            ys,
            left: Extrapolation::Flat,
            right: Extrapolation::Flat,
        })
    }

    /// Sets the extrapolation on each side.
    #[must_use]
    pub fn with_extrapolation(mut self, left: Extrapolation, right: Extrapolation) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Node abscissas.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Node values.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True if there are no nodes (never the case for a constructed value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    // Segment index and the weight of its right node; None means flat at a node.
    fn locate(&self, x: f64) -> Locate {
        let n = self.xs.len();
        if n == 1 {
            return Locate::Node(0);
        }
        if x < self.xs[0] && self.left == Extrapolation::Flat {
            return Locate::Node(0);
        }
        if x > self.xs[n - 1] && self.right == Extrapolation::Flat {
            return Locate::Node(n - 1);
        }
        let i = find_segment(&self.xs, x);
        let w = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Locate::Segment(i, w)
    }
}

enum Locate {
    Node(usize),
    Segment(usize, f64),
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if x.is_nan() {
            return Err(MathError::invalid_input("interpolation point is NaN"));
        }
        Ok(match self.locate(x) {
            Locate::Node(i) => self.ys[i],
            Locate::Segment(i, w) => self.ys[i] + w * (self.ys[i + 1] - self.ys[i]),
        })
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if x.is_nan() {
            return Err(MathError::invalid_input("interpolation point is NaN"));
        }
        Ok(match self.locate(x) {
            Locate::Node(_) => 0.0,
            Locate::Segment(i, _) => {
                (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
            }
        })
    }

    fn node_sensitivity(&self, x: f64) -> MathResult<Vec<f64>> {
        if x.is_nan() {
            return Err(MathError::invalid_input("interpolation point is NaN"));
        }
        let mut weights = vec![0.0; self.xs.len()];
        match self.locate(x) {
            Locate::Node(i) => weights[i] = 1.0,
            Locate::Segment(i, w) => {
                weights[i] = 1.0 - w;
                weights[i + 1] = w;
            }
        }
        Ok(weights)
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn interp() -> LinearInterpolator {
        LinearInterpolator::new(vec![0.5, 1.0, 2.0, 5.0], vec![0.01, 0.015, 0.02, 0.03])
            .unwrap()
            .with_extrapolation(Extrapolation::Flat, Extrapolation::Linear)
    }

    #[test]
    fn test_through_nodes() {
        let i = interp();
        for (x, y) in i.xs().iter().zip(i.ys()) {
            assert_relative_eq!(i.interpolate(*x).unwrap(), *y, epsilon = 1e-15);
        }
        assert_relative_eq!(i.interpolate(1.5).unwrap(), 0.0175, epsilon = 1e-15);
    }

    #[test]
    fn test_extrapolation() {
        let i = interp();
        assert_relative_eq!(i.interpolate(0.1).unwrap(), 0.01, epsilon = 1e-15);
        assert_relative_eq!(i.derivative(0.1).unwrap(), 0.0, epsilon = 1e-15);
        let slope = (0.03 - 0.02) / 3.0;
        assert_relative_eq!(i.interpolate(8.0).unwrap(), 0.03 + 3.0 * slope, epsilon = 1e-15);
        assert_relative_eq!(i.derivative(8.0).unwrap(), slope, epsilon = 1e-15);
    }

    #[test]
    fn test_node_sensitivity_matches_bump() {
        let i = interp();
        for x in [0.2, 0.75, 3.0, 7.0] {
            let weights = i.node_sensitivity(x).unwrap();
            let base = i.interpolate(x).unwrap();
            for k in 0..i.len() {
                let mut ys = i.ys().to_vec();
                ys[k] += 1e-6;
                let bumped = LinearInterpolator::new(i.xs().to_vec(), ys)
                    .unwrap()
                    .with_extrapolation(Extrapolation::Flat, Extrapolation::Linear);
                let fd = (bumped.interpolate(x).unwrap() - base) / 1e-6;
                assert_relative_eq!(weights[k], fd, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_single_node_is_constant() {
        let i = LinearInterpolator::new(vec![1.0], vec![0.02]).unwrap();
        assert_relative_eq!(i.interpolate(10.0).unwrap(), 0.02);
        assert_eq!(i.node_sensitivity(0.0).unwrap(), vec![1.0]);
    }

    proptest::proptest! {
        #[test]
        fn prop_weights_sum_to_one_inside(x in 0.5f64..5.0) {
            let weights = interp().node_sensitivity(x).unwrap();
            let total: f64 = weights.iter().sum();
            proptest::prop_assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_unsorted() {
        assert!(LinearInterpolator::new(vec![1.0, 1.0], vec![0.0, 0.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 2.0], vec![0.0]).is_err());
    }
}
