use serde::{Deserialize, Serialize};

use crate::error::{FuturesError, FuturesResult};

/// Last volatility time; volatilities apply up to this horizon.
pub const VOLATILITY_TIME_HORIZON: f64 = 1000.0;

/// Mean reversion plus piecewise constant volatilities.
///
/// # Example
///
/// ```rust
/// use carry_futures::hull_white::HullWhiteParameters;
///
/// let params = HullWhiteParameters::new(0.01, vec![0.01, 0.011, 0.012], vec![0.5, 1.0]).unwrap();
/// assert_eq!(params.volatility_time(), &[0.0, 0.5, 1.0, 1000.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteParameters {
    mean_reversion: f64,
    volatility: Vec<f64>,
    volatility_time: Vec<f64>,
}

impl HullWhiteParameters {
    /// Creates parameters from `n` volatilities and `n − 1` increasing change times.
    pub fn new(mean_reversion: f64, volatility: Vec<f64>, change_times: Vec<f64>) -> FuturesResult<Self> {
        if !(mean_reversion.is_finite() && mean_reversion > 0.0) {
            return Err(FuturesError::invalid_parameter(
                "mean_reversion",
                format!("must be positive, got {mean_reversion}"),
            ));
        }
        if volatility.is_empty() {
            return Err(FuturesError::invalid_parameter("volatility", "at least one volatility is required"));
        }
        if volatility.len() != change_times.len() + 1 {
            return Err(FuturesError::LengthMismatch {
                expected: change_times.len() + 1,
                actual: volatility.len(),
            });
        }
        if volatility.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(FuturesError::invalid_parameter("volatility", "must be finite and non-negative"));
        }
        let mut volatility_time = Vec::with_capacity(change_times.len() + 2);
        volatility_time.push(0.0);
        volatility_time.extend_from_slice(&change_times);
        volatility_time.push(VOLATILITY_TIME_HORIZON);
        if volatility_time.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(FuturesError::invalid_parameter(
                "change_times",
                "must be strictly increasing, positive and below the horizon",
            ));
        }
        Ok(Self {
            mean_reversion,
            volatility,
            volatility_time,
        })
    }

    /// Constant volatility parameters.
    pub fn constant(mean_reversion: f64, volatility: f64) -> FuturesResult<Self> {
        Self::new(mean_reversion, vec![volatility], Vec::new())
    }

    /// Mean reversion `a`.
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Volatilities, one per period.
    #[must_use]
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Period boundaries `[0, change times…, horizon]`.
    #[must_use]
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Number of volatility parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.volatility.len()
    }

    /// Always false for validated parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volatility.is_empty()
    }

    /// A copy with volatility `index` shifted by `shift`.
    pub fn with_volatility_shift(&self, index: usize, shift: f64) -> FuturesResult<Self> {
        if index >= self.volatility.len() {
            return Err(FuturesError::invalid_parameter(
                "index",
                format!("{index} out of range for {} volatilities", self.volatility.len()),
            ));
        }
        let mut shifted = self.clone();
        shifted.volatility[index] += shift;
        Ok(shifted)
    }
}
