use serde::{Deserialize, Serialize};

/// Sensitivity of a value to the parameters of its volatility model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VolatilitySensitivity {
    /// One bucket on a flat volatility or a surface.
    Surface {
        /// Option expiry.
        expiry: f64,
        /// Surface coordinate (strike or moneyness) of the option.
        coordinate: f64,
        /// `∂value/∂σ`.
        vega: f64,
    },
    /// SABR parameter buckets at the option expiry.
    Sabr {
        /// Option expiry.
        expiry: f64,
        /// `∂value/∂alpha`.
        alpha: f64,
        /// `∂value/∂rho`.
        rho: f64,
        /// `∂value/∂nu`.
        nu: f64,
    },
    /// `∂value/∂σ_k` for each Hull-White volatility.
    HullWhite(Vec<f64>),
}

impl VolatilitySensitivity {
    /// Every bucket multiplied by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        match self {
            Self::Surface { expiry, coordinate, vega } => Self::Surface {
                expiry: *expiry,
                coordinate: *coordinate,
                vega: vega * factor,
            },
            Self::Sabr { expiry, alpha, rho, nu } => Self::Sabr {
                expiry: *expiry,
                alpha: alpha * factor,
                rho: rho * factor,
                nu: nu * factor,
            },
            Self::HullWhite(values) => Self::HullWhite(values.iter().map(|v| v * factor).collect()),
        }
    }
}
