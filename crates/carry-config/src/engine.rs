//! Engine settings: solvers, Hull-White quadrature and sensitivity scale.

use carry_analytics::calculator::InstrumentCalculator;
use carry_futures::bond::{
    BondFuturesHullWhiteMethod, DEFAULT_NUMBER_OF_POINTS, MAX_NUMBER_OF_POINTS, MIN_NUMBER_OF_POINTS,
};
use carry_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Root-finder settings for yields, z-spreads and delivery boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    /// Tolerance on the root.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(ValidationError::new(
                "solver.tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            errors.push(ValidationError::new("solver.max_iterations", "must be at least 1"));
        }
        errors
    }
}

/// Quadrature of the bond-futures delivery option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HullWhiteSettings {
    /// Integration points per cheapest-to-deliver region.
    #[serde(default = "default_number_of_points")]
    pub number_of_points: usize,
}

fn default_number_of_points() -> usize {
    DEFAULT_NUMBER_OF_POINTS
}

impl Default for HullWhiteSettings {
    fn default() -> Self {
        Self {
            number_of_points: default_number_of_points(),
        }
    }
}

impl Validate for HullWhiteSettings {
    fn validate(&self) -> Vec<ValidationError> {
        if (MIN_NUMBER_OF_POINTS..=MAX_NUMBER_OF_POINTS).contains(&self.number_of_points) {
            return Vec::new();
        }
        vec![ValidationError::new(
            "hull_white.number_of_points",
            format!(
                "must be in {MIN_NUMBER_OF_POINTS}..={MAX_NUMBER_OF_POINTS}, got {}",
                self.number_of_points
            ),
        )]
    }
}

/// Scale applied to parameter sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensitivitySettings {
    /// One basis point in rate units.
    #[serde(default = "default_basis_point")]
    pub basis_point: f64,
}

fn default_basis_point() -> f64 {
    1e-4
}

impl Default for SensitivitySettings {
    fn default() -> Self {
        Self {
            basis_point: default_basis_point(),
        }
    }
}

impl Validate for SensitivitySettings {
    fn validate(&self) -> Vec<ValidationError> {
        if self.basis_point.is_finite() && self.basis_point > 0.0 {
            return Vec::new();
        }
        vec![ValidationError::new(
            "sensitivity.basis_point",
            format!("must be positive, got {}", self.basis_point),
        )]
    }
}

/// All engine settings. Every section and field is optional in a document.
///
/// # Example
///
/// ```rust
/// use carry_config::{EngineConfig, Validate};
///
/// let config = EngineConfig::from_toml_str("[hull_white]\nnumber_of_points = 121\n").unwrap();
/// assert_eq!(config.hull_white.number_of_points, 121);
/// assert_eq!(config.solver.max_iterations, 100);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Hull-White delivery-option settings.
    #[serde(default)]
    pub hull_white: HullWhiteSettings,

    /// Sensitivity settings.
    #[serde(default)]
    pub sensitivity: SensitivitySettings,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        log::debug!("loading engine configuration from {display}");
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat { path: display }),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::parse("TOML", e.to_string()))
    }

    /// Solver configuration for bond and futures methods.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.solver.tolerance, self.solver.max_iterations)
    }

    /// Delivery-option method with these settings.
    pub fn bond_futures_hull_white_method(&self) -> ConfigResult<BondFuturesHullWhiteMethod> {
        Ok(BondFuturesHullWhiteMethod::new(self.hull_white.number_of_points)?.with_solver_config(self.solver_config()))
    }

    /// Instrument calculator with these settings.
    pub fn instrument_calculator(&self) -> ConfigResult<InstrumentCalculator> {
        Ok(InstrumentCalculator::new()
            .with_solver_config(self.solver_config())
            .with_bond_futures_hull_white(self.bond_futures_hull_white_method()?))
    }

    /// One basis point, for PV01.
    #[must_use]
    pub fn basis_point(&self) -> f64 {
        self.sensitivity.basis_point
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.solver.validate();
        errors.extend(self.hull_white.validate());
        errors.extend(self.sensitivity.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.solver.tolerance, 1e-10);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.hull_white.number_of_points, 81);
        assert_eq!(config.basis_point(), 1e-4);
        assert!(config.is_valid());
        assert_eq!(config.solver_config(), SolverConfig::default());
    }

    #[test]
    fn test_empty_documents_give_defaults() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_json_overrides() {
        let config =
            EngineConfig::from_json_str(r#"{"solver": {"tolerance": 1e-12}, "sensitivity": {"basis_point": 0.01}}"#)
                .unwrap();
        assert_eq!(config.solver.tolerance, 1e-12);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.basis_point(), 0.01);
    }

    #[test]
    fn test_single_validation_error() {
        let err = EngineConfig::from_toml_str("[hull_white]\nnumber_of_points = 40\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "hull_white.number_of_points"),
            "{err:?}"
        );
    }

    #[test]
    fn test_multiple_validation_errors() {
        let config = EngineConfig {
            solver: SolverSettings {
                tolerance: -1.0,
                max_iterations: 0,
            },
            hull_white: HullWhiteSettings { number_of_points: 502 },
            sensitivity: SensitivitySettings { basis_point: 0.0 },
        };
        assert_eq!(config.validate().len(), 4);
        let err = config.validate_or_error().unwrap_err();
        assert!(matches!(err, ConfigError::MultipleValidationErrors(ref e) if e.len() == 4));
        assert!(err.to_string().contains("sensitivity.basis_point"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = EngineConfig::from_toml_str("[solver]\ntolerence = 1e-8\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref format, .. } if format == "TOML"));
        assert!(EngineConfig::from_json_str(r#"{"solver": 3}"#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig {
            hull_white: HullWhiteSettings { number_of_points: 201 },
            ..EngineConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_hull_white_method_uses_settings() {
        let config = EngineConfig::from_toml_str("[hull_white]\nnumber_of_points = 161\n[solver]\nmax_iterations = 50\n")
            .unwrap();
        let method = config.bond_futures_hull_white_method().unwrap();
        assert_eq!(method.number_of_points(), 161);
        assert_eq!(method.solver_config().max_iterations, 50);
        assert!(config.instrument_calculator().is_ok());
    }
}
