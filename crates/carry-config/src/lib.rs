//! # Carry Configuration
//!
//! Engine settings loaded from TOML or JSON.
//!
//! - **Solver**: tolerance and iteration cap for yield, z-spread and
//!   delivery-boundary solves
//! - **Hull-White**: integration points of the bond-futures delivery option
//! - **Sensitivity**: the basis point used for PV01
//!
//! Every document is validated on load.
//!
//! # Example
//!
//! ```rust
//! use carry_config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"solver": {"max_iterations": 200}}"#).unwrap();
//! assert_eq!(config.solver_config().max_iterations, 200);
//! assert!(EngineConfig::from_json_str(r#"{"sensitivity": {"basis_point": -1.0}}"#).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod engine;
pub mod error;

pub use engine::{EngineConfig, HullWhiteSettings, SensitivitySettings, SolverSettings};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
