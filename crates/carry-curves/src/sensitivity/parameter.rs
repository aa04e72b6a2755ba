use std::collections::BTreeMap;

use carry_core::Currency;
use nalgebra::DVector;

use super::MultipleCurrencyCurveSensitivity;
use crate::error::{CurveError, CurveResult};
use crate::provider::CurveLookup;

/// Sensitivities to curve parameters, keyed by `(curve name, currency)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSensitivity {
    sensitivities: BTreeMap<(String, Currency), DVector<f64>>,
}

impl ParameterSensitivity {
    /// Empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `vector` to the entry of `(name, currency)`.
    pub fn add(&mut self, name: &str, currency: Currency, vector: DVector<f64>) -> CurveResult<()> {
        match self.sensitivities.get_mut(&(name.to_string(), currency)) {
            Some(existing) => {
                if existing.len() != vector.len() {
                    return Err(CurveError::DimensionMismatch {
                        name: name.to_string(),
                        expected: existing.len(),
                        actual: vector.len(),
                    });
                }
                *existing += vector;
            }
            None => {
                self.sensitivities.insert((name.to_string(), currency), vector);
            }
        }
        Ok(())
    }

    /// Sum of both sensitivities.
    pub fn plus(&self, other: &Self) -> CurveResult<Self> {
        let mut result = self.clone();
        for ((name, currency), vector) in &other.sensitivities {
            result.add(name, *currency, vector.clone())?;
        }
        Ok(result)
    }

    /// Every entry scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(k, v)| (k.clone(), v * factor))
                .collect(),
        }
    }

    /// Sum of all node sensitivities per currency.
    ///
    /// Multiplied by one basis point this is the PV01 of the position.
    #[must_use]
    pub fn total_by_currency(&self) -> BTreeMap<Currency, f64> {
        let mut totals = BTreeMap::new();
        for ((_, currency), vector) in &self.sensitivities {
            *totals.entry(*currency).or_insert(0.0) += vector.sum();
        }
        totals
    }

    /// Node vector of `(name, currency)`.
    #[must_use]
    pub fn get(&self, name: &str, currency: Currency) -> Option<&DVector<f64>> {
        self.sensitivities.get(&(name.to_string(), currency))
    }

    /// Iterates over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, Currency), &DVector<f64>)> {
        self.sensitivities.iter()
    }

    /// Number of `(curve, currency)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// True when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }
}

/// Chains point sensitivities through each curve's `∂r(t)/∂p`.
pub fn parameter_sensitivity(
    sensitivity: &MultipleCurrencyCurveSensitivity,
    curves: &dyn CurveLookup,
) -> CurveResult<ParameterSensitivity> {
    let mut result = ParameterSensitivity::new();
    for (currency, curve_sensitivity) in sensitivity.iter() {
        for (name, points) in curve_sensitivity.iter() {
            let curve = curves.curve_by_name(name)?;
            let mut vector = DVector::zeros(curve.number_of_parameters());
            for &(t, value) in points {
                let dr_dp = curve.interest_rate_parameter_sensitivity(t)?;
                for (node, weight) in vector.iter_mut().zip(dr_dp) {
                    *node += value * weight;
                }
            }
            result.add(name, *currency, vector)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::InterpolatedCurve;
    use crate::provider::MulticurveProvider;
    use crate::sensitivity::CurveSensitivity;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn test_chain_between_nodes() {
        let curve = Arc::new(InterpolatedCurve::new("USD-DSC", vec![1.0, 2.0, 3.0], vec![0.01, 0.02, 0.03]).unwrap());
        let provider = MulticurveProvider::new().with_discount_curve(Currency::USD, curve);
        let points = MultipleCurrencyCurveSensitivity::of(Currency::USD, CurveSensitivity::of_point("USD-DSC", 1.25, 4.0));
        let ps = parameter_sensitivity(&points, &provider).unwrap();
        let v = ps.get("USD-DSC", Currency::USD).unwrap();
        assert_relative_eq!(v[0], 3.0, epsilon = 1e-14);
        assert_relative_eq!(v[1], 1.0, epsilon = 1e-14);
        assert_relative_eq!(v[2], 0.0, epsilon = 1e-14);
        assert_relative_eq!(ps.total_by_currency()[&Currency::USD], 4.0, epsilon = 1e-14);
    }

    #[test]
    fn test_plus_dimension_mismatch() {
        let mut a = ParameterSensitivity::new();
        a.add("A", Currency::EUR, DVector::from_vec(vec![1.0, 2.0])).unwrap();
        let mut b = ParameterSensitivity::new();
        b.add("A", Currency::EUR, DVector::from_vec(vec![1.0])).unwrap();
        assert!(a.plus(&b).is_err());
        let doubled = a.plus(&a).unwrap();
        assert_eq!(doubled, a.multiplied_by(2.0));
    }

    #[test]
    fn test_missing_curve() {
        let provider = MulticurveProvider::new();
        let points = MultipleCurrencyCurveSensitivity::of(Currency::USD, CurveSensitivity::of_point("X", 1.0, 1.0));
        assert!(matches!(
            parameter_sensitivity(&points, &provider),
            Err(CurveError::CurveNotFound { .. })
        ));
    }
}
