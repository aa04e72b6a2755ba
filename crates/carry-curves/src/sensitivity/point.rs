use std::collections::BTreeMap;

use carry_core::Currency;
use serde::{Deserialize, Serialize};

const TIME_MERGE_TOLERANCE: f64 = 1.0e-12;

/// Point sensitivities `∂value/∂r(t)` per curve name.
///
/// # Example
///
/// ```rust
/// use carry_curves::sensitivity::CurveSensitivity;
///
/// let a = CurveSensitivity::of_point("EUR-DSC", 1.0, -2.0);
/// let b = CurveSensitivity::of_point("EUR-DSC", 1.0, 0.5);
/// let total = a.plus(&b).cleaned();
/// assert_eq!(total.points("EUR-DSC"), &[(1.0, -1.5)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl CurveSensitivity {
    /// Empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single point on one curve.
    #[must_use]
    pub fn of_point(name: impl Into<String>, time: f64, value: f64) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(name.into(), vec![(time, value)]);
        Self { sensitivities }
    }

    /// A list of points on one curve.
    #[must_use]
    pub fn of_points(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(name.into(), points);
        Self { sensitivities }
    }

    /// Appends a point.
    pub fn add_point(&mut self, name: &str, time: f64, value: f64) {
        self.sensitivities
            .entry(name.to_string())
            .or_default()
            .push((time, value));
    }

    /// Concatenation of both sets of points.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (name, points) in &other.sensitivities {
            result
                .sensitivities
                .entry(name.clone())
                .or_default()
                .extend_from_slice(points);
        }
        result
    }

    /// Every value scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                (
                    name.clone(),
                    points.iter().map(|&(t, v)| (t, v * factor)).collect(),
                )
            })
            .collect();
        Self { sensitivities }
    }

    /// Points sorted by time with equal times merged.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(name, points)| {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
                let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
                for (t, v) in sorted {
                    match merged.last_mut() {
                        Some(last) if (last.0 - t).abs() < TIME_MERGE_TOLERANCE => last.1 += v,
                        _ => merged.push((t, v)),
                    }
                }
                (name.clone(), merged)
            })
            .collect();
        Self { sensitivities }
    }

    /// Points of curve `name` (empty if absent).
    #[must_use]
    pub fn points(&self, name: &str) -> &[(f64, f64)] {
        self.sensitivities.get(name).map_or(&[][..], Vec::as_slice)
    }

    /// Iterates over curves and their points.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<(f64, f64)>)> {
        self.sensitivities.iter()
    }

    /// Curve names carrying points.
    pub fn curve_names(&self) -> impl Iterator<Item = &String> {
        self.sensitivities.keys()
    }

    /// True if no points are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensitivities.values().all(Vec::is_empty)
    }

    /// Largest absolute difference between cleaned point values of two sensitivities.
    ///
    /// Points present in one and missing in the other count fully.
    #[must_use]
    pub fn max_difference(&self, other: &Self) -> f64 {
        let diff = self.plus(&other.multiplied_by(-1.0)).cleaned();
        diff.sensitivities
            .values()
            .flatten()
            .fold(0.0_f64, |acc, &(_, v)| acc.max(v.abs()))
    }
}

/// Point sensitivities per currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleCurrencyCurveSensitivity {
    sensitivities: BTreeMap<Currency, CurveSensitivity>,
}

impl MultipleCurrencyCurveSensitivity {
    /// Empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-currency sensitivity.
    #[must_use]
    pub fn of(currency: Currency, sensitivity: CurveSensitivity) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(currency, sensitivity);
        Self { sensitivities }
    }

    /// Sum of both, currency by currency.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (currency, sensitivity) in &other.sensitivities {
            let entry = result.sensitivities.entry(*currency).or_default();
            *entry = entry.plus(sensitivity);
        }
        result
    }

    /// Every value scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(c, s)| (*c, s.multiplied_by(factor)))
                .collect(),
        }
    }

    /// Cleaned per currency.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(c, s)| (*c, s.cleaned()))
                .collect(),
        }
    }

    /// Sensitivity in `currency` (empty if absent).
    #[must_use]
    pub fn sensitivity(&self, currency: Currency) -> CurveSensitivity {
        self.sensitivities.get(&currency).cloned().unwrap_or_default()
    }

    /// Iterates over currencies.
    pub fn iter(&self) -> impl Iterator<Item = (&Currency, &CurveSensitivity)> {
        self.sensitivities.iter()
    }

    /// Currencies present.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.sensitivities.keys()
    }
}
