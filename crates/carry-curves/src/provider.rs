//! Curve providers: the market data a pricing call reads.
//!
//! Providers are immutable. Curves sit behind `Arc`, so cloning a provider or
//! decorating one of its curves shares the undecorated curves.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use carry_core::Currency;
use serde::{Deserialize, Serialize};

use crate::curves::{Spread, SpreadCurve};
use crate::error::{CurveError, CurveResult};
use crate::traits::YieldCurve;

/// Resolves a curve from the name its sensitivities are keyed by.
pub trait CurveLookup: Send + Sync {
    /// The curve registered under `name`.
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>>;
}

/// Discounting curves per currency and forward curves per index.
#[derive(Clone, Default)]
pub struct MulticurveProvider {
    discount: BTreeMap<Currency, Arc<dyn YieldCurve>>,
    forward: BTreeMap<String, Arc<dyn YieldCurve>>,
}

impl MulticurveProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the discounting curve of `currency`.
    #[must_use]
    pub fn with_discount_curve(mut self, currency: Currency, curve: Arc<dyn YieldCurve>) -> Self {
        self.discount.insert(currency, curve);
        self
    }

    /// Registers the forward curve of `index`.
    #[must_use]
    pub fn with_forward_curve(mut self, index: impl Into<String>, curve: Arc<dyn YieldCurve>) -> Self {
        self.forward.insert(index.into(), curve);
        self
    }

    /// Discounting curve of `currency`.
    pub fn discount_curve(&self, currency: Currency) -> CurveResult<&Arc<dyn YieldCurve>> {
        self.discount
            .get(&currency)
            .ok_or_else(|| CurveError::curve_not_found(format!("discounting {currency}")))
    }

    /// Discount factor of `currency` at time `t`.
    pub fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        self.discount_curve(currency)?.discount_factor(t)
    }

    /// Forward curve of `index`.
    pub fn forward_curve(&self, index: &str) -> CurveResult<&Arc<dyn YieldCurve>> {
        self.forward
            .get(index)
            .ok_or_else(|| CurveError::curve_not_found(format!("forward {index}")))
    }

    /// Names of all registered curves.
    pub fn curve_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .discount
            .values()
            .chain(self.forward.values())
            .map(|c| c.name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// A copy with parameter `index` of every curve named `name` shifted by `shift`.
    pub fn with_bumped_curve(&self, name: &str, index: usize, shift: f64) -> CurveResult<Self> {
        let mut found = false;
        let mut bumped = self.clone();
        for curve in bumped.discount.values_mut().chain(bumped.forward.values_mut()) {
            if curve.name() == name {
                *curve = curve.with_parameter_shift(index, shift)?;
                found = true;
            }
        }
        if found {
            Ok(bumped)
        } else {
            Err(CurveError::curve_not_found(name))
        }
    }

    fn find(&self, name: &str) -> Option<Arc<dyn YieldCurve>> {
        self.discount
            .values()
            .chain(self.forward.values())
            .find(|c| c.name() == name)
            .cloned()
    }
}

impl CurveLookup for MulticurveProvider {
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.find(name).ok_or_else(|| CurveError::curve_not_found(name))
    }
}

impl fmt::Debug for MulticurveProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticurveProvider")
            .field("discount", &self.discount.keys().collect::<Vec<_>>())
            .field("forward", &self.forward.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Issuer and currency selecting an issuer credit curve.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssuerKey {
    /// Issuer name, e.g. "UK GOVT".
    pub issuer: String,
    /// Currency of the issuer's debt.
    pub currency: Currency,
}

impl IssuerKey {
    /// Creates a key.
    #[must_use]
    pub fn new(issuer: impl Into<String>, currency: Currency) -> Self {
        Self {
            issuer: issuer.into(),
            currency,
        }
    }
}

impl fmt::Display for IssuerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.issuer, self.currency)
    }
}

/// A [`MulticurveProvider`] plus issuer credit curves.
#[derive(Clone, Default)]
pub struct IssuerProvider {
    multicurve: MulticurveProvider,
    issuers: BTreeMap<IssuerKey, Arc<dyn YieldCurve>>,
}

impl IssuerProvider {
    /// Wraps a multicurve provider with no issuer curves.
    #[must_use]
    pub fn new(multicurve: MulticurveProvider) -> Self {
        Self {
            multicurve,
            issuers: BTreeMap::new(),
        }
    }

    /// Registers the credit curve of `key`.
    #[must_use]
    pub fn with_issuer_curve(mut self, key: IssuerKey, curve: Arc<dyn YieldCurve>) -> Self {
        self.issuers.insert(key, curve);
        self
    }

    /// The underlying multicurve provider.
    #[must_use]
    pub fn multicurve(&self) -> &MulticurveProvider {
        &self.multicurve
    }

    /// Credit curve of `key`.
    pub fn issuer_curve(&self, key: &IssuerKey) -> CurveResult<&Arc<dyn YieldCurve>> {
        self.issuers
            .get(key)
            .ok_or_else(|| CurveError::curve_not_found(format!("issuer {key}")))
    }

    /// Issuer discount factor at time `t`.
    pub fn issuer_discount_factor(&self, key: &IssuerKey, t: f64) -> CurveResult<f64> {
        self.issuer_curve(key)?.discount_factor(t)
    }

    /// A new provider whose `key` curve is decorated with `spread`.
    ///
    /// `self` is left untouched and the undecorated curves are shared.
    pub fn with_issuer_spread(&self, key: &IssuerKey, spread: Spread) -> CurveResult<Self> {
        let base = Arc::clone(self.issuer_curve(key)?);
        let decorated: Arc<dyn YieldCurve> = Arc::new(SpreadCurve::new(base, spread)?);
        let mut provider = self.clone();
        provider.issuers.insert(key.clone(), decorated);
        Ok(provider)
    }

    /// A copy with parameter `index` of every curve named `name` shifted by `shift`.
    pub fn with_bumped_curve(&self, name: &str, index: usize, shift: f64) -> CurveResult<Self> {
        let mut bumped = self.clone();
        let mut found = false;
        for curve in bumped.issuers.values_mut() {
            if curve.name() == name {
                *curve = curve.with_parameter_shift(index, shift)?;
                found = true;
            }
        }
        match self.multicurve.with_bumped_curve(name, index, shift) {
            Ok(multicurve) => {
                bumped.multicurve = multicurve;
                found = true;
            }
            Err(CurveError::CurveNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        if found {
            Ok(bumped)
        } else {
            Err(CurveError::curve_not_found(name))
        }
    }

    /// Names of all registered curves.
    pub fn curve_names(&self) -> Vec<String> {
        let mut names = self.multicurve.curve_names();
        names.extend(self.issuers.values().map(|c| c.name().to_string()));
        names.sort();
        names.dedup();
        names
    }
}

impl CurveLookup for IssuerProvider {
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        // issuer curves first: a spread-decorated issuer curve shares its base name
        if let Some(curve) = self.issuers.values().find(|c| c.name() == name) {
            return Ok(Arc::clone(curve));
        }
        self.multicurve.curve_by_name(name)
    }
}

impl fmt::Debug for IssuerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuerProvider")
            .field("multicurve", &self.multicurve)
            .field("issuers", &self.issuers.keys().collect::<Vec<_>>())
            .finish()
    }
}
