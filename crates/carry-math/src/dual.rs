//! Forward-mode automatic differentiation over a fixed number of inputs.
//!
//! A [`Dual<N>`] carries a value and its gradient with respect to `N` seeded
//! variables. Closed-form formulas written against it return exact first
//! derivatives in one pass.
//!
//! ```rust
//! use carry_math::dual::Dual;
//!
//! let x = Dual::<2>::variable(2.0, 0);
//! let y = Dual::<2>::variable(3.0, 1);
//! let f = (x * y).ln() + x.powf(2.0);
//! assert!((f.value - (6.0_f64.ln() + 4.0)).abs() < 1e-15);
//! assert!((f.gradient[0] - (0.5 + 4.0)).abs() < 1e-15);
//! assert!((f.gradient[1] - 1.0 / 3.0).abs() < 1e-15);
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Value with gradient over `N` variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<const N: usize> {
    /// Function value.
    pub value: f64,
    /// Partial derivatives with respect to the seeded variables.
    pub gradient: [f64; N],
}

impl<const N: usize> Dual<N> {
    /// A constant (zero gradient).
    #[inline]
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            value,
            gradient: [0.0; N],
        }
    }

    /// The `index`-th active variable.
    #[inline]
    #[must_use]
    pub fn variable(value: f64, index: usize) -> Self {
        let mut gradient = [0.0; N];
        if index < N {
            gradient[index] = 1.0;
        }
        Self { value, gradient }
    }

    #[inline]
    fn chain(self, value: f64, derivative: f64) -> Self {
        let mut gradient = self.gradient;
        for g in &mut gradient {
            *g *= derivative;
        }
        Self { value, gradient }
    }

    /// Exponential.
    #[inline]
    #[must_use]
    pub fn exp(self) -> Self {
        let v = self.value.exp();
        self.chain(v, v)
    }

    /// Natural logarithm.
    #[inline]
    #[must_use]
    pub fn ln(self) -> Self {
        self.chain(self.value.ln(), 1.0 / self.value)
    }

    /// Square root.
    #[inline]
    #[must_use]
    pub fn sqrt(self) -> Self {
        let v = self.value.sqrt();
        self.chain(v, 0.5 / v)
    }

    /// Power with a constant exponent.
    #[inline]
    #[must_use]
    pub fn powf(self, n: f64) -> Self {
        if n == 0.0 {
            return Self::constant(1.0);
        }
        let v = self.value.powf(n);
        self.chain(v, n * self.value.powf(n - 1.0))
    }

    /// Absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        if self.value < 0.0 {
            -self
        } else {
            self
        }
    }
}

impl<const N: usize> Add for Dual<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut gradient = self.gradient;
        for (g, r) in gradient.iter_mut().zip(rhs.gradient) {
            *g += r;
        }
        Self {
            value: self.value + rhs.value,
            gradient,
        }
    }
}

impl<const N: usize> Add<f64> for Dual<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self {
            value: self.value + rhs,
            gradient: self.gradient,
        }
    }
}

impl<const N: usize> Sub for Dual<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<const N: usize> Sub<f64> for Dual<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        self + (-rhs)
    }
}

impl<const N: usize> Mul for Dual<N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let mut gradient = [0.0; N];
        for (k, g) in gradient.iter_mut().enumerate() {
            *g = self.gradient[k] * rhs.value + self.value * rhs.gradient[k];
        }
        Self {
            value: self.value * rhs.value,
            gradient,
        }
    }
}

impl<const N: usize> Mul<f64> for Dual<N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.chain(self.value * rhs, rhs)
    }
}

impl<const N: usize> Div for Dual<N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let inv = 1.0 / rhs.value;
        let mut gradient = [0.0; N];
        for (k, g) in gradient.iter_mut().enumerate() {
            *g = (self.gradient[k] - self.value * inv * rhs.gradient[k]) * inv;
        }
        Self {
            value: self.value * inv,
            gradient,
        }
    }
}

impl<const N: usize> Div<f64> for Dual<N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        self.chain(self.value / rhs, 1.0 / rhs)
    }
}

impl<const N: usize> Neg for Dual<N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.chain(-self.value, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn f(x: Dual<3>, y: Dual<3>, z: Dual<3>) -> Dual<3> {
        ((x * y).sqrt() + z.exp() / x - y.powf(1.5)).abs() * 2.0 - z
    }

    fn f64_version(x: f64, y: f64, z: f64) -> f64 {
        ((x * y).sqrt() + z.exp() / x - y.powf(1.5)).abs() * 2.0 - z
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let (x, y, z) = (1.3, 0.7, -0.4);
        let out = f(Dual::variable(x, 0), Dual::variable(y, 1), Dual::variable(z, 2));
        assert_relative_eq!(out.value, f64_version(x, y, z), epsilon = 1e-15);
        let h = 1e-6;
        let fd = [
            (f64_version(x + h, y, z) - f64_version(x - h, y, z)) / (2.0 * h),
            (f64_version(x, y + h, z) - f64_version(x, y - h, z)) / (2.0 * h),
            (f64_version(x, y, z + h) - f64_version(x, y, z - h)) / (2.0 * h),
        ];
        for k in 0..3 {
            assert_relative_eq!(out.gradient[k], fd[k], epsilon = 1e-8);
        }
    }

    #[test]
    fn test_constant_has_no_gradient() {
        let c = Dual::<2>::constant(4.0).sqrt();
        assert_eq!(c.gradient, [0.0, 0.0]);
        assert_eq!(c.value, 2.0);
    }
}
