// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction for layout extents and offsets.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Numeric scalar used for every extent, offset, and scroll position in a masonry layout.
///
/// Implemented for `f32` and `f64`. Values are expected to be finite; debug builds
/// assert on NaN in the places where they would otherwise propagate silently.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Zero value.
    fn zero() -> Self;

    /// Convert a count or index into a scalar.
    fn from_usize(n: usize) -> Self;

    /// Widen to `f64`, used when handing boxes to `kurbo`.
    fn to_f64(self) -> f64;

    /// Larger of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Whether the value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Whether the sign bit is set (including `-0.0`).
    fn is_sign_negative(self) -> bool;

    /// Returns `self`, or zero for negative values.
    #[inline]
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }
}

impl Scalar for f32 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "Column counts and indices are small"
    )]
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as Self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }
}

impl Scalar for f64 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "Column counts and indices are small"
    )]
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as Self
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }
}
