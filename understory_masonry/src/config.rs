// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed per-list configuration.

use core::num::NonZeroUsize;

use crate::Scalar;

/// Gutter used by [`MasonryConfig::new`], in logical pixels.
pub const DEFAULT_GUTTER: usize = 12;

/// Configuration of a masonry layout, fixed for the lifetime of a [`MasonryLayout`].
///
/// With the `serde` feature, deserialized values go through the same clamping as
/// [`with_gutter`](Self::with_gutter) and
/// [`with_buffer_multiplier`](Self::with_buffer_multiplier).
///
/// [`MasonryLayout`]: crate::MasonryLayout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MasonryConfig<S: Scalar> {
    columns: NonZeroUsize,
    gutter: S,
    buffer_multiplier: S,
}

impl<S: Scalar> MasonryConfig<S> {
    /// Creates a configuration with `columns` columns, a gutter of
    /// [`DEFAULT_GUTTER`], and no scroll buffer.
    #[must_use]
    pub fn new(columns: NonZeroUsize) -> Self {
        Self {
            columns,
            gutter: S::from_usize(DEFAULT_GUTTER),
            buffer_multiplier: S::zero(),
        }
    }

    /// Sets the spacing around and between columns and between stacked items.
    ///
    /// Negative values are clamped to zero.
    #[must_use]
    pub fn with_gutter(mut self, gutter: S) -> Self {
        debug_assert!(
            gutter.is_finite(),
            "MasonryConfig gutter must be finite; got {gutter:?}"
        );
        self.gutter = gutter.clamp_non_negative();
        self
    }

    /// Sets how many viewport heights of off-screen content are kept realized
    /// above and below the viewport.
    ///
    /// Negative values are clamped to zero.
    #[must_use]
    pub fn with_buffer_multiplier(mut self, buffer_multiplier: S) -> Self {
        debug_assert!(
            buffer_multiplier.is_finite(),
            "MasonryConfig buffer multiplier must be finite; got {buffer_multiplier:?}"
        );
        self.buffer_multiplier = buffer_multiplier.clamp_non_negative();
        self
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Gutter size.
    #[must_use]
    pub const fn gutter(&self) -> S {
        self.gutter
    }

    /// Scroll buffer multiplier.
    #[must_use]
    pub const fn buffer_multiplier(&self) -> S {
        self.buffer_multiplier
    }

    /// Width shared by all columns for a container `viewport_width` wide:
    /// `(viewport_width - gutter * (columns + 1)) / columns`.
    ///
    /// This is not clamped; a container narrower than its gutters yields a
    /// non-positive width.
    #[must_use]
    pub fn column_width(&self, viewport_width: S) -> S {
        let columns = S::from_usize(self.columns());
        let gutters = self.gutter * S::from_usize(self.columns() + 1);
        (viewport_width - gutters) / columns
    }

    /// Left edge of column `index`.
    #[must_use]
    pub fn column_left(&self, index: usize, column_width: S) -> S {
        column_width * S::from_usize(index) + self.gutter * S::from_usize(index + 1)
    }
}

#[cfg(feature = "serde")]
impl<'de, S> serde::Deserialize<'de> for MasonryConfig<S>
where
    S: Scalar + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Fields<S> {
            columns: NonZeroUsize,
            gutter: S,
            buffer_multiplier: S,
        }

        let fields = Fields::<S>::deserialize(deserializer)?;
        Ok(Self::new(fields.columns)
            .with_gutter(fields.gutter)
            .with_buffer_multiplier(fields.buffer_multiplier))
    }
}
