// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The buffered viewport window used to decide which items are realized.

use crate::Scalar;

/// A viewport expanded above and below by `buffer_multiplier` viewport heights.
///
/// An item is inside the window when its bottom edge is strictly below
/// [`top`](Self::top) and its top edge is strictly above [`bottom`](Self::bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferWindow<S: Scalar> {
    /// Upper buffer line, `scroll_offset - buffer_multiplier * viewport_height`.
    pub top: S,
    /// Lower buffer line,
    /// `scroll_offset + viewport_height + buffer_multiplier * viewport_height`.
    pub bottom: S,
}

impl<S: Scalar> BufferWindow<S> {
    /// Builds the window for a scroll position and viewport height.
    #[must_use]
    pub fn new(scroll_offset: S, viewport_height: S, buffer_multiplier: S) -> Self {
        let buffer = buffer_multiplier * viewport_height;
        Self {
            top: scroll_offset - buffer,
            bottom: scroll_offset + viewport_height + buffer,
        }
    }

    /// Whether a box starting at `top` with the given `height` intersects the window.
    #[inline]
    #[must_use]
    pub fn contains(&self, top: S, height: S) -> bool {
        top > self.top - height && top < self.bottom
    }
}
