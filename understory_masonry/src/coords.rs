// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed boxes and the cache that holds one layout pass worth of them.

use core::borrow::Borrow;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::Scalar;

/// Absolutely positioned box for an item or the footer, relative to the top-left
/// of the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coords<S: Scalar> {
    /// Distance from the top of the content.
    pub top: S,
    /// Distance from the left of the content.
    pub left: S,
    /// Width of the box.
    pub width: S,
    /// Height of the box.
    pub height: S,
}

impl<S: Scalar> Coords<S> {
    /// Bottom edge, `top + height`.
    #[must_use]
    pub fn bottom(&self) -> S {
        self.top + self.height
    }

    /// Right edge, `left + width`.
    #[must_use]
    pub fn right(&self) -> S {
        self.left + self.width
    }

    /// The same box as a [`kurbo::Rect`].
    #[must_use]
    pub fn to_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.left.to_f64(),
            self.top.to_f64(),
            self.right().to_f64(),
            self.bottom().to_f64(),
        )
    }
}

/// Coordinates produced by one full layout pass.
///
/// Holds one entry per identified item plus a dedicated slot for the footer, so the
/// footer key can never collide with an item id. A cache is only ever built whole
/// and swapped in whole; nothing patches individual entries between passes.
#[derive(Debug, Clone)]
pub struct CoordsCache<K, S: Scalar> {
    items: HashMap<K, Coords<S>>,
    footer: Option<Coords<S>>,
}

impl<K, S: Scalar> Default for CoordsCache<K, S> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            footer: None,
        }
    }
}

impl<K: Hash + Eq, S: Scalar> CoordsCache<K, S> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: HashMap::with_capacity(capacity),
            footer: None,
        }
    }

    /// Coordinates of the item with id `id`, if it was placed.
    #[must_use]
    pub fn get<Q>(&self, id: &Q) -> Option<&Coords<S>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(id)
    }

    /// Coordinates of the footer, if one was placed.
    #[must_use]
    pub const fn footer(&self) -> Option<&Coords<S>> {
        self.footer.as_ref()
    }

    /// Number of placed items, not counting the footer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no item was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over placed items in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Coords<S>)> {
        self.items.iter()
    }

    /// Records an item placement. Later placements of the same id win.
    pub(crate) fn insert(&mut self, id: K, coords: Coords<S>) {
        self.items.insert(id, coords);
    }

    pub(crate) fn set_footer(&mut self, coords: Coords<S>) {
        self.footer = Some(coords);
    }
}
