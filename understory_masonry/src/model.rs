// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The accessors a masonry layout uses to read host items.

use alloc::borrow::{Cow, ToOwned};
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

use crate::Scalar;

/// Describes how a masonry layout reads the host's items.
///
/// Items are opaque to the layout. It only ever asks for a stable identity,
/// a height for a given column width, and the height of the optional footer.
///
/// Identity comes in two forms. [`item_key`](Self::item_key) borrows the key
/// from the item (or produces a cheap owned one) and is what the scroll path
/// uses for cache lookups. [`item_id`](Self::item_id) returns an owned id and is
/// only called by a full layout when it stores coordinates.
pub trait MasonryModel {
    /// Host item type.
    type Item;

    /// Borrowed form of an item's identity, for example `str`.
    type Key: ?Sized + Hash + Eq + ToOwned<Owned = Self::Id>;

    /// Owned identity stored in the coordinate cache, for example `String`. Must be
    /// unique within one item sequence and stable across calls.
    type Id: Hash + Eq + Borrow<Self::Key>;

    /// Scalar type used for extents and offsets.
    type Scalar: Scalar;

    /// Key of `item`, or `None` to leave the item out of the layout entirely.
    fn item_key<'a>(&self, item: &'a Self::Item) -> Option<Cow<'a, Self::Key>>;

    /// Owned id of `item`. Must agree with [`item_key`](Self::item_key).
    fn item_id(&self, item: &Self::Item) -> Option<Self::Id> {
        self.item_key(item).map(Cow::into_owned)
    }

    /// Height of `item` when laid out in a column `column_width` wide.
    ///
    /// Values are used as-is; zero and negative heights are not rejected.
    fn item_height(&self, item: &Self::Item, column_width: Self::Scalar) -> Self::Scalar;

    /// Height of the full-width footer placed after the tallest column.
    ///
    /// A non-positive height means there is no footer. The default has none.
    fn footer_height(
        &self,
        columns: usize,
        column_width: Self::Scalar,
        gutter: Self::Scalar,
    ) -> Self::Scalar {
        let _ = (columns, column_width, gutter);
        Self::Scalar::zero()
    }
}

/// A [`MasonryModel`] assembled from closures.
///
/// The key closure borrows the key out of the item, so looking items up while
/// scrolling never allocates, even for `String` ids.
///
/// ```rust
/// use understory_masonry::{FnModel, MasonryModel};
///
/// struct Tile {
///     id: String,
///     aspect: f64,
/// }
///
/// let model = FnModel::new(|t: &Tile| Some(t.id.as_str()), |t: &Tile, width: f64| width * t.aspect)
///     .with_footer(|_, _, _| 40.0);
///
/// let tile = Tile { id: "seven".into(), aspect: 1.5 };
/// assert_eq!(model.item_id(&tile).as_deref(), Some("seven"));
/// assert_eq!(model.item_height(&tile, 100.0), 150.0);
/// assert_eq!(model.footer_height(2, 100.0, 12.0), 40.0);
/// ```
pub struct FnModel<T, Q: ?Sized, S, KeyFn, HeightFn, FooterFn = fn(usize, S, S) -> S> {
    key_fn: KeyFn,
    height_fn: HeightFn,
    footer_fn: FooterFn,
    _marker: PhantomData<fn(&T) -> (&Q, S)>,
}

fn no_footer<S: Scalar>(_columns: usize, _column_width: S, _gutter: S) -> S {
    S::zero()
}

impl<T, Q, S, KeyFn, HeightFn> FnModel<T, Q, S, KeyFn, HeightFn>
where
    Q: ?Sized,
    S: Scalar,
    KeyFn: Fn(&T) -> Option<&Q>,
    HeightFn: Fn(&T, S) -> S,
{
    /// Creates a model without a footer.
    ///
    /// `key_fn` returns a key borrowed from the item, or `None` to skip it.
    #[must_use]
    pub fn new(key_fn: KeyFn, height_fn: HeightFn) -> Self {
        Self {
            key_fn,
            height_fn,
            footer_fn: no_footer::<S>,
            _marker: PhantomData,
        }
    }
}

impl<T, Q: ?Sized, S, KeyFn, HeightFn, FooterFn> FnModel<T, Q, S, KeyFn, HeightFn, FooterFn> {
    /// Replaces the footer height function.
    ///
    /// It receives `(columns, column_width, gutter)`.
    #[must_use]
    pub fn with_footer<G>(self, footer_fn: G) -> FnModel<T, Q, S, KeyFn, HeightFn, G>
    where
        G: Fn(usize, S, S) -> S,
    {
        FnModel {
            key_fn: self.key_fn,
            height_fn: self.height_fn,
            footer_fn,
            _marker: PhantomData,
        }
    }
}

impl<T, Q, S, KeyFn, HeightFn, FooterFn> MasonryModel
    for FnModel<T, Q, S, KeyFn, HeightFn, FooterFn>
where
    Q: ?Sized + Hash + Eq + ToOwned,
    Q::Owned: Hash + Eq,
    S: Scalar,
    KeyFn: Fn(&T) -> Option<&Q>,
    HeightFn: Fn(&T, S) -> S,
    FooterFn: Fn(usize, S, S) -> S,
{
    type Item = T;
    type Key = Q;
    type Id = Q::Owned;
    type Scalar = S;

    fn item_key<'a>(&self, item: &'a T) -> Option<Cow<'a, Q>> {
        (self.key_fn)(item).map(Cow::Borrowed)
    }

    fn item_height(&self, item: &T, column_width: S) -> S {
        (self.height_fn)(item, column_width)
    }

    fn footer_height(&self, columns: usize, column_width: S, gutter: S) -> S {
        (self.footer_fn)(columns, column_width, gutter)
    }
}

impl<T, Q: ?Sized, S, KeyFn, HeightFn, FooterFn> fmt::Debug
    for FnModel<T, Q, S, KeyFn, HeightFn, FooterFn>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel").finish_non_exhaustive()
    }
}
