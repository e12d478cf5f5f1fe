// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_masonry --heading-base-level=0

//! Understory Masonry: column-packed layout and virtualization for variable-height items.
//!
//! This crate lays out a sequence of items into a fixed number of equal-width columns,
//! placing each item under the currently shortest column, and reports which items
//! intersect a scrolling viewport so hosts only realize those. It is renderer-agnostic
//! and intended to be shared across UI stacks.
//!
//! The core concepts are:
//!
//! - [`MasonryModel`]: how the layout reads host items: a borrowed key for lookups, an
//!   owned id for the cache, a height for a given column width, and an optional footer
//!   height. [`FnModel`] builds one from closures.
//! - [`MasonryConfig`]: column count, gutter, and scroll buffer multiplier, fixed for
//!   the lifetime of a layout.
//! - [`MasonryLayout`]: the engine. A full layout places every item and caches its
//!   [`Coords`] by id; a visible recompute filters items against a [`BufferWindow`]
//!   using only that cache and is cheap enough to run on every scroll tick.
//! - [`MasonryList`]: a small controller that owns the items and a layout and maps
//!   container-measured and scroll events onto the two passes.
//!
//! Hosts remain responsible for:
//!
//! - Owning and drawing the item views.
//! - Forwarding container size changes to [`MasonryList::on_container_measured`] and
//!   scroll changes to [`MasonryList::on_scroll`].
//! - Sizing a leading spacer to [`MasonryList::spacer_height`] so the scroll container
//!   has the right extent, then positioning each visible item at its [`Coords`].
//!
//! ## Layout rules
//!
//! With `n` columns and gutter `g` in a container `w` wide, every column is
//! `(w - g * (n + 1)) / n` wide. Items are visited in input order. Each one goes into
//! the shortest column (lowest index on ties), `g` below that column's current bottom.
//! Items without an id are skipped. After the last item each column gets one trailing
//! gutter; a footer with positive height is then placed across the full width below the
//! tallest column and extends the content by its height plus one gutter.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use understory_masonry::{FnModel, MasonryConfig, MasonryLayout};
//!
//! let heights = [100.0, 50.0, 80.0, 30.0];
//! let model = FnModel::new(|i: &usize| Some(i), |i: &usize, _width: f64| heights[*i]);
//! let config = MasonryConfig::new(NonZeroUsize::new(2).unwrap()).with_gutter(10.0);
//! let mut layout = MasonryLayout::new(model, config);
//!
//! let items: Vec<usize> = (0..heights.len()).collect();
//! let visible = layout.compute_full_layout(&items, 0.0, 100.0, 210.0);
//! assert_eq!(visible, vec![&0, &1, &2]);
//!
//! let third = layout.coords(&2_usize).unwrap();
//! assert_eq!((third.top, third.left, third.width), (70.0, 110.0, 90.0));
//!
//! // Scrolling only filters the cached boxes.
//! let visible = layout.compute_visible_items(&items, 100.0, 100.0);
//! assert_eq!(visible, vec![&0, &2, &3]);
//! ```
//!
//! All extents and offsets live in one caller-chosen coordinate space (typically
//! logical pixels) and are expected to be finite.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `kurbo/std`.
//! - `libm`: enables `kurbo/libm` for `no_std` targets.
//! - `serde`: derives `Serialize`/`Deserialize` for [`MasonryConfig`] and [`Coords`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod columns;
mod config;
mod coords;
mod layout;
mod list;
mod model;
mod scalar;
mod window;

pub use columns::ColumnHeights;
pub use config::{DEFAULT_GUTTER, MasonryConfig};
pub use coords::{Coords, CoordsCache};
pub use layout::{LayoutState, MasonryLayout};
pub use list::MasonryList;
pub use model::{FnModel, MasonryModel};
pub use scalar::Scalar;
pub use window::BufferWindow;
