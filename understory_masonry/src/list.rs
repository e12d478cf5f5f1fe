// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host-side controller that owns the items and reacts to viewport events.

use alloc::vec::Vec;
use core::fmt;

use crate::{Coords, MasonryConfig, MasonryLayout, MasonryModel, Scalar};

/// Controller for a virtualized masonry list.
///
/// This type:
/// - owns the item sequence and a [`MasonryLayout`],
/// - turns container-measured and scroll events into full layouts and visible recomputes,
/// - keeps the indices of the currently visible items,
/// - exposes what a renderer needs: visible items with their boxes, the footer box,
///   and the height of the leading spacer that gives the scroll container its extent.
///
/// It does not render anything and does not know about scroll containers; host
/// frameworks forward their events here and draw the result.
///
/// ```rust
/// use core::num::NonZeroUsize;
/// use understory_masonry::{FnModel, MasonryConfig, MasonryList};
///
/// let heights = [100.0, 50.0, 80.0, 30.0];
/// let items: Vec<(usize, f64)> = heights.into_iter().enumerate().collect();
/// let model = FnModel::new(|item: &(usize, f64)| Some(&item.0), |item: &(usize, f64), _w: f64| item.1);
/// let config = MasonryConfig::new(NonZeroUsize::new(2).unwrap()).with_gutter(10.0);
/// let mut list = MasonryList::new(model, config, items);
///
/// // The scroll container reports its size.
/// list.on_container_measured(100.0, 210.0);
/// assert_eq!(list.visible_indices(), &[0, 1, 2]);
/// assert_eq!(list.spacer_height(), 160.0);
///
/// // The user scrolls down.
/// list.on_scroll(100.0, 100.0);
/// let tops: Vec<f64> = list.visible().map(|(_, coords)| coords.top).collect();
/// assert_eq!(tops, vec![10.0, 70.0, 120.0]);
/// ```
pub struct MasonryList<M: MasonryModel> {
    layout: MasonryLayout<M>,
    items: Vec<M::Item>,
    visible: Vec<usize>,
    scroll_offset: M::Scalar,
    viewport_height: M::Scalar,
    viewport_width: M::Scalar,
}

impl<M: MasonryModel> MasonryList<M> {
    /// Creates an unmeasured list over `items`. Nothing is visible until the first
    /// [`on_container_measured`](Self::on_container_measured).
    #[must_use]
    pub fn new(model: M, config: MasonryConfig<M::Scalar>, items: Vec<M::Item>) -> Self {
        Self {
            layout: MasonryLayout::new(model, config),
            items,
            visible: Vec::new(),
            scroll_offset: M::Scalar::zero(),
            viewport_height: M::Scalar::zero(),
            viewport_width: M::Scalar::zero(),
        }
    }

    /// Handles the container reporting its size.
    ///
    /// Runs a full layout and computes visibility from the top of the content: any
    /// scroll position seen before the measurement is not taken into account.
    pub fn on_container_measured(&mut self, height: M::Scalar, width: M::Scalar) {
        self.viewport_height = height;
        self.viewport_width = width;
        self.scroll_offset = M::Scalar::zero();
        self.layout.full_layout_indices_into(
            &self.items,
            M::Scalar::zero(),
            height,
            width,
            &mut self.visible,
        );
    }

    /// Handles a scroll position change. Only the visible set is recomputed.
    pub fn on_scroll(&mut self, content_offset_y: M::Scalar, viewport_height: M::Scalar) {
        self.scroll_offset = content_offset_y;
        self.viewport_height = viewport_height;
        self.refresh_visible();
    }

    /// Replaces the items without running a layout.
    ///
    /// Items that were not placed by the last full layout stay invisible until
    /// the next [`on_container_measured`](Self::on_container_measured) or
    /// [`relayout`](Self::relayout).
    pub fn set_items(&mut self, items: Vec<M::Item>) {
        self.items = items;
        self.refresh_visible();
    }

    /// Runs a full layout with the last measured geometry and current scroll offset.
    ///
    /// Does nothing before the container has been measured.
    pub fn relayout(&mut self) {
        if !self.layout.is_laid_out() {
            return;
        }
        self.layout.full_layout_indices_into(
            &self.items,
            self.scroll_offset,
            self.viewport_height,
            self.viewport_width,
            &mut self.visible,
        );
    }

    fn refresh_visible(&mut self) {
        self.layout.visible_indices_into(
            &self.items,
            self.scroll_offset,
            self.viewport_height,
            &mut self.visible,
        );
    }

    /// Visible items and their boxes, in input order.
    pub fn visible(&self) -> impl Iterator<Item = (&M::Item, Coords<M::Scalar>)> + '_ {
        self.visible.iter().filter_map(|&index| {
            let item = self.items.get(index)?;
            Some((item, self.layout.coords_of(item)?))
        })
    }

    /// Indices into [`items`](Self::items) of the visible items.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Footer box, if the last full layout placed one.
    #[must_use]
    pub fn footer(&self) -> Option<Coords<M::Scalar>> {
        self.layout.footer_coords()
    }

    /// Height of the leading spacer that sizes the scrollable content.
    #[must_use]
    pub const fn spacer_height(&self) -> M::Scalar {
        self.layout.total_content_height()
    }

    /// Total content height; the same value as [`spacer_height`](Self::spacer_height).
    #[must_use]
    pub const fn total_content_height(&self) -> M::Scalar {
        self.layout.total_content_height()
    }

    /// The items, in placement order.
    #[must_use]
    pub fn items(&self) -> &[M::Item] {
        &self.items
    }

    /// The underlying layout engine.
    #[must_use]
    pub const fn layout(&self) -> &MasonryLayout<M> {
        &self.layout
    }

    /// Last scroll offset reported by the host.
    #[must_use]
    pub const fn scroll_offset(&self) -> M::Scalar {
        self.scroll_offset
    }

    /// Last viewport height reported by the host.
    #[must_use]
    pub const fn viewport_height(&self) -> M::Scalar {
        self.viewport_height
    }

    /// Last viewport width reported by the host.
    #[must_use]
    pub const fn viewport_width(&self) -> M::Scalar {
        self.viewport_width
    }
}

impl<M: MasonryModel> fmt::Debug for MasonryList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasonryList")
            .field("layout", &self.layout)
            .field("len", &self.items.len())
            .field("visible", &self.visible)
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_height", &self.viewport_height)
            .field("viewport_width", &self.viewport_width)
            .finish_non_exhaustive()
    }
}
