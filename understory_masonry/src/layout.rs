// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The masonry layout engine: column packing, coordinate caching, and visibility.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use crate::{
    BufferWindow, ColumnHeights, Coords, CoordsCache, MasonryConfig, MasonryModel, Scalar,
};

/// Whether a [`MasonryLayout`] has coordinates yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No full layout has run; the container geometry is not known yet.
    Unmeasured,
    /// Coordinates and content height from the most recent full layout are available.
    LaidOut,
}

/// Packs items into equal-width columns and answers which of them are visible.
///
/// Two passes drive the engine:
///
/// - [`compute_full_layout`](Self::compute_full_layout) runs when the container
///   geometry is known or changes. Each item goes into the currently shortest column
///   (lowest index on ties), in input order, and its box is cached by id. The
///   previous cache, column heights, and content height are replaced wholesale.
/// - [`compute_visible_items`](Self::compute_visible_items) runs on every scroll
///   change. It only reads the cache; items that were not placed by the last full
///   layout are skipped rather than measured.
///
/// The engine holds no references to items between calls. Hosts keep the item
/// sequence and pass it to both passes.
pub struct MasonryLayout<M: MasonryModel> {
    model: M,
    config: MasonryConfig<M::Scalar>,
    state: LayoutState,
    column_width: M::Scalar,
    columns: ColumnHeights<M::Scalar>,
    cache: CoordsCache<M::Id, M::Scalar>,
    total_height: M::Scalar,
}

impl<M: MasonryModel> MasonryLayout<M> {
    /// Creates an unmeasured layout.
    #[must_use]
    pub fn new(model: M, config: MasonryConfig<M::Scalar>) -> Self {
        Self {
            model,
            config,
            state: LayoutState::Unmeasured,
            column_width: M::Scalar::zero(),
            columns: ColumnHeights::default(),
            cache: CoordsCache::default(),
            total_height: M::Scalar::zero(),
        }
    }

    /// Returns a shared reference to the item model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MasonryConfig<M::Scalar> {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> LayoutState {
        self.state
    }

    /// Returns `true` once a full layout has run.
    #[must_use]
    pub const fn is_laid_out(&self) -> bool {
        matches!(self.state, LayoutState::LaidOut)
    }

    /// Runs a full layout and returns the items visible at `scroll_offset`, in input order.
    ///
    /// Items whose id is `None` are skipped and never placed.
    pub fn compute_full_layout<'a>(
        &mut self,
        items: &'a [M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
        viewport_width: M::Scalar,
    ) -> Vec<&'a M::Item> {
        let mut visible = Vec::new();
        self.full_layout_with(
            items,
            scroll_offset,
            viewport_height,
            viewport_width,
            |index| visible.push(&items[index]),
        );
        visible
    }

    /// Like [`compute_full_layout`](Self::compute_full_layout), but writes the indices
    /// of visible items into `out` (cleared first).
    pub fn full_layout_indices_into(
        &mut self,
        items: &[M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
        viewport_width: M::Scalar,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        self.full_layout_with(
            items,
            scroll_offset,
            viewport_height,
            viewport_width,
            |index| out.push(index),
        );
    }

    fn full_layout_with(
        &mut self,
        items: &[M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
        viewport_width: M::Scalar,
        mut on_visible: impl FnMut(usize),
    ) {
        let gutter = self.config.gutter();
        let column_count = self.config.columns();
        let column_width = self.config.column_width(viewport_width);
        debug_assert!(
            column_width.is_finite(),
            "MasonryLayout column width must be finite; got {column_width:?}"
        );
        let window = BufferWindow::new(
            scroll_offset,
            viewport_height,
            self.config.buffer_multiplier(),
        );

        let mut columns = ColumnHeights::zeroed(column_count);
        let mut cache = CoordsCache::with_capacity(items.len());
        let mut visible_count = 0_usize;

        for (index, item) in items.iter().enumerate() {
            let Some(id) = self.model.item_id(item) else {
                log::trace!("masonry: item {index} has no id, leaving it out of the layout");
                continue;
            };
            // `columns` always has at least one entry.
            let (column, column_height) = columns.shortest().unwrap_or((0, M::Scalar::zero()));
            let height = self.model.item_height(item, column_width);
            let top = column_height + gutter;
            let coords = Coords {
                top,
                left: self.config.column_left(column, column_width),
                width: column_width,
                height,
            };
            if window.contains(top, height) {
                visible_count += 1;
                on_visible(index);
            }
            cache.insert(id, coords);
            columns.set(column, top + height);
        }

        columns.pad_all(gutter);
        self.column_width = column_width;
        self.columns = columns;

        let footer_height = self.model.footer_height(column_count, column_width, gutter);
        let mut total_height = self.total_column_height();
        if footer_height > M::Scalar::zero() {
            cache.set_footer(Coords {
                top: total_height,
                left: gutter,
                width: viewport_width - gutter - gutter,
                height: footer_height,
            });
            total_height = total_height + footer_height + gutter;
        }

        log::debug!(
            "masonry: laid out {} of {} items in {column_count} columns of width {column_width:?}; content height {total_height:?}, {visible_count} visible",
            cache.len(),
            items.len(),
        );

        self.cache = cache;
        self.total_height = total_height;
        self.state = LayoutState::LaidOut;
    }

    /// Returns the items visible at `scroll_offset`, in input order, using only the
    /// coordinates cached by the last full layout.
    ///
    /// Items without cached coordinates are skipped. Nothing is mutated, and items
    /// are looked up through [`MasonryModel::item_key`] so no ids are allocated.
    #[must_use]
    pub fn compute_visible_items<'a>(
        &self,
        items: &'a [M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
    ) -> Vec<&'a M::Item> {
        let mut visible = Vec::new();
        self.visible_with(items, scroll_offset, viewport_height, |index| {
            visible.push(&items[index]);
        });
        visible
    }

    /// Like [`compute_visible_items`](Self::compute_visible_items), but writes the
    /// indices of visible items into `out` (cleared first) so hosts can reuse one
    /// buffer across scroll events.
    pub fn visible_indices_into(
        &self,
        items: &[M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        self.visible_with(items, scroll_offset, viewport_height, |index| {
            out.push(index);
        });
    }

    fn visible_with(
        &self,
        items: &[M::Item],
        scroll_offset: M::Scalar,
        viewport_height: M::Scalar,
        mut on_visible: impl FnMut(usize),
    ) {
        let window = BufferWindow::new(
            scroll_offset,
            viewport_height,
            self.config.buffer_multiplier(),
        );
        log::trace!(
            "masonry: visible window {:?}..{:?} over {} items",
            window.top,
            window.bottom,
            items.len()
        );
        for (index, item) in items.iter().enumerate() {
            let Some(key) = self.model.item_key(item) else {
                continue;
            };
            let Some(coords) = self.cache.get(&*key) else {
                continue;
            };
            if window.contains(coords.top, coords.height) {
                on_visible(index);
            }
        }
    }

    /// Cached coordinates of the item with id `id`.
    #[must_use]
    pub fn coords<Q>(&self, id: &Q) -> Option<Coords<M::Scalar>>
    where
        M::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.get(id).copied()
    }

    /// Cached coordinates of `item`, resolved through its id.
    #[must_use]
    pub fn coords_of(&self, item: &M::Item) -> Option<Coords<M::Scalar>> {
        let key = self.model.item_key(item)?;
        self.cache.get(&*key).copied()
    }

    /// Coordinates of the footer, if the last full layout placed one.
    #[must_use]
    pub fn footer_coords(&self) -> Option<Coords<M::Scalar>> {
        self.cache.footer().copied()
    }

    /// The coordinate cache from the last full layout.
    #[must_use]
    pub const fn cache(&self) -> &CoordsCache<M::Id, M::Scalar> {
        &self.cache
    }

    /// Width of every column in the last full layout.
    #[must_use]
    pub const fn column_width(&self) -> M::Scalar {
        self.column_width
    }

    /// Final column heights from the last full layout, each including one trailing gutter.
    #[must_use]
    pub fn column_heights(&self) -> &[M::Scalar] {
        self.columns.as_slice()
    }

    /// Height of the tallest column, excluding the footer.
    #[must_use]
    pub fn total_column_height(&self) -> M::Scalar {
        self.columns.tallest()
    }

    /// Full scrollable content height: the tallest column plus, when present,
    /// the footer and one gutter.
    #[must_use]
    pub const fn total_content_height(&self) -> M::Scalar {
        self.total_height
    }
}

impl<M: MasonryModel> fmt::Debug for MasonryLayout<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasonryLayout")
            .field("state", &self.state)
            .field("column_width", &self.column_width)
            .field("columns", &self.columns)
            .field("placed", &self.cache.len())
            .field("footer", &self.cache.footer())
            .field("total_height", &self.total_height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::borrow::Cow;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::num::NonZeroUsize;

    use super::{LayoutState, MasonryLayout};
    use crate::{Coords, FnModel, MasonryConfig, MasonryModel};

    #[derive(Debug, Clone, PartialEq)]
    struct Tile {
        id: Option<&'static str>,
        height: f64,
    }

    fn tile(id: &'static str, height: f64) -> Tile {
        Tile {
            id: Some(id),
            height,
        }
    }

    fn config(columns: usize, gutter: f64) -> MasonryConfig<f64> {
        MasonryConfig::new(NonZeroUsize::new(columns).unwrap()).with_gutter(gutter)
    }

    fn layout(
        columns: usize,
        gutter: f64,
        footer: f64,
    ) -> MasonryLayout<impl MasonryModel<Item = Tile, Key = str, Id = String, Scalar = f64>> {
        let model = FnModel::new(|t: &Tile| t.id, |t: &Tile, _width: f64| t.height)
            .with_footer(move |_, _, _| footer);
        MasonryLayout::new(model, config(columns, gutter))
    }

    fn sample() -> Vec<Tile> {
        vec![
            tile("a", 100.0),
            tile("b", 50.0),
            tile("c", 80.0),
            tile("d", 30.0),
        ]
    }

    fn ids(visible: &[&Tile]) -> Vec<&'static str> {
        visible.iter().filter_map(|t| t.id).collect()
    }

    #[test]
    fn starts_unmeasured() {
        let engine = layout(2, 10.0, 0.0);
        assert_eq!(engine.state(), LayoutState::Unmeasured);
        assert!(!engine.is_laid_out());
        assert_eq!(engine.coords("a"), None);
        assert_eq!(engine.total_content_height(), 0.0);
        assert_eq!(engine.total_column_height(), 0.0);
    }

    #[test]
    fn packs_into_shortest_column() {
        let items = sample();
        let mut engine = layout(2, 10.0, 0.0);
        let visible = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);

        assert_eq!(engine.state(), LayoutState::LaidOut);
        assert_eq!(engine.column_width(), 90.0);
        let expect = |top, left, height| Coords {
            top,
            left,
            width: 90.0,
            height,
        };
        assert_eq!(engine.coords("a"), Some(expect(10.0, 10.0, 100.0)));
        assert_eq!(engine.coords("b"), Some(expect(10.0, 110.0, 50.0)));
        assert_eq!(engine.coords("c"), Some(expect(70.0, 110.0, 80.0)));
        assert_eq!(engine.coords("d"), Some(expect(120.0, 10.0, 30.0)));

        // Each column carries one trailing gutter.
        assert_eq!(engine.column_heights(), &[160.0, 160.0]);
        assert_eq!(engine.total_column_height(), 160.0);
        assert_eq!(engine.total_content_height(), 160.0);
        assert_eq!(engine.footer_coords(), None);

        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_resolve_to_lowest_column() {
        let items = vec![tile("a", 40.0), tile("b", 40.0), tile("c", 40.0), tile("d", 40.0)];
        let mut engine = layout(3, 0.0, 0.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 300.0);
        let lefts: Vec<f64> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| engine.coords(*id).unwrap().left)
            .collect();
        assert_eq!(lefts, vec![0.0, 100.0, 200.0, 0.0]);
        assert_eq!(engine.coords("d").unwrap().top, 40.0);
    }

    #[test]
    fn footer_spans_content_below_tallest_column() {
        let items = sample();
        let mut engine = layout(2, 10.0, 100.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);
        assert_eq!(
            engine.footer_coords(),
            Some(Coords {
                top: 160.0,
                left: 10.0,
                width: 190.0,
                height: 100.0,
            })
        );
        assert_eq!(engine.total_column_height(), 160.0);
        assert_eq!(engine.total_content_height(), 270.0);
    }

    #[test]
    fn non_positive_footer_is_not_placed() {
        for footer in [0.0, -5.0] {
            let items = sample();
            let mut engine = layout(2, 10.0, footer);
            let _ = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);
            assert_eq!(engine.footer_coords(), None);
            assert_eq!(engine.total_content_height(), 160.0);
        }
    }

    #[test]
    fn unidentified_items_are_left_out() {
        let items = vec![
            tile("a", 100.0),
            Tile {
                id: None,
                height: 500.0,
            },
            tile("b", 50.0),
        ];
        let mut engine = layout(2, 10.0, 0.0);
        let visible = engine.compute_full_layout(&items, 0.0, 1000.0, 210.0);
        assert_eq!(ids(&visible), vec!["a", "b"]);
        assert_eq!(visible.len(), 2);
        assert_eq!(engine.cache().len(), 2);
        // The skipped item does not occupy a column.
        assert_eq!(engine.coords("b").unwrap().top, 10.0);

        let visible = engine.compute_visible_items(&items, 0.0, 1000.0);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn visible_recompute_tracks_scroll() {
        let items = sample();
        let mut engine = layout(2, 10.0, 0.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);

        let visible = engine.compute_visible_items(&items, 100.0, 100.0);
        assert_eq!(ids(&visible), vec!["a", "c", "d"]);

        let visible = engine.compute_visible_items(&items, 200.0, 100.0);
        assert!(visible.is_empty());
    }

    #[test]
    fn buffer_multiplier_realizes_off_screen_items() {
        let items = sample();
        let model = FnModel::new(|t: &Tile| t.id, |t: &Tile, _width: f64| t.height);
        let mut engine = MasonryLayout::new(model, config(2, 10.0).with_buffer_multiplier(1.0));
        let visible = engine.compute_full_layout(&items, 0.0, 50.0, 210.0);
        // Window is -50..100 so "d" (top 120) is still out.
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
        let visible = engine.compute_visible_items(&items, 160.0, 50.0);
        // Window is 110..260; "a" and "b" end at or above 110.
        assert_eq!(ids(&visible), vec!["c", "d"]);
    }

    #[test]
    fn items_added_after_layout_stay_invisible() {
        let mut items = sample();
        let mut engine = layout(2, 10.0, 0.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);

        items.insert(0, tile("new", 10.0));
        let visible = engine.compute_visible_items(&items, 0.0, 100.0);
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
        assert_eq!(engine.coords("new"), None);
    }

    #[test]
    fn full_layout_replaces_previous_state() {
        let items = sample();
        let mut engine = layout(2, 10.0, 0.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 210.0);

        let fewer = vec![tile("a", 100.0)];
        let _ = engine.compute_full_layout(&fewer, 0.0, 100.0, 410.0);
        assert_eq!(engine.column_width(), 190.0);
        assert_eq!(engine.coords("a").unwrap().width, 190.0);
        assert_eq!(engine.coords("b"), None);
        assert_eq!(engine.column_heights(), &[120.0, 10.0]);
    }

    #[test]
    fn repeated_layouts_are_identical() {
        let items = sample();
        let mut engine = layout(3, 12.0, 40.0);
        let first = engine.compute_full_layout(&items, 30.0, 100.0, 480.0);
        let first_coords: Vec<_> = items.iter().map(|t| engine.coords_of(t)).collect();
        let first_total = engine.total_content_height();
        let second = engine.compute_full_layout(&items, 30.0, 100.0, 480.0);
        let second_coords: Vec<_> = items.iter().map(|t| engine.coords_of(t)).collect();
        assert_eq!(first, second);
        assert_eq!(first_coords, second_coords);
        assert_eq!(first_total, engine.total_content_height());
    }

    #[test]
    fn negative_heights_are_used_as_is() {
        let items = vec![tile("a", -20.0), tile("b", 30.0)];
        let mut engine = layout(1, 10.0, 0.0);
        let _ = engine.compute_full_layout(&items, 0.0, 100.0, 100.0);
        assert_eq!(engine.coords("a").unwrap().height, -20.0);
        // Column bottom after "a" is 10 - 20 = -10, so "b" starts at 0.
        assert_eq!(engine.coords("b").unwrap().top, 0.0);
    }

    #[test]
    fn index_variants_match_item_variants() {
        let items = sample();
        let mut engine = layout(2, 10.0, 0.0);
        let mut out = vec![99];
        engine.full_layout_indices_into(&items, 0.0, 100.0, 210.0, &mut out);
        assert_eq!(out, vec![0, 1, 2]);
        engine.visible_indices_into(&items, 100.0, 100.0, &mut out);
        assert_eq!(out, vec![0, 2, 3]);
    }

    /// Owns `String` ids and counts how often an owned id is produced.
    struct CountingModel {
        owned_ids: Cell<usize>,
    }

    impl MasonryModel for CountingModel {
        type Item = (String, f64);
        type Key = str;
        type Id = String;
        type Scalar = f64;

        fn item_key<'a>(&self, item: &'a (String, f64)) -> Option<Cow<'a, str>> {
            Some(Cow::Borrowed(item.0.as_str()))
        }

        fn item_id(&self, item: &(String, f64)) -> Option<String> {
            self.owned_ids.set(self.owned_ids.get() + 1);
            Some(item.0.clone())
        }

        fn item_height(&self, item: &(String, f64), _column_width: f64) -> f64 {
            item.1
        }
    }

    #[test]
    fn scrolling_looks_up_borrowed_keys_only() {
        let items: Vec<(String, f64)> = (0..50)
            .map(|i| (alloc::format!("tile-{i}"), 40.0))
            .collect();
        let model = CountingModel {
            owned_ids: Cell::new(0),
        };
        let mut engine = MasonryLayout::new(model, config(2, 10.0));
        let _ = engine.compute_full_layout(&items, 0.0, 400.0, 210.0);
        assert_eq!(engine.model().owned_ids.get(), items.len());

        let mut out = Vec::new();
        for step in 0..10 {
            let scroll = f64::from(step) * 50.0;
            let _ = engine.compute_visible_items(&items, scroll, 400.0);
            engine.visible_indices_into(&items, scroll, 400.0, &mut out);
            assert!(!out.is_empty());
        }
        assert!(engine.coords_of(&items[3]).is_some());
        assert_eq!(engine.coords("tile-3"), engine.coords_of(&items[3]));
        assert_eq!(engine.model().owned_ids.get(), items.len());
    }
}
