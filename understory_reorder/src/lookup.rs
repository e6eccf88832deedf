// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seam: which items play which role, and where they are on screen.
//!
//! The engine never walks a visual tree. Ordered sequences ("movables",
//! "selectables", "drop targets") are the layout's traversal order filtered by
//! the predicates below, so they follow the layout as it is reordered.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::layout::Layout;
use crate::model::Model;
use crate::permissions::{ItemSets, Permissions};
use crate::types::ItemId;

/// Element roles and geometry supplied by the host toolkit.
pub trait ElementLookup<K> {
    /// World-space bounds of an item or column, if it is laid out.
    fn bounds(&self, id: &K) -> Option<Rect>;

    /// Can `id` start a move? Defaults to every item.
    fn is_movable(&self, id: &K) -> bool {
        let _ = id;
        true
    }

    /// Can `id` take keyboard focus? Defaults to every item.
    fn is_selectable(&self, id: &K) -> bool {
        let _ = id;
        true
    }

    /// Can `id` receive a dropped item? Defaults to the movables.
    fn is_drop_target(&self, id: &K) -> bool {
        self.is_movable(id)
    }

    /// The layout or permission matrix just changed. Lookups that derive
    /// roles from the matrix rebuild them here; the default does nothing.
    fn model_changed(&mut self, layout: &Layout<K>, permissions: &Permissions) {
        let _ = (layout, permissions);
    }
}

impl<K, T: ElementLookup<K> + ?Sized> ElementLookup<K> for &T {
    fn bounds(&self, id: &K) -> Option<Rect> {
        (**self).bounds(id)
    }

    fn is_movable(&self, id: &K) -> bool {
        (**self).is_movable(id)
    }

    fn is_selectable(&self, id: &K) -> bool {
        (**self).is_selectable(id)
    }

    fn is_drop_target(&self, id: &K) -> bool {
        (**self).is_drop_target(id)
    }

    // A shared borrow cannot rebuild anything; `model_changed` stays a no-op.
}

/// A fixed bounds table plus a set of locked (immovable) ids.
///
/// Suits tests, demos, and hosts that recompute geometry wholesale after each
/// layout pass. Bounds lookups are logarithmic; the locked set is a plain
/// list, sized for a handful of pinned items.
#[derive(Clone, Debug)]
pub struct StaticElements<K> {
    bounds: BTreeMap<K, Rect>,
    locked: Vec<K>,
}

impl<K: Ord> Default for StaticElements<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> StaticElements<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            bounds: BTreeMap::new(),
            locked: Vec::new(),
        }
    }

    /// Record or replace the bounds of `id`.
    pub fn set_bounds(&mut self, id: K, rect: Rect) {
        self.bounds.insert(id, rect);
    }

    /// Builder form of [`StaticElements::set_bounds`].
    #[must_use]
    pub fn with_bounds(mut self, id: K, rect: Rect) -> Self {
        self.set_bounds(id, rect);
        self
    }

    /// Mark `id` as locked: selectable, but neither movable nor a drop target.
    pub fn lock(&mut self, id: K) {
        if !self.locked.contains(&id) {
            self.locked.push(id);
        }
    }

    /// Builder form of [`StaticElements::lock`].
    #[must_use]
    pub fn with_locked(mut self, id: K) -> Self {
        self.lock(id);
        self
    }

    /// Ids marked locked.
    pub fn locked(&self) -> &[K] {
        &self.locked
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.bounds.clear();
        self.locked.clear();
    }
}

impl<K: Ord> ElementLookup<K> for StaticElements<K> {
    fn bounds(&self, id: &K) -> Option<Rect> {
        self.bounds.get(id).copied()
    }

    fn is_movable(&self, id: &K) -> bool {
        !self.locked.contains(id)
    }
}

/// Roles read from an [`ItemSets`], geometry from an inner lookup.
///
/// For hosts whose permission matrix comes from elsewhere (a server, say):
/// items the matrix never lets move are not movable, and items no row lets
/// anything land next to are not drop targets. The inner lookup can narrow
/// the roles further. The sets are rebuilt from the model after every change
/// the [`Reorderer`](crate::interaction::Reorderer) makes.
///
/// ```
/// use understory_reorder::layout::Layout;
/// use understory_reorder::lookup::{ElementLookup, InferredElements, StaticElements};
/// use understory_reorder::model::Model;
/// use understory_reorder::permissions::Permissions;
///
/// let layout = Layout::single_column("list", "col", ["pinned", "free"]).unwrap();
/// let rows = vec![vec![false; 3], vec![false, true, true]];
/// let model = Model::with_permissions(layout, Permissions::from_rows(rows).unwrap()).unwrap();
/// let lookup = InferredElements::from_model(&model, StaticElements::<&str>::new());
///
/// assert!(!lookup.is_movable(&"pinned"));
/// assert!(lookup.is_movable(&"free"));
/// ```
#[derive(Clone, Debug)]
pub struct InferredElements<K, L> {
    sets: ItemSets<K>,
    inner: L,
}

impl<K: ItemId, L: ElementLookup<K>> InferredElements<K, L> {
    /// Use precomputed sets, e.g. [`ItemSets::from_locked`].
    pub fn new(sets: ItemSets<K>, inner: L) -> Self {
        Self { sets, inner }
    }

    /// Infer the sets from a model's layout and permission matrix.
    pub fn from_model(model: &Model<K>, inner: L) -> Self {
        Self::new(ItemSets::infer(model.layout(), model.permissions()), inner)
    }

    /// The current role sets.
    pub fn sets(&self) -> &ItemSets<K> {
        &self.sets
    }

    /// The wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Mutable access to the wrapped lookup, e.g. to update bounds.
    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }
}

impl<K: ItemId, L: ElementLookup<K>> ElementLookup<K> for InferredElements<K, L> {
    fn bounds(&self, id: &K) -> Option<Rect> {
        self.inner.bounds(id)
    }

    fn is_movable(&self, id: &K) -> bool {
        self.sets.movables.contains(id) && self.inner.is_movable(id)
    }

    fn is_selectable(&self, id: &K) -> bool {
        self.sets.selectables.contains(id) && self.inner.is_selectable(id)
    }

    fn is_drop_target(&self, id: &K) -> bool {
        self.sets.drop_targets.contains(id) && self.inner.is_drop_target(id)
    }

    fn model_changed(&mut self, layout: &Layout<K>, permissions: &Permissions) {
        self.sets = ItemSets::infer(layout, permissions);
        self.inner.model_changed(layout, permissions);
    }
}
