// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The authoritative layout: a container of ordered columns of item ids.
//!
//! ## Invariants
//!
//! - Every item id appears exactly once across all columns.
//! - Column ids, item ids, and the container id are pairwise distinct.
//! - Column order and in-column order are the display order.
//!
//! Every constructor validates these, and [`Layout::move_item`] preserves them.
//!
//! ## Indices used by the permission matrix
//!
//! Items are numbered in traversal order (column by column, top to bottom);
//! that number is an item's [ordinal](Layout::item_ordinal). Gaps are numbered
//! the same way, with one extra gap closing each column, so a layout with `n`
//! items and `c` columns has `n + c` gaps. The gap after an item and the gap
//! before its successor are the same gap.
//!
//! ```
//! use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
//! use understory_reorder::types::Position;
//!
//! let mut layout = Layout::from_description(LayoutDescription {
//!     id: "page",
//!     columns: vec![
//!         ColumnDescription { id: "left", children: vec!["a", "b"] },
//!         ColumnDescription { id: "right", children: vec!["c"] },
//!     ],
//! })
//! .unwrap();
//!
//! assert_eq!(layout.gap_count(), 5);
//! assert_eq!(layout.gap_index(&"c", Position::Before), Some(3));
//!
//! assert!(layout.move_item(&"a", &"c", Position::After));
//! assert_eq!(layout.to_description().columns[1].children, vec!["c", "a"]);
//! ```

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::types::{ItemId, Position};

/// Serializable id description of a column.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription<K> {
    /// Column id.
    pub id: K,
    /// Item ids, top to bottom.
    pub children: Vec<K>,
}

/// Serializable id description of a whole layout.
///
/// Serializes as `{ "id": .., "columns": [ { "id": .., "children": [..] }, .. ] }`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescription<K> {
    /// Container id.
    pub id: K,
    /// Columns, left to right.
    pub columns: Vec<ColumnDescription<K>>,
}

/// Where an item sits in a [`Layout`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemLocation {
    /// Index of the column.
    pub column: usize,
    /// Index within that column.
    pub index: usize,
}

/// One column of a [`Layout`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column<K> {
    id: K,
    items: Vec<K>,
}

impl<K> Column<K> {
    /// Column id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Items, top to bottom.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the column holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Container of ordered columns of ordered item ids.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout<K> {
    id: K,
    columns: Vec<Column<K>>,
}

impl<K: ItemId> Layout<K> {
    /// Build a layout from an id description.
    ///
    /// Fails when an id is duplicated or reused across roles. Ids are only
    /// required to be comparable for equality, so the check is quadratic in
    /// the number of ids; that is fine for on-screen lists and dashboards.
    pub fn from_description(desc: LayoutDescription<K>) -> Result<Self, LayoutError<K>> {
        let layout = Self {
            id: desc.id,
            columns: desc
                .columns
                .into_iter()
                .map(|c| Column {
                    id: c.id,
                    items: c.children,
                })
                .collect(),
        };
        if let Err(err) = layout.validate() {
            tracing::warn!(message = "reorder.layout_rejected", error = ?err);
            return Err(err);
        }
        Ok(layout)
    }

    /// Build a one-column layout, the shape used by list and grid reordering.
    pub fn single_column(
        container: K,
        column: K,
        items: impl IntoIterator<Item = K>,
    ) -> Result<Self, LayoutError<K>> {
        Self::from_description(LayoutDescription {
            id: container,
            columns: alloc::vec![ColumnDescription {
                id: column,
                children: items.into_iter().collect(),
            }],
        })
    }

    /// Infer a layout from a container, its columns, and a flat item list.
    ///
    /// `contains(column, item)` answers whether `item` is visually inside
    /// `column`. Each item goes to the first column that claims it, keeping its
    /// relative order; unclaimed items are left out.
    pub fn from_flat<F>(
        container: K,
        columns: impl IntoIterator<Item = K>,
        items: &[K],
        contains: F,
    ) -> Result<Self, LayoutError<K>>
    where
        F: Fn(&K, &K) -> bool,
    {
        let column_ids: Vec<K> = columns.into_iter().collect();
        let mut buckets: Vec<Vec<K>> = column_ids.iter().map(|_| Vec::new()).collect();
        for item in items {
            if let Some(c) = column_ids.iter().position(|col| contains(col, item)) {
                buckets[c].push(item.clone());
            }
        }
        Self::from_description(LayoutDescription {
            id: container,
            columns: column_ids
                .into_iter()
                .zip(buckets)
                .map(|(id, children)| ColumnDescription { id, children })
                .collect(),
        })
    }

    fn validate(&self) -> Result<(), LayoutError<K>> {
        let mut items: Vec<&K> = Vec::with_capacity(self.item_count());
        for (c, column) in self.columns.iter().enumerate() {
            if column.id == self.id {
                return Err(LayoutError::ContainerReused(column.id.clone()));
            }
            if self.columns[..c].iter().any(|earlier| earlier.id == column.id) {
                return Err(LayoutError::DuplicateColumn(column.id.clone()));
            }
            for item in &column.items {
                if *item == self.id {
                    return Err(LayoutError::ContainerReused(item.clone()));
                }
                if items.contains(&item) {
                    return Err(LayoutError::DuplicateItem(item.clone()));
                }
                items.push(item);
            }
        }
        if let Some(column) = self
            .columns
            .iter()
            .find(|column| items.contains(&&column.id))
        {
            return Err(LayoutError::ColumnIsItem(column.id.clone()));
        }
        Ok(())
    }

    /// Serialize back to an id description. Total and order preserving.
    pub fn to_description(&self) -> LayoutDescription<K> {
        LayoutDescription {
            id: self.id.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnDescription {
                    id: c.id.clone(),
                    children: c.items.clone(),
                })
                .collect(),
        }
    }

    /// Container id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Columns, left to right.
    pub fn columns(&self) -> &[Column<K>] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of items across all columns.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Number of insertion gaps: one per item plus one closing each column.
    pub fn gap_count(&self) -> usize {
        self.item_count() + self.column_count()
    }

    /// All items in traversal order (column by column, top to bottom).
    pub fn items(&self) -> impl Iterator<Item = &K> + '_ {
        self.columns.iter().flat_map(|c| c.items.iter())
    }

    /// True when `item` is an item of this layout.
    pub fn contains(&self, item: &K) -> bool {
        self.locate(item).is_some()
    }

    /// Find the column and in-column index of `item`.
    pub fn locate(&self, item: &K) -> Option<ItemLocation> {
        self.columns.iter().enumerate().find_map(|(column, c)| {
            c.items
                .iter()
                .position(|i| i == item)
                .map(|index| ItemLocation { column, index })
        })
    }

    /// Index of the column named `column`.
    pub fn column_index(&self, column: &K) -> Option<usize> {
        self.columns.iter().position(|c| c.id == *column)
    }

    /// True when `id` names a column.
    pub fn is_column(&self, id: &K) -> bool {
        self.column_index(id).is_some()
    }

    /// Bottom item of the column named `column`.
    pub fn last_item_in_column(&self, column: &K) -> Option<&K> {
        let c = self.column_index(column)?;
        self.columns[c].items.last()
    }

    /// Item at a column/index pair, if both are in range.
    pub fn item_at(&self, column: usize, index: usize) -> Option<&K> {
        self.columns.get(column)?.items.get(index)
    }

    /// Traversal-order number of `item`: its row in the permission matrix.
    pub fn item_ordinal(&self, item: &K) -> Option<usize> {
        self.items().position(|i| i == item)
    }

    /// Gap named by `position` relative to the item `target`: its column in
    /// the permission matrix. Only `Before` and `After` name a gap.
    pub fn gap_index(&self, target: &K, position: Position) -> Option<usize> {
        let offset = position.gap_offset()?;
        let mut preceding = 0;
        for (c, column) in self.columns.iter().enumerate() {
            if let Some(index) = column.items.iter().position(|i| i == target) {
                return Some(preceding + c + index + offset);
            }
            preceding += column.len();
        }
        None
    }

    /// Move `item` relative to `target`.
    ///
    /// `Before`/`After` need `target` to be an item; `Inside` needs it to be a
    /// column and appends. Returns whether the layout changed: moving an item
    /// onto itself, naming unknown ids, passing a sentinel position, or asking
    /// for the spot the item already occupies all leave it untouched.
    pub fn move_item(&mut self, item: &K, target: &K, position: Position) -> bool {
        if item == target {
            return false;
        }
        let Some(from) = self.locate(item) else {
            return false;
        };
        let to = match position {
            Position::Inside => {
                let Some(column) = self.column_index(target) else {
                    return false;
                };
                let len = self.columns[column].len();
                // Removing from the same column shortens it by one first.
                let index = if column == from.column { len - 1 } else { len };
                ItemLocation { column, index }
            }
            Position::Before | Position::After => {
                let Some(anchor) = self.locate(target) else {
                    return false;
                };
                let mut index = anchor.index;
                // The anchor shifts up when the item leaves from above it.
                if anchor.column == from.column && from.index < anchor.index {
                    index -= 1;
                }
                if position == Position::After {
                    index += 1;
                }
                ItemLocation {
                    column: anchor.column,
                    index,
                }
            }
            Position::Disallowed | Position::UseLastKnown => return false,
        };
        if to == from {
            return false;
        }
        let moved = self.columns[from.column].items.remove(from.index);
        self.columns[to.column].items.insert(to.index, moved);
        true
    }

    /// Remove `item` from its column. Returns where it was.
    pub fn remove_item(&mut self, item: &K) -> Option<ItemLocation> {
        let loc = self.locate(item)?;
        self.columns[loc.column].items.remove(loc.index);
        Some(loc)
    }
}

impl<K: ItemId> TryFrom<LayoutDescription<K>> for Layout<K> {
    type Error = LayoutError<K>;

    fn try_from(desc: LayoutDescription<K>) -> Result<Self, Self::Error> {
        Self::from_description(desc)
    }
}

impl<K: ItemId> From<&Layout<K>> for LayoutDescription<K> {
    fn from(layout: &Layout<K>) -> Self {
        layout.to_description()
    }
}
