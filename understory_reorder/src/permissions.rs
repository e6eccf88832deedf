// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move legality: an item × gap table of booleans.
//!
//! ## Shape
//!
//! Row `i` belongs to the item with [ordinal](crate::layout::Layout::item_ordinal) `i`;
//! column `g` is the gap with [gap index](crate::layout::Layout::gap_index) `g`.
//! The matrix is a snapshot of one arrangement. Moves and additions make it
//! stale, so the owner rebuilds it (see [`Model`](crate::model::Model));
//! [`Permissions::remove_item`] follows a removal in place.
//! [`Permissions::check_dimensions`] detects a matrix of the wrong shape, and
//! lookups outside the table answer "not allowed".
//!
//! ## Locked items
//!
//! [`Permissions::for_locked_items`] pins locked items in place and keeps
//! anything from landing above a run of locked items at the top of a column.
//! That rule needs only two distinct rows, so rows are interned: every item
//! maps to one of a small set of shared rows. An explicit table from
//! [`Permissions::from_rows`] is interned the same way, so both forms answer
//! [`Permissions::can_move`] identically.
//!
//! ```
//! use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
//! use understory_reorder::permissions::Permissions;
//! use understory_reorder::types::Position;
//!
//! let layout = Layout::from_description(LayoutDescription {
//!     id: "portal",
//!     columns: vec![
//!         ColumnDescription { id: "col1", children: vec!["x", "y"] },
//!         ColumnDescription { id: "col2", children: vec!["z"] },
//!     ],
//! })
//! .unwrap();
//! let perms = Permissions::for_locked_items(&["x"], &layout);
//!
//! assert!(!perms.can_move(&layout, &"x", &"z", Position::Before));
//! assert!(!perms.can_move(&layout, &"y", &"x", Position::Before));
//! assert!(perms.can_move(&layout, &"y", &"z", Position::After));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::PermissionsError;
use crate::layout::Layout;
use crate::types::{ItemId, Position};

/// Item × gap legality table with interned rows.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Permissions {
    rows: Vec<Vec<bool>>,
    row_of_item: Vec<usize>,
    gaps: usize,
}

impl Permissions {
    /// Every item may move to every gap.
    pub fn unrestricted<K: ItemId>(layout: &Layout<K>) -> Self {
        let items = layout.item_count();
        let gaps = layout.gap_count();
        Self {
            rows: if items == 0 {
                Vec::new()
            } else {
                vec![vec![true; gaps]]
            },
            row_of_item: vec![0; items],
            gaps,
        }
    }

    /// Locked items never move, and nothing lands above a locked item that
    /// heads its column (or follows another locked item).
    ///
    /// With no locked items this is [`Permissions::unrestricted`].
    pub fn for_locked_items<K: ItemId>(locked: &[K], layout: &Layout<K>) -> Self {
        let is_locked = |id: &K| locked.contains(id);
        if !layout.items().any(is_locked) {
            return Self::unrestricted(layout);
        }

        const OPEN: usize = 0;
        const LOCKED: usize = 1;
        let gaps = layout.gap_count();
        let mut open = Vec::with_capacity(gaps);
        let mut row_of_item = Vec::with_capacity(layout.item_count());
        for column in layout.columns() {
            let mut prev: Option<&K> = None;
            for id in column.items() {
                let pinned = is_locked(id) && prev.is_none_or(is_locked);
                open.push(!pinned);
                row_of_item.push(if is_locked(id) { LOCKED } else { OPEN });
                prev = Some(id);
            }
            // The gap closing a column always accepts.
            open.push(true);
        }
        tracing::debug!(
            message = "reorder.permissions",
            kind = "locked",
            items = row_of_item.len(),
            locked = row_of_item.iter().filter(|&&r| r == LOCKED).count(),
            gaps
        );
        Self {
            rows: vec![open, vec![false; gaps]],
            row_of_item,
            gaps,
        }
    }

    /// Build from an explicit table, one row per item in traversal order.
    ///
    /// All rows must have the same length. Identical rows are shared.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, PermissionsError> {
        let gaps = rows.first().map_or(0, Vec::len);
        let mut distinct: Vec<Vec<bool>> = Vec::new();
        let mut row_of_item = Vec::with_capacity(rows.len());
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != gaps {
                return Err(PermissionsError::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: gaps,
                });
            }
            let slot = match distinct.iter().position(|d| *d == cells) {
                Some(slot) => slot,
                None => {
                    distinct.push(cells);
                    distinct.len() - 1
                }
            };
            row_of_item.push(slot);
        }
        Ok(Self {
            rows: distinct,
            row_of_item,
            gaps,
        })
    }

    /// Expand to one row per item.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.row_of_item
            .iter()
            .map(|&r| self.rows[r].clone())
            .collect()
    }

    /// Number of item rows.
    pub fn row_count(&self) -> usize {
        self.row_of_item.len()
    }

    /// Number of gaps per row.
    pub fn gap_count(&self) -> usize {
        self.gaps
    }

    /// Number of distinct rows actually stored.
    pub fn distinct_rows(&self) -> usize {
        self.rows.len()
    }

    /// The row for the item with the given ordinal.
    pub fn row(&self, item: usize) -> Option<&[bool]> {
        self.row_of_item.get(item).map(|&r| self.rows[r].as_slice())
    }

    /// Cell lookup; out-of-range indices are not allowed.
    pub fn get(&self, item: usize, gap: usize) -> bool {
        self.row(item)
            .and_then(|row| row.get(gap))
            .copied()
            .unwrap_or(false)
    }

    /// Check that this matrix was built for a layout of `layout`'s shape.
    pub fn check_dimensions<K: ItemId>(&self, layout: &Layout<K>) -> Result<(), PermissionsError> {
        let items = layout.item_count();
        let expected_gaps = layout.gap_count();
        // An empty matrix carries no gap count of its own.
        let gaps_match = self.gaps == expected_gaps || (items == 0 && self.row_count() == 0);
        if self.row_count() == items && gaps_match {
            Ok(())
        } else {
            Err(PermissionsError::ShapeMismatch {
                rows: self.row_count(),
                gaps: self.gaps,
                items,
                expected_gaps,
            })
        }
    }

    /// Drop the row of the item with `ordinal`, and the gap `gap` (the one
    /// that was before it), to follow [`Layout::remove_item`].
    pub fn remove_item(&mut self, ordinal: usize, gap: usize) {
        if ordinal < self.row_of_item.len() {
            self.row_of_item.remove(ordinal);
        }
        if gap < self.gaps {
            for row in &mut self.rows {
                row.remove(gap);
            }
            self.gaps -= 1;
        }
    }

    /// May `item` land at `position` relative to `target`?
    ///
    /// `Inside` (into a column as a whole) is always allowed; the sentinels
    /// never are. Unknown ids are not allowed.
    pub fn can_move<K: ItemId>(
        &self,
        layout: &Layout<K>,
        item: &K,
        target: &K,
        position: Position,
    ) -> bool {
        match position {
            Position::Inside => true,
            Position::Disallowed | Position::UseLastKnown => false,
            Position::Before | Position::After => {
                match (layout.item_ordinal(item), layout.gap_index(target, position)) {
                    (Some(row), Some(gap)) => self.get(row, gap),
                    _ => false,
                }
            }
        }
    }

    /// May the item with this ordinal move anywhere at all?
    pub fn can_item_move(&self, item: usize) -> bool {
        self.row(item).is_some_and(|row| row.contains(&true))
    }

    /// Does some item accept the gap before `gap_before`, or the one after it?
    pub fn is_drop_target(&self, gap_before: usize) -> bool {
        self.row_of_item.iter().any(|&r| {
            let row = &self.rows[r];
            row.get(gap_before).copied().unwrap_or(false)
                || row.get(gap_before + 1).copied().unwrap_or(false)
        })
    }
}

impl PartialEq for Permissions {
    fn eq(&self, other: &Self) -> bool {
        self.gaps == other.gaps
            && self.row_count() == other.row_count()
            && (0..self.row_count()).all(|i| self.row(i) == other.row(i))
    }
}

impl Eq for Permissions {}

impl TryFrom<Vec<Vec<bool>>> for Permissions {
    type Error = PermissionsError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Permissions> for Vec<Vec<bool>> {
    fn from(perms: Permissions) -> Self {
        perms.to_rows()
    }
}

/// The three item subsets the interaction layer works with.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ItemSets<K> {
    /// Items that can take keyboard focus.
    pub selectables: Vec<K>,
    /// Items that can start a move.
    pub movables: Vec<K>,
    /// Items and columns that can receive a dropped item.
    pub drop_targets: Vec<K>,
}

impl<K: ItemId> ItemSets<K> {
    /// Derive the subsets from a permission matrix.
    ///
    /// Every item is selectable. An item is movable when its row allows
    /// anything, and a drop target when some row accepts the gap before or
    /// after it. Every column is a drop target (for `Inside`).
    pub fn infer(layout: &Layout<K>, perms: &Permissions) -> Self {
        let mut sets = Self {
            selectables: Vec::new(),
            movables: Vec::new(),
            drop_targets: Vec::new(),
        };
        let mut ordinal = 0;
        for (c, column) in layout.columns().iter().enumerate() {
            for id in column.items() {
                sets.selectables.push(id.clone());
                if perms.can_item_move(ordinal) {
                    sets.movables.push(id.clone());
                }
                if perms.is_drop_target(ordinal + c) {
                    sets.drop_targets.push(id.clone());
                }
                ordinal += 1;
            }
            sets.drop_targets.push(column.id().clone());
        }
        sets
    }

    /// Subsets for a locked-item rule: everything is selectable, unlocked
    /// items are movable and accept drops.
    pub fn from_locked(layout: &Layout<K>, locked: &[K]) -> Self {
        let selectables: Vec<K> = layout.items().cloned().collect();
        let movables: Vec<K> = selectables
            .iter()
            .filter(|id| !locked.contains(id))
            .cloned()
            .collect();
        Self {
            drop_targets: movables.clone(),
            movables,
            selectables,
        }
    }
}
