// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors for layouts and permission matrices.
//!
//! Queries never fail: "not found" is `None`, and forbidden or ambiguous drops
//! are the [`Position::Disallowed`](crate::types::Position::Disallowed) and
//! [`Position::UseLastKnown`](crate::types::Position::UseLastKnown) sentinels.

use core::fmt::Debug;

use thiserror::Error;

/// An id description that cannot form a valid [`Layout`](crate::layout::Layout).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LayoutError<K: Debug> {
    /// The same item id appears twice (in one column or across columns).
    #[error("item {0:?} appears more than once in the layout")]
    DuplicateItem(K),
    /// Two columns share an id.
    #[error("column {0:?} appears more than once in the layout")]
    DuplicateColumn(K),
    /// An id names both a column and an item.
    #[error("id {0:?} names both a column and an item")]
    ColumnIsItem(K),
    /// The container id is reused by a column or an item.
    #[error("container id {0:?} is reused inside the layout")]
    ContainerReused(K),
}

/// A permission matrix that is malformed or does not fit a layout.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PermissionsError {
    /// Explicit rows do not all have the same length.
    #[error("permission row {row} has {len} gaps, expected {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
    /// The matrix was built for a layout with a different shape.
    #[error("permissions are {rows}x{gaps}, layout needs {items}x{expected_gaps}")]
    ShapeMismatch {
        /// Rows in the matrix.
        rows: usize,
        /// Gaps per row in the matrix.
        gaps: usize,
        /// Items in the layout.
        items: usize,
        /// Gaps in the layout.
        expected_gaps: usize,
    },
}
