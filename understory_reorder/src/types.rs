// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core vocabulary: positions, directions, orientations, display states, and
//! the small result records produced by inference and commits.

use core::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Bounds every item, column, and container identifier satisfies.
///
/// Identifiers are opaque to the engine: it only clones, compares, and logs
/// them. Any `Clone + Eq + Debug` type qualifies (`u32`, `&'static str`,
/// `String`, toolkit handles, ...).
pub trait ItemId: Clone + Eq + Debug {}

impl<T: Clone + Eq + Debug> ItemId for T {}

/// Where an item lands relative to a target.
///
/// `Before`, `After`, and `Inside` are committable. `Disallowed` and
/// `UseLastKnown` are inference results only; [`Layout::move_item`] ignores
/// them.
///
/// [`Layout::move_item`]: crate::layout::Layout::move_item
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Immediately before the target item.
    Before,
    /// Immediately after the target item.
    After,
    /// Appended to the target column.
    Inside,
    /// A target exists but the permission matrix forbids it.
    Disallowed,
    /// Geometry is ambiguous; keep whatever target was tracked last.
    UseLastKnown,
}

impl Position {
    /// Returns true for positions a layout mutation can act on.
    #[must_use]
    pub const fn is_committable(self) -> bool {
        matches!(self, Self::Before | Self::After | Self::Inside)
    }

    /// Offset from the gap before a target to the gap this position names.
    ///
    /// Only meaningful for `Before` and `After`.
    pub(crate) const fn gap_offset(self) -> Option<usize> {
        match self {
            Self::Before => Some(0),
            Self::After => Some(1),
            _ => None,
        }
    }
}

/// A step through an ordered sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Step {
    /// Toward the start (up, or left).
    Previous,
    /// Toward the end (down, or right).
    Next,
}

impl Step {
    /// Apply this step to `index`, returning `None` when it leaves `0..len`.
    #[must_use]
    pub const fn apply(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Previous => index.checked_sub(1),
            Self::Next => {
                if index + 1 < len {
                    Some(index + 1)
                } else {
                    None
                }
            }
        }
    }
}

/// Navigation direction for focus changes and keyboard moves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the top.
    Up,
    /// Toward the bottom.
    Down,
    /// Toward the left.
    Left,
    /// Toward the right.
    Right,
}

impl Direction {
    /// Returns true for `Up` and `Down`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// The sequence step this direction corresponds to.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::Up | Self::Left => Step::Previous,
            Self::Down | Self::Right => Step::Next,
        }
    }
}

/// Axis along which a drop target is split into "before" and "after" halves.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Before means above.
    #[default]
    Vertical,
    /// Before means left of.
    Horizontal,
}

/// Display state the host should give an item.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ItemState {
    /// Not the active item.
    #[default]
    Default,
    /// The active item, not moving.
    Selected,
    /// The active item while armed for a keyboard move or during a pointer drag.
    Dragging,
}

/// Result of a linear or geometric sibling search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SiblingInfo<K> {
    /// The neighboring item.
    pub item: K,
    /// True when the search ran off one end and continued from the other.
    pub has_wrapped: bool,
}

/// A target id paired with where to land relative to it.
///
/// `target` names an item for `Before`/`After`, and a column for `Inside`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetAndPosition<K> {
    /// Item or column the position is relative to.
    pub target: K,
    /// Landing position (possibly a sentinel).
    pub position: Position,
}

impl<K> TargetAndPosition<K> {
    /// Pair a target with a position.
    pub const fn new(target: K, position: Position) -> Self {
        Self { target, position }
    }
}

/// A move that changed the layout.
///
/// Handed to the [`MoveListener`](crate::model::MoveListener) once per commit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommittedMove<K> {
    /// The item that moved.
    pub item: K,
    /// The item or column it moved relative to.
    pub target: K,
    /// Where it landed relative to `target`.
    pub position: Position,
}

/// What a handler did with a move request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome<K> {
    /// The layout changed.
    Moved(CommittedMove<K>),
    /// A target was found, but the permission matrix forbids landing there.
    Disallowed {
        /// Item the user tried to move.
        item: K,
        /// First candidate that was refused.
        target: K,
    },
    /// Nothing to do (edge of the layout, unknown ids, or a sentinel position).
    Unchanged,
}

impl<K> MoveOutcome<K> {
    /// Returns the committed move, if any.
    pub fn committed(&self) -> Option<&CommittedMove<K>> {
        match self {
            Self::Moved(m) => Some(m),
            _ => None,
        }
    }
}
