// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target and position inference: "where does this item go next?"
//!
//! ## Overview
//!
//! Pure functions over an item, an ordering or a [`Layout`], and (for the
//! module topology) a [`Permissions`] matrix. Nothing here mutates; handlers
//! feed the answers to [`Layout::move_item`](crate::layout::Layout::move_item).
//!
//! ## Families
//!
//! - Linear sibling search ([`sibling_info`]) walks a flat ordering and wraps
//!   at both ends, reporting `has_wrapped` so callers can flip the insertion
//!   side: wrapping from the bottom to the top still lands *before* the top
//!   item.
//! - Geometric search ([`item_info_above`], [`item_info_below`]) finds the
//!   nearest item in the same visual column of an implicit grid.
//! - Column search ([`find_target`], [`target_and_position`]) consults the
//!   permission matrix, preferring the nearest legal gap and never re-scanning.
//!
//! ```
//! use understory_reorder::inference::right_sibling_info;
//!
//! let info = right_sibling_info(&'c', &['a', 'b', 'c']).unwrap();
//! assert_eq!(info.item, 'a');
//! assert!(info.has_wrapped);
//! ```

use kurbo::{Point, Rect};

use crate::layout::Layout;
use crate::lookup::ElementLookup;
use crate::permissions::Permissions;
use crate::types::{ItemId, Position, SiblingInfo, Step, TargetAndPosition};

/// Offsets closer than this are treated as the same visual row or column.
pub const ALIGNMENT_TOLERANCE: f64 = 0.5;

fn aligned(a: f64, b: f64) -> bool {
    let d = a - b;
    d < ALIGNMENT_TOLERANCE && d > -ALIGNMENT_TOLERANCE
}

/// Neighbor of `item` in `ordered`, one step away, wrapping at either end.
///
/// An item missing from `ordered` gets the first element, unwrapped. Returns
/// `None` only for an empty ordering.
pub fn sibling_info<K: ItemId>(item: &K, ordered: &[K], step: Step) -> Option<SiblingInfo<K>> {
    let first = ordered.first()?;
    let Some(index) = ordered.iter().position(|i| i == item) else {
        return Some(SiblingInfo {
            item: first.clone(),
            has_wrapped: false,
        });
    };
    let info = match step.apply(index, ordered.len()) {
        Some(next) => SiblingInfo {
            item: ordered[next].clone(),
            has_wrapped: false,
        },
        None => SiblingInfo {
            item: match step {
                Step::Previous => ordered[ordered.len() - 1].clone(),
                Step::Next => first.clone(),
            },
            has_wrapped: true,
        },
    };
    Some(info)
}

/// [`sibling_info`] toward the end.
pub fn right_sibling_info<K: ItemId>(item: &K, ordered: &[K]) -> Option<SiblingInfo<K>> {
    sibling_info(item, ordered, Step::Next)
}

/// [`sibling_info`] toward the start.
pub fn left_sibling_info<K: ItemId>(item: &K, ordered: &[K]) -> Option<SiblingInfo<K>> {
    sibling_info(item, ordered, Step::Previous)
}

/// The item below `item` in its visual column.
///
/// The visual column is every item in `ordered` whose left edge lines up with
/// `item`'s. Past the bottom this wraps to the top of that column (or to the
/// first item overall). `None` when `item` has no bounds or `ordered` is empty.
pub fn item_info_below<K, L>(item: &K, ordered: &[K], lookup: &L) -> Option<SiblingInfo<K>>
where
    K: ItemId,
    L: ElementLookup<K> + ?Sized,
{
    let current = lookup.bounds(item)?;
    let mut first_in_column = None;
    for candidate in ordered {
        let Some(b) = lookup.bounds(candidate) else {
            continue;
        };
        if aligned(b.x0, current.x0) {
            first_in_column.get_or_insert(candidate);
            if b.y0 > current.y0 + ALIGNMENT_TOLERANCE {
                return Some(SiblingInfo {
                    item: candidate.clone(),
                    has_wrapped: false,
                });
            }
        }
    }
    let wrapped = first_in_column.or(ordered.first())?;
    Some(SiblingInfo {
        item: wrapped.clone(),
        has_wrapped: true,
    })
}

/// The item above `item` in its visual column; wraps to the column's bottom.
///
/// See [`item_info_below`].
pub fn item_info_above<K, L>(item: &K, ordered: &[K], lookup: &L) -> Option<SiblingInfo<K>>
where
    K: ItemId,
    L: ElementLookup<K> + ?Sized,
{
    let current = lookup.bounds(item)?;
    let mut last_in_column = None;
    for candidate in ordered.iter().rev() {
        let Some(b) = lookup.bounds(candidate) else {
            continue;
        };
        if aligned(b.x0, current.x0) {
            last_in_column.get_or_insert(candidate);
            if current.y0 > b.y0 + ALIGNMENT_TOLERANCE {
                return Some(SiblingInfo {
                    item: candidate.clone(),
                    has_wrapped: false,
                });
            }
        }
    }
    let wrapped = last_in_column.or(ordered.first())?;
    Some(SiblingInfo {
        item: wrapped.clone(),
        has_wrapped: true,
    })
}

/// Neighbor of `item` within its own column, without wrapping.
///
/// At the top (or bottom) of the column this is `item` itself. `None` when the
/// item is not in the layout.
pub fn item_above_below<K: ItemId>(item: &K, step: Step, layout: &Layout<K>) -> Option<K> {
    let loc = layout.locate(item)?;
    let column = &layout.columns()[loc.column];
    let neighbor = step
        .apply(loc.index, column.len())
        .map_or(item, |i| &column.items()[i]);
    Some(neighbor.clone())
}

/// Top item of the nearest non-empty column in the direction of `step`.
///
/// Empty columns are skipped; when none remain this is `item` itself. `None`
/// when the item is not in the layout.
pub fn first_item_in_adjacent_column<K: ItemId>(
    item: &K,
    step: Step,
    layout: &Layout<K>,
) -> Option<K> {
    let loc = layout.locate(item)?;
    let columns = layout.columns();
    let mut c = loc.column;
    while let Some(next) = step.apply(c, columns.len()) {
        if let Some(top) = columns[next].items().first() {
            return Some(top.clone());
        }
        c = next;
    }
    Some(item.clone())
}

/// Where a sideways move of `item` lands.
///
/// Scans the columns in the direction of `step`, starting with the adjacent
/// one and skipping empty ones, for the first item accepting `item` before
/// it (or failing that, after it). When nothing accepts, the item goes to the
/// bottom of the adjacent column (`Inside`). With no column in that direction
/// the answer is `item` itself, which commits nothing.
pub fn find_target<K: ItemId>(
    item: &K,
    step: Step,
    layout: &Layout<K>,
    perms: &Permissions,
) -> TargetAndPosition<K> {
    let Some(loc) = layout.locate(item) else {
        return TargetAndPosition::new(item.clone(), Position::UseLastKnown);
    };
    let columns = layout.columns();
    let Some(adjacent) = step.apply(loc.column, columns.len()) else {
        return TargetAndPosition::new(item.clone(), Position::Before);
    };
    let mut c = Some(adjacent);
    while let Some(index) = c {
        for target in columns[index].items() {
            for position in [Position::Before, Position::After] {
                if perms.can_move(layout, item, target, position) {
                    return TargetAndPosition::new(target.clone(), position);
                }
            }
        }
        c = step.apply(index, columns.len());
    }
    TargetAndPosition::new(columns[adjacent].id().clone(), Position::Inside)
}

/// Where a vertical move of `item` lands within its own column.
///
/// `position` is `Before` (moving up) or `After` (moving down). Candidates are
/// scanned outward from the item; the nearest legal one wins. When none is
/// legal the first candidate comes back tagged `Disallowed`, so the caller can
/// say why nothing happened. With no candidates at all, or a sentinel
/// `position`, the answer is `UseLastKnown`.
pub fn target_and_position<K: ItemId>(
    item: &K,
    position: Position,
    layout: &Layout<K>,
    perms: &Permissions,
) -> TargetAndPosition<K> {
    let step = match position {
        Position::Before => Step::Previous,
        Position::After => Step::Next,
        _ => return TargetAndPosition::new(item.clone(), Position::UseLastKnown),
    };
    let Some(loc) = layout.locate(item) else {
        return TargetAndPosition::new(item.clone(), Position::UseLastKnown);
    };
    let items = layout.columns()[loc.column].items();
    let mut first_refused = None;
    let mut i = loc.index;
    while let Some(next) = step.apply(i, items.len()) {
        let target = &items[next];
        if perms.can_move(layout, item, target, position) {
            return TargetAndPosition::new(target.clone(), position);
        }
        first_refused.get_or_insert(target);
        i = next;
    }
    match first_refused {
        Some(target) => TargetAndPosition::new(target.clone(), Position::Disallowed),
        None => TargetAndPosition::new(item.clone(), Position::UseLastKnown),
    }
}

/// [`target_and_position`] moving up.
pub fn target_and_position_above<K: ItemId>(
    item: &K,
    layout: &Layout<K>,
    perms: &Permissions,
) -> TargetAndPosition<K> {
    target_and_position(item, Position::Before, layout, perms)
}

/// [`target_and_position`] moving down.
pub fn target_and_position_below<K: ItemId>(
    item: &K,
    layout: &Layout<K>,
    perms: &Permissions,
) -> TargetAndPosition<K> {
    target_and_position(item, Position::After, layout, perms)
}

/// Classify `pointer` against `bounds` along `vertical` (y) or horizontal (x):
/// before the midpoint is `Before`, otherwise `After`.
pub(crate) fn bisect(bounds: Rect, vertical: bool, pointer: Point) -> Position {
    let before = if vertical {
        pointer.y < (bounds.y0 + bounds.y1) / 2.0
    } else {
        pointer.x < (bounds.x0 + bounds.x1) / 2.0
    };
    if before {
        Position::Before
    } else {
        Position::After
    }
}
