// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::{LayoutHandler, settle};
use crate::inference::{bisect, sibling_info};
use crate::lookup::ElementLookup;
use crate::model::Model;
use crate::types::{Direction, ItemId, MoveOutcome, Orientation, Position, Step};

/// A single linear sequence.
///
/// Every direction steps through the sequence: up and left go toward the
/// start, down and right toward the end. Running off an end wraps, and a
/// wrapped move lands on the far side of the item it wrapped to, so moving the
/// last item "forward" makes it first.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ListHandler {
    orientation: Orientation,
}

impl ListHandler {
    /// A list whose drop targets split on `orientation`.
    pub const fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Items stacked top to bottom.
    pub const fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Items flowing left to right.
    pub const fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// The split axis for drop targets.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Landing side for a move that stepped to a sibling.
pub(super) fn landing(step: Step, has_wrapped: bool) -> Position {
    match (step, has_wrapped) {
        (Step::Next, false) | (Step::Previous, true) => Position::After,
        (Step::Previous, false) | (Step::Next, true) => Position::Before,
    }
}

/// Commit `position` if the matrix allows it, else report the refusal.
pub(super) fn checked_commit<K: ItemId>(
    model: &mut Model<K>,
    item: &K,
    target: &K,
    position: Position,
) -> MoveOutcome<K> {
    let position = if model.can_move(item, target, position) {
        position
    } else {
        Position::Disallowed
    };
    settle(model, item, target, position)
}

impl<K: ItemId> LayoutHandler<K> for ListHandler {
    fn neighbor(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> Option<K> {
        let ordered = self.selectables(model, lookup);
        sibling_info(item, &ordered, direction.step()).map(|info| info.item)
    }

    fn move_item(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> MoveOutcome<K> {
        if !self.is_movable(model, lookup, item) {
            return MoveOutcome::Unchanged;
        }
        let ordered = self.movables(model, lookup);
        let step = direction.step();
        let Some(info) = sibling_info(item, &ordered, step) else {
            return MoveOutcome::Unchanged;
        };
        checked_commit(model, item, &info.item, landing(step, info.has_wrapped))
    }

    fn drop_position(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        target: &K,
        moving: &K,
        pointer: Point,
    ) -> Position {
        let Some(bounds) = lookup.bounds(target) else {
            return Position::UseLastKnown;
        };
        let position = bisect(bounds, self.orientation == Orientation::Vertical, pointer);
        if model.can_move(moving, target, position) {
            position
        } else {
            Position::Disallowed
        }
    }

    fn mouse_move_item(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        target: &K,
        position: Position,
        pointer: Point,
    ) -> MoveOutcome<K> {
        let position = match position {
            Position::Before | Position::After | Position::Inside => position,
            _ => self.drop_position(model, lookup, target, item, pointer),
        };
        checked_commit(model, item, target, position)
    }
}
