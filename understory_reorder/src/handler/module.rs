// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::{LayoutHandler, settle};
use crate::inference::{
    bisect, find_target, first_item_in_adjacent_column, item_above_below, target_and_position,
};
use crate::lookup::ElementLookup;
use crate::model::Model;
use crate::types::{Direction, ItemId, MoveOutcome, Position};

/// Independent columns of modules, constrained by the permission matrix.
///
/// Up and down stay inside the item's column and never wrap. Left and right
/// jump to the nearest column in that direction that has a legal landing
/// spot, or to the bottom of the adjacent column when none does.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ModuleHandler;

impl ModuleHandler {
    /// A module handler.
    pub const fn new() -> Self {
        Self
    }
}

impl<K: ItemId> LayoutHandler<K> for ModuleHandler {
    fn neighbor(
        &self,
        model: &Model<K>,
        _lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> Option<K> {
        let layout = model.layout();
        if direction.is_vertical() {
            item_above_below(item, direction.step(), layout)
        } else {
            first_item_in_adjacent_column(item, direction.step(), layout)
        }
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
        let found = match direction {
            Direction::Up => {
                target_and_position(item, Position::Before, model.layout(), model.permissions())
            }
            Direction::Down => {
                target_and_position(item, Position::After, model.layout(), model.permissions())
            }
            Direction::Left | Direction::Right => find_target(
                item,
                direction.step(),
                model.layout(),
                model.permissions(),
            ),
        };
        settle(model, item, &found.target, found.position)
    }

    fn drop_position(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        target: &K,
        moving: &K,
        pointer: Point,
    ) -> Position {
        let layout = model.layout();
        if layout.is_column(target) {
            // Only the empty space under the last module counts as "inside".
            let Some(last) = layout.last_item_in_column(target) else {
                return Position::Inside;
            };
            return match lookup.bounds(last) {
                Some(bounds) if pointer.y > bounds.y1 => Position::Inside,
                _ => Position::UseLastKnown,
            };
        }
        let Some(bounds) = lookup.bounds(target) else {
            return Position::UseLastKnown;
        };
        let position = bisect(bounds, true, pointer);
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
            Position::Before | Position::After if !model.can_move(item, target, position) => {
                Position::Disallowed
            }
            Position::Before | Position::After | Position::Inside | Position::Disallowed => {
                position
            }
            Position::UseLastKnown => self.drop_position(model, lookup, target, item, pointer),
        };
        settle(model, item, target, position)
    }
}
