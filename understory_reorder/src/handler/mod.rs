// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout handlers: focus navigation, keyboard moves, and drop classification
//! for one topology.
//!
//! - [`ListHandler`]: a single linear sequence that wraps at both ends.
//! - [`GridHandler`]: a wrapped list laid out in rows; up/down follow geometry.
//! - [`ModuleHandler`]: independent columns governed by a permission matrix.
//!
//! Handlers hold no per-interaction state. They read the [`Model`] and an
//! [`ElementLookup`], and mutate only through [`Model::commit`].

mod grid;
mod list;
mod module;

pub use grid::GridHandler;
pub use list::ListHandler;
pub use module::ModuleHandler;

use alloc::vec::Vec;

use kurbo::Point;

use crate::lookup::ElementLookup;
use crate::model::Model;
use crate::types::{Direction, ItemId, MoveOutcome, Position};

/// Topology-specific reordering behavior.
pub trait LayoutHandler<K: ItemId> {
    /// The item focus moves to from `item` in `direction`.
    ///
    /// `None` when there is nowhere to go at all. Some topologies answer
    /// `item` itself at an edge.
    fn neighbor(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> Option<K>;

    /// Move `item` one step in `direction`, committing through the model.
    fn move_item(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> MoveOutcome<K>;

    /// Classify a pointer over `target` while `moving` is dragged.
    ///
    /// Returns a committable position, `Disallowed`, or `UseLastKnown` when
    /// the geometry does not decide.
    fn drop_position(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        target: &K,
        moving: &K,
        pointer: Point,
    ) -> Position;

    /// Commit a pointer drop of `item` at `position` relative to `target`.
    ///
    /// A sentinel `position` is recomputed from `pointer`.
    fn mouse_move_item(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        target: &K,
        position: Position,
        pointer: Point,
    ) -> MoveOutcome<K>;

    /// Can `item` start a move?
    fn is_movable(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>, item: &K) -> bool {
        lookup.is_movable(item) && model.can_item_move(item)
    }

    /// Items that can take focus, in layout order.
    fn selectables(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>) -> Vec<K> {
        model
            .layout()
            .items()
            .filter(|id| lookup.is_selectable(id))
            .cloned()
            .collect()
    }

    /// Items that can start a move, in layout order.
    fn movables(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>) -> Vec<K> {
        model
            .layout()
            .items()
            .filter(|id| self.is_movable(model, lookup, id))
            .cloned()
            .collect()
    }

    /// [`LayoutHandler::neighbor`] to the left.
    fn left_sibling(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>, item: &K) -> Option<K> {
        self.neighbor(model, lookup, item, Direction::Left)
    }

    /// [`LayoutHandler::neighbor`] to the right.
    fn right_sibling(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
    ) -> Option<K> {
        self.neighbor(model, lookup, item, Direction::Right)
    }

    /// [`LayoutHandler::neighbor`] upward.
    fn item_above(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>, item: &K) -> Option<K> {
        self.neighbor(model, lookup, item, Direction::Up)
    }

    /// [`LayoutHandler::neighbor`] downward.
    fn item_below(&self, model: &Model<K>, lookup: &dyn ElementLookup<K>, item: &K) -> Option<K> {
        self.neighbor(model, lookup, item, Direction::Down)
    }

    /// [`LayoutHandler::move_item`] to the left.
    fn move_item_left(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
    ) -> MoveOutcome<K> {
        self.move_item(model, lookup, item, Direction::Left)
    }

    /// [`LayoutHandler::move_item`] to the right.
    fn move_item_right(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
    ) -> MoveOutcome<K> {
        self.move_item(model, lookup, item, Direction::Right)
    }

    /// [`LayoutHandler::move_item`] upward.
    fn move_item_up(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
    ) -> MoveOutcome<K> {
        self.move_item(model, lookup, item, Direction::Up)
    }

    /// [`LayoutHandler::move_item`] downward.
    fn move_item_down(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
    ) -> MoveOutcome<K> {
        self.move_item(model, lookup, item, Direction::Down)
    }
}

/// Turn an inferred target into an outcome: commit real positions, report
/// `Disallowed`, and ignore `UseLastKnown`.
pub(crate) fn settle<K: ItemId>(
    model: &mut Model<K>,
    item: &K,
    target: &K,
    position: Position,
) -> MoveOutcome<K> {
    match position {
        Position::Disallowed => {
            tracing::debug!(message = "reorder.disallowed", item = ?item, target = ?target);
            MoveOutcome::Disallowed {
                item: item.clone(),
                target: target.clone(),
            }
        }
        Position::UseLastKnown => MoveOutcome::Unchanged,
        Position::Before | Position::After | Position::Inside => {
            model.commit(item, target, position)
        }
    }
}
