// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use super::LayoutHandler;
use super::list::{ListHandler, checked_commit, landing};
use crate::inference::{item_info_above, item_info_below};
use crate::lookup::ElementLookup;
use crate::model::Model;
use crate::types::{Direction, ItemId, MoveOutcome, Position, Step};

/// A list wrapped into rows.
///
/// Left and right behave like a horizontal [`ListHandler`]. Up and down find
/// the nearest item in the same visual column from the items' bounds, wrapping
/// to the column's other end.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GridHandler {
    list: ListHandler,
}

impl GridHandler {
    /// A grid handler.
    pub const fn new() -> Self {
        Self {
            list: ListHandler::horizontal(),
        }
    }
}

impl Default for GridHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ItemId> LayoutHandler<K> for GridHandler {
    fn neighbor(
        &self,
        model: &Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> Option<K> {
        let info = match direction {
            Direction::Left | Direction::Right => {
                return self.list.neighbor(model, lookup, item, direction);
            }
            Direction::Up => item_info_above(item, &self.selectables(model, lookup), lookup),
            Direction::Down => item_info_below(item, &self.selectables(model, lookup), lookup),
        };
        info.map(|info| info.item)
    }

    fn move_item(
        &self,
        model: &mut Model<K>,
        lookup: &dyn ElementLookup<K>,
        item: &K,
        direction: Direction,
    ) -> MoveOutcome<K> {
        if !direction.is_vertical() {
            return self.list.move_item(model, lookup, item, direction);
        }
        if !self.is_movable(model, lookup, item) {
            return MoveOutcome::Unchanged;
        }
        let ordered = self.movables(model, lookup);
        let (info, step) = match direction {
            Direction::Up => (item_info_above(item, &ordered, lookup), Step::Previous),
            _ => (item_info_below(item, &ordered, lookup), Step::Next),
        };
        let Some(info) = info else {
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
        self.list
            .drop_position(model, lookup, target, moving, pointer)
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
        self.list
            .mouse_move_item(model, lookup, item, target, position, pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::lookup::StaticElements;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Rect;

    // 1 2 3
    // 4 5 6
    // 7
    const ITEMS: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];

    fn setup() -> (Model<u32>, StaticElements<u32>) {
        let model = Model::new(Layout::single_column(0, 100, ITEMS).unwrap());
        let mut els = StaticElements::new();
        for (i, id) in ITEMS.iter().enumerate() {
            let x = (i % 3) as f64 * 50.0;
            let y = (i / 3) as f64 * 50.0;
            els.set_bounds(*id, Rect::new(x, y, x + 40.0, y + 40.0));
        }
        (model, els)
    }

    fn order(model: &Model<u32>) -> Vec<u32> {
        model.layout().items().copied().collect()
    }

    #[test]
    fn focus_follows_visual_columns() {
        let (model, els) = setup();
        let h = GridHandler::new();
        assert_eq!(h.item_below(&model, &els, &2), Some(5));
        assert_eq!(h.item_above(&model, &els, &4), Some(1));
        // Wraps within the column.
        assert_eq!(h.item_below(&model, &els, &7), Some(1));
        assert_eq!(h.item_above(&model, &els, &3), Some(6));
        // Left and right run through the whole sequence.
        assert_eq!(h.right_sibling(&model, &els, &3), Some(4));
        assert_eq!(h.left_sibling(&model, &els, &1), Some(7));
    }

    #[test]
    fn vertical_moves_land_on_the_far_side() {
        let (mut model, els) = setup();
        let h = GridHandler::new();
        h.move_item_down(&mut model, &els, &2);
        assert_eq!(order(&model), vec![1, 3, 4, 5, 2, 6, 7]);

        let (mut model, els) = setup();
        h.move_item_up(&mut model, &els, &5);
        assert_eq!(order(&model), vec![1, 5, 2, 3, 4, 6, 7]);

        // Wrapping from the bottom goes before the top of the column.
        let (mut model, els) = setup();
        h.move_item_down(&mut model, &els, &7);
        assert_eq!(order(&model), vec![7, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn drops_split_horizontally() {
        let (model, els) = setup();
        let h = GridHandler::new();
        assert_eq!(
            h.drop_position(&model, &els, &2, &1, Point::new(55.0, 39.0)),
            Position::Before
        );
        assert_eq!(
            h.drop_position(&model, &els, &2, &1, Point::new(85.0, 1.0)),
            Position::After
        );
    }
}
