// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for layouts, handlers, and the interaction
//! state machine.
//!
//! 1. Totality: any sequence of commits keeps every item exactly once
//! 2. Locked heads stay pinned under keyboard moves
//! 3. A list item stepped forward `len` times comes back to where it was
//! 4. At most one item is ever styled as dragging
//! 5. The id description round-trips through JSON

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_reorder::handler::{LayoutHandler, ListHandler, ModuleHandler};
use understory_reorder::input::{Key, KeyEvent, Modifiers, PointerHit};
use understory_reorder::interaction::{InteractionState, Reorderer};
use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
use understory_reorder::lookup::StaticElements;
use understory_reorder::model::Model;
use understory_reorder::types::{Direction, ItemState, Position};

// ── Strategies ──────────────────────────────────────────────────────────

const CONTAINER: u32 = 0;

fn column_id(c: usize) -> u32 {
    1000 + c as u32
}

/// A layout with 1..=4 columns and up to 12 items, items numbered from 1.
fn layout_strategy() -> impl Strategy<Value = Layout<u32>> {
    (1usize..=4)
        .prop_flat_map(|columns| (Just(columns), prop::collection::vec(0..columns, 0..12)))
        .prop_map(|(columns, placement)| {
            let mut desc = LayoutDescription {
                id: CONTAINER,
                columns: (0..columns)
                    .map(|c| ColumnDescription {
                        id: column_id(c),
                        children: Vec::new(),
                    })
                    .collect(),
            };
            for (i, c) in placement.into_iter().enumerate() {
                desc.columns[c].children.push(i as u32 + 1);
            }
            Layout::from_description(desc).unwrap()
        })
}

fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Before),
        Just(Position::After),
        Just(Position::Inside),
        Just(Position::Disallowed),
        Just(Position::UseLastKnown),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Any id the layout might be asked about: items, columns, the container, or
/// something unknown.
fn id_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..14, (0usize..5).prop_map(column_id)]
}

fn sorted_items(layout: &Layout<u32>) -> Vec<u32> {
    let mut items: Vec<u32> = layout.items().copied().collect();
    items.sort_unstable();
    items
}

/// Bounds for a module layout: columns 100 wide, items 30 tall.
fn module_bounds(layout: &Layout<u32>) -> StaticElements<u32> {
    let mut els = StaticElements::new();
    for (c, column) in layout.columns().iter().enumerate() {
        let x = c as f64 * 100.0;
        els.set_bounds(*column.id(), Rect::new(x, 0.0, x + 90.0, 1000.0));
        for (i, id) in column.items().iter().enumerate() {
            let y = i as f64 * 30.0;
            els.set_bounds(*id, Rect::new(x, y, x + 90.0, y + 30.0));
        }
    }
    els
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Totality
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn commits_never_lose_or_duplicate_items(
        layout in layout_strategy(),
        moves in prop::collection::vec((id_strategy(), id_strategy(), position_strategy()), 0..40),
    ) {
        let expected = sorted_items(&layout);
        let gaps = layout.gap_count();
        let mut model = Model::new(layout);
        for (item, target, position) in moves {
            let before = model.layout().clone();
            let outcome = model.commit(&item, &target, position);
            if outcome.committed().is_none() {
                prop_assert_eq!(model.layout(), &before, "a refused move must not mutate");
            }
            prop_assert_eq!(sorted_items(model.layout()), expected.clone());
            prop_assert_eq!(model.layout().gap_count(), gaps);
        }
    }

    #[test]
    fn handler_moves_never_lose_items(
        layout in layout_strategy(),
        moves in prop::collection::vec((0u32..14, direction_strategy()), 0..40),
    ) {
        let expected = sorted_items(&layout);
        let els = module_bounds(&layout);
        let mut model = Model::new(layout);
        let handler = ModuleHandler::new();
        for (item, direction) in moves {
            handler.move_item(&mut model, &els, &item, direction);
            prop_assert_eq!(sorted_items(model.layout()), expected.clone());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Locked heads stay pinned
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn locked_heads_stay_pinned(
        layout in layout_strategy(),
        moves in prop::collection::vec((0u32..14, direction_strategy()), 0..40),
    ) {
        // Lock the head of every column.
        let locked: Vec<u32> = layout
            .columns()
            .iter()
            .filter_map(|c| c.items().first().copied())
            .collect();
        let mut els = module_bounds(&layout);
        for id in &locked {
            els.lock(*id);
        }
        let heads: Vec<Option<u32>> = layout
            .columns()
            .iter()
            .map(|c| c.items().first().copied())
            .collect();
        let mut model = Model::with_locked_items(layout, locked);
        let handler = ModuleHandler::new();
        for (item, direction) in moves {
            handler.move_item(&mut model, &els, &item, direction);
            for (c, head) in heads.iter().enumerate() {
                if let Some(head) = head {
                    prop_assert_eq!(
                        model.layout().columns()[c].items().first(),
                        Some(head),
                        "column {} lost its locked head", c
                    );
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Wrapping list moves cycle
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stepping_forward_len_times_restores_order(
        len in 2u32..10,
        pick in any::<prop::sample::Index>(),
    ) {
        let items: Vec<u32> = (1..=len).collect();
        let item = items[pick.index(items.len())];
        let layout = Layout::single_column(CONTAINER, column_id(0), items.clone()).unwrap();
        let mut model = Model::new(layout);
        let els = StaticElements::<u32>::new();
        let handler = ListHandler::vertical();
        for _ in 0..len {
            let outcome = handler.move_item_right(&mut model, &els, &item);
            prop_assert!(outcome.committed().is_some(), "every step moves");
        }
        let order: Vec<u32> = model.layout().items().copied().collect();
        prop_assert_eq!(order, items);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Single active drag
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Event {
    Focus(u32),
    Blur(u32),
    KeyDown(u32, Key, Modifiers),
    KeyUp(u32, Modifiers),
    DragStart(u32),
    DragOver(u32, f64),
    PointerMove(Option<u32>, f64),
    Drop(f64),
    DragEnd,
    Cancel,
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::ArrowUp),
        Just(Key::ArrowDown),
        Just(Key::ArrowLeft),
        Just(Key::ArrowRight),
        Just(Key::Character('i')),
        Just(Key::Other),
    ]
}

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    prop_oneof![Just(Modifiers::empty()), Just(Modifiers::CTRL), Just(Modifiers::SHIFT)]
}

fn event_strategy() -> impl Strategy<Value = Event> {
    let y = 0.0f64..400.0;
    prop_oneof![
        (0u32..14).prop_map(Event::Focus),
        (0u32..14).prop_map(Event::Blur),
        (0u32..14, key_strategy(), modifiers_strategy())
            .prop_map(|(t, k, m)| Event::KeyDown(t, k, m)),
        (0u32..14, modifiers_strategy()).prop_map(|(t, m)| Event::KeyUp(t, m)),
        (0u32..14).prop_map(Event::DragStart),
        (0u32..14, y.clone()).prop_map(|(t, y)| Event::DragOver(t, y)),
        (prop::option::of(0u32..14), y.clone()).prop_map(|(t, y)| Event::PointerMove(t, y)),
        y.prop_map(Event::Drop),
        Just(Event::DragEnd),
        Just(Event::Cancel),
    ]
}

proptest! {
    #[test]
    fn at_most_one_item_is_dragging(
        layout in layout_strategy(),
        events in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let expected = sorted_items(&layout);
        let els = module_bounds(&layout);
        let mut r = Reorderer::new(Model::new(layout), ModuleHandler::new(), els);
        for event in events {
            match event {
                Event::Focus(i) => { r.focus(&i); }
                Event::Blur(i) => { r.blur(&i); }
                Event::KeyDown(t, k, m) => { r.key_down(&KeyEvent::new(t, k, m)); }
                Event::KeyUp(t, m) => { r.key_up(&KeyEvent::new(t, Key::Other, m)); }
                Event::DragStart(i) => { r.drag_start(&i); }
                Event::DragOver(t, y) => { r.drag_over(&t, Point::new(10.0, y)); }
                Event::PointerMove(t, y) => {
                    let hit = t.map_or(PointerHit::Avatar, PointerHit::DropTarget);
                    r.pointer_move(&hit, Point::new(10.0, y));
                }
                Event::Drop(y) => { r.drop(Point::new(10.0, y)); }
                Event::DragEnd => { r.drag_end(); }
                Event::Cancel => {
                    let was_dragging = r.state() == InteractionState::PointerDragging;
                    r.cancel_drag();
                    if was_dragging {
                        prop_assert_eq!(r.state(), InteractionState::Focused);
                        let active = r.active().copied();
                        prop_assert_eq!(active.map(|a| r.item_state(&a)), Some(ItemState::Selected));
                    }
                }
            }
            let dragging = r
                .inner()
                .layout()
                .items()
                .filter(|i| r.item_state(i) == ItemState::Dragging)
                .count();
            prop_assert!(dragging <= 1, "{} items dragging", dragging);
            prop_assert_eq!(sorted_items(r.inner().layout()), expected.clone());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Serialization
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn description_round_trips_through_json(layout in layout_strategy()) {
        let json = serde_json::to_string(&layout.to_description()).unwrap();
        let desc: LayoutDescription<u32> = serde_json::from_str(&json).unwrap();
        let back = Layout::from_description(desc).unwrap();
        prop_assert_eq!(back, layout);
    }
}
