// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag between module columns, with a locked module.
//!
//! The pinned "news" module cannot move and nothing may land above it. A
//! listener reports each committed move.
//!
//! Run:
//! - `cargo run -p understory_reorder_demos --example module_drag`

use kurbo::{Point, Rect};
use understory_reorder::handler::ModuleHandler;
use understory_reorder::input::PointerHit;
use understory_reorder::interaction::{Effect, Reorderer};
use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
use understory_reorder::lookup::StaticElements;
use understory_reorder::model::Model;
use understory_reorder::permissions::Permissions;
use understory_reorder::types::CommittedMove;

fn print_effects(label: &str, effects: &[Effect<&str>]) {
    println!("== {label} ==");
    for e in effects {
        println!("  {e:?}");
    }
}

fn main() {
    let layout = Layout::from_description(LayoutDescription {
        id: "portal",
        columns: vec![
            ColumnDescription {
                id: "left",
                children: vec!["news", "weather", "stocks"],
            },
            ColumnDescription {
                id: "right",
                children: vec!["mail", "calendar"],
            },
        ],
    })
    .expect("distinct ids");

    // Columns 200 wide, modules 50 tall, stacked from the top.
    let mut els = StaticElements::new().with_locked("news");
    for (c, column) in layout.columns().iter().enumerate() {
        let x = c as f64 * 200.0;
        els.set_bounds(*column.id(), Rect::new(x, 0.0, x + 190.0, 600.0));
        for (i, id) in column.items().iter().enumerate() {
            let y = i as f64 * 50.0;
            els.set_bounds(*id, Rect::new(x, y, x + 190.0, y + 50.0));
        }
    }

    let report = |change: &CommittedMove<&'static str>,
                  layout: &Layout<&'static str>|
     -> Option<Permissions> {
        println!(
            "  listener: {} {:?} {} ({} items)",
            change.item,
            change.position,
            change.target,
            layout.item_count()
        );
        None
    };
    let model = Model::with_locked_items(layout, ["news"]).with_listener(report);
    let mut r = Reorderer::new(model, ModuleHandler::new(), els);

    print_effects("drag start on weather", &r.drag_start(&"weather"));

    // Top half of "mail": land before it.
    let over_mail = Point::new(250.0, 10.0);
    r.drag_over(&"mail", over_mail);
    print_effects(
        "pointer over the top of mail",
        &r.pointer_move(&PointerHit::DropTarget("mail"), over_mail),
    );

    // A locked module is not a drop target: the marker hides.
    let over_news = Point::new(50.0, 10.0);
    print_effects(
        "pointer over news",
        &r.pointer_move(&PointerHit::DropTarget("news"), over_news),
    );

    // Over the drag avatar the last target still counts.
    print_effects(
        "pointer over the avatar",
        &r.pointer_move(&PointerHit::Avatar, over_mail),
    );

    print_effects("drop", &r.drop(over_mail));
    for column in r.model().columns {
        println!("{}: {:?}", column.id, column.children);
    }
}
