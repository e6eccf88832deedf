// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard reordering of a vertical list.
//!
//! Focus enters the list, arrows move focus, and Ctrl+arrow moves the focused
//! item. Moving past either end wraps around.
//!
//! Run:
//! - `cargo run -p understory_reorder_demos --example list_keyboard`

use understory_reorder::handler::ListHandler;
use understory_reorder::input::{Key, KeyEvent, Modifiers};
use understory_reorder::interaction::{Effect, Reorderer};
use understory_reorder::layout::Layout;
use understory_reorder::lookup::StaticElements;
use understory_reorder::model::Model;

fn print_effects(label: &str, effects: &[Effect<&str>]) {
    println!("== {label} ==");
    for e in effects {
        println!("  {e:?}");
    }
}

fn main() {
    let layout = Layout::single_column("playlist", "tracks", ["intro", "verse", "chorus", "outro"])
        .expect("distinct ids");
    let mut r = Reorderer::new(
        Model::new(layout),
        ListHandler::vertical(),
        StaticElements::<&str>::new(),
    );

    print_effects("focus container", &r.focus_container());
    print_effects(
        "arrow down",
        &r.key_down(&KeyEvent::new("intro", Key::ArrowDown, Modifiers::empty())),
    );

    // Ctrl+Down arms the item and moves it in the same press.
    for _ in 0..2 {
        let effects = r.key_down(&KeyEvent::new("verse", Key::ArrowDown, Modifiers::CTRL));
        print_effects("ctrl+down on verse", &effects);
        println!("  order: {:?}", r.model().columns[0].children);
    }

    // Past the end wraps to the front.
    let effects = r.key_down(&KeyEvent::new("verse", Key::ArrowDown, Modifiers::CTRL));
    print_effects("ctrl+down past the end", &effects);
    println!("  order: {:?}", r.model().columns[0].children);

    print_effects(
        "release ctrl",
        &r.key_up(&KeyEvent::new("verse", Key::Other, Modifiers::empty())),
    );
    println!("state: {:?}", r.state());
}
