// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host input as the interaction layer sees it.
//!
//! Hosts translate their toolkit's keyboard and pointer events into these
//! types before handing them to a [`Reorderer`](crate::interaction::Reorderer).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0001;
        /// Either alt/option key.
        const ALT   = 0b0010;
        /// Either control key.
        const CTRL  = 0b0100;
        /// The platform "super" key (command, windows).
        const SUPER = 0b1000;
    }
}

/// The logical key of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// A printable character.
    Character(char),
    /// Anything else, including a modifier key on its own.
    Other,
}

impl Key {
    /// Same key, ignoring ASCII case for characters.
    #[must_use]
    pub fn matches(self, other: Self) -> bool {
        match (self, other) {
            (Self::Character(a), Self::Character(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

/// A key press or release delivered to the item that has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent<K> {
    /// Element the event was delivered to.
    pub target: K,
    /// Logical key.
    pub key: Key,
    /// Modifiers held, after the event took effect.
    pub modifiers: Modifiers,
}

impl<K> KeyEvent<K> {
    /// A key event.
    pub const fn new(target: K, key: Key, modifiers: Modifiers) -> Self {
        Self {
            target,
            key,
            modifiers,
        }
    }
}

/// What the host's hit test found under the pointer during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerHit<K> {
    /// A registered drop target (item or column).
    DropTarget(K),
    /// The drag avatar, which can sit between the pointer and the targets.
    Avatar,
    /// Nothing the engine knows about.
    Nothing,
}
