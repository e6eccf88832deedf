// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction configuration: which keys drive focus and moves.
//!
//! A [`Keyset`] names a modifier set and four directional keys. Pressing a
//! directional key alone moves focus; pressing it with the keyset's modifier
//! held moves the focused item. Several keysets can be active at once.
//!
//! ```
//! use understory_reorder::config::{Keyset, ReordererConfig};
//! use understory_reorder::input::{Key, Modifiers};
//!
//! let config = ReordererConfig::new().with_keyset(Keyset {
//!     modifier: Modifiers::ALT,
//!     up: Key::Character('w'),
//!     down: Key::Character('s'),
//!     left: Key::Character('a'),
//!     right: Key::Character('d'),
//! });
//! assert_eq!(config.keysets.len(), 3);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::input::{Key, Modifiers};
use crate::types::Direction;

/// A modifier set plus the four directional keys it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyset {
    /// Modifiers that turn a focus change into a move.
    pub modifier: Modifiers,
    /// Key for up.
    pub up: Key,
    /// Key for down.
    pub down: Key,
    /// Key for left.
    pub left: Key,
    /// Key for right.
    pub right: Key,
}

impl Keyset {
    /// Arrow keys with Ctrl.
    pub const ARROWS: Self = Self {
        modifier: Modifiers::CTRL,
        up: Key::ArrowUp,
        down: Key::ArrowDown,
        left: Key::ArrowLeft,
        right: Key::ArrowRight,
    };

    /// `i`/`m`/`j`/`k` with Ctrl.
    pub const IJKM: Self = Self {
        modifier: Modifiers::CTRL,
        up: Key::Character('i'),
        down: Key::Character('m'),
        left: Key::Character('j'),
        right: Key::Character('k'),
    };

    /// Is this keyset's modifier held?
    pub fn modifier_held(&self, modifiers: Modifiers) -> bool {
        !self.modifier.is_empty() && modifiers.contains(self.modifier)
    }

    /// The direction `key` stands for in this keyset.
    pub fn direction(&self, key: Key) -> Option<Direction> {
        [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ]
        .into_iter()
        .find_map(|(k, d)| k.matches(key).then_some(d))
    }
}

/// Configuration for a [`Reorderer`](crate::interaction::Reorderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReordererConfig {
    /// Active keysets, checked in order.
    pub keysets: Vec<Keyset>,
}

impl Default for ReordererConfig {
    fn default() -> Self {
        Self {
            keysets: vec![Keyset::ARROWS, Keyset::IJKM],
        }
    }
}

impl ReordererConfig {
    /// The default keysets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all keysets.
    #[must_use]
    pub fn with_keysets(mut self, keysets: impl IntoIterator<Item = Keyset>) -> Self {
        self.keysets = keysets.into_iter().collect();
        self
    }

    /// Add a keyset.
    #[must_use]
    pub fn with_keyset(mut self, keyset: Keyset) -> Self {
        self.keysets.push(keyset);
        self
    }

    /// Is the modifier of any keyset held?
    pub fn is_move(&self, modifiers: Modifiers) -> bool {
        self.keysets.iter().any(|k| k.modifier_held(modifiers))
    }
}
