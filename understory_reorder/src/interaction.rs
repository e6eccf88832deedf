// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state machine: focus, keyboard moves, and pointer drags.
//!
//! ## Overview
//!
//! [`Reorderer`] turns host input into handler calls and returns the
//! presentation changes the host should make as [`Effect`] values, in the
//! order they should be applied. It never touches a widget tree itself.
//!
//! ## States
//!
//! - `Idle`: nothing has focus (there may still be a remembered active item).
//! - `Focused`: an item is active and styled `Selected`.
//! - `Armed`: a keyset modifier is held on a movable active item; directional
//!   keys move it. Styled `Dragging`.
//! - `PointerDragging`: a pointer gesture is moving the active item. Styled
//!   `Dragging`. Only one gesture exists at a time.
//!
//! ## Pointer tracking
//!
//! During a gesture the reorderer remembers the last target the pointer was
//! over (hits on the drag avatar resolve to it) and the last valid landing
//! spot. Only a `UseLastKnown` classification keeps that spot; moving over a
//! forbidden position or off every drop target forgets it. A drop commits the
//! spot if one is left; both are cleared when the gesture ends, however it
//! ends.
//!
//! ```
//! use understory_reorder::handler::ListHandler;
//! use understory_reorder::input::{Key, KeyEvent, Modifiers};
//! use understory_reorder::interaction::{Effect, Reorderer};
//! use understory_reorder::layout::Layout;
//! use understory_reorder::lookup::StaticElements;
//! use understory_reorder::model::Model;
//!
//! let layout = Layout::single_column("list", "col", ["a", "b", "c"]).unwrap();
//! let lookup = StaticElements::<&str>::new();
//! let mut r = Reorderer::new(Model::new(layout), ListHandler::vertical(), lookup);
//!
//! r.focus_container();
//! let effects = r.key_down(&KeyEvent::new("a", Key::ArrowDown, Modifiers::CTRL));
//! assert!(effects.iter().any(|e| matches!(e, Effect::Moved(_))));
//! assert_eq!(r.model().columns[0].children, ["b", "a", "c"]);
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::config::ReordererConfig;
use crate::handler::LayoutHandler;
use crate::input::{KeyEvent, PointerHit};
use crate::layout::LayoutDescription;
use crate::lookup::ElementLookup;
use crate::model::Model;
use crate::types::{CommittedMove, ItemId, ItemState, MoveOutcome, Position, TargetAndPosition};

/// Where the reorderer is in an interaction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InteractionState {
    /// No item has focus.
    #[default]
    Idle,
    /// An item has focus.
    Focused,
    /// A keyboard move modifier is held on the focused item.
    Armed,
    /// A pointer gesture is dragging the focused item.
    PointerDragging,
}

/// Accessibility drop effect advertised on every drop target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DropEffect {
    /// No move in progress.
    None,
    /// Drop targets accept a move.
    Move,
}

/// A presentation change for the host to apply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect<K> {
    /// Restyle an item.
    SetItemState {
        /// Item to restyle.
        item: K,
        /// Its new display state.
        state: ItemState,
    },
    /// Move keyboard focus to an item.
    FocusItem(K),
    /// Point the container's active-descendant at an item.
    ActiveDescendant(K),
    /// Set the grabbed accessibility state of an item.
    Grab {
        /// Item concerned.
        item: K,
        /// True while it is being moved.
        grabbed: bool,
    },
    /// Set the drop effect advertised by every drop target.
    DropEffects(DropEffect),
    /// Show the "cannot drop here" warning.
    ShowDropWarning,
    /// Hide the drop warning.
    HideDropWarning,
    /// Show the drop marker at a landing spot.
    ShowDropMarker {
        /// Item or column the marker is placed against.
        target: K,
        /// Which side of `target`.
        position: Position,
    },
    /// Hide the drop marker.
    HideDropMarker,
    /// The layout changed.
    Moved(CommittedMove<K>),
}

/// Input-driven reordering over a [`Model`].
pub struct Reorderer<K, H, L> {
    model: Model<K>,
    handler: H,
    lookup: L,
    config: ReordererConfig,
    state: InteractionState,
    active: Option<K>,
    // Last target the pointer was over with a decisive drop position.
    target_over: Option<K>,
    // Last landing spot that was neither disallowed nor ambiguous.
    valid: Option<TargetAndPosition<K>>,
}

impl<K: fmt::Debug, H, L> fmt::Debug for Reorderer<K, H, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reorderer")
            .field("model", &self.model)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("active", &self.active)
            .field("target_over", &self.target_over)
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

impl<K: ItemId, H: LayoutHandler<K>, L: ElementLookup<K>> Reorderer<K, H, L> {
    /// A reorderer with the default keysets.
    pub fn new(model: Model<K>, handler: H, lookup: L) -> Self {
        Self {
            model,
            handler,
            lookup,
            config: ReordererConfig::default(),
            state: InteractionState::Idle,
            active: None,
            target_over: None,
            valid: None,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReordererConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ReordererConfig {
        &self.config
    }

    /// The current layout as an id description.
    pub fn model(&self) -> LayoutDescription<K> {
        self.model.description()
    }

    /// The underlying model.
    pub fn inner(&self) -> &Model<K> {
        &self.model
    }

    /// Mutable access to the model, e.g. to install a listener or new permissions.
    ///
    /// Changes made here are not reported to the lookup; call
    /// [`ElementLookup::model_changed`] through [`Reorderer::lookup_mut`] if it
    /// derives roles from the model.
    pub fn inner_mut(&mut self) -> &mut Model<K> {
        &mut self.model
    }

    /// The layout handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The element lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Mutable access to the element lookup, e.g. after a layout pass.
    pub fn lookup_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The active item, if any.
    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// Display state of `item`.
    pub fn item_state(&self, item: &K) -> ItemState {
        if self.active.as_ref() != Some(item) {
            return ItemState::Default;
        }
        match self.state {
            InteractionState::Idle => ItemState::Default,
            InteractionState::Focused => ItemState::Selected,
            InteractionState::Armed | InteractionState::PointerDragging => ItemState::Dragging,
        }
    }

    /// The container received focus: focus the active item, or the first
    /// selectable one.
    pub fn focus_container(&mut self) -> Vec<Effect<K>> {
        let remembered = self
            .active
            .clone()
            .filter(|a| self.model.layout().contains(a) && self.lookup.is_selectable(a));
        let target = remembered.or_else(|| {
            self.handler
                .selectables(&self.model, &self.lookup)
                .into_iter()
                .next()
        });
        let Some(target) = target else {
            return Vec::new();
        };
        let mut effects = vec![Effect::FocusItem(target.clone())];
        effects.extend(self.focus(&target));
        effects
    }

    /// `item` received focus.
    pub fn focus(&mut self, item: &K) -> Vec<Effect<K>> {
        if !self.model.layout().contains(item) || !self.lookup.is_selectable(item) {
            return Vec::new();
        }
        let same = self.active.as_ref() == Some(item);
        match self.state {
            // Refocusing the moving item keeps the move going.
            InteractionState::Armed | InteractionState::PointerDragging if same => {
                return Vec::new();
            }
            InteractionState::PointerDragging => return Vec::new(),
            _ => {}
        }
        let mut effects = Vec::new();
        if let Some(prev) = self.active.take()
            && prev != *item
        {
            if self.state == InteractionState::Armed {
                effects.extend(disarm_effects(&prev));
            }
            effects.push(Effect::SetItemState {
                item: prev,
                state: ItemState::Default,
            });
        }
        self.active = Some(item.clone());
        self.set_state(InteractionState::Focused);
        effects.push(Effect::SetItemState {
            item: item.clone(),
            state: ItemState::Selected,
        });
        effects.push(Effect::ActiveDescendant(item.clone()));
        effects
    }

    /// `item` lost focus.
    pub fn blur(&mut self, item: &K) -> Vec<Effect<K>> {
        if self.active.as_ref() != Some(item) || self.state == InteractionState::PointerDragging {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.state == InteractionState::Armed {
            effects.extend(disarm_effects(item));
        }
        if self.state != InteractionState::Idle {
            effects.push(Effect::SetItemState {
                item: item.clone(),
                state: ItemState::Default,
            });
        }
        self.set_state(InteractionState::Idle);
        effects
    }

    /// A key was pressed on `event.target`.
    pub fn key_down(&mut self, event: &KeyEvent<K>) -> Vec<Effect<K>> {
        let Some(active) = self.active.clone() else {
            return Vec::new();
        };
        if active != event.target
            || !matches!(
                self.state,
                InteractionState::Focused | InteractionState::Armed
            )
        {
            return Vec::new();
        }
        let movable = self.handler.is_movable(&self.model, &self.lookup, &active);
        let mut effects = Vec::new();
        if self.state == InteractionState::Focused && self.config.is_move(event.modifiers) && movable
        {
            self.set_state(InteractionState::Armed);
            effects.push(Effect::SetItemState {
                item: active.clone(),
                state: ItemState::Dragging,
            });
            effects.push(Effect::Grab {
                item: active.clone(),
                grabbed: true,
            });
            effects.push(Effect::DropEffects(DropEffect::Move));
        }

        let keysets = self.config.keysets.clone();
        for keyset in keysets {
            let Some(direction) = keyset.direction(event.key) else {
                continue;
            };
            if keyset.modifier_held(event.modifiers) {
                effects.push(Effect::HideDropWarning);
                if movable {
                    match self
                        .handler
                        .move_item(&mut self.model, &self.lookup, &active, direction)
                    {
                        MoveOutcome::Moved(change) => {
                            self.sync_lookup();
                            effects.push(Effect::Moved(change));
                            effects.push(Effect::FocusItem(active.clone()));
                        }
                        MoveOutcome::Disallowed { .. } => effects.push(Effect::ShowDropWarning),
                        MoveOutcome::Unchanged => {}
                    }
                }
                return effects;
            }
            if event.modifiers.is_empty() {
                if let Some(next) =
                    self.handler
                        .neighbor(&self.model, &self.lookup, &active, direction)
                {
                    effects.push(Effect::FocusItem(next.clone()));
                    effects.extend(self.focus(&next));
                }
                return effects;
            }
        }
        effects
    }

    /// A key was released on `event.target`.
    pub fn key_up(&mut self, event: &KeyEvent<K>) -> Vec<Effect<K>> {
        if self.active.as_ref() != Some(&event.target)
            || self.state != InteractionState::Armed
            || self.config.is_move(event.modifiers)
        {
            return Vec::new();
        }
        self.set_state(InteractionState::Focused);
        let mut effects = disarm_effects(&event.target);
        effects.push(Effect::SetItemState {
            item: event.target.clone(),
            state: ItemState::Selected,
        });
        effects
    }

    /// A pointer gesture started on `item`.
    pub fn drag_start(&mut self, item: &K) -> Vec<Effect<K>> {
        if self.state == InteractionState::PointerDragging
            || !self.handler.is_movable(&self.model, &self.lookup, item)
        {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.active.as_ref() != Some(item) || self.state != InteractionState::Armed {
            effects.extend(self.focus(item));
        }
        if self.active.as_ref() != Some(item) {
            return effects;
        }
        self.target_over = None;
        self.valid = None;
        self.set_state(InteractionState::PointerDragging);
        tracing::debug!(message = "reorder.drag", phase = "start", item = ?item);
        effects.push(Effect::SetItemState {
            item: item.clone(),
            state: ItemState::Dragging,
        });
        effects.push(Effect::Grab {
            item: item.clone(),
            grabbed: true,
        });
        effects.push(Effect::DropEffects(DropEffect::Move));
        effects
    }

    /// The pointer entered drop target `target`.
    pub fn drag_over(&mut self, target: &K, pointer: Point) -> Vec<Effect<K>> {
        let Some(moving) = self.dragging() else {
            return Vec::new();
        };
        let position =
            self.handler
                .drop_position(&self.model, &self.lookup, target, &moving, pointer);
        if position != Position::UseLastKnown {
            self.target_over = Some(target.clone());
        }
        Vec::new()
    }

    /// The pointer moved during a gesture; `hit` is what lies under it.
    pub fn pointer_move(&mut self, hit: &PointerHit<K>, pointer: Point) -> Vec<Effect<K>> {
        let Some(moving) = self.dragging() else {
            return Vec::new();
        };
        let Some(over) = self.target_over.clone() else {
            return Vec::new();
        };
        let target = match hit {
            PointerHit::Avatar => Some(over),
            PointerHit::DropTarget(id) if self.is_drop_target(id) => Some(id.clone()),
            PointerHit::DropTarget(_) | PointerHit::Nothing => None,
        };
        let Some(target) = target else {
            self.valid = None;
            return vec![Effect::HideDropMarker, Effect::HideDropWarning];
        };
        let position =
            self.handler
                .drop_position(&self.model, &self.lookup, &target, &moving, pointer);
        match position {
            Position::Disallowed => {
                self.valid = None;
                vec![Effect::ShowDropWarning]
            }
            Position::UseLastKnown => {
                let mut effects = vec![Effect::HideDropWarning];
                if let Some(valid) = &self.valid {
                    effects.push(Effect::ShowDropMarker {
                        target: valid.target.clone(),
                        position: valid.position,
                    });
                }
                effects
            }
            _ => {
                self.valid = Some(TargetAndPosition::new(target.clone(), position));
                vec![
                    Effect::HideDropWarning,
                    Effect::ShowDropMarker { target, position },
                ]
            }
        }
    }

    /// The pointer was released: commit the last valid landing spot, if the
    /// pointer has not since left it for a forbidden one, then end the gesture.
    pub fn drop(&mut self, pointer: Point) -> Vec<Effect<K>> {
        let Some(moving) = self.dragging() else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if let Some(valid) = self.valid.take() {
            match self.handler.mouse_move_item(
                &mut self.model,
                &self.lookup,
                &moving,
                &valid.target,
                valid.position,
                pointer,
            ) {
                MoveOutcome::Moved(change) => {
                    self.sync_lookup();
                    effects.push(Effect::Moved(change));
                }
                MoveOutcome::Disallowed { .. } => effects.push(Effect::ShowDropWarning),
                MoveOutcome::Unchanged => {}
            }
        }
        effects.extend(self.end_gesture("drop"));
        effects
    }

    /// The gesture ended without a drop on a target.
    pub fn drag_end(&mut self) -> Vec<Effect<K>> {
        self.end_gesture("end")
    }

    /// The host abandoned the gesture.
    pub fn cancel_drag(&mut self) -> Vec<Effect<K>> {
        self.end_gesture("cancel")
    }

    /// Remove `item` from the model. Removing the active item returns to `Idle`.
    pub fn remove_item(&mut self, item: &K) -> Vec<Effect<K>> {
        let mut effects = Vec::new();
        if self.active.as_ref() == Some(item) {
            effects = self.reset();
        }
        if self.target_over.as_ref() == Some(item) {
            self.target_over = None;
        }
        if self.valid.as_ref().is_some_and(|v| v.target == *item) {
            self.valid = None;
        }
        self.model.remove_item(item);
        self.sync_lookup();
        effects
    }

    /// Back to `Idle`, forgetting the active item and any gesture.
    pub fn reset(&mut self) -> Vec<Effect<K>> {
        let mut effects = Vec::new();
        if let Some(active) = self.active.take() {
            match self.state {
                InteractionState::Armed => effects.extend(disarm_effects(&active)),
                InteractionState::PointerDragging => {
                    effects.extend(disarm_effects(&active));
                    effects.push(Effect::HideDropMarker);
                }
                _ => {}
            }
            effects.push(Effect::SetItemState {
                item: active,
                state: ItemState::Default,
            });
        }
        self.target_over = None;
        self.valid = None;
        self.set_state(InteractionState::Idle);
        effects
    }

    fn dragging(&self) -> Option<K> {
        if self.state == InteractionState::PointerDragging {
            self.active.clone()
        } else {
            None
        }
    }

    fn is_drop_target(&self, id: &K) -> bool {
        self.model.layout().is_column(id) || self.lookup.is_drop_target(id)
    }

    fn sync_lookup(&mut self) {
        self.lookup
            .model_changed(self.model.layout(), self.model.permissions());
    }

    fn end_gesture(&mut self, phase: &'static str) -> Vec<Effect<K>> {
        let Some(active) = self.dragging() else {
            return Vec::new();
        };
        self.target_over = None;
        self.valid = None;
        self.set_state(InteractionState::Focused);
        tracing::debug!(message = "reorder.drag", phase, item = ?active);
        vec![
            Effect::HideDropMarker,
            Effect::HideDropWarning,
            Effect::SetItemState {
                item: active.clone(),
                state: ItemState::Selected,
            },
            Effect::Grab {
                item: active.clone(),
                grabbed: false,
            },
            Effect::DropEffects(DropEffect::None),
            Effect::FocusItem(active),
        ]
    }

    fn set_state(&mut self, state: InteractionState) {
        if self.state != state {
            tracing::debug!(
                message = "reorder.state",
                from = ?self.state,
                to = ?state,
                active = ?self.active
            );
            self.state = state;
        }
    }
}

fn disarm_effects<K: Clone>(item: &K) -> Vec<Effect<K>> {
    vec![
        Effect::HideDropWarning,
        Effect::Grab {
            item: item.clone(),
            grabbed: false,
        },
        Effect::DropEffects(DropEffect::None),
    ]
}
