// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reorderable model: a [`Layout`], its [`Permissions`], and the change hook.
//!
//! Every mutation goes through [`Model::commit`], so the listener sees each
//! committed move exactly once, after the layout has changed.
//!
//! Permission rows and gaps are numbered by position, so a move makes the old
//! matrix describe the wrong items. A model built with
//! [`Model::with_locked_items`] rederives its matrix after every change; one
//! holding an explicit matrix expects the listener to supply the next one.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::PermissionsError;
use crate::layout::{Layout, LayoutDescription};
use crate::permissions::Permissions;
use crate::types::{CommittedMove, ItemId, MoveOutcome, Position};

/// Observer of committed moves.
///
/// Called synchronously after the layout changed. Returning `Some` replaces
/// the permission matrix, e.g. with a table recomputed by a server for the new
/// arrangement.
///
/// Closures of the right shape implement this trait.
pub trait MoveListener<K> {
    /// `change` has just been applied to `layout`.
    fn moved(&mut self, change: &CommittedMove<K>, layout: &Layout<K>) -> Option<Permissions>;
}

impl<K, F> MoveListener<K> for F
where
    F: FnMut(&CommittedMove<K>, &Layout<K>) -> Option<Permissions>,
{
    fn moved(&mut self, change: &CommittedMove<K>, layout: &Layout<K>) -> Option<Permissions> {
        self(change, layout)
    }
}

/// Layout, permission matrix, and listener, owned together.
pub struct Model<K> {
    layout: Layout<K>,
    permissions: Permissions,
    // When set, `permissions` is derived from these after every change.
    locked: Option<Vec<K>>,
    listener: Option<Box<dyn MoveListener<K>>>,
}

impl<K: ItemId> Model<K> {
    /// A model whose items may move anywhere.
    pub fn new(layout: Layout<K>) -> Self {
        let permissions = Permissions::unrestricted(&layout);
        Self {
            layout,
            permissions,
            locked: None,
            listener: None,
        }
    }

    /// A model whose `locked` items stay put, with nothing landing above a
    /// locked item at the head of a column.
    ///
    /// See [`Permissions::for_locked_items`].
    pub fn with_locked_items(layout: Layout<K>, locked: impl IntoIterator<Item = K>) -> Self {
        let locked: Vec<K> = locked.into_iter().collect();
        let permissions = Permissions::for_locked_items(&locked, &layout);
        Self {
            layout,
            permissions,
            locked: Some(locked),
            listener: None,
        }
    }

    /// A model with an explicit permission matrix, which must fit `layout`.
    pub fn with_permissions(
        layout: Layout<K>,
        permissions: Permissions,
    ) -> Result<Self, PermissionsError> {
        permissions.check_dimensions(&layout)?;
        Ok(Self {
            layout,
            permissions,
            locked: None,
            listener: None,
        })
    }

    /// Install the change listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl MoveListener<K> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Builder form of [`Model::set_listener`].
    #[must_use]
    pub fn with_listener(mut self, listener: impl MoveListener<K> + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Remove the change listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout<K> {
        &self.layout
    }

    /// The current permission matrix.
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    /// The current layout as an id description.
    pub fn description(&self) -> LayoutDescription<K> {
        self.layout.to_description()
    }

    /// Items pinned by a locked-item rule, if the model has one.
    pub fn locked_items(&self) -> Option<&[K]> {
        self.locked.as_deref()
    }

    /// Replace the permission matrix. Any locked-item rule is dropped.
    pub fn set_permissions(&mut self, permissions: Permissions) -> Result<(), PermissionsError> {
        permissions.check_dimensions(&self.layout)?;
        self.permissions = permissions;
        self.locked = None;
        Ok(())
    }

    /// Replace layout and permissions together, e.g. after the host adds items.
    pub fn replace(
        &mut self,
        layout: Layout<K>,
        permissions: Permissions,
    ) -> Result<(), PermissionsError> {
        permissions.check_dimensions(&layout)?;
        self.layout = layout;
        self.permissions = permissions;
        self.locked = None;
        Ok(())
    }

    /// Forward to [`Permissions::can_move`] against the current layout.
    pub fn can_move(&self, item: &K, target: &K, position: Position) -> bool {
        self.permissions
            .can_move(&self.layout, item, target, position)
    }

    /// Is `item` allowed to move anywhere at all?
    pub fn can_item_move(&self, item: &K) -> bool {
        self.layout
            .item_ordinal(item)
            .is_some_and(|ordinal| self.permissions.can_item_move(ordinal))
    }

    /// Apply a move and notify the listener.
    ///
    /// Permissions are not consulted here; handlers check them while picking
    /// the target. A move that leaves the layout as it was is `Unchanged` and
    /// is not reported.
    pub fn commit(&mut self, item: &K, target: &K, position: Position) -> MoveOutcome<K> {
        if !self.layout.move_item(item, target, position) {
            return MoveOutcome::Unchanged;
        }
        let change = CommittedMove {
            item: item.clone(),
            target: target.clone(),
            position,
        };
        tracing::debug!(
            message = "reorder.commit",
            item = ?change.item,
            target = ?change.target,
            position = ?change.position
        );
        self.rederive();
        let replacement = self
            .listener
            .as_mut()
            .and_then(|listener| listener.moved(&change, &self.layout));
        if let Some(permissions) = replacement
            && let Err(err) = self.set_permissions(permissions)
        {
            tracing::warn!(message = "reorder.permissions_rejected", %err);
        }
        MoveOutcome::Moved(change)
    }

    /// Take `item` out of the layout, dropping its permission row.
    ///
    /// Returns whether it was present. The listener is not called.
    pub fn remove_item(&mut self, item: &K) -> bool {
        let (Some(ordinal), Some(gap)) = (
            self.layout.item_ordinal(item),
            self.layout.gap_index(item, Position::Before),
        ) else {
            return false;
        };
        self.layout.remove_item(item);
        self.permissions.remove_item(ordinal, gap);
        self.rederive();
        tracing::debug!(message = "reorder.remove", item = ?item);
        true
    }

    fn rederive(&mut self) {
        if let Some(locked) = &self.locked {
            self.permissions = Permissions::for_locked_items(locked, &self.layout);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Model<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("layout", &self.layout)
            .field("permissions", &self.permissions)
            .field("locked", &self.locked)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnDescription;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn two_columns() -> Layout<&'static str> {
        Layout::from_description(LayoutDescription {
            id: "portal",
            columns: vec![
                ColumnDescription {
                    id: "col1",
                    children: vec!["x", "y"],
                },
                ColumnDescription {
                    id: "col2",
                    children: vec!["z"],
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn listener_sees_each_commit_once() {
        let seen: Rc<RefCell<Vec<CommittedMove<&str>>>> = Rc::default();
        let log = Rc::clone(&seen);
        let mut model = Model::new(two_columns()).with_listener(
            move |change: &CommittedMove<&'static str>, layout: &Layout<&'static str>| {
                assert!(layout.contains(&change.item));
                log.borrow_mut().push(change.clone());
                None
            },
        );

        let outcome = model.commit(&"x", &"z", Position::After);
        assert_eq!(
            outcome.committed(),
            Some(&CommittedMove {
                item: "x",
                target: "z",
                position: Position::After
            })
        );
        // A no-op is not reported.
        assert_eq!(model.commit(&"x", &"z", Position::After), MoveOutcome::Unchanged);
        assert_eq!(model.commit(&"x", &"x", Position::Before), MoveOutcome::Unchanged);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(model.description().columns[1].children, vec!["z", "x"]);
    }

    #[test]
    fn listener_can_replace_permissions() {
        let mut model = Model::new(two_columns()).with_listener(
            |_: &CommittedMove<&'static str>, layout: &Layout<&'static str>| {
                Some(Permissions::for_locked_items(&["z"], layout))
            },
        );
        assert!(model.can_item_move(&"z"));
        model.commit(&"y", &"z", Position::Before);
        assert!(!model.can_item_move(&"z"));
    }

    #[test]
    fn mismatched_permissions_are_refused() {
        let small = Layout::single_column("p", "c", vec!["a"]).unwrap();
        let mut model = Model::new(two_columns());
        let err = model
            .set_permissions(Permissions::unrestricted(&small))
            .unwrap_err();
        assert!(matches!(err, PermissionsError::ShapeMismatch { .. }));
        assert!(Model::with_permissions(two_columns(), Permissions::unrestricted(&small)).is_err());
    }

    #[test]
    fn removing_keeps_permissions_in_shape() {
        let layout = two_columns();
        let perms = Permissions::for_locked_items(&["x"], &layout);
        let mut model = Model::with_permissions(layout, perms).unwrap();
        assert!(model.remove_item(&"y"));
        assert!(!model.remove_item(&"y"));
        assert!(model.permissions().check_dimensions(model.layout()).is_ok());
        assert!(!model.can_item_move(&"x"));
        assert!(model.can_move(&"z", &"x", Position::After));
    }

    #[test]
    fn locked_rule_follows_moves() {
        let mut model = Model::with_locked_items(two_columns(), ["x"]);
        // z joins col1 below the pinned x.
        model.commit(&"z", &"x", Position::After);
        assert_eq!(model.description().columns[0].children, vec!["x", "z", "y"]);
        assert_eq!(model.permissions(), &Permissions::for_locked_items(&["x"], model.layout()));
        assert!(!model.can_item_move(&"x"));
        assert!(!model.can_move(&"y", &"x", Position::Before));

        // An explicit matrix replaces the rule.
        let explicit = Permissions::unrestricted(model.layout());
        model.set_permissions(explicit).unwrap();
        assert_eq!(model.locked_items(), None);
        assert!(model.can_item_move(&"x"));
    }
}
