// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: keyboard and pointer reordering for lists, grids, and
//! multi-column module layouts.
//!
//! ## Overview
//!
//! The crate owns the *order* of a set of items and decides where a moving
//! item lands. It does not render, hit test, or manage focus itself: the host
//! toolkit supplies geometry and roles through [`ElementLookup`](crate::lookup::ElementLookup),
//! delivers input to a [`Reorderer`](crate::interaction::Reorderer), and applies the
//! [`Effect`](crate::interaction::Effect)s it returns.
//!
//! ## Pieces
//!
//! - [`Layout`](crate::layout::Layout): a container of ordered columns of item ids, with a
//!   serializable id description.
//! - [`Permissions`](crate::permissions::Permissions): an item × gap table of legal landing spots,
//!   either explicit or derived from a set of locked items.
//! - [`inference`](crate::inference): pure target/position searches (linear with wrap,
//!   geometric, and permission-aware column scans).
//! - [`handler`](crate::handler): one [`LayoutHandler`](crate::handler::LayoutHandler) per topology:
//!   list, grid, and module columns.
//! - [`Model`](crate::model::Model): layout + permissions + a change listener; all mutation goes
//!   through [`Model::commit`](crate::model::Model::commit).
//! - [`Reorderer`](crate::interaction::Reorderer): the focus / armed / pointer-drag state machine.
//!
//! ## Positions
//!
//! A landing spot is a target plus a [`Position`](crate::types::Position): `Before` or `After` an
//! item, or `Inside` (appended to) a column. Inference may instead answer
//! `Disallowed` (a target exists but the permissions forbid it) or `UseLastKnown`
//! (the geometry does not decide); those never mutate the layout.
//!
//! ## Example
//!
//! ```
//! use understory_reorder::handler::{LayoutHandler, ModuleHandler};
//! use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
//! use understory_reorder::lookup::StaticElements;
//! use understory_reorder::model::Model;
//!
//! let layout = Layout::from_description(LayoutDescription {
//!     id: "portal",
//!     columns: vec![
//!         ColumnDescription { id: "left", children: vec!["news", "weather"] },
//!         ColumnDescription { id: "right", children: vec!["mail"] },
//!     ],
//! })
//! .unwrap();
//! let mut model = Model::with_locked_items(layout, ["news"]);
//! let lookup = StaticElements::new().with_locked("news");
//!
//! let handler = ModuleHandler::new();
//! handler.move_item_right(&mut model, &lookup, &"weather");
//! assert_eq!(model.description().columns[1].children, ["weather", "mail"]);
//!
//! // The locked module stays put.
//! handler.move_item_right(&mut model, &lookup, &"news");
//! assert_eq!(model.description().columns[0].children, ["news"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod handler;
pub mod inference;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod lookup;
pub mod model;
pub mod permissions;
pub mod types;
