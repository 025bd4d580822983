#![forbid(unsafe_code)]

//! Core: pointer-driven reordering of panels inside a container.
//!
//! # Role in sortpanel
//! `sortpanel-core` owns the drag-and-reorder state machine. It never touches
//! a real UI toolkit: the container is reached through the [`PanelHost`]
//! trait, and [`PanelList`] provides an in-memory host whose explicit child
//! sequence is the source of truth for order.
//!
//! # Primary responsibilities
//! - **Registry**: pairs drag triggers with panels by index, once.
//! - **DragSession**: grab offset, frozen size, the shadow placeholder, and
//!   all-or-nothing setup with rollback.
//! - **HoverTracker**: the panel under the pointer with its live midline.
//! - **Reorder heuristic**: midline rule that never oscillates.
//!
//! # Example
//!
//! ```
//! use sortpanel_core::{PanelHost, PanelList, PointerPosition, Size, SortConfig, Sortable};
//!
//! let mut list = PanelList::new();
//! let mut triggers = Vec::new();
//! let mut panels = Vec::new();
//! for _ in 0..4 {
//!     let panel = list.push("div", &["panel"], Size::new(200.0, 50.0));
//!     triggers.push(list.push_child(panel, "span", &["handle"]));
//!     panels.push(panel);
//! }
//! let config = SortConfig::new("panel", "sorting", "shadow", "handle").unwrap();
//! let mut sortable = Sortable::new(&list, config).unwrap();
//!
//! sortable.pointer_down(&mut list, &triggers[0], PointerPosition::new(5.0, 10.0)).unwrap();
//! sortable.pointer_enter(&list, &panels[2]).unwrap();
//! sortable.pointer_move(&mut list, PointerPosition::new(5.0, 140.0)).unwrap();
//! sortable.pointer_up(&mut list).unwrap();
//!
//! assert_eq!(list.select("panel"), vec![panels[1], panels[2], panels[0], panels[3]]);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod host;
pub mod hover;
pub mod list;
pub mod registry;
pub mod reorder;
pub mod session;
pub mod sortable;

pub use config::{DragAxis, SortConfig, SortOptions};
pub use error::{ConfigError, DragInitError, ElementRole, HostError, SortError};
pub use geometry::{Extent, PointerPosition, Size};
pub use hooks::SortHooks;
pub use host::{DragOverlay, PanelHost, ordinal_position};
pub use hover::HoverState;
pub use list::{HostOp, NodeId, PanelList};
pub use registry::{PanelId, Registry, RegistryWarning};
pub use reorder::{Midline, ReorderDecision};
pub use session::DragSession;
pub use sortable::{
    ReorderOutcome, SortDispatch, SortEffect, SortIgnoredReason, SortPhase, SortState, Sortable,
};
