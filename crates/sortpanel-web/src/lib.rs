#![forbid(unsafe_code)]

//! `sortpanel-web` bridges browser pointer events into a `sortpanel-core`
//! [`Sortable`](sortpanel_core::Sortable).
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding JS forwards pointer events and applies
//!   the capture commands it gets back.
//! - **One pointer at a time**: competing pointers are ignored, not queued.
//! - **No web-sys**: the container is reached through
//!   [`PanelHost`](sortpanel_core::PanelHost), so everything here runs natively
//!   in tests.

pub mod message;
pub mod pointer_adapter;

#[cfg(feature = "input-parser")]
pub mod input_parser;

pub use message::{PointerMessage, SortPointerError};
pub use pointer_adapter::{
    PointerButton, PointerScope, SortCaptureCommand, SortPointerAdapter, SortPointerConfig,
    SortPointerDispatch, SortPointerIgnoredReason, SortPointerLogEntry, SortPointerLogOutcome,
    SortPointerPhase,
};

#[cfg(feature = "input-parser")]
pub use input_parser::{PointerMessageError, parse_pointer_message};
