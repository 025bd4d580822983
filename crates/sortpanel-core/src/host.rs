#![forbid(unsafe_code)]

//! The container seen from the reorder machine.
//!
//! A [`PanelHost`] owns the physical nodes and their sibling order. The
//! machine never caches that order: every ordinal position is re-derived with
//! [`ordinal_position`] from a fresh [`PanelHost::select`] after each
//! mutation.

use std::fmt;

use crate::error::HostError;
use crate::geometry::{Extent, Size};

/// Inline presentation overrides applied to the dragged panel.
///
/// The overlay takes the panel out of normal flow, pins its frozen size, and
/// disables pointer events on it so hover reaches the panels underneath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOverlay {
    pub top: f64,
    /// `None` leaves horizontal placement to the host.
    pub left: Option<f64>,
    pub size: Size,
    pub pointer_events: bool,
}

impl DragOverlay {
    /// Overlay for a freshly grabbed panel.
    #[must_use]
    pub const fn grabbed(top: f64, left: Option<f64>, size: Size) -> Self {
        Self {
            top,
            left,
            size,
            pointer_events: false,
        }
    }
}

/// Container operations needed by [`Sortable`](crate::Sortable).
///
/// All mutations address direct children of the container. `select` returns
/// matches in document order; shadow nodes created through
/// [`create_shadow`](Self::create_shadow) must be returned by `select` for
/// every class they carry.
pub trait PanelHost {
    /// Stable node handle.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Nodes carrying `class`, in document order.
    fn select(&self, class: &str) -> Vec<Self::Node>;

    /// Live rendered box of `node`.
    fn extent(&self, node: &Self::Node) -> Result<Extent, HostError>;

    /// Create a detached node with the same tag as `template`, the given
    /// classes, and a fixed size.
    fn create_shadow(
        &mut self,
        template: &Self::Node,
        classes: &[&str],
        size: Size,
    ) -> Result<Self::Node, HostError>;

    /// Move or insert `node` immediately before `reference`.
    fn insert_before(&mut self, node: &Self::Node, reference: &Self::Node)
    -> Result<(), HostError>;

    /// Move or insert `node` immediately after `reference`.
    fn insert_after(&mut self, node: &Self::Node, reference: &Self::Node) -> Result<(), HostError>;

    /// Move or insert `node` as the container's last child.
    fn append(&mut self, node: &Self::Node) -> Result<(), HostError>;

    /// Detach and discard `node`.
    fn remove(&mut self, node: &Self::Node) -> Result<(), HostError>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), HostError>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), HostError>;

    /// Apply (`Some`) or clear (`None`) the inline drag overlay.
    fn set_overlay(
        &mut self,
        node: &Self::Node,
        overlay: Option<DragOverlay>,
    ) -> Result<(), HostError>;
}

/// Index of `node` among the container's `class` elements, by live re-scan.
pub fn ordinal_position<H: PanelHost + ?Sized>(
    host: &H,
    class: &str,
    node: &H::Node,
) -> Option<usize> {
    host.select(class).iter().position(|candidate| candidate == node)
}
