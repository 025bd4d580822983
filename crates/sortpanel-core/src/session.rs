#![forbid(unsafe_code)]

//! Drag session lifecycle: open, track, commit, restore.
//!
//! # Invariants
//!
//! 1. A [`DragSession`] owns exactly one shadow; the shadow is inserted into
//!    the container before the session value exists and removed by
//!    [`DragSession::commit`] / [`DragSession::restore`], which consume it.
//! 2. [`DragSession::open`] is all-or-nothing: on error every mutation it made
//!    is undone in reverse order.
//! 3. The shadow carries the panel class, so its ordinal position counts the
//!    same way a real panel's does.

use crate::config::SortConfig;
use crate::error::{DragInitError, HostError};
use crate::geometry::{PointerPosition, Size};
use crate::host::{DragOverlay, PanelHost, ordinal_position};
use crate::registry::PanelId;

/// Pointer-to-panel offset captured at grab time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrabOffset {
    pub x: f64,
    pub y: f64,
}

/// Placeholder marking where the dragged panel will land.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow<N> {
    node: N,
    position: usize,
}

impl<N> Shadow<N> {
    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Ordinal among panel-class nodes, as of the last re-scan.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// State of one press-drag-release interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<N> {
    panel: PanelId,
    node: N,
    shadow: Shadow<N>,
    offset: GrabOffset,
    size: Size,
    origin_position: usize,
    overlay: DragOverlay,
    follows_x: bool,
}

/// Mutations done so far by [`DragSession::open`], newest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum OpenStage {
    ShadowCreated,
    ShadowInserted,
    PanelAppended,
    SortingClassAdded,
    OverlayApplied,
}

impl<N: Clone + PartialEq + std::fmt::Debug> DragSession<N> {
    /// Grab `node` at `pointer` and set up the shadow.
    pub fn open<H>(
        host: &mut H,
        config: &SortConfig,
        panel: PanelId,
        node: &N,
        pointer: PointerPosition,
    ) -> Result<Self, DragInitError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let extent = host.extent(node)?;
        let offset = GrabOffset {
            x: pointer.x - extent.left,
            y: pointer.y - extent.top,
        };
        let size = extent.size();
        let follows_x = config.axis().follows_x();
        let overlay = DragOverlay::grabbed(extent.top, follows_x.then_some(extent.left), size);

        let shadow = host.create_shadow(
            node,
            &[config.panel_class(), config.shadow_class()],
            size,
        )?;

        let mut stage = OpenStage::ShadowCreated;
        let result = install(host, config, node, &shadow, overlay, &mut stage);

        match result {
            Ok(position) => {
                tracing::debug!(%panel, shadow_position = position, "drag session opened");
                Ok(Self {
                    panel,
                    node: node.clone(),
                    shadow: Shadow {
                        node: shadow,
                        position,
                    },
                    offset,
                    size,
                    origin_position: position,
                    overlay,
                    follows_x,
                })
            }
            Err(error) => {
                tracing::debug!(%panel, ?stage, %error, "drag session open failed, rolling back");
                rollback(host, config, node, &shadow, stage);
                Err(error)
            }
        }
    }

    #[must_use]
    pub const fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    #[must_use]
    pub fn shadow(&self) -> &Shadow<N> {
        &self.shadow
    }

    #[must_use]
    pub const fn offset(&self) -> GrabOffset {
        self.offset
    }

    /// Size frozen at grab time.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Ordinal position the panel had before the drag.
    #[must_use]
    pub const fn origin_position(&self) -> usize {
        self.origin_position
    }

    /// Overlay as last written to the host.
    #[must_use]
    pub const fn overlay(&self) -> DragOverlay {
        self.overlay
    }

    /// Follow the pointer. Returns `true` when the overlay was rewritten.
    ///
    /// Non-finite positions leave the overlay untouched.
    pub fn track<H>(&mut self, host: &mut H, pointer: PointerPosition) -> Result<bool, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        if !pointer.is_finite() {
            return Ok(false);
        }
        let mut next = self.overlay;
        next.top = pointer.y - self.offset.y;
        if self.follows_x {
            next.left = Some(pointer.x - self.offset.x);
        }
        if next == self.overlay {
            return Ok(false);
        }
        host.set_overlay(&self.node, Some(next))?;
        self.overlay = next;
        Ok(true)
    }

    /// Re-derive the shadow's ordinal position from the container.
    pub fn rescan_shadow<H>(&mut self, host: &H, panel_class: &str) -> Result<usize, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let position = ordinal_position(host, panel_class, &self.shadow.node)
            .ok_or_else(|| HostError::Detached(format!("{:?}", self.shadow.node)))?;
        self.shadow.position = position;
        Ok(position)
    }

    /// Drop the panel where the shadow is and discard the shadow.
    ///
    /// Every step is attempted even if an earlier one fails; the first error
    /// is returned. On success yields the panel's final ordinal position.
    pub fn commit<H>(self, host: &mut H, config: &SortConfig) -> Result<usize, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let mut first_error = None;
        let mut record = |result: Result<(), HostError>| {
            if let Err(error) = result {
                first_error.get_or_insert(error);
            }
        };
        record(self.release_presentation(host, config));
        record(host.insert_before(&self.node, &self.shadow.node));
        record(host.remove(&self.shadow.node));
        if let Some(error) = first_error {
            return Err(error);
        }
        ordinal_position(host, config.panel_class(), &self.node)
            .ok_or_else(|| HostError::Detached(format!("{:?}", self.node)))
    }

    /// Put the panel back at its pre-drag ordinal position and discard the
    /// shadow.
    pub fn restore<H>(self, host: &mut H, config: &SortConfig) -> Result<usize, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let mut first_error = None;
        let mut record = |result: Result<(), HostError>| {
            if let Err(error) = result {
                first_error.get_or_insert(error);
            }
        };
        record(self.release_presentation(host, config));

        let others: Vec<N> = host
            .select(config.panel_class())
            .into_iter()
            .filter(|candidate| *candidate != self.node && *candidate != self.shadow.node)
            .collect();
        let placed = match (others.get(self.origin_position), others.last()) {
            (Some(next), _) => host.insert_before(&self.node, next),
            (None, Some(last)) => host.insert_after(&self.node, last),
            (None, None) => host.insert_before(&self.node, &self.shadow.node),
        };
        record(placed);
        record(host.remove(&self.shadow.node));
        if let Some(error) = first_error {
            return Err(error);
        }
        ordinal_position(host, config.panel_class(), &self.node)
            .ok_or_else(|| HostError::Detached(format!("{:?}", self.node)))
    }

    fn release_presentation<H>(&self, host: &mut H, config: &SortConfig) -> Result<(), HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let class = host.remove_class(&self.node, config.sorting_class());
        let overlay = host.set_overlay(&self.node, None);
        class.and(overlay)
    }
}

fn install<H>(
    host: &mut H,
    config: &SortConfig,
    node: &H::Node,
    shadow: &H::Node,
    overlay: DragOverlay,
    stage: &mut OpenStage,
) -> Result<usize, DragInitError>
where
    H: PanelHost + ?Sized,
{
    host.insert_before(shadow, node)?;
    *stage = OpenStage::ShadowInserted;
    host.append(node)?;
    *stage = OpenStage::PanelAppended;
    host.add_class(node, config.sorting_class())?;
    *stage = OpenStage::SortingClassAdded;
    host.set_overlay(node, Some(overlay))?;
    *stage = OpenStage::OverlayApplied;
    ordinal_position(host, config.panel_class(), shadow).ok_or(DragInitError::ShadowNotFound)
}

fn rollback<H>(
    host: &mut H,
    config: &SortConfig,
    node: &H::Node,
    shadow: &H::Node,
    stage: OpenStage,
) where
    H: PanelHost + ?Sized,
{
    let mut undo = Vec::new();
    if stage >= OpenStage::OverlayApplied {
        undo.push(host.set_overlay(node, None));
    }
    if stage >= OpenStage::SortingClassAdded {
        undo.push(host.remove_class(node, config.sorting_class()));
    }
    if stage >= OpenStage::PanelAppended {
        undo.push(host.insert_before(node, shadow));
    }
    undo.push(host.remove(shadow));
    for error in undo.into_iter().filter_map(Result::err) {
        tracing::error!(%error, "drag session rollback step failed");
    }
}
