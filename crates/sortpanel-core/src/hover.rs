#![forbid(unsafe_code)]

//! Hover tracking during an active drag.

use std::fmt;

use crate::error::HostError;
use crate::host::{PanelHost, ordinal_position};
use crate::registry::PanelId;

/// Panel under the pointer, with its live midline and ordinal position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub panel: PanelId,
    pub midpoint_y: f64,
    pub position: usize,
}

impl HoverState {
    /// Measure `node` from the live container.
    pub fn measure<H>(
        host: &H,
        panel_class: &str,
        panel: PanelId,
        node: &H::Node,
    ) -> Result<Self, HostError>
    where
        H: PanelHost + ?Sized,
    {
        let extent = host.extent(node)?;
        let position = ordinal_position(host, panel_class, node)
            .ok_or_else(|| HostError::Detached(format!("{node:?}")))?;
        Ok(Self {
            panel,
            midpoint_y: extent.midpoint_y(),
            position,
        })
    }
}

impl fmt::Display for HoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (midline {:.1})",
            self.panel, self.position, self.midpoint_y
        )
    }
}

/// Holds at most one [`HoverState`].
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    current: Option<HoverState>,
}

impl HoverTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    #[must_use]
    pub const fn current(&self) -> Option<HoverState> {
        self.current
    }

    /// Replace the hover target.
    pub fn enter(&mut self, state: HoverState) {
        self.current = Some(state);
    }

    /// Clear the target if it is `panel`. Returns whether it was cleared.
    ///
    /// A leave for some other panel is stale (the enter for the new target
    /// already arrived) and is dropped.
    pub fn leave(&mut self, panel: PanelId) -> bool {
        if self.current.is_some_and(|state| state.panel == panel) {
            self.current = None;
            return true;
        }
        false
    }

    /// Overwrite midpoint and position after a container mutation.
    pub fn refresh(&mut self, state: HoverState) {
        if self
            .current
            .is_some_and(|current| current.panel == state.panel)
        {
            self.current = Some(state);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
