#![forbid(unsafe_code)]

//! Host pointer messages and single-entry dispatch into the adapter.
//!
//! A JS host forwards DOM pointer events as [`PointerMessage`] values whose
//! targets are host-side handles (raw indices on the wire). After resolving
//! targets to node handles, [`SortPointerAdapter::apply`] routes each message
//! to the matching lifecycle method.

use std::fmt;

use sortpanel_core::{DragInitError, HostError, PanelHost, PointerPosition};

use crate::pointer_adapter::{PointerButton, PointerScope, SortPointerAdapter, SortPointerDispatch};

/// One pointer lifecycle signal from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMessage<T = u32> {
    Down {
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
        target: T,
    },
    Move {
        pointer_id: u32,
        position: PointerPosition,
        scope: PointerScope,
    },
    Up {
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    },
    Enter {
        pointer_id: u32,
        target: T,
    },
    Leave {
        pointer_id: u32,
        target: T,
    },
    Cancel {
        pointer_id: Option<u32>,
    },
    ContainerLeave {
        pointer_id: u32,
    },
    Blur,
    VisibilityHidden,
    LostCapture {
        pointer_id: u32,
    },
    CaptureAcquired {
        pointer_id: u32,
    },
}

impl<T> PointerMessage<T> {
    /// Resolve the target handle, if the message carries one.
    ///
    /// Returns `None` when `resolve` cannot map the target.
    pub fn resolve<U>(self, mut resolve: impl FnMut(T) -> Option<U>) -> Option<PointerMessage<U>> {
        Some(match self {
            Self::Down {
                pointer_id,
                button,
                position,
                target,
            } => PointerMessage::Down {
                pointer_id,
                button,
                position,
                target: resolve(target)?,
            },
            Self::Enter { pointer_id, target } => PointerMessage::Enter {
                pointer_id,
                target: resolve(target)?,
            },
            Self::Leave { pointer_id, target } => PointerMessage::Leave {
                pointer_id,
                target: resolve(target)?,
            },
            Self::Move {
                pointer_id,
                position,
                scope,
            } => PointerMessage::Move {
                pointer_id,
                position,
                scope,
            },
            Self::Up {
                pointer_id,
                button,
                position,
            } => PointerMessage::Up {
                pointer_id,
                button,
                position,
            },
            Self::Cancel { pointer_id } => PointerMessage::Cancel { pointer_id },
            Self::ContainerLeave { pointer_id } => PointerMessage::ContainerLeave { pointer_id },
            Self::Blur => PointerMessage::Blur,
            Self::VisibilityHidden => PointerMessage::VisibilityHidden,
            Self::LostCapture { pointer_id } => PointerMessage::LostCapture { pointer_id },
            Self::CaptureAcquired { pointer_id } => PointerMessage::CaptureAcquired { pointer_id },
        })
    }

    /// Pointer the message belongs to, if it names one.
    #[must_use]
    pub const fn pointer_id(&self) -> Option<u32> {
        match self {
            Self::Down { pointer_id, .. }
            | Self::Move { pointer_id, .. }
            | Self::Up { pointer_id, .. }
            | Self::Enter { pointer_id, .. }
            | Self::Leave { pointer_id, .. }
            | Self::ContainerLeave { pointer_id }
            | Self::LostCapture { pointer_id }
            | Self::CaptureAcquired { pointer_id } => Some(*pointer_id),
            Self::Cancel { pointer_id } => *pointer_id,
            Self::Blur | Self::VisibilityHidden => None,
        }
    }
}

/// Failure while applying a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortPointerError {
    /// Opening the drag session failed and was rolled back.
    DragInit(DragInitError),
    /// A host operation failed mid-drag.
    Host(HostError),
}

impl fmt::Display for SortPointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DragInit(err) => write!(f, "drag init failed: {err}"),
            Self::Host(err) => write!(f, "host operation failed: {err}"),
        }
    }
}

impl std::error::Error for SortPointerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DragInit(err) => Some(err),
            Self::Host(err) => Some(err),
        }
    }
}

impl From<DragInitError> for SortPointerError {
    fn from(err: DragInitError) -> Self {
        Self::DragInit(err)
    }
}

impl From<HostError> for SortPointerError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

impl<N: Clone + PartialEq + fmt::Debug> SortPointerAdapter<N> {
    /// Route one resolved message to its lifecycle handler.
    pub fn apply<H>(
        &mut self,
        host: &mut H,
        message: PointerMessage<N>,
    ) -> Result<SortPointerDispatch, SortPointerError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let pointer_id = message.pointer_id();
        let dispatch = match message {
            PointerMessage::Down {
                pointer_id,
                button,
                position,
                target,
            } => self.pointer_down(host, &target, pointer_id, button, position)?,
            PointerMessage::Move {
                pointer_id,
                position,
                scope,
            } => self.pointer_move(host, pointer_id, position, scope)?,
            PointerMessage::Up {
                pointer_id,
                button,
                position,
            } => self.pointer_up(host, pointer_id, button, position)?,
            PointerMessage::Enter { pointer_id, target } => {
                self.pointer_enter(host, pointer_id, &target)?
            }
            PointerMessage::Leave { pointer_id, target } => self.pointer_leave(pointer_id, &target),
            PointerMessage::Cancel { pointer_id } => self.pointer_cancel(host, pointer_id)?,
            PointerMessage::ContainerLeave { pointer_id } => {
                self.container_leave(host, pointer_id)?
            }
            PointerMessage::Blur => self.blur(host)?,
            PointerMessage::VisibilityHidden => self.visibility_hidden(host)?,
            PointerMessage::LostCapture { pointer_id } => {
                self.lost_pointer_capture(host, pointer_id)?
            }
            PointerMessage::CaptureAcquired { pointer_id } => self.capture_acquired(pointer_id),
        };
        tracing::trace!(
            pointer = ?pointer_id,
            phase = ?dispatch.log.phase,
            outcome = ?dispatch.log.outcome,
            "pointer message applied"
        );
        Ok(dispatch)
    }
}
