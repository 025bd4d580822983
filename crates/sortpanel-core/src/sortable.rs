#![forbid(unsafe_code)]

//! Sortable container controller.
//!
//! [`Sortable`] composes the registry, drag session, hover tracker, and
//! reorder heuristic into one `Idle`/`Dragging` machine. The container itself
//! is not owned: every handler borrows the host, so the session and hover
//! state live in the controller value that the event loop passes around.
//!
//! # State machine
//!
//! ```text
//!            pointer_down(trigger)
//!   Idle ───────────────────────────▶ Dragging
//!    ▲                                  │  pointer_move / pointer_enter /
//!    │   pointer_up | cancel            │  pointer_leave (stay Dragging)
//!    └──────────────────────────────────┘
//! ```
//!
//! Every handler returns a [`SortDispatch`]. Events that do not apply to the
//! current state (pointer-up while idle, hover while idle, a second
//! pointer-down while dragging) are reported as
//! [`SortEffect::Ignored`] and never mutate anything.

use std::fmt;

use crate::config::{SortConfig, SortOptions};
use crate::error::{DragInitError, HostError, SortError};
use crate::geometry::PointerPosition;
use crate::hooks::SortHooks;
use crate::host::PanelHost;
use crate::hover::{HoverState, HoverTracker};
use crate::registry::{PanelId, Registry, RegistryWarning};
use crate::reorder::{self, Midline, ReorderDecision};
use crate::session::DragSession;

/// Coarse machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortState {
    Idle,
    Dragging {
        panel: PanelId,
        shadow_position: usize,
    },
}

/// Handler that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerEnter,
    PointerLeave,
    Cancel,
}

/// Why an event was dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIgnoredReason {
    NoActiveSession,
    SessionAlreadyActive,
    UnknownTrigger,
    /// Trigger index has no panel at the same index.
    UnpairedTrigger,
    UnregisteredPanel,
    ActivePanelHovered,
    HoverTargetMismatch,
    /// Pointer coordinates were NaN or infinite.
    NonFinitePointer,
}

/// Reorder result of one pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// No hovered panel; only the overlay followed the pointer.
    NoHover,
    /// Shadow already on the requested side.
    Held(Midline),
    /// Shadow moved between ordinal positions.
    Moved { from: usize, to: usize },
}

/// Observable result of one handler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortEffect {
    Started {
        panel: PanelId,
        shadow_position: usize,
    },
    Tracked {
        panel: PanelId,
        overlay_written: bool,
        reorder: ReorderOutcome,
    },
    HoverEntered(HoverState),
    HoverCleared {
        panel: PanelId,
    },
    Dropped {
        panel: PanelId,
        from: usize,
        to: usize,
    },
    Canceled {
        panel: PanelId,
        position: usize,
    },
    Ignored(SortIgnoredReason),
}

/// One handler call, with a sequence number for applied effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortDispatch {
    pub phase: SortPhase,
    /// `None` for ignored events.
    pub sequence: Option<u64>,
    pub effect: SortEffect,
}

impl SortDispatch {
    fn ignored(phase: SortPhase, reason: SortIgnoredReason) -> Self {
        Self {
            phase,
            sequence: None,
            effect: SortEffect::Ignored(reason),
        }
    }

    /// Whether the event was dropped.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.effect, SortEffect::Ignored(_))
    }

    /// Whether the shadow changed ordinal position.
    #[must_use]
    pub const fn shadow_moved(&self) -> bool {
        matches!(
            self.effect,
            SortEffect::Tracked {
                reorder: ReorderOutcome::Moved { .. },
                ..
            }
        )
    }
}

/// Reorder controller for one container.
pub struct Sortable<N> {
    config: SortConfig,
    registry: Registry<N>,
    hooks: SortHooks,
    session: Option<DragSession<N>>,
    hover: HoverTracker,
    next_sequence: u64,
}

impl<N: Clone + PartialEq + fmt::Debug> Sortable<N> {
    /// Build the registry from `host`. Nothing is mutated.
    pub fn new<H>(host: &H, config: SortConfig) -> Result<Self, SortError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let registry = Registry::build(host, &config)?;
        tracing::debug!(
            panels = registry.panels().len(),
            triggers = registry.triggers().len(),
            panel_class = config.panel_class(),
            "sortable container registered"
        );
        Ok(Self {
            config,
            registry,
            hooks: SortHooks::default(),
            session: None,
            hover: HoverTracker::new(),
            next_sequence: 1,
        })
    }

    /// Validate `options` and build.
    pub fn from_options<H>(host: &H, options: SortOptions) -> Result<Self, SortError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        Self::new(host, options.validate()?)
    }

    /// Install lifecycle hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: SortHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    #[must_use]
    pub fn warning(&self) -> Option<RegistryWarning> {
        self.registry.warning()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession<N>> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn hover(&self) -> Option<HoverState> {
        self.hover.current()
    }

    #[must_use]
    pub fn state(&self) -> SortState {
        match &self.session {
            Some(session) => SortState::Dragging {
                panel: session.panel(),
                shadow_position: session.shadow().position(),
            },
            None => SortState::Idle,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer pressed on `trigger`.
    ///
    /// Opens a session for the paired panel. A second pointer-down while a
    /// session is open is ignored.
    pub fn pointer_down<H>(
        &mut self,
        host: &mut H,
        trigger: &N,
        position: PointerPosition,
    ) -> Result<SortDispatch, DragInitError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPhase::PointerDown;
        if self.session.is_some() {
            return Ok(SortDispatch::ignored(
                phase,
                SortIgnoredReason::SessionAlreadyActive,
            ));
        }
        if !position.is_finite() {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NonFinitePointer));
        }
        let Some(index) = self.registry.trigger_index(trigger) else {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::UnknownTrigger));
        };
        let Some((panel, node)) = self.registry.resolve_trigger(trigger) else {
            tracing::debug!(trigger = index, "pointer-down on unpaired drag trigger");
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::UnpairedTrigger));
        };
        let node = node.clone();

        let session = DragSession::open(host, &self.config, panel, &node, position)?;
        let shadow_position = session.shadow().position();
        self.hover.clear();
        self.session = Some(session);
        self.hooks.sort_start();
        Ok(self.applied(
            phase,
            SortEffect::Started {
                panel,
                shadow_position,
            },
        ))
    }

    /// Pointer moved inside the container.
    pub fn pointer_move<H>(
        &mut self,
        host: &mut H,
        position: PointerPosition,
    ) -> Result<SortDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPhase::PointerMove;
        let Some(session) = self.session.as_mut() else {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NoActiveSession));
        };
        if !position.is_finite() {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NonFinitePointer));
        }
        let panel = session.panel();
        let overlay_written = session.track(host, position)?;

        let reorder = match self.hover.current() {
            None => ReorderOutcome::NoHover,
            Some(hover) => {
                let from = session.shadow().position();
                match reorder::decide(position.y, from, &hover) {
                    ReorderDecision::Hold(side) => ReorderOutcome::Held(side),
                    decision => {
                        let Some(hovered) = self.registry.panel(hover.panel) else {
                            return Err(HostError::UnknownNode(hover.panel.to_string()));
                        };
                        let shadow = session.shadow().node().clone();
                        if decision == ReorderDecision::MoveBefore {
                            host.insert_before(&shadow, hovered)?;
                        } else {
                            host.insert_after(&shadow, hovered)?;
                        }
                        let to = session.rescan_shadow(host, self.config.panel_class())?;
                        self.hover.refresh(HoverState::measure(
                            host,
                            self.config.panel_class(),
                            hover.panel,
                            hovered,
                        )?);
                        tracing::trace!(
                            %panel,
                            hovered = %hover.panel,
                            y = position.y,
                            midpoint = hover.midpoint_y,
                            from,
                            to,
                            "shadow moved"
                        );
                        ReorderOutcome::Moved { from, to }
                    }
                }
            }
        };

        if matches!(reorder, ReorderOutcome::Moved { from, to } if from != to) {
            self.hooks.sort_change();
        }
        Ok(self.applied(
            phase,
            SortEffect::Tracked {
                panel,
                overlay_written,
                reorder,
            },
        ))
    }

    /// Pointer released anywhere in the document.
    ///
    /// Commits the panel at the shadow's position. Inert when idle. On a host
    /// failure the session is still torn down and the error returned.
    pub fn pointer_up<H>(&mut self, host: &mut H) -> Result<SortDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPhase::PointerUp;
        let Some(session) = self.session.take() else {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NoActiveSession));
        };
        self.hover.clear();
        let panel = session.panel();
        let from = session.origin_position();
        let result = session.commit(host, &self.config);
        self.hooks.sort_end();
        let to = result?;
        tracing::debug!(%panel, from, to, "panel dropped");
        Ok(self.applied(phase, SortEffect::Dropped { panel, from, to }))
    }

    /// Abort the drag and return the panel to its pre-drag position.
    pub fn cancel<H>(&mut self, host: &mut H) -> Result<SortDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPhase::Cancel;
        let Some(session) = self.session.take() else {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NoActiveSession));
        };
        self.hover.clear();
        let panel = session.panel();
        let result = session.restore(host, &self.config);
        self.hooks.sort_end();
        let position = result?;
        tracing::debug!(%panel, position, "drag canceled");
        Ok(self.applied(phase, SortEffect::Canceled { panel, position }))
    }

    /// Pointer entered `node`'s region.
    pub fn pointer_enter<H>(&mut self, host: &H, node: &N) -> Result<SortDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPhase::PointerEnter;
        let Some(session) = self.session.as_ref() else {
            return Ok(SortDispatch::ignored(phase, SortIgnoredReason::NoActiveSession));
        };
        let Some(panel) = self.registry.panel_id(node) else {
            return Ok(SortDispatch::ignored(
                phase,
                SortIgnoredReason::UnregisteredPanel,
            ));
        };
        if panel == session.panel() {
            return Ok(SortDispatch::ignored(
                phase,
                SortIgnoredReason::ActivePanelHovered,
            ));
        }
        let state = HoverState::measure(host, self.config.panel_class(), panel, node)?;
        self.hover.enter(state);
        tracing::trace!(hover = %state, "hover entered");
        Ok(self.applied(phase, SortEffect::HoverEntered(state)))
    }

    /// Pointer left `node`'s region.
    pub fn pointer_leave(&mut self, node: &N) -> SortDispatch {
        let phase = SortPhase::PointerLeave;
        if self.session.is_none() {
            return SortDispatch::ignored(phase, SortIgnoredReason::NoActiveSession);
        }
        let Some(panel) = self.registry.panel_id(node) else {
            return SortDispatch::ignored(phase, SortIgnoredReason::UnregisteredPanel);
        };
        if !self.hover.leave(panel) {
            return SortDispatch::ignored(phase, SortIgnoredReason::HoverTargetMismatch);
        }
        self.applied(phase, SortEffect::HoverCleared { panel })
    }

    fn applied(&mut self, phase: SortPhase, effect: SortEffect) -> SortDispatch {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        SortDispatch {
            phase,
            sequence: Some(sequence),
            effect,
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Sortable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sortable")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("hover", &self.hover)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
