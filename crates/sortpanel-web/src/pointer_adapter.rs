#![forbid(unsafe_code)]

//! Deterministic web pointer adapter for sortable containers.
//!
//! This module bridges browser pointer lifecycle signals into
//! [`Sortable`] handler calls while enforcing:
//! - one active pointer at a time,
//! - container scoping for moves (moves outside the container are dropped)
//!   while pointer-up is accepted from anywhere in the document,
//! - explicit capture acquire/release commands for JS hosts, and
//! - cancellation on interruption paths (cancel/blur/visibility/lost-capture),
//!   which returns the dragged panel to where it started.

use std::fmt;

use sortpanel_core::{
    DragInitError, HostError, PanelHost, PointerPosition, SortDispatch, SortIgnoredReason,
    Sortable,
};

/// Mouse/pen button reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i32) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Where a move event was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerScope {
    Container,
    Document,
}

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPointerConfig {
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
    /// If true, leaving the container cancels the drag when capture was
    /// requested but never acknowledged.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for SortPointerConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

impl CaptureState {
    const fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePointer {
    pointer_id: u32,
    button: PointerButton,
    last_position: PointerPosition,
    capture_state: CaptureState,
}

/// Host command for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPointerPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerEnter,
    PointerLeave,
    PointerCancel,
    ContainerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
}

/// Why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    OutsideContainer,
    LeaveWhileCaptured,
    Machine(SortIgnoredReason),
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPointerLogOutcome {
    Forwarded,
    CaptureStateUpdated,
    Ignored(SortPointerIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortPointerLogEntry {
    pub phase: SortPointerPhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub position: Option<PointerPosition>,
    pub capture_command: Option<SortCaptureCommand>,
    pub outcome: SortPointerLogOutcome,
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortPointerDispatch {
    pub sort: Option<SortDispatch>,
    pub capture_command: Option<SortCaptureCommand>,
    pub log: SortPointerLogEntry,
}

impl SortPointerDispatch {
    fn ignored(
        phase: SortPointerPhase,
        reason: SortPointerIgnoredReason,
        pointer_id: Option<u32>,
        position: Option<PointerPosition>,
    ) -> Self {
        Self {
            sort: None,
            capture_command: None,
            log: SortPointerLogEntry {
                phase,
                sequence: None,
                pointer_id,
                position,
                capture_command: None,
                outcome: SortPointerLogOutcome::Ignored(reason),
            },
        }
    }

    fn capture_state_updated(phase: SortPointerPhase, pointer_id: u32) -> Self {
        Self {
            sort: None,
            capture_command: None,
            log: SortPointerLogEntry {
                phase,
                sequence: None,
                pointer_id: Some(pointer_id),
                position: None,
                capture_command: None,
                outcome: SortPointerLogOutcome::CaptureStateUpdated,
            },
        }
    }

    fn forwarded(
        phase: SortPointerPhase,
        sort: SortDispatch,
        pointer_id: Option<u32>,
        position: Option<PointerPosition>,
        capture_command: Option<SortCaptureCommand>,
    ) -> Self {
        if let sortpanel_core::SortEffect::Ignored(reason) = sort.effect {
            return Self {
                sort: Some(sort),
                ..Self::ignored(
                    phase,
                    SortPointerIgnoredReason::Machine(reason),
                    pointer_id,
                    position,
                )
            };
        }
        Self {
            sort: Some(sort),
            capture_command,
            log: SortPointerLogEntry {
                phase,
                sequence: sort.sequence,
                pointer_id,
                position,
                capture_command,
                outcome: SortPointerLogOutcome::Forwarded,
            },
        }
    }

    /// Whether the signal reached the sort machine and changed something.
    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        matches!(self.log.outcome, SortPointerLogOutcome::Forwarded)
    }
}

/// Pointer adapter owning one [`Sortable`].
pub struct SortPointerAdapter<N> {
    sortable: Sortable<N>,
    config: SortPointerConfig,
    active: Option<ActivePointer>,
}

impl<N: Clone + PartialEq + fmt::Debug> SortPointerAdapter<N> {
    #[must_use]
    pub fn new(sortable: Sortable<N>, config: SortPointerConfig) -> Self {
        Self {
            sortable,
            config,
            active: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> SortPointerConfig {
        self.config
    }

    #[must_use]
    pub fn sortable(&self) -> &Sortable<N> {
        &self.sortable
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Handle pointer-down on a drag trigger.
    pub fn pointer_down<H>(
        &mut self,
        host: &mut H,
        trigger: &N,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    ) -> Result<SortPointerDispatch, DragInitError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPointerPhase::PointerDown;
        if pointer_id == 0 {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(position),
            ));
        }
        if button != self.config.activation_button {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(position),
            ));
        }
        if self.active.is_some() {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::ActivePointerAlreadyInProgress,
                Some(pointer_id),
                Some(position),
            ));
        }

        let sort = self.sortable.pointer_down(host, trigger, position)?;
        let dispatch = SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(pointer_id),
            Some(position),
            Some(SortCaptureCommand::Acquire { pointer_id }),
        );
        if dispatch.is_forwarded() {
            self.active = Some(ActivePointer {
                pointer_id,
                button,
                last_position: position,
                capture_state: CaptureState::Requested,
            });
        }
        Ok(dispatch)
    }

    /// Mark browser pointer capture as acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> SortPointerDispatch {
        let phase = SortPointerPhase::CaptureAcquired;
        let Some(mut active) = self.active else {
            return SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                None,
            );
        };
        if active.pointer_id != pointer_id {
            return SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }
        active.capture_state = CaptureState::Acquired;
        self.active = Some(active);
        SortPointerDispatch::capture_state_updated(phase, pointer_id)
    }

    /// Handle pointer-move. Only container-scoped moves drive the drag.
    pub fn pointer_move<H>(
        &mut self,
        host: &mut H,
        pointer_id: u32,
        position: PointerPosition,
        scope: PointerScope,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPointerPhase::PointerMove;
        let mut active = match self.check_active(phase, pointer_id, Some(position)) {
            Ok(active) => active,
            Err(ignored) => return Ok(ignored),
        };
        if scope != PointerScope::Container {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::OutsideContainer,
                Some(pointer_id),
                Some(position),
            ));
        }
        let sort = self.sortable.pointer_move(host, position)?;
        active.last_position = position;
        self.active = Some(active);
        Ok(SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(pointer_id),
            Some(position),
            None,
        ))
    }

    /// Handle pointer-up from anywhere in the document.
    pub fn pointer_up<H>(
        &mut self,
        host: &mut H,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPointerPhase::PointerUp;
        let active = match self.check_active(phase, pointer_id, Some(position)) {
            Ok(active) => active,
            Err(ignored) => return Ok(ignored),
        };
        if active.button != button {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(position),
            ));
        }
        self.active = None;
        let command = active
            .capture_state
            .is_acquired()
            .then_some(SortCaptureCommand::Release { pointer_id });
        let sort = self.sortable.pointer_up(host)?;
        Ok(SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(pointer_id),
            Some(position),
            command,
        ))
    }

    /// Pointer entered a panel's region.
    pub fn pointer_enter<H>(
        &mut self,
        host: &H,
        pointer_id: u32,
        panel: &N,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPointerPhase::PointerEnter;
        let active = match self.check_active(phase, pointer_id, None) {
            Ok(active) => active,
            Err(ignored) => return Ok(ignored),
        };
        let sort = self.sortable.pointer_enter(host, panel)?;
        Ok(SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(pointer_id),
            Some(active.last_position),
            None,
        ))
    }

    /// Pointer left a panel's region.
    pub fn pointer_leave(&mut self, pointer_id: u32, panel: &N) -> SortPointerDispatch {
        let phase = SortPointerPhase::PointerLeave;
        let active = match self.check_active(phase, pointer_id, None) {
            Ok(active) => active,
            Err(ignored) => return ignored,
        };
        let sort = self.sortable.pointer_leave(panel);
        SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(pointer_id),
            Some(active.last_position),
            None,
        )
    }

    /// Pointer left the container. Drags normally survive this; pointer-up is
    /// still delivered from the document.
    pub fn container_leave<H>(
        &mut self,
        host: &mut H,
        pointer_id: u32,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let phase = SortPointerPhase::ContainerLeave;
        let active = match self.check_active(phase, pointer_id, None) {
            Ok(active) => active,
            Err(ignored) => return Ok(ignored),
        };
        if active.capture_state == CaptureState::Requested
            && self.config.cancel_on_leave_without_capture
        {
            return self.cancel_active(host, phase, Some(pointer_id), true);
        }
        Ok(SortPointerDispatch::ignored(
            phase,
            SortPointerIgnoredReason::LeaveWhileCaptured,
            Some(pointer_id),
            None,
        ))
    }

    /// Handle browser pointer-cancel.
    pub fn pointer_cancel<H>(
        &mut self,
        host: &mut H,
        pointer_id: Option<u32>,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        self.cancel_active(host, SortPointerPhase::PointerCancel, pointer_id, true)
    }

    /// Handle window blur.
    pub fn blur<H>(&mut self, host: &mut H) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        self.cancel_active(host, SortPointerPhase::Blur, None, true)
    }

    /// Handle visibility-hidden interruptions.
    pub fn visibility_hidden<H>(&mut self, host: &mut H) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        self.cancel_active(host, SortPointerPhase::VisibilityHidden, None, true)
    }

    /// Handle `lostpointercapture`; cancels without a second release.
    pub fn lost_pointer_capture<H>(
        &mut self,
        host: &mut H,
        pointer_id: u32,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        self.cancel_active(
            host,
            SortPointerPhase::LostPointerCapture,
            Some(pointer_id),
            false,
        )
    }

    fn check_active(
        &self,
        phase: SortPointerPhase,
        pointer_id: u32,
        position: Option<PointerPosition>,
    ) -> Result<ActivePointer, SortPointerDispatch> {
        let Some(active) = self.active else {
            return Err(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::NoActivePointer,
                Some(pointer_id),
                position,
            ));
        };
        if active.pointer_id != pointer_id {
            return Err(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::PointerMismatch,
                Some(pointer_id),
                position,
            ));
        }
        Ok(active)
    }

    fn cancel_active<H>(
        &mut self,
        host: &mut H,
        phase: SortPointerPhase,
        pointer_id: Option<u32>,
        release_capture: bool,
    ) -> Result<SortPointerDispatch, HostError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let Some(active) = self.active else {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::NoActivePointer,
                pointer_id,
                None,
            ));
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return Ok(SortPointerDispatch::ignored(
                phase,
                SortPointerIgnoredReason::PointerMismatch,
                Some(id),
                None,
            ));
        }

        self.active = None;
        let command = (release_capture && active.capture_state.is_acquired()).then_some(
            SortCaptureCommand::Release {
                pointer_id: active.pointer_id,
            },
        );
        tracing::debug!(?phase, pointer_id = active.pointer_id, "drag interrupted");
        let sort = self.sortable.cancel(host)?;
        Ok(SortPointerDispatch::forwarded(
            phase,
            sort,
            Some(active.pointer_id),
            Some(active.last_position),
            command,
        ))
    }
}

impl<N: fmt::Debug> fmt::Debug for SortPointerAdapter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortPointerAdapter")
            .field("sortable", &self.sortable)
            .field("config", &self.config)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PointerButton, PointerScope, SortCaptureCommand, SortPointerAdapter, SortPointerConfig,
        SortPointerIgnoredReason, SortPointerLogOutcome, SortPointerPhase,
    };
    use sortpanel_core::{
        NodeId, PanelHost, PanelList, PointerPosition, ReorderOutcome, Size, SortConfig,
        SortEffect, SortIgnoredReason, Sortable,
    };

    struct Fixture {
        list: PanelList,
        panels: Vec<NodeId>,
        triggers: Vec<NodeId>,
    }

    fn fixture() -> Fixture {
        let mut list = PanelList::new();
        let mut panels = Vec::new();
        let mut triggers = Vec::new();
        for _ in 0..4 {
            let panel = list.push("div", &["panel"], Size::new(200.0, 50.0));
            triggers.push(list.push_child(panel, "span", &["handle"]));
            panels.push(panel);
        }
        Fixture {
            list,
            panels,
            triggers,
        }
    }

    fn adapter(list: &PanelList) -> SortPointerAdapter<NodeId> {
        let config =
            SortConfig::new("panel", "sorting", "shadow", "handle").expect("valid config");
        let sortable = Sortable::new(list, config).expect("sortable");
        SortPointerAdapter::new(sortable, SortPointerConfig::default())
    }

    fn pos(y: f64) -> PointerPosition {
        PointerPosition::new(12.0, y)
    }

    #[test]
    fn pointer_down_opens_session_and_requests_capture() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        let dispatch = adapter
            .pointer_down(&mut fx.list, &fx.triggers[1], 7, PointerButton::Primary, pos(60.0))
            .expect("grab");
        assert_eq!(
            dispatch.capture_command,
            Some(SortCaptureCommand::Acquire { pointer_id: 7 })
        );
        assert_eq!(dispatch.log.outcome, SortPointerLogOutcome::Forwarded);
        assert_eq!(adapter.active_pointer_id(), Some(7));
        assert!(adapter.sortable().is_dragging());
    }

    #[test]
    fn non_activation_button_is_ignored() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        let dispatch = adapter
            .pointer_down(&mut fx.list, &fx.triggers[0], 3, PointerButton::Secondary, pos(5.0))
            .expect("no host error");
        assert_eq!(dispatch.sort, None);
        assert_eq!(
            dispatch.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::ButtonNotAllowed)
        );
        assert_eq!(adapter.active_pointer_id(), None);
        assert_eq!(fx.list.revision(), 0);
    }

    #[test]
    fn unknown_trigger_is_reported_as_machine_ignore() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        let dispatch = adapter
            .pointer_down(&mut fx.list, &fx.panels[0], 3, PointerButton::Primary, pos(5.0))
            .expect("no host error");
        assert_eq!(
            dispatch.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::Machine(
                SortIgnoredReason::UnknownTrigger
            ))
        );
        assert_eq!(dispatch.capture_command, None);
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn document_scoped_move_is_ignored_but_document_pointer_up_drops() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[0], 5, PointerButton::Primary, pos(10.0))
            .expect("grab");
        adapter
            .pointer_enter(&fx.list, 5, &fx.panels[2])
            .expect("enter");

        let outside = adapter
            .pointer_move(&mut fx.list, 5, pos(140.0), PointerScope::Document)
            .expect("no host error");
        assert_eq!(
            outside.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::OutsideContainer)
        );

        let inside = adapter
            .pointer_move(&mut fx.list, 5, pos(140.0), PointerScope::Container)
            .expect("move");
        assert!(matches!(
            inside.sort.map(|sort| sort.effect),
            Some(SortEffect::Tracked {
                reorder: ReorderOutcome::Moved { from: 0, to: 2 },
                ..
            })
        ));

        let left = adapter
            .container_leave(&mut fx.list, 5)
            .expect("no host error");
        assert_eq!(
            left.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::LeaveWhileCaptured)
        );

        let up = adapter
            .pointer_up(&mut fx.list, 5, PointerButton::Primary, pos(900.0))
            .expect("drop");
        assert_eq!(up.log.phase, SortPointerPhase::PointerUp);
        assert_eq!(up.capture_command, None);
        assert_eq!(
            fx.list.select("panel"),
            vec![fx.panels[1], fx.panels[2], fx.panels[0], fx.panels[3]]
        );
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn pointer_mismatch_does_not_touch_session() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[0], 9, PointerButton::Primary, pos(10.0))
            .expect("grab");
        let writes = fx.list.overlay_writes();
        let dispatch = adapter
            .pointer_move(&mut fx.list, 77, pos(80.0), PointerScope::Container)
            .expect("no host error");
        assert_eq!(
            dispatch.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::PointerMismatch)
        );
        assert_eq!(fx.list.overlay_writes(), writes);
        assert_eq!(adapter.active_pointer_id(), Some(9));
    }

    #[test]
    fn pointer_up_with_wrong_button_is_ignored() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[2], 4, PointerButton::Primary, pos(110.0))
            .expect("grab");
        let dispatch = adapter
            .pointer_up(&mut fx.list, 4, PointerButton::Secondary, pos(110.0))
            .expect("no host error");
        assert_eq!(
            dispatch.log.outcome,
            SortPointerLogOutcome::Ignored(SortPointerIgnoredReason::ButtonMismatch)
        );
        assert!(adapter.sortable().is_dragging());
    }

    #[test]
    fn blur_after_capture_releases_and_restores_order() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[3], 6, PointerButton::Primary, pos(160.0))
            .expect("grab");
        let ack = adapter.capture_acquired(6);
        assert_eq!(ack.log.outcome, SortPointerLogOutcome::CaptureStateUpdated);
        adapter
            .pointer_enter(&fx.list, 6, &fx.panels[0])
            .expect("enter");
        adapter
            .pointer_move(&mut fx.list, 6, pos(5.0), PointerScope::Container)
            .expect("move");

        let dispatch = adapter.blur(&mut fx.list).expect("cancel");
        assert_eq!(dispatch.log.phase, SortPointerPhase::Blur);
        assert_eq!(
            dispatch.capture_command,
            Some(SortCaptureCommand::Release { pointer_id: 6 })
        );
        assert_eq!(fx.list.children(), fx.panels.as_slice());
        assert!(!adapter.sortable().is_dragging());
    }

    #[test]
    fn lost_pointer_capture_cancels_without_double_release() {
        let mut fx = fixture();
        let mut adapter = adapter(&fx.list);
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[1], 42, PointerButton::Primary, pos(55.0))
            .expect("grab");
        adapter.capture_acquired(42);
        let dispatch = adapter
            .lost_pointer_capture(&mut fx.list, 42)
            .expect("cancel");
        assert_eq!(dispatch.capture_command, None);
        assert!(matches!(
            dispatch.sort.map(|sort| sort.effect),
            Some(SortEffect::Canceled { position: 1, .. })
        ));
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn leave_before_capture_ack_cancels_when_configured() {
        let mut fx = fixture();
        let config =
            SortConfig::new("panel", "sorting", "shadow", "handle").expect("valid config");
        let sortable = Sortable::new(&fx.list, config).expect("sortable");
        let mut adapter = SortPointerAdapter::new(
            sortable,
            SortPointerConfig {
                cancel_on_leave_without_capture: true,
                ..SortPointerConfig::default()
            },
        );
        adapter
            .pointer_down(&mut fx.list, &fx.triggers[0], 31, PointerButton::Primary, pos(5.0))
            .expect("grab");
        let dispatch = adapter
            .container_leave(&mut fx.list, 31)
            .expect("cancel");
        assert_eq!(dispatch.log.phase, SortPointerPhase::ContainerLeave);
        assert_eq!(dispatch.capture_command, None);
        assert!(!adapter.sortable().is_dragging());
        assert!(fx.list.select("shadow").is_empty());
    }
}
