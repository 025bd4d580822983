#![forbid(unsafe_code)]

//! Optional lifecycle callbacks.

use std::fmt;

type Hook = Box<dyn FnMut()>;

/// Callbacks fired on session start, shadow moves, and session end.
///
/// Each hook takes no arguments; hosts that need details read the returned
/// [`SortDispatch`](crate::SortDispatch) instead.
#[derive(Default)]
pub struct SortHooks {
    sort_start: Option<Hook>,
    sort_change: Option<Hook>,
    sort_end: Option<Hook>,
}

impl SortHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once a drag session is open.
    #[must_use]
    pub fn on_sort_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.sort_start = Some(Box::new(hook));
        self
    }

    /// Called whenever the shadow's ordinal position changes.
    #[must_use]
    pub fn on_sort_change(mut self, hook: impl FnMut() + 'static) -> Self {
        self.sort_change = Some(Box::new(hook));
        self
    }

    /// Called after the dragged panel is committed and the shadow removed.
    #[must_use]
    pub fn on_sort_end(mut self, hook: impl FnMut() + 'static) -> Self {
        self.sort_end = Some(Box::new(hook));
        self
    }

    pub(crate) fn sort_start(&mut self) {
        if let Some(hook) = self.sort_start.as_mut() {
            hook();
        }
    }

    pub(crate) fn sort_change(&mut self) {
        if let Some(hook) = self.sort_change.as_mut() {
            hook();
        }
    }

    pub(crate) fn sort_end(&mut self) {
        if let Some(hook) = self.sort_end.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for SortHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortHooks")
            .field("sort_start", &self.sort_start.is_some())
            .field("sort_change", &self.sort_change.is_some())
            .field("sort_end", &self.sort_end.is_some())
            .finish()
    }
}
