#![forbid(unsafe_code)]

//! Trigger ↔ panel registry, built once per [`Sortable`](crate::Sortable).

use std::fmt;

use crate::config::SortConfig;
use crate::error::{ElementRole, SortError};
use crate::host::PanelHost;

/// Registry index of a panel. Stable for the lifetime of the registry,
/// independent of where the panel currently sits in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(usize);

impl PanelId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel[{}]", self.0)
    }
}

/// Non-fatal registry finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryWarning {
    /// Panels and triggers differ in count; the tail of the longer list is
    /// unreachable by drag.
    CountMismatch { panels: usize, triggers: usize },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { panels, triggers } => write!(
                f,
                "panel count ({panels}) differs from drag trigger count ({triggers})"
            ),
        }
    }
}

/// Index-aligned panels and triggers.
#[derive(Debug, Clone)]
pub struct Registry<N> {
    panels: Vec<N>,
    triggers: Vec<N>,
    warning: Option<RegistryWarning>,
}

impl<N: Clone + PartialEq + fmt::Debug> Registry<N> {
    /// Read both selectors from `host`.
    pub fn build<H>(host: &H, config: &SortConfig) -> Result<Self, SortError>
    where
        H: PanelHost<Node = N> + ?Sized,
    {
        let panels = host.select(config.panel_class());
        if panels.is_empty() {
            return Err(SortError::ElementLookup {
                role: ElementRole::Panel,
                class: config.panel_class().to_owned(),
            });
        }
        let triggers = host.select(config.trigger_class());
        if triggers.is_empty() {
            return Err(SortError::ElementLookup {
                role: ElementRole::Trigger,
                class: config.trigger_class().to_owned(),
            });
        }

        let warning = (panels.len() != triggers.len()).then_some(RegistryWarning::CountMismatch {
            panels: panels.len(),
            triggers: triggers.len(),
        });
        if let Some(warning) = warning {
            tracing::warn!(
                panels = panels.len(),
                triggers = triggers.len(),
                "{warning}"
            );
        }

        Ok(Self {
            panels,
            triggers,
            warning,
        })
    }

    /// Panel dragged by `trigger`, if the trigger is registered and paired.
    #[must_use]
    pub fn resolve_trigger(&self, trigger: &N) -> Option<(PanelId, &N)> {
        let index = self.triggers.iter().position(|candidate| candidate == trigger)?;
        self.panels.get(index).map(|panel| (PanelId(index), panel))
    }

    /// Registry index of a trigger, paired or not.
    #[must_use]
    pub fn trigger_index(&self, trigger: &N) -> Option<usize> {
        self.triggers.iter().position(|candidate| candidate == trigger)
    }

    /// Registry id of `node` when it is a registered panel.
    #[must_use]
    pub fn panel_id(&self, node: &N) -> Option<PanelId> {
        self.panels
            .iter()
            .position(|candidate| candidate == node)
            .map(PanelId)
    }

    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&N> {
        self.panels.get(id.0)
    }

    #[must_use]
    pub fn panels(&self) -> &[N] {
        &self.panels
    }

    #[must_use]
    pub fn triggers(&self) -> &[N] {
        &self.triggers
    }

    #[must_use]
    pub const fn warning(&self) -> Option<RegistryWarning> {
        self.warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::list::PanelList;

    fn config() -> SortConfig {
        SortConfig::new("panel", "sorting", "shadow", "handle").expect("valid config")
    }

    fn list(panels: usize, triggers: usize) -> PanelList {
        let mut list = PanelList::new();
        for index in 0..panels {
            let panel = list.push("div", &["panel"], Size::new(100.0, 50.0));
            if index < triggers {
                list.push_child(panel, "span", &["handle"]);
            }
        }
        list
    }

    #[test]
    fn pairs_triggers_with_panels_by_index() {
        let list = list(3, 3);
        let registry = Registry::build(&list, &config()).expect("registry");
        let trigger = registry.triggers()[1];
        let (id, panel) = registry.resolve_trigger(&trigger).expect("paired");
        assert_eq!(id, PanelId::new(1));
        assert_eq!(*panel, registry.panels()[1]);
        assert_eq!(registry.warning(), None);
    }

    #[test]
    fn zero_panels_is_element_lookup_error() {
        let list = PanelList::new();
        assert!(matches!(
            Registry::build(&list, &config()),
            Err(SortError::ElementLookup {
                role: ElementRole::Panel,
                ..
            })
        ));
    }

    #[test]
    fn zero_triggers_is_element_lookup_error() {
        let list = list(2, 0);
        assert!(matches!(
            Registry::build(&list, &config()),
            Err(SortError::ElementLookup {
                role: ElementRole::Trigger,
                ..
            })
        ));
    }

    #[test]
    fn count_mismatch_is_a_warning_only() {
        let list = list(3, 2);
        let registry = Registry::build(&list, &config()).expect("registry");
        assert_eq!(
            registry.warning(),
            Some(RegistryWarning::CountMismatch {
                panels: 3,
                triggers: 2
            })
        );
        let reachable: Vec<PanelId> = registry
            .triggers()
            .iter()
            .filter_map(|trigger| registry.resolve_trigger(trigger))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(reachable, vec![PanelId::new(0), PanelId::new(1)]);
    }
}
