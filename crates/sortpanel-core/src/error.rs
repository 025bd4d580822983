#![forbid(unsafe_code)]

//! Error types.
//!
//! Fatal errors ([`ConfigError`], [`SortError`]) only happen while building a
//! [`Sortable`](crate::Sortable); nothing is attached or mutated when they are
//! returned. [`DragInitError`] aborts a single pointer-down and leaves the host
//! exactly as it was.

use std::fmt;

use thiserror::Error;

/// Which selector failed to match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Panel,
    Trigger,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => f.write_str("panel"),
            Self::Trigger => f.write_str("drag trigger"),
        }
    }
}

/// Invalid or missing option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("option `{option}` must be a non-empty class name")]
    EmptyClass { option: &'static str },

    #[error("options `{first}` and `{second}` must name different classes (both `{class}`)")]
    ClassCollision {
        first: &'static str,
        second: &'static str,
        class: String,
    },

    #[error("malformed options: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Setup failure for a sortable container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("no {role} element matches class `{class}`")]
    ElementLookup { role: ElementRole, class: String },
}

/// Failure reported by a [`PanelHost`](crate::PanelHost) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("node {0} is not known to the host")]
    UnknownNode(String),

    #[error("node {0} is not attached to the container")]
    Detached(String),

    #[error("extent of node {0} is unavailable")]
    ExtentUnavailable(String),

    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// A pointer-down could not open a drag session.
///
/// Every host mutation performed before the failure has been rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragInitError {
    #[error("shadow placeholder is missing from the container after insertion")]
    ShadowNotFound,

    #[error("host operation failed: {0}")]
    Host(#[from] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_lookup_message_names_role_and_class() {
        let error = SortError::ElementLookup {
            role: ElementRole::Trigger,
            class: "handle".into(),
        };
        assert_eq!(error.to_string(), "no drag trigger element matches class `handle`");
    }

    #[test]
    fn config_error_converts_into_sort_error() {
        let error: SortError = ConfigError::MissingOption("panel").into();
        assert_eq!(
            error.to_string(),
            "configuration error: missing required option `panel`"
        );
    }

    #[test]
    fn host_error_is_preserved_in_drag_init_error() {
        let error: DragInitError = HostError::Detached("#3".into()).into();
        assert!(matches!(error, DragInitError::Host(HostError::Detached(_))));
    }
}
