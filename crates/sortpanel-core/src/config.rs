#![forbid(unsafe_code)]

//! Options for a sortable container.
//!
//! [`SortOptions`] is the loose, deserializable form that hosts hand over
//! (JSON from a page script, TOML from a config file, or built in code).
//! [`SortOptions::validate`] turns it into a [`SortConfig`] whose class names
//! are guaranteed present and distinct.
//!
//! ```
//! use sortpanel_core::config::{DragAxis, SortOptions};
//!
//! let config = SortOptions::from_json_str(
//!     r#"{
//!         "panel": { "class": "panel", "classSorting": "sorting", "classShadow": "shadow" },
//!         "drag": { "class": "handle" }
//!     }"#,
//! )
//! .and_then(SortOptions::validate)
//! .unwrap();
//! assert_eq!(config.panel_class(), "panel");
//! assert_eq!(config.axis(), DragAxis::Vertical);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which axes the dragged panel follows the pointer on.
///
/// Reordering is always vertical; `Both` only lets the dragged panel's overlay
/// track horizontal pointer motion as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAxis {
    #[default]
    Vertical,
    Both,
}

impl DragAxis {
    /// Whether the overlay follows horizontal pointer motion.
    #[must_use]
    pub const fn follows_x(self) -> bool {
        matches!(self, Self::Both)
    }
}

/// Panel class names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    pub class: String,
    #[serde(alias = "classSorting")]
    pub class_sorting: String,
    #[serde(alias = "classShadow")]
    pub class_shadow: String,
}

/// Drag trigger class name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    pub class: String,
}

/// Unvalidated options as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub panel: Option<PanelOptions>,
    pub drag: Option<DragOptions>,
    pub axis: Option<DragAxis>,
}

impl SortOptions {
    /// Parse options from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse options from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Validate into a [`SortConfig`].
    pub fn validate(self) -> Result<SortConfig, ConfigError> {
        let panel = self.panel.ok_or(ConfigError::MissingOption("panel"))?;
        let drag = self.drag.ok_or(ConfigError::MissingOption("drag"))?;

        let panel_class = non_empty("panel.class", panel.class)?;
        let sorting_class = non_empty("panel.class_sorting", panel.class_sorting)?;
        let shadow_class = non_empty("panel.class_shadow", panel.class_shadow)?;
        let trigger_class = non_empty("drag.class", drag.class)?;

        distinct(
            ("panel.class", &panel_class),
            ("panel.class_sorting", &sorting_class),
        )?;
        distinct(
            ("panel.class", &panel_class),
            ("panel.class_shadow", &shadow_class),
        )?;
        distinct(("panel.class", &panel_class), ("drag.class", &trigger_class))?;

        Ok(SortConfig {
            panel_class,
            sorting_class,
            shadow_class,
            trigger_class,
            axis: self.axis.unwrap_or_default(),
        })
    }
}

fn non_empty(option: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return Err(ConfigError::EmptyClass { option });
    }
    Ok(trimmed.to_owned())
}

fn distinct(first: (&'static str, &str), second: (&'static str, &str)) -> Result<(), ConfigError> {
    if first.1 == second.1 {
        return Err(ConfigError::ClassCollision {
            first: first.0,
            second: second.0,
            class: first.1.to_owned(),
        });
    }
    Ok(())
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    panel_class: String,
    sorting_class: String,
    shadow_class: String,
    trigger_class: String,
    axis: DragAxis,
}

impl SortConfig {
    /// Build a vertical-only configuration from class names.
    pub fn new(
        panel_class: impl Into<String>,
        sorting_class: impl Into<String>,
        shadow_class: impl Into<String>,
        trigger_class: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        SortOptions {
            panel: Some(PanelOptions {
                class: panel_class.into(),
                class_sorting: sorting_class.into(),
                class_shadow: shadow_class.into(),
            }),
            drag: Some(DragOptions {
                class: trigger_class.into(),
            }),
            axis: None,
        }
        .validate()
    }

    /// Replace the drag axis.
    #[must_use]
    pub fn with_axis(mut self, axis: DragAxis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn panel_class(&self) -> &str {
        &self.panel_class
    }

    #[must_use]
    pub fn sorting_class(&self) -> &str {
        &self.sorting_class
    }

    #[must_use]
    pub fn shadow_class(&self) -> &str {
        &self.shadow_class
    }

    #[must_use]
    pub fn trigger_class(&self) -> &str {
        &self.trigger_class
    }

    #[must_use]
    pub const fn axis(&self) -> DragAxis {
        self.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SortOptions {
        SortOptions {
            panel: Some(PanelOptions {
                class: "panel".into(),
                class_sorting: "sorting".into(),
                class_shadow: "shadow".into(),
            }),
            drag: Some(DragOptions {
                class: "handle".into(),
            }),
            axis: None,
        }
    }

    #[test]
    fn missing_panel_section_is_configuration_error() {
        let mut options = options();
        options.panel = None;
        assert_eq!(options.validate(), Err(ConfigError::MissingOption("panel")));
    }

    #[test]
    fn missing_drag_section_is_configuration_error() {
        let mut options = options();
        options.drag = None;
        assert_eq!(options.validate(), Err(ConfigError::MissingOption("drag")));
    }

    #[test]
    fn blank_class_is_rejected() {
        let mut options = options();
        if let Some(panel) = options.panel.as_mut() {
            panel.class_shadow = "   ".into();
        }
        assert_eq!(
            options.validate(),
            Err(ConfigError::EmptyClass {
                option: "panel.class_shadow"
            })
        );
    }

    #[test]
    fn shadow_class_must_differ_from_panel_class() {
        let mut options = options();
        if let Some(panel) = options.panel.as_mut() {
            panel.class_shadow = "panel".into();
        }
        assert!(matches!(
            options.validate(),
            Err(ConfigError::ClassCollision { .. })
        ));
    }

    #[test]
    fn json_accepts_camel_case_aliases_and_axis() {
        let config = SortOptions::from_json_str(
            r#"{
                "panel": { "class": "p", "classSorting": "s", "classShadow": "sh" },
                "drag": { "class": "d" },
                "axis": "both"
            }"#,
        )
        .and_then(SortOptions::validate)
        .expect("valid options");
        assert_eq!(config.sorting_class(), "s");
        assert_eq!(config.shadow_class(), "sh");
        assert_eq!(config.axis(), DragAxis::Both);
    }

    #[test]
    fn toml_options_round_into_config() {
        let config = SortOptions::from_toml_str(
            r#"
            [panel]
            class = "card"
            class_sorting = "card--sorting"
            class_shadow = "card--shadow"

            [drag]
            class = "card__grip"
            "#,
        )
        .and_then(SortOptions::validate)
        .expect("valid options");
        assert_eq!(config.panel_class(), "card");
        assert_eq!(config.trigger_class(), "card__grip");
        assert_eq!(config.axis(), DragAxis::Vertical);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            SortOptions::from_json_str("{ panel: "),
            Err(ConfigError::Parse(_))
        ));
    }
}
