#![forbid(unsafe_code)]

//! JSON decoder for host-encoded pointer messages.
//!
//! A JS host serializes each DOM pointer event into one JSON object and hands
//! it to [`parse_pointer_message`], which returns the matching
//! [`PointerMessage`]. Targets stay as raw host handles until the caller
//! resolves them with [`PointerMessage::resolve`].
//!
//! ```json
//! {"kind":"pointerdown","pointerId":1,"button":0,"x":12.5,"y":40,"target":3}
//! ```
//!
//! Event kinds with no drag meaning (and `visibilitychange` while visible)
//! decode to `Ok(None)`.

use serde::Deserialize;
use sortpanel_core::PointerPosition;

use crate::message::PointerMessage;
use crate::pointer_adapter::{PointerButton, PointerScope};

/// Errors from parsing encoded pointer JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerMessageError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// DOM button code outside 0..=2.
    UnknownButton(i32),
    /// Unknown move scope value.
    UnknownScope(String),
}

impl core::fmt::Display for PointerMessageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownButton(button) => write!(f, "unknown pointer button: {button}"),
            Self::UnknownScope(scope) => write!(f, "unknown pointer scope: {scope}"),
        }
    }
}

impl std::error::Error for PointerMessageError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPointer {
    kind: String,
    #[serde(default)]
    pointer_id: Option<u32>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    target: Option<u32>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    hidden: Option<bool>,
}

impl RawPointer {
    fn pointer_id(&self) -> Result<u32, PointerMessageError> {
        self.pointer_id
            .ok_or(PointerMessageError::MissingField("pointerId"))
    }

    fn target(&self) -> Result<u32, PointerMessageError> {
        self.target.ok_or(PointerMessageError::MissingField("target"))
    }

    fn position(&self) -> Result<PointerPosition, PointerMessageError> {
        let x = self.x.ok_or(PointerMessageError::MissingField("x"))?;
        let y = self.y.ok_or(PointerMessageError::MissingField("y"))?;
        Ok(PointerPosition::new(x, y))
    }

    fn button(&self) -> Result<PointerButton, PointerMessageError> {
        // Absent button means primary, matching touch and pen hosts.
        let code = self.button.unwrap_or(0);
        PointerButton::from_dom(code).ok_or(PointerMessageError::UnknownButton(code))
    }

    fn scope(&self) -> Result<PointerScope, PointerMessageError> {
        match self.scope.as_deref() {
            None | Some("container") => Ok(PointerScope::Container),
            Some("document") => Ok(PointerScope::Document),
            Some(other) => Err(PointerMessageError::UnknownScope(other.to_owned())),
        }
    }
}

/// Parse one JSON-encoded pointer event into a [`PointerMessage`].
///
/// Returns `Err` for malformed JSON or missing required fields.
pub fn parse_pointer_message(json: &str) -> Result<Option<PointerMessage>, PointerMessageError> {
    let raw: RawPointer =
        serde_json::from_str(json).map_err(|e| PointerMessageError::Json(e.to_string()))?;

    let message = match raw.kind.as_str() {
        "pointerdown" => PointerMessage::Down {
            pointer_id: raw.pointer_id()?,
            button: raw.button()?,
            position: raw.position()?,
            target: raw.target()?,
        },
        "pointermove" => PointerMessage::Move {
            pointer_id: raw.pointer_id()?,
            position: raw.position()?,
            scope: raw.scope()?,
        },
        "pointerup" => PointerMessage::Up {
            pointer_id: raw.pointer_id()?,
            button: raw.button()?,
            position: raw.position()?,
        },
        "pointerenter" => PointerMessage::Enter {
            pointer_id: raw.pointer_id()?,
            target: raw.target()?,
        },
        "pointerleave" => match raw.target {
            Some(target) => PointerMessage::Leave {
                pointer_id: raw.pointer_id()?,
                target,
            },
            None => PointerMessage::ContainerLeave {
                pointer_id: raw.pointer_id()?,
            },
        },
        "pointercancel" => PointerMessage::Cancel {
            pointer_id: raw.pointer_id,
        },
        "blur" => PointerMessage::Blur,
        "visibilitychange" => {
            if raw.hidden.unwrap_or(true) {
                PointerMessage::VisibilityHidden
            } else {
                return Ok(None);
            }
        }
        "lostpointercapture" => PointerMessage::LostCapture {
            pointer_id: raw.pointer_id()?,
        },
        "gotpointercapture" => PointerMessage::CaptureAcquired {
            pointer_id: raw.pointer_id()?,
        },
        _ => return Ok(None),
    };
    Ok(Some(message))
}
