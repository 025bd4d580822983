#![forbid(unsafe_code)]

//! Midline reorder heuristic.
//!
//! On every pointer move with a hovered panel the shadow is placed on the
//! side of the hovered panel that the pointer is on, measured against the
//! hovered panel's vertical midline:
//!
//! | pointer          | shadow belongs | hold when                 |
//! |------------------|----------------|---------------------------|
//! | `y <  midpoint`  | before hovered | `shadow + 1 == hovered`   |
//! | `y >= midpoint`  | after hovered  | `shadow - 1 == hovered`   |
//!
//! Holding when the shadow is already adjacent on the requested side is what
//! stops the shadow from bouncing between two slots while the pointer sits
//! still. Positions are ordinals among panel-class nodes, shadow included.
//!
//! [`decide`] is pure; the caller applies the move and then re-derives both
//! ordinals and the midpoint from the live container.

use crate::hover::HoverState;

/// Side of the hovered panel's midline the pointer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Midline {
    Above,
    Below,
}

impl Midline {
    /// Classify `pointer_y` against `midpoint_y`. The midline itself counts
    /// as below.
    #[must_use]
    pub fn classify(pointer_y: f64, midpoint_y: f64) -> Self {
        if pointer_y < midpoint_y {
            Self::Above
        } else {
            Self::Below
        }
    }
}

/// What to do with the shadow this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderDecision {
    /// Shadow already sits on the requested side.
    Hold(Midline),
    /// Insert the shadow immediately before the hovered panel.
    MoveBefore,
    /// Insert the shadow immediately after the hovered panel.
    MoveAfter,
}

/// Decide where the shadow goes for one pointer sample.
#[must_use]
pub fn decide(pointer_y: f64, shadow_position: usize, hover: &HoverState) -> ReorderDecision {
    let side = Midline::classify(pointer_y, hover.midpoint_y);
    let adjacent = match side {
        Midline::Above => shadow_position.checked_add(1) == Some(hover.position),
        Midline::Below => shadow_position.checked_sub(1) == Some(hover.position),
    };
    match (side, adjacent) {
        (_, true) => ReorderDecision::Hold(side),
        (Midline::Above, false) => ReorderDecision::MoveBefore,
        (Midline::Below, false) => ReorderDecision::MoveAfter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PanelId;

    fn hover(position: usize, midpoint_y: f64) -> HoverState {
        HoverState {
            panel: PanelId::new(position),
            midpoint_y,
            position,
        }
    }

    #[test]
    fn midline_counts_as_below() {
        assert_eq!(Midline::classify(124.9, 125.0), Midline::Above);
        assert_eq!(Midline::classify(125.0, 125.0), Midline::Below);
    }

    #[test]
    fn below_midline_moves_shadow_after_hovered() {
        assert_eq!(decide(140.0, 0, &hover(2, 125.0)), ReorderDecision::MoveAfter);
    }

    #[test]
    fn above_midline_moves_shadow_before_hovered() {
        assert_eq!(decide(60.0, 3, &hover(1, 75.0)), ReorderDecision::MoveBefore);
    }

    #[test]
    fn shadow_directly_after_hovered_holds_below() {
        assert_eq!(
            decide(140.0, 2, &hover(1, 75.0)),
            ReorderDecision::Hold(Midline::Below)
        );
    }

    #[test]
    fn shadow_directly_before_hovered_holds_above() {
        assert_eq!(
            decide(10.0, 0, &hover(1, 25.0)),
            ReorderDecision::Hold(Midline::Above)
        );
    }

    #[test]
    fn shadow_before_hovered_crosses_when_pointer_goes_below() {
        // Shadow at 0, hovered at 1: below the midline the shadow jumps over.
        assert_eq!(decide(30.0, 0, &hover(1, 25.0)), ReorderDecision::MoveAfter);
    }

    #[test]
    fn shadow_at_zero_never_underflows() {
        assert_eq!(decide(500.0, 0, &hover(0, 25.0)), ReorderDecision::MoveAfter);
    }
}
