#![forbid(unsafe_code)]

//! Geometric primitives in host pixel space.
//!
//! Coordinates are CSS-style pixels: origin at the top-left of the viewport,
//! `y` growing downward. Values are `f64` because browser hosts report
//! fractional offsets.

/// Pointer position reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}


/// Rendered box of a node as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Top offset.
    pub top: f64,
    /// Left offset.
    pub left: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl Extent {
    /// Create a new extent.
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical midline used by the reorder heuristic.
    #[must_use]
    pub fn midpoint_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Whether `y` falls inside `[top, bottom)`.
    #[must_use]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Frozen size of this extent.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Width/height pair frozen at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
