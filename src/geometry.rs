//! Shared geometric primitives used by the editor, transform and export modules.
//!
//! All coordinates are integer image pixels. `Rect` keeps signed dimensions so a
//! drawing candidate can carry its drag direction until it is normalized.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Signed rectangle spanning from `anchor` to `point`.
    pub fn from_anchor(anchor: Point, point: Point) -> Self {
        Self::new(
            anchor.x,
            anchor.y,
            point.x.saturating_sub(anchor.x),
            point.y.saturating_sub(anchor.y),
        )
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn has_positive_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Same visual extent with a top-left origin and non-negative size.
    pub fn normalized(&self) -> Self {
        let left = self.x.min(self.right());
        let right = self.x.max(self.right());
        let top = self.y.min(self.bottom());
        let bottom = self.y.max(self.bottom());
        Self::new(left, top, span(left, right), span(top, bottom))
    }

    /// Edge-inclusive containment, independent of drag direction.
    pub fn contains(&self, point: Point) -> bool {
        let bounds = self.normalized();
        point.x >= bounds.x
            && point.x <= bounds.right()
            && point.y >= bounds.y
            && point.y <= bounds.bottom()
    }

    pub const fn translated(&self, delta_x: i32, delta_y: i32) -> Self {
        Self::new(
            self.x.saturating_add(delta_x),
            self.y.saturating_add(delta_y),
            self.width,
            self.height,
        )
    }

    pub const fn resized_by(&self, delta_width: i32, delta_height: i32) -> Self {
        Self::new(
            self.x,
            self.y,
            self.width.saturating_add(delta_width),
            self.height.saturating_add(delta_height),
        )
    }

    /// Far corner computed in `i64`, so boxes near `i32::MAX` export their
    /// true extent instead of a clipped one.
    pub const fn corners(&self) -> CornerBox {
        CornerBox {
            x1: self.x as i64,
            y1: self.y as i64,
            x2: self.x as i64 + self.width as i64,
            y2: self.y as i64 + self.height as i64,
        }
    }
}

/// Distance between `low <= high`, capped at `i32::MAX`.
fn span(low: i32, high: i32) -> i32 {
    i32::try_from(high.abs_diff(low)).unwrap_or(i32::MAX)
}

/// `{x1, y1, x2, y2}` corner pair as written to the export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CornerBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Field-wise partial update merged into a stored rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl RectPatch {
    pub const fn full(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }

    pub fn apply_to(&self, rect: Rect) -> Rect {
        Rect::new(
            self.x.unwrap_or(rect.x),
            self.y.unwrap_or(rect.y),
            self.width.unwrap_or(rect.width),
            self.height.unwrap_or(rect.height),
        )
    }
}

/// Natural pixel dimensions of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: i32,
    pub height: i32,
}

impl ImageBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }
}
