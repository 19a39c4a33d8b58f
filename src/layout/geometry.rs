//! Shape geometry of a committed bar.

/// Axis-aligned box in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn end_x(&self) -> f32 {
        self.x + self.width
    }

    /// Box of `width` x `height` centered on (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }
}

/// The visual shape of a bar: a rounded rectangle for a span, a circle for
/// a zero-length task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarShape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    Point {
        cx: f32,
        cy: f32,
        r: f32,
    },
}

impl BarShape {
    pub fn is_point(&self) -> bool {
        matches!(self, BarShape::Point { .. })
    }

    /// Left edge of the shape's bounding box.
    pub fn x(&self) -> f32 {
        match *self {
            BarShape::Rect { x, .. } => x,
            BarShape::Point { cx, r, .. } => cx - r,
        }
    }

    pub fn y(&self) -> f32 {
        match *self {
            BarShape::Rect { y, .. } => y,
            BarShape::Point { cy, r, .. } => cy - r,
        }
    }

    pub fn width(&self) -> f32 {
        match *self {
            BarShape::Rect { width, .. } => width,
            BarShape::Point { r, .. } => r * 2.0,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            BarShape::Rect { height, .. } => height,
            BarShape::Point { r, .. } => r * 2.0,
        }
    }

    pub fn end_x(&self) -> f32 {
        self.x() + self.width()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x(), self.y(), self.width(), self.height())
    }

    /// Horizontal position the shape's dates are read from: the left edge
    /// of a rectangle, the center of a point.
    pub fn anchor_x(&self) -> f32 {
        match *self {
            BarShape::Rect { x, .. } => x,
            BarShape::Point { cx, .. } => cx,
        }
    }

    /// Temporal width: the rectangle width, zero for a point.
    pub fn span_width(&self) -> f32 {
        match *self {
            BarShape::Rect { width, .. } => width,
            BarShape::Point { .. } => 0.0,
        }
    }

    /// Move the left edge to `value`. Non-finite values are ignored.
    pub fn set_x(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            tracing::warn!(value, "ignoring non-numeric x");
            return false;
        }
        match self {
            BarShape::Rect { x, .. } => *x = value,
            BarShape::Point { cx, r, .. } => *cx = value + *r,
        }
        true
    }

    /// Resize a rectangle. Points have no width; non-finite or negative
    /// values are ignored.
    pub fn set_width(&mut self, value: f32) -> bool {
        if !value.is_finite() || value < 0.0 {
            tracing::warn!(value, "ignoring invalid width");
            return false;
        }
        match self {
            BarShape::Rect { width, .. } => {
                *width = value;
                true
            }
            BarShape::Point { .. } => false,
        }
    }

    pub fn translate_x(&mut self, dx: f32) -> bool {
        self.set_x(self.x() + dx)
    }
}
