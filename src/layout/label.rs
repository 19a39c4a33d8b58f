//! Label placement once the bar, label and marker have measurable extents.

use super::geometry::BoundingBox;

/// Gap between a bar's end and a label pushed outside it.
pub const OUTSIDE_LABEL_GAP: f32 = 5.0;

/// Final label anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Anchor x. A center anchor when `oversized` is false, a left anchor
    /// otherwise.
    pub x: f32,
    /// The label does not fit inside the bar (or collides with the marker)
    /// and sits to the right of it.
    pub oversized: bool,
}

/// Horizontal overlap test between the marker glyph and the label.
pub fn marker_intersects(marker: &BoundingBox, label: &BoundingBox) -> bool {
    marker.x + marker.width >= label.x && marker.x < label.x + label.width
}

/// Decide where the label goes. Pure in its three measured inputs.
pub fn place_label(
    label: &BoundingBox,
    bar: &BoundingBox,
    marker: Option<&BoundingBox>,
) -> LabelPlacement {
    let marker_hit = marker.is_some_and(|m| marker_intersects(m, label));

    if label.width > bar.width || marker_hit {
        LabelPlacement {
            x: bar.x + bar.width + OUTSIDE_LABEL_GAP,
            oversized: true,
        }
    } else {
        LabelPlacement {
            x: bar.x + bar.width / 2.0,
            oversized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> BoundingBox {
        BoundingBox::new(100.0, 68.0, 80.0, 20.0)
    }

    #[test]
    fn fitting_label_is_centered() {
        let label = BoundingBox::centered(140.0, 78.0, 40.0, 12.0);
        let p = place_label(&label, &bar(), None);
        assert_eq!(p, LabelPlacement { x: 140.0, oversized: false });
    }

    #[test]
    fn wide_label_moves_right_of_bar() {
        let label = BoundingBox::centered(140.0, 78.0, 81.0, 12.0);
        let p = place_label(&label, &bar(), None);
        assert_eq!(p, LabelPlacement { x: 185.0, oversized: true });
    }

    #[test]
    fn marker_over_label_pushes_it_out() {
        let label = BoundingBox::centered(140.0, 78.0, 40.0, 12.0);
        let marker = BoundingBox::new(125.0, 70.0, 10.0, 14.0);
        assert!(place_label(&label, &bar(), Some(&marker)).oversized);
    }

    #[test]
    fn marker_clear_of_label_keeps_center() {
        let label = BoundingBox::centered(140.0, 78.0, 40.0, 12.0);
        // Label spans 120..160.
        let left = BoundingBox::new(100.0, 70.0, 10.0, 14.0);
        let right = BoundingBox::new(160.0, 70.0, 10.0, 14.0);
        assert!(!place_label(&label, &bar(), Some(&left)).oversized);
        assert!(!place_label(&label, &bar(), Some(&right)).oversized);
    }

    #[test]
    fn marker_ending_on_label_start_counts_as_hit() {
        let label = BoundingBox::new(120.0, 72.0, 40.0, 12.0);
        let marker = BoundingBox::new(110.0, 70.0, 10.0, 14.0);
        assert!(marker_intersects(&marker, &label));
    }

    #[test]
    fn placement_is_deterministic() {
        let label = BoundingBox::centered(140.0, 78.0, 70.0, 12.0);
        let marker = BoundingBox::new(30.0, 70.0, 10.0, 14.0);
        let first = place_label(&label, &bar(), Some(&marker));
        for _ in 0..3 {
            assert_eq!(place_label(&label, &bar(), Some(&marker)), first);
        }
    }
}
