//! Category-scoped first-fit lane packing.
//!
//! Bars are packed in the order they are laid out. Each lane group holds
//! bars of one category whose horizontal extents (bar plus reserved label
//! room) never overlap. A group's lane is fixed when the group is created
//! and lanes are never reused within a pass, so the result is
//! deterministic but not a minimal packing.

use crate::layout::transform::lane_to_y;
use crate::model::ChartOptions;

/// Horizontal footprint of a bar: `[x, x + width + label_width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarExtent {
    pub x: f32,
    pub width: f32,
    pub label_width: f32,
}

impl BarExtent {
    pub fn end(&self) -> f32 {
        self.x + self.width + self.label_width
    }

    /// True when the two footprints are disjoint (touching is allowed).
    pub fn clear_of(&self, other: &BarExtent) -> bool {
        self.end() <= other.x || self.x >= other.end()
    }
}

/// Lane assigned to a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSlot {
    pub lane: usize,
    pub y: f32,
}

/// Bars of one category sharing a lane.
#[derive(Debug, Clone)]
pub struct LaneGroup {
    pub category: String,
    pub lane: usize,
    /// y of the group's first bar; every later member reuses it.
    pub y: f32,
    pub bars: Vec<BarExtent>,
}

impl LaneGroup {
    fn accepts(&self, category: &str, extent: &BarExtent) -> bool {
        self.category == category && self.bars.iter().all(|b| b.clear_of(extent))
    }
}

/// Packing state for one render pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    groups: Vec<LaneGroup>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all groups. Called only at the start of a full render pass.
    pub fn reset(&mut self) {
        self.groups.clear();
    }

    pub fn groups(&self) -> &[LaneGroup] {
        &self.groups
    }

    pub fn lane_count(&self) -> usize {
        self.groups.len()
    }

    /// Place `extent` in the first compatible group of `category`, or open
    /// a new lane below all existing ones.
    pub fn assign(&mut self, extent: BarExtent, category: &str, options: &ChartOptions) -> LaneSlot {
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|g| g.accepts(category, &extent))
        {
            group.bars.push(extent);
            return LaneSlot {
                lane: group.lane,
                y: group.y,
            };
        }

        let lane = self.groups.len();
        let y = lane_to_y(lane, options);
        tracing::debug!(lane, category, x = extent.x, "opening lane");
        self.groups.push(LaneGroup {
            category: category.to_string(),
            lane,
            y,
            bars: vec![extent],
        });
        LaneSlot { lane, y }
    }
}
