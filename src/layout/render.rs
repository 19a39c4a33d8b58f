//! Two-phase render pass.
//!
//! Phase 1 ([`ChartLayout::layout_tasks`]) commits bar geometry and lanes.
//! Phase 2 ([`ChartLayout::finalize_labels`]) runs once the host can
//! measure the rendered label and marker, and places every label exactly
//! once. A phase 2 call carrying an outdated [`PassId`] is ignored.

use std::collections::HashMap;

use uuid::Uuid;

use super::bar::Bar;
use super::geometry::BoundingBox;
use super::lanes::LayoutState;
use crate::model::{ChartContext, Task};

/// Identifies one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PassId(u64);

/// Measured sizes the host supplies in phase 2.
pub trait LabelMeasure {
    /// Width and height of the task's rendered label.
    fn label_size(&self, task: &Task) -> (f32, f32);
    /// Width and height of the marker glyph.
    fn marker_size(&self) -> (f32, f32);
}

/// Owns the bars and packing state of the current render pass.
#[derive(Debug, Default)]
pub struct ChartLayout {
    state: LayoutState,
    bars: Vec<Bar>,
    pass: PassId,
    labels_pending: bool,
}

impl ChartLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a full re-render: drop every bar and lane group.
    pub fn begin_pass(&mut self) -> PassId {
        self.pass = PassId(self.pass.0 + 1);
        self.state.reset();
        self.bars.clear();
        self.labels_pending = false;
        self.pass
    }

    /// Phase 1: lay out `tasks` in order. Starts a new pass.
    pub fn layout_tasks(&mut self, tasks: &[Task], ctx: &ChartContext) -> PassId {
        let pass = self.begin_pass();
        self.bars.reserve(tasks.len());
        for task in tasks {
            let bar = Bar::new(task, ctx, &mut self.state);
            self.bars.push(bar);
        }
        self.labels_pending = !self.bars.is_empty();
        tracing::info!(
            pass = pass.0,
            tasks = tasks.len(),
            lanes = self.state.lane_count(),
            "layout pass committed"
        );
        pass
    }

    /// Phase 2: place labels from measured extents. Returns the number of
    /// labels placed; zero for a stale pass or a repeated call.
    pub fn finalize_labels(
        &mut self,
        pass: PassId,
        tasks: &[Task],
        measure: &impl LabelMeasure,
    ) -> usize {
        if pass != self.pass {
            tracing::debug!(stale = pass.0, current = self.pass.0, "ignoring stale label placement");
            return 0;
        }
        if !self.labels_pending {
            return 0;
        }
        self.labels_pending = false;

        let by_id: HashMap<Uuid, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
        let (marker_w, marker_h) = measure.marker_size();
        let mut placed = 0;
        for bar in &mut self.bars {
            let Some(task) = by_id.get(&bar.task_id).copied() else {
                continue;
            };
            let (w, h) = measure.label_size(task);
            let label = bar.label_box(w, h);
            let marker: Option<BoundingBox> = bar.marker_box(marker_w, marker_h);
            bar.update_label_position(&label, marker.as_ref());
            placed += 1;
        }
        placed
    }

    pub fn pass(&self) -> PassId {
        self.pass
    }

    pub fn labels_pending(&self) -> bool {
        self.labels_pending
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bars_mut(&mut self) -> &mut [Bar] {
        &mut self.bars
    }

    pub fn bar(&self, task_id: Uuid) -> Option<&Bar> {
        self.bars.iter().find(|b| b.task_id == task_id)
    }

    pub fn bar_mut(&mut self, task_id: Uuid) -> Option<&mut Bar> {
        self.bars.iter_mut().find(|b| b.task_id == task_id)
    }

    /// Height needed to show every lane.
    pub fn content_height(&self, ctx: &ChartContext) -> f32 {
        let opts = &ctx.options;
        opts.header_height
            + opts.padding
            + self.state.lane_count() as f32 * (opts.bar_height + opts.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartOptions;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    struct FixedMeasure;

    impl LabelMeasure for FixedMeasure {
        fn label_size(&self, task: &Task) -> (f32, f32) {
            (task.name.len() as f32 * 6.0, 12.0)
        }

        fn marker_size(&self) -> (f32, f32) {
            (10.0, 12.0)
        }
    }

    fn origin() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn ctx() -> ChartContext {
        ChartContext::new(origin(), origin() + Duration::days(30), ChartOptions::default())
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("A", "x", origin(), origin() + Duration::days(2)),
            Task::new("B", "x", origin() + Duration::days(1), origin() + Duration::days(3)),
            Task::new("C", "x", origin() + Duration::days(4), origin() + Duration::days(5)),
        ]
    }

    #[test]
    fn layout_packs_in_task_order() {
        let mut layout = ChartLayout::new();
        layout.layout_tasks(&tasks(), &ctx());
        let lanes: Vec<usize> = layout.bars().iter().map(|b| b.lane).collect();
        assert_eq!(lanes, vec![0, 1, 0]);
        assert_eq!(layout.state().lane_count(), 2);
        assert_eq!(layout.content_height(&ctx()), 50.0 + 18.0 + 2.0 * 38.0);
    }

    #[test]
    fn each_pass_starts_from_zero_groups() {
        let mut layout = ChartLayout::new();
        let ctx = ctx();
        let tasks = tasks();
        layout.layout_tasks(&tasks, &ctx);
        layout.layout_tasks(&tasks, &ctx);
        assert_eq!(layout.bars().len(), 3);
        assert_eq!(layout.state().lane_count(), 2);
    }

    #[test]
    fn labels_are_placed_once_per_pass() {
        let mut layout = ChartLayout::new();
        let tasks = tasks();
        let pass = layout.layout_tasks(&tasks, &ctx());
        assert!(layout.labels_pending());
        assert!(layout.bars().iter().all(|b| b.label().is_none()));

        assert_eq!(layout.finalize_labels(pass, &tasks, &FixedMeasure), 3);
        assert!(layout.bars().iter().all(|b| b.label().is_some()));
        assert_eq!(layout.finalize_labels(pass, &tasks, &FixedMeasure), 0);
    }

    #[test]
    fn labels_match_tasks_by_id_not_position() {
        let mut layout = ChartLayout::new();
        let mut tasks = tasks();
        tasks[0].name = "A much longer name".into();
        let pass = layout.layout_tasks(&tasks, &ctx());
        tasks.reverse();
        assert_eq!(layout.finalize_labels(pass, &tasks, &FixedMeasure), 3);
        // 18 chars * 6px = 108px > 60px bar.
        assert_eq!(layout.bars()[0].label().map(|l| l.oversized), Some(true));
        assert_eq!(layout.bars()[2].label().map(|l| l.oversized), Some(false));
    }

    #[test]
    fn stale_pass_is_ignored() {
        let mut layout = ChartLayout::new();
        let ctx = ctx();
        let tasks = tasks();
        let old = layout.layout_tasks(&tasks, &ctx);
        let current = layout.layout_tasks(&tasks, &ctx);
        assert_ne!(old, current);
        assert_eq!(layout.finalize_labels(old, &tasks, &FixedMeasure), 0);
        assert!(layout.labels_pending());
        assert_eq!(layout.finalize_labels(current, &tasks, &FixedMeasure), 3);
    }
}
