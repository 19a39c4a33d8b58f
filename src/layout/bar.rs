use chrono::{Duration, NaiveDateTime};
use uuid::Uuid;

use super::events::{ChartEvent, EventSink};
use super::geometry::{BarShape, BoundingBox};
use super::label::{place_label, LabelPlacement};
use super::lanes::{BarExtent, LayoutState};
use super::transform;
use crate::dates::{self, DateUnit};
use crate::model::{ChartContext, Task};

/// Popup contents for a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupRequest {
    pub task_id: Uuid,
    pub target: BoundingBox,
    pub title: String,
    pub subtitle: String,
}

/// The positioned visual of one task, valid for one render pass.
#[derive(Debug, Clone)]
pub struct Bar {
    pub task_id: Uuid,
    x: f32,
    pub y: f32,
    width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub label_width: f32,
    pub lane: usize,
    pub invalid: bool,
    /// x of the marker glyph, when the task carries a marker date.
    pub marker_x: Option<f32>,
    shape: BarShape,
    label: Option<LabelPlacement>,
}

impl Bar {
    /// Lay out `task`: compute x and width, take a lane from `state`, and
    /// commit the shape.
    pub fn new(task: &Task, ctx: &ChartContext, state: &mut LayoutState) -> Self {
        let options = &ctx.options;
        let x = transform::date_to_x(task.start, ctx);
        let width = transform::duration_width(task.start, task.end, ctx);
        let label_width = if task.label_width.is_finite() {
            task.label_width.max(0.0)
        } else {
            0.0
        };

        let slot = state.assign(
            BarExtent {
                x,
                width,
                label_width,
            },
            &task.category,
            options,
        );

        let shape = if task.is_point() {
            BarShape::Point {
                cx: x,
                cy: slot.y + options.bar_height / 2.0,
                r: options.bar_height / 4.0,
            }
        } else {
            BarShape::Rect {
                x,
                y: slot.y,
                width,
                height: options.bar_height,
                corner_radius: options.bar_corner_radius,
            }
        };

        Self {
            task_id: task.id,
            x,
            y: slot.y,
            width,
            height: options.bar_height,
            corner_radius: options.bar_corner_radius,
            label_width,
            lane: slot.lane,
            invalid: task.invalid,
            marker_x: task.marker_date().map(|d| transform::date_to_x(d, ctx)),
            shape,
            label: None,
        }
    }

    /// Left edge as laid out in phase 1. Drags move [`Bar::shape`] only.
    pub fn laid_out_x(&self) -> f32 {
        self.x
    }

    /// Width as laid out in phase 1. Drags move [`Bar::shape`] only.
    pub fn laid_out_width(&self) -> f32 {
        self.width
    }

    pub fn shape(&self) -> &BarShape {
        &self.shape
    }

    /// Mutable geometry for drag handling.
    pub fn shape_mut(&mut self) -> &mut BarShape {
        &mut self.shape
    }

    /// Label placement, once phase 2 has run.
    pub fn label(&self) -> Option<LabelPlacement> {
        self.label
    }

    /// Rectangles grow in from zero width; points appear as-is.
    pub fn animates_width(&self) -> bool {
        !self.shape.is_point()
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Where a label of `width` x `height` sits before placement: centered
    /// on the bar.
    pub fn label_box(&self, width: f32, height: f32) -> BoundingBox {
        let cx = self.shape.x() + self.shape.width() / 2.0;
        BoundingBox::centered(cx, self.center_y(), width, height)
    }

    /// The marker glyph's box, left-anchored at the marker date.
    pub fn marker_box(&self, width: f32, height: f32) -> Option<BoundingBox> {
        self.marker_x
            .map(|x| BoundingBox::new(x, self.center_y() - height / 2.0, width, height))
    }

    /// Re-run label placement against the current shape.
    pub fn update_label_position(
        &mut self,
        label: &BoundingBox,
        marker: Option<&BoundingBox>,
    ) -> LabelPlacement {
        let placement = place_label(label, &self.shape.bounding_box(), marker);
        self.label = Some(placement);
        placement
    }

    /// Dates implied by the shape's current pixel geometry, or `None` when
    /// the geometry is not numeric.
    pub fn compute_start_end_date(&self, ctx: &ChartContext) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let x = self.shape.anchor_x();
        let width = self.shape.span_width();
        if !x.is_finite() || !width.is_finite() {
            return None;
        }
        let column_width = f64::from(ctx.options.column_width);
        let step = ctx.options.step;

        let x_in_units = f64::from(x) / column_width;
        let new_start = dates::add(ctx.gantt_start, x_in_units * step, DateUnit::Hour);
        let width_in_units = f64::from(width) / column_width;
        let new_end = dates::add(new_start, width_in_units * step, DateUnit::Hour);
        Some((new_start, new_end))
    }

    /// Sync the task's dates with the bar after a completed gesture.
    ///
    /// Emits `date_change` only when start or end actually moved; returns
    /// whether it did.
    pub fn date_changed(
        &self,
        task: &mut Task,
        ctx: &ChartContext,
        sink: &mut impl EventSink,
    ) -> bool {
        let Some((new_start, new_end)) = self.compute_start_end_date(ctx) else {
            tracing::warn!(task = %task.id, "bar geometry is not numeric, keeping dates");
            return false;
        };

        let mut changed = false;
        if task.start != new_start {
            task.start = new_start;
            changed = true;
        }
        if task.end != new_end {
            task.end = new_end;
            changed = true;
        }
        if !changed {
            return false;
        }

        tracing::debug!(task = %task.id, %new_start, %new_end, "dates changed");
        sink.trigger_event(ChartEvent::DateChange {
            task_id: task.id,
            start: new_start,
            end: new_end - Duration::seconds(1),
        });
        true
    }

    pub fn popup_request(&self, task: &Task, ctx: &ChartContext) -> PopupRequest {
        let language = &ctx.options.language;
        let start = dates::format(task.start, language);
        let end = dates::format(task.end - Duration::seconds(1), language);
        PopupRequest {
            task_id: task.id,
            target: self.shape.bounding_box(),
            title: task.name.clone(),
            subtitle: format!("{} - {}", start, end),
        }
    }
}
