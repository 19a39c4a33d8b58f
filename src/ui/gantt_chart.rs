use std::collections::HashMap;
use std::time::Instant;

use chrono::{Datelike, Duration, Months, NaiveDateTime};
use egui::{Align2, Color32, CursorIcon, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::layout::{
    transform, ActionGuard, Bar, BarShape, ChartEvent, ChartLayout, EventSink, LabelMeasure,
    PopupRequest,
};
use crate::model::{ChartContext, Task, ViewMode};
use crate::ui::theme;

/// A popup opened by clicking a bar, anchored in screen space.
#[derive(Debug, Clone)]
pub struct OpenPopup {
    pub request: PopupRequest,
    pub anchor: Pos2,
}

/// Chart state kept between frames.
pub struct ChartSession {
    pub context: ChartContext,
    pub layout: ChartLayout,
    pub guard: ActionGuard,
    /// Events raised since the host last drained them.
    pub events: Vec<ChartEvent>,
    pub selected: Option<Uuid>,
    pub popup: Option<OpenPopup>,
    needs_layout: bool,
    dragging: Option<Uuid>,
}

impl ChartSession {
    pub fn new(context: ChartContext) -> Self {
        let guard = ActionGuard::from_millis(context.options.action_guard_ms);
        Self {
            context,
            layout: ChartLayout::new(),
            guard,
            events: Vec::new(),
            selected: None,
            popup: None,
            needs_layout: true,
            dragging: None,
        }
    }

    /// Request a full re-render on the next frame.
    pub fn invalidate(&mut self) {
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }
}

/// Measures labels and the marker glyph with the UI's fonts.
struct FontMeasure<'a> {
    ctx: &'a egui::Context,
}

impl LabelMeasure for FontMeasure<'_> {
    fn label_size(&self, task: &Task) -> (f32, f32) {
        let size = text_size(self.ctx, &task.name, theme::font_bar());
        (size.x, size.y)
    }

    fn marker_size(&self) -> (f32, f32) {
        let size = text_size(self.ctx, egui_phosphor::regular::AIRPLANE, theme::font_marker());
        (size.x, size.y)
    }
}

fn text_size(ctx: &egui::Context, text: &str, font: egui::FontId) -> Vec2 {
    ctx.fonts(|fonts| fonts.layout_no_wrap(text.to_owned(), font, Color32::WHITE).size())
}

/// Reserve room after each bar whose name will not fit inside it.
fn measure_label_widths(tasks: &mut [Task], context: &ChartContext, ctx: &egui::Context) {
    for task in tasks.iter_mut() {
        let text_width = text_size(ctx, &task.name, theme::font_bar()).x;
        let bar_width = transform::duration_width(task.start, task.end, context);
        task.label_width = if text_width > bar_width {
            text_width + context.options.label_gap
        } else {
            0.0
        };
    }
}

fn place_bar_label(bar: &mut Bar, task: &Task, measure: &FontMeasure<'_>) {
    let (w, h) = measure.label_size(task);
    let (mw, mh) = measure.marker_size();
    let label = bar.label_box(w, h);
    let marker = bar.marker_box(mw, mh);
    bar.update_label_position(&label, marker.as_ref());
}

/// Render the chart: lay out on demand, place labels, draw, and handle
/// drag/click on bars.
pub fn show_gantt_chart(tasks: &mut [Task], session: &mut ChartSession, ui: &mut Ui) {
    let egui_ctx = ui.ctx().clone();

    if session.needs_layout && session.dragging.is_none() {
        measure_label_widths(tasks, &session.context, &egui_ctx);
        session.layout.layout_tasks(tasks, &session.context);
        session.needs_layout = false;
    }

    // Handle zoom with scroll wheel
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            session.context.zoom_in();
            session.invalidate();
        } else if scroll_delta.y < 0.0 {
            session.context.zoom_out();
            session.invalidate();
        }
    }

    let available = ui.available_size();
    let chart_width = (session.context.total_width() + 200.0).max(available.x);
    let chart_height = (session.layout.content_height(&session.context) + 40.0).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
            let origin = response.rect.min;
            let mut consumed_click = false;
            let measure = FontMeasure { ctx: &egui_ctx };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_lane_stripes(&painter, origin, &session.layout, &session.context, chart_width);
            draw_timeline_header(&painter, origin, &session.context, chart_width, chart_height);
            draw_today_line(&painter, origin, &session.context, chart_height);

            // Shapes are committed and measurable from here on.
            let pass = session.layout.pass();
            session.layout.finalize_labels(pass, tasks, &measure);

            let ChartSession {
                context,
                layout,
                guard,
                events,
                selected,
                popup,
                needs_layout,
                dragging,
            } = session;
            let now = Instant::now();
            let index: HashMap<Uuid, usize> =
                tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

            for bar in layout.bars_mut() {
                let Some(task) = index.get(&bar.task_id).and_then(|&i| tasks.get_mut(i)) else {
                    continue;
                };
                let task_id = task.id;
                let bar_rect = shape_rect(origin, bar.shape());

                let bar_response = ui.interact(
                    bar_rect.expand(2.0),
                    ui.make_persistent_id(("bar", task_id)),
                    Sense::click_and_drag(),
                );
                let resize_response = (!bar.shape().is_point()).then(|| {
                    let handle = Rect::from_min_max(
                        Pos2::new(bar_rect.right() - theme::HANDLE_WIDTH * 0.5, bar_rect.top()),
                        Pos2::new(bar_rect.right() + theme::HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                    );
                    ui.interact(
                        handle.expand(2.0),
                        ui.make_persistent_id(("bar-resize", task_id)),
                        Sense::drag(),
                    )
                });
                let resize = resize_response.as_ref();

                if bar_response.drag_started() || resize.is_some_and(|r| r.drag_started()) {
                    *dragging = Some(task_id);
                    *selected = Some(task_id);
                    *popup = None;
                    consumed_click = true;
                }

                if let Some(r) = resize.filter(|r| r.dragged()) {
                    egui_ctx.set_cursor_icon(CursorIcon::ResizeHorizontal);
                    let width = (bar.shape().width() + r.drag_delta().x).max(0.0);
                    bar.shape_mut().set_width(width);
                    place_bar_label(bar, task, &measure);
                } else if bar_response.dragged() {
                    egui_ctx.set_cursor_icon(CursorIcon::Grabbing);
                    bar.shape_mut().translate_x(bar_response.drag_delta().x);
                    place_bar_label(bar, task, &measure);
                } else if resize.is_some_and(|r| r.hovered()) {
                    egui_ctx.set_cursor_icon(CursorIcon::ResizeHorizontal);
                } else if bar_response.hovered() {
                    egui_ctx.set_cursor_icon(CursorIcon::PointingHand);
                }

                // Recompute dates once per gesture, on release.
                if bar_response.drag_stopped() || resize.is_some_and(|r| r.drag_stopped()) {
                    bar.date_changed(task, context, events);
                    guard.mark_completed(now);
                    *dragging = None;
                    *needs_layout = true;
                    egui_ctx.request_repaint();
                }

                if bar_response.clicked() {
                    consumed_click = true;
                    if !guard.suppresses(now) && dragging.is_none() {
                        *selected = Some(task_id);
                        let request = bar.popup_request(task, context);
                        let anchor = origin
                            + Vec2::new(
                                request.target.x,
                                request.target.y + request.target.height + 6.0,
                            );
                        *popup = Some(OpenPopup { request, anchor });
                    }
                }
                if bar_response.double_clicked() && !guard.suppresses(now) {
                    events.trigger_event(ChartEvent::Click { task_id });
                }

                let is_selected = *selected == Some(task_id);
                let is_dragged = *dragging == Some(task_id);
                draw_bar(&painter, &egui_ctx, origin, bar, task, is_selected, is_dragged);
                draw_marker(&painter, origin, bar);
                draw_label(&painter, origin, bar, task);
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected = None;
                *popup = None;
            }
        });
}

fn shape_rect(origin: Pos2, shape: &BarShape) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(shape.x(), shape.y()),
        Vec2::new(shape.width(), shape.height()),
    )
}

/// Width to draw this frame; a bar grows in from zero the first time its
/// task is shown.
fn grown_width(ctx: &egui::Context, id: Id, width: f32) -> f32 {
    let seeded_id = id.with("seeded");
    let seeded = ctx.data(|d| d.get_temp::<bool>(seeded_id)).unwrap_or(false);
    if !seeded {
        ctx.data_mut(|d| d.insert_temp(seeded_id, true));
        ctx.animate_value_with_time(id, 0.0, theme::BAR_GROW_SECS);
        ctx.request_repaint();
        return 0.0;
    }
    ctx.animate_value_with_time(id, width, theme::BAR_GROW_SECS)
}

fn draw_bar(
    painter: &egui::Painter,
    ctx: &egui::Context,
    origin: Pos2,
    bar: &Bar,
    task: &Task,
    is_selected: bool,
    is_dragged: bool,
) {
    let fill = if bar.invalid {
        theme::BAR_INVALID
    } else {
        task.color
            .unwrap_or_else(|| theme::category_color(&task.category))
    };

    match *bar.shape() {
        BarShape::Rect {
            x,
            y,
            width,
            height,
            corner_radius,
        } => {
            let shown = if is_dragged {
                width
            } else {
                grown_width(ctx, Id::new(("bar-width", bar.task_id)), width)
            };
            let rect = Rect::from_min_size(origin + Vec2::new(x, y), Vec2::new(shown, height));
            let rounding = Rounding::same(corner_radius);

            // Soft shadow
            painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
            painter.rect_filled(rect, rounding, fill);
            // Lighter top highlight
            let highlight = Rect::from_min_size(rect.min, Vec2::new(shown, (height * 0.45).max(2.0)));
            painter.rect_filled(
                highlight,
                Rounding {
                    nw: corner_radius,
                    ne: corner_radius,
                    sw: 0.0,
                    se: 0.0,
                },
                Color32::from_white_alpha(25),
            );

            if bar.invalid {
                painter.rect_stroke(rect, rounding, Stroke::new(1.5, theme::BAR_INVALID_STROKE));
            }
            if is_selected {
                painter.rect_stroke(
                    rect.expand(1.5),
                    Rounding::same(corner_radius + 1.5),
                    Stroke::new(2.0, theme::BORDER_ACCENT),
                );
                let handle_h = height * 0.55;
                let handle = Rect::from_min_size(
                    Pos2::new(rect.right() - 2.5, rect.center().y - handle_h / 2.0),
                    Vec2::new(4.0, handle_h),
                );
                painter.rect_filled(handle, Rounding::same(2.0), theme::HANDLE_COLOR);
            }
        }
        BarShape::Point { cx, cy, r } => {
            let center = origin + Vec2::new(cx, cy);
            painter.circle_filled(center + Vec2::new(1.0, 1.5), r, Color32::from_black_alpha(40));
            painter.circle_filled(center, r, fill);
            if bar.invalid {
                painter.circle_stroke(center, r, Stroke::new(1.5, theme::BAR_INVALID_STROKE));
            }
            if is_selected {
                painter.circle_stroke(center, r + 2.0, Stroke::new(2.0, theme::BORDER_ACCENT));
            }
        }
    }
}

fn draw_marker(painter: &egui::Painter, origin: Pos2, bar: &Bar) {
    if let Some(x) = bar.marker_x {
        painter.text(
            Pos2::new(origin.x + x, origin.y + bar.center_y()),
            Align2::LEFT_CENTER,
            egui_phosphor::regular::AIRPLANE,
            theme::font_marker(),
            theme::MARKER,
        );
    }
}

fn draw_label(painter: &egui::Painter, origin: Pos2, bar: &Bar, task: &Task) {
    let Some(placement) = bar.label() else {
        return;
    };
    let pos = Pos2::new(origin.x + placement.x, origin.y + bar.center_y());
    if placement.oversized {
        painter.text(pos, Align2::LEFT_CENTER, &task.name, theme::font_bar(), theme::TEXT_SECONDARY);
    } else {
        painter.text(pos, Align2::CENTER_CENTER, &task.name, theme::font_bar(), theme::TEXT_ON_BAR);
    }
}

fn draw_lane_stripes(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &ChartLayout,
    context: &ChartContext,
    width: f32,
) {
    let opts = &context.options;
    for lane in 0..layout.state().lane_count() {
        let top = transform::lane_to_y(lane, opts) - opts.padding / 2.0;
        let row = Rect::from_min_size(
            Pos2::new(origin.x, origin.y + top),
            Vec2::new(width, opts.bar_height + opts.padding),
        );
        if lane % 2 == 0 {
            painter.rect_filled(row, 0.0, theme::LANE_STRIPE);
        }
        painter.line_segment(
            [row.left_bottom(), row.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

/// Next column boundary after `date`.
fn next_column(date: NaiveDateTime, context: &ChartContext) -> Option<NaiveDateTime> {
    match context.view_mode() {
        ViewMode::Month => date.checked_add_months(Months::new(1)),
        _ => {
            let hours = context.options.step.round().max(1.0) as i64;
            date.checked_add_signed(Duration::hours(hours))
        }
    }
}

/// Key that changes whenever the upper header row needs a new caption.
fn upper_key(date: NaiveDateTime, mode: ViewMode) -> (i32, u32, u32) {
    match mode {
        ViewMode::QuarterDay | ViewMode::HalfDay => (date.year(), date.month(), date.day()),
        ViewMode::Day | ViewMode::Week => (date.year(), date.month(), 0),
        ViewMode::Month => (date.year(), 0, 0),
    }
}

fn column_captions(date: NaiveDateTime, mode: ViewMode) -> (String, String) {
    match mode {
        ViewMode::QuarterDay | ViewMode::HalfDay => {
            (date.format("%H:%M").to_string(), date.format("%-d %b").to_string())
        }
        ViewMode::Day => (date.format("%d").to_string(), date.format("%B %Y").to_string()),
        ViewMode::Week => (date.format("%-d %b").to_string(), date.format("%B").to_string()),
        ViewMode::Month => (date.format("%B").to_string(), date.format("%Y").to_string()),
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    context: &ChartContext,
    width: f32,
    height: f32,
) {
    let header_height = context.options.header_height;
    let mode = context.view_mode();

    // Background for header
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, header_height)),
        0.0,
        theme::BG_HEADER,
    );

    // Bottom border of header
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + header_height),
            Pos2::new(origin.x + width, origin.y + header_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut date = context.gantt_start;
    let mut previous_key = None;
    loop {
        let x = origin.x + context.date_to_x(date);
        if x > origin.x + width {
            break;
        }

        painter.line_segment(
            [
                Pos2::new(x, origin.y + header_height),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let (lower, upper) = column_captions(date, mode);
        painter.text(
            Pos2::new(x + 3.0, origin.y + header_height * 0.72),
            Align2::LEFT_CENTER,
            lower,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );

        let key = upper_key(date, mode);
        if previous_key != Some(key) {
            painter.text(
                Pos2::new(x + 3.0, origin.y + header_height * 0.3),
                Align2::LEFT_CENTER,
                upper,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
            previous_key = Some(key);
        }

        match next_column(date, context) {
            Some(next) => date = next,
            None => break,
        }
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, context: &ChartContext, height: f32) {
    let now = chrono::Local::now().naive_local();
    if now < context.gantt_start || now > context.gantt_end {
        return;
    }
    let header_height = context.options.header_height;
    let x = origin.x + context.date_to_x(now);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + header_height),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    // Top badge
    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + header_height - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}
