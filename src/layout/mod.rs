//! Layout engine: coordinate transforms, lane packing, bar geometry and
//! label placement.

pub mod bar;
pub mod events;
pub mod geometry;
pub mod label;
pub mod lanes;
pub mod render;
pub mod transform;

pub use bar::{Bar, PopupRequest};
pub use events::{ActionGuard, ChartEvent, EventSink};
pub use geometry::{BarShape, BoundingBox};
pub use label::{place_label, LabelPlacement};
pub use lanes::{BarExtent, LaneGroup, LaneSlot, LayoutState};
pub use render::{ChartLayout, LabelMeasure, PassId};
