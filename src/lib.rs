//! Gantt bar layout: time/pixel transforms, category-scoped lane packing,
//! drag recompute and label placement, with an egui chart on top.

pub mod app;
pub mod dates;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod ui;

pub use error::{GanttError, Result};
