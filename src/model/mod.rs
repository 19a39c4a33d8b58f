pub mod project;
pub mod task;
pub mod timeline;

pub use project::Project;
pub use task::{MarkerAttribute, Task};
pub use timeline::{ChartContext, ChartOptions, ViewMode};
