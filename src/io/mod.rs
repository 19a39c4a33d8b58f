pub mod config;
pub mod file;

pub use config::{load_options, resolve_options};
pub use file::{load_project, save_project};
