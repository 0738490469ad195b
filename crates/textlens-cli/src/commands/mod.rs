pub mod analyze;
pub mod config;
pub mod history;
mod render;
