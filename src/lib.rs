pub mod camera;
pub mod cli;
pub mod controls;
pub mod frame;
pub mod geometry;
pub mod renderer;
pub mod sketch;
pub mod types;
pub mod viewport;
pub mod window;

pub use sketch::{PaintTarget, Sketch};
