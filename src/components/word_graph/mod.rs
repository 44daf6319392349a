//! Force-directed canvas rendering of word co-occurrence graphs.

mod component;
pub mod model;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::WordGraphCanvas;
pub use types::{Edge, GraphData};
