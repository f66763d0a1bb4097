pub mod constants;
pub mod dock;
pub mod interp;
pub mod keys;
pub mod mascot;
pub mod mesh;
pub mod pointer;
pub mod pose;
pub mod reveal;
pub mod theme;
pub mod tracker;

pub use constants::*;

// Shaders bundled as string constants
pub static MASCOT_WGSL: &str = include_str!("../../shaders/mascot.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
