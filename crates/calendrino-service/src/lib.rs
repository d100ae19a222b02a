pub mod error;
pub mod excerpt;
pub mod render;
