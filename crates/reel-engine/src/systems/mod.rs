pub mod frame;
pub mod render;
pub mod resolver;
