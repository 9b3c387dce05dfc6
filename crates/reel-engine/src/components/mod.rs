pub mod reel;
pub mod sprite;
