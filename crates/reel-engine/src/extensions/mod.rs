// extensions/mod.rs
//
// Tweening and easing. The machine drives reel positions through these, but
// nothing here knows about strips or symbols.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use tween::{Tween, TweenCompletion, TweenId, TweenScheduler, TweenTarget};
