pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod assets;
pub mod extensions;
pub mod machine;

// Re-export key types at crate root for convenience
pub use api::config::{ReelConfig, ReelLayout};
pub use api::error::ReelError;
pub use api::outcome::{ScatterWin, SpinOutcome, WinningLine};
pub use api::types::{ReelEvent, ReelId, SpinId, SymbolId};
pub use assets::manifest::{AtlasDescriptor, SymbolDescriptor, SymbolManifest};
pub use assets::registry::TextureRegistry;
pub use components::reel::{Reel, ReelMotion};
pub use components::sprite::{AtlasId, SymbolSprite, SymbolTexture};
pub use core::clock::FrameClock;
pub use core::rng::{SequenceRng, SymbolRng, XorShiftRng};
pub use core::strip::{ReelStrip, StripStore};
pub use machine::ticket::SpinTicket;
pub use machine::{aligned_target, ReelMachine, SpinState, DEFAULT_SEED};
pub use renderer::instance::{RenderBuffer, SymbolInstance};
pub use systems::resolver::{find_stop_offset, StopResolution};

// Extensions: tweening and easing, usable outside the machine
pub use extensions::{ease, lerp, Easing, Tween, TweenId, TweenScheduler, TweenTarget};
