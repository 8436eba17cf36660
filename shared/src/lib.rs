//! Shared avatar simulation used by the viewer (and anything else that wants to step avatars
//! without a render target).
//!
//! Everything in here is plain per-frame arithmetic: no rendering, no IO, no errors.

pub mod animation;
pub mod arena;
pub mod avatar;
pub mod components;
pub mod movement;
pub mod physics;
pub mod spawn;

pub use animation::*;
pub use arena::*;
pub use avatar::*;
pub use components::*;
pub use movement::*;
pub use physics::*;
pub use spawn::*;
