//! Client-side game systems
//!
//! Organized into submodules for maintainability.

mod avatar;
mod simulation;
mod world;

// Re-export everything for easy access from main.rs
pub use avatar::*;
pub use simulation::*;
pub use world::*;
