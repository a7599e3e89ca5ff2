//! Core engine types shared by the flight simulation crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform and local-frame rotation helpers
//! - Frame timing (wall clock or manual stepping)
//! - Small per-entity components (lifetimes, spin)

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};
