//! Procedural generation: terrain height field, vegetation and cloud layout.

pub mod clouds;
pub mod heightfield;
pub mod vegetation;

pub use clouds::*;
pub use heightfield::*;
pub use vegetation::*;
