//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;

// Re-export trait interfaces
pub use gpio::{Level, PinId, PinInterface, PinMode};
