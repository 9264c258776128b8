//! Platform abstraction layer
//!
//! This module provides the pin-level hardware abstraction the bridge core is
//! driven through. Board crates implement [`PinInterface`] on top of their HAL.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{Level, PinId, PinInterface, PinMode};
