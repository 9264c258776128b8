//! Mock platform implementation for testing
//!
//! This module provides a recording pin bus that can be used for unit and
//! integration testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use bridge_drive::platform::mock::{MockPins, PinEvent};
//! use bridge_drive::platform::{Level, PinId, PinInterface};
//!
//! let mut pins = MockPins::new();
//! pins.write_digital(PinId(2), Level::Low).unwrap();
//! assert_eq!(pins.events(), &[PinEvent::Digital(PinId(2), Level::Low)]);
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;

pub use gpio::{MAX_EVENTS, MAX_GPIO, MockPins, PinEvent, PinOutput, PinSnapshot};
