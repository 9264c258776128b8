//! Motor driver abstraction
//!
//! This module drives an H-bridge motor controller from plain digital and PWM
//! capable pins, turning "run at power P, braking or not, enabled or not" into
//! an ordered, shoot-through safe sequence of pin writes.
//!
//! ## Features
//!
//! - Discrete four-leg bridges (OSMC / HIP4081 style) with a mandatory dead
//!   time before any switch is energized
//! - Integrated-logic bridges (TB6612FNG style) where the IC handles dead time
//! - Fail-safe enable gating shared by every bridge variant
//! - Optional duty ramping (bounded ramp-up, immediate ramp-down)
//! - Platform-independent `Motor` trait for normalized speed control
//!
//! ## Layers
//!
//! ```text
//! Bridge (attach / mutators / ramp)
//!   └─ plan_output ─┬─ plan_common       (enable gating, disabled => all legs low)
//!                   └─ LegSequencer      (FullBridge | IntegratedLogic)
//!        └─ DrivePlan executed on a PinInterface
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bridge_drive::libraries::motor_driver::{Bridge, BridgeTopology, BridgeVariant, Direction};
//! use bridge_drive::platform::PinId;
//! # fn demo<P: bridge_drive::platform::PinInterface>(pins: P) -> bridge_drive::platform::Result<()> {
//! let mut bridge = Bridge::new(BridgeVariant::FullBridge, pins);
//! bridge.attach(BridgeTopology::full_bridge(
//!     Some(PinId(2)),
//!     PinId(3),
//!     PinId(4),
//!     PinId(5),
//!     PinId(6),
//! ))?;
//!
//! bridge.set_enabled(true)?;
//! bridge.set_power(200, Direction::Forward)?;
//! bridge.set_signed_power(-120)?; // reverse
//! bridge.set_brake(true)?;
//! bridge.set_power(0, Direction::Reverse)?; // dynamic braking
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod full_bridge;
pub mod integrated;
pub mod plan;
pub mod state;
pub mod topology;

// Re-export main types
pub use bridge::{Bridge, BridgeConfig};
pub use full_bridge::FullBridge;
pub use integrated::IntegratedLogic;
pub use plan::{BridgeVariant, BridgeView, DrivePlan, LegSequencer, PinOp, plan_common, plan_output};
pub use state::{Direction, MotorState, RampState};
pub use topology::{BridgeTopology, LegPins};

use crate::platform::PlatformError;

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Speed value outside [-1.0, +1.0] range
    InvalidSpeed,
    /// Pin write failed or the bridge hardware rejected the request
    HardwareFault,
}

impl From<PlatformError> for MotorError {
    fn from(_: PlatformError) -> Self {
        MotorError::HardwareFault
    }
}

/// Motor control trait (platform-independent)
///
/// This trait defines the interface for controlling a single motor with variable speed
/// in forward and reverse directions, plus stop (coast) and brake operations.
///
/// Speed values are normalized to [-1.0, +1.0]:
/// - `+1.0` = full forward
/// - `0.0` = stopped
/// - `-1.0` = full reverse
pub trait Motor {
    /// Set motor speed and direction
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidSpeed` if speed is outside [-1.0, +1.0] range.
    /// Returns `MotorError::HardwareFault` if a pin write fails.
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Stop motor (coast mode - high-Z state)
    ///
    /// Motor freewheels to a stop.
    fn stop(&mut self) -> Result<(), MotorError>;

    /// Brake motor (dynamic braking through the low-side switches)
    fn brake(&mut self) -> Result<(), MotorError>;
}
