//! Pin interface trait
//!
//! This module defines the narrow pin-bus interface that platform implementations
//! must provide to drive a bridge: pin direction, digital level, PWM duty and a
//! microsecond busy-wait.

use core::fmt;

use crate::platform::Result;

/// Physical pin number on the target board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u16);

impl PinId {
    /// Raw pin number
    pub const fn number(self) -> u16 {
        self.0
    }
}

impl From<u16> for PinId {
    fn from(n: u16) -> Self {
        Self(n)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// `true` for [`Level::High`]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input mode (high impedance)
    Input,
    /// Output mode (push-pull)
    Output,
}

/// Pin bus interface trait
///
/// Platform implementations must provide this interface for every pin a bridge
/// may be attached to. Pins are addressed by number so one bus can serve several
/// bridges.
///
/// # Safety Invariants
///
/// - `write_digital` before `configure_output` latches the level, so the pin
///   comes up at that level when it becomes an output
/// - `delay_us` blocks for at least the requested time (busy-wait or hardware
///   timer, never a yield point)
/// - Only one owner per pin
pub trait PinInterface {
    /// Configure pin as a push-pull output
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidPin)` if the pin does not exist.
    fn configure_output(&mut self, pin: PinId) -> Result<()>;

    /// Configure pin as a high-impedance input
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidPin)` if the pin does not exist.
    fn configure_input(&mut self, pin: PinId) -> Result<()>;

    /// Write a digital level
    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<()>;

    /// Write an 8-bit PWM duty cycle (0 = always low, 255 = always high)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::NotPwmCapable)` if the pin cannot
    /// generate PWM.
    fn write_pwm(&mut self, pin: PinId, duty: u8) -> Result<()>;

    /// Delay for specified number of microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;
}
