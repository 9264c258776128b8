//! Logical motor state and duty ramping

use core::fmt;

/// Direction of current through the motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Current flows A to B
    #[default]
    Forward,
    /// Current flows B to A
    Reverse,
}

impl Direction {
    /// The other direction
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// `true` for [`Direction::Reverse`]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

/// What the caller asked the motor to do
///
/// Only the bridge mutators change this; drive sequencing reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Requested duty magnitude (0 = stopped)
    pub requested_power: u8,
    pub direction: Direction,
    /// Dynamic braking when stopped
    pub brake: bool,
    /// Bridge outputs enabled; when false every leg is held low
    pub output_enabled: bool,
}

impl MotorState {
    /// Stopped, forward, no brake, outputs disabled
    pub const fn new() -> Self {
        Self {
            requested_power: 0,
            direction: Direction::Forward,
            brake: false,
            output_enabled: false,
        }
    }
}

/// Duty ramp
///
/// `current_pwm` is the duty actually driven. It moves toward `target` by a
/// bounded step when rising and snaps to it when falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampState {
    pub current_pwm: u8,
    pub target: u8,
    /// When false every step is a full-magnitude step
    pub enabled: bool,
}

impl RampState {
    /// Advance `current_pwm` by at most `units` toward a higher target, or drop
    /// straight to a lower one. Returns the new duty.
    pub fn step(&mut self, units: u8) -> u8 {
        if self.target > self.current_pwm {
            self.current_pwm += units.min(self.target - self.current_pwm);
        } else {
            self.current_pwm = self.target;
        }
        self.current_pwm
    }

    /// `true` once the driven duty equals the target
    pub fn is_settled(&self) -> bool {
        self.current_pwm == self.target
    }

    /// Zero duty and target, keeping the enabled flag
    pub fn reset(&mut self) {
        self.current_pwm = 0;
        self.target = 0;
    }
}
