//! Mock pin bus implementation for testing

use heapless::Vec;

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::{Level, PinId, PinInterface, PinMode},
};

/// Maximum pin number + 1 accepted by the mock
pub const MAX_GPIO: usize = 64;

/// Capacity of the recorded event log
pub const MAX_EVENTS: usize = 256;

/// One recorded call on the pin bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    /// `configure_output` / `configure_input`
    Configure(PinId, PinMode),
    /// `write_digital`
    Digital(PinId, Level),
    /// `write_pwm`
    Pwm(PinId, u8),
    /// `delay_us`
    Delay(u32),
}

impl PinEvent {
    /// `true` for calls that change what a pin drives (digital or PWM writes)
    pub fn is_write(&self) -> bool {
        matches!(self, PinEvent::Digital(..) | PinEvent::Pwm(..))
    }

    /// Pin the event targets, if any
    pub fn pin(&self) -> Option<PinId> {
        match self {
            PinEvent::Configure(pin, _) | PinEvent::Digital(pin, _) | PinEvent::Pwm(pin, _) => {
                Some(*pin)
            }
            PinEvent::Delay(_) => None,
        }
    }
}

/// What a pin is currently latched to output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutput {
    /// Static digital level
    Digital(Level),
    /// PWM with 8-bit duty
    Pwm(u8),
}

/// Per-pin state tracked by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSnapshot {
    /// Current direction
    pub mode: PinMode,
    /// Latched output value
    pub output: PinOutput,
}

impl PinSnapshot {
    /// `true` if the pin is an output that is never driven high
    pub fn is_driven_low(&self) -> bool {
        self.mode == PinMode::Output
            && matches!(
                self.output,
                PinOutput::Digital(Level::Low) | PinOutput::Pwm(0)
            )
    }
}

const UNTOUCHED: PinSnapshot = PinSnapshot {
    mode: PinMode::Input,
    output: PinOutput::Digital(Level::Low),
};

/// Mock pin bus
///
/// Records every call in order and tracks the latched state of each pin for
/// test verification. Delays are simulated and accumulated.
#[derive(Debug)]
pub struct MockPins {
    pins: [PinSnapshot; MAX_GPIO],
    events: Vec<PinEvent, MAX_EVENTS>,
    overflowed: bool,
    elapsed_us: u64,
    faulty: Option<PinId>,
}

impl MockPins {
    /// Create a new mock bus with every pin as an input latched low
    pub fn new() -> Self {
        Self {
            pins: [UNTOUCHED; MAX_GPIO],
            events: Vec::new(),
            overflowed: false,
            elapsed_us: 0,
            faulty: None,
        }
    }

    /// Make writes to `pin` fail with `PlatformError::ResourceUnavailable`
    pub fn inject_fault(&mut self, pin: Option<PinId>) {
        self.faulty = pin;
    }

    /// Recorded calls since creation or the last [`MockPins::clear_events`]
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Drop the recorded calls (pin state is kept)
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.overflowed = false;
    }

    /// `true` if calls were dropped because the log was full
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Number of recorded digital/PWM writes
    pub fn write_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_write()).count()
    }

    /// Total simulated delay
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Current state of `pin`
    ///
    /// # Panics
    ///
    /// Panics if the pin number is outside the mock's range.
    pub fn pin(&self, pin: PinId) -> PinSnapshot {
        self.pins[pin.0 as usize]
    }

    fn slot(&mut self, pin: PinId) -> Result<&mut PinSnapshot> {
        self.pins
            .get_mut(pin.0 as usize)
            .ok_or(PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn check_fault(&self, pin: PinId) -> Result<()> {
        if self.faulty == Some(pin) {
            return Err(PlatformError::ResourceUnavailable);
        }
        Ok(())
    }

    fn record(&mut self, event: PinEvent) {
        if self.events.push(event).is_err() {
            self.overflowed = true;
        }
    }
}

impl Default for MockPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinInterface for MockPins {
    fn configure_output(&mut self, pin: PinId) -> Result<()> {
        self.slot(pin)?.mode = PinMode::Output;
        self.record(PinEvent::Configure(pin, PinMode::Output));
        Ok(())
    }

    fn configure_input(&mut self, pin: PinId) -> Result<()> {
        self.slot(pin)?.mode = PinMode::Input;
        self.record(PinEvent::Configure(pin, PinMode::Input));
        Ok(())
    }

    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<()> {
        self.check_fault(pin)?;
        self.slot(pin)?.output = PinOutput::Digital(level);
        self.record(PinEvent::Digital(pin, level));
        Ok(())
    }

    fn write_pwm(&mut self, pin: PinId, duty: u8) -> Result<()> {
        self.check_fault(pin)?;
        self.slot(pin)?.output = PinOutput::Pwm(duty);
        self.record(PinEvent::Pwm(pin, duty));
        Ok(())
    }

    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.elapsed_us = self.elapsed_us.wrapping_add(us as u64);
        self.record(PinEvent::Delay(us));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pins_latch_before_output() {
        let mut pins = MockPins::new();
        pins.write_digital(PinId(3), Level::High).unwrap();
        assert_eq!(pins.pin(PinId(3)).mode, PinMode::Input);

        pins.configure_output(PinId(3)).unwrap();
        let snap = pins.pin(PinId(3));
        assert_eq!(snap.mode, PinMode::Output);
        assert_eq!(snap.output, PinOutput::Digital(Level::High));
        assert!(!snap.is_driven_low());
    }

    #[test]
    fn test_mock_pins_records_order() {
        let mut pins = MockPins::new();
        pins.write_digital(PinId(1), Level::Low).unwrap();
        pins.delay_us(1).unwrap();
        pins.write_pwm(PinId(2), 128).unwrap();

        assert_eq!(
            pins.events(),
            &[
                PinEvent::Digital(PinId(1), Level::Low),
                PinEvent::Delay(1),
                PinEvent::Pwm(PinId(2), 128),
            ]
        );
        assert_eq!(pins.write_count(), 2);
        assert_eq!(pins.elapsed_us(), 1);

        pins.clear_events();
        assert!(pins.events().is_empty());
        assert_eq!(pins.pin(PinId(2)).output, PinOutput::Pwm(128));
    }

    #[test]
    fn test_mock_pins_invalid_pin() {
        let mut pins = MockPins::new();
        assert_eq!(
            pins.configure_output(PinId(MAX_GPIO as u16)),
            Err(PlatformError::Gpio(GpioError::InvalidPin))
        );
        assert!(pins.events().is_empty());
    }

    #[test]
    fn test_mock_pins_fault_injection() {
        let mut pins = MockPins::new();
        pins.inject_fault(Some(PinId(5)));
        assert_eq!(
            pins.write_digital(PinId(5), Level::High),
            Err(PlatformError::ResourceUnavailable)
        );
        assert!(pins.write_digital(PinId(6), Level::High).is_ok());

        pins.inject_fault(None);
        assert!(pins.write_pwm(PinId(5), 10).is_ok());
    }

    #[test]
    fn test_mock_pins_pwm_zero_counts_as_low() {
        let mut pins = MockPins::new();
        pins.configure_output(PinId(4)).unwrap();
        pins.write_pwm(PinId(4), 0).unwrap();
        assert!(pins.pin(PinId(4)).is_driven_low());

        pins.write_pwm(PinId(4), 1).unwrap();
        assert!(!pins.pin(PinId(4)).is_driven_low());
    }
}
