//! Bridge driver
//!
//! [`Bridge`] owns the pin bus, the topology and the logical motor state. Each
//! mutator that changes state re-plans the drive output and executes it before
//! returning. Repeating a call with unchanged arguments writes nothing unless
//! the previous drive failed, in which case the output is driven again.
//!
//! Calls on an unattached bridge are recorded but never touch hardware.

use super::plan::{BridgeVariant, DrivePlan, PinOp, plan_output};
use super::state::{Direction, MotorState, RampState};
use super::topology::BridgeTopology;
use super::{Motor, MotorError};
use crate::platform::{Level, PinInterface, PlatformError, Result};
use crate::{log_debug, log_error, log_info, log_warn};

/// Maximum duty / power magnitude
pub const MAX_POWER: u8 = u8::MAX;

/// Static driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Anti-shoot-through delay in microseconds (minimum 1)
    pub dead_time_us: u32,
    /// Duty units added per [`Bridge::ramp_tick`] (minimum 1)
    pub ramp_step: u8,
    /// Ramping enabled at construction
    pub ramp_enabled: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            dead_time_us: 1,
            ramp_step: 10,
            ramp_enabled: false,
        }
    }
}

/// H-bridge driver
///
/// # Type Parameters
///
/// * `P` - Pin bus the bridge pins live on
pub struct Bridge<P: PinInterface> {
    pins: P,
    variant: BridgeVariant,
    config: BridgeConfig,
    topology: BridgeTopology,
    state: MotorState,
    ramp: RampState,
    /// Last drive failed; hardware may not match `state`
    output_stale: bool,
}

impl<P: PinInterface> Bridge<P> {
    /// Create an unattached bridge with default settings
    pub fn new(variant: BridgeVariant, pins: P) -> Self {
        Self::with_config(variant, pins, BridgeConfig::default())
    }

    /// Create an unattached bridge
    ///
    /// A zero dead time or ramp step is raised to 1.
    pub fn with_config(variant: BridgeVariant, pins: P, config: BridgeConfig) -> Self {
        let config = BridgeConfig {
            dead_time_us: config.dead_time_us.max(1),
            ramp_step: config.ramp_step.max(1),
            ..config
        };
        Self {
            pins,
            variant,
            config,
            topology: BridgeTopology::unassigned(),
            state: MotorState::new(),
            ramp: RampState {
                enabled: config.ramp_enabled,
                ..RampState::default()
            },
            output_stale: false,
        }
    }

    /// Assign pins and bring the hardware up disabled
    ///
    /// Any previous assignment is disabled (enable pin and legs low) and then
    /// detached before the new pins are touched. The enable pin (if any) is
    /// latched low before it becomes an output, then every leg pin is latched
    /// low before any of them becomes an output, so no gate input ever sees a
    /// high level during mode changes. Logical state is reset to stopped and
    /// disabled; the ramp enable flag is kept.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if a leg pin is unassigned (the
    /// bridge stays detached), or the pin bus error if initialization fails.
    pub fn attach(&mut self, topology: BridgeTopology) -> Result<()> {
        let Some(legs) = topology.legs() else {
            log_error!("bridge attach rejected: leg pin unassigned");
            return Err(PlatformError::InvalidConfig);
        };

        if self.attached() {
            self.state.output_enabled = false;
            self.drive_output()?;
        }
        self.detach()?;

        if topology.enable.is_none() && self.variant == BridgeVariant::FullBridge {
            log_warn!("full bridge attached without enable pin");
        }

        self.topology = topology;
        self.state = MotorState::new();
        self.ramp.reset();
        self.output_stale = false;

        if let Some(enable) = topology.enable {
            self.pins.write_digital(enable, Level::Low)?;
            self.pins.configure_output(enable)?;
        }
        for pin in legs.in_order() {
            self.pins.write_digital(pin, Level::Low)?;
        }
        for pin in legs.in_order() {
            self.pins.configure_output(pin)?;
        }

        log_info!(
            "{} bridge attached: AHI={} ALI={} BHI={} BLI={}",
            self.variant,
            legs.high_a,
            legs.low_a,
            legs.high_b,
            legs.low_b
        );
        Ok(())
    }

    /// `true` if all four leg pins are assigned
    pub fn attached(&self) -> bool {
        self.topology.is_attached()
    }

    /// Release the pins to high impedance
    ///
    /// Leg pins are driven low, then switched to inputs. The enable pin is left
    /// as it is. All slots become unassigned. No-op when not attached.
    pub fn detach(&mut self) -> Result<()> {
        let Some(legs) = self.topology.legs() else {
            return Ok(());
        };

        for pin in legs.in_order() {
            self.pins.write_digital(pin, Level::Low)?;
        }
        for pin in legs.in_order() {
            self.pins.configure_input(pin)?;
        }

        self.topology = BridgeTopology::unassigned();
        log_info!("{} bridge detached", self.variant);
        Ok(())
    }

    /// Enable or disable the bridge outputs
    ///
    /// Disabling drives every leg low regardless of power and brake.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.state.output_enabled == enabled && !self.output_stale {
            return Ok(());
        }
        self.state.output_enabled = enabled;
        log_debug!("bridge output enabled: {}", enabled);
        self.drive_output()
    }

    /// Select dynamic braking (short through the low side) while stopped
    pub fn set_brake(&mut self, brake: bool) -> Result<()> {
        if self.state.brake == brake && !self.output_stale {
            return Ok(());
        }
        self.state.brake = brake;
        self.drive_output()
    }

    /// Set power magnitude and direction
    ///
    /// With ramping enabled the new target is approached by later
    /// [`Bridge::do_ramp`] / [`Bridge::ramp_tick`] calls; a lower target and a
    /// direction change (duty drops to 0 first) apply immediately.
    pub fn set_power(&mut self, power: u8, direction: Direction) -> Result<()> {
        let direction_changed = direction != self.state.direction;
        let power_changed = power != self.ramp.target;
        if !(direction_changed || power_changed || self.output_stale) {
            return Ok(());
        }

        self.state.requested_power = power;
        self.state.direction = direction;
        self.ramp.target = power;

        if self.ramp.enabled {
            if direction_changed {
                log_debug!("direction now {}, ramping up from zero", direction);
                self.ramp.current_pwm = 0;
            }
            // Only a step down can happen here
            self.do_ramp(0)
        } else {
            self.do_ramp(MAX_POWER)
        }
    }

    /// Set power from a signed value, sign selecting direction
    ///
    /// The value is clamped to `-255..=255` before the magnitude is taken. Zero
    /// keeps the current direction.
    pub fn set_signed_power(&mut self, power: i32) -> Result<()> {
        let power = power.clamp(-(MAX_POWER as i32), MAX_POWER as i32);
        let direction = match power {
            p if p < 0 => Direction::Reverse,
            p if p > 0 => Direction::Forward,
            _ => self.state.direction,
        };
        self.set_power(power.unsigned_abs() as u8, direction)
    }

    /// Turn duty ramping on or off
    ///
    /// Turning it off jumps straight to the target duty.
    pub fn set_ramp_enabled(&mut self, enable: bool) -> Result<()> {
        let was_enabled = self.ramp.enabled;
        self.ramp.enabled = enable;
        if was_enabled && !enable {
            return self.do_ramp(MAX_POWER);
        }
        Ok(())
    }

    /// One ramp step of at most `units` toward the target, then drive
    pub fn do_ramp(&mut self, units: u8) -> Result<()> {
        self.ramp.step(units);
        self.drive_output()
    }

    /// One ramp step of the configured size
    pub fn ramp_tick(&mut self) -> Result<()> {
        self.do_ramp(self.config.ramp_step)
    }

    /// Bridge hardware variant
    pub fn variant(&self) -> BridgeVariant {
        self.variant
    }

    /// Current pin assignment
    pub fn topology(&self) -> &BridgeTopology {
        &self.topology
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Logical motor state
    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn ramp(&self) -> RampState {
        self.ramp
    }

    /// Duty currently driven (after ramping)
    pub fn duty(&self) -> u8 {
        self.ramp.current_pwm
    }

    /// `true` while the driven duty is below its target
    pub fn is_ramping(&self) -> bool {
        !self.ramp.is_settled()
    }

    /// Reference to the pin bus
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutable reference to the pin bus
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Release the pin bus
    pub fn free(self) -> P {
        self.pins
    }

    fn drive_output(&mut self) -> Result<()> {
        let plan = plan_output(
            &self.variant,
            &self.topology,
            &self.state,
            self.ramp.current_pwm,
        );
        self.execute(&plan)
    }

    /// Apply a plan in order
    ///
    /// After a failed write only de-energizing ops are still applied, so a
    /// fault never leaves a switch on that the plan meant to turn off.
    fn execute(&mut self, plan: &DrivePlan) -> Result<()> {
        let mut first_error = None;

        for op in plan.ops() {
            if first_error.is_some() && !op.is_de_energizing() {
                continue;
            }
            let result = match *op {
                PinOp::Digital(pin, level) => self.pins.write_digital(pin, level),
                PinOp::Pwm(pin, duty) => self.pins.write_pwm(pin, duty),
                PinOp::DeadTime => self.pins.delay_us(self.config.dead_time_us),
            };
            if let Err(e) = result {
                if first_error.is_none() {
                    log_error!("bridge drive failed: {}", e);
                    first_error = Some(e);
                }
            }
        }

        self.output_stale = first_error.is_some();
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<P: PinInterface> Motor for Bridge<P> {
    /// Scale `speed` to ±255 and apply it as signed power
    fn set_speed(&mut self, speed: f32) -> core::result::Result<(), MotorError> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(MotorError::InvalidSpeed);
        }
        self.set_signed_power((speed * MAX_POWER as f32) as i32)?;
        Ok(())
    }

    /// Zero power with braking off
    fn stop(&mut self) -> core::result::Result<(), MotorError> {
        self.set_brake(false)?;
        self.set_power(0, self.state.direction)?;
        Ok(())
    }

    /// Zero power with braking on
    fn brake(&mut self) -> core::result::Result<(), MotorError> {
        self.set_power(0, self.state.direction)?;
        self.set_brake(true)?;
        Ok(())
    }
}
