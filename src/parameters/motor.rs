//! Motor Bridge Parameter Definitions
//!
//! # Parameters
//!
//! - `MOT_DEADTIME_US` - Anti-shoot-through delay in microseconds (default 1, minimum 1)
//! - `MOT_RAMP_STEP` - Duty units added per ramp tick (default 10, range 1-255)
//! - `MOT_RAMP_EN` - Ramp duty changes at startup (default false)

use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::libraries::motor_driver::BridgeConfig;
use crate::platform::Result;

const DEFAULT_DEADTIME_US: i32 = 1;
const DEFAULT_RAMP_STEP: i32 = 10;

/// Motor bridge parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorParams {
    /// Anti-shoot-through delay (µs)
    pub dead_time_us: u32,
    /// Ramp step (duty units per tick)
    pub ramp_step: u8,
    pub ramp_enabled: bool,
}

impl MotorParams {
    /// Register motor parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<()> {
        store.register(
            "MOT_DEADTIME_US",
            ParamValue::Int(DEFAULT_DEADTIME_US),
            ParamFlags::empty(),
        )?;
        store.register(
            "MOT_RAMP_STEP",
            ParamValue::Int(DEFAULT_RAMP_STEP),
            ParamFlags::empty(),
        )?;
        store.register("MOT_RAMP_EN", ParamValue::Bool(false), ParamFlags::empty())?;
        Ok(())
    }

    /// Load motor parameters from parameter store
    ///
    /// Missing or out-of-range values fall back to defaults or are clamped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let dead_time_us = match store.get("MOT_DEADTIME_US") {
            Some(ParamValue::Int(v)) => *v,
            Some(ParamValue::Float(v)) => *v as i32,
            _ => DEFAULT_DEADTIME_US,
        };

        let ramp_step = match store.get("MOT_RAMP_STEP") {
            Some(ParamValue::Int(v)) => *v,
            Some(ParamValue::Float(v)) => *v as i32,
            _ => DEFAULT_RAMP_STEP,
        };

        let ramp_enabled = match store.get("MOT_RAMP_EN") {
            Some(ParamValue::Bool(v)) => *v,
            Some(ParamValue::Int(v)) => *v != 0,
            _ => false,
        };

        Self {
            dead_time_us: dead_time_us.max(1) as u32,
            ramp_step: ramp_step.clamp(1, u8::MAX as i32) as u8,
            ramp_enabled,
        }
    }
}

impl Default for MotorParams {
    fn default() -> Self {
        Self {
            dead_time_us: DEFAULT_DEADTIME_US as u32,
            ramp_step: DEFAULT_RAMP_STEP as u8,
            ramp_enabled: false,
        }
    }
}

impl From<MotorParams> for BridgeConfig {
    fn from(params: MotorParams) -> Self {
        BridgeConfig {
            dead_time_us: params.dead_time_us,
            ramp_step: params.ramp_step,
            ramp_enabled: params.ramp_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_params_defaults() {
        let mut store = ParameterStore::new();
        MotorParams::register_defaults(&mut store).unwrap();
        assert_eq!(store.count(), 3);

        let params = MotorParams::from_store(&store);
        assert_eq!(params, MotorParams::default());
        assert_eq!(BridgeConfig::from(params), BridgeConfig::default());
    }

    #[test]
    fn test_motor_params_from_store() {
        let mut store = ParameterStore::new();
        MotorParams::register_defaults(&mut store).unwrap();
        store.set("MOT_DEADTIME_US", ParamValue::Int(4)).unwrap();
        store.set("MOT_RAMP_STEP", ParamValue::Int(25)).unwrap();
        store.set("MOT_RAMP_EN", ParamValue::Bool(true)).unwrap();

        let params = MotorParams::from_store(&store);
        assert_eq!(params.dead_time_us, 4);
        assert_eq!(params.ramp_step, 25);
        assert!(params.ramp_enabled);
    }

    #[test]
    fn test_motor_params_clamped() {
        let mut store = ParameterStore::new();
        MotorParams::register_defaults(&mut store).unwrap();
        store.set("MOT_DEADTIME_US", ParamValue::Int(-3)).unwrap();
        store.set("MOT_RAMP_STEP", ParamValue::Int(1000)).unwrap();

        let params = MotorParams::from_store(&store);
        assert_eq!(params.dead_time_us, 1);
        assert_eq!(params.ramp_step, 255);
    }

    #[test]
    fn test_motor_params_empty_store() {
        let store = ParameterStore::new();
        assert_eq!(MotorParams::from_store(&store), MotorParams::default());
    }
}
