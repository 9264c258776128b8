//! Bridge pin topology
//!
//! Maps physical pins onto the five logical slots of an H-bridge:
//!
//! ```text
//!  ----------- Vdd
//!    |     |
//!    AHI   BHI
//!    |     |
//!    ---M---
//!    |     |
//!    ALI   BLI
//!    |     |
//!  ----------- GND
//! ```
//!
//! ALI/BLI (low side) must be low whenever the bridge is not enabled.

use crate::platform::PinId;

/// Pin assignment of one bridge
///
/// `None` means the slot is unassigned. The bridge counts as attached only when
/// all four leg slots are assigned; `enable` is independently optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeTopology {
    /// Driver enable / standby pin
    pub enable: Option<PinId>,
    /// Leg A high side (AHI, or IN1 on an integrated driver)
    pub high_a: Option<PinId>,
    /// Leg A low side (ALI, or the PWM pin on an integrated driver)
    pub low_a: Option<PinId>,
    /// Leg B high side (BHI, or IN2 on an integrated driver)
    pub high_b: Option<PinId>,
    /// Leg B low side (BLI, or the PWM pin on an integrated driver)
    pub low_b: Option<PinId>,
}

impl BridgeTopology {
    /// Every slot unassigned
    pub const fn unassigned() -> Self {
        Self {
            enable: None,
            high_a: None,
            low_a: None,
            high_b: None,
            low_b: None,
        }
    }

    /// Discrete four-leg bridge (OSMC, HIP4081 gate driver)
    ///
    /// The enable pin gates the gate driver; without it the low-side inputs are
    /// the only protection while the bridge is disabled.
    pub const fn full_bridge(
        enable: Option<PinId>,
        ali: PinId,
        bli: PinId,
        ahi: PinId,
        bhi: PinId,
    ) -> Self {
        Self {
            enable,
            high_a: Some(ahi),
            low_a: Some(ali),
            high_b: Some(bhi),
            low_b: Some(bli),
        }
    }

    /// Bridge with internal control logic (TB6612FNG)
    ///
    /// `in1`/`in2` select direction and `pwm` carries the duty cycle; both low
    /// slots alias the PWM pin. `enable` is the STBY pin, if wired.
    pub const fn integrated(enable: Option<PinId>, in1: PinId, in2: PinId, pwm: PinId) -> Self {
        Self {
            enable,
            high_a: Some(in1),
            low_a: Some(pwm),
            high_b: Some(in2),
            low_b: Some(pwm),
        }
    }

    /// `true` if all four leg pins are assigned
    pub fn is_attached(&self) -> bool {
        self.legs().is_some()
    }

    /// Resolved leg pins, if attached
    pub fn legs(&self) -> Option<LegPins> {
        Some(LegPins {
            high_a: self.high_a?,
            low_a: self.low_a?,
            high_b: self.high_b?,
            low_b: self.low_b?,
        })
    }
}

/// Leg pins of an attached bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegPins {
    pub high_a: PinId,
    pub low_a: PinId,
    pub high_b: PinId,
    pub low_b: PinId,
}

impl LegPins {
    /// Leg pins in initialization order (AHI, ALI, BHI, BLI)
    pub fn in_order(&self) -> [PinId; 4] {
        [self.high_a, self.low_a, self.high_b, self.low_b]
    }

    /// `true` if `pin` is one of the leg pins
    pub fn contains(&self, pin: PinId) -> bool {
        self.in_order().contains(&pin)
    }
}
