//! Discrete four-leg bridge sequencing
//!
//! For OSMC-style bridges driven by a HIP4081-class gate driver. Every switch
//! is a separate gate input, so nothing in hardware prevents both switches of
//! a leg conducting at once. Switches are always turned off first, then
//! [`PinOp::DeadTime`](super::PinOp::DeadTime), then the new switch is turned on.
//!
//! | duty | brake | direction | sequence                                   |
//! |------|-------|-----------|--------------------------------------------|
//! | 0    | no    | -         | AHI=0 BHI=0 ALI=0 BLI=0 (coast)            |
//! | 0    | yes   | -         | AHI=0 BHI=0 dead ALI=1 BLI=1               |
//! | >0   | -     | forward   | BHI=0 ALI=0 dead AHI=1 BLI=PWM             |
//! | >0   | -     | reverse   | AHI=0 BLI=0 dead BHI=1 ALI=PWM             |
//!
//! ## References
//!
//! - [HIP4081A Datasheet](https://www.renesas.com/us/en/document/dst/hip4081a-datasheet)
//! - [TB321: HIP4080/HIP4081 H-bridge drivers](https://www.renesas.com/us/en/document/oth/tb321-hip4080-and-hip4081-high-frequency-h-bridge-drivers)

use super::plan::{BridgeView, DrivePlan, LegSequencer};
use super::state::Direction;
use crate::platform::Level;

/// Leg sequencer for discrete full bridges
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBridge;

impl LegSequencer for FullBridge {
    fn sequence(&self, view: &BridgeView<'_>, plan: &mut DrivePlan) {
        let legs = view.legs;

        if view.duty == 0 {
            // High side off first, it is the slower switch
            plan.digital(legs.high_a, Level::Low);
            plan.digital(legs.high_b, Level::Low);
            if view.state.brake {
                plan.dead_time();
                plan.digital(legs.low_a, Level::High);
                plan.digital(legs.low_b, Level::High);
            } else {
                plan.digital(legs.low_a, Level::Low);
                plan.digital(legs.low_b, Level::Low);
            }
            return;
        }

        match view.state.direction {
            Direction::Forward => {
                // Current flows A to B
                plan.digital(legs.high_b, Level::Low);
                plan.digital(legs.low_a, Level::Low);
                plan.dead_time();
                plan.digital(legs.high_a, Level::High);
                plan.pwm(legs.low_b, view.duty);
            }
            Direction::Reverse => {
                // Current flows B to A
                plan.digital(legs.high_a, Level::Low);
                plan.digital(legs.low_b, Level::Low);
                plan.dead_time();
                plan.digital(legs.high_b, Level::High);
                plan.pwm(legs.low_a, view.duty);
            }
        }
    }
}
