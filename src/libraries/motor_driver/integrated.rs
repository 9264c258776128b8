//! Integrated-logic bridge sequencing
//!
//! For driver ICs such as the TB6612FNG that decode direction inputs and insert
//! their own dead time, so no explicit delay is planned.
//!
//! ## TB6612FNG Truth Table
//!
//! | IN1 | IN2 | PWM  | Motor State                  |
//! |-----|-----|------|------------------------------|
//! | 1   | 1   | 1    | Short brake                  |
//! | 0   | 0   | 1    | Coast (outputs off)          |
//! | 1   | 0   | duty | Forward (A to B)             |
//! | 0   | 1   | duty | Reverse (B to A)             |
//!
//! IN1/IN2 occupy the high-side slots and PWM both low-side slots of the
//! [`BridgeTopology`](super::BridgeTopology).
//!
//! ## References
//!
//! - [TB6612FNG Datasheet](https://toshiba.semicon-storage.com/info/TB6612FNG_datasheet_en_20141001.pdf)

use super::plan::{BridgeView, DrivePlan, LegSequencer};
use super::state::Direction;
use crate::platform::Level;

/// Leg sequencer for integrated-logic bridges
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegratedLogic;

impl LegSequencer for IntegratedLogic {
    fn sequence(&self, view: &BridgeView<'_>, plan: &mut DrivePlan) {
        let in1 = view.legs.high_a;
        let in2 = view.legs.high_b;
        let pwm = view.legs.low_a;

        if view.duty == 0 {
            let level = Level::from(view.state.brake);
            plan.digital(in1, level);
            plan.digital(in2, level);
            plan.digital(pwm, Level::High);
            return;
        }

        match view.state.direction {
            Direction::Forward => {
                plan.digital(in2, Level::Low);
                plan.digital(in1, Level::High);
            }
            Direction::Reverse => {
                plan.digital(in1, Level::Low);
                plan.digital(in2, Level::High);
            }
        }
        plan.pwm(pwm, view.duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::motor_driver::plan::PinOp;
    use crate::libraries::motor_driver::state::MotorState;
    use crate::libraries::motor_driver::topology::BridgeTopology;
    use crate::platform::PinId;

    const IN1: PinId = PinId(10);
    const IN2: PinId = PinId(11);
    const PWM: PinId = PinId(12);

    fn sequence(duty: u8, direction: Direction, brake: bool) -> DrivePlan {
        let state = MotorState {
            requested_power: duty,
            direction,
            brake,
            output_enabled: true,
        };
        let legs = BridgeTopology::integrated(None, IN1, IN2, PWM)
            .legs()
            .unwrap();
        let view = BridgeView {
            legs,
            state: &state,
            duty,
        };
        let mut plan = DrivePlan::new();
        IntegratedLogic.sequence(&view, &mut plan);
        plan
    }

    #[test]
    fn test_integrated_brake() {
        assert_eq!(
            sequence(0, Direction::Forward, true).ops(),
            &[
                PinOp::Digital(IN1, Level::High),
                PinOp::Digital(IN2, Level::High),
                PinOp::Digital(PWM, Level::High),
            ]
        );
    }

    #[test]
    fn test_integrated_coast() {
        assert_eq!(
            sequence(0, Direction::Reverse, false).ops(),
            &[
                PinOp::Digital(IN1, Level::Low),
                PinOp::Digital(IN2, Level::Low),
                PinOp::Digital(PWM, Level::High),
            ]
        );
    }

    #[test]
    fn test_integrated_forward() {
        assert_eq!(
            sequence(180, Direction::Forward, false).ops(),
            &[
                PinOp::Digital(IN2, Level::Low),
                PinOp::Digital(IN1, Level::High),
                PinOp::Pwm(PWM, 180),
            ]
        );
    }

    #[test]
    fn test_integrated_reverse_has_no_dead_time() {
        let plan = sequence(64, Direction::Reverse, true);
        assert_eq!(
            plan.ops(),
            &[
                PinOp::Digital(IN1, Level::Low),
                PinOp::Digital(IN2, Level::High),
                PinOp::Pwm(PWM, 64),
            ]
        );
        assert!(!plan.ops().contains(&PinOp::DeadTime));
    }
}
