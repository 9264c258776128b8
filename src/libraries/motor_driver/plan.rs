//! Drive-output planning
//!
//! Every state change is evaluated in two phases that append to one
//! [`DrivePlan`]:
//!
//! 1. [`plan_common`] - identical for every bridge: skip unattached bridges,
//!    mirror `output_enabled` on the enable pin, and force every leg low when
//!    disabled.
//! 2. [`LegSequencer::sequence`] - variant-specific leg ordering, only when the
//!    bridge is attached and enabled.
//!
//! Planning is pure; the bridge executes the finished plan in order.

use core::fmt;

use heapless::Vec;

use super::full_bridge::FullBridge;
use super::integrated::IntegratedLogic;
use super::state::MotorState;
use super::topology::{BridgeTopology, LegPins};
use crate::platform::{Level, PinId};

/// Longest plan any variant produces is 6 ops (enable + 5 leg ops); the
/// disabled path stops after Phase 1 with enable + 4 lows.
pub const MAX_PLAN_OPS: usize = 16;

/// One step of a drive sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinOp {
    /// Write a digital level
    Digital(PinId, Level),
    /// Write a PWM duty
    Pwm(PinId, u8),
    /// Anti-shoot-through delay before energizing a switch
    DeadTime,
}

impl PinOp {
    /// `true` if the op can only turn a switch off
    pub fn is_de_energizing(&self) -> bool {
        matches!(self, PinOp::Digital(_, Level::Low) | PinOp::Pwm(_, 0))
    }
}

/// Ordered pin writes for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrivePlan {
    ops: Vec<PinOp, MAX_PLAN_OPS>,
}

impl DrivePlan {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn digital(&mut self, pin: PinId, level: Level) {
        self.push(PinOp::Digital(pin, level));
    }

    pub fn pwm(&mut self, pin: PinId, duty: u8) {
        self.push(PinOp::Pwm(pin, duty));
    }

    pub fn dead_time(&mut self) {
        self.push(PinOp::DeadTime);
    }

    fn push(&mut self, op: PinOp) {
        let pushed = self.ops.push(op);
        debug_assert!(pushed.is_ok(), "drive plan exceeds {} ops", MAX_PLAN_OPS);
    }

    pub fn ops(&self) -> &[PinOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Read-only view handed to a leg sequencer
#[derive(Debug, Clone, Copy)]
pub struct BridgeView<'a> {
    pub legs: LegPins,
    pub state: &'a MotorState,
    /// Effective duty after ramping (0 = stopped)
    pub duty: u8,
}

/// Variant-specific leg sequencing
///
/// Only called for an attached, enabled bridge, after [`plan_common`] ran.
pub trait LegSequencer {
    fn sequence(&self, view: &BridgeView<'_>, plan: &mut DrivePlan);
}

/// Supported bridge hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeVariant {
    /// Discrete four-switch bridge with separate high/low gate inputs
    FullBridge,
    /// Driver IC with direction inputs and one PWM input
    IntegratedLogic,
}

impl LegSequencer for BridgeVariant {
    fn sequence(&self, view: &BridgeView<'_>, plan: &mut DrivePlan) {
        match self {
            BridgeVariant::FullBridge => FullBridge.sequence(view, plan),
            BridgeVariant::IntegratedLogic => IntegratedLogic.sequence(view, plan),
        }
    }
}

impl fmt::Display for BridgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeVariant::FullBridge => write!(f, "full-bridge"),
            BridgeVariant::IntegratedLogic => write!(f, "integrated-logic"),
        }
    }
}

/// Phase 1: common gating
///
/// Returns the leg pins when hardware sequencing may continue, `None` for an
/// unattached bridge (nothing is planned at all in that case).
pub fn plan_common(
    topology: &BridgeTopology,
    state: &MotorState,
    plan: &mut DrivePlan,
) -> Option<LegPins> {
    let legs = topology.legs()?;

    if let Some(enable) = topology.enable {
        plan.digital(enable, Level::from(state.output_enabled));
    }

    if !state.output_enabled {
        for pin in legs.in_order() {
            plan.digital(pin, Level::Low);
        }
    }

    Some(legs)
}

/// Both phases for one evaluation
pub fn plan_output<S: LegSequencer>(
    sequencer: &S,
    topology: &BridgeTopology,
    state: &MotorState,
    duty: u8,
) -> DrivePlan {
    let mut plan = DrivePlan::new();

    let Some(legs) = plan_common(topology, state, &mut plan) else {
        return plan;
    };

    if state.output_enabled {
        let view = BridgeView { legs, state, duty };
        sequencer.sequence(&view, &mut plan);
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::motor_driver::state::Direction;

    fn osmc() -> BridgeTopology {
        BridgeTopology::full_bridge(Some(PinId(2)), PinId(3), PinId(4), PinId(5), PinId(6))
    }

    fn enabled(power: u8, direction: Direction, brake: bool) -> MotorState {
        MotorState {
            requested_power: power,
            direction,
            brake,
            output_enabled: true,
        }
    }

    #[test]
    fn test_unattached_plans_nothing() {
        let state = enabled(200, Direction::Forward, false);
        let plan = plan_output(
            &BridgeVariant::FullBridge,
            &BridgeTopology::unassigned(),
            &state,
            200,
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_disabled_forces_legs_low() {
        let mut state = enabled(200, Direction::Reverse, true);
        state.output_enabled = false;

        let plan = plan_output(&BridgeVariant::FullBridge, &osmc(), &state, 200);
        assert_eq!(
            plan.ops(),
            &[
                PinOp::Digital(PinId(2), Level::Low),
                PinOp::Digital(PinId(5), Level::Low),
                PinOp::Digital(PinId(3), Level::Low),
                PinOp::Digital(PinId(6), Level::Low),
                PinOp::Digital(PinId(4), Level::Low),
            ]
        );
        assert!(plan.ops().iter().all(PinOp::is_de_energizing));
    }

    #[test]
    fn test_disabled_without_enable_pin() {
        let topology = BridgeTopology::integrated(None, PinId(7), PinId(8), PinId(9));
        let plan = plan_output(
            &BridgeVariant::IntegratedLogic,
            &topology,
            &MotorState::new(),
            0,
        );
        assert_eq!(plan.len(), 4);
        assert!(plan.ops().iter().all(PinOp::is_de_energizing));
    }

    #[test]
    fn test_enabled_writes_enable_high_first() {
        let state = enabled(0, Direction::Forward, false);
        let plan = plan_output(&BridgeVariant::FullBridge, &osmc(), &state, 0);
        assert_eq!(plan.ops()[0], PinOp::Digital(PinId(2), Level::High));
        assert!(plan.len() > 1);
    }

    #[test]
    fn test_common_phase_does_not_sequence_legs_when_enabled() {
        let state = enabled(100, Direction::Forward, false);
        let mut plan = DrivePlan::new();
        let legs = plan_common(&osmc(), &state, &mut plan);

        assert!(legs.is_some());
        assert_eq!(plan.ops(), &[PinOp::Digital(PinId(2), Level::High)]);
    }

    #[test]
    fn test_variant_dispatch_differs() {
        let state = enabled(0, Direction::Forward, true);
        let full = plan_output(&BridgeVariant::FullBridge, &osmc(), &state, 0);
        let integrated = plan_output(&BridgeVariant::IntegratedLogic, &osmc(), &state, 0);
        assert!(full.ops().contains(&PinOp::DeadTime));
        assert!(!integrated.ops().contains(&PinOp::DeadTime));
    }

    #[test]
    fn test_plan_length_bounded() {
        let integrated = BridgeTopology::integrated(Some(PinId(2)), PinId(3), PinId(4), PinId(5));
        let mut longest = 0;
        for variant in [BridgeVariant::FullBridge, BridgeVariant::IntegratedLogic] {
            for topology in [osmc(), integrated] {
                for output_enabled in [false, true] {
                    for brake in [false, true] {
                        for direction in [Direction::Forward, Direction::Reverse] {
                            for duty in [0, 1, 255] {
                                let state = MotorState {
                                    requested_power: duty,
                                    direction,
                                    brake,
                                    output_enabled,
                                };
                                let plan = plan_output(&variant, &topology, &state, duty);
                                longest = longest.max(plan.len());
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(longest, 6);
    }

    #[test]
    fn test_de_energizing_ops() {
        assert!(PinOp::Digital(PinId(1), Level::Low).is_de_energizing());
        assert!(PinOp::Pwm(PinId(1), 0).is_de_energizing());
        assert!(!PinOp::Pwm(PinId(1), 1).is_de_energizing());
        assert!(!PinOp::Digital(PinId(1), Level::High).is_de_energizing());
        assert!(!PinOp::DeadTime.is_de_energizing());
    }
}
