//! Timed pick-and-place sequence.
//!
//! Playback is split into fixed-width steps. During each step exactly one
//! joint is interpolated while the other two keep the value they reached in
//! an earlier step: first the arm unfolds into the old pose joint by joint,
//! then it moves joint by joint to the new pose, then it folds back home.
//!
//! [`AnimationTimeline::advance`] is a pure function of elapsed time. It
//! replays every completed step at full progress before applying the current
//! one, so the result never depends on how often it was sampled.

use crate::geometry::{Joint, JointAngles};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Width of one step in the reference animation.
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(1000);

/// Number of steps before the animation is finished.
pub const STEP_COUNT: u64 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationPhase {
    ReturnBaseToHome,
    ReturnLowerToHome,
    ReturnUpperToHome,
    MoveBaseToNew,
    MoveLowerToNew,
    MoveUpperToNew,
    ExtendBaseHome,
    ExtendLowerHome,
    ExtendUpperHome,
    Finished,
}

impl AnimationPhase {
    /// Every phase in playback order.
    pub const SEQUENCE: [AnimationPhase; 10] = [
        AnimationPhase::ReturnBaseToHome,
        AnimationPhase::ReturnLowerToHome,
        AnimationPhase::ReturnUpperToHome,
        AnimationPhase::MoveBaseToNew,
        AnimationPhase::MoveLowerToNew,
        AnimationPhase::MoveUpperToNew,
        AnimationPhase::ExtendBaseHome,
        AnimationPhase::ExtendLowerHome,
        AnimationPhase::ExtendUpperHome,
        AnimationPhase::Finished,
    ];

    /// Phase active during `step`. Every step past the table is `Finished`.
    pub fn from_step(step: u64) -> Self {
        match step {
            0 => AnimationPhase::ReturnBaseToHome,
            1 => AnimationPhase::ReturnLowerToHome,
            2 => AnimationPhase::ReturnUpperToHome,
            3 => AnimationPhase::MoveBaseToNew,
            4 => AnimationPhase::MoveLowerToNew,
            5 => AnimationPhase::MoveUpperToNew,
            6 => AnimationPhase::ExtendBaseHome,
            7 => AnimationPhase::ExtendLowerHome,
            8 => AnimationPhase::ExtendUpperHome,
            _ => AnimationPhase::Finished,
        }
    }

    /// First step index of this phase.
    pub fn step(self) -> u64 {
        self as u64
    }

    /// The joint interpolated during this phase.
    pub fn joint(self) -> Option<Joint> {
        match self {
            AnimationPhase::ReturnBaseToHome
            | AnimationPhase::MoveBaseToNew
            | AnimationPhase::ExtendBaseHome => Some(Joint::Base),
            AnimationPhase::ReturnLowerToHome
            | AnimationPhase::MoveLowerToNew
            | AnimationPhase::ExtendLowerHome => Some(Joint::LowerArm),
            AnimationPhase::ReturnUpperToHome
            | AnimationPhase::MoveUpperToNew
            | AnimationPhase::ExtendUpperHome => Some(Joint::UpperArm),
            AnimationPhase::Finished => None,
        }
    }

    pub fn carry(self) -> CarryPhase {
        CarryPhase::from_step(self.step())
    }

    pub fn is_finished(self) -> bool {
        self == AnimationPhase::Finished
    }

    fn apply(
        self,
        angles: &mut JointAngles,
        old: &JointAngles,
        new: &JointAngles,
        progress: f64,
    ) {
        match self {
            AnimationPhase::ReturnBaseToHome => angles.base = progress * old.base,
            AnimationPhase::ReturnLowerToHome => angles.lower_arm = progress * old.lower_arm,
            AnimationPhase::ReturnUpperToHome => angles.upper_arm = progress * old.upper_arm,
            AnimationPhase::MoveBaseToNew => {
                angles.base = old.base + progress * (new.base - old.base);
            }
            AnimationPhase::MoveLowerToNew => {
                angles.lower_arm = old.lower_arm + progress * (new.lower_arm - old.lower_arm);
            }
            AnimationPhase::MoveUpperToNew => {
                angles.upper_arm = old.upper_arm + progress * (new.upper_arm - old.upper_arm);
            }
            AnimationPhase::ExtendBaseHome => angles.base = (1.0 - progress) * new.base,
            AnimationPhase::ExtendLowerHome => {
                angles.base = 0.0;
                angles.lower_arm = (1.0 - progress) * new.lower_arm;
            }
            AnimationPhase::ExtendUpperHome => {
                angles.lower_arm = 0.0;
                angles.upper_arm = (1.0 - progress) * new.upper_arm;
            }
            AnimationPhase::Finished => *angles = JointAngles::HOME,
        }
    }
}

/// Where the carried object is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarryPhase {
    /// Resting at the old target.
    AtOld,
    /// Attached to the end of the upper link.
    InTransit,
    /// Resting at the new target.
    AtNew,
}

impl CarryPhase {
    pub fn from_step(step: u64) -> Self {
        match step {
            0..=2 => CarryPhase::AtOld,
            3..=5 => CarryPhase::InTransit,
            _ => CarryPhase::AtNew,
        }
    }
}

/// Joint-angle playback between two solved poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTimeline {
    old: JointAngles,
    new: JointAngles,
    step_millis: u64,
}

impl AnimationTimeline {
    pub fn new(old: JointAngles, new: JointAngles) -> Self {
        Self {
            old,
            new,
            step_millis: DEFAULT_STEP_DURATION.as_millis() as u64,
        }
    }

    /// Override the width of a step. Sub-millisecond widths round up to 1ms.
    pub fn with_step_duration(mut self, step: Duration) -> Self {
        self.step_millis = (step.as_millis() as u64).max(1);
        self
    }

    pub fn old_angles(&self) -> &JointAngles {
        &self.old
    }

    pub fn new_angles(&self) -> &JointAngles {
        &self.new
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_millis)
    }

    /// Elapsed time at which the animation reaches [`AnimationPhase::Finished`].
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.step_millis * STEP_COUNT)
    }

    pub fn phase_at(&self, elapsed_millis: u64) -> AnimationPhase {
        AnimationPhase::from_step(elapsed_millis / self.step_millis)
    }

    /// Fraction of the current step completed, in `(0, 1]`.
    pub fn progress_at(&self, elapsed_millis: u64) -> f64 {
        ((elapsed_millis % self.step_millis) + 1) as f64 / self.step_millis as f64
    }

    /// Live joint angles and the active phase after `elapsed_millis`.
    pub fn advance(&self, elapsed_millis: u64) -> (JointAngles, AnimationPhase) {
        let phase = self.phase_at(elapsed_millis);
        let progress = self.progress_at(elapsed_millis);

        let mut angles = JointAngles::HOME;
        for completed in AnimationPhase::SEQUENCE
            .iter()
            .take_while(|p| p.step() < phase.step())
        {
            completed.apply(&mut angles, &self.old, &self.new, 1.0);
        }
        phase.apply(&mut angles, &self.old, &self.new, progress);

        (angles, phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: JointAngles = JointAngles::new(30.0, -40.0, 50.0);
    const NEW: JointAngles = JointAngles::new(-20.0, 10.0, -60.0);

    fn timeline() -> AnimationTimeline {
        AnimationTimeline::new(OLD, NEW)
    }

    fn assert_angles(actual: JointAngles, expected: JointAngles) {
        for joint in Joint::ALL {
            assert!(
                (actual.get(joint) - expected.get(joint)).abs() < 1e-9,
                "{joint}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn progress_is_never_zero() {
        let t = timeline();
        assert_eq!(t.progress_at(0), 0.001);
        assert_eq!(t.progress_at(999), 1.0);
        assert_eq!(t.progress_at(1000), 0.001);
    }

    #[test]
    fn starts_near_home() {
        let (angles, phase) = timeline().advance(0);
        assert_eq!(phase, AnimationPhase::ReturnBaseToHome);
        assert!((angles.base - 0.001 * OLD.base).abs() < 1e-12);
        assert_eq!(angles.lower_arm, 0.0);
        assert_eq!(angles.upper_arm, 0.0);
    }

    #[test]
    fn first_steps_touch_one_joint_each() {
        let t = timeline();

        let (angles, _) = t.advance(999);
        assert_angles(angles, JointAngles::new(OLD.base, 0.0, 0.0));

        let (angles, phase) = t.advance(1499);
        assert_eq!(phase, AnimationPhase::ReturnLowerToHome);
        assert_angles(angles, JointAngles::new(OLD.base, 0.5 * OLD.lower_arm, 0.0));

        let (angles, phase) = t.advance(2249);
        assert_eq!(phase, AnimationPhase::ReturnUpperToHome);
        assert_angles(angles, JointAngles::new(OLD.base, OLD.lower_arm, 0.25 * OLD.upper_arm));

        let (angles, _) = t.advance(2999);
        assert_angles(angles, OLD);
    }

    #[test]
    fn moves_from_old_to_new() {
        let t = timeline();

        let (angles, phase) = t.advance(3499);
        assert_eq!(phase, AnimationPhase::MoveBaseToNew);
        assert_angles(angles, JointAngles::new(5.0, OLD.lower_arm, OLD.upper_arm));

        let (angles, phase) = t.advance(4499);
        assert_eq!(phase, AnimationPhase::MoveLowerToNew);
        assert_angles(angles, JointAngles::new(NEW.base, -15.0, OLD.upper_arm));

        let (angles, phase) = t.advance(5999);
        assert_eq!(phase, AnimationPhase::MoveUpperToNew);
        assert_angles(angles, NEW);
    }

    #[test]
    fn folds_back_home() {
        let t = timeline();

        let (angles, phase) = t.advance(6499);
        assert_eq!(phase, AnimationPhase::ExtendBaseHome);
        assert_angles(angles, JointAngles::new(0.5 * NEW.base, NEW.lower_arm, NEW.upper_arm));

        let (angles, phase) = t.advance(7000);
        assert_eq!(phase, AnimationPhase::ExtendLowerHome);
        assert_angles(angles, JointAngles::new(0.0, 0.999 * NEW.lower_arm, NEW.upper_arm));

        let (angles, phase) = t.advance(8499);
        assert_eq!(phase, AnimationPhase::ExtendUpperHome);
        assert_angles(angles, JointAngles::new(0.0, 0.0, 0.5 * NEW.upper_arm));
    }

    #[test]
    fn finished_stays_home() {
        let t = timeline();
        for elapsed in [9000, 9001, 15_000, u64::MAX] {
            let (angles, phase) = t.advance(elapsed);
            assert_eq!(phase, AnimationPhase::Finished);
            assert_eq!(angles, JointAngles::HOME);
            assert_eq!(phase.carry(), CarryPhase::AtNew);
        }
        assert_eq!(t.total_duration(), Duration::from_millis(9000));
    }

    #[test]
    fn advance_is_idempotent() {
        let t = timeline();
        for elapsed in (0..10_000).step_by(137) {
            assert_eq!(t.advance(elapsed), t.advance(elapsed));
        }
    }

    #[test]
    fn phases_never_regress() {
        let t = timeline();
        let mut last = AnimationPhase::ReturnBaseToHome;
        for elapsed in (0..12_000).step_by(50) {
            let phase = t.phase_at(elapsed);
            assert!(phase.step() >= last.step());
            last = phase;
        }
        assert!(last.is_finished());
    }

    #[test]
    fn custom_step_duration() {
        let t = timeline().with_step_duration(Duration::from_millis(250));
        assert_eq!(t.phase_at(249), AnimationPhase::ReturnBaseToHome);
        assert_eq!(t.phase_at(250), AnimationPhase::ReturnLowerToHome);
        assert_eq!(t.total_duration(), Duration::from_millis(2250));
        assert_eq!(t.advance(2250).0, JointAngles::HOME);

        let zero = timeline().with_step_duration(Duration::ZERO);
        assert_eq!(zero.step_duration(), Duration::from_millis(1));
    }

    #[test]
    fn carry_follows_step() {
        assert_eq!(CarryPhase::from_step(0), CarryPhase::AtOld);
        assert_eq!(CarryPhase::from_step(2), CarryPhase::AtOld);
        assert_eq!(CarryPhase::from_step(3), CarryPhase::InTransit);
        assert_eq!(CarryPhase::from_step(5), CarryPhase::InTransit);
        assert_eq!(CarryPhase::from_step(6), CarryPhase::AtNew);
        assert_eq!(CarryPhase::from_step(42), CarryPhase::AtNew);
    }

    #[test]
    fn phase_table() {
        let t = timeline();
        let table = (0..=10)
            .map(|step| {
                let phase = t.phase_at(step * 1000);
                let joint = phase
                    .joint()
                    .map(|joint| joint.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!("{step} {phase:?} {:?} {joint}", phase.carry())
            })
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(table, @r"
        0 ReturnBaseToHome AtOld base
        1 ReturnLowerToHome AtOld lower arm
        2 ReturnUpperToHome AtOld upper arm
        3 MoveBaseToNew InTransit base
        4 MoveLowerToNew InTransit lower arm
        5 MoveUpperToNew InTransit upper arm
        6 ExtendBaseHome AtNew base
        7 ExtendLowerHome AtNew lower arm
        8 ExtendUpperHome AtNew upper arm
        9 Finished AtNew -
        10 Finished AtNew -
        ");
    }
}
