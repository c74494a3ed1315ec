// Joint-angle sources for the renderer: timed playback or manual nudges

use crate::{
    geometry::{Joint, JointAngles, Point3, wrap_degrees},
    kinematics::{ArmGeometry, SolveError},
    timeline::{AnimationPhase, AnimationTimeline, CarryPhase},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Degrees added or removed by one manual nudge.
pub const DEFAULT_NUDGE_DEGREES: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("manual control is locked while the animation is running ({phase:?})")]
    AnimationRunning { phase: AnimationPhase },
}

/// Camera placement requested from the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Side,
    Top,
}

impl ViewMode {
    /// Parse the `-sv` / `-tv` command-line flag (exact match).
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-sv" => Some(ViewMode::Side),
            "-tv" => Some(ViewMode::Top),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Side => ViewMode::Top,
            ViewMode::Top => ViewMode::Side,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Joint-by-joint manual adjustment.
///
/// One joint is selected at a time; each nudge rotates it by a fixed amount
/// and keeps the result in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManualControl {
    selected: Joint,
    angles: JointAngles,
    step_degrees: f64,
}

impl Default for ManualControl {
    fn default() -> Self {
        Self::new(DEFAULT_NUDGE_DEGREES)
    }
}

impl ManualControl {
    pub fn new(step_degrees: f64) -> Self {
        Self {
            selected: Joint::Base,
            angles: JointAngles::HOME,
            step_degrees,
        }
    }

    pub fn selected(&self) -> Joint {
        self.selected
    }

    pub fn select(&mut self, joint: Joint) {
        self.selected = joint;
    }

    pub fn angles(&self) -> &JointAngles {
        &self.angles
    }

    pub fn nudge(&mut self, direction: Direction) -> JointAngles {
        let delta = match direction {
            Direction::Increase => self.step_degrees,
            Direction::Decrease => -self.step_degrees,
        };
        let current = self.angles.get(self.selected);
        self.angles.set(self.selected, wrap_degrees(current + delta));
        self.angles
    }
}

/// Solved pick-and-place run.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PickAndPlace {
    old: Point3,
    new: Point3,
    timeline: AnimationTimeline,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub elapsed_millis: u64,
    pub angles: JointAngles,
    pub view: ViewMode,
    /// Active phase, if a pick-and-place run is configured.
    pub phase: Option<AnimationPhase>,
    pub carry: Option<CarryPhase>,
    /// Where the carried object is drawn.
    pub object: Option<Point3>,
}

/// Chooses between timeline playback and manual control.
///
/// Manual nudges are only accepted when no pick-and-place run is configured
/// or once it reached [`AnimationPhase::Finished`]. After that the manual
/// angles, which start at the home pose, drive the arm.
#[derive(Clone, Debug)]
pub struct ArmController {
    geometry: ArmGeometry,
    animation: Option<PickAndPlace>,
    manual: ManualControl,
    view: ViewMode,
    phase: Option<AnimationPhase>,
}

impl ArmController {
    pub fn new(geometry: ArmGeometry) -> Self {
        Self {
            geometry,
            animation: None,
            manual: ManualControl::default(),
            view: ViewMode::default(),
            phase: None,
        }
    }

    pub fn with_manual_control(mut self, manual: ManualControl) -> Self {
        self.manual = manual;
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Solve both targets and schedule the pick-and-place run.
    ///
    /// Points are solved as given; clamp a zero x with
    /// [`Point3::with_clamped_x`] first. Fails before any state changes if
    /// either target cannot be solved.
    pub fn with_pick_and_place(
        mut self,
        old: Point3,
        new: Point3,
        step: Duration,
    ) -> Result<Self, SolveError> {
        let old_angles = self.geometry.solve(old)?;
        let new_angles = self.geometry.solve(new)?;
        let timeline = AnimationTimeline::new(old_angles, new_angles).with_step_duration(step);
        self.animation = Some(PickAndPlace { old, new, timeline });
        self.phase = None;
        Ok(self)
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn timeline(&self) -> Option<&AnimationTimeline> {
        self.animation.as_ref().map(|a| &a.timeline)
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggle();
        self.view
    }

    pub fn manual(&self) -> &ManualControl {
        &self.manual
    }

    /// Whether a pick-and-place run still owns the joints.
    pub fn is_animating(&self) -> bool {
        match (&self.animation, self.phase) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(phase)) => !phase.is_finished(),
        }
    }

    pub fn select(&mut self, joint: Joint) {
        self.manual.select(joint);
    }

    pub fn nudge(&mut self, direction: Direction) -> Result<JointAngles, ControlError> {
        if self.is_animating() {
            return Err(ControlError::AnimationRunning {
                phase: self.phase.unwrap_or(AnimationPhase::ReturnBaseToHome),
            });
        }
        Ok(self.manual.nudge(direction))
    }

    /// Produce the frame for `elapsed_millis` since the run started.
    pub fn tick(&mut self, elapsed_millis: u64) -> Frame {
        let Some(animation) = self.animation else {
            return Frame {
                elapsed_millis,
                angles: *self.manual.angles(),
                view: self.view,
                phase: None,
                carry: None,
                object: None,
            };
        };

        let (timeline_angles, phase) = animation.timeline.advance(elapsed_millis);
        self.phase = Some(phase);

        let angles = if phase.is_finished() {
            *self.manual.angles()
        } else {
            timeline_angles
        };

        let carry = phase.carry();
        let object = match carry {
            CarryPhase::AtOld => animation.old,
            CarryPhase::InTransit => self.geometry.forward(angles),
            CarryPhase::AtNew => animation.new,
        };

        Frame {
            elapsed_millis,
            angles,
            view: self.view,
            phase: Some(phase),
            carry: Some(carry),
            object: Some(object),
        }
    }
}
