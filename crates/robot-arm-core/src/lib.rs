//! Joint-space math for a three-joint robotic arm.
//!
//! The crate covers the inverse kinematics of a yawing two-link arm and the
//! timed pick-and-place sequence built on top of it. Rendering, windowing and
//! input handling live elsewhere; they only consume [`JointAngles`] and the
//! carried object's [`CarryPhase`].

pub mod control;
pub mod geometry;
pub mod kinematics;
pub mod timeline;

pub use control::{ArmController, ControlError, Direction, Frame, ManualControl, ViewMode};
pub use geometry::{Joint, JointAngles, Point3};
pub use kinematics::{ArmGeometry, SolveError, solve};
pub use timeline::{AnimationPhase, AnimationTimeline, CarryPhase};
