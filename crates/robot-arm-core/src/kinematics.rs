// Kinematics of the yawing two-link arm

use crate::geometry::{JointAngles, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod forward;
pub mod inverse;

/// Height of the base pedestal in the reference geometry.
pub const DEFAULT_BASE_HEIGHT: f64 = 2.0;
/// Length of each of the two arm links in the reference geometry.
pub const DEFAULT_LINK_LENGTH: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("not reachable: target is {distance:.3} from the shoulder, reach is {reach:.3}")]
    Unreachable { distance: f64, reach: f64 },

    #[error("degenerate target: {reason}")]
    Degenerate { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, SolveError>;

/// Dimensions of the arm.
///
/// The lower and upper links share one length, so the elbow triangle is
/// always isosceles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmGeometry {
    /// Height of the shoulder pivot above the ground plane.
    #[serde(default = "default_base_height")]
    pub base_height: f64,

    /// Length of the lower and of the upper link.
    #[serde(default = "default_link_length")]
    pub link_length: f64,
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            base_height: DEFAULT_BASE_HEIGHT,
            link_length: DEFAULT_LINK_LENGTH,
        }
    }
}

fn default_base_height() -> f64 {
    DEFAULT_BASE_HEIGHT
}

fn default_link_length() -> f64 {
    DEFAULT_LINK_LENGTH
}

impl ArmGeometry {
    pub fn new(base_height: f64, link_length: f64) -> Self {
        Self {
            base_height,
            link_length,
        }
    }

    /// Maximum planar distance from the shoulder pivot.
    pub fn reach(&self) -> f64 {
        2.0 * self.link_length
    }

    /// The shoulder pivot in world space.
    pub fn shoulder(&self) -> Point3 {
        Point3::new(0.0, self.base_height, 0.0)
    }
}

/// Solve against the reference geometry.
pub fn solve(point: Point3) -> Result<JointAngles> {
    ArmGeometry::default().solve(point)
}

pub(crate) fn arctan_degrees(value: f64) -> f64 {
    value.atan().to_degrees()
}

pub(crate) fn arccos_degrees(value: f64) -> f64 {
    value.acos().to_degrees()
}
