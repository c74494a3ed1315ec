// Points and joint-space values shared by the solver and the timeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substitute used for an x coordinate of exactly zero before solving.
pub const DEFAULT_X_EPSILON: f64 = 0.00001;

/// A point in world space. +Y is up, the base pivots about the Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Replace an x of exactly zero with `epsilon`.
    ///
    /// The base angle is derived from `z / x`, so callers clamp their input
    /// before handing it to the solver.
    pub fn with_clamped_x(self, epsilon: f64) -> Self {
        if self.x == 0.0 {
            Self { x: epsilon, ..self }
        } else {
            self
        }
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}, {:.2}]", self.x, self.y, self.z)
    }
}

/// The three rotational joints, ordered from the pedestal outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Joint {
    Base,
    LowerArm,
    UpperArm,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Base, Joint::LowerArm, Joint::UpperArm];

    /// Parse a joint name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "base" => Some(Joint::Base),
            "lower" | "lower-arm" | "lower_arm" => Some(Joint::LowerArm),
            "upper" | "upper-arm" | "upper_arm" => Some(Joint::UpperArm),
            _ => None,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Joint::Base => "base",
            Joint::LowerArm => "lower arm",
            Joint::UpperArm => "upper arm",
        };
        f.write_str(name)
    }
}

/// Joint rotations in degrees.
///
/// Values produced by the solver or the timeline are not wrapped; only
/// manual adjustment keeps them in `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub base: f64,
    pub lower_arm: f64,
    pub upper_arm: f64,
}

impl JointAngles {
    /// The all-zero home pose.
    pub const HOME: JointAngles = JointAngles {
        base: 0.0,
        lower_arm: 0.0,
        upper_arm: 0.0,
    };

    pub const fn new(base: f64, lower_arm: f64, upper_arm: f64) -> Self {
        Self {
            base,
            lower_arm,
            upper_arm,
        }
    }

    pub fn get(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Base => self.base,
            Joint::LowerArm => self.lower_arm,
            Joint::UpperArm => self.upper_arm,
        }
    }

    pub fn set(&mut self, joint: Joint, degrees: f64) {
        match joint {
            Joint::Base => self.base = degrees,
            Joint::LowerArm => self.lower_arm = degrees,
            Joint::UpperArm => self.upper_arm = degrees,
        }
    }

    /// Every component mapped into `[0, 360)`.
    pub fn wrapped(&self) -> Self {
        Self {
            base: wrap_degrees(self.base),
            lower_arm: wrap_degrees(self.lower_arm),
            upper_arm: wrap_degrees(self.upper_arm),
        }
    }
}

impl fmt::Display for JointAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "base={:7.2}° lower={:7.2}° upper={:7.2}°",
            self.base, self.lower_arm, self.upper_arm
        )
    }
}

pub(crate) fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
