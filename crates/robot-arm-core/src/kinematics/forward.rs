// Forward kinematics: joint angles to end-effector position

use crate::{
    geometry::{JointAngles, Point3},
    kinematics::ArmGeometry,
};

impl ArmGeometry {
    /// Position of the end of the upper link for the given joint angles.
    ///
    /// Both links start pointing along +Y. The lower link rotates about +Z
    /// at the shoulder, the upper link rotates about +Z relative to the
    /// lower one, and the whole plane yaws about +Y by the base angle.
    pub fn forward(&self, angles: JointAngles) -> Point3 {
        let lower = angles.lower_arm.to_radians();
        let upper = (angles.lower_arm + angles.upper_arm).to_radians();

        let planar = -self.link_length * (lower.sin() + upper.sin());
        let height = self.base_height + self.link_length * (lower.cos() + upper.cos());

        let (sin_yaw, cos_yaw) = angles.base.to_radians().sin_cos();
        Point3::new(planar * cos_yaw, height, -planar * sin_yaw)
    }

    /// Position of the elbow joint for the given joint angles.
    pub fn elbow(&self, angles: JointAngles) -> Point3 {
        let lower = angles.lower_arm.to_radians();
        let planar = -self.link_length * lower.sin();
        let height = self.base_height + self.link_length * lower.cos();

        let (sin_yaw, cos_yaw) = angles.base.to_radians().sin_cos();
        Point3::new(planar * cos_yaw, height, -planar * sin_yaw)
    }
}
