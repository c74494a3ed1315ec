// Inverse kinematics: target point to joint angles

use crate::{
    geometry::{JointAngles, Point3},
    kinematics::{ArmGeometry, Result, SolveError, arccos_degrees, arctan_degrees},
};

impl ArmGeometry {
    /// Joint angles that place the end of the upper link on `point`.
    ///
    /// The base yaws the arm's vertical plane toward the target, then the
    /// two links are solved as a planar isosceles triangle. Targets with a
    /// negative x fold the arm to the other side of the plane.
    ///
    /// An x of exactly zero is rejected instead of clamped; see
    /// [`Point3::with_clamped_x`].
    pub fn solve(&self, point: Point3) -> Result<JointAngles> {
        if !point.is_finite() {
            return Err(SolveError::Degenerate {
                reason: "coordinate is not finite",
            });
        }
        if point.x == 0.0 {
            return Err(SolveError::Degenerate {
                reason: "x is zero, base angle is undefined",
            });
        }

        let base = -arctan_degrees(point.z / point.x);

        let horizontal = (point.x * point.x + point.z * point.z).sqrt();
        let vertical = point.y - self.base_height;
        let planar_sq = horizontal * horizontal + vertical * vertical;
        let distance = planar_sq.sqrt();

        let reach = self.reach();
        if !(0.0..=reach).contains(&distance) {
            return Err(SolveError::Unreachable { distance, reach });
        }
        if horizontal == 0.0 {
            return Err(SolveError::Degenerate {
                reason: "horizontal reach is zero, elevation is undefined",
            });
        }

        // Law of cosines with 2 * L1 * L2 for two equal links
        let two_l1_l2 = 2.0 * self.link_length * self.link_length;
        let cos_elbow = ((two_l1_l2 - planar_sq) / two_l1_l2).clamp(-1.0, 1.0);
        let elbow = arccos_degrees(cos_elbow);

        let mut upper = 180.0 - elbow;
        let mut lower = 90.0 - upper / 2.0 - arctan_degrees(vertical / horizontal);

        if point.x < 0.0 {
            upper = -upper;
            lower = -lower;
        }

        Ok(JointAngles {
            base,
            lower_arm: -lower,
            upper_arm: -upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_X_EPSILON;
    use crate::kinematics::solve;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn solves_point_at_shoulder_height() {
        let angles = solve(Point3::new(5.0, 2.0, 0.0)).unwrap();
        assert_close(angles.base, 0.0);
        assert_close(angles.upper_arm, -120.0);
        assert_close(angles.lower_arm, -30.0);
    }

    #[test]
    fn mirrors_for_negative_x() {
        let old = solve(Point3::new(5.0, 2.0, 0.0)).unwrap();
        let new = solve(Point3::new(-5.0, 2.0, 0.0)).unwrap();
        assert_close(new.base, 0.0);
        assert_close(new.lower_arm, -old.lower_arm);
        assert_close(new.upper_arm, -old.upper_arm);
        assert_close(new.upper_arm, 120.0);
    }

    #[test]
    fn full_extension_is_reachable() {
        let angles = solve(Point3::new(10.0, 2.0, 0.0)).unwrap();
        assert_close(angles.upper_arm, 0.0);
        assert_close(angles.lower_arm, -90.0);
    }

    #[test]
    fn straight_up_bends_symmetrically() {
        // Tip above the shoulder: the lower link leans out by half the elbow bend
        let angles = solve(Point3::new(DEFAULT_X_EPSILON, 11.5, 0.0)).unwrap();
        assert!(angles.upper_arm < 0.0);
        assert!((angles.lower_arm + angles.upper_arm / 2.0).abs() < 1e-3);
    }

    #[test]
    fn rejects_points_beyond_reach() {
        let err = solve(Point3::new(8.0, 10.0, 0.0)).unwrap_err();
        match err {
            SolveError::Unreachable { distance, reach } => {
                assert_close(distance, 8.0 * std::f64::consts::SQRT_2);
                assert_eq!(reach, 10.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_x() {
        assert!(matches!(
            solve(Point3::new(0.0, 2.0, 5.0)),
            Err(SolveError::Degenerate { .. })
        ));
    }

    #[test]
    fn rejects_collapsed_horizontal_reach() {
        // x * x underflows to zero
        assert!(matches!(
            solve(Point3::new(1e-200, 4.0, 0.0)),
            Err(SolveError::Degenerate { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_input() {
        assert!(matches!(
            solve(Point3::new(f64::NAN, 2.0, 0.0)),
            Err(SolveError::Degenerate { .. })
        ));
        assert!(matches!(
            solve(Point3::new(1.0, f64::INFINITY, 0.0)),
            Err(SolveError::Degenerate { .. })
        ));
    }

    #[test]
    fn clamped_zero_x_gives_finite_base() {
        let point = Point3::new(0.0, 2.0, 5.0).with_clamped_x(DEFAULT_X_EPSILON);
        let angles = solve(point).unwrap();
        assert!(angles.base.is_finite());
        assert!(angles.lower_arm.is_finite());
        assert!(angles.upper_arm.is_finite());
        assert!((angles.base + 90.0).abs() < 1e-3);
    }

    #[test]
    fn base_angle_follows_azimuth() {
        let angles = solve(Point3::new(3.0, 2.0, 3.0)).unwrap();
        assert_close(angles.base, -45.0);
        let angles = solve(Point3::new(3.0, 2.0, -3.0)).unwrap();
        assert_close(angles.base, 45.0);
    }

    #[test]
    fn scaled_geometry() {
        let arm = ArmGeometry::new(1.0, 2.0);
        let angles = arm.solve(Point3::new(2.0, 1.0, 0.0)).unwrap();
        assert_close(angles.upper_arm, -120.0);
        assert_close(angles.lower_arm, -30.0);
        assert!(arm.solve(Point3::new(4.5, 1.0, 0.0)).is_err());
    }

    fn scaled(value: i16, span: f64) -> f64 {
        value as f64 / i16::MAX as f64 * span
    }

    #[test]
    fn unreachable_beyond_reach() {
        bolero::check!()
            .with_type::<(i16, i16, i16)>()
            .for_each(|&(x, y, z)| {
                let point = Point3::new(scaled(x, 30.0), scaled(y, 30.0), scaled(z, 30.0));
                if point.x == 0.0 {
                    return;
                }
                let planar = (point.x * point.x + point.z * point.z
                    + (point.y - 2.0) * (point.y - 2.0))
                    .sqrt();
                if planar <= 10.0 + 1e-9 {
                    return;
                }
                assert!(matches!(
                    solve(point),
                    Err(SolveError::Unreachable { .. })
                ));
            });
    }

    #[test]
    fn mirrored_target_negates_links() {
        bolero::check!()
            .with_type::<(i16, i16, i16)>()
            .for_each(|&(x, y, z)| {
                let point = Point3::new(scaled(x, 7.0), scaled(y, 7.0) + 2.0, scaled(z, 7.0));
                if point.x == 0.0 {
                    return;
                }
                let mirrored = Point3::new(-point.x, point.y, -point.z);
                match (solve(point), solve(mirrored)) {
                    (Ok(a), Ok(b)) => {
                        assert_close(a.base, b.base);
                        assert_close(a.lower_arm, -b.lower_arm);
                        assert_close(a.upper_arm, -b.upper_arm);
                    }
                    (Err(a), Err(b)) => assert_eq!(a, b),
                    (a, b) => panic!("asymmetric result {a:?} / {b:?}"),
                }
            });
    }
}
