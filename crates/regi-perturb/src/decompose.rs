use glam::DVec3;
use regi_lie::{se3::SE3, so3::SO3};
use serde::{Deserialize, Serialize};

/// Interpretable magnitudes of a raw rigid offset, about the camera's own axes.
///
/// Euler angles follow `R = Rx * Ry * Rz` (see [`SO3::from_euler_xyz`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OffsetSummary {
    /// Total rotation angle in degrees, in `[0, 180]`.
    pub rotation_angle_deg: f64,
    /// Norm of the translation.
    pub translation_norm: f64,
    /// Euler X, Y, Z angles in degrees.
    pub rotation_xyz_deg: [f64; 3],
    /// Translation along X, Y, Z.
    pub translation_xyz: [f64; 3],
}

impl OffsetSummary {
    /// Column names of [`OffsetSummary::to_row`].
    pub const COLUMNS: [&'static str; 8] = [
        "total rotation (deg)",
        "total trans. (mm)",
        "rotation X (deg)",
        "rotation Y (deg)",
        "rotation Z (deg)",
        "translation X (mm)",
        "translation Y (mm)",
        "translation Z (mm)",
    ];

    /// Summarize a raw offset (not the composed pose).
    pub fn from_offset(offset: &SE3) -> Self {
        let euler = offset.rotation().to_euler_xyz();
        let t = offset.translation();
        Self {
            rotation_angle_deg: offset.rotation_angle().to_degrees(),
            translation_norm: offset.translation_norm(),
            rotation_xyz_deg: [
                euler.x.to_degrees(),
                euler.y.to_degrees(),
                euler.z.to_degrees(),
            ],
            translation_xyz: t.to_array(),
        }
    }

    /// Rebuild the offset from the Euler angles and translation components.
    pub fn to_offset(&self) -> SE3 {
        let [x, y, z] = self.rotation_xyz_deg.map(f64::to_radians);
        SE3::new(
            SO3::from_euler_xyz(DVec3::new(x, y, z)),
            DVec3::from_array(self.translation_xyz),
        )
    }

    /// The eight values in [`OffsetSummary::COLUMNS`] order.
    pub fn to_row(&self) -> [f64; 8] {
        [
            self.rotation_angle_deg,
            self.translation_norm,
            self.rotation_xyz_deg[0],
            self.rotation_xyz_deg[1],
            self.rotation_xyz_deg[2],
            self.translation_xyz[0],
            self.translation_xyz[1],
            self.translation_xyz[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DMat4;
    use std::f64::consts::PI;

    fn max_abs_diff(a: DMat4, b: DMat4) -> f64 {
        (a - b)
            .to_cols_array()
            .iter()
            .fold(0.0, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_identity_summary() {
        let s = OffsetSummary::from_offset(&SE3::IDENTITY);
        assert_eq!(s.to_row(), [0.0; 8]);
    }

    #[test]
    fn test_single_axis_offset() {
        let offset = SE3::exp_decoupled(&[0.0, 2.0_f64.to_radians(), 0.0, 3.0, 0.0, 4.0]);
        let s = OffsetSummary::from_offset(&offset);
        assert_relative_eq!(s.rotation_angle_deg, 2.0, epsilon = 1e-9);
        assert_relative_eq!(s.translation_norm, 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.rotation_xyz_deg[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.rotation_xyz_deg[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(s.rotation_xyz_deg[2], 0.0, epsilon = 1e-9);
        assert_eq!(s.translation_xyz, [3.0, 0.0, 4.0]);
    }

    #[test]
    fn test_roundtrip_reconstructs_offset() {
        for tau in [
            [0.01, -0.02, 0.015, 1.0, -0.5, 4.0],
            [0.4, 0.3, -0.9, -10.0, 20.0, 0.0],
            [-1.5, 0.2, 1.1, 0.0, 0.0, -7.5],
            [0.0, 0.0, 3.0, 2.0, 2.0, 2.0],
        ] {
            let offset = SE3::exp_decoupled(&tau);
            let rebuilt = OffsetSummary::from_offset(&offset).to_offset();
            assert!(max_abs_diff(rebuilt.matrix(), offset.matrix()) < 1e-9, "{tau:?}");
        }
    }

    #[test]
    fn test_degenerate_angles_are_finite() {
        for tau in [
            [1e-12, 0.0, -1e-12, 0.0, 0.0, 0.0],
            [PI, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, PI / 2.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, -PI, 0.0, 1.0, 1.0, 1.0],
        ] {
            let s = OffsetSummary::from_offset(&SE3::exp_decoupled(&tau));
            assert!(s.to_row().iter().all(|v| v.is_finite()), "{tau:?}");
            assert!(s.rotation_angle_deg >= 0.0 && s.rotation_angle_deg <= 180.0);
        }
    }
}
