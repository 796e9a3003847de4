use glam::{DMat3, DVec2, DVec3};
use regi_lie::se3::SE3;

use crate::PerturbError;

/// A pinhole projection camera: intrinsics, extrinsics and detector geometry.
///
/// The extrinsic transform maps points from the world (extrinsic) frame into the camera's
/// projective frame. Its inverse is derived once at construction.
#[derive(Debug, Clone)]
pub struct CameraModel {
    intrinsic: DMat3,
    extrinsic: SE3,
    extrinsic_inv: SE3,
    /// Number of detector rows.
    pub num_rows: usize,
    /// Number of detector columns.
    pub num_cols: usize,
    /// Physical spacing between detector rows.
    pub pixel_row_spacing: f64,
    /// Physical spacing between detector columns.
    pub pixel_col_spacing: f64,
}

impl CameraModel {
    /// Create a camera model.
    ///
    /// # Errors
    ///
    /// Returns [`PerturbError::InvalidCamera`] when the intrinsic matrix is not finite or
    /// singular, when the detector has no pixels, or when a spacing is not positive.
    pub fn new(
        intrinsic: DMat3,
        extrinsic: SE3,
        num_rows: usize,
        num_cols: usize,
        pixel_row_spacing: f64,
        pixel_col_spacing: f64,
    ) -> Result<Self, PerturbError> {
        if !intrinsic.is_finite() || intrinsic.determinant().abs() < f64::EPSILON {
            return Err(PerturbError::InvalidCamera(
                "intrinsic matrix must be finite and invertible".to_string(),
            ));
        }

        if num_rows == 0 || num_cols == 0 {
            return Err(PerturbError::InvalidCamera(format!(
                "detector must have at least one pixel, got {}x{}",
                num_rows, num_cols
            )));
        }

        let spacing_ok = |s: f64| s.is_finite() && s > 0.0;
        if !spacing_ok(pixel_row_spacing) || !spacing_ok(pixel_col_spacing) {
            return Err(PerturbError::InvalidCamera(format!(
                "pixel spacings must be positive, got ({}, {})",
                pixel_row_spacing, pixel_col_spacing
            )));
        }

        Ok(Self {
            intrinsic,
            extrinsic,
            extrinsic_inv: extrinsic.inverse(),
            num_rows,
            num_cols,
            pixel_row_spacing,
            pixel_col_spacing,
        })
    }

    /// The 3x3 intrinsic projection matrix.
    pub fn intrinsic(&self) -> DMat3 {
        self.intrinsic
    }

    /// World (extrinsic) frame to camera projective frame.
    pub fn extrinsic(&self) -> SE3 {
        self.extrinsic
    }

    /// Camera projective frame to world (extrinsic) frame.
    pub fn extrinsic_inv(&self) -> SE3 {
        self.extrinsic_inv
    }

    /// Project a point given in the world frame to continuous pixel coordinates `(col, row)`.
    ///
    /// Returns `None` for points on the camera's focal plane.
    pub fn project_point(&self, p_world: DVec3) -> Option<DVec2> {
        let p_cam = self.extrinsic.transform_point(p_world);
        let h = self.intrinsic * p_cam;
        if h.z.abs() < f64::EPSILON {
            return None;
        }
        Some(DVec2::new(h.x / h.z, h.y / h.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intrinsic() -> DMat3 {
        // column major
        DMat3::from_cols_array(&[
            1000.0, 0.0, 0.0, //
            0.0, 1000.0, 0.0, //
            256.0, 256.0, 1.0,
        ])
    }

    #[test]
    fn test_extrinsic_inverse() -> Result<(), PerturbError> {
        let extrinsic = SE3::exp_decoupled(&[0.1, 0.2, 0.3, 10.0, 20.0, 30.0]);
        let cam = CameraModel::new(intrinsic(), extrinsic, 512, 512, 0.3, 0.3)?;
        let p = DVec3::new(1.0, -2.0, 3.0);
        let back = cam
            .extrinsic_inv()
            .transform_point(cam.extrinsic().transform_point(p));
        assert!((back - p).length() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_project_principal_point() -> Result<(), PerturbError> {
        let cam = CameraModel::new(intrinsic(), SE3::IDENTITY, 512, 512, 0.3, 0.3)?;
        let uv = cam.project_point(DVec3::new(0.0, 0.0, 800.0));
        assert_eq!(uv, Some(DVec2::new(256.0, 256.0)));

        let uv = cam.project_point(DVec3::new(8.0, -4.0, 1000.0));
        assert_eq!(uv, Some(DVec2::new(264.0, 252.0)));

        assert_eq!(cam.project_point(DVec3::new(1.0, 1.0, 0.0)), None);
        Ok(())
    }

    #[test]
    fn test_invalid_camera() {
        let singular = DMat3::ZERO;
        assert!(matches!(
            CameraModel::new(singular, SE3::IDENTITY, 512, 512, 0.3, 0.3),
            Err(PerturbError::InvalidCamera(_))
        ));
        assert!(matches!(
            CameraModel::new(intrinsic(), SE3::IDENTITY, 0, 512, 0.3, 0.3),
            Err(PerturbError::InvalidCamera(_))
        ));
        assert!(matches!(
            CameraModel::new(intrinsic(), SE3::IDENTITY, 512, 512, 0.3, -1.0),
            Err(PerturbError::InvalidCamera(_))
        ));
    }
}
