use std::ops::Mul;

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::so3::{SO3, ORTHONORMAL_TOLERANCE};
use crate::LieError;

/// A rigid transformation in 3D: `p' = R * p + t`.
///
/// Equivalent to the 4x4 homogeneous matrix `[[R, t], [0, 0, 0, 1]]`. Composition with `*`
/// follows matrix multiplication order, so `(a * b).transform_point(p)` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SE3 {
    rotation: SO3,
    translation: DVec3,
}

impl SE3 {
    /// The identity transformation.
    pub const IDENTITY: Self = Self {
        rotation: SO3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Create a rigid transformation from its rotation and translation.
    pub fn new(rotation: SO3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create a pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: SO3::IDENTITY,
            translation,
        }
    }

    /// Map six tangent coordinates `[wx, wy, wz, tx, ty, tz]` to a rigid transformation.
    ///
    /// This is the exponential of SO(3) x R^3, not of SE(3): the rotation is `SO3::exp(w)` and
    /// the translation is `t` unchanged, with no left Jacobian coupling the two. A zero
    /// vector maps exactly to [`SE3::IDENTITY`].
    pub fn exp_decoupled(tau: &[f64; 6]) -> Self {
        Self {
            rotation: SO3::exp(DVec3::new(tau[0], tau[1], tau[2])),
            translation: DVec3::new(tau[3], tau[4], tau[5]),
        }
    }

    /// Create a rigid transformation from a homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix has non-finite entries, if its bottom row is not
    /// `(0, 0, 0, 1)`, or if its upper-left block is not a rotation.
    pub fn from_matrix(mat: &DMat4) -> Result<Self, LieError> {
        if !mat.is_finite() {
            return Err(LieError::NonFinite);
        }

        let bottom = mat.row(3);
        if !bottom.abs_diff_eq(DVec4::W, ORTHONORMAL_TOLERANCE) {
            return Err(LieError::InvalidBottomRow(bottom.to_array()));
        }

        let rotation = SO3::from_matrix(DMat3::from_mat4(*mat))?;

        Ok(Self {
            rotation,
            translation: mat.w_axis.truncate(),
        })
    }

    /// Create a rigid transformation from a row-major 4x4 array, see [`SE3::from_matrix`].
    pub fn from_rows(rows: &[[f64; 4]; 4]) -> Result<Self, LieError> {
        // rows read as columns give the transpose
        Self::from_matrix(&DMat4::from_cols_array_2d(rows).transpose())
    }

    /// The rotation part.
    #[inline]
    pub fn rotation(&self) -> SO3 {
        self.rotation
    }

    /// The translation part.
    #[inline]
    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// The homogeneous 4x4 matrix.
    pub fn matrix(&self) -> DMat4 {
        let r = self.rotation.matrix();
        DMat4::from_cols(
            r.x_axis.extend(0.0),
            r.y_axis.extend(0.0),
            r.z_axis.extend(0.0),
            self.translation.extend(1.0),
        )
    }

    /// The 16 entries of the homogeneous matrix in row-major order.
    pub fn to_row_major(&self) -> [f64; 16] {
        self.matrix().transpose().to_cols_array()
    }

    /// The inverse transformation: `R^T` and `-R^T * t`.
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.inverse();
        Self {
            rotation: inv_rot,
            translation: -inv_rot.transform(self.translation),
        }
    }

    /// Apply the transformation to a point.
    #[inline]
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.rotation.transform(p) + self.translation
    }

    /// Total rotation angle in radians, see [`SO3::angle`].
    pub fn rotation_angle(&self) -> f64 {
        self.rotation.angle()
    }

    /// Euclidean norm of the translation.
    pub fn translation_norm(&self) -> f64 {
        self.translation.length()
    }
}

impl Default for SE3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for SE3 {
    type Output = SE3;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            rotation: self.rotation * rhs.rotation,
            translation: self.translation + self.rotation.transform(rhs.translation),
        }
    }
}

impl Mul<DVec3> for SE3 {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.transform_point(rhs)
    }
}
