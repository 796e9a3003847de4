use std::f64::consts::PI;
use std::ops::Mul;

use glam::{DMat3, DVec3};

use crate::LieError;

const SMALL_ANGLE_EPSILON: f64 = 1.0e-8;

/// Angles closer than this to pi take the symmetric-part branch of [`SO3::log`].
const NEAR_PI_EPSILON: f64 = 1.0e-6;

/// Tolerance used when validating rotation matrices coming from outside the crate.
pub const ORTHONORMAL_TOLERANCE: f64 = 1.0e-6;

/// A 3D rotation, stored as a 3x3 rotation matrix.
///
/// The matrix is kept as is (no quaternion round trip) so that composing externally
/// supplied poses reproduces them bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SO3 {
    mat: DMat3,
}

impl SO3 {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        mat: DMat3::IDENTITY,
    };

    /// Create a rotation from a matrix, checking that it belongs to SO(3).
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix has non-finite entries, is not orthonormal, or has a
    /// determinant other than +1, all within [`ORTHONORMAL_TOLERANCE`].
    pub fn from_matrix(mat: DMat3) -> Result<Self, LieError> {
        if !mat.is_finite() {
            return Err(LieError::NonFinite);
        }

        let rot = Self { mat };

        let ortho_err = rot.orthonormality_error();
        if ortho_err > ORTHONORMAL_TOLERANCE {
            return Err(LieError::NotOrthonormal(ortho_err));
        }

        let det = mat.determinant();
        if (det - 1.0).abs() > ORTHONORMAL_TOLERANCE {
            return Err(LieError::InvalidDeterminant(det));
        }

        Ok(rot)
    }

    /// Create a rotation from a matrix without validation.
    ///
    /// NOTE: the caller guarantees that the matrix is a rotation.
    #[inline]
    pub(crate) fn from_matrix_unchecked(mat: DMat3) -> Self {
        Self { mat }
    }

    /// The rotation matrix.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.mat
    }

    /// Lie algebra -> Lie group, using Rodrigues' rotation formula.
    ///
    /// `R = I + (sin(t) / t) * K + ((1 - cos(t)) / t^2) * K^2` with `K = hat(v)` and `t = |v|`.
    /// Below [`SMALL_ANGLE_EPSILON`] both coefficients are replaced by their Taylor series so
    /// the map stays smooth at zero; the zero vector maps exactly to the identity.
    pub fn exp(v: DVec3) -> Self {
        let theta_sq = v.length_squared();
        let theta = theta_sq.sqrt();

        let (a, b) = if theta < SMALL_ANGLE_EPSILON {
            // taylor expansion of sin(t)/t and (1 - cos(t))/t^2 around 0
            (1.0 - theta_sq / 6.0, 0.5 - theta_sq / 24.0)
        } else {
            (theta.sin() / theta, (1.0 - theta.cos()) / theta_sq)
        };

        let k = Self::hat(v);

        Self {
            mat: DMat3::IDENTITY + k * a + (k * k) * b,
        }
    }

    /// Lie group -> Lie algebra (axis-angle vector).
    pub fn log(&self) -> DVec3 {
        let angle = self.angle();
        let skew = (self.mat - self.mat.transpose()) * 0.5;

        if angle < SMALL_ANGLE_EPSILON {
            // first order: R ~ I + hat(v)
            return Self::vee(skew);
        }

        if PI - angle > NEAR_PI_EPSILON {
            return Self::vee(skew) * (angle / angle.sin());
        }

        // near pi the skew part vanishes; recover the axis from (R + I) / 2 ~ n * n^T
        let sym = (self.mat + DMat3::IDENTITY) * 0.5;
        let diag = DVec3::new(sym.x_axis.x, sym.y_axis.y, sym.z_axis.z);
        let k = if diag.x >= diag.y && diag.x >= diag.z {
            0
        } else if diag.y >= diag.z {
            1
        } else {
            2
        };
        let mut axis = sym.col(k).normalize();

        // keep the sign consistent with the (tiny) skew part when there is one
        if axis.dot(Self::vee(skew)) < 0.0 {
            axis = -axis;
        }

        axis * angle
    }

    /// Total rotation angle in radians, in `[0, pi]`.
    ///
    /// Computed as `acos((trace - 1) / 2)` with the argument clamped to `[-1, 1]`, so
    /// matrices that drift slightly past the valid range never produce NaN.
    pub fn angle(&self) -> f64 {
        let trace = self.mat.x_axis.x + self.mat.y_axis.y + self.mat.z_axis.z;
        ((trace - 1.0) * 0.5).clamp(-1.0, 1.0).acos()
    }

    /// Vector space -> Lie algebra (skew-symmetric matrix).
    pub fn hat(v: DVec3) -> DMat3 {
        // column major
        DMat3::from_cols_array(&[
            0.0, v.z, -v.y, //
            -v.z, 0.0, v.x, //
            v.y, -v.x, 0.0,
        ])
    }

    /// Lie algebra -> vector space.
    pub fn vee(omega: DMat3) -> DVec3 {
        DVec3::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
    }

    /// The inverse rotation (the transpose).
    pub fn inverse(&self) -> Self {
        Self {
            mat: self.mat.transpose(),
        }
    }

    /// Rotate a point.
    #[inline]
    pub fn transform(&self, p: DVec3) -> DVec3 {
        self.mat * p
    }

    /// Build a rotation from Euler angles (radians) as `R = Rx(x) * Ry(y) * Rz(z)`.
    ///
    /// Read right to left this rotates about the fixed Z axis first, then Y, then X; read left
    /// to right it is the intrinsic X-Y'-Z'' sequence.
    pub fn from_euler_xyz(angles: DVec3) -> Self {
        Self {
            mat: DMat3::from_rotation_x(angles.x)
                * DMat3::from_rotation_y(angles.y)
                * DMat3::from_rotation_z(angles.z),
        }
    }

    /// Decompose into Euler angles (radians) using the [`SO3::from_euler_xyz`] convention.
    ///
    /// The Y angle lies in `[-pi/2, pi/2]`. At gimbal lock (`|Y| = pi/2`) the Z angle is set to
    /// zero and the whole in-plane rotation is assigned to X.
    pub fn to_euler_xyz(&self) -> DVec3 {
        let r = |row: usize, col: usize| self.mat.col(col)[row];

        let sin_y = r(0, 2).clamp(-1.0, 1.0);
        let y = sin_y.asin();

        if sin_y.abs() < 1.0 - 1e-12 {
            let x = (-r(1, 2)).atan2(r(2, 2));
            let z = (-r(0, 1)).atan2(r(0, 0));
            DVec3::new(x, y, z)
        } else {
            let x = r(2, 1).atan2(r(1, 1));
            DVec3::new(x, y, 0.0)
        }
    }

    /// Largest absolute entry of `R * R^T - I`.
    pub fn orthonormality_error(&self) -> f64 {
        (self.mat * self.mat.transpose() - DMat3::IDENTITY)
            .to_cols_array()
            .iter()
            .fold(0.0, |acc, &x| acc.max(x.abs()))
    }
}

impl Default for SO3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for SO3 {
    type Output = SO3;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            mat: self.mat * rhs.mat,
        }
    }
}

impl Mul<DVec3> for SO3 {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.transform(rhs)
    }
}
