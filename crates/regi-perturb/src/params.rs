use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::PerturbError;

/// Six pose parameters: three axis-angle rotation components in radians followed by three
/// translation components in length units (millimetres for the usual volumes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseParams(pub [f64; 6]);

impl PoseParams {
    /// No perturbation.
    pub const ZERO: Self = Self([0.0; 6]);

    /// Create the parameters from their rotation and translation parts.
    pub fn new(rotation: DVec3, translation: DVec3) -> Self {
        Self([
            rotation.x,
            rotation.y,
            rotation.z,
            translation.x,
            translation.y,
            translation.z,
        ])
    }

    /// The axis-angle rotation part.
    pub fn rotation(&self) -> DVec3 {
        DVec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// The translation part.
    pub fn translation(&self) -> DVec3 {
        DVec3::new(self.0[3], self.0[4], self.0[5])
    }

    /// The raw six values.
    pub fn as_array(&self) -> &[f64; 6] {
        &self.0
    }

    /// Whether every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }
}

/// Per-axis standard deviations of the sampling distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingStdDevs {
    /// Rotation standard deviations about X, Y and Z in degrees.
    pub rot_deg: [f64; 3],
    /// Translation standard deviations along X, Y and Z in length units.
    pub trans: [f64; 3],
}

impl Default for SamplingStdDevs {
    fn default() -> Self {
        Self {
            rot_deg: [1.0, 1.0, 1.0],
            trans: [1.0, 1.0, 5.0],
        }
    }
}

impl SamplingStdDevs {
    const NAMES: [&'static str; 6] = [
        "rotation X",
        "rotation Y",
        "rotation Z",
        "translation X",
        "translation Y",
        "translation Z",
    ];

    /// Check that every standard deviation is finite and non-negative.
    pub fn validate(&self) -> Result<(), PerturbError> {
        let values = self.rot_deg.iter().chain(self.trans.iter());
        for (&value, name) in values.zip(Self::NAMES) {
            if !value.is_finite() || value < 0.0 {
                return Err(PerturbError::InvalidStdDev { name, value });
            }
        }
        Ok(())
    }

    /// The six standard deviations with rotations converted to radians.
    pub fn to_radians_and_lengths(&self) -> [f64; 6] {
        [
            self.rot_deg[0].to_radians(),
            self.rot_deg[1].to_radians(),
            self.rot_deg[2].to_radians(),
            self.trans[0],
            self.trans[1],
            self.trans[2],
        ]
    }

    /// Multiply the translation standard deviations by `k`.
    pub fn with_scaled_translation(&self, k: f64) -> Self {
        Self {
            rot_deg: self.rot_deg,
            trans: self.trans.map(|t| t * k),
        }
    }
}
