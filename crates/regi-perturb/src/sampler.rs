use std::f64::consts::PI;

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::{PerturbError, PoseParams, SamplingStdDevs};

/// A strategy for drawing pose parameters.
///
/// Implementations draw from the generator they are given and hold no generator of their
/// own, so a whole run stays reproducible from a single seed.
pub trait PoseParamSampler {
    /// Draw `num_samples` parameter vectors, in order.
    fn sample_pose_params(&self, num_samples: usize, rng: &mut dyn RngCore) -> Vec<PoseParams>;
}

/// Zero-mean normal distribution with independent dimensions.
#[derive(Debug, Clone)]
pub struct IndependentNormalSampler {
    std_devs: [f64; 6],
}

impl IndependentNormalSampler {
    /// Create the sampler from per-axis standard deviations (rotations in degrees).
    pub fn new(std_devs: &SamplingStdDevs) -> Result<Self, PerturbError> {
        std_devs.validate()?;
        Ok(Self {
            std_devs: std_devs.to_radians_and_lengths(),
        })
    }

    /// Standard deviations in radians (rotation) and length units (translation).
    pub fn std_devs(&self) -> &[f64; 6] {
        &self.std_devs
    }
}

impl PoseParamSampler for IndependentNormalSampler {
    fn sample_pose_params(&self, num_samples: usize, rng: &mut dyn RngCore) -> Vec<PoseParams> {
        let mut params = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let mut sample = [0.0; 6];
            for (value, sigma) in sample.iter_mut().zip(self.std_devs) {
                *value = sigma * standard_normal(rng);
            }
            params.push(PoseParams(sample));
        }
        params
    }
}

/// Draw from N(0, 1) with the Box-Muller transform.
fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    // u1 in (0, 1] keeps the logarithm finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draw a full batch of pose parameters.
///
/// The first vector is always [`PoseParams::ZERO`] (the ground truth); the remaining
/// `num_samples - 1` come from `sampler` in order.
///
/// # Errors
///
/// Returns [`PerturbError::InvalidSampleCount`] when `num_samples` is zero, before anything is
/// drawn from `rng`.
pub fn sample_pose_param_batch(
    sampler: &dyn PoseParamSampler,
    num_samples: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<PoseParams>, PerturbError> {
    if num_samples < 1 {
        return Err(PerturbError::InvalidSampleCount(num_samples));
    }

    let mut params = Vec::with_capacity(num_samples);
    params.push(PoseParams::ZERO);

    log::info!("sampling remaining {} pose parameters...", num_samples - 1);
    params.extend(sampler.sample_pose_params(num_samples - 1, rng));

    Ok(params)
}

/// Create the generator for a run, from `seed` when given and from OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::info!("using specified seed for RNG: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            log::info!("seeding RNG engine from OS entropy...");
            StdRng::from_os_rng()
        }
    }
}
