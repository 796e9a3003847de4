use glam::DVec3;
use rand::RngCore;
use regi_lie::se3::SE3;
use serde::{Deserialize, Serialize};

use crate::{
    make_rng, sample_pose_param_batch, CameraModel, FrameCenteredComposer,
    IndependentNormalSampler, OffsetSummary, PerturbError, PerturbationSample, PoseParamSampler,
    RecordSink, SamplingStdDevs,
};

/// The fixed inputs of a run.
#[derive(Debug, Clone)]
pub struct PerturbationScene {
    /// Ground-truth pose from the camera extrinsic frame to the volume.
    pub gt_cam_extrins_to_vol: SE3,
    /// The camera model.
    pub camera: CameraModel,
    /// The point perturbations rotate about, in volume coordinates.
    pub anchor_wrt_vol: DVec3,
}

/// Parameters of a perturbation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbConfig {
    /// Number of samples to emit, including the ground truth sample.
    pub num_samples: usize,
    /// Standard deviations of the independent normal sampler.
    #[serde(default)]
    pub std_devs: SamplingStdDevs,
    /// Fixed seed for reproducible runs; OS entropy is used when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl PerturbConfig {
    /// Create a configuration with the default standard deviations and no seed.
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            std_devs: SamplingStdDevs::default(),
            rng_seed: None,
        }
    }

    /// Check the sample count and the standard deviations.
    pub fn validate(&self) -> Result<(), PerturbError> {
        if self.num_samples < 1 {
            return Err(PerturbError::InvalidSampleCount(self.num_samples));
        }
        self.std_devs.validate()
    }
}

/// Generate `num_samples` perturbed poses and hand them to `sink` in index order.
///
/// The whole parameter batch is drawn from `rng` before any sample is processed, so the
/// output only depends on the generator state and the scene.
///
/// # Returns
///
/// The number of samples written.
pub fn generate_perturbations<K: RecordSink + ?Sized>(
    scene: &PerturbationScene,
    num_samples: usize,
    sampler: &dyn PoseParamSampler,
    rng: &mut dyn RngCore,
    sink: &mut K,
) -> Result<usize, PerturbError> {
    let params = sample_pose_param_batch(sampler, num_samples, rng)?;

    log::info!(
        "ground truth cam extrins to vol:\n{:?}",
        scene.gt_cam_extrins_to_vol.matrix()
    );

    let composer = FrameCenteredComposer::new(
        &scene.gt_cam_extrins_to_vol,
        &scene.camera,
        scene.anchor_wrt_vol,
    );
    log::info!(
        "center of rot wrt cam proj frame: {:?}",
        composer.anchor_wrt_cam()
    );

    log::info!("converting parameters to 4x4 rigid transformation matrices...");
    for (index, params) in params.into_iter().enumerate() {
        log::debug!("processing sample index: {}", index);

        let offset = SE3::exp_decoupled(params.as_array());
        let summary = OffsetSummary::from_offset(&offset);
        let pose = composer.compose(&offset);

        let sample = PerturbationSample {
            index,
            params,
            offset,
            summary,
            pose,
        };
        sink.write_sample(&sample).map_err(|e| PerturbError::Sink(Box::new(e)))?;
    }

    sink.finish().map_err(|e| PerturbError::Sink(Box::new(e)))?;

    Ok(num_samples)
}

/// Validate `config`, build the independent normal sampler and the generator, and run
/// [`generate_perturbations`].
pub fn run_perturbations<K: RecordSink + ?Sized>(
    scene: &PerturbationScene,
    config: &PerturbConfig,
    sink: &mut K,
) -> Result<usize, PerturbError> {
    config.validate()?;

    log::info!("creating indep. normal dist. pose sampler...");
    let sampler = IndependentNormalSampler::new(&config.std_devs)?;
    let mut rng = make_rng(config.rng_seed);

    generate_perturbations(scene, config.num_samples, &sampler, &mut rng, sink)
}
