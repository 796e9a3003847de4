#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Given a ground-truth camera-to-volume pose, this crate draws random six dimensional
//! offsets, turns each into a rigid transform, re-centres it at the volume centroid as seen
//! from the camera, and reports both the perturbed poses and a decomposition of every
//! offset. The first sample of a batch is always the ground truth itself.

/// Camera model used to locate the anchor point.
pub mod camera;

/// Re-centring of offsets about an anchor point and composition with ground truth.
pub mod composer;

/// Scalar summaries of a rigid offset.
pub mod decompose;

mod error;
pub use error::PerturbError;

/// Batch driver tying sampling, composition and emission together.
pub mod generator;

/// Pose parameter vectors and sampling configuration.
pub mod params;

/// Random pose parameter samplers.
pub mod sampler;

/// Destinations for the per-sample records.
pub mod sink;

pub use camera::CameraModel;
pub use composer::FrameCenteredComposer;
pub use decompose::OffsetSummary;
pub use generator::{generate_perturbations, run_perturbations, PerturbConfig, PerturbationScene};
pub use params::{PoseParams, SamplingStdDevs};
pub use sampler::{make_rng, sample_pose_param_batch, IndependentNormalSampler, PoseParamSampler};
pub use sink::{PerturbationSample, RecordSink, VecSink};
