use std::convert::Infallible;

use regi_lie::se3::SE3;

use crate::{OffsetSummary, PoseParams};

/// Everything produced for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbationSample {
    /// Index of the sample in the batch, starting at 0.
    pub index: usize,
    /// The drawn (or forced zero) parameters.
    pub params: PoseParams,
    /// The raw offset built from `params`.
    pub offset: SE3,
    /// Decomposition of `offset`.
    pub summary: OffsetSummary,
    /// The final camera-extrinsics-to-volume pose.
    pub pose: SE3,
}

impl PerturbationSample {
    /// The composed pose flattened in row-major order.
    pub fn pose_row(&self) -> [f64; 16] {
        self.pose.to_row_major()
    }
}

/// A destination for the per-sample records.
///
/// Samples arrive in ascending index order starting at 0. `finish` is called once after the
/// last sample.
pub trait RecordSink {
    /// Error raised by the sink.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Accept one sample.
    fn write_sample(&mut self, sample: &PerturbationSample) -> Result<(), Self::Error>;

    /// Flush whatever the sink buffered.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    /// The collected samples.
    pub samples: Vec<PerturbationSample>,
}

impl RecordSink for VecSink {
    type Error = Infallible;

    fn write_sample(&mut self, sample: &PerturbationSample) -> Result<(), Self::Error> {
        self.samples.push(sample.clone());
        Ok(())
    }
}
