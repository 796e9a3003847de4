use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use regi_perturb::{OffsetSummary, PerturbationSample, RecordSink};

use crate::error::IoError;

/// File name of the decomposed offset stream.
pub const OFFSETS_FILE_NAME: &str = "offset_amounts.csv";

/// File name of the raw pose parameter stream.
pub const PARAMS_FILE_NAME: &str = "se3_lie_params.csv";

/// File name of the composed pose stream.
pub const POSES_FILE_NAME: &str = "cam_extrins_to_vol_poses.csv";

const PARAMS_COLUMNS: [&str; 6] = [
    "se3-dim-1",
    "se3-dim-2",
    "se3-dim-3",
    "se3-dim-4",
    "se3-dim-5",
    "se3-dim-6",
];

const POSES_COLUMNS: [&str; 16] = [
    "row1_col1", "row1_col2", "row1_col3", "row1_col4", //
    "row2_col1", "row2_col2", "row2_col3", "row2_col4", //
    "row3_col1", "row3_col2", "row3_col3", "row3_col4", //
    "row4_col1", "row4_col2", "row4_col3", "row4_col4",
];

/// Create the output directory (and its parents) when it does not exist.
///
/// # Errors
///
/// Returns [`IoError::NotADirectory`] when the path exists and is not a directory.
pub fn prepare_output_dir(dir: impl AsRef<Path>) -> Result<(), IoError> {
    let dir = dir.as_ref();

    if dir.exists() {
        if !dir.is_dir() {
            return Err(IoError::NotADirectory(dir.to_path_buf()));
        }
        return Ok(());
    }

    log::info!("creating output directory: {}", dir.display());
    fs::create_dir_all(dir)?;

    Ok(())
}

/// Writes the three record streams as CSV, one row per sample.
///
/// - offsets: the eight [`OffsetSummary`] values
/// - params: the six drawn pose parameters
/// - poses: the composed 4x4 pose, row-major
///
/// Each stream starts with a header row. Values are written with the shortest
/// representation that parses back to the same `f64`.
pub struct CsvRecordSink<W: Write> {
    offsets: csv::Writer<W>,
    params: csv::Writer<W>,
    poses: csv::Writer<W>,
    num_rows: usize,
}

impl CsvRecordSink<File> {
    /// Create the three CSV files inside `dir`, replacing existing ones.
    ///
    /// The directory must exist, see [`prepare_output_dir`].
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, IoError> {
        let dir = dir.as_ref();
        log::info!("writing CSV records to: {}", dir.display());

        Self::from_writers(
            File::create(dir.join(OFFSETS_FILE_NAME))?,
            File::create(dir.join(PARAMS_FILE_NAME))?,
            File::create(dir.join(POSES_FILE_NAME))?,
        )
    }
}

impl<W: Write> CsvRecordSink<W> {
    /// Wrap three writers and emit the header rows.
    pub fn from_writers(offsets: W, params: W, poses: W) -> Result<Self, IoError> {
        let mut sink = Self {
            offsets: csv::Writer::from_writer(offsets),
            params: csv::Writer::from_writer(params),
            poses: csv::Writer::from_writer(poses),
            num_rows: 0,
        };

        sink.offsets.write_record(OffsetSummary::COLUMNS)?;
        sink.params.write_record(PARAMS_COLUMNS)?;
        sink.poses.write_record(POSES_COLUMNS)?;

        Ok(sink)
    }

    /// Number of data rows written to each stream so far.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Flush and return the underlying writers (offsets, params, poses).
    pub fn into_inner(self) -> Result<(W, W, W), IoError> {
        let into_inner =
            |wtr: csv::Writer<W>| wtr.into_inner().map_err(|e| IoError::FileError(e.into_error()));
        Ok((
            into_inner(self.offsets)?,
            into_inner(self.params)?,
            into_inner(self.poses)?,
        ))
    }
}

fn write_row<W: Write>(wtr: &mut csv::Writer<W>, row: &[f64]) -> Result<(), IoError> {
    wtr.write_record(row.iter().map(|v| v.to_string()))?;
    Ok(())
}

impl<W: Write> RecordSink for CsvRecordSink<W> {
    type Error = IoError;

    fn write_sample(&mut self, sample: &PerturbationSample) -> Result<(), Self::Error> {
        write_row(&mut self.offsets, &sample.summary.to_row())?;
        write_row(&mut self.params, sample.params.as_array())?;
        write_row(&mut self.poses, &sample.pose_row())?;
        self.num_rows += 1;

        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        log::info!("writing offset CSV file...");
        self.offsets.flush()?;
        log::info!("writing se(3) pose params CSV file...");
        self.params.flush()?;
        log::info!("writing cam extrins. to vol pose CSV file...");
        self.poses.flush()?;
        log::debug!("wrote {} rows per stream", self.num_rows);
        Ok(())
    }
}
