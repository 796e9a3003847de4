#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access, parsing and malformed scene content.
pub mod error;

/// CSV output of the three per-sample record streams.
///
/// See [`records::CsvRecordSink`] for the file names and column layouts.
pub mod records;

/// JSON scene description: camera model, ground-truth pose and anchor point.
pub mod scene;

pub use error::IoError;
pub use records::{prepare_output_dir, CsvRecordSink};
pub use scene::{parse_scene_json, read_scene_json, SceneDesc};
