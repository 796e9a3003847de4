use regi_lie::LieError;
use regi_perturb::PerturbError;

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error to open, create or write a file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The output path exists and is not a directory.
    #[error("Output path exists, but is not a directory: {0}")]
    NotADirectory(std::path::PathBuf),

    /// Error to parse the JSON scene.
    #[error("Failed to parse the scene. {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error to write a CSV record.
    #[error("Failed to write CSV record. {0}")]
    CsvError(#[from] csv::Error),

    /// A matrix of the scene is not a rigid transformation.
    #[error("Invalid {name} transform. {source}")]
    InvalidTransform {
        /// Which matrix of the scene is malformed.
        name: &'static str,
        /// Why it was rejected.
        source: LieError,
    },

    /// The scene is malformed in another way.
    #[error("Invalid scene. {0}")]
    InvalidScene(String),

    /// Error raised while building the core objects.
    #[error(transparent)]
    PerturbError(#[from] PerturbError),
}
