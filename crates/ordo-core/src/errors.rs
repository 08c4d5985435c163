use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all ordo operations.
#[derive(Debug, Error, Diagnostic)]
pub enum OrdoError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed priority snapshot file.
    #[error("Snapshot error: {message}")]
    #[diagnostic(help("Check the snapshot file for syntax errors or regenerate it"))]
    Snapshot { message: String },

    /// A priority store was asked about a unit it does not know.
    #[error("Unknown unit: {module_id}")]
    #[diagnostic(help("The unit may have been removed since it was enumerated"))]
    UnknownUnit { module_id: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type OrdoResult<T> = miette::Result<T>;
