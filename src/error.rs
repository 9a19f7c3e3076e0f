//! Error handling for the Treeforge application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for Treeforge operations.
///
/// This enum represents the errors that can abort a Treeforge run.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents failures to reconstruct a hierarchy from the input
    #[error("Parse error: {0}.")]
    ParseError(String),

    /// Represents an output directory that does not exist
    #[error("Output directory does not exist: {output_dir}.")]
    OutputDirectoryMissing { output_dir: String },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures arising while materializing a hierarchy on disk.
///
/// Every variant is recovered locally: it is converted into a single
/// journal entry and the walk continues with the next sibling. The
/// Display string of each variant is the journal message verbatim.
#[derive(Error, Debug)]
pub enum MaterializeFailure {
    /// A directory could not be created
    #[error("Error creating folder '{}': {source}", .path.display())]
    FolderCreation { path: PathBuf, source: io::Error },

    /// File creation was denied by OS permissions
    #[error("Permission denied while creating file: {}", .path.display())]
    FilePermission { path: PathBuf },

    /// File creation failed for any other OS-level reason
    #[error("OS error while creating file '{}': {source}", .path.display())]
    FileOs { path: PathBuf, source: io::Error },

    /// The input mapping itself could not be interpreted
    #[error("Failed to create project structure: {0}")]
    Structure(String),
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
