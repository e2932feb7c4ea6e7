//! Error types for the blobgen-core library.
//!
//! Every variant is terminal for a generation run: there is no partial
//! success and no resume. [`Error::kind`] exposes the tagged failure reason
//! so callers can map outcomes (for example to a process exit code) without
//! matching on message text.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for blobgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all blobgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// More positional parameters were supplied than recognized
    #[error("too many arguments: got {given}, expected at most {max}")]
    InvalidArgumentCount {
        /// Number of positional parameters supplied
        given: usize,
        /// Maximum number accepted
        max: usize,
    },

    /// Source directory does not exist
    #[error("source directory doesn't exist: {path}")]
    MissingSourceDirectory {
        /// The missing directory
        path: PathBuf,
    },

    /// Destination directory does not exist
    #[error("destination directory doesn't exist: {path}")]
    MissingDestinationDirectory {
        /// The missing directory
        path: PathBuf,
    },

    /// The scan produced nothing to embed
    #[error("didn't find any source files matching '*.{extension}' in: {path}")]
    NoMatchingFiles {
        /// Scanned directory
        path: PathBuf,
        /// Extension that was searched for
        extension: String,
    },

    /// A destination stream could not be created
    #[error("couldn't open '{path}' for writing: {source}")]
    OutputOpen {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an accepted source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to list the source directory
    #[error("failed to list directory '{path}': {source}")]
    DirectoryRead {
        /// Directory being listed
        path: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// Two files sanitize to the same identifier
    #[error("identifier '{identifier}' is produced by both '{first}' and '{second}'")]
    DuplicateIdentifier {
        /// The colliding identifier
        identifier: String,
        /// File that claimed the identifier first
        first: PathBuf,
        /// File that collided with it
        second: PathBuf,
    },

    /// Formatting generated text failed
    #[error("failed to format generated source: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Tagged failure reason, independent of the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Too many positional parameters
    InvalidArgumentCount,
    /// Source directory missing
    MissingSourceDirectory,
    /// Destination directory missing
    MissingDestinationDirectory,
    /// Nothing to embed
    NoMatchingFiles,
    /// A destination stream could not be opened
    OutputOpenFailure,
    /// A destination stream failed mid-write
    OutputWriteFailure,
    /// A source file or directory could not be read
    UnreadableSourceFile,
    /// Identifier collision
    DuplicateIdentifier,
    /// Text generation failed
    Internal,
}

impl Error {
    /// Creates a new argument count error
    pub fn invalid_argument_count(given: usize, max: usize) -> Self {
        Self::InvalidArgumentCount { given, max }
    }

    /// Creates a new missing source directory error
    pub fn missing_source_directory(path: impl Into<PathBuf>) -> Self {
        Self::MissingSourceDirectory { path: path.into() }
    }

    /// Creates a new missing destination directory error
    pub fn missing_destination_directory(path: impl Into<PathBuf>) -> Self {
        Self::MissingDestinationDirectory { path: path.into() }
    }

    /// Creates a new empty scan error
    pub fn no_matching_files(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::NoMatchingFiles {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Creates a new output open error
    pub fn output_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputOpen {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory listing error
    pub fn directory_read(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new duplicate identifier error
    pub fn duplicate_identifier(
        identifier: impl Into<String>,
        first: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
    ) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Returns the tagged failure reason
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidArgumentCount { .. } => FailureKind::InvalidArgumentCount,
            Self::MissingSourceDirectory { .. } => FailureKind::MissingSourceDirectory,
            Self::MissingDestinationDirectory { .. } => FailureKind::MissingDestinationDirectory,
            Self::NoMatchingFiles { .. } => FailureKind::NoMatchingFiles,
            Self::OutputOpen { .. } => FailureKind::OutputOpenFailure,
            Self::FileWrite { .. } => FailureKind::OutputWriteFailure,
            Self::FileRead { .. } | Self::DirectoryRead { .. } => {
                FailureKind::UnreadableSourceFile
            }
            Self::DuplicateIdentifier { .. } => FailureKind::DuplicateIdentifier,
            Self::Format(_) => FailureKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_source_directory("/no/such/dir");
        assert!(err.to_string().contains("source directory"));
        assert!(err.to_string().contains("/no/such/dir"));

        let err = Error::no_matching_files("/assets", "png");
        assert!(err.to_string().contains("*.png"));
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::invalid_argument_count(5, 4).kind(),
            FailureKind::InvalidArgumentCount
        );
        assert_eq!(
            Error::duplicate_identifier("a_b", "a b.png", "a.b.png").kind(),
            FailureKind::DuplicateIdentifier
        );
        assert_eq!(
            Error::file_read("x", std::io::Error::other("boom")).kind(),
            FailureKind::UnreadableSourceFile
        );
    }
}
