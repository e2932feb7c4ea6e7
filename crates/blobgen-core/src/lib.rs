//! # blobgen-core
//!
//! A library for embedding a directory of binary files into a generated
//! C++ header/source pair.
//!
//! Each file becomes a `static const unsigned char` array. The generated
//! namespace exposes index-based accessors (`getFile`, `getFileSize`,
//! `getFileName`), a `numFiles` constant and an `Items` enumeration that maps
//! every file to its index.
//!
//! ## Architecture
//!
//! - [`fs`]: Filesystem access capability
//! - [`filter`]: Hidden, source-control and empty file exclusion
//! - [`sanitize`]: Filename to identifier conversion
//! - [`encoder`]: Byte array literal encoding
//! - [`catalog`]: Ordered record of accepted files
//! - [`emitter`]: Declarations, aggregate tables and enumeration
//! - [`pipeline`]: Scan, filter, encode and emit in a single pass
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use blobgen_core::{Generator, GeneratorConfig};
//! use std::path::Path;
//!
//! let config = GeneratorConfig::new().extension("png").class_name("Icons");
//! let report = Generator::new(config).run(Path::new("assets"), Path::new("src"))?;
//! println!("Embedded {} files, {} bytes", report.files, report.total_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`FileSystem`]: Run the pipeline against something other than the local disk
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod catalog;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod fs;
pub mod pipeline;
pub mod sanitize;

// Re-export primary types for convenience
pub use catalog::{ResourceCatalog, ResourceRecord};
pub use emitter::RegistryEmitter;
pub use encoder::{ByteArrayEncoder, EncodedPayload, LineEnding};
pub use error::{Error, FailureKind, Result};
pub use fs::{FileHandle, FileSystem, LocalFileSystem};
pub use pipeline::{
    DuplicatePolicy, GeneratedSources, GenerationReport, Generator, GeneratorConfig,
    DEFAULT_CLASS_NAME, DEFAULT_EXTENSION,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of positional command-line parameters
pub const MAX_POSITIONAL_ARGS: usize = 4;
