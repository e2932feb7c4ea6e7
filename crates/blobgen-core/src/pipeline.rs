//! Generation pipeline.
//!
//! A run is a single forward pass:
//!
//! 1. Validate the source and destination directories
//! 2. List `*.<extension>` files in the source directory (non-recursive)
//! 3. Drop hidden and empty files and sanitize the remaining names;
//!    identifier collisions are rejected here
//! 4. Delete the previous header/source pair
//! 5. Encode every selected file and append it to the catalog
//! 6. Emit the aggregate tables and write both files
//!
//! Nothing in the destination is touched before step 4. All per-run state
//! (catalog, array counter, output buffers) lives in a context created at
//! step 5 and dropped after step 6, so independent runs never share
//! anything.
//!
//! Destination files are deleted before the new content is written and
//! there is no temp-file-then-rename step: a failure after step 4 leaves the
//! pair missing or partial.

use crate::catalog::ResourceCatalog;
use crate::emitter::RegistryEmitter;
use crate::encoder::{ByteArrayEncoder, LineEnding};
use crate::error::{Error, Result};
use crate::filter::is_hidden;
use crate::fs::{FileHandle, FileSystem, LocalFileSystem};
use crate::sanitize::sanitize_identifier;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension used when none is configured
pub const DEFAULT_EXTENSION: &str = "png";

/// Namespace name used when none is configured
pub const DEFAULT_CLASS_NAME: &str = "BinaryData";

/// What to do when two files sanitize to the same identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Abort with [`Error::DuplicateIdentifier`]
    #[default]
    Reject,
    /// Emit both, producing duplicate symbols in the generated code
    Allow,
}

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Extension of the files to embed, without the dot
    pub extension: String,
    /// Namespace name, also the output file stem
    pub class_name: String,
    /// Line terminator of the generated files
    pub line_ending: LineEnding,
    /// Identifier collision handling
    pub duplicate_policy: DuplicatePolicy,
    /// Emit the bounds-checked `tryGetFile` accessor
    pub checked_accessors: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            line_ending: LineEnding::default(),
            duplicate_policy: DuplicatePolicy::default(),
            checked_accessors: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extension; `.` and `*` are stripped, empty keeps the default
    pub fn extension(mut self, ext: impl AsRef<str>) -> Self {
        let ext: String = ext
            .as_ref()
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '*')
            .collect();
        if !ext.is_empty() {
            self.extension = ext;
        }
        self
    }

    /// Sets the namespace name; empty keeps the default
    pub fn class_name(mut self, name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if !name.is_empty() {
            self.class_name = name.to_string();
        }
        self
    }

    /// Sets the line terminator
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets the identifier collision policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets whether to emit `tryGetFile`
    pub fn checked_accessors(mut self, enabled: bool) -> Self {
        self.checked_accessors = enabled;
        self
    }

    /// Header path inside `dest_dir`
    pub fn header_path(&self, dest_dir: &Path) -> PathBuf {
        dest_dir.join(format!("{}.h", self.class_name))
    }

    /// Source path inside `dest_dir`
    pub fn source_path(&self, dest_dir: &Path) -> PathBuf {
        dest_dir.join(format!("{}.cpp", self.class_name))
    }
}

/// Generated header and source text with the catalog they were built from
#[derive(Debug, Clone)]
pub struct GeneratedSources {
    /// Contents of `<class>.h`
    pub header: String,
    /// Contents of `<class>.cpp`
    pub source: String,
    /// Accepted files in emission order
    pub catalog: ResourceCatalog,
    /// Candidates dropped by the hidden-file filter
    pub skipped: usize,
}

impl GeneratedSources {
    /// blake3 fingerprint over header and source, as lowercase hex
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.header.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.source.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Written (or, for a dry run, would-be) header path
    pub header_path: PathBuf,
    /// Written (or, for a dry run, would-be) source path
    pub source_path: PathBuf,
    /// Number of embedded files
    pub files: usize,
    /// Candidates dropped by the hidden-file filter
    pub skipped: usize,
    /// Sum of embedded file sizes
    pub total_size: u64,
    /// See [`GeneratedSources::digest`]
    pub digest: String,
}

/// A candidate that passed the filter
struct Accepted<'a> {
    file: &'a FileHandle,
    identifier: String,
}

/// Outcome of filtering and naming the candidates
struct Selection<'a> {
    accepted: Vec<Accepted<'a>>,
    skipped: usize,
}

/// Per-run state: the catalog, the array counter and both output buffers
struct GenerationContext {
    emitter: RegistryEmitter,
    encoder: ByteArrayEncoder,
    catalog: ResourceCatalog,
    header: String,
    source: String,
    skipped: usize,
}

impl GenerationContext {
    fn new(config: &GeneratorConfig) -> Result<Self> {
        let emitter = RegistryEmitter::new(&config.class_name, config.line_ending)
            .checked_accessors(config.checked_accessors);
        let mut header = String::new();
        let mut source = String::new();
        emitter.header_preamble(&mut header)?;
        emitter.source_preamble(&mut source)?;

        Ok(Self {
            emitter,
            encoder: ByteArrayEncoder::new(config.line_ending),
            catalog: ResourceCatalog::new(),
            header,
            source,
            skipped: 0,
        })
    }

    fn add(&mut self, file: &FileHandle, identifier: String, data: &[u8]) -> Result<()> {
        info!("Adding {}: {} bytes", identifier, data.len());

        let payload = self.encoder.encode(data);
        let record = self.catalog.push(identifier, data.len(), &file.path);
        self.emitter.declare(&mut self.header, record)?;
        self.emitter.define(&mut self.source, record, &payload)?;
        Ok(())
    }

    fn finish(mut self) -> Result<GeneratedSources> {
        self.emitter.finish_header(&mut self.header, &self.catalog)?;
        self.emitter.finish_source(&mut self.source, &self.catalog)?;

        Ok(GeneratedSources {
            header: self.header,
            source: self.source,
            catalog: self.catalog,
            skipped: self.skipped,
        })
    }
}

/// Drives a generation run over a [`FileSystem`]
#[derive(Debug, Clone)]
pub struct Generator<F: FileSystem = LocalFileSystem> {
    config: GeneratorConfig,
    fs: F,
}

impl Generator<LocalFileSystem> {
    /// Creates a generator over the local filesystem
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_fs(config, LocalFileSystem::new())
    }
}

impl<F: FileSystem> Generator<F> {
    /// Creates a generator over a custom filesystem
    pub fn with_fs(config: GeneratorConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// Returns the configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the pair and writes it into `dest_dir`
    pub fn run(&self, source_dir: &Path, dest_dir: &Path) -> Result<GenerationReport> {
        self.check_dir(source_dir, |p| Error::missing_source_directory(p))?;
        self.check_dir(dest_dir, |p| Error::missing_destination_directory(p))?;

        let header_path = self.config.header_path(dest_dir);
        let source_path = self.config.source_path(dest_dir);

        let candidates = self.scan(source_dir)?;
        let selection = self.select(source_dir, &candidates)?;

        self.fs.delete(&header_path);
        self.fs.delete(&source_path);

        let generated = self.build(source_dir, selection)?;

        self.write(&header_path, &generated.header)?;
        self.write(&source_path, &generated.source)?;

        Ok(Self::report(header_path, source_path, &generated))
    }

    /// Generates the pair without touching `dest_dir`
    pub fn dry_run(&self, source_dir: &Path, dest_dir: &Path) -> Result<GenerationReport> {
        let generated = self.render(source_dir)?;
        Ok(Self::report(
            self.config.header_path(dest_dir),
            self.config.source_path(dest_dir),
            &generated,
        ))
    }

    /// Generates header and source text in memory
    pub fn render(&self, source_dir: &Path) -> Result<GeneratedSources> {
        self.check_dir(source_dir, |p| Error::missing_source_directory(p))?;
        let candidates = self.scan(source_dir)?;
        let selection = self.select(source_dir, &candidates)?;
        self.build(source_dir, selection)
    }

    fn check_dir(&self, dir: &Path, missing: impl FnOnce(&Path) -> Error) -> Result<()> {
        if self.fs.is_dir(dir) {
            Ok(())
        } else {
            Err(missing(dir))
        }
    }

    /// Lists candidates; an empty listing aborts before anything is touched
    fn scan(&self, source_dir: &Path) -> Result<Vec<FileHandle>> {
        let candidates = self.fs.list_files(source_dir, &self.config.extension)?;
        if candidates.is_empty() {
            return Err(Error::no_matching_files(source_dir, &self.config.extension));
        }
        Ok(candidates)
    }

    /// Filters candidates and assigns identifiers without reading contents
    fn select<'a>(
        &self,
        source_dir: &Path,
        candidates: &'a [FileHandle],
    ) -> Result<Selection<'a>> {
        let mut accepted = Vec::with_capacity(candidates.len());
        let mut claimed: HashMap<String, &'a Path> = HashMap::new();
        let mut skipped = 0;

        for file in candidates {
            if is_hidden(file, source_dir) {
                debug!("Skipping hidden or empty file: {}", file.path.display());
                skipped += 1;
                continue;
            }

            let identifier = sanitize_identifier(file.name_without_extension());
            match claimed.entry(identifier.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(file.path.as_path());
                }
                Entry::Occupied(first) => match self.config.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::duplicate_identifier(
                            identifier,
                            *first.get(),
                            &file.path,
                        ));
                    }
                    DuplicatePolicy::Allow => {
                        warn!(
                            "Identifier '{}' from {} duplicates {}",
                            identifier,
                            file.path.display(),
                            first.get().display()
                        );
                    }
                },
            }

            accepted.push(Accepted { file, identifier });
        }

        Ok(Selection { accepted, skipped })
    }

    fn build(&self, source_dir: &Path, selection: Selection<'_>) -> Result<GeneratedSources> {
        let mut ctx = GenerationContext::new(&self.config)?;
        ctx.skipped = selection.skipped;

        for Accepted { file, identifier } in selection.accepted {
            let data = self.fs.read_all(file)?;
            ctx.add(file, identifier, &data)?;
        }

        if ctx.catalog.is_empty() {
            return Err(Error::no_matching_files(source_dir, &self.config.extension));
        }

        ctx.finish()
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut out = self.fs.open_for_write(path)?;
        out.write_all(contents.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| Error::file_write(path, e))
    }

    fn report(
        header_path: PathBuf,
        source_path: PathBuf,
        generated: &GeneratedSources,
    ) -> GenerationReport {
        GenerationReport {
            header_path,
            source_path,
            files: generated.catalog.len(),
            skipped: generated.skipped,
            total_size: generated.catalog.total_size(),
            digest: generated.digest(),
        }
    }
}
