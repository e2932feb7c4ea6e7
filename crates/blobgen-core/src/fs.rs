//! Filesystem access capability.
//!
//! The generator never touches the disk directly; everything goes through
//! [`FileSystem`], so the pipeline can be driven against a real directory
//! ([`LocalFileSystem`]) or any other backing store.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A file discovered by [`FileSystem::list_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Full path to the file
    pub path: PathBuf,
    /// File name including extension
    pub name: String,
    /// Length in bytes at scan time
    pub len: u64,
}

impl FileHandle {
    /// Creates a new file handle
    pub fn new(path: impl Into<PathBuf>, len: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, len }
    }

    /// File name with the last extension removed.
    ///
    /// `"My File.v2.png"` yields `"My File.v2"`; a name without a dot is
    /// returned unchanged.
    pub fn name_without_extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[..dot],
            None => &self.name,
        }
    }
}

/// Filesystem operations the generator depends on
pub trait FileSystem {
    /// Lists regular files directly inside `dir` whose name ends with
    /// `.<extension>`, in a stable order
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<FileHandle>>;

    /// Reads the complete contents of a file
    fn read_all(&self, file: &FileHandle) -> Result<Vec<u8>>;

    /// Returns true if `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates (or truncates) `path` for writing
    fn open_for_write(&self, path: &Path) -> Result<Box<dyn Write>>;

    /// Removes a file; missing files are ignored
    fn delete(&self, path: &Path);
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a new local filesystem handle
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<FileHandle>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::directory_read(dir, e))?;
            if entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !matches_extension(&name, extension) {
                trace!("Skipping {}: extension mismatch", name);
                continue;
            }

            // symlinks count when their target is a regular file
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) => {
                    trace!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            let len = metadata.len();
            files.push(FileHandle::new(entry.into_path(), len));
        }

        debug!("Found {} candidate(s) in {}", files.len(), dir.display());
        Ok(files)
    }

    fn read_all(&self, file: &FileHandle) -> Result<Vec<u8>> {
        fs::read(&file.path).map_err(|e| Error::file_read(&file.path, e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn open_for_write(&self, path: &Path) -> Result<Box<dyn Write>> {
        let file = fs::File::create(path).map_err(|e| Error::output_open(path, e))?;
        Ok(Box::new(std::io::BufWriter::new(file)))
    }

    fn delete(&self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => debug!("Deleted {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => debug!("Could not delete {}: {}", path.display(), e),
        }
    }
}

/// `*.ext` wildcard match, ASCII case-insensitive
pub(crate) fn matches_extension(name: &str, extension: &str) -> bool {
    let suffix_len = extension.len() + 1;
    if name.len() < suffix_len || !name.is_char_boundary(name.len() - suffix_len) {
        return false;
    }
    let suffix = &name[name.len() - suffix_len..];
    suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_matches_extension() {
        assert!(matches_extension("logo.png", "png"));
        assert!(matches_extension("LOGO.PNG", "png"));
        assert!(matches_extension(".png", "png"));
        assert!(!matches_extension("logopng", "png"));
        assert!(!matches_extension("logo.png.bak", "png"));
        assert!(!matches_extension("png", "png"));
        assert!(!matches_extension("ümlaut", "png"));
    }

    #[test]
    fn test_name_without_extension() {
        let handle = FileHandle::new("/a/My File.v2.png", 1);
        assert_eq!(handle.name_without_extension(), "My File.v2");
        assert_eq!(FileHandle::new("/a/plain", 1).name_without_extension(), "plain");
        assert_eq!(FileHandle::new("/a/.png", 1).name_without_extension(), "");
    }

    #[test]
    fn test_list_files_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), b"bb").unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        fs::write(dir.path().join("c.txt"), b"c").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.png"), b"d").unwrap();

        let files = LocalFileSystem::new().list_files(dir.path(), "png").unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(files[1].len, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_follows_file_symlinks() {
        use std::os::unix::fs::symlink;

        let store = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        fs::write(store.path().join("real.png"), b"12345").unwrap();
        fs::create_dir(store.path().join("folder.png")).unwrap();
        symlink(store.path().join("real.png"), dir.path().join("logo.png")).unwrap();
        symlink(store.path().join("folder.png"), dir.path().join("dir.png")).unwrap();
        symlink(store.path().join("gone.png"), dir.path().join("broken.png")).unwrap();

        let files = LocalFileSystem::new().list_files(dir.path(), "png").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "logo.png");
        assert_eq!(files[0].len, 5);
        assert_eq!(LocalFileSystem::new().read_all(&files[0]).unwrap(), b"12345");
    }

    #[test]
    fn test_delete_missing_is_silent() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFileSystem::new();
        let path = dir.path().join("missing.h");
        fs.delete(&path);
        assert!(!path.exists());
    }

    #[test]
    fn test_open_for_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.h");
        let err = LocalFileSystem::new().open_for_write(&path).err().unwrap();
        assert!(matches!(err, Error::OutputOpen { .. }));
    }
}
