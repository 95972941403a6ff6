//! Source loading capability.
//!
//! The analyzer never touches the filesystem directly: it receives a [`SourceLoader`] and asks it for
//! whole file contents. Files are read in one go and the handle is released before lexing starts.
//!
//! ## Notes
//! - [`FsLoader`] decodes lossily: invalid UTF-8 turns into replacement characters (and then into
//!   `Unknown` tokens) instead of failing the file.
//! - [`MemoryLoader`] serves fixed contents, for tests and for embedding the analyzer.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::MAX_SOURCE_SIZE;

/// Capability to read source files.
pub trait SourceLoader: Send + Sync {
    /// Read the whole file at `path`.
    fn load(&self, path: &Path) -> io::Result<String>;

    /// Return `true` if `path` names a loadable file.
    fn exists(&self, path: &Path) -> bool;
}

/// Loader backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FsLoader {
    max_size: u64,
}

impl Default for FsLoader {
    fn default() -> Self {
        Self {
            max_size: MAX_SOURCE_SIZE,
        }
    }
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject files larger than `bytes`.
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        let metadata = fs::metadata(path)?;
        if metadata.len() > self.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file is too large ({} bytes, max {} bytes)", metadata.len(), self.max_size),
            ));
        }
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Loader serving in-memory contents keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Resolve an `` `include `` name.
///
/// Candidates, in order: the name itself if absolute, otherwise the including file's directory, then each
/// include directory in request order. The first candidate the loader can see wins.
pub fn resolve_include(
    loader: &dyn SourceLoader,
    name: &str,
    including_file: &Path,
    include_dirs: &[PathBuf],
) -> Option<PathBuf> {
    let name_path = Path::new(name);
    if name_path.is_absolute() {
        return loader.exists(name_path).then(|| name_path.to_path_buf());
    }

    let local = including_file.parent().map(|dir| dir.join(name_path));
    local
        .into_iter()
        .chain(include_dirs.iter().map(|dir| dir.join(name_path)))
        .find(|candidate| loader.exists(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_loader_round_trip() {
        let loader = MemoryLoader::new().with_file("rtl/a.sv", "module a; endmodule");
        assert!(loader.exists(Path::new("rtl/a.sv")));
        assert_eq!(loader.load(Path::new("rtl/a.sv")).unwrap(), "module a; endmodule");
        let err = loader.load(Path::new("rtl/b.sv")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_include_prefers_including_directory() {
        let loader = MemoryLoader::new()
            .with_file("rtl/defs.svh", "")
            .with_file("inc/defs.svh", "");
        let found = resolve_include(&loader, "defs.svh", Path::new("rtl/top.sv"), &[PathBuf::from("inc")]);
        assert_eq!(found, Some(PathBuf::from("rtl/defs.svh")));
    }

    #[test]
    fn test_include_dirs_are_searched_in_order() {
        let loader = MemoryLoader::new()
            .with_file("inc2/defs.svh", "")
            .with_file("inc3/defs.svh", "");
        let dirs = [PathBuf::from("inc1"), PathBuf::from("inc2"), PathBuf::from("inc3")];
        let found = resolve_include(&loader, "defs.svh", Path::new("rtl/top.sv"), &dirs);
        assert_eq!(found, Some(PathBuf::from("inc2/defs.svh")));
    }

    #[test]
    fn test_unresolvable_include() {
        let loader = MemoryLoader::new();
        assert_eq!(resolve_include(&loader, "nope.svh", Path::new("top.sv"), &[]), None);
    }
}
