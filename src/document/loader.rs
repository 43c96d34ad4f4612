//! Source loading
//!
//! The pipeline never touches the filesystem directly; it reads included
//! files through a [`SourceLoader`], so tests can supply an in-memory tree
//! of files.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Reads task files by path
pub trait SourceLoader {
    /// Returns the full text of the file at `path`
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Returns the identity used to detect include cycles
    fn identity(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}

/// Reads from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn identity(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
    }
}

/// Serves files from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, builder style
    pub fn with(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), text.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
        })
    }
}

/// Lexically resolves `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// A document handed to the pipeline
#[derive(Debug, Clone)]
pub struct Source {
    pub text: String,
    /// File the text came from; None for standard input
    pub path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl Source {
    /// A document read from standard input
    pub fn from_stdin(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            base_dir: None,
        }
    }

    /// A document read from `path`
    pub fn from_file(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: Some(path.into()),
            base_dir: None,
        }
    }

    /// Overrides the directory includes are resolved against
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Name used in diagnostics
    pub fn origin(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }

    /// Directory of the root file, or the working directory for stdin
    pub fn base_dir(&self) -> PathBuf {
        if let Some(dir) = &self.base_dir {
            return dir.clone();
        }
        match self.path.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
