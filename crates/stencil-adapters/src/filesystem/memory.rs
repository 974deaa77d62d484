//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{
        ports::{DirEntry, Filesystem},
        ApplicationError,
    },
    error::StencilResult,
};

/// In-memory filesystem for testing. Cloning shares the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating all ancestor directories (testing helper).
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        let mut ancestor = path.clone();
        while ancestor.pop() && !ancestor.as_os_str().is_empty() {
            inner.directories.insert(ancestor.clone());
        }
        inner.files.insert(path, content.as_ref().to_vec());
    }

    /// Builder-style [`Self::add_file`].
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Read a file's content as a string (testing helper).
    pub fn file_string(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// List all file paths, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut paths: Vec<PathBuf> = inner.files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.read().unwrap().directories.contains(path)
    }

    fn read(&self, path: &Path) -> StencilResult<Vec<u8>> {
        let inner = self.inner.read().unwrap();
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|_| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File is not valid UTF-8".into(),
            }
            .into()
        })
    }

    fn write(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        let mut inner = self.inner.write().unwrap();

        // Parent must exist, as on a real filesystem.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let inner = self.inner.read().unwrap();
        if !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such directory".into(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let children = inner
            .files
            .keys()
            .map(|p| (p, false))
            .chain(inner.directories.iter().map(|p| (p, true)));
        for (candidate, is_dir) in children {
            if candidate.parent() == Some(path) {
                if let Some(name) = candidate.file_name().and_then(|n| n.to_str()) {
                    if seen.insert(name.to_string()) {
                        entries.push(DirEntry {
                            name: name.to_string(),
                            is_dir,
                        });
                    }
                }
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
