//! The file scaffolder: recursive template copy with substitution.
//!
//! Copies a template subtree (or a single file) from a source root into a
//! target root, substituting placeholders, honoring an exclusion list and
//! an overwrite flag. Exclusions are source-root-relative paths compared by
//! exact match — that is how a template's own configuration file stays out
//! of generated projects.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::application::ports::{Filesystem, Renderer};
use crate::application::ApplicationError;
use crate::error::StencilResult;

/// Copies template files, replacing placeholders as needed.
pub struct Scaffolder<'a> {
    fs: &'a dyn Filesystem,
    renderer: &'a dyn Renderer,
    source_root: PathBuf,
    target_root: PathBuf,
    exclusions: Vec<String>,
    overwrite: bool,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        renderer: &'a dyn Renderer,
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            renderer,
            source_root: source_root.into(),
            target_root: target_root.into(),
            exclusions: Vec::new(),
            overwrite: false,
        }
    }

    /// Set source-root-relative paths to be excluded.
    pub fn exclude(mut self, exclusions: Vec<String>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set whether existing target files are overwritten.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Copy a directory subtree. The tree rooted at `from` lands under
    /// `to`: `src/file.txt` copied with `to = "dest"` becomes
    /// `dest/file.txt`.
    #[instrument(skip_all, fields(from = %from.display(), to = %to.display()))]
    pub fn copy_dir(&self, from: &Path, to: &Path, data: &Value) -> StencilResult<()> {
        let source = self.source_root.join(from);
        for entry in self.fs.list_dir(&source)? {
            let rel = join_relative(from, &entry.name);
            if self.is_excluded(&rel) {
                debug!(path = %rel.display(), "excluded, skipping");
                continue;
            }
            let target = to.join(&entry.name);
            if entry.is_dir {
                self.copy_dir(&rel, &target, data)?;
            } else {
                self.copy_file(&rel, &target, data)?;
            }
        }
        Ok(())
    }

    /// Copy a single file, substituting placeholders when the content
    /// carries the `{{` marker. An existing target without the overwrite
    /// flag is skipped and reported, not an error.
    pub fn copy_file(&self, from: &Path, to: &Path, data: &Value) -> StencilResult<()> {
        let target = self.target_root.join(to);
        if self.fs.exists(&target) && !self.overwrite {
            info!(path = %to.display(), "File exists, skipping");
            return Ok(());
        }

        let source = self.source_root.join(from);
        if !self.fs.exists(&source) {
            return Err(ApplicationError::SourceMissing { path: source }.into());
        }

        let raw = self.fs.read(&source)?;
        // Substitute only UTF-8 content that actually contains the marker;
        // binary and non-templated files pass through untouched.
        let content = match std::str::from_utf8(&raw) {
            Ok(text) if text.contains("{{") => self.renderer.substitute(text, data)?.into_bytes(),
            _ => raw,
        };

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }
        self.fs.write(&target, &content)?;
        info!(path = %to.display(), "Created");
        Ok(())
    }

    fn is_excluded(&self, rel: &Path) -> bool {
        let rel = slash_path(rel);
        self.exclusions
            .iter()
            .any(|e| e.trim_start_matches("./") == rel)
    }
}

/// Join a child name onto a source-root-relative path, treating `""` and
/// `"."` as the root itself.
fn join_relative(base: &Path, name: &str) -> PathBuf {
    if base.as_os_str().is_empty() || base == Path::new(".") {
        PathBuf::from(name)
    } else {
        base.join(name)
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ── tests ─────────────────────────────────────────────────────────────────────
