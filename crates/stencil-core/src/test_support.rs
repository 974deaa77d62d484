//! Hand-written port doubles for unit tests.
//!
//! No mocking framework: a stub filesystem over in-memory maps, a renderer
//! that substitutes `{{ key }}` by store lookup, and a prompter that replays
//! queued answers.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::application::ports::{CommandRunner, DirEntry, Filesystem, PromptOption, Prompter, Renderer};
use crate::application::ApplicationError;
use crate::domain::paths;
use crate::error::StencilResult;

// ── filesystem ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct StubFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

/// In-memory filesystem stub.
pub struct StubFilesystem {
    inner: Mutex<StubFilesystemInner>,
}

impl StubFilesystem {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StubFilesystemInner::default()),
        }
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.inner.lock().unwrap().dirs.insert(path.into());
        self
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) {
        let path = path.into();
        let mut inner = self.inner.lock().unwrap();
        let mut ancestor = path.clone();
        while ancestor.pop() && !ancestor.as_os_str().is_empty() {
            inner.dirs.insert(ancestor.clone());
        }
        inner.files.insert(path, content.as_ref().to_vec());
    }

    pub fn file_string(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Filesystem for StubFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.lock().unwrap().dirs.contains(path)
    }

    fn read(&self, path: &Path) -> StencilResult<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|_| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not utf-8".into(),
            }
            .into()
        })
    }

    fn write(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        self.inner
            .lock()
            .unwrap()
            .files
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.dirs.insert(current.clone());
        }
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<DirEntry> = Vec::new();
        let mut seen = HashSet::new();
        let children = inner
            .files
            .keys()
            .map(|p| (p, false))
            .chain(inner.dirs.iter().map(|p| (p, true)));
        for (candidate, is_dir) in children {
            if candidate.parent() == Some(path) {
                if let Some(name) = candidate.file_name().and_then(|n| n.to_str()) {
                    if seen.insert(name.to_string()) {
                        names.push(DirEntry {
                            name: name.to_string(),
                            is_dir,
                        });
                    }
                }
            }
        }
        names.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(names)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────────

/// Substitutes `{{ dotted.path }}` placeholders by direct lookup. No filter
/// support; transform behavior is tested through the registry directly.
pub struct LookupRenderer;

impl Renderer for LookupRenderer {
    fn substitute(&self, text: &str, data: &Value) -> StencilResult<String> {
        let map = data.as_object().cloned().unwrap_or_default();
        let mut out = String::new();
        let mut rest = text;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let key = after[..end].trim();
            match paths::get(&map, key) {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => {}
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

// ── prompter ──────────────────────────────────────────────────────────────────

/// A queued answer for the [`QueuedPrompter`].
#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Bool(bool),
    Keys(Vec<String>),
}

/// Replays a fixed queue of answers and records every message asked.
pub struct QueuedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
}

impl QueuedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self, message: &str) -> StencilResult<Answer> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: format!("no scripted answer left for: {message}"),
            }
            .into()
        })
    }

    fn next_text(&self, message: &str) -> StencilResult<String> {
        match self.next(message)? {
            Answer::Text(s) => Ok(s),
            other => Err(ApplicationError::PromptFailed {
                reason: format!("expected text answer, got {other:?}"),
            }
            .into()),
        }
    }
}

impl Prompter for QueuedPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> StencilResult<String> {
        let answer = self.next_text(message)?;
        if answer.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
        Ok(answer)
    }

    fn multiline(&self, message: &str) -> StencilResult<String> {
        self.next_text(message)
    }

    fn password(&self, message: &str) -> StencilResult<String> {
        self.next_text(message)
    }

    fn confirm(&self, message: &str) -> StencilResult<bool> {
        match self.next(message)? {
            Answer::Bool(b) => Ok(b),
            other => Err(ApplicationError::PromptFailed {
                reason: format!("expected bool answer, got {other:?}"),
            }
            .into()),
        }
    }

    fn choice(&self, message: &str, _options: &[PromptOption]) -> StencilResult<String> {
        self.next_text(message)
    }

    fn select(&self, message: &str, _options: &[PromptOption]) -> StencilResult<String> {
        self.next_text(message)
    }

    fn multi_select(&self, message: &str, _options: &[PromptOption]) -> StencilResult<Vec<String>> {
        match self.next(message)? {
            Answer::Keys(keys) => Ok(keys),
            other => Err(ApplicationError::PromptFailed {
                reason: format!("expected key list, got {other:?}"),
            }
            .into()),
        }
    }
}

// ── command runner ────────────────────────────────────────────────────────────

/// Records commands instead of running them; configurable failures and
/// existing executables.
pub struct RecordingRunner {
    pub commands: Mutex<Vec<(String, PathBuf)>>,
    pub available: HashSet<String>,
    pub fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            available: HashSet::new(),
            fail_on: None,
        }
    }

    pub fn with_available(mut self, command: &str) -> Self {
        self.available.insert(command.to_string());
        self
    }

    pub fn ran(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|(cmd, _)| cmd.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, dir: &Path) -> StencilResult<()> {
        self.commands
            .lock()
            .unwrap()
            .push((command.to_string(), dir.to_path_buf()));
        if self.fail_on.as_deref() == Some(command) {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn exists(&self, command: &str) -> bool {
        self.available.contains(command)
    }
}
