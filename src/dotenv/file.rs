use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::dotenv::line::{Line, Quote};
use crate::dotenv::lines::{Dictionary, LineCollection};
use crate::dotenv::Result;
use crate::error::{DotenvError, Unreadable};

/// A `.env` file on disk and, once loaded, its lines in memory.
///
/// Reads and mutations only touch the in-memory lines. Nothing is written
/// until `save()`, so several changes can share one write.
///
/// Existence and permission checks hit the filesystem on every call. The
/// answer can go stale between a check and the following read or write.
#[derive(Debug)]
pub struct EnvFile {
    path: PathBuf,
    lines: Option<LineCollection>,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: None,
        }
    }

    /// The file at `path`, which must exist and be readable.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let env = Self::new(path);
        env.check_readable()?;
        Ok(env)
    }

    /// The file at `path`, which must exist and be readable and writable.
    pub fn writable(path: impl Into<PathBuf>) -> Result<Self> {
        let env = Self::at(path)?;
        if !env.is_writable() {
            return Err(DotenvError::FileNotWritable(env.path));
        }
        Ok(env)
    }

    /// Create the file and any missing parent directories. An existing file
    /// keeps its content.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let env = Self::new(path);

        if let Some(parent) = env.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                std::fs::create_dir_all(parent)?;
                debug!(dir = %parent.display(), "created parent directories");
            }
        }

        if !env.exists() {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&env.path)?;
            debug!(path = %env.path.display(), "created empty env file");
        }

        Ok(env)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Fails with `FileNotReadable` saying whether the file is missing, is
    /// not a regular file, or cannot be opened.
    pub fn check_readable(&self) -> Result<()> {
        match self.unreadable_reason() {
            Some(reason) => Err(DotenvError::FileNotReadable {
                path: self.path.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.path.is_file() && OpenOptions::new().write(true).open(&self.path).is_ok()
    }

    fn unreadable_reason(&self) -> Option<Unreadable> {
        match std::fs::metadata(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Some(Unreadable::Missing),
            Err(_) => return Some(Unreadable::PermissionDenied),
            Ok(meta) if !meta.is_file() => return Some(Unreadable::NotAFile),
            Ok(_) => {}
        }
        match File::open(&self.path) {
            Ok(_) => None,
            Err(_) => Some(Unreadable::PermissionDenied),
        }
    }

    /// Read the file into memory, discarding any unsaved changes.
    pub fn load(&mut self) -> Result<&mut Self> {
        let content = std::fs::read_to_string(&self.path)?;
        let lines = LineCollection::parse(&content);
        debug!(path = %self.path.display(), lines = lines.len(), "loaded env file");
        self.lines = Some(lines);
        Ok(self)
    }

    /// Write the lines back to disk, ending with exactly one newline.
    /// Returns the number of bytes written.
    pub fn save(&self) -> Result<usize> {
        let lines = self.lines_ref()?;
        let mut content = lines.to_string();
        content.push_str(lines.final_ending().as_str());

        std::fs::write(&self.path, &content).map_err(|source| DotenvError::WriteError {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "saved env file");
        Ok(content.len())
    }

    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        Ok(self.lines_ref()?.get(key))
    }

    pub fn find(&self, key: &str) -> Result<Option<&Line>> {
        Ok(self.lines_ref()?.find(key))
    }

    pub fn set(&mut self, key: &str, value: &str, quote: Quote) -> Result<()> {
        validate_pair(key, value)?;
        self.lines_mut()?.set(key, value, quote);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<usize> {
        Ok(self.lines_mut()?.remove(key))
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.lines_ref()?.has_key(key))
    }

    pub fn dictionary(&self) -> Result<Dictionary> {
        Ok(self.lines_ref()?.dictionary())
    }

    /// Total number of lines, pairs or not.
    pub fn size(&self) -> Result<usize> {
        Ok(self.lines_ref()?.len())
    }

    fn lines_ref(&self) -> Result<&LineCollection> {
        self.lines.as_ref().ok_or(DotenvError::NotLoaded)
    }

    fn lines_mut(&mut self) -> Result<&mut LineCollection> {
        self.lines.as_mut().ok_or(DotenvError::NotLoaded)
    }
}

/// Absolute form of `path`, taken relative to `cwd` when it is relative.
/// Does not touch the filesystem.
pub fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Reject pairs that could not be read back as the same single line.
fn validate_pair(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(DotenvError::InvalidLineFormat("key must not be empty".into()));
    }
    if key.contains('=') || key.chars().any(char::is_whitespace) {
        return Err(DotenvError::InvalidLineFormat(format!(
            "key {:?} may not contain '=' or whitespace",
            key
        )));
    }
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(DotenvError::InvalidLineFormat(format!(
            "value for {} must be a single line",
            key
        )));
    }
    Ok(())
}
