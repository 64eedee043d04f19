use std::fs;
use std::path::Path;

use tendril_core::{TendrilError, TendrilResult};

/// What happened to a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Prepended,
}

impl WriteOutcome {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created => "create",
            Self::Overwritten => "overwrite",
            Self::Prepended => "insert",
        }
    }
}

pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `path`, creating missing directories and
    /// replacing whatever was there before.
    pub fn write(&self, path: &Path, content: &str) -> TendrilResult<WriteOutcome> {
        self.ensure_parent(path)?;

        let outcome = if path.exists() {
            tracing::warn!("overwriting {}", path.display());
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };

        fs::write(path, content).map_err(|e| TendrilError::filesystem(path, e))?;
        tracing::debug!(bytes = content.len(), "wrote {}", path.display());

        Ok(outcome)
    }

    /// Create `path` as an empty file if it does not exist yet.
    pub fn touch(&self, path: &Path) -> TendrilResult<()> {
        self.ensure_parent(path)?;

        if !path.exists() {
            fs::write(path, "").map_err(|e| TendrilError::filesystem(path, e))?;
            tracing::debug!("created empty {}", path.display());
        }

        Ok(())
    }

    /// Put `content` in front of the current contents of `path`.
    ///
    /// The new buffer is assembled in memory and written in one go, so a
    /// failed read leaves the file untouched.
    pub fn prepend(&self, path: &Path, content: &str) -> TendrilResult<WriteOutcome> {
        self.touch(path)?;

        let existing = fs::read(path).map_err(|e| TendrilError::filesystem(path, e))?;

        let mut buffer = Vec::with_capacity(content.len() + existing.len());
        buffer.extend_from_slice(content.as_bytes());
        buffer.extend_from_slice(&existing);

        fs::write(path, buffer).map_err(|e| TendrilError::filesystem(path, e))?;
        Ok(WriteOutcome::Prepended)
    }

    fn ensure_parent(&self, path: &Path) -> TendrilResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TendrilError::filesystem(parent, e))?;
        }
        Ok(())
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
