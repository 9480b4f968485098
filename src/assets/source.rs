use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ScrubError, ScrubResult};

/// Naming scheme of the frame files: `{prefix}{number:0digits}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FramePattern {
    pub prefix: String,
    pub digits: usize,
    pub extension: String,
    /// Number carried by the first frame file.
    pub first: u32,
}

impl Default for FramePattern {
    fn default() -> Self {
        Self {
            prefix: "frame-".to_string(),
            digits: 3,
            extension: "jpg".to_string(),
            first: 1,
        }
    }
}

impl FramePattern {
    pub fn validate(&self) -> ScrubResult<()> {
        if self.digits == 0 {
            return Err(ScrubError::validation("frame pattern digits must be > 0"));
        }
        if self.extension.is_empty() || self.extension.contains(['/', '\\']) {
            return Err(ScrubError::validation(format!(
                "invalid frame extension '{}'",
                self.extension
            )));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(ScrubError::validation(format!(
                "frame prefix must not contain path separators: '{}'",
                self.prefix
            )));
        }
        Ok(())
    }

    /// File name of the frame at zero-based `index`. Numbers wider than `digits` are kept whole.
    pub fn file_name(&self, index: usize) -> String {
        let number = u64::from(self.first) + index as u64;
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            number,
            self.extension,
            width = self.digits
        )
    }
}

/// File name of frame `number` (1-based) under the default pattern, e.g. `frame-007.jpg`.
pub fn frame_file_name(number: u32) -> String {
    format!("frame-{number:03}.jpg")
}

/// Where frame bytes come from.
///
/// Any failure (missing resource, permission, I/O) is reported as an error; the sequence loader
/// treats every error the same way.
pub trait FrameSource {
    fn fetch(&self, name: &str) -> ScrubResult<Vec<u8>>;

    /// Human readable location for diagnostics.
    fn describe(&self) -> String;
}

/// Reads frames from `{base}/{name}` on the local filesystem.
#[derive(Clone, Debug)]
pub struct DirFrameSource {
    base: PathBuf,
}

impl DirFrameSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl FrameSource for DirFrameSource {
    fn fetch(&self, name: &str) -> ScrubResult<Vec<u8>> {
        let p = self.base.join(name);
        std::fs::read(&p)
            .map_err(|e| ScrubError::load(format!("failed to read frame '{}': {e}", p.display())))
    }

    fn describe(&self) -> String {
        self.base.display().to_string()
    }
}

/// In-memory frames keyed by file name.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for MemoryFrameSource {
    fn fetch(&self, name: &str) -> ScrubResult<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ScrubError::load(format!("no frame named '{name}'")))
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}
