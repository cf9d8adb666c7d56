//! Mapping of client-supplied paths onto the media root.
//!
//! Every path that reaches the filesystem goes through [`MediaRoot::resolve`].
//! The client string is split into plain name segments (empty and `.`
//! segments dropped, `..` and absolute markers rejected), joined onto the
//! root, canonicalized and then re-checked for containment so that a symbolic
//! link cannot carry a request outside the root.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::BrowserError;

/// Characters that separate client path segments.
#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// The configured top-level directory, canonicalized once at startup.
#[derive(Debug, Clone)]
pub struct MediaRoot {
    root: PathBuf,
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    Directory(PathBuf),
    File(PathBuf),
}

impl ResolvedPath {
    /// Absolute, canonical filesystem path
    pub fn path(&self) -> &Path {
        match self {
            ResolvedPath::Directory(path) | ResolvedPath::File(path) => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, ResolvedPath::Directory(_))
    }
}

impl MediaRoot {
    /// Canonicalize `root` and make sure it is an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, BrowserError> {
        let root = root.as_ref();
        let canonical = root
            .canonicalize()
            .map_err(|_| BrowserError::NotFound(root.display().to_string()))?;

        if !canonical.is_dir() {
            return Err(BrowserError::NotADirectory);
        }

        Ok(Self { root: canonical })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// True when the canonical form of `path` lies inside the root.
    ///
    /// Fails closed: a path that cannot be canonicalized is not contained.
    pub fn contains(&self, path: &Path) -> bool {
        path.canonicalize()
            .is_ok_and(|canonical| canonical.starts_with(&self.root))
    }

    /// Resolve a client path to a directory or file inside the root.
    pub fn resolve(&self, relative: &str) -> Result<ResolvedPath, BrowserError> {
        let segments = normalize(relative)?;
        let candidate = segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment));

        let canonical = match candidate.canonicalize() {
            Ok(path) => path,
            Err(err) => {
                debug!("Cannot resolve {:?}: {}", candidate, err);
                return Err(BrowserError::NotFound(relative.to_string()));
            }
        };

        // Component-wise: "/media_root2" does not start with "/media_root".
        if !canonical.starts_with(&self.root) {
            warn!(
                "Symlink escape attempt: {:?} resolved to {:?} which is outside {:?}",
                candidate, canonical, self.root
            );
            return Err(BrowserError::PathEscape);
        }

        let metadata = std::fs::metadata(&canonical)?;
        if metadata.is_dir() {
            Ok(ResolvedPath::Directory(canonical))
        } else if metadata.is_file() {
            Ok(ResolvedPath::File(canonical))
        } else {
            debug!("Not a regular file or directory: {:?}", canonical);
            Err(BrowserError::NotFound(relative.to_string()))
        }
    }
}

/// Split a client path into plain name segments.
///
/// `/` separates segments (and `\` on Windows; elsewhere it is an ordinary
/// file name character). Empty and `.` segments are dropped;
/// `..`, drive prefixes and embedded NUL bytes fail with `PathEscape`.
pub fn normalize(relative: &str) -> Result<Vec<String>, BrowserError> {
    let mut segments = Vec::new();

    for segment in relative.split(SEPARATORS) {
        if segment.is_empty() || segment == "." {
            continue;
        }

        if segment.contains('\0') {
            warn!("Path segment contains null byte: {:?}", segment);
            return Err(BrowserError::PathEscape);
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => segments.push(segment.to_string()),
            (Some(Component::ParentDir), None) => {
                warn!("Path traversal attempt detected: parent directory (..) in path");
                return Err(BrowserError::PathEscape);
            }
            _ => {
                warn!("Rejected path segment: {:?}", segment);
                return Err(BrowserError::PathEscape);
            }
        }
    }

    Ok(segments)
}

/// Join normalized segments back into a `/`-separated relative path.
pub fn join_segments(segments: &[String]) -> String {
    segments.join("/")
}
