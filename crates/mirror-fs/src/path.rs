//! Separator-normalized paths relative to a tree root

use std::path::{Component, Path, PathBuf};

/// A path relative to a source or replica root.
///
/// Internally always uses forward slashes with empty and `.` components
/// removed, so the same logical entry compares equal no matter which
/// platform convention produced it. The empty path denotes the root itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl RelativePath {
    /// Create a new RelativePath from any path-like input.
    ///
    /// Only the host's own separators split components, so a backslash is
    /// part of a file name on Unix and a separator on Windows. Roots and
    /// prefixes are dropped: a relative path never names anything outside
    /// its root.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let inner = path
            .as_ref()
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy()),
                Component::ParentDir => Some("..".into()),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        Self { inner }
    }

    /// The path of the root itself.
    pub fn root() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Express `full` relative to `root`.
    ///
    /// Returns `None` if `full` does not live under `root`.
    pub fn from_full(root: &Path, full: &Path) -> Option<Self> {
        full.strip_prefix(root).ok().map(Self::new)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this path denotes the root itself.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Resolve this path under `root`, producing a platform-native path.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut native = root.to_path_buf();
        for segment in self.segments() {
            native.push(segment);
        }
        native
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Get the parent path. The parent of a top-level entry is the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(match self.inner.rfind('/') {
            Some(idx) => Self {
                inner: self.inner[..idx].to_string(),
            },
            None => Self::root(),
        })
    }

    /// Get the final component.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Iterate over the path components.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Number of components; zero for the root.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Whether this path equals `ancestor` or lies beneath it.
    pub fn is_within(&self, ancestor: &RelativePath) -> bool {
        if ancestor.is_root() || self.inner == ancestor.inner {
            return true;
        }
        self.inner
            .strip_prefix(&ancestor.inner)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for RelativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RelativePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for RelativePath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for RelativePath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
