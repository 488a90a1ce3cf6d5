//! Document sources and the loader that reads them.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::document::{DocKey, Document};
use super::walker::{ExclusionRules, VaultWalker};
use crate::error::VaultResult;

/// Where documents come from.
///
/// `keys` must yield a fresh, finite sequence on every call so a source can be
/// walked more than once in a session.
pub trait DocumentSource {
    fn keys(&self) -> Box<dyn Iterator<Item = DocKey> + '_>;

    fn read(&self, key: &DocKey) -> io::Result<String>;

    fn rules(&self) -> &ExclusionRules;

    /// Human-readable origin, used in log messages.
    fn describe(&self) -> String;
}

/// Documents on disk under a vault root.
#[derive(Debug, Clone)]
pub struct FsSource {
    walker: VaultWalker,
}

impl FsSource {
    pub fn open(root: &Path) -> VaultResult<Self> {
        Ok(Self { walker: VaultWalker::new(root)? })
    }

    pub fn with_rules(root: &Path, rules: ExclusionRules) -> VaultResult<Self> {
        Ok(Self { walker: VaultWalker::with_rules(root, rules)? })
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    fn path_of(&self, key: &DocKey) -> PathBuf {
        key.as_str().split('/').fold(self.walker.root().to_path_buf(), |p, part| p.join(part))
    }
}

impl DocumentSource for FsSource {
    fn keys(&self) -> Box<dyn Iterator<Item = DocKey> + '_> {
        Box::new(self.walker.keys())
    }

    fn read(&self, key: &DocKey) -> io::Result<String> {
        std::fs::read_to_string(self.path_of(key))
    }

    fn rules(&self) -> &ExclusionRules {
        self.walker.rules()
    }

    fn describe(&self) -> String {
        self.walker.root().display().to_string()
    }
}

/// An in-memory vault, for tests and embedding.
///
/// Keys are filtered through the same [`ExclusionRules`] as the on-disk
/// walker and enumerated in the walker's order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rules: ExclusionRules,
    // `None` marks a document that exists but cannot be read.
    files: BTreeMap<DocKey, Option<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ExclusionRules) -> Self {
        Self { rules, files: BTreeMap::new() }
    }

    pub fn insert(&mut self, key: &str, content: impl Into<String>) -> &mut Self {
        self.files.insert(DocKey::new(key), Some(content.into()));
        self
    }

    /// Add a document whose reads always fail.
    pub fn insert_unreadable(&mut self, key: &str) -> &mut Self {
        self.files.insert(DocKey::new(key), None);
        self
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for (k, v) in iter {
            source.insert(k.as_ref(), v);
        }
        source
    }
}

impl DocumentSource for MemorySource {
    fn keys(&self) -> Box<dyn Iterator<Item = DocKey> + '_> {
        let mut keys: Vec<&DocKey> = self
            .files
            .keys()
            .filter(|key| self.rules.admits(Path::new(key.as_str())))
            .collect();
        // Same order as a sorted directory walk: `x/Plan.md` before `x.y/Plan.md`.
        keys.sort_by(|a, b| a.segments().cmp(b.segments()));
        Box::new(keys.into_iter().cloned())
    }

    fn read(&self, key: &DocKey) -> io::Result<String> {
        match self.files.get(key) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(io::Error::new(io::ErrorKind::PermissionDenied, "unreadable")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, key.to_string())),
        }
    }

    fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Reads documents from a source, skipping any that fail to load.
pub struct Loader<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: DocumentSource + ?Sized> Loader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Lazily load documents in enumeration order.
    ///
    /// A document that cannot be read is dropped from the sequence; the failure
    /// is only visible in the debug log.
    pub fn documents(self) -> impl Iterator<Item = Document> + 'a {
        let source = self.source;
        source.keys().filter_map(move |key| match source.read(&key) {
            Ok(content) => Some(Document::parse(key, content)),
            Err(e) => {
                tracing::debug!("Skipping {} in {}: {}", key, source.describe(), e);
                None
            }
        })
    }
}
