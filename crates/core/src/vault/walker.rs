//! Recursive vault directory walker.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::document::DocKey;
use crate::error::{VaultError, VaultResult};

/// Rules deciding which entries under a vault root count as documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Entries whose name starts with this prefix are skipped (with their contents).
    pub hidden_prefix: String,
    /// Entry names that are never descended into.
    pub ignored_names: Vec<String>,
    /// Folders to exclude, relative to the vault root.
    pub excluded_folders: Vec<PathBuf>,
    /// File extensions (without the dot) that mark content files.
    pub extensions: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            hidden_prefix: ".".to_string(),
            ignored_names: ["node_modules", "target", "__pycache__", "venv"]
                .into_iter()
                .map(String::from)
                .collect(),
            excluded_folders: Vec::new(),
            extensions: vec!["md".to_string()],
        }
    }
}

impl ExclusionRules {
    /// Add folders to exclude. Absolute paths are made relative to `root`.
    pub fn with_excluded_folders(
        mut self,
        root: &Path,
        folders: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        self.excluded_folders.extend(folders.into_iter().map(|p| {
            if p.is_absolute() { p.strip_prefix(root).unwrap_or(&p).to_path_buf() } else { p }
        }));
        self
    }

    /// Whether a single walked entry (file or directory) should be pruned.
    /// `relative` is the entry's path relative to the vault root.
    pub fn excludes_entry(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };

        if !self.hidden_prefix.is_empty() && name.starts_with(&self.hidden_prefix) {
            return true;
        }

        if self.ignored_names.iter().any(|ignored| *ignored == name) {
            return true;
        }

        self.excluded_folders.iter().any(|excluded| relative.starts_with(excluded))
    }

    /// Whether a root-relative file path is admitted as a document: every
    /// ancestor passes [`Self::excludes_entry`] and the extension matches.
    pub fn admits(&self, relative: &Path) -> bool {
        if !self.is_content_file(relative) {
            return false;
        }
        relative
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .all(|p| !self.excludes_entry(p))
    }

    pub fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|ext| ext == e))
    }

    /// Strip a trailing content extension (`notes/a.md` -> `notes/a`).
    pub fn strip_extension<'a>(&self, name: &'a str) -> &'a str {
        self.extensions
            .iter()
            .find_map(|ext| {
                name.strip_suffix(ext.as_str()).and_then(|rest| rest.strip_suffix('.'))
            })
            .unwrap_or(name)
    }
}

/// Walker for discovering documents in a vault.
#[derive(Debug, Clone)]
pub struct VaultWalker {
    root: PathBuf,
    rules: ExclusionRules,
}

impl VaultWalker {
    /// Create a new walker with the default rules.
    pub fn new(root: &Path) -> VaultResult<Self> {
        Self::with_rules(root, ExclusionRules::default())
    }

    /// Create a new walker with explicit exclusion rules.
    pub fn with_rules(root: &Path, rules: ExclusionRules) -> VaultResult<Self> {
        let canonical = root
            .canonicalize()
            .map_err(|_| VaultError::MissingRoot(root.display().to_string()))?;

        if !canonical.is_dir() {
            return Err(VaultError::NotADirectory(canonical.display().to_string()));
        }

        // Absolute exclusions may be spelled against the given root or the canonical one.
        let excluded_folders = rules
            .excluded_folders
            .iter()
            .map(|p| {
                if !p.is_absolute() {
                    return p.clone();
                }
                p.strip_prefix(root)
                    .or_else(|_| p.strip_prefix(&canonical))
                    .map_or_else(|_| p.clone(), Path::to_path_buf)
            })
            .collect();
        let rules = ExclusionRules { excluded_folders, ..rules };

        Ok(Self { root: canonical, rules })
    }

    /// Lazily walk the vault, yielding document keys in sorted order.
    ///
    /// Every call starts a fresh walk. Entries that cannot be read while
    /// walking are logged and skipped.
    pub fn keys(&self) -> impl Iterator<Item = DocKey> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| !self.is_excluded(e))
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable entry in {}: {}",
                        self.root.display(),
                        e
                    );
                    None
                }
            })
            .filter(move |entry| {
                entry.path().is_file() && self.rules.is_content_file(entry.path())
            })
            .filter_map(move |entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                DocKey::from_relative(relative)
            })
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        // Never filter the root directory (depth 0)
        if entry.depth() == 0 {
            return false;
        }
        entry
            .path()
            .strip_prefix(&self.root)
            .is_ok_and(|relative| self.rules.excludes_entry(relative))
    }

    /// Get the vault root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("note1.md"), "# Note 1").unwrap();
        fs::write(root.join("note2.md"), "# Note 2").unwrap();

        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/note3.md"), "# Note 3").unwrap();

        // Hidden directory (should be skipped)
        fs::create_dir(root.join(".hidden")).unwrap();
        fs::write(root.join(".hidden/secret.md"), "# Secret").unwrap();

        // Non-vault directory (should be skipped)
        fs::create_dir(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules/readme.md"), "# Dep").unwrap();

        // Non-markdown file (should be skipped)
        fs::write(root.join("readme.txt"), "Not markdown").unwrap();

        dir
    }

    fn keys(walker: &VaultWalker) -> Vec<String> {
        walker.keys().map(|k| k.as_str().to_string()).collect()
    }

    #[test]
    fn test_walk_finds_markdown_files() {
        let vault = create_test_vault();
        let walker = VaultWalker::new(vault.path()).unwrap();

        assert_eq!(keys(&walker), vec!["note1.md", "note2.md", "subdir/note3.md"]);
    }

    #[test]
    fn test_walk_is_restartable() {
        let vault = create_test_vault();
        let walker = VaultWalker::new(vault.path()).unwrap();

        assert_eq!(keys(&walker), keys(&walker));
    }

    #[test]
    fn test_walk_empty_vault() {
        let dir = TempDir::new().unwrap();
        let walker = VaultWalker::new(dir.path()).unwrap();
        assert_eq!(walker.keys().count(), 0);
    }

    #[test]
    fn test_missing_root() {
        let result = VaultWalker::new(Path::new("/nonexistent/path"));
        assert!(matches!(result.unwrap_err(), VaultError::MissingRoot(_)));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("note.md");
        fs::write(&file, "# Note").unwrap();

        let result = VaultWalker::new(&file);
        assert!(matches!(result.unwrap_err(), VaultError::NotADirectory(_)));
    }

    #[test]
    fn test_walk_with_exclusions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("note1.md"), "# Note 1").unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(root.join("templates/task.md"), "# Task Template").unwrap();
        fs::create_dir_all(root.join("docs/internal")).unwrap();
        fs::write(root.join("docs/readme.md"), "# Docs").unwrap();
        fs::write(root.join("docs/internal/secret.md"), "# Secret").unwrap();

        let rules = ExclusionRules::default().with_excluded_folders(
            root,
            vec![PathBuf::from("templates"), root.join("docs/internal")],
        );
        let walker = VaultWalker::with_rules(root, rules).unwrap();

        assert_eq!(keys(&walker), vec!["docs/readme.md", "note1.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_exclusions_under_symlinked_root() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real");
        fs::create_dir_all(real.join("templates")).unwrap();
        fs::write(real.join("note.md"), "# Note").unwrap();
        fs::write(real.join("templates/task.md"), "# Task").unwrap();

        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let rules = ExclusionRules {
            excluded_folders: vec![link.join("templates")],
            ..Default::default()
        };
        let walker = VaultWalker::with_rules(&link, rules).unwrap();

        assert_eq!(keys(&walker), vec!["note.md"]);
        assert_eq!(walker.rules().excluded_folders, vec![PathBuf::from("templates")]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.md"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let rules = ExclusionRules { extensions: vec!["txt".into()], ..Default::default() };
        let walker = VaultWalker::with_rules(root, rules).unwrap();

        assert_eq!(keys(&walker), vec!["b.txt"]);
    }

    #[test]
    fn test_rules_admit_relative_paths() {
        let rules = ExclusionRules::default()
            .with_excluded_folders(Path::new("/vault"), vec![PathBuf::from("archive")]);

        assert!(rules.admits(Path::new("notes/a.md")));
        assert!(!rules.admits(Path::new("notes/a.txt")));
        assert!(!rules.admits(Path::new(".obsidian/workspace.md")));
        assert!(!rules.admits(Path::new("notes/.draft.md")));
        assert!(!rules.admits(Path::new("archive/old.md")));
        assert!(!rules.admits(Path::new("node_modules/pkg/readme.md")));
    }

    #[test]
    fn test_strip_extension() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.strip_extension("notes/a.md"), "notes/a");
        assert_eq!(rules.strip_extension("notes/a"), "notes/a");
        assert_eq!(rules.strip_extension("notes/amd"), "notes/amd");
    }
}
