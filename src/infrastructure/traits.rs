//! I/O seams: the filesystem and the tree document store
//!
//! Services only see these traits; tests swap in temp-dir backed or
//! in-memory implementations.

use std::io;
use std::path::Path;

use crate::application::ApplicationResult;
use crate::domain::FamilyTreeDocument;

/// Minimal filesystem surface used by the repository and `config init`.
pub trait FileSystem: Send + Sync {
    /// Whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` with `content`.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// `mkdir -p`
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Atomic on the same filesystem; replaces `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// `mkdir -p` for the directory containing `path`.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Key-value store for tree documents, keyed by tree id.
pub trait TreeRepository: Send + Sync {
    /// Load a document; `None` if no tree is stored under `tree_id`.
    fn load(&self, tree_id: &str) -> ApplicationResult<Option<FamilyTreeDocument>>;

    /// Store a document under its own id, replacing any previous version.
    fn save(&self, document: &FamilyTreeDocument) -> ApplicationResult<()>;

    /// Remove a document; `false` if nothing was stored under `tree_id`.
    fn delete(&self, tree_id: &str) -> ApplicationResult<bool>;

    /// Ids of all stored trees, sorted.
    fn list(&self) -> ApplicationResult<Vec<String>>;
}

/// `std::fs` passthrough.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => self.create_dir_all(dir),
            _ => Ok(()),
        }
    }
}
