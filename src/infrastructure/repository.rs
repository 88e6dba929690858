//! JSON file store for tree documents
//!
//! One document per file: `<root>/trees/<tree_id>.json`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::FamilyTreeDocument;
use crate::infrastructure::traits::{FileSystem, TreeRepository};

const TREES_DIR: &str = "trees";
const EXTENSION: &str = "json";

static TREE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid tree id pattern"));

/// Reject ids that could escape the trees directory or clash with file names.
pub fn validate_tree_id(tree_id: &str) -> ApplicationResult<()> {
    if !TREE_ID_RE.is_match(tree_id) || tree_id.ends_with(".json") {
        return Err(ApplicationError::InvalidTreeId(tree_id.to_string()));
    }
    Ok(())
}

/// Tree repository backed by JSON files below a base directory.
pub struct JsonTreeRepository {
    fs: Arc<dyn FileSystem>,
    trees_dir: PathBuf,
}

impl JsonTreeRepository {
    pub fn new(fs: Arc<dyn FileSystem>, base_dir: &Path) -> Self {
        Self {
            fs,
            trees_dir: base_dir.join(TREES_DIR),
        }
    }

    pub fn trees_dir(&self) -> &Path {
        &self.trees_dir
    }

    /// Path of the document for `tree_id`.
    pub fn document_path(&self, tree_id: &str) -> ApplicationResult<PathBuf> {
        validate_tree_id(tree_id)?;
        Ok(self.trees_dir.join(format!("{tree_id}.{EXTENSION}")))
    }
}

impl TreeRepository for JsonTreeRepository {
    #[instrument(level = "debug", skip(self))]
    fn load(&self, tree_id: &str) -> ApplicationResult<Option<FamilyTreeDocument>> {
        let path = self.document_path(tree_id)?;
        if !self.fs.is_file(&path) {
            debug!("no document at {}", path.display());
            return Ok(None);
        }

        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read tree document", &path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let document = serde_json::from_str(&content).with_path_context("parse tree document", &path)?;
        Ok(Some(document))
    }

    #[instrument(level = "debug", skip(self, document), fields(tree = %document.id))]
    fn save(&self, document: &FamilyTreeDocument) -> ApplicationResult<()> {
        let path = self.document_path(&document.id)?;
        let json = serde_json::to_string_pretty(document)
            .with_path_context("serialize tree document", &path)?;

        self.fs
            .ensure_parent(&path)
            .with_path_context("create trees directory", &path)?;

        // Write to a sibling first so readers never see a partial document
        let tmp = path.with_extension("json.tmp");
        self.fs
            .write(&tmp, &json)
            .with_path_context("write tree document", &tmp)?;
        self.fs
            .rename(&tmp, &path)
            .with_path_context("replace tree document", &path)?;

        debug!("saved {} ({} bytes)", path.display(), json.len());
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, tree_id: &str) -> ApplicationResult<bool> {
        let path = self.document_path(tree_id)?;
        if !self.fs.exists(&path) {
            return Ok(false);
        }
        self.fs
            .remove_file(&path)
            .with_path_context("delete tree document", &path)?;
        Ok(true)
    }

    fn list(&self) -> ApplicationResult<Vec<String>> {
        if !self.fs.is_dir(&self.trees_dir) {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in walkdir::WalkDir::new(&self.trees_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map(|ext| ext == EXTENSION).unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
