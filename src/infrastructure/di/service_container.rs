//! Wiring of settings, filesystem, repository and services

use std::sync::Arc;

use crate::application::services::FamilyTreeService;
use crate::config::Settings;
use crate::infrastructure::repository::JsonTreeRepository;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, TreeRepository};

/// Everything a CLI command needs, built once in `main`.
pub struct ServiceContainer {
    /// Effective settings after all layers
    pub settings: Arc<Settings>,

    pub fs: Arc<dyn FileSystem>,

    /// Tree document store
    pub repo: Arc<dyn TreeRepository>,

    /// Tree editing and query service
    pub trees: FamilyTreeService,
}

impl ServiceContainer {
    /// Real filesystem, JSON files under `settings.base_dir`.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Same, over a caller-supplied filesystem.
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let repo: Arc<dyn TreeRepository> =
            Arc::new(JsonTreeRepository::new(Arc::clone(&fs), &settings.base_dir));
        Self::with_repository(settings, fs, repo)
    }

    /// Create a service container around an existing repository.
    pub fn with_repository(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        repo: Arc<dyn TreeRepository>,
    ) -> Self {
        let settings = Arc::new(settings);
        let trees = FamilyTreeService::new(Arc::clone(&repo));

        Self {
            settings,
            fs,
            repo,
            trees,
        }
    }
}
