//! Family tree service
//!
//! Loads tree documents through the repository, applies person edits as
//! "new store, new graph" and runs lineage queries for the presentation layer.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    assign_positions, breadth_first_search, depth_first_search, eligible_parents,
    find_descendants, find_relationship, validate_people, DomainError, FamilyGraph, FamilyTreeDocument,
    LayoutConfig, Person, PersonStore, Relationship, TreeNode,
};
use crate::infrastructure::traits::TreeRepository;

/// Display tree of one document, ready for rendering.
#[derive(Debug, Clone)]
pub struct DisplayTree {
    /// Name of the tree document
    pub tree_name: String,
    /// Root of the nested view
    pub root: TreeNode,
}

/// Generate a person id of the form `person-1a2b3c4d`.
pub fn generate_person_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("person-{}", &uuid[..8])
}

/// Generate a tree id of the form `tree-<unix millis>`.
pub fn generate_tree_id() -> String {
    format!("tree-{}", chrono::Utc::now().timestamp_millis())
}

/// Service for managing family tree documents and querying them.
pub struct FamilyTreeService {
    repo: Arc<dyn TreeRepository>,
}

impl FamilyTreeService {
    /// Create a new family tree service.
    pub fn new(repo: Arc<dyn TreeRepository>) -> Self {
        Self { repo }
    }

    // ============================================================
    // Documents
    // ============================================================

    /// Create a new tree holding only its root person.
    #[instrument(level = "debug", skip(self, description, root))]
    pub fn create_tree(
        &self,
        name: &str,
        description: Option<String>,
        root: Person,
        tree_id: Option<String>,
    ) -> ApplicationResult<FamilyTreeDocument> {
        let tree_id = tree_id.unwrap_or_else(generate_tree_id);
        if self.repo.load(&tree_id)?.is_some() {
            return Err(ApplicationError::TreeAlreadyExists(tree_id));
        }

        let root_person_id = root.id.clone();
        let store = PersonStore::default().with_person_added(root)?;
        let document = FamilyTreeDocument {
            id: tree_id,
            name: name.to_string(),
            description,
            root_person_id,
            people: store.into_people(),
        };

        self.repo.save(&document)?;
        info!("created tree {}", document.id);
        Ok(document)
    }

    /// Create the five-person demo tree.
    pub fn create_sample_tree(&self, tree_id: Option<String>) -> ApplicationResult<FamilyTreeDocument> {
        let tree_id = tree_id.unwrap_or_else(generate_tree_id);
        if self.repo.load(&tree_id)?.is_some() {
            return Err(ApplicationError::TreeAlreadyExists(tree_id));
        }

        let document = sample_document(tree_id);
        self.repo.save(&document)?;
        info!("created sample tree {}", document.id);
        Ok(document)
    }

    /// Load a tree document; missing trees are an error here.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, tree_id: &str) -> ApplicationResult<FamilyTreeDocument> {
        let document = self
            .repo
            .load(tree_id)?
            .ok_or_else(|| ApplicationError::TreeNotFound(tree_id.to_string()))?;

        if let Err(e) = validate_people(&document.people) {
            warn!("tree {} violates structural invariants: {}", tree_id, e);
        }
        debug!("loaded tree {} with {} persons", tree_id, document.people.len());
        Ok(document)
    }

    pub fn list_trees(&self) -> ApplicationResult<Vec<String>> {
        self.repo.list()
    }

    pub fn delete_tree(&self, tree_id: &str) -> ApplicationResult<()> {
        if !self.repo.delete(tree_id)? {
            return Err(ApplicationError::TreeNotFound(tree_id.to_string()));
        }
        info!("deleted tree {}", tree_id);
        Ok(())
    }

    // ============================================================
    // Person edits
    // ============================================================

    #[instrument(level = "debug", skip(self, person), fields(person = %person.id))]
    pub fn add_person(&self, tree_id: &str, person: Person) -> ApplicationResult<FamilyTreeDocument> {
        self.update_people(tree_id, |store, _| store.with_person_added(person))
    }

    #[instrument(level = "debug", skip(self, person), fields(person = %person.id))]
    pub fn edit_person(&self, tree_id: &str, person: Person) -> ApplicationResult<FamilyTreeDocument> {
        self.update_people(tree_id, |store, _| store.with_person_updated(person))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_person(&self, tree_id: &str, person_id: &str) -> ApplicationResult<FamilyTreeDocument> {
        self.update_people(tree_id, |store, root_id| store.with_person_removed(person_id, root_id))
    }

    fn update_people<F>(&self, tree_id: &str, edit: F) -> ApplicationResult<FamilyTreeDocument>
    where
        F: FnOnce(&PersonStore, &str) -> Result<PersonStore, DomainError>,
    {
        let mut document = self.load(tree_id)?;
        let store = PersonStore::new(std::mem::take(&mut document.people));
        document.people = edit(&store, &document.root_person_id)?.into_people();
        self.repo.save(&document)?;
        Ok(document)
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Fresh graph over the stored snapshot.
    pub fn graph(&self, tree_id: &str) -> ApplicationResult<FamilyGraph> {
        Ok(FamilyGraph::new(self.load(tree_id)?.people))
    }

    /// Nested tree from `root` (default: the document's root person).
    #[instrument(level = "debug", skip(self, layout))]
    pub fn display_tree(
        &self,
        tree_id: &str,
        root: Option<&str>,
        layout: Option<&LayoutConfig>,
    ) -> ApplicationResult<DisplayTree> {
        let document = self.load(tree_id)?;
        let root_id = root.unwrap_or(&document.root_person_id).to_string();
        let graph = FamilyGraph::new(document.people);

        let mut tree = graph
            .build_tree(&root_id)
            .ok_or_else(|| ApplicationError::InvalidRoot {
                tree_id: tree_id.to_string(),
                root_id: root_id.clone(),
            })?;
        if let Some(config) = layout {
            assign_positions(&mut tree, config);
        }

        Ok(DisplayTree {
            tree_name: document.name,
            root: tree,
        })
    }

    pub fn person(&self, tree_id: &str, person_id: &str) -> ApplicationResult<Person> {
        self.graph(tree_id)?
            .get_person(person_id)
            .cloned()
            .ok_or_else(|| DomainError::PersonNotFound(person_id.to_string()).into())
    }

    pub fn ancestors(&self, tree_id: &str, person_id: &str) -> ApplicationResult<Vec<Person>> {
        let graph = self.graph(tree_id)?;
        Ok(owned(graph.find_ancestors(person_id)))
    }

    pub fn descendants(&self, tree_id: &str, person_id: &str) -> ApplicationResult<Vec<Person>> {
        let graph = self.graph(tree_id)?;
        Ok(owned(find_descendants(&graph, person_id)))
    }

    /// Everyone within `depth` generations below `person_id` (BFS order).
    pub fn relatives(
        &self,
        tree_id: &str,
        person_id: &str,
        depth: Option<usize>,
    ) -> ApplicationResult<Vec<Person>> {
        let graph = self.graph(tree_id)?;
        Ok(owned(breadth_first_search(&graph, person_id, depth)))
    }

    /// Subtree of `person_id` in pre-order, bounded by `depth` (DFS order).
    pub fn lineage(
        &self,
        tree_id: &str,
        person_id: &str,
        depth: Option<usize>,
    ) -> ApplicationResult<Vec<Person>> {
        let graph = self.graph(tree_id)?;
        Ok(owned(depth_first_search(&graph, person_id, depth)))
    }

    pub fn relationship(&self, tree_id: &str, a_id: &str, b_id: &str) -> ApplicationResult<Relationship> {
        let graph = self.graph(tree_id)?;
        Ok(find_relationship(&graph, a_id, b_id))
    }

    pub fn age(&self, tree_id: &str, person_id: &str) -> ApplicationResult<Option<i32>> {
        Ok(self.graph(tree_id)?.calculate_age_now(person_id))
    }

    /// Candidates for a new parent of `person_id` that keep the tree acyclic.
    pub fn eligible_parents(&self, tree_id: &str, person_id: &str) -> ApplicationResult<Vec<Person>> {
        let document = self.load(tree_id)?;
        Ok(owned(eligible_parents(&document.people, person_id)))
    }
}

fn owned(people: Vec<&Person>) -> Vec<Person> {
    people.into_iter().cloned().collect()
}

fn sample_document(tree_id: String) -> FamilyTreeDocument {
    let description = format!(
        "Sample family tree created on {}",
        chrono::Local::now().format("%Y-%m-%d")
    );
    FamilyTreeDocument {
        id: tree_id,
        name: "New Family Tree".to_string(),
        description: Some(description),
        root_person_id: "person-1".to_string(),
        people: vec![
            Person::new("person-1", "Ancestor", 1900).with_death_year(1980),
            Person::new("person-2", "Child 1", 1930).with_parent("person-1"),
            Person::new("person-3", "Child 2", 1935).with_parent("person-1"),
            Person::new("person-4", "Grandchild 1", 1960).with_parent("person-2"),
            Person::new("person-5", "Grandchild 2", 1965).with_parent("person-3"),
        ],
    }
}
