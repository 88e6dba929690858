//! Person store: the flat, authoritative record list of one tree.
//!
//! Edits never mutate a store in place. Each one yields a new store from
//! which a fresh [`FamilyGraph`] is built, so indexes can never go stale.

use tracing::{debug, instrument};

use crate::domain::entities::Person;
use crate::domain::error::DomainError;
use crate::domain::graph::FamilyGraph;
use crate::domain::validation::{is_descendant_of, validate_person};

/// Result type for store edits.
pub type StoreResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonStore {
    people: Vec<Person>,
}

impl PersonStore {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn into_people(self) -> Vec<Person> {
        self.people
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Fresh graph over the current snapshot.
    pub fn graph(&self) -> FamilyGraph {
        FamilyGraph::from_slice(&self.people)
    }

    /// New store with `person` appended.
    ///
    /// A parent that is the person itself, or that already hangs below the
    /// new id through a dangling reference, is a cycle.
    #[instrument(level = "debug", skip(self, person), fields(id = %person.id))]
    pub fn with_person_added(&self, person: Person) -> StoreResult<Self> {
        validate_person(&person)?;
        if self.get(&person.id).is_some() {
            return Err(DomainError::DuplicatePersonId(person.id));
        }
        self.check_parent_exists(&person)?;
        self.check_no_cycle(&person)?;

        let mut people = self.people.clone();
        people.push(person);
        debug!("store now holds {} persons", people.len());
        Ok(Self { people })
    }

    /// New store with the record sharing `person.id` replaced, order kept.
    #[instrument(level = "debug", skip(self, person), fields(id = %person.id))]
    pub fn with_person_updated(&self, person: Person) -> StoreResult<Self> {
        validate_person(&person)?;
        let pos = self
            .people
            .iter()
            .position(|p| p.id == person.id)
            .ok_or_else(|| DomainError::PersonNotFound(person.id.clone()))?;
        self.check_parent_exists(&person)?;
        self.check_no_cycle(&person)?;

        let mut people = self.people.clone();
        people[pos] = person;
        Ok(Self { people })
    }

    /// New store without `id`. The tree root and persons with children stay.
    #[instrument(level = "debug", skip(self))]
    pub fn with_person_removed(&self, id: &str, root_id: &str) -> StoreResult<Self> {
        if self.get(id).is_none() {
            return Err(DomainError::PersonNotFound(id.to_string()));
        }
        if id == root_id {
            return Err(DomainError::RootPersonRemoval(id.to_string()));
        }
        let children = self
            .people
            .iter()
            .filter(|p| p.parent_id.as_deref() == Some(id))
            .count();
        if children > 0 {
            return Err(DomainError::PersonHasChildren {
                person_id: id.to_string(),
                children,
            });
        }

        let people = self.people.iter().filter(|p| p.id != id).cloned().collect();
        Ok(Self { people })
    }

    fn check_parent_exists(&self, person: &Person) -> StoreResult<()> {
        match person.parent_id.as_deref() {
            Some(parent_id) if parent_id != person.id && self.get(parent_id).is_none() => {
                Err(DomainError::UnknownParent {
                    person_id: person.id.clone(),
                    parent_id: parent_id.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_no_cycle(&self, person: &Person) -> StoreResult<()> {
        match person.parent_id.as_deref() {
            Some(parent_id)
                if parent_id == person.id
                    || is_descendant_of(&self.people, parent_id, &person.id) =>
            {
                Err(DomainError::CycleDetected(person.id.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl From<Vec<Person>> for PersonStore {
    fn from(people: Vec<Person>) -> Self {
        Self::new(people)
    }
}
