//! Structural validation of person records.
//!
//! The graph and traversal code assume unique ids and acyclic parent links
//! without checking. These checks enforce both at data-entry time.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::entities::Person;
use crate::domain::error::DomainError;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, DomainError>;

/// Field-level checks for a single record: name and lifespan.
pub fn validate_person(person: &Person) -> ValidationResult<()> {
    if person.name.trim().is_empty() {
        return Err(DomainError::EmptyName(person.id.clone()));
    }
    if let Some(death_year) = person.death_year {
        if death_year < person.birth_year {
            return Err(DomainError::InvalidLifespan {
                person_id: person.id.clone(),
                birth_year: person.birth_year,
                death_year,
            });
        }
    }
    Ok(())
}

/// Validate a whole store; reports the first violation found.
///
/// Order of checks: per-record fields, unique ids, self-parenting, cycles.
/// Dangling parent ids are tolerated: traversal treats them as roots.
pub fn validate_people(people: &[Person]) -> ValidationResult<()> {
    for person in people {
        validate_person(person)?;
    }

    let mut ids = HashSet::with_capacity(people.len());
    for person in people {
        if !ids.insert(person.id.as_str()) {
            return Err(DomainError::DuplicatePersonId(person.id.clone()));
        }
    }

    for person in people {
        if person.parent_id.as_deref() == Some(person.id.as_str()) {
            return Err(DomainError::CycleDetected(person.id.clone()));
        }
    }

    if let Some(id) = find_cycle(people) {
        return Err(DomainError::CycleDetected(id));
    }

    debug!("validated {} persons", people.len());
    Ok(())
}

/// Id of some person on a parent-link cycle, if one exists.
///
/// Each parent chain is walked once; chains already known to end at a root
/// are not revisited, so the whole check is O(n).
pub fn find_cycle(people: &[Person]) -> Option<String> {
    let parents: HashMap<&str, &str> = people
        .iter()
        .filter_map(|p| p.parent_id.as_deref().map(|parent| (p.id.as_str(), parent)))
        .collect();

    let mut terminates: HashSet<&str> = HashSet::new();
    for person in people {
        let mut path: Vec<&str> = Vec::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        let mut current = person.id.as_str();

        loop {
            if terminates.contains(current) {
                break;
            }
            if !on_path.insert(current) {
                return Some(current.to_string());
            }
            path.push(current);
            match parents.get(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        terminates.extend(path);
    }
    None
}

/// Whether `candidate_id` sits below `ancestor_id` in the parent chain.
pub fn is_descendant_of(people: &[Person], candidate_id: &str, ancestor_id: &str) -> bool {
    let by_id: HashMap<&str, &Person> = people.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = by_id.get(candidate_id).copied();

    while let Some(person) = current {
        if !seen.insert(person.id.as_str()) {
            return false;
        }
        match person.parent_id.as_deref() {
            Some(parent_id) if parent_id == ancestor_id => return true,
            Some(parent_id) => current = by_id.get(parent_id).copied(),
            None => return false,
        }
    }
    false
}

/// Persons that may become the parent of `person_id` without closing a cycle:
/// everyone except the person and its descendants.
pub fn eligible_parents<'a>(people: &'a [Person], person_id: &str) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|p| p.id != person_id && !is_descendant_of(people, &p.id, person_id))
        .collect()
}
