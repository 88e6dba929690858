//! Tests for PersonStore edits and structural validation

use rstest::{fixture, rstest};

use famtree::domain::{
    eligible_parents, find_cycle, is_descendant_of, validate_people, DomainError, Person,
    PersonStore,
};
use famtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// A(1) -> B(2), C(3); B(2) -> D(4)
#[fixture]
fn store() -> PersonStore {
    PersonStore::new(vec![
        Person::new("1", "A", 1900),
        Person::new("2", "B", 1930).with_parent("1"),
        Person::new("3", "C", 1935).with_parent("1"),
        Person::new("4", "D", 1960).with_parent("2"),
    ])
}

fn ids(people: &[&Person]) -> Vec<String> {
    people.iter().map(|p| p.id.clone()).collect()
}

// ============================================================
// add
// ============================================================

#[rstest]
fn given_valid_person_when_adding_then_appends_and_keeps_original(store: PersonStore) {
    // Act
    let updated = store
        .with_person_added(Person::new("5", "E", 1962).with_parent("2"))
        .expect("add");

    // Assert
    assert_eq!(updated.len(), 5);
    assert_eq!(store.len(), 4);
    assert_eq!(ids(&updated.graph().get_children("2")), vec!["4", "5"]);
}

#[rstest]
#[case(Person::new("1", "Again", 1900), DomainError::DuplicatePersonId("1".into()))]
#[case(
    Person::new("5", "E", 1960).with_parent("999"),
    DomainError::UnknownParent { person_id: "5".into(), parent_id: "999".into() }
)]
#[case(Person::new("5", "  ", 1960), DomainError::EmptyName("5".into()))]
#[case(
    Person::new("5", "E", 1960).with_death_year(1950),
    DomainError::InvalidLifespan { person_id: "5".into(), birth_year: 1960, death_year: 1950 }
)]
fn given_invalid_person_when_adding_then_rejects(
    store: PersonStore,
    #[case] person: Person,
    #[case] expected: DomainError,
) {
    assert_eq!(store.with_person_added(person), Err(expected));
}

#[test]
fn given_same_birth_and_death_year_when_adding_then_accepts() {
    let store = PersonStore::default();
    let result = store.with_person_added(Person::new("1", "A", 1900).with_death_year(1900));
    assert!(result.is_ok());
}

#[rstest]
fn given_self_parent_when_adding_then_rejects_cycle(store: PersonStore) {
    let result = store.with_person_added(Person::new("5", "E", 1960).with_parent("5"));
    assert_eq!(result, Err(DomainError::CycleDetected("5".into())));
}

#[test]
fn given_dangling_reference_to_new_id_when_adding_as_its_child_then_rejects_cycle() {
    // Arrange - y already points at the not-yet-stored x
    let store = PersonStore::new(vec![Person::new("y", "Y", 1970).with_parent("x")]);

    // Act
    let result = store.with_person_added(Person::new("x", "X", 1950).with_parent("y"));

    // Assert
    assert_eq!(result, Err(DomainError::CycleDetected("x".into())));
    assert!(validate_people(store.people()).is_ok());
}

#[test]
fn given_dangling_reference_to_new_id_when_adding_as_root_then_closes_link() {
    let store = PersonStore::new(vec![Person::new("y", "Y", 1970).with_parent("x")]);

    let updated = store
        .with_person_added(Person::new("x", "X", 1950))
        .expect("add");

    assert!(validate_people(updated.people()).is_ok());
    assert_eq!(ids(&updated.graph().get_children("x")), vec!["y"]);
}

// ============================================================
// update
// ============================================================

#[rstest]
fn given_new_parent_when_updating_then_replaces_in_place(store: PersonStore) {
    // Act - move D under C
    let updated = store
        .with_person_updated(Person::new("4", "D", 1960).with_parent("3"))
        .expect("update");

    // Assert
    let graph = updated.graph();
    assert!(graph.get_children("2").is_empty());
    assert_eq!(ids(&graph.get_children("3")), vec!["4"]);
    assert_eq!(updated.people()[3].id, "4");
}

#[rstest]
#[case("1", "2")]
#[case("1", "4")]
#[case("2", "2")]
fn given_parent_below_person_when_updating_then_rejects_cycle(
    store: PersonStore,
    #[case] id: &str,
    #[case] parent: &str,
) {
    let person = Person::new(id, "X", 1900).with_parent(parent);
    assert_eq!(
        store.with_person_updated(person),
        Err(DomainError::CycleDetected(id.to_string()))
    );
}

#[rstest]
fn given_unknown_person_when_updating_then_not_found(store: PersonStore) {
    assert_eq!(
        store.with_person_updated(Person::new("999", "X", 1900)),
        Err(DomainError::PersonNotFound("999".into()))
    );
}

// ============================================================
// remove
// ============================================================

#[rstest]
fn given_leaf_when_removing_then_drops_record(store: PersonStore) {
    let updated = store.with_person_removed("3", "1").expect("remove");
    assert_eq!(updated.len(), 3);
    assert!(updated.get("3").is_none());
}

#[rstest]
#[case("1", DomainError::RootPersonRemoval("1".into()))]
#[case("2", DomainError::PersonHasChildren { person_id: "2".into(), children: 1 })]
#[case("999", DomainError::PersonNotFound("999".into()))]
fn given_protected_person_when_removing_then_rejects(
    store: PersonStore,
    #[case] id: &str,
    #[case] expected: DomainError,
) {
    assert_eq!(store.with_person_removed(id, "1"), Err(expected));
}

// ============================================================
// validation
// ============================================================

#[rstest]
fn given_valid_store_when_validating_then_ok(store: PersonStore) {
    assert_eq!(validate_people(store.people()), Ok(()));
    assert_eq!(find_cycle(store.people()), None);
}

#[test]
fn given_duplicate_ids_when_validating_then_rejects() {
    let people = vec![Person::new("1", "A", 1900), Person::new("1", "B", 1901)];
    assert_eq!(
        validate_people(&people),
        Err(DomainError::DuplicatePersonId("1".into()))
    );
}

#[test]
fn given_self_parent_when_validating_then_rejects() {
    let people = vec![Person::new("1", "A", 1900).with_parent("1")];
    assert_eq!(
        validate_people(&people),
        Err(DomainError::CycleDetected("1".into()))
    );
}

#[test]
fn given_longer_cycle_when_validating_then_rejects() {
    let people = vec![
        Person::new("r", "Root", 1880),
        Person::new("a", "A", 1900).with_parent("c"),
        Person::new("b", "B", 1920).with_parent("a"),
        Person::new("c", "C", 1940).with_parent("b"),
    ];
    assert!(matches!(
        validate_people(&people),
        Err(DomainError::CycleDetected(_))
    ));
}

#[test]
fn given_dangling_parent_when_validating_then_tolerates() {
    let people = vec![Person::new("1", "A", 1900).with_parent("gone")];
    assert_eq!(validate_people(&people), Ok(()));
}

#[rstest]
#[case("4", "1", true)]
#[case("4", "2", true)]
#[case("3", "2", false)]
#[case("1", "4", false)]
#[case("999", "1", false)]
fn given_pair_when_checking_descent_then_follows_parent_chain(
    store: PersonStore,
    #[case] candidate: &str,
    #[case] ancestor: &str,
    #[case] expected: bool,
) {
    assert_eq!(is_descendant_of(store.people(), candidate, ancestor), expected);
}

#[rstest]
fn given_person_when_listing_eligible_parents_then_excludes_self_and_descendants(
    store: PersonStore,
) {
    let candidates = eligible_parents(store.people(), "2");
    assert_eq!(ids(&candidates), vec!["1", "3"]);
}
