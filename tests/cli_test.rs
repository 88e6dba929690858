//! CLI parsing and command dispatch against a temporary data directory

use std::sync::Arc;

use clap::Parser;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use famtree::cli::args::{Cli, Commands, PersonCommands, QueryCommands, TreeCommands};
use famtree::cli::{execute_command, CliError};
use famtree::config::Settings;
use famtree::exitcode;
use famtree::infrastructure::di::ServiceContainer;
use famtree::infrastructure::traits::RealFileSystem;
use famtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

struct Env {
    _temp: TempDir,
    container: ServiceContainer,
}

#[fixture]
fn env() -> Env {
    let temp = TempDir::new().unwrap();
    let settings = Settings::default().with_base_dir(temp.path());
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));
    Env {
        _temp: temp,
        container,
    }
}

fn run(env: &Env, args: &[&str]) -> Result<(), CliError> {
    let argv = std::iter::once("famtree").chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).expect("arguments parse");
    execute_command(&cli, &env.container)
}

// ============================================================
// parsing
// ============================================================

#[test]
fn given_person_add_when_parsing_then_fills_fields() {
    let cli = Cli::try_parse_from([
        "famtree", "person", "add", "demo", "--name", "Eve", "--birth-year", "1990",
        "--parent", "person-4", "--notes", "twin",
    ])
    .expect("parse");

    match cli.command {
        Some(Commands::Person {
            command:
                PersonCommands::Add {
                    tree,
                    name,
                    birth_year,
                    parent,
                    id,
                    fields,
                    ..
                },
        }) => {
            assert_eq!(tree, "demo");
            assert_eq!(name, "Eve");
            assert_eq!(birth_year, 1990);
            assert_eq!(parent.as_deref(), Some("person-4"));
            assert!(id.is_none());
            assert_eq!(fields.notes.as_deref(), Some("twin"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_negative_birth_year_when_parsing_then_accepted() {
    let cli = Cli::try_parse_from([
        "famtree", "tree", "new", "Antiquity", "--root-name", "Ur", "--root-birth-year", "-500",
    ])
    .expect("parse");

    assert!(matches!(
        cli.command,
        Some(Commands::Tree {
            command: TreeCommands::New { root_birth_year: -500, .. }
        })
    ));
}

#[test]
fn given_repeated_debug_flag_when_parsing_then_counts() {
    let cli = Cli::try_parse_from(["famtree", "-dd", "tree", "list"]).expect("parse");
    assert_eq!(cli.debug, 2);
}

#[rstest]
#[case(&["famtree", "query", "relatives", "t", "p", "--depth", "1", "--all"])]
#[case(&["famtree", "person", "edit", "t", "p", "--parent", "x", "--no-parent"])]
#[case(&["famtree", "person", "edit", "t", "p", "--death-year", "1990", "--alive"])]
#[case(&["famtree", "tree", "show", "t", "--layout"])]
fn given_conflicting_flags_when_parsing_then_rejected(#[case] argv: &[&str]) {
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn given_relatives_without_depth_when_parsing_then_depth_is_none() {
    let cli = Cli::try_parse_from(["famtree", "query", "relatives", "t", "p"]).expect("parse");
    assert!(matches!(
        cli.command,
        Some(Commands::Query {
            command: QueryCommands::Relatives { depth: None, all: false, .. }
        })
    ));
}

// ============================================================
// dispatch
// ============================================================

#[rstest]
fn given_sample_tree_when_running_queries_then_succeed(env: Env) {
    run(&env, &["tree", "sample", "--id", "demo"]).expect("sample");

    for args in [
        vec!["tree", "list"],
        vec!["tree", "show", "demo"],
        vec!["tree", "show", "demo", "--root", "person-2", "--json", "--layout"],
        vec!["person", "show", "demo", "person-1"],
        vec!["person", "parents", "demo", "person-2"],
        vec!["query", "ancestors", "demo", "person-4"],
        vec!["query", "descendants", "demo", "person-1"],
        vec!["query", "relatives", "demo", "person-1"],
        vec!["query", "lineage", "demo", "person-1", "--depth", "1"],
        vec!["query", "relationship", "demo", "person-1", "person-5"],
        vec!["query", "age", "demo", "person-1"],
    ] {
        run(&env, &args).unwrap_or_else(|e| panic!("{args:?} failed: {e}"));
    }
}

#[rstest]
fn given_edit_command_when_running_then_merges_onto_existing_person(env: Env) {
    // Arrange
    run(&env, &["tree", "sample", "--id", "demo"]).expect("sample");

    // Act
    run(
        &env,
        &["person", "edit", "demo", "person-5", "--parent", "person-2", "--notes", "moved"],
    )
    .expect("edit");

    // Assert
    let person = env.container.trees.person("demo", "person-5").expect("person");
    assert_eq!(person.name, "Grandchild 2");
    assert_eq!(person.birth_year, 1965);
    assert_eq!(person.parent_id.as_deref(), Some("person-2"));
    assert_eq!(person.notes.as_deref(), Some("moved"));
}

#[rstest]
fn given_add_without_id_when_running_then_generates_person_id(env: Env) {
    run(
        &env,
        &["tree", "new", "Family", "--id", "fam", "--root-name", "Founder", "--root-birth-year", "1850", "--root-id", "f"],
    )
    .expect("new tree");

    run(&env, &["person", "add", "fam", "--name", "Heir", "--birth-year", "1880", "--parent", "f"])
        .expect("add");

    let people = env.container.trees.load("fam").expect("load").people;
    assert_eq!(people.len(), 2);
    assert!(people[1].id.starts_with("person-"));
    assert_eq!(people[1].parent_id.as_deref(), Some("f"));
}

#[rstest]
#[case(&["tree", "show", "missing"], exitcode::NOINPUT)]
#[case(&["person", "delete", "demo", "person-1"], exitcode::DATAERR)]
#[case(&["person", "show", "demo", "ghost"], exitcode::NOINPUT)]
#[case(&["person", "parents", "demo", "ghost"], exitcode::NOINPUT)]
#[case(&["tree", "show", "../etc"], exitcode::USAGE)]
#[case(
    &["person", "add", "demo", "--id", "x", "--parent", "x", "--name", "X", "--birth-year", "1950"],
    exitcode::DATAERR
)]
fn given_failing_command_when_running_then_maps_exit_code(
    env: Env,
    #[case] args: &[&str],
    #[case] expected: i32,
) {
    run(&env, &["tree", "sample", "--id", "demo"]).expect("sample");

    let err = run(&env, args).unwrap_err();

    assert_eq!(err.exit_code(), expected, "error: {err}");
}

#[rstest]
fn given_no_command_when_running_then_usage_error(env: Env) {
    let cli = Cli::try_parse_from(["famtree"]).expect("parse");
    let err = execute_command(&cli, &env.container).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::USAGE);
}
