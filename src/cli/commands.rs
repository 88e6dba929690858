//! Command dispatch: maps parsed arguments onto service calls

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::family_tree::generate_person_id;
use crate::application::ApplicationError;
use crate::cli::args::{
    Cli, Commands, ConfigCommands, PersonCommands, PersonFields, QueryCommands, TreeCommands,
};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DomainError, Person, Relationship};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{InfraError, InfraResult};

/// Execute a parsed command against the wired services.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { command }) => execute_tree(command, container),
        Some(Commands::Person { command }) => execute_person(command, container),
        Some(Commands::Query { command }) => execute_query(command, container),
        Some(Commands::Config { command }) => execute_config(command, container),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `famtree --help`".to_string(),
        )),
    }
}

// ============================================================
// tree
// ============================================================

fn execute_tree(command: &TreeCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        TreeCommands::New {
            name,
            id,
            description,
            root_name,
            root_birth_year,
            root_death_year,
            root_id,
        } => {
            let mut root = Person::new(
                root_id.clone().unwrap_or_else(generate_person_id),
                root_name.as_str(),
                *root_birth_year,
            );
            root.death_year = *root_death_year;
            let document =
                container
                    .trees
                    .create_tree(name, description.clone(), root, id.clone())?;
            output::action("Created", &format!("{} ({})", document.name, document.id));
            Ok(())
        }
        TreeCommands::Sample { id } => {
            let document = container.trees.create_sample_tree(id.clone())?;
            output::action("Created", &format!("{} ({})", document.name, document.id));
            Ok(())
        }
        TreeCommands::List => {
            let ids = container.trees.list_trees()?;
            if ids.is_empty() {
                output::info(&"No trees found.");
            }
            for id in ids {
                output::info(&id);
            }
            Ok(())
        }
        TreeCommands::Show {
            tree,
            root,
            json,
            layout,
        } => show_tree(container, tree, root.as_deref(), *json, *layout),
        TreeCommands::Delete { tree } => {
            container.trees.delete_tree(tree)?;
            output::action("Deleted", tree);
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn show_tree(
    container: &ServiceContainer,
    tree_id: &str,
    root: Option<&str>,
    json: bool,
    layout: bool,
) -> CliResult<()> {
    let layout_config = layout.then_some(&container.settings.layout);
    let view = container.trees.display_tree(tree_id, root, layout_config)?;

    if json {
        let rendered = serde_json::to_string_pretty(&view.root)
            .map_err(|e| InfraError::serialization(format!("render tree {tree_id}"), e))?;
        output::info(&rendered);
        return Ok(());
    }

    output::header(&view.tree_name);
    output::info(&output::to_termtree(&view.root));
    debug!(
        "rendered {} persons over {} generations",
        view.root.size(),
        view.root.depth()
    );
    Ok(())
}

// ============================================================
// person
// ============================================================

fn apply_fields(person: &mut Person, fields: &PersonFields) {
    if let Some(spouse) = &fields.spouse {
        person.spouse_id = Some(spouse.clone());
    }
    if let Some(url) = &fields.image_url {
        person.image_url = Some(url.clone());
    }
    if let Some(notes) = &fields.notes {
        person.notes = Some(notes.clone());
    }
}

fn execute_person(command: &PersonCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        PersonCommands::Add {
            tree,
            name,
            birth_year,
            death_year,
            parent,
            id,
            fields,
        } => {
            let mut person = Person::new(
                id.clone().unwrap_or_else(generate_person_id),
                name.as_str(),
                *birth_year,
            );
            person.death_year = *death_year;
            person.parent_id = parent.clone();
            apply_fields(&mut person, fields);

            let label = output::person_label(&person);
            container.trees.add_person(tree, person)?;
            output::action("Added", &label);
            Ok(())
        }
        PersonCommands::Edit {
            tree,
            id,
            name,
            birth_year,
            death_year,
            alive,
            parent,
            no_parent,
            fields,
        } => {
            let mut person = container.trees.person(tree, id)?;
            if let Some(name) = name {
                person.name = name.clone();
            }
            if let Some(year) = birth_year {
                person.birth_year = *year;
            }
            if *alive {
                person.death_year = None;
            } else if death_year.is_some() {
                person.death_year = *death_year;
            }
            if *no_parent {
                person.parent_id = None;
            } else if parent.is_some() {
                person.parent_id = parent.clone();
            }
            apply_fields(&mut person, fields);

            let label = output::person_label(&person);
            container.trees.edit_person(tree, person)?;
            output::action("Updated", &label);
            Ok(())
        }
        PersonCommands::Delete { tree, id } => {
            container.trees.delete_person(tree, id)?;
            output::action("Deleted", id);
            Ok(())
        }
        PersonCommands::Show { tree, id } => {
            let person = container.trees.person(tree, id)?;
            print_person(&person);
            Ok(())
        }
        PersonCommands::Parents { tree, id } => {
            // unknown ids would otherwise list everyone
            container.trees.person(tree, id)?;
            let candidates = container.trees.eligible_parents(tree, id)?;
            output::header(&format!("Eligible parents for {id}"));
            output::person_list(&candidates, "  (none)");
            Ok(())
        }
    }
}

fn print_person(person: &Person) {
    output::header(&person.name);
    output::detail(&format!("id:     {}", person.id));
    output::detail(&format!("born:   {}", person.birth_year));
    if let Some(year) = person.death_year {
        output::detail(&format!("died:   {year}"));
    }
    output::detail(&format!(
        "parent: {}",
        person.parent_id.as_deref().unwrap_or("-")
    ));
    if let Some(spouse) = &person.spouse_id {
        output::detail(&format!("spouse: {spouse}"));
    }
    if let Some(url) = &person.image_url {
        output::detail(&format!("image:  {url}"));
    }
    if let Some(notes) = &person.notes {
        output::detail(&format!("notes:  {notes}"));
    }
}

// ============================================================
// query
// ============================================================

fn execute_query(command: &QueryCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        QueryCommands::Ancestors { tree, id } => {
            let ancestors = container.trees.ancestors(tree, id)?;
            output::header(&format!("Ancestors of {id}"));
            output::person_list(&ancestors, "  (none)");
            if !ancestors.is_empty() {
                output::info(&output::person_chain(&ancestors));
            }
            Ok(())
        }
        QueryCommands::Descendants { tree, id } => {
            let descendants = container.trees.descendants(tree, id)?;
            output::header(&format!("Descendants of {id}"));
            output::person_list(&descendants, "  (none)");
            Ok(())
        }
        QueryCommands::Relatives {
            tree,
            id,
            depth,
            all,
        } => {
            let depth = if *all {
                None
            } else {
                Some(depth.unwrap_or(container.settings.relatives_depth))
            };
            let relatives = container.trees.relatives(tree, id, depth)?;
            output::header(&format!("Relatives of {id}"));
            output::person_list(&relatives, "  (none)");
            Ok(())
        }
        QueryCommands::Lineage { tree, id, depth } => {
            let lineage = container.trees.lineage(tree, id, *depth)?;
            output::header(&format!("Lineage of {id}"));
            output::person_list(&lineage, "  (none)");
            Ok(())
        }
        QueryCommands::Relationship { tree, a, b } => {
            let relationship = container.trees.relationship(tree, a, b)?;
            match relationship {
                Relationship::Undetermined => output::warning(&relationship),
                _ => output::info(&format!("{a} is {relationship} of {b}")),
            }
            Ok(())
        }
        QueryCommands::Age { tree, id } => {
            let person = container.trees.person(tree, id)?;
            let age = container
                .trees
                .age(tree, id)?
                .ok_or_else(|| ApplicationError::from(DomainError::PersonNotFound(id.clone())))?;
            let verb = if person.is_deceased() { "died at" } else { "is" };
            output::info(&format!("{} {} {}", person.name, verb, age));
            Ok(())
        }
    }
}

// ============================================================
// config
// ============================================================

fn execute_config(command: &ConfigCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::detail(&format!("config: {global}"));
            output::detail(&format!(
                "trees:  {}",
                container.settings.trees_dir().display()
            ));
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".to_string())
            })?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} exists, use --force to overwrite",
                    path.display()
                )));
            }
            write_template(container, &path)?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn write_template(container: &ServiceContainer, path: &Path) -> InfraResult<()> {
    container
        .fs
        .ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    container
        .fs
        .write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))
}
