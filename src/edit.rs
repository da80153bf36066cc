//! Command-line editing of the stored document.
//!
//! Each invocation is one admin session: the document is resolved once, one
//! mutation is applied and written, and the affected list is printed.

use crate::{
    admin::{AdminEditor, Collection},
    cli::{ClientCommand, DeleteArgs, ExperienceCommand, PhotoCommand, ProjectCommand, SlideCommand},
    data::{Document, DocumentStore, KvStorage},
    log,
};
use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

/// Outcome of asking before a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    Yes,
    No,
}

pub fn slide<S: KvStorage>(store: DocumentStore<S>, cmd: &SlideCommand) -> Result<()> {
    let mut editor = AdminEditor::open(store);
    match cmd {
        SlideCommand::Add { src, kind } => {
            editor.add_slide(src, kind.as_deref())?;
        }
        SlideCommand::List => {}
        SlideCommand::Delete(args) => {
            if confirmed(args, Collection::Slides, &editor)? {
                editor.delete_slide(args.index)?;
            }
        }
    }
    print_list(&editor, Collection::Slides);
    Ok(())
}

pub fn photo<S: KvStorage>(store: DocumentStore<S>, cmd: &PhotoCommand) -> Result<()> {
    let mut editor = AdminEditor::open(store);
    match cmd {
        PhotoCommand::Set { uri } => editor.set_photo(uri)?,
        PhotoCommand::Reset => editor.reset_photo()?,
    };
    print_list(&editor, Collection::Photo);
    Ok(())
}

pub fn experience<S: KvStorage>(store: DocumentStore<S>, cmd: &ExperienceCommand) -> Result<()> {
    let mut editor = AdminEditor::open(store);
    match cmd {
        ExperienceCommand::Add {
            start,
            end,
            company,
            role,
        } => {
            editor.add_experience(start, end, company, role)?;
        }
        ExperienceCommand::List => {}
        ExperienceCommand::Delete(args) => {
            if confirmed(args, Collection::Experience, &editor)? {
                editor.delete_experience(args.index)?;
            }
        }
    }
    print_list(&editor, Collection::Experience);
    Ok(())
}

pub fn project<S: KvStorage>(store: DocumentStore<S>, cmd: &ProjectCommand) -> Result<()> {
    let mut editor = AdminEditor::open(store);
    match cmd {
        ProjectCommand::Add {
            img,
            link,
            category,
        } => {
            editor.add_project(img, link, category)?;
        }
        ProjectCommand::List => {}
        ProjectCommand::Delete(args) => {
            if confirmed(args, Collection::Projects, &editor)? {
                editor.delete_project(args.index)?;
            }
        }
    }
    print_list(&editor, Collection::Projects);
    Ok(())
}

pub fn client<S: KvStorage>(store: DocumentStore<S>, cmd: &ClientCommand) -> Result<()> {
    let mut editor = AdminEditor::open(store);
    match cmd {
        ClientCommand::Add { uri } => {
            editor.add_client(uri)?;
        }
        ClientCommand::List => {}
        ClientCommand::Delete(args) => {
            if confirmed(args, Collection::Clients, &editor)? {
                editor.delete_client(args.index)?;
            }
        }
    }
    print_list(&editor, Collection::Clients);
    Ok(())
}

/// The resolved document as pretty JSON.
pub fn export<S: KvStorage>(store: &DocumentStore<S>) -> Result<String> {
    if store.is_pristine() {
        log!("store"; "nothing stored under `{}` yet, exporting defaults", store.key());
    }
    Ok(serde_json::to_string_pretty(&store.resolve())?)
}

/// Replace the stored document with the contents of a JSON file.
///
/// The file is parsed first; nothing is written if it is not a document.
pub fn import<S: KvStorage>(store: &DocumentStore<S>, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let doc: Document = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a site document", file.display()))?;
    store.write(&doc)?;
    log!("store"; "imported {}", file.display());
    Ok(())
}

fn print_list<S: KvStorage>(editor: &AdminEditor<S>, collection: Collection) {
    let rows = editor.list(collection);
    if rows.is_empty() {
        println!("(no {collection} entries)");
    }
    for row in rows {
        println!("{:>3}  {}", row.index, row.label);
    }
}

/// Ask on the terminal unless `--yes` was given.
fn confirmed<S: KvStorage>(
    args: &DeleteArgs,
    collection: Collection,
    editor: &AdminEditor<S>,
) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    let label = editor
        .list(collection)
        .into_iter()
        .find(|row| row.index == args.index)
        .map_or_else(|| format!("#{}", args.index), |row| row.label);
    let prompt = format!("Delete {collection} {label}?");

    let answer = ask(&prompt, &mut io::stdin().lock(), &mut io::stdout())?;
    if answer == Confirm::No {
        log!("admin"; "kept {collection} #{}", args.index);
    }
    Ok(answer == Confirm::Yes)
}

fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<Confirm> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirm::Yes,
        _ => Confirm::No,
    })
}
