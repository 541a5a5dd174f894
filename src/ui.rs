// UI layer: the interactive menu built with `dialoguer`.
// Every menu cycle reloads the catalog from disk, runs one action and goes
// back to the menu; catalog errors are printed, never fatal. Only terminal
// I/O failures and a catalog file that cannot be loaded end the loop.

use crate::catalog::{
    assign_images, create_project, discover_groups, find_project, ingest_group, AssignReport, ProjectDraft, Skip,
};
use crate::config::Config;
use crate::images::ImageFolder;
use crate::store::{Project, ProjectStore};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu(config: &Config) -> Result<()> {
    let store = config.store();
    let images = config.images();
    loop {
        // An unreadable catalog ends the session rather than being saved over.
        let mut projects = store
            .load()
            .with_context(|| format!("cannot open catalog {}", store.path().display()))?;

        println!("\n--- Portfolio Archive Master ---");
        let items = vec![
            "Assign numbered images to an EXISTING project",
            "Create a NEW project (from numbered images)",
            "Discover and ingest pre-named project groups",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_existing(&mut projects, &images, &store)?,
            1 => handle_new(&mut projects, &images, &store)?,
            2 => handle_discover(&mut projects, &images, &store)?,
            3 => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice."),
        }
    }
    Ok(())
}

/// Pick a project by (partial) title and attach images to it.
fn handle_existing(projects: &mut [Project], images: &ImageFolder, store: &ProjectStore) -> Result<()> {
    println!("\nWhich existing project to add images to?");
    for project in projects.iter() {
        println!("  - {}", project.title());
    }
    let query: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;
    match find_project(projects, &query) {
        Some(target) => prompt_assign(projects, target, images, store),
        None => {
            warning("Project not found.");
            Ok(())
        }
    }
}

/// Create a project from prompts, then go straight to image assignment,
/// which is what saves it.
fn handle_new(projects: &mut Vec<Project>, images: &ImageFolder, store: &ProjectStore) -> Result<()> {
    let title: String = Input::new()
        .with_prompt("Enter the new project title")
        .allow_empty(true)
        .interact_text()?;
    if title.trim().is_empty() {
        return Ok(());
    }
    let tags: String = Input::new()
        .with_prompt("Enter tags, comma-separated")
        .allow_empty(true)
        .interact_text()?;
    let year: String = Input::new().with_prompt("Enter year").interact_text()?;
    let description: String = Input::new()
        .with_prompt("Enter description")
        .allow_empty(true)
        .interact_text()?;

    let draft = ProjectDraft {
        title,
        tags,
        year,
        description,
    };
    match create_project(projects, draft) {
        Ok(target) => {
            let project = &projects[target];
            println!("\nProject '{}' created with ID {}.", project.title(), project.id());
            prompt_assign(projects, target, images, store)
        }
        Err(e) => {
            failure(&e.to_string());
            Ok(())
        }
    }
}

fn prompt_assign(projects: &mut [Project], target: usize, images: &ImageFolder, store: &ProjectStore) -> Result<()> {
    let prompt = format!(
        "Enter image indices for '{}' (e.g., '24, 30-35')",
        projects[target].title()
    );
    let input: String = Input::new().with_prompt(prompt).allow_empty(true).interact_text()?;

    match assign_images(projects, target, &input, images, store) {
        Ok(report) => {
            print_report(&report);
            success("Changes have been saved to the catalog.");
        }
        Err(e) => failure(&e.to_string()),
    }
    Ok(())
}

fn print_report(report: &AssignReport) {
    for skip in &report.skipped {
        match skip {
            Skip::Missing { index } => warning(&format!("Image for index {index} not found.")),
            Skip::Collision { filename, .. } => warning(&format!("Filename '{filename}' already exists. Skipping.")),
        }
    }
    for (from, to) in &report.renamed {
        success(&format!("Renamed '{from}' to '{to}'"));
    }
}

/// Offer every unclaimed pre-named group as a new project, then save once.
fn handle_discover(projects: &mut Vec<Project>, images: &ImageFolder, store: &ProjectStore) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Scanning for pre-named project image groups...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let groups = discover_groups(projects, images);
    spinner.finish_and_clear();

    let groups = match groups {
        Ok(groups) => groups,
        Err(e) => {
            failure(&e.to_string());
            return Ok(());
        }
    };
    if groups.is_empty() {
        println!("No new, pre-named project groups found.");
        return Ok(());
    }

    for group in &groups {
        let title = group.title_guess();
        let accepted = Confirm::new()
            .with_prompt(format!(
                "Found group '{}' with {} images. Create project '{title}'?",
                group.slug,
                group.files.len()
            ))
            .default(false)
            .interact()?;
        if !accepted {
            println!("Skipping group '{}'.", group.slug);
            continue;
        }

        let extra_tags: String = Input::new()
            .with_prompt("Enter additional tags, comma-separated")
            .allow_empty(true)
            .interact_text()?;
        let year: String = Input::new().with_prompt("Enter year").interact_text()?;
        let description: String = Input::new()
            .with_prompt("Enter description")
            .allow_empty(true)
            .interact_text()?;

        match ingest_group(projects, group, &extra_tags, &year, &description, images) {
            Ok(_) => success(&format!("Project '{title}' created and ingested.")),
            Err(e) => failure(&format!("{e}; skipping group '{}'.", group.slug)),
        }
    }

    match store.save(projects) {
        Ok(()) => success("Changes have been saved to the catalog."),
        Err(e) => failure(&e.to_string()),
    }
    Ok(())
}

fn success(msg: &str) {
    println!("{} {msg}", "ok:".green());
}

fn warning(msg: &str) {
    println!("{} {msg}", "warning:".yellow());
}

fn failure(msg: &str) {
    println!("{} {msg}", "error:".red());
}
