// Catalog operations: the three menu use-cases plus project lookup.
// Each operation mutates the in-memory catalog; the ones that finish a menu
// action also persist it through the `ProjectStore` exactly once.

use crate::error::CatalogError;
use crate::images::ImageFolder;
use crate::indices::parse_index_range;
use crate::slug::{slugify, title_from_slug};
use crate::store::{next_project_id, Media, Project, ProjectStore};
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Why an index was passed over during assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Skip {
    /// No `<index>.<ext>` file exists.
    Missing { index: u32 },
    /// The canonical name is already taken; nothing was overwritten.
    Collision { index: u32, filename: String },
}

/// What an assignment did, in processing order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AssignReport {
    pub renamed: Vec<(String, String)>,
    pub skipped: Vec<Skip>,
}

/// Answers collected for a brand-new project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub tags: String,
    pub year: String,
    pub description: String,
}

/// A set of pre-named files that could become a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGroup {
    pub slug: String,
    pub files: Vec<String>,
}

impl ImageGroup {
    pub fn title_guess(&self) -> String {
        title_from_slug(&self.slug)
    }
}

/// Position of the first project whose title contains `query`, ignoring case.
pub fn find_project(projects: &[Project], query: &str) -> Option<usize> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .position(|p| p.title().to_lowercase().contains(&query))
}

/// Rename the numbered images listed in `indices_input` into the project's
/// naming scheme, attach them as media and save the catalog.
pub fn assign_images(
    projects: &mut [Project],
    target: usize,
    indices_input: &str,
    images: &ImageFolder,
    store: &ProjectStore,
) -> Result<AssignReport, CatalogError> {
    let indices = parse_index_range(indices_input)?;
    let mut report = AssignReport::default();

    let project = &mut projects[target];
    let project_slug = slugify(project.title());
    for index in indices {
        let Some(source) = images.find_by_index(index) else {
            warn!("image for index {index} not found in {}", images.dir().display());
            report.skipped.push(Skip::Missing { index });
            continue;
        };

        let extension = Path::new(&source)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let destination = format!("{project_slug}-{}{extension}", project.media_count() + 1);
        if images.exists(&destination) {
            warn!("'{destination}' already exists, skipping index {index}");
            report.skipped.push(Skip::Collision {
                index,
                filename: destination,
            });
            continue;
        }

        images.rename(&source, &destination)?;
        project.push_media(Media::image(images.media_url(&destination)));
        report.renamed.push((source, destination));
    }
    project.ensure_cover();

    store.save(projects)?;
    Ok(report)
}

/// Validate `draft` and append it as a new project. The catalog is not
/// saved; the caller follows up with an assignment that does.
pub fn create_project(projects: &mut Vec<Project>, draft: ProjectDraft) -> Result<usize, CatalogError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(CatalogError::MissingTitle);
    }
    let year = parse_year(&draft.year)?;

    let project = Project::new(
        next_project_id(projects),
        title.to_string(),
        split_tags(&draft.tags),
        year,
        draft.description,
        Vec::new(),
    );
    info!("created project {} '{}'", project.id(), project.title());
    projects.push(project);
    Ok(projects.len() - 1)
}

/// Pre-named groups in the image folder whose slug does not already belong
/// to a project.
pub fn discover_groups(projects: &[Project], images: &ImageFolder) -> Result<Vec<ImageGroup>, CatalogError> {
    let existing: HashSet<String> = projects.iter().map(|p| slugify(p.title())).collect();
    let groups: BTreeMap<String, Vec<String>> = images.scan_groups()?;
    Ok(groups
        .into_iter()
        .filter(|(slug, _)| !existing.contains(slug))
        .map(|(slug, files)| ImageGroup { slug, files })
        .collect())
}

/// Turn an accepted group into a project and append it. Tags start with the
/// group's slug, followed by `extra_tags`.
pub fn ingest_group(
    projects: &mut Vec<Project>,
    group: &ImageGroup,
    extra_tags: &str,
    year: &str,
    description: &str,
    images: &ImageFolder,
) -> Result<usize, CatalogError> {
    let year = parse_year(year)?;

    let mut tags = vec![group.slug.clone()];
    tags.extend(split_tags(extra_tags));

    let mut files = group.files.clone();
    files.sort();

    let mut project = Project::new(
        next_project_id(projects),
        group.title_guess(),
        tags,
        year,
        description.to_string(),
        files.iter().map(|f| Media::image(images.media_url(f))).collect(),
    );
    project.ensure_cover();
    info!(
        "ingested group '{}' as {} with {} image(s)",
        group.slug,
        project.id(),
        project.media_count()
    );
    projects.push(project);
    Ok(projects.len() - 1)
}

fn parse_year(raw: &str) -> Result<i32, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidYear(raw.trim().to_string()))
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::default_layout;
    use anyhow::Result;
    use serde_json::json;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn setup(files: &[&str]) -> Result<(TempDir, ImageFolder, ProjectStore)> {
        let dir = tempdir()?;
        let image_dir = dir.path().join("images");
        fs::create_dir_all(&image_dir)?;
        for name in files {
            fs::write(image_dir.join(name), *name)?;
        }
        let images = ImageFolder::new(&image_dir, "/images/portfolio");
        let store = ProjectStore::new(dir.path().join("projects.json"));
        Ok((dir, images, store))
    }

    fn project(title: &str) -> Project {
        Project::new("proj-001".into(), title.into(), Vec::new(), 2020, String::new(), Vec::new())
    }

    #[test]
    fn find_project_matches_substring_case_insensitively() {
        let projects = vec![project("Lebus House"), project("Villa Rosa")];
        assert_eq!(find_project(&projects, "rosa"), Some(1));
        assert_eq!(find_project(&projects, "  LEBUS "), Some(0));
        assert_eq!(find_project(&projects, "tower"), None);
    }

    #[test]
    fn assign_numbers_consecutively_after_existing_media() -> Result<()> {
        let (_dir, images, store) = setup(&["3.jpg", "4.png", "lebus-house-1.jpg"])?;
        let mut existing = project("Lebus House");
        existing.push_media(Media::image("/images/portfolio/lebus-house-1.jpg"));
        existing.ensure_cover();
        let mut projects = vec![existing];

        let report = assign_images(&mut projects, 0, "3-4", &images, &store)?;

        assert_eq!(
            report.renamed,
            vec![
                ("3.jpg".to_string(), "lebus-house-2.jpg".to_string()),
                ("4.png".to_string(), "lebus-house-3.png".to_string()),
            ]
        );
        assert!(images.exists("lebus-house-2.jpg"));
        assert!(images.exists("lebus-house-3.png"));
        assert!(!images.exists("3.jpg"));
        assert_eq!(projects[0].media_count(), 3);
        assert_eq!(projects[0].cover_image_url(), "/images/portfolio/lebus-house-1.jpg");
        assert_eq!(store.load()?, projects);
        Ok(())
    }

    #[test]
    fn assign_skips_missing_indices() -> Result<()> {
        let (_dir, images, store) = setup(&["5.gif"])?;
        let mut projects = vec![project("Tower")];

        let report = assign_images(&mut projects, 0, "4, 5", &images, &store)?;

        assert_eq!(report.skipped, vec![Skip::Missing { index: 4 }]);
        assert_eq!(report.renamed, vec![("5.gif".to_string(), "tower-1.gif".to_string())]);
        assert_eq!(projects[0].cover_image_url(), "/images/portfolio/tower-1.gif");
        Ok(())
    }

    #[test]
    fn assign_never_overwrites_existing_destination() -> Result<()> {
        let (_dir, images, store) = setup(&["9.jpg", "tower-1.jpg"])?;
        let mut projects = vec![project("Tower")];

        let report = assign_images(&mut projects, 0, "9", &images, &store)?;

        assert_eq!(
            report.skipped,
            vec![Skip::Collision {
                index: 9,
                filename: "tower-1.jpg".into()
            }]
        );
        assert!(report.renamed.is_empty());
        assert_eq!(fs::read_to_string(images.path_of("tower-1.jpg"))?, "tower-1.jpg");
        assert!(images.exists("9.jpg"));
        assert_eq!(projects[0].media_count(), 0);
        assert!(projects[0].cover_image_url().is_empty());
        Ok(())
    }

    #[test]
    fn assign_with_bad_range_touches_nothing() -> Result<()> {
        let (_dir, images, store) = setup(&["1.jpg"])?;
        let mut projects = vec![project("Tower")];

        let err = assign_images(&mut projects, 0, "1, abc", &images, &store).unwrap_err();

        assert!(matches!(err, CatalogError::InvalidIndexRange(_)));
        assert!(images.exists("1.jpg"));
        assert!(!store.path().exists());
        assert_eq!(projects[0].media_count(), 0);
        Ok(())
    }

    #[test]
    fn assign_to_hand_edited_project_keeps_its_other_keys() -> Result<()> {
        let (_dir, images, store) = setup(&["2.png"])?;
        let sparse: Project = serde_json::from_value(json!({
            "id": "proj-004",
            "title": "Tower",
            "coverImageUrl": null,
            "year": "2019",
            "featured": true
        }))?;
        let mut projects = vec![sparse];

        assign_images(&mut projects, 0, "2", &images, &store)?;

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        assert_eq!(
            written,
            json!([{
                "id": "proj-004",
                "title": "Tower",
                "coverImageUrl": "/images/portfolio/tower-1.png",
                "year": "2019",
                "featured": true,
                "media": [{ "type": "image", "url": "/images/portfolio/tower-1.png" }]
            }])
        );
        Ok(())
    }

    #[test]
    fn create_project_assigns_next_id_and_defaults() -> Result<()> {
        let mut projects = vec![project("Existing")];
        let draft = ProjectDraft {
            title: "  Lebus House ".into(),
            tags: "residential, , concrete ".into(),
            year: " 2022".into(),
            description: "A home.".into(),
        };

        let position = create_project(&mut projects, draft)?;

        let created = &projects[position];
        assert_eq!(created.id(), "proj-002");
        assert_eq!(created.title(), "Lebus House");
        assert_eq!(created.tags(), vec!["residential", "concrete"]);
        assert_eq!(created.year(), Some(2022));
        assert_eq!(created.media_count(), 0);
        assert!(created.cover_image_url().is_empty());
        let written = serde_json::to_value(created)?;
        assert_eq!(written["chaosLayout"], default_layout());
        assert_eq!(written["projectUrl"], json!(""));
        Ok(())
    }

    #[test]
    fn create_project_rejects_missing_title_and_bad_year() {
        let mut projects = Vec::new();
        let blank = ProjectDraft {
            title: "   ".into(),
            year: "2020".into(),
            ..ProjectDraft::default()
        };
        assert!(matches!(create_project(&mut projects, blank), Err(CatalogError::MissingTitle)));

        let bad_year = ProjectDraft {
            title: "Tower".into(),
            year: "twenty".into(),
            ..ProjectDraft::default()
        };
        assert!(matches!(
            create_project(&mut projects, bad_year),
            Err(CatalogError::InvalidYear(y)) if y == "twenty"
        ));
        assert!(projects.is_empty());
    }

    #[test]
    fn discover_excludes_groups_owned_by_projects() -> Result<()> {
        let (_dir, images, _store) = setup(&["villa-2.jpg", "villa-1.jpg", "lebus-house-1.png", "12.png"])?;
        let projects = vec![project("Lebus House")];

        let groups = discover_groups(&projects, &images)?;

        assert_eq!(
            groups,
            vec![ImageGroup {
                slug: "villa".into(),
                files: vec!["villa-1.jpg".into(), "villa-2.jpg".into()],
            }]
        );
        Ok(())
    }

    #[test]
    fn ingest_group_builds_project_from_files() -> Result<()> {
        let (_dir, images, _store) = setup(&[])?;
        let mut projects = vec![project("Existing")];
        let group = ImageGroup {
            slug: "villa-rosa".into(),
            files: vec!["villa-rosa-2.jpg".into(), "villa-rosa-1.jpg".into()],
        };

        let position = ingest_group(&mut projects, &group, "coastal, ", "2019", "By the sea.", &images)?;

        let created = &projects[position];
        assert_eq!(created.id(), "proj-002");
        assert_eq!(created.title(), "Villa Rosa");
        assert_eq!(created.tags(), vec!["villa-rosa", "coastal"]);
        assert_eq!(
            created.media(),
            vec![
                Media::image("/images/portfolio/villa-rosa-1.jpg"),
                Media::image("/images/portfolio/villa-rosa-2.jpg"),
            ]
        );
        assert_eq!(created.cover_image_url(), "/images/portfolio/villa-rosa-1.jpg");
        Ok(())
    }

    #[test]
    fn ingest_group_rejects_bad_year() -> Result<()> {
        let (_dir, images, _store) = setup(&[])?;
        let mut projects = Vec::new();
        let group = ImageGroup {
            slug: "villa".into(),
            files: vec!["villa-1.jpg".into()],
        };
        let result = ingest_group(&mut projects, &group, "", "soon", "", &images);
        assert!(matches!(result, Err(CatalogError::InvalidYear(_))));
        assert!(projects.is_empty());
        Ok(())
    }
}
