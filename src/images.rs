// Image folder access: locating numbered uploads, scanning pre-named groups
// and renaming files in place. Only a handful of filesystem primitives are
// needed (existence checks, directory listing and rename).

use crate::error::CatalogError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions tried for a numbered image, highest priority first.
pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".svg", ".gif"];

static GROUPED_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z0-9-]+)-\d+\..+$").unwrap());

/// The folder holding portfolio images plus the web path it is served under.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    dir: PathBuf,
    url_prefix: String,
}

impl ImageFolder {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        ImageFolder {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_of(filename).exists()
    }

    /// Find the file for a bare numeric index, e.g. `24.png`.
    pub fn find_by_index(&self, index: u32) -> Option<String> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| format!("{index}{ext}"))
            .find(|name| self.exists(name))
    }

    /// Web-rooted URL for a file in this folder.
    pub fn media_url(&self, filename: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), filename)
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<(), CatalogError> {
        let from = self.path_of(from);
        let to = self.path_of(to);
        debug!("renaming {} -> {}", from.display(), to.display());
        fs::rename(&from, &to).map_err(|source| CatalogError::Rename { from, to, source })
    }

    /// Group files named `<slug>-<n>.<ext>` by slug. Filenames inside each
    /// group are sorted.
    pub fn scan_groups(&self) -> Result<BTreeMap<String, Vec<String>>, CatalogError> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Some(caps) = GROUPED_FILE.captures(&name) {
                let slug = caps[1].to_string();
                groups.entry(slug).or_default().push(name);
            }
        }
        for files in groups.values_mut() {
            files.sort();
        }
        debug!("found {} pre-named group(s) in {}", groups.len(), self.dir.display());
        Ok(groups)
    }
}
