// Project store: the catalog data shape and its JSON persistence.
// The whole catalog is read at the start of each menu cycle and written back
// in full after an operation succeeds.

use crate::error::CatalogError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ID_PREFIX: &str = "proj-";

/// One portfolio entry.
///
/// The JSON object is kept exactly as it was read (key order, nulls, keys
/// this tool does not know about) and the fields the catalog operations need
/// are read through accessors that tolerate missing or oddly typed values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Project {
    fields: Map<String, Value>,
}

impl Project {
    /// A fresh project with every key the site expects, in its usual order.
    pub fn new(id: String, title: String, tags: Vec<String>, year: i32, description: String, media: Vec<Media>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), Value::String(id));
        fields.insert("title".into(), Value::String(title));
        fields.insert("tags".into(), json!(tags));
        fields.insert("year".into(), json!(year));
        fields.insert("description".into(), Value::String(description));
        fields.insert("coverImageUrl".into(), Value::String(String::new()));
        fields.insert("media".into(), Value::Array(media.iter().map(Media::to_value).collect()));
        fields.insert("projectUrl".into(), Value::String(String::new()));
        fields.insert("chaosLayout".into(), default_layout());
        Project { fields }
    }

    pub fn id(&self) -> &str {
        self.str_field("id")
    }

    pub fn title(&self) -> &str {
        self.str_field("title")
    }

    pub fn cover_image_url(&self) -> &str {
        self.str_field("coverImageUrl")
    }

    pub fn tags(&self) -> Vec<&str> {
        self.fields
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The year, whether stored as a number or as numeric text.
    pub fn year(&self) -> Option<i64> {
        match self.fields.get("year") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn media(&self) -> Vec<Media> {
        self.media_items()
            .iter()
            .filter_map(|item| Media::deserialize(item).ok())
            .collect()
    }

    pub fn media_count(&self) -> usize {
        self.media_items().len()
    }

    pub fn push_media(&mut self, media: Media) {
        let entry = media.to_value();
        match self.fields.get_mut("media") {
            Some(Value::Array(items)) => items.push(entry),
            _ => {
                self.fields.insert("media".into(), Value::Array(vec![entry]));
            }
        }
    }

    /// Fill an empty cover from the first media entry, if there is one.
    pub fn ensure_cover(&mut self) {
        if !self.cover_image_url().is_empty() {
            return;
        }
        let first_url = self
            .media_items()
            .first()
            .and_then(|item| item.get("url"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        if let Some(url) = first_url {
            self.fields.insert("coverImageUrl".into(), Value::String(url));
        }
    }

    fn media_items(&self) -> &[Value] {
        self.fields
            .get("media")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Media {
    #[serde(rename = "type", default = "image_kind")]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

fn image_kind() -> String {
    "image".into()
}

impl Media {
    pub fn image(url: impl Into<String>) -> Self {
        Media {
            kind: image_kind(),
            url: url.into(),
        }
    }

    fn to_value(&self) -> Value {
        json!({ "type": self.kind, "url": self.url })
    }
}

/// Layout given to projects created by this tool.
pub fn default_layout() -> Value {
    json!({ "x": 100, "y": 100, "width": "350px", "rotation": 0 })
}

/// Reads and writes the catalog JSON file.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProjectStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog. A missing file, or one that is not JSON at all,
    /// gives an empty catalog. A file that cannot be read, or JSON that is
    /// not a list of objects, is an error so it never gets overwritten.
    pub fn load(&self) -> Result<Vec<Project>, CatalogError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CatalogError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let value: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                warn!("discarding malformed catalog {}: {e}", self.path.display());
                return Ok(Vec::new());
            }
        };
        serde_json::from_value(value).map_err(|e| CatalogError::CatalogShape {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Overwrite the catalog file with `projects`, two-space indented.
    pub fn save(&self, projects: &[Project]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut body = serde_json::to_string_pretty(projects)?;
        body.push('\n');
        fs::write(&self.path, body)?;
        info!("saved {} project(s) to {}", projects.len(), self.path.display());
        Ok(())
    }
}

/// Next free `proj-NNN` id: one past the largest numeric suffix in use.
///
/// Only the digits between `proj-` and the next hyphen count, so
/// `proj-3-draft` still reserves 3.
pub fn next_project_id(projects: &[Project]) -> String {
    let max = projects
        .iter()
        .filter_map(|p| id_number(p.id()))
        .max()
        .unwrap_or(0);
    format!("{ID_PREFIX}{:03}", u128::from(max) + 1)
}

fn id_number(id: &str) -> Option<u64> {
    let suffix = id.strip_prefix(ID_PREFIX)?;
    let digits = suffix.split('-').next()?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("ignoring id '{id}': number too large");
            None
        }
    }
}
