// Fixed locations the tool works with. `Config::default()` resolves them
// relative to the working directory, which is expected to be the portfolio
// site's checkout.

use crate::images::ImageFolder;
use crate::store::ProjectStore;
use std::path::{Path, PathBuf};

pub const CATALOG_PATH: &str = "data/projects.json";
pub const IMAGE_DIR: &str = "public/images/Thapelo Madiba Masebe Portfolio F";
pub const IMAGE_URL_PREFIX: &str = "/images/Thapelo Madiba Masebe Portfolio F";

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub image_dir: PathBuf,
    pub image_url_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: PathBuf::from(CATALOG_PATH),
            image_dir: PathBuf::from(IMAGE_DIR),
            image_url_prefix: IMAGE_URL_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Same layout as the default, but under `root` instead of the working
    /// directory.
    pub fn rooted_at(root: &Path) -> Self {
        Config {
            catalog_path: root.join(CATALOG_PATH),
            image_dir: root.join(IMAGE_DIR),
            ..Config::default()
        }
    }

    pub fn store(&self) -> ProjectStore {
        ProjectStore::new(&self.catalog_path)
    }

    pub fn images(&self) -> ImageFolder {
        ImageFolder::new(&self.image_dir, self.image_url_prefix.as_str())
    }
}
