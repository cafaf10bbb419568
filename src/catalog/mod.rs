//! Recipe catalog providers.
//!
//! Scoring only ever sees a `&[Recipe]`. This module turns the places a
//! catalog can live (an in-memory list, a JSON or YAML file, a directory of
//! `.cook` files with YAML frontmatter) into that list.

use crate::model::extract_and_parse_metadata;
use crate::Recipe;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{BufRead, BufReader};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON catalog: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML catalog: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Catalog not found: {0}")]
    NotFound(Utf8PathBuf),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Path contains invalid UTF-8: {0}")]
    InvalidPath(String),
}

/// Anything that can produce the list of recipes to score.
pub trait CatalogProvider {
    fn recipes(&self) -> Result<Vec<Recipe>, CatalogError>;
}

/// A catalog already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    recipes: Vec<Recipe>,
}

impl StaticCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        StaticCatalog { recipes }
    }
}

impl CatalogProvider for StaticCatalog {
    fn recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        Ok(self.recipes.clone())
    }
}

/// A single file holding a list of recipes, JSON (`.json`) or YAML
/// (`.yaml`, `.yml`).
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: Utf8PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        CatalogFile { path: path.into() }
    }
}

impl CatalogProvider for CatalogFile {
    fn recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        if !self.path.is_file() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }

        let recipes = match self.path.extension() {
            Some("json") => {
                let reader = BufReader::new(File::open(&self.path)?);
                serde_json::from_reader(reader)?
            }
            Some("yaml" | "yml") => {
                let reader = BufReader::new(File::open(&self.path)?);
                serde_yaml::from_reader(reader)?
            }
            _ => return Err(CatalogError::UnsupportedFormat(self.path.clone())),
        };

        Ok(dedup_ids(recipes))
    }
}

/// Every `.cook` file under a directory, described by its YAML frontmatter.
///
/// A recipe's id is its path relative to the base directory without the
/// extension (`south/dosa` for `south/dosa.cook`); its title falls back to
/// the file stem.
#[derive(Debug, Clone)]
pub struct CookDirectory {
    base_dir: Utf8PathBuf,
}

impl CookDirectory {
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        CookDirectory {
            base_dir: base_dir.into(),
        }
    }

    fn read_recipe(&self, path: &Utf8Path) -> Result<Recipe, CatalogError> {
        let file = File::open(path)?;
        let metadata = extract_and_parse_metadata(BufReader::new(file).lines())?;

        let relative = path
            .strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .with_extension("");
        let id = relative
            .components()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let stem = path.file_stem().unwrap_or(id.as_str());

        Ok(metadata.to_recipe(&id, stem))
    }
}

impl CatalogProvider for CookDirectory {
    fn recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        if !self.base_dir.is_dir() {
            return Err(CatalogError::NotFound(self.base_dir.clone()));
        }

        let pattern = self.base_dir.join("**/*.cook");
        let mut recipes = Vec::new();

        for entry in glob::glob(pattern.as_str())? {
            let path = Utf8PathBuf::from_path_buf(entry?)
                .map_err(|p| CatalogError::InvalidPath(p.display().to_string()))?;
            recipes.push(self.read_recipe(&path)?);
        }

        debug!(base_dir = %self.base_dir, count = recipes.len(), "loaded cook directory");
        Ok(recipes)
    }
}

/// Loads a catalog from a directory of `.cook` files or from a catalog file.
pub fn load_catalog(path: impl AsRef<Utf8Path>) -> Result<Vec<Recipe>, CatalogError> {
    let path = path.as_ref();
    if path.is_dir() {
        CookDirectory::new(path).recipes()
    } else {
        CatalogFile::new(path).recipes()
    }
}

/// Finds a recipe by id.
pub fn find_recipe<'a>(catalog: &'a [Recipe], id: &str) -> Option<&'a Recipe> {
    catalog.iter().find(|recipe| recipe.id == id)
}

/// Keeps the first recipe for every id.
fn dedup_ids(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = std::collections::HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| {
            let fresh = seen.insert(recipe.id.clone());
            if !fresh {
                warn!(id = %recipe.id, "dropping duplicate recipe id from catalog");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DietTag, Region, SpiceLevel};
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn temp_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    fn create_test_recipe(dir: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.join(format!("{}.cook", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_json_catalog_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("catalog.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "title": "Butter Chicken", "region": "North", "spiceLevel": "Medium"},
                {"id": "2", "title": "Dal Khichdi", "region": "West", "dietType": ["Veg"]},
                {"id": "1", "title": "Duplicate"}
            ]"#,
        )
        .unwrap();

        let recipes = load_catalog(&path).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Butter Chicken");
        assert_eq!(recipes[0].region, Some(Region::North));
        assert_eq!(recipes[1].diet_type, vec![DietTag::Veg]);
    }

    #[test]
    fn test_yaml_catalog_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("catalog.yaml");
        fs::write(
            &path,
            indoc! {r#"
                - id: "7"
                  title: Fish Curry
                  spiceLevel: Hot
                  cookingTime: 35
                  dietType: [Non-Veg]
                - id: "8"
                  title: Pani Puri
                  isStreetFood: true
            "#},
        )
        .unwrap();

        let recipes = CatalogFile::new(path).recipes().unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].spice_level, Some(SpiceLevel::Spicy));
        assert_eq!(recipes[0].cooking_time, Some(35));
        assert!(recipes[1].is_street_food);
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("catalog.csv");
        fs::write(&path, "id,title").unwrap();

        assert!(matches!(
            load_catalog(&path),
            Err(CatalogError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            load_catalog(temp_path(&temp_dir).join("missing.json")),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("catalog.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_catalog(&path),
            Err(CatalogError::JsonError(_))
        ));
    }

    #[test]
    fn test_cook_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_path(&temp_dir);
        let south = base.join("south");
        fs::create_dir_all(&south).unwrap();

        create_test_recipe(
            &south,
            "dosa",
            indoc! {r#"
                ---
                title: Masala Dosa
                spice: Medium
                region: South
                diet: [Veg]
                ---

                Spread the @batter{} thin."#},
        );
        create_test_recipe(&base, "toast", "Toast the @bread{2%slices}.");

        let mut recipes = load_catalog(&base).unwrap();
        recipes.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, "south/dosa");
        assert_eq!(recipes[0].title, "Masala Dosa");
        assert_eq!(recipes[0].region, Some(Region::South));
        assert_eq!(recipes[1].id, "toast");
        assert_eq!(recipes[1].title, "toast");
        assert_eq!(recipes[1].spice_level, None);
    }

    #[test]
    fn test_cook_directory_missing() {
        let result = CookDirectory::new("/nonexistent/directory").recipes();
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_find_recipe() {
        let catalog = StaticCatalog::new(vec![Recipe::new("1", "Idli"), Recipe::new("2", "Vada")])
            .recipes()
            .unwrap();

        assert_eq!(find_recipe(&catalog, "2").unwrap().title, "Vada");
        assert!(find_recipe(&catalog, "3").is_none());
    }
}
