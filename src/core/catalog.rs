//! Persisted catalog
//!
//! Administrators edit a copy of the catalog that lives on disk as JSON. A
//! save always writes the whole catalog; readers load a fresh snapshot.

use crate::core::error::CatalogError;
use crate::core::models::Catalog;
use std::fs;
use std::path::Path;

/// Read a catalog from a JSON file
///
/// Shape problems that pricing can absorb are not rejected here; see
/// [`Catalog::validate`].
///
/// # Errors
/// Returns `CatalogError::Io` if the file cannot be read and
/// `CatalogError::Parse` if it is not a catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog: Catalog = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    crate::debug!(
        "Loaded catalog from {} ({} courses, {} phases)",
        path.display(),
        catalog.courses.len(),
        catalog.phases.len()
    );
    Ok(catalog)
}

/// Write a catalog to a JSON file, replacing whatever was there
///
/// The parent directory is created if needed.
///
/// # Errors
/// Returns `CatalogError::Serialize` if the catalog cannot be encoded and
/// `CatalogError::Io` if the file cannot be written.
pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let io_error = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(catalog).map_err(CatalogError::Serialize)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, json).map_err(io_error)?;
    crate::debug!("Saved catalog to {}", path.display());
    Ok(())
}

impl Catalog {
    /// Load the persisted catalog, or the built-in one if there is no file yet
    ///
    /// # Errors
    /// Same as [`load_catalog`] when the file exists.
    pub fn load_or_builtin(path: &Path) -> Result<Self, CatalogError> {
        if path.exists() {
            load_catalog(path)
        } else {
            crate::debug!("No catalog at {}, using built-in catalog", path.display());
            Ok(Self::builtin())
        }
    }

    /// Remove the persisted catalog so the built-in one is used again
    ///
    /// # Errors
    /// Returns `CatalogError::Io` if the file exists but cannot be removed.
    pub fn reset_persisted(path: &Path) -> Result<(), CatalogError> {
        if path.exists() {
            fs::remove_file(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_builtin() {
        let dir = TempDir::new().expect("temp dir");
        let catalog = Catalog::load_or_builtin(&dir.path().join("catalog.json")).expect("load");
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_save_replaces_whole_catalog() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("catalog.json");

        let mut edited = Catalog::builtin();
        edited.courses[0].tiers[0].unit_price = dec!(149.90);
        save_catalog(&edited, &path).expect("save");

        let loaded = load_catalog(&path).expect("load");
        assert_eq!(loaded.courses[0].tiers[0].unit_price, dec!(149.90));
        assert_eq!(loaded, edited);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{\"courses\": [{\"id\": 1}]}").expect("write");
        assert!(matches!(load_catalog(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_reset_persisted() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.json");
        save_catalog(&Catalog::builtin(), &path).expect("save");
        Catalog::reset_persisted(&path).expect("reset");
        assert!(!path.exists());
        Catalog::reset_persisted(&path).expect("reset twice");
    }
}
