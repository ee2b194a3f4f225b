//! # Library Manager Module
//!
//! ## Purpose
//! Decides which reference data files the calculator reads. Each of the three tables
//! (elements, mixing enthalpy, formation enthalpy) is either the built-in table embedded
//! in the binary or a user-supplied JSON file with the same layout.
//!
//! ## Configuration Format
//! Persisted as `hea_library_config.json` in the working directory; `null` means built-in.
//! ```json
//! {
//!   "elements": null,
//!   "mixing_enthalpy": "my_mixing_enthalpy.json",
//!   "formation_enthalpy": null
//! }
//! ```
//!
//! ## Usage
//! ```rust, ignore
//! use HEACalc::library_manager::{with_library_manager, with_library_manager_mut};
//!
//! with_library_manager_mut(|manager| manager.set_mixing_enthalpy("my_mixing_enthalpy.json"))?;
//! let tables = with_library_manager(|manager| manager.load_tables())?;
//! ```
//! Tables used through `DataTables::global()` are read once per process, so changes to
//! the configuration take effect on the next run.

use crate::Data::DataError;
use crate::Data::data_tables::DataTables;
use crate::Data::elements::ElementTable;
use crate::Data::pair_enthalpy::{PairTable, PairTableKind};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const DEFAULT_CONFIG_FILE: &str = "hea_library_config.json";

/// Paths of user-supplied data files; `None` selects the built-in table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub elements: Option<String>,
    pub mixing_enthalpy: Option<String>,
    pub formation_enthalpy: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LibraryManager {
    config: LibraryConfig,
    config_file: String,
}

impl LibraryManager {
    /// Reads `hea_library_config.json` from the working directory, falling back to
    /// built-in tables when the file is absent or unreadable.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "ignoring library configuration '{}': {}; using built-in tables",
                    config_file, e
                );
                LibraryConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<LibraryConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: LibraryConfig = serde_json::from_str(&content)?;
            info!("library configuration read from '{}'", config_file);
            Ok(config)
        } else {
            Ok(LibraryConfig::default())
        }
    }

    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn set_elements(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.update_libraries(HashMap::from([("elements", path)]))
    }

    pub fn set_mixing_enthalpy(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.update_libraries(HashMap::from([("mixing_enthalpy", path)]))
    }

    pub fn set_formation_enthalpy(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.update_libraries(HashMap::from([("formation_enthalpy", path)]))
    }

    /// Updates several paths at once. All files are checked before anything changes,
    /// so either every update is applied or none is.
    pub fn update_libraries(
        &mut self,
        updates: HashMap<&str, &str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for (key, path) in &updates {
            if !matches!(*key, "elements" | "mixing_enthalpy" | "formation_enthalpy") {
                return Err(format!("Unknown library key: {}", key).into());
            }
            if !Path::new(path).exists() {
                return Err(format!("File does not exist: {}", path).into());
            }
        }
        for (key, path) in updates {
            let path = Some(path.to_string());
            match key {
                "elements" => self.config.elements = path,
                "mixing_enthalpy" => self.config.mixing_enthalpy = path,
                _ => self.config.formation_enthalpy = path,
            }
        }
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = LibraryConfig::default();
        self.save_config()
    }

    /// Reads the configured tables from disk (or the embedded copies)
    pub fn load_tables(&self) -> Result<DataTables, DataError> {
        let elements = match &self.config.elements {
            Some(path) => ElementTable::from_file(path)?,
            None => ElementTable::builtin()?,
        };
        let mixing_enthalpy = load_pair_table(
            PairTableKind::MixingEnthalpy,
            self.config.mixing_enthalpy.as_deref(),
        )?;
        let formation_enthalpy = load_pair_table(
            PairTableKind::FormationEnthalpy,
            self.config.formation_enthalpy.as_deref(),
        )?;
        Ok(DataTables::new(elements, mixing_enthalpy, formation_enthalpy))
    }
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_pair_table(kind: PairTableKind, path: Option<&str>) -> Result<PairTable, DataError> {
    match path {
        Some(path) => PairTable::from_file(kind, path),
        None => PairTable::builtin(kind),
    }
}

static GLOBAL_LIBRARY_MANAGER: OnceLock<Mutex<LibraryManager>> = OnceLock::new();

/// Guard over the process-wide manager. A poisoned lock is recovered, the
/// configuration holds no invariants a panicking writer could break.
pub fn get_library_manager() -> std::sync::MutexGuard<'static, LibraryManager> {
    GLOBAL_LIBRARY_MANAGER
        .get_or_init(|| Mutex::new(LibraryManager::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn with_library_manager<F, R>(f: F) -> R
where
    F: FnOnce(&LibraryManager) -> R,
{
    let manager = get_library_manager();
    f(&manager)
}

pub fn with_library_manager_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut LibraryManager) -> R,
{
    let mut manager = get_library_manager();
    f(&mut manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_config_selects_builtin_tables() {
        let manager = LibraryManager::with_config_file("no_such_dir/hea_library_config.json");
        assert_eq!(manager.get_config(), &LibraryConfig::default());
        let tables = manager.load_tables().unwrap();
        assert_eq!(tables.elements.len(), 118);
    }

    #[test]
    fn test_config_with_custom_mixing_table() {
        let mut mixing_file = NamedTempFile::new().unwrap();
        mixing_file.write_all(br#"{"Fe-Ni": -5.0}"#).unwrap();
        let config = LibraryConfig {
            elements: None,
            mixing_enthalpy: Some(mixing_file.path().to_str().unwrap().to_string()),
            formation_enthalpy: None,
        };
        let mut config_file = NamedTempFile::new().unwrap();
        config_file
            .write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes())
            .unwrap();

        let manager = LibraryManager::with_config_file(config_file.path().to_str().unwrap());
        assert_eq!(manager.get_config(), &config);
        let tables = manager.load_tables().unwrap();
        assert_eq!(tables.mixing_enthalpy.len(), 1);
        assert_eq!(tables.mixing_enthalpy.get("Ni", "Fe"), Some(-5.0));
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(b"{ not json").unwrap();
        let manager = LibraryManager::with_config_file(config_file.path().to_str().unwrap());
        assert_eq!(manager.get_config(), &LibraryConfig::default());
    }

    #[test]
    fn test_update_libraries_is_all_or_nothing() {
        let config_file = NamedTempFile::new().unwrap();
        let mut elements_file = NamedTempFile::new().unwrap();
        elements_file.write_all(b"{}").unwrap();

        let mut manager = LibraryManager::with_config_file(config_file.path().to_str().unwrap());
        let updates = HashMap::from([
            ("elements", elements_file.path().to_str().unwrap()),
            ("mixing_enthalpy", "no_such_dir/mixing.json"),
        ]);
        assert!(manager.update_libraries(updates).is_err());
        assert_eq!(manager.get_config(), &LibraryConfig::default());

        manager
            .set_elements(elements_file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(
            manager.get_config().elements.as_deref(),
            elements_file.path().to_str()
        );
        // the setter persisted the configuration
        let reloaded = LibraryManager::with_config_file(config_file.path().to_str().unwrap());
        assert_eq!(reloaded.get_config(), manager.get_config());

        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.get_config(), &LibraryConfig::default());
    }
}
