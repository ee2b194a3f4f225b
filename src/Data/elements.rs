//! # Element Property Table
//!
//! Static per-element constants used by the alloy calculator:
//!
//! | field | unit |
//! |---|---|
//! | atomic number | - |
//! | melting point | K |
//! | atomic volume | cm³/mol |
//! | atomic weight | g/mol |
//! | atomic radius | pm |
//! | valence electrons | - |
//!
//! Melting point, atomic volume and atomic radius are unknown for several lanthanides,
//! actinides and superheavy elements; they are stored as `None` (`null` in the JSON file) and any
//! quantity that needs them returns `DataError::UndefinedProperty` instead of NaN.
//!
//! The built-in table is `data/elements.json`, embedded at compile time.
//! Atomic weights follow IUPAC-CIAAW standard atomic weights. Radii are metallic
//! radii for coordination number 12 (Fe 126, Co 125, Cr 128, Ni 124 pm).
use super::DataError;
use crate::Utils::load_from_file::{load_json_from_file, parse_json_str};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BUILTIN_ELEMENTS: &str = include_str!("../../data/elements.json");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementProperties {
    pub atomic_number: f64,
    /// K
    pub melting_point: Option<f64>,
    /// cm³/mol
    pub atomic_volume: Option<f64>,
    pub atomic_weight: f64,
    /// pm
    pub atomic_radius: Option<f64>,
    #[serde(rename = "nvalence")]
    pub valence_electrons: f64,
}

/// symbol -> properties; read-only after construction
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    elements: HashMap<String, ElementProperties>,
}

impl ElementTable {
    pub fn new(elements: HashMap<String, ElementProperties>) -> Self {
        Self { elements }
    }

    pub fn builtin() -> Result<Self, DataError> {
        let elements: HashMap<String, ElementProperties> =
            parse_json_str("data/elements.json", BUILTIN_ELEMENTS)?;
        Ok(Self::new(elements))
    }

    pub fn from_file(file_name: &str) -> Result<Self, DataError> {
        let elements: HashMap<String, ElementProperties> = load_json_from_file(file_name)?;
        info!(
            "loaded {} elements from '{}'",
            elements.len(),
            file_name
        );
        Ok(Self::new(elements))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn get(&self, symbol: &str) -> Result<&ElementProperties, DataError> {
        self.elements
            .get(symbol)
            .ok_or_else(|| DataError::UnknownElement(symbol.to_string()))
    }

    pub fn melting_point(&self, symbol: &str) -> Result<f64, DataError> {
        defined(symbol, "melting point", self.get(symbol)?.melting_point)
    }

    pub fn atomic_weight(&self, symbol: &str) -> Result<f64, DataError> {
        Ok(self.get(symbol)?.atomic_weight)
    }

    pub fn valence_electrons(&self, symbol: &str) -> Result<f64, DataError> {
        Ok(self.get(symbol)?.valence_electrons)
    }

    pub fn atomic_volume(&self, symbol: &str) -> Result<f64, DataError> {
        defined(symbol, "atomic volume", self.get(symbol)?.atomic_volume)
    }

    pub fn atomic_radius(&self, symbol: &str) -> Result<f64, DataError> {
        defined(symbol, "atomic radius", self.get(symbol)?.atomic_radius)
    }

    /// atomic weight / atomic volume, g/cm³
    pub fn element_density(&self, symbol: &str) -> Result<f64, DataError> {
        Ok(self.atomic_weight(symbol)? / self.atomic_volume(symbol)?)
    }
}

fn defined(symbol: &str, property: &'static str, value: Option<f64>) -> Result<f64, DataError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DataError::UndefinedProperty {
            element: symbol.to_string(),
            property,
        }),
    }
}
