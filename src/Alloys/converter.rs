//! Conversion between atomic, weight and volume percent.
//! With nᵢ atomic amounts, wᵢ atomic weights and Vᵢ atomic volumes
//! (element density ρᵢ = wᵢ / Vᵢ):
//! - wt% ∝ nᵢ wᵢ, vol% ∝ nᵢ Vᵢ
//! - at% ∝ wt%ᵢ / wᵢ ∝ vol%ᵢ / Vᵢ
//! - vol% ∝ wt%ᵢ / ρᵢ, wt% ∝ vol%ᵢ ρᵢ
//!
//! Every result is normalised to sum to 100.
use super::HEA_calculator::HEAError;
use super::composition::Composition;
use crate::Data::elements::ElementTable;
use nalgebra::DVector;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionUnit {
    Atomic,
    Weight,
    Volume,
}

impl FromStr for CompositionUnit {
    type Err = HEAError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "at" | "at%" | "atomic" => Ok(CompositionUnit::Atomic),
            "wt" | "wt%" | "weight" => Ok(CompositionUnit::Weight),
            "vol" | "vol%" | "volume" => Ok(CompositionUnit::Volume),
            other => Err(HEAError::Unsupported(format!(
                "unknown composition unit '{}', expected at, wt or vol",
                other
            ))),
        }
    }
}

impl fmt::Display for CompositionUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompositionUnit::Atomic => write!(f, "at%"),
            CompositionUnit::Weight => write!(f, "wt%"),
            CompositionUnit::Volume => write!(f, "vol%"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompositionConverter {
    elements: Vec<String>,
    values: DVector<f64>,
    weights: DVector<f64>,
    volumes: DVector<f64>,
}

impl CompositionConverter {
    /// `values` are percentages (or any positive amounts) in whatever unit the
    /// conversion starts from
    pub fn new(table: &ElementTable, values: &[(String, f64)]) -> Result<Self, HEAError> {
        let composition = Composition::from_pairs(values.iter().cloned())?;
        let mut weights = Vec::with_capacity(composition.len());
        let mut volumes = Vec::with_capacity(composition.len());
        for symbol in composition.elements() {
            weights.push(table.atomic_weight(symbol)?);
            volumes.push(table.atomic_volume(symbol)?);
        }
        Ok(Self {
            elements: composition.elements().map(str::to_string).collect(),
            values: DVector::from_iterator(composition.len(), composition.iter().map(|(_, v)| v)),
            weights: DVector::from_vec(weights),
            volumes: DVector::from_vec(volumes),
        })
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    fn densities(&self) -> DVector<f64> {
        self.weights.component_div(&self.volumes)
    }

    fn normalized(v: DVector<f64>) -> DVector<f64> {
        let total = v.sum();
        v * (100.0 / total)
    }

    pub fn at_to_wt(&self) -> DVector<f64> {
        Self::normalized(self.values.component_mul(&self.weights))
    }

    pub fn at_to_vol(&self) -> DVector<f64> {
        Self::normalized(self.values.component_mul(&self.volumes))
    }

    pub fn wt_to_at(&self) -> DVector<f64> {
        Self::normalized(self.values.component_div(&self.weights))
    }

    pub fn wt_to_vol(&self) -> DVector<f64> {
        Self::normalized(self.values.component_div(&self.densities()))
    }

    pub fn vol_to_at(&self) -> DVector<f64> {
        Self::normalized(self.values.component_div(&self.volumes))
    }

    pub fn vol_to_wt(&self) -> DVector<f64> {
        Self::normalized(self.values.component_mul(&self.densities()))
    }

    pub fn convert(&self, from: CompositionUnit, to: CompositionUnit) -> DVector<f64> {
        use CompositionUnit::*;
        match (from, to) {
            (Atomic, Weight) => self.at_to_wt(),
            (Atomic, Volume) => self.at_to_vol(),
            (Weight, Atomic) => self.wt_to_at(),
            (Weight, Volume) => self.wt_to_vol(),
            (Volume, Atomic) => self.vol_to_at(),
            (Volume, Weight) => self.vol_to_wt(),
            _ => Self::normalized(self.values.clone()),
        }
    }

    /// pairs each converted value with its element
    pub fn labelled(&self, converted: &DVector<f64>) -> Vec<(String, f64)> {
        self.elements
            .iter()
            .cloned()
            .zip(converted.iter().copied())
            .collect()
    }
}
