//! # Pairwise enthalpy tables
//!
//! Two symmetric tables keyed by unordered element pairs:
//! - mixing enthalpy of binary liquid alloys, kJ/mol (A. Takeuchi, A. Inoue,
//!   Mater. Trans. 46 (2005) 2817, Miedema model). The built-in table holds every
//!   pair of Al, Co, Cr, Cu, Fe, Hf, Mn, Mo, Nb, Ni, Si, Ta, Ti, V, W, Zr plus Al-Mg
//! - formation enthalpy of the most stable ordered binary compound, meV/atom
//!   (M.C. Troparevsky et al., Phys. Rev. X 5 (2015) 011041)
//!
//! Files are JSON objects `{"A-B": value}`. Keys are normalised to alphabetical
//! order on load, so `("Fe", "Co")` and `("Co", "Fe")` hit the same entry.
//! A pair that is absent (or `null`) is unknown, which is not the same as `0.0`.
use super::DataError;
use crate::Utils::load_from_file::{load_json_from_file, parse_json_str};
use log::{info, warn};
use std::collections::HashMap;

const BUILTIN_MIXING: &str = include_str!("../../data/mixing_enthalpy.json");
const BUILTIN_FORMATION: &str = include_str!("../../data/formation_enthalpy.json");

/// Which quantity a pair table holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairTableKind {
    MixingEnthalpy,
    FormationEnthalpy,
}

impl PairTableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairTableKind::MixingEnthalpy => "mixing enthalpy",
            PairTableKind::FormationEnthalpy => "formation enthalpy",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            PairTableKind::MixingEnthalpy => "kJ/mol",
            PairTableKind::FormationEnthalpy => "meV/atom",
        }
    }
}

/// sorted (first, second) pair key
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct PairTable {
    kind: PairTableKind,
    values: HashMap<(String, String), f64>,
}

impl PairTable {
    pub fn new(kind: PairTableKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn builtin(kind: PairTableKind) -> Result<Self, DataError> {
        let (name, contents) = match kind {
            PairTableKind::MixingEnthalpy => ("data/mixing_enthalpy.json", BUILTIN_MIXING),
            PairTableKind::FormationEnthalpy => {
                ("data/formation_enthalpy.json", BUILTIN_FORMATION)
            }
        };
        let raw: HashMap<String, Option<f64>> = parse_json_str(name, contents)?;
        Self::from_raw(kind, raw)
    }

    pub fn from_file(kind: PairTableKind, file_name: &str) -> Result<Self, DataError> {
        let raw: HashMap<String, Option<f64>> = load_json_from_file(file_name)?;
        let table = Self::from_raw(kind, raw)?;
        info!(
            "loaded {} {} pairs from '{}'",
            table.len(),
            kind.as_str(),
            file_name
        );
        Ok(table)
    }

    fn from_raw(kind: PairTableKind, raw: HashMap<String, Option<f64>>) -> Result<Self, DataError> {
        let mut table = Self::new(kind);
        for (key, value) in raw {
            let mut parts = key.split('-');
            let (a, b) = match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() && a != b => {
                    (a.trim(), b.trim())
                }
                _ => return Err(DataError::InvalidPairKey(key.clone())),
            };
            match value {
                Some(v) if v.is_finite() => table.insert(a, b, v),
                _ => warn!("{} pair '{}' has no value, treated as unknown", kind.as_str(), key),
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, a: &str, b: &str, value: f64) {
        self.values.insert(pair_key(a, b), value);
    }

    pub fn kind(&self) -> PairTableKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` when the pair is unknown
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.values.get(&pair_key(a, b)).copied()
    }

    pub fn lookup(&self, a: &str, b: &str) -> Result<f64, DataError> {
        self.get(a, b).ok_or_else(|| {
            let (first, second) = pair_key(a, b);
            DataError::MissingPair {
                first,
                second,
                table: self.kind.as_str(),
            }
        })
    }
}
