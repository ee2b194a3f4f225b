//! reference data consumed by the alloy calculator: element properties and the two
//! pairwise enthalpy tables. All tables are read-only once loaded.
use thiserror::Error;

/// per-element physical constants (melting point, atomic volume, weight, radius, valence)
pub mod elements;
/// symmetric tables keyed by unordered element pairs (mixing and formation enthalpy)
pub mod pair_enthalpy;
/// bundle of all three tables and the process-wide load-once instance
pub mod data_tables;

/// error types for reference data lookups and data file loading
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("element '{0}' is not in the element property table")]
    UnknownElement(String),
    #[error("{property} of element '{element}' is not defined in the element property table")]
    UndefinedProperty {
        element: String,
        property: &'static str,
    },
    #[error("pair {first}-{second} is not in the {table} table")]
    MissingPair {
        first: String,
        second: String,
        table: &'static str,
    },
    #[error("invalid element pair key '{0}', expected 'A-B'")]
    InvalidPairKey(String),
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("failed to parse '{path}' at line {line}, column {column}: {message}")]
    Malformed {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
}
