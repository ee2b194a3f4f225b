/// condensed chemical formula -> element amounts (groups, multipliers, charges)
pub mod formula_parser;
/// element -> amount map with stable order and derived fractions and pairs
pub mod composition;
#[allow(non_snake_case)]
/// thermodynamic and structural quantities of an alloy, cached per calculator
/// # Example
/// ```
/// use HEACalc::Alloys::HEA_calculator::HEACalculator;
/// use HEACalc::Alloys::phase_models::{Microstructure, PhaseLabel};
/// use HEACalc::Data::data_tables::DataTables;
///
/// let tables = DataTables::builtin().unwrap();
/// let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
/// assert_eq!(calc.melting_temperature().unwrap(), 1858.0);
/// assert_eq!(calc.microstructure().unwrap(), Microstructure::FCC);
/// assert_eq!(calc.model_1().unwrap(), PhaseLabel::SolidSolution);
/// assert!(calc.model_5().is_err());
/// ```
pub mod HEA_calculator;
/// empirical solid solution criteria (models 1-8) and the VEC microstructure rule
pub mod phase_models;
/// result record and its text, table, CSV and JSON renderings
pub mod alloy_result;
/// at% / wt% / vol% conversion
pub mod converter;
/// candidate compositions over an element set and parallel screening
pub mod composition_space;
#[allow(non_snake_case)]
mod HEA_calculator_tests;
