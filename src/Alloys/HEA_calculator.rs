//! # Alloy calculator
//!
//! `HEACalculator` takes one alloy formula, parses it once and derives the
//! phenomenological quantities used to judge whether a high-entropy alloy forms a
//! solid solution:
//!
//! | quantity | definition | unit |
//! |---|---|---|
//! | mixing enthalpy | 4 Σ_pairs xᵢxⱼ ΔHᵢⱼ (Miedema, Takeuchi-Inoue table) | kJ/mol |
//! | formation enthalpy | 4 Σ_pairs xᵢxⱼ ΔHfᵢⱼ | meV/atom |
//! | min formation enthalpy | min_pairs ΔHfᵢⱼ | meV/atom |
//! | density | Σ nᵢ wᵢ / Σ nᵢ Vᵢ | g/cm³ |
//! | VEC | Σ xᵢ VECᵢ | - |
//! | melting temperature | ⌈Σ xᵢ Tmᵢ⌉ | K |
//! | δ | 100 √(Σ xᵢ (1 - rᵢ/r̄)²) | % |
//! | mixing entropy | -R Σ xᵢ ln xᵢ | J/(K·mol) |
//! | γ | solid angle ratio of the smallest and the largest atom | - |
//! | Ω(T) | T ΔSmix / (1000 abs(ΔHmix)), T = Tm by default | - |
//! | Λ | ΔSmix / δ² | - |
//!
//! Every quantity is computed on first access and cached inside the calculator, so
//! running the whole model battery touches each table entry once. The composition never
//! changes after construction; a new formula means a new calculator.
//!
//! Missing reference data never turns into NaN: an unknown element, an element without a
//! tabulated radius or volume, or a pair absent from an enthalpy table makes the quantity
//! return `HEAError::Data` naming both the quantity and the missing entry.
//!
//! ## Example
//! ```rust, ignore
//! use HEACalc::Alloys::HEA_calculator::HEACalculator;
//! let mut calc = HEACalculator::new("FeCoCrNi")?;
//! println!("{:.2} kJ/mol", calc.mixing_enthalpy()?);
//! let result = calc.calculate()?;
//! result.pretty_print();
//! ```
use super::alloy_result::AlloyResult;
use super::composition::Composition;
use super::formula_parser::{FormulaError, parse_formula};
use super::phase_models::{
    CriticalRatioModel, EnthalpyDeltaModel, FormationEnthalpyModel, LambdaModel, Microstructure,
    ModelOutcome, OmegaDeltaModel, OmegaGammaModel, PhaseCriterion, PhaseLabel, PhaseModel,
    UnsupportedModel,
};
use crate::Data::DataError;
use crate::Data::data_tables::DataTables;
use crate::Data::pair_enthalpy::PairTable;
use log::{debug, info};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// J/(K·mol)
pub const R: f64 = 8.314462618;

/// Cacheable scalar quantities; also used to name the quantity an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    MixingEnthalpy,
    FormationEnthalpy,
    MinFormationEnthalpy,
    Density,
    ValenceElectronConcentration,
    MeltingTemperature,
    AverageAtomicRadius,
    AtomicSizeDifference,
    MixingEntropy,
    Gamma,
    Omega,
    Lambda,
    /// k₁ = ΔHf / ΔHmix of model 7
    EnthalpyRatio,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::MixingEnthalpy => "mixing enthalpy",
            Quantity::FormationEnthalpy => "formation enthalpy",
            Quantity::MinFormationEnthalpy => "minimum formation enthalpy",
            Quantity::Density => "density",
            Quantity::ValenceElectronConcentration => "valence electron concentration",
            Quantity::MeltingTemperature => "melting temperature",
            Quantity::AverageAtomicRadius => "average atomic radius",
            Quantity::AtomicSizeDifference => "atomic size difference",
            Quantity::MixingEntropy => "mixing entropy",
            Quantity::Gamma => "gamma parameter",
            Quantity::Omega => "omega parameter",
            Quantity::Lambda => "lambda parameter",
            Quantity::EnthalpyRatio => "formation to mixing enthalpy ratio",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HEAError {
    #[error("invalid formula: {0}")]
    Formula(#[from] FormulaError),
    #[error("cannot compute {quantity}: {source}")]
    Data {
        quantity: Quantity,
        #[source]
        source: DataError,
    },
    #[error("{quantity} is undefined: {reason}")]
    Undefined { quantity: Quantity, reason: String },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("'{0}' contains a single element, an alloy needs at least two")]
    SingleElement(String),
    #[error("invalid composition range: {0}")]
    InvalidRange(String),
    #[error("reference data unavailable: {0}")]
    Tables(#[from] DataError),
}

fn data_error(quantity: Quantity) -> impl FnOnce(DataError) -> HEAError {
    move |source| HEAError::Data { quantity, source }
}

#[derive(Debug, Clone)]
pub struct HEACalculator<'a> {
    formula: String,
    composition: Composition,
    /// (symbol, atomic fraction), composition order
    fractions: Vec<(String, f64)>,
    pairs: Vec<(String, String)>,
    /// xᵢxⱼ for every entry of `pairs`
    pair_fractions: Vec<f64>,
    /// radii in composition order, filled on first use
    radii: Option<Vec<f64>>,
    tables: &'a DataTables,
    cache: HashMap<Quantity, f64>,
}

impl HEACalculator<'static> {
    /// Calculator over the process-wide reference tables
    pub fn new(formula: &str) -> Result<Self, HEAError> {
        let tables = DataTables::global()?;
        Self::with_tables(formula, tables)
    }
}

impl<'a> HEACalculator<'a> {
    pub fn with_tables(formula: &str, tables: &'a DataTables) -> Result<Self, HEAError> {
        let composition = parse_formula(formula)?;
        Self::from_composition(formula, composition, tables)
    }

    /// Rejects single-element compositions: every mixing quantity would be an empty sum.
    pub fn from_composition(
        formula: &str,
        composition: Composition,
        tables: &'a DataTables,
    ) -> Result<Self, HEAError> {
        if composition.len() < 2 {
            return Err(HEAError::SingleElement(formula.to_string()));
        }
        let fractions = composition.atomic_fractions();
        let pairs = composition.element_pairs();
        let fraction_of = |symbol: &str| {
            fractions
                .iter()
                .find(|(s, _)| s == symbol)
                .map(|(_, x)| *x)
                .unwrap_or(0.0)
        };
        let pair_fractions = pairs
            .iter()
            .map(|(a, b)| fraction_of(a) * fraction_of(b))
            .collect();
        debug!(
            "{}: {} elements, {} pairs",
            formula,
            composition.len(),
            pairs.len()
        );
        Ok(Self {
            formula: formula.to_string(),
            composition,
            fractions,
            pairs,
            pair_fractions,
            radii: None,
            tables,
            cache: HashMap::new(),
        })
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn total_amount(&self) -> f64 {
        self.composition.total_amount()
    }

    pub fn atomic_fractions(&self) -> &[(String, f64)] {
        &self.fractions
    }

    pub fn element_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn pair_fractions(&self) -> &[f64] {
        &self.pair_fractions
    }

    fn cached<F>(&mut self, quantity: Quantity, compute: F) -> Result<f64, HEAError>
    where
        F: FnOnce(&mut Self) -> Result<f64, HEAError>,
    {
        if let Some(value) = self.cache.get(&quantity) {
            return Ok(*value);
        }
        let value = compute(self)?;
        debug!("{}: {} = {}", self.formula, quantity, value);
        self.cache.insert(quantity, value);
        Ok(value)
    }

    /// 4 Σ xᵢxⱼ Hᵢⱼ over all pairs
    fn weighted_pair_sum(&self, table: &PairTable, quantity: Quantity) -> Result<f64, HEAError> {
        let mut sum = 0.0;
        for ((a, b), x) in self.pairs.iter().zip(&self.pair_fractions) {
            sum += x * table.lookup(a, b).map_err(data_error(quantity))?;
        }
        Ok(4.0 * sum)
    }

    /// Σ xᵢ pᵢ for a per-element property
    fn weighted_element_sum<F>(&self, quantity: Quantity, property: F) -> Result<f64, HEAError>
    where
        F: Fn(&str) -> Result<f64, DataError>,
    {
        let mut sum = 0.0;
        for (symbol, x) in &self.fractions {
            sum += x * property(symbol).map_err(data_error(quantity))?;
        }
        Ok(sum)
    }

    /// kJ/mol
    pub fn mixing_enthalpy(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::MixingEnthalpy, |calc| {
            calc.weighted_pair_sum(&calc.tables.mixing_enthalpy, Quantity::MixingEnthalpy)
        })
    }

    /// meV/atom
    pub fn formation_enthalpy(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::FormationEnthalpy, |calc| {
            calc.weighted_pair_sum(&calc.tables.formation_enthalpy, Quantity::FormationEnthalpy)
        })
    }

    /// most negative pair formation enthalpy, meV/atom
    pub fn min_formation_enthalpy(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::MinFormationEnthalpy, |calc| {
            let mut min = f64::INFINITY;
            for (a, b) in &calc.pairs {
                let value = calc
                    .tables
                    .formation_enthalpy
                    .lookup(a, b)
                    .map_err(data_error(Quantity::MinFormationEnthalpy))?;
                min = min.min(value);
            }
            Ok(min)
        })
    }

    /// g/cm³
    pub fn density(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::Density, |calc| {
            let elements = &calc.tables.elements;
            let (mut mass, mut volume) = (0.0, 0.0);
            for (symbol, amount) in calc.composition.iter() {
                let w = elements
                    .atomic_weight(symbol)
                    .map_err(data_error(Quantity::Density))?;
                let v = elements
                    .atomic_volume(symbol)
                    .map_err(data_error(Quantity::Density))?;
                mass += amount * w;
                volume += amount * v;
            }
            Ok(mass / volume)
        })
    }

    pub fn valence_electron_concentration(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::ValenceElectronConcentration, |calc| {
            calc.weighted_element_sum(Quantity::ValenceElectronConcentration, |s| {
                calc.tables.elements.valence_electrons(s)
            })
        })
    }

    /// K, rounded up to a whole kelvin
    pub fn melting_temperature(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::MeltingTemperature, |calc| {
            let tm = calc.weighted_element_sum(Quantity::MeltingTemperature, |s| {
                calc.tables.elements.melting_point(s)
            })?;
            Ok(tm.ceil())
        })
    }

    /// pm, composition order
    pub fn atomic_radii(&mut self) -> Result<Vec<f64>, DataError> {
        if let Some(radii) = &self.radii {
            return Ok(radii.clone());
        }
        let radii = self
            .fractions
            .iter()
            .map(|(symbol, _)| self.tables.elements.atomic_radius(symbol))
            .collect::<Result<Vec<f64>, DataError>>()?;
        self.radii = Some(radii.clone());
        Ok(radii)
    }

    fn radii_for(&mut self, quantity: Quantity) -> Result<Vec<f64>, HEAError> {
        self.atomic_radii().map_err(data_error(quantity))
    }

    /// fraction-weighted mean radius, pm
    pub fn average_atomic_radius(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::AverageAtomicRadius, |calc| {
            let radii = calc.radii_for(Quantity::AverageAtomicRadius)?;
            Ok(calc
                .fractions
                .iter()
                .zip(&radii)
                .map(|((_, x), r)| x * r)
                .sum())
        })
    }

    /// δ, %
    pub fn atomic_size_difference(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::AtomicSizeDifference, |calc| {
            let radii = calc.radii_for(Quantity::AtomicSizeDifference)?;
            let r_avg = calc.average_atomic_radius()?;
            let sum: f64 = calc
                .fractions
                .iter()
                .zip(&radii)
                .map(|((_, x), r)| x * (1.0 - r / r_avg).powi(2))
                .sum();
            Ok(100.0 * sum.sqrt())
        })
    }

    /// ideal configurational entropy, J/(K·mol)
    pub fn mixing_entropy(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::MixingEntropy, |calc| {
            let sum: f64 = calc.fractions.iter().map(|(_, x)| x * x.ln()).sum();
            Ok(-R * sum)
        })
    }

    pub fn gamma_parameter(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::Gamma, |calc| {
            let radii = calc.radii_for(Quantity::Gamma)?;
            let r_avg = calc.average_atomic_radius()?;
            let r_min = radii.iter().copied().fold(f64::INFINITY, f64::min);
            let r_max = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let solid_angle = |r: f64| {
                let outer = (r + r_avg).powi(2);
                1.0 - ((outer - r_avg.powi(2)) / outer).sqrt()
            };
            Ok(solid_angle(r_min) / solid_angle(r_max))
        })
    }

    /// Ω at the melting temperature
    pub fn omega_parameter(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::Omega, |calc| {
            let tm = calc.melting_temperature()?;
            calc.omega_at(tm)
        })
    }

    /// Ω = T ΔSmix / (1000 abs(ΔHmix)); +∞ when the mixing enthalpy is exactly zero
    pub fn omega_at(&mut self, temperature: f64) -> Result<f64, HEAError> {
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(HEAError::Undefined {
                quantity: Quantity::Omega,
                reason: format!("temperature {} K is not a valid temperature", temperature),
            });
        }
        let s = self.mixing_entropy()?;
        let h = self.mixing_enthalpy()?;
        if h == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(temperature * s / (h.abs() * 1000.0))
    }

    /// Λ = ΔSmix / δ²; +∞ for equal radii
    pub fn lambda_parameter(&mut self) -> Result<f64, HEAError> {
        self.cached(Quantity::Lambda, |calc| {
            let s = calc.mixing_entropy()?;
            let delta = calc.atomic_size_difference()?;
            if delta == 0.0 {
                return Ok(f64::INFINITY);
            }
            Ok(s / delta.powi(2))
        })
    }

    pub fn microstructure(&mut self) -> Result<Microstructure, HEAError> {
        Ok(Microstructure::from_vec(
            self.valence_electron_concentration()?,
        ))
    }

    /// φ parameter of King et al.; not available
    pub fn phi_parameter(&mut self) -> Result<f64, HEAError> {
        Err(HEAError::Unsupported("phi parameter".to_string()))
    }

    pub fn model_1(&mut self) -> Result<PhaseLabel, HEAError> {
        OmegaDeltaModel.evaluate(self)
    }

    pub fn model_2(&mut self) -> Result<PhaseLabel, HEAError> {
        EnthalpyDeltaModel.evaluate(self)
    }

    pub fn model_3(&mut self) -> Result<PhaseLabel, HEAError> {
        OmegaGammaModel.evaluate(self)
    }

    pub fn model_4(&mut self) -> Result<PhaseLabel, HEAError> {
        LambdaModel.evaluate(self)
    }

    pub fn model_5(&mut self) -> Result<PhaseLabel, HEAError> {
        UnsupportedModel { name: "Model 5" }.evaluate(self)
    }

    pub fn model_6(&mut self) -> Result<PhaseLabel, HEAError> {
        FormationEnthalpyModel.evaluate(self)
    }

    /// k₂ = 0.6, annealing at 0.6·Tm
    pub fn model_7(&mut self) -> Result<PhaseLabel, HEAError> {
        CriticalRatioModel::default().evaluate(self)
    }

    /// `annealing_temperature` in K, `None` for 0.6·Tm
    pub fn model_7_with(
        &mut self,
        k2: f64,
        annealing_temperature: Option<f64>,
    ) -> Result<PhaseLabel, HEAError> {
        CriticalRatioModel {
            k2,
            annealing_temperature,
        }
        .evaluate(self)
    }

    pub fn model_8(&mut self) -> Result<PhaseLabel, HEAError> {
        UnsupportedModel { name: "Model 8" }.evaluate(self)
    }

    /// Runs models 1 to 8. Unsupported and undefined models become outcomes,
    /// a data error stops the run.
    pub fn run_models(&mut self) -> Result<Vec<ModelOutcome>, HEAError> {
        PhaseModel::all()
            .iter()
            .map(|model| ModelOutcome::from_evaluation(model.evaluate(self)))
            .collect()
    }

    /// Every quantity and model outcome in one record, or the first data error
    pub fn calculate(&mut self) -> Result<AlloyResult, HEAError> {
        let result = AlloyResult {
            formula: self.formula.clone(),
            composition: self.composition.clone(),
            atomic_fractions: self.fractions.clone(),
            density: self.density()?,
            atomic_size_difference: self.atomic_size_difference()?,
            omega: self.omega_parameter()?,
            gamma: self.gamma_parameter()?,
            lambda: self.lambda_parameter()?,
            valence_electron_concentration: self.valence_electron_concentration()?,
            mixing_enthalpy: self.mixing_enthalpy()?,
            mixing_entropy: self.mixing_entropy()?,
            formation_enthalpy: self.formation_enthalpy()?,
            min_formation_enthalpy: self.min_formation_enthalpy()?,
            melting_temperature: self.melting_temperature()?,
            microstructure: self.microstructure()?,
            models: self.run_models()?,
        };
        info!("{}: calculation complete", self.formula);
        Ok(result)
    }
}
