//! # Phase selection criteria
//!
//! Empirical rules from the HEA literature that predict whether an alloy forms a
//! single solid solution. Every rule is a small struct implementing [`PhaseCriterion`];
//! [`PhaseModel`] gathers them behind `enum_dispatch` so the calculator can run the whole
//! battery in one loop.
//!
//! | model | rule | source |
//! |---|---|---|
//! | 1 | Ω ≥ 1.1 and δ ≤ 6.6 % | Yang, Zhang, Mater. Chem. Phys. 132 (2012) 233 |
//! | 2 | -11.6 < ΔHmix < 3.2 kJ/mol and δ < 6.6 % | Guo, Liu, Prog. Nat. Sci. 21 (2011) 433 |
//! | 3 | Ω ≥ 1.1 and γ < 1.175 | Wang, Li, Yang, Zhang, Scripta Mater. 94 (2015) 28 |
//! | 4 | Λ > 0.96 | Singh, Koch et al., Acta Mater. 66 (2014) 163 |
//! | 5 | not available | |
//! | 6 | -0.55·Tm·ΔSmix < ΔHf,min < 37 meV/atom | Troparevsky et al., Phys. Rev. X 5 (2015) 011041 |
//! | 7 | k₁ᶜʳ > ΔHf/ΔHmix | Senkov, Miracle, J. Alloys Compd. 658 (2016) 603 |
//! | 8 | not available | |
//!
//! The microstructure rule (HCP / FCC / BCC / BCC+FCC from VEC) lives here too.
use super::HEA_calculator::{HEACalculator, HEAError, Quantity};
use enum_dispatch::enum_dispatch;
use serde::{Serialize, Serializer};
use std::fmt;

/// J/mol -> meV/atom (1 / 96.485)
pub const JOULE_PER_MOL_TO_MEV_PER_ATOM: f64 = 0.0103642688;
/// k₂ of the Senkov-Miracle criterion
pub const DEFAULT_K2: f64 = 0.6;
/// annealing temperature as a fraction of the melting temperature
pub const DEFAULT_ANNEALING_FRACTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseLabel {
    SolidSolution,
    Intermetallic,
    MultiplePhases,
}

impl PhaseLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseLabel::SolidSolution => "Solid Solution",
            PhaseLabel::Intermetallic => "Intermetallic",
            PhaseLabel::MultiplePhases => "Multiple Phases",
        }
    }

    fn solid_solution_or(is_solid_solution: bool, otherwise: PhaseLabel) -> PhaseLabel {
        if is_solid_solution {
            PhaseLabel::SolidSolution
        } else {
            otherwise
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PhaseLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// crystal structure expected from the valence electron concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Microstructure {
    HCP,
    FCC,
    BCC,
    BCCFCC,
}

impl Microstructure {
    /// Thresholds are checked in order, the first that holds wins
    pub fn from_vec(vec: f64) -> Self {
        if (2.5..=3.5).contains(&vec) {
            Microstructure::HCP
        } else if vec >= 8.0 {
            Microstructure::FCC
        } else if vec <= 6.87 {
            Microstructure::BCC
        } else {
            Microstructure::BCCFCC
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Microstructure::HCP => "HCP",
            Microstructure::FCC => "FCC",
            Microstructure::BCC => "BCC",
            Microstructure::BCCFCC => "BCC+FCC",
        }
    }
}

impl fmt::Display for Microstructure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Microstructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What a model slot of an [`AlloyResult`](super::alloy_result::AlloyResult) holds
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    Predicted(PhaseLabel),
    /// the model has no implementation
    Unsupported,
    /// inputs exist but the rule has no value for them (reason attached)
    Undefined(String),
}

impl ModelOutcome {
    pub fn label(&self) -> Option<PhaseLabel> {
        match self {
            ModelOutcome::Predicted(label) => Some(*label),
            _ => None,
        }
    }

    /// Folds a model evaluation into an outcome. Data errors are not outcomes and are
    /// handed back to the caller.
    pub fn from_evaluation(result: Result<PhaseLabel, HEAError>) -> Result<Self, HEAError> {
        match result {
            Ok(label) => Ok(ModelOutcome::Predicted(label)),
            Err(HEAError::Unsupported(_)) => Ok(ModelOutcome::Unsupported),
            Err(HEAError::Undefined { quantity, reason }) => {
                Ok(ModelOutcome::Undefined(format!("{}: {}", quantity, reason)))
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for ModelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelOutcome::Predicted(label) => write!(f, "{}", label),
            ModelOutcome::Unsupported => write!(f, "unsupported operation"),
            ModelOutcome::Undefined(reason) => write!(f, "undefined ({})", reason),
        }
    }
}

impl Serialize for ModelOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[enum_dispatch]
pub trait PhaseCriterion {
    /// short name shown in reports, "Model 1" ... "Model 8"
    fn name(&self) -> &'static str;
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError>;
}

/// Ω ≥ 1.1 and δ ≤ 6.6
#[derive(Debug, Clone, Copy, Default)]
pub struct OmegaDeltaModel;

impl OmegaDeltaModel {
    pub fn classify(omega: f64, delta: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(omega >= 1.1 && delta <= 6.6, PhaseLabel::Intermetallic)
    }
}

impl PhaseCriterion for OmegaDeltaModel {
    fn name(&self) -> &'static str {
        "Model 1"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        let omega = calculator.omega_parameter()?;
        let delta = calculator.atomic_size_difference()?;
        Ok(Self::classify(omega, delta))
    }
}

/// -11.6 < ΔHmix < 3.2 and δ < 6.6
#[derive(Debug, Clone, Copy, Default)]
pub struct EnthalpyDeltaModel;

impl EnthalpyDeltaModel {
    pub fn classify(mixing_enthalpy: f64, delta: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(
            mixing_enthalpy > -11.6 && mixing_enthalpy < 3.2 && delta < 6.6,
            PhaseLabel::Intermetallic,
        )
    }
}

impl PhaseCriterion for EnthalpyDeltaModel {
    fn name(&self) -> &'static str {
        "Model 2"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        let h = calculator.mixing_enthalpy()?;
        let delta = calculator.atomic_size_difference()?;
        Ok(Self::classify(h, delta))
    }
}

/// Ω ≥ 1.1 and γ < 1.175
#[derive(Debug, Clone, Copy, Default)]
pub struct OmegaGammaModel;

impl OmegaGammaModel {
    pub fn classify(omega: f64, gamma: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(omega >= 1.1 && gamma < 1.175, PhaseLabel::Intermetallic)
    }
}

impl PhaseCriterion for OmegaGammaModel {
    fn name(&self) -> &'static str {
        "Model 3"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        let omega = calculator.omega_parameter()?;
        let gamma = calculator.gamma_parameter()?;
        Ok(Self::classify(omega, gamma))
    }
}

/// Λ > 0.96
#[derive(Debug, Clone, Copy, Default)]
pub struct LambdaModel;

impl LambdaModel {
    pub fn classify(lambda: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(lambda > 0.96, PhaseLabel::Intermetallic)
    }
}

impl PhaseCriterion for LambdaModel {
    fn name(&self) -> &'static str {
        "Model 4"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        Ok(Self::classify(calculator.lambda_parameter()?))
    }
}

/// Slot for a criterion that has no implementation; evaluation always fails
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedModel {
    pub name: &'static str,
}

impl PhaseCriterion for UnsupportedModel {
    fn name(&self) -> &'static str {
        self.name
    }
    fn evaluate(&self, _calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        Err(HEAError::Unsupported(self.name.to_string()))
    }
}

/// -0.55·Tm·ΔSmix (in meV/atom) < ΔHf,min < 37 meV/atom
#[derive(Debug, Clone, Copy, Default)]
pub struct FormationEnthalpyModel;

impl FormationEnthalpyModel {
    /// lower bound of the window, meV/atom
    pub fn lower_bound(melting_temperature: f64, mixing_entropy: f64) -> f64 {
        -1000.0
            * (0.55 * melting_temperature)
            * mixing_entropy
            * (JOULE_PER_MOL_TO_MEV_PER_ATOM / 1000.0)
    }

    pub fn classify(min_formation_enthalpy: f64, lower_bound: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(
            lower_bound < min_formation_enthalpy && min_formation_enthalpy < 37.0,
            PhaseLabel::MultiplePhases,
        )
    }
}

impl PhaseCriterion for FormationEnthalpyModel {
    fn name(&self) -> &'static str {
        "Model 6"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        let tm = calculator.melting_temperature()?;
        let s = calculator.mixing_entropy()?;
        let min_hf = calculator.min_formation_enthalpy()?;
        Ok(Self::classify(min_hf, Self::lower_bound(tm, s)))
    }
}

/// Solid solution when k₁ᶜʳ = Ω(T_anneal)·(1 - k₂) + 1 exceeds k₁ = ΔHf / ΔHmix.
/// `annealing_temperature` of `None` means 0.6·Tm.
#[derive(Debug, Clone, Copy)]
pub struct CriticalRatioModel {
    pub k2: f64,
    pub annealing_temperature: Option<f64>,
}

impl Default for CriticalRatioModel {
    fn default() -> Self {
        Self {
            k2: DEFAULT_K2,
            annealing_temperature: None,
        }
    }
}

impl CriticalRatioModel {
    pub fn critical_ratio(omega_at_annealing: f64, k2: f64) -> f64 {
        omega_at_annealing * (1.0 - k2) + 1.0
    }

    pub fn classify(k1: f64, k1_critical: f64) -> PhaseLabel {
        PhaseLabel::solid_solution_or(k1_critical > k1, PhaseLabel::Intermetallic)
    }
}

impl PhaseCriterion for CriticalRatioModel {
    fn name(&self) -> &'static str {
        "Model 7"
    }
    fn evaluate(&self, calculator: &mut HEACalculator) -> Result<PhaseLabel, HEAError> {
        let h_mix = calculator.mixing_enthalpy()?;
        if h_mix == 0.0 {
            return Err(HEAError::Undefined {
                quantity: Quantity::EnthalpyRatio,
                reason: "mixing enthalpy is zero".to_string(),
            });
        }
        let k1 = calculator.formation_enthalpy()? / h_mix;
        let temperature = match self.annealing_temperature {
            Some(t) => t,
            None => DEFAULT_ANNEALING_FRACTION * calculator.melting_temperature()?,
        };
        let k1_critical = Self::critical_ratio(calculator.omega_at(temperature)?, self.k2);
        Ok(Self::classify(k1, k1_critical))
    }
}

#[derive(Debug, Clone, Copy)]
#[enum_dispatch(PhaseCriterion)]
pub enum PhaseModel {
    OmegaDelta(OmegaDeltaModel),
    EnthalpyDelta(EnthalpyDeltaModel),
    OmegaGamma(OmegaGammaModel),
    Lambda(LambdaModel),
    FormationEnthalpy(FormationEnthalpyModel),
    CriticalRatio(CriticalRatioModel),
    Unsupported(UnsupportedModel),
}

impl PhaseModel {
    /// Model 1 ... Model 8 in order, default parameters
    pub fn all() -> [PhaseModel; 8] {
        [
            OmegaDeltaModel.into(),
            EnthalpyDeltaModel.into(),
            OmegaGammaModel.into(),
            LambdaModel.into(),
            UnsupportedModel { name: "Model 5" }.into(),
            FormationEnthalpyModel.into(),
            CriticalRatioModel::default().into(),
            UnsupportedModel { name: "Model 8" }.into(),
        ]
    }
}
