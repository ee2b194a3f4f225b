/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Alloys::HEA_calculator::{HEACalculator, HEAError, Quantity, R};
    use crate::Alloys::composition::Composition;
    use crate::Alloys::formula_parser::FormulaError;
    use crate::Alloys::phase_models::{Microstructure, ModelOutcome, PhaseLabel};
    use crate::Data::DataError;
    use crate::Data::data_tables::DataTables;
    use crate::Data::elements::ElementTable;
    use crate::Data::pair_enthalpy::{PairTable, PairTableKind};
    use approx::assert_relative_eq;

    fn tables() -> DataTables {
        DataTables::builtin().unwrap()
    }

    #[test]
    fn test_fecocrni_quantities() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
        assert_relative_eq!(calc.mixing_enthalpy().unwrap(), -3.75, epsilon = 1e-9);
        assert_relative_eq!(calc.formation_enthalpy().unwrap(), -52.75, epsilon = 1e-9);
        assert_eq!(calc.min_formation_enthalpy().unwrap(), -97.0);
        assert_relative_eq!(calc.density().unwrap(), 8.16025, epsilon = 1e-4);
        assert_relative_eq!(
            calc.valence_electron_concentration().unwrap(),
            8.25,
            epsilon = 1e-12
        );
        assert_eq!(calc.melting_temperature().unwrap(), 1858.0);
        // metallic (CN12) radii; Slater's 1964 radii give about 1.82
        assert_relative_eq!(calc.atomic_size_difference().unwrap(), 1.17616, epsilon = 1e-4);
        assert_relative_eq!(calc.mixing_entropy().unwrap(), 11.52629, epsilon = 1e-4);
        assert_relative_eq!(calc.gamma_parameter().unwrap(), 1.03482, epsilon = 1e-4);
        assert_relative_eq!(calc.omega_parameter().unwrap(), 5.71089, epsilon = 1e-4);
        assert_relative_eq!(calc.lambda_parameter().unwrap(), 8.33216, epsilon = 1e-4);
        assert_eq!(calc.microstructure().unwrap(), Microstructure::FCC);
    }

    #[test]
    fn test_fecocrni_models() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
        assert_eq!(calc.model_1().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_2().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_3().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_4().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_6().unwrap(), PhaseLabel::SolidSolution);
        // k1 = 14.07 against k1_cr = 2.37
        assert_eq!(calc.model_7().unwrap(), PhaseLabel::Intermetallic);
    }

    #[test]
    fn test_unsupported_models_never_give_a_label() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
        assert!(matches!(calc.model_5(), Err(HEAError::Unsupported(_))));
        assert!(matches!(calc.model_8(), Err(HEAError::Unsupported(_))));
        assert!(matches!(calc.phi_parameter(), Err(HEAError::Unsupported(_))));
        let outcomes = calc.run_models().unwrap();
        assert_eq!(outcomes[4], ModelOutcome::Unsupported);
        assert_eq!(outcomes[7], ModelOutcome::Unsupported);
    }

    #[test]
    fn test_al03cocrfeni() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("Al0.3CoCrFeNi", &tables).unwrap();
        assert_relative_eq!(calc.mixing_enthalpy().unwrap(), -7.26879, epsilon = 1e-4);
        assert_relative_eq!(calc.density().unwrap(), 7.62527, epsilon = 1e-4);
        assert_eq!(calc.melting_temperature().unwrap(), 1794.0);
        assert_relative_eq!(calc.atomic_size_difference().unwrap(), 3.63932, epsilon = 1e-4);
        assert_relative_eq!(calc.lambda_parameter().unwrap(), 0.96839, epsilon = 1e-4);
        assert_eq!(calc.microstructure().unwrap(), Microstructure::BCCFCC);
        assert_eq!(calc.model_4().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_6().unwrap(), PhaseLabel::MultiplePhases);
        assert_eq!(calc.model_7().unwrap(), PhaseLabel::Intermetallic);
    }

    #[test]
    fn test_alcocrfeni_splits_the_models() {
        let tables = tables();
        let result = HEACalculator::with_tables("AlCoCrFeNi", &tables)
            .unwrap()
            .calculate()
            .unwrap();
        assert_relative_eq!(result.mixing_enthalpy, -12.32, epsilon = 1e-9);
        assert_eq!(result.melting_temperature, 1674.0);
        assert_eq!(result.microstructure, Microstructure::BCCFCC);
        let labels: Vec<Option<PhaseLabel>> = result.models.iter().map(|m| m.label()).collect();
        assert_eq!(
            labels,
            vec![
                Some(PhaseLabel::SolidSolution),
                Some(PhaseLabel::Intermetallic),
                Some(PhaseLabel::SolidSolution),
                Some(PhaseLabel::Intermetallic),
                None,
                Some(PhaseLabel::MultiplePhases),
                Some(PhaseLabel::Intermetallic),
                None,
            ]
        );
    }

    #[test]
    fn test_refractory_tizrhfnbta() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("TiZrHfNbTa", &tables).unwrap();
        assert_relative_eq!(calc.mixing_enthalpy().unwrap(), 2.72, epsilon = 1e-9);
        assert_relative_eq!(calc.valence_electron_concentration().unwrap(), 4.4, epsilon = 1e-12);
        assert_eq!(calc.microstructure().unwrap(), Microstructure::BCC);
        assert_relative_eq!(calc.omega_parameter().unwrap(), 12.37307, epsilon = 1e-4);
        assert_eq!(calc.model_2().unwrap(), PhaseLabel::SolidSolution);
        assert_eq!(calc.model_4().unwrap(), PhaseLabel::Intermetallic);
        assert_eq!(calc.model_6().unwrap(), PhaseLabel::SolidSolution);
    }

    #[test]
    fn test_equiatomic_entropy_is_r_ln_n() {
        let tables = tables();
        for formula in ["FeNi", "AlCoCr", "FeCoCrNi", "CoCrFeMnNi", "TiZrHfNbTa", "Fe2Ni2"] {
            let mut calc = HEACalculator::with_tables(formula, &tables).unwrap();
            let n = calc.composition().len() as f64;
            assert_relative_eq!(calc.mixing_entropy().unwrap(), R * n.ln(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_element_order_does_not_matter() {
        let tables = tables();
        let a = HEACalculator::with_tables("FeCoCrNi", &tables)
            .unwrap()
            .calculate()
            .unwrap();
        let b = HEACalculator::with_tables("NiCrCoFe", &tables)
            .unwrap()
            .calculate()
            .unwrap();
        assert_relative_eq!(a.mixing_enthalpy, b.mixing_enthalpy, epsilon = 1e-12);
        assert_relative_eq!(a.density, b.density, epsilon = 1e-12);
        assert_relative_eq!(a.omega, b.omega, epsilon = 1e-9);
        assert_eq!(a.models, b.models);
    }

    #[test]
    fn test_single_element_is_rejected() {
        let tables = tables();
        assert_eq!(
            HEACalculator::with_tables("Fe", &tables).unwrap_err(),
            HEAError::SingleElement("Fe".to_string())
        );
        // repeated symbol still a single element
        assert!(matches!(
            HEACalculator::with_tables("Fe2(Fe)3", &tables),
            Err(HEAError::SingleElement(_))
        ));
    }

    #[test]
    fn test_parse_errors_are_not_data_errors() {
        let tables = tables();
        assert!(matches!(
            HEACalculator::with_tables("iron and nickel", &tables),
            Err(HEAError::Formula(FormulaError::NotAFormula(_)))
        ));
        assert!(matches!(
            HEACalculator::with_tables("(FeNi", &tables),
            Err(HEAError::Formula(FormulaError::UnbalancedParentheses(_)))
        ));
    }

    #[test]
    fn test_unknown_element_is_a_data_error() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoXx", &tables).unwrap();
        assert_eq!(
            calc.melting_temperature().unwrap_err(),
            HEAError::Data {
                quantity: Quantity::MeltingTemperature,
                source: DataError::UnknownElement("Xx".to_string()),
            }
        );
        assert!(matches!(
            calc.mixing_enthalpy(),
            Err(HEAError::Data {
                quantity: Quantity::MixingEnthalpy,
                source: DataError::MissingPair { .. },
            })
        ));
        assert!(matches!(
            calc.density(),
            Err(HEAError::Data { quantity: Quantity::Density, .. })
        ));
        // the whole record fails instead of carrying blanks
        assert!(calc.calculate().is_err());
    }

    #[test]
    fn test_undefined_radius_or_volume_is_reported() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FePm", &tables).unwrap();
        assert!(matches!(
            calc.density(),
            Err(HEAError::Data {
                quantity: Quantity::Density,
                source: DataError::UndefinedProperty { property: "atomic volume", .. },
            })
        ));
    }

    #[test]
    fn test_missing_pair_names_the_pair() {
        let mut mixing = PairTable::new(PairTableKind::MixingEnthalpy);
        mixing.insert("Fe", "Ni", -2.0);
        let tables = DataTables::new(
            ElementTable::builtin().unwrap(),
            mixing,
            PairTable::builtin(PairTableKind::FormationEnthalpy).unwrap(),
        );
        let mut calc = HEACalculator::with_tables("FeNiCo", &tables).unwrap();
        let err = calc.mixing_enthalpy().unwrap_err();
        assert_eq!(
            err,
            HEAError::Data {
                quantity: Quantity::MixingEnthalpy,
                source: DataError::MissingPair {
                    first: "Co".to_string(),
                    second: "Fe".to_string(),
                    table: "mixing enthalpy",
                },
            }
        );
        assert!(err.to_string().contains("Co-Fe"));
    }

    #[test]
    fn test_silicon_alloy_has_mixing_but_no_formation_data() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("CoCrFeNiSi0.5", &tables).unwrap();
        // 4 Σ xᵢxⱼ ΔHᵢⱼ with x = 1/4.5 and 0.5/4.5
        assert_relative_eq!(calc.mixing_enthalpy().unwrap(), -17.77778, epsilon = 1e-4);
        assert!(calc.omega_parameter().unwrap() > 0.0);
        // the formation table has no Si compounds
        assert!(matches!(
            calc.formation_enthalpy(),
            Err(HEAError::Data {
                quantity: Quantity::FormationEnthalpy,
                source: DataError::MissingPair { .. },
            })
        ));
        assert!(matches!(
            calc.calculate(),
            Err(HEAError::Data {
                quantity: Quantity::FormationEnthalpy,
                ..
            })
        ));

        let mut calc = HEACalculator::with_tables("TiZrNbSi0.3", &tables).unwrap();
        assert!(calc.mixing_enthalpy().unwrap() < 0.0);
    }

    #[test]
    fn test_zero_mixing_enthalpy() {
        let mut mixing = PairTable::new(PairTableKind::MixingEnthalpy);
        mixing.insert("Co", "Ni", 0.0);
        let tables = DataTables::new(
            ElementTable::builtin().unwrap(),
            mixing,
            PairTable::builtin(PairTableKind::FormationEnthalpy).unwrap(),
        );
        let mut calc = HEACalculator::with_tables("CoNi", &tables).unwrap();
        assert_eq!(calc.omega_parameter().unwrap(), f64::INFINITY);
        assert_eq!(calc.model_1().unwrap(), PhaseLabel::SolidSolution);
        assert!(matches!(
            calc.model_7(),
            Err(HEAError::Undefined { quantity: Quantity::EnthalpyRatio, .. })
        ));
        let outcomes = calc.run_models().unwrap();
        assert!(matches!(outcomes[6], ModelOutcome::Undefined(_)));
    }

    #[test]
    fn test_model_7_parameters() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
        assert_eq!(
            calc.model_7_with(0.6, None).unwrap(),
            calc.model_7().unwrap()
        );
        // k1_cr = 1 + Ω(T)(1 - k2) passes k1 = 14.07 once T is high enough
        assert_eq!(
            calc.model_7_with(0.0, Some(5000.0)).unwrap(),
            PhaseLabel::SolidSolution
        );
        assert!(matches!(
            calc.model_7_with(0.6, Some(f64::NAN)),
            Err(HEAError::Undefined { quantity: Quantity::Omega, .. })
        ));
    }

    #[test]
    fn test_omega_at_explicit_temperature() {
        let tables = tables();
        let mut calc = HEACalculator::with_tables("FeCoCrNi", &tables).unwrap();
        let s = calc.mixing_entropy().unwrap();
        assert_relative_eq!(
            calc.omega_at(1000.0).unwrap(),
            1000.0 * s / 3750.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            calc.omega_at(1858.0).unwrap(),
            calc.omega_parameter().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_composition_derivations() {
        let tables = tables();
        let calc = HEACalculator::with_tables("Al0.3CoCrFeNi", &tables).unwrap();
        assert_relative_eq!(calc.total_amount(), 4.3, epsilon = 1e-12);
        assert_eq!(calc.element_pairs().len(), 10);
        assert_eq!(calc.pair_fractions().len(), 10);
        let sum: f64 = calc.atomic_fractions().iter().map(|(_, x)| x).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            calc.pair_fractions()[0],
            (0.3 / 4.3) * (1.0 / 4.3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_from_composition() {
        let tables = tables();
        let composition = Composition::from_pairs([("Fe", 25.0), ("Ni", 75.0)]).unwrap();
        let mut calc =
            HEACalculator::from_composition("Fe25Ni75", composition, &tables).unwrap();
        assert_relative_eq!(
            calc.mixing_enthalpy().unwrap(),
            4.0 * 0.25 * 0.75 * -2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_global_tables_calculator() {
        let mut calc = HEACalculator::new("CoCrFeMnNi").unwrap();
        assert_relative_eq!(calc.mixing_enthalpy().unwrap(), -4.16, epsilon = 1e-9);
        assert_eq!(calc.melting_temperature().unwrap(), 1790.0);
        assert_eq!(calc.microstructure().unwrap(), Microstructure::FCC);
    }
}
