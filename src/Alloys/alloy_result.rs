use super::composition::Composition;
use super::phase_models::{Microstructure, ModelOutcome};
use prettytable::{Table, row};
use serde::Serialize;
use std::fmt;

/// Everything the calculator derives for one alloy.
/// `models[i]` is the outcome of model `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlloyResult {
    pub formula: String,
    pub composition: Composition,
    pub atomic_fractions: Vec<(String, f64)>,
    /// g/cm³
    pub density: f64,
    /// %
    pub atomic_size_difference: f64,
    pub omega: f64,
    pub gamma: f64,
    pub lambda: f64,
    pub valence_electron_concentration: f64,
    /// kJ/mol
    pub mixing_enthalpy: f64,
    /// J/(K·mol)
    pub mixing_entropy: f64,
    /// meV/atom
    pub formation_enthalpy: f64,
    /// meV/atom
    pub min_formation_enthalpy: f64,
    /// K
    pub melting_temperature: f64,
    pub microstructure: Microstructure,
    pub models: Vec<ModelOutcome>,
}

const CSV_COLUMNS: [&str; 13] = [
    "formula",
    "density",
    "delta",
    "omega",
    "gamma",
    "lambda",
    "VEC",
    "H_mix",
    "S_mix",
    "H_f",
    "H_f_min",
    "T_m",
    "microstructure",
];

impl AlloyResult {
    /// (label, value, unit) rows shared by the text and table renderings
    fn scalar_rows(&self) -> Vec<(&'static str, String, &'static str)> {
        vec![
            ("Density", format!("{:.2}", self.density), "g/cm³"),
            ("Atomic size difference", format!("{:.2}", self.atomic_size_difference), "%"),
            ("Omega", format!("{:.2}", self.omega), ""),
            ("Gamma", format!("{:.3}", self.gamma), ""),
            ("Lambda", format!("{:.3}", self.lambda), ""),
            ("VEC", format!("{:.2}", self.valence_electron_concentration), ""),
            ("Mixing enthalpy", format!("{:.2}", self.mixing_enthalpy), "kJ/mol"),
            ("Mixing entropy", format!("{:.2}", self.mixing_entropy), "J/(K·mol)"),
            ("Formation enthalpy", format!("{:.2}", self.formation_enthalpy), "meV/atom"),
            (
                "Min formation enthalpy",
                format!("{:.2}", self.min_formation_enthalpy),
                "meV/atom",
            ),
            ("Melting temperature", format!("{:.0}", self.melting_temperature), "K"),
            ("Microstructure", self.microstructure.to_string(), ""),
        ]
    }

    pub fn pretty_print(&self) {
        println!("__________{}__________", self.formula);
        let mut table = Table::new();
        table.add_row(row!["quantity", "value", "unit"]);
        for (label, value, unit) in self.scalar_rows() {
            table.add_row(row![label, value, unit]);
        }
        for (i, outcome) in self.models.iter().enumerate() {
            table.add_row(row![format!("Model {}", i + 1), outcome, ""]);
        }
        table.printstd();
    }

    pub fn csv_header() -> String {
        let mut columns: Vec<String> = CSV_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend((1..=8).map(|i| format!("model_{}", i)));
        columns.join(",")
    }

    /// one CSV line in `csv_header` column order
    pub fn to_row(&self) -> String {
        let mut fields = vec![
            self.formula.clone(),
            format!("{:.4}", self.density),
            format!("{:.4}", self.atomic_size_difference),
            format!("{:.4}", self.omega),
            format!("{:.4}", self.gamma),
            format!("{:.4}", self.lambda),
            format!("{:.4}", self.valence_electron_concentration),
            format!("{:.4}", self.mixing_enthalpy),
            format!("{:.4}", self.mixing_entropy),
            format!("{:.4}", self.formation_enthalpy),
            format!("{:.4}", self.min_formation_enthalpy),
            format!("{:.0}", self.melting_temperature),
            self.microstructure.to_string(),
        ];
        fields.extend(self.models.iter().map(|m| m.to_string()));
        fields.join(",")
    }
}

impl fmt::Display for AlloyResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Alloy: {}", self.formula)?;
        for (label, value, unit) in self.scalar_rows() {
            writeln!(f, "  {:<24}{:>10} {}", label, value, unit)?;
        }
        for (i, outcome) in self.models.iter().enumerate() {
            writeln!(f, "  {:<24}{}", format!("Model {}", i + 1), outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alloys::HEA_calculator::HEACalculator;
    use crate::Data::data_tables::DataTables;

    fn fecocrni() -> AlloyResult {
        let tables = DataTables::builtin().unwrap();
        HEACalculator::with_tables("FeCoCrNi", &tables)
            .unwrap()
            .calculate()
            .unwrap()
    }

    #[test]
    fn test_csv_row_matches_header() {
        let result = fecocrni();
        let header = AlloyResult::csv_header();
        let row = result.to_row();
        assert_eq!(header.split(',').count(), 21);
        assert_eq!(row.split(',').count(), 21);
        assert!(row.starts_with("FeCoCrNi,8.1602,"));
        assert!(row.contains(",1858,FCC,Solid Solution,"));
        assert!(row.ends_with("unsupported operation"));
    }

    #[test]
    fn test_text_block() {
        let text = fecocrni().to_string();
        assert!(text.starts_with("Alloy: FeCoCrNi\n"));
        assert!(text.contains("-3.75 kJ/mol"));
        assert!(text.contains("Model 5"));
        assert!(text.contains("unsupported operation"));
    }

    #[test]
    fn test_json_uses_labels() {
        let json = serde_json::to_value(fecocrni()).unwrap();
        assert_eq!(json["microstructure"], "FCC");
        assert_eq!(json["models"][0], "Solid Solution");
        assert_eq!(json["models"][4], "unsupported operation");
        assert_eq!(json["melting_temperature"], 1858.0);
    }
}
