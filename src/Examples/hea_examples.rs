use crate::Alloys::HEA_calculator::{HEACalculator, HEAError};
use crate::Alloys::composition_space::CompositionSpace;
use crate::Alloys::converter::{CompositionConverter, CompositionUnit};
use crate::Alloys::phase_models::PhaseLabel;
use crate::Data::data_tables::DataTables;
use prettytable::{Table, row};

pub fn hea_examples(task: usize) {
    if let Err(e) = run_example(task) {
        println!("Example {} failed: {}", task, e);
    }
}

fn run_example(task: usize) -> Result<(), HEAError> {
    let tables = DataTables::global()?;
    match task {
        0 => {
            // Cantor-type alloy, every quantity in one record
            let mut calc = HEACalculator::with_tables("FeCoCrNi", tables)?;
            let result = calc.calculate()?;
            result.pretty_print();
        }
        1 => {
            // aluminium pushes CoCrFeNi from FCC towards BCC
            let mut table = Table::new();
            table.add_row(row!["alloy", "VEC", "structure", "H_mix", "delta", "Model 1", "Model 2"]);
            for formula in ["CoCrFeNi", "Al0.3CoCrFeNi", "Al0.5CoCrFeNi", "AlCoCrFeNi", "Al2CoCrFeNi"] {
                let mut calc = HEACalculator::with_tables(formula, tables)?;
                table.add_row(row![
                    formula,
                    format!("{:.2}", calc.valence_electron_concentration()?),
                    calc.microstructure()?,
                    format!("{:.2}", calc.mixing_enthalpy()?),
                    format!("{:.2}", calc.atomic_size_difference()?),
                    calc.model_1()?,
                    calc.model_2()?
                ]);
            }
            table.printstd();
        }
        2 => {
            // Senkov-Miracle criterion at several annealing temperatures
            let mut calc = HEACalculator::with_tables("TiZrHfNbTa", tables)?;
            let tm = calc.melting_temperature()?;
            for fraction in [0.4, 0.6, 0.8, 1.0] {
                let t = fraction * tm;
                println!(
                    "T = {:.0} K: omega = {:.2}, model 7: {}",
                    t,
                    calc.omega_at(t)?,
                    calc.model_7_with(0.6, Some(t))?
                );
            }
        }
        3 => {
            let values: Vec<(String, f64)> = [("Al", 35.0), ("Ti", 35.0), ("V", 20.0), ("Cr", 5.0), ("Mn", 5.0)]
                .iter()
                .map(|(s, v)| (s.to_string(), *v))
                .collect();
            let converter = CompositionConverter::new(&tables.elements, &values)?;
            for to in [CompositionUnit::Weight, CompositionUnit::Volume] {
                let converted = converter.convert(CompositionUnit::Atomic, to);
                println!("at% -> {}: {:?}", to, converter.labelled(&converted));
            }
        }
        4 => {
            // every FeCoNi alloy on a 10 at.% grid, solid solutions by model 1 only
            let space = CompositionSpace::new("FeCoNi", 10.0, 80.0, 10.0)?;
            let results = space.screen(tables);
            for result in results.into_iter().flatten() {
                if result.models[0].label() == Some(PhaseLabel::SolidSolution) {
                    println!("{}", result.to_row());
                }
            }
        }
        _ => println!("No example with number {}", task),
    }
    Ok(())
}
