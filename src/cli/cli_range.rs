use super::cli_main::{flag_value, get_user_input, prompt};
use crate::Alloys::alloy_result::AlloyResult;
use crate::Alloys::composition_space::CompositionSpace;
use crate::Data::data_tables::DataTables;
use prettytable::{Table, row};

pub const DEFAULT_START: f64 = 0.0;
pub const DEFAULT_END: f64 = 100.0;
pub const DEFAULT_STEP: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
struct RangeArgs {
    elements: String,
    start: f64,
    end: f64,
    step: f64,
    csv: bool,
}

fn parse_range_args(args: &[String]) -> Result<RangeArgs, String> {
    let elements = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .ok_or_else(|| "range: missing element list".to_string())?;
    Ok(RangeArgs {
        elements: elements.clone(),
        start: flag_value(args, "--start", DEFAULT_START)?,
        end: flag_value(args, "--end", DEFAULT_END)?,
        step: flag_value(args, "--step", DEFAULT_STEP)?,
        csv: args.iter().any(|a| a == "--csv"),
    })
}

/// `range <elements> [--start S] [--end E] [--step D] [--csv]`
pub fn range_command(args: &[String]) -> Result<(), String> {
    let a = parse_range_args(args)?;
    run_range(&a.elements, a.start, a.end, a.step, a.csv)
}

fn run_range(elements: &str, start: f64, end: f64, step: f64, csv: bool) -> Result<(), String> {
    let space = CompositionSpace::new(elements, start, end, step).map_err(|e| e.to_string())?;
    let tables = DataTables::global().map_err(|e| e.to_string())?;
    let results = space.screen(tables);
    if results.is_empty() {
        println!("No composition on this grid adds up to 100 at.%");
        return Ok(());
    }
    if csv {
        println!("{}", AlloyResult::csv_header());
        for result in &results {
            match result {
                Ok(result) => println!("{}", result.to_row()),
                Err(e) => eprintln!("{}", e),
            }
        }
        return Ok(());
    }
    let mut table = Table::new();
    table.add_row(row![
        "alloy", "structure", "VEC", "H_mix", "delta", "omega", "M1", "M2", "M3", "M4", "M6", "M7"
    ]);
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(r) => {
                table.add_row(row![
                    r.formula,
                    r.microstructure,
                    format!("{:.2}", r.valence_electron_concentration),
                    format!("{:.2}", r.mixing_enthalpy),
                    format!("{:.2}", r.atomic_size_difference),
                    format!("{:.2}", r.omega),
                    r.models[0],
                    r.models[1],
                    r.models[2],
                    r.models[3],
                    r.models[5],
                    r.models[6]
                ]);
            }
            Err(e) => {
                failed += 1;
                println!("{}", e);
            }
        }
    }
    table.printstd();
    println!(
        "{} compositions, {} could not be calculated",
        results.len(),
        failed
    );
    Ok(())
}

pub fn range_menu() {
    println!("\n=== Composition range ===");
    prompt("Elements (e.g. CoCrFeNi): ");
    let elements = get_user_input().trim().to_string();
    if elements.is_empty() {
        return;
    }
    let start = ask_number("Start, at.%", DEFAULT_START);
    let end = ask_number("End (exclusive), at.%", DEFAULT_END);
    let step = ask_number("Step, at.%", DEFAULT_STEP);
    if let Err(e) = run_range(&elements, start, end, step, false) {
        println!("Error: {}", e);
    }
}

fn ask_number(label: &str, default: f64) -> f64 {
    prompt(&format!("{} [{}]: ", label, default));
    let input = get_user_input();
    match input.trim() {
        "" => default,
        text => text.parse().unwrap_or_else(|_| {
            println!("'{}' is not a number, using {}", text, default);
            default
        }),
    }
}
