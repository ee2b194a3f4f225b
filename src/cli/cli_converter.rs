use super::cli_main::{get_user_input, prompt};
use crate::Alloys::converter::{CompositionConverter, CompositionUnit};
use crate::Data::data_tables::DataTables;

/// `convert <from> <to> <El=value,...>`
pub fn convert_command(args: &[String]) -> Result<(), String> {
    let [from, to, amounts] = args else {
        return Err("convert: expected <from> <to> <El=value,...>".to_string());
    };
    run_conversion(from, to, amounts)
}

fn run_conversion(from: &str, to: &str, amounts: &str) -> Result<(), String> {
    let from = from
        .parse::<CompositionUnit>()
        .map_err(|e| e.to_string())?;
    let to = to.parse::<CompositionUnit>().map_err(|e| e.to_string())?;
    let values = parse_amounts(amounts)?;
    let tables = DataTables::global().map_err(|e| e.to_string())?;
    let converter =
        CompositionConverter::new(&tables.elements, &values).map_err(|e| e.to_string())?;
    let converted = converter.convert(from, to);
    for (symbol, value) in converter.labelled(&converted) {
        println!("{:<3} {:>9.4} {}", symbol, value, to);
    }
    Ok(())
}

/// `"Al=35, Ti=35,V=20"` -> [("Al", 35.0), ("Ti", 35.0), ("V", 20.0)]
pub fn parse_amounts(text: &str) -> Result<Vec<(String, f64)>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (symbol, value) = item
                .split_once('=')
                .ok_or_else(|| format!("'{}' is not of the form El=value", item))?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a number", value.trim()))?;
            Ok((symbol.trim().to_string(), value))
        })
        .collect()
}

pub fn converter_menu() {
    println!("\n=== at% / wt% / vol% conversion ===");
    prompt("Convert from (at, wt, vol): ");
    let from = get_user_input();
    prompt("Convert to (at, wt, vol): ");
    let to = get_user_input();
    prompt("Amounts (e.g. Al=35,Ti=35,V=20,Cr=5,Mn=5): ");
    let amounts = get_user_input();
    if let Err(e) = run_conversion(from.trim(), to.trim(), amounts.trim()) {
        println!("Error: {}", e);
    }
}
