use super::cli_main::{get_user_input, prompt};
use crate::Alloys::HEA_calculator::HEACalculator;

/// `single <formula> [--json]`
pub fn single_command(args: &[String]) -> Result<(), String> {
    let json = args.iter().any(|a| a == "--json");
    let formula = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or_else(|| "single: missing formula".to_string())?;
    let mut calc = HEACalculator::new(formula).map_err(|e| e.to_string())?;
    let result = calc.calculate().map_err(|e| e.to_string())?;
    if json {
        let text = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        result.pretty_print();
    }
    Ok(())
}

pub fn single_alloy_menu() {
    loop {
        println!("\n=== Single alloy ===");
        prompt("Enter a formula (e.g. Al0.3CoCrFeNi), empty line to go back: ");
        let input = get_user_input();
        let formula = input.trim();
        if formula.is_empty() {
            break;
        }
        if let Err(e) = single_command(&[formula.to_string()]) {
            println!("Error: {}", e);
        }
    }
}
