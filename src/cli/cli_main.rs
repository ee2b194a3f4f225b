use super::cli_converter::{convert_command, converter_menu};
use super::cli_examples::examples_menu;
use super::cli_library::library_menu;
use super::cli_range::{range_command, range_menu};
use super::cli_single::{single_alloy_menu, single_command};
use std::io::{self, Write};

pub const USAGE: &str = "\
Usage:
  HEACalc                                   interactive menu
  HEACalc single <formula> [--json]         all quantities and models for one alloy
  HEACalc range <elements> [--start S] [--end E] [--step D] [--csv]
                                            screen every composition on the grid
  HEACalc convert <at|wt|vol> <at|wt|vol> <El=value,...>
                                            convert between atomic, weight and volume percent
Logging level is taken from the HEACALC_LOG environment variable (error, warn, info, debug).";

/// No arguments opens the menu, otherwise the first argument selects a command
pub fn run_cli() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu();
        Ok(())
    } else {
        run_command(&args)
    }
}

pub fn run_command(args: &[String]) -> Result<(), String> {
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => return Err(USAGE.to_string()),
    };
    match command {
        "single" => single_command(rest),
        "range" => range_command(rest),
        "convert" => convert_command(rest),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => Err(format!("unknown command '{}'\n{}", other, USAGE)),
    }
}

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => single_alloy_menu(),
            "2" => range_menu(),
            "3" => converter_menu(),
            "4" => examples_menu(),
            "5" => library_menu(),
            "0" | "" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to HEACalc: phase prediction for high-entropy alloys \n \x1b[0m"
    );
    println!("\x1b[33m1. Single alloy\x1b[0m");
    println!("\x1b[33m2. Composition range\x1b[0m");
    println!("\x1b[33m3. at% / wt% / vol% conversion\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m5. Reference data libraries\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("\x1b[36mEnter your choice: \x1b[0m");
}

pub(crate) fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

/// one line from stdin; an unreadable or closed stdin reads as an empty line
pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}

/// Value following `flag` in `args`, parsed; `default` when the flag is absent
pub(crate) fn flag_value(args: &[String], flag: &str, default: f64) -> Result<f64, String> {
    match args.iter().position(|a| a == flag) {
        Some(i) => {
            let value = args
                .get(i + 1)
                .ok_or_else(|| format!("{} needs a value", flag))?;
            value
                .parse::<f64>()
                .map_err(|_| format!("{} expects a number, got '{}'", flag, value))
        }
        None => Ok(default),
    }
}
