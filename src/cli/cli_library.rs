use super::cli_main::{get_user_input, prompt};
use crate::library_manager::{with_library_manager, with_library_manager_mut};
use std::collections::HashMap;

/// (menu label, configuration key)
const LIBRARIES: [(&str, &str); 3] = [
    ("Element properties", "elements"),
    ("Mixing enthalpy", "mixing_enthalpy"),
    ("Formation enthalpy", "formation_enthalpy"),
];

pub fn library_menu() {
    loop {
        show_libraries();
        println!("1. Set element properties file");
        println!("2. Set mixing enthalpy file");
        println!("3. Set formation enthalpy file");
        println!("4. Reset to built-in tables");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        let result = match choice.trim() {
            "1" => set_library(0),
            "2" => set_library(1),
            "3" => set_library(2),
            "4" => with_library_manager_mut(|manager| manager.reset_to_defaults())
                .map_err(|e| e.to_string()),
            "0" | "" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        match result {
            Ok(()) => println!("Saved. New tables are used from the next start."),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn show_libraries() {
    let (config, file) = with_library_manager(|manager| {
        (manager.get_config().clone(), manager.config_file().to_string())
    });
    println!("\n=== Reference data libraries ({}) ===", file);
    let paths = [
        &config.elements,
        &config.mixing_enthalpy,
        &config.formation_enthalpy,
    ];
    for ((label, _), path) in LIBRARIES.iter().zip(paths) {
        println!("  {:<20}{}", label, path.as_deref().unwrap_or("built-in"));
    }
}

fn set_library(index: usize) -> Result<(), String> {
    let (label, key) = LIBRARIES[index];
    prompt(&format!("{} file (JSON): ", label));
    let input = get_user_input();
    let path = input.trim();
    if path.is_empty() {
        return Err("no file given".to_string());
    }
    with_library_manager_mut(|manager| manager.update_libraries(HashMap::from([(key, path)])))
        .map_err(|e| e.to_string())
}
