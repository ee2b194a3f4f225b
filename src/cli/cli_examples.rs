use super::cli_main::{get_user_input, prompt};
use crate::Examples::hea_examples::hea_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. FeCoCrNi, full report");
        println!("2. Aluminium series AlxCoCrFeNi");
        println!("3. TiZrHfNbTa, model 7 against annealing temperature");
        println!("4. Al35Ti35V20Cr5Mn5, at% to wt% and vol%");
        println!("5. FeCoNi range screening");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        match choice.trim() {
            "1" => hea_examples(0),
            "2" => hea_examples(1),
            "3" => hea_examples(2),
            "4" => hea_examples(3),
            "5" => hea_examples(4),
            "0" | "" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
