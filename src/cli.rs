/// entry point: argument dispatch and the interactive main menu
pub mod cli_main;
/// single alloy calculation
pub mod cli_single;
/// composition range screening
pub mod cli_range;
/// at% / wt% / vol% conversion
pub mod cli_converter;
/// reference data library configuration
pub mod cli_library;
pub mod cli_examples;
