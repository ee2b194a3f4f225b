/// worked examples: single alloys, model battery, unit conversion, range screening
pub mod hea_examples;
