/// JSON loading with line and column diagnostics
pub mod load_from_file;
