use crate::Data::DataError;
use log::{error, info};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Reads a JSON document from disk and deserializes it into `T`.
/// Parse failures are reported with the line and column of the offending token,
/// and the problematic line is written to the log.
pub fn load_json_from_file<T: DeserializeOwned>(file_name: &str) -> Result<T, DataError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(DataError::Io {
            path: file_name.to_string(),
            message: "file does not exist".to_string(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|e| DataError::Io {
        path: file_name.to_string(),
        message: e.to_string(),
    })?;
    let data = parse_json_str(file_name, &contents)?;
    info!("Successfully parsed data from file '{}'", file_name);
    Ok(data)
}

/// Deserializes `contents`; `source_name` only labels the diagnostics
pub fn parse_json_str<T: DeserializeOwned>(source_name: &str, contents: &str) -> Result<T, DataError> {
    serde_json::from_str(contents).map_err(|e| {
        let line = e.line();
        let column = e.column();
        error!(
            "Error parsing '{}' at line {}, column {}: {}",
            source_name, line, column, e
        );
        // serde_json lines are 1-based, 0 means the error is not tied to a position
        if line > 0 {
            if let Some(problem_line) = contents.lines().nth(line - 1) {
                error!("Problematic line: {}", problem_line);
                if column > 0 && column <= problem_line.len() + 1 {
                    error!("{}^", " ".repeat(column - 1));
                }
            }
        }
        DataError::Malformed {
            path: source_name.to_string(),
            line,
            column,
            message: e.to_string(),
        }
    })
}
