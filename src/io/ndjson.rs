//! NDJSON (Newline Delimited JSON) file processing utilities.
//!
//! This module provides functions for reading and parsing NDJSON files of
//! feedback responses, with comprehensive error handling and validation.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use thiserror::Error;

use crate::models::FeedbackResponse;

/// Comprehensive error types for file I/O and parsing operations.
#[derive(Error, Debug)]
pub enum FeedbackIoError {
    /// I/O error when reading files
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error at line {line}: {source}")]
    JsonParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid file format
    #[error("Invalid file format: {reason}")]
    InvalidFormat { reason: String },

    /// Empty or invalid data
    #[error("No valid data found: {context}")]
    NoData { context: String },

    /// Generic error with context
    #[error("Error in {context}: {message}")]
    Generic { context: String, message: String },
}

impl FeedbackIoError {
    /// Create a new generic error with context
    pub fn generic(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generic {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create a no data error
    pub fn no_data(context: impl Into<String>) -> Self {
        Self::NoData {
            context: context.into(),
        }
    }
}

/// Parse an NDJSON file with an optional per-entry validation step.
///
/// This is a generic function that can parse any NDJSON file where each line
/// contains one JSON object. Empty lines are skipped.
///
/// # Arguments
/// * `path` - Path to the NDJSON file
/// * `validate_entry` - Optional validation function for each entry
///
/// # Returns
/// A vector of entries or a FeedbackIoError
pub fn parse_ndjson_file_generic<T, F>(
    path: &str,
    validate_entry: Option<F>,
) -> Result<Vec<T>, FeedbackIoError>
where
    T: for<'de> Deserialize<'de>,
    F: Fn(&T) -> Result<(), FeedbackIoError>,
{
    let file = File::open(path).map_err(|e| {
        FeedbackIoError::generic("opening file", format!("Failed to open '{}': {}", path, e))
    })?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let entry: T = serde_json::from_str(&line).map_err(|e| FeedbackIoError::JsonParse {
            line: line_number + 1,
            source: e,
        })?;

        // Apply validation if provided
        if let Some(ref validator) = validate_entry {
            validator(&entry)?;
        }

        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(FeedbackIoError::no_data(format!(
            "No valid entries found in file '{}'",
            path
        )));
    }

    Ok(entries)
}

/// Parse an NDJSON file containing FeedbackResponse objects.
///
/// Each entry is validated to carry a non-empty form id.
///
/// # Arguments
/// * `path` - Path to the NDJSON file
///
/// # Returns
/// A vector of FeedbackResponse objects or a FeedbackIoError
pub fn parse_ndjson_file(path: &str) -> Result<Vec<FeedbackResponse>, FeedbackIoError> {
    parse_ndjson_file_generic(
        path,
        Some(|entry: &FeedbackResponse| {
            if entry.form_id.is_empty() {
                Err(FeedbackIoError::invalid_format("Empty form id"))
            } else {
                Ok(())
            }
        }),
    )
}

/// Parse an NDJSON file containing FeedbackResponse objects (anyhow version).
///
/// Convenience wrapper for callers that work with anyhow errors.
///
/// # Arguments
/// * `path` - Path to the NDJSON file
///
/// # Returns
/// A vector of FeedbackResponse objects or an anyhow error
pub fn parse_ndjson_file_legacy(path: &str) -> anyhow::Result<Vec<FeedbackResponse>> {
    parse_ndjson_file(path).map_err(|e| anyhow::anyhow!("{}", e))
}
