use std::path::PathBuf;

use thiserror::Error;

/// viewlift errors
#[derive(Error, Debug)]
pub enum ViewliftError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to connect to database: {0}")]
    Connection(String),

    #[error("Failed to introspect database '{database}': {message}")]
    Introspection { database: String, message: String },

    #[error("Invalid view '{view}': {message}")]
    InvalidSchema { view: String, message: String },

    #[error("Unsupported column type '{native_type}' for column '{column}' of view '{view}'")]
    UnsupportedColumnType {
        view: String,
        column: String,
        native_type: String,
    },

    #[error(
        "Duplicate field '{field}' in view '{view}': columns '{first}' and '{second}' map to the same name"
    )]
    DuplicateField {
        view: String,
        field: String,
        first: String,
        second: String,
    },

    #[error("Failed to render template '{template}': {message}")]
    Render { template: String, message: String },

    #[error("Generated code is not valid Rust: {message}")]
    InvalidOutput { message: String },

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
