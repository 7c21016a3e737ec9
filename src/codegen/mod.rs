//! Code generation
//!
//! This module provides functionality for generating typed row access code
//! from the introspected view metadata.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::naming::{is_valid_module_name, to_snake_case};
use crate::prelude::ViewliftError;

pub mod document;
pub mod rust;
pub mod types;

pub use document::TemplateDocument;
pub use rust::RustGenerator;

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodeGenConfig {
    /// Output file path
    pub output_path: PathBuf,
    /// Module name embedded in the generated file
    pub package: String,
}

impl CodeGenConfig {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            package: "main".to_string(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Check settings that need no database, before any connection is made
    pub fn validate(&self) -> Result<(), ViewliftError> {
        if !is_valid_module_name(&self.package) {
            return Err(ViewliftError::Config(format!(
                "package '{}' is not a valid Rust module name",
                self.package
            )));
        }
        Ok(())
    }
}

/// Trait for language-specific code generators
pub trait CodeGenerator {
    /// Render the complete source text for a document
    fn render(&self, document: &TemplateDocument) -> Result<String, ViewliftError>;
}

/// Default output file for a database: `<snake_case_database>_views.rs`
pub fn default_output_path(database: &str) -> PathBuf {
    PathBuf::from(format!("{}_views.rs", to_snake_case(database)))
}

/// Write generated code, replacing `path` only once the new content is complete.
///
/// The code goes to a temporary file next to `path` which is then renamed over
/// it, so a failed run leaves any previous output untouched.
pub fn write_output(path: &Path, code: &str) -> Result<(), ViewliftError> {
    let output_error = |source| ViewliftError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(output_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(output_error)?;
    debug!(path = ?file.path(), "Writing temporary output");
    file.write_all(code.as_bytes()).map_err(output_error)?;
    file.as_file().sync_all().map_err(output_error)?;
    file.persist(path).map_err(|e| output_error(e.error))?;

    info!(path = ?path, bytes = code.len(), "Wrote generated code");
    Ok(())
}
