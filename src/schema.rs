//! Schema data structures
//!
//! These types represent introspected view metadata and form the contract
//! between introspection (produces) and code generation (consumes).

use crate::error::ViewliftError;

/// All views of one database
#[derive(Debug, Clone)]
pub struct Schema {
    pub database: String,
    /// Views sorted by name
    pub views: Vec<View>,
}

/// Database view
#[derive(Debug, Clone)]
pub struct View {
    pub name: String,
    /// Columns in ordinal order
    pub columns: Vec<Column>,
}

impl View {
    /// Check that ordinals run 1..=n without gaps or repeats
    ///
    /// Columns must already be sorted by ordinal.
    pub fn check_ordinals(&self) -> Result<(), ViewliftError> {
        if self.columns.is_empty() {
            return Err(ViewliftError::InvalidSchema {
                view: self.name.clone(),
                message: "view has no columns (is its definition still valid?)".to_string(),
            });
        }

        for (expected, col) in (1u32..).zip(&self.columns) {
            if col.ordinal != expected {
                return Err(ViewliftError::InvalidSchema {
                    view: self.name.clone(),
                    message: format!(
                        "column '{}' has ordinal position {}, expected {}",
                        col.name, col.ordinal, expected
                    ),
                });
            }
        }

        Ok(())
    }
}

/// A view column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// 1-based position within the view
    pub ordinal: u32,
    pub name: String,
    /// Native type tag, e.g. `int` or `varchar`
    pub data_type: String,
    /// Full column type, e.g. `int(10) unsigned` or `tinyint(1)`
    pub column_type: String,
    pub is_nullable: bool,
}
