//! # viewlift
//!
//! Generate typed row access code from MySQL views
//!
//! This crate provides a CLI tool and library for introspecting the views of a
//! database and generating one record struct and one row iterator per view.

pub mod codegen;
pub mod config;
pub mod error;
pub mod introspect;
pub mod naming;
pub mod schema;

use tracing::{info, warn};

use crate::prelude::{
    CodeGenConfig, CodeGenerator, Introspector, RustGenerator, Schema, TemplateDocument, ViewFilter,
    ViewliftError,
};

pub mod prelude {
    pub use crate::codegen::{CodeGenConfig, CodeGenerator, RustGenerator, TemplateDocument};
    pub use crate::config::{ConnectionOptions, DbConfig};
    pub use crate::error::ViewliftError;
    pub use crate::introspect::{CatalogIntrospector, CatalogSource, Introspector, ViewFilter};
    pub use crate::schema::{Column, Schema, View};
}

#[cfg(feature = "mysql")]
pub use introspect::{MySqlCatalog, MySqlIntrospector};

/// Introspect `database`, render its views and write the output file.
///
/// Nothing is written unless every step before the write succeeds.
pub fn generate<I: Introspector>(
    introspector: &mut I,
    database: &str,
    filter: &ViewFilter,
    config: &CodeGenConfig,
) -> Result<Schema, ViewliftError> {
    config.validate()?;

    let schema = introspector.introspect(database, filter)?;
    if schema.views.is_empty() {
        warn!(database = ?database, "No views found, output will contain an empty module");
    }

    let document = TemplateDocument::assemble(&schema, &config.package)?;
    let code = RustGenerator::new()?.render(&document)?;
    codegen::write_output(&config.output_path, &code)?;

    info!(
        views = schema.views.len(),
        output = ?config.output_path,
        "Code generation complete"
    );

    Ok(schema)
}
