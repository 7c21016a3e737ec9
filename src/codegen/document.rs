//! Template data assembly
//!
//! Resolves every generated name and type up front so the template only
//! substitutes values.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::types::{self, RustType};
use crate::error::ViewliftError;
use crate::naming::{to_field_name, to_type_name};
use crate::schema::{Schema, View};

/// Names the generated module relies on; view types must not shadow them.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Box", "Err", "I", "Iterator", "None", "Ok", "Option", "Q", "Result", "Self", "Some",
    "String", "T", "Vec",
];

/// Everything the views template needs
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    /// Module wrapping the generated items
    pub package: String,
    pub database: String,
    pub views: Vec<ViewModel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub view_name: String,
    pub type_name: String,
    pub iter_name: String,
    pub select_sql: String,
    pub fields: Vec<FieldModel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    pub name: String,
    pub rust_type: RustType,
    pub column: String,
    pub native_type: String,
    /// Zero-based position in a row
    pub index: usize,
}

impl TemplateDocument {
    /// Build the document for a schema.
    ///
    /// Fails on the first column with an unsupported type or the first pair
    /// of columns in a view that map to the same field name.
    pub fn assemble(schema: &Schema, package: &str) -> Result<Self, ViewliftError> {
        let mut taken: HashSet<String> =
            RESERVED_TYPE_NAMES.iter().map(|s| s.to_string()).collect();

        let mut views = Vec::with_capacity(schema.views.len());
        for view in &schema.views {
            let type_name = claim_type_name(&view.name, &mut taken);
            let model = build_view_model(view, type_name)?;
            debug!(
                view = ?model.view_name,
                type_name = ?model.type_name,
                fields = ?model.fields.len(),
                "Assembled view"
            );
            views.push(model);
        }

        Ok(Self {
            package: package.to_string(),
            database: schema.database.clone(),
            views,
        })
    }
}

/// Pick a type name for a view whose record and iterator names are both free.
///
/// Views are keyed by their exact source name, so two views that only differ
/// by case still get two types; the later one takes a numeric suffix.
fn claim_type_name(view_name: &str, taken: &mut HashSet<String>) -> String {
    let base = to_type_name(view_name);

    let mut candidate = base.clone();
    let mut suffix = 2;
    while taken.contains(&candidate) || taken.contains(&iter_name(&candidate)) {
        candidate = format!("{}{}", base, suffix);
        suffix += 1;
    }

    if candidate != base {
        trace!(view = ?view_name, type_name = ?candidate, "Renamed colliding view type");
    }

    taken.insert(iter_name(&candidate));
    taken.insert(candidate.clone());
    candidate
}

fn iter_name(type_name: &str) -> String {
    format!("{}Iter", type_name)
}

fn build_view_model(view: &View, type_name: String) -> Result<ViewModel, ViewliftError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(view.columns.len());
    let mut fields = Vec::with_capacity(view.columns.len());

    for (index, col) in view.columns.iter().enumerate() {
        let name = to_field_name(&col.name);
        if let Some(first) = seen.insert(name.clone(), &col.name) {
            return Err(ViewliftError::DuplicateField {
                view: view.name.clone(),
                field: name,
                first: first.to_string(),
                second: col.name.clone(),
            });
        }

        let rust_type = types::resolve(&view.name, col)?;
        trace!(
            view = ?view.name,
            column = ?col.name,
            field = ?name,
            rust_type = ?rust_type,
            "Mapped column"
        );

        fields.push(FieldModel {
            name,
            rust_type,
            column: col.name.clone(),
            native_type: col.column_type.clone(),
            index,
        });
    }

    Ok(ViewModel {
        view_name: view.name.clone(),
        iter_name: iter_name(&type_name),
        type_name,
        select_sql: select_sql(view),
        fields,
    })
}

/// SELECT listing every column of the view in ordinal order
fn select_sql(view: &View) -> String {
    let columns: Vec<String> = view.columns.iter().map(|c| quote_ident(&c.name)).collect();
    format!("SELECT {} FROM {}", columns.join(", "), quote_ident(&view.name))
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
