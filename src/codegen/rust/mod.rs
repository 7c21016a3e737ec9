//! Rust code generator
//!
//! Renders a [`TemplateDocument`] through the embedded `views.rs` template.
//!
//! Template placeholders:
//!
//! | name                         | value                                          |
//! |------------------------------|------------------------------------------------|
//! | `package`                    | module wrapping all generated items            |
//! | `database`                   | source database name                           |
//! | `views[]`                    | one entry per view, in document order          |
//! | `views[].view_name`          | source view name                               |
//! | `views[].type_name`          | record struct identifier                       |
//! | `views[].iter_name`          | row iterator identifier                        |
//! | `views[].select_sql`         | SELECT of every column in ordinal order        |
//! | `views[].fields[]`           | one entry per column in ordinal order          |
//! | `views[].fields[].name`      | struct field identifier                        |
//! | `views[].fields[].rust_type` | field type                                     |
//! | `views[].fields[].column`    | source column name                             |
//! | `views[].fields[].native_type` | column type as reported by the catalog       |
//! | `views[].fields[].index`     | zero-based position in a row                   |
//!
//! Filters: `rust_str` renders a Rust string literal and `comment` flattens
//! text onto one comment line. Undefined placeholders fail the render.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::{debug, info};

use crate::codegen::document::{FieldModel, TemplateDocument, ViewModel};
use crate::codegen::CodeGenerator;
use crate::error::ViewliftError;

const TEMPLATE_NAME: &str = "views.rs";

/// Rust code generator
pub struct RustGenerator {
    env: Environment<'static>,
}

impl RustGenerator {
    pub fn new() -> Result<Self, ViewliftError> {
        Self::with_template(include_str!("templates/views.rs.jinja"))
    }

    /// Generator using a custom template source
    pub fn with_template(source: &'static str) -> Result<Self, ViewliftError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("rust_str", rust_str);
        env.add_filter("comment", comment);

        env.add_template(TEMPLATE_NAME, source)
            .map_err(|e| ViewliftError::Render {
                template: TEMPLATE_NAME.to_string(),
                message: format!("Template error: {}", e),
            })?;

        Ok(Self { env })
    }
}

impl CodeGenerator for RustGenerator {
    fn render(&self, document: &TemplateDocument) -> Result<String, ViewliftError> {
        info!(
            package = ?document.package,
            views = document.views.len(),
            "Generating Rust code"
        );

        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| ViewliftError::Render {
                template: TEMPLATE_NAME.to_string(),
                message: format!("Template error: {}", e),
            })?;

        let ctx = minijinja::context! {
            package => &document.package,
            database => &document.database,
            views => document.views.iter().map(build_view_context).collect::<Vec<_>>(),
        };

        let code = template.render(ctx).map_err(|e| ViewliftError::Render {
            template: TEMPLATE_NAME.to_string(),
            message: format!("Render error: {}", e),
        })?;

        syn::parse_file(&code).map_err(|e| ViewliftError::InvalidOutput {
            message: e.to_string(),
        })?;
        debug!(bytes = code.len(), "Generated code parsed");

        Ok(code)
    }
}

/// Build template context for a view
fn build_view_context(view: &ViewModel) -> minijinja::Value {
    minijinja::context! {
        view_name => &view.view_name,
        type_name => &view.type_name,
        iter_name => &view.iter_name,
        select_sql => &view.select_sql,
        fields => view.fields.iter().map(build_field_context).collect::<Vec<_>>(),
    }
}

/// Build template context for a field
fn build_field_context(field: &FieldModel) -> minijinja::Value {
    minijinja::context! {
        name => &field.name,
        rust_type => field.rust_type.to_type_string(),
        column => &field.column,
        native_type => &field.native_type,
        index => field.index,
    }
}

/// Render a value as a Rust string literal
fn rust_str(value: &str) -> String {
    format!("{:?}", value)
}

/// Flatten text so it cannot end a line comment early or reorder it on screen
fn comment(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() || is_bidi_control(c) { ' ' } else { c })
        .collect()
}

/// Bidirectional formatting characters rustc rejects inside comments
fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}
