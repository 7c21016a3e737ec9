//! MySQL to Rust type mapping

use crate::error::ViewliftError;
use crate::schema::Column;

/// Represents a Rust type for code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    Decimal,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Json,
    /// Optional wrapper
    Option(Box<RustType>),
}

impl RustType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> String {
        match self {
            RustType::Bool => "bool".to_string(),
            RustType::I8 => "i8".to_string(),
            RustType::I16 => "i16".to_string(),
            RustType::I32 => "i32".to_string(),
            RustType::I64 => "i64".to_string(),
            RustType::U8 => "u8".to_string(),
            RustType::U16 => "u16".to_string(),
            RustType::U32 => "u32".to_string(),
            RustType::U64 => "u64".to_string(),
            RustType::F32 => "f32".to_string(),
            RustType::F64 => "f64".to_string(),
            RustType::String => "String".to_string(),
            RustType::Bytes => "Vec<u8>".to_string(),
            RustType::Decimal => "rust_decimal::Decimal".to_string(),
            RustType::NaiveDate => "chrono::NaiveDate".to_string(),
            RustType::NaiveDateTime => "chrono::NaiveDateTime".to_string(),
            RustType::NaiveTime => "chrono::NaiveTime".to_string(),
            RustType::Json => "serde_json::Value".to_string(),
            RustType::Option(inner) => format!("Option<{}>", inner.to_type_string()),
        }
    }

    /// Check if this is an Option type
    pub fn is_optional(&self) -> bool {
        matches!(self, RustType::Option(_))
    }

    fn to_unsigned(&self) -> RustType {
        match self {
            RustType::I8 => RustType::U8,
            RustType::I16 => RustType::U16,
            RustType::I32 => RustType::U32,
            RustType::I64 => RustType::U64,
            other => other.clone(),
        }
    }
}

/// Base Rust type for each supported MySQL `DATA_TYPE` tag
pub const TYPE_TABLE: &[(&str, RustType)] = &[
    ("tinyint", RustType::I8),
    ("smallint", RustType::I16),
    ("mediumint", RustType::I32),
    ("int", RustType::I32),
    ("integer", RustType::I32),
    ("bigint", RustType::I64),
    ("bool", RustType::Bool),
    ("boolean", RustType::Bool),
    ("bit", RustType::Bytes),
    ("float", RustType::F32),
    ("double", RustType::F64),
    ("double precision", RustType::F64),
    ("real", RustType::F64),
    ("decimal", RustType::Decimal),
    ("numeric", RustType::Decimal),
    ("char", RustType::String),
    ("varchar", RustType::String),
    ("tinytext", RustType::String),
    ("text", RustType::String),
    ("mediumtext", RustType::String),
    ("longtext", RustType::String),
    ("enum", RustType::String),
    ("set", RustType::String),
    ("binary", RustType::Bytes),
    ("varbinary", RustType::Bytes),
    ("tinyblob", RustType::Bytes),
    ("blob", RustType::Bytes),
    ("mediumblob", RustType::Bytes),
    ("longblob", RustType::Bytes),
    ("date", RustType::NaiveDate),
    ("datetime", RustType::NaiveDateTime),
    ("timestamp", RustType::NaiveDateTime),
    ("time", RustType::NaiveTime),
    ("year", RustType::U16),
    ("json", RustType::Json),
    ("geometry", RustType::Bytes),
    ("point", RustType::Bytes),
    ("linestring", RustType::Bytes),
    ("polygon", RustType::Bytes),
    ("multipoint", RustType::Bytes),
    ("multilinestring", RustType::Bytes),
    ("multipolygon", RustType::Bytes),
    ("geometrycollection", RustType::Bytes),
    ("geomcollection", RustType::Bytes),
];

/// Resolve the Rust type of a view column.
///
/// Nullable columns get `Option<T>`. A tag missing from [`TYPE_TABLE`] is an
/// error rather than a fallback, so no field is ever generated with a guessed
/// type.
pub fn resolve(view: &str, column: &Column) -> Result<RustType, ViewliftError> {
    let base = resolve_base_type(&column.data_type, &column.column_type).ok_or_else(|| {
        ViewliftError::UnsupportedColumnType {
            view: view.to_string(),
            column: column.name.clone(),
            native_type: column.data_type.clone(),
        }
    })?;

    if column.is_nullable {
        Ok(RustType::Option(Box::new(base)))
    } else {
        Ok(base)
    }
}

/// Resolve the base type (without Option wrapper)
pub fn resolve_base_type(data_type: &str, column_type: &str) -> Option<RustType> {
    let data_type = data_type.trim().to_ascii_lowercase();
    let column_type = column_type.trim().to_ascii_lowercase();

    let base = TYPE_TABLE
        .iter()
        .find(|(tag, _)| *tag == data_type)
        .map(|(_, rust_type)| rust_type.clone())?;

    // TINYINT(1) is MySQL's boolean. BIT(n) arrives as raw bytes at every width.
    if data_type == "tinyint" && has_width_one(&column_type) {
        return Some(RustType::Bool);
    }

    if column_type.split_whitespace().any(|word| word == "unsigned") {
        return Some(base.to_unsigned());
    }

    Some(base)
}

/// Check for a `(1)` display width, e.g. `tinyint(1)`
fn has_width_one(column_type: &str) -> bool {
    column_type
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .is_some_and(|(width, _)| width.trim() == "1")
}
