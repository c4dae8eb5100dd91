//! Type mapping between column types and language-specific types.

/// Base column types understood by the generator.
///
/// This is a language-agnostic classification of raw SQL type strings.
/// Use a [`TypeMapper`] to convert to language-specific type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    BigInt,
    Int,
    TinyInt,
    Text,
    Float,
    Timestamp,
    Decimal,
}

impl SqlType {
    /// Classify a raw column type such as `varchar(255)` or `bigint(20) unsigned`.
    ///
    /// Matching is case-insensitive and ignores everything from the first
    /// parenthesis or whitespace on.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let base = base_type(raw).to_ascii_lowercase();
        let ty = match base.as_str() {
            "bigint" => SqlType::BigInt,
            "int" | "integer" | "mediumint" | "smallint" => SqlType::Int,
            "tinyint" => SqlType::TinyInt,
            "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" | "enum"
            | "set" | "json" | "mediumblob" => SqlType::Text,
            "float" | "double" | "real" => SqlType::Float,
            "date" | "datetime" | "timestamp" => SqlType::Timestamp,
            "decimal" | "numeric" => SqlType::Decimal,
            _ => return None,
        };
        Some(ty)
    }

    /// Name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::BigInt => "bigint",
            SqlType::Int => "int",
            SqlType::TinyInt => "tinyint",
            SqlType::Text => "text",
            SqlType::Float => "float",
            SqlType::Timestamp => "timestamp",
            SqlType::Decimal => "decimal",
        }
    }
}

/// Strip a size/precision suffix and modifiers: `decimal(10,2) unsigned` -> `decimal`.
pub fn base_type(raw: &str) -> &str {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(raw.len());
    &raw[..end]
}

/// A resolved non-nullable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    /// Type name as written in generated code (e.g., `decimal.Decimal`)
    pub name: &'static str,
    /// Import path the type lives in, if any
    pub import: Option<&'static str>,
}

/// A resolved wrapper type for columns that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullableType {
    /// Wrapper type name (e.g., `null.Int`)
    pub name: &'static str,
    /// Name of the accessor for the contained value (e.g., `Int64`)
    pub accessor: &'static str,
    /// Import path the wrapper lives in, if any
    pub import: Option<&'static str>,
}

/// Trait for mapping column types to language-specific type names.
///
/// Implement this trait for each target language.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a column type that is never absent.
    fn map_type(&self, ty: SqlType) -> MappedType;

    /// Map a column type to the wrapper used when the column is nullable.
    fn map_nullable(&self, ty: SqlType) -> NullableType;
}
