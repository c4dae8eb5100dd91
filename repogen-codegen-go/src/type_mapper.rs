//! Go type mapper implementation.

use repogen_core::{MappedType, NullableType, SqlType, TypeMapper};

const TIME: &str = "time";
const NULL: &str = "github.com/guregu/null";
const DECIMAL: &str = "github.com/shopspring/decimal";

/// Go type mapper implementation.
///
/// Nullable columns use `github.com/guregu/null` wrappers, except decimals
/// which use `decimal.NullDecimal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTypeMapper;

impl TypeMapper for GoTypeMapper {
    fn language(&self) -> &'static str {
        "go"
    }

    fn map_type(&self, ty: SqlType) -> MappedType {
        let (name, import) = match ty {
            SqlType::BigInt => ("int64", None),
            SqlType::Int => ("int32", None),
            SqlType::TinyInt => ("int8", None),
            SqlType::Text => ("string", None),
            SqlType::Float => ("float64", None),
            SqlType::Timestamp => ("time.Time", Some(TIME)),
            SqlType::Decimal => ("decimal.Decimal", Some(DECIMAL)),
        };
        MappedType { name, import }
    }

    fn map_nullable(&self, ty: SqlType) -> NullableType {
        let (name, accessor, import) = match ty {
            SqlType::BigInt | SqlType::Int | SqlType::TinyInt => ("null.Int", "Int64", NULL),
            SqlType::Text => ("null.String", "String", NULL),
            SqlType::Float => ("null.Float", "Float64", NULL),
            SqlType::Timestamp => ("null.Time", "Time", NULL),
            SqlType::Decimal => ("decimal.NullDecimal", "Decimal", DECIMAL),
        };
        NullableType {
            name,
            accessor,
            import: Some(import),
        }
    }
}

/// Import path of a qualified Go type produced by [`GoTypeMapper`].
pub fn import_of(type_name: &str) -> Option<&'static str> {
    let (package, _) = type_name.split_once('.')?;
    match package {
        "time" => Some(TIME),
        "null" => Some(NULL),
        "decimal" => Some(DECIMAL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SqlType; 7] = [
        SqlType::BigInt,
        SqlType::Int,
        SqlType::TinyInt,
        SqlType::Text,
        SqlType::Float,
        SqlType::Timestamp,
        SqlType::Decimal,
    ];

    #[test]
    fn test_base_types() {
        let mapper = GoTypeMapper;
        assert_eq!(mapper.map_type(SqlType::BigInt).name, "int64");
        assert_eq!(mapper.map_type(SqlType::Int).name, "int32");
        assert_eq!(mapper.map_type(SqlType::TinyInt).name, "int8");
        assert_eq!(mapper.map_type(SqlType::Text).name, "string");
        assert_eq!(mapper.map_type(SqlType::Float).name, "float64");
        assert_eq!(mapper.map_type(SqlType::Timestamp).import, Some("time"));
        assert_eq!(mapper.map_type(SqlType::Decimal).name, "decimal.Decimal");
    }

    #[test]
    fn test_nullable_differs_from_base() {
        let mapper = GoTypeMapper;
        for ty in ALL {
            assert_ne!(mapper.map_type(ty).name, mapper.map_nullable(ty).name);
        }
    }

    #[test]
    fn test_nullable_accessors() {
        let mapper = GoTypeMapper;
        let int = mapper.map_nullable(SqlType::BigInt);
        assert_eq!((int.name, int.accessor), ("null.Int", "Int64"));
        let dec = mapper.map_nullable(SqlType::Decimal);
        assert_eq!((dec.name, dec.accessor), ("decimal.NullDecimal", "Decimal"));
    }

    #[test]
    fn test_import_of_agrees_with_mapper() {
        let mapper = GoTypeMapper;
        for ty in ALL {
            let base = mapper.map_type(ty);
            assert_eq!(import_of(base.name), base.import, "{}", base.name);
            let wrapper = mapper.map_nullable(ty);
            assert_eq!(import_of(wrapper.name), wrapper.import, "{}", wrapper.name);
        }
    }
}
