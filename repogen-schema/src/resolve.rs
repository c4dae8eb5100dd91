//! Column type resolution.

use repogen_core::{MappedType, NullableType, SqlType, TypeMapper};
use thiserror::Error;

/// A raw column type outside the supported vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported column type '{raw_type}'")]
pub struct UnsupportedType {
    pub raw_type: String,
    pub nullable: bool,
}

/// Resolves raw column types into target language types.
///
/// Pure: the same input always yields the same output.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    mapper: &'a dyn TypeMapper,
}

impl<'a> TypeResolver<'a> {
    pub fn new(mapper: &'a dyn TypeMapper) -> Self {
        Self { mapper }
    }

    /// Resolve a raw type. Nullable columns resolve to the wrapper type.
    pub fn resolve(&self, raw_type: &str, nullable: bool) -> Result<MappedType, UnsupportedType> {
        let ty = classify(raw_type, nullable)?;
        if nullable {
            let wrapper = self.mapper.map_nullable(ty);
            Ok(MappedType {
                name: wrapper.name,
                import: wrapper.import,
            })
        } else {
            Ok(self.mapper.map_type(ty))
        }
    }

    /// Resolve the wrapper used for a nullable column, with its accessor.
    pub fn resolve_nullable_wrapper(&self, raw_type: &str) -> Result<NullableType, UnsupportedType> {
        let ty = classify(raw_type, true)?;
        Ok(self.mapper.map_nullable(ty))
    }
}

impl std::fmt::Debug for TypeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeResolver")
            .field("language", &self.mapper.language())
            .finish()
    }
}

fn classify(raw_type: &str, nullable: bool) -> Result<SqlType, UnsupportedType> {
    SqlType::from_raw(raw_type).ok_or_else(|| UnsupportedType {
        raw_type: raw_type.to_string(),
        nullable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mapper;

    impl TypeMapper for Mapper {
        fn language(&self) -> &'static str {
            "test"
        }

        fn map_type(&self, ty: SqlType) -> MappedType {
            MappedType {
                name: ty.as_str(),
                import: None,
            }
        }

        fn map_nullable(&self, ty: SqlType) -> NullableType {
            NullableType {
                name: match ty {
                    SqlType::Text => "opt_text",
                    _ => "opt_other",
                },
                accessor: "value",
                import: Some("opt"),
            }
        }
    }

    #[test]
    fn test_resolve_strips_suffix() {
        let resolver = TypeResolver::new(&Mapper);
        assert_eq!(resolver.resolve("varchar(255)", false).unwrap().name, "text");
    }

    #[test]
    fn test_nullable_resolves_to_wrapper() {
        let resolver = TypeResolver::new(&Mapper);
        let ty = resolver.resolve("varchar(64)", true).unwrap();
        assert_eq!(ty.name, "opt_text");
        assert_eq!(ty.import, Some("opt"));
    }

    #[test]
    fn test_unsupported_carries_input() {
        let resolver = TypeResolver::new(&Mapper);
        let err = resolver.resolve("geometry", true).unwrap_err();
        assert_eq!(
            err,
            UnsupportedType {
                raw_type: "geometry".into(),
                nullable: true
            }
        );
        assert!(resolver.resolve_nullable_wrapper("point").is_err());
    }
}
