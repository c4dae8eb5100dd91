//! Table introspection.

use std::collections::BTreeSet;

use repogen_core::{TypeMapper, singularize, to_pascal_case, to_private_name};

use crate::{
    ColumnInfo, Entity, Error, FetchError, Field, ResolutionError, Result, SchemaSource,
    TypeResolver, UnsupportedType,
};

/// Builds [`Entity`] descriptions from a schema source.
pub struct Introspector<'a> {
    source: &'a dyn SchemaSource,
    resolver: TypeResolver<'a>,
}

impl<'a> Introspector<'a> {
    pub fn new(source: &'a dyn SchemaSource, mapper: &'a dyn TypeMapper) -> Self {
        Self {
            source,
            resolver: TypeResolver::new(mapper),
        }
    }

    /// Describe `table` and resolve every column.
    ///
    /// Fails on the first column whose type cannot be resolved; no partial
    /// entity is ever returned.
    pub fn introspect(&self, table: &str) -> Result<Entity> {
        let columns = self
            .source
            .describe(table)
            .map_err(|source| Error::SchemaFetch {
                table: table.to_string(),
                source,
            })?;

        if columns.is_empty() {
            return Err(Error::SchemaFetch {
                table: table.to_string(),
                source: FetchError::NotFound {
                    table: table.to_string(),
                },
            });
        }

        let primary: Vec<&ColumnInfo> = columns.iter().filter(|c| c.is_primary_key()).collect();
        if primary.len() > 1 {
            return Err(ResolutionError::CompositePrimaryKey {
                table: table.to_string(),
                columns: primary.iter().map(|c| c.name.clone()).collect(),
            }
            .into());
        }

        let mut fields = Vec::with_capacity(columns.len());
        let mut imports = BTreeSet::new();
        for column in &columns {
            let (field, import) = self.field(table, column)?;
            if let Some(import) = import {
                imports.insert(import.to_string());
            }
            fields.push(field);
        }

        let base = to_pascal_case(table);
        let name = singularize(&base);
        let private_name = singularize(&to_private_name(&base));

        tracing::info!(
            table,
            entity = %name,
            fields = fields.len(),
            "introspected table"
        );

        Ok(Entity::new(
            name,
            private_name,
            table.to_string(),
            fields,
            imports,
        ))
    }

    /// Resolve one column, returning the namespace of its declared type.
    fn field(&self, table: &str, column: &ColumnInfo) -> Result<(Field, Option<&'static str>)> {
        let unknown = |err: UnsupportedType| ResolutionError::UnknownType {
            table: table.to_string(),
            column: column.name.clone(),
            raw_type: err.raw_type,
            nullable: err.nullable,
        };

        let base = self
            .resolver
            .resolve(&column.raw_type, false)
            .map_err(|mut err| {
                err.nullable = column.nullable;
                unknown(err)
            })?;

        // A nullable column only needs its wrapper's namespace.
        let (nullable_type, accessor, import) = if column.nullable {
            let wrapper = self
                .resolver
                .resolve_nullable_wrapper(&column.raw_type)
                .map_err(unknown)?;
            (
                Some(wrapper.name.to_string()),
                Some(wrapper.accessor.to_string()),
                wrapper.import,
            )
        } else {
            (None, None, base.import)
        };

        tracing::debug!(
            table,
            column = %column.name,
            raw_type = %column.raw_type,
            resolved = nullable_type.as_deref().unwrap_or(base.name),
            "resolved column"
        );

        let field = Field {
            name: to_pascal_case(&column.name),
            db_name: column.name.clone(),
            ty: base.name.to_string(),
            nullable_type,
            accessor,
            is_auto_increment: column.is_auto_increment(),
            is_primary_key: column.is_primary_key(),
        };
        Ok((field, import))
    }
}

#[cfg(test)]
mod tests {
    use repogen_core::{MappedType, NullableType, SqlType};

    use super::*;
    use crate::StaticSchema;

    struct Mapper;

    impl TypeMapper for Mapper {
        fn language(&self) -> &'static str {
            "test"
        }

        fn map_type(&self, ty: SqlType) -> MappedType {
            match ty {
                SqlType::Timestamp => MappedType {
                    name: "Time",
                    import: Some("time"),
                },
                _ => MappedType {
                    name: ty.as_str(),
                    import: None,
                },
            }
        }

        fn map_nullable(&self, _ty: SqlType) -> NullableType {
            NullableType {
                name: "Optional",
                accessor: "Value",
                import: Some("optional"),
            }
        }
    }

    #[test]
    fn test_names_are_singular() {
        let schema = StaticSchema::new().with_table(
            "invoice_items",
            [ColumnInfo::new("id", "bigint").primary()],
        );
        let entity = Introspector::new(&schema, &Mapper)
            .introspect("invoice_items")
            .unwrap();

        assert_eq!(entity.name, "InvoiceItem");
        assert_eq!(entity.private_name, "invoiceItem");
        assert_eq!(entity.table, "invoice_items");
    }

    #[test]
    fn test_imports_follow_declared_types() {
        let schema = StaticSchema::new().with_table(
            "events",
            [
                ColumnInfo::new("id", "int").primary(),
                ColumnInfo::new("deleted_at", "datetime").nullable(),
            ],
        );
        let entity = Introspector::new(&schema, &Mapper)
            .introspect("events")
            .unwrap();

        assert_eq!(
            entity.required_imports.iter().collect::<Vec<_>>(),
            vec!["optional"]
        );
    }

    #[test]
    fn test_empty_table_is_fetch_error() {
        let schema = StaticSchema::new().with_table("empty", Vec::<ColumnInfo>::new());
        let err = Introspector::new(&schema, &Mapper)
            .introspect("empty")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaFetch {
                source: FetchError::NotFound { .. },
                ..
            }
        ));
    }
}
