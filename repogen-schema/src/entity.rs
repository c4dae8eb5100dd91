//! Normalized table descriptions consumed by the templates.

use std::collections::BTreeSet;

use crate::ResolutionError;

/// One column's normalized name, type and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Identifier-cased name (e.g., `CustomerName`)
    pub name: String,
    /// Column name as stored in the database
    pub db_name: String,
    /// Resolved base type
    pub ty: String,
    /// Resolved wrapper type, set only for nullable columns
    pub nullable_type: Option<String>,
    /// Accessor of the wrapped value, set only for nullable columns
    pub accessor: Option<String>,
    pub is_auto_increment: bool,
    pub is_primary_key: bool,
}

impl Field {
    /// The type the field is declared with: the wrapper when nullable.
    pub fn declared_type(&self) -> &str {
        self.nullable_type.as_deref().unwrap_or(&self.ty)
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable_type.is_some()
    }
}

/// Normalized description of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Singular, identifier-cased name (e.g., `Invoice` for `invoices`)
    pub name: String,
    /// Lowercase-initial variant of `name`
    pub private_name: String,
    /// Table name, used verbatim in SQL
    pub table: String,
    pub fields: Vec<Field>,
    /// Namespaces the declared field types live in
    pub required_imports: BTreeSet<String>,
    id_field: Option<usize>,
}

impl Entity {
    pub(crate) fn new(
        name: String,
        private_name: String,
        table: String,
        fields: Vec<Field>,
        required_imports: BTreeSet<String>,
    ) -> Self {
        let id_field = fields.iter().position(|f| f.is_primary_key);
        Self {
            name,
            private_name,
            table,
            fields,
            required_imports,
            id_field,
        }
    }

    /// The primary key field, if the table has one.
    pub fn id_field(&self) -> Option<&Field> {
        self.id_field.map(|i| &self.fields[i])
    }

    /// The primary key field, for units that cannot be rendered without one.
    pub fn require_id_field(&self) -> Result<&Field, ResolutionError> {
        self.id_field()
            .ok_or_else(|| ResolutionError::MissingPrimaryKey {
                table: self.table.clone(),
            })
    }

    /// Fields that take part in inserts: everything but auto-increment columns.
    pub fn insertable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_auto_increment)
    }

    /// Look up a field by identifier name or column name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.db_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, db_name: &str, primary: bool, auto: bool) -> Field {
        Field {
            name: name.into(),
            db_name: db_name.into(),
            ty: "int64".into(),
            nullable_type: None,
            accessor: None,
            is_auto_increment: auto,
            is_primary_key: primary,
        }
    }

    fn entity(fields: Vec<Field>) -> Entity {
        Entity::new(
            "Invoice".into(),
            "invoice".into(),
            "invoices".into(),
            fields,
            BTreeSet::new(),
        )
    }

    #[test]
    fn test_id_field() {
        let e = entity(vec![
            field("Amount", "amount", false, false),
            field("Id", "id", true, true),
        ]);
        assert_eq!(e.id_field().map(|f| f.db_name.as_str()), Some("id"));
        assert!(e.require_id_field().is_ok());
    }

    #[test]
    fn test_missing_id_field() {
        let e = entity(vec![field("Amount", "amount", false, false)]);
        assert!(e.id_field().is_none());
        assert!(matches!(
            e.require_id_field(),
            Err(ResolutionError::MissingPrimaryKey { table }) if table == "invoices"
        ));
    }

    #[test]
    fn test_insertable_skips_auto_increment() {
        let e = entity(vec![
            field("Id", "id", true, true),
            field("Amount", "amount", false, false),
        ]);
        let names: Vec<_> = e.insertable_fields().map(|f| f.db_name.as_str()).collect();
        assert_eq!(names, vec!["amount"]);
    }

    #[test]
    fn test_lookup_by_either_name() {
        let e = entity(vec![field("CustomerName", "customer_name", false, false)]);
        assert!(e.field("CustomerName").is_some());
        assert!(e.field("customer_name").is_some());
        assert!(e.field("customer").is_none());
    }

    #[test]
    fn test_declared_type() {
        let mut f = field("Amount", "amount", false, false);
        assert_eq!(f.declared_type(), "int64");
        f.nullable_type = Some("null.Int".into());
        assert_eq!(f.declared_type(), "null.Int");
        assert!(f.is_nullable());
    }
}
