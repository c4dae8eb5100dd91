//! SQL fragments embedded in the generated repositories.
//!
//! Statements use `?` placeholders and verbatim table and column names.

use repogen_schema::{Entity, Field};

use crate::{Error, Result};

/// `INSERT INTO t (a, b) VALUES ` without the value rows.
pub(crate) fn insert_prefix(entity: &Entity) -> String {
    let columns: Vec<&str> = entity
        .insertable_fields()
        .map(|f| f.db_name.as_str())
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ",
        entity.table,
        columns.join(", ")
    )
}

/// One value row of an insert: `(?, ?, ?)`.
pub(crate) fn placeholder_row(entity: &Entity) -> String {
    let count = entity.insertable_fields().count();
    format!("({})", vec!["?"; count].join(", "))
}

/// `column = ?`
pub(crate) fn assignment(field: &Field) -> String {
    format!("{} = ?", field.db_name)
}

/// `UPDATE t SET `
pub(crate) fn update_prefix(entity: &Entity) -> String {
    format!("UPDATE {} SET ", entity.table)
}

/// `DELETE FROM t WHERE `
pub(crate) fn delete_prefix(entity: &Entity) -> String {
    format!("DELETE FROM {} WHERE ", entity.table)
}

/// ` WHERE id = ?`
pub(crate) fn id_condition(entity: &Entity) -> Result<String> {
    let id = entity.require_id_field()?;
    Ok(format!(" WHERE {} = ?", id.db_name))
}

/// Insert statement for `rows` records.
pub fn insert_statement(entity: &Entity, rows: usize) -> String {
    let row = placeholder_row(entity);
    format!(
        "{}{}",
        insert_prefix(entity),
        vec![row.as_str(); rows.max(1)].join(", ")
    )
}

/// Update of one record by primary key, setting only `changed` fields in
/// the given order.
pub fn update_by_id_statement(entity: &Entity, changed: &[&str]) -> Result<String> {
    let assignments = assignments(entity, changed)?;
    Ok(format!(
        "{}{}{}",
        update_prefix(entity),
        assignments,
        id_condition(entity)?
    ))
}

/// Update of every record matching `filter`, setting only `changed` fields.
pub fn update_by_filter_statement(entity: &Entity, changed: &[&str], filter: &str) -> Result<String> {
    let assignments = assignments(entity, changed)?;
    Ok(format!(
        "{}{} WHERE {}",
        update_prefix(entity),
        assignments,
        filter
    ))
}

/// Delete of one record by primary key.
pub fn delete_by_id_statement(entity: &Entity) -> Result<String> {
    let condition = id_condition(entity)?;
    Ok(format!("DELETE FROM {}{}", entity.table, condition))
}

/// Delete of every record matching `filter`.
pub fn delete_by_filter_statement(entity: &Entity, filter: &str) -> String {
    format!("{}{}", delete_prefix(entity), filter)
}

fn assignments(entity: &Entity, changed: &[&str]) -> Result<String> {
    if changed.is_empty() {
        return Err(Error::config(format!(
            "an update of {} needs at least one changed field",
            entity.name
        )));
    }
    let parts = changed
        .iter()
        .map(|name| {
            entity
                .field(name)
                .map(assignment)
                .ok_or_else(|| Error::UnknownField {
                    entity: entity.name.clone(),
                    field: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use repogen_schema::{ColumnInfo, Introspector, StaticSchema};

    use super::*;
    use crate::GoTypeMapper;

    fn invoice() -> Entity {
        let schema = StaticSchema::new().with_table(
            "invoices",
            [
                ColumnInfo::new("id", "bigint").primary().extra("auto_increment"),
                ColumnInfo::new("customer_name", "varchar(255)"),
                ColumnInfo::new("amount", "decimal(10,2)"),
                ColumnInfo::new("created_at", "datetime").nullable(),
            ],
        );
        Introspector::new(&schema, &GoTypeMapper)
            .introspect("invoices")
            .unwrap()
    }

    #[test]
    fn test_insert_skips_auto_increment() {
        assert_eq!(
            insert_statement(&invoice(), 2),
            "INSERT INTO invoices (customer_name, amount, created_at) VALUES (?, ?, ?), (?, ?, ?)"
        );
    }

    #[test]
    fn test_update_by_id_only_changed_fields() {
        assert_eq!(
            update_by_id_statement(&invoice(), &["amount"]).unwrap(),
            "UPDATE invoices SET amount = ? WHERE id = ?"
        );
        assert_eq!(
            update_by_id_statement(&invoice(), &["CreatedAt", "customer_name"]).unwrap(),
            "UPDATE invoices SET created_at = ?, customer_name = ? WHERE id = ?"
        );
    }

    #[test]
    fn test_update_unknown_field() {
        let err = update_by_id_statement(&invoice(), &["total"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownField { entity, field } if entity == "Invoice" && field == "total"
        ));
    }

    #[test]
    fn test_update_needs_changed_fields() {
        assert!(update_by_id_statement(&invoice(), &[]).is_err());
    }

    #[test]
    fn test_filter_statements() {
        let entity = invoice();
        assert_eq!(
            update_by_filter_statement(&entity, &["amount"], "customer_name = ?").unwrap(),
            "UPDATE invoices SET amount = ? WHERE customer_name = ?"
        );
        assert_eq!(
            delete_by_filter_statement(&entity, "amount > ?"),
            "DELETE FROM invoices WHERE amount > ?"
        );
        assert_eq!(
            delete_by_id_statement(&entity).unwrap(),
            "DELETE FROM invoices WHERE id = ?"
        );
    }

    #[test]
    fn test_by_id_requires_primary_key() {
        let schema = StaticSchema::new().with_table("logs", [ColumnInfo::new("line", "text")]);
        let entity = Introspector::new(&schema, &GoTypeMapper)
            .introspect("logs")
            .unwrap();
        assert!(matches!(
            delete_by_id_statement(&entity),
            Err(Error::Schema(_))
        ));
    }
}
