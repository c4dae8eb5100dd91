//! Describe command report.

use repogen_schema::{Entity, Field};

use super::output::{Output, Report};

/// How each table resolved, without generating anything.
#[derive(Debug)]
pub struct DescribeReport {
    pub entities: Vec<Entity>,
}

impl Report for DescribeReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, entity) in self.entities.iter().enumerate() {
            if i > 0 {
                out.blank();
            }
            out.heading(&format!("{} ({})", entity.name, entity.table));

            out.section("Fields");
            for field in &entity.fields {
                out.item(&describe_field(field));
            }

            if !entity.required_imports.is_empty() {
                out.section("Imports");
                for import in &entity.required_imports {
                    out.item(import);
                }
            }
        }
    }
}

fn describe_field(field: &Field) -> String {
    let mut flags = Vec::new();
    if field.is_primary_key {
        flags.push("primary key".to_string());
    }
    if field.is_auto_increment {
        flags.push("auto increment".to_string());
    }
    match &field.accessor {
        Some(accessor) => flags.push(format!("nullable, value via .{accessor}")),
        None if field.is_nullable() => flags.push("nullable".to_string()),
        None => {}
    }

    let line = format!("{} {} `{}`", field.name, field.declared_type(), field.db_name);
    if flags.is_empty() {
        line
    } else {
        format!("{line} [{}]", flags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use repogen_codegen_go::GoTypeMapper;
    use repogen_schema::{ColumnInfo, Introspector, StaticSchema};

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_describe_invoices() {
        let schema = StaticSchema::new().with_table(
            "invoices",
            [
                ColumnInfo::new("id", "bigint").primary().extra("auto_increment"),
                ColumnInfo::new("paid_at", "datetime").nullable(),
            ],
        );
        let entity = Introspector::new(&schema, &GoTypeMapper)
            .introspect("invoices")
            .unwrap();

        let mut out = BufferOutput::default();
        DescribeReport {
            entities: vec![entity],
        }
        .render(&mut out);

        assert_eq!(out.lines[0], "Invoice (invoices)");
        assert!(
            out.lines
                .contains(&"- Id int64 `id` [primary key, auto increment]".to_string())
        );
        assert!(
            out.lines
                .contains(&"- PaidAt null.Time `paid_at` [nullable, value via .Time]".to_string())
        );
        assert!(out.lines.contains(&"- github.com/guregu/null".to_string()));
    }
}
