//! The model unit: the record type and its list type.

use repogen_codegen::{CodeBuilder, align_columns};
use repogen_schema::Entity;

use crate::GoFile;

/// `T_model.go`
pub struct ModelGo<'a> {
    entity: &'a Entity,
    package: &'a str,
}

impl<'a> ModelGo<'a> {
    pub fn new(entity: &'a Entity, package: &'a str) -> Self {
        Self { entity, package }
    }

    pub fn file_name(&self) -> String {
        format!("{}_model.go", self.entity.table)
    }

    pub fn render(&self) -> String {
        let name = &self.entity.name;
        let rows: Vec<Vec<String>> = self
            .entity
            .fields
            .iter()
            .map(|field| {
                vec![
                    field.name.clone(),
                    field.declared_type().to_string(),
                    format!("`db:\"{}\"`", field.db_name),
                ]
            })
            .collect();

        let record = CodeBuilder::go()
            .braced(&format!("type {name} struct {{"), |b| {
                b.lines(align_columns(&rows))
            })
            .build();

        GoFile::new(self.package)
            .imports(&self.entity.required_imports)
            .add(record)
            .add(format!("type {name}List []*{name}\n"))
            .render()
    }
}
