//! The mutation unit: inserts, partial updates and deletes, on a database
//! handle or inside a caller-owned transaction.

use repogen_codegen::{CodeBuilder, align_columns};
use repogen_schema::{Entity, Field};

use super::{model_type, quote};
use crate::{
    GO_NAMING, GoFile, ModelImport, Result, import_of,
    sql::{assignment, delete_prefix, id_condition, insert_prefix, placeholder_row, update_prefix},
};

/// `T_repo_mutation.go`
pub struct RepoMutationGo<'a> {
    entity: &'a Entity,
    package: &'a str,
    model: Option<ModelImport>,
}

/// Identifiers shared by the methods of one mutation unit.
struct Locals {
    record: String,
    list: String,
    id: String,
    id_type: String,
}

impl<'a> RepoMutationGo<'a> {
    pub fn new(entity: &'a Entity, package: &'a str, model: Option<ModelImport>) -> Self {
        Self {
            entity,
            package,
            model,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_repo_mutation.go", self.entity.table)
    }

    /// Fails when the table has no primary key.
    pub fn render(&self) -> Result<String> {
        let id = self.entity.require_id_field()?;
        let locals = self.locals(id);

        let mut file = GoFile::new(self.package).imports([
            "context",
            "database/sql",
            "fmt",
            "strings",
            "github.com/jmoiron/sqlx",
        ]);
        if let Some(model) = &self.model {
            file = file.import_aliased(&model.path, &model.alias);
        }
        if let Some(import) = import_of(id.declared_type()) {
            file = file.import(import);
        }

        Ok(file
            .add_all([
                self.interface(&locals),
                self.implementation(),
                self.insert(&locals),
                self.update(&locals)?,
                self.delete(&locals)?,
                self.assignments(&locals),
                self.exec(),
            ])
            .render())
    }

    fn locals(&self, id: &Field) -> Locals {
        let id_local = GO_NAMING.local_name(&id.name);
        let mut record = GO_NAMING.local_name(&self.entity.name);
        if record == id_local {
            record = format!("{record}Record");
        }
        Locals {
            record,
            list: GO_NAMING.safe_name(&format!("{}List", self.entity.private_name)),
            id: id_local,
            id_type: id.declared_type().to_string(),
        }
    }

    fn record_type(&self) -> String {
        model_type(self.model.as_ref(), &self.entity.name)
    }

    fn list_type(&self) -> String {
        model_type(self.model.as_ref(), &format!("{}List", self.entity.name))
    }

    fn receiver(&self) -> String {
        format!("func (repo *Repository{}MutationImpl)", self.entity.name)
    }

    fn error(&self, what: &str) -> String {
        format!(
            "fmt.Errorf({})",
            quote(&format!("{}: {what}", self.entity.private_name))
        )
    }

    fn interface(&self, l: &Locals) -> String {
        let n = &self.entity.name;
        let record = self.record_type();
        let list = self.list_type();

        CodeBuilder::go()
            .braced(&format!("type Repository{n}Mutation interface {{"), |b| {
                b.line(&format!(
                    "InsertList(ctx context.Context, {} {list}) (*MutationResult, error)",
                    l.list
                ))
                .line(&format!(
                    "Insert(ctx context.Context, {} *{record}) (*MutationResult, error)",
                    l.record
                ))
                .line(&format!(
                    "UpdateByFilter(ctx context.Context, filter Filter, {} *{record}, fields ...{n}Field) (*MutationResult, error)",
                    l.record
                ))
                .line(&format!(
                    "Update(ctx context.Context, {} {}, {} *{record}, fields ...{n}Field) (*MutationResult, error)",
                    l.id, l.id_type, l.record
                ))
                .line("DeleteByFilter(ctx context.Context, filter Filter) (*MutationResult, error)")
                .line(&format!(
                    "Delete(ctx context.Context, {} {}) (*MutationResult, error)",
                    l.id, l.id_type
                ))
            })
            .build()
    }

    fn implementation(&self) -> String {
        let n = &self.entity.name;
        let members = align_columns(&[
            vec!["db".to_string(), "*sqlx.DB".to_string()],
            vec!["tx".to_string(), "*sqlx.Tx".to_string()],
        ]);

        CodeBuilder::go()
            .braced(&format!("type Repository{n}MutationImpl struct {{"), |b| {
                b.lines(members)
            })
            .blank()
            .braced(
                &format!("func NewRepo{n}Mutation(db *sqlx.DB) Repository{n}Mutation {{"),
                |b| b.line(&format!("return &Repository{n}MutationImpl{{db: db}}")),
            )
            .blank()
            .comment(&format!(
                "NewRepo{n}MutationFromTx runs every statement inside tx. Committing is up to the caller."
            ))
            .braced(
                &format!("func NewRepo{n}MutationFromTx(tx *sqlx.Tx) Repository{n}Mutation {{"),
                |b| b.line(&format!("return &Repository{n}MutationImpl{{tx: tx}}")),
            )
            .build()
    }

    fn insert(&self, l: &Locals) -> String {
        let record = self.record_type();
        let list = self.list_type();
        let args: Vec<String> = self
            .entity
            .insertable_fields()
            .map(|f| format!("{}.{}", l.record, f.name))
            .collect();
        let header = if args.is_empty() {
            format!("for range {} {{", l.list)
        } else {
            format!("for _, {} := range {} {{", l.record, l.list)
        };

        CodeBuilder::go()
            .braced(
                &format!(
                    "{} InsertList(ctx context.Context, {} {list}) (*MutationResult, error) {{",
                    self.receiver(),
                    l.list
                ),
                |b| {
                    b.braced(&format!("if len({}) == 0 {{", l.list), |b| {
                        b.line(&format!("return nil, {}", self.error("nothing to insert")))
                    })
                    .line("placeholders := []string{}")
                    .line("values := []interface{}{}")
                    .braced(&header, |b| {
                        b.line(&format!(
                            "placeholders = append(placeholders, {})",
                            quote(&placeholder_row(self.entity))
                        ))
                        .when(!args.is_empty(), |b| {
                            b.line(&format!("values = append(values, {})", args.join(", ")))
                        })
                    })
                    .line(&format!(
                        "query := {} + strings.Join(placeholders, \", \")",
                        quote(&insert_prefix(self.entity))
                    ))
                    .line("return repo.exec(ctx, query, values...)")
                },
            )
            .blank()
            .braced(
                &format!(
                    "{} Insert(ctx context.Context, {} *{record}) (*MutationResult, error) {{",
                    self.receiver(),
                    l.record
                ),
                |b| b.line(&format!("return repo.InsertList(ctx, {list}{{{}}})", l.record)),
            )
            .build()
    }

    fn update(&self, l: &Locals) -> Result<String> {
        let n = &self.entity.name;
        let record = self.record_type();
        let prefix = quote(&update_prefix(self.entity));
        let by_id = quote(&id_condition(self.entity)?);
        let build = format!(
            "assignments, values, err := build{n}Assignments({}, fields)",
            l.record
        );

        Ok(CodeBuilder::go()
            .comment("UpdateByFilter sets only the given fields on every record matching filter.")
            .braced(
                &format!(
                    "{} UpdateByFilter(ctx context.Context, filter Filter, {} *{record}, fields ...{n}Field) (*MutationResult, error) {{",
                    self.receiver(),
                    l.record
                ),
                |b| {
                    self.require_filter(b)
                        .line(&build)
                        .braced("if err != nil {", |b| b.line("return nil, err"))
                        .line(&format!(
                            "query := {prefix} + assignments + \" WHERE \" + filter.Query()"
                        ))
                        .line("return repo.exec(ctx, query, append(values, filter.Values()...)...)")
                },
            )
            .blank()
            .comment("Update sets only the given fields on the record with the given primary key.")
            .braced(
                &format!(
                    "{} Update(ctx context.Context, {} {}, {} *{record}, fields ...{n}Field) (*MutationResult, error) {{",
                    self.receiver(),
                    l.id,
                    l.id_type,
                    l.record
                ),
                |b| {
                    b.line(&build)
                        .braced("if err != nil {", |b| b.line("return nil, err"))
                        .line(&format!("query := {prefix} + assignments + {by_id}"))
                        .line(&format!(
                            "return repo.exec(ctx, query, append(values, {})...)",
                            l.id
                        ))
                },
            )
            .build())
    }

    fn delete(&self, l: &Locals) -> Result<String> {
        let by_id = id_condition(self.entity)?;
        let delete_by_id = quote(&format!("DELETE FROM {}{by_id}", self.entity.table));

        Ok(CodeBuilder::go()
            .braced(
                &format!(
                    "{} DeleteByFilter(ctx context.Context, filter Filter) (*MutationResult, error) {{",
                    self.receiver()
                ),
                |b| {
                    self.require_filter(b)
                        .line(&format!(
                            "query := {} + filter.Query()",
                            quote(&delete_prefix(self.entity))
                        ))
                        .line("return repo.exec(ctx, query, filter.Values()...)")
                },
            )
            .blank()
            .braced(
                &format!(
                    "{} Delete(ctx context.Context, {} {}) (*MutationResult, error) {{",
                    self.receiver(),
                    l.id,
                    l.id_type
                ),
                |b| {
                    b.line(&format!("query := {delete_by_id}"))
                        .line(&format!("return repo.exec(ctx, query, {})", l.id))
                },
            )
            .build())
    }

    /// Filtered statements refuse to run without a condition.
    fn require_filter(&self, b: CodeBuilder) -> CodeBuilder {
        b.braced("if filter == nil || filter.Query() == \"\" {", |b| {
            b.line(&format!("return nil, {}", self.error("a filter is required")))
        })
        .braced("if err := filter.Err(); err != nil {", |b| {
            b.line("return nil, err")
        })
    }

    fn assignments(&self, l: &Locals) -> String {
        let n = &self.entity.name;
        let record = self.record_type();
        let unknown = quote(&format!("{}: unknown field %q", self.entity.private_name));

        CodeBuilder::go()
            .braced(
                &format!(
                    "func build{n}Assignments({} *{record}, fields []{n}Field) (string, []interface{{}}, error) {{",
                    l.record
                ),
                |b| {
                    b.braced("if len(fields) == 0 {", |b| {
                        b.line(&format!(
                            "return \"\", nil, {}",
                            self.error("no fields to update")
                        ))
                    })
                    .line("assignments := []string{}")
                    .line("values := []interface{}{}")
                    .braced("for _, field := range fields {", |b| {
                        b.braced("switch field {", |b| {
                            b.each(&self.entity.fields, |b, field| {
                                b.line(&format!("case {n}Field({}):", quote(&field.db_name)))
                                    .indent()
                                    .line(&format!(
                                        "assignments = append(assignments, {})",
                                        quote(&assignment(field))
                                    ))
                                    .line(&format!(
                                        "values = append(values, {}.{})",
                                        l.record, field.name
                                    ))
                                    .dedent()
                            })
                            .line("default:")
                            .indent()
                            .line(&format!("return \"\", nil, fmt.Errorf({unknown}, field)"))
                            .dedent()
                        })
                    })
                    .line("return strings.Join(assignments, \", \"), values, nil")
                },
            )
            .build()
    }

    fn exec(&self) -> String {
        CodeBuilder::go()
            .braced(
                &format!(
                    "{} exec(ctx context.Context, query string, args ...interface{{}}) (*MutationResult, error) {{",
                    self.receiver()
                ),
                |b| {
                    b.line("var result sql.Result")
                        .line("var err error")
                        .line("if repo.tx != nil {")
                        .indent()
                        .line("result, err = repo.tx.ExecContext(ctx, query, args...)")
                        .dedent()
                        .braced("} else {", |b| {
                            b.line("result, err = repo.db.ExecContext(ctx, query, args...)")
                        })
                        .braced("if err != nil {", |b| b.line("return nil, err"))
                        .line("return &MutationResult{Result: result}, nil")
                },
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use repogen_schema::{ColumnInfo, Introspector, StaticSchema};

    use super::*;
    use crate::{Error, GoTypeMapper};

    fn entity(table: &str, columns: Vec<ColumnInfo>) -> Entity {
        let schema = StaticSchema::new().with_table(table, columns);
        Introspector::new(&schema, &GoTypeMapper)
            .introspect(table)
            .unwrap()
    }

    fn invoice() -> Entity {
        entity(
            "invoices",
            vec![
                ColumnInfo::new("id", "bigint").primary().extra("auto_increment"),
                ColumnInfo::new("customer_name", "varchar(255)"),
                ColumnInfo::new("amount", "decimal(10,2)").nullable(),
            ],
        )
    }

    fn render(entity: &Entity) -> String {
        RepoMutationGo::new(entity, "repository", None)
            .render()
            .unwrap()
    }

    #[test]
    fn test_insert_skips_auto_increment() {
        let source = render(&invoice());
        assert!(source.contains(
            "query := \"INSERT INTO invoices (customer_name, amount) VALUES \" + strings.Join(placeholders, \", \")"
        ));
        assert!(source.contains("placeholders = append(placeholders, \"(?, ?)\")"));
        assert!(source.contains("values = append(values, invoice.CustomerName, invoice.Amount)"));
    }

    #[test]
    fn test_update_by_id() {
        let source = render(&invoice());
        assert!(source.contains(
            "Update(ctx context.Context, id int64, invoice *Invoice, fields ...InvoiceField) (*MutationResult, error)"
        ));
        assert!(source.contains("query := \"UPDATE invoices SET \" + assignments + \" WHERE id = ?\""));
        assert!(source.contains("return repo.exec(ctx, query, append(values, id)...)"));
    }

    #[test]
    fn test_assignments_cover_every_field() {
        let source = render(&invoice());
        for column in ["id", "customer_name", "amount"] {
            assert!(source.contains(&format!("case InvoiceField(\"{column}\"):")));
            assert!(source.contains(&format!(
                "assignments = append(assignments, \"{column} = ?\")"
            )));
        }
        assert!(source.contains("return \"\", nil, fmt.Errorf(\"invoice: unknown field %q\", field)"));
    }

    #[test]
    fn test_transaction_variant() {
        let source = render(&invoice());
        assert!(source.contains("func NewRepoInvoiceMutationFromTx(tx *sqlx.Tx) RepositoryInvoiceMutation {"));
        assert!(source.contains("result, err = repo.tx.ExecContext(ctx, query, args...)"));
    }

    #[test]
    fn test_id_type_import() {
        let events = entity(
            "events",
            vec![
                ColumnInfo::new("occurred_at", "datetime").primary(),
                ColumnInfo::new("payload", "text"),
            ],
        );
        let source = render(&events);
        assert!(source.contains("\t\"time\"\n"));
        assert!(source.contains("Delete(ctx context.Context, occurredAt time.Time)"));
        assert!(source.contains("query := \"DELETE FROM events WHERE occurred_at = ?\""));
    }

    #[test]
    fn test_record_local_avoids_id_collision() {
        let ids = entity(
            "ids",
            vec![ColumnInfo::new("id", "bigint").primary().extra("auto_increment")],
        );
        let source = render(&ids);
        assert!(source.contains("Insert(ctx context.Context, idRecord *Id)"));
        assert!(source.contains("for range idList {"));
    }

    #[test]
    fn test_requires_primary_key() {
        let logs = entity("logs", vec![ColumnInfo::new("line", "text")]);
        let err = RepoMutationGo::new(&logs, "repository", None)
            .render()
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
