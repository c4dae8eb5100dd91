//! The read-query unit: field selection, filters, ordering and a fluent,
//! copy-on-write query repository.

use repogen_codegen::{CodeBuilder, align_columns};
use repogen_schema::Entity;

use super::{model_type, quote};
use crate::{GoFile, ModelImport};

/// `T_repo_query.go`
pub struct RepoQueryGo<'a> {
    entity: &'a Entity,
    package: &'a str,
    model: Option<ModelImport>,
}

impl<'a> RepoQueryGo<'a> {
    pub fn new(entity: &'a Entity, package: &'a str, model: Option<ModelImport>) -> Self {
        Self {
            entity,
            package,
            model,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_repo_query.go", self.entity.table)
    }

    pub fn render(&self) -> String {
        let mut file = GoFile::new(self.package)
            .imports(["context", "fmt", "strings", "github.com/jmoiron/sqlx"]);
        if let Some(model) = &self.model {
            file = file.import_aliased(&model.path, &model.alias);
        }

        file.add_all([
            self.fields(),
            self.select_fields(),
            self.filter(),
            self.order(),
            self.interface(),
            self.implementation(),
            self.fluent_methods(),
            self.count(),
            self.get_list(),
            self.get_one(),
        ])
        .render()
    }

    fn fields(&self) -> String {
        let n = &self.entity.name;
        CodeBuilder::go()
            .line(&format!("type {n}Field string"))
            .blank()
            .line(&format!("type {n}FieldList []{n}Field"))
            .blank()
            .braced(
                &format!("func (fieldList {n}FieldList) toStrings() []string {{"),
                |b| {
                    b.line("fields := []string{}")
                        .braced("for _, field := range fieldList {", |b| {
                            b.line("fields = append(fields, string(field))")
                        })
                        .line("return fields")
                },
            )
            .build()
    }

    fn select_fields(&self) -> String {
        let n = &self.entity.name;
        let fields = &self.entity.fields;

        CodeBuilder::go()
            .line(&format!("type {n}SelectFields struct{{}}"))
            .blank()
            .braced(
                &format!("func New{n}SelectFields() {n}SelectFields {{"),
                |b| b.line(&format!("return {n}SelectFields{{}}")),
            )
            .each(fields, |b, field| {
                b.blank().braced(
                    &format!("func ({n}SelectFields) {}() {n}Field {{", field.name),
                    |b| b.line(&format!("return {n}Field({})", quote(&field.db_name))),
                )
            })
            .blank()
            .braced(&format!("func ({n}SelectFields) All() {n}FieldList {{"), |b| {
                b.braced(&format!("return {n}FieldList{{"), |b| {
                    b.each(fields, |b, field| {
                        b.line(&format!("{n}Field({}),", quote(&field.db_name)))
                    })
                })
            })
            .build()
    }

    fn filter(&self) -> String {
        let n = &self.entity.name;
        let f = format!("{n}Filter");
        let members = align_columns(&[
            vec!["operator".to_string(), "string".to_string()],
            vec!["query".to_string(), "[]string".to_string()],
            vec!["values".to_string(), "[]interface{}".to_string()],
            vec!["err".to_string(), "error".to_string()],
        ]);

        CodeBuilder::go()
            .braced(&format!("type {f} struct {{"), |b| b.lines(members))
            .blank()
            .comment(&format!(
                "New{f} joins conditions with operator, AND when empty."
            ))
            .braced(&format!("func New{f}(operator string) {f} {{"), |b| {
                b.braced("if operator == \"\" {", |b| b.line("operator = \"AND\""))
                    .line(&format!("return {f}{{operator: operator}}"))
            })
            .each(&self.entity.fields, |b, field| {
                b.blank().braced(
                    &format!(
                        "func (filter {f}) SetFilterBy{}(value interface{{}}, operator string) {f} {{",
                        field.name
                    ),
                    |b| {
                        b.line(&format!(
                            "return filter.with({}, value, operator)",
                            quote(&field.db_name)
                        ))
                    },
                )
            })
            .blank()
            .braced(
                &format!(
                    "func (filter {f}) with(column string, value interface{{}}, operator string) {f} {{"
                ),
                |b| {
                    b.braced("if !strings.EqualFold(operator, \"IN\") {", |b| {
                        b.line(
                            "return filter.and(fmt.Sprintf(\"%s %s ?\", column, operator), value)",
                        )
                    })
                    .line("query, values, err := sqlx.In(fmt.Sprintf(\"%s IN (?)\", column), value)")
                    .line("next := filter.and(query, values...)")
                    .braced("if err != nil && next.err == nil {", |b| {
                        b.line("next.err = err")
                    })
                    .line("return next")
                },
            )
            .blank()
            .braced(
                &format!("func (filter {f}) and(query string, values ...interface{{}}) {f} {{"),
                |b| {
                    b.line(&format!(
                        "next := {f}{{operator: filter.operator, err: filter.err}}"
                    ))
                    .line("next.query = append(append([]string{}, filter.query...), query)")
                    .line("next.values = append(append([]interface{}{}, filter.values...), values...)")
                    .line("return next")
                },
            )
            .blank()
            .braced(&format!("func (filter {f}) Query() string {{"), |b| {
                b.line("return strings.Join(filter.query, fmt.Sprintf(\" %s \", filter.operator))")
            })
            .blank()
            .braced(&format!("func (filter {f}) Values() []interface{{}} {{"), |b| {
                b.line("return filter.values")
            })
            .blank()
            .braced(&format!("func (filter {f}) Err() error {{"), |b| {
                b.line("return filter.err")
            })
            .build()
    }

    fn order(&self) -> String {
        let n = &self.entity.name;
        let o = format!("{n}Order");
        let members = align_columns(&[
            vec!["field".to_string(), format!("{n}Field")],
            vec!["direction".to_string(), "string".to_string()],
        ]);

        CodeBuilder::go()
            .braced(&format!("type {o} struct {{"), |b| b.lines(members))
            .blank()
            .comment(&format!("New{o} orders by field, ascending unless direction is DESC."))
            .braced(
                &format!("func New{o}(field {n}Field, direction string) {o} {{"),
                |b| {
                    b.braced("if strings.EqualFold(direction, \"DESC\") {", |b| {
                        b.line(&format!("return {o}{{field: field, direction: \"DESC\"}}"))
                    })
                    .line(&format!("return {o}{{field: field, direction: \"ASC\"}}"))
                },
            )
            .blank()
            .braced(&format!("func (order {o}) Value() string {{"), |b| {
                b.line("return string(order.field)")
            })
            .blank()
            .braced(&format!("func (order {o}) Direction() string {{"), |b| {
                b.line("return order.direction")
            })
            .build()
    }

    fn interface(&self) -> String {
        let n = &self.entity.name;
        let q = format!("Repository{n}Query");
        let record = model_type(self.model.as_ref(), n);
        let list = model_type(self.model.as_ref(), &format!("{n}List"));

        CodeBuilder::go()
            .braced(&format!("type {q} interface {{"), |b| {
                b.line(&format!("SelectFields(fields ...{n}Field) {q}"))
                    .line(&format!("ExcludeFields(fields ...{n}Field) {q}"))
                    .line(&format!("Filter(filter Filter) {q}"))
                    .line(&format!("Paginate(pagination Pagination) {q}"))
                    .line(&format!("OrderBy(orders ...Order) {q}"))
                    .line("Count(ctx context.Context) (int, error)")
                    .line(&format!("GetOne(ctx context.Context) (*{record}, error)"))
                    .line(&format!("GetList(ctx context.Context) ({list}, error)"))
            })
            .build()
    }

    fn implementation(&self) -> String {
        let n = &self.entity.name;
        let q = format!("Repository{n}Query");
        let members = align_columns(&[
            vec!["db".to_string(), "*sqlx.DB".to_string()],
            vec!["fields".to_string(), format!("{n}FieldList")],
            vec!["filter".to_string(), "Filter".to_string()],
            vec!["orderBy".to_string(), "[]Order".to_string()],
            vec!["pagination".to_string(), "Pagination".to_string()],
        ]);

        CodeBuilder::go()
            .braced(&format!("type {q}Impl struct {{"), |b| b.lines(members))
            .blank()
            .braced(&format!("func NewRepo{n}Query(db *sqlx.DB) {q} {{"), |b| {
                b.line(&format!(
                    "return &{q}Impl{{db: db, fields: New{n}SelectFields().All()}}"
                ))
            })
            .build()
    }

    /// Every fluent method copies the receiver and returns the copy.
    fn fluent_methods(&self) -> String {
        let n = &self.entity.name;
        let q = format!("Repository{n}Query");
        let setters = [
            (
                format!("SelectFields(fields ...{n}Field)"),
                format!("next.fields = append({n}FieldList{{}}, fields...)"),
            ),
            (
                "Filter(filter Filter)".to_string(),
                "next.filter = filter".to_string(),
            ),
            (
                "Paginate(pagination Pagination)".to_string(),
                "next.pagination = pagination".to_string(),
            ),
            (
                "OrderBy(orders ...Order)".to_string(),
                "next.orderBy = append([]Order{}, orders...)".to_string(),
            ),
        ];

        CodeBuilder::go()
            .each(&setters, |b, (signature, assign)| {
                b.braced(&format!("func (repo *{q}Impl) {signature} {q} {{"), |b| {
                    b.line("next := *repo").line(assign).line("return &next")
                })
                .blank()
            })
            .braced(
                &format!("func (repo *{q}Impl) ExcludeFields(fields ...{n}Field) {q} {{"),
                |b| {
                    b.line("next := *repo")
                        .line(&format!(
                            "remaining := excludeFields(New{n}SelectFields().All().toStrings(), {n}FieldList(fields).toStrings())"
                        ))
                        .line(&format!("next.fields = {n}FieldList{{}}"))
                        .braced("for _, field := range remaining {", |b| {
                            b.line(&format!("next.fields = append(next.fields, {n}Field(field))"))
                        })
                        .line("return &next")
                },
            )
            .blank()
            .braced(
                &format!("func (repo *{q}Impl) where() (string, []interface{{}}, error) {{"),
                |b| {
                    b.braced("if repo.filter == nil {", |b| b.line("return \"\", nil, nil"))
                        .braced("if err := repo.filter.Err(); err != nil {", |b| {
                            b.line("return \"\", nil, err")
                        })
                        .braced("if repo.filter.Query() == \"\" {", |b| {
                            b.line("return \"\", nil, nil")
                        })
                        .line("return \" WHERE \" + repo.filter.Query(), repo.filter.Values(), nil")
                },
            )
            .build()
    }

    fn count(&self) -> String {
        let n = &self.entity.name;
        let from = quote(&format!("SELECT COUNT(*) FROM {}", self.entity.table));

        CodeBuilder::go()
            .braced(
                &format!("func (repo *Repository{n}QueryImpl) Count(ctx context.Context) (int, error) {{"),
                |b| {
                    b.line("where, values, err := repo.where()")
                        .braced("if err != nil {", |b| b.line("return 0, err"))
                        .line("var count int")
                        .line(&format!("query := {from} + where"))
                        .braced(
                            "if err := repo.db.GetContext(ctx, &count, query, values...); err != nil {",
                            |b| b.line("return 0, err"),
                        )
                        .line("return count, nil")
                },
            )
            .build()
    }

    fn get_list(&self) -> String {
        let n = &self.entity.name;
        let list = model_type(self.model.as_ref(), &format!("{n}List"));
        let from = quote(&format!(" FROM {}", self.entity.table));
        let empty = quote(&format!("{}: no fields selected", self.entity.private_name));

        CodeBuilder::go()
            .braced(
                &format!(
                    "func (repo *Repository{n}QueryImpl) GetList(ctx context.Context) ({list}, error) {{"
                ),
                |b| {
                    b.braced("if len(repo.fields) == 0 {", |b| {
                        b.line(&format!("return nil, fmt.Errorf({empty})"))
                    })
                    .line("where, values, err := repo.where()")
                    .braced("if err != nil {", |b| b.line("return nil, err"))
                    .line(&format!(
                        "query := \"SELECT \" + strings.Join(repo.fields.toStrings(), \", \") + {from} + where"
                    ))
                    .braced("if len(repo.orderBy) > 0 {", |b| {
                        b.line("orders := []string{}")
                            .braced("for _, order := range repo.orderBy {", |b| {
                                b.line("orders = append(orders, fmt.Sprintf(\"%s %s\", order.Value(), order.Direction()))")
                            })
                            .line("query += \" ORDER BY \" + strings.Join(orders, \", \")")
                    })
                    .braced(
                        "if repo.pagination != nil && repo.pagination.GetSize() > 0 {",
                        |b| {
                            b.line("offset := 0")
                                .braced("if repo.pagination.GetPage() > 1 {", |b| {
                                    b.line("offset = (repo.pagination.GetPage() - 1) * repo.pagination.GetSize()")
                                })
                                .line("query += fmt.Sprintf(\" LIMIT %d OFFSET %d\", repo.pagination.GetSize(), offset)")
                        },
                    )
                    .line(&format!("result := {list}{{}}"))
                    .braced(
                        "if err := repo.db.SelectContext(ctx, &result, query, values...); err != nil {",
                        |b| b.line("return nil, err"),
                    )
                    .line("return result, nil")
                },
            )
            .build()
    }

    fn get_one(&self) -> String {
        let n = &self.entity.name;
        let record = model_type(self.model.as_ref(), n);

        CodeBuilder::go()
            .comment("GetOne returns the first record of GetList, or *NotFoundError.")
            .braced(
                &format!(
                    "func (repo *Repository{n}QueryImpl) GetOne(ctx context.Context) (*{record}, error) {{"
                ),
                |b| {
                    b.line("list, err := repo.GetList(ctx)")
                        .braced("if err != nil {", |b| b.line("return nil, err"))
                        .braced("if len(list) == 0 {", |b| {
                            b.line(&format!(
                                "return nil, &NotFoundError{{Entity: {}}}",
                                quote(&self.entity.private_name)
                            ))
                        })
                        .line("return list[0], nil")
                },
            )
            .build()
    }
}
