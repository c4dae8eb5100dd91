//! The shared helper unit: the abstractions every repository refers to.

use repogen_codegen::CodeBuilder;

use crate::GoFile;

/// `repo_args.go`, emitted once per run.
pub struct RepoArgsGo<'a> {
    package: &'a str,
}

impl<'a> RepoArgsGo<'a> {
    pub const FILE_NAME: &'static str = "repo_args.go";

    pub fn new(package: &'a str) -> Self {
        Self { package }
    }

    pub fn render(&self) -> String {
        let filter = CodeBuilder::go()
            .braced("type Filter interface {", |b| {
                b.line("Query() string")
                    .line("Values() []interface{}")
                    .line("Err() error")
            })
            .build();

        let order = CodeBuilder::go()
            .braced("type Order interface {", |b| {
                b.line("Value() string").line("Direction() string")
            })
            .build();

        let pagination = CodeBuilder::go()
            .braced("type Pagination interface {", |b| {
                b.line("GetPage() int").line("GetSize() int")
            })
            .build();

        let pagination_data = CodeBuilder::go()
            .braced("type PaginationData struct {", |b| {
                b.line("Page int").line("Size int")
            })
            .blank()
            .braced("func (pagination PaginationData) GetPage() int {", |b| {
                b.line("return pagination.Page")
            })
            .blank()
            .braced("func (pagination PaginationData) GetSize() int {", |b| {
                b.line("return pagination.Size")
            })
            .build();

        let mutation_result = CodeBuilder::go()
            .braced("type MutationResult struct {", |b| b.line("sql.Result"))
            .build();

        let not_found = CodeBuilder::go()
            .braced("type NotFoundError struct {", |b| b.line("Entity string"))
            .blank()
            .braced("func (e *NotFoundError) Error() string {", |b| {
                b.line("return e.Entity + \" not found\"")
            })
            .build();

        let exclude = CodeBuilder::go()
            .braced(
                "func excludeFields(allFields []string, excluded []string) []string {",
                |b| {
                    b.line("skip := make(map[string]bool, len(excluded))")
                        .braced("for _, field := range excluded {", |b| {
                            b.line("skip[field] = true")
                        })
                        .line("fields := []string{}")
                        .braced("for _, field := range allFields {", |b| {
                            b.braced("if !skip[field] {", |b| {
                                b.line("fields = append(fields, field)")
                            })
                        })
                        .line("return fields")
                },
            )
            .build();

        GoFile::new(self.package)
            .import("database/sql")
            .add_all([
                filter,
                order,
                pagination,
                pagination_data,
                mutation_result,
                not_found,
                exclude,
            ])
            .render()
    }
}
