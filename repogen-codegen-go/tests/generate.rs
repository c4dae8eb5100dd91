//! End-to-end runs of the generator against in-memory schemas.

use std::path::{Path, PathBuf};

use repogen_codegen_go::{Error, GenerationConfig, Generator, LanguageCodegen};
use repogen_core::{FsEmitter, MemoryEmitter};
use repogen_schema::{ColumnInfo, ResolutionError, StaticSchema};

const MODULE: &str = "github.com/acme/billing";
const ROOT: &str = "/src/billing";

fn invoices() -> Vec<ColumnInfo> {
    vec![
        ColumnInfo::new("id", "bigint").primary().extra("auto_increment"),
        ColumnInfo::new("customer_name", "varchar(255)"),
        ColumnInfo::new("amount", "decimal(10,2)"),
        ColumnInfo::new("paid_at", "datetime").nullable(),
    ]
}

fn customers() -> Vec<ColumnInfo> {
    vec![
        ColumnInfo::new("id", "int").primary().extra("auto_increment"),
        ColumnInfo::new("email", "varchar(320)"),
    ]
}

fn schema() -> StaticSchema {
    StaticSchema::new()
        .with_table("invoices", invoices())
        .with_table("customers", customers())
}

fn config(tables: &[&str]) -> GenerationConfig {
    GenerationConfig::new(MODULE)
        .with_destination(ROOT)
        .with_tables(tables.iter().copied())
}

fn paths(emitter: &MemoryEmitter) -> Vec<PathBuf> {
    emitter.files().into_keys().collect()
}

#[test]
fn test_single_table_run() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let result = Generator::new(config(&["invoices"]), &schema)
        .generate(&emitter)
        .unwrap();

    assert_eq!(result.tables, vec!["invoices"]);
    assert_eq!(
        result.written,
        vec![
            PathBuf::from("/src/billing/model/invoices_model.go"),
            PathBuf::from("/src/billing/repository/invoices_repo_query.go"),
            PathBuf::from("/src/billing/repository/invoices_repo_mutation.go"),
            PathBuf::from("/src/billing/repository/repo_args.go"),
        ]
    );
    assert_eq!(
        emitter.dirs(),
        vec![
            PathBuf::from("/src/billing/model"),
            PathBuf::from("/src/billing/repository"),
        ]
    );

    let model = emitter.get("/src/billing/model/invoices_model.go").unwrap();
    assert!(model.contains("\tPaidAt       null.Time       `db:\"paid_at\"`\n"));
    assert!(model.contains(
        "import (\n\t\"github.com/guregu/null\"\n\t\"github.com/shopspring/decimal\"\n)\n"
    ));
}

#[test]
fn test_shared_helpers_emitted_once() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let result = Generator::new(config(&["invoices", "customers"]), &schema)
        .generate(&emitter)
        .unwrap();

    assert_eq!(result.written.len(), 7);
    let shared = result
        .written
        .iter()
        .filter(|p| p.ends_with("repo_args.go"))
        .count();
    assert_eq!(shared, 1);
    assert_eq!(
        result.written.last().unwrap(),
        Path::new("/src/billing/repository/repo_args.go")
    );
}

#[test]
fn test_runs_are_deterministic() {
    let schema = schema();
    let first = MemoryEmitter::new();
    let second = MemoryEmitter::new();
    Generator::new(config(&["invoices", "customers"]), &schema)
        .generate(&first)
        .unwrap();
    Generator::new(config(&["invoices", "customers"]), &schema)
        .generate(&second)
        .unwrap();

    assert_eq!(first.files(), second.files());
}

#[test]
fn test_unsupported_type_emits_nothing() {
    let schema = schema().with_table(
        "places",
        [
            ColumnInfo::new("id", "bigint").primary(),
            ColumnInfo::new("location", "geometry"),
        ],
    );
    let emitter = MemoryEmitter::new();
    let err = Generator::new(config(&["invoices", "places"]), &schema)
        .generate(&emitter)
        .unwrap_err();

    match err {
        Error::Schema(repogen_schema::Error::Resolution(ResolutionError::UnknownType {
            table,
            column,
            raw_type,
            nullable,
        })) => {
            assert_eq!(table, "places");
            assert_eq!(column, "location");
            assert_eq!(raw_type, "geometry");
            assert!(!nullable);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(emitter.files().is_empty());
    assert!(emitter.dirs().is_empty());
}

#[test]
fn test_missing_table_is_fetch_error() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let err = Generator::new(config(&["refunds"]), &schema)
        .generate(&emitter)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Schema(repogen_schema::Error::SchemaFetch { ref table, .. }) if table == "refunds"
    ));
    assert!(emitter.files().is_empty());
}

#[test]
fn test_query_only_skips_mutation() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    Generator::new(config(&["invoices"]).with_query_only(true), &schema)
        .generate(&emitter)
        .unwrap();

    assert_eq!(
        paths(&emitter),
        vec![
            PathBuf::from("/src/billing/model/invoices_model.go"),
            PathBuf::from("/src/billing/repository/invoices_repo_query.go"),
            PathBuf::from("/src/billing/repository/repo_args.go"),
        ]
    );
}

#[test]
fn test_missing_primary_key() {
    let schema = StaticSchema::new().with_table(
        "audit_logs",
        [
            ColumnInfo::new("message", "text"),
            ColumnInfo::new("logged_at", "timestamp"),
        ],
    );

    // Without mutations a keyless table is fine.
    let emitter = MemoryEmitter::new();
    Generator::new(config(&["audit_logs"]).with_query_only(true), &schema)
        .generate(&emitter)
        .unwrap();
    assert_eq!(emitter.files().len(), 3);

    let emitter = MemoryEmitter::new();
    let err = Generator::new(config(&["audit_logs"]), &schema)
        .generate(&emitter)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(repogen_schema::Error::Resolution(
            ResolutionError::MissingPrimaryKey { ref table }
        )) if table == "audit_logs"
    ));
    assert!(emitter.files().is_empty());
}

#[test]
fn test_composite_primary_key_rejected() {
    let schema = StaticSchema::new().with_table(
        "line_items",
        [
            ColumnInfo::new("invoice_id", "bigint").primary(),
            ColumnInfo::new("position", "int").primary(),
        ],
    );
    let err = Generator::new(config(&["line_items"]).with_query_only(true), &schema)
        .preview()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(repogen_schema::Error::Resolution(
            ResolutionError::CompositePrimaryKey { .. }
        ))
    ));
}

#[test]
fn test_shared_namespace_has_no_model_import() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let config = config(&["invoices"])
        .with_model_dir("repository")
        .with_model_package("repository");
    Generator::new(config, &schema).generate(&emitter).unwrap();

    let model = emitter
        .get("/src/billing/repository/invoices_model.go")
        .unwrap();
    assert!(model.contains("package repository\n"));

    let query = emitter
        .get("/src/billing/repository/invoices_repo_query.go")
        .unwrap();
    assert!(!query.contains("invoicemodel"));
    assert!(!query.contains("github.com/acme/billing/"));
    assert!(query.contains("GetOne(ctx context.Context) (*Invoice, error)"));
}

#[test]
fn test_shared_package_rejects_colliding_names() {
    let schema = StaticSchema::new().with_table(
        "orders",
        [
            ColumnInfo::new("id", "bigint").primary().extra("auto_increment"),
            ColumnInfo::new("total", "decimal(10,2)"),
        ],
    );
    let emitter = MemoryEmitter::new();
    let config = config(&["orders"])
        .with_model_dir("repository")
        .with_model_package("repository");
    let err = Generator::new(config, &schema)
        .generate(&emitter)
        .unwrap_err();

    match err {
        Error::DuplicateDeclaration { name, unit, first } => {
            assert_eq!(name, "Order");
            assert_eq!(unit, "repository/repo_args.go");
            assert_eq!(first, "repository/orders_model.go");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(emitter.files().is_empty());
}

#[test]
fn test_shared_package_rejects_colliding_tables() {
    // The invoices query unit declares InvoiceFilter, as does the model of
    // invoice_filters.
    let schema = schema().with_table(
        "invoice_filters",
        [ColumnInfo::new("id", "int").primary().extra("auto_increment")],
    );
    let config = config(&["invoices", "invoice_filters"])
        .with_model_dir("repository")
        .with_model_package("repository");
    let err = Generator::new(config, &schema).preview().unwrap_err();

    assert!(matches!(
        err,
        Error::DuplicateDeclaration { ref name, ref unit, .. }
            if name == "InvoiceFilter" && unit == "repository/invoice_filters_model.go"
    ));
}

#[test]
fn test_separate_packages_allow_same_names() {
    let schema = schema().with_table(
        "invoice_filters",
        [ColumnInfo::new("id", "int").primary().extra("auto_increment")],
    );
    let files = Generator::new(config(&["invoices", "invoice_filters"]), &schema)
        .preview()
        .unwrap();
    assert_eq!(files.len(), 7);
}

#[test]
fn test_repeated_table_is_not_a_collision() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let result = Generator::new(config(&["invoices", "invoices"]), &schema)
        .generate(&emitter)
        .unwrap();

    assert_eq!(result.written.len(), 7);
    assert_eq!(emitter.files().len(), 4);
}

#[test]
fn test_separate_namespaces_import_model() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    Generator::new(config(&["invoices"]), &schema)
        .generate(&emitter)
        .unwrap();

    let mutation = emitter
        .get("/src/billing/repository/invoices_repo_mutation.go")
        .unwrap();
    assert!(mutation.contains("\tinvoicemodel \"github.com/acme/billing/model\"\n"));
    assert!(mutation.contains(
        "Insert(ctx context.Context, invoice *invoicemodel.Invoice) (*MutationResult, error)"
    ));
}

#[test]
fn test_nested_destination_import_path() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let config = GenerationConfig::new(MODULE)
        .with_destination("./internal/store")
        .with_tables(["customers"]);
    Generator::new(config, &schema)
        .with_working_dir(ROOT)
        .generate(&emitter)
        .unwrap();

    let query = emitter
        .get("./internal/store/repository/customers_repo_query.go")
        .unwrap();
    assert!(query.contains("\tcustomermodel \"github.com/acme/billing/internal/store/model\"\n"));
}

#[test]
fn test_invalid_config_emits_nothing() {
    let schema = schema();
    let emitter = MemoryEmitter::new();
    let config = config(&["invoices"])
        .with_model_dir("repository")
        .with_model_package("model");
    let err = Generator::new(config, &schema)
        .generate(&emitter)
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
    assert!(emitter.files().is_empty());
}

#[test]
fn test_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let schema = schema();
    let config = GenerationConfig::new(MODULE)
        .with_destination(dir.path())
        .with_tables(["invoices"]);
    let result = Generator::new(config.clone(), &schema)
        .generate(&FsEmitter)
        .unwrap();

    assert_eq!(result.written.len(), 4);
    let model = std::fs::read_to_string(dir.path().join("model/invoices_model.go")).unwrap();
    assert!(model.starts_with("// Code generated by repogen. DO NOT EDIT.\n"));

    // Regenerating overwrites in place.
    let again = Generator::new(config, &schema).generate(&FsEmitter).unwrap();
    assert_eq!(again.written, result.written);
    let entries = std::fs::read_dir(dir.path().join("repository"))
        .unwrap()
        .count();
    assert_eq!(entries, 3);
}
