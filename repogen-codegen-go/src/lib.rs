//! Go repository generator for repogen.
//!
//! Renders, for every table, a model unit, a read-query unit and a mutation
//! unit, plus one shared helper unit per run, all targeting
//! `github.com/jmoiron/sqlx`.

mod compose;
mod config;
mod error;
pub mod files;
mod format;
mod generator;
mod go_file;
mod naming;
mod paths;
mod sql;
mod type_mapper;

pub use compose::{Composer, ModelImport, ModelRef, UnitKind};
pub use config::GenerationConfig;
pub use error::{Error, Result};
pub use format::{FormatError, Formatter, GofmtFormatter, LayoutFormatter};
pub use generator::Generator;
pub use go_file::GoFile;
pub use naming::GO_NAMING;
pub use paths::{
    find_module_root, module_anchor, resolve_cross_reference, resolve_cross_reference_from,
};
// Re-export for convenience
pub use repogen_core::LanguageCodegen;
pub use sql::{
    delete_by_filter_statement, delete_by_id_statement, insert_statement, update_by_filter_statement,
    update_by_id_statement,
};
pub use type_mapper::{GoTypeMapper, import_of};
