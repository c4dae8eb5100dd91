//! Table introspection for repogen.
//!
//! Turns the column metadata of one table into an [`Entity`]: a normalized,
//! language-neutral description the templates render from.
//!
//! # Module Organization
//!
//! - [`ColumnInfo`], [`KeyRole`] - raw column metadata
//! - [`SchemaSource`], [`StaticSchema`] - where column metadata comes from
//! - [`TypeResolver`] - raw column type to target type
//! - [`Introspector`] - builds an [`Entity`] from a table name

mod column;
mod entity;
mod error;
mod introspect;
mod resolve;
mod source;

pub use column::{ColumnInfo, KeyRole};
pub use entity::{Entity, Field};
pub use error::{Error, FetchError, ResolutionError, Result, SchemaFileError};
pub use introspect::Introspector;
pub use resolve::{TypeResolver, UnsupportedType};
pub use source::{SchemaSource, StaticSchema};
