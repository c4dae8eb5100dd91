//! Language-specific abstractions.
//!
//! - [`NamingConvention`] - Language-specific naming rules

mod naming;

pub use naming::NamingConvention;
