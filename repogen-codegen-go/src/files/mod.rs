//! Unit templates.
//!
//! Each unit renders raw Go source; formatting is applied by the
//! [`Composer`](crate::Composer).

mod model_go;
mod repo_args_go;
mod repo_mutation_go;
mod repo_query_go;

pub use model_go::ModelGo;
pub use repo_args_go::RepoArgsGo;
pub use repo_mutation_go::RepoMutationGo;
pub use repo_query_go::RepoQueryGo;

use crate::ModelImport;

/// A Go interpreted string literal.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A model type name, qualified when models are imported.
pub(crate) fn model_type(model: Option<&ModelImport>, name: &str) -> String {
    match model {
        Some(import) => import.qualify(name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("invoices"), "\"invoices\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_model_type() {
        let import = ModelImport {
            alias: "invoicemodel".into(),
            path: "github.com/acme/billing/model".into(),
        };
        assert_eq!(model_type(Some(&import), "Invoice"), "invoicemodel.Invoice");
        assert_eq!(model_type(None, "Invoice"), "Invoice");
    }
}
