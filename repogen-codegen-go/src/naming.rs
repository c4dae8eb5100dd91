//! Go-specific naming conventions.

use repogen_codegen::NamingConvention;
use repogen_core::to_private_name;

fn escape_go_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Go naming conventions.
///
/// Besides Go keywords and predeclared identifiers, local names must not
/// collide with imported package names or the locals the templates declare.
pub const GO_NAMING: NamingConvention = NamingConvention {
    to_local: to_private_name,
    reserved_words: &[
        // keywords
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
        // predeclared identifiers
        "any", "append", "bool", "byte", "cap", "close", "copy", "delete", "error", "false",
        "float32", "float64", "int", "int8", "int16", "int32", "int64", "iota", "len", "make",
        "new", "nil", "panic", "print", "println", "recover", "rune", "string", "true", "uint",
        "uint8", "uint16", "uint32", "uint64", "uintptr",
        // imported packages
        "context", "decimal", "fmt", "null", "sql", "sqlx", "strings", "time",
        // template locals
        "args", "assignments", "ctx", "err", "field", "fields", "filter", "placeholders",
        "query", "repo", "result", "values",
    ],
    escape_reserved: escape_go_reserved,
};
