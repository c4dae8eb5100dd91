//! Identifier rules of a target language.

/// How a target language turns exported names into locals, and which
/// locals are off limits.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform an exported name into a local name (e.g., "CustomerName" -> "customerName")
    pub to_local: fn(&str) -> String,
    /// Words a local identifier must not be: language keywords plus
    /// identifiers the generated code already declares in the same scope
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "type_" in Go)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.iter().any(|word| *word == name)
    }

    /// `name`, escaped when it is reserved.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Local variable or parameter name for an exported `name`.
    pub fn local_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_local)(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(s: &str) -> String {
        s.to_lowercase()
    }

    fn suffix(s: &str) -> String {
        format!("{s}_")
    }

    const TEST: NamingConvention = NamingConvention {
        to_local: lower,
        reserved_words: &["type", "func"],
        escape_reserved: suffix,
    };

    #[test]
    fn test_safe_name() {
        assert_eq!(TEST.safe_name("type"), "type_");
        assert_eq!(TEST.safe_name("amount"), "amount");
    }

    #[test]
    fn test_local_name_escapes() {
        assert_eq!(TEST.local_name("Func"), "func_");
        assert_eq!(TEST.local_name("Amount"), "amount");
        assert!(TEST.is_reserved("type"));
        assert!(!TEST.is_reserved("Type"));
    }
}
