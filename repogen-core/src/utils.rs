//! Shared utility functions for code generation.

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Lower the first character (e.g., "InvoiceItem" -> "invoiceItem")
pub fn to_private_name(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("id"), "Id");
        assert_eq!(to_pascal_case("customer_name"), "CustomerName");
        assert_eq!(to_pascal_case("created_at"), "CreatedAt");
        assert_eq!(to_pascal_case("invoice__items"), "InvoiceItems");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_private_name() {
        assert_eq!(to_private_name("Invoice"), "invoice");
        assert_eq!(to_private_name("InvoiceItem"), "invoiceItem");
        assert_eq!(to_private_name(""), "");
    }
}
