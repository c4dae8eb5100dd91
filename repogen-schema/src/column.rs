//! Raw column metadata.

use serde::Deserialize;

/// Key role of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    #[default]
    #[serde(alias = "", alias = "MUL", alias = "UNI")]
    None,
    #[serde(alias = "PRI")]
    Primary,
}

impl KeyRole {
    /// Parse a MySQL `COLUMN_KEY` value (`PRI`, `UNI`, `MUL` or empty).
    pub fn from_mysql(key: &str) -> Self {
        if key.eq_ignore_ascii_case("PRI") {
            Self::Primary
        } else {
            Self::None
        }
    }
}

/// One physical column, as reported by a schema source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Type as declared, possibly with a size suffix (e.g., `varchar(255)`)
    #[serde(rename = "type")]
    pub raw_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub key: KeyRole,
    /// Free-form attributes such as `auto_increment`
    #[serde(default)]
    pub extra: String,
}

impl ColumnInfo {
    /// Create a non-nullable, non-key column.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            key: KeyRole::None,
            extra: String::new(),
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as the primary key.
    pub fn primary(mut self) -> Self {
        self.key = KeyRole::Primary;
        self
    }

    /// Set the extra attributes.
    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.key == KeyRole::Primary
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_role_from_mysql() {
        assert_eq!(KeyRole::from_mysql("PRI"), KeyRole::Primary);
        assert_eq!(KeyRole::from_mysql("MUL"), KeyRole::None);
        assert_eq!(KeyRole::from_mysql(""), KeyRole::None);
    }

    #[test]
    fn test_auto_increment_detection() {
        let id = ColumnInfo::new("id", "bigint").extra("auto_increment");
        let created = ColumnInfo::new("created_at", "timestamp").extra("DEFAULT_GENERATED");
        assert!(id.is_auto_increment());
        assert!(!created.is_auto_increment());
    }

    #[test]
    fn test_builder() {
        let col = ColumnInfo::new("id", "bigint").primary().nullable();
        assert!(col.is_primary_key());
        assert!(col.nullable);
    }
}
