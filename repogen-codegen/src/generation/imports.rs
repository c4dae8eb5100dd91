//! Import collection utilities.

use indexmap::IndexMap;

/// A single import: a package path and an optional local alias.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    pub path: String,
    pub alias: Option<String>,
}

impl Import {
    /// Whether the path belongs to the standard library, i.e. its first
    /// element has no dot (`fmt`, `database/sql` but not `github.com/...`).
    pub fn is_std(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or_default();
        !first.contains('.')
    }

    /// Render as an import spec: `"path"` or `alias "path"`.
    pub fn spec(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} \"{}\"", alias, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// Tracks imports and deduplicates them.
///
/// A path is imported at most once; adding it again with an alias sets the
/// alias. Rendering order does not depend on insertion order.
///
/// # Example
///
/// ```
/// use repogen_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("github.com/jmoiron/sqlx");
/// imports.add("fmt");
/// imports.add("context");
/// imports.add("fmt");
///
/// let groups = imports.groups();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0][0].path, "context");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Package path -> alias
    imports: IndexMap<String, Option<String>>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package import.
    pub fn add(&mut self, path: &str) {
        self.imports.entry(path.to_string()).or_default();
    }

    /// Add a package import under a local alias.
    pub fn add_aliased(&mut self, path: &str, alias: &str) {
        self.imports
            .insert(path.to_string(), Some(alias.to_string()));
    }

    /// Add every path yielded by `paths`.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add(path.as_ref());
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (path, alias) in &other.imports {
            match alias {
                Some(alias) => self.add_aliased(path, alias),
                None => self.add(path),
            }
        }
    }

    /// Check if a package is already imported.
    pub fn has(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    /// Imports split into a standard library group followed by a third-party
    /// group, each sorted by path. Empty groups are omitted.
    pub fn groups(&self) -> Vec<Vec<Import>> {
        let (mut std, mut external): (Vec<Import>, Vec<Import>) = self
            .imports
            .iter()
            .map(|(path, alias)| Import {
                path: path.clone(),
                alias: alias.clone(),
            })
            .partition(Import::is_std);

        std.sort_by(|a, b| a.path.cmp(&b.path));
        external.sort_by(|a, b| a.path.cmp(&b.path));

        [std, external]
            .into_iter()
            .filter(|group| !group.is_empty())
            .collect()
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of imported packages.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
