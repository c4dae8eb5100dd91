//! GoFile abstraction for structured Go file generation.
//!
//! A Go file is a package clause, an import block and a body made of
//! top-level declarations separated by blank lines.

use repogen_codegen::ImportCollector;
use repogen_core::GENERATED_HEADER;

/// A structured representation of a Go source file.
///
/// # Example
///
/// ```
/// use repogen_codegen_go::GoFile;
///
/// let source = GoFile::new("model")
///     .import("time")
///     .add("type Clock struct {\n\tNow time.Time\n}\n")
///     .render();
///
/// assert!(source.contains("import \"time\"\n"));
/// ```
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    imports: ImportCollector,
    body: Vec<String>,
}

impl GoFile {
    /// Create an empty file in `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: ImportCollector::new(),
            body: Vec::new(),
        }
    }

    /// Import a package.
    pub fn import(mut self, path: &str) -> Self {
        self.imports.add(path);
        self
    }

    /// Import a package under a local alias.
    pub fn import_aliased(mut self, path: &str, alias: &str) -> Self {
        self.imports.add_aliased(path, alias);
        self
    }

    /// Import every package in `paths`.
    pub fn imports<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.imports.extend(paths);
        self
    }

    /// Add a top-level declaration.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, code: impl Into<String>) -> Self {
        self.body.push(code.into());
        self
    }

    /// Add several top-level declarations.
    pub fn add_all<I, S>(mut self, code: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(code.into_iter().map(Into::into));
        self
    }

    /// Render the file, starting with the generated-code header.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n\npackage {}\n", GENERATED_HEADER, self.package);

        let imports = self.render_imports();
        if !imports.is_empty() {
            out.push('\n');
            out.push_str(&imports);
        }

        for code in &self.body {
            out.push('\n');
            out.push_str(code.trim_end_matches('\n'));
            out.push('\n');
        }
        out
    }

    fn render_imports(&self) -> String {
        let groups = self.imports.groups();
        match groups.as_slice() {
            [] => String::new(),
            [group] if group.len() == 1 => format!("import {}\n", group[0].spec()),
            _ => {
                let blocks: Vec<String> = groups
                    .iter()
                    .map(|group| {
                        group
                            .iter()
                            .map(|import| format!("\t{}\n", import.spec()))
                            .collect::<String>()
                    })
                    .collect();
                format!("import (\n{})\n", blocks.join("\n"))
            }
        }
    }
}

/// Package-level names declared by formatted Go `source`, in order.
///
/// Methods are skipped; grouped `type (`, `var (` and `const (` blocks
/// contribute each member.
pub(crate) fn package_declarations(source: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut in_group = false;

    for line in source.lines() {
        if in_group {
            if line.starts_with(')') {
                in_group = false;
            } else if let Some(name) = line.strip_prefix('\t').and_then(identifier) {
                names.push(name);
            }
            continue;
        }

        let Some((keyword, rest)) = line.split_once(' ') else {
            continue;
        };
        match keyword {
            "type" | "var" | "const" if rest.starts_with('(') => in_group = true,
            "type" | "var" | "const" => names.extend(identifier(rest)),
            "func" if !rest.starts_with('(') => names.extend(identifier(rest)),
            _ => {}
        }
    }
    names
}

/// The identifier `s` starts with; the blank identifier does not count.
fn identifier(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    match &s[..end] {
        "" | "_" => None,
        name => Some(name),
    }
}
