//! Line-oriented source builder.

use super::Indent;

/// Accumulates source text one line at a time, tracking nesting depth.
///
/// Every method consumes and returns the builder, so templates read as a
/// single chain:
///
/// ```
/// use repogen_codegen::CodeBuilder;
///
/// let code = CodeBuilder::go()
///     .braced("func (r *repo) Close() error {", |b| b.line("return r.db.Close()"))
///     .build();
///
/// assert_eq!(code, "func (r *repo) Close() error {\n\treturn r.db.Close()\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            out: String::new(),
        }
    }

    /// Tab-indented builder for Go source.
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Write `text` at the current depth, followed by a newline.
    pub fn line(mut self, text: &str) -> Self {
        let unit = self.indent.unit();
        self.out.extend(std::iter::repeat_n(unit, self.depth));
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .fold(self, |b, text| b.line(text.as_ref()))
    }

    /// An empty line, never indented.
    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.depth += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// `open`, then the body one level deeper, then `close`.
    pub fn block_with_close<F>(self, open: &str, close: &str, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        body(self.line(open).indent()).dedent().line(close)
    }

    /// A block closed by a lone `}`.
    pub fn braced<F>(self, open: &str, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.block_with_close(open, "}", body)
    }

    /// A `//` comment line.
    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("// {text}"))
    }

    pub fn when<F>(self, condition: bool, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { body(self) } else { self }
    }

    /// Thread the builder through `body` once per item.
    pub fn each<T, I, F>(self, items: I, body: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, body)
    }

    pub fn build(self) -> String {
        self.out
    }
}
