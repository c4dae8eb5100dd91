//! Formatting passes applied to rendered Go source.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use thiserror::Error;

/// A formatter rejected the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn at(line: usize, message: impl std::fmt::Display) -> Self {
        Self::new(format!("line {line}: {message}"))
    }
}

/// An idempotent source-to-source pass.
pub trait Formatter {
    fn name(&self) -> &'static str;

    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Built-in canonical layout for Go source.
///
/// Re-indents every line with tabs according to delimiter depth, outdents
/// `case` and `default` clauses, trims trailing whitespace, collapses runs of
/// blank lines and ends the file with a single newline. Unbalanced
/// delimiters and unterminated literals or comments are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutFormatter;

impl Formatter for LayoutFormatter {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut out = String::with_capacity(source.len());
        let mut scanner = Scanner::default();
        let mut blank_run = false;

        for (index, line) in source.lines().enumerate() {
            let number = index + 1;

            // Lines continuing a raw string or block comment are kept verbatim.
            if scanner.in_multiline() {
                scanner.scan(line, number)?;
                out.push_str(line);
                out.push('\n');
                blank_run = false;
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                if !blank_run && !out.is_empty() {
                    out.push('\n');
                }
                blank_run = true;
                continue;
            }
            blank_run = false;

            let depth = scanner.depth();
            let leading_closers = trimmed
                .chars()
                .take_while(|c| matches!(c, '}' | ')' | ']'))
                .count();
            let is_clause = trimmed.starts_with("case ") || trimmed.starts_with("default:");
            let indent = depth
                .saturating_sub(leading_closers)
                .saturating_sub(usize::from(is_clause));

            scanner.scan(trimmed, number)?;

            for _ in 0..indent {
                out.push('\t');
            }
            out.push_str(trimmed);
            out.push('\n');
        }

        scanner.finish()?;

        while out.ends_with("\n\n") {
            out.pop();
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Multiline {
    RawString,
    BlockComment,
}

/// Tracks open delimiters and multi-line tokens across lines.
#[derive(Debug, Default)]
struct Scanner {
    /// Open delimiters with the line they were opened on
    stack: Vec<(char, usize)>,
    multiline: Option<(Multiline, usize)>,
}

impl Scanner {
    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn in_multiline(&self) -> bool {
        self.multiline.is_some()
    }

    fn scan(&mut self, line: &str, number: usize) -> Result<(), FormatError> {
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match self.multiline {
                Some((Multiline::RawString, _)) => {
                    if c == '`' {
                        self.multiline = None;
                    }
                    continue;
                }
                Some((Multiline::BlockComment, _)) => {
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.multiline = None;
                    }
                    continue;
                }
                None => {}
            }

            match c {
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.multiline = Some((Multiline::BlockComment, number));
                }
                '`' => self.multiline = Some((Multiline::RawString, number)),
                '"' | '\'' => {
                    let mut terminated = false;
                    while let Some(inner) = chars.next() {
                        if inner == '\\' {
                            chars.next();
                        } else if inner == c {
                            terminated = true;
                            break;
                        }
                    }
                    if !terminated {
                        let kind = if c == '"' { "string" } else { "rune" };
                        return Err(FormatError::at(number, format!("unterminated {kind} literal")));
                    }
                }
                '{' | '(' | '[' => self.stack.push((c, number)),
                '}' | ')' | ']' => {
                    let expected = match c {
                        '}' => '{',
                        ')' => '(',
                        _ => '[',
                    };
                    match self.stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, opened)) => {
                            return Err(FormatError::at(
                                number,
                                format!("'{c}' closes '{open}' opened on line {opened}"),
                            ));
                        }
                        None => {
                            return Err(FormatError::at(number, format!("unexpected '{c}'")));
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), FormatError> {
        if let Some((kind, line)) = self.multiline {
            let what = match kind {
                Multiline::RawString => "raw string",
                Multiline::BlockComment => "block comment",
            };
            return Err(FormatError::at(line, format!("unterminated {what}")));
        }
        if let Some((open, line)) = self.stack.last() {
            return Err(FormatError::at(*line, format!("unclosed '{open}'")));
        }
        Ok(())
    }
}

/// Pipes source through the external `gofmt` binary.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    program: String,
}

impl GofmtFormatter {
    pub fn new() -> Self {
        Self {
            program: "gofmt".to_string(),
        }
    }

    /// Use a specific gofmt executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for GofmtFormatter {
    fn name(&self) -> &'static str {
        "gofmt"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FormatError::new(format!("failed to run {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(FormatError::new(format!(
                    "failed to feed {}: {e}",
                    self.program
                )));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| FormatError::new(format!("{} did not finish: {e}", self.program)))?;

        if !output.status.success() {
            return Err(FormatError::new(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::new(format!("{} produced invalid UTF-8: {e}", self.program)))
    }
}
