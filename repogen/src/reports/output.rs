//! Where reports are printed.

/// Report sink. Reports describe content; sinks decide presentation.
pub trait Output {
    /// Underlined heading.
    fn heading(&mut self, text: &str);
    fn section(&mut self, name: &str);
    /// `label: value`
    fn pair(&mut self, label: &str, value: &str);
    fn item(&mut self, text: &str);
    /// A file that was created or overwritten.
    fn created(&mut self, text: &str);
    /// Labeled separator between previewed files.
    fn rule(&mut self, label: &str);
    /// Text printed as is.
    fn verbatim(&mut self, text: &str);
    fn blank(&mut self);
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to stdout.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn heading(&mut self, text: &str) {
        println!("{text}\n{}", "=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn pair(&mut self, label: &str, value: &str) {
        println!("{label}: {value}");
    }

    fn item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn created(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn rule(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn verbatim(&mut self, text: &str) {
        // Generated units already end with a newline.
        if text.ends_with('\n') {
            print!("{text}");
        } else {
            println!("{text}");
        }
    }

    fn blank(&mut self) {
        println!();
    }
}

/// Records one string per call, for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn heading(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn pair(&mut self, label: &str, value: &str) {
        self.lines.push(format!("{label}: {value}"));
    }

    fn item(&mut self, text: &str) {
        self.lines.push(format!("- {text}"));
    }

    fn created(&mut self, text: &str) {
        self.lines.push(format!("+ {text}"));
    }

    fn rule(&mut self, label: &str) {
        self.lines.push(format!("-- {label} --"));
    }

    fn verbatim(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}
