//! Generate command report.

use std::path::PathBuf;

use repogen_core::PreviewFile;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub module: String,
    pub destination: PathBuf,
    /// Tables in run order
    pub tables: Vec<String>,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk, in emission order.
    Written(Vec<PathBuf>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &[PathBuf]) {
        out.pair("Module", &self.module);
        out.pair("Destination", &self.destination.display().to_string());
        out.pair("Tables", &self.tables.join(", "));
        out.blank();

        out.section(&format!("Generated ({})", written.len()));
        for path in written {
            out.created(&path.display().to_string());
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.rule(&file.path);
            out.verbatim(&file.content);
        }

        out.rule("Summary");
        out.verbatim(&format!(
            "{} files would be generated for {} tables",
            files.len(),
            self.tables.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            module: "github.com/acme/billing".into(),
            destination: PathBuf::from("./internal"),
            tables: vec!["invoices".into()],
            result,
        }
    }

    #[test]
    fn test_written_lists_files() {
        let mut out = BufferOutput::default();
        report(GenerationResult::Written(vec![
            PathBuf::from("./internal/model/invoices_model.go"),
            PathBuf::from("./internal/repository/repo_args.go"),
        ]))
        .render(&mut out);

        assert!(out.lines.contains(&"Tables: invoices".to_string()));
        assert!(out.lines.contains(&"Generated (2):".to_string()));
        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("+ ./internal/repository/repo_args.go")
        );
    }

    #[test]
    fn test_preview_prints_contents() {
        let mut out = BufferOutput::default();
        report(GenerationResult::Preview(vec![PreviewFile {
            path: "model/invoices_model.go".into(),
            content: "package model\n".into(),
        }]))
        .render(&mut out);

        assert_eq!(out.lines[0], "-- model/invoices_model.go --");
        assert_eq!(out.lines[1], "package model\n");
        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("1 files would be generated for 1 tables")
        );
    }
}
