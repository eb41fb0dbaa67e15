//! Report exporters - CSV, JSON, Markdown
//!
//! Exporters only see the [`ReportData`] view of a report, so every report
//! type can be written in every format.

use std::fmt;
use std::str::FromStr;

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;
}

/// Tabular view of a report
pub trait ReportData {
    fn title(&self) -> &str;

    fn headers(&self) -> Vec<String>;

    /// One entry per row, aligned with [`ReportData::headers`]
    fn rows(&self) -> Vec<Vec<String>>;

    /// Key figures shown above the table
    fn summary(&self) -> Vec<(String, String)>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Csv, ReportFormat::Json, ReportFormat::Markdown];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
        }
    }

    /// Exporter with default settings for this format
    pub fn exporter(&self) -> Box<dyn ReportExporter> {
        match self {
            ReportFormat::Csv => Box::new(CsvExporter::new()),
            ReportFormat::Json => Box::new(JsonExporter::new()),
            ReportFormat::Markdown => Box::new(MarkdownExporter::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn escape(&self, field: &str) -> String {
        let needs_quotes = field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r');
        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn line(&self, fields: &[String]) -> String {
        let escaped: Vec<String> = fields.iter().map(|f| self.escape(f)).collect();
        let mut line = escaped.join(&self.delimiter.to_string());
        line.push('\n');
        line
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();
        if self.include_header {
            output.push_str(&self.line(&report.headers()));
        }
        for row in report.rows() {
            output.push_str(&self.line(&row));
        }
        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter: `{ title, summary, data }`
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        use serde_json::{Map, Value};

        let headers = report.headers();
        let data: Vec<Value> = report
            .rows()
            .into_iter()
            .map(|row| {
                let object: Map<String, Value> = headers
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(Value::String))
                    .collect();
                Value::Object(object)
            })
            .collect();

        let summary: Map<String, Value> = report
            .summary()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        let output = serde_json::json!({
            "title": report.title(),
            "summary": summary,
            "data": data,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        rendered.unwrap_or_default()
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

// ============================================================================
// Markdown Exporter
// ============================================================================

/// Markdown format exporter
pub struct MarkdownExporter {
    include_summary: bool,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }

    fn table_row(cells: &[String]) -> String {
        let cells: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
        format!("| {} |\n", cells.join(" | "))
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = format!("# {}\n\n", report.title());

        if self.include_summary {
            output.push_str("## Summary\n\n");
            for (key, value) in report.summary() {
                output.push_str(&format!("- **{}**: {}\n", key, value));
            }
            output.push('\n');
        }

        output.push_str("## Data\n\n");
        let headers = report.headers();
        if headers.is_empty() {
            return output;
        }

        output.push_str(&Self::table_row(&headers));
        let separator: Vec<String> = headers.iter().map(|_| "---".to_string()).collect();
        output.push_str(&Self::table_row(&separator));

        let rows = report.rows();
        if rows.is_empty() {
            output.push_str("\n_No data._\n");
        }
        for row in rows {
            output.push_str(&Self::table_row(&row));
        }
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        rows: Vec<Vec<String>>,
    }

    impl ReportData for Fixture {
        fn title(&self) -> &str {
            "Ticket Sales"
        }

        fn headers(&self) -> Vec<String> {
            vec!["Event".to_string(), "Revenue".to_string()]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            self.rows.clone()
        }

        fn summary(&self) -> Vec<(String, String)> {
            vec![("Events".to_string(), self.rows.len().to_string())]
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            rows: vec![
                vec!["Rock Night".to_string(), "150.00".to_string()],
                vec!["Jazz, \"live\"".to_string(), "75.50".to_string()],
            ],
        }
    }

    #[test]
    fn test_csv_exporter() {
        let exporter = CsvExporter::new();
        let output = exporter.export(&fixture());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Event,Revenue");
        assert_eq!(lines[1], "Rock Night,150.00");
        assert_eq!(lines[2], "\"Jazz, \"\"live\"\"\",75.50");
        assert_eq!(exporter.extension(), "csv");
    }

    #[test]
    fn test_csv_delimiter_and_header() {
        let output = CsvExporter::new()
            .with_delimiter(';')
            .without_header()
            .export(&fixture());
        assert!(output.starts_with("Rock Night;150.00\n"));
        assert!(!output.contains("Event;Revenue"));
    }

    #[test]
    fn test_json_exporter() {
        let output = JsonExporter::new().export(&fixture());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["title"], "Ticket Sales");
        assert_eq!(value["summary"]["Events"], "2");
        assert_eq!(value["data"][0]["Event"], "Rock Night");
        assert_eq!(value["data"][1]["Revenue"], "75.50");
    }

    #[test]
    fn test_json_compact() {
        let output = JsonExporter::new().compact().export(&fixture());
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_markdown_exporter() {
        let exporter = MarkdownExporter::new();
        let output = exporter.export(&fixture());

        assert!(output.starts_with("# Ticket Sales\n"));
        assert!(output.contains("- **Events**: 2"));
        assert!(output.contains("| Event | Revenue |"));
        assert!(output.contains("| --- | --- |"));
        assert!(output.contains("| Rock Night | 150.00 |"));
        assert_eq!(exporter.mime_type(), "text/markdown");
    }

    #[test]
    fn test_markdown_empty_and_escaped() {
        let empty = Fixture { rows: vec![] };
        let output = MarkdownExporter::new().without_summary().export(&empty);
        assert!(!output.contains("## Summary"));
        assert!(output.contains("_No data._"));

        let piped = Fixture {
            rows: vec![vec!["A|B".to_string(), "1.00".to_string()]],
        };
        assert!(MarkdownExporter::new().export(&piped).contains("| A\\|B | 1.00 |"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("xml".parse::<ReportFormat>().is_err());
        for format in ReportFormat::ALL {
            assert_eq!(format.to_string().parse::<ReportFormat>().unwrap(), format);
        }
    }
}
