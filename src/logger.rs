use crate::cli::{HeadlessConfig, OutputFormat};
use crate::error_log::OperationErrorEntry;
use crate::tag::{Field, RewriteSummary, TagError};
use serde::Serialize;
use std::path::Path;

/// Width of the label column in the view listing.
const LABEL_WIDTH: usize = 9;
/// Values are padded to this width.
const VALUE_WIDTH: usize = 15;

#[derive(Clone)]
pub struct Logger {
    config: HeadlessConfig,
}

#[derive(Serialize)]
struct JsonEvent {
    #[serde(rename = "type")]
    event_type: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Logger {
    pub fn new(config: HeadlessConfig) -> Self {
        Self { config }
    }

    pub fn info(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("info", message, None);
    }

    pub fn success(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("success", message, None);
    }

    pub fn warn(&self, message: &str) {
        self.output("warn", message, None);
    }

    pub fn error(&self, message: &str) {
        self.output("error", message, None);
    }

    pub fn debug(&self, message: &str) {
        if !self.config.verbose {
            return;
        }
        self.output("debug", message, None);
    }

    /// A failed operation, with the error kind attached in JSON mode.
    pub fn failure(&self, operation: &str, path: &Path, err: &TagError) {
        let data = serde_json::json!({
            "operation": operation,
            "path": path.display().to_string(),
            "kind": err.kind(),
        });
        self.output("error", &format!("{} failed: {}", operation, err), Some(data));
    }

    /// One row of the view listing. Printed even in quiet mode.
    pub fn field_value(&self, field: Field, value: &str) {
        let data = serde_json::json!({
            "field": field,
            "value": value,
        });
        self.output(
            "field",
            &format!(
                "{:<lw$}:   {:<vw$}",
                field.label(),
                value,
                lw = LABEL_WIDTH,
                vw = VALUE_WIDTH
            ),
            Some(data),
        );
    }

    pub fn field_error(&self, field: Field, err: &TagError) {
        let data = serde_json::json!({
            "field": field,
            "kind": err.kind(),
            "error": err.to_string(),
        });
        self.output(
            "field_error",
            &format!("{:<width$}:   error in getting {}: {}", field.label(), field, err, width = LABEL_WIDTH),
            Some(data),
        );
    }

    pub fn field_changed(&self, path: &Path, text: &str, summary: &RewriteSummary) {
        if self.config.quiet {
            return;
        }
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "field": summary.field,
            "value": text,
            "old_size": summary.old_size,
            "new_size": summary.new_size,
            "tail_bytes": summary.tail_bytes,
        });
        self.output(
            "field_changed",
            &format!("{} changed to '{}' in {}", summary.field, text, path.display()),
            Some(data),
        );
    }

    /// One recorded failure, for `errors` listings. Printed even in quiet mode.
    pub fn logged_failure(&self, date: &str, entry: &OperationErrorEntry) {
        let field = entry.field.as_deref().unwrap_or("-");
        self.output(
            "logged_failure",
            &format!(
                "{} {} {} [{}] {}: {}",
                date,
                entry.timestamp.format("%H:%M:%S"),
                entry.operation.display_name(),
                field,
                entry.path,
                entry.error
            ),
            serde_json::to_value(entry).ok(),
        );
    }

    fn output(&self, event_type: &str, message: &str, data: Option<serde_json::Value>) {
        match self.config.output_format {
            OutputFormat::Json => {
                let event = JsonEvent {
                    event_type: event_type.to_string(),
                    message: message.to_string(),
                    data,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{}", json);
                }
            }
            OutputFormat::Text => {
                let prefix = match event_type {
                    "error" => "[ERROR]",
                    "warn" => "[WARN]",
                    "debug" => "[DEBUG]",
                    "success" | "field_changed" => "[OK]",
                    "field" | "field_error" | "logged_failure" => "",
                    _ => "[INFO]",
                };
                if prefix.is_empty() {
                    println!("{}", message);
                } else if event_type == "error" || event_type == "warn" {
                    eprintln!("{} {}", prefix, message);
                } else {
                    println!("{} {}", prefix, message);
                }
            }
        }
    }
}
