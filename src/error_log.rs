use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Operation a logged failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    View,
    Edit,
}

impl Operation {
    pub fn filename(&self) -> &'static str {
        match self {
            Operation::View => "view.json",
            Operation::Edit => "edit.json",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
        }
    }
}

/// One failed view or edit
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OperationErrorEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub path: String,
    pub field: Option<String>,
    pub kind: String,
    pub error: String,
}

impl OperationErrorEntry {
    pub fn new(
        operation: Operation,
        path: String,
        field: Option<String>,
        kind: String,
        error: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            operation,
            path,
            field,
            kind,
            error,
        }
    }
}

/// Manages failure logs organized by date and operation
pub struct ErrorLogManager {
    base_path: PathBuf,
}

impl ErrorLogManager {
    pub fn new(base_path: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(base_path)?;
        Ok(Self {
            base_path: base_path.to_path_buf(),
        })
    }

    /// Get today's date as a string (YYYY-MM-DD)
    fn today_str() -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn get_log_path(&self, date: &str, operation: Operation) -> PathBuf {
        self.base_path.join(date).join(operation.filename())
    }

    /// Append an entry to today's log for its operation
    pub fn add(&self, entry: OperationErrorEntry) -> std::io::Result<()> {
        let date = Self::today_str();
        let path = self.get_log_path(&date, entry.operation);

        let mut entries = Self::load_from_path(&path);
        entries.push(entry);
        Self::save_entries(&path, &entries)
    }

    /// All entries of one operation for a specific date
    pub fn get_for_date(&self, date: &str, operation: Operation) -> Vec<OperationErrorEntry> {
        Self::load_from_path(&self.get_log_path(date, operation))
    }

    /// All entries across all dates, newest first
    pub fn get_all(&self) -> Vec<(String, OperationErrorEntry)> {
        let mut all = Vec::new();
        for date in self.list_dates() {
            for operation in [Operation::View, Operation::Edit] {
                for entry in self.get_for_date(&date, operation) {
                    all.push((date.clone(), entry));
                }
            }
        }
        all.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        all
    }

    /// List all dates that have logs (sorted newest first)
    pub fn list_dates(&self) -> Vec<String> {
        let mut dates = Vec::new();

        if let Ok(entries) = fs::read_dir(&self.base_path) {
            for entry in entries.flatten() {
                if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                    if let Some(name) = entry.file_name().to_str() {
                        if NaiveDate::parse_from_str(name, "%Y-%m-%d").is_ok() {
                            dates.push(name.to_string());
                        }
                    }
                }
            }
        }

        dates.sort_by(|a, b| b.cmp(a));
        dates
    }

    /// Clear all logs for a specific date
    pub fn clear_date(&self, date: &str) -> std::io::Result<()> {
        let date_dir = self.base_path.join(date);
        if date_dir.exists() {
            fs::remove_dir_all(&date_dir)?;
        }
        Ok(())
    }

    /// Clear every log
    pub fn clear_all(&self) -> std::io::Result<()> {
        if self.base_path.exists() {
            fs::remove_dir_all(&self.base_path)?;
        }
        fs::create_dir_all(&self.base_path)
    }

    fn load_from_path(path: &Path) -> Vec<OperationErrorEntry> {
        fs::read_to_string(path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    fn save_entries<T: Serialize>(path: &Path, entries: &[T]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        fs::write(path, data)
    }
}
