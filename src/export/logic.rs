// src/export/logic.rs

use crate::core::Rendered;
use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DailyCountExport, TaskExport};
use crate::export::{ExportFormat, ensure_writable, notify_export_success};
use crate::render::{NO_DATA_MESSAGE, html};
use crate::ui::messages::{info, warning};
use crate::utils::path::{expand_tilde, is_absolute};
use std::fs;
use tracing::debug;

/// High-level export of one pipeline pass.
pub struct ExportLogic;

impl ExportLogic {
    /// - `format`: csv | json | html
    /// - `file`: absolute output path (`~/` allowed)
    /// - `raw`: export the fetched rows instead of the daily counts
    ///   (csv/json); for html the raw table follows `rendered.view`
    pub fn export(
        rendered: &Rendered,
        format: ExportFormat,
        file: &str,
        raw: bool,
        force: bool,
    ) -> AppResult<()> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }
        let path = expand_tilde(file);

        if rendered.counts.is_empty() {
            warning(NO_DATA_MESSAGE);
            return Ok(());
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv | ExportFormat::Json if raw => {
                let rows: Vec<TaskExport> =
                    rendered.frame.rows.iter().map(TaskExport::from).collect();
                write_rows(&rows, format, &path)?;
            }
            ExportFormat::Csv | ExportFormat::Json => {
                let rows: Vec<DailyCountExport> =
                    rendered.counts.iter().map(DailyCountExport::from).collect();
                write_rows(&rows, format, &path)?;
            }
            ExportFormat::Html => {
                info(format!("Exporting to HTML: {}", path.display()));
                let page = html::render(&rendered.view, &rendered.range)?;
                fs::write(&path, &page)?;
                debug!(path = %path.display(), bytes = page.len(), "html written");
                notify_export_success("HTML", &path);
            }
        }

        Ok(())
    }
}

fn write_rows<T: serde::Serialize>(
    rows: &[T],
    format: ExportFormat,
    path: &std::path::Path,
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Html => Err(AppError::Export(format!(
            "{} is not a row format",
            format.as_str()
        ))),
    }
}
