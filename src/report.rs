//! Report rendering for the command-line checker.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::rule::OffenseKind;
use crate::workspace::FileReport;

/// One offense as written by `--format json`
#[derive(Debug, Serialize)]
pub struct OffenseRecord<'a> {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub kind: OffenseKind,
    pub message: &'a str,
}

/// Flatten reports into records; columns are 1-based
pub fn records(reports: &[FileReport]) -> Vec<OffenseRecord<'_>> {
    reports
        .iter()
        .flat_map(|report| {
            let path = report.path.display().to_string();
            report.offenses.iter().map(move |offense| OffenseRecord {
                path: path.clone(),
                line: offense.span.start.line,
                column: offense.span.start.column + 1,
                end_line: offense.span.end.line,
                end_column: offense.span.end.column + 1,
                kind: offense.kind,
                message: &offense.message,
            })
        })
        .collect()
}

pub fn render(reports: &[FileReport], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
    }
}

/// `path:line:column: kind: message`, continuation lines indented
pub fn render_text(reports: &[FileReport]) -> String {
    let records = records(reports);
    let mut out = String::new();

    for record in &records {
        let mut lines = record.message.lines();
        out.push_str(&format!(
            "{}:{}:{}: {}: {}\n",
            record.path,
            record.line,
            record.column,
            record.kind.as_str(),
            lines.next().unwrap_or_default()
        ));
        for line in lines.filter(|l| !l.is_empty()) {
            out.push_str(&format!("    {line}\n"));
        }
    }

    let files = reports.iter().filter(|r| !r.offenses.is_empty()).count();
    out.push_str(&format!(
        "\n{} file(s) inspected, {} offense(s) detected in {} file(s)\n",
        reports.len(),
        records.len(),
        files
    ));
    out
}

pub fn render_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&records(reports))
}
