//! Turn a `QueryReport` into what gets printed.

use console::Style;
use imdbqlib::QueryReport;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Aligned table plus summary line
    #[default]
    Text,
    /// The whole report as pretty-printed JSON
    Json,
}

impl OutputMode {
    /// Map a validated `--output` value to a mode.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputMode::Json,
            _ => OutputMode::Text,
        }
    }
}

/// Style for the trailing `Total results` line.
///
/// `console` drops the styling when stdout is not a terminal.
pub fn summary_style() -> Style {
    Style::new().bold()
}

/// Render the report in the requested mode.
pub fn render_report(
    report: &QueryReport,
    mode: OutputMode,
    summary: &Style,
) -> Result<String, serde_json::Error> {
    match mode {
        OutputMode::Text => Ok(render_text(report, summary)),
        OutputMode::Json => render_json(report),
    }
}

fn render_text(report: &QueryReport, summary: &Style) -> String {
    let mut out = report.table.to_text();
    out.push_str(&summary.apply_to(report.summary_line()).to_string());
    out.push('\n');
    out
}

fn render_json(report: &QueryReport) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
