//! Output formatting for the price report (plain, table, JSON).

use crate::cardmarket::models::PriceReport;
use crate::config::OutputFormat;

/// Formats a price report for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the report.
    pub fn format_report(&self, report: &PriceReport) -> String {
        match self.format {
            OutputFormat::Plain => self.plain(report),
            OutputFormat::Table => self.table(report),
            OutputFormat::Json => self.json(report),
        }
    }

    /// The original line protocol: URL first, then KEY=VALUE lines with
    /// the NOT_FOUND sentinel for absent prices.
    fn plain(&self, report: &PriceReport) -> String {
        format!(
            "{}\nLOWEST_PRICE={}\nMEDIAN_PRICE={}",
            report.url,
            report.lowest_display(),
            report.median_display()
        )
    }

    fn table(&self, report: &PriceReport) -> String {
        format!(
            "{:<8} {}\n{:<8} {}\n{:<8} {}",
            "Lowest",
            report.lowest_display(),
            "Median",
            report.median_display(),
            "URL",
            report.url
        )
    }

    fn json(&self, report: &PriceReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
