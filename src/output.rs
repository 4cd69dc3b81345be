//! Report rendering: text tables, CSV and JSON
//!
//! Formatting works on rounded copies; the report's values are never changed.

use crate::error::Result;
use crate::pricing::PricingHorizon;
use crate::projection::CalculationReport;
use chrono::{DateTime, Utc};
use comfy_table::{presets::ASCII_FULL, CellAlignment, Table};
use serde::Serialize;
use std::io::Write;

/// Column headers of the pricing table
pub const COLUMN_HEADERS: [&str; 9] = [
    "Service",
    "One-Time 1yr",
    "One-Time 3yr",
    "Hourly",
    "Daily",
    "Monthly",
    "Yearly",
    "Year One",
    "Year Three",
];

/// How each horizon is derived, printed ahead of the tables
pub const METHODOLOGY: [&str; 7] = [
    "Hourly - Raw price",
    "Daily - Hourly * 24",
    "Monthly - Hourly * 730",
    "Yearly - (Hourly * 24 * 365) + One-Time 1yr",
    "Year One - Yearly + One-Time 3yr",
    "Year Three - (Yearly * 3) + One-Time 3yr",
    "One-time fees are not spread out into hourly, daily, or monthly costs",
];

/// Kind of row in a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Service,
    Support,
    Total,
}

/// One labelled row of a rendered report
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    pub kind: RowKind,
    pub label: &'a str,
    pub pricing: &'a PricingHorizon,
}

/// Service subtotal rows, then support, then total
pub fn report_rows(report: &CalculationReport) -> Vec<ReportRow<'_>> {
    let mut rows: Vec<ReportRow<'_>> = report
        .service_totals
        .iter()
        .map(|entry| ReportRow {
            kind: RowKind::Service,
            label: &entry.name,
            pricing: &entry.pricing,
        })
        .collect();

    rows.push(ReportRow {
        kind: RowKind::Support,
        label: "Support",
        pricing: &report.support,
    });
    rows.push(ReportRow {
        kind: RowKind::Total,
        label: "Total",
        pricing: &report.total,
    });

    rows
}

/// Label followed by every horizon formatted to cents with separators
pub fn format_pricing(label: &str, pricing: &PricingHorizon) -> Vec<String> {
    let mut cells = Vec::with_capacity(COLUMN_HEADERS.len());
    cells.push(label.to_string());
    cells.extend(pricing.columns().iter().map(|value| value.to_display()));
    cells
}

/// Render a report as a bordered text table
pub fn render_table(report: &CalculationReport) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(COLUMN_HEADERS);

    for row in report_rows(report) {
        table.add_row(format_pricing(row.label, row.pricing));
    }

    // Amounts right-aligned, labels left
    for index in 1..COLUMN_HEADERS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    definition: &'a str,
    kind: RowKind,
    name: &'a str,
    one_time_year1: String,
    one_time_year3: String,
    hourly: String,
    daily: String,
    monthly: String,
    yearly: String,
    year_one: String,
    year_three: String,
}

/// Write every report row as CSV (two-decimal amounts, no separators)
pub fn write_csv<W: Write>(reports: &[&CalculationReport], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for report in reports {
        for row in report_rows(report) {
            let p = row.pricing;
            csv_writer.serialize(CsvRecord {
                definition: &report.definition,
                kind: row.kind,
                name: row.label,
                one_time_year1: p.one_time_year1.to_fixed(),
                one_time_year3: p.one_time_year3.to_fixed(),
                hourly: p.hourly.to_fixed(),
                daily: p.daily.to_fixed(),
                monthly: p.monthly.to_fixed(),
                yearly: p.yearly.to_fixed(),
                year_one: p.year_one.to_fixed(),
                year_three: p.year_three.to_fixed(),
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonEnvelope<'a> {
    generated_at: DateTime<Utc>,
    reports: &'a [&'a CalculationReport],
}

/// Write reports as pretty JSON at full internal precision
pub fn write_json<W: Write>(reports: &[&CalculationReport], writer: W) -> Result<()> {
    let envelope = JsonEnvelope {
        generated_at: Utc::now(),
        reports,
    };
    serde_json::to_writer_pretty(writer, &envelope)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Definition, ResourceSpec, Service};
    use crate::money::Money;
    use crate::pricing::BaseRate;
    use crate::projection::{CalculationConfig, ProjectionEngine};
    use crate::rates::RateTable;
    use rust_decimal_macros::dec;

    fn report() -> CalculationReport {
        let mut table = RateTable::new();
        table
            .insert("AmazonEC2", "m5.xlarge", BaseRate::hourly(Money::new(dec!(20))))
            .unwrap();
        let definition = Definition::new(
            "Web",
            vec![Service::new(
                "AmazonEC2",
                vec![ResourceSpec::new("m5.xlarge").with_quantity(2)],
            )],
        );
        ProjectionEngine::new(table, CalculationConfig::default())
            .calculate(&definition)
            .unwrap()
    }

    #[test]
    fn test_rows_order() {
        let report = report();
        let rows = report_rows(&report);
        let kinds: Vec<_> = rows.iter().map(|row| row.kind).collect();
        assert_eq!(kinds, vec![RowKind::Service, RowKind::Support, RowKind::Total]);
        assert_eq!(rows[0].label, "AmazonEC2");
    }

    #[test]
    fn test_format_pricing() {
        let report = report();
        let cells = format_pricing("Total", &report.total);

        assert_eq!(cells.len(), COLUMN_HEADERS.len());
        assert_eq!(cells[0], "Total");
        // 29200 monthly; support 19200 @ 7% + 10000 @ 10% = 2344
        assert_eq!(cells[5], "31,544.00");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&report());
        let lines: Vec<_> = table.lines().collect();

        assert!(lines[1].contains("Year Three"));
        let row_index = |label: &str| {
            lines
                .iter()
                .position(|line| line.starts_with(&format!("| {}", label)))
                .unwrap()
        };
        let service = row_index("AmazonEC2");
        let support = row_index("Support");
        let total = row_index("Total");
        assert!(service < support && support < total);

        // Rows are separated by border lines
        assert!(lines[support - 1].starts_with('+'));
        assert!(lines[total - 1].starts_with('+'));
        assert!(lines[total].contains("31,544.00"));

        let width = lines[0].len();
        assert!(lines.iter().all(|line| line.len() == width));
    }

    #[test]
    fn test_write_csv() {
        let report = report();
        let mut buffer = Vec::new();
        write_csv(&[&report], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("definition,kind,name,one_time_year1"));
        assert!(lines[3].starts_with("Web,total,Total,0.00,0.00,43.21"));
    }

    #[test]
    fn test_write_json() {
        let report = report();
        let mut buffer = Vec::new();
        write_json(&[&report], &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["reports"][0]["definition"], "Web");
        let monthly: Money = value["reports"][0]["support"]["monthly"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(monthly, Money::new(dec!(2344)));
    }
}
