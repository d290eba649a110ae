//! Output formatting for lookup results.
//!
//! Results are rendered as log lines, a pretty JSON array, CSV, or a table.

use std::io::Write;

use clap::ValueEnum;
use tracing::info;

use crate::model::OuiEntry;

/// Title printed above table output.
pub const TABLE_TITLE: &str = "OUI Search Results";

/// CSV header row.
pub const CSV_HEADER: [&str; 5] = ["Prefix", "Name", "Street", "District", "Country"];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One log line per entry (default)
    Log,
    /// Pretty-printed JSON array
    Json,
    /// Comma-separated values
    Csv,
    /// Pretty-printed table
    Table,
}

/// Formats lookup results for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render `entries` to `writer`.
    ///
    /// The `log` format goes through `tracing` and leaves `writer` untouched.
    pub fn write<W: Write>(&self, entries: &[&OuiEntry], writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Log => {
                for entry in entries {
                    info!("{}", log_line(entry));
                }
                Ok(())
            }
            OutputFormat::Json => self.write_json(entries, writer),
            OutputFormat::Csv => self.write_csv(entries, writer),
            OutputFormat::Table => self.write_table(entries, writer),
        }
    }

    fn write_json<W: Write>(&self, entries: &[&OuiEntry], writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, entries)?;
        writeln!(writer)
    }

    fn write_csv<W: Write>(&self, entries: &[&OuiEntry], writer: &mut W) -> std::io::Result<()> {
        let mut out = csv::Writer::from_writer(&mut *writer);
        out.write_record(CSV_HEADER)?;

        for entry in entries {
            let row = match entry.organization() {
                Some(org) => [
                    entry.prefix(),
                    org.name.as_str(),
                    org.street.as_deref().unwrap_or(""),
                    org.district.as_deref().unwrap_or(""),
                    org.country.as_deref().unwrap_or(""),
                ],
                None => [entry.prefix(), "", "", "", ""],
            };
            out.write_record(row)?;
        }

        out.flush()
    }

    fn write_table<W: Write>(&self, entries: &[&OuiEntry], writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        let mut table = Table::new();
        table.set_header(vec!["Prefix", "Organization", "Country"]);

        for entry in entries {
            table.add_row(vec![
                Cell::new(entry.prefix()),
                Cell::new(entry.organization_name().unwrap_or("")),
                Cell::new(entry.country().unwrap_or("")),
            ]);
        }

        writeln!(writer, "{TABLE_TITLE}")?;
        writeln!(writer, "{table}")
    }
}

/// `PREFIX -> Name, Street, District, Country` with missing parts omitted.
pub fn log_line(entry: &OuiEntry) -> String {
    let Some(org) = entry.organization() else {
        return format!("{} -> (unknown)", entry.prefix());
    };

    let parts: Vec<&str> = [
        Some(org.name.as_str()),
        org.street.as_deref(),
        org.district.as_deref(),
        org.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    format!("{} -> {}", entry.prefix(), parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Organization;

    fn sample() -> Vec<OuiEntry> {
        vec![
            OuiEntry::new(
                "00-22-72",
                Some(Organization::with_address(
                    "American Micro-Fuel Device Corp.",
                    "123 Main St",
                    "Anytown, CA 90210",
                    "US",
                )),
            )
            .unwrap(),
            OuiEntry::new("AA-BB-CC", None).unwrap(),
        ]
    }

    fn render(format: OutputFormat, entries: &[OuiEntry]) -> String {
        let refs: Vec<&OuiEntry> = entries.iter().collect();
        let mut out = Vec::new();
        OutputFormatter::new(format).write(&refs, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_output() {
        let out = render(OutputFormat::Json, &sample());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["prefix"], "00:22:72");
        assert_eq!(items[0]["organization"]["country"], "US");
        assert!(items[1]["organization"].is_null());
    }

    #[test]
    fn test_csv_output() {
        let out = render(OutputFormat::Csv, &sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Prefix,Name,Street,District,Country");
        assert_eq!(
            lines[1],
            "00:22:72,American Micro-Fuel Device Corp.,123 Main St,\"Anytown, CA 90210\",US"
        );
        assert_eq!(lines[2], "AA:BB:CC,,,,");
    }

    #[test]
    fn test_table_output() {
        let out = render(OutputFormat::Table, &sample());
        assert!(out.starts_with(TABLE_TITLE));
        assert!(out.contains("Organization"));
        assert!(out.contains("American Micro-Fuel Device Corp."));
        assert!(out.contains("AA:BB:CC"));
    }

    #[test]
    fn test_log_output_leaves_writer_empty() {
        assert!(render(OutputFormat::Log, &sample()).is_empty());
    }

    #[test]
    fn test_log_line() {
        let entries = sample();
        assert_eq!(
            log_line(&entries[0]),
            "00:22:72 -> American Micro-Fuel Device Corp., 123 Main St, Anytown, CA 90210, US"
        );
        assert_eq!(log_line(&entries[1]), "AA:BB:CC -> (unknown)");
    }

    #[test]
    fn test_empty_json_is_array() {
        assert_eq!(render(OutputFormat::Json, &[]).trim(), "[]");
    }
}
