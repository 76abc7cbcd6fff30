//! Table formatting utilities for CLI list commands
//!
//! This module provides a unified table output system that eliminates
//! duplicated formatting code across catalog commands.

use chrono::{DateTime, Local, Utc};
use console::style;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::compat::Severity;
use crate::entities::part::PartCategory;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 part(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self { show_summary: false }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (truncated, cyan colored)
    Id(String),
    /// Catalog slug (cyan colored)
    Slug(String),
    /// Plain text, optionally truncated
    Text(String),
    /// Part category
    Category(PartCategory),
    /// Finding severity with color coding
    Severity(Severity),
    /// Price in USD (displays "-" if None)
    Money(Option<f64>),
    /// DateTime displayed as date only
    Date(DateTime<Utc>),
    /// Numeric value
    Number(i64),
    /// Float value with precision
    Float(f64, usize),
    /// Optional float (displays "-" if None)
    OptionalFloat(Option<f64>, usize),
    /// Tags/labels as comma-separated
    Tags(Vec<String>),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                let display = if id.len() > 16 {
                    format!("{}...", &id[..13])
                } else {
                    id.clone()
                };
                format!("{:<width$}", style(&display).cyan(), width = width)
            }
            CellValue::Slug(slug) => {
                format!("{:<width$}", style(slug).cyan(), width = width)
            }
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Category(category) => {
                format!("{:<width$}", category.label(), width = width)
            }
            CellValue::Severity(severity) => {
                let s = severity.to_string();
                let styled = match severity {
                    Severity::Error => style(&s).red().bold(),
                    Severity::Warning => style(&s).yellow(),
                    Severity::Info => style(&s).cyan(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Money(opt) => match opt {
                Some(price) => format!("{:>width$}", format!("${:.2}", price), width = width),
                None => format!("{:>width$}", "-", width = width),
            },
            CellValue::Date(dt) => {
                let local: DateTime<Local> = dt.with_timezone(&Local);
                format!("{:<width$}", local.format("%Y-%m-%d"), width = width)
            }
            CellValue::Number(n) => {
                format!("{:>width$}", n, width = width)
            }
            CellValue::Float(f, precision) => {
                format!("{:>width$.prec$}", f, width = width, prec = precision)
            }
            CellValue::OptionalFloat(opt, precision) => match opt {
                Some(f) => format!("{:>width$.prec$}", f, width = width, prec = precision),
                None => format!("{:>width$}", "-", width = width),
            },
            CellValue::Tags(tags) => {
                let joined = tags.join(", ");
                format!(
                    "{:<width$}",
                    truncate_str(&joined, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Slug(slug) => escape_csv(slug),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Category(category) => category.to_string(),
            CellValue::Severity(severity) => severity.to_string(),
            CellValue::Money(opt) => opt.map(|p| format!("{:.2}", p)).unwrap_or_default(),
            CellValue::Date(dt) => {
                let local: DateTime<Local> = dt.with_timezone(&Local);
                local.format("%Y-%m-%d").to_string()
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::OptionalFloat(opt, precision) => opt
                .map(|f| format!("{:.prec$}", f, prec = precision))
                .unwrap_or_default(),
            CellValue::Tags(tags) => escape_csv(&tags.join(", ")),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Slug(slug) => slug.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Category(category) => category.label().to_string(),
            CellValue::Severity(severity) => severity.to_string(),
            CellValue::Money(opt) => opt
                .map(|p| format!("${:.2}", p))
                .unwrap_or_else(|| "-".to_string()),
            CellValue::Date(dt) => {
                let local: DateTime<Local> = dt.with_timezone(&Local);
                local.format("%Y-%m-%d").to_string()
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::OptionalFloat(opt, precision) => opt
                .map(|f| format!("{:.prec$}", f, prec = precision))
                .unwrap_or_else(|| "-".to_string()),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Empty => "-".to_string(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => id.len().min(16),
            CellValue::Slug(slug) => slug.len(),
            CellValue::Text(s) => s.len(),
            CellValue::Category(category) => category.label().len(),
            CellValue::Severity(severity) => severity.to_string().len(),
            CellValue::Money(opt) => opt.map_or(1, |p| format!("${:.2}", p).len()),
            CellValue::Date(_) => 10, // "YYYY-MM-DD"
            CellValue::Number(n) => n.to_string().len(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision).len(),
            CellValue::OptionalFloat(opt, precision) => {
                opt.map_or(1, |f| format!("{:.prec$}", f, prec = precision).len())
            }
            CellValue::Tags(tags) => tags.join(", ").len(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and width cap
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub full_id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(full_id: String) -> Self {
        Self {
            full_id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    record_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], record_name: &'static str) -> Self {
        Self {
            columns,
            record_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Output rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format.resolve() {
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => self.output_md(&rows),
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        let mut widths = Vec::new();

        for col in self.columns {
            let header_len = col.header.len();
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(|v| v.display_width())
                .max()
                .unwrap_or(0);

            // +2 truncation buffer; cap at the defined width to prevent
            // excessive expansion, but allow shrinking
            let natural_width = header_len.max(max_content.saturating_add(2));
            widths.push(natural_width.min(col.width));
        }

        widths
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header_parts: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, width)| {
                format!("{:<width$}", style(col.header).bold(), width = width)
            })
            .collect();
        println!("{}", header_parts.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let row_parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, width)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*width),
                    None => format!("{:<width$}", "-", width = width),
                })
                .collect();
            println!("{}", row_parts.join(" "));
        }

        if self.config.show_summary {
            println!();
            println!(
                "{} {}(s) found.",
                style(rows.len()).cyan(),
                self.record_name
            );
        }
    }

    fn output_csv(&self, rows: &[TableRow]) {
        let mut headers = vec!["id".to_string()];
        headers.extend(self.columns.iter().map(|c| c.key.to_string()));
        println!("{}", headers.join(","));

        for row in rows {
            let mut values = vec![escape_csv(&row.full_id)];
            for col in self.columns {
                values.push(
                    row.get(col.key)
                        .map(CellValue::format_csv)
                        .unwrap_or_default(),
                );
            }
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        let mut headers = vec!["ID".to_string()];
        headers.extend(self.columns.iter().map(|c| c.header.to_string()));
        println!("| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let mut values = vec![row.full_id.clone()];
            for col in self.columns {
                values.push(
                    row.get(col.key)
                        .map(CellValue::format_md)
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.full_id);
        }
    }
}
