//! Output formatting utilities

use serde::Serialize;
use travers_core::{NodeWrapper, PropertyMap};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Pretty JSON for any serializable value
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Render rows as a left-aligned, space-padded table
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// `key=value` pairs; strings are shown without quotes
pub fn format_properties(properties: &PropertyMap) -> String {
    properties
        .iter()
        .map(|(key, value)| match value.as_str() {
            Some(s) => format!("{}={}", key, s),
            None => format!("{}={}", key, value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table of procedure rows
pub fn node_table(rows: &[NodeWrapper]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.node.id.to_string(),
                row.node.labels.join(":"),
                format_properties(&row.node.properties),
            ]
        })
        .collect();
    render_table(&["ID", "LABELS", "PROPERTIES"], &cells)
}
