//! Rendering of `list` results.

use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::dotenv::lines::Dictionary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Bordered text table
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of objects
    Json,
    /// Number of entries only
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Field {
    Key,
    Value,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Value => "value",
        }
    }

    fn pick<'a>(self, key: &'a str, value: &'a str) -> &'a str {
        match self {
            Field::Key => key,
            Field::Value => value,
        }
    }
}

/// Render the entries with the selected fields, in order.
pub fn render(
    dictionary: &Dictionary,
    fields: &[Field],
    format: Format,
) -> Result<String, serde_json::Error> {
    let rows: Vec<Vec<&str>> = dictionary
        .iter()
        .map(|(key, value)| fields.iter().map(|f| f.pick(key, value)).collect())
        .collect();

    match format {
        Format::Table => Ok(format_table(fields, &rows)),
        Format::Csv => Ok(format_csv(fields, &rows)),
        Format::Json => format_json(fields, &rows),
        Format::Count => Ok(format!("{}\n", rows.len())),
    }
}

fn format_table(fields: &[Field], rows: &[Vec<&str>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(fields.iter().map(|f| f.name()));
    for row in rows {
        builder.push_record(row.iter().copied());
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    format!("{}\n", table)
}

fn format_csv(fields: &[Field], rows: &[Vec<&str>]) -> String {
    let mut output = String::new();
    let header: Vec<&str> = fields.iter().map(|f| f.name()).collect();
    output.push_str(&header.join(","));
    output.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }
    output
}

fn csv_escape(cell: &str) -> String {
    if cell.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn format_json(fields: &[Field], rows: &[Vec<&str>]) -> Result<String, serde_json::Error> {
    let items: Vec<Value> = rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = fields
                .iter()
                .zip(row)
                .map(|(field, cell)| (field.name().to_string(), Value::String(cell.to_string())))
                .collect();
            Value::Object(object)
        })
        .collect();
    let mut output = serde_json::to_string(&items)?;
    output.push('\n');
    Ok(output)
}
