//! Rendering records and choices for the terminal.
//!
//! This is a one-way sink: nothing here feeds back into the registry.

use std::io::{self, Write};

use anyhow::Context;
use bloodline::Record;

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Resolves requested columns for `R`, falling back to its default fields.
///
/// Fails on the first name `R` does not have.
pub fn resolve_columns<R: Record>(requested: &[String]) -> anyhow::Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(R::DEFAULT_FIELDS.iter().map(ToString::to_string).collect());
    }

    if let Some(unknown) = requested
        .iter()
        .find(|name| !R::FIELDS.contains(&name.as_str()))
    {
        anyhow::bail!(
            "unknown column for {}: {unknown} (expected one of {})",
            R::COLLECTION,
            R::FIELDS.join(", ")
        );
    }
    Ok(requested.to_vec())
}

/// Renders records as rows of the given fields.
pub fn render_records<R: Record, W: Write>(
    writer: &mut W,
    records: &[R],
    fields: &[String],
    output: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| record.field(field).unwrap_or_default())
                .collect()
        })
        .collect();

    match output {
        OutputFormat::Table => render_table(writer, fields, &rows, quiet)?,
        OutputFormat::Json => render_json(writer, fields, &rows)?,
        OutputFormat::Csv => render_csv(writer, fields, &rows, quiet)?,
    }
    Ok(())
}

fn render_table<W: Write>(
    writer: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
    quiet: bool,
) -> io::Result<()> {
    if quiet {
        for row in rows {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        return Ok(());
    }

    // Determine column widths for alignment.
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect::<Vec<_>>();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", header_line.trim_end())?;

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{rule}")?;

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
}

fn render_json<W: Write>(
    writer: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
) -> anyhow::Result<()> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .cloned()
                .zip(row.iter().cloned().map(serde_json::Value::String))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &objects).context("failed to render json output")?;
    writeln!(writer)?;
    Ok(())
}

fn render_csv<W: Write>(
    writer: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
    quiet: bool,
) -> io::Result<()> {
    if !quiet {
        let header_line = headers
            .iter()
            .map(|header| csv_escape(header))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{header_line}")?;
    }

    for row in rows {
        let values = row
            .iter()
            .map(|value| csv_escape(value))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{values}")?;
    }
    Ok(())
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Builds a choice list: the placeholder first, then each value.
pub fn option_list<I>(placeholder: &str, values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: ToString,
{
    std::iter::once(placeholder.to_string())
        .chain(values.into_iter().map(|value| value.to_string()))
        .collect()
}

/// Writes a choice list, one entry per line.
pub fn render_options<W: Write>(writer: &mut W, options: &[String]) -> io::Result<()> {
    for option in options {
        writeln!(writer, "{option}")?;
    }
    Ok(())
}
