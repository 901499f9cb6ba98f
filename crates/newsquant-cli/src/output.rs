use newsquant_core::Envelope;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

pub fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("command     : {}\n", envelope.meta.command));
    out.push_str(&format!("schema      : {}\n", envelope.meta.schema_version));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    out.push_str(&format!("elapsed_ms  : {}\n", envelope.meta.elapsed_ms));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    match &envelope.data {
        Value::Object(sections) => {
            for (name, value) in sections {
                out.push_str(&format!("{name}:\n"));
                out.push_str(&render_value(value)?);
            }
        }
        other => {
            out.push_str("data:\n");
            out.push_str(&render_value(other)?);
        }
    }

    Ok(out)
}

fn render_value(value: &Value) -> Result<String, CliError> {
    if let Some(rows) = as_flat_rows(value) {
        return Ok(rows_table(&rows));
    }
    match value {
        Value::Object(_) | Value::Array(_) => {
            let pretty = serde_json::to_string_pretty(value)?;
            Ok(pretty.lines().map(|line| format!("  {line}\n")).collect())
        }
        scalar => Ok(format!("  {}\n", cell(scalar))),
    }
}

/// Arrays of objects whose values are all scalars render as columns.
fn as_flat_rows(value: &Value) -> Option<Vec<&Map<String, Value>>> {
    let rows: Vec<&Map<String, Value>> = value
        .as_array()?
        .iter()
        .map(Value::as_object)
        .collect::<Option<_>>()?;
    let flat = rows
        .iter()
        .all(|row| row.values().all(|v| !(v.is_object() || v.is_array())));
    (!rows.is_empty() && flat).then_some(rows)
}

fn rows_table(rows: &[&Map<String, Value>]) -> String {
    let columns: Vec<&String> = rows[0].keys().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(*column).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(columns.iter().map(|c| c.as_str()).collect());
    for row in &cells {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_owned(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format!("{float:.6}"),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsquant_core::EnvelopeMeta;
    use serde_json::json;

    #[test]
    fn flat_rows_render_as_aligned_columns() {
        let meta = EnvelopeMeta::new("metrics", 1).expect("meta");
        let envelope = Envelope::success(
            meta,
            json!({ "rows": [
                { "date": "2020-01-02", "close": 9.5, "sma_20": null },
                { "date": "2020-01-03", "close": 11.0, "sma_20": 10.25 }
            ]}),
        );

        let table = render_table(&envelope).expect("table");
        assert!(table.contains("rows:\n"));
        assert!(table
            .lines()
            .any(|line| line.contains("9.500000") && line.contains("2020-01-02") && line.ends_with('-')));
        assert!(table.contains("10.250000"));
    }

    #[test]
    fn warnings_are_listed() {
        let mut meta = EnvelopeMeta::new("news", 0).expect("meta");
        meta.push_warning("news: row 3 rejected");
        let table = render_table(&Envelope::success(meta, json!(1))).expect("table");
        assert!(table.contains("  - news: row 3 rejected\n"));
        assert!(table.contains("data:\n  1\n"));
    }
}
