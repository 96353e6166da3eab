use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{SubjectTable, normalize_label};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a subject table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row of column labels
/// * `.json` – records array: `[{ "Weight": 97.1, "Height": 189.9, ... }, ...]`
///
/// `label` names the dataset ("male", "female") in diagnostics and errors.
/// Structurally invalid rows are skipped, not fatal; the skip count ends up
/// in [`SubjectTable::dropped_rows`] and is reported via `log::warn!`.
pub fn load_file(path: &Path, label: &str) -> Result<SubjectTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path, label)?,
        "json" => load_json(path, label)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    if table.dropped_rows > 0 {
        log::warn!(
            "Skipped {} malformed row(s) while loading {} dataset from {}",
            table.dropped_rows,
            label,
            path.display()
        );
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column labels, one numeric row per subject.
///
/// A row is dropped when its field count disagrees with the header or when
/// any cell fails to parse as a float. Header labels are kept twice: raw as
/// read, and with surrounding whitespace trimmed for all downstream lookups.
fn load_csv(path: &Path, label: &str) -> Result<SubjectTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let raw_columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns: Vec<String> = raw_columns.iter().map(|h| normalize_label(h)).collect();

    let mut rows = Vec::new();
    let mut dropped_rows = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(rec) => rec,
            Err(_) => {
                dropped_rows += 1;
                continue;
            }
        };

        if record.len() != columns.len() {
            dropped_rows += 1;
            continue;
        }

        match parse_numeric_row(&record) {
            Some(row) => rows.push(row),
            None => dropped_rows += 1,
        }
    }

    Ok(SubjectTable {
        label: label.to_string(),
        raw_columns,
        columns,
        rows,
        dropped_rows,
    })
}

/// Parse every cell of a record as `f64`, or reject the whole row.
fn parse_numeric_row(record: &csv::StringRecord) -> Option<Vec<f64>> {
    record
        .iter()
        .map(|cell| cell.trim().parse::<f64>().ok())
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Weight": 97.1, "Height": 189.9, "Hip_circumference": 107.1, ... },
///   ...
/// ]
/// ```
///
/// The column set is taken from the first record (key order as serde_json
/// stores it); later records missing a key or carrying a non-numeric value
/// are dropped like malformed CSV rows.
fn load_json(path: &Path, label: &str) -> Result<SubjectTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let raw_columns: Vec<String> = match records.first() {
        Some(first) => first
            .as_object()
            .context("Row 0 is not a JSON object")?
            .keys()
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    let columns: Vec<String> = raw_columns.iter().map(|h| normalize_label(h)).collect();

    let mut rows = Vec::new();
    let mut dropped_rows = 0usize;

    for rec in records {
        let Some(obj) = rec.as_object() else {
            dropped_rows += 1;
            continue;
        };

        let row: Option<Vec<f64>> = raw_columns
            .iter()
            .map(|key| obj.get(key).and_then(JsonValue::as_f64))
            .collect();

        match row {
            Some(row) => rows.push(row),
            None => dropped_rows += 1,
        }
    }

    Ok(SubjectTable {
        label: label.to_string(),
        raw_columns,
        columns,
        rows,
        dropped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rusty_bmx_loader_{name}"));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_header_whitespace_is_trimmed() {
        let path = write_temp(
            "trim.csv",
            " Weight , Height \n70.0,170.0\n",
        );
        let table = load_file(&path, "male").unwrap();

        assert_eq!(table.raw_columns, vec![" Weight ", " Height "]);
        assert_eq!(table.columns, vec!["Weight", "Height"]);
        assert_eq!(table.column("Weight").unwrap(), vec![70.0]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn csv_malformed_rows_are_dropped_and_counted() {
        let path = write_temp(
            "malformed.csv",
            "Weight,Height\n\
             70.0,170.0\n\
             not_a_number,171.0\n\
             80.0\n\
             90.0,175.0\n",
        );
        let table = load_file(&path, "male").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows, 2);
        assert_eq!(table.column("Weight").unwrap(), vec![70.0, 90.0]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_records_are_loaded() {
        let path = write_temp(
            "records.json",
            r#"[
                {"Weight": 70.0, "Height": 170.0},
                {"Weight": "oops", "Height": 171.0},
                {"Weight": 90.0, "Height": 175.0}
            ]"#,
        );
        let table = load_file(&path, "female").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows, 1);
        assert_eq!(table.column("Weight").unwrap(), vec![70.0, 90.0]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = write_temp("table.parquet", "");
        let err = load_file(&path, "male").unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
        let _ = std::fs::remove_file(&path);
    }
}
