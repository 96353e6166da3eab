use std::fmt::Write as _;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Required measurement columns
// ---------------------------------------------------------------------------

/// The seven measurement columns every dataset must provide, in the order
/// they appear in the extracted matrix. Column 0 is always Weight; plotting
/// and summary code index it positionally, so this order must not change.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Weight",
    "Height",
    "Upper_arm_length",
    "Upper_leg_length",
    "Arm_circumference",
    "Hip_circumference",
    "Waist_circumference",
];

/// Index of the weight column in a [`MeasurementMatrix`].
pub const WEIGHT_COLUMN: usize = 0;

/// Strip surrounding whitespace from a column label. Idempotent.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_string()
}

// ---------------------------------------------------------------------------
// SubjectTable – one dataset, one row per measured individual
// ---------------------------------------------------------------------------

/// A loaded dataset of numeric body measurements.
///
/// Every row is aligned with `columns`; rows that did not parse cleanly were
/// dropped at load time and only counted in `dropped_rows`.
#[derive(Debug, Clone)]
pub struct SubjectTable {
    /// Dataset label used in diagnostics and errors ("male", "female").
    pub label: String,
    /// Column labels exactly as found in the file header.
    pub raw_columns: Vec<String>,
    /// Column labels after whitespace normalization, in source order.
    pub columns: Vec<String>,
    /// One row per subject, aligned with `columns`.
    pub rows: Vec<Vec<f64>>,
    /// Number of malformed rows skipped during loading.
    pub dropped_rows: usize,
}

impl SubjectTable {
    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by its normalized label.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy out a single column by name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Render the first `n` rows for diagnostic output, pandas-head style.
    pub fn preview(&self, n: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.columns.join("  "));
        for row in self.rows.iter().take(n) {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.1}")).collect();
            let _ = writeln!(out, "{}", cells.join("  "));
        }
        out
    }

    /// Project the table onto `wanted` columns, in exactly that order.
    ///
    /// Callers are expected to have validated column presence already; a
    /// missing column here surfaces as a plain error.
    pub fn project(&self, wanted: &[&str]) -> Result<MeasurementMatrix> {
        let mut indices = Vec::with_capacity(wanted.len());
        for name in wanted {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => bail!("column '{name}' not present in {} dataset", self.label),
            }
        }

        let rows: Vec<Vec<f64>> = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();

        Ok(MeasurementMatrix {
            columns: wanted.iter().map(|s| s.to_string()).collect(),
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// MeasurementMatrix – fixed-column-order numeric projection
// ---------------------------------------------------------------------------

/// Numeric matrix extracted from a [`SubjectTable`]: one row per subject,
/// one column per required measurement, in [`REQUIRED_COLUMNS`] order.
/// Immutable after extraction.
#[derive(Debug, Clone)]
pub struct MeasurementMatrix {
    /// Column labels, in extraction order.
    pub columns: Vec<String>,
    /// One row per subject.
    pub rows: Vec<Vec<f64>>,
}

impl MeasurementMatrix {
    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy out a column by position.
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[idx]).collect()
    }

    /// The weight column (always column 0).
    pub fn weights(&self) -> Vec<f64> {
        self.column(WEIGHT_COLUMN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_shuffled_columns() -> SubjectTable {
        // Columns deliberately out of matrix order.
        let columns = vec![
            "Height".to_string(),
            "Weight".to_string(),
            "Upper_arm_length".to_string(),
            "Upper_leg_length".to_string(),
            "Arm_circumference".to_string(),
            "Hip_circumference".to_string(),
            "Waist_circumference".to_string(),
        ];
        let rows = vec![
            vec![170.0, 70.0, 36.0, 40.0, 31.0, 95.0, 85.0],
            vec![180.0, 80.0, 38.0, 42.0, 33.0, 100.0, 90.0],
            vec![175.0, 90.0, 37.0, 41.0, 32.0, 98.0, 88.0],
        ];
        SubjectTable {
            label: "male".to_string(),
            raw_columns: columns.clone(),
            columns,
            rows,
            dropped_rows: 0,
        }
    }

    #[test]
    fn projection_puts_weight_in_column_zero() {
        let table = table_with_shuffled_columns();
        let matrix = table.project(&REQUIRED_COLUMNS).unwrap();

        assert_eq!(matrix.columns[WEIGHT_COLUMN], "Weight");
        assert_eq!(matrix.weights(), vec![70.0, 80.0, 90.0]);
        assert_eq!(matrix.weights(), table.column("Weight").unwrap());
    }

    #[test]
    fn projection_preserves_row_order() {
        let table = table_with_shuffled_columns();
        let matrix = table.project(&REQUIRED_COLUMNS).unwrap();

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.rows[0][0], 70.0);
        assert_eq!(matrix.rows[0][1], 170.0);
        assert_eq!(matrix.rows[2][0], 90.0);
        assert_eq!(matrix.rows[2][1], 175.0);
    }

    #[test]
    fn projection_fails_on_absent_column() {
        let mut table = table_with_shuffled_columns();
        table.columns.retain(|c| c != "Hip_circumference");
        for row in &mut table.rows {
            row.remove(5);
        }

        let err = table.project(&REQUIRED_COLUMNS).unwrap_err();
        assert!(err.to_string().contains("Hip_circumference"));
        assert!(err.to_string().contains("male"));
    }

    #[test]
    fn label_normalization_is_idempotent() {
        let raw = "  Hip_circumference \t";
        let once = normalize_label(raw);
        let twice = normalize_label(&once);
        assert_eq!(once, "Hip_circumference");
        assert_eq!(once, twice);
    }
}
