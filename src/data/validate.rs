use thiserror::Error;

use super::model::{REQUIRED_COLUMNS, SubjectTable};

// ---------------------------------------------------------------------------
// Required-column validation
// ---------------------------------------------------------------------------

/// One or more datasets are missing required columns.
///
/// Fatal: no extraction, figure, or summary may be produced after this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required columns not found: {}", describe(.missing))]
pub struct MissingColumnsError {
    /// (dataset label, missing column names), one entry per failing table.
    pub missing: Vec<(String, Vec<String>)>,
}

fn describe(missing: &[(String, Vec<String>)]) -> String {
    missing
        .iter()
        .map(|(dataset, cols)| format!("{dataset} dataset is missing [{}]", cols.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Required columns absent from a table, in [`REQUIRED_COLUMNS`] order.
pub fn missing_columns(table: &SubjectTable) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect()
}

/// Check that every table carries all required columns.
///
/// All tables are inspected before reporting so the error names every
/// missing column of every dataset, not just the first one found.
pub fn validate(tables: &[&SubjectTable]) -> Result<(), MissingColumnsError> {
    let missing: Vec<(String, Vec<String>)> = tables
        .iter()
        .filter_map(|table| {
            let cols = missing_columns(table);
            (!cols.is_empty()).then(|| (table.label.clone(), cols))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumnsError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(label: &str, columns: &[&str]) -> SubjectTable {
        SubjectTable {
            label: label.to_string(),
            raw_columns: columns.iter().map(|c| c.to_string()).collect(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            dropped_rows: 0,
        }
    }

    #[test]
    fn complete_tables_pass() {
        let male = table("male", &REQUIRED_COLUMNS);
        let female = table("female", &REQUIRED_COLUMNS);
        assert!(validate(&[&male, &female]).is_ok());
    }

    #[test]
    fn missing_hip_circumference_is_named() {
        let cols: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "Hip_circumference")
            .collect();
        let male = table("male", &cols);
        let female = table("female", &REQUIRED_COLUMNS);

        let err = validate(&[&male, &female]).unwrap_err();
        assert_eq!(
            err.missing,
            vec![("male".to_string(), vec!["Hip_circumference".to_string()])]
        );

        let msg = err.to_string();
        assert!(msg.contains("male dataset"));
        assert!(msg.contains("Hip_circumference"));
        assert!(!msg.contains("female"));
    }

    #[test]
    fn misses_in_both_datasets_are_all_reported() {
        let male = table("male", &["Weight", "Height"]);
        let female = table("female", &["Weight"]);

        let err = validate(&[&male, &female]).unwrap_err();
        assert_eq!(err.missing.len(), 2);
        assert_eq!(err.missing[0].0, "male");
        assert_eq!(err.missing[0].1.len(), 5);
        assert_eq!(err.missing[1].0, "female");
        assert_eq!(err.missing[1].1.len(), 6);
    }

    #[test]
    fn untrimmed_labels_do_not_satisfy_validation() {
        // Lookup is whitespace-sensitive; normalization happens at load time.
        let mut cols: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        cols[0] = " Weight ".to_string();
        let table = SubjectTable {
            label: "male".to_string(),
            raw_columns: cols.clone(),
            columns: cols,
            rows: Vec::new(),
            dropped_rows: 0,
        };

        let missing = missing_columns(&table);
        assert_eq!(missing, vec!["Weight".to_string()]);
    }
}
