//! Fixed layout of the credit application dataset

use serde::{Deserialize, Serialize};

/// Column names assigned in file order: 15 features and the label
pub const COLUMN_NAMES: [&str; 16] = [
    "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "A10", "A11", "A12", "A13", "A14",
    "A15", "A16",
];

/// Features treated as discrete labels
pub const CATEGORICAL_COLUMNS: [&str; 9] = ["A1", "A4", "A5", "A6", "A7", "A9", "A10", "A12", "A13"];

/// Features treated as real numbers
pub const CONTINUOUS_COLUMNS: [&str; 6] = ["A2", "A3", "A8", "A11", "A14", "A15"];

/// Label column
pub const TARGET_COLUMN: &str = "A16";

/// Literal marking an unknown value in the raw file
pub const MISSING_MARKER: &str = "?";

/// Label literal for an approved application
pub const APPROVED_LABEL: &str = "+";

/// Static role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Categorical,
    Continuous,
    Target,
}

/// Column layout and literals of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub columns: Vec<String>,
    pub categorical: Vec<String>,
    pub continuous: Vec<String>,
    pub target: String,
    pub missing_marker: String,
    pub approved_label: String,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::credit()
    }
}

impl DatasetSchema {
    /// Layout of the UCI credit approval (`crx.data`) file
    pub fn credit() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            columns: owned(&COLUMN_NAMES),
            categorical: owned(&CATEGORICAL_COLUMNS),
            continuous: owned(&CONTINUOUS_COLUMNS),
            target: TARGET_COLUMN.to_string(),
            missing_marker: MISSING_MARKER.to_string(),
            approved_label: APPROVED_LABEL.to_string(),
        }
    }

    /// Number of fields every raw record must carry
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        if name == self.target {
            Some(ColumnType::Target)
        } else if self.categorical.iter().any(|c| c == name) {
            Some(ColumnType::Categorical)
        } else if self.continuous.iter().any(|c| c == name) {
            Some(ColumnType::Continuous)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_schema_layout() {
        let schema = DatasetSchema::credit();
        assert_eq!(schema.width(), 16);
        assert_eq!(schema.categorical.len(), 9);
        assert_eq!(schema.continuous.len(), 6);
        assert_eq!(schema.columns.last().map(String::as_str), Some("A16"));
    }

    #[test]
    fn test_every_feature_is_tagged_once() {
        let schema = DatasetSchema::credit();
        for name in &schema.columns {
            assert!(schema.column_type(name).is_some(), "{} has no tag", name);
        }
        assert_eq!(schema.column_type("A2"), Some(ColumnType::Continuous));
        assert_eq!(schema.column_type("A13"), Some(ColumnType::Categorical));
        assert_eq!(schema.column_type("A16"), Some(ColumnType::Target));
        assert_eq!(schema.column_type("A2_norm"), None);
    }
}
