//! Equality filters over entity columns

use super::entity::{FieldValue, Fields};

/// A conjunction of column equality conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(&'static str, FieldValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = value` to the filter
    pub fn eq(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn conditions(&self) -> &[(&'static str, FieldValue)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Checks the filter against a record's values
    pub fn matches(&self, record: &impl Fields) -> bool {
        self.conditions.iter().all(|(column, expected)| {
            record
                .field(column)
                .is_some_and(|actual| actual.matches(expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        title: String,
        subtitle: Option<String>,
    }

    impl Fields for Row {
        fn fields(&self) -> Vec<(&'static str, FieldValue)> {
            vec![
                ("title", self.title.clone().into()),
                ("subtitle", self.subtitle.clone().into()),
            ]
        }
    }

    #[test]
    fn test_filter_matches_all_conditions() {
        let row = Row {
            title: "Heat".to_string(),
            subtitle: None,
        };

        assert!(Filter::new().eq("title", "Heat").matches(&row));
        assert!(Filter::new()
            .eq("title", "Heat")
            .eq("subtitle", None::<String>)
            .matches(&row));
        assert!(!Filter::new()
            .eq("title", "Heat")
            .eq("subtitle", Some("Director's cut".to_string()))
            .matches(&row));
    }

    #[test]
    fn test_unknown_column_never_matches() {
        let row = Row {
            title: "Heat".to_string(),
            subtitle: None,
        };

        assert!(!Filter::new().eq("director", "Mann").matches(&row));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let row = Row {
            title: "Heat".to_string(),
            subtitle: None,
        };

        assert!(Filter::new().is_empty());
        assert!(Filter::new().matches(&row));
    }
}
