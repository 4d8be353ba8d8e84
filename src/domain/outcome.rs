//! Operation outcomes shared by the services

/// Result of deleting a record that may not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub fn from_deleted(deleted: bool) -> Self {
        if deleted {
            Self::Deleted
        } else {
            Self::NotFound
        }
    }
}
