//! Duplicate checks run before a batch is provisioned

use std::collections::HashSet;

use thiserror::Error;

use super::model::Room;
use crate::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuplicateError {
    #[error("Room number {0} appears more than once in the request")]
    Internal(String),

    #[error("Room number {0} is already occupied")]
    Occupied(String),
}

impl From<DuplicateError> for Error {
    fn from(err: DuplicateError) -> Self {
        Error::Validation(err.to_string())
    }
}

/// Reject a batch that repeats a label or reuses an occupied room's number.
///
/// `existing` is a snapshot taken when the form was opened. A room that
/// another session occupies after the snapshot is not seen here, and the
/// store itself does not enforce uniqueness.
pub fn check_duplicates(labels: &[String], existing: &[Room]) -> Result<(), DuplicateError> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(DuplicateError::Internal(label.clone()));
        }
    }

    let occupied: HashSet<&str> = existing
        .iter()
        .filter(|room| room.is_occupied())
        .map(|room| room.number.as_str())
        .collect();

    match labels.iter().find(|label| occupied.contains(label.as_str())) {
        Some(label) => Err(DuplicateError::Occupied(label.clone())),
        None => Ok(()),
    }
}
