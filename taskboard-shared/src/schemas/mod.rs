/// Input validation schemas
///
/// Declarative rules for the two write shapes the board accepts. Schemas are
/// plain deserializable structs validated with the `validator` derive; failures
/// are flattened into [`FieldError`]s so they can be reported per field.
///
/// - [`collection::CreateCollectionSchema`]: non-empty name, palette color
/// - [`task::CreateTaskSchema`]: collection id, content of at least 5 characters,
///   optional expiry

pub mod collection;
pub mod task;

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flattens `validator` output into one entry per failed rule, sorted by field
    pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<Self> {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        details.sort_by(|a, b| a.field.cmp(&b.field));
        details
    }
}
