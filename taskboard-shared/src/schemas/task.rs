use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::FieldError;

/// Body of a "create task" request
///
/// `expires_at` is not compared with the current time; an expiry in the past
/// is stored as given and later reported as expired.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskSchema {
    #[validate(range(min = 0, message = "Collection id must not be negative"))]
    pub collection_id: i32,

    #[validate(length(min = 5, message = "Task content must be at least 5 characters long"))]
    pub content: String,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateTaskSchema {
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate()
            .map_err(|errors| FieldError::from_validation_errors(&errors))
    }
}
