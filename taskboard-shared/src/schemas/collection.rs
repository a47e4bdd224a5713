use serde::{Deserialize, Serialize};
use validator::Validate;

use super::FieldError;
use crate::models::color::CollectionColor;

/// Longest collection name the `collections.name` column holds
pub const MAX_NAME_LEN: usize = 255;

/// Body of a "create collection" request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCollectionSchema {
    #[validate(length(min = 1, message = "Collection name is required"))]
    pub name: String,

    /// Palette key, e.g. `"sunset"`
    #[validate(length(min = 1, message = "Collection color is required"))]
    pub color: String,
}

/// A collection request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCollection {
    pub name: String,
    pub color: CollectionColor,
}

impl CreateCollectionSchema {
    /// Runs the declarative rules, then the name limit, then resolves the
    /// color against the palette
    pub fn parse(self) -> Result<ValidCollection, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(FieldError::from_validation_errors(&errors));
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(vec![FieldError::new(
                "name",
                format!("Collection name must be at most {} characters", MAX_NAME_LEN),
            )]);
        }

        let color = self.color.parse::<CollectionColor>().map_err(|_| {
            vec![FieldError::new(
                "color",
                format!("Color must be one of: {}", palette_keys()),
            )]
        })?;

        Ok(ValidCollection {
            name: self.name,
            color,
        })
    }
}

fn palette_keys() -> String {
    CollectionColor::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
