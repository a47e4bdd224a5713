/// Collection color palette
///
/// Every collection is painted with one of a fixed set of palette keys. Each key
/// maps to a style token that the presentation layer applies verbatim (a CSS
/// gradient class list).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE collection_color AS ENUM (
///     'sunset', 'poppy', 'rosebud', 'snowflake',
///     'candy', 'firtree', 'metal', 'powder'
/// );
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::models::color::CollectionColor;
///
/// let color: CollectionColor = "sunset".parse().unwrap();
/// assert_eq!(color.as_str(), "sunset");
/// assert!(color.style().contains("from-red-500"));
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Palette key for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "collection_color", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CollectionColor {
    Sunset,
    Poppy,
    Rosebud,
    Snowflake,
    Candy,
    Firtree,
    Metal,
    Powder,
}

/// Returned when a string is not a palette key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown collection color: {0}")]
pub struct UnknownColor(pub String);

impl CollectionColor {
    /// All palette keys, in display order
    pub const ALL: [CollectionColor; 8] = [
        CollectionColor::Sunset,
        CollectionColor::Poppy,
        CollectionColor::Rosebud,
        CollectionColor::Snowflake,
        CollectionColor::Candy,
        CollectionColor::Firtree,
        CollectionColor::Metal,
        CollectionColor::Powder,
    ];

    /// Palette key as stored in the database and sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionColor::Sunset => "sunset",
            CollectionColor::Poppy => "poppy",
            CollectionColor::Rosebud => "rosebud",
            CollectionColor::Snowflake => "snowflake",
            CollectionColor::Candy => "candy",
            CollectionColor::Firtree => "firtree",
            CollectionColor::Metal => "metal",
            CollectionColor::Powder => "powder",
        }
    }

    /// Style token for this key
    pub fn style(&self) -> &'static str {
        match self {
            CollectionColor::Sunset => "bg-gradient-to-r from-red-500 to-orange-500",
            CollectionColor::Poppy => "bg-gradient-to-r from-rose-400 to-red-500",
            CollectionColor::Rosebud => "bg-gradient-to-r from-violet-500 to-purple-500",
            CollectionColor::Snowflake => "bg-gradient-to-r from-indigo-400 to-cyan-400",
            CollectionColor::Candy => {
                "bg-gradient-to-r from-yellow-400 via-pink-500 to-red-500"
            }
            CollectionColor::Firtree => "bg-gradient-to-r from-emerald-400 to-emerald-900",
            CollectionColor::Metal => "bg-gradient-to-r from-slate-400 to-slate-900",
            CollectionColor::Powder => "bg-gradient-to-r from-violet-500 to-pink-200",
        }
    }
}

impl fmt::Display for CollectionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionColor::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_key() {
        for color in CollectionColor::ALL {
            assert_eq!(color.as_str().parse::<CollectionColor>(), Ok(color));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_mismatch() {
        assert_eq!(
            "teal".parse::<CollectionColor>(),
            Err(UnknownColor("teal".to_string()))
        );
        assert!("Sunset".parse::<CollectionColor>().is_err());
        assert!("".parse::<CollectionColor>().is_err());
    }

    #[test]
    fn test_styles_are_distinct() {
        let mut styles: Vec<_> = CollectionColor::ALL.iter().map(|c| c.style()).collect();
        styles.sort();
        styles.dedup();
        assert_eq!(styles.len(), CollectionColor::ALL.len());
    }

    #[test]
    fn test_serde_uses_lowercase_key() {
        let json = serde_json::to_string(&CollectionColor::Firtree).unwrap();
        assert_eq!(json, "\"firtree\"");

        let color: CollectionColor = serde_json::from_str("\"snowflake\"").unwrap();
        assert_eq!(color, CollectionColor::Snowflake);
    }
}
