/// Palette endpoint
///
/// ```text
/// GET /v1/colors
/// ```
///
/// ```json
/// {
///   "colors": [
///     { "key": "sunset", "style": "bg-gradient-to-r from-red-500 to-orange-500" }
///   ]
/// }
/// ```

use axum::Json;
use serde::Serialize;
use taskboard_shared::models::color::CollectionColor;

#[derive(Debug, Serialize)]
pub struct ColorEntry {
    pub key: CollectionColor,
    pub style: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ColorsResponse {
    pub colors: Vec<ColorEntry>,
}

/// Lists every palette key with its style token, in display order
pub async fn list_colors() -> Json<ColorsResponse> {
    let colors = CollectionColor::ALL
        .into_iter()
        .map(|key| ColorEntry {
            key,
            style: key.style(),
        })
        .collect();

    Json(ColorsResponse { colors })
}
