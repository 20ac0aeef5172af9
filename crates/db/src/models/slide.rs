//! Slide entity model and DTOs.
//!
//! A slide is one entry in the homepage carousel. `position` is the 1-based
//! spot in its `(site, language)` scope; the engine keeps positions gap-free
//! across every mutation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::ordering::Placement;
use vitrine_core::types::{Scope, SlideId, Timestamp};

/// A row from the `slides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Slide {
    pub id: SlideId,
    pub site: String,
    pub language: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub image_url: String,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Slide {
    pub fn scope(&self) -> Scope {
        Scope::new(self.site.clone(), self.language.clone())
    }

    /// Reduce to the id/position pair the shift planner works on.
    pub fn placement(&self) -> Placement {
        Placement {
            id: self.id,
            position: self.position,
        }
    }
}

/// DTO for creating a new slide.
///
/// `title` and `image_url` are required but typed as `Option` so the engine
/// can reject their absence with a validation error instead of a
/// deserialization failure. A missing `position` appends to the end.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSlide {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing slide. Absent fields are left unchanged;
/// a blank string clears one of the optional text fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSlide {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}
