use serde::{Deserialize, Serialize};

/// Slide primary keys are UUIDv7, assigned by the engine at creation.
pub type SlideId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The `(site, language)` pair a slide belongs to.
///
/// The gap-free ordering invariant holds independently per scope; no
/// operation ever touches slides outside the scope it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub site: String,
    pub language: String,
}

impl Scope {
    pub fn new(site: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            language: language.into(),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.site, self.language)
    }
}
