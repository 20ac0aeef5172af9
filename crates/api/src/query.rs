//! Shared query parameter types for API handlers.
//!
//! The ordering invariant is scoped per `(site, language)` pair, so every
//! slide endpoint addresses its scope explicitly through these parameters.

use serde::Deserialize;
use vitrine_core::types::Scope;

/// Scope parameters (`?site=&language=`) required on every slide endpoint.
#[derive(Debug, Deserialize)]
pub struct ScopeParams {
    pub site: String,
    pub language: String,
}

impl ScopeParams {
    pub fn scope(&self) -> Scope {
        Scope::new(self.site.clone(), self.language.clone())
    }
}

/// Listing parameters: scope plus an `active_only` flag.
///
/// `active_only=true` omits inactive slides from the result without
/// renumbering the remaining ones.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub site: String,
    pub language: String,
    #[serde(default)]
    pub active_only: bool,
}

impl ListParams {
    pub fn scope(&self) -> Scope {
        Scope::new(self.site.clone(), self.language.clone())
    }
}
