//! The Slide Store interface.
//!
//! Mutations follow an optimistic-concurrency protocol keyed by a per-scope
//! version: the engine snapshots a scope (slides + version), plans its
//! writes, and commits them against the version it read. A commit whose
//! expected version has moved fails with [`StoreError::Conflict`] and
//! applies nothing, so two racing mutations can never both apply shift
//! plans computed from the same pre-mutation state.

use async_trait::async_trait;
use vitrine_core::types::{Scope, SlideId};

use crate::models::Slide;

/// Monotonic per-scope mutation counter.
pub type ScopeVersion = i64;

/// One write in an atomic commit batch.
#[derive(Debug, Clone)]
pub enum SlideWrite {
    /// Insert or replace a slide row.
    Put(Slide),
    /// Remove a slide row.
    Delete(SlideId),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scope was modified since the snapshot was taken")]
    Conflict,

    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable keyed storage for slides.
///
/// Only the ordering engine writes through this interface; nothing else is
/// permitted to mutate `position`.
#[async_trait]
pub trait SlideStore: Send + Sync {
    /// All slides in the scope sorted ascending by position, plus the
    /// scope version the snapshot was taken at.
    async fn snapshot(&self, scope: &Scope) -> Result<(Vec<Slide>, ScopeVersion), StoreError>;

    /// Fetch one slide by id within a scope.
    async fn get(&self, scope: &Scope, id: SlideId) -> Result<Option<Slide>, StoreError>;

    /// Apply a batch of writes atomically.
    ///
    /// Fails with [`StoreError::Conflict`] (applying nothing) if the scope
    /// version no longer equals `expected_version`; bumps the version on
    /// success. Either every write lands or none do.
    async fn commit(
        &self,
        scope: &Scope,
        expected_version: ScopeVersion,
        writes: Vec<SlideWrite>,
    ) -> Result<(), StoreError>;
}
