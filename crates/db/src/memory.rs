//! In-memory [`SlideStore`] used by engine unit tests, the concurrency
//! stress test, and the API integration tests.
//!
//! Commit semantics mirror the Postgres store: version check, then the
//! whole batch under one write lock, then a version bump. Scope entries are
//! never removed once created so a scope's version survives emptying it; a
//! reset to zero would let a stale snapshot commit.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrine_core::types::{Scope, SlideId};

use crate::models::Slide;
use crate::store::{ScopeVersion, SlideStore, SlideWrite, StoreError};

#[derive(Debug, Default)]
struct ScopeState {
    version: ScopeVersion,
    slides: HashMap<SlideId, Slide>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    scopes: RwLock<HashMap<Scope, ScopeState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlideStore for MemoryStore {
    async fn snapshot(&self, scope: &Scope) -> Result<(Vec<Slide>, ScopeVersion), StoreError> {
        let scopes = self.scopes.read().await;
        match scopes.get(scope) {
            Some(state) => {
                let mut slides: Vec<Slide> = state.slides.values().cloned().collect();
                slides.sort_by_key(|s| s.position);
                Ok((slides, state.version))
            }
            None => Ok((Vec::new(), 0)),
        }
    }

    async fn get(&self, scope: &Scope, id: SlideId) -> Result<Option<Slide>, StoreError> {
        let scopes = self.scopes.read().await;
        Ok(scopes
            .get(scope)
            .and_then(|state| state.slides.get(&id))
            .cloned())
    }

    async fn commit(
        &self,
        scope: &Scope,
        expected_version: ScopeVersion,
        writes: Vec<SlideWrite>,
    ) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write().await;
        let state = scopes.entry(scope.clone()).or_default();

        if state.version != expected_version {
            return Err(StoreError::Conflict);
        }

        for write in writes {
            match write {
                SlideWrite::Put(slide) => {
                    state.slides.insert(slide.id, slide);
                }
                SlideWrite::Delete(id) => {
                    state.slides.remove(&id);
                }
            }
        }
        state.version += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;
    use vitrine_core::types::Scope;

    fn slide(scope: &Scope, position: i32) -> Slide {
        let now = Utc::now();
        Slide {
            id: Uuid::now_v7(),
            site: scope.site.clone(),
            language: scope.language.clone(),
            title: format!("Slide {position}"),
            subtitle: None,
            description: None,
            link_url: None,
            button_text: None,
            image_url: "/media/banner.jpg".into(),
            position,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn empty_scope_snapshot_is_version_zero() {
        let store = MemoryStore::new();
        let scope = Scope::new("main", "en");
        let (slides, version) = store.snapshot(&scope).await.unwrap();
        assert!(slides.is_empty());
        assert_eq!(version, 0);
    }

    #[tokio::test]
    async fn commit_bumps_version_and_snapshot_is_sorted() {
        let store = MemoryStore::new();
        let scope = Scope::new("main", "en");
        let writes = vec![
            SlideWrite::Put(slide(&scope, 2)),
            SlideWrite::Put(slide(&scope, 1)),
        ];
        store.commit(&scope, 0, writes).await.unwrap();

        let (slides, version) = store.snapshot(&scope).await.unwrap();
        assert_eq!(version, 1);
        assert_eq!(
            slides.iter().map(|s| s.position).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn stale_commit_is_rejected_and_applies_nothing() {
        let store = MemoryStore::new();
        let scope = Scope::new("main", "en");
        store
            .commit(&scope, 0, vec![SlideWrite::Put(slide(&scope, 1))])
            .await
            .unwrap();

        // Version is now 1; a commit against version 0 must change nothing.
        let result = store
            .commit(&scope, 0, vec![SlideWrite::Put(slide(&scope, 2))])
            .await;
        assert_matches!(result, Err(StoreError::Conflict));

        let (slides, version) = store.snapshot(&scope).await.unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(version, 1);
    }

    #[tokio::test]
    async fn emptying_a_scope_keeps_its_version() {
        let store = MemoryStore::new();
        let scope = Scope::new("main", "en");
        let s = slide(&scope, 1);
        let id = s.id;
        store
            .commit(&scope, 0, vec![SlideWrite::Put(s)])
            .await
            .unwrap();
        store
            .commit(&scope, 1, vec![SlideWrite::Delete(id)])
            .await
            .unwrap();

        let (slides, version) = store.snapshot(&scope).await.unwrap();
        assert!(slides.is_empty());
        assert_eq!(version, 2);
    }

    #[tokio::test]
    async fn scopes_are_independent() {
        let store = MemoryStore::new();
        let en = Scope::new("main", "en");
        let de = Scope::new("main", "de");
        store
            .commit(&en, 0, vec![SlideWrite::Put(slide(&en, 1))])
            .await
            .unwrap();

        let (slides, version) = store.snapshot(&de).await.unwrap();
        assert!(slides.is_empty());
        assert_eq!(version, 0);
    }
}
