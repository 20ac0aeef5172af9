//! The ordering engine: the one component allowed to mutate slides.
//!
//! Every mutation is a single snapshot → plan → atomic-commit unit. The
//! plan step is pure ([`vitrine_core::ordering`]); the commit step is the
//! store's all-or-nothing batch keyed by the scope version read at snapshot
//! time. When a commit loses a race the engine re-snapshots and retries
//! exactly once; a second conflict is surfaced to the caller as
//! [`CoreError::Conflict`] (HTTP 409, retry the whole request).

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use vitrine_core::error::{CoreError, CoreResult};
use vitrine_core::ordering::{self, Placement};
use vitrine_core::types::{Scope, SlideId};
use vitrine_core::validate;
use vitrine_db::models::{CreateSlide, Slide, UpdateSlide};
use vitrine_db::store::{SlideStore, SlideWrite, StoreError};

pub struct OrderingEngine {
    store: Arc<dyn SlideStore>,
}

impl OrderingEngine {
    pub fn new(store: Arc<dyn SlideStore>) -> Self {
        Self { store }
    }

    /// All slides in the scope, ascending by position.
    ///
    /// `active_only` drops inactive slides from the result without
    /// renumbering: the public carousel shows the remaining slides in
    /// full-scope order, with hidden ones simply omitted.
    pub async fn list(&self, scope: &Scope, active_only: bool) -> CoreResult<Vec<Slide>> {
        let (slides, _) = self.store.snapshot(scope).await.map_err(store_err)?;
        if active_only {
            Ok(slides.into_iter().filter(|s| s.is_active).collect())
        } else {
            Ok(slides)
        }
    }

    /// Create a slide, appending when no position is requested.
    pub async fn create(&self, scope: &Scope, input: CreateSlide) -> CoreResult<Slide> {
        let title = validate::require_text("title", input.title.as_deref())?;
        let image_url = validate::require_text("image_url", input.image_url.as_deref())?;

        match self.create_once(scope, &title, &image_url, &input).await {
            Err(CoreError::Conflict(_)) => {
                tracing::warn!(scope = %scope, "Create lost a scope race, retrying from fresh snapshot");
                self.create_once(scope, &title, &image_url, &input).await
            }
            other => other,
        }
    }

    /// Update a slide's fields and, when `position` is given, its spot in
    /// the sequence.
    pub async fn update(&self, scope: &Scope, id: SlideId, input: UpdateSlide) -> CoreResult<Slide> {
        if input.title.is_some() {
            validate::require_text("title", input.title.as_deref())?;
        }
        if input.image_url.is_some() {
            validate::require_text("image_url", input.image_url.as_deref())?;
        }

        match self.update_once(scope, id, &input).await {
            Err(CoreError::Conflict(_)) => {
                tracing::warn!(scope = %scope, %id, "Update lost a scope race, retrying from fresh snapshot");
                self.update_once(scope, id, &input).await
            }
            other => other,
        }
    }

    /// Delete a slide and compact the positions above it.
    ///
    /// Returns the removed slide for the confirmation payload.
    pub async fn delete(&self, scope: &Scope, id: SlideId) -> CoreResult<Slide> {
        match self.delete_once(scope, id).await {
            Err(CoreError::Conflict(_)) => {
                tracing::warn!(scope = %scope, %id, "Delete lost a scope race, retrying from fresh snapshot");
                self.delete_once(scope, id).await
            }
            other => other,
        }
    }

    // -----------------------------------------------------------------------
    // Single attempts (snapshot -> plan -> commit)
    // -----------------------------------------------------------------------

    async fn create_once(
        &self,
        scope: &Scope,
        title: &str,
        image_url: &str,
        input: &CreateSlide,
    ) -> CoreResult<Slide> {
        let (slides, version) = self.store.snapshot(scope).await.map_err(store_err)?;
        let placements: Vec<Placement> = slides.iter().map(Slide::placement).collect();
        let plan = ordering::plan_insert(&placements, input.position);

        let now = Utc::now();
        let slide = Slide {
            id: Uuid::now_v7(),
            site: scope.site.clone(),
            language: scope.language.clone(),
            title: title.to_string(),
            subtitle: validate::normalize_optional(input.subtitle.clone()),
            description: validate::normalize_optional(input.description.clone()),
            link_url: validate::normalize_optional(input.link_url.clone()),
            button_text: validate::normalize_optional(input.button_text.clone()),
            image_url: image_url.to_string(),
            position: plan.position,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let mut writes = shift_writes(&slides, &plan.shifts);
        writes.push(SlideWrite::Put(slide.clone()));
        self.store
            .commit(scope, version, writes)
            .await
            .map_err(store_err)?;

        tracing::info!(
            scope = %scope,
            id = %slide.id,
            position = slide.position,
            shifted = plan.shifts.len(),
            "Created slide"
        );
        Ok(slide)
    }

    async fn update_once(
        &self,
        scope: &Scope,
        id: SlideId,
        input: &UpdateSlide,
    ) -> CoreResult<Slide> {
        let (slides, version) = self.store.snapshot(scope).await.map_err(store_err)?;
        let mut slide = slides
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Slide", id })?;

        if let Some(title) = &input.title {
            slide.title = title.clone();
        }
        if let Some(image_url) = &input.image_url {
            slide.image_url = image_url.clone();
        }
        if input.subtitle.is_some() {
            slide.subtitle = validate::normalize_optional(input.subtitle.clone());
        }
        if input.description.is_some() {
            slide.description = validate::normalize_optional(input.description.clone());
        }
        if input.link_url.is_some() {
            slide.link_url = validate::normalize_optional(input.link_url.clone());
        }
        if input.button_text.is_some() {
            slide.button_text = validate::normalize_optional(input.button_text.clone());
        }
        if let Some(is_active) = input.is_active {
            slide.is_active = is_active;
        }

        let mut writes = Vec::new();
        let mut shifted = 0;
        if let Some(requested) = input.position {
            let placements: Vec<Placement> = slides.iter().map(Slide::placement).collect();
            if let Some(plan) = ordering::plan_move(&placements, id, requested) {
                writes = shift_writes(&slides, &plan.shifts);
                shifted = plan.shifts.len();
                slide.position = plan.position;
            }
        }

        // The target slide gets a fresh updated_at; shifted neighbours keep
        // theirs since a position shift is bookkeeping, not a content edit.
        slide.updated_at = Utc::now();
        writes.push(SlideWrite::Put(slide.clone()));
        self.store
            .commit(scope, version, writes)
            .await
            .map_err(store_err)?;

        tracing::info!(
            scope = %scope,
            id = %slide.id,
            position = slide.position,
            shifted,
            "Updated slide"
        );
        Ok(slide)
    }

    async fn delete_once(&self, scope: &Scope, id: SlideId) -> CoreResult<Slide> {
        let (slides, version) = self.store.snapshot(scope).await.map_err(store_err)?;
        let slide = slides
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Slide", id })?;

        let placements: Vec<Placement> = slides.iter().map(Slide::placement).collect();
        let plan = ordering::plan_remove(&placements, id)
            .ok_or(CoreError::NotFound { entity: "Slide", id })?;

        let mut writes = shift_writes(&slides, &plan.shifts);
        writes.push(SlideWrite::Delete(id));
        self.store
            .commit(scope, version, writes)
            .await
            .map_err(store_err)?;

        tracing::info!(
            scope = %scope,
            id = %slide.id,
            position = plan.position,
            compacted = plan.shifts.len(),
            "Deleted slide"
        );
        Ok(slide)
    }
}

/// Turn a shift plan into store writes, carrying each shifted slide's full
/// row with only its position changed.
fn shift_writes(slides: &[Slide], shifts: &[Placement]) -> Vec<SlideWrite> {
    shifts
        .iter()
        .filter_map(|shift| {
            slides.iter().find(|s| s.id == shift.id).map(|s| {
                let mut moved = s.clone();
                moved.position = shift.position;
                SlideWrite::Put(moved)
            })
        })
        .collect()
}

fn store_err(err: StoreError) -> CoreError {
    match err {
        StoreError::Conflict => CoreError::Conflict(
            "scope was modified concurrently, retry the operation".to_string(),
        ),
        StoreError::Backend(e) => CoreError::Storage(e.to_string()),
        StoreError::Unavailable(msg) => CoreError::Storage(msg),
    }
}
