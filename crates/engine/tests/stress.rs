//! Concurrency stress test: racing mutations on one scope must serialize
//! through the store's version check so the gap-free position invariant
//! holds whatever the interleaving.
//!
//! Callers retry on 409-style conflicts the way an admin client would. A
//! conflict means some other task committed, so the system as a whole makes
//! progress and the loops terminate.

use std::sync::Arc;

use vitrine_core::error::CoreError;
use vitrine_core::ordering::{is_gap_free, Placement};
use vitrine_core::types::Scope;
use vitrine_db::models::{CreateSlide, Slide, UpdateSlide};
use vitrine_db::MemoryStore;
use vitrine_engine::OrderingEngine;

fn payload(title: String) -> CreateSlide {
    CreateSlide {
        title: Some(title),
        image_url: Some("/media/stress.jpg".into()),
        ..CreateSlide::default()
    }
}

async fn create_retrying(engine: &OrderingEngine, scope: &Scope, input: CreateSlide) -> Slide {
    loop {
        match engine.create(scope, input.clone()).await {
            Ok(slide) => return slide,
            Err(CoreError::Conflict(_)) => continue,
            Err(other) => panic!("unexpected engine error: {other}"),
        }
    }
}

async fn assert_invariant(engine: &OrderingEngine, scope: &Scope) {
    let slides = engine.list(scope, false).await.unwrap();
    let placements: Vec<Placement> = slides
        .iter()
        .map(|s| Placement {
            id: s.id,
            position: s.position,
        })
        .collect();
    assert!(
        is_gap_free(&placements),
        "positions not gap-free: {:?}",
        slides.iter().map(|s| s.position).collect::<Vec<_>>()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_keep_sequence_gap_free() {
    let engine = Arc::new(OrderingEngine::new(Arc::new(MemoryStore::new())));
    let scope = Scope::new("main", "en");

    let mut handles = Vec::new();
    for task in 0..8 {
        let engine = Arc::clone(&engine);
        let scope = scope.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..20 {
                // Mix of appends and explicit front/middle inserts.
                let mut input = payload(format!("t{task}-{i}"));
                if i % 3 == 0 {
                    input.position = Some(1 + (i % 5));
                }
                create_retrying(&engine, &scope, input).await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let slides = engine.list(&scope, false).await.unwrap();
    assert_eq!(slides.len(), 160);
    assert_invariant(&engine, &scope).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_and_deletes_keep_sequence_gap_free() {
    let engine = Arc::new(OrderingEngine::new(Arc::new(MemoryStore::new())));
    let scope = Scope::new("main", "en");

    let mut handles = Vec::new();
    for task in 0..4 {
        // Each task inserts slides and immediately deletes every other one,
        // so creates and compactions race across tasks.
        let engine = Arc::clone(&engine);
        let scope = scope.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                let slide = create_retrying(&engine, &scope, payload(format!("t{task}-{i}"))).await;
                if i % 2 == 0 {
                    loop {
                        match engine.delete(&scope, slide.id).await {
                            Ok(_) => break,
                            Err(CoreError::Conflict(_)) => continue,
                            Err(other) => panic!("unexpected engine error: {other}"),
                        }
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let slides = engine.list(&scope, false).await.unwrap();
    // 25 created minus 13 deleted per task.
    assert_eq!(slides.len(), 4 * 12);
    assert_invariant(&engine, &scope).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_keep_sequence_gap_free() {
    let engine = Arc::new(OrderingEngine::new(Arc::new(MemoryStore::new())));
    let scope = Scope::new("main", "en");

    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(
            engine
                .create(&scope, payload(format!("s{i}")))
                .await
                .unwrap()
                .id,
        );
    }

    let mut handles = Vec::new();
    for (task, id) in ids.iter().enumerate() {
        let engine = Arc::clone(&engine);
        let scope = scope.clone();
        let id = *id;
        handles.push(tokio::spawn(async move {
            for round in 0..10 {
                let input = UpdateSlide {
                    position: Some(((task + round * 3) % 10 + 1) as i32),
                    ..UpdateSlide::default()
                };
                loop {
                    match engine.update(&scope, id, input.clone()).await {
                        Ok(_) => break,
                        Err(CoreError::Conflict(_)) => continue,
                        Err(other) => panic!("unexpected engine error: {other}"),
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let slides = engine.list(&scope, false).await.unwrap();
    assert_eq!(slides.len(), 10);
    assert_invariant(&engine, &scope).await;
}
