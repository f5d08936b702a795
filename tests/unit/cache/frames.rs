use super::*;
use crate::config::model::{AnimationPreset, AnimationSpec, RenderConfig};
use crate::render::frame::AnimationFrame;
use std::sync::Arc;

fn frames_of_bytes(n: usize) -> Arc<Vec<AnimationFrame>> {
    Arc::new(vec![AnimationFrame {
        frame_number: 0,
        timestamp: 0.0,
        width: 1,
        height: 1,
        pixels: vec![0xAB; n],
    }])
}

fn key(text: &str) -> CacheKey {
    cache_key(text, &RenderConfig::default())
}

#[test]
fn equal_semantic_inputs_map_to_equal_keys() {
    let cfg = RenderConfig {
        animation: Some(AnimationSpec {
            preset: AnimationPreset::Ascend,
            speed: 1.0,
            style: None,
            direction: None,
        }),
        ..RenderConfig::default()
    };
    assert_eq!(cache_key("Hello", &cfg), cache_key("Hello", &cfg.clone()));
}

#[test]
fn key_changes_with_text_and_render_affecting_fields() {
    let base = RenderConfig::default();
    let k = cache_key("Hello", &base);

    assert_ne!(k, cache_key("Hello!", &base));
    assert_ne!(
        k,
        cache_key(
            "Hello",
            &RenderConfig {
                width: base.width + 1,
                ..base.clone()
            }
        )
    );
    assert_ne!(
        k,
        cache_key(
            "Hello",
            &RenderConfig {
                font_size: 99.0,
                ..base.clone()
            }
        )
    );
    assert_ne!(
        k,
        cache_key(
            "Hello",
            &RenderConfig {
                color: "#123456".to_owned(),
                ..base
            }
        )
    );
}

#[test]
fn round_trip_returns_the_same_frames_and_counts_a_hit() {
    let cache = FrameCache::with_max_bytes(10_000);
    let frames = frames_of_bytes(100);
    let k = key("a");

    cache.set(k, frames.clone());
    let got = cache.get(&k).expect("entry present");
    assert!(Arc::ptr_eq(&got, &frames));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.size_bytes, 100);
    assert_eq!(stats.hit_rate, 100.0);
}

#[test]
fn miss_increments_the_miss_counter() {
    let cache = FrameCache::with_max_bytes(10_000);
    assert!(cache.get(&key("nope")).is_none());
    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hit_rate, 0.0);
}

#[test]
fn third_insert_evicts_least_recently_touched() {
    let cache = FrameCache::with_max_bytes(1000);
    let (ka, kb, kc) = (key("a"), key("b"), key("c"));

    cache.set(ka, frames_of_bytes(400));
    cache.set(kb, frames_of_bytes(400));
    cache.set(kc, frames_of_bytes(400));

    let stats = cache.stats();
    assert!(stats.size_bytes <= 1000);
    assert_eq!(stats.size_bytes, 800);
    assert!(cache.get(&ka).is_none(), "oldest entry must be evicted");
    assert!(cache.get(&kb).is_some());
    assert!(cache.get(&kc).is_some());
}

#[test]
fn get_refreshes_recency_before_eviction() {
    let cache = FrameCache::with_max_bytes(1000);
    let (ka, kb, kc) = (key("a"), key("b"), key("c"));

    cache.set(ka, frames_of_bytes(400));
    cache.set(kb, frames_of_bytes(400));
    // Touch `a` so `b` becomes the eviction candidate.
    assert!(cache.get(&ka).is_some());
    cache.set(kc, frames_of_bytes(400));

    assert!(cache.get(&ka).is_some());
    assert!(cache.get(&kb).is_none());
}

#[test]
fn replacing_an_entry_reclaims_its_bytes() {
    let cache = FrameCache::with_max_bytes(1000);
    let k = key("a");
    cache.set(k, frames_of_bytes(400));
    cache.set(k, frames_of_bytes(200));
    assert_eq!(cache.stats().size_bytes, 200);
}

#[test]
fn shrinking_the_budget_evicts_immediately() {
    let cache = FrameCache::with_max_bytes(1000);
    cache.set(key("a"), frames_of_bytes(400));
    cache.set(key("b"), frames_of_bytes(400));
    assert_eq!(cache.stats().size_bytes, 800);

    cache.set_max_size(500);
    let stats = cache.stats();
    assert!(stats.size_bytes <= 500);
    assert_eq!(stats.max_bytes, 500);
}

#[test]
fn oversized_sequences_are_not_cached() {
    let cache = FrameCache::with_max_bytes(100);
    let k = key("big");
    cache.set(k, frames_of_bytes(1000));
    assert_eq!(cache.stats().size_bytes, 0);
    assert!(cache.get(&k).is_none());
}

#[test]
fn clear_resets_entries_and_counters() {
    let cache = FrameCache::with_max_bytes(1000);
    let k = key("a");
    cache.set(k, frames_of_bytes(100));
    let _ = cache.get(&k);
    let _ = cache.get(&key("missing"));

    cache.clear();
    let stats = cache.stats();
    assert_eq!(stats.size_bytes, 0);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert!(cache.get(&k).is_none());
}
