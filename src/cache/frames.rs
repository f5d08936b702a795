//! Byte-budgeted LRU cache of baked frame sequences.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::model::{AnimationStyle, Direction, RenderConfig};
use crate::render::frame::AnimationFrame;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x4f1bbcdcbfa53e0a;

/// Default byte budget: 100 MiB.
pub const DEFAULT_MAX_BYTES: usize = 100 * 1024 * 1024;

/// Stable content digest over the render-affecting subset of an animation
/// request. Equal semantic inputs always map to equal keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hi: u64,
    lo: u64,
}

/// Compute the cache key for `(text, config)`.
///
/// The digest covers text, animation preset, and the documented
/// render-affecting config subset: width, height, font size/family/weight,
/// color, duration, fps, direction, and animation granularity.
pub fn cache_key(text: &str, cfg: &RenderConfig) -> CacheKey {
    let mut h = StableHasher::new();
    h.write_str(text);

    let preset = cfg.animation.as_ref().map(|a| a.preset);
    h.write_u8(match preset {
        Some(p) => p as u8,
        None => u8::MAX,
    });

    h.write_u32(cfg.width);
    h.write_u32(cfg.height);
    h.write_f64(cfg.font_size);
    h.write_str(&cfg.font_family);
    h.write_u32(u32::from(cfg.font_weight));
    h.write_str(&cfg.color);
    h.write_f64(cfg.duration);
    h.write_f64(cfg.fps);

    let direction = cfg.animation.as_ref().and_then(|a| a.direction).or(cfg.direction);
    h.write_u8(match direction {
        Some(Direction::Up) => 0,
        Some(Direction::Down) => 1,
        Some(Direction::Left) => 2,
        Some(Direction::Right) => 3,
        None => u8::MAX,
    });
    h.write_u8(match cfg.animation.as_ref().and_then(|a| a.style) {
        Some(AnimationStyle::Character) => 0,
        Some(AnimationStyle::Word) => 1,
        None => u8::MAX,
    });

    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> CacheKey {
        let v = self.inner.digest128();
        CacheKey {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Cache observability counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CacheStats {
    /// Current cached bytes.
    pub size_bytes: usize,
    /// Configured byte budget.
    pub max_bytes: usize,
    /// Lookup hits.
    pub hits: u64,
    /// Lookup misses.
    pub misses: u64,
    /// `hits / (hits + misses) * 100`, or 0 with no lookups.
    pub hit_rate: f64,
}

struct CacheEntry {
    frames: Arc<Vec<AnimationFrame>>,
    size_bytes: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Recency order, least-recently-touched first.
    lru: VecDeque<CacheKey>,
    total_bytes: usize,
    max_bytes: usize,
    hits: u64,
    misses: u64,
}

impl CacheInner {
    fn touch(&mut self, key: CacheKey) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }

    fn evict_until_fits(&mut self, incoming: usize) {
        while self.total_bytes.saturating_add(incoming) > self.max_bytes {
            let Some(oldest) = self.lru.pop_front() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                self.total_bytes = self.total_bytes.saturating_sub(entry.size_bytes);
                tracing::debug!(?oldest, freed = entry.size_bytes, "evicted cache entry");
            }
        }
    }
}

/// Content-addressed, byte-budgeted LRU cache of baked frame sequences.
///
/// Internals are guarded by a single mutex so a multi-threaded host can share
/// one cache; the render path itself is synchronous per call.
pub struct FrameCache {
    inner: Mutex<CacheInner>,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCache {
    /// Create a cache with the default 100 MiB budget.
    pub fn new() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_BYTES)
    }

    /// Create a cache with an explicit byte budget.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                max_bytes,
                ..CacheInner::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a frame sequence, refreshing its recency on hit.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<AnimationFrame>>> {
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.get(key) {
            let frames = entry.frames.clone();
            inner.hits += 1;
            inner.touch(*key);
            Some(frames)
        } else {
            inner.misses += 1;
            None
        }
    }

    /// Insert a frame sequence, evicting least-recently-touched entries until
    /// the byte budget holds. The entry being inserted is never evicted; a
    /// sequence larger than the whole budget is not cached at all.
    pub fn set(&self, key: CacheKey, frames: Arc<Vec<AnimationFrame>>) {
        let size: usize = frames.iter().map(AnimationFrame::byte_len).sum();
        let mut inner = self.lock();

        if size > inner.max_bytes {
            tracing::debug!(size, max = inner.max_bytes, "sequence exceeds cache budget; not cached");
            return;
        }

        if let Some(old) = inner.entries.remove(&key) {
            inner.total_bytes = inner.total_bytes.saturating_sub(old.size_bytes);
            if let Some(pos) = inner.lru.iter().position(|k| *k == key) {
                inner.lru.remove(pos);
            }
        }

        inner.evict_until_fits(size);
        inner.entries.insert(
            key,
            CacheEntry {
                frames,
                size_bytes: size,
            },
        );
        inner.total_bytes = inner.total_bytes.saturating_add(size);
        inner.touch(key);
    }

    /// Change the byte budget, immediately evicting if usage now exceeds it.
    pub fn set_max_size(&self, max_bytes: usize) {
        let mut inner = self.lock();
        inner.max_bytes = max_bytes;
        inner.evict_until_fits(0);
    }

    /// Current size/budget/hit-rate counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let lookups = inner.hits + inner.misses;
        CacheStats {
            size_bytes: inner.total_bytes,
            max_bytes: inner.max_bytes,
            hits: inner.hits,
            misses: inner.misses,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                (inner.hits as f64) / (lookups as f64) * 100.0
            },
        }
    }

    /// Drop all entries and reset counters.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.lru.clear();
        inner.total_bytes = 0;
        inner.hits = 0;
        inner.misses = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/frames.rs"]
mod tests;
