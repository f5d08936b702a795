//! Top-level renderer tying shaping, styling, animation, and rasterization together.

use std::sync::Arc;
use std::time::Instant;

use crate::animation::engine::AnimationEngine;
use crate::cache::frames::{CacheKey, FrameCache, cache_key};
use crate::config::model::RenderConfig;
use crate::fonts::service::{FontService, ResolvedFont};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::render::frame::{AnimationFrame, RenderData, RenderMetadata, RenderResult};
use crate::render::surface::{CpuSurface, RenderSurface};

/// Font choice for one pass of the empty-raster retry chain.
enum FontAttempt {
    Primary,
    Fallback,
    /// Simple raster path: unit-extent boxes, no glyphs.
    Boxes,
}

/// Top-level facade: static renders, animation bakes, and the frame cache.
///
/// Owns the long-lived font service and cache; surfaces and resolved
/// typefaces are scoped to a single call and released on every exit path.
pub struct Renderer {
    fonts: FontService,
    cache: FrameCache,
    engine: AnimationEngine,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Construct a renderer with a ready font service and default cache.
    pub fn new() -> Self {
        Self {
            fonts: FontService::new(),
            cache: FrameCache::new(),
            engine: AnimationEngine::new(),
        }
    }

    /// Register a typeface for later resolution by family name.
    pub fn register_font(&mut self, bytes: &[u8], family_hint: Option<&str>) -> KinetypeResult<String> {
        self.fonts.register(bytes, family_hint)
    }

    /// Borrow the font service.
    pub fn fonts(&self) -> &FontService {
        &self.fonts
    }

    /// Mutably borrow the font service.
    pub fn fonts_mut(&mut self) -> &mut FontService {
        &mut self.fonts
    }

    /// Borrow the frame cache.
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Release fonts and cached frames; subsequent renders fail with an
    /// initialization error.
    pub fn dispose(&mut self) {
        self.fonts.dispose();
        self.cache.clear();
    }

    fn ensure_ready(&self) -> KinetypeResult<()> {
        if !self.fonts.is_ready() {
            return Err(KinetypeError::initialization(
                "font service disposed before render",
            ));
        }
        Ok(())
    }

    fn resolve_attempt(&mut self, cfg: &RenderConfig, attempt: &FontAttempt) -> Option<ResolvedFont> {
        match attempt {
            // An unknown family degrades to the first registered family up
            // front; the separate Fallback attempt only matters when the
            // resolved face produced an empty raster.
            FontAttempt::Primary => self
                .fonts
                .resolve(
                    &cfg.font_family,
                    cfg.font_weight,
                    cfg.font_style,
                    cfg.font_size,
                )
                .or_else(|| self.resolve_fallback(cfg)),
            FontAttempt::Fallback => self.resolve_fallback(cfg),
            FontAttempt::Boxes => None,
        }
    }

    fn resolve_fallback(&mut self, cfg: &RenderConfig) -> Option<ResolvedFont> {
        let family = self.fonts.fallback_family()?;
        self.fonts
            .resolve(&family, cfg.font_weight, cfg.font_style, cfg.font_size)
    }

    /// Render a static styled-text image.
    ///
    /// A fully transparent first pass triggers one retry with the fallback
    /// font family, then the simple raster path, before giving up.
    #[tracing::instrument(skip(self, text, config))]
    pub fn render(&mut self, text: &str, config: &RenderConfig) -> KinetypeResult<RenderResult> {
        config.validate()?;
        self.ensure_ready()?;
        let started = Instant::now();

        let canvas = config.physical_canvas();
        let mut surface = CpuSurface::new(canvas.width, canvas.height)?;
        let mut pixels = Vec::new();
        for attempt in [FontAttempt::Primary, FontAttempt::Fallback, FontAttempt::Boxes] {
            let font = self.resolve_attempt(config, &attempt);
            if matches!(attempt, FontAttempt::Fallback) && font.is_none() {
                continue;
            }
            self.engine
                .draw_static(&mut self.fonts, &mut surface, text, config, font.as_ref())?;
            pixels = surface.read_pixels()?;
            if !is_blank(&pixels) || text.trim().is_empty() {
                break;
            }
            tracing::warn!("static render produced an empty raster; retrying");
        }

        Ok(RenderResult {
            metadata: RenderMetadata {
                width: config.physical_width(),
                height: config.physical_height(),
                generation_time_ms: Some(elapsed_ms(started)),
                ..RenderMetadata::default()
            },
            data: RenderData::Image(pixels),
        })
    }

    /// Bake (or fetch from cache) the animation frame sequence for `text`.
    ///
    /// Results are keyed by the semantic content digest; repeated calls with
    /// equal `(text, config)` return the cached sequence.
    #[tracing::instrument(skip(self, text, config))]
    pub fn render_animation(
        &mut self,
        text: &str,
        config: &RenderConfig,
    ) -> KinetypeResult<RenderResult> {
        config.validate()?;
        self.ensure_ready()?;
        let started = Instant::now();

        let key = cache_key(text, config);
        if let Some(frames) = self.cache.get(&key) {
            tracing::debug!(?key, "animation cache hit");
            return Ok(self.animation_result(config, frames, started));
        }

        let frames = self.bake(text, config, key)?;
        Ok(self.animation_result(config, frames, started))
    }

    fn bake(
        &mut self,
        text: &str,
        config: &RenderConfig,
        key: CacheKey,
    ) -> KinetypeResult<Arc<Vec<AnimationFrame>>> {
        let canvas = config.physical_canvas();
        let mut surface = CpuSurface::new(canvas.width, canvas.height)?;

        let mut frames = Vec::new();
        for attempt in [FontAttempt::Primary, FontAttempt::Fallback, FontAttempt::Boxes] {
            let font = self.resolve_attempt(config, &attempt);
            if matches!(attempt, FontAttempt::Fallback) && font.is_none() {
                continue;
            }
            frames = self.engine.generate_frames(
                &mut self.fonts,
                &mut surface,
                text,
                config,
                font.as_ref(),
            )?;
            // The last frame always equals the static final layout, so it is
            // the cheapest whole-sequence emptiness probe.
            let blank = frames.last().is_some_and(|f| is_blank(&f.pixels));
            if !blank || text.trim().is_empty() {
                break;
            }
            tracing::warn!("animation bake produced an empty raster; retrying");
        }

        let frames = Arc::new(frames);
        self.cache.set(key, frames.clone());
        Ok(frames)
    }

    fn animation_result(
        &self,
        config: &RenderConfig,
        frames: Arc<Vec<AnimationFrame>>,
        started: Instant,
    ) -> RenderResult {
        RenderResult {
            metadata: RenderMetadata {
                width: config.physical_width(),
                height: config.physical_height(),
                duration: Some(config.duration),
                frame_count: Some(frames.len()),
                fps: Some(config.fps),
                generation_time_ms: Some(elapsed_ms(started)),
            },
            data: RenderData::Animation(frames),
        }
    }
}

/// Alpha-channel content check: true when every pixel is fully transparent.
fn is_blank(premul_rgba: &[u8]) -> bool {
    premul_rgba.chunks_exact(4).all(|px| px[3] == 0)
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
