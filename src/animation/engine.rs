use crate::animation::presets::{
    self, Granularity, TweenSchedule, build_schedule, cursor_position, sample_units,
};
use crate::config::model::{AnimationPreset, RenderConfig};
use crate::fonts::service::{FontMetrics, FontService, ResolvedFont};
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::layout::engine::{TextLayoutEngine, UnitLayout};
use crate::render::frame::AnimationFrame;
use crate::render::surface::{Paint, RenderSurface};
use crate::style::paint::{TextStyle, TextStyleManager, UnitDraw};

/// Laid-out input for one bake: final unit positions and text bounds.
struct LaidOutText {
    units: Vec<UnitLayout>,
    block: Rect,
}

/// Dispatches presets into staggered tween schedules and samples them at
/// fixed frame intervals, drawing through [`TextStyleManager`].
pub struct AnimationEngine {
    layout: TextLayoutEngine,
    styles: TextStyleManager,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine {
    /// Construct the engine.
    pub fn new() -> Self {
        Self {
            layout: TextLayoutEngine::new(),
            styles: TextStyleManager::new(),
        }
    }

    /// Bake the full frame sequence for `text` under `config`.
    ///
    /// The sequence length is `ceil(duration * fps)` and frame `i` carries
    /// timestamp `i / (count - 1) * duration` (0 for a single frame). Output
    /// is fully deterministic for equal `(text, config)` inputs.
    #[tracing::instrument(skip(self, fonts, surface, text, cfg, font))]
    pub(crate) fn generate_frames(
        &self,
        fonts: &mut FontService,
        surface: &mut dyn RenderSurface,
        text: &str,
        cfg: &RenderConfig,
        font: Option<&ResolvedFont>,
    ) -> KinetypeResult<Vec<AnimationFrame>> {
        let spec = cfg
            .animation
            .as_ref()
            .ok_or_else(|| KinetypeError::validation("render_animation requires config.animation"))?;

        let laid = self.lay_out(fonts, font, text, cfg, presets::granularity(spec.preset, spec.style));
        let style = self.styles.resolve(cfg, Some(laid.block))?;
        let schedule = build_schedule(spec.preset, laid.units, cfg, laid.block);

        let frame_count = cfg.frame_count();
        let mut frames = Vec::with_capacity(frame_count);
        for f in 0..frame_count {
            let (progress, timestamp) = if frame_count > 1 {
                let p = (f as f64) / ((frame_count - 1) as f64);
                (p, p * cfg.duration)
            } else {
                // A single-frame bake shows the completed layout at t = 0.
                (1.0, 0.0)
            };

            self.draw_frame(fonts, surface, cfg, font, &style, &schedule, timestamp, progress)?;
            frames.push(AnimationFrame {
                frame_number: f as u32,
                timestamp,
                width: surface.width(),
                height: surface.height(),
                pixels: surface.read_pixels()?,
            });
        }
        Ok(frames)
    }

    /// Draw the static final layout (no animation sampling).
    pub(crate) fn draw_static(
        &self,
        fonts: &mut FontService,
        surface: &mut dyn RenderSurface,
        text: &str,
        cfg: &RenderConfig,
        font: Option<&ResolvedFont>,
    ) -> KinetypeResult<()> {
        let laid = self.lay_out(fonts, font, text, cfg, Granularity::Block);
        let style = self.styles.resolve(cfg, Some(laid.block))?;
        let base = Affine::scale(cfg.pixel_ratio);

        self.clear_with_backdrop(surface, cfg, base)?;
        for unit in &laid.units {
            self.styles.draw_unit(
                surface,
                fonts,
                font,
                cfg,
                &style,
                &UnitDraw {
                    text: &unit.text,
                    x: unit.x,
                    y: unit.y,
                    opacity: 1.0,
                    scale: 1.0,
                    rotation: 0.0,
                    width: unit.width,
                },
                base,
            )?;
        }
        Ok(())
    }

    fn lay_out(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        text: &str,
        cfg: &RenderConfig,
        granularity: Granularity,
    ) -> LaidOutText {
        let metrics = font
            .map(|f| f.metrics)
            .unwrap_or_else(|| FontMetrics::heuristic(cfg.font_size));
        let transformed = cfg.transform_text(text);
        let max_width = f64::from(cfg.width);

        let wrapped = self.layout.process_text_content(
            fonts,
            font,
            &transformed,
            max_width,
            cfg.font_size,
            cfg.letter_spacing,
        );
        let lines = self
            .layout
            .multiline_layout(fonts, font, &wrapped, cfg, &metrics);
        let block = self.layout.text_bounds(&lines, &metrics);

        let units = match granularity {
            Granularity::Character => lines
                .iter()
                .flat_map(|line| {
                    self.layout
                        .character_layout(fonts, font, line, cfg.font_size, cfg.letter_spacing)
                })
                .collect(),
            Granularity::Word => lines
                .iter()
                .flat_map(|line| {
                    self.layout
                        .word_layout(fonts, font, line, cfg.font_size, cfg.letter_spacing)
                })
                .collect(),
            Granularity::Block => lines
                .iter()
                .map(|line| UnitLayout {
                    text: line.text.clone(),
                    x: line.x,
                    y: line.y,
                    width: line.width,
                })
                .collect(),
        };

        LaidOutText { units, block }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_frame(
        &self,
        fonts: &mut FontService,
        surface: &mut dyn RenderSurface,
        cfg: &RenderConfig,
        font: Option<&ResolvedFont>,
        style: &TextStyle,
        schedule: &TweenSchedule,
        t: f64,
        progress: f64,
    ) -> KinetypeResult<()> {
        let base = Affine::scale(cfg.pixel_ratio);
        self.clear_with_backdrop(surface, cfg, base)?;

        for unit in sample_units(schedule, t, progress) {
            if unit.opacity <= 0.01 {
                continue;
            }
            self.styles.draw_unit(
                surface,
                fonts,
                font,
                cfg,
                style,
                &UnitDraw {
                    text: &unit.text,
                    x: unit.x,
                    y: unit.y,
                    opacity: unit.opacity as f32,
                    scale: unit.scale,
                    rotation: unit.rotation,
                    width: unit.width,
                },
                base,
            )?;
        }

        if schedule.preset == AnimationPreset::Typewriter
            && let Some((cx, cy)) = cursor_position(schedule, t, progress)
        {
            let metrics = font
                .map(|f| f.metrics)
                .unwrap_or_else(|| FontMetrics::heuristic(cfg.font_size));
            let cursor = Rect::new(0.0, -metrics.ascent, (cfg.font_size * 0.08).max(1.0), 0.0);
            let tr = base * Affine::translate(Vec2::new(cx, cy));
            surface.draw_rect(cursor, tr, &style.fill, 1.0)?;
        }

        Ok(())
    }

    fn clear_with_backdrop(
        &self,
        surface: &mut dyn RenderSurface,
        cfg: &RenderConfig,
        base: Affine,
    ) -> KinetypeResult<()> {
        let background = cfg
            .background_color
            .as_deref()
            .map(|c| crate::config::color::parse_or_black(c).mul_alpha(cfg.opacity));

        match background {
            Some(bg) if cfg.border_radius > 0.0 => {
                surface.clear(None);
                let rect = Rect::new(0.0, 0.0, f64::from(cfg.width), f64::from(cfg.height));
                surface.draw_rounded_rect(rect, cfg.border_radius, base, &Paint::Solid(bg), 1.0)?;
            }
            other => surface.clear(other),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
