//! Fill, stroke, shadow, and decoration painting for shaped glyphs.

use crate::config::color::parse_or_black;
use crate::config::model::{RenderConfig, TextDecoration};
use crate::fonts::service::{FontMetrics, FontService, ResolvedFont};
use crate::foundation::core::{Affine, BezPath, Rect, Rgba8, Vec2};
use crate::foundation::error::KinetypeResult;
use crate::render::surface::{GlyphPass, ImagePaint, Paint, RenderSurface};
use crate::style::gradient::GradientBuilder;

/// Stroke pass parameters with opacity folded into the color.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedStroke {
    pub(crate) color: Rgba8,
    pub(crate) width: f64,
}

/// Shadow pass parameters with opacity folded into the color.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedShadow {
    pub(crate) color: Rgba8,
    pub(crate) blur: f64,
    pub(crate) offset: Vec2,
}

/// Fully resolved style for one render call: fill paint plus optional
/// stroke/shadow passes and decoration.
#[derive(Clone)]
pub struct TextStyle {
    pub(crate) fill: Paint,
    pub(crate) stroke: Option<ResolvedStroke>,
    pub(crate) shadow: Option<ResolvedShadow>,
    pub(crate) decoration: TextDecoration,
}

/// One unit draw request: position, animated state, and measured extent.
#[derive(Clone, Debug)]
pub(crate) struct UnitDraw<'a> {
    pub(crate) text: &'a str,
    /// Baseline-left origin x.
    pub(crate) x: f64,
    /// Baseline y.
    pub(crate) y: f64,
    pub(crate) opacity: f32,
    pub(crate) scale: f64,
    /// Rotation in radians about the unit center.
    pub(crate) rotation: f64,
    pub(crate) width: f64,
}

/// Applies fill, stroke, shadow, and decoration around the glyph primitive.
pub struct TextStyleManager;

impl Default for TextStyleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStyleManager {
    /// Construct the manager.
    pub fn new() -> Self {
        Self
    }

    /// Resolve config styling into concrete paints.
    ///
    /// A gradient needs text `bounds` to compute shader geometry; without
    /// bounds (or without a gradient) the fill is a solid color. The global
    /// opacity multiplies every pass's alpha; per-unit animated opacity is
    /// applied separately at draw time.
    pub fn resolve(&self, cfg: &RenderConfig, bounds: Option<Rect>) -> KinetypeResult<TextStyle> {
        let global = cfg.opacity.clamp(0.0, 1.0);

        let fill = match (&cfg.gradient, bounds) {
            (Some(gradient), Some(b)) if b.width() > 0.0 && b.height() > 0.0 => {
                let shader = GradientBuilder::shader(gradient, b);
                let tile_w = (b.width().ceil() as u32).max(1);
                let tile_h = (b.height().ceil() as u32).max(1);
                let bytes = GradientBuilder::rasterize(&shader, b.origin(), tile_w, tile_h, global);
                Paint::Image(ImagePaint::from_premul_bytes(
                    &bytes,
                    tile_w,
                    tile_h,
                    b.origin(),
                )?)
            }
            _ => Paint::Solid(parse_or_black(&cfg.color).mul_alpha(global)),
        };

        let stroke = cfg
            .stroke
            .as_ref()
            .filter(|s| s.width > 0.0)
            .map(|s| ResolvedStroke {
                color: parse_or_black(&s.color).mul_alpha(s.opacity.clamp(0.0, 1.0) * global),
                width: s.width,
            });

        let shadow = cfg.shadow.as_ref().map(|s| ResolvedShadow {
            color: parse_or_black(&s.color).mul_alpha(s.opacity.clamp(0.0, 1.0) * global),
            blur: s.blur.max(0.0),
            offset: Vec2::new(s.offset_x, s.offset_y),
        });

        Ok(TextStyle {
            fill,
            stroke,
            shadow,
            decoration: cfg.text_decoration,
        })
    }

    /// Draw one unit: shadow pass, stroke pass, fill pass, then decoration.
    ///
    /// With no resolved font the unit is drawn through the simple raster path
    /// (rounded unit-extent boxes) so output is never silently empty.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn draw_unit(
        &self,
        surface: &mut dyn RenderSurface,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        cfg: &RenderConfig,
        style: &TextStyle,
        unit: &UnitDraw<'_>,
        base: Affine,
    ) -> KinetypeResult<()> {
        if unit.opacity <= 0.01 || unit.text.trim().is_empty() {
            return Ok(());
        }

        let metrics = font
            .map(|f| f.metrics)
            .unwrap_or_else(|| FontMetrics::heuristic(cfg.font_size));
        let pivot = Vec2::new(unit.width / 2.0, -metrics.ascent / 2.0);

        let Some(font) = font else {
            return self.draw_unit_boxes(surface, cfg, style, unit, &metrics, pivot, base);
        };

        let run = fonts.shape_unit(unit.text, font, cfg.letter_spacing);
        if run.glyphs.is_empty() {
            return self.draw_unit_boxes(surface, cfg, style, unit, &metrics, pivot, base);
        }

        let size = cfg.font_size as f32;
        if let Some(sh) = &style.shadow {
            let tr = unit_transform(base, unit, sh.offset, pivot);
            let pass = if sh.blur > 0.0 {
                GlyphPass::BlurredFill {
                    radius: sh.blur.ceil() as u32,
                    sigma: ((sh.blur / 2.0).max(0.5)) as f32,
                }
            } else {
                GlyphPass::Fill
            };
            surface.draw_glyph_run(
                &font.font,
                size,
                &run.glyphs,
                tr,
                &Paint::Solid(sh.color),
                unit.opacity,
                pass,
            )?;
        }

        let tr = unit_transform(base, unit, Vec2::ZERO, pivot);
        if let Some(st) = &style.stroke {
            surface.draw_glyph_run(
                &font.font,
                size,
                &run.glyphs,
                tr,
                &Paint::Solid(st.color),
                unit.opacity,
                GlyphPass::Stroke { width: st.width },
            )?;
        }
        surface.draw_glyph_run(
            &font.font,
            size,
            &run.glyphs,
            tr,
            &style.fill,
            unit.opacity,
            GlyphPass::Fill,
        )?;

        self.draw_decoration(surface, cfg, style, unit, tr)
    }

    /// Underline/strikethrough span over the measured unit width.
    fn draw_decoration(
        &self,
        surface: &mut dyn RenderSurface,
        cfg: &RenderConfig,
        style: &TextStyle,
        unit: &UnitDraw<'_>,
        transform: Affine,
    ) -> KinetypeResult<()> {
        let y_off = match style.decoration {
            TextDecoration::None => return Ok(()),
            TextDecoration::Underline => 0.15 * cfg.font_size,
            TextDecoration::LineThrough => -0.3 * cfg.font_size,
        };
        let thickness = (cfg.font_size * 0.07).max(1.0);
        let rect = Rect::new(
            0.0,
            y_off - thickness / 2.0,
            unit.width,
            y_off + thickness / 2.0,
        );
        let mut path = BezPath::new();
        for el in kurbo::Shape::path_elements(&rect, 0.1) {
            path.push(el);
        }
        surface.draw_path(&path, transform, &style.fill, unit.opacity)
    }

    /// Simple raster path: rounded boxes spanning each unit's extent.
    #[allow(clippy::too_many_arguments)]
    fn draw_unit_boxes(
        &self,
        surface: &mut dyn RenderSurface,
        cfg: &RenderConfig,
        style: &TextStyle,
        unit: &UnitDraw<'_>,
        metrics: &FontMetrics,
        pivot: Vec2,
        base: Affine,
    ) -> KinetypeResult<()> {
        let rect = Rect::new(0.0, -metrics.ascent, unit.width.max(1.0), 0.0);
        let radius = cfg.font_size * 0.15;

        if let Some(sh) = &style.shadow {
            let tr = unit_transform(base, unit, sh.offset, pivot);
            surface.draw_rounded_rect(rect, radius, tr, &Paint::Solid(sh.color), unit.opacity)?;
        }
        let tr = unit_transform(base, unit, Vec2::ZERO, pivot);
        surface.draw_rounded_rect(rect, radius, tr, &style.fill, unit.opacity)
    }
}

fn unit_transform(base: Affine, unit: &UnitDraw<'_>, extra: Vec2, pivot: Vec2) -> Affine {
    let place = Affine::translate(Vec2::new(unit.x + extra.x, unit.y + extra.y));
    let local = Affine::translate(pivot)
        * Affine::rotate(unit.rotation)
        * Affine::scale(unit.scale)
        * Affine::translate(-pivot);
    base * place * local
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
