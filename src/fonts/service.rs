//! Caller-owned font registry and Parley-backed shaping service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::model::FontStyle;
use crate::foundation::error::{KinetypeError, KinetypeResult};

/// Heuristic advance used when glyph measurement is unavailable or invalid.
pub(crate) const FALLBACK_ADVANCE_EM: f64 = 0.6;

/// Brush type threaded through Parley layouts.
///
/// Paints are applied at draw time, so the brush carries no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush;

/// Font metrics resolved at a specific size, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from baseline to the top of the tallest glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of the deepest glyphs.
    pub descent: f64,
    /// Natural line height of the face at this size.
    pub line_height: f64,
}

impl FontMetrics {
    /// Synthetic metrics used when no face is available.
    pub(crate) fn heuristic(size: f64) -> Self {
        Self {
            ascent: size * 0.8,
            descent: size * 0.2,
            line_height: size * 1.2,
        }
    }
}

/// A typeface handle resolved for one (family, weight, style, size) request.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    /// Canonical family name as registered.
    pub family: String,
    /// Metrics at the requested size.
    pub metrics: FontMetrics,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) size: f64,
    pub(crate) weight: u16,
    pub(crate) style: FontStyle,
}

/// A shaped run of glyphs with positions relative to a baseline-left origin.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedRun {
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    pub(crate) width: f64,
}

/// Caller-owned typeface registry and shaping service.
///
/// Fonts are supplied as raw bytes by the host (font discovery is out of
/// scope); the service shapes text through Parley and hands positioned glyph
/// runs to the rasterization backend. The lifecycle is explicit: construct,
/// register faces, render, [`FontService::dispose`].
pub struct FontService {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    bytes_by_family: HashMap<String, Arc<Vec<u8>>>,
    order: Vec<String>,
    ready: bool,
}

impl Default for FontService {
    fn default() -> Self {
        Self::new()
    }
}

impl FontService {
    /// Construct a ready service with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            bytes_by_family: HashMap::new(),
            order: Vec::new(),
            ready: true,
        }
    }

    /// Whether the service can shape and resolve fonts.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Release registered faces and mark the service unusable.
    pub fn dispose(&mut self) {
        self.bytes_by_family.clear();
        self.order.clear();
        self.ready = false;
    }

    /// Register a typeface from raw bytes, returning its canonical family name.
    ///
    /// An optional `family_hint` adds a lookup alias for hosts that name faces
    /// differently from the font's own family record.
    pub fn register(&mut self, bytes: &[u8], family_hint: Option<&str>) -> KinetypeResult<String> {
        if !self.ready {
            return Err(KinetypeError::initialization("font service is disposed"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            KinetypeError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| KinetypeError::validation("registered font family has no name"))?
            .to_string();

        let shared = Arc::new(bytes.to_vec());
        self.bytes_by_family
            .insert(family_name.to_lowercase(), shared.clone());
        if let Some(hint) = family_hint {
            self.bytes_by_family.insert(hint.to_lowercase(), shared);
        }
        self.order.push(family_name.clone());
        Ok(family_name)
    }

    /// First registered family, used by the empty-raster retry chain.
    pub fn fallback_family(&self) -> Option<String> {
        self.order.first().cloned()
    }

    /// Resolve a typeface for a family list like `"Inter, sans-serif"`.
    ///
    /// Returns `None` when no listed family is registered; layout then runs on
    /// heuristic metrics and rendering falls back to the simple raster path.
    pub fn resolve(
        &mut self,
        family: &str,
        weight: u16,
        style: FontStyle,
        size: f64,
    ) -> Option<ResolvedFont> {
        let (name, bytes) = family.split(',').find_map(|candidate| {
            let key = candidate.trim().trim_matches(['"', '\'']).to_lowercase();
            let bytes = self.bytes_by_family.get(&key)?.clone();
            Some((key, bytes))
        })?;

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from((*bytes).clone()), 0);
        let mut resolved = ResolvedFont {
            family: name,
            metrics: FontMetrics::heuristic(size),
            font,
            size,
            weight,
            style,
        };
        if let Some(m) = self.probe_metrics(&resolved) {
            resolved.metrics = m;
        }
        Some(resolved)
    }

    /// Shape a single-line run at the font's size.
    pub(crate) fn shape(&mut self, text: &str, font: &ResolvedFont) -> ShapedRun {
        if text.is_empty() {
            return ShapedRun::default();
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(match font.style {
            FontStyle::Normal => parley::style::FontStyle::Normal,
            FontStyle::Italic => parley::style::FontStyle::Italic,
            FontStyle::Oblique => parley::style::FontStyle::Oblique(None),
        }));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            let baseline = f64::from(line.metrics().baseline);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline as f32,
                }));
            }
        }

        ShapedRun {
            glyphs,
            width: f64::from(layout.full_width()),
        }
    }

    /// Shape one draw unit, inserting `letter_spacing` between characters.
    pub(crate) fn shape_unit(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        letter_spacing: f64,
    ) -> ShapedRun {
        if letter_spacing == 0.0 || text.chars().count() <= 1 {
            return self.shape(text, font);
        }

        let mut glyphs = Vec::new();
        let mut pen_x = 0.0f64;
        let mut buf = [0u8; 4];
        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                pen_x += letter_spacing;
            }
            let run = self.shape(ch.encode_utf8(&mut buf), font);
            glyphs.extend(run.glyphs.into_iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x + pen_x as f32,
                y: g.y,
            }));
            pen_x += run.width;
        }

        ShapedRun {
            glyphs,
            width: pen_x,
        }
    }

    /// Measure the advance of `text`.
    ///
    /// With a resolved font and zero letter spacing this is a single batch
    /// measurement; with letter spacing it sums per-character advances plus
    /// `(n - 1) * letter_spacing`. A zero/invalid measurement of non-blank
    /// text falls back to the heuristic advance so layout always completes.
    pub(crate) fn measure(
        &mut self,
        text: &str,
        font: Option<&ResolvedFont>,
        size: f64,
        letter_spacing: f64,
    ) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let n = text.chars().count();

        let measured = match font {
            Some(f) if letter_spacing != 0.0 => {
                let sum: f64 = self.char_advances(text, f).iter().sum();
                sum + (n.saturating_sub(1) as f64) * letter_spacing
            }
            Some(f) => self.shape(text, f).width,
            None => 0.0,
        };

        if measured > 0.0 && measured.is_finite() {
            return measured;
        }
        if text.trim().is_empty() {
            return measured.max(0.0);
        }
        (n as f64) * size * FALLBACK_ADVANCE_EM
    }

    /// Per-character advances for unit layout.
    pub(crate) fn char_advances(&mut self, text: &str, font: &ResolvedFont) -> Vec<f64> {
        let mut buf = [0u8; 4];
        text.chars()
            .map(|ch| {
                let w = self.shape(ch.encode_utf8(&mut buf), font).width;
                if w > 0.0 && w.is_finite() {
                    w
                } else if ch.is_whitespace() {
                    w.max(0.0)
                } else {
                    font.size * FALLBACK_ADVANCE_EM
                }
            })
            .collect()
    }

    fn probe_metrics(&mut self, font: &ResolvedFont) -> Option<FontMetrics> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, "Mg", 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));

        let mut layout: parley::Layout<TextBrush> = builder.build("Mg");
        layout.break_all_lines(None);
        let line = layout.lines().next()?;
        let m = line.metrics();
        let ascent = f64::from(m.ascent);
        let descent = f64::from(m.descent);
        if !(ascent.is_finite() && descent.is_finite()) || ascent <= 0.0 {
            return None;
        }
        Some(FontMetrics {
            ascent,
            descent,
            line_height: ascent + descent + f64::from(m.leading),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/service.rs"]
mod tests;
