use crate::config::model::{RenderConfig, TextAlign, TextBaseline};
use crate::fonts::service::{FALLBACK_ADVANCE_EM, FontMetrics, FontService, ResolvedFont};
use crate::foundation::core::Rect;

/// One wrapped output line positioned in the container.
///
/// `y` is the baseline glyphs are drawn on.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Line text.
    pub text: String,
    /// Measured advance of the line.
    pub width: f64,
    /// Left edge.
    pub x: f64,
    /// Baseline y-coordinate.
    pub y: f64,
}

/// One animatable unit (character or word) at its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitLayout {
    /// Unit text.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Baseline y-coordinate.
    pub y: f64,
    /// Unit advance including configured spacing.
    pub width: f64,
}

/// Greedy word-wrapping and multi-line placement.
///
/// All measurement goes through [`FontService`] so the heuristic advance
/// fallback applies uniformly; an unresolvable font never prevents layout.
pub struct TextLayoutEngine;

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct the engine.
    pub fn new() -> Self {
        Self
    }

    /// Measure `text` honoring letter spacing (see [`FontService::measure`]).
    pub fn measure(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        text: &str,
        size: f64,
        letter_spacing: f64,
    ) -> f64 {
        fonts.measure(text, font, size, letter_spacing)
    }

    /// Whether `text` needs wrapping at `max_width`.
    pub fn should_wrap(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        text: &str,
        max_width: f64,
        size: f64,
        letter_spacing: f64,
    ) -> bool {
        text.contains('\n') || self.measure(fonts, font, text, size, letter_spacing) > max_width
    }

    /// Greedy word-wrap of a single paragraph.
    ///
    /// Accumulates words into a candidate line and flushes when adding the
    /// next word would exceed `max_width` and the candidate is non-empty.
    /// Always returns at least one line; an overlong single word is kept
    /// whole.
    pub fn wrap_text(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        text: &str,
        max_width: f64,
        size: f64,
        letter_spacing: f64,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty()
                && self.measure(fonts, font, &candidate, size, letter_spacing) > max_width
            {
                lines.push(std::mem::take(&mut current));
                current = word.to_owned();
            } else {
                current = candidate;
            }
        }
        lines.push(current);
        lines
    }

    /// Split on explicit newlines, then wrap each paragraph independently.
    ///
    /// Blank paragraphs are preserved as empty lines; paragraph order is kept.
    pub fn process_text_content(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        text: &str,
        max_width: f64,
        size: f64,
        letter_spacing: f64,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            if paragraph.trim().is_empty() {
                lines.push(String::new());
            } else {
                lines.extend(self.wrap_text(fonts, font, paragraph, max_width, size, letter_spacing));
            }
        }
        lines
    }

    /// Position wrapped lines inside the container per alignment and baseline.
    pub fn multiline_layout(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        lines: &[String],
        cfg: &RenderConfig,
        metrics: &FontMetrics,
    ) -> Vec<TextLine> {
        let container_w = f64::from(cfg.width);
        let container_h = f64::from(cfg.height);
        let line_height = cfg.font_size * cfg.line_height;
        let n = lines.len();

        let first_baseline = match cfg.text_baseline {
            TextBaseline::Top => metrics.ascent,
            TextBaseline::Middle => {
                let block_h = (n as f64) * line_height;
                (container_h - block_h) / 2.0 + metrics.ascent
            }
            TextBaseline::Bottom => {
                container_h - metrics.descent - ((n.saturating_sub(1)) as f64) * line_height
            }
        };

        lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let width = self.measure(fonts, font, text, cfg.font_size, cfg.letter_spacing);
                let x = match cfg.text_align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => (container_w - width) / 2.0,
                    TextAlign::Right => container_w - width,
                };
                TextLine {
                    text: text.clone(),
                    width,
                    x,
                    y: first_baseline + (i as f64) * line_height,
                }
            })
            .collect()
    }

    /// Place each character of a line left-to-right from the line origin.
    ///
    /// Unit width is the measured advance plus the configured letter spacing.
    pub fn character_layout(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        line: &TextLine,
        size: f64,
        letter_spacing: f64,
    ) -> Vec<UnitLayout> {
        let advances: Vec<f64> = match font {
            Some(f) => fonts.char_advances(&line.text, f),
            None => line
                .text
                .chars()
                .map(|_| size * FALLBACK_ADVANCE_EM)
                .collect(),
        };

        let mut units = Vec::with_capacity(advances.len());
        let mut x = line.x;
        for (ch, advance) in line.text.chars().zip(advances) {
            let width = advance + letter_spacing;
            units.push(UnitLayout {
                text: ch.to_string(),
                x,
                y: line.y,
                width,
            });
            x += width;
        }
        units
    }

    /// Place each word of a line left-to-right with measured space advances.
    pub fn word_layout(
        &self,
        fonts: &mut FontService,
        font: Option<&ResolvedFont>,
        line: &TextLine,
        size: f64,
        letter_spacing: f64,
    ) -> Vec<UnitLayout> {
        let mut space_w = self.measure(fonts, font, " ", size, 0.0);
        if space_w <= 0.0 {
            space_w = size * FALLBACK_ADVANCE_EM;
        }

        let mut units = Vec::new();
        let mut x = line.x;
        for word in line.text.split_whitespace() {
            let width = self.measure(fonts, font, word, size, letter_spacing);
            units.push(UnitLayout {
                text: word.to_owned(),
                x,
                y: line.y,
                width,
            });
            x += width + space_w;
        }
        units
    }

    /// Aggregate bounding box over a laid-out line set.
    pub fn text_bounds(&self, lines: &[TextLine], metrics: &FontMetrics) -> Rect {
        let mut x0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y0 = f64::INFINITY;
        let mut y1 = f64::NEG_INFINITY;

        for line in lines {
            x0 = x0.min(line.x);
            x1 = x1.max(line.x + line.width);
            y0 = y0.min(line.y - metrics.ascent);
            y1 = y1.max(line.y + metrics.descent);
        }

        if lines.is_empty() || x0 > x1 {
            return Rect::ZERO;
        }
        Rect::new(x0, y0, x1, y1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
