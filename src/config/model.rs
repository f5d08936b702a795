//! Serializable render configuration model.

use crate::foundation::error::{KinetypeError, KinetypeResult};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of laid-out lines inside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Lines start at x = 0.
    Left,
    /// Lines are centered in the container width.
    #[default]
    Center,
    /// Lines end at the container's right edge.
    Right,
}

/// Vertical anchoring of the line block inside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// First line's ascent hangs from the top edge.
    Top,
    /// The line block is centered in the container height.
    #[default]
    Middle,
    /// Last line's descent is anchored to the bottom edge.
    Bottom,
}

/// Case transformation applied to the input text before layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// No transformation.
    #[default]
    None,
    /// Uppercase every character.
    Uppercase,
    /// Lowercase every character.
    Lowercase,
    /// Uppercase the first character of each word.
    Capitalize,
}

/// Line decoration drawn with the fill pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextDecoration {
    /// No decoration.
    #[default]
    None,
    /// Line under the text, offset below the baseline.
    Underline,
    /// Line through the text, offset above the baseline.
    #[serde(alias = "line-through")]
    LineThrough,
}

/// Font slant style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
    /// Obliqued (slanted) glyphs.
    Oblique,
}

/// Cardinal travel direction used by directional animation presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Units travel upward (or enter from the top for slide-in).
    Up,
    /// Units travel downward (or enter from the bottom for slide-in).
    Down,
    /// Units travel leftward (or enter from the left for slide-in).
    Left,
    /// Units travel rightward (or enter from the right for slide-in).
    Right,
}

/// Animation preset family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationPreset {
    /// Progressive reveal with a blinking trailing cursor.
    Typewriter,
    /// Per-character staggered settle from a perpendicular offset.
    MovingLetters,
    /// Per-word staggered fade and rise.
    Ascend,
    /// Staggered lateral/vertical shift into place.
    Shift,
    /// Whole-block fade with a slight scale-up.
    FadeIn,
    /// Whole-block slide from off-screen.
    SlideIn,
}

/// Animation unit granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStyle {
    /// Animate individual characters.
    Character,
    /// Animate whitespace-delimited words.
    Word,
}

/// Animation descriptor attached to a [`RenderConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Which preset to run.
    pub preset: AnimationPreset,
    /// Timeline speed multiplier; the tween schedule spans `duration / speed`.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Unit granularity override for presets that support both.
    #[serde(default)]
    pub style: Option<AnimationStyle>,
    /// Direction override for directional presets.
    #[serde(default)]
    pub direction: Option<Direction>,
}

fn default_speed() -> f64 {
    1.0
}

/// One gradient color stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStopSpec {
    /// Stop position; clamped into `[0, 1]` during normalization.
    pub offset: f64,
    /// CSS color string.
    pub color: String,
}

/// Gradient fill geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Linear gradient along an angled axis through the bounds center.
    #[default]
    Linear,
    /// Radial gradient from the bounds center.
    Radial,
}

/// Gradient fill configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientSpec {
    /// Linear or radial.
    #[serde(default)]
    pub kind: GradientKind,
    /// Axis angle in degrees for linear gradients; clamped into `[0, 360]`.
    #[serde(default)]
    pub angle: f64,
    /// Color stops. A single stop is expanded to a valid two-stop gradient.
    pub stops: Vec<GradientStopSpec>,
}

/// Drop-shadow configuration for the shadow pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowSpec {
    /// CSS color string.
    pub color: String,
    /// Gaussian blur extent in pixels; 0 draws a hard offset copy.
    pub blur: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Shadow opacity, multiplied with the global opacity.
    pub opacity: f64,
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
            opacity: 0.5,
        }
    }
}

/// Outline configuration for the stroke pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeSpec {
    /// CSS color string.
    pub color: String,
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke opacity, multiplied with the global opacity.
    pub opacity: f64,
}

impl Default for StrokeSpec {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            width: 2.0,
            opacity: 1.0,
        }
    }
}

/// Immutable per-call render configuration.
///
/// This is the sole configuration surface of the crate; one instance fully
/// describes a static render or an animation bake.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Logical canvas width in pixels.
    pub width: u32,
    /// Logical canvas height in pixels.
    pub height: u32,
    /// Requested font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS-style numeric weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Font slant.
    pub font_style: FontStyle,
    /// Fill color as a CSS string; unparseable input degrades to black.
    pub color: String,
    /// Global opacity multiplied into every pass.
    pub opacity: f64,
    /// Optional backdrop color.
    pub background_color: Option<String>,
    /// Corner radius of the backdrop rectangle.
    pub border_radius: f64,
    /// Horizontal line alignment.
    pub text_align: TextAlign,
    /// Vertical block anchoring.
    pub text_baseline: TextBaseline,
    /// Extra per-character advance in pixels.
    pub letter_spacing: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// Case transformation applied before layout.
    pub text_transform: TextTransform,
    /// Underline/strikethrough decoration.
    pub text_decoration: TextDecoration,
    /// Optional gradient fill; overrides `color` when present.
    pub gradient: Option<GradientSpec>,
    /// Optional drop shadow pass.
    pub shadow: Option<ShadowSpec>,
    /// Optional stroke pass.
    pub stroke: Option<StrokeSpec>,
    /// Clip duration in seconds.
    pub duration: f64,
    /// Frames per second for animation baking.
    pub fps: f64,
    /// Default direction for directional presets.
    pub direction: Option<Direction>,
    /// Animation descriptor; `None` renders a static image.
    pub animation: Option<AnimationSpec>,
    /// Physical-to-logical pixel scale.
    pub pixel_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 576,
            font_family: "sans-serif".to_owned(),
            font_size: 48.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            color: "#ffffff".to_owned(),
            opacity: 1.0,
            background_color: None,
            border_radius: 0.0,
            text_align: TextAlign::Center,
            text_baseline: TextBaseline::Middle,
            letter_spacing: 0.0,
            line_height: 1.2,
            text_transform: TextTransform::None,
            text_decoration: TextDecoration::None,
            gradient: None,
            shadow: None,
            stroke: None,
            duration: 3.0,
            fps: 30.0,
            direction: None,
            animation: None,
            pixel_ratio: 1.0,
        }
    }
}

impl RenderConfig {
    /// Validate static invariants before any drawing is attempted.
    pub fn validate(&self) -> KinetypeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KinetypeError::validation("width and height must be > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(KinetypeError::validation(
                "font_size must be finite and > 0",
            ));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(KinetypeError::validation("duration must be finite and > 0"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(KinetypeError::validation("fps must be finite and > 0"));
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(KinetypeError::validation(
                "pixel_ratio must be finite and > 0",
            ));
        }
        if let Some(anim) = &self.animation
            && (!anim.speed.is_finite() || anim.speed <= 0.0)
        {
            return Err(KinetypeError::validation(
                "animation speed must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Frame count for the configured duration and fps: `ceil(duration * fps)`.
    pub fn frame_count(&self) -> usize {
        (self.duration * self.fps).ceil().max(1.0) as usize
    }

    /// Physical surface width after applying the pixel ratio.
    pub fn physical_width(&self) -> u32 {
        ((f64::from(self.width) * self.pixel_ratio).round() as u32).max(1)
    }

    /// Physical surface height after applying the pixel ratio.
    pub fn physical_height(&self) -> u32 {
        ((f64::from(self.height) * self.pixel_ratio).round() as u32).max(1)
    }

    /// Physical surface dimensions as a [`Canvas`].
    pub fn physical_canvas(&self) -> crate::foundation::core::Canvas {
        crate::foundation::core::Canvas {
            width: self.physical_width(),
            height: self.physical_height(),
        }
    }

    /// Apply the configured case transformation to input text.
    pub(crate) fn transform_text(&self, text: &str) -> String {
        match self.text_transform {
            TextTransform::None => text.to_owned(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => text
                .split_inclusive(char::is_whitespace)
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
