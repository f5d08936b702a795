//! Kinetype renders styled text onto raster surfaces and bakes animation
//! presets into deterministic frame sequences for video compositing.
//!
//! The public API is renderer-oriented:
//!
//! - Construct a [`Renderer`] and register typeface bytes
//! - Call [`Renderer::render`] for a static image
//! - Call [`Renderer::render_animation`] for a baked [`AnimationFrame`]
//!   sequence, transparently cached by semantic content digest
//!
//! One [`RenderConfig`] fully describes a call; there is no file, network, or
//! CLI surface.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Byte-budgeted frame caching.
pub mod cache;
/// Render configuration model.
pub mod config;
/// Caller-owned font registry and shaping.
pub mod fonts;
pub(crate) mod layout;
/// Raster surfaces and the top-level renderer.
pub mod render;
/// Text styling passes.
pub mod style;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{KinetypeError, KinetypeResult};

pub use crate::cache::frames::{CacheKey, CacheStats, FrameCache, cache_key};
pub use crate::config::model::{
    AnimationPreset, AnimationSpec, AnimationStyle, Direction, FontStyle, GradientKind,
    GradientSpec, GradientStopSpec, RenderConfig, ShadowSpec, StrokeSpec, TextAlign, TextBaseline,
    TextDecoration, TextTransform,
};
pub use crate::fonts::service::{FontMetrics, FontService, ResolvedFont};
pub use crate::render::frame::{
    AnimationFrame, RenderData, RenderKind, RenderMetadata, RenderResult,
};
pub use crate::render::renderer::Renderer;
pub use crate::render::surface::{CpuSurface, GlyphPass, Paint, RenderSurface};
pub use crate::style::gradient::{GradientBuilder, GradientShader, GradientStop};
pub use crate::style::paint::{TextStyle, TextStyleManager};
