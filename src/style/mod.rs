//! Fill/gradient/stroke/shadow/decoration styling around the glyph primitive.

pub mod gradient;
pub mod paint;
