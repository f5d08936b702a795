//! Gradient specification resolution and sampling.

use crate::config::color::parse_or_black;
use crate::config::model::{GradientKind, GradientSpec, GradientStopSpec};
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::math::lerp_u8;
use smallvec::SmallVec;

/// A normalized gradient stop: offset in `[0, 1]`, resolved color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f64,
    /// Resolved stop color.
    pub color: Rgba8,
}

/// Shader parameters computed from a gradient config and text bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum GradientShader {
    /// Linear gradient between two points.
    Linear {
        /// Axis start point.
        p0: Point,
        /// Axis end point.
        p1: Point,
        /// Normalized stops, ascending by offset.
        stops: SmallVec<[GradientStop; 4]>,
    },
    /// Radial gradient from a center point.
    Radial {
        /// Gradient center.
        center: Point,
        /// Radius at which the last stop is reached.
        radius: f64,
        /// Normalized stops, ascending by offset.
        stops: SmallVec<[GradientStop; 4]>,
    },
}

/// Computes linear/radial shader parameters from stop lists and bounds.
pub struct GradientBuilder;

impl GradientBuilder {
    /// Build shader parameters for `spec` over `bounds`.
    ///
    /// Linear endpoints are `center +/- (cos t, sin t) * max(w, h) / 2` where
    /// `t` is the clamped angle in radians; radial gradients use the bounds
    /// center and `min(w, h) / 2`.
    pub fn shader(spec: &GradientSpec, bounds: Rect) -> GradientShader {
        let stops = Self::normalize_stops(&spec.stops);
        let center = bounds.center();
        match spec.kind {
            GradientKind::Linear => {
                let theta = spec.angle.clamp(0.0, 360.0).to_radians();
                let half = bounds.width().max(bounds.height()) / 2.0;
                let dx = theta.cos() * half;
                let dy = theta.sin() * half;
                GradientShader::Linear {
                    p0: Point::new(center.x - dx, center.y - dy),
                    p1: Point::new(center.x + dx, center.y + dy),
                    stops,
                }
            }
            GradientKind::Radial => GradientShader::Radial {
                center,
                radius: (bounds.width().min(bounds.height()) / 2.0).max(1.0),
                stops,
            },
        }
    }

    /// Normalize raw stops: resolve colors, clamp offsets into `[0, 1]`, sort
    /// ascending, and expand a single stop to the two-stop form
    /// `[{0, c}, {1, c}]`. An empty list degrades to opaque black.
    pub fn normalize_stops(raw: &[GradientStopSpec]) -> SmallVec<[GradientStop; 4]> {
        let mut stops: SmallVec<[GradientStop; 4]> = raw
            .iter()
            .map(|s| GradientStop {
                offset: if s.offset.is_finite() {
                    s.offset.clamp(0.0, 1.0)
                } else {
                    0.0
                },
                color: parse_or_black(&s.color),
            })
            .collect();

        match stops.len() {
            0 => {
                let c = Rgba8::opaque_black();
                stops.push(GradientStop {
                    offset: 0.0,
                    color: c,
                });
                stops.push(GradientStop {
                    offset: 1.0,
                    color: c,
                });
            }
            1 => {
                let c = stops[0].color;
                stops[0].offset = 0.0;
                stops.push(GradientStop {
                    offset: 1.0,
                    color: c,
                });
            }
            _ => {
                stops.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(std::cmp::Ordering::Equal));
            }
        }
        stops
    }

    /// Sample the stop ramp at `t` in `[0, 1]`.
    pub(crate) fn sample(stops: &[GradientStop], t: f64) -> Rgba8 {
        let t = t.clamp(0.0, 1.0);
        let first = stops[0];
        let last = stops[stops.len() - 1];
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
                return Rgba8 {
                    r: lerp_u8(a.color.r, b.color.r, local),
                    g: lerp_u8(a.color.g, b.color.g, local),
                    b: lerp_u8(a.color.b, b.color.b, local),
                    a: lerp_u8(a.color.a, b.color.a, local),
                };
            }
        }
        last.color
    }

    /// Rasterize the shader into a premultiplied RGBA8 tile covering a
    /// `width x height` region whose top-left sits at `origin` in canvas
    /// space. `opacity` scales the ramp's alpha.
    pub(crate) fn rasterize(
        shader: &GradientShader,
        origin: Point,
        width: u32,
        height: u32,
        opacity: f64,
    ) -> Vec<u8> {
        let mut bytes = vec![0u8; (width as usize).saturating_mul(height as usize).saturating_mul(4)];
        for py in 0..height {
            for px in 0..width {
                let p = Point::new(
                    origin.x + f64::from(px) + 0.5,
                    origin.y + f64::from(py) + 0.5,
                );
                let t = match shader {
                    GradientShader::Linear { p0, p1, .. } => {
                        let d = *p1 - *p0;
                        let len2 = d.hypot2();
                        if len2 <= 0.0 {
                            0.0
                        } else {
                            (p - *p0).dot(d) / len2
                        }
                    }
                    GradientShader::Radial { center, radius, .. } => {
                        (p - *center).hypot() / radius.max(1e-6)
                    }
                };
                let stops = match shader {
                    GradientShader::Linear { stops, .. } | GradientShader::Radial { stops, .. } => {
                        stops.as_slice()
                    }
                };
                let c = Self::sample(stops, t).mul_alpha(opacity);
                let idx = ((py as usize) * (width as usize) + (px as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c.to_premul());
            }
        }
        bytes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/gradient.rs"]
mod tests;
