//! Raster surface abstraction and CPU-backed implementation.

use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Rect, Rgba8};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::render::blur::blur_rgba8_premul;

/// Paint applied by a draw primitive.
#[derive(Clone)]
pub enum Paint {
    /// Solid straight-alpha color.
    Solid(Rgba8),
    /// Pre-rasterized image tile anchored in canvas space.
    Image(ImagePaint),
}

/// A premultiplied RGBA8 tile used as a paint source (gradient fills).
#[derive(Clone)]
pub struct ImagePaint {
    pub(crate) image: vello_cpu::Image,
    /// Tile top-left in canvas space.
    pub(crate) origin: kurbo::Point,
}

impl ImagePaint {
    /// Wrap premultiplied RGBA8 bytes as an image paint anchored at `origin`.
    pub(crate) fn from_premul_bytes(
        bytes: &[u8],
        width: u32,
        height: u32,
        origin: kurbo::Point,
    ) -> KinetypeResult<Self> {
        Ok(Self {
            image: rgba_premul_to_image(bytes, width, height)?,
            origin,
        })
    }
}

/// Glyph pass mode for [`RenderSurface::draw_glyph_run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlyphPass {
    /// Fill glyph outlines.
    Fill,
    /// Stroke glyph outlines at the given width.
    Stroke {
        /// Outline width in pixels.
        width: f64,
    },
    /// Fill, then gaussian-blur the pass in isolation before compositing.
    BlurredFill {
        /// Blur kernel radius in pixels.
        radius: u32,
        /// Gaussian sigma.
        sigma: f32,
    },
}

/// Offscreen pixel target with primitive draw operations and readback.
///
/// Implementations are scoped to a single render call; dropping the surface
/// releases its native resources.
pub trait RenderSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;
    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Reset the command stream and clear to `background` (or transparent).
    fn clear(&mut self, background: Option<Rgba8>);

    /// Draw a positioned glyph run under `transform`.
    #[allow(clippy::too_many_arguments)]
    fn draw_glyph_run(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size: f32,
        glyphs: &[vello_cpu::Glyph],
        transform: Affine,
        paint: &Paint,
        opacity: f32,
        pass: GlyphPass,
    ) -> KinetypeResult<()>;

    /// Fill an axis-aligned rectangle under `transform`.
    fn draw_rect(
        &mut self,
        rect: Rect,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()>;

    /// Fill a rounded rectangle under `transform`.
    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()>;

    /// Fill an arbitrary path under `transform`.
    fn draw_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()>;

    /// Render pending commands and read the full frame back as premultiplied
    /// RGBA8 bytes.
    fn read_pixels(&mut self) -> KinetypeResult<Vec<u8>>;
}

/// CPU raster surface powered by `vello_cpu`.
pub struct CpuSurface {
    width: u32,
    height: u32,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    /// Create a surface; dimensions must fit the u16 raster limits.
    pub fn new(width: u32, height: u32) -> KinetypeResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| KinetypeError::validation("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| KinetypeError::validation("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(KinetypeError::validation("surface dimensions must be > 0"));
        }
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    fn set_paint(&mut self, paint: &Paint, transform: Affine) {
        match paint {
            Paint::Solid(c) => {
                self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx
                    .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            }
            Paint::Image(img) => {
                // Anchor the tile in canvas space: map the geometry transform
                // back to local coordinates, then offset to the tile origin.
                let local = transform.inverse() * Affine::translate(img.origin.to_vec2());
                self.ctx.set_paint_transform(affine_to_cpu(local));
                self.ctx.set_paint(img.image.clone());
            }
        }
    }

    fn fill_shape(
        &mut self,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
        fill: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        self.ctx.set_transform(affine_to_cpu(transform));
        self.set_paint(paint, transform);
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        fill(&mut self.ctx);
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

impl RenderSurface for CpuSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, background: Option<Rgba8>) {
        self.ctx.reset();
        if let Some(bg) = background {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn draw_glyph_run(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size: f32,
        glyphs: &[vello_cpu::Glyph],
        transform: Affine,
        paint: &Paint,
        opacity: f32,
        pass: GlyphPass,
    ) -> KinetypeResult<()> {
        if glyphs.is_empty() {
            return Ok(());
        }

        if let GlyphPass::BlurredFill { radius, sigma } = pass {
            // Render the run in isolation, blur the bytes, then inject the
            // result as an image fill so later passes composite over it.
            let w: u16 = self.width as u16;
            let h: u16 = self.height as u16;
            let mut tmp_ctx = vello_cpu::RenderContext::new(w, h);
            tmp_ctx.set_transform(affine_to_cpu(transform));
            match paint {
                Paint::Solid(c) => {
                    tmp_ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                }
                Paint::Image(img) => {
                    let local = transform.inverse() * Affine::translate(img.origin.to_vec2());
                    tmp_ctx.set_paint_transform(affine_to_cpu(local));
                    tmp_ctx.set_paint(img.image.clone());
                }
            }
            tmp_ctx
                .glyph_run(font)
                .font_size(size)
                .fill_glyphs(glyphs.iter().copied());
            tmp_ctx.flush();
            let mut tmp = vello_cpu::Pixmap::new(w, h);
            tmp_ctx.render_to_pixmap(&mut tmp);

            let blurred =
                blur_rgba8_premul(tmp.data_as_u8_slice(), self.width, self.height, radius, sigma)?;
            let img = rgba_premul_to_image(&blurred, self.width, self.height)?;

            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(img);
            let opacity = opacity.clamp(0.0, 1.0);
            if opacity < 1.0 {
                self.ctx.push_opacity_layer(opacity);
            }
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
            if opacity < 1.0 {
                self.ctx.pop_layer();
            }
            return Ok(());
        }

        self.ctx.set_transform(affine_to_cpu(transform));
        self.set_paint(paint, transform);
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        match pass {
            GlyphPass::Fill => {
                self.ctx
                    .glyph_run(font)
                    .font_size(size)
                    .fill_glyphs(glyphs.iter().copied());
            }
            GlyphPass::Stroke { width } => {
                self.ctx
                    .set_stroke(vello_cpu::kurbo::Stroke::new(width));
                self.ctx
                    .glyph_run(font)
                    .font_size(size)
                    .stroke_glyphs(glyphs.iter().copied());
            }
            GlyphPass::BlurredFill { .. } => unreachable!("handled above"),
        }
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_rect(
        &mut self,
        rect: Rect,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()> {
        self.fill_shape(transform, paint, opacity, |ctx| {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        });
        Ok(())
    }

    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()> {
        let rr = kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, radius.max(0.0));
        let mut path = BezPath::new();
        for el in kurbo::Shape::path_elements(&rr, 0.1) {
            path.push(el);
        }
        self.draw_path(&path, transform, paint, opacity)
    }

    fn draw_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        paint: &Paint,
        opacity: f32,
    ) -> KinetypeResult<()> {
        let cpu_path = bezpath_to_cpu(path);
        self.fill_shape(transform, paint, opacity, |ctx| {
            ctx.fill_path(&cpu_path);
        });
        Ok(())
    }

    fn read_pixels(&mut self) -> KinetypeResult<Vec<u8>> {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(self.pixmap.data_as_u8_slice().to_vec())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> KinetypeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KinetypeError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KinetypeError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(KinetypeError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> KinetypeResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
