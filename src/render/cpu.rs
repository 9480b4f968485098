use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::DecodedFrame;
use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::foundation::math::CoverFit;
use crate::render::surface::{FrameRGBA, Surface};

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    /// If set, every clear fills the surface with this straight RGBA8 color instead of
    /// transparent black.
    pub clear_rgba: Option<[u8; 4]>,
}

struct Target {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    // Set by resize/clear; applied to the pixmap by the next draw.
    pending_clear: bool,
}

impl Target {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            pending_clear: true,
        }
    }
}

/// Raster surface backed by `vello_cpu`.
///
/// Only [`Surface::draw_image`] rasterizes. Resizing to the current size keeps the pixmap, and a
/// clear is applied in place right before the next draw.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    target: Option<Target>,
    // Keyed by frame address; the Arc in the value keeps the address from being reused.
    image_cache: HashMap<usize, (Arc<DecodedFrame>, vello_cpu::Image)>,
}

impl CpuSurface {
    pub fn new(opts: CpuSurfaceOpts) -> Self {
        Self {
            opts,
            target: None,
            image_cache: HashMap::new(),
        }
    }

    /// Read back the current pixels (premultiplied). A never-sized surface yields a 0x0 frame.
    pub fn snapshot(&self) -> FrameRGBA {
        let Some(t) = &self.target else {
            return FrameRGBA {
                width: 0,
                height: 0,
                data: Vec::new(),
                premultiplied: true,
            };
        };
        let data = if t.pending_clear {
            let px = self.clear_premul();
            let n = usize::from(t.width) * usize::from(t.height);
            px.iter().copied().cycle().take(n * 4).collect()
        } else {
            t.pixmap.data_as_u8_slice().to_vec()
        };
        FrameRGBA {
            width: u32::from(t.width),
            height: u32::from(t.height),
            data,
            premultiplied: true,
        }
    }

    /// Number of frames with a converted image held in the cache.
    pub fn cached_frames(&self) -> usize {
        self.image_cache.len()
    }

    fn clear_premul(&self) -> [u8; 4] {
        self.opts
            .clear_rgba
            .map(|[r, g, b, a]| premul_rgba8(r, g, b, a))
            .unwrap_or([0, 0, 0, 0])
    }

    fn image_for(&mut self, frame: &Arc<DecodedFrame>) -> ScrubResult<vello_cpu::Image> {
        let key = Arc::as_ptr(frame) as usize;
        if let Some((_, img)) = self.image_cache.get(&key) {
            return Ok(img.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&frame.rgba8_premul, frame.width, frame.height)?;
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(key, (frame.clone(), img.clone()));
        Ok(img)
    }

    fn target_mut(&mut self) -> ScrubResult<&mut Target> {
        self.target
            .as_mut()
            .ok_or_else(|| ScrubError::render("surface has not been sized"))
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, viewport: Viewport) -> ScrubResult<()> {
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| ScrubError::validation("surface width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| ScrubError::validation("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ScrubError::validation("surface size must be > 0"));
        }

        match self.target.as_mut() {
            Some(t) if t.width == width && t.height == height => t.pending_clear = true,
            Some(t) => *t = Target::new(width, height),
            None => self.target = Some(Target::new(width, height)),
        }
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.target
            .as_ref()
            .map(|t| (u32::from(t.width), u32::from(t.height)))
            .unwrap_or((0, 0))
    }

    fn clear(&mut self) -> ScrubResult<()> {
        self.target_mut()?.pending_clear = true;
        Ok(())
    }

    fn draw_image(&mut self, frame: &Arc<DecodedFrame>, fit: &CoverFit) -> ScrubResult<()> {
        let img = self.image_for(frame)?;
        let clear = self.clear_premul();
        let t = self.target_mut()?;

        if t.pending_clear {
            clear_pixmap(&mut t.pixmap, clear);
            t.pending_clear = false;
        }
        t.ctx.reset();
        t.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        t.ctx.set_transform(affine_to_cpu(fit.to_affine()));
        t.ctx.set_paint(img);
        t.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(frame.width),
            f64::from(frame.height),
        ));
        t.ctx.flush();
        t.ctx.render_to_pixmap(&mut t.pixmap);
        Ok(())
    }

    fn release_unused(&mut self) {
        let before = self.image_cache.len();
        self.image_cache
            .retain(|_, (frame, _)| Arc::strong_count(frame) > 1);
        tracing::trace!(
            evicted = before - self.image_cache.len(),
            kept = self.image_cache.len(),
            "pruned image cache"
        );
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = u16::from(a) + 1;
    let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ScrubResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScrubError::render("frame width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScrubError::render("frame height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ScrubError::render("decoded frame byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
