use std::sync::Arc;

use crate::assets::decode::DecodedFrame;
use crate::foundation::core::Viewport;
use crate::foundation::error::ScrubResult;
use crate::foundation::math::CoverFit;

/// A rendered surface as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to straight alpha so the bytes can be handed to `image` encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// The 2D drawing target the player owns.
///
/// Resizing discards the previous contents, like a canvas element whose width/height are
/// reassigned.
pub trait Surface {
    /// Resize to `viewport`; contents are cleared.
    fn resize(&mut self, viewport: Viewport) -> ScrubResult<()>;

    /// Current size; `0x0` before the first resize.
    fn size(&self) -> (u32, u32);

    /// Clear the whole surface.
    fn clear(&mut self) -> ScrubResult<()>;

    /// Draw `frame` placed by `fit` (target space = surface pixels).
    fn draw_image(&mut self, frame: &Arc<DecodedFrame>, fit: &CoverFit) -> ScrubResult<()>;

    /// Drop per-frame resources for frames nobody else holds anymore. Called after the player
    /// replaces its sequence.
    fn release_unused(&mut self) {}
}

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug)]
pub enum SurfaceCall {
    Resize(Viewport),
    Clear,
    Draw {
        frame: Arc<DecodedFrame>,
        fit: CoverFit,
    },
}

/// Surface that draws nothing and keeps a log of every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: (u32, u32),
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Frames passed to `draw_image`, in call order.
    pub fn drawn_frames(&self) -> Vec<Arc<DecodedFrame>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Draw { frame, .. } => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) -> ScrubResult<()> {
        self.size = (viewport.width, viewport.height);
        self.calls.push(SurfaceCall::Resize(viewport));
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) -> ScrubResult<()> {
        self.calls.push(SurfaceCall::Clear);
        Ok(())
    }

    fn draw_image(&mut self, frame: &Arc<DecodedFrame>, fit: &CoverFit) -> ScrubResult<()> {
        self.calls.push(SurfaceCall::Draw {
            frame: frame.clone(),
            fit: *fit,
        });
        Ok(())
    }
}
