use crate::foundation::core::{Affine, Rect, Vec2};

/// Placement of a source image that covers a target area with uniform scale.
///
/// The image is scaled by `max(W / w, H / h)` and centered, so overflow is cropped equally on
/// both sides of the longer axis and nothing is letterboxed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    /// Top-left corner of the scaled image in target space (zero or negative).
    pub offset: Vec2,
    pub draw_width: f64,
    pub draw_height: f64,
}

impl CoverFit {
    /// Returns `None` when either size is degenerate.
    pub fn compute(
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    ) -> Option<Self> {
        if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
            return None;
        }
        let (sw, sh) = (f64::from(src_width), f64::from(src_height));
        let (dw, dh) = (f64::from(dst_width), f64::from(dst_height));

        let scale = (dw / sw).max(dh / sh);
        let draw_width = sw * scale;
        let draw_height = sh * scale;
        let x = (dw - draw_width) / 2.0;
        let y = (dh - draw_height) / 2.0;

        Some(Self {
            scale,
            offset: Vec2::new(x, y),
            draw_width,
            draw_height,
        })
    }

    pub fn dest_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + self.draw_width,
            self.offset.y + self.draw_height,
        )
    }

    /// Maps source pixel space onto target space.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}
