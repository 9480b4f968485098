use crate::foundation::error::{ScrubError, ScrubResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Zero-based position of a frame inside a loaded sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// Select the frame under a fractional playback position.
    ///
    /// The position is floored. Anything outside `[0, frame_count - 1]`, non-finite values, and
    /// empty sequences select nothing.
    pub fn from_fractional(fractional: f64, frame_count: usize) -> Option<Self> {
        if frame_count == 0 || !fractional.is_finite() {
            return None;
        }
        let last = (frame_count - 1) as f64;
        if !(0.0..=last).contains(&fractional) {
            return None;
        }
        Some(Self(fractional.floor() as usize))
    }
}

/// Host window size in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> ScrubResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrubError::validation("viewport width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Map a normalized scroll progress onto the sequence: `p * (N - 1)`.
///
/// Progress is clamped into `[0, 1]` first so a misbehaving source cannot push the position
/// past either end.
pub fn progress_to_fractional(progress: f64, frame_count: usize) -> f64 {
    if frame_count == 0 || !progress.is_finite() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0) * (frame_count - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_index_floors_inside_range() {
        assert_eq!(FrameIndex::from_fractional(0.0, 5), Some(FrameIndex(0)));
        assert_eq!(FrameIndex::from_fractional(2.999, 5), Some(FrameIndex(2)));
        assert_eq!(FrameIndex::from_fractional(4.0, 5), Some(FrameIndex(4)));
    }

    #[test]
    fn fractional_index_rejects_out_of_range() {
        assert_eq!(FrameIndex::from_fractional(-0.1, 5), None);
        assert_eq!(FrameIndex::from_fractional(4.5, 5), None);
        assert_eq!(FrameIndex::from_fractional(0.0, 0), None);
        assert_eq!(FrameIndex::from_fractional(f64::NAN, 5), None);
        assert_eq!(FrameIndex::from_fractional(f64::INFINITY, 5), None);
    }

    #[test]
    fn half_progress_over_ten_frames_is_four_point_five() {
        let f = progress_to_fractional(0.5, 10);
        assert_eq!(f, 4.5);
        assert_eq!(FrameIndex::from_fractional(f, 10), Some(FrameIndex(4)));
    }

    #[test]
    fn progress_endpoints_hit_first_and_last_frame() {
        assert_eq!(progress_to_fractional(0.0, 7), 0.0);
        assert_eq!(progress_to_fractional(1.0, 7), 6.0);
        assert_eq!(progress_to_fractional(1.5, 7), 6.0);
        assert_eq!(progress_to_fractional(0.3, 1), 0.0);
        assert_eq!(progress_to_fractional(0.3, 0), 0.0);
    }

    #[test]
    fn viewport_rejects_zero_sizes() {
        assert!(Viewport::new(0, 10).is_err());
        assert!(Viewport::new(10, 0).is_err());
        assert_eq!(
            Viewport::new(1280, 720).unwrap().rect(),
            Rect::new(0.0, 0.0, 1280.0, 720.0)
        );
    }
}
