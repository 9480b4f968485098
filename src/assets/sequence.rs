use std::sync::Arc;

use crate::assets::decode::{DecodedFrame, decode_frame};
use crate::assets::source::{FramePattern, FrameSource};
use crate::foundation::core::FrameIndex;

/// Ordered, immutable list of decoded frames. Index order is load order is playback order.
#[derive(Clone, Debug, Default)]
pub struct FrameSequence {
    frames: Vec<Arc<DecodedFrame>>,
}

impl FrameSequence {
    /// Probe `source` for consecutively numbered frames, one at a time.
    ///
    /// Loading stops at the first name that cannot be fetched or decoded; that frame marks the end
    /// of the sequence and the failure is not returned. A missing first frame yields an empty
    /// sequence.
    #[tracing::instrument(skip(source, pattern), fields(source = %source.describe()))]
    pub fn load(source: &dyn FrameSource, pattern: &FramePattern) -> Self {
        let mut frames = Vec::new();
        loop {
            let name = pattern.file_name(frames.len());
            let decoded = source.fetch(&name).and_then(|bytes| decode_frame(&bytes));
            match decoded {
                Ok(frame) => {
                    tracing::trace!(
                        %name,
                        width = frame.width,
                        height = frame.height,
                        "loaded frame"
                    );
                    frames.push(Arc::new(frame));
                }
                Err(err) => {
                    tracing::debug!(%name, %err, count = frames.len(), "frame sequence ends");
                    break;
                }
            }
        }
        Self { frames }
    }

    pub fn from_frames(frames: Vec<DecodedFrame>) -> Self {
        Self {
            frames: frames.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: FrameIndex) -> Option<&Arc<DecodedFrame>> {
        self.frames.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DecodedFrame>> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::assets::source::{MemoryFrameSource, frame_file_name};

    fn png(w: u32, h: u32, shade: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([shade, shade, shade, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn stops_at_first_missing_frame() {
        let mut src = MemoryFrameSource::new();
        for n in 1..=5 {
            src.insert(frame_file_name(n), png(2, 2, n as u8));
        }
        src.insert(frame_file_name(7), png(2, 2, 7));

        let seq = FrameSequence::load(&src, &FramePattern::default());
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn preserves_load_order() {
        let mut src = MemoryFrameSource::new();
        for n in 1..=3 {
            src.insert(frame_file_name(n), png(1, 1, n as u8 * 10));
        }

        let seq = FrameSequence::load(&src, &FramePattern::default());
        let shades: Vec<u8> = seq.iter().map(|f| f.rgba8_premul[0]).collect();
        assert_eq!(shades, vec![10, 20, 30]);
    }

    #[test]
    fn undecodable_frame_ends_sequence() {
        let mut src = MemoryFrameSource::new();
        src.insert(frame_file_name(1), png(1, 1, 1));
        src.insert(frame_file_name(2), b"broken".to_vec());
        src.insert(frame_file_name(3), png(1, 1, 3));

        let seq = FrameSequence::load(&src, &FramePattern::default());
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn missing_first_frame_is_empty() {
        let mut src = MemoryFrameSource::new();
        src.insert(frame_file_name(2), png(1, 1, 2));

        let seq = FrameSequence::load(&src, &FramePattern::default());
        assert!(seq.is_empty());
        assert!(seq.get(FrameIndex(0)).is_none());
    }
}
