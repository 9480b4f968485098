//! Scroll-driven image-sequence playback.
//!
//! A tall container is scrolled; its scroll progress selects a frame from a sequence of stills
//! (`frame-001.jpg`, `frame-002.jpg`, ...), and that frame is drawn cover-fit onto a canvas the
//! size of the viewport. The result behaves like a video scrubbed by the scrollbar.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a [`FrameSource`] is probed for consecutively numbered files until the first one
//!    that cannot be read or decoded ([`FrameSequence::load`])
//! 2. **Track**: a [`ScrollTrigger`] turns scroll offsets into progress in `[0, 1]`, optionally
//!    smoothed over time ([`Scrub`])
//! 3. **Select**: progress `p` maps to the fractional index `p * (N - 1)`; its floor is the frame
//! 4. **Draw**: the frame is scaled by `max(W / w, H / h)` and centered ([`CoverFit`]) onto a
//!    [`Surface`], by default the `vello_cpu` backed [`CpuSurface`]
//!
//! [`FrameSequencePlayer`] owns all of it and reacts to [`PlayerEvent`]s.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod render;
mod scroll;

/// Player configuration.
pub mod config;
/// Container and canvas layout model.
pub mod page;
/// The player itself.
pub mod player;

pub use assets::decode::{DecodedFrame, decode_frame};
pub use assets::sequence::FrameSequence;
pub use assets::source::{
    DirFrameSource, FramePattern, FrameSource, MemoryFrameSource, frame_file_name,
};
pub use config::PlayerConfig;
pub use foundation::core::{
    Affine, FrameIndex, Rect, Vec2, Viewport, progress_to_fractional,
};
pub use foundation::error::{ScrubError, ScrubResult};
pub use foundation::math::CoverFit;
pub use page::{CanvasLayer, Container, Length, Position};
pub use player::{FrameSequencePlayer, PlaybackState, PlayerEvent, initialize};
pub use render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use render::surface::{FrameRGBA, RecordingSurface, Surface, SurfaceCall};
pub use scroll::scrub::{Scrub, ScrubSmoother};
pub use scroll::trigger::{ScrollTrigger, TriggerRegion};
