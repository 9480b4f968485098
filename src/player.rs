//! Scroll-scrubbed playback of a frame sequence.
//!
//! The player's lifecycle mirrors a page that hosts it:
//!
//! 1. [`FrameSequencePlayer::new`] prepares the container (full-viewport canvas layer behind the
//!    content, container stretched to the scroll length),
//! 2. [`FrameSequencePlayer::load_frames`] probes the frame source one file at a time,
//! 3. [`FrameSequencePlayer::setup_animation`] draws the first frame and starts reacting to
//!    [`PlayerEvent`]s.
//!
//! [`FrameSequencePlayer::start`] runs all three steps.

use crate::assets::sequence::FrameSequence;
use crate::assets::source::{FramePattern, FrameSource};
use crate::config::PlayerConfig;
use crate::foundation::core::{FrameIndex, Viewport, progress_to_fractional};
use crate::foundation::error::ScrubResult;
use crate::foundation::math::CoverFit;
use crate::page::{CanvasLayer, Container, Length, Position};
use crate::render::surface::Surface;
use crate::scroll::scrub::Scrub;
use crate::scroll::trigger::ScrollTrigger;

/// Mutable playback position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Fractional frame position last requested by a progress update.
    pub fractional_index: f64,
    /// Size the surface is resized to before each draw.
    pub viewport: Viewport,
}

/// Input the player reacts to once the animation is set up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Document scroll offset changed (px).
    Scroll(f64),
    /// Time passed (seconds); drives scrub smoothing.
    Tick(f64),
    /// Host window resized.
    Resize(Viewport),
    /// Normalized progress delivered directly, bypassing the scroll trigger.
    Progress(f64),
}

/// Renders the frame under the current scroll position onto an owned [`Surface`].
pub struct FrameSequencePlayer<S: Surface> {
    container: Container,
    pattern: FramePattern,
    frames: FrameSequence,
    state: PlaybackState,
    surface: S,
    scrub: Scrub,
    trigger: Option<ScrollTrigger>,
}

impl<S: Surface> FrameSequencePlayer<S> {
    /// Attach to `container`: add the canvas layer and stretch the container so its scroll
    /// distance maps onto playback.
    pub fn new(
        mut container: Container,
        config: &PlayerConfig,
        surface: S,
        viewport: Viewport,
    ) -> Self {
        initialize(&mut container, config.scroll_length_vh);
        Self {
            container,
            pattern: config.pattern.clone(),
            frames: FrameSequence::default(),
            state: PlaybackState {
                fractional_index: 0.0,
                viewport,
            },
            surface,
            scrub: config.scrub,
            trigger: None,
        }
    }

    /// Construct, load every frame from `source`, and set up the animation.
    pub fn start(
        container: Container,
        config: &PlayerConfig,
        source: &dyn FrameSource,
        surface: S,
        viewport: Viewport,
    ) -> ScrubResult<Self> {
        let mut player = Self::new(container, config, surface, viewport);
        player.load_frames(source);
        player.setup_animation()?;
        Ok(player)
    }

    /// Probe `source` and replace the frame sequence. Returns the number of frames found.
    pub fn load_frames(&mut self, source: &dyn FrameSource) -> usize {
        self.frames = FrameSequence::load(source, &self.pattern);
        self.surface.release_unused();
        tracing::info!(
            frames = self.frames.len(),
            source = %source.describe(),
            "frame sequence loaded"
        );
        self.frames.len()
    }

    /// Draw the frame under `fractional_index`.
    ///
    /// Returns `Ok(false)` without touching the surface when the index selects no frame.
    pub fn draw_frame(&mut self, fractional_index: f64) -> ScrubResult<bool> {
        let Some(index) = FrameIndex::from_fractional(fractional_index, self.frames.len()) else {
            return Ok(false);
        };
        let Some(frame) = self.frames.get(index).cloned() else {
            return Ok(false);
        };

        self.surface.resize(self.state.viewport)?;
        let (w, h) = self.surface.size();
        let Some(fit) = CoverFit::compute(frame.width, frame.height, w, h) else {
            return Ok(false);
        };

        self.surface.clear()?;
        self.surface.draw_image(&frame, &fit)?;
        tracing::trace!(frame = index.0, scale = fit.scale, "drew frame");
        Ok(true)
    }

    /// Draw the first frame and start handling events. Does nothing for an empty sequence.
    pub fn setup_animation(&mut self) -> ScrubResult<()> {
        if self.frames.is_empty() {
            tracing::debug!("no frames; animation not started");
            return Ok(());
        }
        self.draw_frame(0.0)?;
        self.trigger = Some(ScrollTrigger::new(self.scrub));
        Ok(())
    }

    /// Whether [`Self::setup_animation`] subscribed to events.
    pub fn is_animating(&self) -> bool {
        self.trigger.is_some()
    }

    /// Dispatch one event. Returns whether a frame was drawn. Events before setup are ignored.
    pub fn handle(&mut self, event: PlayerEvent) -> ScrubResult<bool> {
        if self.trigger.is_none() {
            return Ok(false);
        }
        match event {
            PlayerEvent::Scroll(y) => self.on_scroll(y),
            PlayerEvent::Tick(dt) => self.on_tick(dt),
            PlayerEvent::Resize(vp) => self.on_resize(vp),
            PlayerEvent::Progress(p) => self.on_progress(p),
        }
    }

    /// Progress callback: map `progress` onto the sequence, remember it, and redraw.
    pub fn on_progress(&mut self, progress: f64) -> ScrubResult<bool> {
        let fractional = progress_to_fractional(progress, self.frames.len());
        self.state.fractional_index = fractional;
        self.draw_frame(fractional)
    }

    /// Resize callback: redraw at the remembered position for the new viewport.
    pub fn on_resize(&mut self, viewport: Viewport) -> ScrubResult<bool> {
        self.state.viewport = viewport;
        self.draw_frame(self.state.fractional_index)
    }

    fn on_scroll(&mut self, scroll_y: f64) -> ScrubResult<bool> {
        let viewport = self.state.viewport;
        let update = match self.trigger.as_mut() {
            Some(t) => t.update(scroll_y, &self.container, viewport),
            None => None,
        };
        match update {
            Some(p) => self.on_progress(p),
            None => Ok(false),
        }
    }

    fn on_tick(&mut self, dt: f64) -> ScrubResult<bool> {
        match self.trigger.as_mut().and_then(|t| t.tick(dt)) {
            Some(p) => self.on_progress(p),
            None => Ok(false),
        }
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn trigger(&self) -> Option<&ScrollTrigger> {
        self.trigger.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Prepare `container` for playback: relative positioning, a height of `scroll_length_vh`
/// viewport-height percent, and a fixed canvas layer behind the content.
pub fn initialize(container: &mut Container, scroll_length_vh: f64) {
    container.position = Position::Relative;
    container.height = Length::Vh(scroll_length_vh);
    container.canvas = Some(CanvasLayer::behind_viewport());
}
