//! Scroll-phase controller for the pinned video reveal.
//!
//! The tracked section is two viewports tall. Raw progress runs 0 -> 1 over
//! the first viewport of scrolling; the phase is that progress remapped
//! through a start/end window, and everything visible is driven by the
//! ease-out-cubic of the phase.

use crate::config::ScrollConfig;
use crate::math::{clamp01, ease_out_cubic, remap01};

/// 0 when the element top sits at the viewport top, 1 one viewport later.
/// A non-positive or non-finite viewport height gives 0.
pub fn raw_progress(rect_top: f32, viewport_h: f32) -> f32 {
    if !(viewport_h.is_finite() && viewport_h > 0.0) || !rect_top.is_finite() {
        return 0.0;
    }
    clamp01((0.0 - rect_top) / viewport_h)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWindow {
    pub start: f32,
    pub end: f32,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self { start: 0.15, end: 1.0 }
    }
}

impl ScrollWindow {
    pub fn phase(&self, raw: f32) -> f32 {
        remap01(raw, self.start, self.end)
    }
}

/// Presentation values consumed by the view layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseOutputs {
    /// Eased phase.
    pub eased: f32,
    /// Text offset below its resting place, px.
    pub text_translate_y: f32,
    pub text_opacity: f32,
    /// Alpha of the black overlay above the video.
    pub overlay_opacity: f32,
    /// Backdrop blur radius, px.
    pub overlay_blur: f32,
}

impl PhaseOutputs {
    pub fn compute(phase: f32, viewport_h: f32, config: &ScrollConfig) -> Self {
        let t = ease_out_cubic(clamp01(phase));
        let start_offset = viewport_h.max(0.0) * config.text_offset_factor + config.text_offset_px;
        let fade_span = 1.0 - config.text_fade_start;
        Self {
            eased: t,
            text_translate_y: (1.0 - t) * start_offset,
            text_opacity: clamp01((t - config.text_fade_start) / fade_span),
            overlay_opacity: config.overlay_max_opacity * t,
            overlay_blur: config.overlay_max_blur * t,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollController {
    pub config: ScrollConfig,
    window: ScrollWindow,
    raw: f32,
    phase: f32,
    viewport_h: f32,
    outputs: PhaseOutputs,
}

impl ScrollController {
    pub fn new(config: ScrollConfig) -> Self {
        let window = ScrollWindow { start: config.start, end: config.end };
        let outputs = PhaseOutputs::compute(0.0, 0.0, &config);
        Self {
            config,
            window,
            raw: 0.0,
            phase: 0.0,
            viewport_h: 0.0,
            outputs,
        }
    }

    /// Recompute from the tracked element's viewport-relative top.
    pub fn update(&mut self, rect_top: f32, viewport_h: f32) {
        self.raw = raw_progress(rect_top, viewport_h);
        self.phase = self.window.phase(self.raw);
        self.viewport_h = viewport_h;
        self.outputs = PhaseOutputs::compute(self.phase, viewport_h, &self.config);
    }

    pub fn raw(&self) -> f32 {
        self.raw
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// True while the visual should stay fixed in the viewport.
    pub fn pinned(&self) -> bool {
        self.phase < 1.0
    }

    pub fn outputs(&self) -> PhaseOutputs {
        self.outputs
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_h
    }
}
