//! Mountable components: the engine pieces wired to a [`Host`].
//!
//! Every component registers listeners at mount through its own
//! [`Subscriptions`] and hands them all back at unmount, including a frame
//! that was requested but never ran. Events arriving after unmount are
//! ignored.

use glam::Vec2;

use crate::config::RevealConfig;
use crate::field::ParticleField;
use crate::host::{Component, ElementId, Event, EventKind, EventTarget, Host, Subscriptions};
use crate::parallax::HeroOutputs;
use crate::reveal::{Reveal, RevealAnimation};
use crate::scroll::{PhaseOutputs, ScrollController};
use crate::spring::{hovered_row, SpringFollower, SpringParams};
use crate::surface::Surface;
use crate::timeline::{LayerStagger, LayerState, ScalerTween, ScrubRange};

// ---------------------------------------------------------------------------
// Particle backdrop
// ---------------------------------------------------------------------------

/// Particle field drawing into `S` once per frame while mounted.
pub struct ParticleBackground<S: Surface> {
    pub field: ParticleField,
    pub surface: S,
    canvas: ElementId,
    subs: Subscriptions,
    mounted: bool,
    frames: u64,
}

impl<S: Surface> ParticleBackground<S> {
    pub fn new(field: ParticleField, surface: S, canvas: ElementId) -> Self {
        Self {
            field,
            surface,
            canvas,
            subs: Subscriptions::default(),
            mounted: false,
            frames: 0,
        }
    }

    /// Frames rendered since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn fit_to(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
        self.field.resize(width, height);
    }
}

impl<S: Surface> Component for ParticleBackground<S> {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        let vp = host.viewport();
        self.fit_to(vp.width, vp.height);

        self.subs.listen(host, EventTarget::Window, EventKind::Resize);
        self.subs.listen(host, EventTarget::Element(self.canvas), EventKind::PointerMove);
        self.subs.request_frame(host);
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match *event {
            Event::Resize { width, height } => self.fit_to(width, height),
            Event::PointerMove { x, y } => self.field.set_pointer(x, y),
            Event::Frame { .. } => {
                self.subs.frame_ran();
                self.field.frame(&mut self.surface);
                self.frames += 1;
                self.subs.request_frame(host);
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.subs.release(host);
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

// ---------------------------------------------------------------------------
// Pinned reveal (scroll phase)
// ---------------------------------------------------------------------------

/// Tracks a two-viewport section and exposes its scroll phase.
///
/// Scroll and resize only schedule a frame; the recompute happens in that
/// frame, so any number of events within one frame cost one update.
pub struct PinnedReveal {
    pub controller: ScrollController,
    section: ElementId,
    subs: Subscriptions,
    mounted: bool,
    updates: u64,
}

impl PinnedReveal {
    pub fn new(controller: ScrollController, section: ElementId) -> Self {
        Self {
            controller,
            section,
            subs: Subscriptions::default(),
            mounted: false,
            updates: 0,
        }
    }

    pub fn outputs(&self) -> PhaseOutputs {
        self.controller.outputs()
    }

    pub fn phase(&self) -> f32 {
        self.controller.phase()
    }

    pub fn pinned(&self) -> bool {
        self.controller.pinned()
    }

    /// Recomputes performed since construction.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn frame_pending(&self) -> bool {
        self.subs.frame_pending()
    }

    fn update(&mut self, host: &dyn Host) {
        let Some(top) = host.element_top(self.section) else {
            return;
        };
        self.controller.update(top, host.viewport().height);
        self.updates += 1;
    }
}

impl Component for PinnedReveal {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        self.update(host);
        self.subs.listen(host, EventTarget::Window, EventKind::Scroll);
        self.subs.listen(host, EventTarget::Window, EventKind::Resize);
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match event {
            Event::Scroll | Event::Resize { .. } => {
                self.subs.request_frame(host);
            }
            Event::Frame { .. } => {
                self.subs.frame_ran();
                self.update(host);
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.subs.release(host);
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

// ---------------------------------------------------------------------------
// One-shot reveal group
// ---------------------------------------------------------------------------

pub struct RevealGroup {
    pub config: RevealConfig,
    reveals: Vec<Reveal>,
    mounted: bool,
}

impl RevealGroup {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            reveals: Vec::new(),
            mounted: false,
        }
    }

    /// Add an element before mount. Elements added after mount are observed
    /// on the next mount only.
    pub fn push(&mut self, element: ElementId, animation: RevealAnimation, delay_ms: u32) {
        self.reveals.push(Reveal::new(element, animation, delay_ms));
    }

    pub fn reveals(&self) -> &[Reveal] {
        &self.reveals
    }

    pub fn revealed_count(&self) -> usize {
        self.reveals.iter().filter(|r| r.is_revealed()).count()
    }
}

impl Component for RevealGroup {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        for r in self.reveals.iter().filter(|r| r.is_watching()) {
            host.observe(r.element, &self.config);
        }
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match *event {
            Event::Intersection { element, intersecting, .. } => {
                let reduced = self.config.reduced_motion;
                if let Some(r) = self.reveals.iter_mut().find(|r| r.element == element) {
                    r.on_intersection(intersecting, reduced, host);
                }
            }
            Event::Timeout(id) => {
                for r in self.reveals.iter_mut() {
                    if r.on_timeout(id, host) {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        for r in self.reveals.iter_mut() {
            r.cancel(host);
        }
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

// ---------------------------------------------------------------------------
// Hero parallax
// ---------------------------------------------------------------------------

/// Hero section: scroll drift, pointer-following accents, header flag.
pub struct HeroMotion {
    pointer: Vec2,
    outputs: HeroOutputs,
    subs: Subscriptions,
    mounted: bool,
}

impl Default for HeroMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroMotion {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::ZERO,
            outputs: HeroOutputs::default(),
            subs: Subscriptions::default(),
            mounted: false,
        }
    }

    pub fn outputs(&self) -> HeroOutputs {
        self.outputs
    }
}

impl Component for HeroMotion {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        self.outputs = HeroOutputs::compute(host.viewport().scroll_y, self.pointer);
        self.subs.listen(host, EventTarget::Window, EventKind::Scroll);
        self.subs.listen(host, EventTarget::Window, EventKind::PointerMove);
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match *event {
            Event::PointerMove { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.subs.request_frame(host);
            }
            Event::Scroll => {
                self.subs.request_frame(host);
            }
            Event::Frame { .. } => {
                self.subs.frame_ran();
                self.outputs = HeroOutputs::compute(host.viewport().scroll_y, self.pointer);
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.subs.release(host);
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

// ---------------------------------------------------------------------------
// Services hover preview
// ---------------------------------------------------------------------------

/// Longest frame gap fed to the spring, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

/// Distance and speed below which the preview stops animating.
const REST_EPSILON: f32 = 0.5;

/// Preview card that springs after the cursor and tracks which service row
/// has the cursor over its right half.
pub struct HoverPreview {
    pub spring: SpringFollower,
    rows: Vec<ElementId>,
    hovered: Option<usize>,
    last_frame: Option<f64>,
    subs: Subscriptions,
    mounted: bool,
}

impl HoverPreview {
    pub fn new(rows: Vec<ElementId>) -> Self {
        Self {
            spring: SpringFollower::new(SpringParams::default(), Vec2::ZERO),
            rows,
            hovered: None,
            last_frame: None,
            subs: Subscriptions::default(),
            mounted: false,
        }
    }

    /// Smoothed preview position in viewport px.
    pub fn position(&self) -> Vec2 {
        self.spring.position
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn animating(&self) -> bool {
        self.subs.frame_pending()
    }

    fn track(&mut self, pointer: Vec2, host: &dyn Host) {
        let rects: Vec<_> = self
            .rows
            .iter()
            .map(|&row| host.element_rect(row).unwrap_or_default())
            .collect();
        self.hovered = hovered_row(&rects, pointer);
        self.spring.set_target(pointer);
    }
}

impl Component for HoverPreview {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        self.subs.listen(host, EventTarget::Window, EventKind::PointerMove);
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match *event {
            Event::PointerMove { x, y } => {
                self.track(Vec2::new(x, y), host);
                self.subs.request_frame(host);
            }
            Event::Frame { time_ms } => {
                self.subs.frame_ran();
                let dt = match self.last_frame {
                    Some(last) => ((time_ms - last) / 1000.0) as f32,
                    None => 1.0 / 60.0,
                };
                self.spring.step(dt.min(MAX_FRAME_DT));
                if self.spring.at_rest(REST_EPSILON) {
                    self.last_frame = None;
                } else {
                    self.last_frame = Some(time_ms);
                    self.subs.request_frame(host);
                }
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.subs.release(host);
        self.last_frame = None;
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

// ---------------------------------------------------------------------------
// Image grid timeline
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridOutputs {
    pub scaler_progress: f32,
    pub layer_progress: f32,
    /// Current width and height of the center image, px.
    pub scaler_size: Vec2,
    pub layers: Vec<LayerState>,
}

/// Scroll-scrubbed image grid: the center image shrinks into its cell while
/// the surrounding layers fade and scale in one after another.
pub struct GridTimeline {
    section: ElementId,
    natural: Vec2,
    stagger: LayerStagger,
    outputs: GridOutputs,
    subs: Subscriptions,
    mounted: bool,
}

impl GridTimeline {
    /// `natural` is the center image's size once it sits in the grid.
    pub fn new(section: ElementId, natural: Vec2, layer_count: usize) -> Self {
        let stagger = LayerStagger::new(layer_count);
        let outputs = GridOutputs {
            layers: stagger.layers(0.0),
            ..Default::default()
        };
        Self {
            section,
            natural,
            stagger,
            outputs,
            subs: Subscriptions::default(),
            mounted: false,
        }
    }

    pub fn outputs(&self) -> &GridOutputs {
        &self.outputs
    }

    fn update(&mut self, host: &dyn Host) {
        let Some(rect) = host.element_rect(self.section) else {
            return;
        };
        let vp = host.viewport();
        let scaler_progress = ScrubRange::SCALER.progress(&rect, vp.height);
        let layer_progress = ScrubRange::LAYERS.progress(&rect, vp.height);
        let tween = ScalerTween::new(Vec2::new(vp.width, vp.height), self.natural);
        self.outputs = GridOutputs {
            scaler_progress,
            layer_progress,
            scaler_size: tween.size(scaler_progress),
            layers: self.stagger.layers(layer_progress),
        };
    }
}

impl Component for GridTimeline {
    fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        self.update(host);
        self.subs.listen(host, EventTarget::Window, EventKind::Scroll);
        self.subs.listen(host, EventTarget::Window, EventKind::Resize);
        self.mounted = true;
    }

    fn handle(&mut self, event: &Event, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        match event {
            Event::Scroll | Event::Resize { .. } => {
                self.subs.request_frame(host);
            }
            Event::Frame { .. } => {
                self.subs.frame_ran();
                self.update(host);
            }
            _ => {}
        }
    }

    fn unmount(&mut self, host: &mut dyn Host) {
        self.subs.release(host);
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
