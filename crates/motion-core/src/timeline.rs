//! Scroll-scrubbed timelines for the image-grid choreography.
//!
//! A [`ScrubRange`] turns an element's bounds into progress between two
//! anchor points ("element top at 80% of the viewport" to "element bottom
//! at 20%"). Timelines then map that progress onto staggered tweens.

use glam::Vec2;

use crate::math::{clamp01, lerp, Ease, Rect};

/// Default tween duration in timeline units.
pub const TWEEN_DURATION: f32 = 0.5;

/// Offset between successive layer tweens.
pub const LAYER_STAGGER: f32 = 0.2;

/// Gutter subtracted from the viewport for the scaler's starting size.
pub const SCALER_INSET: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// "Element edge meets this fraction of the viewport height".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub edge: Edge,
    pub viewport: f32,
}

impl Anchor {
    pub const fn new(edge: Edge, viewport: f32) -> Self {
        Self { edge, viewport }
    }

    /// Scroll distance from now until this anchor is reached.
    fn distance(&self, rect: &Rect, viewport_h: f32) -> f32 {
        let edge_y = match self.edge {
            Edge::Top => rect.top,
            Edge::Bottom => rect.bottom(),
        };
        edge_y - self.viewport * viewport_h
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubRange {
    pub start: Anchor,
    pub end: Anchor,
}

impl ScrubRange {
    /// Top at 80%, bottom at 20%: the scaler's range.
    pub const SCALER: ScrubRange = ScrubRange {
        start: Anchor::new(Edge::Top, 0.8),
        end: Anchor::new(Edge::Bottom, 0.2),
    };

    /// Top at 80%, bottom at the top: the layers' range.
    pub const LAYERS: ScrubRange = ScrubRange {
        start: Anchor::new(Edge::Top, 0.8),
        end: Anchor::new(Edge::Bottom, 0.0),
    };

    /// Progress in [0,1] for the element's current bounds.
    pub fn progress(&self, rect: &Rect, viewport_h: f32) -> f32 {
        let to_start = self.start.distance(rect, viewport_h);
        let to_end = self.end.distance(rect, viewport_h);
        let span = to_end - to_start;
        if !(span > 0.0) {
            return if to_end <= 0.0 { 1.0 } else { 0.0 };
        }
        clamp01(-to_start / span)
    }
}

/// Visual state of one grid layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerState {
    pub opacity: f32,
    pub scale: f32,
}

/// Layers fading and scaling in one after another.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerStagger {
    pub count: usize,
    pub stagger: f32,
    pub duration: f32,
}

impl LayerStagger {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            stagger: LAYER_STAGGER,
            duration: TWEEN_DURATION,
        }
    }

    /// Timeline length: the last layer's start plus one tween.
    pub fn total(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        (self.count - 1) as f32 * self.stagger + self.duration
    }

    /// Scale ease for layer `index`: outer layers ease gently, inner ones harder.
    pub fn scale_ease(index: usize) -> Ease {
        match index {
            0 => Ease::Power1InOut,
            1 => Ease::Power3InOut,
            _ => Ease::Power4InOut,
        }
    }

    pub fn layer(&self, index: usize, progress: f32) -> LayerState {
        let time = clamp01(progress) * self.total();
        let local = if self.duration > 0.0 {
            clamp01((time - index as f32 * self.stagger) / self.duration)
        } else {
            1.0
        };
        LayerState {
            opacity: Ease::SineOut.apply(local),
            scale: Self::scale_ease(index).apply(local),
        }
    }

    pub fn layers(&self, progress: f32) -> Vec<LayerState> {
        (0..self.count).map(|i| self.layer(i, progress)).collect()
    }
}

/// Center image shrinking from nearly full-viewport to its grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalerTween {
    pub viewport: Vec2,
    pub natural: Vec2,
}

impl ScalerTween {
    pub fn new(viewport: Vec2, natural: Vec2) -> Self {
        Self { viewport, natural }
    }

    /// Width and height at `progress`.
    pub fn size(&self, progress: f32) -> Vec2 {
        let from = (self.viewport - Vec2::splat(SCALER_INSET)).max(Vec2::ZERO);
        let wt = Ease::Power2InOut.apply(progress);
        let ht = Ease::Power1InOut.apply(progress);
        Vec2::new(lerp(from.x, self.natural.x, wt), lerp(from.y, self.natural.y, ht))
    }
}
