use std::f32::consts::PI;

/// Clamp to [0,1]. NaN maps to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Remap `x` from the window `[start, end]` to [0,1], clamped.
///
/// Values at or below `start` give 0, values at or above `end` give 1.
#[inline]
pub fn remap01(x: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return if x >= end { 1.0 } else { 0.0 };
    }
    clamp01((x - start) / span)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Decelerating cubic: `1 - (1-t)^3`. Exact at both ends.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// `power1.inOut` (quadratic in-out).
pub fn power1_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// `power2.inOut` (cubic in-out).
pub fn power2_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// `power3.inOut` (quartic in-out).
pub fn power3_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// `power4.inOut` (quintic in-out).
pub fn power4_in_out(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

pub fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

/// Named easing curves used by the scroll timelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutCubic,
    Power1InOut,
    Power2InOut,
    Power3InOut,
    Power4InOut,
    SineOut,
}

impl Ease {
    /// Evaluate at `t`, clamped to [0,1] first.
    pub fn apply(self, t: f32) -> f32 {
        let t = clamp01(t);
        match self {
            Ease::Linear => t,
            Ease::OutCubic => ease_out_cubic(t),
            Ease::Power1InOut => power1_in_out(t),
            Ease::Power2InOut => power2_in_out(t),
            Ease::Power3InOut => power3_in_out(t),
            Ease::Power4InOut => power4_in_out(t),
            Ease::SineOut => sine_out(t),
        }
    }
}

/// Axis-aligned box in viewport px, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}
