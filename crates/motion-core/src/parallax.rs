use glam::Vec2;

/// Default speed for free-standing parallax elements.
pub const DEFAULT_PARALLAX_SPEED: f32 = 0.5;

/// Hero background drift per px of scroll.
pub const HERO_DRIFT_SPEED: f32 = 0.1;

/// Scroll offset after which the header switches to its solid style.
pub const HEADER_SCROLL_THRESHOLD: f32 = 50.0;

/// Per-layer pointer multipliers for the hero's floating accents.
pub const HERO_POINTER_LAYERS: [Vec2; 3] = [
    Vec2::new(0.01, 0.01),
    Vec2::new(-0.005, 0.005),
    Vec2::new(0.008, -0.008),
];

/// Vertical translation for an element moving at `speed` times the scroll.
#[inline]
pub fn scroll_parallax(scroll_y: f32, speed: f32) -> f32 {
    scroll_y * speed
}

/// Offset of a layer that follows the pointer by `factor`.
#[inline]
pub fn pointer_parallax(pointer: Vec2, factor: Vec2) -> Vec2 {
    pointer * factor
}

#[inline]
pub fn header_scrolled(scroll_y: f32) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

/// Everything the hero section derives from scroll and pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeroOutputs {
    pub background_y: f32,
    pub layers: [Vec2; 3],
    pub header_scrolled: bool,
}

impl HeroOutputs {
    pub fn compute(scroll_y: f32, pointer: Vec2) -> Self {
        Self {
            background_y: scroll_parallax(scroll_y, HERO_DRIFT_SPEED),
            layers: HERO_POINTER_LAYERS.map(|f| pointer_parallax(pointer, f)),
            header_scrolled: header_scrolled(scroll_y),
        }
    }
}
