use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;

/// SoA particle storage
pub struct ParticleSet {
    pub count: usize,
    /// Canvas-local pixel coordinates
    pub position: Vec<Vec2>,
    /// Pixels per frame
    pub velocity: Vec<Vec2>,
    /// Circle radius in px
    pub size: Vec<f32>,
    /// Base opacity, fixed for the particle's lifetime
    pub opacity: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec2::ZERO; count],
            velocity: vec![Vec2::ZERO; count],
            size: vec![0.5; count],
            opacity: vec![0.3; count],
        }
    }

    /// Scatter `count` particles uniformly over a `width` x `height` canvas.
    pub fn scatter<R: Rng + ?Sized>(
        count: usize,
        width: f32,
        height: f32,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Self {
        let mut set = Self::new(count);
        for i in 0..count {
            set.position[i] = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
            set.velocity[i] = Vec2::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * config.speed,
                (rng.gen::<f32>() - 0.5) * 2.0 * config.speed,
            );
            set.size[i] = config.min_size + rng.gen::<f32>() * (config.max_size - config.min_size);
            set.opacity[i] =
                config.min_opacity + rng.gen::<f32>() * (config.max_opacity - config.min_opacity);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Number of particles for a canvas: floor(W*H / area_per_particle).
///
/// Degenerate input (non-finite or non-positive dimensions) yields zero.
/// There is no cap beyond the formula itself.
pub fn particle_count(width: f32, height: f32, area_per_particle: f32) -> usize {
    if !(width.is_finite() && height.is_finite() && area_per_particle.is_finite()) {
        return 0;
    }
    if width <= 0.0 || height <= 0.0 || area_per_particle <= 0.0 {
        return 0;
    }
    ((width as f64 * height as f64) / area_per_particle as f64).floor() as usize
}

/// Advance one particle by its velocity and reflect off the canvas edges.
///
/// A coordinate outside `[0, extent]` after the move flips the matching
/// velocity component; the position is then clamped back inside.
#[inline]
pub fn integrate(position: &mut Vec2, velocity: &mut Vec2, width: f32, height: f32) {
    *position += *velocity;

    if position.x < 0.0 || position.x > width {
        velocity.x = -velocity.x;
    }
    if position.y < 0.0 || position.y > height {
        velocity.y = -velocity.y;
    }

    position.x = position.x.clamp(0.0, width.max(0.0));
    position.y = position.y.clamp(0.0, height.max(0.0));
}
