//! Ambient particle backdrop: drifting points joined by proximity lines,
//! with extra lines reaching toward the pointer.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::error::Result;
use crate::grid::SpatialGrid;
use crate::particle::{integrate, particle_count, ParticleSet};
use crate::surface::{GradientStop, Rgba, Surface};

pub struct ParticleField {
    pub particles: ParticleSet,
    config: FieldConfig,
    pointer: Vec2,
    width: f32,
    height: f32,
    grid: SpatialGrid,
    rng: SmallRng,
}

impl ParticleField {
    /// Field seeded from OS entropy.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Deterministic field for a given seed.
    pub fn seeded(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, width: f32, height: f32, rng: SmallRng) -> Self {
        let mut field = Self {
            particles: ParticleSet::new(0),
            grid: SpatialGrid::new(config.link_distance, 0.0, 0.0),
            config,
            pointer: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            rng,
        };
        field.resize(width, height);
        field
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Swap the tuning in place. Particles are kept; the link grid is
    /// rebuilt for the new link distance.
    pub fn set_config(&mut self, config: FieldConfig) -> Result<()> {
        config.validate()?;
        self.grid = SpatialGrid::new(config.link_distance, self.width, self.height);
        self.config = config;
        Ok(())
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Last known pointer position in canvas-local coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Throw away every particle and scatter a fresh set for the new size.
    pub fn resize(&mut self, width: f32, height: f32) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let count = particle_count(width, height, self.config.area_per_particle);

        self.width = width;
        self.height = height;
        self.particles = ParticleSet::scatter(count, width, height, &self.config, &mut self.rng);
        self.grid = SpatialGrid::new(self.config.link_distance, width, height);

        log::debug!("particle field regenerated: {}x{} -> {} particles", width, height, count);
    }

    /// Render one frame and advance the simulation.
    ///
    /// Order: trail fade, particle links, pointer links, then integrate and
    /// draw each particle at its new position.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let cfg = &self.config;

        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(self.width, self.height),
            Rgba::new(0, 0, 0, cfg.trail_alpha),
        );

        if self.particles.is_empty() {
            return;
        }

        let links = self.draw_links(surface);
        let pointer_links = self.draw_pointer_links(surface);

        self.step();

        let cfg = &self.config;
        for i in 0..self.particles.count {
            let opacity = self.particles.opacity[i];
            surface.fill_circle(
                self.particles.position[i],
                self.particles.size[i],
                Rgba::rgb(cfg.particle_color, opacity),
                Rgba::rgb(cfg.particle_color, opacity * 0.5),
                cfg.shadow_blur,
            );
        }

        log::trace!(
            "frame: {} particles, {} links, {} pointer links",
            self.particles.count,
            links,
            pointer_links
        );
    }

    /// Integrate every particle one frame with edge reflection.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.particles
                .position
                .par_iter_mut()
                .zip(self.particles.velocity.par_iter_mut())
                .for_each(|(p, v)| integrate(p, v, w, h));
        }

        #[cfg(not(feature = "parallel"))]
        for (p, v) in self
            .particles
            .position
            .iter_mut()
            .zip(self.particles.velocity.iter_mut())
        {
            integrate(p, v, w, h);
        }
    }

    /// Every unordered pair closer than the link distance, `i < j`.
    pub fn links(&mut self) -> Vec<(usize, usize, f32)> {
        let mut out = Vec::new();
        self.grid.build(&self.particles.position);
        self.grid.for_each_pair_within(
            &self.particles.position,
            self.config.link_distance,
            |i, j, d| out.push((i, j, d)),
        );
        out
    }

    fn draw_links<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let cfg = &self.config;
        let max = cfg.link_distance;
        let end = cfg.particle_color;
        let mid = cfg.link_mid_color;
        let width = cfg.link_width;
        let base_alpha = cfg.link_alpha;
        let positions = &self.particles.position;

        self.grid.build(positions);

        let mut drawn = 0;
        self.grid.for_each_pair_within(positions, max, |i, j, d| {
            let alpha = link_alpha(d, max, base_alpha);
            let stops = [
                GradientStop { offset: 0.0, color: Rgba::rgb(end, alpha) },
                GradientStop { offset: 0.5, color: Rgba::rgb(mid, alpha * 1.2) },
                GradientStop { offset: 1.0, color: Rgba::rgb(end, alpha) },
            ];
            surface.stroke_gradient_line(positions[i], positions[j], &stops, width);
            drawn += 1;
        });
        drawn
    }

    fn draw_pointer_links<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let cfg = &self.config;
        let max = cfg.pointer_distance;
        let mut drawn = 0;
        for &p in &self.particles.position {
            let d = p.distance(self.pointer);
            if d < max {
                let alpha = pointer_alpha(d, max, cfg.pointer_alpha);
                surface.stroke_line(p, self.pointer, Rgba::rgb(cfg.pointer_color, alpha), cfg.pointer_width);
                drawn += 1;
            }
        }
        drawn
    }
}

/// Link opacity: quadratic falloff `(1 - d/max)^2 * base`.
#[inline]
pub fn link_alpha(distance: f32, max: f32, base: f32) -> f32 {
    let f = 1.0 - distance / max;
    f * f * base
}

/// Pointer-link opacity: linear falloff `(1 - d/max) * base`.
#[inline]
pub fn pointer_alpha(distance: f32, max: f32, base: f32) -> f32 {
    (1.0 - distance / max) * base
}
