//! Spring-smoothed cursor used by the services list hover preview.

use glam::Vec2;

use crate::math::Rect;

/// Largest integration step; longer frames are split.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 40.0,
            mass: 1.0,
        }
    }
}

/// 2D damped spring chasing a target.
#[derive(Clone, Debug)]
pub struct SpringFollower {
    pub params: SpringParams,
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
}

impl SpringFollower {
    pub fn new(params: SpringParams, start: Vec2) -> Self {
        Self {
            params,
            position: start,
            velocity: Vec2::ZERO,
            target: start,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advance by `dt` seconds (semi-implicit Euler).
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let inv_mass = 1.0 / self.params.mass.max(1e-6);
        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let force = -self.params.stiffness * (self.position - self.target)
                - self.params.damping * self.velocity;
            self.velocity += force * inv_mass * h;
            self.position += self.velocity * h;
        }
    }

    /// Close enough to the target and slow enough to stop animating.
    pub fn at_rest(&self, epsilon: f32) -> bool {
        self.position.distance(self.target) < epsilon && self.velocity.length() < epsilon
    }
}

/// True when `point` lies in the right half of `rect`, edges included.
pub fn right_half_hit(rect: Rect, point: Vec2) -> bool {
    let mid = rect.left + rect.width / 2.0;
    point.x >= mid && point.x <= rect.right() && point.y >= rect.top && point.y <= rect.bottom()
}

/// Index of the last row whose right half contains `point`.
pub fn hovered_row(rows: &[Rect], point: Vec2) -> Option<usize> {
    rows.iter().rposition(|r| right_half_hit(*r, point))
}
