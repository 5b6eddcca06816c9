use crate::surface::Surface;
use crate::theme::Rgba;

/// A drifting point in viewport pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

/// Axis-aligned box the particles bounce inside, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[cfg(test)]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Particle {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> Self {
        Self { x, y, dx, dy, radius }
    }

    pub fn distance_sq(&self, other: &Particle) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Advance one tick.
///
/// Each axis reflects independently: a velocity component flips when the
/// position on that axis is already outside the bounds, then the velocity is
/// added. Nothing is clamped, so a particle may sit up to one step outside.
pub fn advance(particle: Particle, bounds: Bounds) -> Particle {
    let Particle { mut x, mut y, mut dx, mut dy, radius } = particle;

    if x > bounds.width || x < 0.0 {
        dx = -dx;
    }
    if y > bounds.height || y < 0.0 {
        dy = -dy;
    }
    x += dx;
    y += dy;

    Particle { x, y, dx, dy, radius }
}

pub fn draw<S: Surface + ?Sized>(particle: &Particle, surface: &mut S, color: Rgba) {
    surface.fill_circle(particle.x, particle.y, particle.radius, color);
}
