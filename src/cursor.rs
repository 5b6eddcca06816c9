use crate::motion::Spring;
use crate::settings::ViewportClass;
use crate::surface::Surface;
use crate::theme::{Rgb, ACCENT};
use std::f32::consts::TAU;
use std::time::Duration;

const SPRING_STIFFNESS: f32 = 300.0;
const SPRING_DAMPING: f32 = 20.0;

/// Ring diameter at rest and while hovering something interactive (px)
const DEFAULT_SIZE: f32 = 32.0;
const HOVER_SIZE: f32 = 48.0;

/// Fill alpha while hovering
const HOVER_FILL_ALPHA: f32 = 0.1;
const RING_ALPHA: f32 = 1.0;
const RING_SEGMENTS: usize = 32;

/// Which look the follower is animating toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorVariant {
    Default,
    Hover,
}

impl CursorVariant {
    pub fn size(&self) -> f32 {
        match self {
            CursorVariant::Default => DEFAULT_SIZE,
            CursorVariant::Hover => HOVER_SIZE,
        }
    }

    pub fn fill_alpha(&self) -> f32 {
        match self {
            CursorVariant::Default => 0.0,
            CursorVariant::Hover => HOVER_FILL_ALPHA,
        }
    }
}

/// A ring that chases the pointer on a spring and grows over interactive elements
#[derive(Debug, Clone)]
pub struct CursorFollower {
    pointer: Option<(f32, f32)>,
    hovering: bool,
    x: Spring,
    y: Spring,
    size: Spring,
    fill: Spring,
    pub enabled: bool,
    pub color: Rgb,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        Self {
            pointer: None,
            hovering: false,
            x: Spring::new(SPRING_STIFFNESS, SPRING_DAMPING, 0.0),
            y: Spring::new(SPRING_STIFFNESS, SPRING_DAMPING, 0.0),
            size: Spring::new(SPRING_STIFFNESS, SPRING_DAMPING, DEFAULT_SIZE),
            fill: Spring::new(SPRING_STIFFNESS, SPRING_DAMPING, 0.0),
            enabled: true,
            color: ACCENT,
        }
    }

    #[cfg(test)]
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    #[cfg(test)]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn variant(&self) -> CursorVariant {
        if self.hovering {
            CursorVariant::Hover
        } else {
            CursorVariant::Default
        }
    }

    /// Track a pointer move. The very first position is adopted without
    /// animation so the ring does not fly in from the corner.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let first = self.pointer.is_none();
        self.pointer = Some((x, y));
        self.retarget();
        if first {
            self.x.snap(self.x.target);
            self.y.snap(self.y.target);
        }
    }

    /// Hover enter/leave on an interactive element
    pub fn set_hovering(&mut self, hovering: bool) {
        if self.hovering != hovering {
            self.hovering = hovering;
            self.retarget();
        }
    }

    fn retarget(&mut self) {
        let variant = self.variant();
        let half = variant.size() / 2.0;
        if let Some((px, py)) = self.pointer {
            self.x.target = px - half;
            self.y.target = py - half;
        }
        self.size.target = variant.size();
        self.fill.target = variant.fill_alpha();
    }

    pub fn update(&mut self, dt: Duration) {
        if self.pointer.is_none() {
            return;
        }
        self.x.step(dt);
        self.y.step(dt);
        self.size.step(dt);
        self.fill.step(dt);
    }

    /// Drawn only once the pointer has been seen, and never on mobile viewports
    pub fn is_visible(&self, class: ViewportClass) -> bool {
        self.enabled && self.pointer.is_some() && class == ViewportClass::Desktop
    }

    /// Current top-left corner and diameter of the ring
    pub fn frame(&self) -> (f32, f32, f32) {
        (self.x.value, self.y.value, self.size.value)
    }

    /// Center of the ring
    pub fn center(&self) -> (f32, f32) {
        let (x, y, size) = self.frame();
        (x + size / 2.0, y + size / 2.0)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (cx, cy) = self.center();
        let radius = (self.size.value / 2.0).max(0.0);
        let (width, height) = surface.size();
        if cx + radius < 0.0 || cy + radius < 0.0 || cx - radius > width || cy - radius > height {
            return;
        }

        let fill = self.fill.value.clamp(0.0, 1.0);
        if fill > 0.001 {
            surface.fill_circle(cx, cy, radius, self.color.with_alpha(fill));
        }

        let point = |i: usize| {
            let a = TAU * i as f32 / RING_SEGMENTS as f32;
            (cx + radius * a.cos(), cy + radius * a.sin())
        };
        for i in 0..RING_SEGMENTS {
            surface.stroke_line(point(i), point(i + 1), 1.0, self.color.with_alpha(RING_ALPHA));
        }
    }
}
