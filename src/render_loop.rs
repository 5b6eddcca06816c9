use crate::field::ParticleField;
use crate::host::{FrameId, Host, ListenerId};
use crate::particle::{self, Particle};
use crate::settings::ParticleSettings;
use crate::surface::Surface;
use crate::theme::{Rgb, ACCENT};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Lifecycle of the background animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running { frame: FrameId, listener: ListenerId },
    Stopped,
}

/// What a single frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub lines: usize,
}

/// Opacity of the line joining two particles `distance_sq` apart, or `None`
/// when they are at or beyond the threshold. Fades linearly from `peak` at
/// zero distance to transparent at the threshold.
pub fn connection_opacity(distance_sq: f32, threshold_sq: f32, peak: f32) -> Option<f32> {
    if distance_sq < threshold_sq {
        Some((1.0 - distance_sq / threshold_sq) * peak)
    } else {
        None
    }
}

/// Stroke a line between every close pair. Each unordered pair is visited
/// once; self-pairs are visited too and produce zero-length strokes.
pub fn connect<S: Surface + ?Sized>(
    particles: &[Particle],
    threshold_sq: f32,
    settings: &ParticleSettings,
    color: Rgb,
    surface: &mut S,
) -> usize {
    let mut lines = 0;
    for a in 0..particles.len() {
        for b in a..particles.len() {
            let pa = &particles[a];
            let pb = &particles[b];
            if let Some(opacity) =
                connection_opacity(pa.distance_sq(pb), threshold_sq, settings.link_alpha)
            {
                surface.stroke_line(
                    (pa.x, pa.y),
                    (pb.x, pb.y),
                    settings.link_width,
                    color.with_alpha(opacity),
                );
                lines += 1;
            }
        }
    }
    lines
}

/// Drives the particle background: owns the field, reschedules itself each
/// frame, and re-seeds on resize.
pub struct RenderLoop<R: Rng = ThreadRng> {
    state: LoopState,
    field: Option<ParticleField>,
    settings: ParticleSettings,
    pub draw_connections: bool,
    pub color: Rgb,
    pub frames: u64,
    rng: R,
}

impl RenderLoop<ThreadRng> {
    pub fn new(settings: ParticleSettings) -> Self {
        Self::with_rng(settings, rand::thread_rng())
    }
}

impl<R: Rng> RenderLoop<R> {
    pub fn with_rng(settings: ParticleSettings, rng: R) -> Self {
        Self {
            state: LoopState::Uninitialized,
            field: None,
            settings,
            draw_connections: true,
            color: ACCENT,
            frames: 0,
            rng,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Start the animation. Does nothing unless the loop is uninitialized;
    /// with a zero-area viewport there is no surface to draw on, so the loop
    /// stays uninitialized and `false` is returned.
    pub fn mount<S: Surface + ?Sized>(&mut self, host: &mut Host, surface: &mut S) -> bool {
        if self.state != LoopState::Uninitialized {
            return self.is_running();
        }

        let (width, height) = host.viewport();
        if width <= 0.0 || height <= 0.0 {
            tracing::warn!(width, height, "no drawing surface, particle background not started");
            return false;
        }

        surface.resize(width, height);
        self.field = Some(ParticleField::seed(width, height, &self.settings, &mut self.rng));
        let listener = host.subscribe_resize();
        let frame = host.request_frame();
        self.state = LoopState::Running { frame, listener };

        tracing::info!(width, height, particles = self.particle_count(), "particle background mounted");
        true
    }

    /// Frame callback. Runs one frame if `id` is the frame this loop asked for,
    /// then requests the next one.
    pub fn on_frame<S: Surface + ?Sized>(
        &mut self,
        id: FrameId,
        host: &mut Host,
        surface: &mut S,
    ) -> Option<FrameStats> {
        let LoopState::Running { frame, listener } = self.state else {
            return None;
        };
        if frame != id {
            return None;
        }

        let stats = self.frame(surface);
        let next = host.request_frame();
        self.state = LoopState::Running { frame: next, listener };
        Some(stats)
    }

    /// Advance every particle, clear, draw particles, then connect close pairs
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let Some(field) = self.field.as_mut() else {
            return FrameStats::default();
        };

        let bounds = field.bounds;
        for p in field.particles.iter_mut() {
            *p = particle::advance(*p, bounds);
        }

        surface.clear();
        let fill = self.color.with_alpha(self.settings.particle_alpha);
        for p in &field.particles {
            particle::draw(p, surface, fill);
        }

        let lines = if self.draw_connections {
            let threshold_sq = self.settings.link_threshold_sq(field.class);
            connect(&field.particles, threshold_sq, &self.settings, self.color, surface)
        } else {
            0
        };

        self.frames += 1;
        FrameStats {
            particles: field.particles.len(),
            lines,
        }
    }

    /// Resize listener: match the surface to the new viewport and start over
    /// with a fresh population. The frame chain is untouched.
    pub fn on_resize<S: Surface + ?Sized>(&mut self, host: &Host, surface: &mut S) {
        if !self.is_running() {
            return;
        }
        let (width, height) = host.viewport();
        surface.resize(width, height);
        if let Some(field) = self.field.as_mut() {
            field.reseed(width, height, &self.settings, &mut self.rng);
        }
        tracing::info!(width, height, particles = self.particle_count(), "particle background reset");
    }

    /// Whether `id` is this loop's resize subscription
    pub fn listens_to(&self, id: ListenerId) -> bool {
        matches!(self.state, LoopState::Running { listener, .. } if listener == id)
    }

    /// Cancel the pending frame and drop the resize subscription. Safe to call
    /// any number of times.
    pub fn teardown(&mut self, host: &mut Host) {
        match self.state {
            LoopState::Running { frame, listener } => {
                host.cancel_frame(frame);
                host.unsubscribe_resize(listener);
                self.field = None;
                self.state = LoopState::Stopped;
                tracing::info!(frames = self.frames, "particle background stopped");
            }
            LoopState::Uninitialized => self.state = LoopState::Stopped,
            LoopState::Stopped => {}
        }
    }

    fn particle_count(&self) -> usize {
        self.field.as_ref().map_or(0, |f| f.len())
    }
}
