use crate::particle::{Bounds, Particle};
use crate::settings::{ParticleSettings, ViewportClass};
use rand::Rng;

/// The full particle population for one viewport size.
///
/// There is no incremental update: a resize throws the whole population away
/// and seeds a new one.
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub bounds: Bounds,
    pub class: ViewportClass,
}

impl ParticleField {
    /// Seed a field for the given viewport
    pub fn seed<R: Rng>(
        width: f32,
        height: f32,
        settings: &ParticleSettings,
        rng: &mut R,
    ) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            bounds: Bounds::new(width, height),
            class: settings.classify(width),
        };
        field.reseed(width, height, settings, rng);
        field
    }

    /// Replace every particle with a freshly randomized one
    pub fn reseed<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        settings: &ParticleSettings,
        rng: &mut R,
    ) {
        self.bounds = Bounds::new(width, height);
        self.class = settings.classify(width);
        let count = settings.count_for(self.class);

        self.particles = (0..count)
            .map(|_| {
                let radius = sample(rng, settings.min_radius, settings.max_radius);
                let x = sample(rng, 0.0, width);
                let y = sample(rng, 0.0, height);
                let dx = sample(rng, -settings.max_speed, settings.max_speed);
                let dy = sample(rng, -settings.max_speed, settings.max_speed);
                Particle::new(x, y, dx, dy, radius)
            })
            .collect();

        tracing::debug!(
            count,
            width,
            height,
            class = self.class.name(),
            "particle field seeded"
        );
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

/// Uniform sample in [lo, hi]; collapses to `lo` for an empty range
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_desktop_scenario() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::seed(1024.0, 768.0, &ParticleSettings::default(), &mut rng);

        assert_eq!(field.class, ViewportClass::Desktop);
        assert_eq!(field.len(), 60);
        for p in &field.particles {
            assert!((0.0..=1024.0).contains(&p.x));
            assert!((0.0..=768.0).contains(&p.y));
            assert!((1.0..=3.0).contains(&p.radius));
            assert!(p.dx.abs() <= 0.2);
            assert!(p.dy.abs() <= 0.2);
        }
    }

    #[test]
    fn test_count_follows_classification() {
        let settings = ParticleSettings::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::seed(640.0, 480.0, &settings, &mut rng);
        assert_eq!(field.class, ViewportClass::Mobile);
        assert_eq!(field.len(), 30);

        field.reseed(767.0, 900.0, &settings, &mut rng);
        assert_eq!(field.len(), 30);

        field.reseed(768.0, 900.0, &settings, &mut rng);
        assert_eq!(field.class, ViewportClass::Desktop);
        assert_eq!(field.len(), 60);

        field.reseed(320.0, 200.0, &settings, &mut rng);
        assert_eq!(field.len(), 30);
    }

    #[test]
    fn test_reseed_replaces_every_particle() {
        let settings = ParticleSettings::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut field = ParticleField::seed(1200.0, 800.0, &settings, &mut rng);
        let before = field.particles.clone();

        field.reseed(1200.0, 800.0, &settings, &mut rng);
        assert_eq!(field.len(), before.len());
        for old in &before {
            assert!(!field
                .particles
                .iter()
                .any(|p| p.x == old.x && p.y == old.y));
        }
    }

    #[test]
    fn test_degenerate_ranges_do_not_panic() {
        let settings = ParticleSettings {
            min_radius: 2.0,
            max_radius: 2.0,
            max_speed: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::seed(0.0, 0.0, &settings, &mut rng);
        assert_eq!(field.len(), 30);
        assert!(field.particles.iter().all(|p| p.radius == 2.0 && p.dx == 0.0));
    }
}
