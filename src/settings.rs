use serde::{Deserialize, Serialize};

/// What the background layer draws
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Particles plus proximity lines
    #[default]
    Constellation,
    /// Particles only, connection pass skipped
    Particles,
    /// Render loop torn down, plain background
    Off,
}

impl Backdrop {
    pub fn name(&self) -> &str {
        match self {
            Backdrop::Constellation => "Constellation",
            Backdrop::Particles => "Particles",
            Backdrop::Off => "Off",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Backdrop::Constellation => Backdrop::Particles,
            Backdrop::Particles => Backdrop::Off,
            Backdrop::Off => Backdrop::Constellation,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "constellation" | "lines" | "full" => Some(Backdrop::Constellation),
            "particles" | "dots" => Some(Backdrop::Particles),
            "off" | "none" => Some(Backdrop::Off),
            _ => None,
        }
    }

    pub fn draws_connections(&self) -> bool {
        matches!(self, Backdrop::Constellation)
    }
}

/// Binary viewport classification, re-evaluated on every resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn name(&self) -> &str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Desktop => "desktop",
        }
    }
}

/// Tunables for the particle background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Viewports narrower than this (logical px) are mobile
    pub mobile_breakpoint: f32,
    /// Particle count below the breakpoint
    pub mobile_count: usize,
    /// Particle count at or above the breakpoint
    pub desktop_count: usize,
    /// Per-axis velocity is drawn from [-max_speed, max_speed]
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Connection distance on mobile (px)
    pub mobile_link_distance: f32,
    /// Connection distance on desktop (px)
    pub desktop_link_distance: f32,
    /// Fill alpha for particle dots
    pub particle_alpha: f32,
    /// Line alpha at zero distance
    pub link_alpha: f32,
    pub link_width: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            mobile_count: 30,
            desktop_count: 60,
            max_speed: 0.2,
            min_radius: 1.0,
            max_radius: 3.0,
            mobile_link_distance: 80.0,
            desktop_link_distance: 120.0,
            particle_alpha: 0.3,
            link_alpha: 0.3,
            link_width: 1.0,
        }
    }
}

impl ParticleSettings {
    pub fn classify(&self, viewport_width: f32) -> ViewportClass {
        if viewport_width < self.mobile_breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn count_for(&self, class: ViewportClass) -> usize {
        match class {
            ViewportClass::Mobile => self.mobile_count,
            ViewportClass::Desktop => self.desktop_count,
        }
    }

    /// Squared connection threshold; 6,400 on mobile and 14,400 on desktop by default
    pub fn link_threshold_sq(&self, class: ViewportClass) -> f32 {
        let d = match class {
            ViewportClass::Mobile => self.mobile_link_distance,
            ViewportClass::Desktop => self.desktop_link_distance,
        };
        d * d
    }

    /// Pull out-of-range values back into something drawable
    pub fn sanitized(mut self) -> Self {
        self.max_speed = self.max_speed.abs();
        self.min_radius = self.min_radius.max(0.1);
        self.max_radius = self.max_radius.max(self.min_radius);
        self.particle_alpha = self.particle_alpha.clamp(0.0, 1.0);
        self.link_alpha = self.link_alpha.clamp(0.0, 1.0);
        self.mobile_link_distance = self.mobile_link_distance.max(0.0);
        self.desktop_link_distance = self.desktop_link_distance.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_cycle() {
        let start = Backdrop::default();
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.next(), Backdrop::Particles);
        assert!(Backdrop::Constellation.draws_connections());
        assert!(!Backdrop::Particles.draws_connections());
        assert_eq!(Backdrop::parse("OFF"), Some(Backdrop::Off));
        assert_eq!(Backdrop::parse("sparkles"), None);
    }

    #[test]
    fn test_classification_threshold() {
        let s = ParticleSettings::default();
        assert_eq!(s.classify(767.9), ViewportClass::Mobile);
        assert_eq!(s.classify(768.0), ViewportClass::Desktop);
        assert_eq!(s.count_for(ViewportClass::Mobile), 30);
        assert_eq!(s.count_for(ViewportClass::Desktop), 60);
        assert_eq!(s.link_threshold_sq(ViewportClass::Mobile), 6_400.0);
        assert_eq!(s.link_threshold_sq(ViewportClass::Desktop), 14_400.0);
    }

    #[test]
    fn test_sanitized_orders_radius_range() {
        let s = ParticleSettings {
            min_radius: 4.0,
            max_radius: 2.0,
            max_speed: -0.5,
            link_alpha: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.min_radius, 4.0);
        assert_eq!(s.max_radius, 4.0);
        assert_eq!(s.max_speed, 0.5);
        assert_eq!(s.link_alpha, 1.0);
    }
}
