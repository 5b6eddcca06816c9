//! Timing helpers for the page animations: easing curves, staggered entrances
//! and a damped spring.

use std::time::Duration;

/// `circOut`: fast start, gentle settle
pub fn circ_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (t - 1.0) * (t - 1.0)).sqrt()
}

/// Symmetric ease for looping pulses
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Progress of a one-shot animation that starts after `delay` and lasts `duration`
pub fn progress(elapsed: Duration, delay: Duration, duration: Duration) -> f32 {
    if elapsed <= delay {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    ((elapsed - delay).as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

/// Fade-and-rise entrance shared by the sections: children stagger in, each
/// one fading from transparent and rising from below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub stagger: Duration,
    pub duration: Duration,
    /// Extra delay before the first child
    pub delay: Duration,
    /// Starting offset below the resting position, in logical px
    pub rise_px: f32,
}

impl Entrance {
    /// Section children: 0.2 s stagger, 0.6 s each, 30 px rise
    pub const SECTION: Entrance = Entrance {
        stagger: Duration::from_millis(200),
        duration: Duration::from_millis(600),
        delay: Duration::ZERO,
        rise_px: 30.0,
    };

    /// Header children: 0.3 s stagger
    pub const HEADER: Entrance = Entrance {
        stagger: Duration::from_millis(300),
        duration: Duration::from_millis(600),
        delay: Duration::ZERO,
        rise_px: 30.0,
    };

    /// Header name letters: 0.5 s lead-in, 0.1 s apart, 0.5 s each, 50 px rise
    pub const NAME_LETTERS: Entrance = Entrance {
        stagger: Duration::from_millis(100),
        duration: Duration::from_millis(500),
        delay: Duration::from_millis(500),
        rise_px: 50.0,
    };

    /// Footer: one plain 1 s fade
    pub const FOOTER: Entrance = Entrance {
        stagger: Duration::ZERO,
        duration: Duration::from_millis(1000),
        delay: Duration::ZERO,
        rise_px: 0.0,
    };

    /// Eased progress of child `index`, `elapsed` after the entrance started
    pub fn child_progress(&self, index: usize, elapsed: Duration) -> f32 {
        let delay = self.delay + self.stagger * index as u32;
        circ_out(progress(elapsed, delay, self.duration))
    }

    /// Opacity and remaining offset (px) of child `index`
    pub fn child_state(&self, index: usize, elapsed: Duration) -> (f32, f32) {
        let p = self.child_progress(index, elapsed);
        (p, self.rise_px * (1.0 - p))
    }

    /// When the last of `children` finishes
    #[cfg(test)]
    pub fn total(&self, children: usize) -> Duration {
        self.delay + self.stagger * children.saturating_sub(1) as u32 + self.duration
    }
}

/// Scale of the section-title icon pulse: 1 -> 1.1 -> 1 every 2 s
pub fn icon_pulse(elapsed: Duration) -> f32 {
    const PERIOD: f32 = 2.0;
    let phase = (elapsed.as_secs_f32() % PERIOD) / PERIOD;
    let t = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
    1.0 + 0.1 * ease_in_out(t)
}

/// Critically-damped-ish spring on one axis, unit mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
}

impl Spring {
    /// Largest integration step; longer frames are split up
    const MAX_STEP: f32 = 1.0 / 120.0;

    pub fn new(stiffness: f32, damping: f32, value: f32) -> Self {
        Self {
            stiffness,
            damping,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Jump straight to a value with no motion
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn step(&mut self, dt: Duration) {
        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let h = remaining.min(Self::MAX_STEP);
            // Semi-implicit Euler
            let accel = self.stiffness * (self.target - self.value) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() < 0.01 && self.velocity.abs() < 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circ_out_endpoints() {
        assert_eq!(circ_out(0.0), 0.0);
        assert_eq!(circ_out(1.0), 1.0);
        assert!(circ_out(0.5) > 0.5);
        assert_eq!(circ_out(2.0), 1.0);
    }

    #[test]
    fn test_progress_with_delay() {
        let d = Duration::from_millis;
        assert_eq!(progress(d(100), d(200), d(600)), 0.0);
        assert!((progress(d(500), d(200), d(600)) - 0.5).abs() < 1e-5);
        assert_eq!(progress(d(5000), d(200), d(600)), 1.0);
        assert_eq!(progress(d(1), d(0), d(0)), 1.0);
    }

    #[test]
    fn test_section_children_stagger() {
        let e = Entrance::SECTION;
        let t = Duration::from_millis(300);
        let (first, first_offset) = e.child_state(0, t);
        let (second, _) = e.child_state(1, t);
        let (third, third_offset) = e.child_state(2, t);
        assert!(first > second);
        assert!(second > 0.0);
        assert_eq!(third, 0.0);
        assert_eq!(third_offset, 30.0);
        assert!(first_offset < 30.0);

        assert_eq!(e.total(3), Duration::from_millis(1000));
        assert_eq!(e.child_state(2, e.total(3)), (1.0, 0.0));
    }

    #[test]
    fn test_name_letters_wait_for_lead_in() {
        let e = Entrance::NAME_LETTERS;
        assert_eq!(e.child_progress(0, Duration::from_millis(500)), 0.0);
        assert!(e.child_progress(0, Duration::from_millis(600)) > 0.0);
        assert_eq!(e.child_progress(2, Duration::from_millis(700)), 0.0);
        assert_eq!(e.child_progress(2, Duration::from_millis(1200)), 1.0);
    }

    #[test]
    fn test_icon_pulse_range() {
        assert!((icon_pulse(Duration::ZERO) - 1.0).abs() < 1e-5);
        assert!((icon_pulse(Duration::from_secs(1)) - 1.1).abs() < 1e-5);
        for ms in (0..4000).step_by(50) {
            let s = icon_pulse(Duration::from_millis(ms));
            assert!((1.0..=1.1 + 1e-5).contains(&s));
        }
    }

    #[test]
    fn test_spring_converges() {
        let mut s = Spring::new(300.0, 20.0, 0.0);
        s.target = 100.0;
        for _ in 0..120 {
            s.step(Duration::from_millis(16));
        }
        assert!(s.is_settled(), "value={} velocity={}", s.value, s.velocity);
    }

    #[test]
    fn test_spring_long_frame_is_stable() {
        let mut s = Spring::new(300.0, 20.0, 0.0);
        s.target = 10.0;
        s.step(Duration::from_secs(3));
        assert!((s.value - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_snap() {
        let mut s = Spring::new(300.0, 20.0, 0.0);
        s.target = 50.0;
        s.step(Duration::from_millis(16));
        s.snap(5.0);
        assert_eq!(s.value, 5.0);
        assert!(s.is_settled());
    }
}
