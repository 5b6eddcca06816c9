use rand::Rng;
use std::time::Duration;

/// Glyphs shown in place of not-yet-revealed characters
pub const SCRAMBLE_CHARS: &str = "!<>-_\\/[]{}—=+*^?#________";

/// Time between scramble ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Ticks spent on each character before it settles
const TICKS_PER_CHAR: usize = 3;

/// Fraction of the text that must be on screen to count as in view
pub const VISIBILITY_AMOUNT: f32 = 0.5;

/// Text that decodes from random glyphs into its final value each time it
/// scrolls into view.
#[derive(Debug, Clone)]
pub struct ScrambleReveal {
    target: Vec<char>,
    glyphs: Vec<char>,
    displayed: String,
    ticks: usize,
    in_view: bool,
    running: bool,
    since_tick: Duration,
}

impl ScrambleReveal {
    pub fn new(text: &str) -> Self {
        Self {
            target: text.chars().collect(),
            glyphs: SCRAMBLE_CHARS.chars().collect(),
            displayed: String::new(),
            ticks: 0,
            in_view: false,
            running: false,
            since_tick: Duration::ZERO,
        }
    }

    pub fn text(&self) -> &str {
        &self.displayed
    }

    #[cfg(test)]
    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.in_view && !self.running
    }

    /// Feed the current visibility. Entering view restarts the effect;
    /// leaving it blanks the text so it can play again next time.
    pub fn set_in_view(&mut self, in_view: bool) {
        if in_view == self.in_view {
            return;
        }
        self.in_view = in_view;
        self.ticks = 0;
        self.since_tick = Duration::ZERO;
        self.displayed.clear();
        self.running = in_view;
    }

    /// Advance by wall-clock time, running as many ticks as have elapsed
    pub fn update<R: Rng>(&mut self, dt: Duration, rng: &mut R) {
        if !self.running {
            return;
        }
        self.since_tick += dt;
        while self.running && self.since_tick >= TICK_INTERVAL {
            self.since_tick -= TICK_INTERVAL;
            self.tick(rng);
        }
    }

    /// One scramble step. Each tick reveals a third of a character: index `i`
    /// shows its final value once `i < ticks / 3`, the rest a random glyph.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        if !self.running {
            return;
        }
        self.ticks += 1;

        let ticks = self.ticks;
        let glyphs = &self.glyphs;
        self.displayed = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i * TICKS_PER_CHAR < ticks {
                    c
                } else {
                    glyphs[rng.gen_range(0..glyphs.len())]
                }
            })
            .collect();

        if self.ticks >= self.target.len() * TICKS_PER_CHAR {
            self.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starts_blank_until_in_view() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut s = ScrambleReveal::new("Skills");
        s.update(Duration::from_secs(1), &mut rng);
        assert_eq!(s.text(), "");
        assert!(!s.is_running());
    }

    #[test]
    fn test_reveals_after_three_ticks_per_char() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = ScrambleReveal::new("About Me");
        s.set_in_view(true);

        for _ in 0..(3 * s.target_len() - 1) {
            s.tick(&mut rng);
            assert!(s.is_running());
            assert_eq!(s.text().chars().count(), 8);
        }
        s.tick(&mut rng);
        assert_eq!(s.text(), "About Me");
        assert!(s.is_done());
    }

    #[test]
    fn test_prefix_is_revealed_progressively() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = ScrambleReveal::new("Using");
        s.set_in_view(true);

        // One tick: index 0 revealed
        s.tick(&mut rng);
        assert!(s.text().starts_with('U'));

        // Four ticks: indices 0 and 1 revealed
        for _ in 0..3 {
            s.tick(&mut rng);
        }
        assert!(s.text().starts_with("Us"));
        let rest: Vec<char> = s.text().chars().skip(2).collect();
        assert!(rest.iter().all(|c| SCRAMBLE_CHARS.contains(*c)));
    }

    #[test]
    fn test_leaving_view_resets_and_reentry_restarts() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = ScrambleReveal::new("Vibe coded");
        s.set_in_view(true);
        s.update(Duration::from_secs(5), &mut rng);
        assert_eq!(s.text(), "Vibe coded");

        s.set_in_view(false);
        assert_eq!(s.text(), "");
        assert!(!s.is_running());

        s.set_in_view(true);
        assert!(s.is_running());
        s.update(TICK_INTERVAL, &mut rng);
        assert_eq!(s.text().chars().count(), 10);
        assert_ne!(s.text(), "Vibe coded");
    }

    #[test]
    fn test_update_runs_elapsed_ticks() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = ScrambleReveal::new("abcdef");
        s.set_in_view(true);
        // 3 ticks reveal index 0 only
        s.update(TICK_INTERVAL * 3, &mut rng);
        assert!(s.text().starts_with('a'));
        assert!(s.is_running());
        // Leftover time below one interval does nothing yet
        s.update(Duration::from_millis(10), &mut rng);
        assert!(s.is_running());
        s.update(TICK_INTERVAL * 100, &mut rng);
        assert_eq!(s.text(), "abcdef");
    }

    #[test]
    fn test_repeated_visibility_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = ScrambleReveal::new("Skills");
        s.set_in_view(true);
        s.tick(&mut rng);
        let shown = s.text().to_string();
        s.set_in_view(true);
        assert_eq!(s.text(), shown);
    }

    #[test]
    fn test_empty_text_finishes_on_first_tick() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = ScrambleReveal::new("");
        s.set_in_view(true);
        s.tick(&mut rng);
        assert!(s.is_done());
        assert_eq!(s.text(), "");
    }
}
