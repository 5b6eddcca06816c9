use crate::braille::{BrailleCanvas, CellMetrics};
use crate::config::FolioConfig;
use crate::cursor::CursorFollower;
use crate::host::Host;
use crate::motion::{self, Entrance};
use crate::page::{Page, Role, Target};
use crate::render_loop::{FrameStats, RenderLoop};
use crate::scramble::{ScrambleReveal, VISIBILITY_AMOUNT};
use crate::settings::{Backdrop, ViewportClass};
use crate::surface::Surface;
use rand::rngs::ThreadRng;
use std::time::{Duration, Instant};

/// Main application state
pub struct App {
    pub config: FolioConfig,
    pub metrics: CellMetrics,
    pub cols: u16,
    pub rows: u16,
    pub class: ViewportClass,
    pub page: Page,
    pub scroll: usize,
    pub host: Host,
    pub background: RenderLoop,
    pub canvas: BrailleCanvas,
    pub cursor: CursorFollower,
    pub cursor_canvas: BrailleCanvas,
    pub scrambles: Vec<ScrambleReveal>,
    /// When each section's entrance started
    pub entered_at: Vec<Option<Instant>>,
    pub backdrop: Backdrop,
    pub show_page: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub hovered: Option<usize>,
    pub last_stats: FrameStats,
    started: Instant,
    now: Instant,
    last_mouse: Option<(u16, u16)>,
    rng: ThreadRng,
}

impl App {
    pub fn new(cols: u16, rows: u16, config: FolioConfig) -> Self {
        let now = Instant::now();
        let metrics = CellMetrics {
            width_px: config.cell_width_px,
            height_px: config.cell_height_px,
        };
        let (width, height) = metrics.viewport(cols, rows);
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.fps.max(1)));
        let class = config.particles.classify(width);
        let page = Page::build(cols, rows, width, class);

        let mut cursor = CursorFollower::new();
        cursor.enabled = config.cursor_enabled;
        let mut cursor_canvas = BrailleCanvas::new(metrics);
        cursor_canvas.resize(width, height);

        let mut app = Self {
            metrics,
            cols,
            rows,
            class,
            scrambles: page.titles.iter().map(|t| ScrambleReveal::new(t)).collect(),
            entered_at: vec![None; page.sections.len()],
            page,
            scroll: 0,
            host: Host::new(width, height, frame_interval),
            background: RenderLoop::new(config.particles.clone()),
            canvas: BrailleCanvas::new(metrics),
            cursor,
            cursor_canvas,
            backdrop: config.backdrop,
            show_page: true,
            show_help: false,
            help_scroll: 0,
            hovered: None,
            last_stats: FrameStats::default(),
            started: now,
            now,
            last_mouse: None,
            rng: rand::thread_rng(),
            config,
        };

        if app.backdrop != Backdrop::Off {
            app.start_background();
        }
        app.update_visibility();
        app
    }

    /// Fresh render loop mounted on the host. A stopped loop cannot restart,
    /// so every start gets a new one.
    fn start_background(&mut self) {
        self.background = RenderLoop::new(self.config.particles.clone());
        self.background.draw_connections = self.backdrop.draws_connections();
        self.background.mount(&mut self.host, &mut self.canvas);
    }

    /// Rows available to the page; the bottom row is the status line
    pub fn content_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    pub fn viewport_px(&self) -> (f32, f32) {
        self.host.viewport()
    }

    /// How long the event loop may wait before something needs drawing
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let interval = self.host.frame_interval();
        self.host
            .time_until_frame(now)
            .map_or(interval, |wait| wait.min(interval))
    }

    /// Advance everything to `now`: run a due background frame, step the
    /// cursor springs and the scramble timers.
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.now);
        self.now = now;

        if let Some(id) = self.host.take_due_frame(now) {
            if let Some(stats) = self.background.on_frame(id, &mut self.host, &mut self.canvas) {
                tracing::trace!(particles = stats.particles, lines = stats.lines, "background frame");
                self.last_stats = stats;
            }
        }

        self.cursor.update(dt);
        self.update_visibility();
        for scramble in &mut self.scrambles {
            scramble.update(dt, &mut self.rng);
        }

        self.cursor_canvas.clear();
        if self.cursor_visible() {
            self.cursor.draw(&mut self.cursor_canvas);
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible(self.class)
    }

    /// Start section entrances and toggle scramble titles from what is on screen
    fn update_visibility(&mut self) {
        let rows = self.content_rows();
        for (i, section) in self.page.sections.iter().enumerate() {
            if self.entered_at[i].is_some() || !self.show_page {
                continue;
            }
            let fraction = self.page.visible_fraction(section, self.scroll, rows);
            if fraction > 0.0 && fraction >= section.trigger_amount {
                tracing::debug!(section = section.id.name(), "section entered view");
                self.entered_at[i] = Some(self.now);
            }
        }

        let top = self.scroll;
        let bottom = self.scroll + rows as usize;
        for (scramble, &row) in self.scrambles.iter_mut().zip(&self.page.title_rows) {
            // A one-row title is either fully in view or not at all
            let visible = if row >= top && row < bottom { 1.0 } else { 0.0 };
            scramble.set_in_view(self.show_page && visible >= VISIBILITY_AMOUNT);
        }
    }

    /// Opacity and upward offset (rows) of a piece of the page
    pub fn entrance(&self, section: usize, child: usize, role: Role) -> (f32, u16) {
        let layout = &self.page.sections[section];
        let (entrance, index) = match role {
            Role::Letter(i) => (Entrance::NAME_LETTERS, i),
            _ => (layout.entrance, child),
        };
        let Some(started) = self.entered_at[section] else {
            return (0.0, self.px_to_rows(entrance.rise_px));
        };
        let (opacity, offset_px) = entrance.child_state(index, self.now.saturating_duration_since(started));
        (opacity, self.px_to_rows(offset_px))
    }

    fn px_to_rows(&self, px: f32) -> u16 {
        (px / self.metrics.height_px).round().max(0.0) as u16
    }

    /// Current icon pulse scale
    pub fn icon_scale(&self) -> f32 {
        motion::icon_pulse(self.now.saturating_duration_since(self.started))
    }

    /// Display text of a title slot
    pub fn title_text(&self, slot: usize) -> &str {
        self.scrambles.get(slot).map_or("", |s| s.text())
    }

    pub fn hovered_target(&self) -> Option<&Target> {
        self.hovered.and_then(|i| self.page.targets.get(i))
    }

    // === Input ===

    pub fn mouse_moved(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        let (x, y) = self.metrics.cell_center(col, row);
        self.cursor.pointer_moved(x, y);
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        self.hovered = match self.last_mouse {
            Some((col, row)) if self.show_page && row < self.content_rows() => {
                self.page.hit_test(col, self.scroll + row as usize)
            }
            _ => None,
        };
        self.cursor.set_hovering(self.hovered.is_some());
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.page.max_scroll(self.content_rows());
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
        self.refresh_hover();
        self.update_visibility();
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.content_rows().saturating_sub(2).max(1) as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-(self.content_rows().saturating_sub(2).max(1) as isize));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.scroll_by(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.page.max_scroll(self.content_rows());
        self.scroll_by(0);
    }

    /// Constellation -> particles only -> off -> constellation
    pub fn cycle_backdrop(&mut self) {
        self.backdrop = self.backdrop.next();
        tracing::info!(backdrop = self.backdrop.name(), "backdrop changed");
        match self.backdrop {
            Backdrop::Off => {
                self.background.teardown(&mut self.host);
                self.canvas.clear();
                self.last_stats = FrameStats::default();
            }
            _ if self.background.is_running() => {
                self.background.draw_connections = self.backdrop.draws_connections();
            }
            _ => self.start_background(),
        }
    }

    /// Hide the page to look at the background alone
    pub fn toggle_page(&mut self) {
        self.show_page = !self.show_page;
        self.refresh_hover();
        self.update_visibility();
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    /// New terminal size: relayout, then notify resize listeners
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let (width, height) = self.metrics.viewport(cols, rows);
        self.class = self.config.particles.classify(width);
        self.page = Page::build(cols, rows, width, self.class);
        self.scroll = self.scroll.min(self.page.max_scroll(self.content_rows()));
        self.cursor_canvas.resize(width, height);

        for id in self.host.dispatch_resize(width, height) {
            if self.background.listens_to(id) {
                self.background.on_resize(&self.host, &mut self.canvas);
            }
        }
        // A loop that never started for lack of a surface gets another chance
        if self.backdrop != Backdrop::Off && !self.background.is_running() {
            self.start_background();
        }

        tracing::info!(cols, rows, class = self.class.name(), "terminal resized");
        self.refresh_hover();
        self.update_visibility();
    }

    /// Stop the background for good
    pub fn shutdown(&mut self) {
        self.background.teardown(&mut self.host);
        tracing::debug!(
            pending_frames = self.host.pending_frames(),
            listeners = self.host.listener_count(),
            "host released"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SectionId;
    use crate::render_loop::LoopState;

    /// 128x48 cells at 8x16 px is a 1024x768 viewport
    fn desktop_app() -> App {
        App::new(128, 48, FolioConfig::default())
    }

    fn particle_count(app: &App) -> usize {
        app.background.field().map_or(0, |f| f.len())
    }

    #[test]
    fn test_new_mounts_background() {
        let app = desktop_app();
        assert_eq!(app.class, ViewportClass::Desktop);
        assert!(app.background.is_running());
        assert_eq!(particle_count(&app), 60);
        assert_eq!(app.host.pending_frames(), 1);
        assert_eq!(app.host.listener_count(), 1);
    }

    #[test]
    fn test_backdrop_off_in_config_skips_mount() {
        let config = FolioConfig {
            backdrop: Backdrop::Off,
            ..Default::default()
        };
        let app = App::new(128, 48, config);
        assert_eq!(app.background.state(), LoopState::Uninitialized);
        assert_eq!(app.host.pending_frames(), 0);
    }

    #[test]
    fn test_zero_area_terminal_leaves_loop_uninitialized() {
        let mut app = App::new(0, 0, FolioConfig::default());
        assert!(!app.background.is_running());
        assert_eq!(app.host.pending_frames(), 0);

        app.resize(128, 48);
        assert!(app.background.is_running());
    }

    #[test]
    fn test_tick_runs_due_frame() {
        let mut app = desktop_app();
        app.tick(Instant::now());
        assert_eq!(app.background.frames, 1);
        assert_eq!(app.last_stats.particles, 60);
        assert_eq!(app.host.pending_frames(), 1);
    }

    #[test]
    fn test_resize_reclassifies_and_reseeds() {
        let mut app = desktop_app();
        // 80 cols x 8 px = 640 px wide
        app.resize(80, 40);
        assert_eq!(app.class, ViewportClass::Mobile);
        assert_eq!(particle_count(&app), 30);
        assert_eq!(app.viewport_px(), (640.0, 640.0));
        assert!(app.background.is_running());
    }

    #[test]
    fn test_cycle_backdrop() {
        let mut app = desktop_app();
        app.cycle_backdrop();
        assert_eq!(app.backdrop, Backdrop::Particles);
        assert!(!app.background.draw_connections);
        assert!(app.background.is_running());

        app.cycle_backdrop();
        assert_eq!(app.backdrop, Backdrop::Off);
        assert_eq!(app.background.state(), LoopState::Stopped);
        assert_eq!(app.host.pending_frames(), 0);
        assert_eq!(app.host.listener_count(), 0);

        app.cycle_backdrop();
        assert_eq!(app.backdrop, Backdrop::Constellation);
        assert!(app.background.is_running());
        assert!(app.background.draw_connections);
        assert_eq!(app.host.listener_count(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut app = desktop_app();
        app.shutdown();
        app.shutdown();
        assert_eq!(app.host.pending_frames(), 0);
        assert_eq!(app.host.listener_count(), 0);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut app = desktop_app();
        app.scroll_by(-5);
        assert_eq!(app.scroll, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll, app.page.max_scroll(app.content_rows()));
        app.scroll_by(10);
        assert_eq!(app.scroll, app.page.max_scroll(app.content_rows()));
        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_header_enters_immediately() {
        let app = desktop_app();
        let header = app
            .page
            .sections
            .iter()
            .position(|s| s.id == SectionId::Header)
            .unwrap();
        assert!(app.entered_at[header].is_some());

        let footer = app.page.sections.len() - 1;
        assert!(app.entered_at[footer].is_none());
        assert_eq!(app.entrance(footer, 0, Role::Text).0, 0.0);
    }

    #[test]
    fn test_sections_enter_on_scroll() {
        let mut app = desktop_app();
        let footer = app.page.sections.len() - 1;
        app.scroll_to_bottom();
        assert!(app.entered_at[footer].is_some());
    }

    #[test]
    fn test_hover_over_link() {
        let mut app = desktop_app();
        let region = *app
            .page
            .regions
            .iter()
            .find(|r| app.page.targets[r.target].url.is_some() && r.top < app.content_rows() as usize)
            .unwrap();
        app.mouse_moved(region.left, region.top as u16);
        assert_eq!(app.hovered, Some(region.target));
        assert!(app.cursor.is_hovering());
        assert!(app.hovered_target().unwrap().url.is_some());

        app.mouse_moved(0, 0);
        assert_eq!(app.hovered, None);
        assert!(!app.cursor.is_hovering());
    }

    #[test]
    fn test_hidden_page_has_no_hover() {
        let mut app = desktop_app();
        let region = app.page.regions[0];
        app.toggle_page();
        app.mouse_moved(region.left, region.top as u16);
        assert_eq!(app.hovered, None);
    }

    #[test]
    fn test_titles_scramble_when_scrolled_into_view() {
        let mut app = desktop_app();
        let row = app.page.title_rows[0];
        app.scroll_by(row as isize);
        assert!(app.scrambles[0].is_running());

        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.title_text(0), app.page.titles[0]);

        app.scroll_to_bottom();
        assert_eq!(app.title_text(0), "");
    }

    #[test]
    fn test_cursor_drawn_after_pointer_moves() {
        let mut app = desktop_app();
        app.tick(Instant::now());
        assert!(!app.cursor_visible());

        app.mouse_moved(40, 20);
        app.tick(Instant::now());
        assert!(app.cursor_visible());
        assert!(!app.cursor_canvas.cells(crate::theme::BACKGROUND).is_empty());
    }

    #[test]
    fn test_cursor_hidden_on_mobile() {
        let mut app = App::new(80, 40, FolioConfig::default());
        app.mouse_moved(10, 10);
        app.tick(Instant::now());
        assert!(!app.cursor_visible());
    }
}
