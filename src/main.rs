mod app;
mod braille;
mod config;
mod content;
mod cursor;
mod error;
mod field;
mod font;
mod host;
mod logging;
mod motion;
mod page;
mod particle;
mod render_loop;
mod scramble;
mod settings;
mod surface;
mod theme;
mod ui;

use app::App;
use clap::Parser;
use config::FolioConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Backdrop;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use theme::ThemeColor;

/// Lines moved per mouse wheel notch
const WHEEL_STEP: isize = 3;

#[derive(Parser, Debug)]
#[command(name = "oma-folio")]
#[command(about = "OMA's portfolio, rendered in the terminal over a particle constellation")]
struct Args {
    /// Config file to load (default: <config dir>/oma-folio/config.json)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Particle counts as <mobile,desktop>, e.g. 30,60
    #[arg(short = 'p', long, value_parser = parse_pair::<usize>)]
    particles: Option<(usize, usize)>,

    /// Logical pixel size of one terminal cell as <WxH>, e.g. 8x16
    #[arg(long = "cell-size", value_parser = parse_cell_size)]
    cell_size: Option<(f32, f32)>,

    /// Do not draw the cursor follower
    #[arg(long = "no-cursor")]
    no_cursor: bool,

    /// Background style (constellation, particles, off)
    #[arg(short = 'b', long, value_parser = parse_backdrop)]
    backdrop: Option<Backdrop>,

    /// Background frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Directory for log files
    #[arg(long = "log-dir")]
    log_dir: Option<PathBuf>,

    /// Write the effective settings back to the config file before starting
    #[arg(long = "save-config")]
    save_config: bool,

    /// Debug-level logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated values, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<T>()
            .map_err(|_| format!("invalid number '{}'", v.trim()))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_cell_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .to_lowercase()
        .split_once('x')
        .map(|(w, h)| (w.to_string(), h.to_string()))
        .ok_or_else(|| format!("expected <W>x<H>, got '{}'", s))?;
    let parse = |v: &str| match v.trim().parse::<f32>() {
        Ok(n) if n > 0.0 => Ok(n),
        _ => Err(format!("invalid cell dimension '{}'", v.trim())),
    };
    Ok((parse(&w)?, parse(&h)?))
}

fn parse_backdrop(s: &str) -> Result<Backdrop, String> {
    Backdrop::parse(s).ok_or_else(|| format!("unknown backdrop '{}' (constellation, particles, off)", s))
}

/// Command-line flags win over the config file
fn apply_args(mut config: FolioConfig, args: &Args) -> FolioConfig {
    if let Some((mobile, desktop)) = args.particles {
        config.particles.mobile_count = mobile;
        config.particles.desktop_count = desktop;
    }
    if let Some((w, h)) = args.cell_size {
        config.cell_width_px = w;
        config.cell_height_px = h;
    }
    if args.no_cursor {
        config.cursor_enabled = false;
    }
    if let Some(backdrop) = args.backdrop {
        config.backdrop = backdrop;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.sanitized()
}

/// Persist `config` to the named file, or to the default location
fn save_config(config: &FolioConfig, explicit: Option<&Path>) -> error::Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => FolioConfig::default_path()?,
    };
    config.save_to_file(&path)?;
    Ok(path)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let logging = logging::init_logging(args.log_dir.clone(), args.verbose)?;
    // A file about to be created by --save-config need not exist yet
    let explicit = args
        .config
        .as_deref()
        .filter(|path| !args.save_config || path.exists());
    let config = apply_args(FolioConfig::load_or_default(explicit)?, &args);
    tracing::info!(?config, "starting");
    if args.save_config {
        let path = save_config(&config, args.config.as_deref())?;
        tracing::info!(path = %path.display(), "config saved");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut theme_color = ThemeColor::new();
    theme_color.apply(&mut stdout, config.theme_rgb())?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(size.width, size.height, config);

    // Run the app
    let res = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Cleanup
    theme_color.restore(terminal.backend_mut())?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal loop failed");
        eprintln!("Error: {:?} (logs in {})", err, logging.log_dir().display());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        // Sleep until the next background frame unless input arrives first
        if !event::poll(app.poll_timeout(Instant::now()))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press && handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}

/// Returns true when the app should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.show_help {
        match key.code {
            KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => {
                app.scroll_help_down(ui::HELP_CONTENT_LINES)
            }
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => app.scroll_help_up(),
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') | KeyCode::Esc => {
                app.toggle_help()
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('b') | KeyCode::Char('B') => app.cycle_backdrop(),
        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_page(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => app.mouse_moved(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_STEP),
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_STEP),
        _ => {}
    }
}
