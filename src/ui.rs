use crate::app::App;
use crate::braille::BrailleCell;
use crate::page::{Piece, Role, Tone};
use crate::settings::ViewportClass;
use crate::theme::{self, Rgb, ACCENT, BACKGROUND};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Name gradient on wide screens: white -> gray -> cyan
const NAME_GRADIENT: [Rgb; 3] = [Rgb::new(0xff, 0xff, 0xff), Rgb::new(0x9c, 0xa3, 0xaf), ACCENT];

/// Tint behind text the cursor ring passes over
const CURSOR_TINT: f32 = 0.25;

fn rgb(color: Color) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => Rgb::new(r, g, b),
        _ => Rgb::new(0xff, 0xff, 0xff),
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND.into())), area);

    let buf = frame.buffer_mut();
    render_braille(buf, area, &app.canvas.cells(BACKGROUND));

    if app.show_page {
        render_page(buf, area, app);
    }
    if app.cursor_visible() {
        render_cursor(buf, area, &app.cursor_canvas.cells(BACKGROUND));
    }
    render_status(buf, area, app);

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_braille(buf: &mut Buffer, area: Rect, cells: &[BrailleCell]) {
    for cell in cells {
        if cell.x >= area.width || cell.y >= area.height {
            continue;
        }
        if let Some(c) = buf.cell_mut(Position::new(area.x + cell.x, area.y + cell.y)) {
            c.set_char(cell.char).set_fg(cell.color.into());
        }
    }
}

/// Cursor ring on top of everything: Braille dots in empty cells, a tint
/// behind text so the text stays readable.
fn render_cursor(buf: &mut Buffer, area: Rect, cells: &[BrailleCell]) {
    let tint: Color = BACKGROUND.lerp(ACCENT, CURSOR_TINT).into();
    for cell in cells {
        if cell.x >= area.width || cell.y >= area.height {
            continue;
        }
        if let Some(c) = buf.cell_mut(Position::new(area.x + cell.x, area.y + cell.y)) {
            let blank = c.symbol() == " " || c.symbol().chars().all(|ch| ('\u{2800}'..='\u{28ff}').contains(&ch));
            if blank {
                c.set_char(cell.char).set_fg(cell.color.into());
            } else {
                c.set_bg(tint);
            }
        }
    }
}

fn render_page(buf: &mut Buffer, area: Rect, app: &App) {
    let page = &app.page;
    let visible_rows = app.content_rows().min(area.height) as usize;
    let top = app.scroll;
    let bottom = top + visible_rows;
    let letters = crate::content::NAME.chars().count();

    for (section_index, section) in page.sections.iter().enumerate() {
        // Pieces can sit a few rows below their resting place while rising
        if section.top >= bottom || section.top + section.height + 4 <= top {
            continue;
        }
        for row in section.top..section.top + section.height {
            for piece in &page.lines[row].pieces {
                let (opacity, offset) = app.entrance(section_index, piece.child, piece.role);
                if opacity < 0.02 {
                    continue;
                }
                let screen_row = row + offset as usize;
                if screen_row < top || screen_row >= bottom || piece.col >= area.width {
                    continue;
                }

                let text = match piece.role {
                    Role::Title(slot) => app.title_text(slot),
                    _ => piece.text.as_str(),
                };
                if text.is_empty() {
                    continue;
                }

                let style = piece_style(app, piece, opacity, letters);
                let y = area.y + (screen_row - top) as u16;
                let x = area.x + piece.col;
                buf.set_stringn(x, y, text, (area.width - piece.col) as usize, style);
            }
        }
    }
}

fn piece_style(app: &App, piece: &Piece, opacity: f32, letters: usize) -> Style {
    let hovered = piece.target.is_some() && piece.target == app.hovered;

    let (color, modifier) = match piece.role {
        Role::Letter(i) => (name_color(app.class, i, letters), Modifier::BOLD),
        Role::Icon if app.icon_scale() > 1.05 => (ACCENT, Modifier::BOLD),
        _ if hovered && piece.tone == Tone::Border => (ACCENT, Modifier::empty()),
        _ if hovered => (ACCENT, Modifier::UNDERLINED),
        _ => tone_style(piece.tone),
    };

    Style::default()
        .fg(BACKGROUND.lerp(color, opacity).into())
        .add_modifier(modifier)
}

fn tone_style(tone: Tone) -> (Rgb, Modifier) {
    match tone {
        Tone::Name | Tone::Bright => (rgb(theme::TEXT_BRIGHT), Modifier::BOLD),
        Tone::Title => (rgb(theme::TEXT_BRIGHT), Modifier::BOLD),
        Tone::Body => (rgb(theme::TEXT), Modifier::empty()),
        Tone::Dim => (rgb(theme::TEXT_DIM), Modifier::empty()),
        Tone::Faint => (rgb(theme::TEXT_FAINT), Modifier::ITALIC),
        Tone::Accent => (ACCENT, Modifier::empty()),
        Tone::Border => (rgb(theme::BORDER), Modifier::empty()),
        Tone::Chip => (rgb(theme::TEXT), Modifier::empty()),
        Tone::Emphasis => (rgb(theme::TEXT_BRIGHT), Modifier::BOLD | Modifier::ITALIC),
    }
}

/// Plain white on small screens, a gradient across the letters otherwise
fn name_color(class: ViewportClass, index: usize, letters: usize) -> Rgb {
    if class == ViewportClass::Mobile || letters < 2 {
        return NAME_GRADIENT[0];
    }
    let t = index as f32 / (letters - 1) as f32;
    if t <= 0.5 {
        NAME_GRADIENT[0].lerp(NAME_GRADIENT[1], t * 2.0)
    } else {
        NAME_GRADIENT[1].lerp(NAME_GRADIENT[2], (t - 0.5) * 2.0)
    }
}

/// Bottom row: hovered link on the left, backdrop state on the right
fn render_status(buf: &mut Buffer, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height - 1;
    let dim = Style::default().fg(theme::TEXT_FAINT).bg(BACKGROUND.into());
    let key = Style::default().fg(ACCENT.into()).bg(BACKGROUND.into());

    let left = match app.hovered_target() {
        Some(target) => match target.url {
            Some(url) => format!(" ↗ {}", url),
            None => format!(" {}", target.label),
        },
        None => String::new(),
    };

    let max_scroll = app.page.max_scroll(app.content_rows());
    let percent = if max_scroll == 0 {
        100
    } else {
        app.scroll * 100 / max_scroll
    };
    let right = format!(
        "{} · {} pts {} links · {:>3}% · h help ",
        app.backdrop.name(),
        app.background.field().map_or(0, |f| f.len()),
        app.last_stats.lines,
        percent
    );

    buf.set_stringn(area.x, y, " ".repeat(area.width as usize), area.width as usize, dim);
    buf.set_stringn(area.x, y, &left, area.width as usize, key);
    let right_width = right.chars().count() as u16;
    if right_width + left.chars().count() as u16 <= area.width {
        buf.set_stringn(area.x + area.width - right_width, y, &right, right_width as usize, dim);
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Center the help dialog
    let help_width = 56.min(area.width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(28);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let heading = Style::default().fg(ACCENT.into());
    let key_style = Style::default().fg(theme::TEXT_BRIGHT);
    let desc_style = Style::default().fg(theme::TEXT_DIM);
    let control = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:>12}", key), key_style),
            Span::styled(format!("  {}", desc), desc_style),
        ])
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("OMA / vibe coder", heading)),
        Line::from(""),
        Line::from(Span::styled(
            "A portfolio over a drifting particle constellation. Hover a link to see where it goes.",
            desc_style,
        )),
        Line::from(""),
        Line::from(Span::styled("SCROLLING:", heading)),
        control("↑ ↓  j k", "line by line"),
        control("PgUp PgDn", "screen by screen"),
        control("Home End", "top / bottom"),
        control("wheel", "scroll"),
        Line::from(""),
        Line::from(Span::styled("BACKGROUND:", heading)),
        control("b", "constellation / particles / off"),
        control("v", "hide page, view background"),
        Line::from(""),
        Line::from(Span::styled("OTHER:", heading)),
        control("h", "toggle this help"),
        control("q Esc", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Viewport {:.0}x{:.0} px ({}), backdrop {}",
                app.viewport_px().0,
                app.viewport_px().1,
                app.class.name(),
                app.backdrop.name()
            ),
            Style::default().fg(theme::TEXT_FAINT),
        )),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);

    let title = if max_scroll > 0 {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT.into()))
        .style(Style::default().bg(BACKGROUND.into()))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
