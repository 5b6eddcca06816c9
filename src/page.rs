use crate::content::{self, icons, Link};
use crate::font;
use crate::motion::Entrance;
use crate::settings::ViewportClass;

/// Viewport widths (logical px) at which the project grid gains a column
const TWO_COLUMN_PX: f32 = 768.0;
const THREE_COLUMN_PX: f32 = 1024.0;

/// Widest the content column gets, in terminal cells
const MAX_CONTENT_WIDTH: u16 = 110;

/// Fraction of the viewport height the hero header fills at minimum
const HEADER_MIN_FRACTION: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Header,
    About,
    Skills,
    Stack,
    Projects,
    Philosophy,
    Footer,
}

impl SectionId {
    pub fn name(&self) -> &str {
        match self {
            SectionId::Header => "header",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Stack => "tech-stack",
            SectionId::Projects => "projects",
            SectionId::Philosophy => "philosophy",
            SectionId::Footer => "footer",
        }
    }
}

/// Visual role of a piece of text; the renderer maps tones to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Name,
    Title,
    Body,
    Dim,
    Faint,
    Accent,
    Bright,
    Border,
    Chip,
    Emphasis,
}

/// What a piece is, beyond its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    /// Section title, decoded by the scramble slot with this index
    Title(usize),
    /// Section icon, pulses
    Icon,
    /// Letter `n` of the hero name
    Letter(usize),
}

/// A run of text at a fixed column
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub col: u16,
    pub text: String,
    pub tone: Tone,
    pub role: Role,
    pub target: Option<usize>,
    /// Entrance stagger index within its section
    pub child: usize,
}

impl Piece {
    fn new(col: u16, text: impl Into<String>, tone: Tone, child: usize) -> Self {
        Self {
            col,
            text: text.into(),
            tone,
            role: Role::Text,
            target: None,
            child,
        }
    }

    fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    fn with_target(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    pub fn width(&self) -> u16 {
        text_width(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLine {
    pub pieces: Vec<Piece>,
}

/// Something the cursor can hover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub label: String,
    pub url: Option<&'static str>,
}

/// Hoverable rectangle in page coordinates (rows are document rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub bottom: usize,
    pub left: u16,
    pub right: u16,
    pub target: usize,
}

impl Region {
    pub fn contains(&self, col: u16, row: usize) -> bool {
        row >= self.top && row < self.bottom && col >= self.left && col < self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub top: usize,
    pub height: usize,
    pub children: usize,
    pub entrance: Entrance,
    /// Fraction that must be visible to trigger the entrance
    pub trigger_amount: f32,
}

/// The laid-out page for one terminal size
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub lines: Vec<PageLine>,
    pub sections: Vec<SectionLayout>,
    pub regions: Vec<Region>,
    pub targets: Vec<Target>,
    /// Section titles, indexed by scramble slot
    pub titles: Vec<&'static str>,
    /// Document row of each title
    pub title_rows: Vec<usize>,
    pub width: u16,
}

impl Page {
    /// Lay out the whole page for a `cols` x `rows` terminal whose width is
    /// `px_width` logical pixels.
    pub fn build(cols: u16, rows: u16, px_width: f32, class: ViewportClass) -> Self {
        let pad = match class {
            ViewportClass::Mobile => 2,
            ViewportClass::Desktop => 5,
        };
        let width = cols.saturating_sub(pad * 2).clamp(1, MAX_CONTENT_WIDTH);
        let left = cols.saturating_sub(width) / 2;

        let mut b = Builder {
            page: Page {
                lines: Vec::new(),
                sections: Vec::new(),
                regions: Vec::new(),
                targets: Vec::new(),
                titles: Vec::new(),
                title_rows: Vec::new(),
                width: cols,
            },
            left,
            width,
            class,
            px_width,
            section: 0,
            children: 0,
        };

        let gap = match class {
            ViewportClass::Mobile => 6,
            ViewportClass::Desktop => 8,
        };

        b.header(rows);
        b.blank(gap);
        b.about();
        b.blank(gap);
        b.skills();
        b.blank(gap);
        b.stack();
        b.blank(gap);
        b.projects();
        b.blank(gap);
        b.philosophy();
        b.blank(gap);
        b.footer();
        b.blank(4);

        b.page
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn max_scroll(&self, viewport_rows: u16) -> usize {
        self.height().saturating_sub(viewport_rows as usize)
    }

    /// Target under a screen cell, given the current scroll offset. Later
    /// regions win, so a link inside a card beats the card itself.
    pub fn hit_test(&self, col: u16, row: usize) -> Option<usize> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.contains(col, row))
            .map(|r| r.target)
    }

    #[cfg(test)]
    pub fn section(&self, id: SectionId) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Share of a section inside the rows `[scroll, scroll + viewport_rows)`
    pub fn visible_fraction(&self, section: &SectionLayout, scroll: usize, viewport_rows: u16) -> f32 {
        if section.height == 0 {
            return 0.0;
        }
        let top = section.top.max(scroll);
        let bottom = (section.top + section.height).min(scroll + viewport_rows as usize);
        bottom.saturating_sub(top) as f32 / section.height as f32
    }
}

struct Builder {
    page: Page,
    left: u16,
    width: u16,
    class: ViewportClass,
    px_width: f32,
    section: usize,
    children: usize,
}

impl Builder {
    fn row(&self) -> usize {
        self.page.lines.len()
    }

    fn begin(&mut self, id: SectionId, entrance: Entrance, trigger_amount: f32) {
        self.section = self.page.sections.len();
        self.children = 0;
        let top = self.row();
        self.page.sections.push(SectionLayout {
            id,
            top,
            height: 0,
            children: 0,
            entrance,
            trigger_amount,
        });
    }

    fn end(&mut self) {
        let row = self.row();
        let children = self.children;
        let s = &mut self.page.sections[self.section];
        s.height = row - s.top;
        s.children = children;
    }

    fn push(&mut self, pieces: Vec<Piece>) {
        for p in &pieces {
            self.children = self.children.max(p.child + 1);
        }
        self.page.lines.push(PageLine { pieces });
    }

    fn blank(&mut self, n: usize) {
        for _ in 0..n {
            self.page.lines.push(PageLine::default());
        }
    }

    fn target(&mut self, label: impl Into<String>, url: Option<&'static str>) -> usize {
        self.page.targets.push(Target {
            label: label.into(),
            url,
        });
        self.page.targets.len() - 1
    }

    fn region(&mut self, top: usize, bottom: usize, left: u16, right: u16, target: usize) {
        self.page.regions.push(Region {
            top,
            bottom,
            left,
            right,
            target,
        });
    }

    /// Register a single-line piece as hoverable
    fn piece_region(&mut self, row: usize, piece: &Piece) {
        if let Some(target) = piece.target {
            self.region(row, row + 1, piece.col, piece.col + piece.width(), target);
        }
    }

    fn centered(&self, w: u16) -> u16 {
        self.left + self.width.saturating_sub(w) / 2
    }

    fn title(&mut self, icon: &str, text: &'static str) {
        let slot = self.page.titles.len();
        let row = self.row();
        self.page.titles.push(text);
        self.page.title_rows.push(row);
        let icon_piece = Piece::new(self.left, icon, Tone::Accent, 0).with_role(Role::Icon);
        let title_col = self.left + icon_piece.width() + 2;
        let title_piece = Piece::new(title_col, text, Tone::Title, 0).with_role(Role::Title(slot));
        self.push(vec![icon_piece, title_piece]);
    }

    fn paragraph(&mut self, text: &str, tone: Tone, child: usize, width: u16, centered: bool) {
        for line in wrap(text, width) {
            let col = if centered {
                self.centered(text_width(&line))
            } else {
                self.left
            };
            self.push(vec![Piece::new(col, line, tone, child)]);
        }
    }

    /// Lay out `items` left to right, wrapping onto new rows; each item
    /// becomes a hoverable piece.
    fn flow(&mut self, items: &[(String, Tone, usize, Option<usize>)], spacing: u16, centered: bool) {
        let mut rows: Vec<Vec<&(String, Tone, usize, Option<usize>)>> = vec![Vec::new()];
        let mut used = 0u16;
        for item in items {
            let w = text_width(&item.0);
            let last = rows.len() - 1;
            if !rows[last].is_empty() && used + spacing + w > self.width {
                rows.push(Vec::new());
                used = 0;
            }
            let last = rows.len() - 1;
            if !rows[last].is_empty() {
                used += spacing;
            }
            used += w;
            rows[last].push(item);
        }

        for (i, row_items) in rows.iter().enumerate() {
            if i > 0 {
                self.blank(1);
            }
            let total: u16 = row_items.iter().map(|it| text_width(&it.0)).sum::<u16>()
                + spacing * row_items.len().saturating_sub(1) as u16;
            let mut col = if centered { self.centered(total) } else { self.left };
            let row = self.row();
            let mut pieces = Vec::new();
            for (text, tone, child, target) in row_items.iter().map(|it| (&it.0, it.1, it.2, it.3)) {
                let mut piece = Piece::new(col, text.clone(), tone, child);
                if let Some(t) = target {
                    piece = piece.with_target(t);
                }
                col += piece.width() + spacing;
                pieces.push(piece);
            }
            for piece in &pieces {
                self.piece_region(row, piece);
            }
            self.push(pieces);
        }
    }

    // === Sections ===

    fn header(&mut self, viewport_rows: u16) {
        self.begin(SectionId::Header, Entrance::HEADER, 0.0);

        let name_rows = self.name_rows();
        let tagline = wrap(content::TAGLINE, self.width);
        let meta_lines = 1;
        let content_height = name_rows.len() + 1 + tagline.len() + 1 + meta_lines;
        let min_height = (viewport_rows as f32 * HEADER_MIN_FRACTION).round() as usize;
        let pad = min_height.saturating_sub(content_height) / 2;

        self.blank(pad);
        for pieces in name_rows {
            self.push(pieces);
        }
        self.blank(1);
        for line in tagline {
            let col = self.centered(text_width(&line));
            self.push(vec![Piece::new(col, line, Tone::Dim, 1)]);
        }
        self.blank(1);

        let location = self.target(content::LOCATION, None);
        let x = self.link_target(content::X_LINK);
        let github = self.link_target(content::GITHUB_LINK);
        let items = vec![
            (format!("{} {}", icons::PIN, content::LOCATION), Tone::Dim, 2, Some(location)),
            (format!("{} {}", icons::X, content::X_LINK.label), Tone::Dim, 2, Some(x)),
            (format!("{} {}", icons::GITHUB, content::GITHUB_LINK.label), Tone::Dim, 2, Some(github)),
        ];
        self.flow(&items, 4, true);

        // Fill out the rest of the hero height
        let used = self.row() - self.page.sections[self.section].top;
        self.blank(min_height.saturating_sub(used));
        self.end();
    }

    fn link_target(&mut self, link: Link) -> usize {
        self.target(link.label, Some(link.url))
    }

    /// The hero name, in block letters when it fits
    fn name_rows(&self) -> Vec<Vec<Piece>> {
        let name = content::NAME;
        let letters: Vec<char> = name.chars().collect();
        let block_width = (letters.len() * (font::GLYPH_WIDTH + 1)).saturating_sub(1) as u16;

        if font::can_render(name) && block_width <= self.width {
            let start = self.centered(block_width);
            let glyphs: Vec<_> = letters.iter().filter_map(|&c| font::glyph(c)).collect();
            (0..font::GLYPH_HEIGHT)
                .map(|r| {
                    glyphs
                        .iter()
                        .enumerate()
                        .map(|(i, g)| {
                            let col = start + (i * (font::GLYPH_WIDTH + 1)) as u16;
                            Piece::new(col, g[r].clone(), Tone::Name, 0).with_role(Role::Letter(i))
                        })
                        .collect()
                })
                .collect()
        } else {
            let start = self.centered(letters.len() as u16);
            vec![letters
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    Piece::new(start + i as u16, c.to_string(), Tone::Name, 0).with_role(Role::Letter(i))
                })
                .collect()]
        }
    }

    fn about(&mut self) {
        self.begin(SectionId::About, Entrance::SECTION, 0.2);
        self.title(icons::USER, content::ABOUT_TITLE);
        self.blank(1);
        let width = self.width.min(90);
        self.paragraph(content::ABOUT, Tone::Body, 1, width, false);
        self.end();
    }

    fn skills(&mut self) {
        self.begin(SectionId::Skills, Entrance::SECTION, 0.2);
        self.title(icons::CPU, content::SKILLS_TITLE);
        self.blank(1);
        let items: Vec<_> = content::SKILLS
            .iter()
            .enumerate()
            .map(|(i, skill)| {
                let t = self.target(*skill, None);
                (format!("( {} )", skill), Tone::Chip, 1 + i, Some(t))
            })
            .collect();
        self.flow(&items, 2, false);
        self.end();
    }

    fn stack(&mut self) {
        self.begin(SectionId::Stack, Entrance::SECTION, 0.2);
        self.title(icons::CODE, content::STACK_TITLE);
        self.blank(1);

        let columns = match self.class {
            ViewportClass::Mobile => 2,
            ViewportClass::Desktop => 4,
        };
        let col_width = self.width / columns as u16;

        for (chunk_index, chunk) in content::STACK.chunks(columns).enumerate() {
            if chunk_index > 0 {
                self.blank(2);
            }
            let tallest = chunk.iter().map(|(_, tools)| tools.len()).max().unwrap_or(0);
            let top = self.row();
            let mut grid: Vec<Vec<Piece>> = vec![Vec::new(); 3 + tallest];

            for (i, (category, tools)) in chunk.iter().enumerate() {
                let child = 1 + chunk_index * columns + i;
                let col = self.left + col_width * i as u16;
                let rule = col_width.saturating_sub(3).max(1) as usize;
                grid[0].push(Piece::new(col, *category, Tone::Accent, child));
                grid[1].push(Piece::new(col, "─".repeat(rule), Tone::Border, child));
                for (j, tool) in tools.iter().enumerate() {
                    let t = self.target(*tool, None);
                    let piece = Piece::new(col, *tool, Tone::Dim, child).with_target(t);
                    self.piece_region(top + 3 + j, &piece);
                    grid[3 + j].push(piece);
                }
            }
            for pieces in grid {
                self.push(pieces);
            }
        }
        self.end();
    }

    fn project_columns(&self) -> usize {
        if self.px_width >= THREE_COLUMN_PX {
            3
        } else if self.px_width >= TWO_COLUMN_PX {
            2
        } else {
            1
        }
    }

    fn projects(&mut self) {
        self.begin(SectionId::Projects, Entrance::SECTION, 0.2);
        self.title(icons::CROSSHAIR, content::PROJECTS_TITLE);
        self.blank(1);

        let columns = self.project_columns();
        let spacing = 2u16;
        let card_width = (self.width.saturating_sub(spacing * (columns as u16 - 1)) / columns as u16).max(12);
        let inner = card_width.saturating_sub(4);

        for (chunk_index, chunk) in content::PROJECTS.chunks(columns).enumerate() {
            if chunk_index > 0 {
                self.blank(1);
            }

            // Body rows of each card, before padding to a common height
            let bodies: Vec<(Vec<(String, Tone)>, Vec<String>)> = chunk
                .iter()
                .map(|p| {
                    let mut body = vec![(p.title.to_string(), Tone::Bright)];
                    body.extend(wrap(p.subtitle, inner).into_iter().map(|l| (l, Tone::Accent)));
                    body.push((String::new(), Tone::Body));
                    body.extend(wrap(p.description, inner).into_iter().map(|l| (l, Tone::Dim)));
                    let stack = wrap(&format!("→ {}", p.stack), inner);
                    (body, stack)
                })
                .collect();
            let body_height = bodies.iter().map(|(b, _)| b.len()).max().unwrap_or(0);
            let stack_height = bodies.iter().map(|(_, s)| s.len()).max().unwrap_or(0);
            // top border, body, blank, View, blank, rule, stack, bottom border
            let card_height = 1 + body_height + 1 + 1 + 1 + 1 + stack_height + 1;

            let top = self.row();
            let mut grid: Vec<Vec<Piece>> = vec![Vec::new(); card_height];

            for (i, (project, (body, stack))) in chunk.iter().zip(bodies).enumerate() {
                let child = 1 + chunk_index * columns + i;
                let left = self.left + (card_width + spacing) * i as u16;
                let right = left + card_width - 1;
                let text_col = left + 2;

                let card = self.target(project.title, Some(project.link));
                self.region(top, top + card_height, left, right + 1, card);

                let horizontal = "─".repeat(card_width.saturating_sub(2) as usize);
                let border = |col: u16, text: String| Piece::new(col, text, Tone::Border, child).with_target(card);
                grid[0].push(border(left, format!("╭{}╮", horizontal)));
                grid[card_height - 1].push(border(left, format!("╰{}╯", horizontal)));
                for row in grid.iter_mut().take(card_height - 1).skip(1) {
                    row.push(border(left, "│".to_string()));
                    row.push(border(right, "│".to_string()));
                }

                for (j, (text, tone)) in body.into_iter().enumerate() {
                    if !text.is_empty() {
                        grid[1 + j].push(Piece::new(text_col, text, tone, child));
                    }
                }

                let view_row = 1 + body_height + 1;
                let view = self.target("View", Some(project.link));
                let view_piece = Piece::new(text_col, "[ View ]", Tone::Chip, child).with_target(view);
                self.piece_region(top + view_row, &view_piece);
                grid[view_row].push(view_piece);

                grid[view_row + 2].push(Piece::new(text_col, "─".repeat(inner as usize), Tone::Border, child));
                for (j, line) in stack.into_iter().enumerate() {
                    grid[view_row + 3 + j].push(Piece::new(text_col, line, Tone::Faint, child));
                }
            }

            for pieces in grid {
                self.push(pieces);
            }
        }
        self.end();
    }

    fn philosophy(&mut self) {
        self.begin(SectionId::Philosophy, Entrance::SECTION, 0.2);

        let box_width = self.width.min(72);
        let box_left = self.centered(box_width);
        let inner = box_width.saturating_sub(4);
        let horizontal = "─".repeat(box_width.saturating_sub(2) as usize);

        let mut body: Vec<(String, Tone)> = Vec::new();
        body.push((String::new(), Tone::Body));
        body.extend(wrap(content::PHILOSOPHY_HEADLINE, inner).into_iter().map(|l| (l, Tone::Emphasis)));
        body.push((String::new(), Tone::Body));
        for line in content::PHILOSOPHY_LINES {
            body.extend(wrap(line, inner).into_iter().map(|l| (l, Tone::Body)));
            body.push((String::new(), Tone::Body));
        }
        body.extend(wrap(content::PHILOSOPHY_EMPHASIS, inner).into_iter().map(|l| (l, Tone::Accent)));
        body.push((String::new(), Tone::Body));
        body.extend(wrap(content::PHILOSOPHY_FOOTNOTE, inner).into_iter().map(|l| (l, Tone::Faint)));
        body.push((String::new(), Tone::Body));

        self.push(vec![Piece::new(box_left, format!("╭{}╮", horizontal), Tone::Border, 0)]);
        for (text, tone) in body {
            let mut pieces = vec![
                Piece::new(box_left, "│", Tone::Border, 0),
                Piece::new(box_left + box_width - 1, "│", Tone::Border, 0),
            ];
            if !text.is_empty() {
                let col = box_left + (box_width.saturating_sub(text_width(&text))) / 2;
                pieces.push(Piece::new(col, text, tone, 0));
            }
            self.push(pieces);
        }
        self.push(vec![Piece::new(box_left, format!("╰{}╯", horizontal), Tone::Border, 0)]);
        self.end();
    }

    fn footer(&mut self) {
        self.begin(SectionId::Footer, Entrance::FOOTER, 0.0);
        let rule = "─".repeat(self.width as usize);
        self.push(vec![Piece::new(self.left, rule, Tone::Border, 0)]);
        self.blank(2);

        let icon_col = self.centered(text_width(icons::MESSAGE));
        self.push(vec![Piece::new(icon_col, icons::MESSAGE, Tone::Accent, 0).with_role(Role::Icon)]);
        let title_col = self.centered(text_width(content::FOOTER_TITLE));
        self.push(vec![Piece::new(title_col, content::FOOTER_TITLE, Tone::Bright, 0)]);
        self.blank(1);
        self.paragraph(content::FOOTER_TEXT, Tone::Dim, 0, self.width, true);
        self.blank(1);

        let x = self.link_target(content::X_LINK);
        let github = self.link_target(content::GITHUB_LINK);
        let items = vec![
            (icons::X.to_string(), Tone::Dim, 0, Some(x)),
            (icons::GITHUB.to_string(), Tone::Dim, 0, Some(github)),
        ];
        self.flow(&items, 3, true);
        self.blank(2);
        self.paragraph(content::COPYRIGHT, Tone::Faint, 0, self.width, true);
        self.end();
    }
}

/// Display width of a string, one cell per char
pub fn text_width(s: &str) -> u16 {
    s.chars().count() as u16
}

/// Greedy word wrap; words longer than `width` are split
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(word.iter());
                current_len += word.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // Word alone is too long
            let rest = word.split_off(width);
            lines.push(word.iter().collect());
            word = rest;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Page {
        Page::build(140, 40, 140.0 * 8.0, ViewportClass::Desktop)
    }

    fn mobile() -> Page {
        Page::build(60, 30, 60.0 * 8.0, ViewportClass::Mobile)
    }

    fn texts(page: &Page) -> Vec<String> {
        page.lines
            .iter()
            .flat_map(|l| l.pieces.iter().map(|p| p.text.clone()))
            .collect()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("  spaced   out ", 20), vec!["spaced out"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let page = desktop();
        let order: Vec<SectionId> = page.sections.iter().map(|s| s.id).collect();
        assert_eq!(
            order,
            vec![
                SectionId::Header,
                SectionId::About,
                SectionId::Skills,
                SectionId::Stack,
                SectionId::Projects,
                SectionId::Philosophy,
                SectionId::Footer,
            ]
        );
        for pair in page.sections.windows(2) {
            assert!(pair[0].top + pair[0].height <= pair[1].top);
        }
    }

    #[test]
    fn test_header_fills_hero_height() {
        let page = desktop();
        let header = page.section(SectionId::Header).unwrap();
        assert!(header.height >= 24);
        // Block letters: 5 rows x 3 letters
        let letters = page
            .lines
            .iter()
            .flat_map(|l| &l.pieces)
            .filter(|p| matches!(p.role, Role::Letter(_)))
            .count();
        assert_eq!(letters, 15);
    }

    #[test]
    fn test_titles_registered_for_scramble() {
        let page = desktop();
        assert_eq!(
            page.titles,
            vec!["About Me", "Skills", "Using", "Vibe coded"]
        );
        for (slot, &row) in page.title_rows.iter().enumerate() {
            assert!(page.lines[row]
                .pieces
                .iter()
                .any(|p| p.role == Role::Title(slot)));
        }
    }

    #[test]
    fn test_all_content_present() {
        let all = texts(&desktop()).join("\n");
        for skill in content::SKILLS {
            assert!(all.contains(skill));
        }
        for project in content::PROJECTS {
            assert!(all.contains(project.title));
        }
        for (category, tools) in content::STACK {
            assert!(all.contains(category));
            for tool in *tools {
                assert!(all.contains(tool));
            }
        }
        assert!(all.contains(content::COPYRIGHT));
        assert!(all.contains(content::PHILOSOPHY_HEADLINE));
    }

    #[test]
    fn test_lines_fit_terminal_width() {
        for page in [desktop(), mobile()] {
            for line in &page.lines {
                for piece in &line.pieces {
                    assert!(
                        piece.col + piece.width() <= page.width,
                        "{:?} overflows {}",
                        piece.text,
                        page.width
                    );
                }
            }
        }
    }

    #[test]
    fn test_link_inside_card_wins_hit_test() {
        let page = desktop();
        let (row, view) = page
            .lines
            .iter()
            .enumerate()
            .find_map(|(i, l)| l.pieces.iter().find(|p| p.text == "[ View ]").map(|p| (i, p.clone())))
            .unwrap();
        let hit = page.hit_test(view.col + 1, row).unwrap();
        assert_eq!(page.targets[hit].label, "View");
        assert_eq!(page.targets[hit].url, Some(content::PROJECTS[0].link));

        // Elsewhere on the card hits the card
        let card = page.hit_test(view.col + 1, row - 2).unwrap();
        assert_eq!(page.targets[card].label, "Wrd");

        // Margins hit nothing
        assert_eq!(page.hit_test(0, row), None);
    }

    #[test]
    fn test_card_borders_carry_card_target() {
        let page = desktop();
        let region = page
            .regions
            .iter()
            .find(|r| page.targets[r.target].label == "Wrd")
            .unwrap();
        let on_edge = |row: usize, col: u16| {
            page.lines[row]
                .pieces
                .iter()
                .find(|p| p.col == col && p.tone == Tone::Border)
                .map(|p| p.target)
        };
        assert_eq!(on_edge(region.top, region.left), Some(Some(region.target)));
        assert_eq!(on_edge(region.top + 1, region.right - 1), Some(Some(region.target)));
        assert_eq!(on_edge(region.bottom - 1, region.left), Some(Some(region.target)));
    }

    #[test]
    fn test_header_links_are_hoverable() {
        let page = desktop();
        let labels: Vec<&str> = page
            .regions
            .iter()
            .map(|r| page.targets[r.target].label.as_str())
            .collect();
        assert!(labels.contains(&"omabyte"));
        assert!(labels.contains(&"imomao"));
        assert!(labels.contains(&"Remote"));
        assert!(labels.contains(&"Prompt Engineering"));
        assert!(labels.contains(&"Supabase"));
    }

    #[test]
    fn test_project_grid_columns() {
        let wide = Page::build(140, 40, 1120.0, ViewportClass::Desktop);
        let medium = Page::build(110, 40, 880.0, ViewportClass::Desktop);
        let narrow = mobile();
        let cards_on_first_row = |page: &Page| {
            let projects = page.section(SectionId::Projects).unwrap();
            page.lines[projects.top + 2]
                .pieces
                .iter()
                .filter(|p| p.text.starts_with('╭'))
                .count()
        };
        assert_eq!(cards_on_first_row(&wide), 3);
        assert_eq!(cards_on_first_row(&medium), 2);
        assert_eq!(cards_on_first_row(&narrow), 1);
    }

    #[test]
    fn test_visible_fraction() {
        let page = desktop();
        let about = page.section(SectionId::About).unwrap().clone();
        assert_eq!(page.visible_fraction(&about, 0, 1), 0.0);
        assert_eq!(page.visible_fraction(&about, about.top, about.height as u16), 1.0);
        let half = about.height / 2;
        let f = page.visible_fraction(&about, about.top + half, 200);
        assert!((f - (about.height - half) as f32 / about.height as f32).abs() < 1e-5);
    }

    #[test]
    fn test_max_scroll() {
        let page = desktop();
        assert_eq!(page.max_scroll(40), page.height() - 40);
        assert_eq!(page.max_scroll(10_000), 0);
    }
}
