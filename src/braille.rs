use crate::surface::Surface;
use crate::theme::{Rgb, Rgba, ACCENT};

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// Dots fainter than this are not drawn at all
const MIN_VISIBLE_ALPHA: f32 = 0.02;

/// Alpha that maps to full ink brightness. Matches the peak alpha the
/// particle layer ever draws with.
const FULL_INK_ALPHA: f32 = 0.3;

/// Brightness floor so the faintest visible dot still reads against the background
const INK_FLOOR: f32 = 0.3;

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Rgb,
}

/// Size of a terminal cell in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f32,
    pub height_px: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

impl CellMetrics {
    /// Logical pixel size of a `cols` x `rows` terminal area
    pub fn viewport(&self, cols: u16, rows: u16) -> (f32, f32) {
        (cols as f32 * self.width_px, rows as f32 * self.height_px)
    }

    /// Logical pixel position of the center of a cell
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width_px,
            (row as f32 + 0.5) * self.height_px,
        )
    }

    fn px_per_dot(&self) -> (f32, f32) {
        (self.width_px / 2.0, self.height_px / 4.0)
    }
}

/// Drawing surface backed by a Braille dot grid.
///
/// Coordinates are logical pixels; every dot covers `cell_width/2` by
/// `cell_height/4` of them. Each dot accumulates alpha with source-over
/// compositing, so overlapping translucent shapes brighten the way they do on
/// a 2D canvas.
#[derive(Debug, Clone)]
pub struct BrailleCanvas {
    metrics: CellMetrics,
    width_px: f32,
    height_px: f32,
    dots_wide: usize,
    dots_high: usize,
    alpha: Vec<f32>,
    ink: Rgb,
}

impl BrailleCanvas {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            metrics,
            width_px: 0.0,
            height_px: 0.0,
            dots_wide: 0,
            dots_high: 0,
            alpha: Vec::new(),
            ink: ACCENT,
        }
    }

    #[cfg(test)]
    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Accumulated alpha of the dot covering a pixel position
    #[cfg(test)]
    pub fn alpha_at(&self, x: f32, y: f32) -> f32 {
        self.dot_index_px(x, y).map_or(0.0, |i| self.alpha[i])
    }

    fn dot_index_px(&self, x: f32, y: f32) -> Option<usize> {
        let (sx, sy) = self.metrics.px_per_dot();
        let dx = (x / sx).floor();
        let dy = (y / sy).floor();
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        self.dot_index(dx as usize, dy as usize)
    }

    fn dot_index(&self, dx: usize, dy: usize) -> Option<usize> {
        if dx < self.dots_wide && dy < self.dots_high {
            Some(dy * self.dots_wide + dx)
        } else {
            None
        }
    }

    fn blend(&mut self, idx: usize, a: f32) {
        let dst = self.alpha[idx];
        self.alpha[idx] = a + dst * (1.0 - a);
    }

    /// Collapse the dot grid into Braille cells. Only cells with at least one
    /// visible dot are emitted.
    pub fn cells(&self, background: Rgb) -> Vec<BrailleCell> {
        let cols = self.dots_wide.div_ceil(2);
        let rows = self.dots_high.div_ceil(4);
        let mut cells = Vec::new();

        for cy in 0..rows {
            for cx in 0..cols {
                let mut pattern: u8 = 0;
                let mut peak: f32 = 0.0;

                // Sample the 2x4 dots for this Braille character
                for dx in 0..2 {
                    for dy in 0..4 {
                        if let Some(idx) = self.dot_index(cx * 2 + dx, cy * 4 + dy) {
                            let a = self.alpha[idx];
                            if a >= MIN_VISIBLE_ALPHA {
                                pattern |= BRAILLE_DOTS[dx][dy];
                                peak = peak.max(a);
                            }
                        }
                    }
                }

                if pattern != 0 {
                    let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                    let t = (peak / FULL_INK_ALPHA).min(1.0);
                    let color = background.lerp(self.ink, INK_FLOOR + (1.0 - INK_FLOOR) * t);
                    cells.push(BrailleCell {
                        x: cx as u16,
                        y: cy as u16,
                        char: braille_char,
                        color,
                    });
                }
            }
        }

        cells
    }
}

impl Surface for BrailleCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width_px, self.height_px)
    }

    fn resize(&mut self, width: f32, height: f32) {
        let (sx, sy) = self.metrics.px_per_dot();
        self.width_px = width.max(0.0);
        self.height_px = height.max(0.0);
        self.dots_wide = (self.width_px / sx).ceil() as usize;
        self.dots_high = (self.height_px / sy).ceil() as usize;
        self.alpha = vec![0.0; self.dots_wide * self.dots_high];
    }

    fn clear(&mut self) {
        self.alpha.fill(0.0);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ink = color.rgb;
        let (sx, sy) = self.metrics.px_per_dot();

        // Dots whose centers fall inside the circle
        let min_dx = ((x - radius) / sx).floor().max(0.0) as usize;
        let min_dy = ((y - radius) / sy).floor().max(0.0) as usize;
        let max_dx = ((x + radius) / sx).floor();
        let max_dy = ((y + radius) / sy).floor();
        let mut covered = false;

        if max_dx >= 0.0 && max_dy >= 0.0 {
            for dy in min_dy..=(max_dy as usize) {
                for dx in min_dx..=(max_dx as usize) {
                    let cx = (dx as f32 + 0.5) * sx;
                    let cy = (dy as f32 + 0.5) * sy;
                    let ddx = cx - x;
                    let ddy = cy - y;
                    if ddx * ddx + ddy * ddy <= radius * radius {
                        if let Some(idx) = self.dot_index(dx, dy) {
                            self.blend(idx, color.a);
                            covered = true;
                        }
                    }
                }
            }
        }

        // Circles smaller than a dot still light the dot they sit in
        if !covered {
            if let Some(idx) = self.dot_index_px(x, y) {
                self.blend(idx, color.a);
            }
        }
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), _width: f32, color: Rgba) {
        // A zero-length stroke paints nothing on a canvas with butt caps
        if from == to {
            return;
        }
        self.ink = color.rgb;
        let (sx, sy) = self.metrics.px_per_dot();

        let (x0, y0) = (from.0 / sx, from.1 / sy);
        let (x1, y1) = (to.0 / sx, to.1 / sy);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;

        let mut last: Option<usize> = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = x0 + (x1 - x0) * t;
            let py = y0 + (y1 - y0) * t;
            if px < 0.0 || py < 0.0 {
                continue;
            }
            if let Some(idx) = self.dot_index(px.floor() as usize, py.floor() as usize) {
                // One blend per dot per line
                if last != Some(idx) {
                    self.blend(idx, color.a);
                    last = Some(idx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BACKGROUND;

    fn canvas(cols: u16, rows: u16) -> BrailleCanvas {
        let mut c = BrailleCanvas::new(CellMetrics::default());
        let (w, h) = c.metrics().viewport(cols, rows);
        c.resize(w, h);
        c
    }

    #[test]
    fn test_cells_encode_dot_layout() {
        let mut c = canvas(4, 2);
        // Corner dots of the first cell, one dot per circle
        for (x, y) in [(2.0, 2.0), (6.0, 2.0), (2.0, 14.0), (6.0, 14.0)] {
            c.fill_circle(x, y, 1.0, ACCENT.with_alpha(0.3));
        }
        // Left column, second row of the next cell
        c.fill_circle(10.0, 6.0, 1.0, ACCENT.with_alpha(0.15));

        let cells = c.cells(BACKGROUND);
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].x, cells[0].y, cells[0].char), (0, 0, '\u{28C9}'));
        assert_eq!((cells[1].x, cells[1].y, cells[1].char), (1, 0, '\u{2802}'));
        // Fainter dots give a dimmer cell
        assert_eq!(cells[0].color, ACCENT);
        assert_ne!(cells[1].color, ACCENT);
    }

    #[test]
    fn test_metrics_viewport() {
        let m = CellMetrics::default();
        assert_eq!(m.viewport(100, 40), (800.0, 640.0));
        assert_eq!(m.cell_center(0, 0), (4.0, 8.0));
    }

    #[test]
    fn test_small_circle_lights_one_dot() {
        let mut c = canvas(10, 5);
        c.fill_circle(1.0, 1.0, 1.0, ACCENT.with_alpha(0.3));
        let cells = c.cells(BACKGROUND);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].char, '\u{2801}');
        assert_eq!(cells[0].color, ACCENT);
    }

    #[test]
    fn test_zero_length_line_is_inert() {
        let mut c = canvas(10, 5);
        c.stroke_line((20.0, 20.0), (20.0, 20.0), 1.0, ACCENT.with_alpha(0.3));
        assert!(c.cells(BACKGROUND).is_empty());
    }

    #[test]
    fn test_horizontal_line_spans_cells() {
        let mut c = canvas(10, 5);
        // 40 px at 4 px per dot = 10 dots = 5 cells
        c.stroke_line((0.0, 1.0), (39.0, 1.0), 1.0, ACCENT.with_alpha(0.3));
        let cells = c.cells(BACKGROUND);
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|cell| cell.y == 0));
        // Top row, both columns
        assert!(cells.iter().all(|cell| cell.char == '\u{2809}'));
    }

    #[test]
    fn test_overlap_composites() {
        let mut c = canvas(4, 4);
        c.fill_circle(1.0, 1.0, 0.5, ACCENT.with_alpha(0.3));
        c.fill_circle(1.0, 1.0, 0.5, ACCENT.with_alpha(0.3));
        assert!((c.alpha_at(1.0, 1.0) - 0.51).abs() < 1e-5);
    }

    #[test]
    fn test_faint_dots_are_skipped() {
        let mut c = canvas(4, 4);
        c.stroke_line((0.0, 0.0), (30.0, 30.0), 1.0, ACCENT.with_alpha(0.01));
        assert!(c.cells(BACKGROUND).is_empty());
    }

    #[test]
    fn test_clear_and_resize() {
        let mut c = canvas(4, 4);
        c.fill_circle(5.0, 5.0, 3.0, ACCENT.with_alpha(0.3));
        c.clear();
        assert!(c.cells(BACKGROUND).is_empty());

        c.resize(80.0, 32.0);
        assert_eq!(c.size(), (80.0, 32.0));
        c.fill_circle(79.0, 31.0, 1.0, ACCENT.with_alpha(0.3));
        let cells = c.cells(BACKGROUND);
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].x, cells[0].y), (9, 1));
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut c = canvas(4, 4);
        c.fill_circle(-10.0, -10.0, 2.0, ACCENT.with_alpha(0.3));
        c.fill_circle(500.0, 500.0, 2.0, ACCENT.with_alpha(0.3));
        c.stroke_line((-50.0, 10.0), (-10.0, 10.0), 1.0, ACCENT.with_alpha(0.3));
        assert!(c.cells(BACKGROUND).is_empty());
    }
}
