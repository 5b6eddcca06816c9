use crossterm::Command;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page background, also pushed to the terminal as its theme color
pub const BACKGROUND: Rgb = Rgb::new(0x02, 0x04, 0x0a);
/// Accent used for particles, links, icons and the cursor ring
pub const ACCENT: Rgb = Rgb::new(0x00, 0xf6, 0xff);

pub const TEXT: Color = Color::Rgb(0xd1, 0xd5, 0xdb);
pub const TEXT_DIM: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const TEXT_FAINT: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const TEXT_BRIGHT: Color = Color::Rgb(0xf3, 0xf4, 0xf6);
pub const BORDER: Color = Color::Rgb(0x1f, 0x29, 0x37);

pub const WINDOW_TITLE: &str = "OMA";

/// Opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba { rgb: self, a }
    }

    /// Linear blend toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Color with straight (non-premultiplied) alpha, as the canvas fill/stroke styles use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

/// Sets the terminal's default background color (OSC 11).
pub struct SetThemeColor(pub Rgb);

impl Command for SetThemeColor {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let Rgb { r, g, b } = self.0;
        write!(f, "\x1b]11;rgb:{:02x}/{:02x}/{:02x}\x07", r, g, b)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Restores the terminal's own background color (OSC 111).
pub struct ResetThemeColor;

impl Command for ResetThemeColor {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b]111\x07")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Create-or-update holder for the terminal theme color.
///
/// The color is only written when it differs from what was last applied, so
/// calling [`ThemeColor::apply`] repeatedly is harmless.
#[derive(Debug, Default)]
pub struct ThemeColor {
    applied: Option<Rgb>,
}

impl ThemeColor {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<Rgb> {
        self.applied
    }

    /// Write the color (and window title) if it is not already in effect.
    /// Returns whether anything was emitted.
    pub fn apply<W: std::io::Write>(&mut self, out: &mut W, color: Rgb) -> std::io::Result<bool> {
        if self.applied == Some(color) {
            return Ok(false);
        }
        crossterm::queue!(
            out,
            SetThemeColor(color),
            crossterm::terminal::SetTitle(WINDOW_TITLE)
        )?;
        out.flush()?;
        tracing::debug!(color = %color, "theme color applied");
        self.applied = Some(color);
        Ok(true)
    }

    /// Hand the background back to the terminal, if we changed it.
    pub fn restore<W: std::io::Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if self.applied.take().is_some() {
            crossterm::queue!(out, ResetThemeColor)?;
            out.flush()?;
        }
        Ok(())
    }
}
