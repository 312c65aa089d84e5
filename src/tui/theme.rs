// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

use crate::layout::Palette;

pub(crate) const PALETTE_ENV: &str = "VISITLANE_TUI_PALETTE";

/// Slots of the 16-color terminal palette used by the viewer chrome.
mod slot {
    pub(super) const BLACK: usize = 0;
    pub(super) const RED: usize = 1;
    pub(super) const GREEN: usize = 2;
    pub(super) const YELLOW: usize = 3;
    pub(super) const BLUE: usize = 4;
    pub(super) const MAGENTA: usize = 5;
    pub(super) const CYAN: usize = 6;
    pub(super) const BRIGHT_BLACK: usize = 8;
}

/// Terminal defaults for the 16 ANSI slots, in `black, red, ..., bright_white` order.
const DEFAULT_ANSI: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

/// Lane colors when a palette entry is not a terminal color (e.g. a CSS name).
const FALLBACK_TRACK_SLOTS: [usize; 6] =
    [slot::BLUE, slot::CYAN, slot::GREEN, slot::YELLOW, slot::MAGENTA, slot::RED];

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    terminal: Option<TerminalPalette>,
    tracks: Vec<Option<Color>>,
}

impl TuiTheme {
    pub(crate) fn from_env(tracks: &Palette) -> Result<Self, ThemeError> {
        let terminal = terminal_palette_from_env()?;
        Ok(Self { terminal, tracks: Vec::new() }.with_tracks(tracks))
    }

    pub(crate) fn with_tracks(mut self, tracks: &Palette) -> Self {
        self.tracks =
            tracks.colors().iter().map(|color| parse_palette_color(color).ok()).collect();
        self
    }

    fn ansi(&self, slot: usize) -> Color {
        self.terminal.as_ref().map_or(DEFAULT_ANSI[slot], |terminal| terminal.ansi[slot])
    }

    pub(crate) fn base_style(&self) -> Style {
        self.terminal
            .as_ref()
            .map_or_else(Style::default, |terminal| Style::default().fg(terminal.fg).bg(terminal.bg))
    }

    pub(crate) fn track_color(&self, track: usize) -> Color {
        let parsed = match self.tracks.len() {
            0 => None,
            len => self.tracks[track % len],
        };
        parsed.unwrap_or_else(|| self.ansi(FALLBACK_TRACK_SLOTS[track % FALLBACK_TRACK_SLOTS.len()]))
    }

    pub(crate) fn track_style(&self, track: usize) -> Style {
        self.base_style().fg(self.track_color(track))
    }

    pub(crate) fn node_style(&self, track: usize) -> Style {
        self.track_style(track).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        match focused {
            true => self.base_style().fg(self.ansi(slot::YELLOW)),
            false => self.base_style(),
        }
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.ansi(slot::BRIGHT_BLACK))
    }

    pub(crate) fn hover_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi(slot::BLACK))
            .bg(self.ansi(slot::CYAN))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn search_match_style(&self) -> Style {
        self.base_style().fg(self.ansi(slot::YELLOW)).add_modifier(Modifier::UNDERLINED)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi(slot::RED))
    }
}

/// Foreground, background and the 16 ANSI colors of the user's terminal scheme.
#[derive(Debug, Clone, PartialEq)]
struct TerminalPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TerminalPalette {
    const FIELDS: usize = 18;

    /// `fg,bg,black,red,green,yellow,blue,magenta,cyan,white,bright_black,...,bright_white`
    fn parse_csv(value: &str) -> Result<Self, String> {
        let colors = value
            .split(',')
            .map(parse_palette_color)
            .collect::<Result<Vec<_>, _>>()?;
        let [fg, bg, ansi @ ..] = colors.as_slice() else {
            return Err(format!("expected {} colors, got {}", Self::FIELDS, colors.len()));
        };
        let ansi = <[Color; 16]>::try_from(ansi)
            .map_err(|_| format!("expected {} colors, got {}", Self::FIELDS, colors.len()))?;
        Ok(Self { fg: *fg, bg: *bg, ansi })
    }
}

fn terminal_palette_from_env() -> Result<Option<TerminalPalette>, ThemeError> {
    let invalid = |value: String| ThemeError::InvalidEnv { name: PALETTE_ENV, value };
    let raw = match env::var(PALETTE_ENV) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => return Err(invalid("<non-unicode>".to_owned())),
    };

    match raw.trim() {
        "" => Ok(None),
        value => TerminalPalette::parse_csv(value)
            .map(Some)
            .map_err(|reason| invalid(format!("{value} ({reason})"))),
    }
}

/// Parses `#RRGGBB`, `0xRRGGBB`, bare `RRGGBB` or xterm `rgb:RR/GG/BB` (2 or 4 hex digits per
/// channel).
pub(crate) fn parse_palette_color(value: &str) -> Result<Color, String> {
    let value = value.trim();
    if let Some(channels) = value.to_ascii_lowercase().strip_prefix("rgb:") {
        let parsed = channels.split('/').map(parse_xterm_channel).collect::<Result<Vec<_>, _>>()?;
        return match parsed.as_slice() {
            [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
            _ => Err(format!("invalid rgb: color {value}")),
        };
    }

    let hex = ["#", "0x", "0X"]
        .iter()
        .find_map(|prefix| value.strip_prefix(prefix))
        .unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid color {value:?} (expected #RRGGBB)"));
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Color::Rgb(r, g, b)),
        _ => Err(format!("invalid color {value:?}")),
    }
}

fn parse_xterm_channel(value: &str) -> Result<u8, String> {
    let parsed = match value.len() {
        2 => u8::from_str_radix(value, 16).ok(),
        4 => u16::from_str_radix(value, 16).ok().map(|wide| (wide >> 8) as u8),
        _ => None,
    };
    parsed.ok_or_else(|| format!("invalid rgb: channel {value:?}"))
}

#[derive(Debug, Clone, Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: &'static str, value: String },
}
