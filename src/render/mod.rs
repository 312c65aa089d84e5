// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for visit graphs.
//!
//! `svg` serializes a [`crate::geometry::Scene`] to a standalone SVG document. `timeline`
//! draws the same layout as Unicode text, together with a stable highlight index that the TUI
//! uses for row-accurate selection.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub mod svg;
mod text;
pub mod timeline;

pub use svg::{render_scene_svg, SvgOptions};
pub use timeline::{
    render_timeline_unicode, render_timeline_unicode_annotated, TimelineRenderError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_visit_ids: bool,
    /// Labels longer than this are cut with `…`.
    pub max_label_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_visit_ids: true, max_label_len: 64 }
    }
}

/// A contiguous span of highlighted cells within a single rendered line.
///
/// Coordinates are `(y, x0, x1)` in character-cell indices, inclusive, relative to the returned
/// rendered text lines.
pub type LineSpan = (usize, usize, usize);

/// Mapping from visit rows to the spans that should be highlighted for that visit.
pub type HighlightIndex = BTreeMap<usize, Vec<LineSpan>>;

/// Render output plus an index suitable for stable, cell-accurate UI highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
}

pub(crate) fn clamp_highlight_index_to_text(highlight_index: &mut HighlightIndex, text: &str) {
    let line_lens = text.split('\n').map(text::text_len).collect::<Vec<_>>();

    highlight_index.retain(|_, spans| {
        spans.retain_mut(|span| {
            let (y, x0, x1) = span;

            let len = match line_lens.get(*y) {
                Some(len) => *len,
                None => return false,
            };

            if len == 0 || *x0 >= len {
                return false;
            }

            let max_x = len - 1;
            if *x1 > max_x {
                *x1 = max_x;
            }

            *x0 <= *x1
        });
        !spans.is_empty()
    });
}

/// Sides of a cell a line leaves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Edges {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Edges {
    const HORIZONTAL: Self = Self { left: true, right: true, up: false, down: false };
    const VERTICAL: Self = Self { left: false, right: false, up: true, down: true };

    fn merge(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }

    fn is_empty(self) -> bool {
        self == Self::default()
    }

    /// Box-drawing glyph for this set of sides; a dangling end draws as a straight line.
    fn glyph(self) -> char {
        match (self.left, self.right, self.up, self.down) {
            (false, false, false, false) => ' ',
            (_, _, false, false) => '─',
            (false, false, _, _) => '│',
            (false, true, false, true) => '┌',
            (true, false, false, true) => '┐',
            (false, true, true, false) => '└',
            (true, false, true, false) => '┘',
            (false, true, true, true) => '├',
            (true, false, true, true) => '┤',
            (true, true, false, true) => '┬',
            (true, true, true, false) => '┴',
            (true, true, true, true) => '┼',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Text(char),
    Line(Edges),
    /// A visit node: drawn as its own glyph, joined by lines from every side.
    Node(char),
}

/// A fixed-size, bounds-checked character grid for lane drawings.
///
/// Lines drawn over each other merge into junctions (`├`, `┼`, ...). Text overwrites whatever
/// is below it, including lines and nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![Cell::Text(' '); len] })
    }

    pub fn set_node(&mut self, x: usize, y: usize, glyph: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = Cell::Node(glyph);
        Ok(())
    }

    /// Writes `text` starting at `(x, y)`, clipped at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        let row_start = self.index_of(0, y)?;
        for (col, ch) in (x..self.width).zip(text.chars()) {
            self.cells[row_start + col] = Cell::Text(ch);
        }
        Ok(())
    }

    /// Horizontal line over `x0..=x1` (either order) at row `y`.
    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (from, to) = (x0.min(x1), x0.max(x1));
        self.index_of(to, y)?;
        for x in from..=to {
            self.add_line(x, y, Edges::HORIZONTAL)?;
        }
        Ok(())
    }

    /// Vertical line over `y0..=y1` (either order) at column `x`.
    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (from, to) = (y0.min(y1), y0.max(y1));
        self.index_of(x, to)?;
        for y in from..=to {
            self.add_line(x, y, Edges::VERTICAL)?;
        }
        Ok(())
    }

    fn add_line(&mut self, x: usize, y: usize, edges: Edges) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = match self.cells[idx] {
            Cell::Line(existing) => Cell::Line(existing.merge(edges)),
            Cell::Node(glyph) => Cell::Node(glyph),
            Cell::Text(_) => Cell::Line(edges),
        };
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }

    /// Whether the cell at `(x, y)` has a line leaving through `side` of it.
    fn reaches(&self, x: usize, y: usize, side: fn(Edges) -> bool) -> bool {
        match self.cells[y * self.width + x] {
            Cell::Line(edges) => side(edges),
            Cell::Node(_) => true,
            Cell::Text(_) => false,
        }
    }

    fn glyph_at(&self, x: usize, y: usize) -> char {
        let edges = match self.cells[y * self.width + x] {
            Cell::Text(ch) | Cell::Node(ch) => return ch,
            Cell::Line(edges) => edges,
        };

        // Only keep sides whose neighbor reaches back, so lane ends don't draw as tees.
        let connected = Edges {
            left: edges.left && x > 0 && self.reaches(x - 1, y, |e| e.right),
            right: edges.right && x + 1 < self.width && self.reaches(x + 1, y, |e| e.left),
            up: edges.up && y > 0 && self.reaches(x, y - 1, |e| e.down),
            down: edges.down && y + 1 < self.height && self.reaches(x, y + 1, |e| e.up),
        };
        let drawn = if connected.is_empty() { edges } else { connected };
        drawn.glyph()
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                f.write_char(self.glyph_at(x, y))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}
