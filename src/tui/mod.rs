// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive viewer over the Unicode timeline (ratatui + crossterm). The keyboard and mouse
//! drive the same [`InteractionState`] an embedding UI would use: hover shows the tooltip,
//! selecting a visit shows its context and makes its summary available for copying.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, VisitlaneConfig};
use crate::context::{summarize_visit, VisitContext};
use crate::geometry::{build_scene, GeometryConfig, HoverInfo, Scene};
use crate::layout::{layout_visits, LayoutOptions, VisitLayout};
use crate::model::{demo_visits, VisitRecord};
use crate::query::{visit_search, VisitSearchMode};
use crate::render::timeline::{label_x, lane_x};
use crate::render::{render_timeline_unicode_annotated, AnnotatedRender, TimelineRenderError};
use crate::ui::InteractionState;

mod theme;

pub use theme::ThemeError;
use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const NODE_GLYPH: char = '●';
const TOAST_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum TuiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("failed to render timeline: {0}")]
    Render(#[from] TimelineRenderError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the viewer on the built-in demo history.
pub fn run(config: &VisitlaneConfig) -> Result<(), TuiError> {
    run_with_visits(demo_visits(), config)
}

pub fn run_with_visits(visits: Vec<VisitRecord>, config: &VisitlaneConfig) -> Result<(), TuiError> {
    let options = config.layout_options()?;
    let theme = TuiTheme::from_env(&options.palette)?;
    let mut app = App::new(visits, &options, &config.geometry, theme)?;
    debug!(visits = app.visits.len(), tracks = app.layout.track_count(), "starting tui");

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        app.expire_toast(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if let Some(text) = app.take_pending_copy() {
            match copy_to_clipboard(&text) {
                Ok(backend) => app.set_toast(format!("Copied visit summary ({backend})")),
                Err(err) => app.set_toast(format!("Clipboard error: {err}")),
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let direction = if stack_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_area);

    draw_timeline(frame, app, panes[0]);
    draw_inspector(frame, app, panes[1]);

    let footer = if app.search_mode == SearchMode::Inactive {
        footer_help_line(app)
    } else {
        search_footer_line(app)
    };
    frame.render_widget(Paragraph::new(footer).style(app.theme.base_style()), status_area);
}

fn draw_timeline(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    app.timeline_area = area;
    app.ensure_focus_visible(usize::from(area.height.saturating_sub(2)));

    let title = format!(
        " Visits ({}) · Tracks ({}) ",
        app.layout.row_count(),
        app.layout.track_count()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.panel_border_style(true))
        .style(app.theme.base_style());
    let scroll = u16::try_from(app.scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(app.timeline_lines()).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_inspector(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = if app.context.is_some() { " Visit " } else { " Inspector " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(app.theme.panel_border_style(false))
        .style(app.theme.base_style());
    let paragraph =
        Paragraph::new(app.inspector_lines()).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    Substring,
    Regex,
}

impl SearchKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Substring => "/",
            Self::Regex => "\\",
        }
    }

    fn mode(self) -> VisitSearchMode {
        match self {
            Self::Substring => VisitSearchMode::Substring,
            Self::Regex => VisitSearchMode::Regex,
        }
    }
}

struct App {
    visits: Vec<VisitRecord>,
    layout: VisitLayout,
    scene: Scene,
    render: AnnotatedRender,
    theme: TuiTheme,
    interaction: InteractionState,
    hover: Option<HoverInfo>,
    context: Option<VisitContext>,
    scroll: usize,
    timeline_area: Rect,
    search_mode: SearchMode,
    search_kind: SearchKind,
    search_query: String,
    search_results: Vec<usize>,
    search_result_index: usize,
    search_error: Option<String>,
    toast: Option<Toast>,
    pending_copy: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(
        visits: Vec<VisitRecord>,
        options: &LayoutOptions,
        geometry: &GeometryConfig,
        theme: TuiTheme,
    ) -> Result<Self, TimelineRenderError> {
        let layout = layout_visits(&visits, options);
        let scene = build_scene(&visits, &layout, geometry);
        let render = render_timeline_unicode_annotated(&visits, &layout)?;

        Ok(Self {
            visits,
            layout,
            scene,
            render,
            theme,
            interaction: InteractionState::default(),
            hover: None,
            context: None,
            scroll: 0,
            timeline_area: Rect::default(),
            search_mode: SearchMode::Inactive,
            search_kind: SearchKind::Substring,
            search_query: String::new(),
            search_results: Vec::new(),
            search_result_index: 0,
            search_error: None,
            toast: None,
            pending_copy: None,
            should_quit: false,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.search_mode == SearchMode::Editing {
            self.handle_search_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.search_mode == SearchMode::Results {
                    self.clear_search();
                } else if self.context.is_some() {
                    self.clear_selection();
                } else {
                    return true;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_hover(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_hover(-1),
            KeyCode::PageDown => self.move_hover(10),
            KeyCode::PageUp => self.move_hover(-10),
            KeyCode::Home | KeyCode::Char('g') => self.hover_row(0),
            KeyCode::End | KeyCode::Char('G') => {
                if let Some(last) = self.visits.len().checked_sub(1) {
                    self.hover_row(last);
                }
            }
            KeyCode::Enter => self.select_hovered(),
            KeyCode::Char('y') => self.yank_summary(),
            KeyCode::Char('/') => self.enter_search_mode(SearchKind::Substring),
            KeyCode::Char('\\') => self.enter_search_mode(SearchKind::Regex),
            KeyCode::Char('n') => self.search_next(),
            KeyCode::Char('N') => self.search_prev(),
            _ => {}
        }

        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => match self.row_at(mouse.column, mouse.row) {
                Some(row) => self.hover_row(row),
                None => {
                    self.interaction.clear_hover();
                    self.hover = None;
                }
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = self.row_at(mouse.column, mouse.row) {
                    self.hover_row(row);
                    self.select_hovered();
                }
            }
            MouseEventKind::ScrollDown => self.move_hover(1),
            MouseEventKind::ScrollUp => self.move_hover(-1),
            _ => {}
        }
    }

    /// Visit row under a terminal cell inside the timeline panel.
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.timeline_area;
        let inside_x = column > area.x && column < area.right().saturating_sub(1);
        let inside_y = row > area.y && row < area.bottom().saturating_sub(1);
        if !inside_x || !inside_y {
            return None;
        }
        let visit_row = usize::from(row - area.y - 1) + self.scroll;
        (visit_row < self.layout.row_count()).then_some(visit_row)
    }

    fn move_hover(&mut self, delta: isize) {
        let Some(last) = self.visits.len().checked_sub(1) else {
            return;
        };
        let next = match self.interaction.hovered_row() {
            None if delta >= 0 => 0,
            None => last,
            Some(row) => row.saturating_add_signed(delta).min(last),
        };
        self.hover_row(next);
    }

    fn hover_row(&mut self, row: usize) {
        self.hover = self.interaction.hover_row(&self.scene, row);
    }

    fn select_hovered(&mut self) {
        let Some(row) = self.interaction.hovered_row() else {
            self.set_toast("No visit under the cursor");
            return;
        };
        self.context = self.interaction.select_row(&self.scene, &self.visits, row);
        debug!(row, visit_id = ?self.context.as_ref().map(|c| c.visit_id.as_str()), "selected visit");
    }

    fn clear_selection(&mut self) {
        self.interaction.clear_selection();
        self.context = None;
    }

    fn yank_summary(&mut self) {
        let summary = match (&self.context, self.interaction.hovered_row()) {
            (Some(context), _) => Some(context.summary.clone()),
            (None, Some(row)) => self.visits.get(row).map(summarize_visit),
            (None, None) => None,
        };
        match summary {
            Some(summary) => self.pending_copy = Some(summary),
            None => self.set_toast("No visit selected"),
        }
    }

    fn take_pending_copy(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    fn enter_search_mode(&mut self, kind: SearchKind) {
        self.search_mode = SearchMode::Editing;
        self.search_kind = kind;
        self.search_query.clear();
        self.search_results.clear();
        self.search_result_index = 0;
        self.search_error = None;
    }

    fn handle_search_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.clear_search(),
            KeyCode::Enter => self.commit_search(),
            KeyCode::Backspace => {
                self.search_query.pop();
                self.update_search_results();
            }
            KeyCode::Char(ch) => {
                self.search_query.push(ch);
                self.update_search_results();
            }
            _ => {}
        }
    }

    fn update_search_results(&mut self) {
        self.search_result_index = 0;
        self.search_error = None;
        if self.search_query.is_empty() {
            self.search_results.clear();
            return;
        }

        match visit_search(&self.visits, &self.search_query, self.search_kind.mode(), true) {
            Ok(rows) => {
                self.search_results = rows;
                if let Some(&row) = self.search_results.first() {
                    self.hover_row(row);
                }
            }
            Err(err) => {
                self.search_results.clear();
                self.search_error = Some(err.to_string());
            }
        }
    }

    fn commit_search(&mut self) {
        if self.search_results.len() > 1 {
            self.search_mode = SearchMode::Results;
        } else {
            self.search_mode = SearchMode::Inactive;
        }
    }

    fn clear_search(&mut self) {
        self.search_mode = SearchMode::Inactive;
        self.search_query.clear();
        self.search_results.clear();
        self.search_result_index = 0;
        self.search_error = None;
    }

    fn search_next(&mut self) {
        if self.search_results.is_empty() {
            return;
        }
        self.search_result_index = (self.search_result_index + 1) % self.search_results.len();
        self.hover_row(self.search_results[self.search_result_index]);
    }

    fn search_prev(&mut self) {
        if self.search_results.is_empty() {
            return;
        }
        self.search_result_index = self
            .search_result_index
            .checked_sub(1)
            .unwrap_or(self.search_results.len() - 1);
        self.hover_row(self.search_results[self.search_result_index]);
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }

    /// Keeps the hovered (or selected) row inside a viewport of `height` lines.
    fn ensure_focus_visible(&mut self, height: usize) {
        let Some(row) = self.interaction.hovered_row().or(self.interaction.selected_row()) else {
            return;
        };
        if height == 0 {
            return;
        }
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }

    fn row_label_style(&self, row: usize) -> Style {
        if self.interaction.selected_row() == Some(row) {
            self.theme.selection_style()
        } else if self.interaction.hovered_row() == Some(row) {
            self.theme.hover_style()
        } else if self.search_results.contains(&row) {
            self.theme.search_match_style()
        } else {
            self.theme.base_style()
        }
    }

    fn lane_style(&self, x: usize, ch: char, row: usize) -> Style {
        let lane_track = (0..self.layout.track_count()).find(|track| lane_x(*track) == x);
        match lane_track {
            Some(track) if ch == NODE_GLYPH => self.theme.node_style(track),
            Some(track) => self.theme.track_style(track),
            // Horizontal branch segments lead into this row's track.
            None => self
                .layout
                .rows()
                .get(row)
                .map(|row_track| self.theme.track_style(row_track.track()))
                .unwrap_or_else(|| self.theme.base_style()),
        }
    }

    fn timeline_lines(&self) -> Vec<Line<'static>> {
        if self.layout.is_empty() {
            return vec![Line::styled(self.render.text.clone(), self.theme.muted_style())];
        }

        let label_col = label_x(self.layout.track_count());
        self.render
            .text
            .split('\n')
            .enumerate()
            .map(|(y, line)| {
                let label_span = self.render.highlight_index.get(&y).and_then(|spans| spans.get(1));
                let label_style = self.row_label_style(y);
                styled_line(line.chars().enumerate().map(|(x, ch)| {
                    let style = match label_span {
                        Some(&(_, x0, x1)) if (x0..=x1).contains(&x) => label_style,
                        _ if x < label_col && ch != ' ' => self.lane_style(x, ch, y),
                        _ => self.theme.base_style(),
                    };
                    (ch, style)
                }))
            })
            .collect()
    }

    fn inspector_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::<Line<'static>>::new();
        let label = Style::default().fg(FOOTER_LABEL_COLOR);

        if let Some(context) = &self.context {
            let field = |name: &str, value: String| {
                Line::from(vec![Span::styled(format!("{name:<13}"), label), Span::raw(value)])
            };
            lines.push(field("Visit", context.visit_id.clone()));
            lines.push(field(
                "Doctor",
                context.doctor_name.clone().unwrap_or_else(|| "Unknown doctor".to_owned()),
            ));
            lines.push(field(
                "Date",
                context.appointment_date.clone().unwrap_or_else(|| "Unknown date".to_owned()),
            ));
            lines.push(field("Symptoms", context.symptoms.clone()));
            lines.push(field("Prescription", context.prescription.clone()));
            lines.push(Line::default());
            lines.push(Line::styled("Summary", label));
            lines.push(Line::raw(context.summary.clone()));
            lines.push(Line::default());
        } else if let Some(hover) = &self.hover {
            for text in hover.tooltip().lines() {
                lines.push(Line::raw(text.to_owned()));
            }
            lines.push(Line::styled("Enter to open this visit", self.theme.muted_style()));
            lines.push(Line::default());
        }

        lines.push(Line::styled("Tracks", label));
        for track in self.layout.tracks() {
            lines.push(Line::from(vec![
                Span::styled(format!("{NODE_GLYPH} "), self.theme.node_style(track.index())),
                Span::raw(track.key().label().to_owned()),
                Span::styled(format!("  ({})", track.rows().len()), self.theme.muted_style()),
            ]));
        }
        if self.layout.is_empty() {
            lines.push(Line::styled("none", self.theme.muted_style()));
        }

        lines
    }
}

/// Builds a line from styled cells, merging runs of equal style into one span.
fn styled_line(cells: impl Iterator<Item = (char, Style)>) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let mut run = String::new();
    let mut run_style = None::<Style>;

    for (ch, style) in cells {
        if run_style.is_some_and(|current| current != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).inspect_err(|_| {
            teardown_terminal();
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).inspect_err(|_| teardown_terminal())?;
        terminal.clear().inspect_err(|_| teardown_terminal())?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[cfg(test)]
mod tests;
