// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;

use super::{osc52_sequence, styled_line, App, SearchKind, SearchMode, TuiTheme};
use crate::context::summarize_visit;
use crate::geometry::{GeometryConfig, EMPTY_STATE_TEXT};
use crate::layout::LayoutOptions;
use crate::model::{demo_visits, VisitRecord};

fn app_with(visits: Vec<VisitRecord>) -> App {
    App::new(visits, &LayoutOptions::default(), &GeometryConfig::default(), TuiTheme::default())
        .expect("app")
}

fn demo_app() -> App {
    app_with(demo_visits())
}

fn press(app: &mut App, codes: &[KeyCode]) -> bool {
    codes.iter().fold(false, |quit, code| app.handle_key_code(*code) || quit)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key_code(KeyCode::Char(ch));
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
}

#[test]
fn arrow_keys_move_hover_and_clamp_at_edges() {
    let mut app = demo_app();
    assert_eq!(app.interaction.hovered_row(), None);

    press(&mut app, &[KeyCode::Char('j')]);
    assert_eq!(app.interaction.hovered_row(), Some(0));
    assert_eq!(app.hover.as_ref().map(|hover| hover.visit_id.as_str()), Some("visit-0107"));

    press(&mut app, &[KeyCode::Down, KeyCode::Down]);
    assert_eq!(app.interaction.hovered_row(), Some(2));

    press(&mut app, &[KeyCode::Char('G'), KeyCode::Char('j')]);
    assert_eq!(app.interaction.hovered_row(), Some(4));

    press(&mut app, &[KeyCode::Char('g'), KeyCode::Up]);
    assert_eq!(app.interaction.hovered_row(), Some(0));
}

#[test]
fn k_without_hover_starts_from_last_row() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('k')]);
    assert_eq!(app.interaction.hovered_row(), Some(4));
}

#[test]
fn enter_opens_context_of_hovered_visit() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter]);

    let context = app.context.as_ref().expect("context");
    assert_eq!(context.visit_id, "visit-0104");
    assert_eq!(context.doctor_name.as_deref(), Some("Dr. Lucas Brandt"));
    assert_eq!(context.summary, summarize_visit(&app.visits[1]));
    assert_eq!(app.interaction.selected_row(), Some(1));
}

#[test]
fn enter_without_hover_shows_toast() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Enter]);
    assert!(app.context.is_none());
    assert_eq!(app.toast.as_ref().map(|toast| toast.message.as_str()), Some("No visit under the cursor"));
}

#[test]
fn esc_clears_selection_before_quitting() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);
    assert!(app.context.is_some());

    assert!(!press(&mut app, &[KeyCode::Esc]));
    assert!(app.context.is_none());
    assert_eq!(app.interaction.selected_row(), None);

    assert!(press(&mut app, &[KeyCode::Esc]));
}

#[test]
fn q_quits() {
    let mut app = demo_app();
    assert!(press(&mut app, &[KeyCode::Char('q')]));
}

#[test]
fn yank_copies_selected_summary_then_hovered_summary() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('y')]);
    assert_eq!(app.take_pending_copy(), None);
    assert_eq!(app.toast.as_ref().map(|toast| toast.message.as_str()), Some("No visit selected"));

    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter, KeyCode::Char('j'), KeyCode::Char('y')]);
    assert_eq!(app.take_pending_copy(), Some(summarize_visit(&app.visits[0])));
    assert_eq!(app.take_pending_copy(), None);

    press(&mut app, &[KeyCode::Esc, KeyCode::Char('y')]);
    assert_eq!(app.take_pending_copy(), Some(summarize_visit(&app.visits[1])));
}

#[test]
fn substring_search_hovers_matches_and_cycles() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('/')]);
    assert_eq!(app.search_mode, SearchMode::Editing);
    assert_eq!(app.search_kind, SearchKind::Substring);

    type_text(&mut app, "TANAKA");
    assert_eq!(app.search_results, vec![3, 4]);
    assert_eq!(app.interaction.hovered_row(), Some(3));

    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.search_mode, SearchMode::Results);

    press(&mut app, &[KeyCode::Char('n')]);
    assert_eq!(app.interaction.hovered_row(), Some(4));
    press(&mut app, &[KeyCode::Char('n')]);
    assert_eq!(app.interaction.hovered_row(), Some(3));
    press(&mut app, &[KeyCode::Char('N')]);
    assert_eq!(app.interaction.hovered_row(), Some(4));

    assert!(!press(&mut app, &[KeyCode::Esc]));
    assert_eq!(app.search_mode, SearchMode::Inactive);
    assert!(app.search_results.is_empty());
}

#[test]
fn search_query_keystrokes_do_not_trigger_commands() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('/')]);
    assert!(!press(&mut app, &[KeyCode::Char('q'), KeyCode::Char('y')]));
    assert_eq!(app.search_query, "qy");
    assert!(app.take_pending_copy().is_none());

    press(&mut app, &[KeyCode::Backspace, KeyCode::Backspace]);
    assert_eq!(app.search_query, "");
    assert!(app.search_results.is_empty());
}

#[test]
fn single_match_commit_leaves_search_mode() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('/')]);
    type_text(&mut app, "knee");
    assert_eq!(app.search_results, vec![1]);

    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.search_mode, SearchMode::Inactive);
    assert_eq!(app.interaction.hovered_row(), Some(1));
}

#[test]
fn regex_search_matches_and_reports_invalid_patterns() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('\\')]);
    assert_eq!(app.search_kind, SearchKind::Regex);

    type_text(&mut app, "^2024-0[56]");
    assert_eq!(app.search_results, vec![0, 1]);

    press(&mut app, &[KeyCode::Esc, KeyCode::Char('\\')]);
    type_text(&mut app, "(");
    assert!(app.search_results.is_empty());
    assert!(app.search_error.as_deref().is_some_and(|err| err.starts_with("invalid search regex")));
}

#[test]
fn timeline_lines_keep_rendered_text() {
    let app = demo_app();
    let lines = app.timeline_lines();
    let texts = lines.iter().map(line_text).collect::<Vec<_>>();
    assert_eq!(texts, app.render.text.split('\n').collect::<Vec<_>>());
}

#[test]
fn hovered_and_selected_labels_are_styled() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter, KeyCode::Char('j')]);

    let lines = app.timeline_lines();
    let label_style = |row: usize| {
        lines[row]
            .spans
            .iter()
            .find(|span| span.content.contains("Dr. "))
            .map(|span| span.style)
            .expect("label span")
    };
    assert_eq!(label_style(0), app.theme.selection_style());
    assert_eq!(label_style(1), app.theme.hover_style());
    assert_eq!(label_style(2), app.theme.base_style());
}

#[test]
fn lanes_use_track_colors() {
    let app = demo_app();
    let lines = app.timeline_lines();
    let node_span = |row: usize| {
        lines[row]
            .spans
            .iter()
            .find(|span| span.content.contains('●'))
            .map(|span| span.style)
            .expect("node span")
    };
    assert_eq!(node_span(0), app.theme.node_style(0));
    assert_eq!(node_span(1), app.theme.node_style(1));
    assert_eq!(node_span(3), app.theme.node_style(2));
}

#[test]
fn mouse_hover_and_click_map_to_rows() {
    let mut app = demo_app();
    app.timeline_area = Rect::new(0, 0, 60, 10);

    app.handle_mouse(mouse(MouseEventKind::Moved, 5, 3));
    assert_eq!(app.interaction.hovered_row(), Some(2));

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
    assert_eq!(app.interaction.selected_row(), Some(1));
    assert_eq!(app.context.as_ref().map(|context| context.visit_id.as_str()), Some("visit-0104"));

    // Border and rows past the last visit are not hits.
    app.handle_mouse(mouse(MouseEventKind::Moved, 0, 3));
    assert_eq!(app.interaction.hovered_row(), None);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 8));
    assert_eq!(app.interaction.selected_row(), Some(1));
}

#[test]
fn scroll_follows_hovered_row() {
    let mut app = demo_app();
    press(&mut app, &[KeyCode::Char('G')]);
    app.ensure_focus_visible(2);
    assert_eq!(app.scroll, 3);

    press(&mut app, &[KeyCode::Char('g')]);
    app.ensure_focus_visible(2);
    assert_eq!(app.scroll, 0);
}

#[test]
fn empty_history_shows_message_and_ignores_navigation() {
    let mut app = app_with(Vec::new());
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter, KeyCode::Char('G')]);
    assert_eq!(app.interaction.hovered_row(), None);
    assert!(app.context.is_none());

    let lines = app.timeline_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), EMPTY_STATE_TEXT);
}

#[test]
fn inspector_lists_tracks_and_selected_visit() {
    let mut app = demo_app();
    let legend = app.inspector_lines().iter().map(line_text).collect::<Vec<_>>();
    assert!(legend.contains(&"● Dr. Amara Okafor  (2)".to_owned()));
    assert!(legend.contains(&"● Dr. Lucas Brandt  (1)".to_owned()));

    press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);
    let lines = app.inspector_lines().iter().map(line_text).collect::<Vec<_>>();
    assert!(lines[0].ends_with("visit-0107"));
    assert!(lines.contains(&summarize_visit(&app.visits[0])));
}

#[test]
fn toast_expires() {
    let mut app = demo_app();
    app.set_toast("hello");
    app.expire_toast(Instant::now());
    assert!(app.toast.is_some());
    app.expire_toast(Instant::now() + Duration::from_secs(3));
    assert!(app.toast.is_none());
}

#[test]
fn styled_line_merges_equal_styles() {
    let red = Style::default().fg(Color::Red);
    let line = styled_line("ab c".chars().map(|ch| (ch, if ch == ' ' { Style::default() } else { red })));
    let contents = line.spans.iter().map(|span| span.content.as_ref()).collect::<Vec<_>>();
    assert_eq!(contents, vec!["ab", " ", "c"]);
}

#[test]
fn osc52_sequence_encodes_payload() {
    assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
}
