// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Pane layout and footer helpers used by TUI rendering.
fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn footer_help_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "MOVE", "j/k");
    push_footer_entry(&mut spans, "OPEN", "Enter");
    push_footer_entry(&mut spans, "COPY", "y");
    push_footer_entry(&mut spans, "SEARCH", "/ \\");
    if !app.search_results.is_empty() {
        push_footer_entry(&mut spans, "NEXT", "n/N");
    }
    push_footer_entry(&mut spans, "QUIT", "q");

    push_toast(&mut spans, app);
    Line::from(spans)
}

fn search_footer_line(app: &App) -> Line<'static> {
    let query = app.search_query.as_str();
    let total = app.search_results.len();

    let mut spans = vec![
        Span::styled(
            app.search_kind.prefix().to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw(query.to_owned()),
        Span::raw("   "),
    ];
    if let Some(error) = &app.search_error {
        spans.push(Span::styled(error.clone(), app.theme.error_style()));
    } else if !query.is_empty() {
        let count = if total == 0 {
            "0".to_owned()
        } else {
            format!("{}/{total}", app.search_result_index + 1)
        };
        spans.push(Span::styled(count, Style::default().fg(Color::LightGreen)));
    }

    if app.search_mode == SearchMode::Results {
        push_footer_entry_with_separator(&mut spans, "NEXT", "n/N", " | ");
    }
    push_footer_entry_with_separator(&mut spans, "ACCEPT", "Enter", " | ");
    push_footer_entry_with_separator(&mut spans, "CLOSE", "Esc", " | ");

    push_toast(&mut spans, app);
    Line::from(spans)
}

fn push_toast(spans: &mut Vec<Span<'static>>, app: &App) {
    if let Some(toast) = &app.toast {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast.message.clone()));
    }
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_with_separator(spans, label, value, "  ");
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(separator, Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
