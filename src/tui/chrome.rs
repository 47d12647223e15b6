// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Title, footer, help, and overlay helpers used by TUI rendering.
fn canvas_title(view: &EditorViewState) -> String {
    format!("─ E_{} {} ", view.page, view.orientation.label())
}

fn toggle_glyph(key: char, visible: bool) -> String {
    let mark = if visible { '◼' } else { '◻' };
    format!("{key}{mark}")
}

fn footer_line(app: &App, now: Instant) -> Line<'static> {
    let theme = &app.theme;
    let view = app.state.view();
    let mut spans = Vec::<Span<'static>>::new();

    push_footer_entry(&mut spans, theme, "page", &view.page.to_string(), true);
    push_footer_entry(&mut spans, theme, "dir", view.orientation.label(), true);

    let toggles = [
        ('g', Toggle::DotGrid),
        ('a', Toggle::Axes),
        ('d', Toggle::Differentials),
        ('w', Toggle::ExtraArrows),
    ]
    .iter()
    .map(|&(key, toggle)| toggle_glyph(key, view.toggles.get(toggle)))
    .collect::<Vec<_>>()
    .join(" ");
    push_footer_entry(&mut spans, theme, "show", &toggles, true);

    let selected = match app.state.cell(app.selected) {
        Some(label) if !label.is_empty() => format!("{} {label}", app.selected),
        Some(_) => format!("{} (empty label)", app.selected),
        None => app.selected.to_string(),
    };
    push_footer_entry(&mut spans, theme, "cell", &selected, app.state.grid().contains(app.selected));
    push_footer_entry(&mut spans, theme, "help", "?", true);

    if let Some(message) = app.active_toast(now) {
        spans.push(Span::styled(" | ".to_owned(), theme.footer_label_style()));
        spans.push(Span::styled(message.to_owned(), theme.selection_style()));
    }

    Line::from(spans)
}

fn push_footer_entry(
    spans: &mut Vec<Span<'static>>,
    theme: &TuiTheme,
    label: &str,
    value: &str,
    enabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), theme.footer_label_style()));
    }
    spans.push(Span::styled(format!("{}:", footer_label_ucfirst(label)), theme.footer_label_style()));
    spans.push(Span::styled(value.to_owned(), theme.footer_value_style(enabled)));
}

fn footer_label_ucfirst(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn overlay_block(theme: &TuiTheme, title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!("─ {title} ─"))
        .border_style(theme.panel_border_style(true))
        .title_style(theme.panel_border_style(true).add_modifier(Modifier::BOLD))
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>key_width$}"), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_ENTRIES: &[(&str, &[(&str, &str)])] = &[
    (
        "Chart",
        &[
            ("+/= -", "Next / previous page"),
            ("o", "Toggle homological / cohomological"),
            ("g a d w", "Toggle dot grid / axes / differentials / arrows"),
            ("t", "Export TikZ (copied via OSC 52)"),
        ],
    ),
    (
        "Cells",
        &[
            ("←↓↑→ hjkl", "Move the selected cell"),
            ("e Enter", "Edit the selected cell"),
            ("x Del", "Delete the selected cell"),
            ("X", "Clear all cells"),
        ],
    ),
    (
        "Arrows",
        &[
            ("Shift/Alt-drag", "Draw an arrow between two cells"),
            ("u", "Remove the last arrow"),
            ("C", "Clear all arrows"),
        ],
    ),
    (
        "View",
        &[
            ("drag", "Pan"),
            ("HJKL", "Pan by one cell"),
            ("0", "Reset pan"),
            ("click", "Select a cell"),
        ],
    ),
    ("Global", &[("?", "Help (toggle)"), ("q", "Quit")]),
];

fn help_lines(theme: &TuiTheme) -> Vec<Line<'static>> {
    let key_style = theme.footer_value_style(true);
    let header_style = theme.label_style();
    let key_width = HELP_ENTRIES
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (index, (section, entries)) in HELP_ENTRIES.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!("--- {section} ---"), header_style)));
        lines.extend(entries.iter().map(|(key, desc)| help_kv(key, desc, key_width, key_style)));
    }
    lines
}

fn render_help(frame: &mut Frame<'_>, theme: &TuiTheme, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(help_lines(theme))
        .block(overlay_block(theme, "Help"))
        .style(theme.base_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_export(frame: &mut Frame<'_>, theme: &TuiTheme, source: &str, scroll: u16, main_area: Rect) {
    let area = centered_rect(90, 90, main_area);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(source.to_owned())
        .block(overlay_block(theme, "TikZ (Esc closes, y copies)"))
        .style(theme.base_style())
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_edit_prompt(
    frame: &mut Frame<'_>,
    theme: &TuiTheme,
    at: Coordinate,
    buffer: &str,
    main_area: Rect,
) {
    let width = main_area.width.saturating_sub(4).min(72);
    let area = Rect {
        x: main_area.x + (main_area.width.saturating_sub(width)) / 2,
        y: main_area.y + main_area.height.saturating_sub(4),
        width,
        height: 3.min(main_area.height),
    };
    frame.render_widget(Clear, area);
    let line = Line::from(vec![
        Span::styled(buffer.to_owned(), theme.label_style()),
        Span::styled("▏".to_owned(), theme.selection_style()),
    ]);
    let paragraph = Paragraph::new(line)
        .block(overlay_block(theme, &format!("Edit {at} (Enter saves, Esc cancels)")))
        .style(theme.base_style());
    frame.render_widget(paragraph, area);
}
