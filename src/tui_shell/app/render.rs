use super::*;

const ROW_PREFIX: u16 = 2 + 4 + 5; // highlight symbol, checkbox, id column

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App, view: &ViewModel) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(if view.notice.is_some() { 1 } else { 0 }),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(if view.show_footer() { 1 } else { 0 }),
            Constraint::Length(3),
        ])
        .split(area);

    // Header
    let mut spans = vec![
        Span::styled("todos", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::raw(format!("{} user={}", app.endpoint, app.user)),
    ];
    if !view.loaded {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("loading...", Style::default().fg(Color::Yellow)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Notice
    if let Some(notice) = &view.notice {
        let line = Line::from(vec![
            Span::styled(
                notice.message.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (x to dismiss)",
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }

    // Composer
    let composer_focused = app.focus == Focus::Composer && view.editing.is_none();
    let composer_style = if view.composer_enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let composer = Paragraph::new(Span::styled(app.composer.buf.as_str(), composer_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(composer_focused))
            .title("What needs to be done?"),
    );
    frame.render_widget(composer, chunks[2]);

    // List
    let list_focused = app.focus == Focus::List || view.editing.is_some();
    let mut title = view.filter.label().to_string();
    if view.show_toggle_all() {
        let target = if view.all_completed() {
            "active"
        } else {
            "complete"
        };
        title.push_str(&format!("  (a: mark all {target})"));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(list_focused))
        .title(title);

    let mut list_state = ListState::default();
    if view.rows.is_empty() {
        let text = if view.loaded { "Nothing here." } else { "" };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray))).block(block),
            chunks[3],
        );
    } else {
        let items: Vec<ListItem> = view.rows.iter().map(|row| ListItem::new(row_line(row))).collect();
        if list_focused {
            list_state.select(Some(app.selected));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[3], &mut list_state);
    }

    // Footer
    if view.show_footer() {
        let mut spans = vec![Span::raw(view.items_left()), Span::raw("   ")];
        for filter in Filter::ALL {
            let style = if filter == view.filter {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(filter.label(), style));
            spans.push(Span::raw(" "));
        }
        if view.clear_completed_enabled() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "c: clear completed",
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[4]);
    }

    // Last result
    {
        let line = match &app.last {
            Some(entry) => {
                let style = match entry.kind {
                    EntryKind::Output => Style::default().fg(Color::White),
                    EntryKind::Error => Style::default().fg(Color::Red),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{} ", fmt_ts_ui(&entry.ts)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(entry.line.as_str(), style),
                ])
            }
            None => Line::from(Span::styled(key_hints(app, view), Style::default().fg(Color::Gray))),
        };
        frame.render_widget(
            Paragraph::new(line)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[5],
        );
    }

    // Cursor
    if let Some(id) = view.editing {
        let Some(pos) = view.rows.iter().position(|r| r.task.id == id) else {
            return;
        };
        let Some(row) = pos.checked_sub(list_state.offset()) else {
            return;
        };
        let x = chunks[3].x + 1 + ROW_PREFIX + 2 + app.edit.cursor_col();
        let y = chunks[3].y + 1 + row as u16;
        if y + 1 < chunks[3].y + chunks[3].height {
            frame.set_cursor_position((x, y));
        }
    } else if composer_focused && view.composer_enabled {
        let x = chunks[2].x + 1 + app.composer.cursor_col();
        frame.set_cursor_position((x, chunks[2].y + 1));
    }
}

fn row_line(row: &TaskRow) -> Line<'_> {
    let check = if row.task.completed { "[x] " } else { "[ ] " };
    let id = if row.placeholder {
        format!("{:>4} ", "-")
    } else {
        format!("{:>4} ", row.task.id.get())
    };

    let mut spans = vec![
        Span::raw(check),
        Span::styled(id, Style::default().fg(Color::Gray)),
    ];

    match &row.draft {
        Some(draft) => spans.push(Span::styled(
            format!("> {draft}"),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let style = if row.placeholder {
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM)
            } else if row.task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            spans.push(Span::styled(row.task.title.as_str(), style));
        }
    }

    if row.busy {
        spans.push(Span::styled(" ...", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn key_hints(app: &App, view: &ViewModel) -> &'static str {
    if view.editing.is_some() {
        return "enter: save  esc: cancel  tab: save";
    }
    match app.focus {
        Focus::Composer => "enter: add  tab: list  ctrl-c: quit",
        Focus::List => {
            "space: toggle  e: rename  d: delete  f: filter  tab: compose  q: quit"
        }
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/render_tests.rs"]
mod tests;
