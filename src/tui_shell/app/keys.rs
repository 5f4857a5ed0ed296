use super::*;

/// Applies one key press. Returns the engine operation it started, if any.
pub(super) fn handle_key<'e, S: TodoStore>(
    app: &mut App,
    engine: &'e SyncEngine<S>,
    key: KeyEvent,
) -> Option<Pending<'e>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return None;
    }

    if let Some((id, draft)) = engine.editing() {
        app.edit.sync(&draft);
        return edit_key(app, engine, id, key);
    }

    match app.focus {
        Focus::Composer => composer_key(app, engine, key),
        Focus::List => list_key(app, engine, key),
    }
}

fn edit_key<'e, S: TodoStore>(
    app: &mut App,
    engine: &'e SyncEngine<S>,
    id: TaskId,
    key: KeyEvent,
) -> Option<Pending<'e>> {
    // A rename is already on the wire.
    if engine.is_busy(id) {
        return None;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Tab => return Some(actions::commit_edit(engine, id)),
        KeyCode::Esc => {
            engine.cancel_edit();
            return None;
        }
        _ => {}
    }

    if edit_text(&mut app.edit, key) {
        engine.set_edit_draft(app.edit.buf.clone());
    }
    None
}

fn composer_key<'e, S: TodoStore>(
    app: &mut App,
    engine: &'e SyncEngine<S>,
    key: KeyEvent,
) -> Option<Pending<'e>> {
    match key.code {
        KeyCode::Tab | KeyCode::Esc | KeyCode::Down => {
            app.focus = Focus::List;
            return None;
        }
        // A list response would overwrite a record added before it.
        KeyCode::Enter => {
            let ready = engine.input_enabled() && engine.state().loaded();
            return ready.then(|| actions::submit(engine));
        }
        _ => {}
    }

    if !engine.input_enabled() {
        return None;
    }
    app.composer.sync(&engine.input());
    if edit_text(&mut app.composer, key) {
        engine.set_input(app.composer.buf.clone());
    }
    None
}

fn list_key<'e, S: TodoStore>(
    app: &mut App,
    engine: &'e SyncEngine<S>,
    key: KeyEvent,
) -> Option<Pending<'e>> {
    let view = engine.view();

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Tab | KeyCode::Char('i') => app.focus = Focus::Composer,
        KeyCode::Up | KeyCode::Char('k') => {
            if app.selected == 0 {
                app.focus = Focus::Composer;
            } else {
                app.select_prev();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(view.rows.len()),
        KeyCode::Char('x') | KeyCode::Esc => engine.dismiss_notice(),

        KeyCode::Char('f') => engine.set_filter(view.filter.next()),
        KeyCode::Char('1') => engine.set_filter(Filter::All),
        KeyCode::Char('2') => engine.set_filter(Filter::Active),
        KeyCode::Char('3') => engine.set_filter(Filter::Completed),

        KeyCode::Char('a') if view.show_toggle_all() => return Some(actions::toggle_all(engine)),
        KeyCode::Char('c') if view.clear_completed_enabled() => {
            return Some(actions::clear_completed(engine));
        }

        KeyCode::Char(' ') => return idle_row(app, &view).map(|id| actions::toggle(engine, id)),
        KeyCode::Char('d') | KeyCode::Delete => {
            return idle_row(app, &view).map(|id| actions::delete(engine, id));
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(id) = idle_row(app, &view) {
                engine.start_edit(id);
            }
        }
        _ => {}
    }
    None
}

/// The selected row's id, unless it is the placeholder or has a request in flight.
fn idle_row(app: &App, view: &ViewModel) -> Option<TaskId> {
    app.selected_row(view)
        .filter(|row| !row.busy && !row.placeholder)
        .map(|row| row.task.id)
}

/// Line-editing keys shared by the composer and the rename field.
fn edit_text(input: &mut Input, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.home();
            false
        }
        KeyCode::End => {
            input.end();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/keys_tests.rs"]
mod tests;
