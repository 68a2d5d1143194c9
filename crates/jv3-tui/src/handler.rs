use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use jv3_core::{ActiveView, Direction};
use crate::app::{App, FocusPane, InputMode};
use crate::editor::char_to_byte_index;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => {
            if app.edit.is_some() {
                handle_code_editing(app, key);
            } else {
                handle_prompt_editing(app, key);
            }
        }
    }
}

fn handle_paste(app: &mut App, text: &str) {
    if let Some(buffer) = app.edit.as_mut() {
        buffer.insert_str(text);
    } else if app.focus == FocusPane::Input {
        app.insert_prompt_text(text);
    }
}

fn focus_input(app: &mut App) {
    app.focus = FocusPane::Input;
    app.input_mode = InputMode::Editing;
    // Cursor at end of existing text
    app.prompt_cursor = app.prompt_input.chars().count();
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Keys shared by every pane
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            if app.focus == FocusPane::Input {
                focus_input(app);
            }
            return;
        }
        KeyCode::Char('i') | KeyCode::Char('/') => {
            focus_input(app);
            return;
        }
        KeyCode::Char('1') => {
            app.toggle_view(ActiveView::Code);
            return;
        }
        KeyCode::Char('2') => {
            app.toggle_view(ActiveView::Preview);
            return;
        }
        KeyCode::Char('[') => {
            app.step_view(Direction::Left);
            return;
        }
        KeyCode::Char(']') => {
            app.step_view(Direction::Right);
            return;
        }
        KeyCode::Char('x') => {
            app.cancel_pending();
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Explorer => handle_explorer(app, key),
        FocusPane::Chat => handle_chat(app, key),
        FocusPane::Editor => match app.view.active_view {
            ActiveView::Code => handle_code_view(app, key),
            ActiveView::Preview => handle_preview(app, key),
        },
        FocusPane::Input => {}
    }
}

fn handle_explorer(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.explorer_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.explorer_nav_up(),
        KeyCode::Char('g') => app.explorer_state.select(Some(0)),
        KeyCode::Char('G') => {
            let last = app.tree.visible_rows().len().saturating_sub(1);
            app.explorer_state.select(Some(last));
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.explorer_activate(),
        KeyCode::Char('h') | KeyCode::Left => app.explorer_collapse(),
        _ => {}
    }
}

fn handle_chat(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.chat_scroll = app.chat_scroll.saturating_add(1),
        KeyCode::Char('k') | KeyCode::Up => app.chat_scroll = app.chat_scroll.saturating_sub(1),
        KeyCode::Char('g') => app.chat_scroll = 0,
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        KeyCode::Char('y') => app.copy_transcript(),
        KeyCode::Enter => focus_input(app),
        _ => {}
    }
}

fn handle_code_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_editor_down(10);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_editor_up(10);
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_editor_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_editor_up(1),
        KeyCode::Char('g') => app.code_scroll = 0,
        KeyCode::Char('l') | KeyCode::Right => app.next_tab(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_tab(),
        KeyCode::Char('w') => app.close_active_tab(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('c') => app.copy_active_code(),
        KeyCode::Char('s') => app.download_active_code(),
        _ => {}
    }
}

fn handle_preview(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_editor_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_editor_up(1),
        KeyCode::Char('g') => app.preview_scroll = 0,
        KeyCode::Char('r') => app.refresh_preview(),
        KeyCode::Char('o') => app.open_preview_external(),
        _ => {}
    }
}

fn handle_prompt_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab => {
            // Leave the input the same way Normal mode would
            app.input_mode = InputMode::Normal;
            app.focus = app.focus.next();
        }
        KeyCode::Enter => {
            app.submit_prompt();
        }
        KeyCode::Backspace => {
            if app.prompt_cursor > 0 {
                app.prompt_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.prompt_input, app.prompt_cursor);
                app.prompt_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.prompt_input.chars().count();
            if app.prompt_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.prompt_input, app.prompt_cursor);
                app.prompt_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.prompt_cursor = app.prompt_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.prompt_input.chars().count();
            app.prompt_cursor = (app.prompt_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.prompt_cursor = 0;
        }
        KeyCode::End => {
            app.prompt_cursor = app.prompt_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.prompt_input, app.prompt_cursor);
            app.prompt_input.insert(byte_pos, c);
            app.prompt_cursor += 1;
        }
        _ => {}
    }
}

fn handle_code_editing(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.save_edit();
        return;
    }
    if key.code == KeyCode::Esc {
        app.cancel_edit();
        return;
    }

    let Some(buffer) = app.edit.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Enter => buffer.insert_char('\n'),
        KeyCode::Tab => buffer.insert_str("  "),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Left => buffer.left(),
        KeyCode::Right => buffer.right(),
        KeyCode::Up => buffer.up(),
        KeyCode::Down => buffer.down(),
        KeyCode::Home => buffer.home(),
        KeyCode::End => buffer.end(),
        KeyCode::Char(c) => buffer.insert_char(c),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    // Position-based scrolling
    let in_explorer = app.explorer_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_chat = app.chat_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_editor = app.editor_area.is_some_and(|r| point_in_rect(x, y, r));

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_explorer {
                app.explorer_nav_down();
            } else if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_add(3);
            } else if in_editor {
                app.scroll_editor_down(3);
            }
        }
        MouseEventKind::ScrollUp => {
            if in_explorer {
                app.explorer_nav_up();
            } else if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_sub(3);
            } else if in_editor {
                app.scroll_editor_up(3);
            }
        }
        _ => {}
    }
}
