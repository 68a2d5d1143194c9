use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use jv3_core::highlight::{highlight_line, TokenKind};
use jv3_core::{ActiveView, ChatRole, FileKind, NodeType};
use crate::app::{App, FocusPane, InputMode, NoticeKind};

const LINE_NUMBER_WIDTH: u16 = 5;

fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [explorer_area, chat_column, right_column] = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(35),
        Constraint::Percentage(45),
    ])
    .areas(body_area);

    render_explorer(app, frame, explorer_area);
    render_chat(app, frame, chat_column);
    render_right_panel(app, frame, right_column);

    render_footer(app, frame, footer_area);

    if app.notification.is_some() {
        render_notification(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let pending = if app.is_thinking() {
        format!(" [{} pending]", app.pending.len())
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(" jv3 Code Assistant ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(pending, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn file_color(kind: FileKind) -> Color {
    match kind {
        FileKind::TypeScript => Color::Magenta,
        FileKind::Css => Color::Green,
        FileKind::Json => Color::Yellow,
        FileKind::Markdown => Color::Cyan,
        FileKind::Other => Color::Gray,
    }
}

fn render_explorer(app: &mut App, frame: &mut Frame, area: Rect) {
    app.explorer_area = Some(area);

    let items: Vec<ListItem> = app
        .tree
        .visible_rows()
        .into_iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let line = match row.node_type {
                NodeType::Folder => {
                    let (chevron, icon) = if row.expanded { ("▾ ", "🗁 ") } else { ("▸ ", "🗀 ") };
                    Line::from(vec![
                        Span::raw(indent),
                        Span::styled(chevron, Style::default().fg(Color::DarkGray)),
                        Span::styled(icon, Style::default().fg(Color::Blue)),
                        Span::raw(row.name),
                    ])
                }
                NodeType::File => Line::from(vec![
                    Span::raw(indent),
                    Span::raw("  "),
                    Span::styled("• ", Style::default().fg(file_color(FileKind::from_name(row.name)))),
                    Span::raw(row.name),
                ]),
            };
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Explorer)))
        .title(" JV3 EXPLORER ");

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut app.explorer_state);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    app.chat_area = Some(chat_area);
    app.chat_height = chat_area.height.saturating_sub(2);

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.conversation.messages() {
        let color = match msg.role {
            ChatRole::User => Color::Cyan,
            ChatRole::Assistant => Color::Yellow,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}:", msg.role.label()), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", msg.time_label()), Style::default().fg(Color::DarkGray)),
        ]));
        for line in msg.content.lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.is_thinking() {
        lines.push(Line::from(Span::styled(
            "Assistant:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(1);
    app.chat_scroll = app.chat_scroll.min(max_scroll);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Chat)))
        .title(" Code Assistant ")
        .title_bottom(Line::from(" Describe what you want to build ").fg(Color::DarkGray));

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    // Prompt input
    let editing = app.focus == FocusPane::Input && app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { border_color(false) }))
        .title(" Prompt ");

    let input_text = if app.prompt_input.is_empty() && !editing {
        Span::styled("Describe what you want to build...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.prompt_input.as_str())
    };
    frame.render_widget(Paragraph::new(Line::from(input_text)).block(input_block), input_area);

    if editing && app.edit.is_none() {
        let inner_width = input_area.width.saturating_sub(2);
        let cursor = u16::try_from(app.prompt_cursor).unwrap_or(u16::MAX).min(inner_width.saturating_sub(1));
        frame.set_cursor_position((input_area.x + 1 + cursor, input_area.y + 1));
    }
}

fn render_right_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let [switcher_area, content_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_view_switcher(app, frame, switcher_area);
    app.editor_area = Some(content_area);

    match app.view.active_view {
        ActiveView::Code => render_code_panel(app, frame, content_area),
        ActiveView::Preview => render_preview(app, frame, content_area),
    }
}

fn render_view_switcher(app: &App, frame: &mut Frame, area: Rect) {
    let active = app.view.active_view;
    let (position, total) = app.view.position();

    let mut spans = vec![Span::styled(
        " ‹ ",
        Style::default().fg(if position == 1 { Color::DarkGray } else { Color::White }),
    )];
    for view in ActiveView::ALL {
        let style = if view == active {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", view.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "› ",
        Style::default().fg(if position == total { Color::DarkGray } else { Color::White }),
    ));
    spans.push(Span::styled(format!(" {} of {} ", position, total), Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        TokenKind::String => Style::default().fg(Color::Green),
        TokenKind::Comment => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        TokenKind::Plain => Style::default(),
    }
}

fn line_number(n: usize) -> Span<'static> {
    Span::styled(
        format!("{:>width$} ", n, width = (LINE_NUMBER_WIDTH - 1) as usize),
        Style::default().fg(Color::DarkGray),
    )
}

fn render_code_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let [tabs_area, code_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let titles: Vec<Line> = app.tabs.iter().map(|t| Line::from(format!(" {} ", t.title))).collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(tabs, tabs_area);

    let focused = app.focus == FocusPane::Editor;
    let title = if app.edit.is_some() {
        format!(" {} (editing) ", app.active_tab_title())
    } else {
        format!(" {} ", app.active_tab_title())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.edit.is_some() { Color::Yellow } else { border_color(focused) }))
        .title(title)
        .title_bottom(Line::from(" Code Output ").fg(Color::DarkGray));

    let inner_height = code_area.height.saturating_sub(2);

    if let Some(buffer) = &app.edit {
        let (cursor_line, cursor_col) = buffer.position();
        let cursor_line = u16::try_from(cursor_line).unwrap_or(u16::MAX);

        // Keep the cursor on screen
        if cursor_line < app.code_scroll {
            app.code_scroll = cursor_line;
        } else if inner_height > 0 && cursor_line >= app.code_scroll + inner_height {
            app.code_scroll = cursor_line - inner_height + 1;
        }

        let lines: Vec<Line> = buffer
            .text
            .split('\n')
            .enumerate()
            .map(|(i, l)| Line::from(vec![line_number(i + 1), Span::raw(l.to_string())]))
            .collect();

        let paragraph = Paragraph::new(Text::from(lines)).block(block).scroll((app.code_scroll, 0));
        frame.render_widget(paragraph, code_area);

        let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        let x = code_area.x + 1 + LINE_NUMBER_WIDTH + col;
        let y = code_area.y + 1 + cursor_line - app.code_scroll;
        if x < code_area.right().saturating_sub(1) && y < code_area.bottom().saturating_sub(1) {
            frame.set_cursor_position((x, y));
        }
        return;
    }

    let code = app.active_code();
    if code.is_empty() {
        let empty = Text::from(vec![
            Line::default(),
            Line::from("No code generated yet").centered(),
            Line::from(Span::styled(
                "Start a conversation to generate code",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ]);
        frame.render_widget(Paragraph::new(empty).block(block), code_area);
        return;
    }

    let lines: Vec<Line> = code
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = vec![line_number(i + 1)];
            spans.extend(
                highlight_line(line)
                    .into_iter()
                    .map(|t| Span::styled(t.text.to_string(), token_style(t.kind))),
            );
            Line::from(spans)
        })
        .collect();

    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(1);
    let scroll = app.code_scroll.min(max_scroll);
    let paragraph = Paragraph::new(Text::from(lines)).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, code_area);
    app.code_scroll = scroll;
}

fn render_preview(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Editor;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(" Website Preview ")
        .title_bottom(Line::from(format!(" Live HTML preview · rev {} ", app.preview.revision())).fg(Color::DarkGray));

    if app.preview.is_empty() {
        let empty = Text::from(vec![
            Line::default(),
            Line::from("No HTML to preview").centered(),
            Line::from(Span::styled(
                "Generate HTML code to see the live preview",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ]);
        frame.render_widget(Paragraph::new(empty).block(block), area);
        return;
    }

    let lines: Vec<Line> = app
        .preview
        .lines()
        .iter()
        .enumerate()
        .map(|(i, l)| {
            // The first rendered line is almost always the heading
            if i == 0 {
                Line::from(l.clone()).bold().centered()
            } else {
                Line::from(l.clone())
            }
        })
        .collect();

    let max_scroll = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_sub(1);
    app.preview_scroll = app.preview_scroll.min(max_scroll);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.preview_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match (app.input_mode, app.edit.is_some()) {
        (InputMode::Editing, true) => " EDIT ",
        (InputMode::Editing, false) => " PROMPT ",
        (InputMode::Normal, _) => " NORMAL ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let pairs: Vec<(&str, &str)> = match (app.input_mode, app.edit.is_some(), app.focus) {
        (InputMode::Editing, true, _) => vec![("Ctrl+S", "save"), ("Esc", "cancel")],
        (InputMode::Editing, false, _) => vec![("Enter", "send"), ("Esc", "normal"), ("Tab", "focus")],
        (InputMode::Normal, _, FocusPane::Explorer) => {
            vec![("j/k", "nav"), ("Enter", "open"), ("h", "collapse")]
        }
        (InputMode::Normal, _, FocusPane::Chat) => {
            vec![("j/k", "scroll"), ("y", "copy chat"), ("Enter", "prompt")]
        }
        (InputMode::Normal, _, FocusPane::Editor) => match app.view.active_view {
            ActiveView::Code => vec![
                ("h/l", "tab"),
                ("e", "edit"),
                ("c", "copy"),
                ("s", "download"),
                ("w", "close"),
            ],
            ActiveView::Preview => vec![("j/k", "scroll"), ("r", "refresh"), ("o", "open")],
        },
        (InputMode::Normal, _, FocusPane::Input) => vec![("i", "prompt")],
    };

    let mut spans = vec![Span::styled(mode_text, mode_style)];
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }
    if app.input_mode == InputMode::Normal {
        for (key, label) in [("Tab", "focus"), ("1/2", "view"), ("x", "cancel"), ("q", "quit")] {
            spans.push(Span::styled(format!(" {} ", key), key_style));
            spans.push(Span::styled(format!(" {} ", label), label_style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notification(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notification) = &app.notification else {
        return;
    };

    let width = (notification.body.chars().count() as u16 + 4)
        .max(notification.title.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let popup = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 1,
        width: width.min(area.width),
        height: 4.min(area.height),
    };

    let color = match notification.kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(format!(" {} ", notification.title), Style::default().fg(color).bold()));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(notification.body.as_str()).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}
