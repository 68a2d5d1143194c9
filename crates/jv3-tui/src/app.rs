use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use jv3_core::export::{self, ClipboardSink};
use jv3_core::preview::{DocumentOpener, Preview};
use jv3_core::reply::{PendingReply, Reply, ReplyScheduler};
use jv3_core::{ActiveView, Config, ConversationLog, Direction, FileTree, TemplateId, ViewState};
use crate::editor::{EditBuffer, EditorTab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Explorer,
    Chat,
    Input,  // Prompt input box
    Editor, // Code editor or preview, whichever is active
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Explorer => FocusPane::Chat,
            FocusPane::Chat => FocusPane::Input,
            FocusPane::Input => FocusPane::Editor,
            FocusPane::Editor => FocusPane::Explorer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient toast shown in the corner, expires after a few ticks
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub kind: NoticeKind,
    pub ticks_left: u8,
}

const NOTIFICATION_TICKS: u8 = 10;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub config: Config,

    // Chat state
    pub prompt_input: String,
    pub prompt_cursor: usize,
    pub conversation: ConversationLog,
    pub pending: Vec<PendingReply>,
    pub chat_scroll: u16,
    pub chat_height: u16,
    scheduler: ReplyScheduler,

    // Routed output
    pub view: ViewState,
    pub last_template: Option<TemplateId>,
    pub preview: Preview,
    pub preview_scroll: u16,

    // Explorer state
    pub tree: FileTree,
    pub explorer_state: ListState,

    // Editor state
    pub tabs: Vec<EditorTab>,
    pub active_tab: usize,
    pub edit: Option<EditBuffer>,
    pub code_scroll: u16,

    // Notifications and animation
    pub notification: Option<Notification>,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub explorer_area: Option<Rect>,
    pub chat_area: Option<Rect>,
    pub editor_area: Option<Rect>,

    clipboard: Box<dyn ClipboardSink>,
    opener: Box<dyn DocumentOpener>,
}

impl App {
    pub fn new(
        config: Config,
        scheduler: ReplyScheduler,
        clipboard: Box<dyn ClipboardSink>,
        opener: Box<dyn DocumentOpener>,
    ) -> Self {
        let mut explorer_state = ListState::default();
        explorer_state.select(Some(0));

        let mut preview = Preview::new();
        preview.sync("");

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: FocusPane::Input,
            config,

            prompt_input: String::new(),
            prompt_cursor: 0,
            conversation: ConversationLog::with_greeting(),
            pending: Vec::new(),
            chat_scroll: 0,
            chat_height: 0,
            scheduler,

            view: ViewState::new(),
            last_template: None,
            preview,
            preview_scroll: 0,

            tree: FileTree::mock(),
            explorer_state,

            tabs: vec![EditorTab::generated()],
            active_tab: 0,
            edit: None,
            code_scroll: 0,

            notification: None,
            animation_frame: 0,

            explorer_area: None,
            chat_area: None,
            editor_area: None,

            clipboard,
            opener,
        }
    }

    pub fn is_thinking(&self) -> bool {
        !self.pending.is_empty()
    }

    // ---- chat ----

    /// Append the prompt and queue the deferred reply. Blank prompts are ignored.
    pub fn submit_prompt(&mut self) -> bool {
        if self.prompt_input.trim().is_empty() {
            return false;
        }

        let prompt = std::mem::take(&mut self.prompt_input);
        self.prompt_cursor = 0;
        self.conversation.push_user(prompt.clone());
        let pending = self.scheduler.submit(prompt);
        tracing::info!(id = pending.id, "prompt submitted");
        self.pending.push(pending);
        self.scroll_chat_to_bottom();
        true
    }

    /// A deferred reply came due: transcript first, then route the artifact.
    /// An open edit keeps its tab and the code view.
    pub fn on_reply(&mut self, reply: Reply) {
        self.pending.retain(|p| p.id != reply.id);

        let artifact = reply.artifact;
        self.conversation.push_assistant(artifact.chat_message.clone());
        self.view.on_artifact(&artifact);
        self.last_template = Some(artifact.template);
        self.preview.sync(&self.view.html);
        self.preview_scroll = 0;

        if self.edit.is_some() {
            self.view.on_view_toggle(ActiveView::Code);
        } else {
            self.active_tab = 0;
            self.code_scroll = 0;
        }
        self.scroll_chat_to_bottom();
        tracing::info!(
            id = reply.id,
            template = artifact.template.as_str(),
            view = ?self.view.active_view,
            "reply delivered"
        );
    }

    /// Cancel every reply still waiting on the thinking delay
    pub fn cancel_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        for pending in self.pending.drain(..) {
            pending.cancel();
        }
        self.notify(NoticeKind::Success, "Cancelled", "Pending reply cancelled");
    }

    pub fn insert_prompt_text(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            let byte_pos = crate::editor::char_to_byte_index(&self.prompt_input, self.prompt_cursor);
            self.prompt_input.insert(byte_pos, c);
            self.prompt_cursor += 1;
        }
    }

    pub fn scroll_chat_to_bottom(&mut self) {
        // Rough line count; render clamps the final offset
        let lines: usize = self
            .conversation
            .messages()
            .iter()
            .map(|m| m.content.lines().count() + 2)
            .sum::<usize>()
            + if self.is_thinking() { 2 } else { 0 };
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        self.chat_scroll = lines.saturating_sub(self.chat_height);
    }

    pub fn copy_transcript(&mut self) {
        let markdown = self.conversation.to_markdown();
        self.copy_text(&markdown, "Conversation copied to clipboard", "Failed to copy conversation");
    }

    // ---- view router ----

    pub fn toggle_view(&mut self, target: ActiveView) {
        self.view.on_view_toggle(target);
    }

    pub fn step_view(&mut self, direction: Direction) {
        self.view.step(direction);
    }

    // ---- explorer ----

    pub fn explorer_nav_down(&mut self) {
        let len = self.tree.visible_rows().len();
        if len == 0 {
            return;
        }
        let i = self.explorer_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.explorer_state.select(Some(i));
    }

    pub fn explorer_nav_up(&mut self) {
        let i = self.explorer_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.explorer_state.select(Some(i));
    }

    /// Enter on a folder expands/collapses it; on a file opens a tab
    pub fn explorer_activate(&mut self) {
        let rows = self.tree.visible_rows();
        let Some(row) = self.explorer_state.selected().and_then(|i| rows.get(i)) else {
            return;
        };

        if row.node_type == jv3_core::NodeType::Folder {
            self.tree.toggle(row.id);
        } else {
            self.open_file_tab(row.id);
        }
    }

    /// Collapse the selected folder, or jump to the parent row
    pub fn explorer_collapse(&mut self) {
        let rows = self.tree.visible_rows();
        let Some(selected) = self.explorer_state.selected() else {
            return;
        };
        let Some(row) = rows.get(selected) else {
            return;
        };

        if row.node_type == jv3_core::NodeType::Folder && row.expanded {
            self.tree.toggle(row.id);
        } else if row.depth > 0 {
            let parent = rows[..selected].iter().rposition(|r| r.depth + 1 == row.depth);
            self.explorer_state.select(parent);
        }
    }

    pub fn open_file_tab(&mut self, id: u32) {
        if let Some(idx) = self.tabs.iter().position(|t| t.file_id == Some(id)) {
            self.active_tab = idx;
        } else if let Some(node) = self.tree.find(id) {
            tracing::debug!(file = node.name, "file selected");
            self.tabs.push(EditorTab::file(id, node.name, node.content));
            self.active_tab = self.tabs.len() - 1;
        } else {
            return;
        }
        self.edit = None;
        self.code_scroll = 0;
        self.view.on_view_toggle(ActiveView::Code);
        self.focus = FocusPane::Editor;
    }

    // ---- editor tabs ----

    pub fn next_tab(&mut self) {
        if self.edit.is_none() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
            self.code_scroll = 0;
        }
    }

    pub fn prev_tab(&mut self) {
        if self.edit.is_none() {
            self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
            self.code_scroll = 0;
        }
    }

    /// The generated tab cannot be closed
    pub fn close_active_tab(&mut self) {
        if self.active_tab == 0 || self.edit.is_some() {
            return;
        }
        self.tabs.remove(self.active_tab);
        self.active_tab = self.active_tab.min(self.tabs.len() - 1);
        self.code_scroll = 0;
    }

    pub fn active_code(&self) -> &str {
        match self.tabs.get(self.active_tab) {
            Some(tab) if !tab.is_generated() => &tab.content,
            _ => &self.view.code,
        }
    }

    pub fn active_tab_title(&self) -> &str {
        self.tabs
            .get(self.active_tab)
            .map_or("Generated", |t| t.title.as_str())
    }

    pub fn begin_edit(&mut self) {
        if self.view.active_view == ActiveView::Code {
            let file_id = self.tabs.get(self.active_tab).and_then(|t| t.file_id);
            self.edit = Some(EditBuffer::new(file_id, self.active_code()));
            self.input_mode = InputMode::Editing;
        }
    }

    /// Write the buffer back to the tab it was opened from. The generated
    /// tab goes through the router.
    pub fn save_edit(&mut self) {
        let Some(buffer) = self.edit.take() else {
            return;
        };
        match buffer.file_id {
            Some(id) => {
                if let Some(tab) = self.tabs.iter_mut().find(|t| t.file_id == Some(id)) {
                    tab.content = buffer.text;
                }
            }
            None => self.view.on_user_edit(buffer.text),
        }
        self.input_mode = InputMode::Normal;
        self.notify(NoticeKind::Success, "Saved!", "Code changes saved");
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn copy_active_code(&mut self) {
        let code = self.active_code().to_string();
        self.copy_text(&code, "Code copied to clipboard", "Failed to copy code");
    }

    pub fn download_active_code(&mut self) {
        let code = self.active_code().to_string();
        let file_name = match self.tabs.get(self.active_tab) {
            Some(tab) if !tab.is_generated() => tab.title.clone(),
            _ => export::generated_file_name(self.last_template).to_string(),
        };

        let dir = self.config.resolved_download_dir();
        match export::download(&dir, &file_name, &code) {
            Ok(path) => {
                self.notify(NoticeKind::Success, "Downloaded!", &format!("Saved to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("download failed: {}", e);
                self.notify(NoticeKind::Error, "Error", &format!("Failed to download code: {}", e));
            }
        }
    }

    fn copy_text(&mut self, text: &str, ok: &str, failed: &str) {
        match self.clipboard.copy(text) {
            Ok(()) => self.notify(NoticeKind::Success, "Copied!", ok),
            Err(e) => {
                tracing::warn!("clipboard copy failed: {}", e);
                self.notify(NoticeKind::Error, "Error", failed);
            }
        }
    }

    // ---- preview ----

    pub fn refresh_preview(&mut self) {
        self.preview.refresh();
        self.preview_scroll = 0;
    }

    pub fn open_preview_external(&mut self) {
        if self.preview.is_empty() {
            self.notify(NoticeKind::Error, "Error", "No HTML to preview");
            return;
        }

        let dir = self.config.resolved_preview_dir();
        let result = self
            .preview
            .write_document(&dir)
            .and_then(|path| self.opener.open(&path).map(|_| path));

        match result {
            Ok(path) => self.notify(NoticeKind::Success, "Opened", &format!("{}", path.display())),
            Err(e) => {
                tracing::warn!("open preview failed: {}", e);
                self.notify(NoticeKind::Error, "Error", &e.to_string());
            }
        }
    }

    // ---- scrolling ----

    pub fn scroll_editor_down(&mut self, amount: u16) {
        match self.view.active_view {
            ActiveView::Code => self.code_scroll = self.code_scroll.saturating_add(amount),
            ActiveView::Preview => self.preview_scroll = self.preview_scroll.saturating_add(amount),
        }
    }

    pub fn scroll_editor_up(&mut self, amount: u16) {
        match self.view.active_view {
            ActiveView::Code => self.code_scroll = self.code_scroll.saturating_sub(amount),
            ActiveView::Preview => self.preview_scroll = self.preview_scroll.saturating_sub(amount),
        }
    }

    // ---- notifications / ticks ----

    pub fn notify(&mut self, kind: NoticeKind, title: &str, body: &str) {
        self.notification = Some(Notification {
            title: title.to_string(),
            body: body.to_string(),
            kind,
            ticks_left: NOTIFICATION_TICKS,
        });
    }

    pub fn tick(&mut self) {
        if self.is_thinking() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if let Some(notification) = &mut self.notification {
            notification.ticks_left = notification.ticks_left.saturating_sub(1);
            if notification.ticks_left == 0 {
                self.notification = None;
            }
        }
    }

    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use std::time::Duration;
    use jv3_core::{ChatRole, Classifier, Jv3Error};
    use tokio::sync::mpsc::UnboundedReceiver;

    struct FakeClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardSink for FakeClipboard {
        fn copy(&self, text: &str) -> jv3_core::Result<()> {
            if self.fail {
                return Err(Jv3Error::clipboard("denied"));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct FakeOpener {
        opened: Rc<RefCell<Vec<PathBuf>>>,
        fail: bool,
    }

    impl DocumentOpener for FakeOpener {
        fn open(&self, path: &Path) -> jv3_core::Result<()> {
            if self.fail {
                return Err(Jv3Error::Opener("no browser".to_string()));
            }
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    type Opened = Rc<RefCell<Vec<PathBuf>>>;

    fn build_app(fail_clipboard: bool, fail_opener: bool) -> (App, UnboundedReceiver<Reply>, Rc<RefCell<Vec<String>>>, Opened) {
        let (scheduler, replies) = ReplyScheduler::spawn(Duration::from_millis(1000), Classifier::default());
        let copied = Rc::new(RefCell::new(Vec::new()));
        let clipboard = FakeClipboard {
            copied: Rc::clone(&copied),
            fail: fail_clipboard,
        };
        let opened = Rc::new(RefCell::new(Vec::new()));
        let opener = FakeOpener {
            opened: Rc::clone(&opened),
            fail: fail_opener,
        };
        let app = App::new(Config::new(), scheduler, Box::new(clipboard), Box::new(opener));
        (app, replies, copied, opened)
    }

    fn test_app(fail_clipboard: bool) -> (App, UnboundedReceiver<Reply>, Rc<RefCell<Vec<String>>>) {
        let (app, replies, copied, _) = build_app(fail_clipboard, false);
        (app, replies, copied)
    }

    fn submit(app: &mut App, prompt: &str) {
        app.insert_prompt_text(prompt);
        assert!(app.submit_prompt());
    }

    #[tokio::test(start_paused = true)]
    async fn test_website_prompt_routes_to_preview() {
        let (mut app, mut replies, _) = test_app(false);
        submit(&mut app, "make me a website");
        assert!(app.is_thinking());
        assert_eq!(app.conversation.len(), 2);

        let reply = replies.recv().await.unwrap();
        app.on_reply(reply);

        assert!(!app.is_thinking());
        assert_eq!(app.view.active_view, ActiveView::Preview);
        assert!(!app.view.html.is_empty());
        assert!(!app.preview.lines().is_empty());
        assert_eq!(app.last_template, Some(TemplateId::Website));
        assert_eq!(app.conversation.last().unwrap().role, ChatRole::Assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_prompt_ignored() {
        let (mut app, _replies, _) = test_app(false);
        app.insert_prompt_text("   ");
        assert!(!app.submit_prompt());
        assert_eq!(app.conversation.len(), 1);
        assert!(!app.is_thinking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_replies_in_order() {
        let (mut app, mut replies, _) = test_app(false);
        submit(&mut app, "a card");
        submit(&mut app, "a button");
        assert_eq!(app.pending.len(), 2);

        for _ in 0..2 {
            let reply = replies.recv().await.unwrap();
            app.on_reply(reply);
        }

        let contents: Vec<(ChatRole, &str)> = app
            .conversation
            .messages()
            .iter()
            .skip(1)
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            contents,
            vec![
                (ChatRole::User, "a card"),
                (ChatRole::User, "a button"),
                (ChatRole::Assistant, "Here's a sleek card component!"),
                (ChatRole::Assistant, "I've generated a beautiful button for you!"),
            ]
        );
        assert!(app.view.code.contains("export default Button"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_save_keeps_view() {
        let (mut app, mut replies, _) = test_app(false);
        submit(&mut app, "give me a button");
        let reply = replies.recv().await.unwrap();
        app.on_reply(reply);

        app.toggle_view(ActiveView::Code);
        app.begin_edit();
        if let Some(buffer) = app.edit.as_mut() {
            buffer.insert_str("// edited\n");
        }
        app.save_edit();

        assert!(app.view.code.starts_with("// edited\nimport React"));
        assert_eq!(app.view.active_view, ActiveView::Code);
        assert_eq!(app.notification.as_ref().unwrap().title, "Saved!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_edit_discards() {
        let (mut app, _replies, _) = test_app(false);
        app.view.on_code_generate("original");
        app.begin_edit();
        app.edit.as_mut().unwrap().insert_str("junk");
        app.cancel_edit();
        assert_eq!(app.view.code, "original");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_suppresses_reply() {
        let (mut app, mut replies, _) = test_app(false);
        submit(&mut app, "a card");
        app.cancel_pending();
        assert!(!app.is_thinking());
        submit(&mut app, "a website");

        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.prompt, "a website");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clipboard_failure_notifies_without_state_change() {
        let (mut app, _replies, _) = test_app(true);
        app.view.on_code_generate("code");
        let before = app.view.clone();
        app.copy_active_code();
        assert_eq!(app.view, before);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NoticeKind::Error);
        assert_eq!(notification.body, "Failed to copy code");
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_success() {
        let (mut app, _replies, copied) = test_app(false);
        app.view.on_code_generate("export default Card;");
        app.copy_active_code();
        assert_eq!(copied.borrow().as_slice(), ["export default Card;".to_string()]);
        assert_eq!(app.notification.as_ref().unwrap().title, "Copied!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_file_tab_dedups_and_closes() {
        let (mut app, _replies, _) = test_app(false);
        app.view.on_html_generate("<p>x</p>");
        app.open_file_tab(14);
        app.open_file_tab(14);
        assert_eq!(app.tabs.len(), 2);
        assert_eq!(app.active_tab_title(), "App.tsx");
        assert_eq!(app.view.active_view, ActiveView::Code);
        assert!(app.active_code().contains("const App"));

        app.close_active_tab();
        assert_eq!(app.tabs.len(), 1);
        app.close_active_tab();
        assert_eq!(app.tabs.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_saving_file_tab_leaves_router_code() {
        let (mut app, _replies, _) = test_app(false);
        app.view.on_code_generate("generated");
        app.open_file_tab(16);
        app.begin_edit();
        app.edit.as_mut().unwrap().insert_str("/* top */\n");
        app.save_edit();
        assert!(app.active_code().starts_with("/* top */\n@tailwind"));
        assert_eq!(app.view.code, "generated");
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_into_configured_dir() {
        let (mut app, _replies, _) = test_app(false);
        let dir = tempfile::tempdir().unwrap();
        app.config.download_dir = Some(dir.path().to_path_buf());
        app.last_template = Some(TemplateId::Card);
        app.view.on_code_generate("export default Card;");
        app.download_active_code();
        let saved = std::fs::read_to_string(dir.path().join("Card.jsx")).unwrap();
        assert_eq!(saved, "export default Card;");
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires() {
        let (mut app, _replies, _) = test_app(false);
        app.notify(NoticeKind::Success, "t", "b");
        for _ in 0..NOTIFICATION_TICKS {
            app.tick();
        }
        assert!(app.notification.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explorer_open_and_collapse() {
        let (mut app, _replies, _) = test_app(false);
        // row 1 is src/components
        app.explorer_nav_down();
        app.explorer_activate();
        app.explorer_nav_down();
        app.explorer_activate();
        assert_eq!(app.active_tab_title(), "ChatPanel.tsx");

        app.explorer_collapse();
        assert_eq!(app.explorer_state.selected(), Some(1));
        app.explorer_collapse();
        assert!(!app.tree.is_expanded(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_during_file_edit_keeps_generated_code() {
        let (mut app, mut replies, _) = test_app(false);
        submit(&mut app, "a card");
        app.open_file_tab(14);
        app.begin_edit();
        app.edit.as_mut().unwrap().insert_str("// mine\n");

        let reply = replies.recv().await.unwrap();
        app.on_reply(reply);

        // The edit stays visible on its own tab
        assert_eq!(app.view.active_view, ActiveView::Code);
        assert_eq!(app.active_tab_title(), "App.tsx");
        assert!(app.edit.is_some());
        assert!(app.view.has_html());

        app.save_edit();
        assert!(app.view.code.contains("export default Card"));
        assert!(!app.view.code.contains("// mine"));
        let tab = app.tabs.iter().find(|t| t.file_id == Some(14)).unwrap();
        assert!(tab.content.starts_with("// mine\nimport Index"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_during_generated_edit_saves_to_router() {
        let (mut app, mut replies, _) = test_app(false);
        app.view.on_code_generate("old");
        app.begin_edit();
        submit(&mut app, "a button");

        let reply = replies.recv().await.unwrap();
        app.on_reply(reply);
        assert_eq!(app.view.active_view, ActiveView::Code);

        app.save_edit();
        // Last write wins: the saved buffer replaces the generated code
        assert_eq!(app.view.code, "old");
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_preview_without_html() {
        let (mut app, _replies, _, opened) = build_app(false, false);
        app.open_preview_external();
        assert!(opened.borrow().is_empty());
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NoticeKind::Error);
        assert_eq!(notification.body, "No HTML to preview");
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_preview_writes_document() {
        let (mut app, _replies, _, opened) = build_app(false, false);
        let dir = tempfile::tempdir().unwrap();
        app.config.preview_dir = Some(dir.path().to_path_buf());
        app.view.on_html_generate("<p>hello</p>");
        app.preview.sync(&app.view.html);

        app.open_preview_external();

        let expected = dir.path().join(jv3_core::preview::PREVIEW_FILE_NAME);
        assert_eq!(opened.borrow().as_slice(), [expected.clone()]);
        let written = std::fs::read_to_string(expected).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<p>hello</p>"));
        assert_eq!(app.notification.as_ref().unwrap().title, "Opened");
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_preview_failure_notifies() {
        let (mut app, _replies, _, _) = build_app(false, true);
        let dir = tempfile::tempdir().unwrap();
        app.config.preview_dir = Some(dir.path().to_path_buf());
        app.view.on_html_generate("<p>hello</p>");
        app.preview.sync(&app.view.html);
        let before = app.view.clone();

        app.open_preview_external();

        assert_eq!(app.view, before);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NoticeKind::Error);
        assert!(notification.body.contains("no browser"));
    }
}
