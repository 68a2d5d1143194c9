//! View/state router for the code and preview panels.
//!
//! `ViewState` is a plain value. Every transition goes through
//! [`ViewState::apply`], a pure reducer, so the routing rules can be tested
//! without any rendering surface. The `on_*` methods are in-place shorthands
//! over the same reducer.

use serde::{Deserialize, Serialize};

use crate::classifier::GeneratedArtifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Code,
    Preview,
}

impl ActiveView {
    /// Tab order in the view switcher
    pub const ALL: [ActiveView; 2] = [ActiveView::Code, ActiveView::Preview];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Code => "Code Editor",
            ActiveView::Preview => "Website Preview",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ActiveView::Code => 0,
            ActiveView::Preview => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Everything that can change the router state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    CodeGenerated(String),
    HtmlGenerated(String),
    Toggle(ActiveView),
    UserEdit(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub active_view: ActiveView,
    pub code: String,
    pub html: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(active_view: ActiveView) -> Self {
        Self {
            active_view,
            ..Self::default()
        }
    }

    /// Last write wins. HTML arrival always forces the preview.
    pub fn apply(self, event: ViewEvent) -> ViewState {
        match event {
            ViewEvent::CodeGenerated(code) | ViewEvent::UserEdit(code) => ViewState { code, ..self },
            ViewEvent::HtmlGenerated(html) => ViewState {
                html,
                active_view: ActiveView::Preview,
                ..self
            },
            ViewEvent::Toggle(active_view) => ViewState { active_view, ..self },
        }
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let current = std::mem::take(self);
        *self = current.apply(event);
    }

    pub fn on_code_generate(&mut self, code: impl Into<String>) {
        self.dispatch(ViewEvent::CodeGenerated(code.into()));
    }

    pub fn on_html_generate(&mut self, html: impl Into<String>) {
        self.dispatch(ViewEvent::HtmlGenerated(html.into()));
    }

    pub fn on_view_toggle(&mut self, target: ActiveView) {
        self.dispatch(ViewEvent::Toggle(target));
    }

    pub fn on_user_edit(&mut self, code: impl Into<String>) {
        self.dispatch(ViewEvent::UserEdit(code.into()));
    }

    /// Route a fresh artifact: code first, then HTML if it has any.
    pub fn on_artifact(&mut self, artifact: &GeneratedArtifact) {
        self.on_code_generate(artifact.source_code.clone());
        if let Some(html) = &artifact.html {
            self.on_html_generate(html.clone());
        }
    }

    /// Move one tab left or right in the switcher, stopping at the ends
    pub fn step(&mut self, direction: Direction) {
        let idx = self.active_view.index();
        let target = match direction {
            Direction::Left => idx.saturating_sub(1),
            Direction::Right => (idx + 1).min(ActiveView::ALL.len() - 1),
        };
        self.on_view_toggle(ActiveView::ALL[target]);
    }

    /// 1-based position for the "N of M" indicator
    pub fn position(&self) -> (usize, usize) {
        (self.active_view.index() + 1, ActiveView::ALL.len())
    }

    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    pub fn has_html(&self) -> bool {
        !self.html.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_code_generate_keeps_view() {
        let state = ViewState::new().apply(ViewEvent::CodeGenerated("x".into()));
        assert_eq!(state.code, "x");
        assert_eq!(state.active_view, ActiveView::Code);
    }

    #[test]
    fn test_html_forces_preview() {
        let state = ViewState::new().apply(ViewEvent::HtmlGenerated("<p>hi</p>".into()));
        assert_eq!(state.active_view, ActiveView::Preview);
        assert_eq!(state.html, "<p>hi</p>");
    }

    #[test]
    fn test_toggle_then_html_last_write_wins() {
        let state = ViewState::new()
            .apply(ViewEvent::HtmlGenerated("a".into()))
            .apply(ViewEvent::Toggle(ActiveView::Code));
        assert_eq!(state.active_view, ActiveView::Code);

        let state = state.apply(ViewEvent::HtmlGenerated("b".into()));
        assert_eq!(state.active_view, ActiveView::Preview);
    }

    #[test]
    fn test_user_edit_does_not_touch_view_or_html() {
        let mut state = ViewState::with_view(ActiveView::Preview);
        state.on_html_generate("<b>x</b>");
        state.on_user_edit("edited");
        assert_eq!(state.code, "edited");
        assert_eq!(state.html, "<b>x</b>");
        assert_eq!(state.active_view, ActiveView::Preview);
    }

    #[test]
    fn test_website_artifact_switches_to_preview() {
        let mut state = ViewState::new();
        let artifact = classify("make me a website");
        state.on_artifact(&artifact);
        assert_eq!(state.active_view, ActiveView::Preview);
        assert!(state.has_html());
        assert_eq!(state.code, artifact.source_code);
    }

    #[test]
    fn test_artifact_without_html_keeps_view_and_old_html() {
        let mut state = ViewState::new();
        state.on_html_generate("old");
        state.on_view_toggle(ActiveView::Code);

        let artifact = GeneratedArtifact {
            template: crate::template::TemplateId::Button,
            chat_message: String::new(),
            source_code: "src".into(),
            html: None,
        };
        state.on_artifact(&artifact);
        assert_eq!(state.active_view, ActiveView::Code);
        assert_eq!(state.html, "old");
        assert_eq!(state.code, "src");
    }

    #[test]
    fn test_step_clamps() {
        let mut state = ViewState::new();
        state.step(Direction::Left);
        assert_eq!(state.active_view, ActiveView::Code);
        state.step(Direction::Right);
        assert_eq!(state.active_view, ActiveView::Preview);
        state.step(Direction::Right);
        assert_eq!(state.active_view, ActiveView::Preview);
        assert_eq!(state.position(), (2, 2));
    }
}
