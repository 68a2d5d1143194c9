//! Lightweight syntax highlighting for the code view.
//!
//! Lines are split into spans of keywords, quoted strings and comments.
//! One left-to-right regex pass decides each span, so a keyword inside a
//! comment or string stays part of that comment or string.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

pub const KEYWORDS: &[&str] = &[
    "import", "export", "const", "let", "var", "function", "return", "if", "else", "for", "while",
    "class", "extends", "default", "from", "as",
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r#"(?P<comment>//.*$|/\*.*?(?:\*/|$))|(?P<string>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|`(?:\\.|[^`\\])*`)|(?P<keyword>\b(?:{})\b)"#,
        KEYWORDS.join("|")
    );
    Regex::new(&pattern).expect("token pattern is valid")
});

/// Split one line into highlighted spans. Concatenating the span texts
/// gives back the line unchanged.
pub fn highlight_line(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in TOKEN_RE.captures_iter(line) {
        let (kind, m) = if let Some(m) = caps.name("comment") {
            (TokenKind::Comment, m)
        } else if let Some(m) = caps.name("string") {
            (TokenKind::String, m)
        } else if let Some(m) = caps.name("keyword") {
            (TokenKind::Keyword, m)
        } else {
            continue;
        };

        if m.start() > last {
            tokens.push(Token { kind: TokenKind::Plain, text: &line[last..m.start()] });
        }
        tokens.push(Token { kind, text: m.as_str() });
        last = m.end();
    }

    if last < line.len() {
        tokens.push(Token { kind: TokenKind::Plain, text: &line[last..] });
    }
    tokens
}
