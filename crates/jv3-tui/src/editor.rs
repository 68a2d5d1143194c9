//! Editor tabs and the in-place edit buffer.

/// Convert a character index to a byte index for UTF-8 safe string operations
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// A tab in the code panel. The generated tab has no file id and mirrors
/// the router's code; file tabs own their in-memory content.
#[derive(Debug, Clone)]
pub struct EditorTab {
    pub title: String,
    pub file_id: Option<u32>,
    pub content: String,
}

impl EditorTab {
    pub fn generated() -> Self {
        Self {
            title: "Generated".to_string(),
            file_id: None,
            content: String::new(),
        }
    }

    pub fn file(id: u32, title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            file_id: Some(id),
            content: content.to_string(),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.file_id.is_none()
    }
}

/// Multi-line edit buffer with a character cursor. `file_id` names the tab
/// the buffer was opened from (`None` for the generated tab).
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    pub file_id: Option<u32>,
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn new(file_id: Option<u32>, text: &str) -> Self {
        Self {
            file_id,
            text: text.to_string(),
            cursor: 0,
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// (line, column) of the cursor, both 0-based, in characters
    pub fn position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for c in self.text.chars().take(self.cursor) {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.text.split('\n').map(|l| l.chars().count()).collect()
    }

    fn move_to(&mut self, line: usize, col: usize) {
        let lengths = self.line_lengths();
        let line = line.min(lengths.len().saturating_sub(1));
        let before: usize = lengths.iter().take(line).map(|len| len + 1).sum();
        self.cursor = before + col.min(lengths.get(line).copied().unwrap_or(0));
    }

    pub fn up(&mut self) {
        let (line, col) = self.position();
        if line > 0 {
            self.move_to(line - 1, col);
        }
    }

    pub fn down(&mut self) {
        let (line, col) = self.position();
        self.move_to(line + 1, col);
    }

    pub fn home(&mut self) {
        let (line, _) = self.position();
        self.move_to(line, 0);
    }

    pub fn end(&mut self) {
        let (line, _) = self.position();
        self.move_to(line, usize::MAX);
    }
}
