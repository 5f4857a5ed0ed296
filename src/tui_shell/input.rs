/// Single-line edit buffer with a cursor.
///
/// The text itself belongs to the sync engine; the shell keeps a mirror so it
/// can place the cursor, and re-syncs whenever the engine changes the text.
#[derive(Debug, Default)]
pub(super) struct Input {
    pub(super) buf: String,
    /// Byte offset, always on a char boundary.
    pub(super) cursor: usize,
}

impl Input {
    pub(super) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    pub(super) fn set(&mut self, s: String) {
        self.buf = s;
        self.cursor = self.buf.len();
    }

    /// Adopts `text` unless the buffer already holds it.
    pub(super) fn sync(&mut self, text: &str) {
        if self.buf != text {
            self.set(text.to_string());
        }
    }

    pub(super) fn insert_char(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub(super) fn backspace(&mut self) {
        let Some(prev) = self.buf[..self.cursor].chars().next_back() else {
            return;
        };
        self.cursor -= prev.len_utf8();
        self.buf.remove(self.cursor);
    }

    pub(super) fn delete(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        self.buf.remove(self.cursor);
    }

    pub(super) fn move_left(&mut self) {
        if let Some(prev) = self.buf[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub(super) fn move_right(&mut self) {
        if let Some(next) = self.buf[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub(super) fn home(&mut self) {
        self.cursor = 0;
    }

    pub(super) fn end(&mut self) {
        self.cursor = self.buf.len();
    }

    /// Cursor position in terminal columns (one per char).
    pub(super) fn cursor_col(&self) -> u16 {
        self.buf[..self.cursor].chars().count() as u16
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/input_tests.rs"]
mod tests;
