/// Single-line edit buffer: the text plus a caret counted in chars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditState {
    pub value: String,
    pub caret: usize,
}

impl EditState {
    pub fn new(value: impl Into<String>, caret: usize) -> Self {
        let value = value.into();
        let caret = caret.min(value.chars().count());
        Self { value, caret }
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.len();
    }

    /// Removes the char before the caret. Returns whether the text changed.
    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.replace_chars(self.caret - 1, self.caret, "");
        true
    }

    /// Removes the char after the caret. Returns whether the text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        self.replace_chars(self.caret, self.caret + 1, "");
        true
    }

    /// Inserts typed text at the caret, dropping control characters such as
    /// newlines. Returns whether the text changed.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let text = text.chars().filter(|ch| !ch.is_control()).collect::<String>();
        if text.is_empty() {
            return false;
        }
        self.replace_chars(self.caret, self.caret, &text);
        true
    }

    fn replace_chars(&mut self, start: usize, end: usize, insert: &str) {
        let start_byte = byte_index_at_char(&self.value, start);
        let end_byte = byte_index_at_char(&self.value, end);
        self.value.replace_range(start_byte..end_byte, insert);
        self.caret = start + insert.chars().count();
    }
}

pub fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}
