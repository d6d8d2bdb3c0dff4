#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

pub fn word_count(text: &str) -> usize {
    return text.split_whitespace().count();
}

pub fn word_count_label(count: usize) -> String {
    if count == 1 {
        return "1 word".to_string();
    }

    return format!("{count} words");
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorSession {
    pub content: String,
    pub dirty: bool,
    pub word_count: usize,
}

impl EditorSession {
    pub fn new(content: &str) -> EditorSession {
        return EditorSession {
            content: content.to_string(),
            dirty: false,
            word_count: word_count(content),
        };
    }

    pub fn record_edit(&mut self, content: String) {
        self.word_count = word_count(&content);
        self.content = content;
        self.dirty = true;
    }

    pub fn word_count_label(&self) -> String {
        return word_count_label(self.word_count);
    }
}
