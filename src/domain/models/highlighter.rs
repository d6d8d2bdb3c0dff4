use std::sync::Arc;

pub trait Highlighter {
    fn highlight_code_blocks(&self, html: &str, dark_mode: bool) -> String;
}

pub type HighlighterHandle = Arc<dyn Highlighter + Send + Sync>;
