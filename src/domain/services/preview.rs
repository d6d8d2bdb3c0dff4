#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::ScrollbarState;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").unwrap();
});
static COLOR: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"(?:^|[^-])color:\s*#([0-9a-fA-F]{6})").unwrap();
});

const BLOCK_TAGS: [&str; 12] = [
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "pre",
    "ul",
    "ol",
    "blockquote",
    "table",
];
const VOID_TAGS: [&str; 5] = ["br", "hr", "img", "input", "meta"];

fn parse_hex_color(hex: &str) -> Option<Color> {
    let value = u32::from_str_radix(hex, 16).ok()?;
    return Some(Color::Rgb(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ));
}

#[derive(Default)]
struct MarkupRenderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<usize>>,
    pre_depth: usize,
    quote_depth: usize,
    skip_newline: bool,
}

impl MarkupRenderer {
    fn style(&self) -> Style {
        return self.styles.last().copied().unwrap_or_default();
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.current.is_empty() && self.quote_depth > 0 {
            self.current.push(Span::raw("│ ".repeat(self.quote_depth)));
        }

        let style = self.style();
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if let Some(last) = self.lines.last() {
            if last.width() == 0 {
                return;
            }
        }
        self.lines.push(Line::default());
    }

    fn text(&mut self, raw: &str) {
        let decoded = html_escape::decode_html_entities(raw).to_string();

        if self.pre_depth > 0 {
            let mut text = decoded.as_str();
            if self.skip_newline {
                text = text.strip_prefix('\n').unwrap_or(text);
            }
            self.skip_newline = false;

            let mut segments = text.split('\n').peekable();
            while let Some(segment) = segments.next() {
                self.push_text(segment);
                if segments.peek().is_some() {
                    self.break_line();
                }
            }
            return;
        }

        // Newlines between tags are layout, not content.
        if decoded.trim().is_empty() && (self.current.is_empty() || decoded.contains('\n')) {
            return;
        }

        let collapsed = decoded.replace('\n', " ");
        if self.current.is_empty() {
            self.push_text(collapsed.trim_start());
        } else {
            self.push_text(&collapsed);
        }
    }

    fn open_tag(&mut self, name: &str, attributes: &str) {
        let in_list_item = name == "p" && !self.lists.is_empty();
        if (BLOCK_TAGS.contains(&name) || name == "li" || name == "tr") && !in_list_item {
            self.flush_line();
        }

        match name {
            "br" => {
                self.break_line();
                return;
            }
            "hr" => {
                self.blank_line();
                self.push_text("────────────────");
                self.blank_line();
                return;
            }
            "ul" => self.lists.push(None),
            "ol" => self.lists.push(Some(1)),
            "li" => {
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.push_text(&marker);
            }
            "pre" => {
                self.pre_depth += 1;
                self.skip_newline = true;
            }
            "blockquote" => self.quote_depth += 1,
            _ => (),
        }

        if VOID_TAGS.contains(&name) {
            return;
        }

        let mut style = self.style();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "strong" | "b" | "th" => {
                style = style.add_modifier(Modifier::BOLD);
            }
            "em" | "i" => {
                style = style.add_modifier(Modifier::ITALIC);
            }
            "del" | "s" => {
                style = style.add_modifier(Modifier::CROSSED_OUT);
            }
            "a" => {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            "code" if self.pre_depth == 0 => {
                style = style.fg(Color::Yellow);
            }
            _ => (),
        }
        if let Some(caps) = COLOR.captures(attributes) {
            if let Some(color) = parse_hex_color(&caps[1]) {
                style = style.fg(color);
            }
        }

        self.styles.push(style);
    }

    fn close_tag(&mut self, name: &str) {
        self.styles.pop();

        match name {
            "pre" => {
                self.pre_depth = self.pre_depth.saturating_sub(1);
                self.blank_line();
            }
            "ul" | "ol" => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            "blockquote" => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            "p" if !self.lists.is_empty() => self.flush_line(),
            "li" | "tr" => self.flush_line(),
            "td" | "th" => self.push_text("  "),
            _ if BLOCK_TAGS.contains(&name) => self.blank_line(),
            _ => (),
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while let Some(last) = self.lines.last() {
            if last.width() > 0 {
                break;
            }
            self.lines.pop();
        }

        return self.lines;
    }
}

pub fn render_markup(html: &str) -> Vec<Line<'static>> {
    let mut renderer = MarkupRenderer::default();
    let mut last = 0;

    for caps in TAG.captures_iter(html) {
        let whole = match caps.get(0) {
            Some(whole) => whole,
            None => continue,
        };

        renderer.text(&html[last..whole.start()]);
        let name = caps[2].to_lowercase();
        if &caps[1] == "/" {
            renderer.close_tag(&name);
        } else {
            renderer.open_tag(&name, &caps[3]);
        }
        last = whole.end();
    }
    renderer.text(&html[last..]);

    return renderer.finish();
}

#[derive(Default)]
pub struct Preview {
    lines: Vec<Line<'static>>,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Preview {
    pub fn set_markup(&mut self, html: &str) {
        self.lines = render_markup(html);
        self.clamp();
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        return self.lines.clone();
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.clamp();
    }

    pub fn up_page(&mut self) {
        for _ in 0..10 {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1);
        self.clamp();
    }

    pub fn down_page(&mut self) {
        for _ in 0..10 {
            self.down();
        }
    }

    fn clamp(&mut self) {
        let length = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        self.position = self.position.min(length.saturating_sub(1));
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(length)
            .position(self.position);
    }
}
