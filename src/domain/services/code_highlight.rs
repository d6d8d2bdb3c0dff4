#[cfg(test)]
#[path = "code_highlight_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::domain::models::Highlighter;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r#"(?s)<pre><code(?: class="language-([^"]*)")?>(.*?)</code></pre>"#)
        .unwrap();
});

pub struct SyntectHighlighter {
    dark_theme: String,
    light_theme: String,
}

impl SyntectHighlighter {
    pub fn new(dark_theme: &str, light_theme: &str) -> Result<SyntectHighlighter> {
        for name in [dark_theme, light_theme] {
            if !THEME_SET.themes.contains_key(name) {
                bail!(format!(
                    "Syntax theme {name} does not exist. Available themes are: {}",
                    SyntectHighlighter::theme_names().join(", ")
                ));
            }
        }

        return Ok(SyntectHighlighter {
            dark_theme: dark_theme.to_string(),
            light_theme: light_theme.to_string(),
        });
    }

    pub fn theme_names() -> Vec<String> {
        let mut names = THEME_SET
            .themes
            .keys()
            .map(|name| return name.to_string())
            .collect::<Vec<String>>();
        names.sort();

        return names;
    }

    fn theme(&self, dark_mode: bool) -> Option<&'static Theme> {
        if dark_mode {
            return THEME_SET.themes.get(&self.dark_theme);
        }

        return THEME_SET.themes.get(&self.light_theme);
    }

    fn highlight_block(language: &str, code: &str, theme: &Theme) -> Result<String> {
        let syntax = SYNTAX_SET
            .find_syntax_by_token(language)
            .unwrap_or_else(|| return SYNTAX_SET.find_syntax_plain_text());

        let html = highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)?;
        return Ok(html);
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight_code_blocks(&self, html: &str, dark_mode: bool) -> String {
        let theme = match self.theme(dark_mode) {
            Some(theme) => theme,
            None => return html.to_string(),
        };

        return CODE_BLOCK
            .replace_all(html, |caps: &Captures| {
                let language = caps.get(1).map_or("", |m| return m.as_str());
                let code = html_escape::decode_html_entities(&caps[2]);

                match SyntectHighlighter::highlight_block(language, &code, theme) {
                    Ok(highlighted) => return highlighted,
                    Err(err) => {
                        tracing::warn!(error = ?err, language, "Failed to highlight code block");
                        return caps[0].to_string();
                    }
                }
            })
            .to_string();
    }
}
