use anyhow::Result;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::text::Line;

use super::render_markup;
use super::Preview;

fn plain(lines: &[Line]) -> String {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect::<Vec<String>>()
        .join("\n");
}

#[test]
fn it_renders_blocks_and_lists() -> Result<()> {
    let html = "<h1>Title</h1>\n<p>Some <strong>bold</strong> text</p>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<ol>\n<li>first</li>\n<li>second</li>\n</ol>\n";
    let lines = render_markup(html);

    insta::assert_snapshot!(plain(&lines), @r###"
    Title

    Some bold text

    • one
    • two

    1. first
    2. second
    "###);

    assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert!(lines[2].spans[1].style.add_modifier.contains(Modifier::BOLD));
    assert!(!lines[2].spans[0].style.add_modifier.contains(Modifier::BOLD));

    return Ok(());
}

#[test]
fn it_keeps_code_block_lines() -> Result<()> {
    let html = "<pre><code class=\"language-rust\">fn main() {\n    println!(&quot;hi&quot;);\n}\n</code></pre>\n<p>after</p>";

    insta::assert_snapshot!(plain(&render_markup(html)), @r###"
    fn main() {
        println!("hi");
    }

    after
    "###);

    return Ok(());
}

#[test]
fn it_colors_highlighted_spans() -> Result<()> {
    let html = "<pre style=\"background-color:#2b303b;\">\n<span style=\"color:#b48ead;\">fn</span><span style=\"color:#c0c5ce;\"> main</span>\n</pre>";
    let lines = render_markup(html);

    assert_eq!(plain(&lines), "fn main");
    assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(0xb4, 0x8e, 0xad)));
    assert_eq!(lines[0].spans[1].style.fg, Some(Color::Rgb(0xc0, 0xc5, 0xce)));

    return Ok(());
}

#[test]
fn it_decodes_entities_and_marks_inline_code() -> Result<()> {
    let lines = render_markup("<p>a &amp; b &lt;c&gt; <code>cargo</code></p>");

    assert_eq!(plain(&lines), "a & b <c> cargo");
    assert_eq!(lines[0].spans.last().and_then(|s| return s.style.fg), Some(Color::Yellow));

    return Ok(());
}

#[test]
fn it_renders_quotes_and_rules() -> Result<()> {
    let lines = render_markup("<blockquote>\n<p>quoted</p>\n</blockquote>\n<hr />\n<p>end</p>");

    insta::assert_snapshot!(plain(&lines), @r###"
    │ quoted

    ────────────────

    end
    "###);

    return Ok(());
}

#[test]
fn it_renders_empty_markup() -> Result<()> {
    assert!(render_markup("").is_empty());
    return Ok(());
}

#[test]
fn it_clamps_scroll_position() -> Result<()> {
    let mut preview = Preview::default();
    preview.set_markup("<pre>a\nb\nc</pre>");

    preview.up();
    assert_eq!(preview.position, 0);

    for _ in 0..5 {
        preview.down();
    }
    assert_eq!(preview.position, 2);

    preview.up();
    assert_eq!(preview.position, 1);

    preview.up_page();
    assert_eq!(preview.position, 0);
    preview.down_page();
    assert_eq!(preview.position, 2);

    preview.set_markup("<p>short</p>");
    assert_eq!(preview.position, 0);
    assert_eq!(preview.lines().len(), 1);

    return Ok(());
}
