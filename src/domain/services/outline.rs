#[cfg(test)]
#[path = "outline_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use markdown::mdast::Node;

pub fn slugify(text: &str) -> String {
    return text
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| return c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
}

fn heading_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    heading_text(child, out);
                }
            }
        }
    }
}

fn collect_headings(node: &Node, lines: &mut Vec<String>) {
    if let Node::Heading(heading) = node {
        let mut text = String::new();
        for child in &heading.children {
            heading_text(child, &mut text);
        }

        let indent = "  ".repeat(usize::from(heading.depth.saturating_sub(1)));
        lines.push(format!("{indent}- [{text}](#{})", slugify(&text)));
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_headings(child, lines);
        }
    }
}

pub fn extract_toc(content: &str) -> Result<String> {
    let tree = markdown::to_mdast(content, &markdown::ParseOptions::gfm())
        .map_err(|err| return anyhow!("Failed to parse markdown: {err}"))?;

    let mut lines = vec![];
    collect_headings(&tree, &mut lines);

    return Ok(lines.join("\n"));
}
