/// A short document touching most of the markdown the preview renders,
/// including two fenced code blocks.
pub fn markdown_fixture() -> String {
    return r#"
# Shopping list

Some *emphasis*, some **strong** text and `inline code`.

- apples
- pears

1. first
2. second

> Quoted advice.

```rust
fn print_numbers() {
    for i in 0..=3 {
        println!("{i}");
    }
}
```

| item | count |
| ---- | ----- |
| tea  | 2     |

```
plain block with <angle> & ampersand
```

That's it!
"#
    .trim()
    .to_string();
}

/// Typed one character at a time, the way an editor reports changes.
pub fn keystrokes(text: &str) -> Vec<String> {
    let mut typed = String::new();
    return text
        .chars()
        .map(|c| {
            typed.push(c);
            return typed.to_string();
        })
        .collect();
}
