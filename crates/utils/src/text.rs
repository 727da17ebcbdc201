/// First `max_chars` characters of `text`, with an ellipsis when cut.
///
/// Used to keep log lines bounded when echoing model output.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// True when the string is empty or only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
