pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Returns the trimmed text, or `None` when nothing but whitespace is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
