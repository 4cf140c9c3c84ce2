//! Caption post-processing.

/// Reduce YouTube timed-text XML to plain text: strip tags, decode the
/// handful of entities the format emits, collapse whitespace.
pub fn parse_timed_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len());
    let mut in_tag = false;
    for ch in xml.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }

    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, breaking at the last space
/// so words stay whole. Longer inputs get an ellipsis appended.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let head: String = text.chars().take(max_chars).collect();
    match head.rfind(' ') {
        Some(cut) if cut > 0 => format!("{}…", &head[..cut]),
        _ => format!("{}…", head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_text_strips_tags_and_decodes_entities() {
        let xml = r#"<?xml version="1.0"?><transcript><text start="0.0" dur="2.1">Hello &amp; welcome</text><text start="2.1" dur="1.5">to the &quot;show&quot;</text></transcript>"#;
        assert_eq!(parse_timed_text(xml), "Hello & welcome to the \"show\"");
    }

    #[test]
    fn test_timed_text_collapses_whitespace() {
        let xml = "<text>one\n  two</text>\n<text>three</text>";
        assert_eq!(parse_timed_text(xml), "one two three");
    }

    #[test]
    fn test_truncate_passes_short_input_through() {
        assert_eq!(truncate_at_word("short text", 100), "short text");
    }

    #[test]
    fn test_truncate_breaks_at_word_boundary() {
        let out = truncate_at_word("the quick brown fox jumps", 14);
        assert_eq!(out, "the quick…");
    }

    #[test]
    fn test_truncate_handles_unbroken_input() {
        let out = truncate_at_word("aaaaaaaaaa", 5);
        assert_eq!(out, "aaaaa…");
    }
}
