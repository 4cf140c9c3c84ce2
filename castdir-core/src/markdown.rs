//! Minimal markdown-to-HTML conversion for blog publishing.
//!
//! Covers only the subset the blog generator emits: headings, unordered
//! lists, paragraphs, bold and italics. Not a general markdown
//! implementation.

/// Render a markdown document as HTML, block by block.
pub fn markdown_to_html(md: &str) -> String {
    md.split("\n\n")
        .filter_map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &str) -> Option<String> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(text) = trimmed.strip_prefix("### ") {
        return Some(format!("<h3>{}</h3>", escape_html(text)));
    }
    if let Some(text) = trimmed.strip_prefix("## ") {
        return Some(format!("<h2>{}</h2>", escape_html(text)));
    }
    if let Some(text) = trimmed.strip_prefix("# ") {
        return Some(format!("<h1>{}</h1>", escape_html(text)));
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines
        .iter()
        .all(|l| l.starts_with("- ") || l.starts_with("* "))
    {
        let items = lines
            .iter()
            .map(|l| format!("<li>{}</li>", inline_markdown(l[2..].trim_start())))
            .collect::<Vec<_>>()
            .join("\n");
        return Some(format!("<ul>\n{}\n</ul>", items));
    }

    Some(format!(
        "<p>{}</p>",
        inline_markdown(&trimmed.replace('\n', " "))
    ))
}

/// Convert inline markdown (bold, italics) to HTML.
fn inline_markdown(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = wrap_delimited(&escaped, "**", "strong");
    let italic = wrap_delimited(&bold, "*", "em");
    wrap_delimited(&italic, "_", "em")
}

/// Wrap each delimited pair in `tag`; unmatched delimiters are left as-is.
fn wrap_delimited(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(start) = rest.find(delim) else {
            out.push_str(rest);
            break;
        };
        let after = &rest[start + delim.len()..];
        let Some(end) = after.find(delim) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&format!("<{tag}>{}</{tag}>", &after[..end]));
        rest = &after[end + delim.len()..];
    }
    out
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>");
        assert_eq!(markdown_to_html("## Section"), "<h2>Section</h2>");
        assert_eq!(markdown_to_html("### Sub"), "<h3>Sub</h3>");
    }

    #[test]
    fn test_list_block() {
        let html = markdown_to_html("- one\n- **two**\n- three");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li><strong>two</strong></li>\n<li>three</li>\n</ul>"
        );
    }

    #[test]
    fn test_paragraph_with_inline_styles() {
        let html = markdown_to_html("Some **bold** and *quiet* words");
        assert_eq!(
            html,
            "<p>Some <strong>bold</strong> and <em>quiet</em> words</p>"
        );
    }

    #[test]
    fn test_multiline_paragraph_joins_lines() {
        assert_eq!(markdown_to_html("line one\nline two"), "<p>line one line two</p>");
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            markdown_to_html("a <b> & \"c\""),
            "<p>a &lt;b&gt; &amp; &quot;c&quot;</p>"
        );
    }

    #[test]
    fn test_unmatched_delimiter_kept() {
        assert_eq!(markdown_to_html("3 * 4"), "<p>3 * 4</p>");
    }

    #[test]
    fn test_blocks_are_separated() {
        let html = markdown_to_html("# Title\n\nfirst\n\n- a\n- b");
        assert_eq!(
            html,
            "<h1>Title</h1>\n\n<p>first</p>\n\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }
}
