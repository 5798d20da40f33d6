//! Markup-injection sanitization for free-text form fields.
//!
//! Stored values are HTML-escaped once, at the form boundary, so views can
//! emit them verbatim.

/// Escape the characters that can open or break out of HTML markup.
///
/// ```
/// use vidya_core::sanitize::escape_html;
///
/// assert_eq!(escape_html("<b>Doom</b>"), "&lt;b&gt;Doom&lt;&#x2F;b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Trim surrounding whitespace, then escape.
pub fn clean(input: &str) -> String {
    escape_html(input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("Stardew Valley"), "Stardew Valley");
    }

    #[test]
    fn script_tag_is_neutralized() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn ampersand_escaped_first_not_twice() {
        assert_eq!(escape_html("R&D <3"), "R&amp;D &lt;3");
    }

    #[test]
    fn quotes_and_backticks() {
        assert_eq!(escape_html(r#""a" `b` \c"#), "&quot;a&quot; &#96;b&#96; &#x5C;c");
    }

    #[test]
    fn clean_trims_before_escaping() {
        assert_eq!(clean("  Tom Clancy's  "), "Tom Clancy&#x27;s");
    }

    #[test]
    fn clean_of_whitespace_is_empty() {
        assert_eq!(clean(" \t\n "), "");
    }
}
