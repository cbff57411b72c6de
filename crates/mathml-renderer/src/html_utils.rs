//! Escaping of text that ends up inside generated markup.

/// Escape `&`, `<` and `>` in `input` and append it to `output`.
///
/// Suitable for element content, such as the text of `<mi>`, `<mn>` and `<mo>` tokens.
pub fn escape_html_content(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(pos) = memchr::memchr3(b'&', b'<', b'>', rest.as_bytes()) {
        push_escaped(output, rest, pos);
        rest = &rest[pos + 1..];
    }
    output.push_str(rest);
}

/// Escape `&` and `"` in `input` and append it to `output`.
///
/// Suitable for the value of an attribute written as `name="..."`.
pub fn escape_double_quoted_html_attribute(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(pos) = memchr::memchr2(b'&', b'"', rest.as_bytes()) {
        push_escaped(output, rest, pos);
        rest = &rest[pos + 1..];
    }
    output.push_str(rest);
}

/// Append `text[..pos]` followed by the entity for the ASCII byte at `pos`.
#[inline]
fn push_escaped(output: &mut String, text: &str, pos: usize) {
    output.push_str(&text[..pos]);
    output.push_str(match text.as_bytes()[pos] {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        _ => "&quot;",
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(input: &str) -> String {
        let mut output = String::new();
        escape_html_content(&mut output, input);
        output
    }

    fn attribute(input: &str) -> String {
        let mut output = String::new();
        escape_double_quoted_html_attribute(&mut output, input);
        output
    }

    #[test]
    fn operators_in_content() {
        assert_eq!(content(""), "");
        assert_eq!(content("x ≤ y"), "x ≤ y");
        assert_eq!(content("a<b>c"), "a&lt;b&gt;c");
        assert_eq!(content("&&"), "&amp;&amp;");
        assert_eq!(content("√<π"), "√&lt;π");
    }

    #[test]
    fn quotes_only_matter_in_attributes() {
        assert_eq!(content(r#"say "x""#), r#"say "x""#);
        assert_eq!(attribute(r#"say "x""#), "say &quot;x&quot;");
        assert_eq!(attribute("a<b&c"), "a<b&amp;c");
    }

    #[test]
    fn appends_to_output() {
        let mut output = String::from("<mo>");
        escape_html_content(&mut output, "<");
        output.push_str("</mo>");
        assert_eq!(output, "<mo>&lt;</mo>");
    }
}
