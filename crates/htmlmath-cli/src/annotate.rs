use htmlmath::{Element, Fragment};
use mathml_renderer::html_utils::{escape_double_quoted_html_attribute, escape_html_content};
use phf::{Set, phf_set};

/// Elements that have no closing tag.
static VOID_ELEMENTS: Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
};

/// Put the MathML next to the original markup, the way MediaWiki pages do: the MathML is
/// visually hidden and the original is hidden from assistive technology.
pub fn annotate(mathml: &str, original: &Element) -> String {
    let mut html = String::new();
    html.push_str(r#"<span class="mwe-math-element">"#);
    html.push_str(
        r#"<span class="mwe-math-mathml-inline mwe-math-mathml-a11y" style="display: none;">"#,
    );
    html.push_str(mathml);
    html.push_str("</span>");
    write_element(&mut html, original, true);
    html.push_str("</span>");
    html
}

fn write_element(html: &mut String, element: &Element, aria_hidden: bool) {
    let tag = element.tag();
    html.push('<');
    html.push_str(tag);
    if let Some(class) = element.class() {
        html.push_str(" class=\"");
        escape_double_quoted_html_attribute(html, class);
        html.push('"');
    }
    if let Some(style) = element.style() {
        html.push_str(" style=\"");
        escape_double_quoted_html_attribute(html, style);
        html.push('"');
    }
    if aria_hidden {
        html.push_str(" aria-hidden=\"true\"");
    }
    html.push('>');
    if VOID_ELEMENTS.contains(tag) {
        return;
    }
    for child in element.children() {
        match child {
            Fragment::Element(child) => write_element(html, child, false),
            Fragment::Text(text) => escape_html_content(html, text),
        }
    }
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_original_markup() {
        let original = Element::new("span")
            .with_class("nowrap")
            .with_child("√")
            .with_child(Element::new("span").with_style("a\"b").with_child("x<y"))
            .with_child(Element::new("br"));
        assert_eq!(
            annotate("<math></math>", &original),
            concat!(
                r#"<span class="mwe-math-element">"#,
                r#"<span class="mwe-math-mathml-inline mwe-math-mathml-a11y" style="display: none;">"#,
                "<math></math></span>",
                r#"<span class="nowrap" aria-hidden="true">√<span style="a&quot;b">x&lt;y</span><br></span>"#,
                "</span>"
            )
        );
    }
}
