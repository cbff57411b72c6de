use std::io;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use htmlmath::{Element, Fragment};

/// Tag given to the element that stands in for the document node.
const DOCUMENT_TAG: &str = "#document";

pub fn parse_html(html: &str) -> io::Result<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
}

/// Convert a DOM subtree into a fragment tree.
///
/// Only `class` and `style` are kept of the attributes. Comments, doctypes and processing
/// instructions are dropped.
pub fn to_fragment(handle: &Handle) -> Option<Fragment> {
    match handle.data {
        NodeData::Document => Some(
            Element::new(DOCUMENT_TAG)
                .with_children(children(handle))
                .into(),
        ),
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut element = Element::new(&*name.local);
            for attr in attrs.borrow().iter() {
                match &*attr.name.local {
                    "class" => element = element.with_class(&*attr.value),
                    "style" => element = element.with_style(&*attr.value),
                    _ => {}
                }
            }
            Some(element.with_children(children(handle)).into())
        }
        NodeData::Text { ref contents } => {
            let contents = contents.borrow();
            Some(Fragment::text(&**contents))
        }
        _ => None,
    }
}

fn children(handle: &Handle) -> Vec<Fragment> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(to_fragment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(html: &str) -> Fragment {
        let dom = parse_html(html).unwrap();
        let document = to_fragment(&dom.document).unwrap();
        // #document > html > [head, body]
        let html_element = document.children()[0].clone();
        html_element.children()[1].clone()
    }

    #[test]
    fn keeps_class_and_style() {
        let fragment = body(
            r#"<span class="nowrap" id="x" style="display:none">√<span>2</span></span>"#,
        );
        let span = fragment.children()[0].as_element().unwrap();
        assert_eq!(span.tag(), "span");
        assert_eq!(span.class(), Some("nowrap"));
        assert_eq!(span.style(), Some("display:none"));
        assert_eq!(span.children()[0].as_text(), Some("√"));
        assert!(span.children()[1].is_element("span"));
    }

    #[test]
    fn entities_are_decoded_and_comments_dropped() {
        let fragment = body("<i>a</i>&nbsp;&lt;<!-- note --><b>c</b>");
        assert_eq!(fragment.children().len(), 3);
        assert_eq!(fragment.children()[1].as_text(), Some("\u{a0}<"));
    }
}
