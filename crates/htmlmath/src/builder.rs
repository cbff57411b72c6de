use phf::{Set, phf_set};

use crate::error::{ConvertErrKind, ConvertError};
use crate::fragment::{Element, Fragment};
use crate::template::Template;
use crate::tokenizer::tokenize;
use crate::tree::Node;

/// Fragments nested deeper than this are rejected instead of risking the stack.
const MAX_DEPTH: usize = 200;

/// Limit on the depth of a normalized tree. Chains of scripts nest each other and can grow
/// deeper than the fragment they came from.
const MAX_TREE_DEPTH: usize = 2 * MAX_DEPTH;

/// Elements that never hold math: their content is dropped.
static NON_CONTENT_TAGS: Set<&'static str> = phf_set! {
    "style", "link", "script", "meta", "noscript",
};

/// Build the expression tree for `fragment`, before any normalization.
pub fn build_tree(fragment: &Fragment) -> Result<Node, ConvertError> {
    TreeBuilder::default().build(fragment)
}

/// Reject a normalized tree too deep to be rendered.
pub(crate) fn check_depth(tree: &Node) -> Result<(), ConvertError> {
    if tree.depth() > MAX_TREE_DEPTH {
        return Err(ConvertError(ConvertErrKind::NestingTooDeep));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    depth: usize,
}

impl TreeBuilder {
    pub(crate) fn build(&mut self, fragment: &Fragment) -> Result<Node, ConvertError> {
        if self.depth >= MAX_DEPTH {
            return Err(ConvertError(ConvertErrKind::NestingTooDeep));
        }
        self.depth += 1;
        let node = match fragment {
            Fragment::Text(text) => Ok(tokenize(text)),
            Fragment::Element(element) => self.build_element(element),
        };
        self.depth -= 1;
        node
    }

    fn build_element(&mut self, element: &Element) -> Result<Node, ConvertError> {
        // Invisible helpers that only exist for formatting.
        if element.has_tag("span") && element.style_is("display:none") {
            return Ok(Node::empty_row());
        }
        if let Some(template) = Template::recognize(element) {
            log::trace!(
                "<{}> recognized as {}",
                element.tag(),
                <&str>::from(template)
            );
            return template.build(self, element);
        }
        if NON_CONTENT_TAGS
            .iter()
            .any(|tag| element.has_tag(tag))
        {
            return Ok(Node::empty_row());
        }
        self.build_row(element.children())
    }

    /// A single fragment is built on its own; zero or several become a row.
    pub(crate) fn build_row(&mut self, fragments: &[Fragment]) -> Result<Node, ConvertError> {
        match fragments {
            [single] => self.build(single),
            _ => Ok(Node::row(
                fragments
                    .iter()
                    .map(|fragment| self.build(fragment))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Kind, Payload};

    fn span() -> Element {
        Element::new("span")
    }

    fn build(element: Element) -> Node {
        build_tree(&Fragment::from(element)).unwrap()
    }

    #[test]
    fn text_is_tokenized() {
        assert_eq!(
            build_tree(&Fragment::text("2x")).unwrap(),
            Node::row(vec![Node::text("2"), Node::text("x")])
        );
    }

    #[test]
    fn hidden_span_is_dropped() {
        let element = span()
            .with_style("display:none")
            .with_class("sfrac")
            .with_children(["1", "/", "2"]);
        assert_eq!(build(element), Node::empty_row());
    }

    #[test]
    fn non_content_tags_are_dropped() {
        let element = Element::new("STYLE").with_child(".mw-parser-output{}");
        assert_eq!(build(element), Node::empty_row());
    }

    #[test]
    fn generic_container() {
        assert_eq!(build(span().with_child("x")), Node::text("x"));
        assert_eq!(
            build(span().with_child("x").with_child(Element::new("b").with_child("y"))),
            Node::row(vec![Node::text("x"), Node::text("y")])
        );
        assert_eq!(build(span()), Node::empty_row());
    }

    #[test]
    fn square_root() {
        let element = span()
            .with_class("nowrap")
            .with_child("√")
            .with_child(span().with_child("2"));
        assert_eq!(build(element), Node::new(Kind::Sqrt, vec![Node::text("2")]));
    }

    #[test]
    fn root_keeps_radicand_before_degree() {
        let element = span()
            .with_class("nowrap")
            .with_child(Element::new("sup").with_child("3"))
            .with_child("√")
            .with_child(span().with_child("x"));
        assert_eq!(
            build(element),
            Node::new(Kind::Radic, vec![Node::text("x"), Node::text("3")])
        );
    }

    #[test]
    fn slash_and_mixed_fractions() {
        let slash = span()
            .with_class("sfrac nowrap")
            .with_child("1")
            .with_child(span().with_child("/"))
            .with_child("2");
        assert_eq!(
            build(slash),
            Node::new(Kind::Frac, vec![Node::text("1"), Node::text("2")])
        );

        let mixed = span()
            .with_class("sfrac nowrap")
            .with_child("3")
            .with_child(span().with_child("+"))
            .with_child(span().with_children([
                Fragment::from(span().with_child("1")),
                Fragment::from(span().with_child("/")),
                Fragment::from(span().with_child("4")),
            ]));
        assert_eq!(
            build(mixed),
            Node::row(vec![
                Node::text("3"),
                Node::text("+"),
                Node::new(Kind::Frac, vec![Node::text("1"), Node::text("4")]),
            ])
        );
    }

    #[test]
    fn stacked_fraction() {
        let element = span().with_class("frac").with_children([
            Fragment::from(span().with_child("a")),
            Fragment::from(span().with_child("⁄")),
            Fragment::from(span().with_child("b")),
        ]);
        assert_eq!(
            build(element),
            Node::new(Kind::Frac, vec![Node::text("a"), Node::text("b")])
        );
    }

    #[test]
    fn integral_limits_are_lower_then_upper() {
        let element = span()
            .with_child(span().with_child("∫"))
            .with_child(span().with_children([
                Fragment::text("b"),
                Fragment::from(Element::new("br")),
                Fragment::text("a"),
            ]));
        assert_eq!(
            build(element),
            Node::with_payload(
                Kind::Integral,
                Payload::Glyph('∫'),
                vec![Node::text("a"), Node::text("b")]
            )
        );
    }

    #[test]
    fn integral_without_break_has_empty_lower_limit() {
        let element = span()
            .with_child(span().with_child("∮"))
            .with_child(span().with_child("C").with_child(Element::new("i").with_child("x")));
        assert_eq!(
            build(element),
            Node::with_payload(
                Kind::Integral,
                Payload::Glyph('∮'),
                vec![
                    Node::empty_row(),
                    Node::row(vec![Node::text("C"), Node::text("x")])
                ]
            )
        );
    }

    #[test]
    fn scripts() {
        assert_eq!(
            build(Element::new("sub").with_child("i").with_child("+1")),
            Node::new(
                Kind::Sub,
                vec![Node::row(vec![
                    Node::text("i"),
                    Node::row(vec![Node::text("+"), Node::text("1")]),
                ])]
            )
        );
        let over = span()
            .with_style("position:relative; margin-right:-0.75em; right:0.75em; bottom:0.75em;;")
            .with_child("¯");
        assert_eq!(
            build(over),
            Node::with_payload(Kind::Sup, Payload::Stacked, vec![Node::text("¯")])
        );
    }

    #[test]
    fn combined_scripts_take_subscript_first() {
        let element = span()
            .with_style("display:inline-block;margin-bottom:-0.3em;vertical-align:-0.4em;line-height:1.2em;font-size:80%;text-align:left")
            .with_child(Element::new("sup").with_child("2"))
            .with_child(Element::new("br"))
            .with_child(Element::new("sub").with_child("1"));
        assert_eq!(
            build(element),
            Node::new(
                Kind::SubSup,
                vec![
                    Node::new(Kind::Sub, vec![Node::text("1")]),
                    Node::new(Kind::Sup, vec![Node::text("2")]),
                ]
            )
        );
    }

    #[test]
    fn variable_is_spelled_letter_by_letter() {
        assert_eq!(build(Element::new("i").with_child("x")), Node::text("x"));
        assert_eq!(
            build(Element::new("i").with_child("ab")),
            Node::row(vec![Node::text("a"), Node::text("b")])
        );
    }

    #[test]
    fn delimiter_group() {
        let piece = |glyph: &str| {
            span().with_child(span().with_child(span().with_child(glyph)))
        };
        let element = span().with_class("sfrac").with_children([
            Fragment::from(span()),
            Fragment::from(piece("⎡")),
            Fragment::text("a"),
            Fragment::text("b"),
            Fragment::from(piece("⎤")),
            Fragment::from(span()),
        ]);
        assert_eq!(
            build(element),
            Node::fence('[', ']', vec![Node::text("a"), Node::text("b")])
        );
    }

    #[test]
    fn delimiter_group_with_unknown_glyph_uses_parentheses() {
        let piece = |glyph: Fragment| span().with_child(span().with_child(span().with_child(glyph)));
        let element = span().with_class("sfrac").with_children([
            Fragment::from(span()),
            Fragment::from(piece(Fragment::text("│"))),
            Fragment::text("x"),
            Fragment::from(piece(Fragment::from(Element::new("b")))),
            Fragment::from(span()),
        ]);
        assert_eq!(
            build(element),
            Node::fence('|', ')', vec![Node::text("x")])
        );
    }

    #[test]
    fn delimiter_group_without_glyph_fails() {
        let element = span()
            .with_class("sfrac")
            .with_children(["(", "a", "b", ")"]);
        let err = build_tree(&Fragment::from(element)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed delimiter group: no child at 1.0."
        );
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut fragment = Fragment::text("x");
        for _ in 0..(MAX_DEPTH + 1) {
            fragment = Fragment::from(Element::new("b").with_child(fragment));
        }
        assert_eq!(
            build_tree(&fragment),
            Err(ConvertError(ConvertErrKind::NestingTooDeep))
        );
    }
}
