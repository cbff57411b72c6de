//! The visual idioms that are recognized as math.
//!
//! Each [`Template`] is a predicate over an element's tag, class, style and children, plus a
//! builder that pulls the operands out of the matched element. Templates are tried in
//! declaration order and the first match wins.

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::builder::TreeBuilder;
use crate::character_class::INTEGRAL_SIGNS;
use crate::error::{ConvertErrKind, ConvertError};
use crate::fragment::{Element, Fragment};
use crate::tree::{Kind, Node, Payload};

const RADICAL_SIGN: &str = "√";

const SUB_SUP_STYLES: [&str; 2] = [
    "display:inline-block;margin-bottom:-0.3em;vertical-align:-0.4em;line-height:1.2em;font-size:80%;text-align:left",
    "display:inline-block;margin-bottom:-0.3em;vertical-align:-0.4em;line-height:1.2em;font-size:85%;text-align:right",
];
const OVER_STYLE: &str = "position:relative; margin-right:-0.75em; right:0.75em; bottom:0.75em;;";
const UNDER_STYLE: &str = "position:relative; margin-right:-0.75em; right:0.75em; top:0.45em;;";
const ITALIC_STYLE: &str = "font-style:italic;";

/// A visual idiom for a piece of math, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumIter)]
pub enum Template {
    /// `<span class="nowrap">√<span>x</span></span>`
    #[strum(serialize = "square root")]
    SquareRoot,
    /// `<span class="nowrap"><sup>3</sup>√<span>x</span></span>`
    #[strum(serialize = "root")]
    Root,
    /// `<span class="sfrac">a<span>/</span>b</span>`, or the mixed number
    /// `<span class="sfrac">1<span>+</span><span>2<span>/</span>3</span></span>`.
    #[strum(serialize = "fraction")]
    SlashFraction,
    /// `<span class="frac"><span>a</span><span>/</span><span>b</span></span>`
    #[strum(serialize = "stacked fraction")]
    StackedFraction,
    /// A group of four or more children that draws tall brackets from box-drawing pieces.
    #[strum(serialize = "delimiter group")]
    Delimiters,
    /// An integral sign followed by its limits, separated by a `<br>`.
    #[strum(serialize = "integral")]
    Integral,
    #[strum(serialize = "subscript")]
    Subscript,
    #[strum(serialize = "superscript")]
    Superscript,
    /// An inline block holding a superscript, a `<br>` and a subscript.
    #[strum(serialize = "sub- and superscript")]
    SubSup,
    #[strum(serialize = "overscript")]
    Over,
    #[strum(serialize = "underscript")]
    Under,
    /// An italic run of letters, each of which is a variable.
    #[strum(serialize = "variable")]
    Variable,
}

impl Template {
    /// The first template that matches `element`, if any.
    pub fn recognize(element: &Element) -> Option<Template> {
        Template::iter().find(|template| template.matches(element))
    }

    pub fn matches(self, element: &Element) -> bool {
        let children = element.children();
        let is_span = element.has_tag("span");
        match self {
            Template::SquareRoot => {
                is_span
                    && element.class_is("nowrap")
                    && children.len() == 2
                    && children[0].as_text() == Some(RADICAL_SIGN)
            }
            Template::Root => {
                is_span
                    && element.class_is("nowrap")
                    && children.len() == 3
                    && children[1].as_text() == Some(RADICAL_SIGN)
            }
            Template::SlashFraction => {
                is_span && element.has_class("sfrac") && children.len() == 3
            }
            Template::StackedFraction => {
                is_span && element.has_class("frac") && children.len() == 3
            }
            Template::Delimiters => element.has_class("sfrac") && children.len() >= 4,
            Template::Integral => {
                is_span && children.len() == 2 && integral_sign(element).is_some()
            }
            Template::Subscript => element.has_tag("sub"),
            Template::Superscript => element.has_tag("sup"),
            Template::SubSup => {
                is_span
                    && element
                        .style()
                        .is_some_and(|style| SUB_SUP_STYLES.contains(&style))
            }
            Template::Over => is_span && element.style_is(OVER_STYLE),
            Template::Under => is_span && element.style_is(UNDER_STYLE),
            Template::Variable => {
                (element.has_tag("i") || (is_span && element.style_is(ITALIC_STYLE)))
                    && matches!(children, [Fragment::Text(_)])
            }
        }
    }

    /// Build the expression tree for an element this template matches.
    pub(crate) fn build(
        self,
        builder: &mut TreeBuilder,
        element: &Element,
    ) -> Result<Node, ConvertError> {
        match self {
            Template::SquareRoot => {
                let radicand = builder.build(self.descend(element, &[1])?)?;
                Ok(Node::new(Kind::Sqrt, vec![radicand]))
            }
            Template::Root => {
                let radicand = builder.build(self.descend(element, &[2])?)?;
                let degree = builder.build(self.descend(element, &[0, 0])?)?;
                Ok(Node::new(Kind::Radic, vec![radicand, degree]))
            }
            Template::SlashFraction => {
                let middle = self.descend(element, &[1, 0])?;
                if middle.as_text() == Some("/") {
                    let num = builder.build(self.descend(element, &[0])?)?;
                    let denom = builder.build(self.descend(element, &[2])?)?;
                    Ok(Node::new(Kind::Frac, vec![num, denom]))
                } else {
                    // A mixed number: the whole part, then a proper fraction.
                    let whole = builder.build(self.descend(element, &[0])?)?;
                    let num = builder.build(self.descend(element, &[2, 0])?)?;
                    let denom = builder.build(self.descend(element, &[2, 2])?)?;
                    Ok(Node::row(vec![
                        whole,
                        Node::text("+"),
                        Node::new(Kind::Frac, vec![num, denom]),
                    ]))
                }
            }
            Template::StackedFraction => {
                let num = builder.build(self.descend(element, &[0, 0])?)?;
                let denom = builder.build(self.descend(element, &[2, 0])?)?;
                Ok(Node::new(Kind::Frac, vec![num, denom]))
            }
            Template::Delimiters => {
                let last = element.children().len() - 2;
                let open = match self.descend(element, &[1, 0, 0, 0])?.as_text() {
                    Some("⎡") => '[',
                    Some("│") => '|',
                    Some("║") => '‖',
                    _ => '(',
                };
                let close = match self.descend(element, &[last, 0, 0, 0])?.as_text() {
                    Some("⎤") => ']',
                    Some("│") => '|',
                    Some("║") => '‖',
                    _ => ')',
                };
                let content = element.children()[2..last]
                    .iter()
                    .map(|child| builder.build(child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::fence(open, close, content))
            }
            Template::Integral => {
                let Some(sign) = integral_sign(element) else {
                    return Err(self.missing(&[0, 0]));
                };
                let limits = self.descend(element, &[1])?.children();
                let (upper, lower) = match limits.iter().position(|child| child.is_element("br")) {
                    Some(br) => (&limits[..br], &limits[br + 1..]),
                    None => (limits, &[][..]),
                };
                let lower = builder.build_row(lower)?;
                let upper = builder.build_row(upper)?;
                Ok(Node::with_payload(
                    Kind::Integral,
                    Payload::Glyph(sign),
                    vec![lower, upper],
                ))
            }
            Template::Subscript => Ok(Node::new(
                Kind::Sub,
                vec![builder.build_row(element.children())?],
            )),
            Template::Superscript => Ok(Node::new(
                Kind::Sup,
                vec![builder.build_row(element.children())?],
            )),
            Template::SubSup => {
                let sub = builder.build(self.descend(element, &[2])?)?;
                let sup = builder.build(self.descend(element, &[0])?)?;
                Ok(Node::new(Kind::SubSup, vec![sub, sup]))
            }
            Template::Over => Ok(Node::with_payload(
                Kind::Sup,
                Payload::Stacked,
                vec![builder.build_row(element.children())?],
            )),
            Template::Under => Ok(Node::with_payload(
                Kind::Sub,
                Payload::Stacked,
                vec![builder.build_row(element.children())?],
            )),
            Template::Variable => {
                let text = self.descend(element, &[0])?.as_text().unwrap_or_default();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(_), None) => Ok(Node::text(text)),
                    _ => Ok(Node::row(
                        text.chars().map(|c| Node::text(c.to_string())).collect(),
                    )),
                }
            }
        }
    }

    /// Follow `path` of child indices down from `element`.
    fn descend<'f>(
        self,
        element: &'f Element,
        path: &[usize],
    ) -> Result<&'f Fragment, ConvertError> {
        let mut children = element.children();
        let mut found = Err(self.missing(path));
        for (depth, &index) in path.iter().enumerate() {
            let fragment = children
                .get(index)
                .ok_or_else(|| self.missing(&path[..=depth]))?;
            children = fragment.children();
            found = Ok(fragment);
        }
        found
    }

    fn missing(self, path: &[usize]) -> ConvertError {
        ConvertError(ConvertErrKind::MissingChild {
            template: self,
            path: path.into(),
        })
    }
}

/// The integral sign of an integral layout: the only content of the first child.
fn integral_sign(element: &Element) -> Option<char> {
    let [sign] = element.children().first()?.children() else {
        return None;
    };
    let mut chars = sign.as_text()?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if INTEGRAL_SIGNS.contains(&c) => Some(c),
        _ => None,
    }
}
