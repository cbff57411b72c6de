use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::attribute::MathVariant;
use super::fmt::new_line_and_indent;
use super::html_utils::escape_html_content;

/// AST node
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node<'arena> {
    /// `<mn>...</mn>`
    Number(&'arena str),
    /// `<mi>...</mi>`
    Identifier(&'arena str),
    /// `<mo>...</mo>`
    Operator(&'arena str),
    /// `<msub>...</msub>`
    Subscript {
        target: &'arena Node<'arena>,
        symbol: &'arena Node<'arena>,
    },
    /// `<msup>...</msup>`
    Superscript {
        target: &'arena Node<'arena>,
        symbol: &'arena Node<'arena>,
    },
    /// `<msubsup>...</msubsup>`
    SubSup {
        target: &'arena Node<'arena>,
        sub: &'arena Node<'arena>,
        sup: &'arena Node<'arena>,
    },
    /// `<mover>...</mover>`
    Overset {
        symbol: &'arena Node<'arena>,
        target: &'arena Node<'arena>,
    },
    /// `<munder>...</munder>`
    Underset {
        symbol: &'arena Node<'arena>,
        target: &'arena Node<'arena>,
    },
    /// `<msqrt>...</msqrt>`
    Sqrt(&'arena Node<'arena>),
    /// `<mroot>...</mroot>`, holding the index first and the radicand second.
    Root(&'arena Node<'arena>, &'arena Node<'arena>),
    /// `<mfrac>...</mfrac>`
    Frac {
        /// Numerator
        num: &'arena Node<'arena>,
        /// Denominator
        denom: &'arena Node<'arena>,
    },
    /// `<mrow>...</mrow>`
    Row(&'arena [&'arena Node<'arena>]),
    /// `<mrow><mo>(</mo>...<mo>)</mo></mrow>`
    Fenced {
        open: char,
        close: char,
        content: &'arena Node<'arena>,
    },
    /// `<mstyle mathvariant="...">...</mstyle>`
    Styled {
        variant: MathVariant,
        content: &'arena Node<'arena>,
    },
}

static_assertions::const_assert!(
    std::mem::size_of::<Node<'static>>() <= 4 * std::mem::size_of::<usize>()
);

macro_rules! writeln_indent {
    ($buf:expr, $indent:expr, $($tail:tt)+) => {
        new_line_and_indent($buf, $indent);
        write!($buf, $($tail)+)?
    };
}

pub struct MathMLEmitter {
    s: String,
}

impl MathMLEmitter {
    #[inline]
    pub fn new() -> Self {
        Self { s: String::new() }
    }

    /// Continue writing after the content that is already in `s`.
    #[inline]
    pub fn with_buffer(s: String) -> Self {
        Self { s }
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.s
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.s.push_str(s);
    }

    /// Write `node` to the buffer.
    ///
    /// A `base_indent` of zero turns pretty-printing off for the whole subtree; otherwise every
    /// element starts on its own line, indented by its depth.
    pub fn emit(&mut self, node: &Node<'_>, base_indent: usize) -> std::fmt::Result {
        // Compute the indent for the children of the node.
        let child_indent = if base_indent > 0 {
            base_indent.saturating_add(1)
        } else {
            0
        };

        // Get the base indent out of the way.
        new_line_and_indent(&mut self.s, base_indent);

        match node {
            node @ (Node::Number(text) | Node::Identifier(text) | Node::Operator(text)) => {
                let (open, close) = match node {
                    Node::Number(_) => ("<mn>", "</mn>"),
                    Node::Identifier(_) => ("<mi>", "</mi>"),
                    _ => ("<mo>", "</mo>"),
                };
                self.s.push_str(open);
                escape_html_content(&mut self.s, text);
                self.s.push_str(close);
            }
            // The following nodes have exactly two children.
            node @ (Node::Subscript {
                symbol: second,
                target: first,
            }
            | Node::Superscript {
                symbol: second,
                target: first,
            }
            | Node::Overset {
                symbol: second,
                target: first,
            }
            | Node::Underset {
                symbol: second,
                target: first,
            }
            | Node::Frac {
                num: first,
                denom: second,
            }
            | Node::Root(second, first)) => {
                let (open, close) = match node {
                    Node::Subscript { .. } => ("<msub>", "</msub>"),
                    Node::Superscript { .. } => ("<msup>", "</msup>"),
                    Node::Overset { .. } => ("<mover>", "</mover>"),
                    Node::Underset { .. } => ("<munder>", "</munder>"),
                    Node::Frac { .. } => ("<mfrac>", "</mfrac>"),
                    _ => ("<mroot>", "</mroot>"),
                };
                write!(self.s, "{open}")?;
                self.emit(first, child_indent)?;
                self.emit(second, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "{close}");
            }
            Node::SubSup { target, sub, sup } => {
                write!(self.s, "<msubsup>")?;
                self.emit(target, child_indent)?;
                self.emit(sub, child_indent)?;
                self.emit(sup, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</msubsup>");
            }
            Node::Sqrt(content) => {
                write!(self.s, "<msqrt>")?;
                self.emit(content, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</msqrt>");
            }
            Node::Row(nodes) => {
                write!(self.s, "<mrow>")?;
                for node in nodes.iter() {
                    self.emit(node, child_indent)?;
                }
                writeln_indent!(&mut self.s, base_indent, "</mrow>");
            }
            Node::Fenced {
                open,
                close,
                content,
            } => {
                write!(self.s, "<mrow>")?;
                self.emit_delimiter(*open, child_indent);
                self.emit(content, child_indent)?;
                self.emit_delimiter(*close, child_indent);
                writeln_indent!(&mut self.s, base_indent, "</mrow>");
            }
            Node::Styled { variant, content } => {
                write!(self.s, "<mstyle{}>", <&str>::from(variant))?;
                self.emit(content, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</mstyle>");
            }
        }
        Ok(())
    }

    fn emit_delimiter(&mut self, delimiter: char, indent: usize) {
        new_line_and_indent(&mut self.s, indent);
        self.s.push_str("<mo>");
        escape_html_content(&mut self.s, delimiter.encode_utf8(&mut [0; 4]));
        self.s.push_str("</mo>");
    }
}

impl Default for MathMLEmitter {
    fn default() -> Self {
        Self::new()
    }
}
