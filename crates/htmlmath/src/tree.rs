//! The expression tree that sits between recognition and MathML rendering.

use std::fmt;

use strum_macros::IntoStaticStr;

/// The structural role of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    /// A sequence of nodes.
    Row,
    /// A square root: `[radicand]`.
    Sqrt,
    /// A root with a degree: `[radicand, degree]`.
    Radic,
    /// A fraction: `[numerator, denominator]`.
    Frac,
    /// An integral with limits: `[lower, upper]`; the payload holds the integral sign.
    Integral,
    /// A subscript: `[base, script]` once the base is attached.
    Sub,
    /// A superscript: `[base, script]` once the base is attached.
    Sup,
    /// A combined subscript and superscript: `[base, sub, sup]` once the base is attached.
    #[strum(serialize = "su")]
    SubSup,
    /// A matched pair of delimiters around its children.
    Fence,
    /// A literal token.
    Text,
}

/// Kind-dependent data carried by a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    /// The token of a [`Kind::Text`] node.
    Text(Box<str>),
    /// Open and close delimiter of a [`Kind::Fence`] node.
    Delimiters(char, char),
    /// The operator sign of a [`Kind::Integral`] node.
    Glyph(char),
    /// Marks a [`Kind::Sub`] or [`Kind::Sup`] that is placed under or over its base, rather than
    /// beside it.
    Stacked,
}

/// A node of the expression tree.
///
/// Nodes own their children exclusively, so passes can move subtrees around freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: Kind,
    pub payload: Payload,
    pub children: Vec<Node>,
}

static_assertions::assert_impl_all!(Node: Send, Sync);
static_assertions::const_assert!(std::mem::size_of::<Kind>() == 1);

impl Node {
    #[inline]
    pub fn new(kind: Kind, children: Vec<Node>) -> Self {
        Node {
            kind,
            payload: Payload::None,
            children,
        }
    }

    #[inline]
    pub fn with_payload(kind: Kind, payload: Payload, children: Vec<Node>) -> Self {
        Node {
            kind,
            payload,
            children,
        }
    }

    #[inline]
    pub fn text(text: impl Into<Box<str>>) -> Self {
        Node::with_payload(Kind::Text, Payload::Text(text.into()), Vec::new())
    }

    #[inline]
    pub fn row(children: Vec<Node>) -> Self {
        Node::new(Kind::Row, children)
    }

    #[inline]
    pub fn empty_row() -> Self {
        Node::row(Vec::new())
    }

    #[inline]
    pub fn fence(open: char, close: char, children: Vec<Node>) -> Self {
        Node::with_payload(Kind::Fence, Payload::Delimiters(open, close), children)
    }

    /// The token of a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (Kind::Text, Payload::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The character of a text node whose token is exactly one character long.
    pub fn as_single_char(&self) -> Option<char> {
        let mut chars = self.as_text()?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// The number of nodes on the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max
    }

    #[inline]
    pub fn is_stacked(&self) -> bool {
        matches!(self.payload, Payload::Stacked)
    }

    /// The number of children a script node has once its base has been attached.
    #[inline]
    pub(crate) fn complete_script_arity(&self) -> Option<usize> {
        match self.kind {
            Kind::Sub | Kind::Sup => Some(2),
            Kind::SubSup => Some(3),
            _ => None,
        }
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        for _ in 0..level {
            f.write_str("  ")?;
        }
        f.write_str(<&str>::from(self.kind))?;
        f.write_str(":")?;
        match &self.payload {
            Payload::None => {}
            Payload::Text(text) => f.write_str(text)?,
            Payload::Delimiters(open, close) => write!(f, "{open}{close}")?,
            Payload::Glyph(glyph) => write!(f, "{glyph}")?,
            Payload::Stacked => f.write_str("2")?,
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_level(f, level + 1)?;
        }
        Ok(())
    }
}

/// One line per node, `kind:payload`, indented by two spaces per level.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_level(f, 0)
    }
}
