//! The input side of the conversion: a read-only tree of markup fragments.
//!
//! Fragments are produced by whoever reads the document (an HTML parser, the DOM of a browser
//! page, a test). The converter only ever borrows them.

/// A node of the input markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Element(Element),
    /// A run of literal text.
    Text(Box<str>),
}

/// A markup element with the attributes that matter for recognizing math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Box<str>,
    class: Option<Box<str>>,
    style: Option<Box<str>>,
    children: Vec<Fragment>,
}

impl Fragment {
    #[inline]
    pub fn text(text: impl Into<Box<str>>) -> Self {
        Fragment::Text(text.into())
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Fragment::Element(element) => Some(element),
            Fragment::Text(_) => None,
        }
    }

    /// The text of a text run, `None` for elements.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(text) => Some(text),
            Fragment::Element(_) => None,
        }
    }

    /// Child nodes; a text run has none.
    #[inline]
    pub fn children(&self) -> &[Fragment] {
        match self {
            Fragment::Element(element) => &element.children,
            Fragment::Text(_) => &[],
        }
    }

    /// Whether this is an element with the given tag name (ASCII case-insensitive).
    #[inline]
    pub fn is_element(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|element| element.has_tag(tag))
    }

    /// The concatenated text of all text runs in this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Fragment {
    #[inline]
    fn from(element: Element) -> Self {
        Fragment::Element(element)
    }
}

impl From<&str> for Fragment {
    #[inline]
    fn from(text: &str) -> Self {
        Fragment::Text(text.into())
    }
}

impl Element {
    pub fn new(tag: impl Into<Box<str>>) -> Self {
        Element {
            tag: tag.into(),
            class: None,
            style: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<Box<str>>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<Box<str>>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Fragment>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Fragment>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    #[inline]
    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Whether the `class` attribute is exactly `class`.
    #[inline]
    pub fn class_is(&self, class: &str) -> bool {
        self.class() == Some(class)
    }

    /// Whether `class` is one of the whitespace-separated tokens of the `class` attribute.
    pub fn has_class(&self, class: &str) -> bool {
        self.class()
            .is_some_and(|list| list.split_ascii_whitespace().any(|token| token == class))
    }

    /// Whether the `class` attribute contains `needle` anywhere, even inside a longer name.
    pub fn class_mentions(&self, needle: &str) -> bool {
        self.class().is_some_and(|class| class.contains(needle))
    }

    /// Whether the `style` attribute is exactly `style`.
    #[inline]
    pub fn style_is(&self, style: &str) -> bool {
        self.style() == Some(style)
    }
}
