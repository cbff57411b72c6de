//! Recognize math that was written as styled HTML and convert it to MathML.
//!
//! Wikipedia and similar sites often write simple formulas not as MathML but as nested, styled
//! `<span>`s that merely *look* like a square root, a fraction or a subscript. This crate reads
//! such a fragment, recognizes the visual idioms in it, and produces presentation MathML that
//! assistive technology can make sense of.
//!
//! # Usage
//!
//! The input is a [`Fragment`] tree, which the caller builds from whatever HTML parser or DOM
//! it has at hand. The main struct of this library is [`FragmentToMathML`]:
//!
//! ```rust
//! use htmlmath::{Element, Fragment, FragmentToMathML, MathConfig};
//!
//! // <span class="nowrap">√<span>2</span></span>
//! let fragment = Fragment::from(
//!     Element::new("span")
//!         .with_class("nowrap")
//!         .with_child("√")
//!         .with_child(Element::new("span").with_child("2")),
//! );
//! let converter = FragmentToMathML::new(MathConfig::default());
//! let mathml = converter.convert(&fragment).unwrap();
//! assert_eq!(
//!     mathml,
//!     r#"<math xmlns="http://www.w3.org/1998/Math/MathML" role="math"><msqrt><mn>2</mn></msqrt></math>"#
//! );
//! ```
//!
//! To find the fragments of a page that are worth converting, see [`triage`].
//!
//! # Features
//!
//! - `serde`: With this feature, `MathConfig` implements serde's `Deserialize`.
//!
mod builder;
mod character_class;
mod error;
pub mod fragment;
pub mod normalize;
mod render;
mod template;
pub mod tokenizer;
pub mod tree;
pub mod triage;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mathml_renderer::{
    arena::Arena,
    ast::{MathMLEmitter, Node as MathNode},
    attribute::MathVariant,
};

pub use self::builder::build_tree;
pub use self::error::ConvertError;
pub use self::fragment::{Element, Fragment};
pub use self::normalize::normalize;
pub use self::tokenizer::tokenize;
pub use self::tree::Node;

/// Display mode of the generated `<math>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MathDisplay {
    /// Math that flows with the surrounding text.
    #[default]
    Inline,
    /// Math set apart on its own line.
    Block,
}

/// Configuration for pretty-printing the MathML output.
///
/// Pretty-printing means that newlines and indentation is added to the MathML output, to make it
/// easier to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum PrettyPrint {
    /// Never pretty print.
    #[default]
    Never,
    /// Always pretty print.
    Always,
}

/// Configuration object for the conversion.
///
/// # Example usage
///
/// ```rust
/// use htmlmath::{MathConfig, PrettyPrint};
///
/// // Default values
/// let config = MathConfig::default();
/// assert!(config.xml_namespace);
///
/// // Readable output without the namespace declaration
/// let config = MathConfig {
///     pretty_print: PrettyPrint::Always,
///     xml_namespace: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct MathConfig {
    /// A configuration for pretty-printing the MathML output. See [`PrettyPrint`] for details.
    pub pretty_print: PrettyPrint,
    /// If `true`, include `xmlns="http://www.w3.org/1998/Math/MathML"` in the `<math>` tag.
    pub xml_namespace: bool,
    /// If `true`, include `role="math"` in the `<math>` tag. Some browsers need this to expose
    /// the element as math.
    pub math_role: bool,
    /// Whether the `<math>` element is inline or block.
    pub display: MathDisplay,
}

impl Default for MathConfig {
    fn default() -> Self {
        MathConfig {
            pretty_print: PrettyPrint::Never,
            xml_namespace: true,
            math_role: true,
            display: MathDisplay::Inline,
        }
    }
}

/// A converter that transforms visual-math fragments into MathML.
///
/// The converter holds no state besides its configuration, so one instance can convert any
/// number of fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentToMathML {
    config: MathConfig,
}

impl FragmentToMathML {
    pub fn new(config: MathConfig) -> Self {
        FragmentToMathML { config }
    }

    #[inline]
    pub fn config(&self) -> &MathConfig {
        &self.config
    }

    /// Convert one fragment to a `<math>` element.
    ///
    /// Nothing is produced if any part of the fragment fails to convert.
    pub fn convert(&self, fragment: &Fragment) -> Result<String, Box<ConvertError>> {
        let tree = self.expression_tree(fragment)?;
        let arena = Arena::new();
        let mut ast = render::lower(&arena, &tree)?;
        if fragment
            .as_element()
            .is_some_and(|element| element.class_mentions("mathcal"))
        {
            ast = arena.push(MathNode::Styled {
                variant: MathVariant::Script,
                content: ast,
            });
        }

        let mut output = String::new();
        output.push_str("<math");
        if self.config.xml_namespace {
            output.push_str(" xmlns=\"http://www.w3.org/1998/Math/MathML\"");
        }
        if matches!(self.config.display, MathDisplay::Block) {
            output.push_str(" display=\"block\"");
        }
        if self.config.math_role {
            output.push_str(" role=\"math\"");
        }
        output.push('>');

        let pretty_print = matches!(self.config.pretty_print, PrettyPrint::Always);
        let base_indent = if pretty_print { 1 } else { 0 };
        let mut emitter = MathMLEmitter::with_buffer(output);
        // Writing into a `String` cannot fail.
        let _ = emitter.emit(ast, base_indent);
        let mut output = emitter.into_inner();
        if pretty_print {
            output.push('\n');
        }
        output.push_str("</math>");
        Ok(output)
    }

    /// Convert one fragment, logging and swallowing a failure.
    ///
    /// This is the per-fragment failure boundary: a document is converted by calling this for
    /// every candidate, and a fragment that fails is left as it is.
    pub fn convert_or_skip(&self, fragment: &Fragment) -> Option<String> {
        match self.convert(fragment) {
            Ok(mathml) => Some(mathml),
            Err(err) => {
                log::warn!(
                    "skipping fragment {:?}: {err}",
                    fragment.text_content().trim()
                );
                None
            }
        }
    }

    /// The normalized expression tree of a fragment, as it would be rendered.
    pub fn expression_tree(&self, fragment: &Fragment) -> Result<Node, Box<ConvertError>> {
        let mut tree = build_tree(fragment)?;
        normalize(&mut tree);
        builder::check_depth(&tree)?;
        Ok(tree)
    }
}
