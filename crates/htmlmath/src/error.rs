use std::fmt::{self, Write};

use mathml_renderer::html_utils::{escape_double_quoted_html_attribute, escape_html_content};

use crate::template::Template;
use crate::tree::Kind;

/// Represents an error that occurred while converting a fragment.
///
/// A failed conversion produces no markup at all; callers are expected to leave the fragment
/// as it is and carry on with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError(pub(crate) ConvertErrKind);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConvertErrKind {
    /// A template matched, but a child it needs is not there.
    MissingChild {
        template: Template,
        /// Child indices, starting from the element the template matched.
        path: Box<[usize]>,
    },
    /// A node has a number of children that its MathML element cannot take.
    Arity {
        kind: Kind,
        expected: usize,
        got: usize,
    },
    NestingTooDeep,
}

impl ConvertErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            ConvertErrKind::MissingChild { template, path } => {
                let mut text = "Malformed ".to_string() + <&str>::from(template) + ": no child at ";
                for (i, index) in path.iter().enumerate() {
                    if i > 0 {
                        text.push('.');
                    }
                    let _ = write!(text, "{index}");
                }
                text.push('.');
                text
            }
            ConvertErrKind::Arity {
                kind,
                expected,
                got,
            } => {
                format!(
                    "Expected {expected} children in \"{}\" node, but found {got}.",
                    <&str>::from(kind)
                )
            }
            ConvertErrKind::NestingTooDeep => {
                "Nesting limit exceeded. The fragment is too deeply nested.".to_string()
            }
        }
    }
}

impl ConvertError {
    /// Format the error as an HTML snippet that shows the failed fragment's text.
    ///
    /// `css_class` defaults to `"htmlmath-error"`.
    pub fn to_html(&self, source_text: &str, css_class: Option<&str>) -> String {
        let mut output = String::new();
        let css_class = css_class.unwrap_or("htmlmath-error");
        output.push_str("<span class=\"");
        escape_double_quoted_html_attribute(&mut output, css_class);
        output.push_str("\" title=\"");
        escape_double_quoted_html_attribute(&mut output, &self.0.string());
        output.push_str("\"><code>");
        escape_html_content(&mut output, source_text);
        output.push_str("</code></span>");
        output
    }

    pub fn error_message(&self) -> String {
        self.0.string()
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.string())
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_child_message() {
        let err = ConvertError(ConvertErrKind::MissingChild {
            template: Template::Delimiters,
            path: Box::new([1, 0, 0]),
        });
        assert_eq!(
            err.to_string(),
            "Malformed delimiter group: no child at 1.0.0."
        );
    }

    #[test]
    fn arity_message() {
        let err = ConvertError(ConvertErrKind::Arity {
            kind: Kind::Frac,
            expected: 2,
            got: 1,
        });
        assert_eq!(
            err.error_message(),
            "Expected 2 children in \"frac\" node, but found 1."
        );
    }

    #[test]
    fn html_snippet() {
        let err = ConvertError(ConvertErrKind::NestingTooDeep);
        assert_eq!(
            err.to_html("a<b", None),
            "<span class=\"htmlmath-error\" title=\"Nesting limit exceeded. The fragment is too deeply nested.\"><code>a&lt;b</code></span>"
        );
    }
}
