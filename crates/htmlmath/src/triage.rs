//! Finding the fragments of a document that are worth converting.

use crate::fragment::{Element, Fragment};

/// Class names that mark inline math written with HTML.
const MATH_CLASSES: [&str; 3] = ["texhtml", "sfrac", "mathcal"];

/// Whether `element` is a piece of visual math.
///
/// That is the case for anything whose class mentions one of the inline-math class names, and
/// for a `span` with class exactly `nowrap` that does not already carry MathML.
pub fn is_candidate(element: &Element) -> bool {
    MATH_CLASSES
        .iter()
        .any(|class| element.class_mentions(class))
        || (element.has_tag("span") && element.class_is("nowrap") && !contains_mathml(element))
}

/// Collect the candidates in `root`, in document order.
///
/// The subtree of a candidate is not searched any further.
pub fn find_candidates(root: &Fragment) -> Vec<&Fragment> {
    let mut found = Vec::new();
    collect(root, &mut found);
    found
}

fn collect<'a>(fragment: &'a Fragment, found: &mut Vec<&'a Fragment>) {
    let Some(element) = fragment.as_element() else {
        return;
    };
    if is_candidate(element) {
        found.push(fragment);
    } else {
        for child in element.children() {
            collect(child, found);
        }
    }
}

fn contains_mathml(element: &Element) -> bool {
    element.has_tag("math")
        || element.class_mentions("mathml")
        || element
            .children()
            .iter()
            .filter_map(Fragment::as_element)
            .any(contains_mathml)
}
